use std::fmt;
use std::str::FromStr;

use crate::foundation::error::{StudioError, StudioResult};

/// Constraint applied to resizes.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub enum AspectLock {
    /// Width and height resize independently.
    #[default]
    Free,
    /// Width / height is held at this ratio (in output pixels).
    Ratio(f64),
}

impl AspectLock {
    /// Lock to `width / height = ratio`.
    pub fn fixed(ratio: f64) -> StudioResult<Self> {
        if !ratio.is_finite() || ratio <= 0.0 {
            return Err(StudioError::validation(format!(
                "aspect ratio must be positive and finite, got {ratio}"
            )));
        }
        Ok(Self::Ratio(ratio))
    }

    /// Factor converting a width percentage into the paired height percentage.
    ///
    /// Percentages are relative to the container on each axis, so a pixel ratio `r` inside a
    /// container of aspect `a` becomes `height% = width% * a / r`.
    pub fn ratio_factor(self, container_aspect: f64) -> Option<f64> {
        match self {
            Self::Free => None,
            Self::Ratio(r) => Some(container_aspect / r),
        }
    }
}

/// The aspect presets offered by the crop tool.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub enum AspectPreset {
    /// No constraint.
    #[default]
    #[serde(rename = "free")]
    Free,
    /// 1:1.
    #[serde(rename = "1:1")]
    Square,
    /// 9:16.
    #[serde(rename = "9:16")]
    Portrait9x16,
    /// 16:9.
    #[serde(rename = "16:9")]
    Landscape16x9,
    /// 21:9.
    #[serde(rename = "21:9")]
    Cinema21x9,
    /// 4:3.
    #[serde(rename = "4:3")]
    Standard4x3,
    /// 3:4.
    #[serde(rename = "3:4")]
    Standard3x4,
}

impl AspectPreset {
    /// All presets in display order.
    pub const ALL: [Self; 7] = [
        Self::Free,
        Self::Square,
        Self::Portrait9x16,
        Self::Landscape16x9,
        Self::Cinema21x9,
        Self::Standard4x3,
        Self::Standard3x4,
    ];

    /// Short label, e.g. `16:9`.
    pub fn label(self) -> &'static str {
        match self {
            Self::Free => "free",
            Self::Square => "1:1",
            Self::Portrait9x16 => "9:16",
            Self::Landscape16x9 => "16:9",
            Self::Cinema21x9 => "21:9",
            Self::Standard4x3 => "4:3",
            Self::Standard3x4 => "3:4",
        }
    }

    /// Width / height ratio, `None` for [`AspectPreset::Free`].
    pub fn ratio(self) -> Option<f64> {
        match self {
            Self::Free => None,
            Self::Square => Some(1.0),
            Self::Portrait9x16 => Some(9.0 / 16.0),
            Self::Landscape16x9 => Some(16.0 / 9.0),
            Self::Cinema21x9 => Some(21.0 / 9.0),
            Self::Standard4x3 => Some(4.0 / 3.0),
            Self::Standard3x4 => Some(3.0 / 4.0),
        }
    }

    /// The lock this preset applies.
    pub fn lock(self) -> AspectLock {
        match self.ratio() {
            None => AspectLock::Free,
            Some(r) => AspectLock::Ratio(r),
        }
    }
}

impl fmt::Display for AspectPreset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for AspectPreset {
    type Err = StudioError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        Self::ALL
            .into_iter()
            .find(|p| p.label().eq_ignore_ascii_case(s))
            .ok_or_else(|| {
                StudioError::validation(format!(
                    "unknown aspect preset '{s}' (expected one of free, 1:1, 9:16, 16:9, 21:9, 4:3, 3:4)"
                ))
            })
    }
}

#[cfg(test)]
#[path = "../../tests/unit/crop/aspect.rs"]
mod tests;
