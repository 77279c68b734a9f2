use std::str::FromStr;

use crate::foundation::core::PixelRect;
use crate::foundation::error::{StudioError, StudioResult};

/// Minimum width and height of a crop region, in percent.
pub const MIN_SIZE: f64 = 10.0;

/// Margin of the default region from every container edge, in percent.
pub const DEFAULT_INSET: f64 = 10.0;

/// Slack allowed on invariant checks to absorb floating-point rounding.
pub(crate) const EPSILON: f64 = 1e-9;

/// Rectangular crop area in percent (0..=100) of the container's rendered size.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct CropRegion {
    /// Left edge.
    pub x: f64,
    /// Top edge.
    pub y: f64,
    /// Width.
    pub width: f64,
    /// Height.
    pub height: f64,
}

impl Default for CropRegion {
    fn default() -> Self {
        Self {
            x: DEFAULT_INSET,
            y: DEFAULT_INSET,
            width: 100.0 - 2.0 * DEFAULT_INSET,
            height: 100.0 - 2.0 * DEFAULT_INSET,
        }
    }
}

impl CropRegion {
    /// Build a region and check its invariants.
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> StudioResult<Self> {
        let r = Self {
            x,
            y,
            width,
            height,
        };
        r.validate()?;
        Ok(r)
    }

    /// Check `0 <= x`, `0 <= y`, `x + width <= 100`, `y + height <= 100` and the size floor.
    pub fn validate(&self) -> StudioResult<()> {
        let vals = [self.x, self.y, self.width, self.height];
        if vals.iter().any(|v| !v.is_finite()) {
            return Err(StudioError::geometry("crop region values must be finite"));
        }
        if self.x < -EPSILON || self.y < -EPSILON {
            return Err(StudioError::geometry(format!(
                "crop origin ({}, {}) is outside the container",
                self.x, self.y
            )));
        }
        if self.width < MIN_SIZE - EPSILON || self.height < MIN_SIZE - EPSILON {
            return Err(StudioError::geometry(format!(
                "crop size {}x{} is below the {MIN_SIZE}% minimum",
                self.width, self.height
            )));
        }
        if self.right() > 100.0 + EPSILON || self.bottom() > 100.0 + EPSILON {
            return Err(StudioError::geometry(format!(
                "crop region extends past the container (right {}, bottom {})",
                self.right(),
                self.bottom()
            )));
        }
        Ok(())
    }

    /// Right edge, `x + width`.
    pub fn right(&self) -> f64 {
        self.x + self.width
    }

    /// Bottom edge, `y + height`.
    pub fn bottom(&self) -> f64 {
        self.y + self.height
    }

    /// Convert to a pixel rectangle against an image's natural size.
    ///
    /// Each of the four values is rounded on its own, then the result is clamped into the
    /// image so it never addresses pixels outside `natural_width x natural_height`.
    pub fn to_pixel_rect(&self, natural_width: u32, natural_height: u32) -> PixelRect {
        let nw = f64::from(natural_width);
        let nh = f64::from(natural_height);

        let x = round_px(self.x / 100.0 * nw).min(natural_width);
        let y = round_px(self.y / 100.0 * nh).min(natural_height);
        let width = round_px(self.width / 100.0 * nw).min(natural_width - x);
        let height = round_px(self.height / 100.0 * nh).min(natural_height - y);

        PixelRect {
            x,
            y,
            width,
            height,
        }
    }
}

fn round_px(v: f64) -> u32 {
    if !v.is_finite() || v <= 0.0 {
        return 0;
    }
    v.round().min(f64::from(u32::MAX)) as u32
}

/// Parses `x,y,width,height` in percent.
impl FromStr for CropRegion {
    type Err = StudioError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let parts = s
            .split(',')
            .map(|p| {
                p.trim()
                    .parse::<f64>()
                    .map_err(|e| StudioError::validation(format!("invalid region value '{p}': {e}")))
            })
            .collect::<StudioResult<Vec<_>>>()?;
        let &[x, y, width, height] = parts.as_slice() else {
            return Err(StudioError::validation(
                "region must have four values: x,y,width,height",
            ));
        };
        Self::new(x, y, width, height)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/crop/region.rs"]
mod tests;
