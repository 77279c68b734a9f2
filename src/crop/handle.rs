use std::str::FromStr;

use crate::foundation::error::StudioError;

/// A grip the user drags: the region body or one of its four corners.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Handle {
    /// Translate the whole region.
    Move,
    /// Top-left corner.
    Nw,
    /// Top-right corner.
    Ne,
    /// Bottom-left corner.
    Sw,
    /// Bottom-right corner.
    Se,
}

impl Handle {
    /// `true` for the four corner handles.
    pub fn is_resize(self) -> bool {
        !matches!(self, Self::Move)
    }

    /// The handle adjusts the top edge.
    pub fn north(self) -> bool {
        matches!(self, Self::Nw | Self::Ne)
    }

    /// The handle adjusts the bottom edge.
    pub fn south(self) -> bool {
        matches!(self, Self::Sw | Self::Se)
    }

    /// The handle adjusts the left edge.
    pub fn west(self) -> bool {
        matches!(self, Self::Nw | Self::Sw)
    }

    /// The handle adjusts the right edge.
    pub fn east(self) -> bool {
        matches!(self, Self::Ne | Self::Se)
    }
}

impl FromStr for Handle {
    type Err = StudioError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "move" => Ok(Self::Move),
            "nw" => Ok(Self::Nw),
            "ne" => Ok(Self::Ne),
            "sw" => Ok(Self::Sw),
            "se" => Ok(Self::Se),
            other => Err(StudioError::validation(format!("unknown handle '{other}'"))),
        }
    }
}
