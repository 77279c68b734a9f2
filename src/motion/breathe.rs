use std::f64::consts::TAU;
use std::time::Duration;

use crate::foundation::core::Canvas;
use crate::foundation::error::{StudioError, StudioResult};

/// Fraction of the recording elapsed, clamped to `[0, 1]`.
///
/// A zero `duration` is already complete.
pub fn progress(elapsed: Duration, duration: Duration) -> f64 {
    if duration.is_zero() {
        return 1.0;
    }
    (elapsed.as_nanos() as f64 / duration.as_nanos() as f64).min(1.0)
}

/// One full in-and-out cycle: 0 at both ends, 1 at `p = 0.5`.
pub fn breathe_ease(p: f64) -> f64 {
    (1.0 - (p * TAU).cos()) / 2.0
}

/// Zoom curve of the breathing effect.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Breathing {
    /// Scale added at the peak of the cycle.
    pub amplitude: f64,
}

impl Default for Breathing {
    fn default() -> Self {
        Self { amplitude: 0.02 }
    }
}

impl Breathing {
    /// Scale about the canvas center at `progress`.
    pub fn scale_at(self, progress: f64) -> f64 {
        1.0 + breathe_ease(progress) * self.amplitude
    }
}

/// Output canvas for a `width x height` source with the longer edge capped at `max_dim`.
///
/// Sizes within the cap are kept; larger ones are scaled down preserving aspect, floored to
/// whole pixels and never below 1.
pub fn output_canvas(width: u32, height: u32, max_dim: u32) -> StudioResult<Canvas> {
    if width == 0 || height == 0 {
        return Err(StudioError::validation("source dimensions must be non-zero"));
    }
    if max_dim == 0 {
        return Err(StudioError::validation("max_dim must be > 0"));
    }
    let longer = width.max(height);
    if longer <= max_dim {
        return Ok(Canvas { width, height });
    }
    let fit = |v: u32| {
        let scaled = u64::from(v) * u64::from(max_dim) / u64::from(longer);
        (scaled as u32).clamp(1, max_dim)
    };
    Ok(Canvas {
        width: fit(width),
        height: fit(height),
    })
}

#[cfg(test)]
#[path = "../../tests/unit/motion/breathe.rs"]
mod tests;
