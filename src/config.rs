//! Toolkit configuration.
//!
//! A [`StudioConfig`] is plain JSON with per-field defaults, so an empty object `{}` is a valid
//! configuration equal to [`StudioConfig::default`].

use std::path::Path;
use std::time::Duration;

use anyhow::Context as _;

use crate::crop::aspect::AspectPreset;
use crate::edit::prompt::StyleSettings;
use crate::encode::format::VideoEncoding;
use crate::foundation::core::Fps;
use crate::foundation::error::{StudioError, StudioResult};

/// Environment variable that overrides [`MotionOpts::ffmpeg_bin`].
pub const FFMPEG_ENV: &str = "RETOUCH_FFMPEG";

/// Top-level configuration.
#[derive(Clone, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct StudioConfig {
    /// Crop tool options.
    pub crop: CropOpts,
    /// Motion synthesis options.
    pub motion: MotionOpts,
    /// Edit prompt settings.
    pub style: StyleSettings,
}

impl StudioConfig {
    /// Parse and validate a JSON configuration string.
    pub fn from_json_str(json: &str) -> StudioResult<Self> {
        let cfg: Self = serde_json::from_str(json)
            .map_err(|e| StudioError::validation(format!("invalid config JSON: {e}")))?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// Read, parse and validate a JSON configuration file.
    pub fn from_path(path: &Path) -> StudioResult<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("read config '{}'", path.display()))?;
        Self::from_json_str(&text)
    }

    /// Check every section.
    pub fn validate(&self) -> StudioResult<()> {
        self.motion.validate()?;
        self.style.validate()
    }
}

/// Crop tool options.
#[derive(Clone, Copy, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CropOpts {
    /// Aspect preset applied when a session starts.
    pub aspect: AspectPreset,
}

/// Motion synthesis options.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct MotionOpts {
    /// Total length of the recording in milliseconds.
    pub duration_ms: u64,
    /// Output frame rate.
    pub fps: Fps,
    /// Target video bitrate in bits per second.
    pub bitrate_bps: u64,
    /// Cap on the longer output edge, in pixels.
    pub max_dim: u32,
    /// Peak zoom above 1.0 reached mid-cycle.
    pub amplitude: f64,
    /// Acceptable encodings, preferred first.
    pub encodings: Vec<VideoEncoding>,
    /// `ffmpeg` executable used for probing and encoding.
    pub ffmpeg_bin: String,
}

impl Default for MotionOpts {
    fn default() -> Self {
        Self {
            duration_ms: 6000,
            fps: Fps { num: 30, den: 1 },
            bitrate_bps: 5_000_000,
            max_dim: 1080,
            amplitude: 0.02,
            encodings: VideoEncoding::PREFERENCE.to_vec(),
            ffmpeg_bin: "ffmpeg".to_owned(),
        }
    }
}

impl MotionOpts {
    /// Recording length.
    pub fn duration(&self) -> Duration {
        Duration::from_millis(self.duration_ms)
    }

    /// The `ffmpeg` binary to run: `RETOUCH_FFMPEG` when set and non-empty, else `ffmpeg_bin`.
    pub fn resolve_ffmpeg_bin(&self) -> String {
        match std::env::var(FFMPEG_ENV) {
            Ok(bin) if !bin.trim().is_empty() => bin,
            _ => self.ffmpeg_bin.clone(),
        }
    }

    /// Check value ranges.
    pub fn validate(&self) -> StudioResult<()> {
        Fps::new(self.fps.num, self.fps.den)?;
        if self.duration_ms == 0 {
            return Err(StudioError::validation("motion duration_ms must be > 0"));
        }
        if self.bitrate_bps == 0 {
            return Err(StudioError::validation("motion bitrate_bps must be > 0"));
        }
        if self.max_dim == 0 {
            return Err(StudioError::validation("motion max_dim must be > 0"));
        }
        if !self.amplitude.is_finite() || self.amplitude <= -1.0 {
            return Err(StudioError::validation(
                "motion amplitude must be finite and > -1",
            ));
        }
        if self.ffmpeg_bin.trim().is_empty() {
            return Err(StudioError::validation("motion ffmpeg_bin must be non-empty"));
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "../tests/unit/config.rs"]
mod tests;
