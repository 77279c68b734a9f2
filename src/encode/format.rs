use std::fmt;
use std::str::FromStr;

use crate::foundation::error::{StudioError, StudioResult};

/// Acceptable output encodings, all in a WebM container.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VideoEncoding {
    /// VP9 video.
    Vp9,
    /// VP8 video.
    Vp8,
    /// WebM with whichever video codec the encoder picks.
    Webm,
}

impl VideoEncoding {
    /// Default order, preferred first.
    pub const PREFERENCE: [Self; 3] = [Self::Vp9, Self::Vp8, Self::Webm];

    /// MIME type of the produced file.
    pub fn mime(self) -> &'static str {
        match self {
            Self::Vp9 => "video/webm;codecs=vp9",
            Self::Vp8 => "video/webm;codecs=vp8",
            Self::Webm => "video/webm",
        }
    }

    /// The `ffmpeg` encoder name, `None` to let `ffmpeg` choose.
    pub fn ffmpeg_codec(self) -> Option<&'static str> {
        match self {
            Self::Vp9 => Some("libvpx-vp9"),
            Self::Vp8 => Some("libvpx"),
            Self::Webm => None,
        }
    }

    /// File extension for the container.
    pub fn extension(self) -> &'static str {
        "webm"
    }
}

impl fmt::Display for VideoEncoding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.mime())
    }
}

impl FromStr for VideoEncoding {
    type Err = StudioError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "vp9" | "video/webm;codecs=vp9" => Ok(Self::Vp9),
            "vp8" | "video/webm;codecs=vp8" => Ok(Self::Vp8),
            "webm" | "video/webm" => Ok(Self::Webm),
            other => Err(StudioError::validation(format!(
                "unknown video encoding '{other}'"
            ))),
        }
    }
}

/// Answers whether the runtime can produce an encoding.
pub trait EncoderProbe {
    /// Return `true` when `encoding` can be produced.
    fn supports(&self, encoding: VideoEncoding) -> bool;
}

/// Pick the first encoding in `preference` that `probe` supports.
pub fn negotiate(
    preference: &[VideoEncoding],
    probe: &dyn EncoderProbe,
) -> StudioResult<VideoEncoding> {
    match preference.iter().copied().find(|e| probe.supports(*e)) {
        Some(encoding) => {
            tracing::debug!(%encoding, "negotiated video encoding");
            Ok(encoding)
        }
        None => {
            let tried = preference
                .iter()
                .map(|e| e.mime())
                .collect::<Vec<_>>()
                .join(", ");
            Err(StudioError::unsupported_format(format!(
                "video recording is not available: none of [{tried}] can be encoded"
            )))
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/encode/format.rs"]
mod tests;
