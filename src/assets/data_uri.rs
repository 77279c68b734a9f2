use std::fmt;
use std::io::Cursor;

use base64::{Engine, engine::general_purpose::STANDARD};

use crate::foundation::error::{StudioError, StudioResult};

/// A base64 `data:` URI split into its MIME type and payload.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DataUri {
    /// MIME type, e.g. `image/png`.
    pub mime: String,
    /// Base64 payload without the `data:...;base64,` prefix.
    pub payload_b64: String,
}

impl DataUri {
    /// Parse `data:<mime>;base64,<payload>`.
    pub fn parse(s: &str) -> StudioResult<Self> {
        let rest = s
            .strip_prefix("data:")
            .ok_or_else(|| StudioError::validation("data uri must start with 'data:'"))?;
        let (meta, payload) = rest
            .split_once(',')
            .ok_or_else(|| StudioError::validation("data uri is missing the ',' separator"))?;
        let mime = meta
            .strip_suffix(";base64")
            .ok_or_else(|| StudioError::validation("only base64 data uris are supported"))?;
        if mime.is_empty() {
            return Err(StudioError::validation("data uri has an empty mime type"));
        }
        Ok(Self {
            mime: mime.to_string(),
            payload_b64: payload.to_string(),
        })
    }

    /// Build a URI from raw bytes.
    pub fn from_bytes(mime: impl Into<String>, bytes: &[u8]) -> Self {
        Self {
            mime: mime.into(),
            payload_b64: STANDARD.encode(bytes),
        }
    }

    /// Decode the base64 payload.
    pub fn decode_payload(&self) -> StudioResult<Vec<u8>> {
        STANDARD
            .decode(self.payload_b64.as_bytes())
            .map_err(|e| StudioError::validation(format!("invalid base64 payload: {e}")))
    }
}

impl fmt::Display for DataUri {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "data:{};base64,{}", self.mime, self.payload_b64)
    }
}

/// Encode a straight-alpha raster as PNG bytes.
pub fn encode_png(img: &image::RgbaImage) -> StudioResult<Vec<u8>> {
    let mut buf = Vec::new();
    img.write_to(&mut Cursor::new(&mut buf), image::ImageFormat::Png)
        .map_err(|e| StudioError::extraction(format!("png encode failed: {e}")))?;
    Ok(buf)
}

/// Encode a straight-alpha raster as a lossless `data:image/png;base64,...` URI.
pub fn encode_png_data_uri(img: &image::RgbaImage) -> StudioResult<DataUri> {
    Ok(DataUri::from_bytes("image/png", &encode_png(img)?))
}

#[cfg(test)]
#[path = "../../tests/unit/assets/data_uri.rs"]
mod tests;
