use std::fmt;
use std::str::FromStr;

use crate::assets::data_uri::DataUri;
use crate::foundation::error::{StudioError, StudioResult};

/// MIME type assumed for raw base64 input without a `data:` prefix.
pub const DEFAULT_INPUT_MIME: &str = "image/jpeg";
/// MIME type assumed for returned images that do not declare one.
pub const DEFAULT_OUTPUT_MIME: &str = "image/png";

/// Aspect ratio requested for the edited image.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub enum TargetAspect {
    /// Let the service decide; omitted from the request.
    #[serde(rename = "AUTO")]
    Auto,
    /// 1:1.
    #[default]
    #[serde(rename = "1:1")]
    Square,
    /// 3:4.
    #[serde(rename = "3:4")]
    Portrait3x4,
    /// 4:3.
    #[serde(rename = "4:3")]
    Landscape4x3,
    /// 9:16.
    #[serde(rename = "9:16")]
    Portrait9x16,
    /// 16:9.
    #[serde(rename = "16:9")]
    Landscape16x9,
    /// 21:9.
    #[serde(rename = "21:9")]
    Cinema21x9,
}

impl TargetAspect {
    /// All values in display order.
    pub const ALL: [Self; 7] = [
        Self::Auto,
        Self::Square,
        Self::Portrait3x4,
        Self::Landscape4x3,
        Self::Portrait9x16,
        Self::Landscape16x9,
        Self::Cinema21x9,
    ];

    /// Label as sent on the wire.
    pub fn label(self) -> &'static str {
        match self {
            Self::Auto => "AUTO",
            Self::Square => "1:1",
            Self::Portrait3x4 => "3:4",
            Self::Landscape4x3 => "4:3",
            Self::Portrait9x16 => "9:16",
            Self::Landscape16x9 => "16:9",
            Self::Cinema21x9 => "21:9",
        }
    }

    /// Value for the request body, `None` for [`TargetAspect::Auto`].
    pub fn request_value(self) -> Option<&'static str> {
        match self {
            Self::Auto => None,
            other => Some(other.label()),
        }
    }
}

impl fmt::Display for TargetAspect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for TargetAspect {
    type Err = StudioError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let needle = s.trim();
        Self::ALL
            .into_iter()
            .find(|a| a.label().eq_ignore_ascii_case(needle))
            .ok_or_else(|| StudioError::validation(format!("unknown target aspect '{needle}'")))
    }
}

/// Why an edit call produced no image. None of these are retried.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum EditError {
    /// The response carried no candidates.
    #[error(
        "no candidates returned from the model; the service might be temporarily unavailable"
    )]
    NoCandidates,

    /// Generation stopped on a safety filter.
    #[error("generation was blocked due to safety settings")]
    SafetyBlocked,

    /// The model declined the request.
    #[error(
        "the model refused to process this request (finish reason: {reason}); try describing the visual style instead of asking for an exact likeness"
    )]
    Refused {
        /// Finish reason reported by the service.
        reason: String,
    },

    /// The candidate had no content parts.
    #[error("the model returned no content (finish reason: {finish_reason})")]
    EmptyContent {
        /// Finish reason reported by the service, `Unknown` when absent.
        finish_reason: String,
    },

    /// The model answered with text instead of an image.
    #[error("model refusal: {0}")]
    ModelRefusal(String),

    /// Content parts held neither an image nor text.
    #[error("no image data found in the response")]
    NoImage,
}

/// One edit call: a source image, the instruction and the desired framing.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EditRequest {
    /// MIME type of `data`.
    pub mime_type: String,
    /// Base64 image payload without any `data:` prefix.
    pub data: String,
    /// Edit instruction.
    pub prompt: String,
    /// Requested output aspect.
    pub aspect: TargetAspect,
}

impl EditRequest {
    /// Build a request from a `data:` URI or raw base64.
    ///
    /// Raw base64 is assumed to be [`DEFAULT_INPUT_MIME`].
    pub fn from_image(
        image: &str,
        prompt: impl Into<String>,
        aspect: TargetAspect,
    ) -> StudioResult<Self> {
        let image = image.trim();
        let (mime_type, data) = match DataUri::parse(image) {
            Ok(uri) => (uri.mime, uri.payload_b64),
            Err(_) => match image.split_once(',') {
                Some((_, payload)) => (DEFAULT_INPUT_MIME.to_owned(), payload.to_owned()),
                None => (DEFAULT_INPUT_MIME.to_owned(), image.to_owned()),
            },
        };
        if data.is_empty() {
            return Err(StudioError::validation("edit request image payload is empty"));
        }
        let prompt = prompt.into();
        if prompt.trim().is_empty() {
            return Err(StudioError::validation("edit request prompt is empty"));
        }
        Ok(Self {
            mime_type,
            data,
            prompt,
            aspect,
        })
    }

    /// Request body: the image part, then the text part, then the image config.
    pub fn to_json(&self) -> serde_json::Value {
        let mut image_config = serde_json::Map::new();
        if let Some(ratio) = self.aspect.request_value() {
            image_config.insert("aspectRatio".to_owned(), ratio.into());
        }
        serde_json::json!({
            "contents": {
                "parts": [
                    { "inlineData": { "mimeType": self.mime_type, "data": self.data } },
                    { "text": self.prompt },
                ]
            },
            "config": { "imageConfig": image_config },
        })
    }
}

/// Response body of an edit call.
#[derive(Clone, Debug, Default, PartialEq, Eq, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EditResponse {
    /// Candidate results; only the first is considered.
    #[serde(default)]
    pub candidates: Vec<Candidate>,
}

/// One candidate result.
#[derive(Clone, Debug, Default, PartialEq, Eq, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Candidate {
    /// Why generation stopped, e.g. `STOP` or `SAFETY`.
    #[serde(default)]
    pub finish_reason: Option<String>,
    /// Generated content.
    #[serde(default)]
    pub content: Option<Content>,
}

/// Content of a candidate.
#[derive(Clone, Debug, Default, PartialEq, Eq, serde::Deserialize)]
pub struct Content {
    /// Parts in the order produced.
    #[serde(default)]
    pub parts: Vec<Part>,
}

/// A single content part: inline data, text, or neither.
#[derive(Clone, Debug, Default, PartialEq, Eq, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Part {
    /// Inline binary payload.
    #[serde(default)]
    pub inline_data: Option<InlineData>,
    /// Text payload.
    #[serde(default)]
    pub text: Option<String>,
}

/// Base64 payload with its MIME type.
#[derive(Clone, Debug, Default, PartialEq, Eq, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InlineData {
    /// MIME type of `data`.
    #[serde(default)]
    pub mime_type: Option<String>,
    /// Base64 payload.
    #[serde(default)]
    pub data: Option<String>,
}

impl EditResponse {
    /// Parse a JSON response body.
    pub fn from_json_str(json: &str) -> StudioResult<Self> {
        serde_json::from_str(json)
            .map_err(|e| StudioError::validation(format!("invalid edit response JSON: {e}")))
    }

    /// Classify the response: the first inline image wins, everything else is an [`EditError`].
    pub fn into_image(self) -> Result<DataUri, EditError> {
        let candidate = self
            .candidates
            .into_iter()
            .next()
            .ok_or(EditError::NoCandidates)?;

        match candidate.finish_reason.as_deref() {
            Some("SAFETY") => return Err(EditError::SafetyBlocked),
            Some(reason @ ("IMAGE_OTHER" | "OTHER")) => {
                return Err(EditError::Refused {
                    reason: reason.to_owned(),
                });
            }
            _ => {}
        }

        let parts = candidate.content.map(|c| c.parts).unwrap_or_default();
        if parts.is_empty() {
            return Err(EditError::EmptyContent {
                finish_reason: candidate
                    .finish_reason
                    .filter(|r| !r.is_empty())
                    .unwrap_or_else(|| "Unknown".to_owned()),
            });
        }

        let image = parts.iter().find_map(|p| {
            let inline = p.inline_data.as_ref()?;
            let data = inline.data.as_deref().filter(|d| !d.is_empty())?;
            let mime = inline
                .mime_type
                .as_deref()
                .filter(|m| !m.is_empty())
                .unwrap_or(DEFAULT_OUTPUT_MIME);
            Some(DataUri {
                mime: mime.to_owned(),
                payload_b64: data.to_owned(),
            })
        });
        if let Some(uri) = image {
            return Ok(uri);
        }

        match parts
            .into_iter()
            .find_map(|p| p.text.filter(|t| !t.is_empty()))
        {
            Some(text) => Err(EditError::ModelRefusal(text)),
            None => Err(EditError::NoImage),
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/edit/contract.rs"]
mod tests;
