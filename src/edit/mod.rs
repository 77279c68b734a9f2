//! Edit prompts and the remote image-edit contract.
//!
//! [`prompt`] turns [`prompt::StyleSettings`] into the instruction text sent with an image.
//! [`contract`] shapes the request body and classifies the response into either an edited image
//! or an [`contract::EditError`]. Transport is left to the caller.

/// Request and response shapes.
pub mod contract;
/// Prompt construction.
pub mod prompt;
