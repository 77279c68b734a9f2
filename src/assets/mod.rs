//! Source image loading and data-URI encoding.

/// `data:` URI parsing and PNG encoding.
pub mod data_uri;
/// Image decoding into [`decode::SourceImage`].
pub mod decode;
