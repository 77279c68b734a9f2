//! Encoding sinks.
//!
//! Sinks consume rendered frames in timeline order. The motion synthesizer negotiates a
//! [`format::VideoEncoding`] and streams frames into a [`sink::FrameSink`].

/// `ffmpeg`-based sink (WebM output via system `ffmpeg`).
pub mod ffmpeg;
/// Output encodings and negotiation.
pub mod format;
/// Generic frame sink trait and the in-memory sink.
pub mod sink;
