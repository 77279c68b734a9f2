//! Retouch is a portrait editing toolkit.
//!
//! It covers the parts of an edit workflow that run locally:
//!
//! - Select a crop interactively with a [`CropSession`] and extract it as PNG
//! - Render a breathing-zoom video of a still with the [`MotionSynthesizer`]
//! - Build edit prompts and classify remote edit responses ([`edit`])
#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod foundation;

/// Source image decoding and `data:` URIs.
pub mod assets;
/// Toolkit configuration.
pub mod config;
/// Interactive crop selection.
pub mod crop;
/// Edit prompts and the remote edit contract.
pub mod edit;
/// Encoding sinks.
pub mod encode;
/// Breathing-motion video synthesis.
pub mod motion;
/// CPU drawing.
pub mod render;

pub use crate::foundation::core::{Affine, Canvas, Fps, FrameIndex, PixelRect, Point, Vec2};
pub use crate::foundation::error::{StudioError, StudioResult};

pub use crate::assets::data_uri::DataUri;
pub use crate::assets::decode::{SourceImage, decode_data_uri, decode_image, load_image_path};
pub use crate::config::{CropOpts, MotionOpts, StudioConfig};
pub use crate::crop::aspect::{AspectLock, AspectPreset};
pub use crate::crop::capture::{NoCapture, PointerCapture};
pub use crate::crop::extract::{CroppedImage, extract_region};
pub use crate::crop::handle::Handle;
pub use crate::crop::region::CropRegion;
pub use crate::crop::session::{ContainerSize, CropPhase, CropSession, PointerEvent};
pub use crate::edit::contract::{EditError, EditRequest, EditResponse, TargetAspect};
pub use crate::edit::prompt::{StyleSettings, build_prompt, refine_prompt};
pub use crate::encode::ffmpeg::{FfmpegProbe, FfmpegSink, FfmpegSinkOpts};
pub use crate::encode::format::{EncoderProbe, VideoEncoding};
pub use crate::encode::sink::{FrameSink, InMemorySink, SinkConfig, SinkState};
pub use crate::motion::cancel::CancelToken;
pub use crate::motion::clock::{FixedStepClock, FrameClock, RealtimeClock};
pub use crate::motion::synth::{MotionStats, MotionSynthesizer, VideoArtifact};
pub use crate::render::frame::FrameRGBA;
