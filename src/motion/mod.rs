//! Breathing-motion video synthesis.
//!
//! A source image is redrawn once per clock tick with a slow zoom in and out about the canvas
//! center, and each frame is streamed into an encoding sink:
//!
//! 1. [`breathe`] maps elapsed time to progress and zoom scale.
//! 2. [`job::MotionJob`] owns the output surface and draws one frame for an elapsed time.
//! 3. [`synth`] drives the job with a [`clock::FrameClock`] until progress reaches 1, honoring a
//!    [`cancel::CancelToken`].

/// Progress, easing and output sizing.
pub mod breathe;
/// Cooperative cancellation.
pub mod cancel;
/// Frame clocks.
pub mod clock;
/// Per-call drawing state.
pub mod job;
/// The synthesis loop and artifact.
pub mod synth;
