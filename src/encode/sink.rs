use crate::encode::format::VideoEncoding;
use crate::foundation::core::{Fps, FrameIndex};
use crate::foundation::error::{StudioError, StudioResult};
use crate::render::frame::FrameRGBA;

/// Configuration provided to a [`FrameSink`] before the first frame.
#[derive(Debug, Clone)]
pub struct SinkConfig {
    /// Output width in pixels.
    pub width: u32,
    /// Output height in pixels.
    pub height: u32,
    /// Output frames-per-second.
    pub fps: Fps,
    /// Target video bitrate in bits per second.
    pub bitrate_bps: u64,
    /// Negotiated output encoding.
    pub encoding: VideoEncoding,
}

/// Sink contract for consuming rendered frames in timeline order.
///
/// Ordering contract: `push_frame` is called in strictly increasing `FrameIndex` order. A sink
/// is finished by exactly one of `end` (finalize the artifact) or `abort` (discard it).
pub trait FrameSink: Send {
    /// Called once before any frames are pushed.
    fn begin(&mut self, cfg: SinkConfig) -> StudioResult<()>;
    /// Push one frame in strictly increasing timeline order.
    fn push_frame(&mut self, idx: FrameIndex, frame: &FrameRGBA) -> StudioResult<()>;
    /// Called once after the last frame is pushed; finalizes the artifact.
    fn end(&mut self) -> StudioResult<()>;
    /// Stop recording and discard any partial output. Safe to call in any state.
    fn abort(&mut self);
}

/// Lifecycle of an [`InMemorySink`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum SinkState {
    /// `begin` not called yet.
    #[default]
    Idle,
    /// Accepting frames.
    Recording,
    /// `end` completed.
    Finalized,
    /// `abort` discarded the frames.
    Aborted,
}

/// In-memory sink for tests and debugging.
#[derive(Debug, Default)]
pub struct InMemorySink {
    cfg: Option<SinkConfig>,
    state: SinkState,
    frames: Vec<(FrameIndex, FrameRGBA)>,
}

impl InMemorySink {
    /// Create a new in-memory sink.
    pub fn new() -> Self {
        Self::default()
    }

    /// Return the sink configuration captured in `begin`, if any.
    pub fn config(&self) -> Option<SinkConfig> {
        self.cfg.clone()
    }

    /// Current lifecycle state.
    pub fn state(&self) -> SinkState {
        self.state
    }

    /// Borrow the captured frames.
    pub fn frames(&self) -> &[(FrameIndex, FrameRGBA)] {
        &self.frames
    }
}

impl FrameSink for InMemorySink {
    fn begin(&mut self, cfg: SinkConfig) -> StudioResult<()> {
        self.cfg = Some(cfg);
        self.frames.clear();
        self.state = SinkState::Recording;
        Ok(())
    }

    fn push_frame(&mut self, idx: FrameIndex, frame: &FrameRGBA) -> StudioResult<()> {
        if self.state != SinkState::Recording {
            return Err(StudioError::encode("in-memory sink is not recording"));
        }
        if let Some((last, _)) = self.frames.last()
            && idx <= *last
        {
            return Err(StudioError::encode(
                "in-memory sink received out-of-order frame index",
            ));
        }
        self.frames.push((idx, frame.clone()));
        Ok(())
    }

    fn end(&mut self) -> StudioResult<()> {
        if self.state != SinkState::Recording {
            return Err(StudioError::encode("in-memory sink is not recording"));
        }
        self.state = SinkState::Finalized;
        Ok(())
    }

    fn abort(&mut self) {
        self.frames.clear();
        self.state = SinkState::Aborted;
    }
}

#[cfg(test)]
#[path = "../../tests/unit/encode/sink.rs"]
mod tests;
