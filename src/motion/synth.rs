use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::assets::decode::{SourceImage, decode_image};
use crate::config::MotionOpts;
use crate::encode::ffmpeg::{FfmpegProbe, FfmpegSink, FfmpegSinkOpts};
use crate::encode::format::{EncoderProbe, VideoEncoding, negotiate};
use crate::encode::sink::{FrameSink, SinkConfig};
use crate::foundation::core::{Canvas, Fps, FrameIndex};
use crate::foundation::error::{StudioError, StudioResult};
use crate::motion::cancel::CancelToken;
use crate::motion::clock::{FixedStepClock, FrameClock};
use crate::motion::job::MotionJob;

/// Summary of a finished recording.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MotionStats {
    /// Encoding the frames were recorded with.
    pub encoding: VideoEncoding,
    /// Output dimensions.
    pub canvas: Canvas,
    /// Number of frames pushed.
    pub frames: u64,
}

/// A finished video file.
#[derive(Clone, Debug, PartialEq)]
pub struct VideoArtifact {
    /// Absolute path of the file.
    pub path: PathBuf,
    /// Encoding of the file.
    pub encoding: VideoEncoding,
    /// Output dimensions.
    pub canvas: Canvas,
    /// Output frame rate.
    pub fps: Fps,
    /// Number of frames recorded.
    pub frames: u64,
    /// Intended playback length.
    pub duration: Duration,
}

impl VideoArtifact {
    /// `file://` URI of the video.
    pub fn uri(&self) -> String {
        format!("file://{}", self.path.display())
    }

    /// MIME type of the video.
    pub fn mime(&self) -> &'static str {
        self.encoding.mime()
    }
}

/// Drive `job` into `sink` until progress reaches 1.
///
/// The sink is finalized on success. On cancellation or any draw or sink error it is aborted,
/// discarding partial output, and the error is returned.
pub fn run_job(
    job: &mut MotionJob,
    sink: &mut dyn FrameSink,
    cfg: SinkConfig,
    clock: &mut dyn FrameClock,
    cancel: &CancelToken,
) -> StudioResult<u64> {
    match drive(job, sink, cfg, clock, cancel) {
        Ok(frames) => Ok(frames),
        Err(e) => {
            sink.abort();
            if matches!(e, StudioError::Cancelled(_)) {
                tracing::warn!("motion recording cancelled");
            } else {
                tracing::warn!(error = %e, "motion recording failed");
            }
            Err(e)
        }
    }
}

fn drive(
    job: &mut MotionJob,
    sink: &mut dyn FrameSink,
    cfg: SinkConfig,
    clock: &mut dyn FrameClock,
    cancel: &CancelToken,
) -> StudioResult<u64> {
    sink.begin(cfg)?;
    let mut idx = 0u64;
    loop {
        if cancel.is_cancelled() {
            return Err(StudioError::cancelled(format!(
                "recording stopped after {idx} frames"
            )));
        }
        let sample = job.render_at(clock.tick())?;
        sink.push_frame(FrameIndex(idx), job.frame())?;
        idx += 1;
        if sample.progress >= 1.0 {
            break;
        }
    }
    sink.end()?;
    Ok(idx)
}

/// Renders the breathing zoom of a still image into a video.
#[derive(Clone, Debug, Default)]
pub struct MotionSynthesizer {
    opts: MotionOpts,
}

impl MotionSynthesizer {
    /// Create a synthesizer with validated options.
    pub fn new(opts: MotionOpts) -> StudioResult<Self> {
        opts.validate()?;
        Ok(Self { opts })
    }

    /// Options in use.
    pub fn opts(&self) -> &MotionOpts {
        &self.opts
    }

    /// Record `source` into an arbitrary sink with an already negotiated encoding.
    #[tracing::instrument(skip(self, source, sink, clock, cancel))]
    pub fn synthesize_with(
        &self,
        source: &SourceImage,
        sink: &mut dyn FrameSink,
        encoding: VideoEncoding,
        clock: &mut dyn FrameClock,
        cancel: &CancelToken,
    ) -> StudioResult<MotionStats> {
        let mut job = MotionJob::new(source, &self.opts)?;
        let canvas = job.canvas();
        let cfg = SinkConfig {
            width: canvas.width,
            height: canvas.height,
            fps: self.opts.fps,
            bitrate_bps: self.opts.bitrate_bps,
            encoding,
        };
        let frames = run_job(&mut job, sink, cfg, clock, cancel)?;
        tracing::info!(
            width = canvas.width,
            height = canvas.height,
            frames,
            "motion recording finished"
        );
        Ok(MotionStats {
            encoding,
            canvas,
            frames,
        })
    }

    /// Record `source` to a WebM file at `out_path`, probing the configured `ffmpeg`.
    pub fn synthesize(
        &self,
        source: &SourceImage,
        out_path: &Path,
        cancel: &CancelToken,
    ) -> StudioResult<VideoArtifact> {
        let bin = self.opts.resolve_ffmpeg_bin();
        let probe = FfmpegProbe::detect(&bin);
        self.synthesize_probed(source, out_path, &probe, cancel)
    }

    /// Decode `bytes` and record them like [`MotionSynthesizer::synthesize`].
    pub fn synthesize_bytes(
        &self,
        bytes: &[u8],
        out_path: &Path,
        cancel: &CancelToken,
    ) -> StudioResult<VideoArtifact> {
        let source = decode_image(bytes)?;
        self.synthesize(&source, out_path, cancel)
    }

    /// Record to `out_path` using `probe` to pick the encoding.
    ///
    /// The source is checked before negotiation, so an unloaded image is a load error even
    /// when no encoder is available.
    #[tracing::instrument(skip(self, source, out_path, probe, cancel), fields(out = %out_path.display()))]
    pub fn synthesize_probed(
        &self,
        source: &SourceImage,
        out_path: &Path,
        probe: &dyn EncoderProbe,
        cancel: &CancelToken,
    ) -> StudioResult<VideoArtifact> {
        if !source.is_loaded() {
            return Err(StudioError::load("source image has no pixel data"));
        }
        let encoding = negotiate(&self.opts.encodings, probe)?;

        let path = std::path::absolute(out_path)
            .map_err(|e| StudioError::validation(format!("invalid output path: {e}")))?;
        let mut sink = FfmpegSink::new(FfmpegSinkOpts {
            ffmpeg_bin: self.opts.resolve_ffmpeg_bin(),
            ..FfmpegSinkOpts::new(path.clone())
        });
        let mut clock = FixedStepClock::new(self.opts.fps);
        let stats = self.synthesize_with(source, &mut sink, encoding, &mut clock, cancel)?;

        Ok(VideoArtifact {
            path,
            encoding: stats.encoding,
            canvas: stats.canvas,
            fps: self.opts.fps,
            frames: stats.frames,
            duration: self.opts.duration(),
        })
    }
}

#[cfg(test)]
#[path = "../../tests/unit/motion/synth.rs"]
mod tests;
