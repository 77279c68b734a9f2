use crate::encode::format::{EncoderProbe, VideoEncoding};
use crate::encode::sink::{FrameSink, SinkConfig};
use crate::foundation::core::{Fps, FrameIndex};
use crate::foundation::error::{StudioError, StudioResult};
use crate::render::frame::FrameRGBA;
use std::collections::HashSet;
use std::io::Read;
use std::path::{Path, PathBuf};
use std::process::{Child, ChildStdin, Command, Stdio};

/// Video encoders that can fill a WebM container when no codec is pinned.
const WEBM_FALLBACK_ENCODERS: [&str; 5] =
    ["libvpx-vp9", "libvpx", "libaom-av1", "libsvtav1", "librav1e"];

/// Encoder and muxer listings reported by an `ffmpeg` binary.
#[derive(Clone, Debug, Default)]
pub struct FfmpegProbe {
    encoders: HashSet<String>,
    muxers: HashSet<String>,
}

impl FfmpegProbe {
    /// Query `bin -encoders` and `bin -muxers`.
    ///
    /// A missing or failing binary yields an empty probe, which supports nothing.
    #[tracing::instrument]
    pub fn detect(bin: &str) -> Self {
        let encoders = list_ffmpeg(bin, "-encoders").unwrap_or_default();
        let muxers = list_ffmpeg(bin, "-muxers").unwrap_or_default();
        let probe = Self::from_listings(&encoders, &muxers);
        tracing::debug!(
            encoders = probe.encoders.len(),
            muxers = probe.muxers.len(),
            "probed ffmpeg"
        );
        probe
    }

    /// Build a probe from the text printed by `ffmpeg -encoders` and `ffmpeg -muxers`.
    ///
    /// Rows look like ` V....D libvpx-vp9    libvpx VP9`; the second column is the name.
    pub fn from_listings(encoders: &str, muxers: &str) -> Self {
        Self {
            encoders: listing_names(encoders),
            muxers: listing_names(muxers),
        }
    }

    /// `true` when the named encoder was listed.
    pub fn has_encoder(&self, name: &str) -> bool {
        self.encoders.contains(name)
    }

    /// `true` when the named muxer was listed.
    pub fn has_muxer(&self, name: &str) -> bool {
        self.muxers.contains(name)
    }
}

impl EncoderProbe for FfmpegProbe {
    fn supports(&self, encoding: VideoEncoding) -> bool {
        if !self.has_muxer("webm") {
            return false;
        }
        match encoding.ffmpeg_codec() {
            Some(codec) => self.has_encoder(codec),
            None => WEBM_FALLBACK_ENCODERS
                .iter()
                .any(|name| self.has_encoder(name)),
        }
    }
}

fn list_ffmpeg(bin: &str, flag: &str) -> Option<String> {
    let out = Command::new(bin)
        .args(["-hide_banner", flag])
        .stdin(Stdio::null())
        .stderr(Stdio::null())
        .output()
        .ok()?;
    out.status
        .success()
        .then(|| String::from_utf8_lossy(&out.stdout).into_owned())
}

fn listing_names(listing: &str) -> HashSet<String> {
    // Skip the legend above the `------` separator when present.
    let body = match listing.split_once("\n --") {
        Some((_, rest)) => rest.split_once('\n').map(|(_, r)| r).unwrap_or(""),
        None => listing,
    };
    body.lines()
        .filter_map(|line| {
            let mut cols = line.split_whitespace();
            let _flags = cols.next()?;
            cols.next()
        })
        .flat_map(|names| names.split(','))
        .map(str::to_owned)
        .collect()
}

/// Options for [`FfmpegSink`] WebM output.
#[derive(Clone, Debug)]
pub struct FfmpegSinkOpts {
    /// Output WebM file path.
    pub out_path: PathBuf,
    /// Overwrite output file if it already exists.
    pub overwrite: bool,
    /// Background color used to flatten alpha (RGBA8, straight alpha).
    pub bg_rgba: [u8; 4],
    /// `ffmpeg` executable to spawn.
    pub ffmpeg_bin: String,
}

impl FfmpegSinkOpts {
    /// Create options for outputting a WebM to `out_path`.
    pub fn new(out_path: impl Into<PathBuf>) -> Self {
        Self {
            out_path: out_path.into(),
            overwrite: true,
            bg_rgba: [0, 0, 0, 255],
            ffmpeg_bin: "ffmpeg".to_owned(),
        }
    }
}

/// Sink that spawns the system `ffmpeg` and streams raw frames to stdin.
pub struct FfmpegSink {
    opts: FfmpegSinkOpts,

    child: Option<Child>,
    stdin: Option<ChildStdin>,
    stderr_drain: Option<std::thread::JoinHandle<std::io::Result<Vec<u8>>>>,

    scratch: Vec<u8>,
    cfg: Option<SinkConfig>,
    last_idx: Option<FrameIndex>,
}

impl FfmpegSink {
    /// Create a new sink that streams into `ffmpeg`.
    pub fn new(opts: FfmpegSinkOpts) -> Self {
        Self {
            opts,
            child: None,
            stdin: None,
            stderr_drain: None,
            scratch: Vec::new(),
            cfg: None,
            last_idx: None,
        }
    }

    /// Output path this sink writes to.
    pub fn out_path(&self) -> &Path {
        &self.opts.out_path
    }

    fn join_stderr(&mut self) -> StudioResult<Vec<u8>> {
        match self.stderr_drain.take() {
            Some(handle) => handle
                .join()
                .map_err(|_| StudioError::encode("ffmpeg stderr drain thread panicked"))?
                .map_err(|e| StudioError::encode(format!("ffmpeg stderr read failed: {e}"))),
            None => Ok(Vec::new()),
        }
    }
}

impl FrameSink for FfmpegSink {
    fn begin(&mut self, cfg: SinkConfig) -> StudioResult<()> {
        if cfg.fps.num == 0 || cfg.fps.den == 0 {
            return Err(StudioError::validation("fps must be non-zero"));
        }
        if cfg.width == 0 || cfg.height == 0 {
            return Err(StudioError::validation(
                "ffmpeg sink width/height must be non-zero",
            ));
        }
        if cfg.bitrate_bps == 0 {
            return Err(StudioError::validation("bitrate must be non-zero"));
        }

        ensure_parent_dir(&self.opts.out_path)?;
        if !self.opts.overwrite && self.opts.out_path.exists() {
            return Err(StudioError::validation(format!(
                "output file '{}' already exists",
                self.opts.out_path.display()
            )));
        }

        if !is_ffmpeg_on_path(&self.opts.ffmpeg_bin) {
            return Err(StudioError::unsupported_format(format!(
                "'{}' is required for video recording, but could not be run",
                self.opts.ffmpeg_bin
            )));
        }

        let mut cmd = Command::new(&self.opts.ffmpeg_bin);
        cmd.stdin(Stdio::piped())
            .stdout(Stdio::null())
            .stderr(Stdio::piped());

        if self.opts.overwrite {
            cmd.arg("-y");
        } else {
            cmd.arg("-n");
        }

        // Input: raw RGBA8 frames, flattened to opaque in push_frame.
        cmd.args([
            "-loglevel",
            "error",
            "-f",
            "rawvideo",
            "-pix_fmt",
            "rgba",
            "-s",
            &format!("{}x{}", cfg.width, cfg.height),
        ]);
        push_input_fps(&mut cmd, cfg.fps);
        cmd.args(["-i", "pipe:0", "-an"]);

        if let Some(codec) = cfg.encoding.ffmpeg_codec() {
            cmd.args(["-c:v", codec, "-deadline", "realtime", "-cpu-used", "8"]);
        }
        // yuv420p needs even dimensions; pad odd canvases by one pixel.
        cmd.args([
            "-b:v",
            &cfg.bitrate_bps.to_string(),
            "-vf",
            "pad=ceil(iw/2)*2:ceil(ih/2)*2",
            "-pix_fmt",
            "yuv420p",
            "-f",
            "webm",
        ]);
        cmd.arg(&self.opts.out_path);

        let mut child = cmd.spawn().map_err(|e| {
            StudioError::encode(format!(
                "failed to spawn '{}': {e}",
                self.opts.ffmpeg_bin
            ))
        })?;

        let stdin = child
            .stdin
            .take()
            .ok_or_else(|| StudioError::encode("failed to open ffmpeg stdin (unexpected)"))?;
        let mut stderr = child
            .stderr
            .take()
            .ok_or_else(|| StudioError::encode("failed to open ffmpeg stderr (unexpected)"))?;
        let stderr_drain = std::thread::spawn(move || {
            let mut stderr_bytes = Vec::new();
            stderr.read_to_end(&mut stderr_bytes)?;
            Ok(stderr_bytes)
        });

        tracing::debug!(
            out = %self.opts.out_path.display(),
            encoding = %cfg.encoding,
            width = cfg.width,
            height = cfg.height,
            "spawned ffmpeg"
        );

        self.scratch = vec![0u8; (cfg.width as usize) * (cfg.height as usize) * 4];
        self.child = Some(child);
        self.stdin = Some(stdin);
        self.stderr_drain = Some(stderr_drain);
        self.cfg = Some(cfg);
        self.last_idx = None;
        Ok(())
    }

    fn push_frame(&mut self, idx: FrameIndex, frame: &FrameRGBA) -> StudioResult<()> {
        let cfg = self
            .cfg
            .as_ref()
            .ok_or_else(|| StudioError::encode("ffmpeg sink not started"))?;
        if let Some(last) = self.last_idx
            && idx.0 <= last.0
        {
            return Err(StudioError::encode(
                "ffmpeg sink received out-of-order frame index",
            ));
        }
        self.last_idx = Some(idx);

        if frame.width != cfg.width || frame.height != cfg.height {
            return Err(StudioError::validation(format!(
                "frame size mismatch: got {}x{}, expected {}x{}",
                frame.width, frame.height, cfg.width, cfg.height
            )));
        }
        if frame.data.len() != self.scratch.len() {
            return Err(StudioError::validation(
                "frame.data size mismatch with width*height*4",
            ));
        }

        flatten_to_opaque_rgba8(
            &mut self.scratch,
            &frame.data,
            frame.premultiplied,
            self.opts.bg_rgba,
        )?;

        let Some(stdin) = self.stdin.as_mut() else {
            return Err(StudioError::encode("ffmpeg sink is already finalized"));
        };

        use std::io::Write as _;
        stdin.write_all(&self.scratch).map_err(|e| {
            StudioError::encode(format!("failed to write frame to ffmpeg stdin: {e}"))
        })?;
        Ok(())
    }

    fn end(&mut self) -> StudioResult<()> {
        drop(self.stdin.take());
        let mut child = self
            .child
            .take()
            .ok_or_else(|| StudioError::encode("ffmpeg sink not started"))?;

        let status = child
            .wait()
            .map_err(|e| StudioError::encode(format!("failed to wait for ffmpeg to finish: {e}")))?;
        let stderr_bytes = self.join_stderr()?;

        if !status.success() {
            let stderr = String::from_utf8_lossy(&stderr_bytes);
            return Err(StudioError::encode(format!(
                "ffmpeg exited with status {}: {}",
                status,
                stderr.trim()
            )));
        }

        self.cfg = None;
        Ok(())
    }

    fn abort(&mut self) {
        let started = self.child.is_some() || self.cfg.is_some();
        drop(self.stdin.take());
        if let Some(mut child) = self.child.take() {
            let _ = child.kill();
            let _ = child.wait();
        }
        let _ = self.join_stderr();
        self.cfg = None;
        self.last_idx = None;
        if started {
            if let Err(e) = std::fs::remove_file(&self.opts.out_path)
                && e.kind() != std::io::ErrorKind::NotFound
            {
                tracing::warn!(
                    out = %self.opts.out_path.display(),
                    error = %e,
                    "failed to remove partial recording"
                );
            }
            tracing::debug!(out = %self.opts.out_path.display(), "aborted ffmpeg recording");
        }
    }
}

impl Drop for FfmpegSink {
    fn drop(&mut self) {
        if self.child.is_some() {
            self.abort();
        }
    }
}

fn push_input_fps(cmd: &mut Command, fps: Fps) {
    // For rawvideo input, `-r` before `-i` sets the input framerate as `num/den`.
    cmd.args(["-r", &format!("{}/{}", fps.num, fps.den)]);
}

/// Composite RGBA8 over an opaque background color, producing opaque RGBA8.
///
/// `src` is premultiplied when `premultiplied` is set, straight alpha otherwise.
pub(crate) fn flatten_to_opaque_rgba8(
    dst: &mut [u8],
    src: &[u8],
    premultiplied: bool,
    bg_rgba: [u8; 4],
) -> StudioResult<()> {
    if dst.len() != src.len() || !dst.len().is_multiple_of(4) {
        return Err(StudioError::validation(
            "flatten_to_opaque_rgba8 expects equal-length rgba8 buffers",
        ));
    }

    let bg = [bg_rgba[0] as u16, bg_rgba[1] as u16, bg_rgba[2] as u16];

    for (d, s) in dst.chunks_exact_mut(4).zip(src.chunks_exact(4)) {
        let a = s[3] as u16;
        if a == 255 {
            d.copy_from_slice(s);
            d[3] = 255;
            continue;
        }

        let inv = 255u16 - a;
        for c in 0..3 {
            let fg = if premultiplied {
                s[c] as u16
            } else {
                mul_div255(s[c] as u16, a)
            };
            d[c] = (fg + mul_div255(bg[c], inv)).min(255) as u8;
        }
        d[3] = 255;
    }

    Ok(())
}

fn mul_div255(x: u16, y: u16) -> u16 {
    let p = (x as u32) * (y as u32);
    ((p + 128 + (p >> 8)) >> 8) as u16
}

/// Ensure the parent directory of `path` exists.
pub fn ensure_parent_dir(path: &Path) -> StudioResult<()> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        use anyhow::Context as _;
        std::fs::create_dir_all(parent)
            .with_context(|| format!("failed to create output directory '{}'", parent.display()))?;
    }
    Ok(())
}

/// Return `true` when `bin -version` can be invoked.
pub fn is_ffmpeg_on_path(bin: &str) -> bool {
    Command::new(bin)
        .arg("-version")
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .status()
        .map(|s| s.success())
        .unwrap_or(false)
}

#[cfg(test)]
#[path = "../../tests/unit/encode/ffmpeg.rs"]
mod tests;
