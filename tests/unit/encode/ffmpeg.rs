use super::*;

const ENCODERS: &str = "Encoders:
 V..... = Video
 A..... = Audio
 ------
 V....D libvpx               libvpx VP8 (codec vp8)
 V....D libvpx-vp9           libvpx VP9 (codec vp9)
 A....D libopus              libopus Opus (codec opus)
";

const MUXERS: &str = " File formats:
 D. = Demuxing supported
 .E = Muxing supported
 --
  E mp4             MP4 (MPEG-4 Part 14)
  E webm            WebM
";

#[test]
fn probe_parses_listing_names() {
    let probe = FfmpegProbe::from_listings(ENCODERS, MUXERS);
    assert!(probe.has_encoder("libvpx-vp9"));
    assert!(probe.has_encoder("libvpx"));
    assert!(!probe.has_encoder("libx264"));
    assert!(probe.has_muxer("webm"));
    assert!(probe.has_muxer("mp4"));
}

#[test]
fn probe_support_follows_encoders_and_muxer() {
    let probe = FfmpegProbe::from_listings(ENCODERS, MUXERS);
    assert!(probe.supports(VideoEncoding::Vp9));
    assert!(probe.supports(VideoEncoding::Vp8));
    assert!(probe.supports(VideoEncoding::Webm));

    let vp8_only = FfmpegProbe::from_listings(
        " ------\n V....D libvpx               libvpx VP8\n",
        MUXERS,
    );
    assert!(!vp8_only.supports(VideoEncoding::Vp9));
    assert!(vp8_only.supports(VideoEncoding::Vp8));

    let no_webm = FfmpegProbe::from_listings(ENCODERS, " --\n  E mp4   MP4\n");
    assert!(!no_webm.supports(VideoEncoding::Vp9));
    assert!(!no_webm.supports(VideoEncoding::Webm));
}

#[test]
fn empty_probe_supports_nothing() {
    let probe = FfmpegProbe::default();
    for enc in VideoEncoding::PREFERENCE {
        assert!(!probe.supports(enc));
    }
}

#[test]
fn missing_binary_detects_nothing() {
    let probe = FfmpegProbe::detect("retouch-no-such-ffmpeg-binary");
    assert!(!probe.supports(VideoEncoding::Webm));
    assert!(!is_ffmpeg_on_path("retouch-no-such-ffmpeg-binary"));
}

#[test]
fn flatten_premul_alpha_0_returns_bg() {
    let src = vec![0u8, 0, 0, 0];
    let mut dst = vec![0u8; 4];
    flatten_to_opaque_rgba8(&mut dst, &src, true, [10, 20, 30, 255]).unwrap();
    assert_eq!(dst, vec![10, 20, 30, 255]);
}

#[test]
fn flatten_alpha_255_is_identity() {
    let src = vec![1u8, 2, 3, 255];
    let mut dst = vec![0u8; 4];
    flatten_to_opaque_rgba8(&mut dst, &src, true, [10, 20, 30, 255]).unwrap();
    assert_eq!(dst, src);
}

#[test]
fn flatten_premul_over_black_keeps_rgb() {
    let src = vec![128u8, 0, 0, 128];
    let mut dst = vec![0u8; 4];
    flatten_to_opaque_rgba8(&mut dst, &src, true, [0, 0, 0, 255]).unwrap();
    assert_eq!(dst, vec![128, 0, 0, 255]);
}

#[test]
fn flatten_straight_over_black_scales_rgb() {
    let src = vec![255u8, 0, 0, 128];
    let mut dst = vec![0u8; 4];
    flatten_to_opaque_rgba8(&mut dst, &src, false, [0, 0, 0, 255]).unwrap();
    assert_eq!(dst, vec![128, 0, 0, 255]);
}

#[test]
fn flatten_rejects_mismatched_buffers() {
    let mut dst = vec![0u8; 8];
    assert!(flatten_to_opaque_rgba8(&mut dst, &[0u8; 4], true, [0, 0, 0, 255]).is_err());
}

#[test]
fn begin_without_ffmpeg_is_unsupported() {
    let dir = std::env::temp_dir().join("retouch-ffmpeg-missing");
    let mut opts = FfmpegSinkOpts::new(dir.join("out.webm"));
    opts.ffmpeg_bin = "retouch-no-such-ffmpeg-binary".to_owned();
    let mut sink = FfmpegSink::new(opts);
    let err = sink
        .begin(SinkConfig {
            width: 4,
            height: 4,
            fps: Fps::new(30, 1).unwrap(),
            bitrate_bps: 5_000_000,
            encoding: VideoEncoding::Vp9,
        })
        .unwrap_err();
    assert!(matches!(err, StudioError::UnsupportedFormat(_)));
    sink.abort();
}

#[test]
fn push_before_begin_fails() {
    let mut sink = FfmpegSink::new(FfmpegSinkOpts::new("unused.webm"));
    let frame = FrameRGBA::transparent(crate::foundation::core::Canvas {
        width: 2,
        height: 2,
    })
    .unwrap();
    assert!(sink.push_frame(FrameIndex(0), &frame).is_err());
    assert!(sink.end().is_err());
}
