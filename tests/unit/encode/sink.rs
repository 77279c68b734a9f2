use super::*;
use crate::foundation::core::Canvas;

fn cfg() -> SinkConfig {
    SinkConfig {
        width: 2,
        height: 2,
        fps: Fps::new(30, 1).unwrap(),
        bitrate_bps: 5_000_000,
        encoding: VideoEncoding::Vp9,
    }
}

fn frame() -> FrameRGBA {
    FrameRGBA::transparent(Canvas {
        width: 2,
        height: 2,
    })
    .unwrap()
}

#[test]
fn records_frames_in_order_then_finalizes() {
    let mut sink = InMemorySink::new();
    assert_eq!(sink.state(), SinkState::Idle);
    sink.begin(cfg()).unwrap();
    sink.push_frame(FrameIndex(0), &frame()).unwrap();
    sink.push_frame(FrameIndex(1), &frame()).unwrap();
    sink.end().unwrap();
    assert_eq!(sink.state(), SinkState::Finalized);
    assert_eq!(sink.frames().len(), 2);
    assert_eq!(sink.config().unwrap().encoding, VideoEncoding::Vp9);
}

#[test]
fn rejects_out_of_order_and_unstarted_pushes() {
    let mut sink = InMemorySink::new();
    assert!(sink.push_frame(FrameIndex(0), &frame()).is_err());
    sink.begin(cfg()).unwrap();
    sink.push_frame(FrameIndex(3), &frame()).unwrap();
    assert!(sink.push_frame(FrameIndex(3), &frame()).is_err());
    assert!(sink.push_frame(FrameIndex(2), &frame()).is_err());
}

#[test]
fn abort_discards_frames_and_blocks_end() {
    let mut sink = InMemorySink::new();
    sink.begin(cfg()).unwrap();
    sink.push_frame(FrameIndex(0), &frame()).unwrap();
    sink.abort();
    assert_eq!(sink.state(), SinkState::Aborted);
    assert!(sink.frames().is_empty());
    assert!(sink.end().is_err());
}
