use std::sync::atomic::{AtomicUsize, Ordering};

use super::*;

#[derive(Default)]
struct CountingCapture {
    acquired: AtomicUsize,
    released: AtomicUsize,
}

impl PointerCapture for CountingCapture {
    fn acquire(&self) {
        self.acquired.fetch_add(1, Ordering::SeqCst);
    }

    fn release(&self) {
        self.released.fetch_add(1, Ordering::SeqCst);
    }
}

impl CountingCapture {
    fn counts(&self) -> (usize, usize) {
        (
            self.acquired.load(Ordering::SeqCst),
            self.released.load(Ordering::SeqCst),
        )
    }
}

fn solid(width: u32, height: u32) -> SourceImage {
    SourceImage::from_rgba(image::RgbaImage::from_pixel(
        width,
        height,
        image::Rgba([200, 100, 50, 255]),
    ))
}

fn open_session(width: f64, height: f64) -> CropSession {
    let mut s = CropSession::new(ContainerSize::new(width, height).unwrap());
    s.begin(solid(40, 20)).unwrap();
    s
}

#[test]
fn container_rejects_degenerate_sizes() {
    assert!(ContainerSize::new(0.0, 10.0).is_err());
    assert!(ContainerSize::new(10.0, f64::NAN).is_err());
    let c = ContainerSize::new(200.0, 100.0).unwrap();
    assert_eq!(c.aspect(), 2.0);
    assert_eq!(c.to_percent(Point::new(50.0, 25.0)), Point::new(25.0, 25.0));
}

#[test]
fn idle_session_ignores_pointer_input_and_refuses_confirm() {
    let mut s = CropSession::new(ContainerSize::new(100.0, 100.0).unwrap());
    assert_eq!(s.phase(), CropPhase::Idle);
    assert!(!s.pointer_down(Handle::Move, Point::new(50.0, 50.0)));
    assert_eq!(s.phase(), CropPhase::Idle);
    assert!(matches!(s.confirm(), Err(StudioError::Validation(_))));
}

#[test]
fn begin_opens_with_default_region() {
    let s = open_session(100.0, 100.0);
    assert_eq!(s.phase(), CropPhase::Open);
    assert_eq!(s.region(), CropRegion::default());
}

#[test]
fn move_deltas_are_incremental() {
    let mut s = open_session(200.0, 100.0);
    assert!(s.pointer_down(Handle::Move, Point::new(100.0, 50.0)));
    assert_eq!(s.phase(), CropPhase::Dragging);

    // 10px of a 200px container is 5%.
    assert!(s.pointer_move(Point::new(110.0, 50.0)));
    assert!((s.region().x - 15.0).abs() < 1e-9);
    assert!(!s.pointer_move(Point::new(110.0, 50.0)));
    assert!(s.pointer_move(Point::new(120.0, 50.0)));
    assert!((s.region().x - 20.0).abs() < 1e-9);

    assert!(s.pointer_up());
    assert_eq!(s.phase(), CropPhase::Open);
    assert!(!s.pointer_move(Point::new(0.0, 0.0)));
    assert!((s.region().x - 20.0).abs() < 1e-9);
}

#[test]
fn second_pointer_down_is_ignored_while_dragging() {
    let mut s = open_session(100.0, 100.0);
    s.pointer_down(Handle::Move, Point::new(50.0, 50.0));
    assert!(!s.pointer_down(Handle::Se, Point::new(90.0, 90.0)));

    s.pointer_move(Point::new(55.0, 50.0));
    let r = s.region();
    assert!((r.x - 15.0).abs() < 1e-9);
    assert_eq!(r.width, 80.0);
}

#[test]
fn capture_is_released_on_every_exit_path() {
    let capture = Arc::new(CountingCapture::default());
    let mut s = CropSession::new(ContainerSize::new(100.0, 100.0).unwrap())
        .with_capture(capture.clone());
    s.begin(solid(10, 10)).unwrap();

    s.pointer_down(Handle::Se, Point::new(90.0, 90.0));
    assert_eq!(capture.counts(), (1, 0));
    s.pointer_up();
    assert_eq!(capture.counts(), (1, 1));

    s.handle_event(PointerEvent::Down {
        handle: Handle::Nw,
        pos: Point::new(10.0, 10.0),
    });
    s.handle_event(PointerEvent::Cancel);
    assert_eq!(capture.counts(), (2, 2));

    s.pointer_down(Handle::Move, Point::new(50.0, 50.0));
    s.begin(solid(10, 10)).unwrap();
    assert_eq!(capture.counts(), (3, 3));

    s.pointer_down(Handle::Move, Point::new(50.0, 50.0));
    s.confirm().unwrap();
    assert_eq!(capture.counts(), (4, 4));

    let mut s = CropSession::new(ContainerSize::new(100.0, 100.0).unwrap())
        .with_capture(capture.clone());
    s.begin(solid(10, 10)).unwrap();
    s.pointer_down(Handle::Move, Point::new(50.0, 50.0));
    s.cancel();
    assert_eq!(capture.counts(), (5, 5));

    let mut s = CropSession::new(ContainerSize::new(100.0, 100.0).unwrap())
        .with_capture(capture.clone());
    s.begin(solid(10, 10)).unwrap();
    s.pointer_down(Handle::Move, Point::new(50.0, 50.0));
    drop(s);
    assert_eq!(capture.counts(), (6, 6));
}

#[test]
fn confirm_before_load_fails_and_stays_open() {
    let mut s = CropSession::new(ContainerSize::new(100.0, 100.0).unwrap());
    s.begin(SourceImage::pending()).unwrap();
    let err = s.confirm().unwrap_err();
    assert!(matches!(err, StudioError::Extraction(_)));
    assert_eq!(s.phase(), CropPhase::Open);

    s.replace_source(solid(100, 50));
    let out = s.confirm().unwrap();
    assert_eq!(out.image.dimensions(), (80, 40));
    assert_eq!(s.phase(), CropPhase::Closed);
}

#[test]
fn closed_session_is_terminal() {
    let mut s = open_session(100.0, 100.0);
    s.cancel();
    assert_eq!(s.phase(), CropPhase::Closed);
    assert!(!s.pointer_down(Handle::Move, Point::new(1.0, 1.0)));
    assert!(s.confirm().is_err());
    assert!(s.begin(solid(4, 4)).is_err());
}

#[test]
fn aspect_lock_is_not_retroactive() {
    let mut s = open_session(100.0, 100.0);
    s.set_aspect_lock(AspectLock::Ratio(16.0 / 9.0));
    assert_eq!(s.region(), CropRegion::default());
    assert_eq!(s.aspect_lock(), AspectLock::Ratio(16.0 / 9.0));
}

#[test]
fn pointer_events_deserialize_from_json() {
    let json = r#"[
        {"event": "down", "handle": "se", "pos": {"x": 90.0, "y": 90.0}},
        {"event": "move", "pos": {"x": 95.0, "y": 95.0}},
        {"event": "up"}
    ]"#;
    let events: Vec<PointerEvent> = serde_json::from_str(json).unwrap();
    assert_eq!(events.len(), 3);
    assert_eq!(
        events[0],
        PointerEvent::Down {
            handle: Handle::Se,
            pos: Point::new(90.0, 90.0)
        }
    );
    assert_eq!(events[2], PointerEvent::Up);
}
