use super::*;

fn solid(w: u32, h: u32, rgba: [u8; 4]) -> SourceImage {
    SourceImage::from_rgba(image::RgbaImage::from_pixel(w, h, image::Rgba(rgba)))
}

fn opts(max_dim: u32) -> MotionOpts {
    MotionOpts {
        max_dim,
        ..MotionOpts::default()
    }
}

#[test]
fn unloaded_source_is_load_error() {
    let err = MotionJob::new(&SourceImage::pending(), &opts(1080)).unwrap_err();
    assert!(matches!(err, StudioError::Load(_)));
}

#[test]
fn canvas_follows_max_dim() {
    let job = MotionJob::new(&solid(40, 20, [255, 0, 0, 255]), &opts(10)).unwrap();
    assert_eq!(
        job.canvas(),
        Canvas {
            width: 10,
            height: 5
        }
    );
}

#[test]
fn render_reports_progress_and_scale() {
    let mut job = MotionJob::new(&solid(8, 8, [0, 0, 255, 255]), &opts(1080)).unwrap();
    let s0 = job.render_at(Duration::ZERO).unwrap();
    assert_eq!(s0.progress, 0.0);
    assert!((s0.scale - 1.0).abs() < 1e-12);

    let mid = job.render_at(Duration::from_millis(3000)).unwrap();
    assert_eq!(mid.progress, 0.5);
    assert!((mid.scale - 1.02).abs() < 1e-12);

    let end = job.render_at(Duration::from_millis(6000)).unwrap();
    assert_eq!(end.progress, 1.0);
}

#[test]
fn opaque_source_fills_the_frame_at_rest_and_when_zoomed() {
    let mut job = MotionJob::new(&solid(6, 4, [10, 200, 30, 255]), &opts(1080)).unwrap();
    for ms in [0, 1500, 3000] {
        job.render_at(Duration::from_millis(ms)).unwrap();
        let frame = job.frame();
        for y in 0..frame.height {
            for x in 0..frame.width {
                assert_eq!(frame.pixel(x, y), [10, 200, 30, 255], "({x},{y}) at {ms}ms");
            }
        }
    }
}
