use super::*;

fn approx(a: f64, b: f64) -> bool {
    (a - b).abs() < 1e-12
}

#[test]
fn progress_clamps_and_handles_zero_duration() {
    let d = Duration::from_millis(6000);
    assert_eq!(progress(Duration::ZERO, d), 0.0);
    assert_eq!(progress(Duration::from_millis(3000), d), 0.5);
    assert_eq!(progress(d, d), 1.0);
    assert_eq!(progress(Duration::from_secs(60), d), 1.0);
    assert_eq!(progress(Duration::ZERO, Duration::ZERO), 1.0);
}

#[test]
fn ease_is_a_single_cycle() {
    assert!(approx(breathe_ease(0.0), 0.0));
    assert!(approx(breathe_ease(0.25), 0.5));
    assert!(approx(breathe_ease(0.5), 1.0));
    assert!(approx(breathe_ease(1.0), 0.0));
    assert!(approx(breathe_ease(0.3), breathe_ease(0.7)));
}

#[test]
fn scale_peaks_mid_cycle() {
    let b = Breathing::default();
    assert!(approx(b.scale_at(0.0), 1.0));
    assert!(approx(b.scale_at(0.5), 1.02));
    assert!(approx(b.scale_at(1.0), 1.0));
    for i in 0..=100 {
        let s = b.scale_at(f64::from(i) / 100.0);
        assert!((1.0 - 1e-12..=1.02 + 1e-12).contains(&s));
    }
}

#[test]
fn output_canvas_caps_longer_edge() {
    assert_eq!(
        output_canvas(4000, 2000, 1080).unwrap(),
        Canvas {
            width: 1080,
            height: 540
        }
    );
    assert_eq!(
        output_canvas(1000, 3000, 1080).unwrap(),
        Canvas {
            width: 360,
            height: 1080
        }
    );
    assert_eq!(
        output_canvas(640, 480, 1080).unwrap(),
        Canvas {
            width: 640,
            height: 480
        }
    );
    assert_eq!(
        output_canvas(1080, 1080, 1080).unwrap(),
        Canvas {
            width: 1080,
            height: 1080
        }
    );
}

#[test]
fn output_canvas_floors_and_keeps_one_pixel() {
    assert_eq!(
        output_canvas(1999, 1000, 1080).unwrap(),
        Canvas {
            width: 1080,
            height: 540
        }
    );
    assert_eq!(
        output_canvas(100_000, 1, 1080).unwrap(),
        Canvas {
            width: 1080,
            height: 1
        }
    );
    assert!(output_canvas(0, 10, 1080).is_err());
    assert!(output_canvas(10, 10, 0).is_err());
}
