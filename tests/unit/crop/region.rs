use super::*;

#[test]
fn default_region_is_inset_by_ten_percent() {
    let r = CropRegion::default();
    assert_eq!(
        r,
        CropRegion {
            x: 10.0,
            y: 10.0,
            width: 80.0,
            height: 80.0
        }
    );
    r.validate().unwrap();
}

#[test]
fn new_rejects_invariant_violations() {
    assert!(matches!(
        CropRegion::new(-1.0, 0.0, 50.0, 50.0),
        Err(StudioError::Geometry(_))
    ));
    assert!(CropRegion::new(60.0, 0.0, 50.0, 50.0).is_err());
    assert!(CropRegion::new(0.0, 0.0, 5.0, 50.0).is_err());
    assert!(CropRegion::new(0.0, 0.0, 50.0, f64::NAN).is_err());
    CropRegion::new(0.0, 0.0, 100.0, 100.0).unwrap();
}

#[test]
fn pixel_rect_rounds_each_value_independently() {
    let r = CropRegion::new(25.0, 0.0, 50.0, 100.0).unwrap();
    assert_eq!(
        r.to_pixel_rect(2000, 1000),
        PixelRect {
            x: 500,
            y: 0,
            width: 1000,
            height: 1000
        }
    );

    // x = 1.4 -> 1 and width = 1.4 -> 1; deriving width from the rounded right edge
    // (2.8 -> 3) would give 2.
    let r = CropRegion::new(14.0, 0.0, 14.0, 100.0).unwrap();
    let px = r.to_pixel_rect(10, 10);
    assert_eq!((px.x, px.width), (1, 1));
}

#[test]
fn pixel_rect_never_leaves_the_image() {
    let r = CropRegion::new(90.0, 90.0, 10.0, 10.0).unwrap();
    let px = r.to_pixel_rect(5, 5);
    assert!(px.x + px.width <= 5);
    assert!(px.y + px.height <= 5);
}

#[test]
fn parse_from_comma_list() {
    let r: CropRegion = "25, 0, 50, 100".parse().unwrap();
    assert_eq!(r.x, 25.0);
    assert_eq!(r.height, 100.0);
    assert!("1,2,3".parse::<CropRegion>().is_err());
    assert!("a,b,c,d".parse::<CropRegion>().is_err());
    assert!(matches!(
        "95,0,10,10".parse::<CropRegion>(),
        Err(StudioError::Geometry(_))
    ));
}
