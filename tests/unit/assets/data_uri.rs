use super::*;

#[test]
fn parse_splits_mime_and_payload() {
    let uri = DataUri::parse("data:image/jpeg;base64,QUJD").unwrap();
    assert_eq!(uri.mime, "image/jpeg");
    assert_eq!(uri.payload_b64, "QUJD");
    assert_eq!(uri.decode_payload().unwrap(), b"ABC");
    assert_eq!(uri.to_string(), "data:image/jpeg;base64,QUJD");
}

#[test]
fn parse_rejects_non_base64_and_missing_parts() {
    assert!(DataUri::parse("data:text/plain,hello").is_err());
    assert!(DataUri::parse("data:image/png;base64").is_err());
    assert!(DataUri::parse("QUJD").is_err());
    assert!(DataUri::parse("data:;base64,QUJD").is_err());
}

#[test]
fn png_data_uri_is_lossless() {
    let mut img = image::RgbaImage::new(3, 2);
    img.put_pixel(2, 1, image::Rgba([10, 20, 30, 40]));
    let uri = encode_png_data_uri(&img).unwrap();
    assert_eq!(uri.mime, "image/png");

    let bytes = uri.decode_payload().unwrap();
    let back = image::load_from_memory(&bytes).unwrap().to_rgba8();
    assert_eq!(back, img);
}
