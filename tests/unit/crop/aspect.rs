use super::*;

#[test]
fn presets_parse_from_labels() {
    for p in AspectPreset::ALL {
        assert_eq!(p.label().parse::<AspectPreset>().unwrap(), p);
    }
    assert_eq!("FREE".parse::<AspectPreset>().unwrap(), AspectPreset::Free);
    assert!("5:4".parse::<AspectPreset>().is_err());
}

#[test]
fn presets_serialize_as_labels() {
    let json = serde_json::to_string(&AspectPreset::Landscape16x9).unwrap();
    assert_eq!(json, "\"16:9\"");
    let back: AspectPreset = serde_json::from_str("\"3:4\"").unwrap();
    assert_eq!(back, AspectPreset::Standard3x4);
}

#[test]
fn ratio_factor_accounts_for_container_aspect() {
    assert_eq!(AspectLock::Free.ratio_factor(2.0), None);
    assert_eq!(AspectPreset::Square.lock().ratio_factor(2.0), Some(2.0));
    let f = AspectPreset::Landscape16x9
        .lock()
        .ratio_factor(16.0 / 9.0)
        .unwrap();
    assert!((f - 1.0).abs() < 1e-12);
}

#[test]
fn fixed_rejects_non_positive_ratios() {
    assert!(AspectLock::fixed(0.0).is_err());
    assert!(AspectLock::fixed(-1.0).is_err());
    assert!(AspectLock::fixed(f64::INFINITY).is_err());
    assert_eq!(AspectLock::fixed(1.5).unwrap(), AspectLock::Ratio(1.5));
}
