use super::*;

fn response(json: &str) -> EditResponse {
    EditResponse::from_json_str(json).unwrap()
}

#[test]
fn request_from_data_uri_keeps_mime_and_strips_prefix() {
    let req = EditRequest::from_image("data:image/png;base64,AAAA", "brighten", TargetAspect::Square)
        .unwrap();
    assert_eq!(req.mime_type, "image/png");
    assert_eq!(req.data, "AAAA");
}

#[test]
fn raw_base64_defaults_to_jpeg() {
    let req = EditRequest::from_image("QUJD", "brighten", TargetAspect::Square).unwrap();
    assert_eq!(req.mime_type, DEFAULT_INPUT_MIME);
    assert_eq!(req.data, "QUJD");
}

#[test]
fn empty_payload_or_prompt_is_rejected() {
    assert!(EditRequest::from_image("data:image/png;base64,", "x", TargetAspect::Auto).is_err());
    assert!(EditRequest::from_image("QUJD", "  ", TargetAspect::Auto).is_err());
}

#[test]
fn request_body_shape() {
    let req = EditRequest::from_image("data:image/webp;base64,QUJD", "warm", TargetAspect::Portrait9x16)
        .unwrap();
    assert_eq!(
        req.to_json(),
        serde_json::json!({
            "contents": { "parts": [
                { "inlineData": { "mimeType": "image/webp", "data": "QUJD" } },
                { "text": "warm" },
            ]},
            "config": { "imageConfig": { "aspectRatio": "9:16" } },
        })
    );
}

#[test]
fn auto_aspect_is_omitted() {
    let req = EditRequest::from_image("QUJD", "warm", TargetAspect::Auto).unwrap();
    let body = req.to_json();
    assert_eq!(body["config"]["imageConfig"], serde_json::json!({}));
}

#[test]
fn aspects_parse_from_labels() {
    for aspect in TargetAspect::ALL {
        assert_eq!(aspect.label().parse::<TargetAspect>().unwrap(), aspect);
    }
    assert_eq!("auto".parse::<TargetAspect>().unwrap(), TargetAspect::Auto);
    assert!("2:1".parse::<TargetAspect>().is_err());
}

#[test]
fn first_inline_image_wins() {
    let uri = response(
        r#"{ "candidates": [ { "finishReason": "STOP", "content": { "parts": [
            { "text": "here you go" },
            { "inlineData": { "mimeType": "image/jpeg", "data": "QUJD" } },
            { "inlineData": { "mimeType": "image/png", "data": "REVG" } }
        ] } } ] }"#,
    )
    .into_image()
    .unwrap();
    assert_eq!(uri.to_string(), "data:image/jpeg;base64,QUJD");
}

#[test]
fn missing_image_mime_defaults_to_png() {
    let uri = response(
        r#"{ "candidates": [ { "content": { "parts": [ { "inlineData": { "data": "QUJD" } } ] } } ] }"#,
    )
    .into_image()
    .unwrap();
    assert_eq!(uri.mime, "image/png");
}

#[test]
fn classification_order() {
    assert_eq!(
        response("{}").into_image().unwrap_err(),
        EditError::NoCandidates
    );
    assert_eq!(
        response(r#"{ "candidates": [ { "finishReason": "SAFETY",
            "content": { "parts": [ { "inlineData": { "data": "QUJD" } } ] } } ] }"#)
        .into_image()
        .unwrap_err(),
        EditError::SafetyBlocked
    );
    assert_eq!(
        response(r#"{ "candidates": [ { "finishReason": "IMAGE_OTHER" } ] }"#)
            .into_image()
            .unwrap_err(),
        EditError::Refused {
            reason: "IMAGE_OTHER".to_owned()
        }
    );
    assert_eq!(
        response(r#"{ "candidates": [ { "finishReason": "MAX_TOKENS", "content": { "parts": [] } } ] }"#)
            .into_image()
            .unwrap_err(),
        EditError::EmptyContent {
            finish_reason: "MAX_TOKENS".to_owned()
        }
    );
    assert_eq!(
        response(r#"{ "candidates": [ {} ] }"#).into_image().unwrap_err(),
        EditError::EmptyContent {
            finish_reason: "Unknown".to_owned()
        }
    );
    assert_eq!(
        response(r#"{ "candidates": [ { "content": { "parts": [ { "text": "I can't edit that." } ] } } ] }"#)
            .into_image()
            .unwrap_err(),
        EditError::ModelRefusal("I can't edit that.".to_owned())
    );
    assert_eq!(
        response(r#"{ "candidates": [ { "content": { "parts": [ { "inlineData": { "data": "" } }, {} ] } } ] }"#)
            .into_image()
            .unwrap_err(),
        EditError::NoImage
    );
}

#[test]
fn edit_errors_convert_into_studio_errors() {
    let err: StudioError = EditError::ModelRefusal("no".to_owned()).into();
    assert!(err.to_string().starts_with("model refusal:"));
}
