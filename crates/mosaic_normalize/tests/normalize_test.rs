//! Tests for response shape normalization.

use mosaic_core::{CanonicalResponse, MediaIntent, Modality};
use mosaic_error::{MosaicError, FailureClass, NormalizeErrorKind};
use mosaic_normalize::{ITEM_CONTAINERS, MEDIA_KEYS, SchemaNormalizer, TEXT_SHAPES};
use serde_json::{Value, json};

fn normalize(modality: Modality, raw: Value) -> Result<CanonicalResponse, FailureClass> {
    SchemaNormalizer::new()
        .normalize(modality, &raw)
        .map_err(|e| MosaicError::from(e).class())
}

fn text(content: &str) -> CanonicalResponse {
    CanonicalResponse::Text {
        content: content.to_string(),
    }
}

fn image(media: MediaIntent) -> CanonicalResponse {
    CanonicalResponse::Image { media }
}

fn url(s: &str) -> MediaIntent {
    MediaIntent::Url(s.to_string())
}

// ============================================================================
// Text Shape Tests
// ============================================================================

#[test]
fn test_text_choices_message_content() {
    let raw = json!({"choices": [{"message": {"content": "hello"}}]});
    assert_eq!(normalize(Modality::Text, raw), Ok(text("hello")));
}

#[test]
fn test_text_choices_text() {
    let raw = json!({"choices": [{"text": "legacy completion"}]});
    assert_eq!(normalize(Modality::Text, raw), Ok(text("legacy completion")));
}

#[test]
fn test_text_output_content_items() {
    let raw = json!({"output": {"content": [{"type": "image"}, {"type": "output_text", "text": "second"}]}});
    assert_eq!(normalize(Modality::Text, raw), Ok(text("second")));
}

#[test]
fn test_text_output_string() {
    let raw = json!({"output": "plain"});
    assert_eq!(normalize(Modality::Text, raw), Ok(text("plain")));
}

#[test]
fn test_text_responses_message_content() {
    let raw = json!({"responses": [{"message": {"content": "from responses"}}]});
    assert_eq!(normalize(Modality::Text, raw), Ok(text("from responses")));
}

#[test]
fn test_text_output_array_form() {
    let raw = json!({
        "id": "resp_1",
        "output": [
            {"type": "reasoning", "summary": []},
            {"type": "message", "content": [{"type": "output_text", "text": "array form"}]}
        ]
    });
    assert_eq!(normalize(Modality::Text, raw), Ok(text("array form")));
}

#[test]
fn test_text_empty_reply_is_valid() {
    let raw = json!({"choices": [{"message": {"content": ""}}]});
    assert_eq!(normalize(Modality::Text, raw), Ok(text("")));
}

#[test]
fn test_text_priority_order() {
    let raw = json!({
        "choices": [{"message": {"content": "first"}, "text": "second"}],
        "output": "third"
    });
    assert_eq!(normalize(Modality::Text, raw), Ok(text("first")));
}

#[test]
fn test_text_non_string_content_falls_through() {
    let raw = json!({"choices": [{"message": {"content": null}, "text": "fallback"}]});
    assert_eq!(normalize(Modality::Text, raw), Ok(text("fallback")));

    let raw = json!({"choices": [{"message": {"content": 42}}]});
    assert_eq!(
        normalize(Modality::Text, raw),
        Err(FailureClass::UnrecognizedResponseShape)
    );
}

#[test]
fn test_text_empty_choices_unrecognized() {
    let raw = json!({"choices": []});
    assert_eq!(
        normalize(Modality::Text, raw),
        Err(FailureClass::UnrecognizedResponseShape)
    );
}

#[test]
fn test_text_shape_table_names() {
    let names: Vec<&str> = TEXT_SHAPES.iter().map(|s| s.name).collect();
    assert_eq!(
        names,
        vec![
            "choices[0].message.content",
            "choices[0].text",
            "output.content[*].text",
            "output",
            "responses[0].message.content",
            "output[*].content[*].text",
        ]
    );
}

// ============================================================================
// Image Shape Tests
// ============================================================================

#[test]
fn test_image_every_container() {
    for container in ITEM_CONTAINERS {
        let raw = json!({ *container: [{"url": "https://x/a.jpg"}] });
        assert_eq!(
            normalize(Modality::Image, raw),
            Ok(image(url("https://x/a.jpg"))),
            "container {}",
            container
        );
    }
}

#[test]
fn test_image_every_url_key() {
    for key in MEDIA_KEYS.url {
        let raw = json!({"data": [{ *key: "https://x/a.jpg" }]});
        assert_eq!(
            normalize(Modality::Image, raw),
            Ok(image(url("https://x/a.jpg"))),
            "key {}",
            key
        );
    }
}

#[test]
fn test_image_every_inline_key() {
    for key in MEDIA_KEYS.inline {
        let raw = json!({"data": [{ *key: "AQID" }]});
        assert_eq!(
            normalize(Modality::Image, raw),
            Ok(image(MediaIntent::inline("AQID"))),
            "key {}",
            key
        );
    }
}

#[test]
fn test_image_b64_shape() {
    let raw = json!({"data": [{"b64": "AQID"}]});
    assert_eq!(
        normalize(Modality::Image, raw),
        Ok(image(MediaIntent::inline("AQID")))
    );
}

#[test]
fn test_image_inline_wins_over_url() {
    let raw = json!({"data": [{"url": "https://x/a.jpg", "b64_json": "AQID"}]});
    assert_eq!(
        normalize(Modality::Image, raw),
        Ok(image(MediaIntent::inline("AQID")))
    );
}

#[test]
fn test_image_blank_values_count_as_absent() {
    let raw = json!({"data": [{"url": "https://x/a.jpg", "b64_json": "  ", "b64": null}]});
    assert_eq!(
        normalize(Modality::Image, raw),
        Ok(image(url("https://x/a.jpg")))
    );
}

#[test]
fn test_image_data_url_in_url_field() {
    let raw = json!({"data": [{"url": "data:image/png;base64,AQID"}]});
    assert_eq!(
        normalize(Modality::Image, raw),
        Ok(image(MediaIntent::Inline {
            data: "data:image/png;base64,AQID".to_string(),
            mime_hint: Some("image/png".to_string()),
        }))
    );
}

#[test]
fn test_image_nested_url_object() {
    let raw = json!({"data": [{"image_url": {"url": "https://x/nested.jpg"}}]});
    assert_eq!(
        normalize(Modality::Image, raw),
        Ok(image(url("https://x/nested.jpg")))
    );
}

#[test]
fn test_image_top_level_item() {
    let raw = json!({"url": "https://x/top.jpg", "revised_prompt": "a cat"});
    assert_eq!(
        normalize(Modality::Image, raw),
        Ok(image(url("https://x/top.jpg")))
    );
}

#[test]
fn test_image_container_object() {
    let raw = json!({"data": {"b64_json": "AQID"}});
    assert_eq!(
        normalize(Modality::Image, raw),
        Ok(image(MediaIntent::inline("AQID")))
    );
}

#[test]
fn test_image_bare_string_items() {
    let raw = json!({"images": ["https://x/a.jpg"]});
    assert_eq!(
        normalize(Modality::Image, raw),
        Ok(image(url("https://x/a.jpg")))
    );

    let raw = json!({"images": ["AQID"]});
    assert_eq!(
        normalize(Modality::Image, raw),
        Ok(image(MediaIntent::inline("AQID")))
    );
}

#[test]
fn test_image_first_container_wins() {
    let raw = json!({"results": [{"url": "https://x/results.jpg"}], "data": [{"url": "https://x/data.jpg"}]});
    assert_eq!(
        normalize(Modality::Image, raw),
        Ok(image(url("https://x/data.jpg")))
    );
}

#[test]
fn test_image_media_unavailable() {
    for raw in [
        json!({"data": []}),
        json!({"data": [{"revised_prompt": "no media"}]}),
        json!({"data": [{"url": "", "b64_json": null}]}),
        json!({"thumbnail_url": "https://x/t.jpg"}),
    ] {
        assert_eq!(
            normalize(Modality::Image, raw.clone()),
            Err(FailureClass::MediaUnavailable),
            "{}",
            raw
        );
    }
}

// ============================================================================
// Video Shape Tests
// ============================================================================

#[test]
fn test_video_with_thumbnail_url() {
    let raw = json!({"data": [{"b64_json": "AAAA", "thumbnail_url": "https://x/t.jpg"}]});
    assert_eq!(
        normalize(Modality::Video, raw),
        Ok(CanonicalResponse::Video {
            media: MediaIntent::inline("AAAA"),
            thumbnail: Some(url("https://x/t.jpg")),
        })
    );
}

#[test]
fn test_video_thumbnail_spellings() {
    let cases = [
        (json!({"thumb_url": "https://x/t.jpg"}), url("https://x/t.jpg")),
        (json!({"poster_url": "https://x/p.jpg"}), url("https://x/p.jpg")),
        (json!({"thumbnail_b64_json": "AQID"}), MediaIntent::inline("AQID")),
        (json!({"thumbnail_b64": "AQID"}), MediaIntent::inline("AQID")),
        (json!({"thumbnail": "https://x/g.jpg"}), url("https://x/g.jpg")),
        (json!({"thumbnail": "AQID"}), MediaIntent::inline("AQID")),
        (json!({"thumbnail": {"url": "https://x/o.jpg"}}), url("https://x/o.jpg")),
        (json!({"thumbnail": {"b64_json": "AQID"}}), MediaIntent::inline("AQID")),
    ];
    for (extra, expected) in cases {
        let mut item = json!({"url": "https://x/v.mp4"});
        for (k, v) in extra.as_object().unwrap() {
            item[k] = v.clone();
        }
        let raw = json!({"videos": [item]});
        assert_eq!(
            normalize(Modality::Video, raw),
            Ok(CanonicalResponse::Video {
                media: url("https://x/v.mp4"),
                thumbnail: Some(expected),
            })
        );
    }
}

#[test]
fn test_video_without_thumbnail() {
    let raw = json!({"data": [{"url": "https://x/v.mp4", "thumbnail_url": ""}]});
    assert_eq!(
        normalize(Modality::Video, raw),
        Ok(CanonicalResponse::Video {
            media: url("https://x/v.mp4"),
            thumbnail: None,
        })
    );
}

#[test]
fn test_video_top_level_fields() {
    let raw = json!({"video_url": "https://x/v.mp4", "duration": 6});
    assert_eq!(
        normalize(Modality::Video, raw),
        Ok(CanonicalResponse::Video {
            media: url("https://x/v.mp4"),
            thumbnail: None,
        })
    );
}

// ============================================================================
// Unrecognized Shape Tests
// ============================================================================

#[test]
fn test_unknown_object_for_every_modality() {
    for modality in [Modality::Text, Modality::Image, Modality::Video] {
        assert_eq!(
            normalize(modality, json!({"foo": "bar"})),
            Err(FailureClass::UnrecognizedResponseShape),
            "{}",
            modality
        );
    }
}

#[test]
fn test_non_object_bodies_unrecognized() {
    for raw in [json!([1, 2]), json!("text"), json!(null), json!(3)] {
        for modality in [Modality::Image, Modality::Video] {
            assert_eq!(
                normalize(modality, raw.clone()),
                Err(FailureClass::UnrecognizedResponseShape)
            );
        }
    }
}

#[test]
fn test_unrecognized_error_names_keys() {
    let err = SchemaNormalizer::new()
        .normalize(Modality::Image, &json!({"foo": "bar"}))
        .unwrap_err();
    match err.kind {
        NormalizeErrorKind::UnrecognizedResponseShape { modality, detail } => {
            assert_eq!(modality, "image");
            assert!(detail.contains("foo"));
        }
        other => panic!("unexpected kind: {:?}", other),
    }
}

#[test]
fn test_normalize_str_invalid_json() {
    let normalizer = SchemaNormalizer::new();
    let err = normalizer.normalize_str(Modality::Text, "<html>502</html>").unwrap_err();
    assert_eq!(
        MosaicError::from(err).class(),
        FailureClass::UnrecognizedResponseShape
    );

    assert_eq!(
        normalizer
            .normalize_str(Modality::Text, r#"{"output": "ok"}"#)
            .unwrap(),
        text("ok")
    );
}
