use etabot::types::{Attachment, GenerationParams, InboundMessage};
use serde_json::json;

fn groupme_callback() -> serde_json::Value {
    json!({
        "attachments": [
            {"type": "image", "url": "https://i.groupme.com/1024x768.jpeg.abc"},
            {"type": "mentions", "user_ids": ["1"], "loci": [[0, 4]]},
            {"type": "image"},
            {"url": "https://i.groupme.com/no-type"}
        ],
        "avatar_url": "https://i.groupme.com/123456789",
        "created_at": 1302623328,
        "group_id": "1234567890",
        "id": "1234567890",
        "name": "John",
        "sender_id": "12345",
        "sender_type": "user",
        "source_guid": "GUID",
        "system": false,
        "text": "@FratGPT what is this",
        "user_id": "1234567890"
    })
}

#[test]
fn test_parse_groupme_callback() {
    let msg: InboundMessage = serde_json::from_value(groupme_callback()).unwrap();
    assert_eq!(msg.sender_name, "John");
    assert_eq!(msg.sender_id, "12345");
    assert_eq!(msg.text, "@FratGPT what is this");
    assert_eq!(msg.created_at.timestamp(), 1302623328);
    assert_eq!(msg.avatar_url, "https://i.groupme.com/123456789");
    assert_eq!(msg.group_id.as_deref(), Some("1234567890"));
    assert_eq!(msg.system, Some(false));
    assert_eq!(msg.attachments.len(), 4);
}

#[test]
fn test_malformed_attachments_become_other() {
    let msg: InboundMessage = serde_json::from_value(groupme_callback()).unwrap();
    assert_eq!(
        msg.attachments[0],
        Attachment::Image {
            url: "https://i.groupme.com/1024x768.jpeg.abc".to_string()
        }
    );
    assert_eq!(msg.attachments[1], Attachment::Other);
    assert_eq!(msg.attachments[2], Attachment::Other);
    assert_eq!(msg.attachments[3], Attachment::Other);
    assert_eq!(msg.image_urls(), vec!["https://i.groupme.com/1024x768.jpeg.abc"]);
}

#[test]
fn test_null_text_and_avatar() {
    let mut payload = groupme_callback();
    payload["text"] = serde_json::Value::Null;
    payload["avatar_url"] = serde_json::Value::Null;
    payload["attachments"] = serde_json::Value::Null;
    let msg: InboundMessage = serde_json::from_value(payload).unwrap();
    assert_eq!(msg.text, "");
    assert_eq!(msg.avatar_url, "");
    assert!(msg.attachments.is_empty());
}

#[test]
fn test_minimal_callback() {
    let msg: InboundMessage = serde_json::from_value(json!({
        "name": "Jane",
        "text": "hello",
        "created_at": 1700000000
    }))
    .unwrap();
    assert_eq!(msg.sender_name, "Jane");
    assert!(msg.sender_id.is_empty());
    assert!(msg.attachments.is_empty());
    assert!(msg.id.is_none());
}

#[test]
fn test_missing_sender_name_is_rejected() {
    let result = serde_json::from_value::<InboundMessage>(json!({
        "text": "hello",
        "created_at": 1700000000
    }));
    assert!(result.is_err());
}

#[test]
fn test_image_attachment_serializes_with_type() {
    let value = serde_json::to_value(Attachment::Image {
        url: "https://i.groupme.com/x".to_string(),
    })
    .unwrap();
    assert_eq!(value, json!({"type": "image", "url": "https://i.groupme.com/x"}));
}

#[test]
fn test_generation_params_bounds() {
    let params = GenerationParams {
        length: 250,
        temperature: 1.0,
        keep_whole: true,
    };
    assert!(params.temperature_in_range());
    let params = GenerationParams {
        temperature: 0.0,
        ..params
    };
    assert!(params.temperature_in_range());
}
