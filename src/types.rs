use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// A GroupMe attachment. Anything that is not a well-formed image is `Other`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Value", into = "Value")]
pub enum Attachment {
    Image { url: String },
    Other,
}

impl Attachment {
    pub fn image_url(&self) -> Option<&str> {
        match self {
            Attachment::Image { url } => Some(url),
            Attachment::Other => None,
        }
    }
}

impl From<Value> for Attachment {
    fn from(value: Value) -> Self {
        let kind = value.get("type").and_then(|v| v.as_str());
        let url = value.get("url").and_then(|v| v.as_str());
        match (kind, url) {
            (Some("image"), Some(url)) if !url.is_empty() => Attachment::Image {
                url: url.to_string(),
            },
            _ => Attachment::Other,
        }
    }
}

impl From<Attachment> for Value {
    fn from(att: Attachment) -> Self {
        match att {
            Attachment::Image { url } => serde_json::json!({"type": "image", "url": url}),
            Attachment::Other => serde_json::json!({"type": "other"}),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InboundMessage {
    #[serde(rename = "name")]
    pub sender_name: String,
    #[serde(default)]
    pub sender_id: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub text: String,
    #[serde(with = "chrono::serde::ts_seconds")]
    pub created_at: DateTime<Utc>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub attachments: Vec<Attachment>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub avatar_url: String,
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub group_id: Option<String>,
    #[serde(default)]
    pub sender_type: Option<String>,
    #[serde(default)]
    pub source_guid: Option<String>,
    #[serde(default)]
    pub system: Option<bool>,
    #[serde(default)]
    pub user_id: Option<String>,
}

impl InboundMessage {
    pub fn image_urls(&self) -> Vec<&str> {
        self.attachments
            .iter()
            .filter_map(Attachment::image_url)
            .collect()
    }
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GenerationParams {
    pub length: u32,
    pub temperature: f32,
    pub keep_whole: bool,
}

impl GenerationParams {
    pub fn temperature_in_range(&self) -> bool {
        (0.0..=1.0).contains(&self.temperature)
    }
}
