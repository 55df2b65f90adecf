use super::ReplySender;
use crate::config::GroupMeConfig;
use crate::error::{BotError, ConfigError, Result};
use async_trait::async_trait;
use bytes::Bytes;
use reqwest::Client;
use serde_json::{json, Value};
use tracing::{debug, warn};

#[derive(Debug, Clone)]
pub struct GroupMeClient {
    http: Client,
    api_url: String,
    image_url: String,
    bot_id: String,
    access_token: Option<String>,
}

impl GroupMeClient {
    pub fn new(http: Client, config: &GroupMeConfig, bot_id: impl Into<String>) -> Self {
        Self {
            http,
            api_url: config.api_url.trim_end_matches('/').to_string(),
            image_url: config.image_url.trim_end_matches('/').to_string(),
            bot_id: bot_id.into(),
            access_token: config.access_token.clone(),
        }
    }

    /// Uploads raw JPEG bytes to the GroupMe image service and returns the
    /// hosted URL, the only kind of URL a bot post may attach.
    pub async fn upload_image(&self, image: Bytes) -> Result<String> {
        let token = self
            .access_token
            .as_ref()
            .ok_or(ConfigError::MissingAccessToken)?;

        let resp = self
            .http
            .post(format!("{}/pictures", self.image_url))
            .header("Content-Type", "image/jpeg")
            .header("X-Access-Token", token)
            .body(image)
            .send()
            .await?;
        if !resp.status().is_success() {
            let status = resp.status();
            let body = resp.text().await.unwrap_or_default();
            return Err(BotError::Status {
                service: "groupme image service",
                status,
                body,
            });
        }

        let value: Value = resp.json().await?;
        value
            .get("payload")
            .and_then(|v| v.get("url"))
            .and_then(|v| v.as_str())
            .map(|s| s.to_string())
            .ok_or_else(|| BotError::MalformedResponse {
                service: "groupme image service",
                detail: format!("missing payload.url in {value}"),
            })
    }

    async fn post_bot_message(&self, payload: Value) -> Result<bool> {
        let resp = self
            .http
            .post(format!("{}/v3/bots/post", self.api_url))
            .json(&payload)
            .send()
            .await?;
        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            warn!(%status, %body, "groupme rejected bot post");
            return Ok(false);
        }
        debug!(%status, "groupme accepted bot post");
        Ok(true)
    }
}

#[async_trait]
impl ReplySender for GroupMeClient {
    async fn post_text(&self, text: &str) -> Result<bool> {
        self.post_bot_message(json!({
            "bot_id": self.bot_id,
            "text": text,
        }))
        .await
    }

    async fn post_image(&self, image: Bytes) -> Result<bool> {
        let url = self.upload_image(image).await?;
        self.post_bot_message(json!({
            "bot_id": self.bot_id,
            "attachments": [{"type": "image", "url": url}],
        }))
        .await
    }
}
