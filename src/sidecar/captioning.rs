use super::ImageCaptioner;
use crate::config::CaptioningConfig;
use crate::error::{BotError, Result};
use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use serde_json::json;
use std::time::Duration;

/// Tokens the captioning model hallucinates at the start of many captions.
const CAPTION_ARTIFACTS: &[&str] = &["araffe", "arafed"];

#[derive(Debug, Clone)]
pub struct CaptionClient {
    http: Client,
    base_url: String,
}

#[derive(Debug, Deserialize)]
struct CaptionResponse {
    caption: String,
}

impl CaptionClient {
    pub fn new(config: &CaptioningConfig) -> Result<Self> {
        let http = Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .build()?;
        Ok(Self {
            http,
            base_url: config.url.trim_end_matches('/').to_string(),
        })
    }
}

#[async_trait]
impl ImageCaptioner for CaptionClient {
    async fn caption(&self, image_url: &str) -> Result<String> {
        let resp = self
            .http
            .post(format!("{}/caption", self.base_url))
            .json(&json!({"url": image_url}))
            .send()
            .await?;
        if !resp.status().is_success() {
            let status = resp.status();
            let body = resp.text().await.unwrap_or_default();
            return Err(BotError::Status {
                service: "captioning sidecar",
                status,
                body,
            });
        }
        let data: CaptionResponse = resp.json().await?;
        Ok(clean_caption(&data.caption))
    }
}

pub fn clean_caption(raw: &str) -> String {
    let mut first = raw.split(',').next().unwrap_or_default().to_string();
    for artifact in CAPTION_ARTIFACTS {
        first = first.replace(artifact, "");
    }
    first.split_whitespace().collect::<Vec<_>>().join(" ")
}
