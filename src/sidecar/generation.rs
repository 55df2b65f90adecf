use super::TextGenerator;
use crate::config::GenerationConfig;
use crate::error::{BotError, Result};
use crate::types::GenerationParams;
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::debug;

#[derive(Debug, Clone)]
pub struct GenerationClient {
    http: Client,
    base_url: String,
    top_p: f32,
}

#[derive(Debug, Serialize)]
struct GenerateRequest<'a> {
    prompt: &'a str,
    length: u32,
    temperature: f32,
    top_p: f32,
}

#[derive(Debug, Deserialize)]
struct GenerateResponse {
    text: String,
}

impl GenerationClient {
    pub fn new(config: &GenerationConfig) -> Result<Self> {
        let http = Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .build()?;
        Ok(Self {
            http,
            base_url: config.url.trim_end_matches('/').to_string(),
            top_p: config.top_p,
        })
    }
}

#[async_trait]
impl TextGenerator for GenerationClient {
    async fn generate(&self, prompt: &str, params: &GenerationParams) -> Result<String> {
        if !params.temperature_in_range() {
            return Err(BotError::InvalidTemperature(params.temperature));
        }
        let shown = if prompt.is_empty() { "None" } else { prompt };
        debug!(
            prompt = shown,
            length = params.length,
            temperature = params.temperature,
            "generating message"
        );

        let body = GenerateRequest {
            prompt,
            length: params.length,
            temperature: params.temperature,
            top_p: self.top_p,
        };
        let resp = self
            .http
            .post(format!("{}/generate", self.base_url))
            .json(&body)
            .send()
            .await?;
        if !resp.status().is_success() {
            let status = resp.status();
            let body = resp.text().await.unwrap_or_default();
            return Err(BotError::Status {
                service: "generation sidecar",
                status,
                body,
            });
        }
        let data: GenerateResponse = resp.json().await?;
        Ok(data.text)
    }
}
