use crate::channels::ReplySender;
use crate::dispatch::DispatchDecision;
use crate::error::{BotError, Result};
use crate::sampler::sample_line;
use crate::sidecar::{ImageCaptioner, TextGenerator};
use crate::types::GenerationParams;
use bytes::Bytes;
use rand::Rng;
use reqwest::Client;
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::{info, warn};

pub struct Responder {
    http: Client,
    sender: Arc<dyn ReplySender>,
    generator: Arc<dyn TextGenerator>,
    captioner: Arc<dyn ImageCaptioner>,
    // the generation sidecar serves one request at a time
    generation_lock: Mutex<()>,
}

impl Responder {
    pub fn new(
        http: Client,
        sender: Arc<dyn ReplySender>,
        generator: Arc<dyn TextGenerator>,
        captioner: Arc<dyn ImageCaptioner>,
    ) -> Self {
        Self {
            http,
            sender,
            generator,
            captioner,
            generation_lock: Mutex::new(()),
        }
    }

    /// Returns how many replies the platform accepted.
    pub async fn execute<R>(&self, decision: &DispatchDecision, rng: &mut R) -> Result<usize>
    where
        R: Rng + Send + ?Sized,
    {
        match decision {
            DispatchDecision::NoOp { .. } => Ok(0),
            DispatchDecision::AvatarEcho { avatar_url } => {
                if avatar_url.is_empty() {
                    warn!("sender has no avatar to echo");
                    return Ok(0);
                }
                self.repost_image(avatar_url).await
            }
            DispatchDecision::StaticImage { url } => self.repost_image(url).await,
            DispatchDecision::LongForm { prompt, params }
            | DispatchDecision::ShortGeneration { prompt, params }
            | DispatchDecision::Unsolicited { prompt, params } => {
                let reply = self.generate_reply(prompt, params, rng).await?;
                self.deliver_text(&reply).await
            }
            DispatchDecision::CaptionedReply { remainder, images } => {
                let mut delivered = 0;
                for target in images {
                    let caption = self.captioner.caption(&target.url).await?;
                    info!(url = %target.url, %caption, "captioned image");
                    let prompt = format!("{caption}. {remainder}");
                    let reply = self.generate_reply(&prompt, &target.params, rng).await?;
                    delivered += self.deliver_text(&reply).await?;
                }
                Ok(delivered)
            }
            DispatchDecision::IdentifyOnly { image_urls } => {
                let mut delivered = 0;
                for url in image_urls {
                    let caption = self.captioner.caption(url).await?;
                    delivered += self.deliver_text(&caption).await?;
                }
                Ok(delivered)
            }
        }
    }

    async fn generate_reply<R>(
        &self,
        prompt: &str,
        params: &GenerationParams,
        rng: &mut R,
    ) -> Result<String>
    where
        R: Rng + Send + ?Sized,
    {
        if !params.temperature_in_range() {
            return Err(BotError::InvalidTemperature(params.temperature));
        }
        let raw = {
            let _guard = self.generation_lock.lock().await;
            self.generator.generate(prompt, params).await?
        };
        Ok(sample_line(&raw, params.keep_whole, rng))
    }

    async fn deliver_text(&self, text: &str) -> Result<usize> {
        if text.trim().is_empty() {
            warn!("nothing to post, generated reply was blank");
            return Ok(0);
        }
        if self.sender.post_text(text).await? {
            Ok(1)
        } else {
            warn!("text reply was not accepted");
            Ok(0)
        }
    }

    async fn repost_image(&self, url: &str) -> Result<usize> {
        let image = self.download_image(url).await?;
        if self.sender.post_image(image).await? {
            Ok(1)
        } else {
            warn!(%url, "image reply was not accepted");
            Ok(0)
        }
    }

    async fn download_image(&self, url: &str) -> Result<Bytes> {
        let resp = self.http.get(url).send().await?;
        if !resp.status().is_success() {
            let status = resp.status();
            let body = resp.text().await.unwrap_or_default();
            return Err(BotError::Status {
                service: "image download",
                status,
                body,
            });
        }
        Ok(resp.bytes().await?)
    }
}
