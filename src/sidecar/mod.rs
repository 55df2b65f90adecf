pub mod captioning;
pub mod generation;

pub use captioning::{clean_caption, CaptionClient};
pub use generation::GenerationClient;

use crate::error::Result;
use crate::types::GenerationParams;
use async_trait::async_trait;

#[async_trait]
pub trait TextGenerator: Send + Sync {
    /// Raw multi-line output for `prompt`. Implementations reject a
    /// temperature outside 0-1 before sending anything.
    async fn generate(&self, prompt: &str, params: &GenerationParams) -> Result<String>;
}

#[async_trait]
pub trait ImageCaptioner: Send + Sync {
    async fn caption(&self, image_url: &str) -> Result<String>;
}
