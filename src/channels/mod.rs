pub mod groupme;

use crate::error::Result;
use async_trait::async_trait;
use bytes::Bytes;

/// Outbound side of the group chat.
///
/// `Ok(false)` means the platform answered but refused the post; transport
/// failures come back as `Err`.
#[async_trait]
pub trait ReplySender: Send + Sync {
    async fn post_text(&self, text: &str) -> Result<bool>;
    async fn post_image(&self, image: Bytes) -> Result<bool>;
}
