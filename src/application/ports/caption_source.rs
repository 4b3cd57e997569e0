use async_trait::async_trait;

use crate::domain::ContentId;

#[async_trait]
pub trait CaptionSource: Send + Sync {
    async fn fetch(&self, content_id: &ContentId) -> Result<String, CaptionSourceError>;
}

#[derive(Debug, thiserror::Error)]
pub enum CaptionSourceError {
    #[error("captions unavailable for {content_id}: {reason}")]
    Unavailable {
        content_id: ContentId,
        reason: String,
    },
}
