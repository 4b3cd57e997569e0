use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::ContentId;

/// A final summary, immutable once written to the cache.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SummaryResult {
    pub content_id: ContentId,
    pub summary_text: String,
    pub created_at: DateTime<Utc>,
}

impl SummaryResult {
    pub fn new(content_id: ContentId, summary_text: String) -> Self {
        Self {
            content_id,
            summary_text,
            created_at: Utc::now(),
        }
    }
}
