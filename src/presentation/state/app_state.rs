use std::sync::Arc;

use crate::application::ports::{CaptionSource, SummaryCache};
use crate::application::services::{QaService, SummarizationService};

#[derive(Clone)]
pub struct AppState {
    pub summarization_service: Arc<SummarizationService>,
    pub qa_service: Arc<QaService>,
    pub cache: Arc<dyn SummaryCache>,
    pub caption_source: Option<Arc<dyn CaptionSource>>,
}
