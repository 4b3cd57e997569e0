mod caption_source;
mod summary_backend;
mod summary_cache;
mod text_splitter;

pub use caption_source::{CaptionSource, CaptionSourceError};
pub use summary_backend::{BackendError, SummaryBackend};
pub use summary_cache::{CacheError, SummaryCache};
pub use text_splitter::{TextSplitter, TextSplitterError};
