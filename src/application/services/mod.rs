mod backend_pool;
mod backend_selector;
mod chunk_worker;
mod dispatcher;
mod fallback;
mod prompts;
mod qa_service;
mod reducer;
mod single_flight;
mod summarization_service;

pub use backend_pool::{BackendPool, BackendPoolError};
pub use backend_selector::{
    BackendSelector, FixedSelector, RandomSelector, RoundRobinSelector, SelectionPolicy,
};
pub use chunk_worker::summarize_chunk;
pub use dispatcher::{DispatchReport, Dispatcher};
pub use fallback::{DEFAULT_FALLBACK_MAX_CHARS, FallbackController};
pub use prompts::{TRUNCATION_MARKER, UNKNOWN_ANSWER};
pub use qa_service::{AskError, QaService};
pub use reducer::{ReduceError, Reducer};
pub use single_flight::{InFlightGuard, InFlightRegistry};
pub use summarization_service::{
    PipelineOptions, PipelineStats, SummarizationService, SummarizeError, SummaryOutcome,
};
