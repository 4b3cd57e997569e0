mod backend_descriptor;
mod bullet_range;
mod chunk;
mod content_id;
mod partial_summary;
mod pipeline_stage;
mod summary_result;

pub use backend_descriptor::{BackendDescriptor, BackendId};
pub use bullet_range::{BulletRange, BulletRangeError};
pub use chunk::Chunk;
pub use content_id::{ContentId, ContentIdError};
pub use partial_summary::{ChunkFailure, ChunkOutcome, FailureCategory, PartialSummary};
pub use pipeline_stage::{PipelineStage, SummaryPath};
pub use summary_result::SummaryResult;
