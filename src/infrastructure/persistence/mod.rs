mod in_memory_summary_cache;
mod pg_pool;
mod pg_summary_cache;

pub use in_memory_summary_cache::InMemorySummaryCache;
pub use pg_pool::{create_pool, run_migrations};
pub use pg_summary_cache::PgSummaryCache;
