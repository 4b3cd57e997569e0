mod error_response;
mod health;
mod questions;
mod summaries;

pub use error_response::ErrorResponse;
pub use health::health_handler;
pub use questions::ask_handler;
pub use summaries::{clear_summary_handler, get_summary_handler, summarize_handler};
