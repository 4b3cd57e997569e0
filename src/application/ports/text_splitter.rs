use crate::domain::Chunk;

pub trait TextSplitter: Send + Sync {
    fn split(&self, text: &str) -> Result<Vec<Chunk>, TextSplitterError>;
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TextSplitterError {
    #[error("no text to summarize")]
    EmptyInput,
    #[error("invalid splitter configuration: {0}")]
    InvalidConfig(String),
}
