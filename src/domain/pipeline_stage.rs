use std::fmt;

/// States a single summarization run moves through.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PipelineStage {
    CacheCheck,
    Split,
    Dispatch,
    Reduce,
    Fallback,
    Done,
    Failed,
}

impl PipelineStage {
    pub fn as_str(&self) -> &'static str {
        match self {
            PipelineStage::CacheCheck => "CACHE_CHECK",
            PipelineStage::Split => "SPLIT",
            PipelineStage::Dispatch => "DISPATCH",
            PipelineStage::Reduce => "REDUCE",
            PipelineStage::Fallback => "FALLBACK",
            PipelineStage::Done => "DONE",
            PipelineStage::Failed => "FAILED",
        }
    }
}

impl fmt::Display for PipelineStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// How the returned summary was obtained.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SummaryPath {
    Cache,
    Reduced,
    Fallback,
}

impl SummaryPath {
    pub fn as_str(&self) -> &'static str {
        match self {
            SummaryPath::Cache => "cache",
            SummaryPath::Reduced => "reduced",
            SummaryPath::Fallback => "fallback",
        }
    }
}

impl fmt::Display for SummaryPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
