use std::fmt;
use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

static MEDIA_ID_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?:v=|/)([0-9A-Za-z_-]{11})").expect("media id pattern is valid")
});

const MAX_CONTENT_ID_LEN: usize = 128;

/// Stable identifier of the media a transcript belongs to.
///
/// Derived from the source media (a video id), never from the transcript
/// text, so it doubles as the summary cache key.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ContentId(String);

impl ContentId {
    pub fn parse(raw: impl Into<String>) -> Result<Self, ContentIdError> {
        let raw = raw.into();
        let trimmed = raw.trim();

        if trimmed.is_empty() {
            return Err(ContentIdError::Empty);
        }
        if trimmed.len() > MAX_CONTENT_ID_LEN {
            return Err(ContentIdError::TooLong(trimmed.len()));
        }
        if let Some(c) = trimmed
            .chars()
            .find(|c| !(c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.' | ':')))
        {
            return Err(ContentIdError::InvalidCharacter(c));
        }

        Ok(Self(trimmed.to_string()))
    }

    /// Extracts the 11-character video id from a watch or short-link URL.
    pub fn from_media_url(url: &str) -> Result<Self, ContentIdError> {
        MEDIA_ID_PATTERN
            .captures(url)
            .and_then(|caps| caps.get(1))
            .map(|m| Self(m.as_str().to_string()))
            .ok_or_else(|| ContentIdError::UnrecognizedUrl(url.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ContentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<String> for ContentId {
    type Error = ContentIdError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(value)
    }
}

impl From<ContentId> for String {
    fn from(id: ContentId) -> Self {
        id.0
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ContentIdError {
    #[error("content id is empty")]
    Empty,
    #[error("content id is too long: {0} bytes")]
    TooLong(usize),
    #[error("content id contains invalid character {0:?}")]
    InvalidCharacter(char),
    #[error("no media id found in url: {0}")]
    UnrecognizedUrl(String),
}
