use std::fmt;

use serde::{Deserialize, Serialize};

const VISIBLE_CREDENTIAL_SUFFIX: usize = 4;

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BackendId(String);

impl BackendId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for BackendId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Identifies one callable summarization backend: a model behind an
/// endpoint, reached with one credential.
#[derive(Clone, PartialEq, Eq)]
pub struct BackendDescriptor {
    pub id: BackendId,
    pub model_name: String,
    pub credential: String,
    pub endpoint: String,
}

impl BackendDescriptor {
    pub fn new(
        id: impl Into<String>,
        model_name: impl Into<String>,
        credential: impl Into<String>,
        endpoint: impl Into<String>,
    ) -> Self {
        Self {
            id: BackendId::new(id),
            model_name: model_name.into(),
            credential: credential.into(),
            endpoint: endpoint.into(),
        }
    }

    /// The credential reduced to its last few chars, safe for log output.
    pub fn credential_hint(&self) -> String {
        let chars: Vec<char> = self.credential.chars().collect();
        if chars.len() <= VISIBLE_CREDENTIAL_SUFFIX {
            return "...".to_string();
        }
        let suffix: String = chars[chars.len() - VISIBLE_CREDENTIAL_SUFFIX..]
            .iter()
            .collect();
        format!("...{}", suffix)
    }
}

impl fmt::Debug for BackendDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BackendDescriptor")
            .field("id", &self.id)
            .field("model_name", &self.model_name)
            .field("credential", &self.credential_hint())
            .field("endpoint", &self.endpoint)
            .finish()
    }
}
