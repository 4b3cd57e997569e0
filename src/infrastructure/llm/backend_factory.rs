use std::sync::Arc;
use std::time::Duration;

use crate::application::ports::SummaryBackend;
use crate::application::services::BackendPool;
use crate::domain::BackendDescriptor;
use crate::presentation::config::{BackendSettings, ScaffoldConfig};

use super::{OpenAiCompatibleBackend, ScriptedBackend};

pub struct BackendFactory;

#[derive(Debug, thiserror::Error)]
pub enum BackendFactoryError {
    #[error("no backends configured")]
    NoBackends,
    #[error("backend {0} has no credential")]
    MissingCredential(String),
    #[error("backend {id} could not be initialized: {reason}")]
    InitializationFailed { id: String, reason: String },
}

impl BackendFactory {
    /// Builds the pool in configuration order. Scaffold mode swaps every
    /// configured backend for a scripted one with the same descriptor.
    pub fn create_pool(
        settings: &[BackendSettings],
        scaffold: &ScaffoldConfig,
    ) -> Result<BackendPool, BackendFactoryError> {
        if settings.is_empty() {
            return Err(BackendFactoryError::NoBackends);
        }

        let mut backends: Vec<Arc<dyn SummaryBackend>> = Vec::with_capacity(settings.len());
        for entry in settings {
            let descriptor = BackendDescriptor::new(
                entry.id.clone(),
                entry.model.clone(),
                entry.api_key.clone(),
                entry.endpoint.clone(),
            );

            if scaffold.enabled {
                tracing::info!(backend_id = %descriptor.id, "Using scripted backend (scaffold mode)");
                backends.push(Arc::new(
                    ScriptedBackend::new(descriptor)
                        .with_delay(Duration::from_millis(scaffold.mock_response_delay_ms)),
                ));
                continue;
            }

            if entry.api_key.trim().is_empty() {
                return Err(BackendFactoryError::MissingCredential(entry.id.clone()));
            }

            tracing::info!(
                backend_id = %descriptor.id,
                model = %descriptor.model_name,
                credential = %descriptor.credential_hint(),
                "Registering OpenAI-compatible backend"
            );
            let backend = OpenAiCompatibleBackend::new(
                descriptor,
                entry.temperature,
                entry.max_tokens,
                Duration::from_secs(entry.timeout_secs),
            )
            .map_err(|e| BackendFactoryError::InitializationFailed {
                id: entry.id.clone(),
                reason: e.to_string(),
            })?;
            backends.push(Arc::new(backend));
        }

        BackendPool::new(backends).map_err(|_| BackendFactoryError::NoBackends)
    }
}
