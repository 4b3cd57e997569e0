use std::time::Duration;

use config::{Config, ConfigError, File};
use serde::Deserialize;

use crate::application::services::{PipelineOptions, SelectionPolicy};
use crate::domain::{BulletRange, BulletRangeError};

use super::Environment;

#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    #[serde(default)]
    pub server: ServerSettings,
    #[serde(default)]
    pub summarizer: SummarizerSettings,
    #[serde(default)]
    pub backends: Vec<BackendSettings>,
    #[serde(default)]
    pub cache: CacheSettings,
    #[serde(default)]
    pub captions: CaptionSettings,
    #[serde(default)]
    pub logging: LoggingSettings,
}

impl Settings {
    /// Layers `appsettings.{env}` (optional) under `APP_`-prefixed
    /// environment variables, e.g. `APP_SERVER__PORT=8080`.
    pub fn load(environment: Environment) -> Result<Self, ConfigError> {
        Config::builder()
            .add_source(
                File::with_name(&format!("appsettings.{}", environment.as_str().to_lowercase()))
                    .required(false),
            )
            .add_source(
                config::Environment::with_prefix("APP")
                    .prefix_separator("_")
                    .separator("__"),
            )
            .build()?
            .try_deserialize()
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerSettings {
    pub host: String,
    pub port: u16,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 3000,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SummarizerSettings {
    pub chunk_size: usize,
    pub chunk_overlap: usize,
    pub dispatch_pacing_ms: u64,
    pub dispatch_deadline_ms: Option<u64>,
    pub fallback_max_chars: usize,
    pub final_bullets_min: usize,
    pub final_bullets_max: usize,
    pub final_selection: SelectionPolicy,
    pub single_flight: bool,
}

impl Default for SummarizerSettings {
    fn default() -> Self {
        Self {
            chunk_size: 3000,
            chunk_overlap: 200,
            dispatch_pacing_ms: 500,
            dispatch_deadline_ms: None,
            fallback_max_chars: 8000,
            final_bullets_min: 10,
            final_bullets_max: 15,
            final_selection: SelectionPolicy::RoundRobin,
            single_flight: true,
        }
    }
}

impl SummarizerSettings {
    pub fn pipeline_options(&self) -> Result<PipelineOptions, BulletRangeError> {
        Ok(PipelineOptions {
            dispatch_pacing: Duration::from_millis(self.dispatch_pacing_ms),
            dispatch_deadline: self.dispatch_deadline_ms.map(Duration::from_millis),
            fallback_max_chars: self.fallback_max_chars,
            final_bullets: BulletRange::new(self.final_bullets_min, self.final_bullets_max)?,
            final_selection: self.final_selection,
            single_flight: self.single_flight,
        })
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct BackendSettings {
    pub id: String,
    pub model: String,
    #[serde(default)]
    pub api_key: String,
    pub endpoint: String,
    #[serde(default = "default_temperature")]
    pub temperature: f32,
    #[serde(default)]
    pub max_tokens: Option<usize>,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_temperature() -> f32 {
    0.7
}

fn default_timeout_secs() -> u64 {
    60
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CacheProvider {
    #[default]
    Memory,
    Postgres,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct CacheSettings {
    pub provider: CacheProvider,
    pub database_url: Option<String>,
    pub max_connections: u32,
}

impl Default for CacheSettings {
    fn default() -> Self {
        Self {
            provider: CacheProvider::Memory,
            database_url: None,
            max_connections: 5,
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct CaptionSettings {
    #[serde(default)]
    pub directory: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LoggingSettings {
    pub level: String,
    pub enable_json: bool,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: "info,podsum=debug,tower_http=debug".to_string(),
            enable_json: false,
        }
    }
}
