use anyhow::{Context, Result};
use serde::Deserialize;

/// Prefix for environment overrides, e.g. `PTE_PRACTICE__API__BASE_URL`
pub const ENV_PREFIX: &str = "PTE_PRACTICE";

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub service: ServiceConfig,
    #[serde(default)]
    pub practice: PracticeConfig,
    #[serde(default)]
    pub api: ApiConfig,
    #[serde(default)]
    pub speech: SpeechConfig,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServiceConfig {
    pub name: String,
    /// Default `tracing` filter when `RUST_LOG` is unset
    pub log_level: String,
    pub http: HttpConfig,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            name: "pte-practice".to_string(),
            log_level: "info".to_string(),
            http: HttpConfig::default(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct HttpConfig {
    pub bind: String,
    pub port: u16,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            bind: "127.0.0.1".to_string(),
            port: 8787,
        }
    }
}

/// Timing of a read-aloud attempt, in seconds
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct PracticeConfig {
    pub prep_secs: u32,
    pub record_secs: u32,
    pub one_line_record_secs: u32,
}

impl Default for PracticeConfig {
    fn default() -> Self {
        Self {
            prep_secs: 35,
            record_secs: 40,
            one_line_record_secs: 15,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ApiConfig {
    pub base_url: String,
    /// Initial bearer token; can be replaced at runtime through the auth session
    pub token: Option<String>,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:5000/api".to_string(),
            token: None,
        }
    }
}

/// Where transcripts come from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SpeechSource {
    /// STT service publishing on NATS
    Nats,
    /// No recognizer available; every attempt fails to start
    Unavailable,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SpeechConfig {
    pub source: SpeechSource,
    pub nats_url: String,
}

impl Default for SpeechConfig {
    fn default() -> Self {
        Self {
            source: SpeechSource::Nats,
            nats_url: "nats://localhost:4222".to_string(),
        }
    }
}

impl Config {
    /// Load from `path` (extension optional, file may be absent) layered with
    /// `PTE_PRACTICE__SECTION__KEY` environment variables.
    pub fn load(path: &str) -> Result<Self> {
        let settings = config::Config::builder()
            .add_source(config::File::with_name(path).required(false))
            .add_source(config::Environment::with_prefix(ENV_PREFIX).separator("__"))
            .build()
            .with_context(|| format!("Failed to read config from {}", path))?;

        settings
            .try_deserialize()
            .context("Failed to parse configuration")
    }
}
