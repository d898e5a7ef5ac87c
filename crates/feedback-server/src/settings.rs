//! Process settings, read once from the environment at startup.
//!
//! Every field has a compiled default. Environment variables are matched by
//! their raw (unprefixed) names, so `PORT=8080` sets `port`.

use std::net::SocketAddr;
use std::path::PathBuf;

use figment::providers::Env;
use figment::Figment;
use serde::{Deserialize, Deserializer};

use feedback_core::sample::SamplingPolicy;
use feedback_core::security::ApiKey;
use feedback_llm::models;
use feedback_llm::provider::DEFAULT_BASE_URL;
use feedback_telemetry::LogFormat;

/// Environment variables consulted by [`Settings::from_env`].
const ENV_KEYS: &[&str] = &[
    "PORT",
    "HOST",
    "CLAUDE_API_KEY",
    "CLAUDE_MODEL",
    "ANTHROPIC_BASE_URL",
    "STATIC_DIR",
    "FEEDBACK_MAX_ROWS_SCANNED",
    "FEEDBACK_MAX_ENTRIES_ANALYZED",
    "FEEDBACK_MIN_VALUE_CHARS",
    "LOG_FORMAT",
];

#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
    #[error("invalid settings: {0}")]
    Invalid(#[from] figment::Error),
    #[error("invalid listen address {host}:{port}")]
    Address { host: String, port: u16 },
}

#[derive(Clone, Debug, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub port: u16,
    pub host: String,
    #[serde(deserialize_with = "deserialize_api_key")]
    pub claude_api_key: Option<ApiKey>,
    pub claude_model: String,
    pub anthropic_base_url: String,
    /// Directory served for non-API paths.
    pub static_dir: PathBuf,
    pub feedback_max_rows_scanned: usize,
    pub feedback_max_entries_analyzed: usize,
    pub feedback_min_value_chars: usize,
    pub log_format: LogFormat,
}

impl Default for Settings {
    fn default() -> Self {
        let policy = SamplingPolicy::default();
        Self {
            port: 3000,
            host: "0.0.0.0".to_string(),
            claude_api_key: None,
            claude_model: models::default_model().name.to_string(),
            anthropic_base_url: DEFAULT_BASE_URL.to_string(),
            static_dir: PathBuf::from("public"),
            feedback_max_rows_scanned: policy.max_rows_scanned,
            feedback_max_entries_analyzed: policy.max_entries_analyzed,
            feedback_min_value_chars: policy.min_value_chars,
            log_format: LogFormat::Pretty,
        }
    }
}

impl Settings {
    /// Load settings from the process environment.
    pub fn from_env() -> Result<Self, SettingsError> {
        Self::from_figment(Figment::new().merge(Env::raw().only(ENV_KEYS)))
    }

    /// Extract settings from an arbitrary figment. Missing keys keep their defaults.
    pub fn from_figment(figment: Figment) -> Result<Self, SettingsError> {
        Ok(figment.extract()?)
    }

    pub fn sampling_policy(&self) -> SamplingPolicy {
        SamplingPolicy {
            max_rows_scanned: self.feedback_max_rows_scanned,
            max_entries_analyzed: self.feedback_max_entries_analyzed,
            min_value_chars: self.feedback_min_value_chars,
        }
    }

    pub fn socket_addr(&self) -> Result<SocketAddr, SettingsError> {
        format!("{}:{}", self.host, self.port)
            .parse()
            .map_err(|_| SettingsError::Address {
                host: self.host.clone(),
                port: self.port,
            })
    }
}

/// Blank keys count as missing.
fn deserialize_api_key<'de, D>(deserializer: D) -> Result<Option<ApiKey>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<String>::deserialize(deserializer)?;
    Ok(raw.filter(|key| !key.trim().is_empty()).map(ApiKey::new))
}
