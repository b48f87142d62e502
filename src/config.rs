//! Service configuration
//!
//! Everything is read from the environment once at startup. Each section
//! also has a `from_lookup` constructor so tests can supply values without
//! touching the process environment.

use crate::prompt::UseCase;

const DEFAULT_PORT: u16 = 8000;
const DEFAULT_MODEL_VERSION: &str = "llama3-70b";
const DEFAULT_TEMPERATURE: f32 = 0.3;
const DEFAULT_HOST_URL: &str = "http://localhost:3000";

/// HTTP listener and storage settings
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub port: u16,
    pub db_path: String,
}

impl ServerConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let port = lookup("EMBELLISHER_PORT")
            .and_then(|p| p.parse().ok())
            .unwrap_or(DEFAULT_PORT);

        let db_path = lookup("EMBELLISHER_DB_PATH").unwrap_or_else(|| {
            let home = lookup("HOME").unwrap_or_else(|| "/tmp".to_string());
            format!("{home}/.embellisher/embellisher.db")
        });

        Self { port, db_path }
    }
}

/// Model selection and prompt persona
#[derive(Debug, Clone)]
pub struct ModelSettings {
    /// Version string of the locally served model, e.g. `llama3-70b`
    pub model_version: String,
    /// Custom model override; only used when name, URL and key are all set
    pub model_name: Option<String>,
    pub model_url: Option<String>,
    pub model_key: Option<String>,
    pub use_case: UseCase,
    pub temperature: f32,
}

impl Default for ModelSettings {
    fn default() -> Self {
        Self {
            model_version: DEFAULT_MODEL_VERSION.to_string(),
            model_name: None,
            model_url: None,
            model_key: None,
            use_case: UseCase::Communication,
            temperature: DEFAULT_TEMPERATURE,
        }
    }
}

impl ModelSettings {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();
        Self {
            model_version: lookup("EMBELLISHER_MODEL")
                .filter(|v| !v.trim().is_empty())
                .unwrap_or(defaults.model_version),
            model_name: lookup("EMBELLISHER_MODEL_NAME"),
            model_url: lookup("EMBELLISHER_MODEL_URL"),
            model_key: lookup("EMBELLISHER_MODEL_KEY"),
            use_case: lookup("EMBELLISHER_USE_CASE")
                .map_or(defaults.use_case, |v| UseCase::from_setting(&v)),
            temperature: lookup("EMBELLISHER_TEMPERATURE")
                .and_then(|t| t.parse().ok())
                .unwrap_or(defaults.temperature),
        }
    }
}

/// Credentials for the chat platform's REST API
#[derive(Debug, Clone)]
pub struct HostConfig {
    pub base_url: String,
    pub user_id: String,
    pub token: String,
}

impl HostConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        Self {
            base_url: lookup("EMBELLISHER_HOST_URL")
                .unwrap_or_else(|| DEFAULT_HOST_URL.to_string())
                .trim_end_matches('/')
                .to_string(),
            user_id: lookup("EMBELLISHER_HOST_USER_ID").unwrap_or_default(),
            token: lookup("EMBELLISHER_HOST_TOKEN").unwrap_or_default(),
        }
    }
}
