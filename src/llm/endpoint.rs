//! Model endpoint resolution
//!
//! A fully configured custom model (name, URL and key) wins. Otherwise the
//! endpoint is derived from the model version string, which doubles as the
//! host name of a locally served model (`llama3-70b` -> `http://llama3-70b/v1`,
//! model family `llama3`).

use crate::config::ModelSettings;

/// Where and how to reach the chat-completion endpoint
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModelEndpoint {
    pub model: String,
    pub base_url: String,
    pub credential: Option<String>,
}

impl ModelEndpoint {
    pub fn resolve(settings: &ModelSettings) -> Self {
        if let (Some(name), Some(url), Some(key)) = (
            non_empty(settings.model_name.as_deref()),
            non_empty(settings.model_url.as_deref()),
            non_empty(settings.model_key.as_deref()),
        ) {
            return Self {
                model: name.to_string(),
                base_url: url.trim_end_matches('/').to_string(),
                credential: Some(key.to_string()),
            };
        }

        let version = settings.model_version.as_str();
        let family = version.split('-').next().unwrap_or(version);
        Self {
            model: family.to_string(),
            base_url: format!("http://{version}/v1"),
            credential: None,
        }
    }

    pub fn completions_url(&self) -> String {
        format!("{}/chat/completions", self.base_url)
    }

    /// Value of the `Authorization` header; empty for local models.
    pub fn authorization(&self) -> String {
        match &self.credential {
            Some(key) => format!("Bearer {key}"),
            None => String::new(),
        }
    }
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.trim().is_empty())
}
