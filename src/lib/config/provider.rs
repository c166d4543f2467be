//! # Provider Configuration
//!
//! Settings for the OpenAI-compatible chat completions endpoint that backs the
//! agent. The API key itself never lives in the config file. The file names an
//! environment variable and the key is looked up in the captured
//! [`Environment`] when the client is built.
//!
//! ```toml
//! [provider]
//! endpoint = "https://api.openai.com"
//! api_key_env = "OPENAI_API_KEY"
//! model = "gpt-4o"
//! ```

use super::defaults::{
    BASE_URL_ENV, DEFAULT_API_KEY_ENV, DEFAULT_MODEL, DEFAULT_OPENAI_API_PATH,
    DEFAULT_OPENAI_ENDPOINT,
};
use super::env::Environment;
use serde::Deserialize;
use tracing::warn;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProviderConfig {
    /// Base URL, without the chat completions path
    pub endpoint: String,
    /// Path appended to `endpoint` for chat completions
    pub api_path: String,
    /// Name of the environment variable holding the bearer token
    pub api_key_env: String,
    /// Model identifier sent with every request
    pub model: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub(super) struct RawProviderConfig {
    pub(super) endpoint: Option<String>,
    pub(super) api_path: Option<String>,
    pub(super) api_key_env: Option<String>,
    pub(super) model: Option<String>,
}

impl RawProviderConfig {
    /// Fill gaps with defaults. `OPENAI_BASE_URL` overrides the default endpoint
    /// but never one written in the config file.
    pub(super) fn resolve(self, vars: &Environment) -> ProviderConfig {
        let endpoint = self
            .endpoint
            .or_else(|| vars.non_empty(BASE_URL_ENV).map(str::to_string))
            .unwrap_or_else(|| DEFAULT_OPENAI_ENDPOINT.to_string());

        ProviderConfig {
            endpoint,
            api_path: self
                .api_path
                .unwrap_or_else(|| DEFAULT_OPENAI_API_PATH.to_string()),
            api_key_env: self
                .api_key_env
                .unwrap_or_else(|| DEFAULT_API_KEY_ENV.to_string()),
            model: self.model.unwrap_or_else(|| DEFAULT_MODEL.to_string()),
        }
    }
}

impl ProviderConfig {
    pub fn from_environment(vars: &Environment) -> Self {
        RawProviderConfig::default().resolve(vars)
    }

    /// Look up the API key named by `api_key_env`.
    pub fn resolve_api_key(&self, vars: &Environment) -> Option<String> {
        match vars.non_empty(&self.api_key_env) {
            Some(value) => Some(value.to_string()),
            None => {
                warn!(
                    env_var = self.api_key_env.as_str(),
                    "API key environment variable is not set"
                );
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_target_openai_gpt4o() {
        let config = ProviderConfig::from_environment(&Environment::default());
        assert_eq!(config.endpoint, "https://api.openai.com");
        assert_eq!(config.api_path, "/v1/chat/completions");
        assert_eq!(config.api_key_env, "OPENAI_API_KEY");
        assert_eq!(config.model, "gpt-4o");
    }

    #[test]
    fn base_url_variable_overrides_default_endpoint_only() {
        let vars = Environment::from_pairs([("OPENAI_BASE_URL", "http://localhost:8000")]);
        assert_eq!(
            ProviderConfig::from_environment(&vars).endpoint,
            "http://localhost:8000"
        );

        let explicit = RawProviderConfig {
            endpoint: Some("https://proxy.internal".to_string()),
            ..Default::default()
        };
        assert_eq!(explicit.resolve(&vars).endpoint, "https://proxy.internal");
    }

    #[test]
    fn api_key_comes_from_the_named_variable() {
        let vars = Environment::from_pairs([("MY_KEY", "sk-test"), ("OPENAI_API_KEY", "")]);
        let mut config = ProviderConfig::from_environment(&vars);
        assert_eq!(config.resolve_api_key(&vars), None);

        config.api_key_env = "MY_KEY".to_string();
        assert_eq!(config.resolve_api_key(&vars).as_deref(), Some("sk-test"));
    }
}
