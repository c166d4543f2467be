use super::CONFIG_PATH;
use super::app::{AgentSettings, AppConfig, OutputSettings, RetrySettings};
use super::env::Environment;
use super::error::ConfigError;
use super::provider::RawProviderConfig;
use super::server::{ConnectionDescriptor, RawServer};
use serde::Deserialize;
use std::collections::HashSet;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::debug;

/// Raw configuration structure for deserialization from TOML
#[derive(Debug, Deserialize, Default)]
pub(super) struct RawConfig {
    #[serde(default)]
    pub provider: RawProviderConfig,
    #[serde(default)]
    pub agent: RawAgent,
    #[serde(default)]
    pub retry: RawRetry,
    #[serde(default)]
    pub output: RawOutput,
    pub servers: Option<Vec<RawServer>>,
}

#[derive(Debug, Deserialize, Default)]
pub(super) struct RawAgent {
    pub max_steps: Option<usize>,
    pub verbose: Option<bool>,
}

#[derive(Debug, Deserialize, Default)]
pub(super) struct RawRetry {
    pub attempts: Option<u32>,
    pub delay_secs: Option<u64>,
}

#[derive(Debug, Deserialize, Default)]
pub(super) struct RawOutput {
    pub path: Option<PathBuf>,
}

/// Load and validate configuration from a file path
pub fn load_config(path: Option<&Path>, vars: &Environment) -> Result<AppConfig, ConfigError> {
    match path {
        Some(explicit) => read_config(explicit, vars),
        None => {
            let default_path = Path::new(CONFIG_PATH);
            if default_path.exists() {
                read_config(default_path, vars)
            } else {
                debug!(path = CONFIG_PATH, "No configuration file, using built-in defaults");
                Ok(AppConfig::defaults(vars))
            }
        }
    }
}

fn read_config(path: &Path, vars: &Environment) -> Result<AppConfig, ConfigError> {
    debug!(path = %path.display(), "Reading agent configuration file");

    let content = fs::read_to_string(path).map_err(|source| {
        if source.kind() == io::ErrorKind::NotFound {
            ConfigError::NotFound {
                path: path.to_path_buf(),
            }
        } else {
            ConfigError::Io {
                path: path.to_path_buf(),
                source,
            }
        }
    })?;

    let parsed: RawConfig = toml::from_str(&content).map_err(|source| ConfigError::Parse {
        path: path.to_path_buf(),
        source,
    })?;

    validate_and_build(parsed, vars)
}

fn validate_and_build(parsed: RawConfig, vars: &Environment) -> Result<AppConfig, ConfigError> {
    let defaults = AppConfig::defaults(vars);

    let attempts = parsed.retry.attempts.unwrap_or(defaults.retry.attempts);
    if attempts == 0 {
        return Err(ConfigError::InvalidRetryAttempts);
    }
    let delay = parsed
        .retry
        .delay_secs
        .map(Duration::from_secs)
        .unwrap_or(defaults.retry.delay);

    let max_steps = parsed.agent.max_steps.unwrap_or(defaults.agent.max_steps);
    if max_steps == 0 {
        return Err(ConfigError::InvalidMaxSteps);
    }

    let servers = match parsed.servers {
        None => defaults.servers,
        Some(raw) if raw.is_empty() => return Err(ConfigError::NoServersConfigured),
        Some(raw) => {
            let mut seen = HashSet::new();
            for server in &raw {
                if !seen.insert(server.name.clone()) {
                    return Err(ConfigError::DuplicateServer {
                        name: server.name.clone(),
                    });
                }
            }
            ConnectionDescriptor::new(raw.into_iter().map(|s| s.resolve(vars)).collect())
        }
    };

    Ok(AppConfig {
        provider: parsed.provider.resolve(vars),
        agent: AgentSettings {
            max_steps,
            verbose: parsed.agent.verbose.unwrap_or(defaults.agent.verbose),
        },
        retry: RetrySettings { attempts, delay },
        output: OutputSettings {
            path: parsed.output.path.unwrap_or(defaults.output.path),
        },
        servers,
    })
}
