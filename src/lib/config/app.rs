use super::ConnectionDescriptor;
use super::defaults::{DEFAULT_MAX_STEPS, DEFAULT_RETRY_ATTEMPTS, DEFAULT_RETRY_DELAY_SECS};
use super::env::Environment;
use super::error::ConfigError;
use super::loader;
use super::provider::ProviderConfig;
use crate::constants::OUTPUT_PATH;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Everything a run needs, resolved once at startup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub provider: ProviderConfig,
    pub agent: AgentSettings,
    pub retry: RetrySettings,
    pub output: OutputSettings,
    pub servers: ConnectionDescriptor,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AgentSettings {
    pub max_steps: usize,
    pub verbose: bool,
}

impl Default for AgentSettings {
    fn default() -> Self {
        Self {
            max_steps: DEFAULT_MAX_STEPS,
            verbose: false,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RetrySettings {
    pub attempts: u32,
    pub delay: Duration,
}

impl Default for RetrySettings {
    fn default() -> Self {
        Self {
            attempts: DEFAULT_RETRY_ATTEMPTS,
            delay: Duration::from_secs(DEFAULT_RETRY_DELAY_SECS),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputSettings {
    pub path: PathBuf,
}

impl Default for OutputSettings {
    fn default() -> Self {
        Self {
            path: PathBuf::from(OUTPUT_PATH),
        }
    }
}

impl AppConfig {
    /// Load from `path`, or from the default location when `None`.
    ///
    /// An explicit path must exist. A missing default file yields
    /// [`AppConfig::defaults`].
    pub fn load(path: Option<&Path>, vars: &Environment) -> Result<Self, ConfigError> {
        loader::load_config(path, vars)
    }

    pub fn defaults(vars: &Environment) -> Self {
        Self {
            provider: ProviderConfig::from_environment(vars),
            agent: AgentSettings::default(),
            retry: RetrySettings::default(),
            output: OutputSettings::default(),
            servers: ConnectionDescriptor::default(),
        }
    }
}
