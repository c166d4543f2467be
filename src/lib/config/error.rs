use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur when loading or validating configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("configuration file not found at {path:?}")]
    NotFound { path: PathBuf },

    #[error("failed to read config from {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to parse config from {path:?}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("failed to load environment file {path:?}: {source}")]
    Env {
        path: PathBuf,
        #[source]
        source: dotenvy::Error,
    },

    #[error("retry.attempts must be at least 1")]
    InvalidRetryAttempts,

    #[error("agent.max_steps must be at least 1")]
    InvalidMaxSteps,

    #[error("at least one [[servers]] entry is required when servers are configured")]
    NoServersConfigured,

    #[error("server '{name}' is configured more than once")]
    DuplicateServer { name: String },
}
