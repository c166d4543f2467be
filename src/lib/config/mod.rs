pub mod app;
pub mod defaults;
pub mod env;
pub mod error;
pub mod loader;
pub mod provider;
pub mod server;

pub use crate::constants::CONFIG_PATH;

pub use app::{AgentSettings, AppConfig, OutputSettings, RetrySettings};
pub use env::Environment;
pub use error::ConfigError;
pub use provider::ProviderConfig;
pub use server::{ConnectionDescriptor, ServerConfig};
