//! Application constants
//!
//! Single source of truth for paths and other constants.

/// Default configuration file path
pub const CONFIG_PATH: &str = "config/agent.toml";

/// Default environment file path
pub const ENV_PATH: &str = ".env";

/// File that receives the final answer
pub const OUTPUT_PATH: &str = "output.txt";

/// Returned in place of an answer once every attempt has failed
pub const FAILURE_SENTINEL: &str = "Agent failed after multiple attempts.";
