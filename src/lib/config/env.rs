//! Process environment snapshot.
//!
//! The `.env` file is merged into the process environment once at startup and
//! the result is captured into an [`Environment`] that is handed to whoever
//! needs a variable. Nothing below this module calls `std::env` directly, so
//! tests can build an environment from literal pairs.

use super::error::ConfigError;
use std::collections::HashMap;
use std::env;
use std::path::Path;
use tracing::debug;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Environment {
    vars: HashMap<String, String>,
}

impl Environment {
    /// Merge `path` into the process environment and snapshot the result.
    ///
    /// A missing file is not an error. A file that exists but cannot be
    /// parsed is.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        match dotenvy::from_path(path) {
            Ok(()) => debug!(path = %path.display(), "Loaded environment file"),
            Err(err) if err.not_found() => {
                debug!(path = %path.display(), "No environment file found, using process environment")
            }
            Err(source) => {
                return Err(ConfigError::Env {
                    path: path.to_path_buf(),
                    source,
                });
            }
        }
        Ok(Self::capture())
    }

    /// Snapshot the current process environment. Non UTF-8 entries are skipped.
    pub fn capture() -> Self {
        let vars = env::vars_os()
            .filter_map(|(key, value)| Some((key.into_string().ok()?, value.into_string().ok()?)))
            .collect();
        Self { vars }
    }

    pub fn from_pairs<K, V>(pairs: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            vars: pairs
                .into_iter()
                .map(|(key, value)| (key.into(), value.into()))
                .collect(),
        }
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.vars.get(key).map(String::as_str)
    }

    /// Like [`Environment::get`] but treats blank values as unset.
    pub fn non_empty(&self, key: &str) -> Option<&str> {
        self.get(key)
            .map(str::trim)
            .filter(|value| !value.is_empty())
    }
}
