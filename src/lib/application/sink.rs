use crate::constants::OUTPUT_PATH;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::info;

#[derive(Debug, Error)]
#[error("failed to write result to {path:?}: {source}")]
pub struct SinkError {
    pub path: PathBuf,
    #[source]
    pub source: io::Error,
}

/// Writes the final answer to a file, replacing whatever was there.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResultSink {
    path: PathBuf,
}

impl ResultSink {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Overwrite the file with `result` as UTF-8.
    pub fn save(&self, result: &str) -> Result<(), SinkError> {
        fs::write(&self.path, result).map_err(|source| SinkError {
            path: self.path.clone(),
            source,
        })?;
        info!(path = %self.path.display(), bytes = result.len(), "Result saved");
        Ok(())
    }

    /// Print the answer, save it, and report where it went.
    pub fn publish(&self, result: &str) -> Result<(), SinkError> {
        println!("\nFinal Output:\n{result}");
        self.save(result)?;
        println!("Result saved to {}", self.path.display());
        Ok(())
    }
}

impl Default for ResultSink {
    fn default() -> Self {
        Self::new(OUTPUT_PATH)
    }
}
