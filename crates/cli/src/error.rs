//! CLI error type.

use std::path::PathBuf;

use market_link_core::RegistryError;
use thiserror::Error;

use crate::config::ConfigError;

/// Errors that can stop a command.
///
/// A link that cannot be resolved or opened is not an error: it is handled
/// by showing the fallback message.
#[derive(Debug, Error)]
pub enum CliError {
    /// Configuration could not be loaded.
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Registry file could not be read.
    #[error("Failed to read registry file {path}: {source}")]
    RegistryRead {
        /// File that failed to load.
        path: PathBuf,
        /// Underlying I/O error.
        source: std::io::Error,
    },

    /// Registry file contents are invalid.
    #[error("Registry error: {0}")]
    Registry(#[from] RegistryError),

    /// Output could not be serialized.
    #[error("Serialization error: {0}")]
    Json(#[from] serde_json::Error),
}
