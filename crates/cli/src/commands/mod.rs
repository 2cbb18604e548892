//! CLI subcommands.

pub mod open;
pub mod stores;

use std::path::Path;

use market_link_core::MarketRegistry;

use crate::error::CliError;

/// Build the registry: built-in storefronts plus an optional JSON file.
///
/// # Errors
///
/// Returns an error if the file cannot be read or is not a valid registry.
pub fn load_registry(path: Option<&Path>) -> Result<MarketRegistry, CliError> {
    let mut registry = MarketRegistry::builtin();

    if let Some(path) = path {
        tracing::info!(path = %path.display(), "Loading extra storefront templates");
        let json = std::fs::read_to_string(path).map_err(|source| CliError::RegistryRead {
            path: path.to_path_buf(),
            source,
        })?;
        registry.extend_from_json(&json)?;
    }

    Ok(registry)
}
