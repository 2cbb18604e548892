//! List registered storefronts.
//!
//! # Usage
//!
//! ```bash
//! # Storefront tags and the operations each supports
//! mlink stores
//!
//! # Full registry as JSON (same format accepted by --registry)
//! mlink stores --json
//! ```

use market_link_core::{MarketRegistry, Operation};

use crate::error::CliError;

/// One line per storefront: tag followed by its supported operations.
#[must_use]
pub fn summary(registry: &MarketRegistry) -> Vec<String> {
    registry
        .storefronts()
        .map(|store| {
            let ops: Vec<String> = registry.operations(store).map(|op| op.to_string()).collect();
            format!("{store}: {}", ops.join(", "))
        })
        .collect()
}

/// Print the registry.
///
/// # Errors
///
/// Returns an error if JSON output is requested and serialization fails.
#[allow(clippy::print_stdout)]
pub fn list(registry: &MarketRegistry, json: bool) -> Result<(), CliError> {
    if json {
        println!("{}", serde_json::to_string_pretty(&registry.to_file())?);
        return Ok(());
    }

    for line in summary(registry) {
        println!("{line}");
    }
    tracing::debug!(
        show_all = registry
            .storefronts()
            .filter(|s| registry.supports(s, Operation::ShowAllByDeveloper))
            .count(),
        "Listed storefronts"
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_summary_builtin() {
        let lines = summary(&MarketRegistry::builtin());
        assert_eq!(
            lines,
            vec![
                "amazon: show_app, show_all_by_developer",
                "blackberry: show_app, show_all_by_developer",
                "google: show_app, show_all_by_developer",
                "nook: show_app",
                "samsung: show_app, show_all_by_developer",
            ]
        );
    }
}
