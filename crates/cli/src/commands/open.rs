//! Resolve a link and open it.
//!
//! # Usage
//!
//! ```bash
//! # Show Evernote on Google Play
//! mlink show-app --store google --package com.evernote
//!
//! # Show every app by a BlackBerry vendor, printing the link only
//! mlink show-all --store blackberry --vendor-id 24165 --dry-run
//!
//! # Legacy numeric selectors work too (2 = Amazon)
//! mlink --web show-app --store 2 --package com.evernote
//! ```

use market_link_core::{
    AppIdentity, FallbackMessage, LinkRequest, LinkResolver, MarketRegistry, Operation, Outcome,
    ResolvedLink, ResolverConfig, Storefront, open_or_notify,
};

use crate::launcher::{ConsoleNotifier, PrintLauncher, SystemLauncher};

/// Identity flags shared by both link commands.
#[derive(Debug, Clone, Default, clap::Args)]
pub struct IdentityArgs {
    /// Storefront tag (`google`, `amazon`, `nook`, `blackberry`, `samsung`) or legacy code
    #[arg(short, long)]
    pub store: Storefront,

    /// Package name of the target app (e.g. `com.evernote`)
    #[arg(short, long)]
    pub package: Option<String>,

    /// Storefront-specific app ID (Nook EAN, BlackBerry content ID)
    #[arg(long)]
    pub app_id: Option<String>,

    /// Storefront-specific vendor or developer ID
    #[arg(long)]
    pub vendor_id: Option<String>,

    /// Developer name shown if the link cannot be opened
    #[arg(short = 'n', long)]
    pub developer_name: Option<String>,

    /// Print the link instead of opening it
    #[arg(long)]
    pub dry_run: bool,
}

impl IdentityArgs {
    fn identity(&self) -> AppIdentity {
        let mut identity = AppIdentity::new();
        if let Some(package) = &self.package {
            identity = identity.with_package(package.as_str());
        }
        if let Some(app_id) = &self.app_id {
            identity = identity.with_app_id(app_id.as_str());
        }
        if let Some(vendor_id) = &self.vendor_id {
            identity = identity.with_vendor_id(vendor_id.as_str());
        }
        if let Some(name) = &self.developer_name {
            identity = identity.with_developer_name(name.as_str());
        }
        identity
    }

    /// Build the request for an operation.
    #[must_use]
    pub fn request(&self, operation: Operation) -> LinkRequest {
        LinkRequest::new(operation, self.store.clone(), self.identity())
    }
}

/// Resolve the request and open it, falling back to the message on failure.
pub fn run(
    registry: &MarketRegistry,
    config: ResolverConfig,
    operation: Operation,
    args: &IdentityArgs,
) -> Outcome {
    let request = args.request(operation);
    let resolver = LinkResolver::new(registry, config);

    let link = match resolver.try_resolve(&request) {
        Ok(link) => link,
        Err(e) => {
            tracing::warn!(error = %e, "Could not resolve link");
            ResolvedLink::Unresolvable
        }
    };

    let message = FallbackMessage::for_developer(request.identity().developer_name());
    let outcome = if args.dry_run {
        open_or_notify(&link, &message, &PrintLauncher, &ConsoleNotifier)
    } else {
        open_or_notify(&link, &message, &SystemLauncher::new(), &ConsoleNotifier)
    };

    tracing::info!(
        storefront = %request.storefront(),
        %operation,
        resolved = link.is_resolved(),
        ?outcome,
        "Done"
    );
    outcome
}

#[cfg(test)]
mod tests {
    use super::*;
    use market_link_core::{FallbackReason, VendorId};

    fn args(store: Storefront) -> IdentityArgs {
        IdentityArgs {
            store,
            dry_run: true,
            ..IdentityArgs::default()
        }
    }

    #[test]
    fn test_request_drops_empty_flags() {
        let args = IdentityArgs {
            package: Some(String::new()),
            vendor_id: Some("24165".to_owned()),
            ..args(Storefront::BLACKBERRY)
        };
        let request = args.request(Operation::ShowAllByDeveloper);
        assert!(request.identity().package().is_none());
        assert_eq!(request.identity().vendor_id().map(VendorId::as_str), Some("24165"));
    }

    #[test]
    fn test_dry_run_resolved() {
        let registry = MarketRegistry::builtin();
        let args = IdentityArgs {
            package: Some("com.evernote".to_owned()),
            ..args(Storefront::GOOGLE)
        };
        let outcome = run(&registry, ResolverConfig::default(), Operation::ShowApp, &args);
        assert_eq!(outcome, Outcome::Opened);
    }

    #[test]
    fn test_dry_run_unresolvable_falls_back() {
        let registry = MarketRegistry::builtin();
        let outcome = run(
            &registry,
            ResolverConfig::default(),
            Operation::ShowAllByDeveloper,
            &args(Storefront::NOOK),
        );
        assert_eq!(outcome, Outcome::FellBack(FallbackReason::Unresolvable));
    }
}
