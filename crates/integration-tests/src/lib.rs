//! Integration tests for Market Link.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p market-link-integration-tests
//! ```
//!
//! # Test Categories
//!
//! - `resolution` - Built-in storefront link rules
//! - `fallback` - Launch and fallback protocol
//! - `registry_data` - Storefronts supplied as JSON data
//!
//! This crate also provides recording test doubles for the [`Launcher`] and
//! [`Notifier`] traits.

use std::cell::RefCell;

use market_link_core::{
    AppIdentity, FallbackMessage, LaunchOutcome, LaunchTarget, Launcher, LinkRequest,
    LinkResolver, MarketRegistry, Notifier, Operation, ResolvedLink, ResolverConfig, Storefront,
};

/// Test data for Evernote, with a BlackBerry vendor ID known to resolve.
pub mod evernote {
    pub const DEVELOPER_NAME: &str = "Evernote";
    pub const GOOGLE_DEVELOPER_ID: &str = "Evernote+Corporation";
    pub const AMAZON_PACKAGE_ID: &str = "com.evernote";
    pub const BB_VENDOR_ID: &str = "24165";
    pub const APP_PACKAGE: &str = "com.evernote";
    pub const NOOK_EAN: &str = "2940043353757";
    pub const BB_APP_ID: &str = "56171";
    pub const SAMSUNG_VENDOR_ID: &str = "adevqewb3c";
}

/// A launcher that records what it was asked to open.
#[derive(Debug)]
pub struct RecordingLauncher {
    outcome: LaunchOutcome,
    launched: RefCell<Vec<String>>,
}

impl RecordingLauncher {
    /// A launcher that reports `outcome` for every link.
    #[must_use]
    pub const fn new(outcome: LaunchOutcome) -> Self {
        Self {
            outcome,
            launched: RefCell::new(Vec::new()),
        }
    }

    /// Links launched so far, rendered as text.
    #[must_use]
    pub fn launched(&self) -> Vec<String> {
        self.launched.borrow().clone()
    }
}

impl Launcher for RecordingLauncher {
    fn launch(&self, target: LaunchTarget<'_>) -> LaunchOutcome {
        let rendered = match target {
            LaunchTarget::Url(url) => url.to_owned(),
            LaunchTarget::Action { action, .. } => format!("action:{action}"),
        };
        self.launched.borrow_mut().push(rendered);
        self.outcome
    }
}

/// A notifier that records every message shown.
#[derive(Debug, Default)]
pub struct RecordingNotifier {
    shown: RefCell<Vec<FallbackMessage>>,
}

impl RecordingNotifier {
    /// Messages shown so far.
    #[must_use]
    pub fn shown(&self) -> Vec<FallbackMessage> {
        self.shown.borrow().clone()
    }
}

impl Notifier for RecordingNotifier {
    fn notify(&self, message: &FallbackMessage) {
        self.shown.borrow_mut().push(message.clone());
    }
}

/// Identity with every Evernote field set for the given storefront.
///
/// Vendor and app IDs are storefront-specific, so the right ones are picked
/// per storefront the way a caller would.
#[must_use]
pub fn evernote_identity(storefront: &Storefront) -> AppIdentity {
    let identity = AppIdentity::new()
        .with_package(evernote::APP_PACKAGE)
        .with_developer_name(evernote::DEVELOPER_NAME);

    if *storefront == Storefront::GOOGLE {
        identity.with_vendor_id(evernote::GOOGLE_DEVELOPER_ID)
    } else if *storefront == Storefront::AMAZON {
        identity.with_vendor_id(evernote::AMAZON_PACKAGE_ID)
    } else if *storefront == Storefront::NOOK {
        identity.with_app_id(evernote::NOOK_EAN)
    } else if *storefront == Storefront::BLACKBERRY {
        identity
            .with_app_id(evernote::BB_APP_ID)
            .with_vendor_id(evernote::BB_VENDOR_ID)
    } else if *storefront == Storefront::SAMSUNG {
        identity.with_vendor_id(evernote::SAMSUNG_VENDOR_ID)
    } else {
        identity
    }
}

/// Resolve with the built-in registry and default configuration.
#[must_use]
pub fn resolve_builtin(operation: Operation, storefront: Storefront, identity: AppIdentity) -> ResolvedLink {
    let registry = MarketRegistry::builtin();
    LinkResolver::new(&registry, ResolverConfig::default())
        .resolve(&LinkRequest::new(operation, storefront, identity))
}
