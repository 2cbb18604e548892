//! Market Link Core - Storefront deep-link resolution.
//!
//! This crate turns a logical "show this app" or "show all apps by this
//! developer" request into a deep link for a third-party app storefront
//! (Google Play, Amazon Appstore, Nook, BlackBerry Appworld, Samsung Apps).
//!
//! # Architecture
//!
//! The core crate contains only types, pure lookups and traits - no process
//! spawning, no dialogs, no device detection. Opening a link and showing the
//! fallback message are delegated to the [`Launcher`] and [`Notifier`]
//! traits, implemented by the embedding application.
//!
//! # Modules
//!
//! - [`types`] - Storefront tags, operations, identity fields and resolved links
//! - [`registry`] - Per-storefront URL templates ([`MarketRegistry`])
//! - [`resolver`] - Request to link resolution ([`LinkResolver`])
//! - [`launch`] - Launch and fallback protocol
//! - [`message`] - Fallback message shown when a link cannot be opened
//!
//! # Example
//!
//! ```
//! use market_link_core::{
//!     AppIdentity, LinkRequest, LinkResolver, MarketRegistry, Operation, ResolvedLink,
//!     ResolverConfig, Storefront,
//! };
//!
//! let registry = MarketRegistry::builtin();
//! let resolver = LinkResolver::new(&registry, ResolverConfig::default());
//!
//! let request = LinkRequest::new(
//!     Operation::ShowApp,
//!     Storefront::GOOGLE,
//!     AppIdentity::new().with_package("com.evernote"),
//! );
//!
//! assert_eq!(
//!     resolver.resolve(&request),
//!     ResolvedLink::Url("market://details?id=com.evernote".to_owned())
//! );
//! ```

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod launch;
pub mod message;
pub mod registry;
pub mod resolver;
pub mod types;

pub use launch::{
    FallbackReason, LaunchOutcome, Launcher, Notifier, Outcome, fallback_needed, fallback_reason,
    open_or_notify,
};
pub use message::{FallbackMessage, MessageTemplate};
pub use registry::{
    Format, GOOGLE_PLAY_DETAILS_FALLBACK, MarketRegistry, NotSupported, RegistryEntry,
    RegistryError, RegistryFile, Rule, Source, TemplateSpec, UrlPrefix,
};
pub use resolver::{LinkResolver, ResolveError, ResolverConfig};
pub use types::*;
