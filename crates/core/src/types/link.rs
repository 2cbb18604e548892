//! Link requests and resolution results.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::identity::AppIdentity;
use super::operation::Operation;
use super::storefront::Storefront;

/// A single resolution attempt: what to show, where, and for whom.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LinkRequest {
    operation: Operation,
    storefront: Storefront,
    #[serde(default)]
    identity: AppIdentity,
}

impl LinkRequest {
    /// Create a new request.
    #[must_use]
    pub const fn new(operation: Operation, storefront: Storefront, identity: AppIdentity) -> Self {
        Self {
            operation,
            storefront,
            identity,
        }
    }

    /// Shorthand for an [`Operation::ShowApp`] request.
    #[must_use]
    pub const fn show_app(storefront: Storefront, identity: AppIdentity) -> Self {
        Self::new(Operation::ShowApp, storefront, identity)
    }

    /// Shorthand for an [`Operation::ShowAllByDeveloper`] request.
    #[must_use]
    pub const fn show_all(storefront: Storefront, identity: AppIdentity) -> Self {
        Self::new(Operation::ShowAllByDeveloper, storefront, identity)
    }

    /// The requested operation.
    #[must_use]
    pub const fn operation(&self) -> Operation {
        self.operation
    }

    /// The target storefront.
    #[must_use]
    pub const fn storefront(&self) -> &Storefront {
        &self.storefront
    }

    /// The known identity fields.
    #[must_use]
    pub const fn identity(&self) -> &AppIdentity {
        &self.identity
    }
}

/// The result of resolving a [`LinkRequest`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum ResolvedLink {
    /// A storefront URL, ready to open.
    Url(String),
    /// A named platform action with string extras, for storefronts that
    /// need a native intent instead of a URL.
    CustomAction {
        /// Action name.
        action: String,
        /// Extras passed alongside the action.
        extras: BTreeMap<String, String>,
    },
    /// No link could be built. The fallback message should be shown.
    Unresolvable,
}

impl ResolvedLink {
    /// Whether a link was produced.
    #[must_use]
    pub const fn is_resolved(&self) -> bool {
        !matches!(self, Self::Unresolvable)
    }

    /// Borrow the link as something a [`Launcher`](crate::Launcher) can open.
    #[must_use]
    pub fn target(&self) -> Option<LaunchTarget<'_>> {
        match self {
            Self::Url(url) => Some(LaunchTarget::Url(url)),
            Self::CustomAction { action, extras } => Some(LaunchTarget::Action { action, extras }),
            Self::Unresolvable => None,
        }
    }
}

impl std::fmt::Display for ResolvedLink {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Url(url) => write!(f, "{url}"),
            Self::CustomAction { action, extras } => {
                write!(f, "action:{action}")?;
                for (key, value) in extras {
                    write!(f, " {key}={value}")?;
                }
                Ok(())
            }
            Self::Unresolvable => write!(f, "unresolvable"),
        }
    }
}

/// A resolved link borrowed for launching. Never unresolvable.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LaunchTarget<'a> {
    /// Open a URL with whatever handles its scheme.
    Url(&'a str),
    /// Dispatch a named action.
    Action {
        /// Action name.
        action: &'a str,
        /// Extras passed alongside the action.
        extras: &'a BTreeMap<String, String>,
    },
}
