//! Link resolution.
//!
//! [`LinkResolver`] looks up the template for a request, binds the first
//! rule whose source has a value, and composes the link. Resolution is pure:
//! the same request and configuration always give the same [`ResolvedLink`].

use std::collections::BTreeMap;

use thiserror::Error;

use crate::registry::{Format, MarketRegistry, NotSupported, Rule, Source};
use crate::types::{AppId, LinkRequest, Operation, PackageName, ResolvedLink, Storefront, VendorId};

/// Why a request could not be resolved.
///
/// Both variants call for the same fallback, so [`LinkResolver::resolve`]
/// collapses them into [`ResolvedLink::Unresolvable`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ResolveError {
    /// No template exists for the storefront and operation.
    #[error(transparent)]
    NotSupported(#[from] NotSupported),
    /// None of the template's rules had a value to bind.
    #[error("no identity field available for `{storefront}` {operation}")]
    MissingIdentity {
        /// Requested storefront.
        storefront: Storefront,
        /// Requested operation.
        operation: Operation,
    },
}

/// Resolver settings, passed explicitly rather than read from globals.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolverConfig {
    /// Use native app schemes (e.g. `amzn://`) instead of web URLs where a
    /// storefront offers both. Defaults to `true`.
    pub prefer_native_scheme: bool,
    /// Package name of the calling application, used by rules that fall
    /// back to the host app.
    pub host_package: Option<PackageName>,
}

impl Default for ResolverConfig {
    fn default() -> Self {
        Self {
            prefer_native_scheme: true,
            host_package: None,
        }
    }
}

impl ResolverConfig {
    /// Set the calling application's package name.
    #[must_use]
    pub fn with_host_package(mut self, package: impl Into<String>) -> Self {
        self.host_package = PackageName::new(package);
        self
    }

    /// Set the native scheme preference.
    #[must_use]
    pub const fn with_native_scheme(mut self, prefer_native_scheme: bool) -> Self {
        self.prefer_native_scheme = prefer_native_scheme;
        self
    }
}

/// Turns [`LinkRequest`]s into [`ResolvedLink`]s using a [`MarketRegistry`].
#[derive(Debug, Clone)]
pub struct LinkResolver<'r> {
    registry: &'r MarketRegistry,
    config: ResolverConfig,
}

impl<'r> LinkResolver<'r> {
    /// Create a resolver over a registry.
    #[must_use]
    pub const fn new(registry: &'r MarketRegistry, config: ResolverConfig) -> Self {
        Self { registry, config }
    }

    /// Resolve a request, collapsing every failure into
    /// [`ResolvedLink::Unresolvable`].
    #[must_use]
    pub fn resolve(&self, request: &LinkRequest) -> ResolvedLink {
        match self.try_resolve(request) {
            Ok(link) => link,
            Err(err) => {
                tracing::debug!(error = %err, "Link unresolvable");
                ResolvedLink::Unresolvable
            }
        }
    }

    /// Resolve a request, reporting why it failed.
    ///
    /// # Errors
    ///
    /// Returns [`ResolveError::NotSupported`] if the storefront has no
    /// template for the operation, or [`ResolveError::MissingIdentity`] if
    /// no rule could bind a value.
    pub fn try_resolve(&self, request: &LinkRequest) -> Result<ResolvedLink, ResolveError> {
        let template = self
            .registry
            .template_for(request.storefront(), request.operation())?;

        let (rule, value) = template
            .rules()
            .iter()
            .find_map(|rule| self.bind(rule.source, request).map(|value| (rule, value)))
            .ok_or_else(|| ResolveError::MissingIdentity {
                storefront: request.storefront().clone(),
                operation: request.operation(),
            })?;

        let link = self.compose(rule, value);
        tracing::debug!(
            storefront = %request.storefront(),
            operation = %request.operation(),
            rule = rule.name.as_deref().unwrap_or("primary"),
            %link,
            "Resolved link"
        );
        Ok(link)
    }

    fn bind<'a>(&'a self, source: Source, request: &'a LinkRequest) -> Option<&'a str> {
        let identity = request.identity();
        let value = match source {
            Source::Package => identity.package().map(PackageName::as_str),
            Source::AppId => identity.app_id().map(AppId::as_str),
            Source::VendorId => identity.vendor_id().map(VendorId::as_str),
            Source::HostPackage => self.config.host_package.as_ref().map(PackageName::as_str),
            Source::DeveloperPrefix => identity
                .package()
                .or(self.config.host_package.as_ref())
                .and_then(PackageName::developer_prefix),
        };
        value.filter(|v| !v.is_empty())
    }

    fn compose(&self, rule: &Rule, value: &str) -> ResolvedLink {
        match &rule.format {
            Format::Url { prefix, suffix } => {
                let prefix = prefix.select(self.config.prefer_native_scheme);
                ResolvedLink::Url(format!("{prefix}{value}{suffix}"))
            }
            Format::Action { action, extra } => ResolvedLink::CustomAction {
                action: action.clone(),
                extras: BTreeMap::from([(extra.clone(), value.to_owned())]),
            },
        }
    }
}
