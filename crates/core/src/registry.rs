//! Storefront template catalog.
//!
//! A [`MarketRegistry`] maps each storefront tag to the templates for the
//! operations it supports. A [`TemplateSpec`] is an ordered list of
//! [`Rule`]s; the resolver uses the first rule whose [`Source`] yields a
//! value. Templates are plain data and can be loaded from JSON, so an
//! embedding application can add storefronts without touching this crate.
//!
//! # Built-in storefronts
//!
//! | Storefront | Show app | Show all by developer |
//! |---|---|---|
//! | Google | `market://details?id=<package>` | `market://search?q=<vendor>`, else the package minus its last segment |
//! | Amazon | `amzn://apps/android?p=<package>` | `...?p=<vendor>&showAll=1`, else the host package |
//! | Nook | `com.bn.sdk.shop.details` action with the EAN | not supported |
//! | BlackBerry | `appworld://content/<app id>`, else Google Play details | `appworld://vendor/<vendor>` |
//! | Samsung | `samsungapps://ProductDetail/<package>` | `samsungapps://SellerDetail/<vendor>` |
//!
//! Amazon links switch to `http://www.amazon.com/gp/mas/dl/android?` when
//! native schemes are disabled in [`ResolverConfig`](crate::ResolverConfig).

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::types::{Operation, Storefront};

const GOOGLE_DETAILS_PREFIX: &str = "market://details?id=";
const GOOGLE_SEARCH_PREFIX: &str = "market://search?q=";
const AMAZON_NATIVE_PREFIX: &str = "amzn://apps/android?p=";
const AMAZON_WEB_PREFIX: &str = "http://www.amazon.com/gp/mas/dl/android?p=";
const AMAZON_SHOW_ALL_SUFFIX: &str = "&showAll=1";
const NOOK_DETAILS_ACTION: &str = "com.bn.sdk.shop.details";
const NOOK_EAN_EXTRA: &str = "product_details_ean";
const BLACKBERRY_CONTENT_PREFIX: &str = "appworld://content/";
const BLACKBERRY_VENDOR_PREFIX: &str = "appworld://vendor/";
const SAMSUNG_PRODUCT_PREFIX: &str = "samsungapps://ProductDetail/";
const SAMSUNG_SELLER_PREFIX: &str = "samsungapps://SellerDetail/";

/// Name of the BlackBerry rule that falls back to Google Play details.
///
/// Appworld deep links have broken and recovered several times, and Appworld
/// accepts Play links, so a BlackBerry "show app" without an Appworld ID is
/// sent to Play. Revisit if Appworld stops honoring `market://` links.
pub const GOOGLE_PLAY_DETAILS_FALLBACK: &str = "google_play_details";

/// The storefront has no template for the requested operation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("storefront `{storefront}` does not support {operation}")]
pub struct NotSupported {
    /// Requested storefront.
    pub storefront: Storefront,
    /// Requested operation.
    pub operation: Operation,
}

/// Errors that can occur when building or loading a registry.
#[derive(Debug, Error)]
pub enum RegistryError {
    /// Registry data is not valid JSON or does not match the schema.
    #[error("invalid registry data: {0}")]
    Json(#[from] serde_json::Error),
    /// Templates cannot be registered for [`Storefront::NONE`].
    #[error("storefront `none` is reserved and cannot have templates")]
    ReservedStorefront,
    /// A template has no rules and could never resolve.
    #[error("template for `{storefront}` {operation} has no rules")]
    EmptyTemplate {
        /// Storefront the template was registered for.
        storefront: Storefront,
        /// Operation the template was registered for.
        operation: Operation,
    },
}

/// Where a rule takes its value from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Source {
    /// The target app's package name.
    Package,
    /// The storefront-specific app ID.
    AppId,
    /// The storefront-specific vendor or developer ID.
    VendorId,
    /// The calling application's own package name.
    HostPackage,
    /// The target package (else the host package) minus its last segment.
    ///
    /// The package is chosen before the prefix is derived: a target package
    /// with no dot binds nothing, even when the host package has one.
    DeveloperPrefix,
}

/// How a URL prefix is chosen.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum UrlPrefix {
    /// Always the same prefix.
    Fixed(String),
    /// A native app scheme or a web URL, picked by configuration.
    Scheme {
        /// Prefix used when native schemes are preferred.
        native: String,
        /// Prefix used otherwise.
        web: String,
    },
}

impl UrlPrefix {
    /// Select the prefix for the given scheme preference.
    #[must_use]
    pub fn select(&self, prefer_native_scheme: bool) -> &str {
        match self {
            Self::Fixed(prefix) => prefix,
            Self::Scheme { native, .. } if prefer_native_scheme => native,
            Self::Scheme { web, .. } => web,
        }
    }
}

/// How a bound value is turned into a link.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Format {
    /// `prefix + value + suffix`.
    Url {
        /// Text before the value.
        prefix: UrlPrefix,
        /// Text after the value.
        #[serde(default, skip_serializing_if = "String::is_empty")]
        suffix: String,
    },
    /// A named action with the value carried in a single extra.
    Action {
        /// Action name.
        action: String,
        /// Key of the extra that carries the value.
        extra: String,
    },
}

impl Format {
    /// A URL format with a fixed prefix and no suffix.
    #[must_use]
    pub fn url(prefix: impl Into<String>) -> Self {
        Self::Url {
            prefix: UrlPrefix::Fixed(prefix.into()),
            suffix: String::new(),
        }
    }
}

/// One candidate way of building a link.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rule {
    /// Identity field or derived value this rule needs.
    pub source: Source,
    /// How the value is composed into the link.
    pub format: Format,
    /// Optional name, logged when the rule is used.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

impl Rule {
    /// Create an unnamed rule.
    #[must_use]
    pub const fn new(source: Source, format: Format) -> Self {
        Self {
            source,
            format,
            name: None,
        }
    }

    /// Give the rule a name.
    #[must_use]
    pub fn named(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }
}

/// Rules for one storefront and operation, in priority order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TemplateSpec {
    rules: Vec<Rule>,
}

impl TemplateSpec {
    /// Create an empty template.
    #[must_use]
    pub const fn new() -> Self {
        Self { rules: Vec::new() }
    }

    /// Append a rule with lower priority than the existing ones.
    #[must_use]
    pub fn rule(mut self, rule: Rule) -> Self {
        self.rules.push(rule);
        self
    }

    /// The rules in priority order.
    #[must_use]
    pub fn rules(&self) -> &[Rule] {
        &self.rules
    }
}

/// One storefront in a [`RegistryFile`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegistryEntry {
    /// Storefront tag.
    pub tag: Storefront,
    /// Template for [`Operation::ShowApp`].
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub show_app: Option<TemplateSpec>,
    /// Template for [`Operation::ShowAllByDeveloper`].
    #[serde(
        default,
        alias = "show_all_by_developer",
        skip_serializing_if = "Option::is_none"
    )]
    pub show_all: Option<TemplateSpec>,
}

/// Serialized form of a registry.
///
/// ```json
/// {
///   "storefronts": [
///     {
///       "tag": "slideme",
///       "show_app": [
///         { "source": "package", "format": { "kind": "url", "prefix": "sam://details?id=" } }
///       ]
///     }
///   ]
/// }
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegistryFile {
    /// Storefront definitions.
    #[serde(default)]
    pub storefronts: Vec<RegistryEntry>,
}

/// Catalog of storefront templates.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MarketRegistry {
    templates: BTreeMap<Storefront, BTreeMap<Operation, TemplateSpec>>,
}

impl MarketRegistry {
    /// A registry with no storefronts.
    #[must_use]
    pub fn empty() -> Self {
        Self::default()
    }

    /// A registry with the built-in storefronts.
    #[must_use]
    pub fn builtin() -> Self {
        let amazon_prefix = || UrlPrefix::Scheme {
            native: AMAZON_NATIVE_PREFIX.to_owned(),
            web: AMAZON_WEB_PREFIX.to_owned(),
        };
        let amazon_show_all = || Format::Url {
            prefix: amazon_prefix(),
            suffix: AMAZON_SHOW_ALL_SUFFIX.to_owned(),
        };

        let mut registry = Self::empty();

        registry.insert(
            Storefront::GOOGLE,
            Operation::ShowApp,
            TemplateSpec::new().rule(Rule::new(Source::Package, Format::url(GOOGLE_DETAILS_PREFIX))),
        );
        registry.insert(
            Storefront::GOOGLE,
            Operation::ShowAllByDeveloper,
            TemplateSpec::new()
                .rule(Rule::new(Source::VendorId, Format::url(GOOGLE_SEARCH_PREFIX)))
                .rule(
                    Rule::new(Source::DeveloperPrefix, Format::url(GOOGLE_SEARCH_PREFIX))
                        .named("package_prefix_search"),
                ),
        );

        registry.insert(
            Storefront::AMAZON,
            Operation::ShowApp,
            TemplateSpec::new().rule(Rule::new(
                Source::Package,
                Format::Url {
                    prefix: amazon_prefix(),
                    suffix: String::new(),
                },
            )),
        );
        registry.insert(
            Storefront::AMAZON,
            Operation::ShowAllByDeveloper,
            TemplateSpec::new()
                .rule(Rule::new(Source::VendorId, amazon_show_all()))
                .rule(Rule::new(Source::HostPackage, amazon_show_all()).named("host_package_show_all")),
        );

        registry.insert(
            Storefront::NOOK,
            Operation::ShowApp,
            TemplateSpec::new().rule(Rule::new(
                Source::AppId,
                Format::Action {
                    action: NOOK_DETAILS_ACTION.to_owned(),
                    extra: NOOK_EAN_EXTRA.to_owned(),
                },
            )),
        );

        registry.insert(
            Storefront::BLACKBERRY,
            Operation::ShowApp,
            TemplateSpec::new()
                .rule(Rule::new(Source::AppId, Format::url(BLACKBERRY_CONTENT_PREFIX)))
                .rule(
                    Rule::new(Source::Package, Format::url(GOOGLE_DETAILS_PREFIX))
                        .named(GOOGLE_PLAY_DETAILS_FALLBACK),
                )
                .rule(
                    Rule::new(Source::HostPackage, Format::url(GOOGLE_DETAILS_PREFIX))
                        .named(GOOGLE_PLAY_DETAILS_FALLBACK),
                ),
        );
        registry.insert(
            Storefront::BLACKBERRY,
            Operation::ShowAllByDeveloper,
            TemplateSpec::new().rule(Rule::new(Source::VendorId, Format::url(BLACKBERRY_VENDOR_PREFIX))),
        );

        registry.insert(
            Storefront::SAMSUNG,
            Operation::ShowApp,
            TemplateSpec::new().rule(Rule::new(Source::Package, Format::url(SAMSUNG_PRODUCT_PREFIX))),
        );
        registry.insert(
            Storefront::SAMSUNG,
            Operation::ShowAllByDeveloper,
            TemplateSpec::new().rule(Rule::new(Source::VendorId, Format::url(SAMSUNG_SELLER_PREFIX))),
        );

        registry
    }

    /// Load a registry from JSON.
    ///
    /// # Errors
    ///
    /// Returns an error if the JSON is malformed or any entry is invalid.
    pub fn from_json(json: &str) -> Result<Self, RegistryError> {
        let mut registry = Self::empty();
        registry.extend_from_json(json)?;
        Ok(registry)
    }

    /// Look up the template for a storefront and operation.
    ///
    /// Unknown storefronts and [`Storefront::NONE`] are never supported.
    ///
    /// # Errors
    ///
    /// Returns [`NotSupported`] if no template is registered.
    pub fn template_for(
        &self,
        storefront: &Storefront,
        operation: Operation,
    ) -> Result<&TemplateSpec, NotSupported> {
        self.templates
            .get(storefront)
            .and_then(|ops| ops.get(&operation))
            .ok_or_else(|| NotSupported {
                storefront: storefront.clone(),
                operation,
            })
    }

    /// Whether a template is registered for a storefront and operation.
    #[must_use]
    pub fn supports(&self, storefront: &Storefront, operation: Operation) -> bool {
        self.template_for(storefront, operation).is_ok()
    }

    /// Add or replace the template for a storefront and operation.
    ///
    /// # Errors
    ///
    /// Returns an error for [`Storefront::NONE`] or a template without rules.
    pub fn register(
        &mut self,
        storefront: Storefront,
        operation: Operation,
        template: TemplateSpec,
    ) -> Result<(), RegistryError> {
        if storefront.is_none() {
            return Err(RegistryError::ReservedStorefront);
        }
        if template.rules.is_empty() {
            return Err(RegistryError::EmptyTemplate {
                storefront,
                operation,
            });
        }
        tracing::debug!(%storefront, %operation, rules = template.rules.len(), "Registering template");
        self.insert(storefront, operation, template);
        Ok(())
    }

    /// Remove the template for a storefront and operation.
    pub fn unregister(&mut self, storefront: &Storefront, operation: Operation) -> Option<TemplateSpec> {
        let ops = self.templates.get_mut(storefront)?;
        let removed = ops.remove(&operation);
        if ops.is_empty() {
            self.templates.remove(storefront);
        }
        removed
    }

    /// Registered storefronts, sorted by tag.
    pub fn storefronts(&self) -> impl Iterator<Item = &Storefront> {
        self.templates.keys()
    }

    /// Operations registered for a storefront.
    pub fn operations(&self, storefront: &Storefront) -> impl Iterator<Item = Operation> + '_ {
        self.templates
            .get(storefront)
            .into_iter()
            .flat_map(|ops| ops.keys().copied())
    }

    /// Merge every entry of a [`RegistryFile`] into this registry.
    ///
    /// Entries replace existing templates for the same storefront and
    /// operation. Nothing is merged if any entry is invalid.
    ///
    /// # Errors
    ///
    /// Returns an error if an entry targets [`Storefront::NONE`] or has an
    /// empty template.
    pub fn extend(&mut self, file: RegistryFile) -> Result<(), RegistryError> {
        let mut staged = self.clone();
        for entry in file.storefronts {
            let templates = [
                (Operation::ShowApp, entry.show_app),
                (Operation::ShowAllByDeveloper, entry.show_all),
            ];
            for (operation, template) in templates {
                if let Some(template) = template {
                    staged.register(entry.tag.clone(), operation, template)?;
                }
            }
        }
        *self = staged;
        Ok(())
    }

    /// Parse a [`RegistryFile`] from JSON and merge it.
    ///
    /// # Errors
    ///
    /// Returns an error if the JSON is malformed or any entry is invalid.
    pub fn extend_from_json(&mut self, json: &str) -> Result<(), RegistryError> {
        let file: RegistryFile = serde_json::from_str(json)?;
        self.extend(file)
    }

    /// Export the registry as a [`RegistryFile`].
    #[must_use]
    pub fn to_file(&self) -> RegistryFile {
        let storefronts = self
            .templates
            .iter()
            .map(|(tag, ops)| RegistryEntry {
                tag: tag.clone(),
                show_app: ops.get(&Operation::ShowApp).cloned(),
                show_all: ops.get(&Operation::ShowAllByDeveloper).cloned(),
            })
            .collect();
        RegistryFile { storefronts }
    }

    fn insert(&mut self, storefront: Storefront, operation: Operation, template: TemplateSpec) {
        self.templates
            .entry(storefront)
            .or_default()
            .insert(operation, template);
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_storefronts() {
        let registry = MarketRegistry::builtin();
        let tags: Vec<&str> = registry.storefronts().map(Storefront::as_str).collect();
        assert_eq!(tags, vec!["amazon", "blackberry", "google", "nook", "samsung"]);
    }

    #[test]
    fn test_nook_show_all_not_supported() {
        let registry = MarketRegistry::builtin();
        let err = registry
            .template_for(&Storefront::NOOK, Operation::ShowAllByDeveloper)
            .unwrap_err();
        assert_eq!(err.storefront, Storefront::NOOK);
        assert_eq!(err.operation, Operation::ShowAllByDeveloper);
        assert!(registry.supports(&Storefront::NOOK, Operation::ShowApp));
    }

    #[test]
    fn test_none_and_unknown_not_supported() {
        let registry = MarketRegistry::builtin();
        for op in Operation::ALL {
            assert!(!registry.supports(&Storefront::NONE, op));
            assert!(!registry.supports(&Storefront::new("slideme"), op));
        }
    }

    #[test]
    fn test_blackberry_fallback_is_named() {
        let registry = MarketRegistry::builtin();
        let template = registry
            .template_for(&Storefront::BLACKBERRY, Operation::ShowApp)
            .unwrap();
        let names: Vec<Option<&str>> = template.rules().iter().map(|r| r.name.as_deref()).collect();
        assert_eq!(
            names,
            vec![
                None,
                Some(GOOGLE_PLAY_DETAILS_FALLBACK),
                Some(GOOGLE_PLAY_DETAILS_FALLBACK)
            ]
        );
    }

    #[test]
    fn test_url_prefix_select() {
        let prefix = UrlPrefix::Scheme {
            native: "amzn://".to_owned(),
            web: "http://".to_owned(),
        };
        assert_eq!(prefix.select(true), "amzn://");
        assert_eq!(prefix.select(false), "http://");
        assert_eq!(UrlPrefix::Fixed("x://".to_owned()).select(false), "x://");
    }

    #[test]
    fn test_register_rejects_none() {
        let mut registry = MarketRegistry::empty();
        let template = TemplateSpec::new().rule(Rule::new(Source::Package, Format::url("x://")));
        assert!(matches!(
            registry.register(Storefront::NONE, Operation::ShowApp, template),
            Err(RegistryError::ReservedStorefront)
        ));
    }

    #[test]
    fn test_register_rejects_empty_template() {
        let mut registry = MarketRegistry::empty();
        assert!(matches!(
            registry.register(Storefront::new("slideme"), Operation::ShowApp, TemplateSpec::new()),
            Err(RegistryError::EmptyTemplate { .. })
        ));
    }

    #[test]
    fn test_unregister() {
        let mut registry = MarketRegistry::builtin();
        assert!(registry.unregister(&Storefront::NOOK, Operation::ShowApp).is_some());
        assert!(!registry.storefronts().any(|s| *s == Storefront::NOOK));
        assert!(registry.unregister(&Storefront::NOOK, Operation::ShowApp).is_none());
    }

    #[test]
    fn test_extend_from_json() {
        let mut registry = MarketRegistry::builtin();
        registry
            .extend_from_json(
                r#"{
                    "storefronts": [{
                        "tag": "SlideMe",
                        "show_app": [
                            {"source": "package", "format": {"kind": "url", "prefix": "sam://details?id="}}
                        ]
                    }]
                }"#,
            )
            .unwrap();

        let slideme = Storefront::new("slideme");
        assert!(registry.supports(&slideme, Operation::ShowApp));
        assert!(!registry.supports(&slideme, Operation::ShowAllByDeveloper));
    }

    #[test]
    fn test_extend_is_all_or_nothing() {
        let mut registry = MarketRegistry::builtin();
        let result = registry.extend_from_json(
            r#"{
                "storefronts": [
                    {"tag": "slideme", "show_app": [{"source": "package", "format": {"kind": "url", "prefix": "sam://"}}]},
                    {"tag": "none", "show_app": [{"source": "package", "format": {"kind": "url", "prefix": "x://"}}]}
                ]
            }"#,
        );
        assert!(matches!(result, Err(RegistryError::ReservedStorefront)));
        assert!(!registry.supports(&Storefront::new("slideme"), Operation::ShowApp));
    }

    #[test]
    fn test_extend_rejects_malformed_json() {
        let mut registry = MarketRegistry::empty();
        assert!(matches!(
            registry.extend_from_json("{ not json"),
            Err(RegistryError::Json(_))
        ));
    }

    #[test]
    fn test_builtin_survives_json_roundtrip() {
        let registry = MarketRegistry::builtin();
        let json = serde_json::to_string(&registry.to_file()).unwrap();
        assert_eq!(MarketRegistry::from_json(&json).unwrap(), registry);
    }
}
