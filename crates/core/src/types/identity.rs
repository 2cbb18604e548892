//! Identifying information for the app or developer being linked to.

use serde::{Deserialize, Deserializer, Serialize};

use super::id::{AppId, DeveloperName, PackageName, VendorId};

/// Everything known about the target app and its developer.
///
/// All fields are optional. Empty values, whether passed to the builder
/// methods or deserialized, are treated as absent. Which fields a storefront needs is decided by its
/// templates in the [`MarketRegistry`](crate::MarketRegistry).
///
/// ## Examples
///
/// ```
/// use market_link_core::AppIdentity;
///
/// let identity = AppIdentity::new()
///     .with_package("com.evernote")
///     .with_app_id("56171")
///     .with_vendor_id("")
///     .with_developer_name("Evernote");
///
/// assert_eq!(identity.package().unwrap().as_str(), "com.evernote");
/// assert!(identity.vendor_id().is_none());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppIdentity {
    #[serde(
        default,
        deserialize_with = "empty_as_none",
        skip_serializing_if = "Option::is_none"
    )]
    package: Option<PackageName>,
    #[serde(
        default,
        deserialize_with = "empty_as_none",
        skip_serializing_if = "Option::is_none"
    )]
    app_id: Option<AppId>,
    #[serde(
        default,
        deserialize_with = "empty_as_none",
        skip_serializing_if = "Option::is_none"
    )]
    vendor_id: Option<VendorId>,
    #[serde(
        default,
        deserialize_with = "empty_as_none",
        skip_serializing_if = "Option::is_none"
    )]
    developer_name: Option<DeveloperName>,
}

impl AppIdentity {
    /// Create an empty identity.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the package or bundle identifier of the target app.
    #[must_use]
    pub fn with_package(mut self, package: impl Into<String>) -> Self {
        self.package = PackageName::new(package);
        self
    }

    /// Set the storefront-specific app ID (Nook EAN, BlackBerry content ID).
    #[must_use]
    pub fn with_app_id(mut self, app_id: impl Into<String>) -> Self {
        self.app_id = AppId::new(app_id);
        self
    }

    /// Set the storefront-specific vendor or developer ID.
    #[must_use]
    pub fn with_vendor_id(mut self, vendor_id: impl Into<String>) -> Self {
        self.vendor_id = VendorId::new(vendor_id);
        self
    }

    /// Set the developer name shown in the fallback message.
    #[must_use]
    pub fn with_developer_name(mut self, name: impl Into<String>) -> Self {
        self.developer_name = DeveloperName::new(name);
        self
    }

    /// Package or bundle identifier of the target app.
    #[must_use]
    pub const fn package(&self) -> Option<&PackageName> {
        self.package.as_ref()
    }

    /// Storefront-specific app ID.
    #[must_use]
    pub const fn app_id(&self) -> Option<&AppId> {
        self.app_id.as_ref()
    }

    /// Storefront-specific vendor or developer ID.
    #[must_use]
    pub const fn vendor_id(&self) -> Option<&VendorId> {
        self.vendor_id.as_ref()
    }

    /// Developer display name.
    #[must_use]
    pub const fn developer_name(&self) -> Option<&DeveloperName> {
        self.developer_name.as_ref()
    }

    /// Whether no field is set.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.package.is_none()
            && self.app_id.is_none()
            && self.vendor_id.is_none()
            && self.developer_name.is_none()
    }
}

fn empty_as_none<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: TryFrom<String>,
    T::Error: std::fmt::Display,
{
    Option::<String>::deserialize(deserializer)?
        .filter(|value| !value.is_empty())
        .map(T::try_from)
        .transpose()
        .map_err(serde::de::Error::custom)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_values_are_absent() {
        let identity = AppIdentity::new()
            .with_package("")
            .with_app_id("")
            .with_vendor_id("")
            .with_developer_name("");
        assert!(identity.is_empty());
    }

    #[test]
    fn test_builder_overwrites() {
        let identity = AppIdentity::new().with_package("com.a").with_package("com.b");
        assert_eq!(identity.package().unwrap().as_str(), "com.b");
    }

    #[test]
    fn test_serde_skips_absent_fields() {
        let identity = AppIdentity::new().with_package("com.evernote");
        let json = serde_json::to_string(&identity).unwrap();
        assert_eq!(json, r#"{"package":"com.evernote"}"#);

        let parsed: AppIdentity = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, identity);
    }

    #[test]
    fn test_deserialize_empty_values_are_absent() {
        let parsed: AppIdentity =
            serde_json::from_str(r#"{"package":"","developer_name":"","vendor_id":null}"#).unwrap();
        assert!(parsed.is_empty());
        assert!(parsed.developer_name().is_none());

        let parsed: AppIdentity =
            serde_json::from_str(r#"{"package":"com.evernote","app_id":""}"#).unwrap();
        assert_eq!(parsed, AppIdentity::new().with_package("com.evernote"));
    }
}
