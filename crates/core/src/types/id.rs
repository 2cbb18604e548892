//! Newtype identifiers for app identity fields.
//!
//! Use the `define_identifier!` macro to create string wrappers that prevent
//! accidentally passing a vendor ID where a package name is expected.

/// Macro to define a type-safe identifier wrapper.
///
/// Creates a newtype wrapper around `String` with:
/// - `Serialize`/`Deserialize` as a plain string; deserializing an empty
///   string fails with [`EmptyIdentifier`]
/// - `Debug`, `Clone`, `PartialEq`, `Eq`, `Hash`, `PartialOrd`, `Ord`
/// - `new()` that returns `None` for an empty value
/// - Accessors: `as_str()`, `into_inner()`
/// - `Display`, `AsRef<str>`, `TryFrom<String>` and `From<$name> for String`
///
/// Values are stored verbatim. Percent-encoding supplied by the caller is
/// preserved; nothing is encoded or decoded.
///
/// # Example
///
/// ```rust
/// # use market_link_core::define_identifier;
/// define_identifier!(AsinId);
///
/// assert!(AsinId::new("").is_none());
/// assert_eq!(AsinId::new("B004LOMB2Q").unwrap().as_str(), "B004LOMB2Q");
/// ```
#[macro_export]
macro_rules! define_identifier {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(
            Debug,
            Clone,
            PartialEq,
            Eq,
            Hash,
            PartialOrd,
            Ord,
            ::serde::Serialize,
            ::serde::Deserialize
        )]
        #[serde(try_from = "String", into = "String")]
        pub struct $name(String);

        impl $name {
            /// Create a new identifier, or `None` if the value is empty.
            #[must_use]
            pub fn new(value: impl Into<String>) -> Option<Self> {
                let value = value.into();
                if value.is_empty() {
                    None
                } else {
                    Some(Self(value))
                }
            }

            /// Get the identifier as a string slice.
            #[must_use]
            pub fn as_str(&self) -> &str {
                &self.0
            }

            /// Consume the identifier and return the inner string.
            #[must_use]
            pub fn into_inner(self) -> String {
                self.0
            }
        }

        impl ::core::fmt::Display for $name {
            fn fmt(&self, f: &mut ::core::fmt::Formatter<'_>) -> ::core::fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl AsRef<str> for $name {
            fn as_ref(&self) -> &str {
                &self.0
            }
        }

        impl TryFrom<String> for $name {
            type Error = $crate::EmptyIdentifier;

            fn try_from(value: String) -> Result<Self, Self::Error> {
                Self::new(value).ok_or($crate::EmptyIdentifier)
            }
        }

        impl From<$name> for String {
            fn from(id: $name) -> Self {
                id.0
            }
        }
    };
}

/// An identifier was built from an empty string.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("Identifier must not be empty")]
pub struct EmptyIdentifier;

define_identifier!(
    /// Package or bundle identifier, e.g. `com.evernote`.
    PackageName
);
define_identifier!(
    /// Storefront-specific app ID (Nook EAN, BlackBerry content ID).
    AppId
);
define_identifier!(
    /// Storefront-specific vendor or developer ID.
    ///
    /// For Amazon this is the package of another app released by the same
    /// developer.
    VendorId
);
define_identifier!(
    /// Human-readable developer name, used in the fallback message.
    DeveloperName
);

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_new_rejects_empty() {
        assert!(PackageName::new("").is_none());
        assert!(AppId::new(String::new()).is_none());
    }

    #[test]
    fn test_value_is_kept_verbatim() {
        let vendor = VendorId::new("Evernote%20Corporation").unwrap();
        assert_eq!(vendor.as_str(), "Evernote%20Corporation");
        assert_eq!(vendor.to_string(), "Evernote%20Corporation");
    }

    #[test]
    fn test_serde_transparent() {
        let id = AppId::new("56171").unwrap();
        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, "\"56171\"");

        let parsed: AppId = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, id);
    }

    #[test]
    fn test_deserialize_rejects_empty() {
        assert!(serde_json::from_str::<PackageName>("\"\"").is_err());
        assert_eq!(
            DeveloperName::try_from(String::new()),
            Err(EmptyIdentifier)
        );
    }
}
