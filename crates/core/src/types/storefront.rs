//! Storefront selector.

use std::borrow::Cow;
use std::convert::Infallible;

use serde::{Deserialize, Serialize};

/// An app storefront, identified by an open string tag.
///
/// The built-in storefronts are provided as associated constants. Any other
/// tag is valid and behaves like [`Storefront::NONE`] until a template for
/// it is registered in a [`MarketRegistry`](crate::MarketRegistry).
///
/// Tags are normalized to trimmed ASCII lowercase, and an all-digit tag is
/// read as a legacy selector code. Every constructor, `FromStr` and serde
/// share this normalization.
///
/// ## Examples
///
/// ```
/// use market_link_core::Storefront;
///
/// assert_eq!(Storefront::new(" Google "), Storefront::GOOGLE);
/// assert_eq!(Storefront::from_code(4), Storefront::BLACKBERRY);
/// assert_eq!("2".parse::<Storefront>().unwrap(), Storefront::AMAZON);
/// assert_eq!(Storefront::new("7"), Storefront::from_code(7));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub struct Storefront(Cow<'static, str>);

impl Storefront {
    /// No storefront selected. Never resolves.
    pub const NONE: Self = Self(Cow::Borrowed("none"));
    /// Google Play.
    pub const GOOGLE: Self = Self(Cow::Borrowed("google"));
    /// Amazon Appstore.
    pub const AMAZON: Self = Self(Cow::Borrowed("amazon"));
    /// Barnes & Noble Nook Store.
    pub const NOOK: Self = Self(Cow::Borrowed("nook"));
    /// BlackBerry Appworld.
    pub const BLACKBERRY: Self = Self(Cow::Borrowed("blackberry"));
    /// Samsung Apps.
    pub const SAMSUNG: Self = Self(Cow::Borrowed("samsung"));

    /// Built-in storefronts in legacy selector code order.
    pub const BUILTIN: [Self; 6] = [
        Self::NONE,
        Self::GOOGLE,
        Self::AMAZON,
        Self::NOOK,
        Self::BLACKBERRY,
        Self::SAMSUNG,
    ];

    /// Create a storefront from a tag or a legacy code.
    ///
    /// An empty tag is [`Storefront::NONE`]. A numeric tag goes through
    /// [`Storefront::from_code`].
    #[must_use]
    pub fn new(tag: impl AsRef<str>) -> Self {
        let tag = tag.as_ref().trim();
        if let Ok(code) = tag.parse::<u32>() {
            return Self::from_code(code);
        }
        let tag = tag.to_ascii_lowercase();
        if tag.is_empty() {
            return Self::NONE;
        }
        Self::BUILTIN
            .into_iter()
            .find(|builtin| builtin.as_str() == tag)
            .unwrap_or(Self(Cow::Owned(tag)))
    }

    /// Map a legacy numeric market selector to a storefront.
    ///
    /// Codes 0-5 are the built-in storefronts. Other codes map to a
    /// `code-<n>` tag, which resolves like [`Storefront::NONE`] unless a
    /// template is registered for it.
    #[must_use]
    pub fn from_code(code: u32) -> Self {
        usize::try_from(code)
            .ok()
            .and_then(|index| Self::BUILTIN.get(index).cloned())
            .unwrap_or_else(|| Self(Cow::Owned(format!("code-{code}"))))
    }

    /// Get the tag as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Whether this is the explicit "no storefront" selector.
    #[must_use]
    pub fn is_none(&self) -> bool {
        *self == Self::NONE
    }
}

impl Default for Storefront {
    fn default() -> Self {
        Self::NONE
    }
}

impl std::fmt::Display for Storefront {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::str::FromStr for Storefront {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::new(s))
    }
}

impl From<String> for Storefront {
    fn from(tag: String) -> Self {
        Self::new(tag)
    }
}

impl From<Storefront> for String {
    fn from(store: Storefront) -> Self {
        store.0.into_owned()
    }
}

impl AsRef<str> for Storefront {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
