//! Fallback message naming the developer.

use std::borrow::Cow;

use serde::{Deserialize, Serialize};

use crate::types::DeveloperName;

/// Text placed around the developer name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessageTemplate {
    /// Text before the developer name.
    pub prefix: Cow<'static, str>,
    /// Text after the developer name.
    pub postfix: Cow<'static, str>,
}

impl MessageTemplate {
    /// Create a template from custom text.
    #[must_use]
    pub fn new(prefix: impl Into<Cow<'static, str>>, postfix: impl Into<Cow<'static, str>>) -> Self {
        Self {
            prefix: prefix.into(),
            postfix: postfix.into(),
        }
    }

    /// Render a message for a developer.
    #[must_use]
    pub fn render(&self, developer_name: Option<&DeveloperName>) -> FallbackMessage {
        let name = developer_name.map_or("", DeveloperName::as_str);
        FallbackMessage {
            developer_name: developer_name.cloned(),
            text: format!("{}{name}{}", self.prefix, self.postfix),
        }
    }
}

impl Default for MessageTemplate {
    fn default() -> Self {
        Self {
            prefix: Cow::Borrowed("Unable to open the app market. Please search for "),
            postfix: Cow::Borrowed(" in your app market."),
        }
    }
}

/// Message shown when a link cannot be resolved or opened.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FallbackMessage {
    developer_name: Option<DeveloperName>,
    text: String,
}

impl FallbackMessage {
    /// Render the default message for a developer.
    #[must_use]
    pub fn for_developer(developer_name: Option<&DeveloperName>) -> Self {
        MessageTemplate::default().render(developer_name)
    }

    /// The developer the message names, if known.
    #[must_use]
    pub const fn developer_name(&self) -> Option<&DeveloperName> {
        self.developer_name.as_ref()
    }

    /// The full message text.
    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }
}

impl std::fmt::Display for FallbackMessage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.text)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_default_message() {
        let name = DeveloperName::new("Evernote").unwrap();
        let message = FallbackMessage::for_developer(Some(&name));
        assert_eq!(
            message.text(),
            "Unable to open the app market. Please search for Evernote in your app market."
        );
        assert_eq!(message.developer_name(), Some(&name));
    }

    #[test]
    fn test_missing_name_renders_empty() {
        let message = MessageTemplate::new("[", "]").render(None);
        assert_eq!(message.to_string(), "[]");
        assert!(message.developer_name().is_none());
    }

    #[test]
    fn test_custom_template() {
        let name = DeveloperName::new("Simplify Now").unwrap();
        let template = MessageTemplate::new(String::from("Busca "), " en la tienda.");
        assert_eq!(template.render(Some(&name)).text(), "Busca Simplify Now en la tienda.");
    }
}
