//! Link operations.

use serde::{Deserialize, Serialize};

/// What the storefront should show.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Operation {
    /// Show a single app's details page.
    ShowApp,
    /// Show every app published by a developer.
    #[serde(alias = "show_all")]
    ShowAllByDeveloper,
}

impl Operation {
    /// All operations, in declaration order.
    pub const ALL: [Self; 2] = [Self::ShowApp, Self::ShowAllByDeveloper];
}

impl std::fmt::Display for Operation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::ShowApp => write!(f, "show_app"),
            Self::ShowAllByDeveloper => write!(f, "show_all_by_developer"),
        }
    }
}

impl std::str::FromStr for Operation {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "show_app" => Ok(Self::ShowApp),
            "show_all" | "show_all_by_developer" => Ok(Self::ShowAllByDeveloper),
            _ => Err(format!("invalid operation: {s}")),
        }
    }
}
