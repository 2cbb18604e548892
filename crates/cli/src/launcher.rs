//! Host platform launcher and console notifier.

use std::process::Command;

use market_link_core::{FallbackMessage, LaunchOutcome, LaunchTarget, Launcher, Notifier};
use url::Url;

/// External program used to open URLs on this platform.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Opener {
    program: &'static str,
    args: &'static [&'static str],
}

impl Opener {
    /// The default opener for the current platform, chosen at compile time.
    #[must_use]
    pub const fn detect() -> Self {
        #[cfg(target_os = "macos")]
        return Self {
            program: "open",
            args: &[],
        };
        #[cfg(target_os = "windows")]
        return Self {
            program: "rundll32",
            args: &["url.dll,FileProtocolHandler"],
        };
        #[cfg(not(any(target_os = "macos", target_os = "windows")))]
        return Self {
            program: "xdg-open",
            args: &[],
        };
    }
}

/// Opens URLs by handing them to the platform opener.
///
/// Custom actions are Android intents and have no desktop handler, so they
/// always report [`LaunchOutcome::NoHandler`].
#[derive(Debug, Clone)]
pub struct SystemLauncher {
    opener: Opener,
}

impl SystemLauncher {
    /// Create a launcher using the platform's default opener.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            opener: Opener::detect(),
        }
    }

    fn open_url(&self, raw: &str) -> LaunchOutcome {
        // Parsed only to validate and log; the raw string is passed through unchanged.
        let url = match Url::parse(raw) {
            Ok(url) => url,
            Err(e) => {
                tracing::warn!(url = raw, error = %e, "Refusing to open malformed URL");
                return LaunchOutcome::NoHandler;
            }
        };

        tracing::info!(scheme = url.scheme(), opener = self.opener.program, "Opening link");
        let status = Command::new(self.opener.program)
            .args(self.opener.args)
            .arg(raw)
            .status();

        match status {
            Ok(status) if status.success() => LaunchOutcome::Opened,
            Ok(status) => {
                tracing::warn!(scheme = url.scheme(), %status, "No handler for link");
                LaunchOutcome::NoHandler
            }
            Err(e) => {
                tracing::warn!(opener = self.opener.program, error = %e, "Failed to run opener");
                LaunchOutcome::NoHandler
            }
        }
    }
}

impl Default for SystemLauncher {
    fn default() -> Self {
        Self::new()
    }
}

impl Launcher for SystemLauncher {
    fn launch(&self, target: LaunchTarget<'_>) -> LaunchOutcome {
        match target {
            LaunchTarget::Url(url) => self.open_url(url),
            LaunchTarget::Action { action, .. } => {
                tracing::warn!(action, "No handler for platform action on this host");
                LaunchOutcome::NoHandler
            }
        }
    }
}

/// Prints the link instead of opening it.
#[derive(Debug, Clone, Copy, Default)]
pub struct PrintLauncher;

impl Launcher for PrintLauncher {
    #[allow(clippy::print_stdout)]
    fn launch(&self, target: LaunchTarget<'_>) -> LaunchOutcome {
        match target {
            LaunchTarget::Url(url) => println!("{url}"),
            LaunchTarget::Action { action, extras } => {
                println!("action: {action}");
                for (key, value) in extras {
                    println!("  {key} = {value}");
                }
            }
        }
        LaunchOutcome::Opened
    }
}

/// Writes the fallback message to standard error.
#[derive(Debug, Clone, Copy, Default)]
pub struct ConsoleNotifier;

impl Notifier for ConsoleNotifier {
    #[allow(clippy::print_stderr)]
    fn notify(&self, message: &FallbackMessage) {
        eprintln!("{message}");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_malformed_url_has_no_handler() {
        let launcher = SystemLauncher::new();
        assert_eq!(
            launcher.launch(LaunchTarget::Url("not a url")),
            LaunchOutcome::NoHandler
        );
    }

    #[test]
    fn test_action_has_no_handler() {
        let extras = std::collections::BTreeMap::new();
        let launcher = SystemLauncher::new();
        assert_eq!(
            launcher.launch(LaunchTarget::Action {
                action: "com.bn.sdk.shop.details",
                extras: &extras,
            }),
            LaunchOutcome::NoHandler
        );
    }

    #[test]
    fn test_print_launcher_always_opens() {
        assert_eq!(
            PrintLauncher.launch(LaunchTarget::Url("market://details?id=a")),
            LaunchOutcome::Opened
        );
    }
}
