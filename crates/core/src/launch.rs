//! Launch and fallback protocol.
//!
//! The core never opens links itself. A [`Launcher`] opens a resolved link
//! on the host platform and a [`Notifier`] shows the fallback message. The
//! fallback is shown exactly when the link was unresolvable or the launcher
//! found no handler for it.

use crate::message::FallbackMessage;
use crate::types::{LaunchTarget, ResolvedLink};

/// Result of asking the platform to open a link.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LaunchOutcome {
    /// Something handled the link.
    Opened,
    /// Nothing on the platform can handle the link's scheme or action.
    NoHandler,
}

/// Opens resolved links on the host platform.
pub trait Launcher {
    /// Try to open a link. Called at most once per resolution.
    fn launch(&self, target: LaunchTarget<'_>) -> LaunchOutcome;
}

/// Shows the fallback message to the user.
pub trait Notifier {
    /// Display the message.
    fn notify(&self, message: &FallbackMessage);
}

impl<T: Launcher + ?Sized> Launcher for &T {
    fn launch(&self, target: LaunchTarget<'_>) -> LaunchOutcome {
        (**self).launch(target)
    }
}

impl<T: Notifier + ?Sized> Notifier for &T {
    fn notify(&self, message: &FallbackMessage) {
        (**self).notify(message);
    }
}

/// Why the fallback message was shown.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FallbackReason {
    /// No link could be built; the launcher was not called.
    Unresolvable,
    /// The launcher found no handler for the link.
    NoHandler,
}

/// What [`open_or_notify`] did.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Outcome {
    /// The link was opened.
    Opened,
    /// The fallback message was shown.
    FellBack(FallbackReason),
}

/// Decide whether the fallback message is needed.
///
/// `launch` is `None` when no launch was attempted. An unresolvable link
/// always needs the fallback, whatever `launch` says.
#[must_use]
pub const fn fallback_reason(
    link: &ResolvedLink,
    launch: Option<LaunchOutcome>,
) -> Option<FallbackReason> {
    match (link, launch) {
        (ResolvedLink::Unresolvable, _) => Some(FallbackReason::Unresolvable),
        (_, Some(LaunchOutcome::NoHandler)) => Some(FallbackReason::NoHandler),
        (_, Some(LaunchOutcome::Opened) | None) => None,
    }
}

/// Whether the fallback message should be shown.
#[must_use]
pub const fn fallback_needed(link: &ResolvedLink, launch: Option<LaunchOutcome>) -> bool {
    fallback_reason(link, launch).is_some()
}

/// Open a resolved link, showing the fallback message if that fails.
///
/// Unresolvable links go straight to the notifier without touching the
/// launcher. Otherwise the launcher is called once, and the notifier only if
/// it reports [`LaunchOutcome::NoHandler`].
pub fn open_or_notify<L, N>(
    link: &ResolvedLink,
    message: &FallbackMessage,
    launcher: &L,
    notifier: &N,
) -> Outcome
where
    L: Launcher + ?Sized,
    N: Notifier + ?Sized,
{
    let launched = link.target().map(|target| {
        let outcome = launcher.launch(target);
        tracing::debug!(%link, ?outcome, "Launch attempted");
        outcome
    });

    match fallback_reason(link, launched) {
        Some(reason) => {
            tracing::info!(?reason, developer = ?message.developer_name(), "Showing fallback message");
            notifier.notify(message);
            Outcome::FellBack(reason)
        }
        None => Outcome::Opened,
    }
}
