//! Core types for Market Link.
//!
//! This module provides type-safe wrappers for the values that flow through
//! link resolution.

pub mod id;
pub mod identity;
pub mod link;
pub mod operation;
pub mod package;
pub mod storefront;

pub use id::*;
pub use identity::AppIdentity;
pub use link::{LaunchTarget, LinkRequest, ResolvedLink};
pub use operation::Operation;
pub use storefront::Storefront;
