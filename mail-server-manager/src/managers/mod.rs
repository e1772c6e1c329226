//! Server manager implementations

/// Shared utilities used by manager implementations.
pub mod common;

#[cfg(feature = "mailcow")]
mod mailcow;

#[cfg(feature = "mailcow")]
pub use mailcow::{MailcowManager, MailcowManagerBuilder, admin_username};
