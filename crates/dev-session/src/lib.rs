//! dev-session: keep an LG webOS developer-mode session alive.
//!
//! The session expires unless its renewal URL is hit periodically. This
//! crate loads the add-on options, performs the renewal request, judges the
//! response, and tracks when the next renewal is due.

pub mod error;
pub mod options;
pub mod renew;
pub mod schedule;

pub use error::RenewError;
