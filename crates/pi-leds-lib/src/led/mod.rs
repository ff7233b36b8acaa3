//! LED control: channels, sysfs access, path resolution and driver ops.

mod backend;
mod channel;
mod driver;
mod resolve;

pub use backend::{LedBackend, SysfsBackend, mock};
pub use channel::Channel;
pub use driver::{LedError, WriteOutcome, disable_all, enable_all, set, set_all, toggle};
pub use resolve::{LedPaths, resolve};

/// Log-friendly rendering of an LED level.
pub fn on_off(on: bool) -> &'static str {
    if on { "ON" } else { "OFF" }
}
