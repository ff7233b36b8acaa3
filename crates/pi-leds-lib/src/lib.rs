//! pi-leds: Raspberry Pi status LED control over sysfs with a small HTTP panel.

pub mod config;
pub mod controller;
pub mod error;
pub mod led;
pub mod lifecycle;
pub mod server;
pub mod state;
pub mod template;

pub use error::PiLedsError;
