//! Library surface of the touchpad tap-and-drag daemon: OS integration and
//! the CLI subcommands layered over `touchpad_tap_core`.

pub mod cli;
pub mod error;
pub mod platform;

#[cfg(target_os = "linux")]
pub mod daemon;
#[cfg(target_os = "linux")]
pub mod host_impl;
