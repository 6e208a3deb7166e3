//! CLI subcommands for the touchpad tap-and-drag daemon, in the shape of
//! `keyrx_daemon::cli`: each subcommand is its own module with an `execute`
//! entry point the binary's `main` dispatches to.

pub mod config;
pub mod devices;
pub mod simulate;
