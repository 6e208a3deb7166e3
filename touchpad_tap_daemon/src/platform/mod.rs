//! Platform abstraction layer for touchpad input/output.
//!
//! This daemon targets Linux only (evdev + uinput); the module split still
//! mirrors the OS-gated layout the rest of this codebase's family uses so
//! another backend could be added the same way.

#[cfg(target_os = "linux")]
pub mod linux;
