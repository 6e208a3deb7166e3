//! Error types for the touchpad tap-and-drag daemon.
//!
//! `touchpad_tap_core` has no recoverable runtime errors (spec.md §7: config
//! setters always succeed); everything fallible lives at the OS-integration
//! boundary this crate owns.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Failures talking to the Linux input stack: opening/reading an evdev
/// device, or creating the synthetic uinput pointer.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum PlatformError {
    /// Failed to open an evdev device node.
    #[error("failed to open device {path:?}: {source}")]
    DeviceOpen {
        /// Device node path that failed to open.
        path: PathBuf,
        /// Underlying IO error.
        source: io::Error,
    },

    /// The opened device does not advertise multitouch capabilities.
    #[error("device {0:?} is not a multitouch touchpad")]
    NotMultitouch(PathBuf),

    /// Failed to create the virtual uinput pointer device.
    #[error("failed to create virtual pointer device: {0}")]
    UinputCreate(String),

    /// An evdev read failed after the device was already opened.
    #[error("device read error: {0}")]
    Read(#[from] io::Error),

    /// `poll(2)` failed while waiting on the device fd or the tap timer.
    #[error("poll error: {0}")]
    Poll(String),
}

/// Failures enumerating or matching input devices.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum DeviceError {
    /// `/dev/input` could not be read at all.
    #[error("failed to enumerate /dev/input: {0}")]
    Enumerate(io::Error),

    /// No touchpad device matched the given path or autodetection.
    #[error("no touchpad device found")]
    NotFound,
}

/// Failures specific to CLI argument handling and simulate-script parsing.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum CliError {
    /// The inline event DSL or event-file contents could not be parsed.
    #[error("invalid event script: {0}")]
    InvalidScript(String),

    /// Reading or parsing the event-file failed.
    #[error("failed to read event file {path:?}: {source}")]
    EventFile {
        /// Path that failed to load.
        path: PathBuf,
        /// Underlying IO error.
        source: io::Error,
    },

    /// JSON (de)serialization of CLI output or event files failed.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Top-level daemon error type. Module-specific errors convert into this
/// automatically via `From`.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum DaemonError {
    /// Platform/OS-integration error occurred.
    #[error("platform error: {0}")]
    Platform(#[from] PlatformError),

    /// Device enumeration/matching error occurred.
    #[error("device error: {0}")]
    Device(#[from] DeviceError),

    /// CLI error occurred.
    #[error("cli error: {0}")]
    Cli(#[from] CliError),
}

pub type DaemonResult<T> = Result<T, DaemonError>;
