//! Daemon lifecycle: device discovery, the uinput-backed host, and the
//! evdev-driven event loop, wired together for the `run` subcommand.

pub mod event_loop;
pub mod signals;

use crate::error::DaemonResult;
use crate::host_impl::EvdevTapHost;
use crate::platform::linux::device::{self, TouchpadInfo};

/// Runs the daemon against the autodetected touchpad, or the one at
/// `device_path` if given.
///
/// # Errors
///
/// Returns `DaemonError::Device` if no touchpad can be found, or
/// `DaemonError::Platform` if the uinput pointer or the event loop itself
/// fails.
pub fn run(device_path: Option<&std::path::Path>) -> DaemonResult<()> {
    let path = match device_path {
        Some(path) => path.to_path_buf(),
        None => device::find_default_touchpad()?.path,
    };

    let (evdev_device, quirks) = device::open_touchpad(&path)?;
    let info = TouchpadInfo {
        path: path.clone(),
        name: evdev_device.name().unwrap_or("unknown touchpad").to_string(),
        quirks,
    };
    log::info!("using touchpad: {} ({})", info.name, info.path.display());

    let host = EvdevTapHost::create(&info)?;

    event_loop::run(evdev_device, quirks, host)
}
