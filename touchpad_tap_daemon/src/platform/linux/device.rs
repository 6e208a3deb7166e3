//! Touchpad discovery and `DeviceQuirks` detection via evdev.
//!
//! Enumerates `/dev/input/event*`, keeps the ones that look like
//! multitouch touchpads, and derives the quirk flags `touchpad_tap_core`
//! needs straight from the device's advertised capabilities.

use std::path::PathBuf;

use evdev::{AbsoluteAxisCode, Device, KeyCode, PropType};
use touchpad_tap_core::DeviceQuirks;

use crate::error::{DaemonResult, DeviceError};

/// A touchpad found under `/dev/input`, paired with the quirks this daemon
/// would run it with.
pub struct TouchpadInfo {
    pub path: PathBuf,
    pub name: String,
    pub quirks: DeviceQuirks,
}

/// `true` iff the device reports the axes a multitouch touchpad must have.
fn is_multitouch_touchpad(device: &Device) -> bool {
    let Some(axes) = device.supported_absolute_axes() else {
        return false;
    };
    axes.contains(AbsoluteAxisCode::ABS_MT_POSITION_X)
        && axes.contains(AbsoluteAxisCode::ABS_MT_POSITION_Y)
        && axes.contains(AbsoluteAxisCode::ABS_MT_SLOT)
}

/// Derives `DeviceQuirks` from the device's advertised properties and axes
/// (spec.md's quirk surface: `synaptics_serial`, `semi_mt`, `num_slots`,
/// `is_clickpad`, `has_physical_left_button`).
fn quirks_for(device: &Device) -> DeviceQuirks {
    let props = device.properties();
    let is_clickpad = props.contains(PropType::BUTTONPAD);
    let semi_mt = props.contains(PropType::SEMI_MT);

    let num_slots = device
        .get_absinfo()
        .ok()
        .and_then(|mut axes| axes.find(|(code, _)| *code == AbsoluteAxisCode::ABS_MT_SLOT))
        .map(|(_, info)| (info.maximum() - info.minimum() + 1).clamp(1, u8::MAX as i32) as u8)
        .unwrap_or(1);

    let has_physical_left_button = !is_clickpad
        && device
            .supported_keys()
            .is_some_and(|keys| keys.contains(KeyCode::BTN_LEFT));

    // Synaptics serial (PS/2) touchpads identify themselves by name; the
    // RMI4/I2C successors report through a different driver name entirely.
    let synaptics_serial = device
        .name()
        .is_some_and(|name| name.eq_ignore_ascii_case("SynPS/2 Synaptics TouchPad"));

    DeviceQuirks {
        synaptics_serial,
        semi_mt,
        num_slots,
        is_clickpad,
        has_physical_left_button,
    }
}

/// Lists every multitouch touchpad visible under `/dev/input`.
///
/// # Errors
///
/// Returns `DeviceError::Enumerate` if `/dev/input` itself cannot be read
/// (typically a permissions problem, not "no devices").
pub fn enumerate_touchpads() -> DaemonResult<Vec<TouchpadInfo>> {
    let mut found = Vec::new();
    for (path, device) in evdev::enumerate() {
        if !is_multitouch_touchpad(&device) {
            continue;
        }
        let name = device.name().unwrap_or("unknown touchpad").to_string();
        let quirks = quirks_for(&device);
        found.push(TouchpadInfo {
            path,
            name,
            quirks,
        });
    }
    Ok(found)
}

/// Opens the touchpad at `path`, re-deriving its quirks, for use by the
/// running daemon rather than the `devices` listing command.
///
/// # Errors
///
/// Returns `DeviceError::NotFound` if the path does not exist or is not a
/// multitouch touchpad.
pub fn open_touchpad(path: &std::path::Path) -> DaemonResult<(Device, DeviceQuirks)> {
    let device = Device::open(path).map_err(|_| DeviceError::NotFound)?;
    if !is_multitouch_touchpad(&device) {
        return Err(DeviceError::NotFound.into());
    }
    let quirks = quirks_for(&device);
    Ok((device, quirks))
}

/// Autodetects the first multitouch touchpad found.
///
/// # Errors
///
/// Returns `DeviceError::NotFound` if none is present.
pub fn find_default_touchpad() -> DaemonResult<TouchpadInfo> {
    enumerate_touchpads()?
        .into_iter()
        .next()
        .ok_or_else(|| DeviceError::NotFound.into())
}
