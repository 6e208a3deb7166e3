//! Decodes raw evdev multitouch events into the `TouchTick` batches
//! `touchpad_tap_core` consumes, and drives the poll loop that makes the
//! single shared timer (spec.md §4.6) actually fire.

use evdev::{AbsoluteAxisCode, Device, EventSummary, SynchronizationCode};
use nix::poll::{PollFd, PollFlags, PollTimeout};
use std::os::fd::{AsRawFd, BorrowedFd};
use std::time::{SystemTime, UNIX_EPOCH};
use touchpad_tap_core::{DeviceQuirks, TapDispatch, TickContext, TouchLifecycle, TouchTick, MAX_TOUCHES};

use crate::error::{DaemonResult, PlatformError};
use crate::host_impl::{EvdevTapHost, TouchSample};

use super::signals;

/// Touchpads rarely report a resolution field; when absent, this is a
/// reasonable stand-in for a typical laptop touchpad (units per millimeter).
const FALLBACK_UNITS_PER_MM: f64 = 20.0;

#[derive(Debug, Clone, Copy, Default)]
struct SlotTracker {
    tracking_id: Option<i32>,
    origin_x: i32,
    origin_y: i32,
    x: i32,
    y: i32,
    moved: bool,
    was_down: bool,
}

fn now_us() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_micros() as u64)
        .unwrap_or(0)
}

/// Runs the touchpad tap-and-drag daemon loop until SIGTERM/SIGINT.
///
/// # Errors
///
/// Returns `PlatformError::Poll` if `poll(2)` fails, or `PlatformError::Read`
/// if reading evdev events fails for a reason other than `WouldBlock`.
pub fn run(mut device: Device, quirks: DeviceQuirks, mut host: EvdevTapHost) -> DaemonResult<()> {
    signals::install()?;

    let units_per_mm_x = device
        .get_absinfo()
        .ok()
        .and_then(|mut axes| axes.find(|(code, _)| *code == AbsoluteAxisCode::ABS_MT_POSITION_X))
        .map(|(_, info)| info.resolution())
        .filter(|&r| r > 0)
        .map_or(FALLBACK_UNITS_PER_MM, f64::from);
    let units_per_mm_y = device
        .get_absinfo()
        .ok()
        .and_then(|mut axes| axes.find(|(code, _)| *code == AbsoluteAxisCode::ABS_MT_POSITION_Y))
        .map(|(_, info)| info.resolution())
        .filter(|&r| r > 0)
        .map_or(FALLBACK_UNITS_PER_MM, f64::from);

    let mut disp: TapDispatch = TapDispatch::init(quirks);
    let mut slots = [SlotTracker::default(); MAX_TOUCHES];
    let mut current_slot: usize = 0;
    let mut dirty = [false; MAX_TOUCHES];

    log::info!("touchpad tap daemon started");

    while !signals::shutdown_requested() {
        let timeout = host.timer().poll_timeout_ms(now_us()).map_or(PollTimeout::NONE, |ms| {
            PollTimeout::from(ms.clamp(0, i32::from(u16::MAX)) as u16)
        });

        // Safety: `device` outlives this borrow; the fd is not closed while
        // `fds` is alive.
        let borrowed_fd = unsafe { BorrowedFd::borrow_raw(device.as_raw_fd()) };
        let mut fds = [PollFd::new(borrowed_fd, PollFlags::POLLIN)];
        let poll_result = nix::poll::poll(&mut fds, timeout);

        let now = now_us();
        if let Some(deadline) = host.timer_mut().check_expired(now) {
            disp.handle_timeout(deadline, &mut host);
        }

        match poll_result {
            Ok(0) => continue, // timed out, nothing to read
            Ok(_) => {}
            Err(nix::errno::Errno::EINTR) => continue,
            Err(e) => return Err(PlatformError::Poll(e.to_string()).into()),
        }

        let events = match device.fetch_events() {
            Ok(events) => events,
            Err(e) if e.kind() == std::io::ErrorKind::WouldBlock => continue,
            Err(e) => return Err(PlatformError::Read(e).into()),
        };

        for event in events {
            match event.destructure() {
                EventSummary::AbsoluteAxis(_, AbsoluteAxisCode::ABS_MT_SLOT, value) => {
                    current_slot = value.max(0) as usize;
                }
                EventSummary::AbsoluteAxis(_, AbsoluteAxisCode::ABS_MT_TRACKING_ID, value) => {
                    if let Some(slot) = slots.get_mut(current_slot) {
                        if value < 0 {
                            slot.tracking_id = None;
                            dirty[current_slot] = true;
                        } else {
                            slot.tracking_id = Some(value);
                            slot.origin_x = slot.x;
                            slot.origin_y = slot.y;
                            slot.moved = false;
                            dirty[current_slot] = true;
                        }
                    }
                }
                EventSummary::AbsoluteAxis(_, AbsoluteAxisCode::ABS_MT_POSITION_X, value) => {
                    if let Some(slot) = slots.get_mut(current_slot) {
                        slot.x = value;
                        slot.moved = true;
                        dirty[current_slot] = true;
                    }
                }
                EventSummary::AbsoluteAxis(_, AbsoluteAxisCode::ABS_MT_POSITION_Y, value) => {
                    if let Some(slot) = slots.get_mut(current_slot) {
                        slot.y = value;
                        slot.moved = true;
                        dirty[current_slot] = true;
                    }
                }
                EventSummary::AbsoluteAxis(_, AbsoluteAxisCode::ABS_MT_PRESSURE, value) => {
                    host.set_sample(
                        current_slot,
                        TouchSample {
                            pressure: value,
                            touch_major: 0,
                            near_bottom_edge: false,
                        },
                    );
                }
                EventSummary::AbsoluteAxis(_, AbsoluteAxisCode::ABS_MT_TOUCH_MAJOR, value) => {
                    host.set_sample(
                        current_slot,
                        TouchSample {
                            pressure: 0,
                            touch_major: value,
                            near_bottom_edge: false,
                        },
                    );
                }
                EventSummary::Synchronization(_, SynchronizationCode::SYN_REPORT, _) => {
                    let time_us = now_us();
                    let mut ticks: Vec<TouchTick> = Vec::new();
                    for (slot, was_dirty) in dirty.iter_mut().enumerate() {
                        if !*was_dirty {
                            continue;
                        }
                        *was_dirty = false;
                        let Some(tracker) = slots.get_mut(slot) else {
                            continue;
                        };

                        if let Some(_id) = tracker.tracking_id {
                            let dx = f64::from(tracker.x - tracker.origin_x) / units_per_mm_x;
                            let dy = f64::from(tracker.y - tracker.origin_y) / units_per_mm_y;
                            let distance_mm = dx.hypot(dy);
                            let lifecycle = if tracker.was_down {
                                TouchLifecycle::Updated {
                                    moved: tracker.moved,
                                }
                            } else {
                                TouchLifecycle::Began
                            };
                            ticks.push(TouchTick {
                                slot,
                                lifecycle,
                                in_contact: true,
                                distance_mm,
                                was_down: tracker.was_down,
                            });
                            tracker.was_down = true;
                            tracker.moved = false;
                        } else if tracker.was_down {
                            ticks.push(TouchTick {
                                slot,
                                lifecycle: TouchLifecycle::Ended,
                                in_contact: true,
                                distance_mm: 0.0,
                                was_down: true,
                            });
                            *tracker = SlotTracker::default();
                        }
                    }

                    if !ticks.is_empty() {
                        let hw_fingers_down =
                            slots.iter().filter(|s| s.tracking_id.is_some()).count() as u32;
                        let ctx = TickContext {
                            time_us,
                            button_pressed: false,
                            hw_fingers_down,
                        };
                        disp.handle_state(&mut host, &ctx, &ticks);
                    }
                }
                _ => {}
            }
        }
    }

    log::info!("touchpad tap daemon shutting down");
    disp.remove(&mut host);
    Ok(())
}
