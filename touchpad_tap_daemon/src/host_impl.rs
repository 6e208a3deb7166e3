//! The concrete `TapHost`: palm/thumb classification backed by per-slot
//! pressure and contact-size thresholds, a uinput-backed button sink, and
//! the poll-driven timer.

use touchpad_tap_core::{Button, TapHost};
use uinput::event::controller::{Controller, Mouse};
use uinput::Device as UinputDevice;

use crate::error::{DaemonResult, PlatformError};
use crate::platform::linux::device::TouchpadInfo;
use crate::platform::linux::timer::PollTimer;

/// A touch is classified as a palm once its contact area or pressure grows
/// past what a fingertip produces. These are heuristics, not hardware
/// constants; real deployments tune them per device model.
const PALM_PRESSURE_THRESHOLD: i32 = 180;
const PALM_TOUCH_MAJOR_THRESHOLD: i32 = 300;

/// Per-slot pressure/size sample the daemon's event-decoding loop updates
/// as `ABS_MT_PRESSURE`/`ABS_MT_TOUCH_MAJOR` events arrive.
#[derive(Debug, Default, Clone, Copy)]
pub struct TouchSample {
    pub pressure: i32,
    pub touch_major: i32,
    /// Touches that begin within this many millimeters of the touchpad's
    /// bottom edge are thumb candidates.
    pub near_bottom_edge: bool,
}

/// Concrete `TapHost`, backed by a uinput virtual pointer and classification
/// state the event-decoding loop feeds per slot.
pub struct EvdevTapHost {
    pointer: UinputDevice,
    samples: [TouchSample; touchpad_tap_core::MAX_TOUCHES],
    timer: PollTimer,
}

impl EvdevTapHost {
    /// Creates the virtual pointer device used to emit synthetic button
    /// clicks. The real evdev touchpad continues to deliver its own motion
    /// events; this device only ever emits `BTN_LEFT`/`BTN_RIGHT`/`BTN_MIDDLE`.
    ///
    /// # Errors
    ///
    /// Returns `PlatformError::UinputCreate` if `/dev/uinput` cannot be
    /// opened or the virtual device cannot be registered.
    pub fn create(info: &TouchpadInfo) -> DaemonResult<Self> {
        let name = format!("{} (tap-to-click)", info.name);
        let pointer = uinput::default()
            .map_err(|e| PlatformError::UinputCreate(e.to_string()))?
            .name(&name)
            .map_err(|e| PlatformError::UinputCreate(e.to_string()))?
            .event(Controller::Mouse(Mouse::Left))
            .map_err(|e| PlatformError::UinputCreate(e.to_string()))?
            .event(Controller::Mouse(Mouse::Right))
            .map_err(|e| PlatformError::UinputCreate(e.to_string()))?
            .event(Controller::Mouse(Mouse::Middle))
            .map_err(|e| PlatformError::UinputCreate(e.to_string()))?
            .create()
            .map_err(|e| PlatformError::UinputCreate(e.to_string()))?;

        Ok(EvdevTapHost {
            pointer,
            samples: [TouchSample::default(); touchpad_tap_core::MAX_TOUCHES],
            timer: PollTimer::new(),
        })
    }

    pub fn set_sample(&mut self, slot: usize, sample: TouchSample) {
        if let Some(slot_sample) = self.samples.get_mut(slot) {
            *slot_sample = sample;
        }
    }

    pub const fn timer(&self) -> &PollTimer {
        &self.timer
    }

    pub fn timer_mut(&mut self) -> &mut PollTimer {
        &mut self.timer
    }

    fn sample(&self, slot: usize) -> TouchSample {
        self.samples.get(slot).copied().unwrap_or_default()
    }

    fn uinput_button(button: Button) -> Mouse {
        match button {
            Button::Left => Mouse::Left,
            Button::Right => Mouse::Right,
            Button::Middle => Mouse::Middle,
        }
    }
}

impl TapHost for EvdevTapHost {
    fn thumb_ignored_for_tap(&self, slot: usize) -> bool {
        self.sample(slot).near_bottom_edge
    }

    fn thumb_ignored(&self, slot: usize) -> bool {
        self.sample(slot).near_bottom_edge
    }

    fn palm_tap_is_palm(&self, slot: usize) -> bool {
        self.is_palm(slot)
    }

    fn is_palm(&self, slot: usize) -> bool {
        let sample = self.sample(slot);
        sample.pressure >= PALM_PRESSURE_THRESHOLD
            || sample.touch_major >= PALM_TOUCH_MAJOR_THRESHOLD
    }

    fn notify_button(&mut self, _time_us: u64, button: Button, pressed: bool) {
        let key = Controller::Mouse(Self::uinput_button(button));
        let result = if pressed {
            self.pointer.press(&key)
        } else {
            self.pointer.release(&key)
        };
        if let Err(e) = result {
            log::warn!("failed to emit {:?} ({}): {}", button, pressed, e);
            return;
        }
        if let Err(e) = self.pointer.synchronize() {
            log::warn!("failed to synchronize uinput event: {}", e);
        }
    }

    fn arm_timer(&mut self, deadline_us: u64) {
        self.timer.arm(deadline_us);
    }

    fn cancel_timer(&mut self) {
        self.timer.cancel();
    }
}
