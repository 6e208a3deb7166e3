//! The boundary trait through which the global FSM and the event
//! synthesiser reach everything spec.md places out of scope: hardware
//! decoding, palm/thumb classification, button emission, and timers.
//!
//! A concrete implementation lives in the daemon crate, backed by real
//! `evdev`/`uinput` devices. Tests use a mock recorder (see
//! `testing::host_mock`).

use crate::types::Button;

/// Static properties of the touchpad that shape the motion-threshold
/// exceptions (spec.md §4.5) and the clickpad short-circuit (§4.4 step 2).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DeviceQuirks {
    /// Synaptics serial touchpads extrapolate coordinates and produce
    /// false jumps when more fingers are down than hardware slots exist.
    pub synaptics_serial: bool,
    /// Semi-MT devices report only a bounding box of all contacts.
    pub semi_mt: bool,
    /// Number of physical touch slots the hardware reports concurrently.
    pub num_slots: u8,
    /// Surface-is-the-button touchpads: a physical press must preempt
    /// tapping.
    pub is_clickpad: bool,
    /// `true` iff the device has a dedicated physical left button. Used
    /// only to compute the default `enabled` value at `init` time.
    pub has_physical_left_button: bool,
}

impl DeviceQuirks {
    /// A touchpad with no quirks, not a clickpad, and a physical button —
    /// i.e. tapping disabled by default.
    pub const fn plain() -> Self {
        DeviceQuirks {
            synaptics_serial: false,
            semi_mt: false,
            num_slots: 16,
            is_clickpad: false,
            has_physical_left_button: true,
        }
    }

    /// A typical modern clickpad with no physical buttons: tapping is
    /// enabled by default.
    pub const fn clickpad() -> Self {
        DeviceQuirks {
            is_clickpad: true,
            has_physical_left_button: false,
            ..Self::plain()
        }
    }
}

/// Per-tick host-observed context the synthesiser needs beyond the set of
/// dirty touches themselves (spec.md §4.4).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TickContext {
    /// Monotonic tick time, in microseconds.
    pub time_us: u64,
    /// Whether a physical clickpad button press was queued this tick.
    pub button_pressed: bool,
    /// The real hardware finger count this tick: every contact the device
    /// currently reports, including ones already classified as palm or
    /// thumb. This is deliberately distinct from the tap-eligible finger
    /// count the FSM tracks internally (spec.md §4.5) — the motion-
    /// threshold quirk exceptions key off what the hardware actually has
    /// down, not off how many of those contacts still count toward a tap.
    pub hw_fingers_down: u32,
}

/// External collaborators the tap subsystem consults or calls back into.
///
/// Every method here corresponds to an out-of-scope dependency named in
/// spec.md §1/§6: palm/thumb classification predicates, the button
/// emission sink, and the single-shot timer facility. None of these are
/// implemented by this crate.
pub trait TapHost {
    /// `tp_thumb_ignored_for_tap`: true iff this touch should never be
    /// allowed to start a tap, evaluated once at touch-begin.
    fn thumb_ignored_for_tap(&self, slot: usize) -> bool;

    /// `tp_thumb_ignored`: true iff an in-progress touch should now be
    /// reclassified as a thumb.
    fn thumb_ignored(&self, slot: usize) -> bool;

    /// `tp_palm_tap_is_palm`: an early palm heuristic evaluated at
    /// touch-begin, which forces a synthetic `MOTION` in the same tick the
    /// `TOUCH` event is injected (spec.md §4.4.f).
    fn palm_tap_is_palm(&self, slot: usize) -> bool;

    /// The general palm classifier, evaluated on every update of an
    /// active touch (spec.md §4.4.e).
    fn is_palm(&self, slot: usize) -> bool;

    /// `evdev_pointer_notify_button`: emit a synthetic button event.
    fn notify_button(&mut self, time_us: u64, button: Button, pressed: bool);

    /// `libinput_timer_set`: arm the single shared timer, overwriting any
    /// existing deadline. `deadline_us` is an absolute monotonic time.
    fn arm_timer(&mut self, deadline_us: u64);

    /// `libinput_timer_cancel`: idempotent; a no-op if unarmed.
    fn cancel_timer(&mut self);
}
