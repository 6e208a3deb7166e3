//! `TapDispatch`: the per-touchpad aggregate owning the global FSM state,
//! the per-touch observation array, and the config/lifecycle surface
//! (spec.md §3, §4.7, §6 — the "Config & lifecycle" 15% component).

use arrayvec::ArrayVec;

use crate::host::{DeviceQuirks, TapHost};
use crate::touch::TouchTapState;
use crate::types::{ButtonMap, TapState};

/// Default number of physical touch slots tracked. Touchpads rarely report
/// more than 5 simultaneous contacts; 16 leaves headroom for semi-MT and
/// synaptics-serial quirk comparisons against `num_slots`.
pub const MAX_TOUCHES: usize = 16;

/// The tap-and-drag dispatch for one touchpad.
///
/// Generic over the touch-slot capacity, mirroring the const-generic
/// sizing the rest of this codebase's family uses for its fixed-capacity
/// registries.
pub struct TapDispatch<const N: usize = MAX_TOUCHES> {
    pub(crate) state: TapState,
    pub(crate) touches: ArrayVec<TouchTapState, N>,
    pub(crate) nfingers_down: u32,
    pub(crate) hw_fingers_down: u32,
    pub(crate) saved_press_time: u64,
    pub(crate) saved_release_time: u64,
    pub(crate) buttons_pressed: u8,
    pub(crate) map: ButtonMap,
    pub(crate) want_map: ButtonMap,
    pub(crate) enabled: bool,
    pub(crate) suspended: bool,
    pub(crate) drag_enabled: bool,
    pub(crate) drag_lock_enabled: bool,
    pub(crate) quirks: DeviceQuirks,
}

impl<const N: usize> TapDispatch<N> {
    /// `init`: spec.md §4.7. Default `enabled` follows the device's
    /// physical-button presence: a clickpad with no dedicated button gets
    /// tapping on by default, a traditional touchpad with buttons does not.
    pub fn init(quirks: DeviceQuirks) -> Self {
        let mut touches = ArrayVec::new();
        for _ in 0..N {
            touches.push(TouchTapState::new());
        }
        TapDispatch {
            state: TapState::Idle,
            touches,
            nfingers_down: 0,
            hw_fingers_down: 0,
            saved_press_time: 0,
            saved_release_time: 0,
            buttons_pressed: 0,
            map: ButtonMap::Lrm,
            want_map: ButtonMap::Lrm,
            enabled: !quirks.has_physical_left_button,
            suspended: false,
            drag_enabled: true,
            drag_lock_enabled: false,
            quirks,
        }
    }

    /// `remove`: no resources to release beyond what `Drop` already does;
    /// kept as an explicit call for symmetry with `init` (spec.md §6).
    pub fn remove(&mut self, host: &mut dyn TapHost) {
        self.release_all(0, host);
    }

    pub const fn state(&self) -> TapState {
        self.state
    }

    pub const fn nfingers_down(&self) -> u32 {
        self.nfingers_down
    }

    pub const fn quirks(&self) -> DeviceQuirks {
        self.quirks
    }

    /// `dragging()`: spec.md §6.
    pub const fn dragging(&self) -> bool {
        self.state.is_dragging()
    }

    /// Tap is *effectively enabled* iff `enabled && !suspended` (spec.md §3).
    pub const fn effectively_enabled(&self) -> bool {
        self.enabled && !self.suspended
    }

    pub const fn enabled(&self) -> bool {
        self.enabled
    }

    /// Config setter; always succeeds (spec.md §7). Disabling immediately
    /// releases any held buttons and resets state (spec.md §5).
    pub fn set_enabled(&mut self, enabled: bool, time_us: u64, host: &mut dyn TapHost) {
        let was_enabled = self.enabled;
        self.enabled = enabled;
        if was_enabled && !enabled {
            self.release_all(time_us, host);
        }
    }

    pub const fn map(&self) -> ButtonMap {
        self.map
    }

    /// Sets the *pending* map. It becomes active only once `state == IDLE`
    /// (spec.md §3 invariant 4, applied in `post_process`).
    pub fn set_map(&mut self, map: ButtonMap) {
        self.want_map = map;
    }

    pub const fn drag_enabled(&self) -> bool {
        self.drag_enabled
    }

    pub fn set_drag_enabled(&mut self, enabled: bool) {
        self.drag_enabled = enabled;
    }

    pub const fn drag_lock_enabled(&self) -> bool {
        self.drag_lock_enabled
    }

    pub fn set_drag_lock_enabled(&mut self, enabled: bool) {
        self.drag_lock_enabled = enabled;
    }

    /// `count()`: `min(device fingers, 3)` (spec.md §6).
    pub fn count(&self) -> u8 {
        core::cmp::min(self.quirks.num_slots, 3)
    }

    /// `post_process`: spec.md §4.7. Map changes are only ever observable
    /// across a return to `IDLE` (invariant 4).
    pub fn post_process(&mut self) {
        if self.state == TapState::Idle && self.map != self.want_map {
            self.map = self.want_map;
        }
    }

    /// `suspend`/`resume`: spec.md §4.7. Toggling into suspended state
    /// releases everything; toggling out of it poisons every in-flight
    /// touch as a palm so it cannot later produce a tap.
    pub fn suspend(&mut self, time_us: u64, host: &mut dyn TapHost) {
        if !self.suspended {
            self.suspended = true;
            self.release_all(time_us, host);
        }
    }

    pub fn resume(&mut self, _time_us: u64, host: &mut dyn TapHost) {
        if self.suspended {
            self.suspended = false;
            for touch in &mut self.touches {
                if touch.tap_state != crate::touch::TouchPhase::Idle {
                    touch.mark_palm_dead();
                }
            }
            self.state = TapState::Idle;
            self.nfingers_down = 0;
            host.cancel_timer();
        }
    }

    /// `release_all`: spec.md §4.7. Emergency release, e.g. on device
    /// removal or disable.
    pub fn release_all(&mut self, time_us: u64, host: &mut dyn TapHost) {
        for n in 1u8..=3 {
            if self.buttons_pressed & (1 << n) != 0 {
                crate::state_machine::emit(self, host, n, time_us, false);
            }
        }
        for touch in &mut self.touches {
            if !touch.is_palm {
                touch.mark_palm_dead();
            }
        }
        self.state = TapState::Idle;
        self.nfingers_down = 0;
        host.cancel_timer();
    }

    pub(crate) fn touch_mut(&mut self, slot: usize) -> Option<&mut TouchTapState> {
        self.touches.get_mut(slot)
    }

    pub(crate) fn touch(&self, slot: usize) -> Option<&TouchTapState> {
        self.touches.get(slot)
    }
}
