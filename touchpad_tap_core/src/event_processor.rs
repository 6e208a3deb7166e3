//! The per-tick event synthesiser (spec.md §4.4) and the motion-threshold
//! exceptions it consults (§4.5). This is the 20%-share component that
//! turns raw per-touch lifecycle ticks into FSM events.

use crate::dispatch::TapDispatch;
use crate::host::{DeviceQuirks, TapHost, TickContext};
use crate::state_machine::apply_event;
use crate::touch::{TouchLifecycle, TouchPhase, TouchTick};
use crate::types::{TapEvent, TapState};

/// Motion threshold, in millimetres (spec.md §4.1/§4.5).
pub const MOTION_THRESHOLD_MM: f64 = 1.3;

/// `tp_tap_exceeds_motion_threshold`: spec.md §4.5.
///
/// Two hardware quirks suppress a real distance reading: synaptics serial
/// touchpads extrapolate coordinates and produce false jumps once more
/// fingers are down than the hardware has slots for; semi-MT devices only
/// report a bounding box, so a finger-count change alone produces a
/// coordinate jump that is not real motion.
///
/// `hw_fingers_down`/`old_hw_fingers_down` must be the real hardware
/// contact counts, not the tap-eligible count the FSM tracks (palms and
/// thumbs excluded) — the original explicitly uses `tp->nfingers_down`/
/// `tp->old_nfingers_down` here, not the tap-only counters, since the
/// quirk is about what the hardware actually has down.
pub fn exceeds_motion_threshold(
    distance_mm: f64,
    quirks: DeviceQuirks,
    hw_fingers_down: u32,
    old_hw_fingers_down: u32,
) -> bool {
    if quirks.synaptics_serial
        && (hw_fingers_down > 2 || old_hw_fingers_down > 2)
        && (hw_fingers_down > quirks.num_slots as u32
            || old_hw_fingers_down > quirks.num_slots as u32)
    {
        return false;
    }
    if quirks.semi_mt && hw_fingers_down != old_hw_fingers_down {
        return false;
    }
    distance_mm > MOTION_THRESHOLD_MM
}

impl<const N: usize> TapDispatch<N> {
    /// `handle_state`: spec.md §4.4. Returns `true` to tell the caller to
    /// filter (swallow) pointer motion for this tick.
    pub fn handle_state(
        &mut self,
        host: &mut dyn TapHost,
        ctx: &TickContext,
        ticks: &[TouchTick],
    ) -> bool {
        if !self.effectively_enabled() {
            return false;
        }

        let old_hw_fingers_down = self.hw_fingers_down;
        self.hw_fingers_down = ctx.hw_fingers_down;
        let clickpad_button_fired = self.quirks.is_clickpad && ctx.button_pressed;

        if clickpad_button_fired {
            // The event itself is not tied to any one touch slot; slot 0 is
            // a placeholder, consistent with every `BUTTON` transition
            // never reading touch-specific state.
            apply_event(self, TapEvent::Button, 0, ctx.time_us, host);
        }

        for tick in ticks {
            self.handle_touch_tick(host, ctx, tick, clickpad_button_fired, old_hw_fingers_down);
        }

        self.state.filters_motion()
    }

    fn handle_touch_tick(
        &mut self,
        host: &mut dyn TapHost,
        ctx: &TickContext,
        tick: &TouchTick,
        clickpad_button_fired: bool,
        old_hw_fingers_down: u32,
    ) {
        let slot = tick.slot;

        if clickpad_button_fired {
            if let Some(t) = self.touch_mut(slot) {
                t.tap_state = TouchPhase::Dead;
            }
        }

        let (is_thumb, is_palm) = match self.touch(slot) {
            Some(t) => (t.is_thumb, t.is_palm),
            None => return,
        };

        if is_thumb {
            return;
        }

        if is_palm {
            if tick.lifecycle == TouchLifecycle::Ended {
                apply_event(self, TapEvent::PalmUp, slot, ctx.time_us, host);
            }
            return;
        }

        if !tick.in_contact {
            return;
        }

        if host.is_palm(slot) {
            apply_event(self, TapEvent::Palm, slot, ctx.time_us, host);
            if let Some(t) = self.touch_mut(slot) {
                t.is_palm = true;
                t.tap_state = TouchPhase::Dead;
            }
            if tick.lifecycle != TouchLifecycle::Began {
                self.nfingers_down = self.nfingers_down.saturating_sub(1);
            }
            return;
        }

        match tick.lifecycle {
            TouchLifecycle::Began => {
                if host.thumb_ignored_for_tap(slot) {
                    if let Some(t) = self.touch_mut(slot) {
                        t.is_thumb = true;
                    }
                    return;
                }
                if let Some(t) = self.touch_mut(slot) {
                    t.tap_state = TouchPhase::Touch;
                }
                self.nfingers_down += 1;
                apply_event(self, TapEvent::Touch, slot, ctx.time_us, host);
                if host.palm_tap_is_palm(slot) {
                    apply_event(self, TapEvent::Motion, slot, ctx.time_us, host);
                }
            }
            TouchLifecycle::Ended => {
                if tick.was_down {
                    self.nfingers_down = self.nfingers_down.saturating_sub(1);
                    apply_event(self, TapEvent::Release, slot, ctx.time_us, host);
                }
                if let Some(t) = self.touch_mut(slot) {
                    t.reset();
                }
            }
            TouchLifecycle::Updated { moved } => {
                if self.state == TapState::Idle {
                    return;
                }
                if host.thumb_ignored(slot) {
                    apply_event(self, TapEvent::Thumb, slot, ctx.time_us, host);
                } else if moved
                    && exceeds_motion_threshold(
                        tick.distance_mm,
                        self.quirks,
                        self.hw_fingers_down,
                        old_hw_fingers_down,
                    )
                {
                    for t in &mut self.touches {
                        if t.tap_state == TouchPhase::Touch {
                            t.tap_state = TouchPhase::Dead;
                        }
                    }
                    apply_event(self, TapEvent::Motion, slot, ctx.time_us, host);
                }
            }
        }
    }

    /// `tp_tap_handle_timeout`: spec.md §4.6. Injects `TIMEOUT`, then marks
    /// every still-active, non-idle touch dead: a timeout always ends the
    /// window in which a new press could be recognised.
    pub fn handle_timeout(&mut self, time_us: u64, host: &mut dyn TapHost) {
        apply_event(self, TapEvent::Timeout, 0, time_us, host);
        for t in &mut self.touches {
            if t.tap_state != TouchPhase::Idle {
                t.tap_state = TouchPhase::Dead;
            }
        }
    }
}
