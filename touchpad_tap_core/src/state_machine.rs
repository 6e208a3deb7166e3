//! The global tap FSM: the 15-state x 8-event transition table (spec.md
//! §4.2). This is the largest single component of the crate.
//!
//! The C original this was distilled from implements one switch-over-events
//! function per state (`tp_tap_idle_handle_event`, `tp_tap_touch_handle_event`,
//! ...). A single nested match over `(state, event)` gets the same
//! exhaustiveness guarantee from the compiler without 15 near-identical
//! functions, so that is the shape used here: one outer match arm per
//! state, one inner match arm per event. A handful of transitions also
//! guard on the specific touch's own sub-state (`TOUCH_3 + RELEASE`,
//! `TOUCH_2_RELEASE + TOUCH`) -- those guards are written explicitly rather
//! than folded into the match, per the coupling called out below.
//!
//! The single shared timer is a true singleton: arming it always overwrites
//! any existing deadline, never queues a second one. That overwrite is load
//! -bearing for `TOUCH_2 + PALM`, which resets the deadline to the palm
//! event's own time, i.e. "now", not to either touch's saved press time.

use crate::dispatch::TapDispatch;
use crate::host::TapHost;
use crate::timer::{DRAG_TIMEOUT_US, TAP_TIMEOUT_US};
use crate::touch::TouchPhase;
use crate::types::{TapEvent, TapState};

#[cfg(debug_assertions)]
macro_rules! log_transition {
    ($from:expr, $event:expr, $to:expr) => {
        log::trace!("tap: {} + {} -> {}", $from, $event, $to);
    };
}

#[cfg(not(debug_assertions))]
macro_rules! log_transition {
    ($from:expr, $event:expr, $to:expr) => {};
}

#[cfg(debug_assertions)]
macro_rules! log_bug {
    ($from:expr, $event:expr) => {
        log::debug!(
            "tap: impossible transition {} + {} (bug, ignored)",
            $from,
            $event
        );
    };
}

#[cfg(not(debug_assertions))]
macro_rules! log_bug {
    ($from:expr, $event:expr) => {};
}

/// `emit(n, timestamp, pressed)`: spec.md §4.3.
pub(crate) fn emit<const N: usize>(
    disp: &mut TapDispatch<N>,
    host: &mut dyn TapHost,
    n: u8,
    time_us: u64,
    pressed: bool,
) {
    let Some(button) = disp.map.button_for(n) else {
        return;
    };
    if pressed {
        disp.buttons_pressed |= 1 << n;
    } else {
        disp.buttons_pressed &= !(1 << n);
    }
    host.notify_button(time_us, button, pressed);
}

fn arm_tap(host: &mut dyn TapHost, base_time_us: u64) {
    host.arm_timer(base_time_us + TAP_TIMEOUT_US);
}

fn arm_drag(host: &mut dyn TapHost, base_time_us: u64) {
    host.arm_timer(base_time_us + DRAG_TIMEOUT_US);
}

fn cancel(host: &mut dyn TapHost) {
    host.cancel_timer();
}

/// Applies one FSM event and returns the resulting state. `slot` is the
/// per-touch sub-state of the specific slot the event is about (spec.md
/// §9's "per-touch state coupling" note) -- passed by index rather than by
/// reference since a handful of transitions need to read or write the
/// touch's state interleaved with reads of `disp`'s own fields.
pub(crate) fn apply_event<const N: usize>(
    disp: &mut TapDispatch<N>,
    event: TapEvent,
    slot: usize,
    time_us: u64,
    host: &mut dyn TapHost,
) {
    let from = disp.state;
    let to = match (from, event) {
        // ---- IDLE ----
        (TapState::Idle, TapEvent::Touch) => {
            disp.saved_press_time = time_us;
            arm_tap(host, time_us);
            TapState::Touch
        }
        (TapState::Idle, TapEvent::Button) => TapState::Dead,
        (TapState::Idle, TapEvent::Palm) => TapState::Idle,
        (TapState::Idle, TapEvent::Motion) | (TapState::Idle, TapEvent::Thumb) => {
            log_bug!(from, event);
            TapState::Idle
        }
        (TapState::Idle, _) => TapState::Idle,

        // ---- TOUCH ----
        (TapState::Touch, TapEvent::Touch) => {
            disp.saved_press_time = time_us;
            arm_tap(host, time_us);
            TapState::Touch2
        }
        (TapState::Touch, TapEvent::Release) => {
            emit(disp, host, 1, disp.saved_press_time, true);
            if disp.drag_enabled {
                disp.saved_release_time = time_us;
                arm_tap(host, time_us);
                TapState::Tapped
            } else {
                emit(disp, host, 1, time_us, false);
                TapState::Idle
            }
        }
        (TapState::Touch, TapEvent::Motion) => {
            if let Some(t) = disp.touch_mut(slot) {
                t.tap_state = TouchPhase::Dead;
            }
            cancel(host);
            TapState::Dead
        }
        (TapState::Touch, TapEvent::Timeout) => {
            cancel(host);
            TapState::Hold
        }
        (TapState::Touch, TapEvent::Button) => TapState::Dead,
        (TapState::Touch, TapEvent::Thumb) => {
            if let Some(t) = disp.touch_mut(slot) {
                t.is_thumb = true;
                t.tap_state = TouchPhase::Dead;
            }
            disp.nfingers_down = disp.nfingers_down.saturating_sub(1);
            cancel(host);
            TapState::Idle
        }
        (TapState::Touch, TapEvent::Palm) => {
            cancel(host);
            TapState::Idle
        }
        (TapState::Touch, _) => TapState::Touch,

        // ---- HOLD ----
        (TapState::Hold, TapEvent::Touch) => {
            arm_tap(host, time_us);
            TapState::Touch2
        }
        (TapState::Hold, TapEvent::Release) => TapState::Idle,
        (TapState::Hold, TapEvent::Motion) => TapState::Dead,
        (TapState::Hold, TapEvent::Button) => TapState::Dead,
        (TapState::Hold, TapEvent::Thumb) => {
            if let Some(t) = disp.touch_mut(slot) {
                t.is_thumb = true;
                t.tap_state = TouchPhase::Dead;
            }
            disp.nfingers_down = disp.nfingers_down.saturating_sub(1);
            TapState::Idle
        }
        (TapState::Hold, TapEvent::Palm) => TapState::Idle,
        (TapState::Hold, _) => TapState::Hold,

        // ---- TAPPED ----
        (TapState::Tapped, TapEvent::Touch) => {
            disp.saved_press_time = time_us;
            arm_tap(host, time_us);
            TapState::DraggingOrDoubleTap
        }
        (TapState::Tapped, TapEvent::Timeout) => {
            emit(disp, host, 1, disp.saved_release_time, false);
            TapState::Idle
        }
        (TapState::Tapped, TapEvent::Button) => {
            emit(disp, host, 1, disp.saved_release_time, false);
            TapState::Dead
        }
        (TapState::Tapped, TapEvent::Motion)
        | (TapState::Tapped, TapEvent::Release)
        | (TapState::Tapped, TapEvent::Thumb) => {
            log_bug!(from, event);
            TapState::Tapped
        }
        (TapState::Tapped, _) => TapState::Tapped,

        // ---- TOUCH_2 ----
        (TapState::Touch2, TapEvent::Touch) => {
            arm_tap(host, time_us);
            TapState::Touch3
        }
        (TapState::Touch2, TapEvent::Release) => {
            disp.saved_release_time = time_us;
            arm_tap(host, time_us);
            TapState::Touch2Release
        }
        (TapState::Touch2, TapEvent::Motion) => TapState::Dead,
        (TapState::Touch2, TapEvent::Timeout) => TapState::Touch2Hold,
        (TapState::Touch2, TapEvent::Button) => TapState::Dead,
        (TapState::Touch2, TapEvent::Palm) => {
            // Re-arm from the palm event's own time, not from
            // `saved_press_time` -- in TOUCH_2 that field holds the second
            // finger's press time, not this event's.
            arm_tap(host, time_us);
            TapState::Touch
        }
        (TapState::Touch2, TapEvent::Thumb) => TapState::Touch2,
        (TapState::Touch2, _) => TapState::Touch2,

        // ---- TOUCH_2_HOLD ----
        (TapState::Touch2Hold, TapEvent::Touch) => {
            arm_tap(host, time_us);
            TapState::Touch3
        }
        (TapState::Touch2Hold, TapEvent::Release) => TapState::Hold,
        (TapState::Touch2Hold, TapEvent::Motion) => TapState::Dead,
        (TapState::Touch2Hold, TapEvent::Button) => TapState::Dead,
        (TapState::Touch2Hold, TapEvent::Palm) => TapState::Hold,
        (TapState::Touch2Hold, _) => TapState::Touch2Hold,

        // ---- TOUCH_2_RELEASE ----
        (TapState::Touch2Release, TapEvent::Touch) => {
            if let Some(t) = disp.touch_mut(slot) {
                t.tap_state = TouchPhase::Dead;
            }
            cancel(host);
            TapState::Touch2Hold
        }
        (TapState::Touch2Release, TapEvent::Release) => {
            emit(disp, host, 2, disp.saved_press_time, true);
            emit(disp, host, 2, disp.saved_release_time, false);
            TapState::Idle
        }
        (TapState::Touch2Release, TapEvent::Motion) => TapState::Dead,
        (TapState::Touch2Release, TapEvent::Timeout) => TapState::Hold,
        (TapState::Touch2Release, TapEvent::Button) => TapState::Dead,
        (TapState::Touch2Release, TapEvent::Palm) => {
            // Open question (spec.md §9): there is only one saved-press-time
            // slot, and it may already hold the palm's own press time rather
            // than the finger's, since both overwrite the same field. The
            // timestamp on this emitted press is whatever that slot last
            // held; a second slot is deliberately not introduced.
            emit(disp, host, 1, disp.saved_press_time, true);
            if disp.drag_enabled {
                disp.saved_release_time = time_us;
                arm_tap(host, time_us);
                TapState::Tapped
            } else {
                emit(disp, host, 1, time_us, false);
                TapState::Idle
            }
        }
        (TapState::Touch2Release, _) => TapState::Touch2Release,

        // ---- TOUCH_3 ----
        (TapState::Touch3, TapEvent::Touch) => {
            cancel(host);
            TapState::Dead
        }
        (TapState::Touch3, TapEvent::Motion) => TapState::Dead,
        (TapState::Touch3, TapEvent::Timeout) => {
            cancel(host);
            TapState::Touch3Hold
        }
        (TapState::Touch3, TapEvent::Release) => {
            let still_touch = disp
                .touch(slot)
                .map(|t| t.tap_state == TouchPhase::Touch)
                .unwrap_or(false);
            if still_touch {
                emit(disp, host, 3, disp.saved_press_time, true);
                emit(disp, host, 3, time_us, false);
            }
            TapState::Touch2Hold
        }
        (TapState::Touch3, TapEvent::Button) => TapState::Dead,
        (TapState::Touch3, TapEvent::Palm) => TapState::Touch2,
        (TapState::Touch3, _) => TapState::Touch3,

        // ---- TOUCH_3_HOLD ----
        (TapState::Touch3Hold, TapEvent::Touch) => {
            arm_tap(host, time_us);
            TapState::Dead
        }
        (TapState::Touch3Hold, TapEvent::Release) => TapState::Touch2Hold,
        (TapState::Touch3Hold, TapEvent::Motion) => TapState::Dead,
        (TapState::Touch3Hold, TapEvent::Button) => TapState::Dead,
        (TapState::Touch3Hold, TapEvent::Palm) => TapState::Touch2Hold,
        (TapState::Touch3Hold, _) => TapState::Touch3Hold,

        // ---- DRAGGING_OR_DOUBLETAP ----
        (TapState::DraggingOrDoubleTap, TapEvent::Touch) => TapState::Dragging2,
        (TapState::DraggingOrDoubleTap, TapEvent::Release) => {
            emit(disp, host, 1, disp.saved_release_time, false);
            emit(disp, host, 1, disp.saved_press_time, true);
            disp.saved_release_time = time_us;
            arm_tap(host, time_us);
            TapState::Tapped
        }
        (TapState::DraggingOrDoubleTap, TapEvent::Motion)
        | (TapState::DraggingOrDoubleTap, TapEvent::Timeout) => TapState::Dragging,
        (TapState::DraggingOrDoubleTap, TapEvent::Button) => {
            emit(disp, host, 1, disp.saved_release_time, false);
            TapState::Dead
        }
        (TapState::DraggingOrDoubleTap, TapEvent::Palm) => TapState::Tapped,
        (TapState::DraggingOrDoubleTap, _) => TapState::DraggingOrDoubleTap,

        // ---- DRAGGING ----
        (TapState::Dragging, TapEvent::Touch) => TapState::Dragging2,
        (TapState::Dragging, TapEvent::Release) => {
            if disp.drag_lock_enabled {
                arm_drag(host, time_us);
                TapState::DraggingWait
            } else {
                emit(disp, host, 1, time_us, false);
                TapState::Idle
            }
        }
        (TapState::Dragging, TapEvent::Motion) | (TapState::Dragging, TapEvent::Timeout) => {
            TapState::Dragging
        }
        (TapState::Dragging, TapEvent::Button) => {
            emit(disp, host, 1, time_us, false);
            TapState::Dead
        }
        (TapState::Dragging, TapEvent::Palm) => {
            emit(disp, host, 1, disp.saved_release_time, false);
            TapState::Idle
        }
        (TapState::Dragging, _) => TapState::Dragging,

        // ---- DRAGGING_WAIT ----
        (TapState::DraggingWait, TapEvent::Touch) => {
            arm_tap(host, time_us);
            TapState::DraggingOrTap
        }
        (TapState::DraggingWait, TapEvent::Timeout) => {
            emit(disp, host, 1, time_us, false);
            TapState::Idle
        }
        (TapState::DraggingWait, TapEvent::Button) => {
            emit(disp, host, 1, time_us, false);
            TapState::Dead
        }
        (TapState::DraggingWait, _) => TapState::DraggingWait,

        // ---- DRAGGING_OR_TAP ----
        (TapState::DraggingOrTap, TapEvent::Touch) => {
            cancel(host);
            TapState::Dragging2
        }
        (TapState::DraggingOrTap, TapEvent::Release) => {
            emit(disp, host, 1, time_us, false);
            TapState::Idle
        }
        (TapState::DraggingOrTap, TapEvent::Motion)
        | (TapState::DraggingOrTap, TapEvent::Timeout) => TapState::Dragging,
        (TapState::DraggingOrTap, TapEvent::Button) => {
            emit(disp, host, 1, time_us, false);
            TapState::Dead
        }
        (TapState::DraggingOrTap, TapEvent::Palm) => {
            emit(disp, host, 1, disp.saved_release_time, false);
            TapState::Idle
        }
        (TapState::DraggingOrTap, _) => TapState::DraggingOrTap,

        // ---- DRAGGING_2 ----
        (TapState::Dragging2, TapEvent::Release) => TapState::Dragging,
        (TapState::Dragging2, TapEvent::Touch) => {
            emit(disp, host, 1, time_us, false);
            TapState::Dead
        }
        (TapState::Dragging2, TapEvent::Motion) | (TapState::Dragging2, TapEvent::Timeout) => {
            TapState::Dragging2
        }
        (TapState::Dragging2, TapEvent::Button) => {
            emit(disp, host, 1, time_us, false);
            TapState::Dead
        }
        (TapState::Dragging2, TapEvent::Palm) => TapState::DraggingOrDoubleTap,
        (TapState::Dragging2, _) => TapState::Dragging2,

        // ---- DEAD ----
        (TapState::Dead, TapEvent::Release)
        | (TapState::Dead, TapEvent::Palm)
        | (TapState::Dead, TapEvent::PalmUp) => {
            if disp.nfingers_down == 0 {
                TapState::Idle
            } else {
                TapState::Dead
            }
        }
        (TapState::Dead, _) => TapState::Dead,
    };

    if to != from {
        log_transition!(from, event, to);
    }
    disp.state = to;

    // Belt-and-braces (spec.md §4.2 closing rule / §3 invariant 2): the
    // timer must never be left armed in IDLE or DEAD.
    if disp.state.is_quiescent() {
        host.cancel_timer();
    }
}
