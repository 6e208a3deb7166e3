//! Per-touch observation state owned by the tap subsystem within each
//! upstream touch slot.

/// Sub-state of a single physical touch, from the tap subsystem's point of
/// view (spec.md §3).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum TouchPhase {
    /// Not currently tracked by the tap FSM.
    #[default]
    Idle,
    /// Actively tracked; can still demote peers on motion.
    Touch,
    /// Dead to tapping for the remainder of its physical lifetime.
    Dead,
}

impl TouchPhase {
    pub const fn is_touch(&self) -> bool {
        matches!(self, TouchPhase::Touch)
    }
}

/// Per-touch-slot state the tap subsystem keeps alongside the upstream
/// dispatcher's own touch bookkeeping.
///
/// `is_palm` and `is_thumb` are sticky for the remaining life of the touch:
/// once set, the synthesiser skips the touch entirely except for the single
/// `PALM_UP` it injects when a palm-classified touch ends (spec.md §4.4.c).
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct TouchTapState {
    pub tap_state: TouchPhase,
    pub is_palm: bool,
    pub is_thumb: bool,
}

impl TouchTapState {
    pub const fn new() -> Self {
        TouchTapState {
            tap_state: TouchPhase::Idle,
            is_palm: false,
            is_thumb: false,
        }
    }

    /// Resets to brand-new-touch state. Used when a slot is recycled after
    /// its owning touch fully ends (`NONE`).
    pub fn reset(&mut self) {
        *self = TouchTapState::new();
    }

    /// Marks the touch dead to tapping and sticky-palm, as done on
    /// suspend/resume and `release_all` (spec.md §4.7).
    pub fn mark_palm_dead(&mut self) {
        self.is_palm = true;
        self.tap_state = TouchPhase::Dead;
    }
}

/// What happened to a physical touch slot this tick, as reported by the
/// upstream dispatcher (the event-decoding layer that is out of scope for
/// this crate).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TouchLifecycle {
    /// The touch began contact this tick.
    Began,
    /// The touch is still down; `moved` says whether its raw point changed.
    Updated { moved: bool },
    /// The touch ended contact this tick.
    Ended,
}

/// One dirty touch slot fed into the per-tick synthesiser (spec.md §4.4).
#[derive(Debug, Clone, Copy)]
pub struct TouchTick {
    /// Stable slot index, used to keep iteration order deterministic.
    pub slot: usize,
    pub lifecycle: TouchLifecycle,
    /// `false` if the touch is merely hovering (not in physical contact).
    pub in_contact: bool,
    /// Raw distance from this touch's initial point, in millimetres, as
    /// computed by the external coordinate-geometry helper. The hardware
    /// quirk suppression (synaptics-serial / semi-mt) is applied by this
    /// crate's own motion-threshold check, not by the caller.
    /// Irrelevant (and ignored) unless `lifecycle` is `Updated`.
    pub distance_mm: f64,
    /// Was this touch ever counted in `nfingers_down` while it was alive.
    pub was_down: bool,
}
