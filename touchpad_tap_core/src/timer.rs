//! Timeout constants for the single shared timer (spec.md §4.1).
//!
//! The dispatch arms at most one deadline at a time; arming while already
//! armed overwrites it (see `state_machine` module docs for why a priority
//! queue would be wrong here).

/// Tap and double-tap window: 180 ms.
pub const TAP_TIMEOUT_US: u64 = 180_000;

/// Drag-lock grace period: 300 ms.
pub const DRAG_TIMEOUT_US: u64 = 300_000;

/// Which deadline was last armed, purely for trace logging — the FSM
/// itself only ever tracks the single resulting deadline via the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerKind {
    Tap,
    Drag,
}

impl TimerKind {
    pub const fn period_us(&self) -> u64 {
        match self {
            TimerKind::Tap => TAP_TIMEOUT_US,
            TimerKind::Drag => DRAG_TIMEOUT_US,
        }
    }
}
