//! Test utilities for the tap-and-drag subsystem.
//!
//! This module provides a mock [`TapHost`](crate::host::TapHost) that
//! records emitted button events and the armed/cancelled timer state, plus
//! shared helpers for constructing touch ticks.

pub(crate) use alloc::vec::Vec;

pub(crate) use super::*;

mod host_mock;
mod proptest_invariants;
mod scenarios;

pub(crate) use host_mock::MockHost;

/// Builds a single-slot `TouchTick` for the common case of one touch
/// beginning, updating, or ending this tick.
pub(crate) fn began(slot: usize) -> TouchTick {
    TouchTick {
        slot,
        lifecycle: TouchLifecycle::Began,
        in_contact: true,
        distance_mm: 0.0,
        was_down: false,
    }
}

pub(crate) fn ended(slot: usize, was_down: bool) -> TouchTick {
    TouchTick {
        slot,
        lifecycle: TouchLifecycle::Ended,
        in_contact: true,
        distance_mm: 0.0,
        was_down,
    }
}

pub(crate) fn moved(slot: usize, distance_mm: f64) -> TouchTick {
    TouchTick {
        slot,
        lifecycle: TouchLifecycle::Updated { moved: true },
        in_contact: true,
        distance_mm,
        was_down: true,
    }
}

pub(crate) fn ctx(time_us: u64) -> TickContext {
    TickContext {
        time_us,
        button_pressed: false,
        hw_fingers_down: 0,
    }
}
