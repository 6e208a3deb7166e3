//! Tap-and-drag state machine for multi-touch touchpads.
//!
//! This crate implements the subsystem that turns a stream of per-finger
//! touch lifecycle events into synthetic pointer-button presses and
//! releases: taps, multi-finger taps, double-taps, drags, and drag-lock.
//! It is a pair of coupled state machines: one global ([`types::TapState`],
//! 15 values) and one per physical touch ([`touch::TouchPhase`], 3 values),
//! driven by eight event kinds ([`types::TapEvent`]).
//!
//! ```text
//!                    TOUCH                  TOUCH
//!   IDLE ─────────▶ TOUCH ─────────▶ TOUCH_2 ─────────▶ TOUCH_3
//!          ▲        │  │  ▲           │  │  ▲             │  │
//!   RELEASE│ TIMEOUT│  │  │TIMEOUT    │  │  │TIMEOUT      │  │TIMEOUT
//!          │        ▼  │  │           ▼  │  │             ▼  │
//!        (drag       HOLD             TOUCH_2_HOLD      TOUCH_3_HOLD
//!      disabled)                         ▲
//!          │                     RELEASE │
//!          ▼                             │
//!       TAPPED ◀── PALM ── TOUCH_2_RELEASE
//!          │
//!    TOUCH │
//!          ▼
//!  DRAGGING_OR_DOUBLETAP ──MOTION/TIMEOUT──▶ DRAGGING ──TOUCH──▶ DRAGGING_2
//!                                               │
//!                                     RELEASE (drag-lock)
//!                                               ▼
//!                                        DRAGGING_WAIT ──TOUCH──▶ DRAGGING_OR_TAP
//! ```
//!
//! Raw hardware decoding, palm/thumb classification, pointer-motion
//! delivery, coordinate geometry, and timer infrastructure are all out of
//! scope for this crate and are reached through the [`host::TapHost`]
//! trait; a concrete OS-backed implementation lives in the companion
//! daemon crate.
//!
//! Every state transition is logged at `trace` level when
//! `debug_assertions` are enabled, compiled out entirely in release
//! builds.

#![no_std]

extern crate alloc;

mod dispatch;
mod event_processor;
mod state_machine;
pub mod host;
pub mod timer;
pub mod touch;
pub mod types;

pub use dispatch::{TapDispatch, MAX_TOUCHES};
pub use event_processor::{exceeds_motion_threshold, MOTION_THRESHOLD_MM};
pub use host::{DeviceQuirks, TapHost, TickContext};
pub use timer::{TimerKind, DRAG_TIMEOUT_US, TAP_TIMEOUT_US};
pub use touch::{TouchLifecycle, TouchPhase, TouchTapState, TouchTick};
pub use types::{Button, ButtonMap, TapEvent, TapState};

#[cfg(test)]
mod testing;
