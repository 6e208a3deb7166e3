//! Core enumerations for the tap-and-drag state machine.
//!
//! This module contains the foundational types shared by every other module
//! in the crate:
//! - [`TapState`] - the 15 states of the global tap FSM
//! - [`TapEvent`] - the 8 event kinds that drive the FSM
//! - [`Button`] / [`ButtonMap`] - synthetic pointer buttons and the two
//!   supported finger-count-to-button mappings

/// State of the global tap-and-drag state machine.
///
/// There are exactly 15 states. `Idle` and `Dead` are the only states in
/// which the shared timer must not be armed (see
/// [`TapState::is_quiescent`]).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum TapState {
    /// No touches, no pending decision.
    #[default]
    Idle,
    /// One finger down, waiting for release or timeout.
    Touch,
    /// One finger held past the tap timeout; no tap will be emitted.
    Hold,
    /// A single-finger tap was emitted and the button is held pending a
    /// possible drag (a second touch within the tap timeout).
    Tapped,
    /// Two fingers down.
    Touch2,
    /// Two fingers held past the tap timeout.
    Touch2Hold,
    /// First of two fingers released; waiting on the second.
    Touch2Release,
    /// Three fingers down.
    Touch3,
    /// Three fingers held past the tap timeout.
    Touch3Hold,
    /// Dragging: the left button is held down while a second touch moves
    /// the pointer.
    Dragging,
    /// Drag-lock grace period after the dragging finger lifted.
    DraggingWait,
    /// A tap happened while dragging; ambiguous between double-tap and
    /// drag continuation until motion, timeout, or release disambiguates.
    DraggingOrDoubleTap,
    /// Drag-lock grace period ended with a new touch; ambiguous between a
    /// tap that ends the drag and a touch that resumes it.
    DraggingOrTap,
    /// A second finger touched down while dragging.
    Dragging2,
    /// Sink state: drains remaining fingers without emitting anything.
    Dead,
}

impl TapState {
    /// Returns `true` for the two states in which the shared timer must be
    /// cancelled (invariant 2 in spec.md §3).
    pub const fn is_quiescent(&self) -> bool {
        matches!(self, TapState::Idle | TapState::Dead)
    }

    /// Returns `true` iff motion should be filtered (swallowed) this tick,
    /// per spec.md §4.4 step 4.
    pub const fn filters_motion(&self) -> bool {
        matches!(
            self,
            TapState::Touch
                | TapState::Tapped
                | TapState::Touch2
                | TapState::Touch3
                | TapState::DraggingOrDoubleTap
                | TapState::DraggingOrTap
        )
    }

    /// Returns `true` iff the state counts as "dragging" for the external
    /// `dragging()` query (spec.md §6).
    pub const fn is_dragging(&self) -> bool {
        matches!(
            self,
            TapState::Dragging
                | TapState::Dragging2
                | TapState::DraggingWait
                | TapState::DraggingOrTap
        )
    }

    /// Returns the state name as a static string, for trace logging.
    pub const fn as_str(&self) -> &'static str {
        match self {
            TapState::Idle => "Idle",
            TapState::Touch => "Touch",
            TapState::Hold => "Hold",
            TapState::Tapped => "Tapped",
            TapState::Touch2 => "Touch2",
            TapState::Touch2Hold => "Touch2Hold",
            TapState::Touch2Release => "Touch2Release",
            TapState::Touch3 => "Touch3",
            TapState::Touch3Hold => "Touch3Hold",
            TapState::Dragging => "Dragging",
            TapState::DraggingWait => "DraggingWait",
            TapState::DraggingOrDoubleTap => "DraggingOrDoubleTap",
            TapState::DraggingOrTap => "DraggingOrTap",
            TapState::Dragging2 => "Dragging2",
            TapState::Dead => "Dead",
        }
    }
}

impl core::fmt::Display for TapState {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Event kinds consumed by the global tap FSM (spec.md §4.1).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TapEvent {
    /// A new finger began this tick (after palm/thumb filtering).
    Touch,
    /// An active touch moved past the motion threshold, or a begin-tick
    /// touch was immediately classified as a potential palm.
    Motion,
    /// An active touch ended.
    Release,
    /// The scheduled timer expired.
    Timeout,
    /// A physical clickpad button press was observed.
    Button,
    /// An active touch was reclassified as a thumb.
    Thumb,
    /// An active touch was reclassified as a palm.
    Palm,
    /// A previously classified palm was released.
    PalmUp,
}

impl TapEvent {
    /// Returns the event name as a static string, for trace logging.
    pub const fn as_str(&self) -> &'static str {
        match self {
            TapEvent::Touch => "Touch",
            TapEvent::Motion => "Motion",
            TapEvent::Release => "Release",
            TapEvent::Timeout => "Timeout",
            TapEvent::Button => "Button",
            TapEvent::Thumb => "Thumb",
            TapEvent::Palm => "Palm",
            TapEvent::PalmUp => "PalmUp",
        }
    }
}

impl core::fmt::Display for TapEvent {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A synthetic pointer button.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Button {
    Left,
    Right,
    Middle,
}

/// The two supported finger-count-to-button mappings (spec.md §3).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ButtonMap {
    /// 1 finger -> left, 2 -> right, 3 -> middle.
    #[default]
    Lrm,
    /// 1 finger -> left, 2 -> middle, 3 -> right.
    Lmr,
}

impl ButtonMap {
    /// Resolves a finger count (1..=3) to a button under this map.
    ///
    /// Returns `None` for finger counts outside 1..=3 (spec.md §4.3: higher
    /// finger counts are dropped silently).
    pub const fn button_for(&self, nfingers: u8) -> Option<Button> {
        let table: [Button; 3] = match self {
            ButtonMap::Lrm => [Button::Left, Button::Right, Button::Middle],
            ButtonMap::Lmr => [Button::Left, Button::Middle, Button::Right],
        };
        match nfingers {
            1 => Some(table[0]),
            2 => Some(table[1]),
            3 => Some(table[2]),
            _ => None,
        }
    }
}
