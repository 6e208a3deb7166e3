//! A recording [`TapHost`] used by every test in this module.

use super::Vec;
use crate::dispatch::MAX_TOUCHES;
use crate::host::TapHost;
use crate::types::Button;

/// Records every button emission and the current timer deadline, and lets
/// tests program per-slot classification predicates.
pub(crate) struct MockHost {
    pub(crate) emissions: Vec<(u64, Button, bool)>,
    pub(crate) timer_deadline: Option<u64>,
    thumb_ignored_for_tap: [bool; MAX_TOUCHES],
    thumb_ignored: [bool; MAX_TOUCHES],
    palm_tap_is_palm: [bool; MAX_TOUCHES],
    is_palm: [bool; MAX_TOUCHES],
}

impl MockHost {
    pub(crate) fn new() -> Self {
        MockHost {
            emissions: Vec::new(),
            timer_deadline: None,
            thumb_ignored_for_tap: [false; MAX_TOUCHES],
            thumb_ignored: [false; MAX_TOUCHES],
            palm_tap_is_palm: [false; MAX_TOUCHES],
            is_palm: [false; MAX_TOUCHES],
        }
    }

    pub(crate) fn set_palm(&mut self, slot: usize, value: bool) {
        self.is_palm[slot] = value;
    }

    pub(crate) fn set_thumb_ignored_for_tap(&mut self, slot: usize, value: bool) {
        self.thumb_ignored_for_tap[slot] = value;
    }

    pub(crate) fn set_thumb_ignored(&mut self, slot: usize, value: bool) {
        self.thumb_ignored[slot] = value;
    }

    pub(crate) fn set_palm_tap_is_palm(&mut self, slot: usize, value: bool) {
        self.palm_tap_is_palm[slot] = value;
    }

    pub(crate) fn is_timer_armed(&self) -> bool {
        self.timer_deadline.is_some()
    }
}

impl TapHost for MockHost {
    fn thumb_ignored_for_tap(&self, slot: usize) -> bool {
        self.thumb_ignored_for_tap.get(slot).copied().unwrap_or(false)
    }

    fn thumb_ignored(&self, slot: usize) -> bool {
        self.thumb_ignored.get(slot).copied().unwrap_or(false)
    }

    fn palm_tap_is_palm(&self, slot: usize) -> bool {
        self.palm_tap_is_palm.get(slot).copied().unwrap_or(false)
    }

    fn is_palm(&self, slot: usize) -> bool {
        self.is_palm.get(slot).copied().unwrap_or(false)
    }

    fn notify_button(&mut self, time_us: u64, button: Button, pressed: bool) {
        self.emissions.push((time_us, button, pressed));
    }

    fn arm_timer(&mut self, deadline_us: u64) {
        self.timer_deadline = Some(deadline_us);
    }

    fn cancel_timer(&mut self) {
        self.timer_deadline = None;
    }
}
