//! The single shared tap timer, implemented as a deadline the event loop
//! polls for rather than a dedicated OS timer object.
//!
//! `nix`'s `timerfd` support needs a feature this workspace does not pull
//! in; instead the event loop computes `poll(2)`'s timeout argument from
//! whatever deadline is armed here, the same way a `select`-based reactor
//! would derive its wait interval from a min-heap of deadlines — except
//! there is only ever one deadline, because spec.md's timer is a single
//! shared slot (§4.6).

/// Tracks at most one absolute deadline, in microseconds on the same clock
/// the rest of the tap subsystem uses.
#[derive(Debug, Default, Clone, Copy)]
pub struct PollTimer {
    deadline_us: Option<u64>,
}

impl PollTimer {
    pub const fn new() -> Self {
        PollTimer { deadline_us: None }
    }

    /// Arms the timer, overwriting any existing deadline (spec.md §4.6:
    /// `libinput_timer_set` always wins over whatever was pending).
    pub fn arm(&mut self, deadline_us: u64) {
        self.deadline_us = Some(deadline_us);
    }

    /// Idempotent; a no-op if unarmed.
    pub fn cancel(&mut self) {
        self.deadline_us = None;
    }

    pub const fn is_armed(&self) -> bool {
        self.deadline_us.is_some()
    }

    /// The `poll(2)` timeout, in milliseconds, that will wake the event
    /// loop no later than the armed deadline. `None` means "wait
    /// indefinitely", the correct value both when nothing is armed and
    /// when the deadline has already passed (the caller should treat a
    /// zero-length wait the same as an immediate expiry check).
    pub fn poll_timeout_ms(&self, now_us: u64) -> Option<i32> {
        let deadline = self.deadline_us?;
        if deadline <= now_us {
            return Some(0);
        }
        let remaining_us = deadline - now_us;
        let remaining_ms = remaining_us.div_ceil(1_000);
        Some(remaining_ms.min(i32::MAX as u64) as i32)
    }

    /// If the armed deadline has been reached, disarms and returns the
    /// expired deadline. Call this after every `poll(2)` return, whether
    /// or not it returned due to the timeout.
    pub fn check_expired(&mut self, now_us: u64) -> Option<u64> {
        let deadline = self.deadline_us?;
        if now_us >= deadline {
            self.deadline_us = None;
            Some(deadline)
        } else {
            None
        }
    }
}
