//! Property-based tests for the six invariants spec.md §8 lists against
//! arbitrary touch-event sequences, using proptest to generate the
//! sequences rather than hand-writing every case.

use super::{began, ctx, ended, moved, MockHost, Vec};
use crate::dispatch::TapDispatch;
use crate::host::DeviceQuirks;
use crate::types::{Button, ButtonMap, TapState};
use proptest::prelude::*;

/// One step of a generated touch-event sequence against a single slot.
#[derive(Debug, Clone, Copy)]
enum Step {
    Begin,
    End,
    Move(u8),
    Timeout,
}

fn step_strategy() -> impl Strategy<Value = Step> {
    prop_oneof![
        Just(Step::Begin),
        Just(Step::End),
        (0u8..5).prop_map(Step::Move),
        Just(Step::Timeout),
    ]
}

fn sequence_strategy() -> impl Strategy<Value = Vec<Step>> {
    prop::collection::vec(step_strategy(), 1..40)
}

/// Applies one `step` to `disp` at `time_us`, tracking whether the single
/// slot under test is currently down so that `End` only fires when there
/// is something to end and repeated `Begin`s don't double-count a finger.
fn apply_step(disp: &mut TapDispatch, host: &mut MockHost, down: &mut bool, time_us: u64, step: Step) {
    match step {
        Step::Begin => {
            if !*down {
                disp.handle_state(host, &ctx(time_us), &[began(0)]);
                *down = true;
            }
        }
        Step::End => {
            if *down {
                disp.handle_state(host, &ctx(time_us), &[ended(0, true)]);
                *down = false;
            }
        }
        Step::Move(mm) => {
            if *down {
                disp.handle_state(host, &ctx(time_us), &[moved(0, f64::from(mm))]);
            }
        }
        Step::Timeout => {
            disp.handle_timeout(time_us, host);
        }
    }
}

/// Runs `steps` against a fresh clickpad dispatch and returns it alongside
/// the host that recorded everything it did, for inspection.
fn run(steps: &[Step]) -> (TapDispatch, MockHost) {
    let mut disp = TapDispatch::init(DeviceQuirks::clickpad());
    let mut host = MockHost::new();
    let mut down = false;
    let mut time_us = 0u64;

    for step in steps {
        time_us += 10_000;
        apply_step(&mut disp, &mut host, &mut down, time_us, *step);
    }

    (disp, host)
}

proptest! {
    /// Invariant: after `release_all`, the dispatch is fully quiescent --
    /// no state held, no fingers counted, no button left asserted --
    /// regardless of what sequence of events it was driven through first.
    #[test]
    fn release_all_is_always_quiescent(steps in sequence_strategy()) {
        let (mut disp, mut host) = run(&steps);
        disp.release_all(999_999, &mut host);
        prop_assert_eq!(disp.state(), TapState::Idle);
        prop_assert_eq!(disp.nfingers_down(), 0);
        prop_assert_eq!(disp.buttons_pressed, 0);
    }

    /// Invariant: the shared timer is never left armed while the dispatch
    /// sits in `Idle` or `Dead` -- checked after every single step, not
    /// just at the end of the sequence.
    #[test]
    fn timer_never_armed_while_quiescent(steps in sequence_strategy()) {
        let mut disp = TapDispatch::init(DeviceQuirks::clickpad());
        let mut host = MockHost::new();
        let mut down = false;
        let mut time_us = 0u64;

        for step in &steps {
            time_us += 10_000;
            apply_step(&mut disp, &mut host, &mut down, time_us, *step);
            if disp.state() == TapState::Idle || disp.state() == TapState::Dead {
                prop_assert!(!host.is_timer_armed());
            }
        }
    }

    /// Invariant: for every synthetic button, presses and releases stay
    /// balanced to at most one outstanding press at a time, and a final
    /// `release_all` brings every button back to fully released.
    #[test]
    fn presses_and_releases_stay_balanced(steps in sequence_strategy()) {
        let (mut disp, mut host) = run(&steps);

        let mut outstanding = [0i32; 3];
        for &(_, button, pressed) in &host.emissions {
            let idx = button_index(button);
            if pressed {
                outstanding[idx] += 1;
            } else {
                outstanding[idx] -= 1;
            }
            prop_assert!(
                (0..=1).contains(&outstanding[idx]),
                "button {:?} press/release count went out of balance: {}",
                button,
                outstanding[idx]
            );
        }

        disp.release_all(999_999, &mut host);
        let mut final_balance = [0i32; 3];
        for &(_, button, pressed) in &host.emissions {
            let idx = button_index(button);
            final_balance[idx] += if pressed { 1 } else { -1 };
        }
        prop_assert_eq!(final_balance, [0, 0, 0]);
    }

    /// Invariant: a map change requested mid-gesture is never observed
    /// until the dispatch returns to `Idle` and `post_process` runs.
    #[test]
    fn map_change_observable_only_at_idle(steps in sequence_strategy()) {
        let (mut disp, _host) = run(&steps);
        let original = disp.map();
        let requested = if original == ButtonMap::Lrm {
            ButtonMap::Lmr
        } else {
            ButtonMap::Lrm
        };
        disp.set_map(requested);

        let was_idle = disp.state() == TapState::Idle;
        disp.post_process();
        if was_idle {
            prop_assert_eq!(disp.map(), requested);
        } else {
            prop_assert_eq!(disp.map(), original);
            let mut host = MockHost::new();
            disp.release_all(999_999, &mut host);
            disp.post_process();
            prop_assert_eq!(disp.map(), requested);
        }
    }

    /// Invariant: a touch the host classifies as palm from its very first
    /// tick never contributes a synthetic button press, no matter what
    /// the rest of the sequence does with it.
    #[test]
    fn palm_touch_never_emits(steps in sequence_strategy()) {
        let mut disp = TapDispatch::init(DeviceQuirks::clickpad());
        let mut host = MockHost::new();
        host.set_palm(0, true);
        let mut down = false;
        let mut time_us = 0u64;

        for step in &steps {
            time_us += 10_000;
            apply_step(&mut disp, &mut host, &mut down, time_us, *step);
        }

        prop_assert!(host.emissions.is_empty());
    }

    /// Invariant: `filters_motion()` holds iff the state is one of the six
    /// states spec.md §4.4 step 4 names, checked across every state value.
    #[test]
    fn filters_motion_matches_named_state_set(state in any_tap_state()) {
        let expected = matches!(
            state,
            TapState::Touch
                | TapState::Tapped
                | TapState::Touch2
                | TapState::Touch3
                | TapState::DraggingOrDoubleTap
                | TapState::DraggingOrTap
        );
        prop_assert_eq!(state.filters_motion(), expected);
    }
}

fn button_index(button: Button) -> usize {
    match button {
        Button::Left => 0,
        Button::Right => 1,
        Button::Middle => 2,
    }
}

fn any_tap_state() -> impl Strategy<Value = TapState> {
    prop_oneof![
        Just(TapState::Idle),
        Just(TapState::Touch),
        Just(TapState::Hold),
        Just(TapState::Tapped),
        Just(TapState::Touch2),
        Just(TapState::Touch2Hold),
        Just(TapState::Touch2Release),
        Just(TapState::Touch3),
        Just(TapState::Touch3Hold),
        Just(TapState::Dragging),
        Just(TapState::DraggingWait),
        Just(TapState::DraggingOrDoubleTap),
        Just(TapState::DraggingOrTap),
        Just(TapState::Dragging2),
        Just(TapState::Dead),
    ]
}
