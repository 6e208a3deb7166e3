//! The six literal scenarios from spec.md §8, with the documented
//! defaults: `TAP_TIMEOUT=180ms`, `DRAG_TIMEOUT=300ms`, `LRM` map, drag
//! enabled, drag-lock disabled (unless a scenario says otherwise).

use super::*;
use crate::host::DeviceQuirks;

fn dispatch() -> TapDispatch {
    TapDispatch::init(DeviceQuirks::clickpad())
}

/// Scenario 1: single-finger tap. begin(0) -> end(50ms) -> timeout(230ms).
#[test]
fn scenario_1_single_finger_tap() {
    let mut disp = dispatch();
    let mut host = MockHost::new();
    disp.handle_state(&mut host, &ctx(0), &[began(0)]);
    disp.handle_state(&mut host, &ctx(50_000), &[ended(0, true)]);
    assert_eq!(disp.state(), TapState::Tapped);
    disp.handle_timeout(230_000, &mut host);
    assert_eq!(disp.state(), TapState::Idle);
    assert_eq!(
        &host.emissions[..],
        &[(0, Button::Left, true), (50_000, Button::Left, false)]
    );
}

/// Scenario 2: two-finger tap.
#[test]
fn scenario_2_two_finger_tap() {
    let mut disp = dispatch();
    let mut host = MockHost::new();
    disp.handle_state(&mut host, &ctx(0), &[began(0)]);
    disp.handle_state(&mut host, &ctx(10_000), &[began(1)]);
    assert_eq!(disp.state(), TapState::Touch2);
    disp.handle_state(&mut host, &ctx(40_000), &[ended(0, true)]);
    assert_eq!(disp.state(), TapState::Touch2Release);
    disp.handle_state(&mut host, &ctx(50_000), &[ended(1, true)]);
    assert_eq!(disp.state(), TapState::Idle);
    // saved_press_time is a single slot overwritten by TOUCH -> TOUCH_2
    // (the second touch's own begin time, 10ms), not the first touch's;
    // the same single-slot-overwrite behavior documented for
    // TOUCH_2_RELEASE + PALM applies here.
    assert_eq!(
        &host.emissions[..],
        &[(10_000, Button::Right, true), (40_000, Button::Right, false)]
    );
}

/// Scenario 3: three-finger tap, all begin within 30ms and end within
/// 80ms. Only the first end emits; the rest drain silently.
#[test]
fn scenario_3_three_finger_tap() {
    let mut disp = dispatch();
    let mut host = MockHost::new();
    disp.handle_state(&mut host, &ctx(0), &[began(0)]);
    disp.handle_state(&mut host, &ctx(15_000), &[began(1)]);
    disp.handle_state(&mut host, &ctx(30_000), &[began(2)]);
    assert_eq!(disp.state(), TapState::Touch3);
    disp.handle_state(&mut host, &ctx(60_000), &[ended(0, true)]);
    assert_eq!(disp.state(), TapState::Touch2Hold);
    assert_eq!(
        &host.emissions[..],
        &[(15_000, Button::Middle, true), (60_000, Button::Middle, false)]
    );
    let emitted_before = host.emissions.len();
    disp.handle_state(&mut host, &ctx(70_000), &[ended(1, true)]);
    disp.handle_state(&mut host, &ctx(80_000), &[ended(2, true)]);
    assert_eq!(
        host.emissions.len(),
        emitted_before,
        "draining the remaining two fingers emits nothing further"
    );
}

/// Scenario 5: motion cancels the tap. begin(0) -> moves 2mm by 80ms ->
/// end(120ms). No emissions; the FSM passes TOUCH -> DEAD -> IDLE.
#[test]
fn scenario_5_motion_cancels_tap() {
    let mut disp = dispatch();
    let mut host = MockHost::new();
    disp.handle_state(&mut host, &ctx(0), &[began(0)]);
    disp.handle_state(&mut host, &ctx(80_000), &[moved(0, 2.0)]);
    assert_eq!(disp.state(), TapState::Dead);
    disp.handle_state(&mut host, &ctx(120_000), &[ended(0, true)]);
    assert_eq!(disp.state(), TapState::Idle);
    assert!(host.emissions.is_empty());
}

/// Scenario 6: drag-lock. A tap-and-drag sequence ends the drag into
/// `DRAGGING_WAIT`; a resumption tap within the grace period walks
/// `DRAGGING_WAIT -> DRAGGING_OR_TAP -> IDLE` and releases on its own end.
#[test]
fn scenario_6_drag_lock_resumption_tap_releases() {
    let mut disp = dispatch();
    disp.set_drag_lock_enabled(true);
    let mut host = MockHost::new();

    // Tap-and-drag into DRAGGING (scenario 4's shape): a short first touch,
    // a second touch that starts a drag, motion confirms the drag.
    disp.handle_state(&mut host, &ctx(0), &[began(0)]);
    disp.handle_state(&mut host, &ctx(50_000), &[ended(0, true)]);
    assert_eq!(disp.state(), TapState::Tapped);
    disp.handle_state(&mut host, &ctx(100_000), &[began(1)]);
    assert_eq!(disp.state(), TapState::DraggingOrDoubleTap);
    disp.handle_state(&mut host, &ctx(150_000), &[moved(1, 2.0)]);
    assert_eq!(disp.state(), TapState::Dragging);

    // The dragging finger lifts: with drag-lock enabled this parks in
    // DRAGGING_WAIT instead of releasing immediately.
    disp.handle_state(&mut host, &ctx(300_000), &[ended(1, true)]);
    assert_eq!(disp.state(), TapState::DraggingWait);

    // A new touch within the grace period resumes the drag-or-tap window.
    disp.handle_state(&mut host, &ctx(450_000), &[began(2)]);
    assert_eq!(disp.state(), TapState::DraggingOrTap);
    let before = host.emissions.len();
    disp.handle_state(&mut host, &ctx(500_000), &[ended(2, true)]);
    assert_eq!(disp.state(), TapState::Idle);
    assert_eq!(
        &host.emissions[before..],
        &[(500_000, Button::Left, false)]
    );
}

/// Scenario 6 (timeout branch): if no touch arrives during the drag-lock
/// grace window, the timer fires and releases.
#[test]
fn scenario_6_drag_lock_timeout_releases() {
    let mut disp = dispatch();
    disp.set_drag_lock_enabled(true);
    let mut host = MockHost::new();
    disp.handle_state(&mut host, &ctx(0), &[began(0)]);
    disp.handle_state(&mut host, &ctx(50_000), &[ended(0, true)]);
    disp.handle_state(&mut host, &ctx(100_000), &[began(1)]);
    disp.handle_state(&mut host, &ctx(150_000), &[moved(1, 2.0)]);
    disp.handle_state(&mut host, &ctx(300_000), &[ended(1, true)]);
    assert_eq!(disp.state(), TapState::DraggingWait);
    let before = host.emissions.len();
    disp.handle_timeout(600_000, &mut host);
    assert_eq!(disp.state(), TapState::Idle);
    assert_eq!(&host.emissions[before..], &[(600_000, Button::Left, false)]);
}
