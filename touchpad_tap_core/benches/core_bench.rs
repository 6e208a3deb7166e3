//! Criterion benchmarks for touchpad_tap_core runtime performance
//!
//! Performance targets:
//! - Single-tick dispatch: <10μs (requirement: runs once per evdev SYN_REPORT)
//! - Motion-threshold check: <1μs (requirement: called per moving touch per tick)
//! - Full tap-and-release round trip: <50μs (requirement: two dispatch calls plus a timeout)

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use touchpad_tap_core::{
    exceeds_motion_threshold, Button, DeviceQuirks, TapDispatch, TapHost, TickContext,
    TouchLifecycle, TouchTick,
};

struct BenchHost;

impl TapHost for BenchHost {
    fn thumb_ignored_for_tap(&self, _slot: usize) -> bool {
        false
    }
    fn thumb_ignored(&self, _slot: usize) -> bool {
        false
    }
    fn palm_tap_is_palm(&self, _slot: usize) -> bool {
        false
    }
    fn is_palm(&self, _slot: usize) -> bool {
        false
    }
    fn notify_button(&mut self, _time_us: u64, _button: Button, _pressed: bool) {}
    fn arm_timer(&mut self, _deadline_us: u64) {}
    fn cancel_timer(&mut self) {}
}

fn began(slot: usize) -> TouchTick {
    TouchTick {
        slot,
        lifecycle: TouchLifecycle::Began,
        in_contact: true,
        distance_mm: 0.0,
        was_down: false,
    }
}

fn ended(slot: usize) -> TouchTick {
    TouchTick {
        slot,
        lifecycle: TouchLifecycle::Ended,
        in_contact: true,
        distance_mm: 0.0,
        was_down: true,
    }
}

fn tick(time_us: u64) -> TickContext {
    TickContext {
        time_us,
        button_pressed: false,
        hw_fingers_down: 0,
    }
}

/// Benchmark: single-finger touch-down dispatch (<10μs target)
fn benchmark_single_touch_begin(c: &mut Criterion) {
    c.bench_function("dispatch_touch_begin", |b| {
        b.iter(|| {
            let mut disp: TapDispatch = TapDispatch::init(DeviceQuirks::clickpad());
            let mut host = BenchHost;
            let filtered = disp.handle_state(&mut host, black_box(&tick(0)), black_box(&[began(0)]));
            black_box(filtered);
        })
    });
}

/// Benchmark: motion-threshold comparison (<1μs target)
fn benchmark_motion_threshold(c: &mut Criterion) {
    let quirks = DeviceQuirks::clickpad();
    c.bench_function("exceeds_motion_threshold", |b| {
        b.iter(|| {
            let result = exceeds_motion_threshold(black_box(1.8), black_box(quirks), black_box(2), black_box(2));
            black_box(result);
        })
    });
}

/// Benchmark: full tap-and-release round trip through the FSM (<50μs target)
fn benchmark_full_tap_round_trip(c: &mut Criterion) {
    c.bench_function("dispatch_full_tap_round_trip", |b| {
        b.iter(|| {
            let mut disp: TapDispatch = TapDispatch::init(DeviceQuirks::clickpad());
            let mut host = BenchHost;
            disp.handle_state(&mut host, black_box(&tick(0)), black_box(&[began(0)]));
            disp.handle_state(&mut host, black_box(&tick(50_000)), black_box(&[ended(0)]));
            disp.handle_timeout(black_box(230_000), &mut host);
            black_box(disp.state());
        })
    });
}

criterion_group!(
    benches,
    benchmark_single_touch_begin,
    benchmark_motion_threshold,
    benchmark_full_tap_round_trip
);
criterion_main!(benches);
