//! Config CLI command.
//!
//! The tap config surface has no persistence (spec.md places "configuration
//! plumbing and persistence" out of scope), so this subcommand is a
//! dry-run: it builds a `TapDispatch` the way the daemon would at startup
//! for a given device/flag combination and prints the resulting effective
//! configuration. It does not talk to a running daemon.

use clap::{Args, ValueEnum};
use touchpad_tap_core::{ButtonMap, DeviceQuirks, TapDispatch, TapHost, Button};

use crate::error::DaemonResult;

#[derive(Args)]
pub struct ConfigArgs {
    /// Treat the device as a clickpad (no physical left button).
    #[arg(long)]
    pub clickpad: bool,

    /// Force tapping on or off, overriding the device-derived default.
    #[arg(long)]
    pub enabled: Option<bool>,

    /// Finger-count-to-button mapping.
    #[arg(long, value_enum, default_value_t = MapArg::Lrm)]
    pub map: MapArg,

    /// Enable tap-and-drag.
    #[arg(long, default_value_t = true, action = clap::ArgAction::Set)]
    pub drag: bool,

    /// Enable drag-lock.
    #[arg(long)]
    pub drag_lock: bool,
}

#[derive(Clone, Copy, ValueEnum)]
pub enum MapArg {
    Lrm,
    Lmr,
}

impl From<MapArg> for ButtonMap {
    fn from(m: MapArg) -> Self {
        match m {
            MapArg::Lrm => ButtonMap::Lrm,
            MapArg::Lmr => ButtonMap::Lmr,
        }
    }
}

struct NullHost;

impl TapHost for NullHost {
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

pub fn execute(args: ConfigArgs) -> DaemonResult<()> {
    let quirks = if args.clickpad {
        DeviceQuirks::clickpad()
    } else {
        DeviceQuirks::plain()
    };
    let mut disp: TapDispatch = TapDispatch::init(quirks);

    if let Some(enabled) = args.enabled {
        let mut host = NullHost;
        disp.set_enabled(enabled, 0, &mut host);
    }
    disp.set_map(args.map.into());
    disp.post_process();
    disp.set_drag_enabled(args.drag);
    disp.set_drag_lock_enabled(args.drag_lock);

    println!("Effective tap configuration:");
    println!("  enabled:     {}", disp.enabled());
    println!("  map:         {:?}", disp.map());
    println!("  drag:        {}", disp.drag_enabled());
    println!("  drag_lock:   {}", disp.drag_lock_enabled());
    println!("  max fingers: {}", disp.count());
    println!();
    println!("(derived from --clickpad={}; no on-disk config is persisted.)", args.clickpad);

    Ok(())
}
