//! Simulation CLI command: replay a touch-event script through
//! `touchpad_tap_core` with no hardware involved, printing the button events
//! the FSM would have emitted.
//!
//! The touchpad analogue of `keyrx_daemon::cli::simulate`, which replays a
//! key-event DSL through the remapping engine instead of a touch script.

use std::path::PathBuf;

use clap::Args;
use serde::{Deserialize, Serialize};
use touchpad_tap_core::{
    Button, DeviceQuirks, TapDispatch, TapHost, TapState, TickContext, TouchLifecycle, TouchTick,
    MAX_TOUCHES,
};

use crate::error::{CliError, DaemonResult};

#[derive(Args)]
pub struct SimulateArgs {
    /// Inline event script, e.g. "0:begin:0;50000:end:0;230000:timeout".
    #[arg(long, conflicts_with = "events_file")]
    pub events: Option<String>,

    /// Event script file (JSON array of events).
    #[arg(long, conflicts_with = "events")]
    pub events_file: Option<PathBuf>,

    /// Treat the simulated device as a clickpad (no physical left button).
    /// This is the default; pass `--no-clickpad` to simulate a traditional
    /// touchpad with separate buttons instead.
    #[arg(long, default_value_t = true, action = clap::ArgAction::Set)]
    pub clickpad: bool,

    /// Enable drag-lock on the simulated dispatch.
    #[arg(long)]
    pub drag_lock: bool,

    /// Output as JSON instead of a human-readable transcript.
    #[arg(long)]
    pub json: bool,
}

/// One entry in a touch-event script.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct SimEvent {
    pub time_us: u64,
    pub kind: SimEventKind,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "type")]
pub enum SimEventKind {
    Begin { slot: usize },
    Move { slot: usize, distance_mm: f64 },
    End { slot: usize },
    Timeout,
}

#[derive(Debug, Clone, Serialize)]
struct EmittedButton {
    time_us: u64,
    button: &'static str,
    pressed: bool,
}

#[derive(Debug, Serialize)]
struct SimulationOutput {
    final_state: &'static str,
    emitted: Vec<EmittedButton>,
}

const fn button_name(button: Button) -> &'static str {
    match button {
        Button::Left => "left",
        Button::Right => "right",
        Button::Middle => "middle",
    }
}

struct SimHost {
    emissions: Vec<EmittedButton>,
}

impl SimHost {
    fn new() -> Self {
        SimHost {
            emissions: Vec::new(),
        }
    }
}

impl TapHost for SimHost {
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
    fn notify_button(&mut self, time_us: u64, button: Button, pressed: bool) {
        self.emissions.push(EmittedButton {
            time_us,
            button: button_name(button),
            pressed,
        });
    }
    fn arm_timer(&mut self, _deadline_us: u64) {}
    fn cancel_timer(&mut self) {}
}

pub fn execute(args: SimulateArgs) -> DaemonResult<()> {
    let events = if let Some(path) = &args.events_file {
        load_events_from_file(path)?
    } else if let Some(dsl) = &args.events {
        parse_event_dsl(dsl)?
    } else {
        return Err(CliError::InvalidScript(
            "either --events or --events-file must be given".to_string(),
        )
        .into());
    };

    let quirks = if args.clickpad {
        DeviceQuirks::clickpad()
    } else {
        DeviceQuirks::plain()
    };
    let mut disp: TapDispatch = TapDispatch::init(quirks);
    disp.set_drag_lock_enabled(args.drag_lock);
    let mut host = SimHost::new();
    let mut down_counted = [false; MAX_TOUCHES];

    for event in &events {
        match event.kind {
            SimEventKind::Begin { slot } => {
                down_counted[slot] = true;
                let ctx = TickContext {
                    time_us: event.time_us,
                    button_pressed: false,
                    hw_fingers_down: hw_fingers_down(&down_counted),
                };
                let tick = TouchTick {
                    slot,
                    lifecycle: TouchLifecycle::Began,
                    in_contact: true,
                    distance_mm: 0.0,
                    was_down: false,
                };
                disp.handle_state(&mut host, &ctx, &[tick]);
            }
            SimEventKind::Move { slot, distance_mm } => {
                let ctx = TickContext {
                    time_us: event.time_us,
                    button_pressed: false,
                    hw_fingers_down: hw_fingers_down(&down_counted),
                };
                let tick = TouchTick {
                    slot,
                    lifecycle: TouchLifecycle::Updated { moved: true },
                    in_contact: true,
                    distance_mm,
                    was_down: down_counted[slot],
                };
                disp.handle_state(&mut host, &ctx, &[tick]);
            }
            SimEventKind::End { slot } => {
                let tick = TouchTick {
                    slot,
                    lifecycle: TouchLifecycle::Ended,
                    in_contact: true,
                    distance_mm: 0.0,
                    was_down: down_counted[slot],
                };
                down_counted[slot] = false;
                let ctx = TickContext {
                    time_us: event.time_us,
                    button_pressed: false,
                    hw_fingers_down: hw_fingers_down(&down_counted),
                };
                disp.handle_state(&mut host, &ctx, &[tick]);
            }
            SimEventKind::Timeout => {
                disp.handle_timeout(event.time_us, &mut host);
            }
        }
    }

    if args.json {
        let output = SimulationOutput {
            final_state: disp.state().as_str(),
            emitted: host.emissions,
        };
        println!(
            "{}",
            serde_json::to_string_pretty(&output).map_err(CliError::Json)?
        );
    } else {
        println!("Simulated {} event(s).", events.len());
        println!();
        println!("Emitted button events:");
        for e in &host.emissions {
            println!(
                "  [{:>8} us] {} {}",
                e.time_us,
                e.button,
                if e.pressed { "press" } else { "release" }
            );
        }
        println!();
        println!("Final state: {}", disp.state());
    }

    Ok(())
}

/// Parses a `;`-separated list of `time:kind[:args]` tokens, e.g.
/// `"0:begin:0;50000:end:0;230000:timeout"`.
fn parse_event_dsl(dsl: &str) -> Result<Vec<SimEvent>, CliError> {
    dsl.split(';')
        .filter(|s| !s.trim().is_empty())
        .map(parse_token)
        .collect()
}

fn parse_token(token: &str) -> Result<SimEvent, CliError> {
    let parts: Vec<&str> = token.trim().split(':').collect();
    let bad = |msg: &str| CliError::InvalidScript(format!("{} in \"{}\"", msg, token));

    let time_us: u64 = parts
        .first()
        .ok_or_else(|| bad("missing timestamp"))?
        .parse()
        .map_err(|_| bad("invalid timestamp"))?;
    let kind_name = *parts.get(1).ok_or_else(|| bad("missing event kind"))?;

    let kind = match kind_name {
        "begin" => SimEventKind::Begin {
            slot: parse_slot(&parts, &bad)?,
        },
        "end" => SimEventKind::End {
            slot: parse_slot(&parts, &bad)?,
        },
        "move" => {
            let slot = parse_slot(&parts, &bad)?;
            let distance_mm: f64 = parts
                .get(3)
                .ok_or_else(|| bad("missing move distance"))?
                .parse()
                .map_err(|_| bad("invalid move distance"))?;
            SimEventKind::Move { slot, distance_mm }
        }
        "timeout" => SimEventKind::Timeout,
        other => return Err(bad(&format!("unknown event kind \"{}\"", other))),
    };

    Ok(SimEvent { time_us, kind })
}

fn parse_slot(
    parts: &[&str],
    bad: &dyn Fn(&str) -> CliError,
) -> Result<usize, CliError> {
    parts
        .get(2)
        .ok_or_else(|| bad("missing slot index"))?
        .parse()
        .map_err(|_| bad("invalid slot index"))
}

fn hw_fingers_down(down_counted: &[bool; MAX_TOUCHES]) -> u32 {
    down_counted.iter().filter(|&&d| d).count() as u32
}

fn load_events_from_file(path: &PathBuf) -> Result<Vec<SimEvent>, CliError> {
    let contents = std::fs::read_to_string(path).map_err(|source| CliError::EventFile {
        path: path.clone(),
        source,
    })?;
    serde_json::from_str(&contents).map_err(CliError::from)
}
