//! touchpad_tap_daemon - tap-and-drag daemon for multitouch touchpads
//!
//! Intercepts a touchpad's multitouch events via evdev, runs them through
//! `touchpad_tap_core`'s tap-and-drag FSM, and emits synthetic button
//! clicks through a virtual uinput pointer.
//!
//! # Subcommands
//!
//! - `run`: start the daemon against a real touchpad (Linux only)
//! - `devices`: list multitouch touchpads and their detected quirks
//! - `simulate`: replay a touch-event script with no hardware involved
//! - `config`: print the effective tap configuration for a set of flags

use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};

use touchpad_tap_daemon::cli::{config, devices, simulate};

#[derive(Parser)]
#[command(name = "touchpad_tap_daemon")]
#[command(version, about = "Tap-and-drag daemon for multitouch touchpads")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the daemon against a real touchpad.
    Run {
        /// Device node to use, e.g. /dev/input/event5. Autodetected if
        /// omitted.
        #[arg(long, value_name = "PATH")]
        device: Option<PathBuf>,

        /// Enable debug logging.
        #[arg(short, long)]
        debug: bool,
    },

    /// List multitouch touchpads and the quirks this daemon would derive
    /// for each one.
    Devices(devices::DevicesArgs),

    /// Replay a touch-event script with no hardware involved.
    Simulate(simulate::SimulateArgs),

    /// Print the effective tap configuration for a given set of flags.
    Config(config::ConfigArgs),
}

fn main() {
    let cli = Cli::parse();

    let debug = matches!(&cli.command, Commands::Run { debug: true, .. });
    let level = if debug { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();

    let result = match cli.command {
        Commands::Run { device, .. } => run_daemon(device.as_deref()),
        Commands::Devices(args) => devices::execute(args),
        Commands::Simulate(args) => simulate::execute(args),
        Commands::Config(args) => config::execute(args),
    };

    if let Err(e) = result {
        eprintln!("error: {}", e);
        process::exit(1);
    }
}

#[cfg(target_os = "linux")]
fn run_daemon(device: Option<&std::path::Path>) -> touchpad_tap_daemon::error::DaemonResult<()> {
    touchpad_tap_daemon::daemon::run(device)
}

#[cfg(not(target_os = "linux"))]
fn run_daemon(_device: Option<&std::path::Path>) -> touchpad_tap_daemon::error::DaemonResult<()> {
    eprintln!("The 'run' command is only available on Linux.");
    Ok(())
}
