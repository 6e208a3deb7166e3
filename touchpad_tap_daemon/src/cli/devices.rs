//! Device enumeration CLI command: lists multitouch touchpads visible
//! under `/dev/input` and the `DeviceQuirks` this daemon would derive for
//! each one.

use clap::Args;

use crate::error::DaemonResult;

#[derive(Args)]
pub struct DevicesArgs {
    /// Output as JSON.
    #[arg(long)]
    pub json: bool,
}

#[cfg(target_os = "linux")]
pub fn execute(args: DevicesArgs) -> DaemonResult<()> {
    use serde::Serialize;

    use crate::platform::linux::device;

    #[derive(Serialize)]
    struct DeviceRow {
        path: String,
        name: String,
        synaptics_serial: bool,
        semi_mt: bool,
        num_slots: u8,
        is_clickpad: bool,
        has_physical_left_button: bool,
    }

    let touchpads = device::enumerate_touchpads()?;

    if args.json {
        let rows: Vec<DeviceRow> = touchpads
            .iter()
            .map(|t| DeviceRow {
                path: t.path.display().to_string(),
                name: t.name.clone(),
                synaptics_serial: t.quirks.synaptics_serial,
                semi_mt: t.quirks.semi_mt,
                num_slots: t.quirks.num_slots,
                is_clickpad: t.quirks.is_clickpad,
                has_physical_left_button: t.quirks.has_physical_left_button,
            })
            .collect();
        println!("{}", serde_json::to_string_pretty(&rows).map_err(crate::error::CliError::from)?);
        return Ok(());
    }

    if touchpads.is_empty() {
        println!("No multitouch touchpads found.");
        println!();
        println!("This could mean:");
        println!("  - No touchpad is connected");
        println!("  - Permission denied to read /dev/input/event*");
        println!();
        println!("Add your user to the 'input' group: sudo usermod -aG input $USER");
        return Ok(());
    }

    println!("Multitouch touchpads:");
    println!();
    for t in &touchpads {
        println!("{}  {}", t.path.display(), t.name);
        println!(
            "    clickpad={} semi_mt={} synaptics_serial={} slots={} physical_left_button={}",
            t.quirks.is_clickpad,
            t.quirks.semi_mt,
            t.quirks.synaptics_serial,
            t.quirks.num_slots,
            t.quirks.has_physical_left_button,
        );
        println!(
            "    tapping enabled by default: {}",
            !t.quirks.has_physical_left_button
        );
    }

    Ok(())
}

#[cfg(not(target_os = "linux"))]
pub fn execute(_args: DevicesArgs) -> DaemonResult<()> {
    eprintln!("The 'devices' command is only available on Linux.");
    Ok(())
}
