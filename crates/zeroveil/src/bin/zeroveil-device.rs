//! Print the local device capability report.
//!
//! Usage: `zeroveil-device [--json]`

use anyhow::{bail, Context, Result};
use tracing::info;
use zeroveil::{detect_device_capabilities, print_device_info};

fn init_tracing() {
    use tracing_subscriber::{fmt, prelude::*, EnvFilter};

    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info,zeroveil=debug"));

    tracing_subscriber::registry()
        .with(fmt::layer().with_target(true).with_writer(std::io::stderr))
        .with(filter)
        .init();
}

fn main() -> Result<()> {
    init_tracing();

    let mut json = false;
    for arg in std::env::args().skip(1) {
        match arg.as_str() {
            "--json" => json = true,
            "-h" | "--help" => {
                println!("Usage: zeroveil-device [--json]");
                return Ok(());
            }
            "-V" | "--version" => {
                println!("zeroveil-device {}", zeroveil::VERSION);
                return Ok(());
            }
            other => bail!("unknown argument: {other}"),
        }
    }

    info!("ZeroVeil device detection v{}", zeroveil::VERSION);

    if json {
        let result = detect_device_capabilities();
        let output =
            serde_json::to_string_pretty(&result).context("failed to serialize device report")?;
        println!("{output}");
    } else {
        print_device_info();
    }

    Ok(())
}
