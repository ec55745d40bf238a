//! tickbox entry point.
//!
//! # Usage
//!
//! ```bash
//! # Serve the counter on the default port
//! tickbox
//!
//! # Different port, with logs written to a file
//! tickbox --port 9000 --log-file tickbox.log --log-level debug
//! ```
//!
//! Connect with `nc localhost 7777` and press Enter to get the counter.

use std::{fs::File, net::IpAddr, path::PathBuf, sync::Mutex};

use clap::Parser;
use tickbox_tui::{Config, config::DEFAULT_PORT};
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Counter in a terminal box, served to one TCP client
#[derive(Parser, Debug)]
#[command(name = "tickbox")]
#[command(about = "Counter in a terminal box, served to one TCP client")]
#[command(version)]
struct Args {
    /// TCP port to listen on
    #[arg(short, long, default_value_t = DEFAULT_PORT)]
    port: u16,

    /// Interface address to listen on
    #[arg(long, default_value = "0.0.0.0")]
    bind: IpAddr,

    /// Write logs to this file (logging is off otherwise, the terminal is
    /// taken by the box)
    #[arg(long)]
    log_file: Option<PathBuf>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, default_value = "info")]
    log_level: String,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    if let Some(path) = &args.log_file {
        let file = File::create(path)?;
        let filter =
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&args.log_level));

        tracing_subscriber::registry()
            .with(fmt::layer().with_writer(Mutex::new(file)).with_ansi(false))
            .with(filter)
            .init();
    }

    tracing::info!("tickbox starting");

    let config = Config { bind: args.bind, port: args.port, ..Config::default() };
    if let Err(e) = tickbox_tui::run(&config) {
        tracing::error!(error = %e, "tickbox failed");
        return Err(e.into());
    }

    tracing::info!("tickbox stopped");
    Ok(())
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory;

    use super::*;

    #[test]
    fn cli_is_well_formed() {
        Args::command().debug_assert();
    }

    #[test]
    fn defaults() {
        let args = Args::parse_from(["tickbox"]);
        assert_eq!(args.port, 7777);
        assert_eq!(args.bind.to_string(), "0.0.0.0");
        assert!(args.log_file.is_none());
    }

    #[test]
    fn port_override() {
        let args = Args::parse_from(["tickbox", "-p", "9000"]);
        assert_eq!(args.port, 9000);
    }
}
