//! geotrail command-line interface.
//!
//! Front-end over the `geotrail` library: a live dashboard (`watch`),
//! a one-shot fix (`locate`), and a static map export (`snapshot`).

mod commands;
mod error;
mod tui_app;
mod ui;

use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Duration;

use clap::{Parser, Subcommand};

use geotrail::app::logging;

use crate::error::CliError;

#[derive(Parser)]
#[command(
    name = "geotrail",
    version = geotrail::VERSION,
    about = "Personal location viewer with trail history and bookmarks"
)]
struct Cli {
    /// More detailed logging (overridden by RUST_LOG).
    #[arg(short, long, global = true)]
    verbose: bool,

    /// gpsd address to read fixes from.
    #[arg(long, global = true, value_name = "HOST:PORT")]
    gpsd: Option<String>,

    /// Play back fixes from a JSON-lines track file instead of gpsd.
    #[arg(long, global = true, value_name = "FILE", conflicts_with = "gpsd")]
    replay: Option<PathBuf>,

    /// Path of the persisted state file.
    #[arg(long, global = true, value_name = "FILE")]
    data_file: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Follow the position continuously on an interactive dashboard.
    Watch {
        /// Seconds between fixes.
        #[arg(long, default_value_t = 1)]
        interval: u64,
    },

    /// Acquire a single fix and print it.
    Locate,

    /// Render the recorded position and trail to a PNG.
    Snapshot {
        /// Output file.
        #[arg(short, long, default_value = "geotrail.png")]
        output: PathBuf,

        /// Image width in pixels.
        #[arg(long, default_value_t = 800)]
        width: u32,

        /// Image height in pixels.
        #[arg(long, default_value_t = 600)]
        height: u32,

        /// Tile style override: standard, satellite, or terrain.
        #[arg(long)]
        style: Option<String>,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    let command = cli.command.unwrap_or(Commands::Watch { interval: 1 });

    let default_filter = if cli.verbose {
        "geotrail=debug"
    } else {
        logging::DEFAULT_FILTER
    };

    // The dashboard owns the terminal, so its logs go to a file. Every
    // other invocation logs to stderr.
    let log_dir = match command {
        Commands::Watch { .. } if atty::is(atty::Stream::Stdout) => {
            dirs::data_dir().map(|d| d.join("geotrail").join("logs"))
        }
        _ => None,
    };
    let _log_guard = logging::init(default_filter, log_dir.as_deref());

    let config = commands::resolve_config(cli.gpsd, cli.replay, cli.data_file);

    let result = match command {
        Commands::Watch { interval } => {
            let config = config.with_watch_interval(Duration::from_secs(interval.max(1)));
            commands::watch::run(config)
        }
        Commands::Locate => commands::locate::run(config),
        Commands::Snapshot {
            output,
            width,
            height,
            style,
        } => {
            let config = config.with_snapshot(
                geotrail::map::SnapshotConfig::default().with_size(width, height),
            );
            commands::snapshot::run(config, output, style)
        }
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            report_error(&e);
            ExitCode::FAILURE
        }
    }
}

fn report_error(error: &CliError) {
    eprintln!("Error: {}", error);
    if let CliError::NoFix(_) = error {
        eprintln!("Check that gpsd is running, or pass --replay with a track file.");
    }
}
