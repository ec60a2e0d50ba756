//! tickbar CLI - Turn daily tick files into windowed OHLCV bars.

use anyhow::Result;
use clap::{CommandFactory, Parser, Subcommand};
use std::path::PathBuf;
use tickbar_lib::DEFAULT_DATE_OFFSET;
use tracing_subscriber::EnvFilter;

mod commands;
mod display;

use display::Format;

#[derive(Parser)]
#[command(name = "tickbar")]
#[command(about = "Clean daily tick files and aggregate them into OHLCV bars", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Verbosity level (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Quiet mode (suppress progress output)
    #[arg(short, long, global = true)]
    quiet: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Aggregate ticks into OHLCV bars over a time window
    Bars {
        /// Directory holding one tick file per day
        #[arg(short, long)]
        data: PathBuf,

        /// Window start (YYYY-MM-DD[ HH:MM:SS[.ffffff]])
        #[arg(short, long)]
        start: String,

        /// Window end, exclusive (YYYY-MM-DD[ HH:MM:SS[.ffffff]])
        #[arg(short, long)]
        end: String,

        /// Bucket width (e.g., 90s, 5m, 1h30m, 1d)
        #[arg(short, long)]
        interval: String,

        /// Output file path. Defaults to bars_<start>_<end>_<interval>.<format>
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Output format
        #[arg(short, long, value_enum, default_value = "csv")]
        format: Format,

        /// Worker threads (defaults to available parallelism)
        #[arg(short, long)]
        workers: Option<usize>,

        /// Byte offset of the YYYYMMDD date in each file name
        #[arg(long, default_value_t = DEFAULT_DATE_OFFSET)]
        date_offset: usize,
    },

    /// Load, clean, and deduplicate ticks without aggregating
    Clean {
        /// Directory holding one tick file per day
        #[arg(short, long)]
        data: PathBuf,

        /// Write the cleaned ticks to this file
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Output format
        #[arg(short, long, value_enum, default_value = "csv")]
        format: Format,

        /// Worker threads (defaults to available parallelism)
        #[arg(short, long)]
        workers: Option<usize>,

        /// Byte offset of the YYYYMMDD date in each file name
        #[arg(long, default_value_t = DEFAULT_DATE_OFFSET)]
        date_offset: usize,
    },

    /// List the source files found in a data directory
    Sources {
        /// Directory holding one tick file per day
        #[arg(short, long)]
        data: PathBuf,

        /// Byte offset of the YYYYMMDD date in each file name
        #[arg(long, default_value_t = DEFAULT_DATE_OFFSET)]
        date_offset: usize,
    },
}

/// Installs the global tracing subscriber.
///
/// `RUST_LOG` wins when set; otherwise the level follows `-v` and `-q`.
fn init_tracing(verbose: u8, quiet: bool) {
    let level = match (quiet, verbose) {
        (true, _) => "error",
        (false, 0) => "warn",
        (false, 1) => "info",
        (false, 2) => "debug",
        (false, _) => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Show help if no command provided
    let Some(command) = cli.command else {
        Cli::command().print_help()?;
        return Ok(());
    };

    init_tracing(cli.verbose, cli.quiet);

    match command {
        Commands::Bars {
            data,
            start,
            end,
            interval,
            output,
            format,
            workers,
            date_offset,
        } => commands::bars::bars(&commands::bars::BarsArgs {
            data,
            start,
            end,
            interval,
            output,
            format,
            workers,
            date_offset,
            quiet: cli.quiet,
        }),
        Commands::Clean {
            data,
            output,
            format,
            workers,
            date_offset,
        } => commands::clean::clean(&data, output, format, workers, date_offset, cli.quiet),
        Commands::Sources { data, date_offset } => {
            commands::sources::list_sources(&data, date_offset)
        }
    }
}
