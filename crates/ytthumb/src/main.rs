//! ytthumb CLI - link YouTube videos by their cached thumbnail.
//!
//! Provides commands for:
//! - `process`: Replace `.. youtube::` directives in rendered HTML files
//! - `fetch`: Download thumbnails into the cache without touching any page

mod commands;
mod error;
mod output;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use commands::{FetchArgs, ProcessArgs};
use output::Output;

/// ytthumb - YouTube thumbnails for static sites.
#[derive(Parser)]
#[command(name = "ytthumb", version, about)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Replace video directives in rendered HTML files.
    Process(ProcessArgs),
    /// Download thumbnails for the given video IDs.
    Fetch(FetchArgs),
}

impl Commands {
    fn verbose(&self) -> bool {
        match self {
            Self::Process(args) => args.common.verbose,
            Self::Fetch(args) => args.common.verbose,
        }
    }
}

/// `--verbose` enables INFO level, otherwise use `RUST_LOG` or default to WARN.
fn log_filter(verbose: bool) -> EnvFilter {
    if verbose {
        EnvFilter::new("info")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    }
}

fn main() {
    let cli = Cli::parse();
    let output = Output::new();

    tracing_subscriber::fmt()
        .with_env_filter(log_filter(cli.command.verbose()))
        .with_writer(std::io::stderr)
        .init();

    let result = match cli.command {
        Commands::Process(args) => args.execute(),
        Commands::Fetch(args) => args.execute(),
    };

    if let Err(err) = result {
        output.error(&format!("Error: {err}"));
        std::process::exit(1);
    }
}
