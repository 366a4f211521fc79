//! reportkit CLI - Report rendering.
//!
//! Provides commands for:
//! - `render`: Render report files into the output directory
//! - `pattern`: Show how a link pattern is parsed

mod commands;
mod document;
mod error;
mod output;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use commands::{PatternArgs, RenderArgs};
use output::Output;

/// reportkit - Report rendering.
#[derive(Parser)]
#[command(name = "reportkit", version, about)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Render report files.
    Render(RenderArgs),
    /// Parse a link pattern and print its segments.
    Pattern(PatternArgs),
}

fn main() {
    let cli = Cli::parse();
    let output = Output::new();

    let verbose = matches!(&cli.command, Commands::Render(args) if args.verbose);

    // --verbose enables INFO level, otherwise use RUST_LOG or default to WARN
    let filter = if verbose {
        EnvFilter::new("info")
    } else {
        EnvFilter::from_default_env()
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let result = match cli.command {
        Commands::Render(args) => args.execute(),
        Commands::Pattern(args) => args.execute(),
    };

    if let Err(err) = result {
        output.error(&format!("Error: {err}"));
        std::process::exit(1);
    }
}
