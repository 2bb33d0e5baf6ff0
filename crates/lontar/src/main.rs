//! Lontar CLI - bilingual rich text renderer.
//!
//! Provides commands for:
//! - `render`: Render a rich text body from JSON to HTML
//! - `resolve`: Resolve a bilingual text or list field

mod commands;
mod error;
mod input;
mod output;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use commands::{RenderArgs, ResolveArgs};
use output::Output;

/// Lontar - bilingual rich text renderer.
#[derive(Parser)]
#[command(name = "lontar", version, about)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Render a rich text body to HTML.
    Render(RenderArgs),
    /// Resolve a bilingual field for a display language.
    Resolve(ResolveArgs),
}

fn main() {
    let cli = Cli::parse();
    let output = Output::new();

    // --verbose enables INFO level, otherwise use RUST_LOG or default to WARN
    let verbose = matches!(&cli.command, Commands::Render(args) if args.verbose);
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
        Commands::Resolve(args) => args.execute(),
    };

    if let Err(err) = result {
        output.error(&format!("Error: {err}"));
        std::process::exit(1);
    }
}
