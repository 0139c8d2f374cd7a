//! Lingo CLI - multi-language tutorial viewer.
//!
//! Provides commands for:
//! - `list`: List languages, or the entries of one language
//! - `search`: Search titles, section headings and section text across languages
//! - `show`: Read an entry in the terminal
//! - `render`: Render an entry to HTML
//! - `progress`: Show or change reading progress

mod commands;
mod error;
mod output;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use commands::{CommonArgs, ListArgs, ProgressArgs, RenderArgs, SearchArgs, ShowArgs};
use error::CliError;
use output::Output;

/// Lingo - multi-language tutorial viewer.
#[derive(Parser)]
#[command(name = "lingo", version, about)]
struct Cli {
    #[command(flatten)]
    common: CommonArgs,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List languages, or the entries of one language.
    List(ListArgs),
    /// Search across every language.
    Search(SearchArgs),
    /// Show an entry in the terminal.
    Show(ShowArgs),
    /// Render an entry to HTML.
    Render(RenderArgs),
    /// Show or change reading progress.
    Progress(ProgressArgs),
}

fn main() {
    let cli = Cli::parse();
    let output = Output::new();

    // --verbose enables INFO level, otherwise use RUST_LOG or default to WARN
    let filter = if cli.common.verbose {
        EnvFilter::new("info")
    } else {
        EnvFilter::from_default_env()
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let common = &cli.common;
    let result = match cli.command {
        Commands::List(args) => args.execute(common),
        Commands::Search(args) => args.execute(common),
        Commands::Show(args) => args.execute(common),
        Commands::Render(args) => tokio::runtime::Runtime::new()
            .map_err(CliError::from)
            .and_then(|rt| rt.block_on(args.execute(common))),
        Commands::Progress(args) => args.execute(common),
    };

    if let Err(err) = result {
        output.error(&format!("Error: {err}"));
        std::process::exit(1);
    }
}
