//! NatLog CLI.
//!
//! Front end for the entailment search engine:
//!
//! - `natlog search`: run CoNLL queries from a stream against a mutation
//!   graph and knowledge base, one JSON response line per query
//! - `natlog hash`: print fact hashes for a tree stream
//! - `natlog kb build`: hash a tree stream into a knowledge base file
//!
//! `%` directive lines inside a query stream override search options for
//! the queries that follow. Logging goes to stderr; results go to stdout.

use clap::{Parser, Subcommand};
use tracing::error;
use tracing_subscriber::{fmt, EnvFilter};

mod commands;
mod directives;
mod error;
mod input;

use error::CliError;

/// Natural-logic entailment search over a knowledge base of fact hashes.
#[derive(Parser)]
#[command(name = "natlog")]
#[command(version)]
#[command(propagate_version = true)]
struct Cli {
    /// Verbosity level (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run queries against a graph and knowledge base
    Search(commands::search::SearchArgs),
    /// Print fact hashes for a tree stream
    Hash(commands::hash::HashArgs),
    /// Knowledge base maintenance
    Kb {
        #[command(subcommand)]
        action: commands::kb::KbCommands,
    },
}

fn main() {
    let cli = Cli::parse();

    let filter = match cli.verbose {
        0 => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    };
    fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_level(true)
        .with_writer(std::io::stderr)
        .init();

    let result: Result<(), CliError> = match cli.command {
        Commands::Search(args) => commands::search::handle(&args),
        Commands::Hash(args) => commands::hash::handle(&args),
        Commands::Kb { action } => commands::kb::handle(&action),
    };

    if let Err(err) = result {
        error!(%err, "command failed");
        std::process::exit(err.exit_code());
    }
}
