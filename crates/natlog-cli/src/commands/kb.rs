//! `natlog kb`: knowledge base maintenance.

use std::fs::File;
use std::path::PathBuf;

use clap::{Args, Subcommand};
use tracing::{debug, info};

use natlog_core::{write_fact_hashes, DependencyTree};

use crate::error::CliError;
use crate::input::{parse_items, read_input, InputItem};

#[derive(Subcommand, Debug)]
pub enum KbCommands {
    /// Hash a tree stream into a fact-hash file.
    Build(BuildArgs),
}

#[derive(Args, Debug)]
pub struct BuildArgs {
    /// Output fact-hash file.
    #[arg(long)]
    pub output: PathBuf,

    /// Tree stream; stdin when omitted.
    #[arg(long)]
    pub input: Option<PathBuf>,
}

pub fn handle(command: &KbCommands) -> Result<(), CliError> {
    match command {
        KbCommands::Build(args) => build(args),
    }
}

fn build(args: &BuildArgs) -> Result<(), CliError> {
    let input = read_input(args.input.as_deref())?;
    let hashes = collect_hashes(&input)?;
    write_fact_hashes(File::create(&args.output)?, &hashes)?;
    info!(
        facts = hashes.len(),
        path = %args.output.display(),
        "wrote knowledge base"
    );
    println!("{}", serde_json::json!({ "facts": hashes.len() }));
    Ok(())
}

pub(crate) fn collect_hashes(input: &str) -> Result<Vec<u64>, CliError> {
    let mut hashes = Vec::new();
    for item in parse_items(input) {
        match item {
            InputItem::Directive { line, text } => {
                debug!(line, directive = %text, "ignoring directive");
            }
            InputItem::Block { text, .. } => {
                hashes.push(DependencyTree::from_conll(&text)?.hash());
            }
        }
    }
    Ok(hashes)
}
