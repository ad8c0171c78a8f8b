//! `natlog hash`: print fact hashes for a tree stream.

use std::io::Write;
use std::path::PathBuf;

use clap::Args;
use tracing::debug;

use natlog_core::DependencyTree;

use crate::error::CliError;
use crate::input::{parse_items, read_input, InputItem};

#[derive(Args, Debug)]
pub struct HashArgs {
    /// Tree stream; stdin when omitted.
    #[arg(long)]
    pub input: Option<PathBuf>,
}

pub fn handle(args: &HashArgs) -> Result<(), CliError> {
    let input = read_input(args.input.as_deref())?;
    let mut stdout = std::io::stdout().lock();
    hash_blocks(&input, &mut stdout)
}

pub(crate) fn hash_blocks(input: &str, out: &mut impl Write) -> Result<(), CliError> {
    for item in parse_items(input) {
        match item {
            // Directives carry no meaning here.
            InputItem::Directive { line, text } => {
                debug!(line, directive = %text, "ignoring directive");
            }
            InputItem::Block { text, .. } => {
                let tree = DependencyTree::from_conll(&text)?;
                writeln!(out, "{}", serde_json::json!({ "fact_hash": tree.hash() }))?;
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn identical_trees_hash_identically() {
        let mut out = Vec::new();
        hash_blocks("1\t0\troot\n\n1\t0\troot\n", &mut out).unwrap();
        let text = String::from_utf8(out).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0], lines[1]);
    }

    #[test]
    fn directives_are_skipped() {
        let mut out = Vec::new();
        hash_blocks("%policy soft\n1\t0\troot\n", &mut out).unwrap();
        assert_eq!(String::from_utf8(out).unwrap().lines().count(), 1);
    }
}
