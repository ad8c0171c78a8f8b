//! `natlog search`: run a query stream against a graph and knowledge base.

use std::fs::File;
use std::io::{BufReader, Write};
use std::path::PathBuf;

use clap::Args;
use tracing::{debug, info};

use natlog_core::{DependencyTree, HashSetKb, InMemoryGraph, KnowledgeBase, MutationGraph};
use natlog_search::{search, search_concurrent, SearchOptions};

use crate::directives;
use crate::error::CliError;
use crate::input::{parse_items, read_input, InputItem};

#[derive(Args, Debug)]
pub struct SearchArgs {
    /// Mutation graph TSV file.
    #[arg(long)]
    pub graph: PathBuf,

    /// Knowledge base fact-hash file.
    #[arg(long)]
    pub kb: PathBuf,

    /// Query stream; stdin when omitted.
    #[arg(long)]
    pub input: Option<PathBuf>,

    /// Use the three-worker engine instead of the sequential one.
    #[arg(long)]
    pub concurrent: bool,

    /// Cost policy: strict, intermediate, or soft.
    #[arg(long)]
    pub policy: Option<String>,

    /// Frontier strategy: ucs or fifo.
    #[arg(long)]
    pub strategy: Option<String>,

    /// Frontier-pop budget per query.
    #[arg(long)]
    pub max_ticks: Option<u64>,

    /// Path-cost cutoff for enqueueing children.
    #[arg(long)]
    pub cost_threshold: Option<f32>,

    /// Return after the first knowledge-base match.
    #[arg(long)]
    pub stop_on_first: bool,

    /// Check undequeued frontier nodes on budget exhaustion.
    #[arg(long)]
    pub check_fringe: bool,

    /// Per-path cycle memory depth (0 disables).
    #[arg(long)]
    pub cycle_memory: Option<u8>,
}

impl SearchArgs {
    fn base_options(&self) -> Result<SearchOptions, CliError> {
        let mut options = SearchOptions::default()
            .with_stop_on_first(self.stop_on_first)
            .with_check_fringe(self.check_fringe);
        if let Some(raw) = &self.policy {
            options.policy = directives::parse_policy(raw).map_err(CliError::Flag)?;
        }
        if let Some(raw) = &self.strategy {
            options.strategy = directives::parse_strategy(raw).map_err(CliError::Flag)?;
        }
        if let Some(max_ticks) = self.max_ticks {
            options.max_ticks = max_ticks;
        }
        if let Some(cost_threshold) = self.cost_threshold {
            options.cost_threshold = cost_threshold;
        }
        if let Some(cycle_memory) = self.cycle_memory {
            options.cycle_memory = cycle_memory;
        }
        Ok(options)
    }
}

pub fn handle(args: &SearchArgs) -> Result<(), CliError> {
    let graph = InMemoryGraph::from_reader(BufReader::new(File::open(&args.graph)?))?;
    let kb = HashSetKb::load(&args.kb)?;
    info!(
        edges = graph.edge_count(),
        facts = kb.len(),
        "loaded graph and knowledge base"
    );
    let input = read_input(args.input.as_deref())?;
    let mut stdout = std::io::stdout().lock();
    run_queries(
        &graph,
        &kb,
        &input,
        args.base_options()?,
        args.concurrent,
        &mut stdout,
    )
}

/// Run every query in the stream, writing one JSON line per query.
pub(crate) fn run_queries(
    graph: &dyn MutationGraph,
    kb: &dyn KnowledgeBase,
    input: &str,
    mut options: SearchOptions,
    concurrent: bool,
    out: &mut impl Write,
) -> Result<(), CliError> {
    let mut query = 0u64;
    for item in parse_items(input) {
        match item {
            InputItem::Directive { line, text } => {
                directives::apply(&mut options, &text)
                    .map_err(|message| CliError::Directive { line, message })?;
                debug!(line, directive = %text, "applied directive");
            }
            InputItem::Block { line, text } => {
                let tree = DependencyTree::from_conll(&text)?;
                query += 1;
                let response = if concurrent {
                    search_concurrent(graph, kb, &tree, &options, None)?
                } else {
                    search(graph, kb, &tree, &options, None)?
                };
                debug!(
                    query,
                    line,
                    ticks = response.total_ticks,
                    paths = response.paths.len(),
                    "query finished"
                );
                let record = serde_json::json!({
                    "query": query,
                    "paths": response.paths,
                    "features": response.features,
                    "closest_alignment": response.closest_alignment,
                    "total_ticks": response.total_ticks,
                });
                writeln!(out, "{record}")?;
            }
        }
    }
    Ok(())
}
