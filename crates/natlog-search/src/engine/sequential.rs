//! Single-threaded search loop.

use std::collections::HashSet;

use tracing::{debug, warn};

use natlog_core::{DependencyTree, KnowledgeBase, MutationGraph};

use crate::alignment::{AlignmentSpec, AlignmentSummary};
use crate::error::SearchResult;
use crate::features::FeatureVector;
use crate::history::{History, HistoryEntry, StepKind};
use crate::node::{SearchNode, NO_BACKPOINTER};
use crate::options::{FrontierStrategy, SearchOptions};
use crate::response::{JustifiedPath, SearchResponse};

use super::expand::{Child, SearchContext};
use super::frontier::{Frontier, FrontierEntry};

/// Run one query against the knowledge base, single-threaded.
///
/// Resource exhaustion (tick budget spent, history arena full, frontier
/// emptied) always produces a response; `Err` is reserved for machinery
/// faults, which the sequential engine has none of. The `Result` keeps the
/// signature aligned with [`super::search_concurrent`].
pub fn search(
    graph: &dyn MutationGraph,
    kb: &dyn KnowledgeBase,
    tree: &DependencyTree,
    options: &SearchOptions,
    alignment: Option<&AlignmentSpec>,
) -> SearchResult<SearchResponse> {
    // The history arena is u32-addressed; a budget it cannot hold is a
    // refused query, not a panic.
    if options.max_ticks >= u64::from(u32::MAX) {
        warn!(max_ticks = options.max_ticks, "tick budget exceeds history addressing; refusing query");
        return Ok(SearchResponse::default());
    }

    let ctx = SearchContext::new(tree, graph, kb, options);
    let mut history = History::new(options.history_capacity());
    let mut frontier = Frontier::new(options.strategy);
    let mut visited: HashSet<(u64, u8, bool, u32)> = HashSet::new();
    let mut matched_hashes: HashSet<u64> = HashSet::new();
    let mut response = SearchResponse::default();
    let mut best_alignment: Option<AlignmentSummary> = None;
    let mut seq = 0u64;
    let mut children = Vec::new();

    frontier.push(FrontierEntry {
        priority: 0.0,
        seq,
        cost: 0.0,
        node: ctx.start_node(),
        step: StepKind::Start,
    });

    while response.total_ticks < options.max_ticks {
        let Some(entry) = frontier.pop() else {
            break;
        };
        response.total_ticks += 1;

        // Duplicate states cost a tick but are never committed or expanded.
        if !visited.insert(entry.node.state_key()) {
            continue;
        }
        let Some(index) = history.push(entry.node, entry.step) else {
            debug!(committed = history.len(), "history arena full; stopping search");
            break;
        };

        if let Some(spec) = alignment {
            if let Some(summary) = spec.score_best(&ctx.live_words(&entry.node)) {
                best_alignment = Some(best_alignment.map_or(summary, |b| b.max(summary)));
            }
        }

        if ctx.is_match(&entry.node) && matched_hashes.insert(entry.node.fact_hash()) {
            record_path(&mut response, &history, index, entry.cost);
            if options.stop_on_first {
                break;
            }
        }

        children.clear();
        ctx.expand(&entry.node, index, entry.cost, &mut children);
        for child in children.drain(..) {
            if ctx.is_short_cycle(&child.node, |i| Some(*history.node(i))) {
                continue;
            }
            seq += 1;
            frontier.push(to_entry(&child, seq, options.strategy));
        }
    }

    if options.check_fringe {
        fringe_paths(
            &ctx,
            |i| Some(*history.entry(i)),
            frontier.drain(),
            &mut matched_hashes,
            &mut response,
        );
    }

    response.closest_alignment = best_alignment;
    debug!(
        ticks = response.total_ticks,
        paths = response.paths.len(),
        committed = history.len(),
        "search finished"
    );
    Ok(response)
}

pub(super) fn to_entry(child: &Child, seq: u64, strategy: FrontierStrategy) -> FrontierEntry {
    let priority = match strategy {
        FrontierStrategy::Ucs => child.cost,
        // FIFO pops in insertion order; the priority is unused.
        FrontierStrategy::Fifo => 0.0,
    };
    FrontierEntry {
        priority,
        seq,
        cost: child.cost,
        node: child.node,
        step: child.step,
    }
}

fn record_path(response: &mut SearchResponse, history: &History, index: u32, cost: f32) {
    let indices = history.path_to_root(index);
    let nodes: Vec<SearchNode> = indices.iter().map(|&i| *history.node(i)).collect();
    response.features.push(path_features(
        indices.iter().map(|&i| history.entry(i).step),
        &nodes,
    ));
    response.paths.push(JustifiedPath { nodes, cost });
}

/// Features pair each step with the truth state it fired from, which is the
/// preceding node's state.
pub(super) fn path_features<I>(steps: I, nodes: &[SearchNode]) -> FeatureVector
where
    I: Iterator<Item = StepKind>,
{
    let from_truth = std::iter::once(true).chain(nodes.iter().map(SearchNode::truth));
    FeatureVector::from_steps(steps.zip(from_truth))
}

/// Check undequeued frontier nodes against the knowledge base, without
/// expanding or ticking. Paths are reconstructed through the committed
/// parent chain, so no history slot is consumed.
pub(super) fn fringe_paths<F>(
    ctx: &SearchContext<'_>,
    lookup: F,
    fringe: Vec<FrontierEntry>,
    matched_hashes: &mut HashSet<u64>,
    response: &mut SearchResponse,
) where
    F: Fn(u32) -> Option<HistoryEntry>,
{
    for entry in fringe {
        if !ctx.is_match(&entry.node) || !matched_hashes.insert(entry.node.fact_hash()) {
            continue;
        }
        let mut chain = Vec::new();
        let mut cursor = entry.node.backpointer();
        while cursor != NO_BACKPOINTER {
            let Some(parent) = lookup(cursor) else {
                break;
            };
            cursor = parent.node.backpointer();
            chain.push(parent);
        }
        chain.reverse();
        let mut nodes: Vec<SearchNode> = chain.iter().map(|e| e.node).collect();
        let mut steps: Vec<StepKind> = chain.iter().map(|e| e.step).collect();
        nodes.push(entry.node);
        steps.push(entry.step);
        response.features.push(path_features(steps.into_iter(), &nodes));
        response.paths.push(JustifiedPath {
            nodes,
            cost: entry.cost,
        });
    }
}
