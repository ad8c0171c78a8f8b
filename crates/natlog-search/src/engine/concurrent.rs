//! Three-worker concurrent search.
//!
//! The loop is split along its three independent concerns:
//!
//! - the **frontier worker** owns the priority queue, the visited set, and
//!   the tick budget; it pops states and hands them off for expansion;
//! - the **expansion worker** owns the single [`HistoryWriter`], commits
//!   each state, generates its children, and flags committed states for the
//!   knowledge-base check;
//! - the **lookup worker** runs the membership predicate and soft-alignment
//!   scoring off the hot path and collects the matches.
//!
//! The workers talk over bounded crossbeam channels; shutdown is channel
//! closure plus a shared done flag (first match under `stop_on_first`, or a
//! full history). Both engines share the expansion code, so for a given
//! query the set of committed states, the matches, and the tick count are
//! identical to the sequential engine's.

use std::collections::HashSet;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use crossbeam_channel::{bounded, Receiver, RecvTimeoutError, Sender, TrySendError};
use tracing::{debug, warn};

use natlog_core::{DependencyTree, KnowledgeBase, MutationGraph};

use crate::alignment::{AlignmentSpec, AlignmentSummary};
use crate::error::{SearchError, SearchResult};
use crate::history::{HistoryWriter, SharedHistory, StepKind};
use crate::node::SearchNode;
use crate::options::SearchOptions;
use crate::response::{JustifiedPath, SearchResponse};

use super::expand::{Child, SearchContext};
use super::frontier::{Frontier, FrontierEntry};
use super::sequential::{fringe_paths, path_features, to_entry};

const CHANNEL_BOUND: usize = 256;
const IDLE_WAIT: Duration = Duration::from_millis(5);

/// A committed state awaiting the knowledge-base check.
struct MatchCandidate {
    index: u32,
    cost: f32,
}

/// Run one query with the three-worker pipeline.
///
/// Same semantics as [`super::search`]; `Err` only on a worker panic.
pub fn search_concurrent(
    graph: &dyn MutationGraph,
    kb: &dyn KnowledgeBase,
    tree: &DependencyTree,
    options: &SearchOptions,
    alignment: Option<&AlignmentSpec>,
) -> SearchResult<SearchResponse> {
    if options.max_ticks >= u64::from(u32::MAX) {
        warn!(max_ticks = options.max_ticks, "tick budget exceeds history addressing; refusing query");
        return Ok(SearchResponse::default());
    }

    let ctx = SearchContext::new(tree, graph, kb, options);
    let (shared, writer) = SharedHistory::new(options.history_capacity());
    let done = Arc::new(AtomicBool::new(false));

    let (work_tx, work_rx) = bounded::<FrontierEntry>(CHANNEL_BOUND);
    let (children_tx, children_rx) = bounded::<Vec<Child>>(CHANNEL_BOUND);
    let (match_tx, match_rx) = bounded::<MatchCandidate>(CHANNEL_BOUND);

    let (frontier_out, lookup_out) = std::thread::scope(|scope| {
        let frontier_handle = {
            let done = Arc::clone(&done);
            let ctx = &ctx;
            scope.spawn(move || frontier_worker(ctx, options, work_tx, children_rx, &done))
        };
        let expansion_handle = {
            let done = Arc::clone(&done);
            let ctx = &ctx;
            let shared = Arc::clone(&shared);
            scope.spawn(move || {
                expansion_worker(ctx, writer, shared, work_rx, children_tx, match_tx, &done)
            })
        };
        let lookup_handle = {
            let done = Arc::clone(&done);
            let ctx = &ctx;
            let shared = Arc::clone(&shared);
            scope.spawn(move || lookup_worker(ctx, options, alignment, shared, match_rx, &done))
        };

        let frontier_out = frontier_handle
            .join()
            .map_err(|_| SearchError::WorkerPanicked { worker: "frontier" });
        let expansion_out = expansion_handle
            .join()
            .map_err(|_| SearchError::WorkerPanicked { worker: "expansion" });
        let lookup_out = lookup_handle
            .join()
            .map_err(|_| SearchError::WorkerPanicked { worker: "lookup" });
        expansion_out.map(|()| (frontier_out, lookup_out))
    })?;
    let (total_ticks, fringe) = frontier_out?;
    let lookup = lookup_out?;

    let mut response = SearchResponse {
        total_ticks,
        closest_alignment: lookup.best_alignment,
        ..SearchResponse::default()
    };
    let mut matched_hashes = lookup.matched_hashes;
    for (index, cost) in lookup.matches {
        let Some(indices) = shared.path_to_root(index) else {
            return Err(SearchError::ChannelDisconnected { channel: "history" });
        };
        let mut nodes = Vec::with_capacity(indices.len());
        let mut steps = Vec::with_capacity(indices.len());
        for i in indices {
            // Published: the lookup worker only sees committed indices.
            if let Some(entry) = shared.entry(i) {
                nodes.push(entry.node);
                steps.push(entry.step);
            }
        }
        response.features.push(path_features(steps.into_iter(), &nodes));
        response.paths.push(JustifiedPath { nodes, cost });
    }

    if options.check_fringe {
        fringe_paths(&ctx, |i| shared.entry(i), fringe, &mut matched_hashes, &mut response);
    }

    debug!(
        ticks = response.total_ticks,
        paths = response.paths.len(),
        committed = shared.len(),
        "concurrent search finished"
    );
    Ok(response)
}

/// Pops states cheapest-first, spends the tick budget, and suppresses
/// duplicates. Returns the tick count and the undequeued fringe.
fn frontier_worker(
    ctx: &SearchContext<'_>,
    options: &SearchOptions,
    work_tx: Sender<FrontierEntry>,
    children_rx: Receiver<Vec<Child>>,
    done: &AtomicBool,
) -> (u64, Vec<FrontierEntry>) {
    let mut frontier = Frontier::new(options.strategy);
    let mut visited: HashSet<(u64, u8, bool, u32)> = HashSet::new();
    let mut ticks = 0u64;
    let mut pending = 0usize;
    let mut seq = 0u64;

    frontier.push(FrontierEntry {
        priority: 0.0,
        seq,
        cost: 0.0,
        node: ctx.start_node(),
        step: StepKind::Start,
    });

    let absorb = |frontier: &mut Frontier, pending: &mut usize, seq: &mut u64, batch: Vec<Child>| {
        *pending -= 1;
        for child in batch {
            *seq += 1;
            frontier.push(to_entry(&child, *seq, options.strategy));
        }
    };

    'outer: loop {
        if done.load(Ordering::Acquire) || ticks >= options.max_ticks {
            break;
        }
        // Fold in any finished expansions before the next pop.
        while let Ok(batch) = children_rx.try_recv() {
            absorb(&mut frontier, &mut pending, &mut seq, batch);
        }
        let Some(entry) = frontier.pop() else {
            if pending == 0 {
                break;
            }
            match children_rx.recv_timeout(IDLE_WAIT) {
                Ok(batch) => absorb(&mut frontier, &mut pending, &mut seq, batch),
                Err(RecvTimeoutError::Timeout) => {}
                Err(RecvTimeoutError::Disconnected) => break,
            }
            continue;
        };
        ticks += 1;
        if !visited.insert(entry.node.state_key()) {
            continue;
        }
        pending += 1;
        // Never block on a full work channel while the expansion worker may
        // itself be blocked handing children back.
        let mut entry = entry;
        loop {
            match work_tx.try_send(entry) {
                Ok(()) => break,
                Err(TrySendError::Full(back)) => {
                    entry = back;
                    match children_rx.recv_timeout(IDLE_WAIT) {
                        Ok(batch) => absorb(&mut frontier, &mut pending, &mut seq, batch),
                        Err(RecvTimeoutError::Timeout) => {}
                        Err(RecvTimeoutError::Disconnected) => break 'outer,
                    }
                }
                Err(TrySendError::Disconnected(_)) => break 'outer,
            }
        }
    }

    // Let the expansion worker finish anything in flight; its sends must
    // not block against a reader that has left.
    drop(work_tx);
    while children_rx.recv().is_ok() {}

    (ticks, frontier.drain())
}

/// Commits states through the single history writer and expands them.
fn expansion_worker(
    ctx: &SearchContext<'_>,
    mut writer: HistoryWriter,
    shared: Arc<SharedHistory>,
    work_rx: Receiver<FrontierEntry>,
    children_tx: Sender<Vec<Child>>,
    match_tx: Sender<MatchCandidate>,
    done: &AtomicBool,
) {
    for entry in work_rx.iter() {
        let Some(index) = writer.push(entry.node, entry.step) else {
            debug!(committed = shared.len(), "history arena full; stopping search");
            done.store(true, Ordering::Release);
            break;
        };
        if match_tx
            .send(MatchCandidate {
                index,
                cost: entry.cost,
            })
            .is_err()
        {
            break;
        }

        let mut children = Vec::new();
        ctx.expand(&entry.node, index, entry.cost, &mut children);
        children.retain(|child| {
            !ctx.is_short_cycle(&child.node, |i| shared.entry(i).map(|e| e.node))
        });
        // An empty batch still ships: the frontier counts it against the
        // pending expansions.
        if children_tx.send(children).is_err() {
            break;
        }
    }
}

struct LookupOutcome {
    matches: Vec<(u32, f32)>,
    matched_hashes: HashSet<u64>,
    best_alignment: Option<AlignmentSummary>,
}

/// Runs knowledge-base membership and alignment scoring over committed
/// states, in commit order.
fn lookup_worker(
    ctx: &SearchContext<'_>,
    options: &SearchOptions,
    alignment: Option<&AlignmentSpec>,
    shared: Arc<SharedHistory>,
    match_rx: Receiver<MatchCandidate>,
    done: &AtomicBool,
) -> LookupOutcome {
    let mut outcome = LookupOutcome {
        matches: Vec::new(),
        matched_hashes: HashSet::new(),
        best_alignment: None,
    };
    for candidate in match_rx.iter() {
        let Some(entry) = shared.entry(candidate.index) else {
            continue;
        };
        let node: SearchNode = entry.node;
        if let Some(spec) = alignment {
            if let Some(summary) = spec.score_best(&ctx.live_words(&node)) {
                outcome.best_alignment =
                    Some(outcome.best_alignment.map_or(summary, |b| b.max(summary)));
            }
        }
        if ctx.is_match(&node) && outcome.matched_hashes.insert(node.fact_hash()) {
            outcome.matches.push((candidate.index, candidate.cost));
            if options.stop_on_first {
                done.store(true, Ordering::Release);
            }
        }
    }
    outcome
}
