use std::collections::HashSet;

use natlog_core::{DependencyTree, Edge, EdgeType, HashSetKb, InMemoryGraph};

use crate::alignment::{AlignmentCandidate, AlignmentSpec};
use crate::costs::CostPolicy;
use crate::options::{FrontierStrategy, SearchOptions};
use crate::response::SearchResponse;

use super::{search, search_concurrent};

const LEMUR: u32 = 73_918;
const HAVE: u32 = 60_042;
const TAILS: u32 = 125_248;
const ANIMAL: u32 = 3_701;
const CAT: u32 = 27_970;

const LEMURS_HAVE_TAILS: &str = "73918\t2\tnsubj\n60042\t0\troot\n125248\t2\tdobj\n";
const CATS_HAVE_TAILS: &str = "27970\t2\tnsubj\n60042\t0\troot\n125248\t2\tdobj\n";
const HAVE_ALONE: &str = "60042\t0\troot\n";

fn tree(block: &str) -> DependencyTree {
    DependencyTree::from_conll(block).unwrap()
}

fn edge(source: u32, sink: u32, edge_type: EdgeType) -> Edge {
    Edge {
        source,
        source_sense: 0,
        sink,
        sink_sense: 0,
        edge_type,
        cost: 1.0,
    }
}

/// lemur <-> animal <-> cat, one hop per direction.
fn taxonomy_graph() -> InMemoryGraph {
    let mut graph = InMemoryGraph::new();
    graph.add_edge(edge(ANIMAL, LEMUR, EdgeType::Hypernym));
    graph.add_edge(edge(LEMUR, ANIMAL, EdgeType::Hyponym));
    graph.add_edge(edge(CAT, ANIMAL, EdgeType::Hyponym));
    graph.add_edge(edge(ANIMAL, CAT, EdgeType::Hypernym));
    graph
}

fn cats_kb() -> HashSetKb {
    HashSetKb::from_hashes([tree(CATS_HAVE_TAILS).hash()])
}

/// Threshold sitting between the two-mutation tier (~0.13) and the tier
/// above it (~0.15), so the taxonomy fixture explores exactly 15 states.
fn lemur_options() -> SearchOptions {
    SearchOptions::default()
        .with_max_ticks(100)
        .with_cost_threshold(0.145)
        .with_silent(true)
}

fn run_sequential(options: &SearchOptions) -> SearchResponse {
    let graph = taxonomy_graph();
    let kb = cats_kb();
    search(&graph, &kb, &tree(LEMURS_HAVE_TAILS), options, None).unwrap()
}

#[test]
fn ucs_finds_the_generalize_then_specialize_path() {
    let response = run_sequential(&lemur_options());

    assert_eq!(response.total_ticks, 15);
    assert_eq!(response.paths.len(), 1);

    let path = &response.paths[0];
    assert_eq!(path.nodes.len(), 4);
    assert_eq!(path.nodes[0].fact_hash(), tree(LEMURS_HAVE_TAILS).hash());
    assert_eq!(path.terminal_hash(), Some(tree(CATS_HAVE_TAILS).hash()));
    assert!(path.nodes.iter().all(|n| n.truth()));
    assert!((path.cost - 0.13).abs() < 1e-6);

    let features = &response.features[0];
    assert_eq!(features.mutations_from_true[EdgeType::Hypernym.index()], 1);
    assert_eq!(features.mutations_from_true[EdgeType::Hyponym.index()], 1);
    assert_eq!(features.index_moves, 1);
    assert_eq!(features.edit_count(), 2);
    assert!(!features.any_truth_flip());
}

#[test]
fn strict_policy_rules_out_specialization() {
    let response = run_sequential(&lemur_options().with_policy(CostPolicy::Strict));
    assert!(!response.any_match());
}

#[test]
fn single_token_facts_never_match() {
    let graph = taxonomy_graph();
    let kb = HashSetKb::from_hashes([tree(HAVE_ALONE).hash()]);
    let response = search(
        &graph,
        &kb,
        &tree(LEMURS_HAVE_TAILS),
        &lemur_options(),
        None,
    )
    .unwrap();
    // The state that deleted both arguments reaches the single-token hash
    // but is too degenerate to count as a match.
    assert_eq!(response.total_ticks, 15);
    assert!(!response.any_match());
}

#[test]
fn stop_on_first_halts_at_the_match() {
    let response = run_sequential(&lemur_options().with_stop_on_first(true));
    assert_eq!(response.paths.len(), 1);
    assert_eq!(response.total_ticks, 14);
}

#[test]
fn fifo_reaches_the_same_fact() {
    let response = run_sequential(&lemur_options().with_strategy(FrontierStrategy::Fifo));
    // Pop order changes, the explored state set does not.
    assert_eq!(response.total_ticks, 15);
    assert_eq!(response.paths.len(), 1);
    assert_eq!(
        response.paths[0].terminal_hash(),
        Some(tree(CATS_HAVE_TAILS).hash())
    );
    assert!((response.paths[0].cost - 0.13).abs() < 1e-6);
}

#[test]
fn fringe_check_reports_matches_beyond_the_budget() {
    // Six ticks is just enough to expand the generalized state; the
    // specialized match is generated but never dequeued.
    let options = lemur_options().with_max_ticks(6).with_check_fringe(true);
    let response = run_sequential(&options);
    assert_eq!(response.total_ticks, 6);
    assert_eq!(response.paths.len(), 1);
    assert_eq!(response.paths[0].nodes.len(), 4);
    assert_eq!(
        response.paths[0].terminal_hash(),
        Some(tree(CATS_HAVE_TAILS).hash())
    );

    // Without the fringe drain the same budget finds nothing.
    let response = run_sequential(&lemur_options().with_max_ticks(6));
    assert!(!response.any_match());
}

#[test]
fn cycle_memory_skips_the_immediate_round_trip() {
    // lemur -> animal -> lemur revisits its grandparent state; with two
    // ancestors of memory that child is never enqueued.
    let response = run_sequential(&lemur_options().with_cycle_memory(2));
    assert_eq!(response.total_ticks, 14);
    assert_eq!(response.paths.len(), 1);
}

#[test]
fn concurrent_engine_agrees_with_sequential() {
    let graph = taxonomy_graph();
    let kb = cats_kb();
    let query = tree(LEMURS_HAVE_TAILS);
    let options = lemur_options();

    let sequential = search(&graph, &kb, &query, &options, None).unwrap();
    let concurrent = search_concurrent(&graph, &kb, &query, &options, None).unwrap();

    assert_eq!(concurrent.total_ticks, sequential.total_ticks);
    let terminal = |r: &SearchResponse| -> HashSet<Option<u64>> {
        r.paths.iter().map(|p| p.terminal_hash()).collect()
    };
    assert_eq!(terminal(&concurrent), terminal(&sequential));
    assert_eq!(concurrent.paths.len(), sequential.paths.len());
    assert!((concurrent.paths[0].cost - sequential.paths[0].cost).abs() < 1e-6);
}

#[test]
fn concurrent_stop_on_first_still_finds_the_fact() {
    let graph = taxonomy_graph();
    let kb = cats_kb();
    let options = lemur_options().with_stop_on_first(true);
    let response =
        search_concurrent(&graph, &kb, &tree(LEMURS_HAVE_TAILS), &options, None).unwrap();
    assert_eq!(response.paths.len(), 1);
    assert_eq!(
        response.paths[0].terminal_hash(),
        Some(tree(CATS_HAVE_TAILS).hash())
    );
}

#[test]
fn alignment_tracks_the_closest_candidate() {
    let graph = taxonomy_graph();
    let kb = cats_kb();
    let spec = AlignmentSpec::new(vec![
        AlignmentCandidate {
            id: 7,
            words: vec![CAT, HAVE, TAILS],
        },
        AlignmentCandidate {
            id: 8,
            words: vec![ANIMAL],
        },
    ]);
    let response = search(
        &graph,
        &kb,
        &tree(LEMURS_HAVE_TAILS),
        &lemur_options(),
        Some(&spec),
    )
    .unwrap();
    // The specialized state's word bag matches candidate 7 exactly.
    let summary = response.closest_alignment.unwrap();
    assert_eq!(summary.candidate, 7);
    assert!((summary.score - 3.0).abs() < 1e-6);
}

#[test]
fn oversized_tick_budget_is_refused() {
    let graph = taxonomy_graph();
    let kb = cats_kb();
    let options = SearchOptions::default().with_max_ticks(u64::from(u32::MAX));
    let response = search(&graph, &kb, &tree(LEMURS_HAVE_TAILS), &options, None).unwrap();
    assert_eq!(response.total_ticks, 0);
    assert!(!response.any_match());
}

const ALL_CATS_EAT_MICE: &str = "100\t2\tdet\t-\t-\tanti-additive:2-3\tmultiplicative:4-5\n\
                                 200\t3\tnsubj\n300\t0\troot\n400\t3\tdobj\n";
const EVERY_CATS_EAT_MICE: &str = "500\t2\tdet\t-\t-\tanti-additive:2-3\tmultiplicative:4-5\n\
                                   200\t3\tnsubj\n300\t0\troot\n400\t3\tdobj\n";

#[test]
fn quantifier_reword_matches_the_reworded_fact() {
    let mut graph = InMemoryGraph::new();
    graph.add_edge(edge(500, 100, EdgeType::QuantifierReword));
    let kb = HashSetKb::from_hashes([tree(EVERY_CATS_EAT_MICE).hash()]);
    let options = SearchOptions::default()
        .with_max_ticks(1_000)
        .with_silent(true);
    let response = search(&graph, &kb, &tree(ALL_CATS_EAT_MICE), &options, None).unwrap();

    assert_eq!(response.paths.len(), 1);
    let path = &response.paths[0];
    // The quantifier is visited before the root, so the reword happens in
    // one step off the start node.
    assert_eq!(path.nodes.len(), 2);
    assert_eq!(path.terminal_hash(), Some(tree(EVERY_CATS_EAT_MICE).hash()));
    assert!((path.cost - 0.01).abs() < 1e-6);
    assert_eq!(
        response.features[0].mutations_from_true[EdgeType::QuantifierReword.index()],
        1
    );
}
