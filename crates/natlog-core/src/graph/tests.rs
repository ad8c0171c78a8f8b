//! Mutation graph tests.

use std::io::Cursor;

use crate::types::{Monotonicity, TaggedWord};

use super::*;

fn edge(source: u32, sink: u32, edge_type: EdgeType, cost: f32) -> Edge {
    Edge {
        source,
        source_sense: 0,
        sink,
        sink_sense: 0,
        edge_type,
        cost,
    }
}

fn key(word: u32, sense: u8) -> TaggedWord {
    TaggedWord::new_unchecked(word, sense, Monotonicity::Invalid)
}

#[test]
fn adjacency_keyed_by_sink() {
    let mut graph = InMemoryGraph::new();
    graph.add_edge(edge(2, 1, EdgeType::Hypernym, 0.1));
    graph.add_edge(edge(3, 1, EdgeType::Hyponym, 0.5));
    graph.add_edge(edge(1, 2, EdgeType::Hyponym, 0.5));

    let edges = graph.incoming_edges(&key(1, 0));
    assert_eq!(edges.len(), 2);
    assert!(edges.iter().all(|e| e.sink == 1));
    assert_eq!(graph.incoming_edges(&key(99, 0)), &[]);
}

#[test]
fn lookup_respects_sense() {
    let mut graph = InMemoryGraph::new();
    graph.add_edge(Edge {
        source: 2,
        source_sense: 0,
        sink: 1,
        sink_sense: 3,
        edge_type: EdgeType::Hypernym,
        cost: 0.1,
    });
    assert_eq!(graph.incoming_edges(&key(1, 0)).len(), 0);
    assert_eq!(graph.incoming_edges(&key(1, 3)).len(), 1);
}

#[test]
fn lookup_ignores_polarity() {
    let mut graph = InMemoryGraph::new();
    graph.add_edge(edge(2, 1, EdgeType::Hypernym, 0.1));
    let up = TaggedWord::new_unchecked(1, 0, Monotonicity::Up);
    let down = TaggedWord::new_unchecked(1, 0, Monotonicity::Down);
    assert_eq!(graph.incoming_edges(&up).len(), 1);
    assert_eq!(graph.incoming_edges(&down).len(), 1);
}

#[test]
fn vocab_and_gloss() {
    let mut graph = InMemoryGraph::new();
    graph.add_edge(edge(2, 1, EdgeType::Hypernym, 0.1));
    graph.add_gloss(1, "lemur");
    assert_eq!(graph.vocab_size(), 2);
    assert_eq!(graph.gloss(1), Some("lemur"));
    assert_eq!(graph.gloss(2), None);
}

#[test]
fn contains_deletion_checks_exact_pair() {
    let mut graph = InMemoryGraph::new();
    graph.add_edge(edge(5, 1, EdgeType::SubtreeDelete, 0.2));
    assert!(graph.contains_deletion(&edge(5, 1, EdgeType::SubtreeDelete, 0.0)));
    assert!(!graph.contains_deletion(&edge(6, 1, EdgeType::SubtreeDelete, 0.0)));
    assert!(!graph.contains_deletion(&edge(5, 2, EdgeType::SubtreeDelete, 0.0)));
}

#[test]
fn loads_tsv() {
    let tsv = "# comment\n2\t0\t1\t0\thypernym\t0.1\n3\t0\t1\t0\tantonym\t1.5\n";
    let graph = InMemoryGraph::from_reader(Cursor::new(tsv)).unwrap();
    assert_eq!(graph.edge_count(), 2);
    let edges = graph.incoming_edges(&key(1, 0));
    assert_eq!(edges[0].edge_type, EdgeType::Hypernym);
    assert_eq!(edges[1].edge_type, EdgeType::Antonym);
}

#[test]
fn tsv_rejects_bad_rows() {
    assert!(InMemoryGraph::from_reader(Cursor::new("1\t0\t2\n")).is_err());
    assert!(InMemoryGraph::from_reader(Cursor::new("2\t0\t1\t0\tnope\t0.1\n")).is_err());
    assert!(InMemoryGraph::from_reader(Cursor::new("2\t0\t1\t0\thypernym\t-1\n")).is_err());
    assert!(InMemoryGraph::from_reader(Cursor::new("2\t0\t1\t0\thypernym\tinf\n")).is_err());
}

#[test]
fn tsv_rejects_the_root_sentinel_word_id() {
    // 16777215 is the virtual-ROOT id; no real edge may carry it.
    let tsv = "16777215\t0\t1\t0\thypernym\t0.1\n";
    assert!(InMemoryGraph::from_reader(Cursor::new(tsv)).is_err());
    let tsv = "2\t0\t16777215\t0\thypernym\t0.1\n";
    assert!(InMemoryGraph::from_reader(Cursor::new(tsv)).is_err());
}

#[test]
fn edge_type_relations_are_exhaustive() {
    use crate::types::NatlogRelation;
    assert_eq!(
        EdgeType::Hypernym.lexical_relation(),
        NatlogRelation::ForwardEntailment
    );
    assert_eq!(
        EdgeType::Hyponym.lexical_relation(),
        NatlogRelation::ReverseEntailment
    );
    assert_eq!(EdgeType::Antonym.lexical_relation(), NatlogRelation::Alternation);
    assert_eq!(
        EdgeType::QuantifierNegate.lexical_relation(),
        NatlogRelation::Negation
    );
    assert_eq!(EdgeType::Synonym.lexical_relation(), NatlogRelation::Equivalent);
}
