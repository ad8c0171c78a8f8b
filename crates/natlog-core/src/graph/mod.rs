//! Mutation graph: the read-only adjacency structure of valid lexical edits.
//!
//! For a given (word, sense) the graph answers "which edits could have
//! produced this word", each with an edit type and a base cost. The search
//! engine only consumes this structure; population (from WordNet, a
//! distributional store, or a test fixture) happens behind the
//! [`MutationGraph`] trait.

mod edge_type;
mod in_memory;

#[cfg(test)]
mod tests;

pub use edge_type::{EdgeType, NUM_EDGE_TYPES};
pub use in_memory::InMemoryGraph;

use crate::types::TaggedWord;

/// One directed edit edge: mutating `sink` into `source`.
///
/// Edges are stored inbound: the search holds the sink word and asks what it
/// can become. Costs are non-negative base costs, scaled by the cost policy.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Edge {
    /// Word id the edit produces.
    pub source: u32,
    /// Sense of the produced word.
    pub source_sense: u8,
    /// Word id the edit consumes (the currently held word).
    pub sink: u32,
    /// Sense of the consumed word.
    pub sink_sense: u8,
    /// Kind of edit.
    pub edge_type: EdgeType,
    /// Non-negative base cost.
    pub cost: f32,
}

/// Read-only adjacency over the edit graph.
///
/// Implementations must be cheap to query: `incoming_edges` sits on the hot
/// search path and is called once per node expansion.
pub trait MutationGraph: Send + Sync {
    /// All edges whose sink matches the word and sense of `word`.
    fn incoming_edges(&self, word: &TaggedWord) -> &[Edge];

    /// Human-readable gloss of a word id, if known.
    fn gloss(&self, word: u32) -> Option<&str>;

    /// Number of distinct word ids in the vocabulary.
    fn vocab_size(&self) -> usize;

    /// Whether `edge` is a valid subtree insertion (used to validate the
    /// sense compatibility of a deletion candidate).
    fn contains_deletion(&self, edge: &Edge) -> bool;
}
