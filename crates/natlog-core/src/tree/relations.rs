//! Static dependency-relation table.
//!
//! Relations are interned to a `u8` index at tree construction. The table is
//! a process-wide immutable static, initialized at compile time; an unknown
//! label is a construction-time error, never a silent default.

use crate::error::CoreError;
use crate::types::NatlogRelation;

/// The closed set of dependency relation labels the annotator may emit.
///
/// Index order is load-bearing only in that it feeds the edge hash; it must
/// stay stable across versions for persisted fact hashes to keep matching.
pub static DEPENDENCY_RELATIONS: &[&str] = &[
    "root", "acomp", "advcl", "advmod", "amod", "appos", "aux", "auxpass", "cc", "ccomp", "conj",
    "cop", "csubj", "csubjpass", "dep", "det", "discourse", "dobj", "expl", "goeswith", "iobj",
    "mark", "mwe", "neg", "nn", "npadvmod", "nsubj", "nsubjpass", "num", "number", "parataxis",
    "pcomp", "pobj", "poss", "possessive", "preconj", "predet", "prep", "prt", "punct", "quantmod",
    "rcmod", "tmod", "vmod", "xcomp",
];

/// Intern a relation label to its table index.
pub fn relation_index(label: &str) -> Result<u8, CoreError> {
    DEPENDENCY_RELATIONS
        .iter()
        .position(|&r| r == label)
        .map(|i| i as u8)
        .ok_or_else(|| CoreError::UnknownRelation(label.to_string()))
}

/// The label for an interned relation index.
#[must_use]
pub fn relation_name(index: u8) -> &'static str {
    DEPENDENCY_RELATIONS
        .get(index as usize)
        .copied()
        .unwrap_or("dep")
}

/// The lexical relation induced by deleting a dependent subtree attached by
/// `relation` (equivalently, inserting it in the premise-to-query direction).
///
/// Deleting an explicit negation flips truth. Every other deletion
/// generalizes the sentence: forward entailment in an upward context, with
/// the cost tables left to price how much it weakens the claim.
#[must_use]
pub fn deletion_relation(relation: u8) -> NatlogRelation {
    match relation_name(relation) {
        "neg" => NatlogRelation::Negation,
        _ => NatlogRelation::ForwardEntailment,
    }
}
