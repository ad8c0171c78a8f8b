//! Core value types: monotonicity marks, natural-logic relations, and the
//! packed tagged word.
//!
//! Everything in this module is a small `Copy` value compared by value; the
//! tree and search layers build on these without ever allocating per-token.

mod monotonicity;
mod relations;
mod tagged_word;

#[cfg(test)]
mod tests_relations;
#[cfg(test)]
mod tests_tagged_word;

pub use monotonicity::{parse_monotonicity_spec, Monotonicity, QuantifierType};
pub use relations::{NatlogRelation, project, NUM_RELATIONS};
pub use tagged_word::{TaggedWord, MAX_SENSE, MAX_WORD_ID};

/// Maximum number of tokens in a query tree.
///
/// Bounded so delete masks fit in a `u32` and a search node stays within
/// half a cache line.
pub const MAX_QUERY_LENGTH: usize = 26;

/// Maximum number of quantifiers a single tree may carry.
pub const MAX_QUANTIFIER_COUNT: usize = 6;

/// Maximum number of dependents a single token may have.
///
/// `DependencyTree::dependents` truncates silently past this bound; callers
/// assume it.
pub const MAX_CHILDREN: usize = 8;

/// Sentinel word id standing in for the virtual ROOT governor in edge hashes.
///
/// Reserved: no real vocabulary entry may use this id.
pub const ROOT_WORD: u32 = 0x00FF_FFFF;
