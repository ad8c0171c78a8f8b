//! Core data model for natural-logic entailment search.
//!
//! This crate holds everything beneath the search engine:
//!
//! - **types**: the packed [`TaggedWord`] primitive, monotonicity marks, and
//!   the natural-logic relation/projection tables
//! - **tree**: the immutable [`DependencyTree`] with its incremental
//!   order-independent hash algebra and CoNLL reader
//! - **graph**: the read-only mutation graph interface and in-memory backing
//! - **kb**: the knowledge-base membership predicate and fact-hash file
//!   format
//!
//! The search engine itself lives in `natlog-search`.

pub mod error;
pub mod graph;
pub mod kb;
pub mod tree;
pub mod types;

pub use error::{CoreError, CoreResult};
pub use graph::{Edge, EdgeType, InMemoryGraph, MutationGraph, NUM_EDGE_TYPES};
pub use kb::{read_fact_hashes, write_fact_hashes, HashSetKb, KnowledgeBase};
pub use tree::{
    deletion_relation, edge_hash, relation_index, relation_name, DependencyTree, QuantifierSpan,
    Token, ROOT,
};
pub use types::{
    parse_monotonicity_spec, project, Monotonicity, NatlogRelation, QuantifierType, TaggedWord,
    MAX_CHILDREN, MAX_QUANTIFIER_COUNT, MAX_QUERY_LENGTH, NUM_RELATIONS, ROOT_WORD,
};
