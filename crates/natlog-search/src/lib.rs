//! Natural-logic entailment search over a knowledge base of fact hashes.
//!
//! A query arrives as a dependency tree; the engine walks the space of
//! cheap edits (lexical mutations from the graph, subtree deletions, focus
//! moves), tracking truth through the natural-logic state machine, and
//! reports every knowledge-base fact reachable under the cost threshold
//! together with the edit path that justifies it.
//!
//! The crate splits along the search loop's seams:
//!
//! - [`node`]: the packed 32-byte search state
//! - [`costs`]: cost policies and the truth transition table
//! - [`history`]: the append-only arena backing path reconstruction
//! - [`engine`]: the sequential and three-worker concurrent loops
//! - [`alignment`], [`features`], [`response`]: what a search reports

pub mod alignment;
pub mod costs;
pub mod engine;
pub mod error;
pub mod features;
pub mod history;
pub mod node;
pub mod options;
pub mod response;

pub use alignment::{AlignmentCandidate, AlignmentSpec, AlignmentSummary};
pub use costs::{transition_state, CostPolicy, SynSearchCosts};
pub use engine::{search, search_concurrent};
pub use error::{SearchError, SearchResult};
pub use features::FeatureVector;
pub use history::{History, HistoryEntry, HistoryWriter, SharedHistory, StepKind};
pub use node::{SearchNode, NO_BACKPOINTER};
pub use options::{FrontierStrategy, SearchOptions};
pub use response::{JustifiedPath, SearchResponse};
