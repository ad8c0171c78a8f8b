//! Search results.

use serde::Serialize;

use crate::alignment::AlignmentSummary;
use crate::features::FeatureVector;
use crate::node::SearchNode;

/// One knowledge-base match with its full edit path.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct JustifiedPath {
    /// Nodes from the query (first) to the matched fact (last).
    pub nodes: Vec<SearchNode>,
    /// Total path cost under the policy the search ran with.
    pub cost: f32,
}

impl JustifiedPath {
    /// Fact hash of the matched terminal state.
    #[must_use]
    pub fn terminal_hash(&self) -> Option<u64> {
        self.nodes.last().map(SearchNode::fact_hash)
    }
}

/// Everything one search invocation produced.
///
/// An empty `paths` is a normal outcome (no justification within budget),
/// not an error. `features` is parallel to `paths`.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct SearchResponse {
    /// Matches found, cheapest first under UCS.
    pub paths: Vec<JustifiedPath>,
    /// Step-count summary per path, same order as `paths`.
    pub features: Vec<FeatureVector>,
    /// Best soft alignment seen anywhere in the search, if scoring ran.
    pub closest_alignment: Option<AlignmentSummary>,
    /// Frontier pops consumed.
    pub total_ticks: u64,
}

impl SearchResponse {
    /// Whether at least one justification was found.
    #[must_use]
    pub fn any_match(&self) -> bool {
        !self.paths.is_empty()
    }

    /// The cheapest path's cost, if any path was found.
    #[must_use]
    pub fn best_cost(&self) -> Option<f32> {
        self.paths
            .iter()
            .map(|p| p.cost)
            .min_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal))
    }
}
