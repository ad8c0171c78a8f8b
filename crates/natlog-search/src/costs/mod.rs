//! Natural-logic cost calculus.
//!
//! A pure function family mapping (current truth state, edit kind,
//! monotonicity context) to a traversal cost and the resulting truth state.
//! The truth state machine itself is fixed; the three named policies are
//! parameterizations of the same tables with different constants.

#[cfg(test)]
mod tests;

use natlog_core::{
    deletion_relation, project, DependencyTree, Edge, NatlogRelation, NUM_EDGE_TYPES,
    NUM_RELATIONS,
};

use crate::node::SearchNode;

/// Resulting truth value of applying a (projected) relation to the current
/// truth state, or `None` when the inference is undefined.
///
/// This is the MacCartney finite-state machine over {true, false}: the
/// entailment relations preserve the state, negation flips it, alternation
/// falsifies a true state, cover verifies a false one, and independence
/// never licenses anything.
#[must_use]
pub fn transition_state(truth: bool, relation: NatlogRelation) -> Option<bool> {
    use NatlogRelation::*;
    match relation {
        Equivalent | ForwardEntailment | ReverseEntailment => Some(truth),
        Negation => Some(!truth),
        Alternation => truth.then_some(false),
        Cover => (!truth).then_some(true),
        Independence => None,
    }
}

/// Cost tables for one search invocation.
///
/// All costs are non-negative; `f32::INFINITY` marks a transition the policy
/// forbids outright. Tables are immutable once constructed and may be swapped
/// per query.
#[derive(Debug, Clone)]
pub struct SynSearchCosts {
    /// Per-edit-kind base cost, multiplied by the edge's own cost.
    pub mutation_lexical_cost: [f32; NUM_EDGE_TYPES],
    /// Base cost of deleting (reverse: inserting) one dependent subtree.
    pub insertion_lexical_cost: f32,
    /// Cost of taking a projected relation from a true state.
    pub transition_cost_from_true: [f32; NUM_RELATIONS],
    /// Cost of taking a projected relation from a false state.
    pub transition_cost_from_false: [f32; NUM_RELATIONS],
}

const INF: f32 = f32::INFINITY;

/// Shared per-edit base costs; policies differ only in transition pricing.
/// Indexed by `EdgeType` discriminant order.
const MUTATION_LEXICAL_COST: [f32; NUM_EDGE_TYPES] = [
    0.01, // hypernym
    0.01, // hyponym
    0.10, // antonym
    0.00, // synonym
    0.10, // meronym
    0.10, // holonym
    0.01, // quantifier up
    0.01, // quantifier down
    0.10, // quantifier negate
    0.01, // quantifier reword
    0.00, // sense add
    0.00, // sense remove
    0.01, // subtree insert
    0.01, // subtree delete
];

impl SynSearchCosts {
    /// Strict natural logic: only sound transitions are finite.
    ///
    /// Generalizing a false fact or specializing a true one is forbidden, as
    /// is anything whose resulting truth state is undefined.
    #[must_use]
    pub fn strict() -> Self {
        // Index order: Eq, FE, RE, Negation, Alternation, Cover, Independence.
        Self {
            mutation_lexical_cost: MUTATION_LEXICAL_COST,
            insertion_lexical_cost: 0.01,
            transition_cost_from_true: [0.0, 0.01, INF, 0.1, 0.1, INF, INF],
            transition_cost_from_false: [0.0, INF, 0.01, 0.1, INF, 0.1, INF],
        }
    }

    /// Strict tables with the unsound entailment directions priced high
    /// rather than forbidden.
    #[must_use]
    pub fn intermediate() -> Self {
        Self {
            transition_cost_from_true: [0.0, 0.01, 1.0, 0.1, 0.1, INF, INF],
            transition_cost_from_false: [0.0, 1.0, 0.01, 0.1, INF, 0.1, INF],
            ..Self::strict()
        }
    }

    /// Permissive tables: both entailment directions cheap in both states.
    #[must_use]
    pub fn soft() -> Self {
        Self {
            transition_cost_from_true: [0.0, 0.01, 0.1, 0.1, 0.1, INF, INF],
            transition_cost_from_false: [0.0, 0.1, 0.01, 0.1, INF, 0.1, INF],
            ..Self::strict()
        }
    }

    fn transition_cost(&self, truth: bool, relation: NatlogRelation) -> f32 {
        if truth {
            self.transition_cost_from_true[relation.index()]
        } else {
            self.transition_cost_from_false[relation.index()]
        }
    }

    /// Price a lexical mutation of the node's focus token along `edge`.
    ///
    /// The edge's lexical relation is projected through every quantifier
    /// enclosing the focus (honoring the node's in-path polarity overrides),
    /// then run through the truth state machine. Returns the cost and the
    /// resulting truth state; an infinite cost marks an invalid transition
    /// and carries an unchanged truth state.
    #[must_use]
    pub fn mutation_cost(
        &self,
        tree: &DependencyTree,
        node: &SearchNode,
        edge: &Edge,
        truth: bool,
    ) -> (f32, bool) {
        let mut relation = edge.edge_type.lexical_relation();
        let overrides = node.quantifier_overrides();
        tree.foreach_quantifier_with_overrides(node.token_index(), &overrides, |qtype, mono| {
            relation = project(mono, qtype, relation);
        });
        let Some(new_truth) = transition_state(truth, relation) else {
            return (INF, truth);
        };
        let cost = edge.cost * self.mutation_lexical_cost[edge.edge_type.index()]
            + self.transition_cost(truth, relation);
        (cost, if cost.is_finite() { new_truth } else { truth })
    }

    /// Price deleting the dependent subtree rooted at `child_index`,
    /// attached by `child_relation`.
    ///
    /// Deletion is modeled in reverse as an insertion's lexical function:
    /// the relation induced by the dependency label, projected through the
    /// quantifiers enclosing the deleted position.
    #[must_use]
    pub fn insertion_cost(
        &self,
        tree: &DependencyTree,
        node: &SearchNode,
        child_index: u8,
        child_relation: u8,
        truth: bool,
    ) -> (f32, bool) {
        let mut relation = deletion_relation(child_relation);
        let overrides = node.quantifier_overrides();
        tree.foreach_quantifier_with_overrides(child_index, &overrides, |qtype, mono| {
            relation = project(mono, qtype, relation);
        });
        let Some(new_truth) = transition_state(truth, relation) else {
            return (INF, truth);
        };
        let cost = self.insertion_lexical_cost + self.transition_cost(truth, relation);
        (cost, if cost.is_finite() { new_truth } else { truth })
    }
}

/// Named cost policies, selectable per query.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CostPolicy {
    /// Only sound natural-logic transitions.
    Strict,
    /// Unsound directions priced high.
    Intermediate,
    /// Unsound directions priced low.
    #[default]
    Soft,
}

impl CostPolicy {
    /// Materialize the cost tables for this policy.
    #[must_use]
    pub fn costs(self) -> SynSearchCosts {
        match self {
            CostPolicy::Strict => SynSearchCosts::strict(),
            CostPolicy::Intermediate => SynSearchCosts::intermediate(),
            CostPolicy::Soft => SynSearchCosts::soft(),
        }
    }
}
