//! Path feature extraction.
//!
//! A completed justification path is summarized as counts over its steps,
//! bucketed by edit kind and by the truth state the step fired from. The
//! vector is what a downstream reranker consumes; here it is computed and
//! serialized, never interpreted.

use serde::Serialize;

use natlog_core::{EdgeType, NatlogRelation, NUM_EDGE_TYPES, NUM_RELATIONS};

use crate::history::StepKind;

/// Step counts along one justification path.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct FeatureVector {
    /// Mutations taken, per edge type, while the path was in a true state.
    pub mutations_from_true: [u32; NUM_EDGE_TYPES],
    /// Mutations taken, per edge type, while the path was in a false state.
    pub mutations_from_false: [u32; NUM_EDGE_TYPES],
    /// Deletions taken, per projected natural-logic relation.
    pub deletions: [u32; NUM_RELATIONS],
    /// Focus moves; structural only, but their count bounds path length.
    pub index_moves: u32,
}

impl FeatureVector {
    /// Accumulate features from steps paired with the truth state each step
    /// fired from (the parent's state, not the child's).
    #[must_use]
    pub fn from_steps<'a, I>(steps: I) -> Self
    where
        I: IntoIterator<Item = (StepKind, bool)>,
    {
        let mut features = Self::default();
        for (step, from_truth) in steps {
            match step {
                StepKind::Start => {}
                StepKind::Mutation { edge_type, .. } => {
                    let bucket = if from_truth {
                        &mut features.mutations_from_true
                    } else {
                        &mut features.mutations_from_false
                    };
                    bucket[edge_type.index()] += 1;
                }
                StepKind::Deletion { relation } => {
                    features.deletions[relation.index()] += 1;
                }
                StepKind::IndexMove => features.index_moves += 1,
            }
        }
        features
    }

    /// Total count of semantic edits (mutations and deletions).
    #[must_use]
    pub fn edit_count(&self) -> u32 {
        let mutations: u32 = self
            .mutations_from_true
            .iter()
            .chain(self.mutations_from_false.iter())
            .sum();
        mutations + self.deletions.iter().sum::<u32>()
    }

    /// Whether any step flipped or voided truth: a deletion projecting to
    /// negation, alternation, or cover, or a mutation along a negating edge
    /// (antonym, quantifier negation). A path with none is a pure entailment
    /// chain.
    #[must_use]
    pub fn any_truth_flip(&self) -> bool {
        let flip_deletion = [
            NatlogRelation::Negation,
            NatlogRelation::Alternation,
            NatlogRelation::Cover,
        ]
        .iter()
        .any(|r| self.deletions[r.index()] > 0);
        let flip_mutation = [EdgeType::Antonym, EdgeType::QuantifierNegate]
            .iter()
            .any(|e| {
                self.mutations_from_true[e.index()] + self.mutations_from_false[e.index()] > 0
            });
        flip_deletion || flip_mutation
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use natlog_core::EdgeType;

    #[test]
    fn counts_bucket_by_truth_state() {
        let steps = vec![
            (StepKind::Start, true),
            (
                StepKind::Mutation {
                    edge_type: EdgeType::Hypernym,
                    relation: NatlogRelation::ForwardEntailment,
                },
                true,
            ),
            (
                StepKind::Deletion {
                    relation: NatlogRelation::Negation,
                },
                true,
            ),
            (
                StepKind::Mutation {
                    edge_type: EdgeType::Hypernym,
                    relation: NatlogRelation::ReverseEntailment,
                },
                false,
            ),
            (StepKind::IndexMove, false),
        ];
        let f = FeatureVector::from_steps(steps);
        assert_eq!(f.mutations_from_true[EdgeType::Hypernym.index()], 1);
        assert_eq!(f.mutations_from_false[EdgeType::Hypernym.index()], 1);
        assert_eq!(f.deletions[NatlogRelation::Negation.index()], 1);
        assert_eq!(f.index_moves, 1);
        assert_eq!(f.edit_count(), 3);
        assert!(f.any_truth_flip());
    }

    #[test]
    fn negating_mutation_counts_as_a_truth_flip() {
        let steps = vec![
            (StepKind::Start, true),
            (
                StepKind::Mutation {
                    edge_type: EdgeType::Antonym,
                    relation: NatlogRelation::Alternation,
                },
                true,
            ),
        ];
        assert!(FeatureVector::from_steps(steps).any_truth_flip());
        let steps = vec![(
            StepKind::Mutation {
                edge_type: EdgeType::QuantifierNegate,
                relation: NatlogRelation::Negation,
            },
            false,
        )];
        assert!(FeatureVector::from_steps(steps).any_truth_flip());
        // An entailment mutation alone is not a flip.
        let steps = vec![(
            StepKind::Mutation {
                edge_type: EdgeType::Hypernym,
                relation: NatlogRelation::ForwardEntailment,
            },
            true,
        )];
        assert!(!FeatureVector::from_steps(steps).any_truth_flip());
    }

    #[test]
    fn empty_path_is_all_zero() {
        let f = FeatureVector::from_steps(std::iter::empty());
        assert_eq!(f, FeatureVector::default());
        assert_eq!(f.edit_count(), 0);
        assert!(!f.any_truth_flip());
    }
}
