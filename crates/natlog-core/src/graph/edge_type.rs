//! Edit edge kinds and their lexical relations.

use serde::{Deserialize, Serialize};

use crate::types::NatlogRelation;

/// Number of edge types, for fixed-size cost tables.
pub const NUM_EDGE_TYPES: usize = 14;

/// Kind of lexical edit an edge performs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
#[repr(u8)]
pub enum EdgeType {
    /// Move to a more general term (cat -> animal).
    Hypernym = 0,
    /// Move to a more specific term (animal -> cat).
    Hyponym = 1,
    /// Move to an antonym (tall -> short).
    Antonym = 2,
    /// Move to an equivalent term (couch -> sofa).
    Synonym = 3,
    /// Move to a part (France -> Paris); location tokens only.
    Meronym = 4,
    /// Move to a whole (Paris -> France); location tokens only.
    Holonym = 5,
    /// Strengthen a quantifier (some -> all).
    QuantifierUp = 6,
    /// Weaken a quantifier (all -> some).
    QuantifierDown = 7,
    /// Negate a quantifier (all -> no).
    QuantifierNegate = 8,
    /// Reword a quantifier without changing its strength (all -> every).
    QuantifierReword = 9,
    /// Pin down an unspecified word sense.
    SenseAdd = 10,
    /// Drop back to an unspecified word sense.
    SenseRemove = 11,
    /// Insert a dependent subtree (priced via the deletion move).
    SubtreeInsert = 12,
    /// Delete a dependent subtree.
    SubtreeDelete = 13,
}

impl EdgeType {
    /// Index into fixed-size edge-type-keyed tables.
    #[must_use]
    pub const fn index(self) -> usize {
        self as usize
    }

    /// The natural-logic relation this edit instantiates, before any
    /// quantifier projection.
    ///
    /// Meronymy maps to the entailment pair because the search only admits
    /// it on location-flagged tokens, where containment behaves like
    /// generalization ("in Paris" entails "in France").
    #[must_use]
    pub const fn lexical_relation(self) -> NatlogRelation {
        match self {
            EdgeType::Hypernym | EdgeType::QuantifierUp | EdgeType::Holonym => {
                NatlogRelation::ForwardEntailment
            }
            EdgeType::Hyponym | EdgeType::QuantifierDown | EdgeType::Meronym => {
                NatlogRelation::ReverseEntailment
            }
            EdgeType::Antonym => NatlogRelation::Alternation,
            EdgeType::QuantifierNegate => NatlogRelation::Negation,
            EdgeType::Synonym
            | EdgeType::QuantifierReword
            | EdgeType::SenseAdd
            | EdgeType::SenseRemove => NatlogRelation::Equivalent,
            EdgeType::SubtreeInsert | EdgeType::SubtreeDelete => NatlogRelation::Independence,
        }
    }

    /// Whether this edit only applies to quantifier tokens.
    #[must_use]
    pub const fn is_quantifier_edit(self) -> bool {
        matches!(
            self,
            EdgeType::QuantifierUp
                | EdgeType::QuantifierDown
                | EdgeType::QuantifierNegate
                | EdgeType::QuantifierReword
        )
    }

    /// Whether this edit only applies to location-flagged tokens.
    #[must_use]
    pub const fn is_location_edit(self) -> bool {
        matches!(self, EdgeType::Meronym | EdgeType::Holonym)
    }

    /// Parse the TSV column label used in graph files.
    #[must_use]
    pub fn from_label(label: &str) -> Option<Self> {
        match label {
            "hypernym" => Some(EdgeType::Hypernym),
            "hyponym" => Some(EdgeType::Hyponym),
            "antonym" => Some(EdgeType::Antonym),
            "synonym" => Some(EdgeType::Synonym),
            "meronym" => Some(EdgeType::Meronym),
            "holonym" => Some(EdgeType::Holonym),
            "quantup" => Some(EdgeType::QuantifierUp),
            "quantdown" => Some(EdgeType::QuantifierDown),
            "quantnegate" => Some(EdgeType::QuantifierNegate),
            "quantreword" => Some(EdgeType::QuantifierReword),
            "senseadd" => Some(EdgeType::SenseAdd),
            "senseremove" => Some(EdgeType::SenseRemove),
            "insert" => Some(EdgeType::SubtreeInsert),
            "delete" => Some(EdgeType::SubtreeDelete),
            _ => None,
        }
    }
}
