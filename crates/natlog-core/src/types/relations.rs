//! Natural-logic relations and quantifier projection.
//!
//! The seven MacCartney relations describe how substituting a term at a
//! position changes the truth of the enclosing sentence. [`project`] carries
//! a relation upward through one enclosing quantifier scope; composing
//! projections from the narrowest scope outward yields the effective
//! relation at the sentence level.

use serde::{Deserialize, Serialize};

use super::monotonicity::{Monotonicity, QuantifierType};

/// Number of natural-logic relations, for fixed-size cost tables.
pub const NUM_RELATIONS: usize = 7;

/// A natural-logic (MacCartney) relation between two terms.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
#[repr(u8)]
pub enum NatlogRelation {
    /// x ≡ y: substitution never changes truth.
    Equivalent = 0,
    /// x ⊏ y: y strictly more general than x.
    ForwardEntailment = 1,
    /// x ⊐ y: y strictly more specific than x.
    ReverseEntailment = 2,
    /// x ^ y: exhaustive and exclusive (e.g. alive / dead).
    Negation = 3,
    /// x | y: exclusive but not exhaustive (e.g. cat / dog).
    Alternation = 4,
    /// x ‿ y: exhaustive but not exclusive (e.g. animal / non-cat).
    Cover = 5,
    /// x # y: no informative relation.
    Independence = 6,
}

impl NatlogRelation {
    /// Index into fixed-size relation-keyed tables.
    #[must_use]
    pub const fn index(self) -> usize {
        self as usize
    }
}

/// Project a lexical relation through one enclosing quantifier scope.
///
/// Under UP polarity the entailment relations pass through unchanged; under
/// DOWN they are inverted per Icard's scheme (forward and reverse entailment
/// swap, alternation and cover swap). FLAT collapses everything except
/// equivalence to independence.
///
/// The negation family additionally needs the quantifier's algebraic class
/// to survive: negation projects intact only through a quantifier that is
/// both additive and multiplicative, weakens to cover or alternation through
/// a one-sided quantifier, and is lost otherwise.
#[must_use]
pub fn project(
    monotonicity: Monotonicity,
    quantifier_type: QuantifierType,
    relation: NatlogRelation,
) -> NatlogRelation {
    use NatlogRelation::*;

    match monotonicity {
        Monotonicity::Invalid => Independence,
        Monotonicity::Flat => match relation {
            Equivalent => Equivalent,
            _ => Independence,
        },
        Monotonicity::Up => match relation {
            Negation => match quantifier_type {
                QuantifierType::Both => Negation,
                QuantifierType::Additive => Cover,
                QuantifierType::Multiplicative => Alternation,
                QuantifierType::None => Independence,
            },
            Alternation => match quantifier_type {
                QuantifierType::Both | QuantifierType::Multiplicative => Alternation,
                _ => Independence,
            },
            Cover => match quantifier_type {
                QuantifierType::Both | QuantifierType::Additive => Cover,
                _ => Independence,
            },
            r => r,
        },
        Monotonicity::Down => match relation {
            ForwardEntailment => ReverseEntailment,
            ReverseEntailment => ForwardEntailment,
            Negation => match quantifier_type {
                QuantifierType::Both => Negation,
                QuantifierType::Additive => Alternation,
                QuantifierType::Multiplicative => Cover,
                QuantifierType::None => Independence,
            },
            Alternation => match quantifier_type {
                QuantifierType::Both | QuantifierType::Additive => Cover,
                _ => Independence,
            },
            Cover => match quantifier_type {
                QuantifierType::Both | QuantifierType::Multiplicative => Alternation,
                _ => Independence,
            },
            r => r,
        },
    }
}
