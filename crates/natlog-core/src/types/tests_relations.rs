//! Projection table tests.

use super::*;
use Monotonicity::*;
use NatlogRelation::*;
use QuantifierType as Q;

#[test]
fn up_passes_entailments_through() {
    assert_eq!(project(Up, Q::Both, ForwardEntailment), ForwardEntailment);
    assert_eq!(project(Up, Q::Both, ReverseEntailment), ReverseEntailment);
    assert_eq!(project(Up, Q::None, ForwardEntailment), ForwardEntailment);
    assert_eq!(project(Up, Q::None, Equivalent), Equivalent);
}

#[test]
fn down_swaps_entailment_directions() {
    assert_eq!(project(Down, Q::Both, ForwardEntailment), ReverseEntailment);
    assert_eq!(project(Down, Q::Both, ReverseEntailment), ForwardEntailment);
    assert_eq!(project(Down, Q::None, ForwardEntailment), ReverseEntailment);
}

#[test]
fn down_swaps_alternation_and_cover() {
    assert_eq!(project(Down, Q::Both, Alternation), Cover);
    assert_eq!(project(Down, Q::Both, Cover), Alternation);
}

#[test]
fn flat_collapses_to_independence() {
    for rel in [
        ForwardEntailment,
        ReverseEntailment,
        Negation,
        Alternation,
        Cover,
        Independence,
    ] {
        assert_eq!(project(Flat, Q::Both, rel), Independence);
    }
    assert_eq!(project(Flat, Q::Both, Equivalent), Equivalent);
}

#[test]
fn negation_survives_only_both_type_quantifiers() {
    assert_eq!(project(Up, Q::Both, Negation), Negation);
    assert_eq!(project(Up, Q::Additive, Negation), Cover);
    assert_eq!(project(Up, Q::Multiplicative, Negation), Alternation);
    assert_eq!(project(Up, Q::None, Negation), Independence);
}

#[test]
fn invalid_polarity_yields_independence() {
    assert_eq!(project(Invalid, Q::Both, Equivalent), Independence);
    assert_eq!(project(Invalid, Q::Both, ForwardEntailment), Independence);
}

#[test]
fn equivalence_is_a_projection_fixed_point_outside_invalid() {
    for mono in [Up, Down, Flat] {
        for q in [Q::None, Q::Additive, Q::Multiplicative, Q::Both] {
            assert_eq!(project(mono, q, Equivalent), Equivalent);
        }
    }
}
