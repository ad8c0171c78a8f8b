//! Cost calculus tests: the truth state machine, policy tables, and
//! projection through quantifier scopes.

use natlog_core::{DependencyTree, Edge, EdgeType, Monotonicity, NatlogRelation};

use super::*;
use crate::node::SearchNode;

const CATS_EAT_MICE: &str = "200\t2\tnsubj\n300\t0\troot\n400\t2\tdobj\n";

// "all cats eat mice": token 0 heads an anti-additive subject scope over
// "cats" and a multiplicative object scope over "mice".
const ALL_CATS_EAT_MICE: &str = "100\t2\tdet\t-\t-\tanti-additive:2-3\tmultiplicative:4-5\n\
                                 200\t3\tnsubj\n\
                                 300\t0\troot\n\
                                 400\t3\tdobj\n";

fn tree(conll: &str) -> DependencyTree {
    DependencyTree::from_conll(conll).unwrap()
}

fn node_at(tree: &DependencyTree, index: u8) -> SearchNode {
    let gov = tree.token(index).governor;
    let gov_word = if gov == natlog_core::ROOT {
        natlog_core::ROOT_WORD
    } else {
        tree.word_at(gov)
    };
    SearchNode::initial(tree.hash(), index, tree.tagged_word_at(index), gov_word, true, false)
}

fn edge(edge_type: EdgeType) -> Edge {
    Edge {
        source: 999,
        source_sense: 0,
        sink: 200,
        sink_sense: 0,
        edge_type,
        cost: 1.0,
    }
}

fn close(a: f32, b: f32) -> bool {
    (a - b).abs() < 1e-6
}

#[test]
fn transition_state_machine() {
    use NatlogRelation::*;
    for truth in [true, false] {
        assert_eq!(transition_state(truth, Equivalent), Some(truth));
        assert_eq!(transition_state(truth, ForwardEntailment), Some(truth));
        assert_eq!(transition_state(truth, ReverseEntailment), Some(truth));
        assert_eq!(transition_state(truth, Negation), Some(!truth));
        assert_eq!(transition_state(truth, Independence), None);
    }
    assert_eq!(transition_state(true, Alternation), Some(false));
    assert_eq!(transition_state(false, Alternation), None);
    assert_eq!(transition_state(true, Cover), None);
    assert_eq!(transition_state(false, Cover), Some(true));
}

#[test]
fn hypernym_is_cheap_in_upward_context() {
    let t = tree(CATS_EAT_MICE);
    let node = node_at(&t, 0);
    let (cost, truth) = SynSearchCosts::strict().mutation_cost(&t, &node, &edge(EdgeType::Hypernym), true);
    assert!(close(cost, 0.02), "cost was {cost}");
    assert!(truth);
}

#[test]
fn hypernym_in_downward_scope_projects_to_reverse_entailment() {
    let t = tree(ALL_CATS_EAT_MICE);
    let node = node_at(&t, 1);
    // Strict forbids generalizing under "all"; soft merely prices it.
    let (strict_cost, strict_truth) =
        SynSearchCosts::strict().mutation_cost(&t, &node, &edge(EdgeType::Hypernym), true);
    assert!(strict_cost.is_infinite());
    assert!(strict_truth);
    let (soft_cost, soft_truth) =
        SynSearchCosts::soft().mutation_cost(&t, &node, &edge(EdgeType::Hypernym), true);
    assert!(close(soft_cost, 0.11), "cost was {soft_cost}");
    assert!(soft_truth);
    // Hyponym is the sound direction there.
    let (hypo_cost, _) =
        SynSearchCosts::strict().mutation_cost(&t, &node, &edge(EdgeType::Hyponym), true);
    assert!(close(hypo_cost, 0.02), "cost was {hypo_cost}");
}

#[test]
fn quantifier_override_replaces_static_polarity() {
    let t = tree(ALL_CATS_EAT_MICE);
    // As if "all" were already morphed to an upward quantifier on this path.
    let base = node_at(&t, 1);
    let node = base.with_quantifier_mutation(
        base.fact_hash(),
        base.word(),
        true,
        0,
        0,
        Monotonicity::Up,
        Monotonicity::Up,
    );
    let (cost, truth) =
        SynSearchCosts::strict().mutation_cost(&t, &node, &edge(EdgeType::Hypernym), true);
    assert!(close(cost, 0.02), "cost was {cost}");
    assert!(truth);
}

#[test]
fn object_scope_stays_upward_under_all() {
    let t = tree(ALL_CATS_EAT_MICE);
    let node = node_at(&t, 3);
    let (cost, _) =
        SynSearchCosts::strict().mutation_cost(&t, &node, &edge(EdgeType::Hypernym), true);
    assert!(close(cost, 0.02), "cost was {cost}");
}

#[test]
fn independence_edits_are_never_finite() {
    let t = tree(CATS_EAT_MICE);
    let node = node_at(&t, 0);
    let (cost, truth) =
        SynSearchCosts::soft().mutation_cost(&t, &node, &edge(EdgeType::SubtreeInsert), true);
    assert!(cost.is_infinite());
    assert!(truth);
}

#[test]
fn deleting_an_argument_generalizes() {
    let t = tree(CATS_EAT_MICE);
    let node = node_at(&t, 1);
    let relation = t.token(2).relation;
    let (cost, truth) = SynSearchCosts::soft().insertion_cost(&t, &node, 2, relation, true);
    assert!(close(cost, 0.02), "cost was {cost}");
    assert!(truth);
}

#[test]
fn deleting_a_negation_flips_truth() {
    let t = tree("300\t0\troot\n5\t1\tneg\n");
    let node = node_at(&t, 0);
    let relation = t.token(1).relation;
    let costs = SynSearchCosts::soft();
    let (cost, truth) = costs.insertion_cost(&t, &node, 1, relation, true);
    assert!(close(cost, 0.11), "cost was {cost}");
    assert!(!truth);
    let (cost, truth) = costs.insertion_cost(&t, &node, 1, relation, false);
    assert!(close(cost, 0.11), "cost was {cost}");
    assert!(truth);
}

#[test]
fn policies_agree_on_sound_transitions() {
    let t = tree(CATS_EAT_MICE);
    let node = node_at(&t, 0);
    let e = edge(EdgeType::Synonym);
    for policy in [CostPolicy::Strict, CostPolicy::Intermediate, CostPolicy::Soft] {
        let (cost, truth) = policy.costs().mutation_cost(&t, &node, &e, true);
        assert!(close(cost, 0.0), "{policy:?} cost was {cost}");
        assert!(truth);
    }
}

#[test]
fn default_policy_is_soft() {
    assert_eq!(CostPolicy::default(), CostPolicy::Soft);
}
