//! Incremental hash algebra tests.

use super::tests::LEMURS_HAVE_TAILS;
use super::*;

const CATS_HAVE_TAILS: &str = "27970\t2\tnsubj\n60042\t0\troot\n125248\t2\tdobj\n";

#[test]
fn hash_is_order_independent() {
    let original = DependencyTree::from_conll(LEMURS_HAVE_TAILS).unwrap();
    // Same tree, root listed first, governors renumbered consistently.
    let permuted =
        DependencyTree::from_conll("60042\t0\troot\n73918\t1\tnsubj\n125248\t1\tdobj\n").unwrap();
    assert_eq!(original.hash(), permuted.hash());
}

#[test]
fn hash_depends_on_edge_direction() {
    // Same words and relation, but governor and dependent roles swapped.
    let a = DependencyTree::from_conll("10\t0\troot\n20\t1\tdobj\n").unwrap();
    let b = DependencyTree::from_conll("20\t0\troot\n10\t1\tdobj\n").unwrap();
    assert_ne!(a.hash(), b.hash());
}

#[test]
fn hash_depends_on_relation() {
    let a = DependencyTree::from_conll("10\t0\troot\n20\t1\tdobj\n").unwrap();
    let b = DependencyTree::from_conll("10\t0\troot\n20\t1\tnsubj\n").unwrap();
    assert_ne!(a.hash(), b.hash());
}

#[test]
fn mutation_matches_rebuilt_tree() {
    let lemurs = DependencyTree::from_conll(LEMURS_HAVE_TAILS).unwrap();
    let cats = DependencyTree::from_conll(CATS_HAVE_TAILS).unwrap();
    let mutated = lemurs.update_hash_from_mutation(lemurs.hash(), 0, 73_918, 60_042, 27_970);
    assert_eq!(mutated, cats.hash());
}

#[test]
fn mutation_of_inner_node_touches_child_edges() {
    let a = DependencyTree::from_conll("1\t0\troot\n2\t1\tdobj\n").unwrap();
    let b = DependencyTree::from_conll("9\t0\troot\n2\t1\tdobj\n").unwrap();
    let mutated = a.update_hash_from_mutation(a.hash(), 0, 1, crate::types::ROOT_WORD, 9);
    assert_eq!(mutated, b.hash());
}

#[test]
fn mutation_round_trips() {
    let tree = DependencyTree::from_conll(LEMURS_HAVE_TAILS).unwrap();
    for index in 0..tree.len() as u8 {
        let old_word = tree.word_at(index);
        let gov = tree.token(index).governor;
        let gov_word = if gov == ROOT {
            crate::types::ROOT_WORD
        } else {
            tree.word_at(gov)
        };
        let there = tree.update_hash_from_mutation(tree.hash(), index, old_word, gov_word, 999);
        assert_ne!(there, tree.hash());
        let back = tree.update_hash_from_mutation(there, index, 999, gov_word, old_word);
        assert_eq!(back, tree.hash());
    }
}

#[test]
fn mutation_round_trips_random_words() {
    use rand::{Rng, SeedableRng};
    let mut rng = rand::rngs::StdRng::seed_from_u64(0x5eed);
    let tree = DependencyTree::from_conll(LEMURS_HAVE_TAILS).unwrap();
    for _ in 0..256 {
        let index = rng.gen_range(0..tree.len()) as u8;
        let new_word = rng.gen_range(0..crate::types::ROOT_WORD);
        let old_word = tree.word_at(index);
        let gov = tree.token(index).governor;
        let gov_word = if gov == ROOT {
            crate::types::ROOT_WORD
        } else {
            tree.word_at(gov)
        };
        let there =
            tree.update_hash_from_mutation(tree.hash(), index, old_word, gov_word, new_word);
        let back = tree.update_hash_from_mutation(there, index, new_word, gov_word, old_word);
        assert_eq!(back, tree.hash());
    }
}

#[test]
fn deletion_matches_rebuilt_tree() {
    let full = DependencyTree::from_conll(LEMURS_HAVE_TAILS).unwrap();
    // "have tails", governors renumbered after dropping the subject.
    let trimmed = DependencyTree::from_conll("60042\t0\troot\n125248\t1\tdobj\n").unwrap();
    let mask = full.create_delete_mask(0);
    assert_eq!(mask, 0b001);
    let deleted = full.update_hash_from_deletions(full.hash(), 0, 73_918, 60_042, mask);
    assert_eq!(deleted, trimmed.hash());
}

#[test]
fn subtree_deletion_removes_all_edges() {
    // have -> tail -> black: deleting "tail" also removes the amod edge.
    let full = DependencyTree::from_conll("60042\t0\troot\n125248\t1\tdobj\n200\t2\tamod\n").unwrap();
    let trimmed = DependencyTree::from_conll("60042\t0\troot\n").unwrap();
    let mask = full.create_delete_mask(1);
    assert_eq!(mask, 0b110);
    let deleted = full.update_hash_from_deletions(full.hash(), 1, 125_248, 60_042, mask);
    assert_eq!(deleted, trimmed.hash());
}

#[test]
fn deletion_uses_supplied_words_for_stale_edges() {
    // Mutate the root 60042 -> 777 first, then delete its dobj child. The
    // child's incoming edge must be removed against the mutated governor.
    let full = DependencyTree::from_conll(LEMURS_HAVE_TAILS).unwrap();
    let after_mutation =
        full.update_hash_from_mutation(full.hash(), 1, 60_042, crate::types::ROOT_WORD, 777);
    let expected = DependencyTree::from_conll("73918\t2\tnsubj\n777\t0\troot\n").unwrap();
    let mask = full.create_delete_mask(2);
    let deleted = full.update_hash_from_deletions(after_mutation, 2, 125_248, 777, mask);
    assert_eq!(deleted, expected.hash());
}
