//! TaggedWord packing tests.

use super::*;

#[test]
fn packs_and_unpacks_all_fields() {
    let w = TaggedWord::new(123_456, 7, Monotonicity::Down).unwrap();
    assert_eq!(w.word(), 123_456);
    assert_eq!(w.sense(), 7);
    assert_eq!(w.polarity(), Monotonicity::Down);
}

#[test]
fn packed_size_is_four_bytes() {
    assert_eq!(std::mem::size_of::<TaggedWord>(), 4);
}

#[test]
fn max_field_values_round_trip() {
    let w = TaggedWord::new(MAX_WORD_ID, MAX_SENSE, Monotonicity::Flat).unwrap();
    assert_eq!(w.word(), MAX_WORD_ID);
    assert_eq!(w.sense(), MAX_SENSE);
    assert_eq!(w.polarity(), Monotonicity::Flat);
}

#[test]
fn rejects_overwide_fields() {
    assert!(TaggedWord::new(1 << 24, 0, Monotonicity::Up).is_err());
    assert!(TaggedWord::new(0, 32, Monotonicity::Up).is_err());
}

#[test]
fn graph_key_ignores_polarity() {
    let up = TaggedWord::new(42, 3, Monotonicity::Up).unwrap();
    let down = TaggedWord::new(42, 3, Monotonicity::Down).unwrap();
    assert_ne!(up, down);
    assert_eq!(up.graph_key(), down.graph_key());
}

#[test]
fn graph_key_distinguishes_senses() {
    let a = TaggedWord::new(42, 1, Monotonicity::Up).unwrap();
    let b = TaggedWord::new(42, 2, Monotonicity::Up).unwrap();
    assert_ne!(a.graph_key(), b.graph_key());
}

#[test]
fn with_polarity_preserves_word_and_sense() {
    let w = TaggedWord::new(99, 4, Monotonicity::Invalid).unwrap();
    let flipped = w.with_polarity(Monotonicity::Up);
    assert_eq!(flipped.word(), 99);
    assert_eq!(flipped.sense(), 4);
    assert_eq!(flipped.polarity(), Monotonicity::Up);
}

#[test]
fn packed_round_trip() {
    let w = TaggedWord::new(1000, 2, Monotonicity::Down).unwrap();
    assert_eq!(TaggedWord::from_packed(w.to_packed()), w);
}
