//! Order-independent incremental tree hashing.
//!
//! The hash of a tree is the XOR over every (governor word, relation,
//! dependent word) edge of a per-edge FNV-1a hash. XOR accumulation makes
//! the hash invariant under token reordering, and lets a single mutation or
//! deletion be applied by toggling just the affected edge contributions —
//! the central performance invariant enabling deep search trees.
//!
//! FNV-1a is used rather than a cryptographic hash because the value must be
//! recomputed on the hot search path; collision resistance at 64 bits is
//! adequate for knowledge-base membership.

const FNV_OFFSET: u64 = 0xcbf2_9ce4_8422_2325;
const FNV_PRIME: u64 = 0x0000_0100_0000_01b3;

#[inline]
const fn fnv1a_byte(state: u64, byte: u8) -> u64 {
    (state ^ byte as u64).wrapping_mul(FNV_PRIME)
}

/// Hash one dependency edge.
///
/// Asymmetric in (governor, dependent) by construction: the governor word is
/// folded in before the relation, the dependent after, so swapping the two
/// roles changes the hash even though XOR accumulation ignores edge order.
#[inline]
#[must_use]
pub fn edge_hash(governor_word: u32, relation: u8, dependent_word: u32) -> u64 {
    let mut h = FNV_OFFSET;
    let g = governor_word.to_le_bytes();
    h = fnv1a_byte(h, g[0]);
    h = fnv1a_byte(h, g[1]);
    h = fnv1a_byte(h, g[2]);
    h = fnv1a_byte(h, g[3]);
    h = fnv1a_byte(h, relation);
    let d = dependent_word.to_le_bytes();
    h = fnv1a_byte(h, d[0]);
    h = fnv1a_byte(h, d[1]);
    h = fnv1a_byte(h, d[2]);
    h = fnv1a_byte(h, d[3]);
    h
}
