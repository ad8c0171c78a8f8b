//! Packed search-node representation.
//!
//! One [`SearchNode`] is a complete point in the edit search: which fact the
//! edited tree now denotes (its hash), where the focus sits, what has been
//! deleted, the hypothesized truth value, and a backpointer into the
//! [`crate::History`] arena. The layout is 32 bytes, pinned by test, so a
//! deep search stays within cache and the history arena within memory.

use serde::Serialize;

use natlog_core::{Monotonicity, TaggedWord, MAX_QUANTIFIER_COUNT};

/// Backpointer value of the start node.
pub const NO_BACKPOINTER: u32 = u32::MAX;

const FLAG_TRUTH: u8 = 1 << 0;
const FLAG_ALL_QUANTIFIERS_SEEN: u8 = 1 << 1;

/// One point in the search space. 32 bytes, `Copy`, immutable once built.
///
/// The only reference to another node is the backpointer index; paths are
/// reconstructed by index chasing through the history arena, never by
/// pointer chasing.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[repr(C)]
pub struct SearchNode {
    fact_hash: u64,
    word: u32,
    governor: u32,
    delete_mask: u32,
    backpointer: u32,
    token_index: u8,
    flags: u8,
    /// 6 quantifier slots x (subject, object) x 2 bits of [`Monotonicity`].
    quantifier_bits: [u8; 3],
    _reserved: [u8; 3],
}

impl SearchNode {
    /// The start node of a search over `tree`, focused at `token_index`.
    #[must_use]
    pub fn initial(
        fact_hash: u64,
        token_index: u8,
        word: TaggedWord,
        governor: u32,
        truth: bool,
        all_quantifiers_seen: bool,
    ) -> Self {
        let mut flags = 0;
        if truth {
            flags |= FLAG_TRUTH;
        }
        if all_quantifiers_seen {
            flags |= FLAG_ALL_QUANTIFIERS_SEEN;
        }
        Self {
            fact_hash,
            word: word.to_packed(),
            governor,
            delete_mask: 0,
            backpointer: NO_BACKPOINTER,
            token_index,
            flags,
            quantifier_bits: [0; 3],
            _reserved: [0; 3],
        }
    }

    /// The order-independent hash of the edited tree at this node.
    #[must_use]
    pub fn fact_hash(&self) -> u64 {
        self.fact_hash
    }

    /// The current focus token index. Always a non-deleted token.
    #[must_use]
    pub fn token_index(&self) -> u8 {
        self.token_index
    }

    /// The word currently held at the focus, with its contextual polarity.
    #[must_use]
    pub fn word(&self) -> TaggedWord {
        TaggedWord::from_packed(self.word)
    }

    /// Word id currently held by the focus token's governor.
    #[must_use]
    pub fn governor(&self) -> u32 {
        self.governor
    }

    /// Bitset of deleted token indices. Monotone along any path.
    #[must_use]
    pub fn delete_mask(&self) -> u32 {
        self.delete_mask
    }

    /// Index of the parent node in history, or [`NO_BACKPOINTER`].
    #[must_use]
    pub fn backpointer(&self) -> u32 {
        self.backpointer
    }

    /// The hypothesized truth value at this node.
    #[must_use]
    pub fn truth(&self) -> bool {
        self.flags & FLAG_TRUTH != 0
    }

    /// Whether the pre-root quantifier chain has been fully visited.
    #[must_use]
    pub fn all_quantifiers_seen(&self) -> bool {
        self.flags & FLAG_ALL_QUANTIFIERS_SEEN != 0
    }

    /// Number of tokens still present, given the tree length.
    #[must_use]
    pub fn live_token_count(&self, tree_len: usize) -> usize {
        tree_len - self.delete_mask.count_ones() as usize
    }

    /// The per-quantifier polarity overrides, decoded for projection.
    ///
    /// Slot order is the tree's quantifier table order; `Invalid` means the
    /// quantifier has not been morphed on this path and the static table
    /// applies.
    #[must_use]
    pub fn quantifier_overrides(&self) -> [(Monotonicity, Monotonicity); MAX_QUANTIFIER_COUNT] {
        let mut out = [(Monotonicity::Invalid, Monotonicity::Invalid); MAX_QUANTIFIER_COUNT];
        for (slot, entry) in out.iter_mut().enumerate() {
            *entry = (
                Monotonicity::from_bits(self.quantifier_nibble(slot) & 0b11),
                Monotonicity::from_bits((self.quantifier_nibble(slot) >> 2) & 0b11),
            );
        }
        out
    }

    /// Whether the quantifier in `slot` has been morphed on this path.
    #[must_use]
    pub fn quantifier_morphed(&self, slot: usize) -> bool {
        self.quantifier_nibble(slot) != 0
    }

    fn quantifier_nibble(&self, slot: usize) -> u8 {
        debug_assert!(slot < MAX_QUANTIFIER_COUNT);
        let bit = slot * 4;
        let byte = self.quantifier_bits[bit / 8];
        (byte >> (bit % 8)) & 0x0F
    }

    fn set_quantifier_nibble(&mut self, slot: usize, value: u8) {
        debug_assert!(slot < MAX_QUANTIFIER_COUNT);
        let bit = slot * 4;
        let mask = 0x0Fu8 << (bit % 8);
        self.quantifier_bits[bit / 8] =
            (self.quantifier_bits[bit / 8] & !mask) | ((value & 0x0F) << (bit % 8));
    }

    /// Child with the focus word mutated.
    #[must_use]
    pub fn with_mutation(
        &self,
        fact_hash: u64,
        word: TaggedWord,
        truth: bool,
        backpointer: u32,
    ) -> Self {
        let mut child = *self;
        child.fact_hash = fact_hash;
        child.word = word.to_packed();
        child.backpointer = backpointer;
        child.set_truth(truth);
        child
    }

    /// Child with a morphed quantifier: a mutation that additionally records
    /// the quantifier's new scope polarities in the override table.
    #[must_use]
    #[allow(clippy::too_many_arguments)]
    pub fn with_quantifier_mutation(
        &self,
        fact_hash: u64,
        word: TaggedWord,
        truth: bool,
        backpointer: u32,
        slot: usize,
        subject: Monotonicity,
        object: Monotonicity,
    ) -> Self {
        let mut child = self.with_mutation(fact_hash, word, truth, backpointer);
        child.set_quantifier_nibble(slot, subject.to_bits() | (object.to_bits() << 2));
        child
    }

    /// Child with a dependent subtree deleted. The focus stays put.
    #[must_use]
    pub fn with_deletion(
        &self,
        fact_hash: u64,
        delete_mask: u32,
        truth: bool,
        backpointer: u32,
    ) -> Self {
        debug_assert_eq!(
            self.delete_mask & delete_mask,
            self.delete_mask,
            "delete mask must be monotone along a path"
        );
        let mut child = *self;
        child.fact_hash = fact_hash;
        child.delete_mask = delete_mask;
        child.backpointer = backpointer;
        child.set_truth(truth);
        child
    }

    /// Child with the focus advanced to another (non-deleted) token.
    #[must_use]
    pub fn with_index_move(
        &self,
        token_index: u8,
        word: TaggedWord,
        governor: u32,
        all_quantifiers_seen: bool,
        backpointer: u32,
    ) -> Self {
        let mut child = *self;
        child.token_index = token_index;
        child.word = word.to_packed();
        child.governor = governor;
        child.backpointer = backpointer;
        if all_quantifiers_seen {
            child.flags |= FLAG_ALL_QUANTIFIERS_SEEN;
        }
        child
    }

    fn set_truth(&mut self, truth: bool) {
        if truth {
            self.flags |= FLAG_TRUTH;
        } else {
            self.flags &= !FLAG_TRUTH;
        }
    }

    /// State identity for duplicate suppression: two nodes with equal state
    /// reach the same downstream search space.
    #[must_use]
    pub fn state_key(&self) -> (u64, u8, bool, u32) {
        (self.fact_hash, self.token_index, self.truth(), self.delete_mask)
    }
}
