//! Packed word + sense + polarity primitive.

use std::fmt;

use crate::error::CoreError;

use super::monotonicity::Monotonicity;

/// Maximum word id representable in the 24-bit word field.
pub const MAX_WORD_ID: u32 = (1 << 24) - 1;

/// Maximum word sense representable in the 5-bit sense field.
pub const MAX_SENSE: u8 = 31;

const SENSE_SHIFT: u32 = 24;
const POLARITY_SHIFT: u32 = 29;

/// A word with its sense and contextual polarity, packed into 31 bits.
///
/// Layout (low to high): 24-bit word id, 5-bit sense, 2-bit polarity.
/// Compared by all three fields for search-state equality; graph lookups key
/// on (word, sense) only via [`TaggedWord::graph_key`].
///
/// Polarity is contextual: it is a pure function of tree position and
/// quantifier scope, recomputed per search node, never ground truth.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct TaggedWord {
    packed: u32,
}

impl TaggedWord {
    /// Pack a (word, sense, polarity) triple, validating field widths.
    pub fn new(word: u32, sense: u8, polarity: Monotonicity) -> Result<Self, CoreError> {
        if word > MAX_WORD_ID {
            return Err(CoreError::WordIdOverflow { word: word as u64 });
        }
        if sense > MAX_SENSE {
            return Err(CoreError::SenseOverflow { sense: sense as u64 });
        }
        Ok(Self::new_unchecked(word, sense, polarity))
    }

    /// Pack without validation. Caller guarantees field widths.
    #[must_use]
    pub const fn new_unchecked(word: u32, sense: u8, polarity: Monotonicity) -> Self {
        let packed = (word & MAX_WORD_ID)
            | ((sense as u32 & 0x1F) << SENSE_SHIFT)
            | ((polarity.to_bits() as u32) << POLARITY_SHIFT);
        Self { packed }
    }

    /// The 24-bit word id.
    #[must_use]
    pub const fn word(self) -> u32 {
        self.packed & MAX_WORD_ID
    }

    /// The 5-bit word sense (0 = unspecified).
    #[must_use]
    pub const fn sense(self) -> u8 {
        ((self.packed >> SENSE_SHIFT) & 0x1F) as u8
    }

    /// The contextual polarity.
    #[must_use]
    pub const fn polarity(self) -> Monotonicity {
        Monotonicity::from_bits(((self.packed >> POLARITY_SHIFT) & 0b11) as u8)
    }

    /// Copy with a different polarity, word and sense unchanged.
    #[must_use]
    pub const fn with_polarity(self, polarity: Monotonicity) -> Self {
        Self::new_unchecked(self.word(), self.sense(), polarity)
    }

    /// Key for mutation-graph adjacency: (word, sense), polarity masked off.
    #[must_use]
    pub const fn graph_key(self) -> u32 {
        self.packed & ((0x1F << SENSE_SHIFT) | MAX_WORD_ID)
    }

    /// The raw 31-bit packed representation.
    #[must_use]
    pub const fn to_packed(self) -> u32 {
        self.packed
    }

    /// Rebuild from a raw packed representation.
    #[must_use]
    pub const fn from_packed(packed: u32) -> Self {
        Self {
            packed: packed & 0x7FFF_FFFF,
        }
    }
}

impl fmt::Debug for TaggedWord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "TaggedWord({}_{}{})",
            self.word(),
            self.sense(),
            match self.polarity() {
                Monotonicity::Up => "^",
                Monotonicity::Down => "v",
                Monotonicity::Flat => "-",
                Monotonicity::Invalid => "?",
            }
        )
    }
}
