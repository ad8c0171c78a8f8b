//! Immutable packed dependency tree with incremental hash algebra.
//!
//! A [`DependencyTree`] is constructed once per query or premise from a
//! CoNLL-like block (or programmatically in tests) and never mutated. The
//! search layer represents edits virtually: a search node carries the
//! currently mutated word and a delete mask, and the tree provides the hash
//! algebra to update the fact hash incrementally for those edits.

mod conll;
mod hash;
mod relations;

#[cfg(test)]
mod tests_hash;

pub use hash::edge_hash;
pub use relations::{
    deletion_relation, relation_index, relation_name, DEPENDENCY_RELATIONS,
};

use crate::error::{CoreError, CoreResult};
use crate::types::{
    project, Monotonicity, NatlogRelation, QuantifierType, TaggedWord, MAX_CHILDREN,
    MAX_QUANTIFIER_COUNT, MAX_QUERY_LENGTH, ROOT_WORD,
};

/// Sentinel governor index marking the root token.
pub const ROOT: u8 = 31;

/// One token of a parsed sentence.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Token {
    /// Vocabulary word id (24-bit).
    pub word: u32,
    /// Word sense (5-bit, 0 = unspecified).
    pub sense: u8,
    /// Coarse POS tag, first letter lowercased (0 = unspecified).
    pub pos: u8,
    /// Governor token index, or [`ROOT`].
    pub governor: u8,
    /// Interned incoming dependency relation.
    pub relation: u8,
    /// Whether this token can name a location (enables meronym edges).
    pub is_location: bool,
}

/// A quantifier's scopes, attached to the token that heads it.
///
/// Spans are 0-indexed half-open over token indices. An empty span never
/// covers anything, so a subject-only quantifier leaves the object side at
/// `0..0`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QuantifierSpan {
    /// Token index heading the quantifier.
    pub token_index: u8,
    /// Algebraic class of the subject (restrictor) scope.
    pub subject_type: QuantifierType,
    /// Polarity the quantifier induces over its subject scope.
    pub subject_mono: Monotonicity,
    /// Subject span begin (inclusive).
    pub subject_begin: u8,
    /// Subject span end (exclusive).
    pub subject_end: u8,
    /// Algebraic class of the object (body) scope.
    pub object_type: QuantifierType,
    /// Polarity the quantifier induces over its object scope.
    pub object_mono: Monotonicity,
    /// Object span begin (inclusive).
    pub object_begin: u8,
    /// Object span end (exclusive).
    pub object_end: u8,
}

impl QuantifierSpan {
    /// Total number of tokens under either scope; used to order quantifiers
    /// narrowest-first when projecting.
    #[must_use]
    pub fn span_size(&self) -> u8 {
        (self.subject_end - self.subject_begin) + (self.object_end - self.object_begin)
    }

    /// The (class, polarity) this quantifier contributes at `index`, if
    /// either scope covers it. The subject scope wins when both do.
    #[must_use]
    pub fn covers(&self, index: u8) -> Option<(QuantifierType, Monotonicity)> {
        if self.subject_begin <= index && index < self.subject_end {
            Some((self.subject_type, self.subject_mono))
        } else if self.object_begin <= index && index < self.object_end {
            Some((self.object_type, self.object_mono))
        } else {
            None
        }
    }
}

/// An immutable dependency-parsed sentence.
///
/// Invariants, enforced at construction:
/// - at most [`MAX_QUERY_LENGTH`] tokens;
/// - exactly one token has governor [`ROOT`];
/// - the governor graph is acyclic;
/// - a token index heads at most one quantifier.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DependencyTree {
    tokens: Vec<Token>,
    quantifiers: Vec<QuantifierSpan>,
    hash: u64,
}

impl DependencyTree {
    /// Build a tree from tokens and quantifier spans, validating invariants
    /// and precomputing the fact hash.
    pub fn new(tokens: Vec<Token>, quantifiers: Vec<QuantifierSpan>) -> CoreResult<Self> {
        if tokens.len() > MAX_QUERY_LENGTH {
            return Err(CoreError::TooManyTokens {
                count: tokens.len(),
                max: MAX_QUERY_LENGTH,
            });
        }
        let roots = tokens.iter().filter(|t| t.governor == ROOT).count();
        if roots == 0 {
            return Err(CoreError::MissingRoot);
        }
        if roots > 1 {
            return Err(CoreError::MultipleRoots { count: roots });
        }
        for (i, token) in tokens.iter().enumerate() {
            if token.governor != ROOT && token.governor as usize >= tokens.len() {
                return Err(CoreError::TreeParse {
                    line: i + 1,
                    message: format!("governor {} out of range", token.governor),
                });
            }
            // Walk up; a chain longer than the tree means a cycle.
            let mut cursor = token.governor;
            let mut steps = 0;
            while cursor != ROOT {
                cursor = tokens[cursor as usize].governor;
                steps += 1;
                if steps > tokens.len() {
                    return Err(CoreError::CyclicGovernors { index: i });
                }
            }
        }
        if quantifiers.len() > MAX_QUANTIFIER_COUNT {
            return Err(CoreError::TooManyTokens {
                count: quantifiers.len(),
                max: MAX_QUANTIFIER_COUNT,
            });
        }
        for (qi, q) in quantifiers.iter().enumerate() {
            if quantifiers[..qi].iter().any(|p| p.token_index == q.token_index) {
                return Err(CoreError::DuplicateQuantifier {
                    index: q.token_index as usize,
                });
            }
            for (begin, end) in [
                (q.subject_begin, q.subject_end),
                (q.object_begin, q.object_end),
            ] {
                if begin > end || end as usize > tokens.len() {
                    return Err(CoreError::SpanOutOfRange {
                        begin: begin as usize,
                        end: end as usize,
                        len: tokens.len(),
                    });
                }
            }
        }

        let mut tree = Self {
            tokens,
            quantifiers,
            hash: 0,
        };
        tree.hash = tree.compute_hash();
        Ok(tree)
    }

    /// Parse a CoNLL-like block (one token per line, blank-line terminated).
    pub fn from_conll(block: &str) -> CoreResult<Self> {
        conll::parse(block)
    }

    /// Number of tokens.
    #[must_use]
    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    /// Whether the tree has no tokens. Always false for a constructed tree.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    /// The token at `index`.
    #[must_use]
    pub fn token(&self, index: u8) -> &Token {
        &self.tokens[index as usize]
    }

    /// The word id at `index`.
    #[must_use]
    pub fn word_at(&self, index: u8) -> u32 {
        self.tokens[index as usize].word
    }

    /// The token's word and sense as a [`TaggedWord`] with unset polarity.
    #[must_use]
    pub fn tagged_word_at(&self, index: u8) -> TaggedWord {
        let t = &self.tokens[index as usize];
        TaggedWord::new_unchecked(t.word, t.sense, Monotonicity::Invalid)
    }

    /// Index of the root token.
    #[must_use]
    pub fn root(&self) -> u8 {
        // Construction guarantees exactly one.
        self.tokens
            .iter()
            .position(|t| t.governor == ROOT)
            .unwrap_or(0) as u8
    }

    /// The quantifier side table.
    #[must_use]
    pub fn quantifiers(&self) -> &[QuantifierSpan] {
        &self.quantifiers
    }

    /// The quantifier headed by `index`, if any.
    #[must_use]
    pub fn quantifier_at(&self, index: u8) -> Option<&QuantifierSpan> {
        self.quantifiers.iter().find(|q| q.token_index == index)
    }

    /// Position of the quantifier headed by `index` in the side table.
    #[must_use]
    pub fn quantifier_slot(&self, index: u8) -> Option<usize> {
        self.quantifiers.iter().position(|q| q.token_index == index)
    }

    /// Token indices of quantifier heads, narrowest total scope first.
    ///
    /// This is the order the search visits quantifiers before descending
    /// into the rest of the tree.
    #[must_use]
    pub fn quantifiers_in_scope_order(&self) -> Vec<u8> {
        let mut order: Vec<&QuantifierSpan> = self.quantifiers.iter().collect();
        order.sort_by_key(|q| q.span_size());
        order.into_iter().map(|q| q.token_index).collect()
    }

    /// Direct dependents of `index` in document order, as (child index,
    /// relation) pairs, silently truncated at [`MAX_CHILDREN`].
    pub fn dependents(&self, index: u8) -> impl Iterator<Item = (u8, u8)> + '_ {
        self.tokens
            .iter()
            .enumerate()
            .filter(move |(_, t)| t.governor == index)
            .map(|(i, t)| (i as u8, t.relation))
            .take(MAX_CHILDREN)
    }

    /// Bitmask of `root` and every token it transitively governs.
    ///
    /// Computed by fixed-point iteration: deletion must always remove whole
    /// subtrees, never leave an orphan pointing at a deleted governor.
    #[must_use]
    pub fn create_delete_mask(&self, root: u8) -> u32 {
        let mut mask = 1u32 << root;
        loop {
            let mut changed = false;
            for (i, token) in self.tokens.iter().enumerate() {
                if mask & (1 << i) == 0
                    && token.governor != ROOT
                    && mask & (1 << token.governor) != 0
                {
                    mask |= 1 << i;
                    changed = true;
                }
            }
            if !changed {
                return mask;
            }
        }
    }

    /// The order-independent fact hash of the unedited tree.
    #[must_use]
    pub fn hash(&self) -> u64 {
        self.hash
    }

    fn compute_hash(&self) -> u64 {
        let mut h = 0u64;
        for token in &self.tokens {
            h ^= edge_hash(self.governor_word_of(token), token.relation, token.word);
        }
        h
    }

    fn governor_word_of(&self, token: &Token) -> u32 {
        if token.governor == ROOT {
            ROOT_WORD
        } else {
            self.tokens[token.governor as usize].word
        }
    }

    /// Toggle the hash contributions affected by mutating the word at
    /// `index` from `old_word` to `new_word`, with the governor currently
    /// holding `governor_word`.
    ///
    /// Contract: only valid when the path mutates the tree top-to-bottom
    /// (parent before child), so that every child of `index` still holds its
    /// static tree word. Violating the ordering silently produces a wrong
    /// hash; it is a documented invariant of the search move order, not a
    /// runtime check.
    #[must_use]
    pub fn update_hash_from_mutation(
        &self,
        old_hash: u64,
        index: u8,
        old_word: u32,
        governor_word: u32,
        new_word: u32,
    ) -> u64 {
        let relation = self.tokens[index as usize].relation;
        let mut h = old_hash;
        h ^= edge_hash(governor_word, relation, old_word);
        h ^= edge_hash(governor_word, relation, new_word);
        for (child, child_relation) in self.dependents(index) {
            let child_word = self.word_at(child);
            h ^= edge_hash(old_word, child_relation, child_word);
            h ^= edge_hash(new_word, child_relation, child_word);
        }
        h
    }

    /// XOR out every edge whose dependent is newly deleted.
    ///
    /// `newly_deleted` is the set of indices added to the delete mask by this
    /// deletion. The deleted subtree head at `deletion_index` uses the
    /// supplied (`deletion_word`, `governor_word`) pair, since both ends of
    /// its edge may have been mutated along the path; every deeper token
    /// still holds its static tree words by the top-down contract.
    #[must_use]
    pub fn update_hash_from_deletions(
        &self,
        old_hash: u64,
        deletion_index: u8,
        deletion_word: u32,
        governor_word: u32,
        newly_deleted: u32,
    ) -> u64 {
        let mut h = old_hash;
        for (i, token) in self.tokens.iter().enumerate() {
            if newly_deleted & (1 << i) == 0 {
                continue;
            }
            if i as u8 == deletion_index {
                h ^= edge_hash(governor_word, token.relation, deletion_word);
            } else if token.governor == deletion_index {
                h ^= edge_hash(deletion_word, token.relation, token.word);
            } else {
                h ^= edge_hash(self.governor_word_of(token), token.relation, token.word);
            }
        }
        h
    }

    /// Token indices in an order where every parent precedes its children
    /// (depth-first, children in document order).
    ///
    /// With `ignore_quantifiers`, tokens heading a quantifier are omitted
    /// from the order (the search visits them separately first) but their
    /// subtrees are still traversed.
    #[must_use]
    pub fn topological_sort(&self, ignore_quantifiers: bool) -> Vec<u8> {
        let mut order = Vec::with_capacity(self.tokens.len());
        let mut stack = vec![self.root()];
        while let Some(index) = stack.pop() {
            if !(ignore_quantifiers && self.quantifier_at(index).is_some()) {
                order.push(index);
            }
            let children: Vec<u8> = self.dependents(index).map(|(c, _)| c).collect();
            for child in children.into_iter().rev() {
                stack.push(child);
            }
        }
        order
    }

    /// Visit every quantifier whose scope covers `index`, narrowest scope
    /// first, yielding its class and polarity at that position.
    pub fn foreach_quantifier<F>(&self, index: u8, visitor: F)
    where
        F: FnMut(QuantifierType, Monotonicity),
    {
        self.foreach_quantifier_with_overrides(index, &[], visitor);
    }

    /// [`Self::foreach_quantifier`], with per-quantifier polarity overrides.
    ///
    /// `overrides` is parallel to [`Self::quantifiers`]; entry `(subject,
    /// object)` replaces the static polarity of the matching scope unless it
    /// is [`Monotonicity::Invalid`]. The search uses this to reflect an
    /// in-path quantifier mutation that has not (and never will be) written
    /// back to the tree.
    pub fn foreach_quantifier_with_overrides<F>(
        &self,
        index: u8,
        overrides: &[(Monotonicity, Monotonicity)],
        mut visitor: F,
    ) where
        F: FnMut(QuantifierType, Monotonicity),
    {
        let mut in_scope: Vec<(u8, QuantifierType, Monotonicity)> = Vec::new();
        for (qi, q) in self.quantifiers.iter().enumerate() {
            let Some((qtype, static_mono)) = q.covers(index) else {
                continue;
            };
            let mono = match overrides.get(qi) {
                Some(&(subj, obj)) => {
                    let is_subject = q.subject_begin <= index && index < q.subject_end;
                    let chosen = if is_subject { subj } else { obj };
                    if chosen == Monotonicity::Invalid {
                        static_mono
                    } else {
                        chosen
                    }
                }
                None => static_mono,
            };
            in_scope.push((q.span_size(), qtype, mono));
        }
        in_scope.sort_by_key(|&(size, _, _)| size);
        for (_, qtype, mono) in in_scope {
            visitor(qtype, mono);
        }
    }

    /// Polarity at `index`: FORWARD_ENTAILMENT projected through every
    /// enclosing quantifier, narrowest first.
    ///
    /// A position outside any quantifier scope is upward monotone.
    #[must_use]
    pub fn polarity_at(&self, index: u8, overrides: &[(Monotonicity, Monotonicity)]) -> Monotonicity {
        let mut relation = NatlogRelation::ForwardEntailment;
        self.foreach_quantifier_with_overrides(index, overrides, |qtype, mono| {
            relation = project(mono, qtype, relation);
        });
        match relation {
            NatlogRelation::ForwardEntailment | NatlogRelation::Equivalent => Monotonicity::Up,
            NatlogRelation::ReverseEntailment => Monotonicity::Down,
            _ => Monotonicity::Flat,
        }
    }
}

impl std::str::FromStr for DependencyTree {
    type Err = CoreError;

    fn from_str(block: &str) -> Result<Self, Self::Err> {
        Self::from_conll(block)
    }
}
