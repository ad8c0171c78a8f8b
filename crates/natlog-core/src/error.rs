//! Error types for natlog-core.
//!
//! This module defines the central error type [`CoreError`] used throughout
//! the natlog-core crate, along with the [`CoreResult<T>`] type alias.
//!
//! Tree construction is fail-fast: a malformed CoNLL block is rejected as a
//! whole, never silently truncated into a partial tree.

use thiserror::Error;

/// Result type alias for core operations.
pub type CoreResult<T> = Result<T, CoreError>;

/// Top-level error type for natlog-core operations.
#[derive(Debug, Error)]
pub enum CoreError {
    /// A CoNLL tree block failed to parse.
    ///
    /// # When This Occurs
    ///
    /// - Too few tab-separated fields on a token line
    /// - A field that does not parse as its expected type
    /// - A governor index outside the token range
    #[error("Tree parse error at line {line}: {message}")]
    TreeParse {
        /// 1-indexed line within the tree block
        line: usize,
        /// Description of the parse failure
        message: String,
    },

    /// A tree exceeded the fixed token capacity.
    ///
    /// Trees are bounded so that delete masks fit in a `u32` and search
    /// nodes stay cache-line sized.
    #[error("Tree has {count} tokens; maximum is {max}")]
    TooManyTokens {
        /// Number of tokens in the offending tree
        count: usize,
        /// Maximum supported token count
        max: usize,
    },

    /// No token had governor 0 (ROOT).
    #[error("Tree has no root token")]
    MissingRoot,

    /// More than one token had governor 0 (ROOT).
    #[error("Tree has {count} root tokens; exactly one is required")]
    MultipleRoots {
        /// Number of tokens claiming ROOT
        count: usize,
    },

    /// The governor graph contains a cycle and is therefore not a tree.
    #[error("Governor graph contains a cycle through token {index}")]
    CyclicGovernors {
        /// A token index on the cycle
        index: usize,
    },

    /// A dependency relation label was not in the static relation table.
    ///
    /// The relation table is exhaustive by construction; an unknown label
    /// indicates a schema mismatch with the upstream annotator.
    #[error("Unknown dependency relation: {0}")]
    UnknownRelation(String),

    /// A quantifier monotonicity specifier was not recognized.
    #[error("Unknown quantifier monotonicity: {0}")]
    UnknownMonotonicity(String),

    /// Two quantifiers were attached to the same token index.
    #[error("Token {index} already carries a quantifier")]
    DuplicateQuantifier {
        /// Token index with the duplicate attachment
        index: usize,
    },

    /// A quantifier span referenced tokens outside the tree.
    #[error("Quantifier span {begin}..{end} out of range for tree of length {len}")]
    SpanOutOfRange {
        /// 0-indexed inclusive span begin
        begin: usize,
        /// 0-indexed exclusive span end
        end: usize,
        /// Token count of the tree
        len: usize,
    },

    /// A word id exceeded the 24-bit limit of the packed representation.
    #[error("Word id {word} exceeds 24-bit limit")]
    WordIdOverflow {
        /// The offending word id
        word: u64,
    },

    /// A word sense exceeded the 5-bit limit of the packed representation.
    #[error("Word sense {sense} exceeds limit of 31")]
    SenseOverflow {
        /// The offending sense
        sense: u64,
    },

    /// A mutation graph TSV line failed to parse.
    #[error("Graph parse error at line {line}: {message}")]
    GraphParse {
        /// 1-indexed line in the graph file
        line: usize,
        /// Description of the parse failure
        message: String,
    },

    /// A fact-hash file was truncated or misaligned.
    ///
    /// The on-disk format is a flat sequence of little-endian u64 values;
    /// any length that is not a multiple of 8 is corrupt.
    #[error("Knowledge base file corrupt: {message}")]
    KbFormat {
        /// Description of the corruption
        message: String,
    },

    /// An underlying I/O operation failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
