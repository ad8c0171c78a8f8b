//! CLI error type and exit-code mapping.
//!
//! | Code | Meaning |
//! |------|---------|
//! | 0 | Success |
//! | 1 | IO error |
//! | 2 | Search machinery fault |
//! | 3 | Data load failure (graph, knowledge base, tree) |
//! | 4 | Invalid input (directive, flag, output encoding) |

use thiserror::Error;

use natlog_core::CoreError;
use natlog_search::SearchError;

/// Anything a CLI command can fail with.
#[derive(Debug, Error)]
pub enum CliError {
    /// Reading input or writing output failed.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Graph, knowledge base, or tree data failed to load.
    #[error(transparent)]
    Core(#[from] CoreError),

    /// The search machinery itself failed.
    #[error(transparent)]
    Search(#[from] SearchError),

    /// A `%` directive line was malformed.
    #[error("bad directive at line {line}: {message}")]
    Directive { line: usize, message: String },

    /// A command-line flag carried an unusable value.
    #[error("bad flag value: {0}")]
    Flag(String),

    /// JSON output failed to encode.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl CliError {
    /// Process exit code for this failure.
    #[must_use]
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::Io(_) => 1,
            Self::Search(_) => 2,
            Self::Core(_) => 3,
            Self::Directive { .. } | Self::Flag(_) | Self::Serialization(_) => 4,
        }
    }
}
