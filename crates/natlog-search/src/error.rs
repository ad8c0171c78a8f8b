//! Error types for natlog-search.

use thiserror::Error;

/// Result type alias for search operations.
pub type SearchResult<T> = Result<T, SearchError>;

/// Failures of the search machinery itself.
///
/// Resource exhaustion (tick budget, full history) is not an error: the
/// search returns a partial [`crate::SearchResponse`] instead. These
/// variants cover genuine machinery faults.
#[derive(Debug, Error)]
pub enum SearchError {
    /// A worker thread panicked; the search cannot be trusted.
    #[error("Search worker panicked: {worker}")]
    WorkerPanicked {
        /// Which of the three roles failed.
        worker: &'static str,
    },

    /// A channel disconnected while its producer was still expected to run.
    #[error("Search channel disconnected unexpectedly: {channel}")]
    ChannelDisconnected {
        /// Which channel broke.
        channel: &'static str,
    },
}
