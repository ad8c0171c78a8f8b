//! The entailment search engines.
//!
//! [`search`] runs the loop on the calling thread; [`search_concurrent`]
//! splits it across three workers. Both share the same expansion code and
//! produce the same committed states, matches, and tick counts for a given
//! query.

mod concurrent;
mod expand;
mod frontier;
mod sequential;

#[cfg(test)]
mod tests;

pub use concurrent::search_concurrent;
pub use sequential::search;
