//! Command handlers.

pub mod hash;
pub mod kb;
pub mod search;
