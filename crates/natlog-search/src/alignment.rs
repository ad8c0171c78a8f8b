//! Soft alignment against candidate premises.
//!
//! When a search carries a set of candidate premise word bags, every visited
//! state is scored against them: a bonus per shared word, a penalty per
//! query word the premise lacks. The best-scoring (candidate, state) pair
//! seen anywhere in the search is reported even when no exact
//! knowledge-base match exists, so a caller always gets a nearest-premise
//! signal.

use serde::{Deserialize, Serialize};

/// One candidate premise: an opaque caller-side id and its word bag.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AlignmentCandidate {
    /// Caller-side identifier, echoed back in the summary.
    pub id: u64,
    /// Word ids of the premise, duplicates allowed.
    pub words: Vec<u32>,
}

/// Alignment scoring setup for one search invocation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AlignmentSpec {
    /// Candidate premises to score against.
    pub candidates: Vec<AlignmentCandidate>,
    /// Score added per query word present in the candidate.
    pub match_bonus: f32,
    /// Score subtracted per query word absent from the candidate.
    pub mismatch_penalty: f32,
}

impl AlignmentSpec {
    /// A spec with the stock bonus/penalty weights.
    #[must_use]
    pub fn new(candidates: Vec<AlignmentCandidate>) -> Self {
        Self {
            candidates,
            match_bonus: 1.0,
            mismatch_penalty: 0.25,
        }
    }

    /// Score one state's live word bag against every candidate, returning
    /// the best, or `None` when there are no candidates.
    #[must_use]
    pub fn score_best(&self, state_words: &[u32]) -> Option<AlignmentSummary> {
        let mut best: Option<AlignmentSummary> = None;
        for candidate in &self.candidates {
            let matched = state_words
                .iter()
                .filter(|w| candidate.words.contains(w))
                .count() as f32;
            let missed = state_words.len() as f32 - matched;
            let score = self.match_bonus * matched - self.mismatch_penalty * missed;
            if best.as_ref().map_or(true, |b| score > b.score) {
                best = Some(AlignmentSummary {
                    candidate: candidate.id,
                    score,
                });
            }
        }
        best
    }
}

/// The best alignment seen during a search.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct AlignmentSummary {
    /// Id of the winning candidate.
    pub candidate: u64,
    /// Its score; higher is closer.
    pub score: f32,
}

impl AlignmentSummary {
    /// Keep the better of two observations.
    #[must_use]
    pub fn max(self, other: Self) -> Self {
        if other.score > self.score {
            other
        } else {
            self
        }
    }
}
