//! Frontier containers for the search loop.

use std::cmp::Ordering;
use std::collections::{BinaryHeap, VecDeque};

use crate::history::StepKind;
use crate::node::SearchNode;
use crate::options::FrontierStrategy;

/// One enqueued candidate state.
///
/// `cost` is the true accumulated path cost; `priority` is what the frontier
/// orders by (equal to `cost` under UCS, the edit depth under FIFO).
#[derive(Debug, Clone)]
pub(crate) struct FrontierEntry {
    pub priority: f32,
    pub seq: u64,
    pub cost: f32,
    pub node: SearchNode,
    pub step: StepKind,
}

impl PartialEq for FrontierEntry {
    fn eq(&self, other: &Self) -> bool {
        self.seq == other.seq
    }
}

impl Eq for FrontierEntry {}

impl PartialOrd for FrontierEntry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for FrontierEntry {
    fn cmp(&self, other: &Self) -> Ordering {
        // Reverse ordering so BinaryHeap (max-heap) pops the cheapest entry;
        // NaN sinks to the bottom. Ties break toward the older entry.
        match (self.priority.is_nan(), other.priority.is_nan()) {
            (true, true) => Ordering::Equal,
            (true, false) => Ordering::Less,
            (false, true) => Ordering::Greater,
            (false, false) => other
                .priority
                .partial_cmp(&self.priority)
                .unwrap_or(Ordering::Equal)
                .then_with(|| other.seq.cmp(&self.seq)),
        }
    }
}

/// The open set, under either frontier discipline.
#[derive(Debug)]
pub(crate) enum Frontier {
    Ucs(BinaryHeap<FrontierEntry>),
    Fifo(VecDeque<FrontierEntry>),
}

impl Frontier {
    pub fn new(strategy: FrontierStrategy) -> Self {
        match strategy {
            FrontierStrategy::Ucs => Frontier::Ucs(BinaryHeap::new()),
            FrontierStrategy::Fifo => Frontier::Fifo(VecDeque::new()),
        }
    }

    pub fn push(&mut self, entry: FrontierEntry) {
        match self {
            Frontier::Ucs(heap) => heap.push(entry),
            Frontier::Fifo(queue) => queue.push_back(entry),
        }
    }

    pub fn pop(&mut self) -> Option<FrontierEntry> {
        match self {
            Frontier::Ucs(heap) => heap.pop(),
            Frontier::Fifo(queue) => queue.pop_front(),
        }
    }

    pub fn drain(self) -> Vec<FrontierEntry> {
        match self {
            Frontier::Ucs(heap) => heap.into_sorted_vec().into_iter().rev().collect(),
            Frontier::Fifo(queue) => queue.into_iter().collect(),
        }
    }
}
