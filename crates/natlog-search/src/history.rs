//! Append-only search history arenas.
//!
//! Every node the search commits to memory lives in an arena, addressed by
//! `u32` index; a [`SearchNode`] points at its parent through that index
//! rather than a pointer. The sequential engine uses the plain [`History`];
//! the concurrent engine uses [`SharedHistory`] with a single designated
//! writer and lock-free readers.

use std::cell::UnsafeCell;
use std::mem::MaybeUninit;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use serde::Serialize;

use natlog_core::{EdgeType, NatlogRelation};

use crate::node::{SearchNode, NO_BACKPOINTER};

/// How a history entry was reached from its parent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum StepKind {
    /// The start node of a search.
    Start,
    /// A lexical mutation of the focus word.
    Mutation {
        /// The graph edge kind taken.
        edge_type: EdgeType,
        /// The natural-logic relation after projection through quantifiers.
        relation: NatlogRelation,
    },
    /// A dependent subtree deletion.
    Deletion {
        /// The projected relation of the deletion.
        relation: NatlogRelation,
    },
    /// The focus advanced to another token; no semantic content.
    IndexMove,
}

/// One committed search state with its provenance.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct HistoryEntry {
    /// The committed node.
    pub node: SearchNode,
    /// How the node was reached.
    pub step: StepKind,
}

/// Single-threaded history arena with a hard capacity.
///
/// Capacity is fixed up front (one slot per permitted tick plus the start
/// node) so a runaway search degrades to an early stop, never a realloc
/// storm or an OOM.
#[derive(Debug)]
pub struct History {
    entries: Vec<HistoryEntry>,
    capacity: usize,
}

impl History {
    /// An empty arena that will accept at most `capacity` entries.
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        Self {
            entries: Vec::with_capacity(capacity),
            capacity,
        }
    }

    /// Commit a node, returning its index, or `None` when the arena is full.
    pub fn push(&mut self, node: SearchNode, step: StepKind) -> Option<u32> {
        if self.entries.len() >= self.capacity {
            return None;
        }
        let index = self.entries.len() as u32;
        self.entries.push(HistoryEntry { node, step });
        Some(index)
    }

    /// The committed entry at `index`.
    #[must_use]
    pub fn entry(&self, index: u32) -> &HistoryEntry {
        &self.entries[index as usize]
    }

    /// The committed node at `index`.
    #[must_use]
    pub fn node(&self, index: u32) -> &SearchNode {
        &self.entries[index as usize].node
    }

    /// Number of committed entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether nothing has been committed yet.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Whether the arena has no free slots left.
    #[must_use]
    pub fn is_full(&self) -> bool {
        self.entries.len() >= self.capacity
    }

    /// Indices from the start node down to `index`, start first.
    #[must_use]
    pub fn path_to_root(&self, index: u32) -> Vec<u32> {
        let mut path = vec![index];
        let mut cursor = index;
        while self.entries[cursor as usize].node.backpointer() != NO_BACKPOINTER {
            cursor = self.entries[cursor as usize].node.backpointer();
            path.push(cursor);
        }
        path.reverse();
        path
    }
}

/// Concurrent history arena: one writer, many readers, no locks.
///
/// Slots are pre-allocated and written exactly once by the single
/// [`HistoryWriter`]; the published length is advanced with a release store
/// after the slot contents are in place, and readers load it with acquire.
/// An index below the published length therefore always refers to a fully
/// initialized, immutable slot.
pub struct SharedHistory {
    slots: Box<[UnsafeCell<MaybeUninit<HistoryEntry>>]>,
    published: AtomicUsize,
}

// SAFETY: slots below `published` are immutable (written once before the
// release store that published them, never touched again); slots at or above
// `published` are only touched by the unique HistoryWriter. Readers never
// dereference unpublished slots.
unsafe impl Sync for SharedHistory {}
unsafe impl Send for SharedHistory {}

impl SharedHistory {
    /// Allocate an arena and the unique writer for it.
    #[must_use]
    pub fn new(capacity: usize) -> (Arc<Self>, HistoryWriter) {
        let mut slots = Vec::with_capacity(capacity);
        slots.resize_with(capacity, || UnsafeCell::new(MaybeUninit::uninit()));
        let shared = Arc::new(Self {
            slots: slots.into_boxed_slice(),
            published: AtomicUsize::new(0),
        });
        let writer = HistoryWriter {
            shared: Arc::clone(&shared),
        };
        (shared, writer)
    }

    /// Number of published entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.published.load(Ordering::Acquire)
    }

    /// Whether nothing has been published yet.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// The published entry at `index`, or `None` if not yet published.
    #[must_use]
    pub fn entry(&self, index: u32) -> Option<HistoryEntry> {
        if (index as usize) >= self.len() {
            return None;
        }
        // SAFETY: index < published, so the slot was fully written before
        // the release store we just observed.
        Some(unsafe { (*self.slots[index as usize].get()).assume_init() })
    }

    /// Indices from the start node down to `index`, start first.
    ///
    /// Returns `None` if any index on the chain is unpublished, which cannot
    /// happen for indices handed out by the writer.
    #[must_use]
    pub fn path_to_root(&self, index: u32) -> Option<Vec<u32>> {
        let mut path = vec![index];
        let mut cursor = self.entry(index)?;
        while cursor.node.backpointer() != NO_BACKPOINTER {
            let parent = cursor.node.backpointer();
            path.push(parent);
            cursor = self.entry(parent)?;
        }
        path.reverse();
        Some(path)
    }
}

impl std::fmt::Debug for SharedHistory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SharedHistory")
            .field("capacity", &self.slots.len())
            .field("published", &self.len())
            .finish()
    }
}

/// The unique writing handle for a [`SharedHistory`].
///
/// Not `Clone`: single-writer discipline is enforced by ownership.
#[derive(Debug)]
pub struct HistoryWriter {
    shared: Arc<SharedHistory>,
}

impl HistoryWriter {
    /// Commit a node, returning its index, or `None` when the arena is full.
    pub fn push(&mut self, node: SearchNode, step: StepKind) -> Option<u32> {
        let index = self.shared.published.load(Ordering::Relaxed);
        if index >= self.shared.slots.len() {
            return None;
        }
        // SAFETY: we are the unique writer and `index` is unpublished, so no
        // reader can observe the slot until the release store below.
        unsafe {
            (*self.shared.slots[index].get()).write(HistoryEntry { node, step });
        }
        self.shared.published.store(index + 1, Ordering::Release);
        Some(index as u32)
    }

    /// Whether the arena has no free slots left.
    #[must_use]
    pub fn is_full(&self) -> bool {
        self.shared.published.load(Ordering::Relaxed) >= self.shared.slots.len()
    }

    /// Read access to the shared arena.
    #[must_use]
    pub fn shared(&self) -> &Arc<SharedHistory> {
        &self.shared
    }
}
