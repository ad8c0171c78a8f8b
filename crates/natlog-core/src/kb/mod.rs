//! Knowledge base: membership over 64-bit fact hashes.
//!
//! The search engine only ever asks one question of the knowledge base:
//! "is this fact hash known true". Backings are interchangeable behind the
//! [`KnowledgeBase`] trait; this crate ships the in-memory set plus the flat
//! little-endian file format used to materialize one.


use std::collections::HashSet;
use std::io::{BufReader, BufWriter, Read, Write};
use std::path::Path;

use tracing::info;

use crate::error::{CoreError, CoreResult};

/// Membership predicate over fact hashes.
pub trait KnowledgeBase: Send + Sync {
    /// Whether `fact_hash` is a known true fact.
    fn contains(&self, fact_hash: u64) -> bool;

    /// Number of known facts.
    fn len(&self) -> usize;

    /// Whether the knowledge base is empty.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Knowledge base backed by an in-memory hash set.
#[derive(Debug, Default, Clone)]
pub struct HashSetKb {
    facts: HashSet<u64>,
}

impl HashSetKb {
    /// Empty knowledge base.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from an iterator of fact hashes.
    pub fn from_hashes(hashes: impl IntoIterator<Item = u64>) -> Self {
        Self {
            facts: hashes.into_iter().collect(),
        }
    }

    /// Insert one fact hash.
    pub fn insert(&mut self, fact_hash: u64) {
        self.facts.insert(fact_hash);
    }

    /// Load from the flat fact-hash file format.
    pub fn load(path: &Path) -> CoreResult<Self> {
        let file = std::fs::File::open(path)?;
        let hashes = read_fact_hashes(BufReader::new(file))?;
        info!(facts = hashes.len(), path = %path.display(), "loaded knowledge base");
        Ok(Self::from_hashes(hashes))
    }
}

impl KnowledgeBase for HashSetKb {
    fn contains(&self, fact_hash: u64) -> bool {
        self.facts.contains(&fact_hash)
    }

    fn len(&self) -> usize {
        self.facts.len()
    }
}

/// Read a flat sequence of little-endian u64 fact hashes.
///
/// A trailing partial word means the file is corrupt, not short.
pub fn read_fact_hashes<R: Read>(mut reader: R) -> CoreResult<Vec<u64>> {
    let mut bytes = Vec::new();
    reader.read_to_end(&mut bytes)?;
    if bytes.len() % 8 != 0 {
        return Err(CoreError::KbFormat {
            message: format!("file length {} is not a multiple of 8", bytes.len()),
        });
    }
    Ok(bytes
        .chunks_exact(8)
        .map(|chunk| {
            let mut buf = [0u8; 8];
            buf.copy_from_slice(chunk);
            u64::from_le_bytes(buf)
        })
        .collect())
}

/// Write fact hashes in the flat little-endian format.
pub fn write_fact_hashes<W: Write>(writer: W, hashes: &[u64]) -> CoreResult<()> {
    let mut writer = BufWriter::new(writer);
    for hash in hashes {
        writer.write_all(&hash.to_le_bytes())?;
    }
    writer.flush()?;
    Ok(())
}
