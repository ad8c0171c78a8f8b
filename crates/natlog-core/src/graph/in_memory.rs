//! In-memory mutation graph backed by a hash-map adjacency.

use std::collections::{HashMap, HashSet};
use std::io::BufRead;

use tracing::info;

use crate::error::{CoreError, CoreResult};
use crate::types::{Monotonicity, TaggedWord, MAX_SENSE, MAX_WORD_ID};

use super::{Edge, EdgeType, MutationGraph};

/// Mutation graph held entirely in memory.
///
/// Adjacency is keyed on the packed (word, sense) graph key, so a lookup is
/// one hash probe returning a borrowed slice.
#[derive(Debug, Default)]
pub struct InMemoryGraph {
    adjacency: HashMap<u32, Vec<Edge>>,
    glosses: HashMap<u32, String>,
    vocabulary: HashSet<u32>,
}

impl InMemoryGraph {
    /// Empty graph.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert one edge, keyed by its sink.
    pub fn add_edge(&mut self, edge: Edge) {
        self.vocabulary.insert(edge.source);
        self.vocabulary.insert(edge.sink);
        let key = TaggedWord::new_unchecked(edge.sink, edge.sink_sense, Monotonicity::Invalid)
            .graph_key();
        self.adjacency.entry(key).or_default().push(edge);
    }

    /// Attach a gloss to a word id.
    pub fn add_gloss(&mut self, word: u32, gloss: impl Into<String>) {
        self.vocabulary.insert(word);
        self.glosses.insert(word, gloss.into());
    }

    /// Load a TSV edge list:
    /// `source <TAB> source_sense <TAB> sink <TAB> sink_sense <TAB> type <TAB> cost`.
    pub fn from_reader<R: BufRead>(reader: R) -> CoreResult<Self> {
        let mut graph = Self::new();
        for (line_no, line) in reader.lines().enumerate() {
            let line = line?;
            let line_no = line_no + 1;
            if line.trim().is_empty() || line.starts_with('#') {
                continue;
            }
            let fields: Vec<&str> = line.split('\t').collect();
            if fields.len() != 6 {
                return Err(CoreError::GraphParse {
                    line: line_no,
                    message: format!("expected 6 fields, got {}", fields.len()),
                });
            }
            let parse_word = |raw: &str| -> CoreResult<u32> {
                let word: u32 = raw.parse().map_err(|_| CoreError::GraphParse {
                    line: line_no,
                    message: format!("bad word id: {raw:?}"),
                })?;
                // >= keeps the ROOT sentinel id out of the vocabulary.
                if word >= MAX_WORD_ID {
                    return Err(CoreError::WordIdOverflow { word: word as u64 });
                }
                Ok(word)
            };
            let parse_sense = |raw: &str| -> CoreResult<u8> {
                let sense: u8 = raw.parse().map_err(|_| CoreError::GraphParse {
                    line: line_no,
                    message: format!("bad sense: {raw:?}"),
                })?;
                if sense > MAX_SENSE {
                    return Err(CoreError::SenseOverflow { sense: sense as u64 });
                }
                Ok(sense)
            };
            let edge_type =
                EdgeType::from_label(fields[4]).ok_or_else(|| CoreError::GraphParse {
                    line: line_no,
                    message: format!("unknown edge type: {:?}", fields[4]),
                })?;
            let cost: f32 = fields[5].parse().map_err(|_| CoreError::GraphParse {
                line: line_no,
                message: format!("bad cost: {:?}", fields[5]),
            })?;
            if !cost.is_finite() || cost < 0.0 {
                return Err(CoreError::GraphParse {
                    line: line_no,
                    message: format!("cost must be finite and non-negative, got {cost}"),
                });
            }
            graph.add_edge(Edge {
                source: parse_word(fields[0])?,
                source_sense: parse_sense(fields[1])?,
                sink: parse_word(fields[2])?,
                sink_sense: parse_sense(fields[3])?,
                edge_type,
                cost,
            });
        }
        info!(
            vocab = graph.vocabulary.len(),
            keys = graph.adjacency.len(),
            "loaded mutation graph"
        );
        Ok(graph)
    }

    /// Total number of stored edges.
    #[must_use]
    pub fn edge_count(&self) -> usize {
        self.adjacency.values().map(Vec::len).sum()
    }
}

impl MutationGraph for InMemoryGraph {
    fn incoming_edges(&self, word: &TaggedWord) -> &[Edge] {
        self.adjacency
            .get(&word.graph_key())
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    fn gloss(&self, word: u32) -> Option<&str> {
        self.glosses.get(&word).map(String::as_str)
    }

    fn vocab_size(&self) -> usize {
        self.vocabulary.len()
    }

    fn contains_deletion(&self, edge: &Edge) -> bool {
        let key = TaggedWord::new_unchecked(edge.sink, edge.sink_sense, Monotonicity::Invalid);
        self.incoming_edges(&key).iter().any(|e| {
            e.edge_type == EdgeType::SubtreeDelete
                && e.source == edge.source
                && e.source_sense == edge.source_sense
        })
    }
}
