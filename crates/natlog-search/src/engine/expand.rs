//! Node expansion, shared between the sequential and concurrent engines.
//!
//! Expansion is a pure function of (tree, graph, costs, options) and the
//! parent node: given the committed parent and its history index, produce
//! every admissible child below the cost threshold. The three edit families
//! are lexical mutations of the focus word, deletions of the focus token's
//! dependent subtrees, and the free move of the focus to the next token in
//! visit order.

use tracing::trace;

use natlog_core::{
    deletion_relation, project, DependencyTree, Edge, EdgeType, KnowledgeBase, Monotonicity,
    MutationGraph, NatlogRelation, TaggedWord, ROOT, ROOT_WORD,
};

use crate::costs::SynSearchCosts;
use crate::history::StepKind;
use crate::node::SearchNode;
use crate::options::SearchOptions;

/// A generated child: the node, its provenance, and its total path cost.
#[derive(Debug, Clone)]
pub(crate) struct Child {
    pub node: SearchNode,
    pub step: StepKind,
    pub cost: f32,
}

/// Immutable per-search state shared by every expansion.
pub(crate) struct SearchContext<'a> {
    pub tree: &'a DependencyTree,
    pub graph: &'a dyn MutationGraph,
    pub kb: &'a dyn KnowledgeBase,
    pub costs: SynSearchCosts,
    pub options: &'a SearchOptions,
    /// Quantifier heads, narrowest scope first; visited before the tree body.
    quantifier_order: Vec<u8>,
    /// Remaining visit order once quantifiers are done.
    move_order: Vec<u8>,
}

impl<'a> SearchContext<'a> {
    pub fn new(
        tree: &'a DependencyTree,
        graph: &'a dyn MutationGraph,
        kb: &'a dyn KnowledgeBase,
        options: &'a SearchOptions,
    ) -> Self {
        let quantifier_order = tree.quantifiers_in_scope_order();
        let move_order = tree.topological_sort(!quantifier_order.is_empty());
        Self {
            tree,
            graph,
            kb,
            costs: options.policy.costs(),
            options,
            quantifier_order,
            move_order,
        }
    }

    /// The start node: focused on the narrowest quantifier if any exist,
    /// otherwise on the root.
    pub fn start_node(&self) -> SearchNode {
        let start = self
            .quantifier_order
            .first()
            .copied()
            .unwrap_or_else(|| self.tree.root());
        let all_seen = self.quantifier_order.is_empty();
        SearchNode::initial(
            self.tree.hash(),
            start,
            self.word_at(start, &[]),
            self.static_governor_word(start),
            self.options.initial_truth,
            all_seen,
        )
    }

    /// Whether a committed node is a knowledge-base match.
    ///
    /// Degenerate facts are rejected: a state that has deleted its way down
    /// to a single token matches nothing, no matter what its hash says.
    pub fn is_match(&self, node: &SearchNode) -> bool {
        node.truth()
            && node.live_token_count(self.tree.len()) >= 2
            && self.kb.contains(node.fact_hash())
    }

    /// Generate every admissible child of `parent` into `out`.
    ///
    /// `parent_index` is the parent's committed history index; every child's
    /// backpointer is set to it. Children at or above the cost threshold are
    /// never produced.
    pub fn expand(&self, parent: &SearchNode, parent_index: u32, parent_cost: f32, out: &mut Vec<Child>) {
        self.expand_mutations(parent, parent_index, parent_cost, out);
        self.expand_deletions(parent, parent_index, parent_cost, out);
        self.expand_index_move(parent, parent_index, parent_cost, out);
        if !self.options.silent {
            trace!(
                focus = parent.token_index(),
                hash = parent.fact_hash(),
                children = out.len(),
                "expanded node"
            );
        }
    }

    fn expand_mutations(&self, parent: &SearchNode, parent_index: u32, parent_cost: f32, out: &mut Vec<Child>) {
        let focus = parent.token_index();
        let token = self.tree.token(focus);
        let word = parent.word();
        let quantifier_slot = self.tree.quantifier_slot(focus);

        for edge in self.graph.incoming_edges(&word) {
            let edge_type = edge.edge_type;
            // Subtree edits are structural, not lexical; handled below.
            if matches!(edge_type, EdgeType::SubtreeInsert | EdgeType::SubtreeDelete) {
                continue;
            }
            if edge_type.is_location_edit() && !token.is_location {
                continue;
            }
            let morph_slot = if edge_type.is_quantifier_edit() {
                // Quantifier edits apply once, to actual quantifier heads.
                match quantifier_slot {
                    Some(slot) if !parent.quantifier_morphed(slot) => Some(slot),
                    _ => continue,
                }
            } else {
                None
            };

            let (delta, new_truth) = self.costs.mutation_cost(self.tree, parent, edge, parent.truth());
            if !delta.is_finite() {
                continue;
            }
            let cost = parent_cost + delta;
            if cost >= self.options.cost_threshold {
                continue;
            }

            let new_hash = self.tree.update_hash_from_mutation(
                parent.fact_hash(),
                focus,
                word.word(),
                parent.governor(),
                edge.source,
            );
            let new_word = TaggedWord::new_unchecked(edge.source, edge.source_sense, word.polarity());
            let relation = self.projected_relation(parent, edge);
            let node = match morph_slot {
                Some(slot) => {
                    let (subject, object) = self.morphed_polarity(focus, edge_type);
                    parent.with_quantifier_mutation(
                        new_hash, new_word, new_truth, parent_index, slot, subject, object,
                    )
                }
                None => parent.with_mutation(new_hash, new_word, new_truth, parent_index),
            };
            out.push(Child {
                node,
                step: StepKind::Mutation { edge_type, relation },
                cost,
            });
        }
    }

    fn expand_deletions(&self, parent: &SearchNode, parent_index: u32, parent_cost: f32, out: &mut Vec<Child>) {
        let focus = parent.token_index();
        let children: Vec<(u8, u8)> = self.tree.dependents(focus).collect();
        for (child_index, child_relation) in children {
            if parent.delete_mask() & (1 << child_index) != 0 {
                continue;
            }
            // A sense-tagged dependent only deletes if the graph registers
            // that sense's deletion.
            let child_token = self.tree.token(child_index);
            if child_token.sense != 0 {
                let candidate = Edge {
                    source: child_token.word,
                    source_sense: child_token.sense,
                    sink: child_token.word,
                    sink_sense: child_token.sense,
                    edge_type: EdgeType::SubtreeDelete,
                    cost: 0.0,
                };
                if !self.graph.contains_deletion(&candidate) {
                    continue;
                }
            }

            let (delta, new_truth) =
                self.costs
                    .insertion_cost(self.tree, parent, child_index, child_relation, parent.truth());
            if !delta.is_finite() {
                continue;
            }
            let cost = parent_cost + delta;
            if cost >= self.options.cost_threshold {
                continue;
            }

            let subtree = self.tree.create_delete_mask(child_index);
            let newly_deleted = subtree & !parent.delete_mask();
            let new_hash = self.tree.update_hash_from_deletions(
                parent.fact_hash(),
                child_index,
                self.tree.word_at(child_index),
                parent.word().word(),
                newly_deleted,
            );
            let relation = {
                let mut r = deletion_relation(child_relation);
                let overrides = parent.quantifier_overrides();
                self.tree
                    .foreach_quantifier_with_overrides(child_index, &overrides, |qtype, mono| {
                        r = project(mono, qtype, r);
                    });
                r
            };
            out.push(Child {
                node: parent.with_deletion(
                    new_hash,
                    parent.delete_mask() | subtree,
                    new_truth,
                    parent_index,
                ),
                step: StepKind::Deletion { relation },
                cost,
            });
        }
    }

    fn expand_index_move(&self, parent: &SearchNode, parent_index: u32, parent_cost: f32, out: &mut Vec<Child>) {
        let Some((next, all_seen)) = self.next_focus(parent) else {
            return;
        };
        if parent_cost >= self.options.cost_threshold {
            return;
        }
        let overrides = parent.quantifier_overrides();
        let governor = self.tree.token(next).governor;
        // The focus is the only token whose in-path word the node carries;
        // any other governor falls back to its word in the source tree.
        let governor_word = if governor == parent.token_index() {
            parent.word().word()
        } else if governor == ROOT {
            ROOT_WORD
        } else {
            self.tree.word_at(governor)
        };
        out.push(Child {
            node: parent.with_index_move(
                next,
                self.word_at(next, &overrides),
                governor_word,
                all_seen,
                parent_index,
            ),
            step: StepKind::IndexMove,
            cost: parent_cost,
        });
    }

    /// The next focus position, and whether reaching it completes the
    /// quantifier chain. `None` once the visit order is exhausted.
    fn next_focus(&self, parent: &SearchNode) -> Option<(u8, bool)> {
        let focus = parent.token_index();
        if !parent.all_quantifiers_seen() {
            let pos = self.quantifier_order.iter().position(|&q| q == focus);
            if let Some(pos) = pos {
                for &candidate in &self.quantifier_order[pos + 1..] {
                    if parent.delete_mask() & (1 << candidate) == 0 {
                        return Some((candidate, false));
                    }
                }
            }
            // Chain finished (or focus fell off it): move to the root.
            return Some((self.tree.root(), true));
        }
        let pos = self.move_order.iter().position(|&i| i == focus)?;
        self.move_order[pos + 1..]
            .iter()
            .find(|&&i| parent.delete_mask() & (1 << i) == 0)
            .map(|&i| (i, true))
    }

    fn projected_relation(&self, parent: &SearchNode, edge: &Edge) -> NatlogRelation {
        let mut relation = edge.edge_type.lexical_relation();
        let overrides = parent.quantifier_overrides();
        self.tree
            .foreach_quantifier_with_overrides(parent.token_index(), &overrides, |qtype, mono| {
                relation = project(mono, qtype, relation);
            });
        relation
    }

    /// Scope polarities a quantifier edit leaves behind. Negation flips
    /// both scopes; the other quantifier edits keep the static polarity but
    /// still mark the slot as morphed.
    fn morphed_polarity(&self, focus: u8, edge_type: EdgeType) -> (Monotonicity, Monotonicity) {
        let q = match self.tree.quantifier_at(focus) {
            Some(q) => q,
            None => return (Monotonicity::Invalid, Monotonicity::Invalid),
        };
        let flip = |m: Monotonicity| match m {
            Monotonicity::Up => Monotonicity::Down,
            Monotonicity::Down => Monotonicity::Up,
            other => other,
        };
        if edge_type == EdgeType::QuantifierNegate {
            (flip(q.subject_mono), flip(q.object_mono))
        } else {
            (q.subject_mono, q.object_mono)
        }
    }

    /// A token's word with its contextual polarity under the node's
    /// quantifier overrides.
    fn word_at(&self, index: u8, overrides: &[(Monotonicity, Monotonicity)]) -> TaggedWord {
        let polarity = self.tree.polarity_at(index, overrides);
        self.tree.tagged_word_at(index).with_polarity(polarity)
    }

    fn static_governor_word(&self, index: u8) -> u32 {
        let governor = self.tree.token(index).governor;
        if governor == ROOT {
            ROOT_WORD
        } else {
            self.tree.word_at(governor)
        }
    }

    /// The state's live word bag, for soft alignment scoring.
    ///
    /// Only the focus carries an in-path word; every other live token
    /// contributes its word from the source tree.
    pub fn live_words(&self, node: &SearchNode) -> Vec<u32> {
        (0..self.tree.len() as u8)
            .filter(|&i| node.delete_mask() & (1 << i) == 0)
            .map(|i| {
                if i == node.token_index() {
                    node.word().word()
                } else {
                    self.tree.word_at(i)
                }
            })
            .collect()
    }

    /// Whether `child` revisits a state found within the last
    /// `cycle_memory` ancestors, looked up through `ancestor`.
    pub fn is_short_cycle<F>(&self, child: &SearchNode, mut ancestor: F) -> bool
    where
        F: FnMut(u32) -> Option<SearchNode>,
    {
        let depth = self.options.cycle_memory;
        if depth == 0 {
            return false;
        }
        let key = child.state_key();
        let mut cursor = child.backpointer();
        for _ in 0..depth {
            let Some(node) = ancestor(cursor) else {
                return false;
            };
            if node.state_key() == key {
                return true;
            }
            cursor = node.backpointer();
            if cursor == crate::node::NO_BACKPOINTER {
                return false;
            }
        }
        false
    }
}
