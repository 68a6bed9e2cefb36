// Copyright (c) 2025 Mauka MCP Authors
//
// Licensed under dual license:
// - MIT License (LICENSE-MIT or https://opensource.org/licenses/MIT)
// - Apache License, Version 2.0 (LICENSE-APACHE or https://www.apache.org/licenses/LICENSE-2.0)

//! Statistical pruning and occurrence index rebuilding.
//!
//! Pruning judges every child twice. Against its siblings: a child whose
//! frequency, relative to the combined frequency of the other siblings, is
//! below `min(1, 1 / siblings + min_bias)` is cut together with its whole
//! subtree. Against its depth: when the total frequency at the child's depth
//! is below `min_index_vote * len()`, the child fails as well.
//!
//! With prefixes protected, a child failing only the depth check gives up
//! its own occurrences after its children were judged, and is removed once
//! it has no children left. Occurrences taken out of the tree are folded
//! into the parent of the cut node, which becomes an end node if it was not
//! one. Directly below the root there is nothing to fold into and they are
//! dropped.
//!
//! Without protection, any failing child is cut with its subtree before its
//! children are looked at, and every occurrence below it is dropped.
//!
//! Both modes break the contiguity of positions, so the index is rebuilt
//! whenever a pass changed anything.

use tracing::{debug, trace};

use super::config::PrefixProtection;
use super::error::{TrieError, TrieResult};
use super::node::{NodeId, Symbol};
use super::LanaiTrie;

/// Outcome of a pruning pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PruneReport {
    /// Nodes removed from the tree
    pub removed_nodes: usize,

    /// Occurrences folded into a surviving ancestor
    pub vacated_occurrences: usize,

    /// Occurrences that left the trie
    pub dropped_occurrences: usize,
}

impl PruneReport {
    /// Whether the pass modified the trie.
    pub fn changed(&self) -> bool {
        self.removed_nodes > 0 || self.vacated_occurrences > 0 || self.dropped_occurrences > 0
    }
}

/// Snapshot of the statistics a pass decides on, plus its running report.
struct PrunePass {
    depth_counts: Vec<usize>,
    frequencies: Vec<usize>,
    min_count: f64,
    min_bias: f64,
    protection: PrefixProtection,
    report: PruneReport,
}

impl PrunePass {
    fn frequency(&self, id: NodeId) -> usize {
        self.frequencies.get(id.index()).copied().unwrap_or(0)
    }

    fn depth_is_valid(&self, depth: usize) -> bool {
        self.depth_counts
            .get(depth)
            .map_or(false, |&count| count as f64 >= self.min_count)
    }
}

/// The children of one node still waiting to be judged.
struct SiblingFrame<S> {
    parent: NodeId,
    depth: usize,
    pending: std::vec::IntoIter<(S, NodeId)>,
    sibling_total: usize,
    min_proportion: f64,
    depth_valid: bool,

    /// Child whose subtree is being judged right now
    descended: Option<(S, NodeId)>,
}

impl<S: Symbol> LanaiTrie<S> {
    /// Removes branches that are rare in absolute terms or rare among their
    /// siblings, protecting prefixes.
    ///
    /// # Arguments
    ///
    /// * `min_index_vote` - Fraction of all occurrences, in `[0, 1]`, a depth
    ///   level must hold for its nodes to keep their own occurrences.
    /// * `min_bias` - Non-negative amount added to the even sibling share
    ///   `1 / siblings` before comparing.
    ///
    /// # Returns
    ///
    /// * `Ok(PruneReport)` - What the pass removed and folded.
    /// * `Err(TrieError)` - If an argument is out of range, or the tree
    ///   turned out to be inconsistent midway.
    pub fn prune(&mut self, min_index_vote: f64, min_bias: f64) -> TrieResult<PruneReport> {
        self.prune_with(min_index_vote, min_bias, PrefixProtection::Protected)
    }

    /// Same as [`prune`](Self::prune), under the given prefix policy.
    pub fn prune_with(
        &mut self,
        min_index_vote: f64,
        min_bias: f64,
        protection: PrefixProtection,
    ) -> TrieResult<PruneReport> {
        if !(0.0..=1.0).contains(&min_index_vote) {
            return Err(TrieError::InvalidArgument(format!(
                "min_index_vote must be within [0, 1], got {min_index_vote}"
            )));
        }
        if !min_bias.is_finite() || min_bias < 0.0 {
            return Err(TrieError::InvalidArgument(format!(
                "min_bias must be a non-negative finite number, got {min_bias}"
            )));
        }

        let mut pass = PrunePass {
            depth_counts: self.depth_counts(),
            frequencies: self.subtree_frequencies(),
            min_count: min_index_vote * self.word_count as f64,
            min_bias,
            protection,
            report: PruneReport::default(),
        };
        self.judge_tree(&mut pass)?;

        if pass.report.changed() {
            self.rebuild_index();
        }
        debug!(
            removed_nodes = pass.report.removed_nodes,
            vacated = pass.report.vacated_occurrences,
            dropped = pass.report.dropped_occurrences,
            remaining = self.word_count,
            ?protection,
            "prune pass finished"
        );
        Ok(pass.report)
    }

    /// Walks the tree depth first with one frame per level, judging every
    /// child against its siblings and its depth.
    fn judge_tree(&mut self, pass: &mut PrunePass) -> TrieResult<()> {
        let protection = pass.protection;
        let mut stack = vec![self.sibling_frame(NodeId::ROOT, 0, pass)?];

        while let Some(frame) = stack.last_mut() {
            let (parent, depth) = (frame.parent, frame.depth);

            // back from a surviving child's subtree
            if let Some((symbol, child)) = frame.descended.take() {
                match protection {
                    PrefixProtection::Protected if !frame.depth_valid => {
                        let node = self.node_mut(child)?;
                        let own = node.terminal.take();
                        let now_leaf = node.is_leaf();
                        trace!(node = child.index(), depth, vacated = own.len(), "depth below vote");
                        if now_leaf {
                            self.detach(parent, &symbol, pass)?;
                        }
                        self.fold_into(parent, own, pass)?;
                    }
                    PrefixProtection::Protected => {}
                    PrefixProtection::Unprotected => {
                        // every child was cut and nothing ends here
                        let node = self.node_mut(child)?;
                        if node.is_leaf() && !node.terminal.is_end() {
                            trace!(node = child.index(), depth, "dropping emptied prefix");
                            self.detach(parent, &symbol, pass)?;
                        }
                    }
                }
                continue;
            }

            let Some((symbol, child)) = frame.pending.next() else {
                stack.pop();
                continue;
            };

            let frequency = pass.frequency(child);
            let others = frame.sibling_total - frequency;
            let share_valid = others == 0 || frequency as f64 / others as f64 >= frame.min_proportion;
            let cut_now = !share_valid
                || (!frame.depth_valid && protection == PrefixProtection::Unprotected);

            if cut_now {
                trace!(node = child.index(), depth, frequency, others, "cutting branch");
                let vacated = self.detach(parent, &symbol, pass)?;
                match protection {
                    PrefixProtection::Protected => self.fold_into(parent, vacated, pass)?,
                    PrefixProtection::Unprotected => {
                        pass.report.dropped_occurrences += vacated.len();
                    }
                }
                continue;
            }

            frame.descended = Some((symbol, child));
            let next = self.sibling_frame(child, depth + 1, pass)?;
            stack.push(next);
        }
        Ok(())
    }

    /// Snapshots the children of `parent`, which sit at `depth`, together
    /// with the thresholds they are judged by.
    fn sibling_frame(
        &mut self,
        parent: NodeId,
        depth: usize,
        pass: &PrunePass,
    ) -> TrieResult<SiblingFrame<S>> {
        let children: Vec<(S, NodeId)> = self
            .node_mut(parent)?
            .children
            .iter()
            .map(|(symbol, id)| (symbol.clone(), id))
            .collect();
        let sibling_total = children.iter().map(|(_, id)| pass.frequency(*id)).sum();
        let even_share = 1.0 / children.len().max(1) as f64;

        Ok(SiblingFrame {
            parent,
            depth,
            pending: children.into_iter(),
            sibling_total,
            min_proportion: (even_share + pass.min_bias).min(1.0),
            depth_valid: pass.depth_is_valid(depth),
            descended: None,
        })
    }

    /// Removes the child of `parent` reached through `symbol`, with its
    /// subtree, and returns every occurrence that was recorded in it.
    fn detach(&mut self, parent: NodeId, symbol: &S, pass: &mut PrunePass) -> TrieResult<Vec<usize>> {
        let child = self.node_mut(parent)?.children.remove(symbol).ok_or_else(|| {
            TrieError::InternalInconsistency(format!(
                "node {} lost a child during pruning",
                parent.index()
            ))
        })?;
        let (vacated, released) = self.arena.release_subtree(child);
        pass.report.removed_nodes += released;
        Ok(vacated)
    }

    /// Hands vacated occurrences to `parent`, or drops them at the root.
    fn fold_into(&mut self, parent: NodeId, vacated: Vec<usize>, pass: &mut PrunePass) -> TrieResult<()> {
        if vacated.is_empty() {
            return Ok(());
        }
        if parent == NodeId::ROOT {
            pass.report.dropped_occurrences += vacated.len();
            return Ok(());
        }
        pass.report.vacated_occurrences += vacated.len();
        self.node_mut(parent)?.terminal.absorb(vacated);
        Ok(())
    }

    /// Renumbers occurrence positions to `0..n` keeping their relative order,
    /// and resets the occurrence count to `n`.
    ///
    /// Needed after folding, which leaves gaps where dropped occurrences used
    /// to be.
    pub fn rebuild_index(&mut self) {
        let mut entries: Vec<(usize, NodeId, usize)> = Vec::with_capacity(self.word_count);
        for (id, node) in self.arena.iter() {
            for (slot, &position) in node.terminal.occurrences().iter().enumerate() {
                entries.push((position, id, slot));
            }
        }
        entries.sort_by_key(|&(position, _, _)| position);

        for (renumbered, &(_, id, slot)) in entries.iter().enumerate() {
            if let Some(position) = self
                .arena
                .get_mut(id)
                .and_then(|node| node.terminal.positions_mut().get_mut(slot))
            {
                *position = renumbered;
            }
        }

        self.word_count = entries.len();
        debug!(occurrences = self.word_count, "rebuilt occurrence index");
    }
}
