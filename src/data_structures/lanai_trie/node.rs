// Copyright (c) 2025 Mauka MCP Authors
//
// Licensed under dual license:
// - MIT License (LICENSE-MIT or https://opensource.org/licenses/MIT)
// - Apache License, Version 2.0 (LICENSE-APACHE or https://www.apache.org/licenses/LICENSE-2.0)

//! Node storage for the Lanai Trie.
//!
//! Nodes live in an [`Arena`] and refer to each other through [`NodeId`]s, so
//! children can be detached while a traversal still holds handles to their
//! siblings. Whether a node terminates a stored word is an explicit
//! [`Terminal`] state carrying the occurrence positions of that word.

use std::fmt::Debug;
use std::hash::Hash;

use super::children::ChildList;

/// A symbol the trie can store sequences of.
///
/// Implemented for every `Clone + Eq + Hash + Debug` type, so `char`, `u8`,
/// token ids or interned strings all work.
pub trait Symbol: Clone + Eq + Hash + Debug {}

impl<T: Clone + Eq + Hash + Debug> Symbol for T {}

/// Stable handle of a node inside the arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub(crate) usize);

impl NodeId {
    /// The root is always the first slot of the arena.
    pub(crate) const ROOT: NodeId = NodeId(0);

    /// Arena slot of this node.
    pub fn index(self) -> usize {
        self.0
    }
}

/// End-of-word state of a node.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Terminal {
    /// No stored word ends here.
    #[default]
    NotEnd,
    /// At least one stored word ends here; one position per occurrence,
    /// kept in ascending order.
    End(Vec<usize>),
}

impl Terminal {
    /// Whether at least one occurrence ends at this node.
    pub fn is_end(&self) -> bool {
        matches!(self, Terminal::End(_))
    }

    /// Occurrence positions, empty for [`Terminal::NotEnd`].
    pub fn occurrences(&self) -> &[usize] {
        match self {
            Terminal::NotEnd => &[],
            Terminal::End(positions) => positions,
        }
    }

    /// Number of occurrences ending here.
    pub fn count(&self) -> usize {
        self.occurrences().len()
    }

    /// Records a new occurrence, turning the node into an end node if needed.
    pub(crate) fn push(&mut self, position: usize) {
        match self {
            Terminal::NotEnd => *self = Terminal::End(vec![position]),
            Terminal::End(positions) => positions.push(position),
        }
    }

    /// Adopts occurrences vacated by a descendant.
    pub(crate) fn absorb(&mut self, mut vacated: Vec<usize>) {
        if vacated.is_empty() {
            return;
        }
        match self {
            Terminal::NotEnd => {
                vacated.sort_unstable();
                *self = Terminal::End(vacated);
            }
            Terminal::End(positions) => {
                positions.append(&mut vacated);
                positions.sort_unstable();
            }
        }
    }

    /// Removes the `slot`-th occurrence, dropping the end state when it was
    /// the last one. Returns the removed position.
    pub(crate) fn remove(&mut self, slot: usize) -> Option<usize> {
        let Terminal::End(positions) = self else {
            return None;
        };
        if slot >= positions.len() {
            return None;
        }
        let position = positions.remove(slot);
        if positions.is_empty() {
            *self = Terminal::NotEnd;
        }
        Some(position)
    }

    /// Strips every occurrence from this node.
    pub(crate) fn take(&mut self) -> Vec<usize> {
        match std::mem::take(self) {
            Terminal::NotEnd => Vec::new(),
            Terminal::End(positions) => positions,
        }
    }

    pub(crate) fn positions_mut(&mut self) -> &mut [usize] {
        match self {
            Terminal::NotEnd => &mut [],
            Terminal::End(positions) => positions,
        }
    }
}

/// A node in the Lanai Trie.
#[derive(Debug, Clone)]
pub struct Node<S: Symbol> {
    /// Children in order of first appearance, unique by symbol
    pub(crate) children: ChildList<S>,

    /// Whether words end here, and at which positions
    pub terminal: Terminal,
}

impl<S: Symbol> Node<S> {
    /// Creates a fresh non-end node. Its symbol lives on the parent's edge.
    pub fn new() -> Self {
        Self {
            children: ChildList::new(),
            terminal: Terminal::NotEnd,
        }
    }

    /// Whether this node has no children.
    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }
}

impl<S: Symbol> Default for Node<S> {
    fn default() -> Self {
        Self::new()
    }
}

/// Slot storage for trie nodes with a free list for reuse.
#[derive(Debug, Clone)]
pub(crate) struct Arena<S: Symbol> {
    slots: Vec<Option<Node<S>>>,
    free: Vec<usize>,
}

impl<S: Symbol> Arena<S> {
    /// Creates an arena holding only the root.
    pub(crate) fn new() -> Self {
        Self {
            slots: vec![Some(Node::new())],
            free: Vec::new(),
        }
    }

    pub(crate) fn alloc(&mut self, node: Node<S>) -> NodeId {
        match self.free.pop() {
            Some(slot) => {
                self.slots[slot] = Some(node);
                NodeId(slot)
            }
            None => {
                self.slots.push(Some(node));
                NodeId(self.slots.len() - 1)
            }
        }
    }

    pub(crate) fn get(&self, id: NodeId) -> Option<&Node<S>> {
        self.slots.get(id.0).and_then(Option::as_ref)
    }

    pub(crate) fn get_mut(&mut self, id: NodeId) -> Option<&mut Node<S>> {
        self.slots.get_mut(id.0).and_then(Option::as_mut)
    }

    /// Releases `id` and every node below it. Returns the occurrences that
    /// were recorded anywhere in the released subtree, plus the number of
    /// released nodes.
    pub(crate) fn release_subtree(&mut self, id: NodeId) -> (Vec<usize>, usize) {
        let mut vacated = Vec::new();
        let mut released = 0;
        let mut stack = vec![id];
        while let Some(current) = stack.pop() {
            let Some(mut node) = self.slots.get_mut(current.0).and_then(Option::take) else {
                continue;
            };
            stack.extend(node.children.ids());
            vacated.append(&mut node.terminal.take());
            self.free.push(current.0);
            released += 1;
        }
        (vacated, released)
    }

    /// Live nodes with their handles, in slot order.
    pub(crate) fn iter(&self) -> impl Iterator<Item = (NodeId, &Node<S>)> {
        self.slots
            .iter()
            .enumerate()
            .filter_map(|(slot, node)| node.as_ref().map(|node| (NodeId(slot), node)))
    }

    /// Mutable access to every live node.
    pub(crate) fn iter_mut(&mut self) -> impl Iterator<Item = (NodeId, &mut Node<S>)> {
        self.slots
            .iter_mut()
            .enumerate()
            .filter_map(|(slot, node)| node.as_mut().map(|node| (NodeId(slot), node)))
    }

    /// Number of live nodes, root included.
    pub(crate) fn live(&self) -> usize {
        self.slots.len() - self.free.len()
    }

    /// Number of slots, live or free. Every `NodeId` indexes below this.
    pub(crate) fn slot_count(&self) -> usize {
        self.slots.len()
    }
}
