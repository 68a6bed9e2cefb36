// Copyright (c) 2025 Mauka MCP Authors
//
// Licensed under dual license:
// - MIT License (LICENSE-MIT or https://opensource.org/licenses/MIT)
// - Apache License, Version 2.0 (LICENSE-APACHE or https://www.apache.org/licenses/LICENSE-2.0)

//! Ordered child container.
//!
//! Children are kept in order of first appearance. Removal leaves a tombstone
//! behind so that removing one child never shifts the others; the list is
//! compacted once tombstones outnumber live entries.

use fnv::FnvHashMap;

use super::node::{NodeId, Symbol};

/// Tombstones are only reclaimed past this many slots.
const COMPACT_THRESHOLD: usize = 8;

/// Insertion-ordered set of child handles, unique by symbol.
#[derive(Debug, Clone)]
pub(crate) struct ChildList<S: Symbol> {
    /// Slot order is first-appearance order; `None` marks a removed child
    slots: Vec<Option<(S, NodeId)>>,

    /// Symbol to slot lookup
    by_symbol: FnvHashMap<S, usize>,
}

impl<S: Symbol> ChildList<S> {
    pub(crate) fn new() -> Self {
        Self {
            slots: Vec::new(),
            by_symbol: FnvHashMap::default(),
        }
    }

    /// Appends a child. The caller guarantees `symbol` is not present yet.
    pub(crate) fn push(&mut self, symbol: S, id: NodeId) {
        debug_assert!(!self.by_symbol.contains_key(&symbol));
        self.by_symbol.insert(symbol.clone(), self.slots.len());
        self.slots.push(Some((symbol, id)));
    }

    /// Handle of the child reached through `symbol`.
    pub(crate) fn get(&self, symbol: &S) -> Option<NodeId> {
        let slot = *self.by_symbol.get(symbol)?;
        self.slots[slot].as_ref().map(|(_, id)| *id)
    }

    /// Detaches the child reached through `symbol`.
    pub(crate) fn remove(&mut self, symbol: &S) -> Option<NodeId> {
        let slot = self.by_symbol.remove(symbol)?;
        let removed = self.slots[slot].take().map(|(_, id)| id);
        if self.slots.len() > COMPACT_THRESHOLD && self.by_symbol.len() * 2 < self.slots.len() {
            self.compact();
        }
        removed
    }

    fn compact(&mut self) {
        self.slots.retain(Option::is_some);
        self.by_symbol.clear();
        for (slot, entry) in self.slots.iter().enumerate() {
            if let Some((symbol, _)) = entry {
                self.by_symbol.insert(symbol.clone(), slot);
            }
        }
    }

    /// Live children as `(symbol, handle)` pairs, in insertion order.
    pub(crate) fn iter(&self) -> impl Iterator<Item = (&S, NodeId)> {
        self.slots
            .iter()
            .filter_map(|entry| entry.as_ref().map(|(symbol, id)| (symbol, *id)))
    }

    /// Snapshot of the live handles, safe to hold across mutation.
    pub(crate) fn ids(&self) -> Vec<NodeId> {
        self.iter().map(|(_, id)| id).collect()
    }

    pub(crate) fn len(&self) -> usize {
        self.by_symbol.len()
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.by_symbol.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn list_of(symbols: &str) -> ChildList<char> {
        let mut list = ChildList::new();
        for (i, c) in symbols.chars().enumerate() {
            list.push(c, NodeId(i + 1));
        }
        list
    }

    #[test]
    fn test_insertion_order_is_preserved() {
        let list = list_of("dcab");
        let symbols: String = list.iter().map(|(s, _)| *s).collect();
        assert_eq!(symbols, "dcab");
        assert_eq!(list.get(&'a'), Some(NodeId(3)));
        assert_eq!(list.get(&'z'), None);
    }

    #[test]
    fn test_remove_keeps_remaining_order() {
        let mut list = list_of("abcd");
        let snapshot = list.ids();

        assert_eq!(list.remove(&'b'), Some(NodeId(2)));
        assert_eq!(list.remove(&'b'), None);
        assert_eq!(list.len(), 3);

        let symbols: String = list.iter().map(|(s, _)| *s).collect();
        assert_eq!(symbols, "acd");
        assert_eq!(snapshot.len(), 4);
    }

    #[test]
    fn test_compaction_after_many_removals() {
        let mut list = list_of("abcdefghijklmnop");
        for c in "abcdefghijkl".chars() {
            list.remove(&c);
        }
        assert_eq!(list.len(), 4);
        assert!(list.slots.len() < 16);
        assert_eq!(list.get(&'o'), Some(NodeId(15)));

        let symbols: String = list.iter().map(|(s, _)| *s).collect();
        assert_eq!(symbols, "mnop");

        list.push('a', NodeId(40));
        assert_eq!(list.get(&'a'), Some(NodeId(40)));
        assert!(!list.is_empty());
    }
}
