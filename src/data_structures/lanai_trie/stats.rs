//! Frequency statistics over the Lanai Trie.
//!
//! The frequency of a node is the number of occurrences ending at it or
//! anywhere below it. It is recomputed from the occurrence lists on demand.

use super::node::{NodeId, Symbol};
use super::LanaiTrie;

impl<S: Symbol> LanaiTrie<S> {
    /// Total frequency per depth, where depth 0 holds the children of the
    /// root. Each entry sums the frequencies of every node at that depth, so
    /// entry `d` is never smaller than entry `d + 1`.
    pub fn depth_counts(&self) -> Vec<usize> {
        let frequencies = self.subtree_frequencies();
        let mut counts = Vec::new();
        for (id, level) in self.preorder(NodeId::ROOT) {
            // the root itself has no depth bucket
            let Some(depth) = level.checked_sub(1) else {
                continue;
            };
            if counts.len() <= depth {
                counts.resize(depth + 1, 0);
            }
            counts[depth] += frequencies[id.index()];
        }
        counts
    }

    /// Frequency of every node, indexed by arena slot. Free slots read 0.
    pub(crate) fn subtree_frequencies(&self) -> Vec<usize> {
        let mut frequencies = vec![0; self.arena.slot_count()];
        // reversed pre-order sees every child before its parent
        for (id, _) in self.preorder(NodeId::ROOT).into_iter().rev() {
            let Some(node) = self.arena.get(id) else {
                continue;
            };
            let below: usize = node
                .children
                .iter()
                .map(|(_, child)| frequencies[child.index()])
                .sum();
            frequencies[id.index()] = node.terminal.count() + below;
        }
        frequencies
    }

    /// The stored word with the most occurrences.
    ///
    /// Ties go to the word met first in a pre-order walk that visits children
    /// in insertion order. Returns `None` for an empty trie.
    pub fn popular(&self) -> Option<Vec<S>> {
        self.popular_below(NodeId::ROOT, Vec::new())
    }

    /// Completes `word` to the most popular stored word below its deepest
    /// matching node.
    ///
    /// The whole subtree competes, so a single heavy word wins over a
    /// branch whose weight is spread across many rarer words.
    ///
    /// When fewer than `min_matches` symbols matched and the walk stopped at
    /// a node that still has children, there is no sufficient match and
    /// `None` is returned. A walk that ran into a leaf is always accepted.
    pub fn nearest(&self, word: &[S], min_matches: usize) -> Option<Vec<S>> {
        let (reached, matched) = self.walk(NodeId::ROOT, word);
        let stalled_mid_tree = self
            .arena
            .get(reached)
            .map_or(false, |node| !node.is_leaf());
        if matched < min_matches && stalled_mid_tree {
            return None;
        }
        self.popular_below(reached, word[..matched].to_vec())
    }

    fn popular_below(&self, start: NodeId, prefix: Vec<S>) -> Option<Vec<S>> {
        let mut best: Option<(usize, Vec<S>)> = None;
        self.visit_paths(start, prefix, |node, word| {
            let count = node.terminal.count();
            if count > 0 && best.as_ref().map_or(true, |(top, _)| count > *top) {
                best = Some((count, word.to_vec()));
            }
        });
        best.map(|(_, word)| word)
    }

    /// Every distinct stored word below the deepest node matched by `word`,
    /// in pre-order. Empty when fewer than `min_matches` symbols matched.
    pub fn labels(&self, word: &[S], min_matches: usize) -> Vec<Vec<S>> {
        let (reached, matched) = self.walk(NodeId::ROOT, word);
        let mut labels = Vec::new();
        if matched < min_matches {
            return labels;
        }
        self.visit_paths(reached, word[..matched].to_vec(), |node, label| {
            if node.terminal.is_end() {
                labels.push(label.to_vec());
            }
        });
        labels
    }
}

#[cfg(test)]
mod tests {
    use crate::data_structures::lanai_trie::LanaiTrie;

    fn trie_of(words: &[&str]) -> LanaiTrie {
        LanaiTrie::from_strs(words).unwrap()
    }

    #[test]
    fn test_depth_counts() {
        let trie = trie_of(&["cat", "car", "cat", "dog"]);
        assert_eq!(trie.depth_counts(), vec![4, 4, 4]);

        let trie = trie_of(&["a", "ab", "abc", "b"]);
        assert_eq!(trie.depth_counts(), vec![4, 2, 1]);

        assert!(trie_of(&[]).depth_counts().is_empty());
    }

    #[test]
    fn test_popular_prefers_first_on_ties() {
        let trie = trie_of(&["dog", "cat", "cat", "dog"]);
        assert_eq!(trie.popular_str().as_deref(), Some("dog"));

        let trie = trie_of(&["cat", "car", "cat", "dog"]);
        assert_eq!(trie.popular_str().as_deref(), Some("cat"));

        assert_eq!(trie_of(&[]).popular_str(), None);
    }

    #[test]
    fn test_nearest() {
        let trie = trie_of(&["card", "care", "care", "cat", "dog"]);
        assert_eq!(trie.nearest_str("car", 1).as_deref(), Some("care"));
        assert_eq!(trie.nearest_str("cab", 1).as_deref(), Some("care"));
        assert_eq!(trie.nearest_str("do", 1).as_deref(), Some("dog"));
        assert_eq!(trie.nearest_str("x", 1), None);
        assert_eq!(trie.nearest_str("ca", 3), None);
        // the walk reached a leaf, so the short match is accepted
        assert_eq!(trie.nearest_str("dog", 5).as_deref(), Some("dog"));
        assert_eq!(trie.nearest_str("", 0).as_deref(), Some("care"));
    }

    #[test]
    fn test_nearest_weighs_whole_subtree() {
        // the "xa" branch is heavier (3 vs 2), but no single word in it
        // beats "xb"
        let trie = trie_of(&["xa1", "xa2", "xa3", "xb", "xb"]);
        assert_eq!(trie.nearest_str("x", 1).as_deref(), Some("xb"));
        assert_eq!(trie.nearest_str("xa", 1).as_deref(), Some("xa1"));
    }

    #[test]
    fn test_labels() {
        let trie = trie_of(&["car", "cart", "cat", "car", "dog"]);
        assert_eq!(trie.labels_str("ca", 1), vec!["car", "cart", "cat"]);
        assert_eq!(trie.labels_str("cax", 1), vec!["car", "cart", "cat"]);
        assert!(trie.labels_str("ca", 3).is_empty());
        assert_eq!(trie.labels_str("", 0).len(), 4);
    }
}
