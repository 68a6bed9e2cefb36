//! Lanai Trie Implementation
//!
//! A frequency-aware prefix tree that stores a multiset of symbol sequences.
//! Inserting the same word twice keeps two distinct occurrences, and every
//! occurrence remembers its global insertion position, so the original
//! sequence of insertions can be reconstructed at any time.
//!
//! Besides the usual insert / lookup / delete operations the trie offers
//! statistics derived from occurrence counts (per-depth totals, the most
//! popular word, nearest completions) and a statistical pruning pass that
//! removes rare branches while folding their occurrences into surviving
//! ancestors.
//!
//! # Example
//!
//! ```
//! use lanai_lib::data_structures::lanai_trie::LanaiTrie;
//!
//! let mut trie: LanaiTrie = LanaiTrie::new();
//! for word in ["cat", "car", "cat", "dog"] {
//!     trie.append_str(word).unwrap();
//! }
//!
//! assert_eq!(trie.len(), 4);
//! assert!(trie.contains_str("cat", 2));
//! assert_eq!(trie.popular_str().as_deref(), Some("cat"));
//! assert_eq!(
//!     trie.decompress_strings().unwrap(),
//!     vec!["cat", "car", "cat", "dog"]
//! );
//! ```

mod children;
mod config;
mod decompress;
mod error;
mod node;
mod prune;
mod stats;

use tracing::{debug, trace, warn};

pub use config::{LanaiTrieConfig, PrefixProtection, DEFAULT_MAX_DEPTH};
pub use error::{TrieError, TrieResult};
pub use node::{NodeId, Symbol, Terminal};
pub use prune::PruneReport;

use node::{Arena, Node};

/// Lanai Trie: a prefix tree over sequences of `S` that keeps every
/// inserted occurrence.
///
/// Key features:
/// * Duplicate insertions are preserved, each with its insertion position
/// * Frequencies are derived from occurrence counts, never stored
/// * Statistical pruning with upward folding of vacated occurrences
/// * Order-preserving, non-destructive decompression
///
/// The trie is a plain single-owner data structure; callers sharing it
/// across threads must serialize access themselves.
#[derive(Debug, Clone)]
pub struct LanaiTrie<S: Symbol = char> {
    /// All nodes, the root at slot 0
    arena: Arena<S>,

    /// Live occurrences; equals the total length of all occurrence lists
    word_count: usize,

    /// Configuration options
    config: LanaiTrieConfig,
}

impl<S: Symbol> LanaiTrie<S> {
    /// Creates a new empty `LanaiTrie` with default configuration.
    pub fn new() -> Self {
        Self::with_config(LanaiTrieConfig::default())
    }

    /// Creates a new empty `LanaiTrie` with the specified configuration.
    pub fn with_config(config: LanaiTrieConfig) -> Self {
        Self {
            arena: Arena::new(),
            word_count: 0,
            config,
        }
    }

    /// Returns the configuration this trie was built with.
    pub fn config(&self) -> &LanaiTrieConfig {
        &self.config
    }

    /// Number of live occurrences.
    pub fn len(&self) -> usize {
        self.word_count
    }

    /// Whether no occurrence is stored.
    pub fn is_empty(&self) -> bool {
        self.word_count == 0
    }

    /// Number of live nodes, root included.
    pub fn node_count(&self) -> usize {
        self.arena.live()
    }

    /// Removes every word.
    pub fn clear(&mut self) {
        self.arena = Arena::new();
        self.word_count = 0;
    }

    fn child(&self, id: NodeId, symbol: &S) -> Option<NodeId> {
        self.arena.get(id)?.children.get(symbol)
    }

    /// Follows `word` from `start` as far as it matches. Returns the deepest
    /// node reached and the number of symbols consumed.
    fn walk(&self, start: NodeId, word: &[S]) -> (NodeId, usize) {
        let mut current = start;
        for (matched, symbol) in word.iter().enumerate() {
            match self.child(current, symbol) {
                Some(next) => current = next,
                None => return (current, matched),
            }
        }
        (current, word.len())
    }

    /// Live nodes below `start` in pre-order, children in insertion order,
    /// each paired with its distance from `start`.
    fn preorder(&self, start: NodeId) -> Vec<(NodeId, usize)> {
        let mut order = Vec::new();
        let mut stack = vec![(start, 0)];
        while let Some((id, depth)) = stack.pop() {
            let Some(node) = self.arena.get(id) else {
                continue;
            };
            order.push((id, depth));
            stack.extend(node.children.ids().into_iter().rev().map(|child| (child, depth + 1)));
        }
        order
    }

    /// Calls `visit` for every live node below `start` in pre-order, with the
    /// word spelled from the root to that node. `prefix` must be the word
    /// spelled to `start`.
    ///
    /// Uses an explicit stack, so words as long as the depth budget are safe.
    fn visit_paths<F>(&self, start: NodeId, prefix: Vec<S>, mut visit: F)
    where
        F: FnMut(&Node<S>, &[S]),
    {
        let mut path = prefix;
        let mut stack: Vec<(NodeId, usize, Option<&S>)> = vec![(start, path.len(), None)];
        while let Some((id, parent_len, symbol)) = stack.pop() {
            path.truncate(parent_len);
            if let Some(symbol) = symbol {
                path.push(symbol.clone());
            }
            let Some(node) = self.arena.get(id) else {
                continue;
            };
            visit(node, &path);

            let len = path.len();
            let children: Vec<_> = node.children.iter().collect();
            stack.extend(
                children
                    .into_iter()
                    .rev()
                    .map(|(symbol, child)| (child, len, Some(symbol))),
            );
        }
    }

    /// Adds one occurrence of `word`.
    ///
    /// # Returns
    ///
    /// * `Ok(usize)` - The insertion position given to the new occurrence.
    /// * `Err(TrieError)` - If the word exceeds the configured depth.
    pub fn append(&mut self, word: &[S]) -> TrieResult<usize> {
        if word.len() > self.config.max_depth() {
            return Err(TrieError::KeyTooLong {
                len: word.len(),
                max_depth: self.config.max_depth(),
            });
        }

        let mut current = NodeId::ROOT;
        for symbol in word {
            current = match self.child(current, symbol) {
                Some(next) => next,
                None => {
                    let created = self.arena.alloc(Node::new());
                    self.node_mut(current)?.children.push(symbol.clone(), created);
                    created
                }
            };
        }

        let position = self.word_count;
        self.node_mut(current)?.terminal.push(position);
        self.word_count += 1;
        trace!(position, len = word.len(), "appended occurrence");
        Ok(position)
    }

    /// Checks whether the node reached by `word` ends at least `instance`
    /// occurrences.
    ///
    /// The walk stops at the first symbol with no matching child and the
    /// check runs against the node it stopped at, so a word extending past a
    /// stored word is answered by that stored word. `instance == 0` asks only
    /// whether that node is an end node.
    pub fn contains(&self, word: &[S], instance: usize) -> bool {
        let (reached, _) = self.walk(NodeId::ROOT, word);
        self.arena.get(reached).map_or(false, |node| {
            node.terminal.is_end() && node.terminal.count() >= instance
        })
    }

    /// Number of stored occurrences of exactly `word`.
    pub fn count(&self, word: &[S]) -> usize {
        self.positions(word).map_or(0, <[usize]>::len)
    }

    /// Insertion positions of the occurrences of exactly `word`, ascending.
    pub fn positions(&self, word: &[S]) -> Option<&[usize]> {
        let (reached, matched) = self.walk(NodeId::ROOT, word);
        if matched < word.len() {
            return None;
        }
        let node = self.arena.get(reached)?;
        node.terminal.is_end().then(|| node.terminal.occurrences())
    }

    /// Node reached by the longest matching prefix of `word`.
    ///
    /// Returns `None` when `word` is non-empty and the root has no child for
    /// its first symbol. The empty word maps to the root.
    pub fn get_word_end_node(&self, word: &[S]) -> Option<NodeId> {
        if let Some(first) = word.first() {
            self.child(NodeId::ROOT, first)?;
        }
        Some(self.walk(NodeId::ROOT, word).0)
    }

    /// Occurrence positions recorded at `id`, if it is a live node.
    pub fn occurrences_at(&self, id: NodeId) -> Option<&[usize]> {
        self.arena.get(id).map(|node| node.terminal.occurrences())
    }

    /// Deletes the `instance`-th (1-based) occurrence of `prefix + word`,
    /// protecting prefixes.
    ///
    /// The prefix must be stored in full. When the occurrence was the last one
    /// at its node and that node has no children, the single-child chain
    /// leading to it is detached up to the nearest ancestor that branches or
    /// ends another word. Positions above the deleted one shift down by one.
    ///
    /// # Returns
    ///
    /// `true` if an occurrence was deleted, `false` if the word or the
    /// requested instance does not exist.
    pub fn delete(&mut self, word: &[S], prefix: &[S], instance: usize) -> bool {
        self.delete_with(word, prefix, instance, PrefixProtection::Protected)
    }

    /// Deletes the `instance`-th (1-based) occurrence of `prefix + word`
    /// under the given prefix policy.
    ///
    /// With [`PrefixProtection::Unprotected`], deleting the last occurrence of
    /// a word that still prefixes longer words detaches the chain anyway: the
    /// longer words below it are removed with every one of their occurrences,
    /// and the remaining positions are renumbered to stay contiguous.
    pub fn delete_with(
        &mut self,
        word: &[S],
        prefix: &[S],
        instance: usize,
        protection: PrefixProtection,
    ) -> bool {
        if instance == 0 {
            return false;
        }
        if self.walk(NodeId::ROOT, prefix).1 < prefix.len() {
            debug!(prefix_len = prefix.len(), "delete: prefix not found");
            return false;
        }

        let mut current = NodeId::ROOT;
        let mut cut: Option<(NodeId, &S)> = None;
        for symbol in prefix.iter().chain(word) {
            let Some(node) = self.arena.get(current) else {
                return false;
            };
            let Some(next) = node.children.get(symbol) else {
                return false;
            };
            if cut.is_none() || node.children.len() >= 2 || node.terminal.is_end() {
                cut = Some((current, symbol));
            }
            current = next;
        }

        let Some(landing) = self.arena.get_mut(current) else {
            return false;
        };
        let Some(position) = landing.terminal.remove(instance - 1) else {
            return false;
        };
        let emptied = !landing.terminal.is_end();
        let dead = landing.is_leaf() || protection == PrefixProtection::Unprotected;

        let mut dropped = Vec::new();
        if emptied && dead {
            if let Some((boundary, symbol)) = cut {
                let detached = self
                    .arena
                    .get_mut(boundary)
                    .and_then(|node| node.children.remove(symbol));
                if let Some(detached) = detached {
                    let (vacated, released) = self.arena.release_subtree(detached);
                    trace!(released, dropped = vacated.len(), "delete: detached dead chain");
                    dropped = vacated;
                }
            }
        }

        self.word_count -= 1;
        if dropped.is_empty() {
            self.shift_positions_above(position);
        } else {
            self.rebuild_index();
        }
        debug!(
            position,
            instance,
            dropped = dropped.len(),
            remaining = self.word_count,
            "deleted occurrence"
        );
        true
    }

    /// Closes the gap left by a deleted position.
    fn shift_positions_above(&mut self, removed: usize) {
        for (_, node) in self.arena.iter_mut() {
            for position in node.terminal.positions_mut() {
                if *position > removed {
                    *position -= 1;
                }
            }
        }
    }

    fn node_mut(&mut self, id: NodeId) -> TrieResult<&mut Node<S>> {
        self.arena.get_mut(id).ok_or_else(|| {
            warn!(node = id.index(), "reference to released node");
            TrieError::InternalInconsistency(format!("node {} is not live", id.index()))
        })
    }

    /// Builds a trie from `words`, in iteration order.
    ///
    /// # Errors
    ///
    /// `TrieError::KeyTooLong` for the first word over the default depth
    /// budget. Nothing is built in that case.
    pub fn try_from_words<I, W>(words: I) -> TrieResult<Self>
    where
        I: IntoIterator<Item = W>,
        W: AsRef<[S]>,
    {
        let mut trie = Self::new();
        trie.try_extend(words)?;
        Ok(trie)
    }

    /// Appends every word of `words`, in iteration order.
    ///
    /// Stops at the first word over the depth budget and returns its error;
    /// the words before it stay appended.
    pub fn try_extend<I, W>(&mut self, words: I) -> TrieResult<()>
    where
        I: IntoIterator<Item = W>,
        W: AsRef<[S]>,
    {
        for word in words {
            self.append(word.as_ref())?;
        }
        Ok(())
    }

    /// Verifies the structural invariants: occurrence positions are exactly
    /// `0..len()`, every live node is reachable from the root exactly once,
    /// and no node other than the root is a childless non-end node.
    pub fn check_invariants(&self) -> TrieResult<()> {
        let mut seen = vec![false; self.word_count];
        let mut reachable = 0;
        let mut stack = vec![NodeId::ROOT];

        while let Some(id) = stack.pop() {
            let node = self.arena.get(id).ok_or_else(|| {
                TrieError::InternalInconsistency(format!("child {} is not live", id.index()))
            })?;
            reachable += 1;

            if id != NodeId::ROOT && node.is_leaf() && !node.terminal.is_end() {
                return Err(TrieError::InternalInconsistency(format!(
                    "node {} is a dangling non-end leaf",
                    id.index()
                )));
            }

            for &position in node.terminal.occurrences() {
                match seen.get_mut(position) {
                    Some(slot) if !*slot => *slot = true,
                    Some(_) => {
                        return Err(TrieError::InternalInconsistency(format!(
                            "position {position} is recorded twice"
                        )))
                    }
                    None => {
                        return Err(TrieError::InternalInconsistency(format!(
                            "position {position} is out of range for {} occurrences",
                            self.word_count
                        )))
                    }
                }
            }
            stack.extend(node.children.ids());
        }

        if let Some(missing) = seen.iter().position(|slot| !slot) {
            return Err(TrieError::InternalInconsistency(format!(
                "position {missing} is not recorded"
            )));
        }
        if reachable != self.arena.live() {
            return Err(TrieError::InternalInconsistency(format!(
                "{} live nodes but {reachable} reachable",
                self.arena.live()
            )));
        }
        Ok(())
    }
}

impl<S: Symbol> Default for LanaiTrie<S> {
    fn default() -> Self {
        Self::new()
    }
}

/// String conveniences for character tries.
impl LanaiTrie<char> {
    /// Builds a trie from string words, in iteration order.
    pub fn from_strs<I, W>(words: I) -> TrieResult<Self>
    where
        I: IntoIterator<Item = W>,
        W: AsRef<str>,
    {
        let mut trie = Self::new();
        for word in words {
            trie.append_str(word.as_ref())?;
        }
        Ok(trie)
    }

    /// See [`LanaiTrie::append`].
    pub fn append_str(&mut self, word: &str) -> TrieResult<usize> {
        self.append(&symbols(word))
    }

    /// See [`LanaiTrie::contains`].
    pub fn contains_str(&self, word: &str, instance: usize) -> bool {
        self.contains(&symbols(word), instance)
    }

    /// See [`LanaiTrie::count`].
    pub fn count_str(&self, word: &str) -> usize {
        self.count(&symbols(word))
    }

    /// See [`LanaiTrie::delete`].
    pub fn delete_str(&mut self, word: &str, prefix: &str, instance: usize) -> bool {
        self.delete(&symbols(word), &symbols(prefix), instance)
    }

    /// See [`LanaiTrie::delete_with`].
    pub fn delete_str_with(
        &mut self,
        word: &str,
        prefix: &str,
        instance: usize,
        protection: PrefixProtection,
    ) -> bool {
        self.delete_with(&symbols(word), &symbols(prefix), instance, protection)
    }

    /// See [`LanaiTrie::popular`].
    pub fn popular_str(&self) -> Option<String> {
        self.popular().map(|word| word.into_iter().collect())
    }

    /// See [`LanaiTrie::nearest`].
    pub fn nearest_str(&self, word: &str, min_matches: usize) -> Option<String> {
        self.nearest(&symbols(word), min_matches)
            .map(|word| word.into_iter().collect())
    }

    /// See [`LanaiTrie::labels`].
    pub fn labels_str(&self, word: &str, min_matches: usize) -> Vec<String> {
        self.labels(&symbols(word), min_matches)
            .into_iter()
            .map(|word| word.into_iter().collect())
            .collect()
    }

    /// See [`LanaiTrie::decompress`].
    pub fn decompress_strings(&self) -> TrieResult<Vec<String>> {
        Ok(self
            .decompress()?
            .into_iter()
            .map(|word| word.into_iter().collect())
            .collect())
    }
}

fn symbols(word: &str) -> Vec<char> {
    word.chars().collect()
}
