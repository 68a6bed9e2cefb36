// Copyright (c) 2025 Mauka MCP Authors
//
// Licensed under dual license:
// - MIT License (LICENSE-MIT or https://opensource.org/licenses/MIT)
// - Apache License, Version 2.0 (LICENSE-APACHE or https://www.apache.org/licenses/LICENSE-2.0)

//! Reconstruction of the stored multiset in insertion order.

use tracing::{debug, warn};

use super::error::{TrieError, TrieResult};
use super::node::{NodeId, Symbol};
use super::LanaiTrie;

impl<S: Symbol> LanaiTrie<S> {
    /// Returns every stored occurrence, ordered by insertion position:
    /// `result[i]` is the word whose occurrence holds position `i`.
    ///
    /// The trie is left untouched, so calling this twice yields the same
    /// sequence. Use [`into_words`](Self::into_words) to consume the trie
    /// instead.
    ///
    /// # Errors
    ///
    /// `TrieError::InternalInconsistency` if the occurrence positions do not
    /// form exactly `0..len()`.
    pub fn decompress(&self) -> TrieResult<Vec<Vec<S>>> {
        let mut slots: Vec<Option<Vec<S>>> = vec![None; self.word_count];
        let mut failure = None;

        // every end node writes its word into each slot its occurrences name
        self.visit_paths(NodeId::ROOT, Vec::new(), |node, word| {
            if failure.is_some() {
                return;
            }
            for &position in node.terminal.occurrences() {
                match slots.get_mut(position) {
                    Some(slot @ None) => *slot = Some(word.to_vec()),
                    Some(Some(_)) => {
                        warn!(position, "position recorded twice");
                        failure = Some(TrieError::InternalInconsistency(format!(
                            "position {position} is recorded twice"
                        )));
                        return;
                    }
                    None => {
                        warn!(position, len = self.word_count, "position out of range");
                        failure = Some(TrieError::InternalInconsistency(format!(
                            "position {position} is out of range for {} occurrences",
                            self.word_count
                        )));
                        return;
                    }
                }
            }
        });
        if let Some(error) = failure {
            return Err(error);
        }

        let words = slots
            .into_iter()
            .enumerate()
            .map(|(position, word)| {
                word.ok_or_else(|| {
                    warn!(position, "no occurrence holds position");
                    TrieError::InternalInconsistency(format!("position {position} is not recorded"))
                })
            })
            .collect::<TrieResult<Vec<_>>>()?;
        debug!(words = words.len(), "decompressed trie");
        Ok(words)
    }

    /// Consumes the trie and returns its occurrences in insertion order.
    pub fn into_words(self) -> TrieResult<Vec<Vec<S>>> {
        self.decompress()
    }
}
