//! Data structures for Lanai.
//!
//! This module contains the trie engine and its supporting types.
//! All implementations adhere to the project requirements:
//! - No unsafe code
//! - Explicit error propagation, no panics on caller input
//! - Single-owner state; sharing across threads is left to the caller

pub mod lanai_trie;

// Re-export common data structures
pub use lanai_trie::{LanaiTrie, LanaiTrieConfig, PruneReport, TrieError, TrieResult};
