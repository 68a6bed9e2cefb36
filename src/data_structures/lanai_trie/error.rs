//! Error types for the Lanai Trie.
//!
//! Expected absence (a word that is not stored, an instance that does not
//! exist) is never an error; those operations return `false` or `None`.

/// Errors that can occur in Lanai Trie operations.
#[derive(Debug, thiserror::Error, PartialEq, Eq, Clone)]
pub enum TrieError {
    /// A caller-supplied argument is outside its contract.
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// A word is longer than the configured depth budget.
    #[error("Word of length {len} exceeds maximum trie depth of {max_depth}")]
    KeyTooLong {
        /// Length of the rejected word.
        len: usize,
        /// The maximum allowed depth.
        max_depth: usize,
    },

    /// The occurrence index no longer describes the tree. The trie contents
    /// can not be trusted after this.
    #[error("Internal inconsistency: {0}")]
    InternalInconsistency(String),
}

/// Result type for Lanai Trie operations
pub type TrieResult<T> = Result<T, TrieError>;
