//! Configuration for the Lanai Trie.

/// Default depth budget for stored words.
pub const DEFAULT_MAX_DEPTH: usize = 4096;

/// Configuration options for the Lanai Trie.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LanaiTrieConfig {
    /// Maximum word length accepted by `append`
    max_depth: usize,
}

impl LanaiTrieConfig {
    /// Create a new default configuration.
    pub fn new() -> Self {
        Self {
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }

    /// Set the maximum word length.
    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    /// Get the maximum word length.
    pub fn max_depth(&self) -> usize {
        self.max_depth
    }
}

impl Default for LanaiTrieConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// Whether removing a word may take longer words through it along.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PrefixProtection {
    /// Nodes that still prefix a stored word are never detached. Deletion
    /// only removes dead chains and pruning folds the occurrences of thin
    /// levels into surviving ancestors.
    #[default]
    Protected,

    /// A failing node is detached with its whole subtree, and the
    /// occurrences recorded below it leave the trie.
    Unprotected,
}

impl PrefixProtection {
    /// `Protected` for `true`, `Unprotected` for `false`.
    pub fn from_flag(protect_prefixes: bool) -> Self {
        if protect_prefixes {
            Self::Protected
        } else {
            Self::Unprotected
        }
    }
}
