//! Trie and pruning configuration.

use super::{ConfigResult, Validate};
use crate::data_structures::lanai_trie::{
    LanaiTrie, LanaiTrieConfig, PrefixProtection, PruneReport, Symbol, TrieResult,
    DEFAULT_MAX_DEPTH,
};
use crate::error::config::ConfigError;
use serde::{Deserialize, Serialize};

/// Trie construction settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct TrieSettings {
    /// Longest word accepted on insertion
    pub max_depth: usize,
}

impl Default for TrieSettings {
    fn default() -> Self {
        Self {
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }
}

impl TrieSettings {
    /// Converts the settings into a trie configuration.
    pub fn to_trie_config(&self) -> LanaiTrieConfig {
        LanaiTrieConfig::new().with_max_depth(self.max_depth)
    }

    /// Creates an empty trie configured by these settings.
    pub fn build<S: Symbol>(&self) -> LanaiTrie<S> {
        LanaiTrie::with_config(self.to_trie_config())
    }
}

impl Validate for TrieSettings {
    fn validate(&self) -> ConfigResult<()> {
        if self.max_depth == 0 {
            return Err(ConfigError::ValidationError(
                "max_depth must be greater than 0".to_string(),
            ));
        }
        Ok(())
    }
}

/// Thresholds for a pruning pass.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct PruneSettings {
    /// Fraction of all occurrences a depth level must hold
    pub min_index_vote: f64,

    /// Added to the even sibling share before comparing
    pub min_bias: f64,

    /// Keep nodes that still prefix stored words; off cuts failing subtrees
    pub protect_prefixes: bool,
}

impl Default for PruneSettings {
    fn default() -> Self {
        Self {
            min_index_vote: 0.05,
            min_bias: 0.0,
            protect_prefixes: true,
        }
    }
}

impl PruneSettings {
    /// Runs a pruning pass on `trie` with these thresholds.
    pub fn apply<S: Symbol>(&self, trie: &mut LanaiTrie<S>) -> TrieResult<PruneReport> {
        trie.prune_with(
            self.min_index_vote,
            self.min_bias,
            PrefixProtection::from_flag(self.protect_prefixes),
        )
    }
}

impl Validate for PruneSettings {
    fn validate(&self) -> ConfigResult<()> {
        if !(0.0..=1.0).contains(&self.min_index_vote) {
            return Err(ConfigError::ValueOutOfRange {
                key: "prune.min_index_vote".to_string(),
                message: "must be between 0.0 and 1.0 inclusive".to_string(),
            });
        }
        if !self.min_bias.is_finite() || self.min_bias < 0.0 {
            return Err(ConfigError::ValueOutOfRange {
                key: "prune.min_bias".to_string(),
                message: "must be a non-negative number".to_string(),
            });
        }
        Ok(())
    }
}
