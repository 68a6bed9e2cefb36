//! Lanai Library
//!
//! Lanai is a frequency-aware trie that stores a multiset of symbol
//! sequences. Every inserted occurrence keeps its insertion position, which
//! allows statistics over the stored words, statistical pruning of rare
//! branches, and exact reconstruction of the original insertion sequence.
//!
//! # Architecture
//!
//! - `data_structures::lanai_trie`: the trie engine
//! - `config`: layered file / environment configuration
//! - `error`: crate-level error types

pub mod config;
pub mod data_structures;
pub mod error;

// Internal modules that are not part of the public API
#[cfg(test)]
pub(crate) mod tests;

use std::path::Path;

use config::{ConfigLoader, LanaiConfig, LogConfig, ENV_PREFIX};
use error::{ErrorContext, LanaiError, LanaiResult};

pub use data_structures::LanaiTrie;

/// Version information for Lanai.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Install a global `tracing` subscriber according to `log`.
pub fn init_logging(log: &LogConfig) -> LanaiResult<()> {
    let filter = tracing_subscriber::EnvFilter::try_new(&log.level)
        .map_err(|e| LanaiError::Custom(format!("Invalid log filter '{}': {e}", log.level)))?;
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_file(log.source_location)
        .with_line_number(log.source_location);

    let installed = if log.json {
        tracing::subscriber::set_global_default(builder.json().finish())
    } else {
        tracing::subscriber::set_global_default(builder.finish())
    };
    installed
        .map_err(|e| LanaiError::Custom(format!("Failed to set global tracing subscriber: {e}")))
}

/// Library initialization function.
///
/// Loads configuration from `config_path` (if any) and `LANAI__*` environment
/// variables, then installs logging. Returns the loaded configuration.
pub fn init(config_path: Option<&Path>) -> LanaiResult<LanaiConfig> {
    let config = ConfigLoader::new(config_path, ENV_PREFIX)
        .load()
        .map_err(|e| ErrorContext::new(e.into(), "config").report())?;
    init_logging(&config.log)?;
    tracing::info!(version = VERSION, max_depth = config.trie.max_depth, "Lanai initialized");
    Ok(config)
}
