//! Error module for Lanai.
//!
//! Each component defines its own error type (`TrieError` for the trie
//! engine, `ConfigError` for configuration loading); `LanaiError` unifies
//! them for callers that drive several components at once.

use std::fmt::{Display, Formatter};
use thiserror::Error;

use crate::data_structures::lanai_trie::TrieError;

pub mod config;

/// Result type alias used throughout Lanai.
pub type LanaiResult<T> = Result<T, LanaiError>;

/// Core error enum for Lanai.
#[derive(Error, Debug)]
pub enum LanaiError {
    /// Errors occurring during configuration loading or validation.
    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),

    /// Errors raised by the trie engine.
    #[error("Trie error: {0}")]
    Trie(#[from] TrieError),

    /// IO errors that may occur during file operations.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Custom error with message for cases where specific error types are not defined.
    #[error("{0}")]
    Custom(String),
}

impl LanaiError {
    /// Whether the error means the trie can no longer be trusted.
    pub fn is_fatal(&self) -> bool {
        matches!(self, LanaiError::Trie(TrieError::InternalInconsistency(_)))
    }
}

/// Error reporting structure to provide context and debugging information.
#[derive(Debug)]
pub struct ErrorContext {
    /// The original error that occurred.
    pub error: LanaiError,

    /// The component where the error occurred.
    pub component: String,

    /// Additional context information to help with debugging.
    pub details: Option<String>,
}

impl ErrorContext {
    /// Creates a new error context with the given error and component.
    ///
    /// # Arguments
    ///
    /// * `error` - The error that occurred
    /// * `component` - The component where the error occurred
    pub fn new<S: Into<String>>(error: LanaiError, component: S) -> Self {
        Self {
            error,
            component: component.into(),
            details: None,
        }
    }

    /// Adds detail information to the error context.
    pub fn with_details<S: Into<String>>(mut self, details: S) -> Self {
        self.details = Some(details.into());
        self
    }

    /// Logs the error through `tracing` and hands it back.
    pub fn report(self) -> LanaiError {
        tracing::error!(
            error = %self.error,
            component = %self.component,
            details = self.details.as_deref().unwrap_or("None"),
            fatal = self.error.is_fatal(),
            "Error reported"
        );
        self.error
    }
}

impl Display for ErrorContext {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "Error in {}: {}", self.component, self.error)?;
        if let Some(details) = &self.details {
            write!(f, "\nDetails: {details}")?;
        }
        Ok(())
    }
}
