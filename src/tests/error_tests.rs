//! Tests for the error module.

use crate::data_structures::TrieError;
use crate::error::config::ConfigError;
use crate::error::{ErrorContext, LanaiError};

/// Test that error context can be created and displayed properly.
#[test]
fn test_error_context_display() {
    let error = LanaiError::Custom("test error".to_string());
    let context = ErrorContext::new(error, "test_component").with_details("additional details");

    let display_string = format!("{context}");
    assert!(display_string.contains("test error"));
    assert!(display_string.contains("test_component"));
    assert!(display_string.contains("additional details"));
}

/// Test that component errors convert and keep their message.
#[test]
fn test_component_errors_convert() {
    let trie_error: LanaiError = TrieError::KeyTooLong { len: 9, max_depth: 8 }.into();
    assert!(trie_error.to_string().starts_with("Trie error:"));
    assert!(!trie_error.is_fatal());

    let config_error: LanaiError = ConfigError::ValidationError("bad".to_string()).into();
    assert_eq!(
        config_error.to_string(),
        "Configuration error: Configuration validation error: bad"
    );
}

/// Test that only internal inconsistencies are fatal.
#[test]
fn test_inconsistency_is_fatal() {
    let error: LanaiError =
        TrieError::InternalInconsistency("position 3 is recorded twice".to_string()).into();
    assert!(error.is_fatal());

    let reported = ErrorContext::new(error, "decompress").report();
    assert!(reported.is_fatal());
}
