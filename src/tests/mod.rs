//! Test modules for Lanai.
//!
//! This module contains the cross-cutting test suites:
//! - Property-based tests for the trie engine using proptest
//! - Table-driven edge cases using test-case
//! - Configuration loading and error reporting tests
//! - Shared strategies and fixtures

pub mod config_tests;
pub mod error_tests;

pub use test_utils::{trie_of, word_strategy, words_strategy, TestFixture};
