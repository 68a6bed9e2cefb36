//! Tests for the configuration module.
//!
//! This module contains tests for configuration loading, validation, and usage.

use crate::config::{ConfigLoader, LanaiConfig, PruneSettings, TrieSettings, Validate};
use crate::error::config::ConfigError;
use crate::tests::{trie_of, TestFixture};

/// Test that default configuration can be created and is valid.
#[test]
fn test_default_config_is_valid() {
    let config = LanaiConfig::default();
    assert!(config.validate().is_ok());
}

/// Test that configuration validation catches invalid values.
#[test]
fn test_config_validation() {
    let mut config = LanaiConfig::default();

    config.trie.max_depth = 0;
    assert!(config.validate().is_err());

    config.trie.max_depth = 16;
    config.prune.min_index_vote = 1.5;
    assert!(matches!(
        config.validate(),
        Err(ConfigError::ValueOutOfRange { .. })
    ));

    config.prune.min_index_vote = 0.5;
    config.prune.min_bias = -0.5;
    assert!(config.validate().is_err());

    config.prune.min_bias = 0.1;
    config.log.level = "verbose".to_string();
    assert!(config.validate().is_err());

    config.log.level = "lanai_lib=debug".to_string();
    assert!(config.validate().is_ok());
}

/// Test loading configuration from a TOML file.
#[test]
fn test_load_config_from_file() {
    let fixture = TestFixture::new().unwrap();
    let path = fixture
        .create_file(
            "lanai.toml",
            r#"
            [trie]
            max_depth = 32

            [prune]
            min_index_vote = 0.25
            "#,
        )
        .unwrap();

    let config = ConfigLoader::new(Some(&path), "TEST_FILE").load().unwrap();
    assert_eq!(config.trie.max_depth, 32);
    assert_eq!(config.prune.min_index_vote, 0.25);

    // untouched values keep their defaults
    assert_eq!(config.prune.min_bias, 0.0);
    assert_eq!(config.log, LanaiConfig::default().log);
}

/// Test loading configuration from a JSON file.
#[test]
fn test_load_config_from_json() {
    let fixture = TestFixture::new().unwrap();
    let path = fixture
        .create_file("lanai.json", r#"{ "prune": { "min_bias": 0.2 } }"#)
        .unwrap();

    let config = ConfigLoader::new(Some(&path), "TEST_JSON").load().unwrap();
    assert_eq!(config.prune.min_bias, 0.2);
}

/// Test that environment variables override file values.
#[test]
fn test_env_overrides() {
    let mut fixture = TestFixture::new().unwrap();
    let path = fixture
        .create_file("lanai.toml", "[trie]\nmax_depth = 32\n")
        .unwrap();
    fixture.set_env("TEST_ENV__TRIE__MAX_DEPTH", "8");

    let config = ConfigLoader::new(Some(&path), "TEST_ENV").load().unwrap();
    assert_eq!(config.trie.max_depth, 8);
}

/// Test the loader's failure modes.
#[test]
fn test_load_errors() {
    let fixture = TestFixture::new().unwrap();

    let missing = fixture.temp_dir.path().join("missing.toml");
    assert!(matches!(
        ConfigLoader::new(Some(&missing), "TEST_MISSING").load(),
        Err(ConfigError::FileNotFound(_))
    ));

    let unsupported = fixture.create_file("lanai.ini", "max_depth=3").unwrap();
    assert!(matches!(
        ConfigLoader::new(Some(&unsupported), "TEST_INI").load(),
        Err(ConfigError::ParseError(_))
    ));

    let invalid = fixture
        .create_file("invalid.toml", "[prune]\nmin_index_vote = 2.0\n")
        .unwrap();
    assert!(ConfigLoader::new(Some(&invalid), "TEST_INVALID").load().is_err());
}

/// Test that the default configuration renders and loads back.
#[test]
fn test_default_config_renders_as_toml() {
    let fixture = TestFixture::new().unwrap();
    let rendered = LanaiConfig::default().to_toml().unwrap();
    assert!(rendered.contains("[prune]"));

    let path = fixture.create_file("rendered.toml", rendered).unwrap();
    let loaded = ConfigLoader::new(Some(&path), "TEST_RENDERED").load().unwrap();
    assert_eq!(loaded, LanaiConfig::default());
}

/// Test that settings drive the trie.
#[test]
fn test_settings_apply_to_trie() {
    let settings = TrieSettings { max_depth: 2 };
    let mut trie = settings.build::<char>();
    assert!(trie.append_str("ab").is_ok());
    assert!(trie.append_str("abc").is_err());

    let mut trie = trie_of(&["cat", "car", "cat", "dog"]);
    let prune = PruneSettings {
        min_index_vote: 0.5,
        min_bias: 0.0,
        protect_prefixes: true,
    };
    let report = prune.apply(&mut trie).unwrap();
    assert_eq!(report.dropped_occurrences, 1);
    assert_eq!(trie.count_str("dog"), 0);
}

/// Test that turning prefix protection off reaches the pruning pass.
#[test]
fn test_unprotected_prune_from_file() {
    let fixture = TestFixture::new().unwrap();
    let path = fixture
        .create_file(
            "lanai.toml",
            r#"
            [prune]
            min_index_vote = 0.5
            protect_prefixes = false
            "#,
        )
        .unwrap();

    let config = ConfigLoader::new(Some(&path), "TEST_UNPROTECTED").load().unwrap();
    assert!(!config.prune.protect_prefixes);

    let mut protected = trie_of(&["ab", "abcd", "ab", "ab"]);
    let mut unprotected = protected.clone();
    let protecting = PruneSettings {
        min_index_vote: 0.5,
        ..PruneSettings::default()
    };
    protecting.apply(&mut protected).unwrap();
    config.prune.apply(&mut unprotected).unwrap();

    // folded into "ab" versus dropped outright
    assert_eq!(protected.count_str("ab"), 4);
    assert_eq!(unprotected.count_str("ab"), 3);
    assert_eq!(unprotected.len(), 3);
}
