// Copyright (c) 2025 Mauka MCP Authors
//
// Licensed under dual license:
// - MIT License (LICENSE-MIT or https://opensource.org/licenses/MIT)
// - Apache License, Version 2.0 (LICENSE-APACHE or https://www.apache.org/licenses/LICENSE-2.0)

use lanai_lib::config::{LanaiConfig, PruneSettings};
use lanai_lib::data_structures::{LanaiTrie, TrieError};
use proptest::prelude::*;

/// Words with a skewed frequency profile: a handful of common words and a
/// long tail of rare ones.
fn corpus() -> Vec<String> {
    let common = ["the", "then", "there", "this", "that"];
    let mut words = Vec::new();
    for round in 0..50 {
        for (rank, word) in common.iter().enumerate() {
            if round % (rank + 1) == 0 {
                words.push(word.to_string());
            }
        }
        words.push(format!("rare{round}"));
    }
    words
}

/// Test the full life cycle on a larger corpus
#[test]
fn test_corpus_lifecycle() {
    let words = corpus();
    let mut trie = LanaiTrie::from_strs(&words).unwrap();

    assert_eq!(trie.len(), words.len());
    assert_eq!(trie.decompress_strings().unwrap(), words);
    assert_eq!(trie.popular_str().as_deref(), Some("the"));
    assert_eq!(trie.nearest_str("thi", 2).as_deref(), Some("this"));

    let report = PruneSettings::default().apply(&mut trie).unwrap();
    assert!(report.changed());
    assert!(trie.check_invariants().is_ok());

    // the "e" branch dominates below "th" and keeps its words
    for word in ["the", "then", "there"] {
        assert_eq!(
            trie.count_str(word),
            words.iter().filter(|w| *w == word).count(),
            "{word} lost occurrences"
        );
    }

    // "this" and "that" are rare next to it and fold into "th"
    assert_eq!(trie.count_str("this"), 0);
    assert_eq!(trie.count_str("that"), 0);
    assert_eq!(trie.count_str("th"), 13 + 10);

    // the "rare" branch hangs off the root, so its occurrences are dropped
    assert_eq!(report.dropped_occurrences, 50);
    assert_eq!(trie.len(), words.len() - 50);
    assert!(trie.labels_str("rare", 1).is_empty());
}

/// Test that deletion keeps the remaining sequence in order
#[test]
fn test_deleting_every_rare_word() {
    let words = corpus();
    let mut trie = LanaiTrie::from_strs(&words).unwrap();

    for round in 0..50 {
        assert!(trie.delete_str(&format!("{round}"), "rare", 1));
    }

    let expected: Vec<&String> = words.iter().filter(|w| !w.starts_with("rare")).collect();
    let remaining = trie.decompress_strings().unwrap();
    assert_eq!(remaining.iter().collect::<Vec<_>>(), expected);
    assert!(trie.labels_str("rare", 1).is_empty());
    assert!(trie.check_invariants().is_ok());
}

/// Test that configuration builds a matching trie
#[test]
fn test_trie_from_config() {
    let mut config = LanaiConfig::default();
    config.trie.max_depth = 4;

    let mut trie = config.trie.build::<char>();
    assert!(trie.append_str("then").is_ok());
    assert_eq!(
        trie.append_str("there"),
        Err(TrieError::KeyTooLong { len: 5, max_depth: 4 })
    );
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn proptest_byte_tries_round_trip(words in prop::collection::vec(prop::collection::vec(0u8..4, 0..5), 0..30)) {
        let trie: LanaiTrie<u8> = LanaiTrie::try_from_words(&words).unwrap();
        prop_assert_eq!(trie.decompress().unwrap(), words);
    }
}
