//! Integration tests for end-to-end anagram searches.

use std::collections::BTreeSet;
use std::io::{self, Write};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use panagram::dictionary::loader;
use panagram::dictionary::tree::TernaryTree;
use panagram::error::Result;
use panagram::occupancy::{CharOccupancy, Relation};
use panagram::output::OutputSink;
use panagram::search::{AnagramEngine, EngineConfig, SearchOptions};

fn tree_with(words: &[&str]) -> TernaryTree {
    let mut tree = TernaryTree::new();
    tree.set_max_distance(0);
    for word in words {
        tree.insert(word);
    }
    tree
}

fn engine_with_workers(workers: usize) -> AnagramEngine {
    AnagramEngine::new(EngineConfig {
        worker_threads: Some(workers),
        ..Default::default()
    })
}

/// A cloneable writer capturing sink output for inspection.
#[derive(Clone, Default)]
struct CaptureWriter(Arc<Mutex<Vec<u8>>>);

impl CaptureWriter {
    fn lines(&self) -> Vec<String> {
        String::from_utf8(self.0.lock().unwrap().clone())
            .unwrap()
            .lines()
            .map(str::to_string)
            .collect()
    }
}

impl Write for CaptureWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

#[test]
fn test_single_word_anagrams_from_word_list() -> Result<()> {
    let mut word_list = tempfile::NamedTempFile::new().unwrap();
    for word in ["cat", "act", "tac", "ta", "c"] {
        writeln!(word_list, "{word}").unwrap();
    }
    word_list.flush().unwrap();

    let mut tree = loader::load_from_file(word_list.path())?;
    tree.set_max_distance(0);

    let engine = engine_with_workers(2);
    let results = engine.search(&tree, "cat", SearchOptions::default())?;

    assert!(results.anagrams.contains(&"act".to_string()));
    assert!(results.anagrams.contains(&"tac".to_string()));
    assert!(!results.anagrams.contains(&"cat".to_string()));

    Ok(())
}

#[test]
fn test_multi_word_partitions_are_complete() -> Result<()> {
    let tree = tree_with(&["a", "t", "c", "at", "ta"]);
    let engine = engine_with_workers(2);

    let results = engine.search(&tree, "act", SearchOptions::default())?;
    let anagrams: BTreeSet<&str> = results.anagrams.iter().map(String::as_str).collect();

    // Every partition of {a:1, c:1, t:1} into dictionary words must be
    // discovered, each in its sorted word order.
    let expected: BTreeSet<&str> = ["a c t", "at c", "c ta"].into_iter().collect();
    assert_eq!(anagrams, expected);

    // No emitted combination may exceed the master in any character.
    let master = CharOccupancy::from_text("act");
    for phrase in &results.anagrams {
        let occupancy = CharOccupancy::from_text(phrase);
        assert_eq!(occupancy.compare(&master), Relation::Equal);
    }

    Ok(())
}

#[test]
fn test_result_set_is_deterministic_across_worker_counts() -> Result<()> {
    let tree = tree_with(&[
        "s", "t", "o", "p", "so", "to", "op", "opt", "pot", "top", "pots", "spot", "stop", "tops",
        "post",
    ]);

    let mut sets = Vec::new();
    for workers in [1, 2, 8] {
        let engine = engine_with_workers(workers);
        let results = engine.search(&tree, "stop", SearchOptions::default())?;
        assert_eq!(results.worker_count, workers);
        let set: BTreeSet<String> = results.anagrams.into_iter().collect();
        sets.push(set);
    }

    assert_eq!(sets[0], sets[1]);
    assert_eq!(sets[1], sets[2]);
    assert!(sets[0].contains("pots"));
    assert!(sets[0].contains("opt s"));
    assert!(sets[0].contains("o p s t"));

    Ok(())
}

#[test]
fn test_exclude_list_removes_candidates() -> Result<()> {
    let tree = tree_with(&["cat", "act", "tac", "ta", "c"]);
    let engine = engine_with_workers(2);

    let options = SearchOptions::default().with_exclude(["tac", "ta"]);
    let results = engine.search(&tree, "cat", options)?;

    assert!(results.anagrams.contains(&"act".to_string()));
    assert!(!results.anagrams.contains(&"tac".to_string()));
    // "ta" was also a partial; excluding it kills the "c ta" combination.
    assert!(!results.anagrams.iter().any(|a| a.contains("ta")));
    assert!(!results.partials.contains(&"ta".to_string()));

    Ok(())
}

#[test]
fn test_allow_duplicates_controls_word_reuse() -> Result<()> {
    let tree = tree_with(&["a", "b"]);
    let engine = engine_with_workers(1);

    let strict = engine.search(&tree, "aab", SearchOptions::default())?;
    assert!(strict.anagrams.is_empty());

    let relaxed = engine.search(
        &tree,
        "aab",
        SearchOptions::default().with_allow_duplicates(true),
    )?;
    assert!(relaxed.anagrams.contains(&"a a b".to_string()));

    Ok(())
}

#[test]
fn test_include_input_word_policy() -> Result<()> {
    let tree = tree_with(&["cat", "act"]);
    let engine = engine_with_workers(2);

    let without = engine.search(&tree, "cat", SearchOptions::default())?;
    assert!(!without.anagrams.contains(&"cat".to_string()));

    let with = engine.search(
        &tree,
        "cat",
        SearchOptions::default().with_include_input_word(true),
    )?;
    assert!(with.anagrams.contains(&"cat".to_string()));
    assert!(with.anagrams.contains(&"act".to_string()));

    Ok(())
}

#[test]
fn test_direct_output_matches_accumulated_results() -> Result<()> {
    let tree = tree_with(&["cat", "act", "tac", "ta", "c"]);
    let engine = engine_with_workers(2);

    let accumulated = engine.search(&tree, "cat", SearchOptions::default())?;
    let expected: BTreeSet<String> = accumulated.anagrams.into_iter().collect();

    let capture = CaptureWriter::default();
    let mut sink = OutputSink::new(
        Box::new(capture.clone()),
        64,
        Duration::from_millis(1),
    )?;
    let options = SearchOptions::default().with_output_directly(true);
    let direct = engine.search_with_sink(&tree, "cat", options, Some(&sink))?;
    sink.close();

    // The result set stays empty in direct mode; the sink received the
    // same phrases instead.
    assert!(direct.anagrams.is_empty());
    let streamed: BTreeSet<String> = capture.lines().into_iter().collect();
    assert_eq!(streamed, expected);

    Ok(())
}

#[test]
fn test_print_subset_dumps_partials() -> Result<()> {
    let tree = tree_with(&["cat", "act", "ta", "c"]);
    let engine = engine_with_workers(2);

    let capture = CaptureWriter::default();
    let mut sink = OutputSink::new(
        Box::new(capture.clone()),
        64,
        Duration::from_millis(1),
    )?;
    let options = SearchOptions::default().with_print_subset(true);
    let results = engine.search_with_sink(&tree, "cat", options, Some(&sink))?;
    sink.close();

    assert_eq!(results.partials, ["c", "ta"]);
    let dump = capture.lines().join("\n");
    assert!(dump.contains("c,ta"), "subset dump missing from {dump:?}");

    Ok(())
}

#[test]
fn test_big_dictionary_layering_expands_results() -> Result<()> {
    let mut small = tempfile::NamedTempFile::new().unwrap();
    writeln!(small, "act").unwrap();
    small.flush().unwrap();

    let mut big = tempfile::NamedTempFile::new().unwrap();
    writeln!(big, "act").unwrap();
    writeln!(big, "tac").unwrap();
    big.flush().unwrap();

    let mut tree = loader::load_from_file(small.path())?;
    tree.set_max_distance(0);
    loader::load_into(&mut tree, big.path())?;

    let engine = engine_with_workers(1);
    let results = engine.search(&tree, "cat", SearchOptions::default())?;

    assert!(results.anagrams.contains(&"act".to_string()));
    assert!(results.anagrams.contains(&"tac".to_string()));

    Ok(())
}
