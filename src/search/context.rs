//! Per-query shared search state.
//!
//! Everything the workers of one search share lives here, so concurrent
//! independent queries cannot collide: the master occupancy, the per-letter
//! done table, the partials and result sets, the phase-1 gate, and the
//! cancellation flag. Each shared collection sits behind its own mutex; the
//! output sink keeps its own lock, decoupled from the result set.

use std::collections::BTreeSet;
use std::mem;
use std::sync::OnceLock;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

use log::debug;
use parking_lot::Mutex;

use crate::occupancy::CharOccupancy;
use crate::output::OutputSink;
use crate::search::config::SearchOptions;

/// How many recorded anagrams between progress log lines.
const PROGRESS_INTERVAL: usize = 100;

/// Frozen product of the gather phase: the sorted partials snapshot the
/// combination phase iterates.
pub(crate) struct GatherSummary {
    pub partials: Vec<String>,
}

/// Shared state for one search invocation.
pub struct QueryContext<'a> {
    /// Normalized query phrase (trimmed, lowercased).
    pub(crate) phrase: String,

    /// Master character counts for the phrase.
    pub(crate) master: CharOccupancy,

    pub(crate) options: SearchOptions,

    /// Letters of the phrase already gathered.
    letters_done: Mutex<[bool; 256]>,

    /// Partial words: strict-subset candidates feeding phase 2.
    partials: Mutex<BTreeSet<String>>,

    /// Completed anagrams. Stays empty in direct-output mode.
    results: Mutex<BTreeSet<String>>,

    /// Phase-1 gate: the first worker in runs the gather, the rest block
    /// until the summary is initialized.
    gathered: OnceLock<GatherSummary>,

    found_count: AtomicUsize,
    cancelled: AtomicBool,

    sink: Option<&'a OutputSink>,
}

impl<'a> QueryContext<'a> {
    /// Create the context for one search.
    pub(crate) fn new(
        phrase: String,
        master: CharOccupancy,
        options: SearchOptions,
        sink: Option<&'a OutputSink>,
    ) -> Self {
        QueryContext {
            phrase,
            master,
            options,
            letters_done: Mutex::new([false; 256]),
            partials: Mutex::new(BTreeSet::new()),
            results: Mutex::new(BTreeSet::new()),
            gathered: OnceLock::new(),
            found_count: AtomicUsize::new(0),
            cancelled: AtomicBool::new(false),
            sink,
        }
    }

    /// Run the gather phase exactly once across all workers.
    ///
    /// The calling worker either executes `gather` itself or blocks until
    /// the worker that won the race completes it.
    pub(crate) fn gather_gate(&self, gather: impl FnOnce() -> GatherSummary) -> &GatherSummary {
        self.gathered.get_or_init(gather)
    }

    /// Claim a letter for gathering. Returns false if it was already done.
    pub(crate) fn claim_letter(&self, c: u8) -> bool {
        let mut done = self.letters_done.lock();
        if done[c as usize] {
            false
        } else {
            done[c as usize] = true;
            true
        }
    }

    /// Mark a word as a partial candidate.
    pub(crate) fn add_partial(&self, word: &str) {
        self.partials.lock().insert(word.to_string());
    }

    /// Record a completed anagram.
    ///
    /// In direct-output mode the phrase is streamed through the sink;
    /// otherwise it is inserted into the deduplicating result set.
    pub(crate) fn record_anagram(&self, phrase: String) {
        if self.options.output_directly {
            if let Some(sink) = self.sink {
                sink.push(&format!("{phrase}\n"));
            }
            self.found_count.fetch_add(1, Ordering::Relaxed);
            return;
        }

        if self.results.lock().insert(phrase) {
            let found = self.found_count.fetch_add(1, Ordering::Relaxed) + 1;
            if found % PROGRESS_INTERVAL == 0 {
                debug!("anagrams found: {found}");
            }
        }
    }

    /// Send diagnostic text through the sink, if one is attached.
    pub(crate) fn push_output(&self, text: &str) {
        if let Some(sink) = self.sink {
            sink.push(text);
        }
    }

    /// Request that workers stop at their next check point.
    pub(crate) fn cancel(&self) {
        self.cancelled.store(true, Ordering::Release);
    }

    /// Check whether the search was cancelled.
    pub(crate) fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::Acquire)
    }

    /// Get the number of anagrams recorded so far.
    pub(crate) fn found_count(&self) -> usize {
        self.found_count.load(Ordering::Relaxed)
    }

    /// Snapshot the partials in sorted order.
    pub(crate) fn partials_sorted(&self) -> Vec<String> {
        self.partials.lock().iter().cloned().collect()
    }

    /// Take the result set, leaving the context empty.
    pub(crate) fn take_results(&self) -> BTreeSet<String> {
        mem::take(&mut *self.results.lock())
    }

    /// Take the partials set, leaving the context empty.
    pub(crate) fn take_partials(&self) -> BTreeSet<String> {
        mem::take(&mut *self.partials.lock())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::search::config::SearchOptions;

    fn context() -> QueryContext<'static> {
        QueryContext::new(
            "cat".to_string(),
            CharOccupancy::from_text("cat"),
            SearchOptions::default(),
            None,
        )
    }

    #[test]
    fn test_claim_letter_once() {
        let ctx = context();
        assert!(ctx.claim_letter(b'c'));
        assert!(!ctx.claim_letter(b'c'));
        assert!(ctx.claim_letter(b'a'));
    }

    #[test]
    fn test_record_anagram_deduplicates() {
        let ctx = context();
        ctx.record_anagram("act".to_string());
        ctx.record_anagram("act".to_string());
        ctx.record_anagram("tac".to_string());

        assert_eq!(ctx.found_count(), 2);
        let results = ctx.take_results();
        assert_eq!(results.len(), 2);
        assert!(results.contains("act"));
        assert!(results.contains("tac"));
    }

    #[test]
    fn test_gather_gate_runs_once() {
        let ctx = context();
        let first = ctx.gather_gate(|| GatherSummary {
            partials: vec!["a".to_string()],
        });
        assert_eq!(first.partials, ["a"]);

        // A second arrival must see the first summary, not run its own.
        let second = ctx.gather_gate(|| GatherSummary {
            partials: vec!["never".to_string()],
        });
        assert_eq!(second.partials, ["a"]);
    }

    #[test]
    fn test_cancellation_flag() {
        let ctx = context();
        assert!(!ctx.is_cancelled());
        ctx.cancel();
        assert!(ctx.is_cancelled());
    }
}
