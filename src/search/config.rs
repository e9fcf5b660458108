//! Configuration for anagram searches.

use std::collections::HashSet;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::output::{DEFAULT_CAPACITY, DEFAULT_POLL_INTERVAL};

/// Configuration for the anagram engine.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Number of worker threads.
    /// If None, uses the available hardware parallelism minus one, floor one.
    pub worker_threads: Option<usize>,

    /// Output sink capacity in items.
    pub sink_capacity: usize,

    /// Interval between output sink drain passes.
    pub sink_poll_interval: Duration,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            worker_threads: None,
            sink_capacity: DEFAULT_CAPACITY,
            sink_poll_interval: DEFAULT_POLL_INTERVAL,
        }
    }
}

impl EngineConfig {
    /// Resolve the effective worker count.
    ///
    /// Leaves one core for the output consumer when the count is derived
    /// from the hardware, never going below one.
    pub fn effective_workers(&self) -> usize {
        self.worker_threads
            .unwrap_or_else(|| num_cpus::get().saturating_sub(1))
            .max(1)
    }
}

/// Options for a specific search request.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SearchOptions {
    /// Permit reuse of the same partial word at multiple positions.
    pub allow_duplicates: bool,

    /// Stream results through the output sink instead of accumulating a
    /// result set. Useful when the result volume may exceed memory.
    pub output_directly: bool,

    /// Dump the partials set through the sink for diagnostics.
    pub print_subset: bool,

    /// Include the query word itself in single-word results when it is
    /// also a dictionary entry.
    pub include_input_word: bool,

    /// Words removed from candidacy, case-folded.
    pub exclude: HashSet<String>,
}

impl SearchOptions {
    /// Create options with all flags off.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set whether the same partial word may be reused.
    pub fn with_allow_duplicates(mut self, allow: bool) -> Self {
        self.allow_duplicates = allow;
        self
    }

    /// Set whether results stream directly through the sink.
    pub fn with_output_directly(mut self, direct: bool) -> Self {
        self.output_directly = direct;
        self
    }

    /// Set whether to dump the partials set.
    pub fn with_print_subset(mut self, print: bool) -> Self {
        self.print_subset = print;
        self
    }

    /// Set whether the query word itself may appear in the results.
    pub fn with_include_input_word(mut self, include: bool) -> Self {
        self.include_input_word = include;
        self
    }

    /// Set the words excluded from candidacy.
    pub fn with_exclude<I, S>(mut self, words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.exclude = words
            .into_iter()
            .map(|word| word.as_ref().to_lowercase())
            .collect();
        self
    }
}
