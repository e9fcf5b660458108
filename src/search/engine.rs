//! Anagram search engine and worker orchestration.

use std::thread;
use std::time::{Duration, Instant};

use log::{debug, warn};

use crate::dictionary::tree::TernaryTree;
use crate::error::{PanagramError, Result};
use crate::occupancy::{CharOccupancy, MAX_DISTINCT};
use crate::output::OutputSink;
use crate::search::config::{EngineConfig, SearchOptions};
use crate::search::context::QueryContext;
use crate::search::task::WorkerTask;

/// Results of a completed search.
#[derive(Debug, Clone)]
pub struct AnagramResults {
    /// The normalized query phrase.
    pub phrase: String,

    /// Complete anagrams in sorted order. Empty in direct-output mode,
    /// where results streamed through the sink instead.
    pub anagrams: Vec<String>,

    /// The partial words that fed the combination phase, sorted.
    pub partials: Vec<String>,

    /// Number of workers that ran the search.
    pub worker_count: usize,

    /// Wall-clock duration of the search.
    pub elapsed: Duration,
}

impl AnagramResults {
    /// Get the number of anagrams found.
    pub fn anagram_count(&self) -> usize {
        self.anagrams.len()
    }
}

/// Parallel anagram search engine.
///
/// The engine owns no dictionary; the tree is built once by the caller and
/// shared read-only across every search and every worker.
pub struct AnagramEngine {
    config: EngineConfig,
}

impl AnagramEngine {
    /// Create a new engine.
    pub fn new(config: EngineConfig) -> Self {
        AnagramEngine { config }
    }

    /// Get the engine configuration.
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Execute a search, writing to standard output when the options call
    /// for a sink (direct output or subset dumps).
    pub fn search(
        &self,
        tree: &TernaryTree,
        phrase: &str,
        options: SearchOptions,
    ) -> Result<AnagramResults> {
        let sink = if options.output_directly || options.print_subset {
            Some(OutputSink::new(
                Box::new(std::io::stdout()),
                self.config.sink_capacity,
                self.config.sink_poll_interval,
            )?)
        } else {
            None
        };

        let result = self.search_with_sink(tree, phrase, options, sink.as_ref());
        if let Some(mut sink) = sink {
            sink.close();
        }
        result
    }

    /// Execute a search against an explicit output sink.
    ///
    /// The caller keeps ownership of the sink; all streamed output has been
    /// pushed (though not necessarily drained) by the time this returns.
    pub fn search_with_sink(
        &self,
        tree: &TernaryTree,
        phrase: &str,
        options: SearchOptions,
        sink: Option<&OutputSink>,
    ) -> Result<AnagramResults> {
        let started = Instant::now();

        let normalized = phrase.trim().to_lowercase();
        if normalized.is_empty() {
            return Err(PanagramError::invalid_argument("query phrase is empty"));
        }
        validate_distinct_bytes(&normalized)?;

        let master = CharOccupancy::from_text(&normalized);
        let worker_count = self.config.effective_workers();
        debug!(
            "searching {normalized:?} with {worker_count} workers over {} words",
            tree.word_count()
        );

        let ctx = QueryContext::new(normalized.clone(), master, options, sink);

        let spawn_failed = thread::scope(|scope| {
            for i in 0..worker_count {
                let task = WorkerTask::new(i, worker_count);
                let ctx = &ctx;
                let spawned = thread::Builder::new()
                    .name(format!("anagram-worker-{i}"))
                    .spawn_scoped(scope, move || task.run(tree, ctx));

                if let Err(e) = spawned {
                    warn!("failed to spawn worker {i}: {e}");
                    ctx.cancel();
                    return true;
                }
            }
            false
        });

        if spawn_failed {
            return Err(PanagramError::resource_exhausted(
                "failed to spawn search workers",
            ));
        }

        let anagrams: Vec<String> = ctx.take_results().into_iter().collect();
        let partials: Vec<String> = ctx.take_partials().into_iter().collect();

        Ok(AnagramResults {
            phrase: normalized,
            anagrams,
            partials,
            worker_count,
            elapsed: started.elapsed(),
        })
    }
}

impl Default for AnagramEngine {
    fn default() -> Self {
        AnagramEngine::new(EngineConfig::default())
    }
}

/// Reject phrases with more distinct bytes than one occupancy can track.
fn validate_distinct_bytes(phrase: &str) -> Result<()> {
    let mut seen = [false; 256];
    let mut distinct = 0;
    for &c in phrase.as_bytes() {
        if c.is_ascii_whitespace() || seen[c as usize] {
            continue;
        }
        seen[c as usize] = true;
        distinct += 1;
    }
    if distinct > MAX_DISTINCT {
        return Err(PanagramError::invalid_argument(format!(
            "phrase has {distinct} distinct characters; the maximum is {MAX_DISTINCT}"
        )));
    }
    Ok(())
}
