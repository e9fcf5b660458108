//! Worker tasks for the two-phase search.
//!
//! Every worker runs the same entry point: pass through the phase-1 gate
//! (the first worker in performs the gather, the rest block until it is
//! done), then combine partials over its interleaved slice of the frozen
//! candidate list.

use log::debug;
use uuid::Uuid;

use crate::dictionary::tree::TernaryTree;
use crate::occupancy::{CharOccupancy, OccupancyPool, Relation};
use crate::search::context::{GatherSummary, QueryContext};

/// Partial words per line when dumping the subset dictionary.
const SUBSET_COLUMNS: usize = 8;

/// Descriptor for one worker's slice of the search.
///
/// The task starts its traversal of the shared candidate list at its own
/// index and advances by the total worker count: static interleaved
/// partitioning, no work-stealing.
pub struct WorkerTask {
    /// Unique identifier for diagnostics.
    pub task_id: String,

    /// This worker's starting offset into the candidate list.
    pub index: usize,

    /// Total number of workers; the traversal step.
    pub stride: usize,
}

impl WorkerTask {
    /// Create a task descriptor for worker `index` of `stride`.
    pub fn new(index: usize, stride: usize) -> Self {
        WorkerTask {
            task_id: format!("worker_{}_{}", index, Uuid::new_v4()),
            index,
            stride: stride.max(1),
        }
    }

    /// Run the full two-phase search for this worker.
    pub fn run(&self, tree: &TernaryTree, ctx: &QueryContext<'_>) {
        debug!("task {} starting", self.task_id);
        let summary = ctx.gather_gate(|| gather(tree, ctx));
        self.combine(ctx, &summary.partials);
        debug!("task {} finished", self.task_id);
    }

    /// Phase 2: combine partials over this worker's interleaved slice.
    fn combine(&self, ctx: &QueryContext<'_>, partials: &[String]) {
        let mut pool = OccupancyPool::new();

        let mut index = self.index;
        while index < partials.len() {
            if ctx.is_cancelled() {
                debug!("task {} cancelled", self.task_id);
                return;
            }

            let head = &partials[index];
            let accumulator = pool.slot(0);
            accumulator.clear();
            accumulator.add_text(head);
            combine_recurse(ctx, partials, head, 0, index, &mut pool);

            index += self.stride;
        }
    }
}

/// Phase 1: garner full-word anagrams and partials.
///
/// For each distinct letter of the phrase, enumerate every dictionary word
/// sharing that letter as a stem and classify it against the master
/// occupancy: equal means a complete single-word anagram, a strict subset
/// becomes a building block for phase 2, anything else is discarded.
fn gather(tree: &TernaryTree, ctx: &QueryContext<'_>) -> GatherSummary {
    debug!("gather phase starting for {:?}", ctx.phrase);

    let mut candidate = CharOccupancy::new();

    for &c in ctx.phrase.as_bytes() {
        if c.is_ascii_whitespace() {
            continue;
        }
        if !ctx.claim_letter(c) {
            continue;
        }

        let letter = (c as char).to_string();
        let hits = tree.fuzzy_find(&letter);
        for word in hits.words() {
            if ctx.options.exclude.contains(word) {
                continue;
            }

            candidate.clear();
            candidate.add_text(word);

            if candidate.compare(&ctx.master) == Relation::Equal {
                if word == ctx.phrase && !ctx.options.include_input_word {
                    continue;
                }
                ctx.record_anagram(word.to_string());
            } else if candidate.is_subset(&ctx.master) {
                ctx.add_partial(word);
            }
        }
    }

    let partials = ctx.partials_sorted();
    debug!("gather phase done: {} partials", partials.len());

    if ctx.options.print_subset {
        dump_subset(ctx, &partials);
    }

    GatherSummary { partials }
}

/// Recursively extend `head` with further partials.
///
/// The accumulated occupancy of `head` sits in pool slot `depth`; each
/// candidate is merged into the scratch slot at `depth + 1` and compared to
/// the master. Equal emits a complete anagram; Lesser recurses with the
/// merged phrase as the new head, resuming from the current candidate so
/// permutations of one word multiset are never re-derived; Greater prunes,
/// since a sum can only grow.
fn combine_recurse(
    ctx: &QueryContext<'_>,
    partials: &[String],
    head: &str,
    depth: usize,
    start: usize,
    pool: &mut OccupancyPool,
) {
    for index in start..partials.len() {
        let candidate = &partials[index];

        // Disallow candidacy of the already-used word unless dupes are on.
        if !ctx.options.allow_duplicates && candidate.as_str() == head {
            continue;
        }

        let (accumulated, sum) = pool.pair(depth);
        sum.clear();
        sum.add_text(candidate);
        sum.merge(accumulated);

        match sum.compare(&ctx.master) {
            Relation::Equal => {
                ctx.record_anagram(format!("{head} {candidate}"));
            }
            Relation::Lesser => {
                // Still a partial; the merged sum becomes the accumulator
                // for the next depth.
                let phrase = format!("{head} {candidate}");
                combine_recurse(ctx, partials, &phrase, depth + 1, index, pool);
            }
            Relation::Greater => {}
        }
    }
}

/// Dump the subset dictionary of partial candidate words through the sink.
fn dump_subset(ctx: &QueryContext<'_>, partials: &[String]) {
    for chunk in partials.chunks(SUBSET_COLUMNS) {
        let mut line = chunk.join(",");
        line.push('\n');
        ctx.push_output(&line);
    }
    ctx.push_output("\n");
}
