//! Sparse character-occupancy multisets.
//!
//! A [`CharOccupancy`] counts how many times each byte occurs in a word or
//! phrase, independent of letter order. Two texts are anagrams of each other
//! exactly when their occupancies are equal, and a word can participate in a
//! multi-word anagram of a phrase exactly when its occupancy is a subset of
//! the phrase's. The combination search compares and merges occupancies
//! instead of rescanning ever-growing candidate phrases.

use std::fmt;

/// Maximum number of distinct bytes a single occupancy can track.
///
/// Sized to the realistic maximum of distinct letters in one operand; the
/// search entry point validates query phrases against this bound so the
/// limit is never hit from the public API.
pub const MAX_DISTINCT: usize = 64;

/// Result of comparing one occupancy against another.
///
/// This is an asymmetric pruning relation tailored for the combination
/// search, not a lexical order. `Lesser` means "a valid, still-growable
/// partial": every count fits inside the other occupancy with room to
/// spare. `Greater` means at least one character overflows the other
/// occupancy; since counts only grow under [`CharOccupancy::merge`], a
/// branch classified `Greater` can never become valid by adding more words.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Relation {
    /// At least one character count (or the distinct-character count)
    /// exceeds the other occupancy.
    Greater,

    /// Identical distinct characters with identical counts.
    Equal,

    /// A strict subset of the other occupancy.
    Lesser,
}

/// A sparse multiset of per-byte occurrence counts.
///
/// Counts live in a flat 256-entry table; a compact insertion-ordered index
/// of the currently-occupied bytes makes [`clear`](CharOccupancy::clear) and
/// iteration O(distinct) rather than O(alphabet). Invariant: a byte appears
/// in the occupied index iff its count is non-zero.
#[derive(Clone)]
pub struct CharOccupancy {
    /// Occurrence count per byte value.
    counts: [u8; 256],

    /// Occupied bytes in first-seen order.
    occupied: [u8; MAX_DISTINCT],

    /// Number of live entries in `occupied`.
    len: usize,
}

impl CharOccupancy {
    /// Create an empty occupancy.
    pub fn new() -> Self {
        CharOccupancy {
            counts: [0; 256],
            occupied: [0; MAX_DISTINCT],
            len: 0,
        }
    }

    /// Create an occupancy pre-filled from `text`.
    pub fn from_text(text: &str) -> Self {
        let mut occupancy = CharOccupancy::new();
        occupancy.add_text(text);
        occupancy
    }

    /// Reset to empty, touching only the occupied entries.
    pub fn clear(&mut self) {
        while self.len > 0 {
            self.len -= 1;
            self.counts[self.occupied[self.len] as usize] = 0;
        }
    }

    /// Record one occurrence of `c`. ASCII whitespace is ignored.
    pub fn add_char(&mut self, c: u8) {
        if c.is_ascii_whitespace() {
            return;
        }
        let index = c as usize;
        if self.counts[index] == 0 {
            assert!(
                self.len < MAX_DISTINCT,
                "occupancy distinct-character capacity exceeded"
            );
            self.occupied[self.len] = c;
            self.len += 1;
        }
        self.counts[index] += 1;
    }

    /// Accumulate counts for every non-whitespace byte of `text`.
    pub fn add_text(&mut self, text: &str) {
        for &c in text.as_bytes() {
            self.add_char(c);
        }
    }

    /// Add another occupancy's counts into this one, registering any newly
    /// seen characters.
    ///
    /// This is what lets the combination search extend a candidate phrase by
    /// one word without rescanning the whole phrase.
    pub fn merge(&mut self, other: &CharOccupancy) {
        for &c in &other.occupied[..other.len] {
            let index = c as usize;
            if self.counts[index] == 0 {
                assert!(
                    self.len < MAX_DISTINCT,
                    "occupancy distinct-character capacity exceeded"
                );
                self.occupied[self.len] = c;
                self.len += 1;
            }
            self.counts[index] += other.counts[index];
        }
    }

    /// Get the occurrence count for `c`.
    pub fn count(&self, c: u8) -> usize {
        self.counts[c as usize] as usize
    }

    /// Get the number of distinct occupied characters.
    pub fn distinct_count(&self) -> usize {
        self.len
    }

    /// Check whether no characters have been recorded.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Compare this occupancy against `other`.
    ///
    /// The relation is decided in three steps:
    ///
    /// 1. Strictly more distinct characters than `other` is `Greater`;
    ///    nothing can shrink, so stop there.
    /// 2. Fewer distinct characters is tentatively `Lesser`, but any shared
    ///    character whose count exceeds `other`'s overrides to `Greater`.
    /// 3. With equal distinct counts, any excess count is `Greater`; all
    ///    counts ≤ `other`'s with no character of `other` missing from self
    ///    is `Equal`; otherwise `Lesser`.
    pub fn compare(&self, other: &CharOccupancy) -> Relation {
        if self.len > other.len {
            return Relation::Greater;
        }
        let mut result = if self.len < other.len {
            Relation::Lesser
        } else {
            Relation::Equal
        };

        for &c in &self.occupied[..self.len] {
            let index = c as usize;
            if self.counts[index] > other.counts[index] {
                // Greaterness supersedes any previously seen lesserness.
                return Relation::Greater;
            }
            if self.counts[index] < other.counts[index] {
                result = Relation::Lesser;
            }
        }

        if result == Relation::Equal {
            for &c in &other.occupied[..other.len] {
                let index = c as usize;
                if self.counts[index] < other.counts[index] {
                    return Relation::Lesser;
                }
            }
        }

        result
    }

    /// Check whether every character occupied in self has a count in
    /// `other` at least as large.
    pub fn is_subset(&self, other: &CharOccupancy) -> bool {
        self.occupied[..self.len]
            .iter()
            .all(|&c| other.counts[c as usize] >= self.counts[c as usize])
    }
}

impl Default for CharOccupancy {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for CharOccupancy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut map = f.debug_map();
        for &c in &self.occupied[..self.len] {
            map.entry(&(c as char), &self.counts[c as usize]);
        }
        map.finish()
    }
}

/// Initial number of per-depth accumulators in an [`OccupancyPool`].
const INITIAL_POOL_DEPTH: usize = 64;

/// A pool of reusable occupancy accumulators, one per recursion depth.
///
/// The combination search keeps the accumulated occupancy of the candidate
/// phrase at depth `d` in slot `d` and builds the next sum in slot `d + 1`,
/// so no occupancy is allocated per call. The pool grows on demand when a
/// search recurses deeper than the current capacity.
pub struct OccupancyPool {
    slots: Vec<CharOccupancy>,
}

impl OccupancyPool {
    /// Create a pool with the default initial depth.
    pub fn new() -> Self {
        Self::with_depth(INITIAL_POOL_DEPTH)
    }

    /// Create a pool with `depth` preallocated accumulators.
    pub fn with_depth(depth: usize) -> Self {
        let mut slots = Vec::with_capacity(depth);
        slots.resize_with(depth, CharOccupancy::new);
        OccupancyPool { slots }
    }

    /// Current capacity in depths.
    pub fn depth(&self) -> usize {
        self.slots.len()
    }

    /// Get the accumulator for `depth`, growing the pool if needed.
    pub fn slot(&mut self, depth: usize) -> &mut CharOccupancy {
        self.ensure(depth + 1);
        &mut self.slots[depth]
    }

    /// Split-borrow the frozen accumulator at `depth` together with the
    /// mutable scratch accumulator at `depth + 1`.
    pub fn pair(&mut self, depth: usize) -> (&CharOccupancy, &mut CharOccupancy) {
        self.ensure(depth + 2);
        let (head, tail) = self.slots.split_at_mut(depth + 1);
        (&head[depth], &mut tail[0])
    }

    fn ensure(&mut self, depth: usize) {
        if self.slots.len() < depth {
            self.slots.resize_with(depth, CharOccupancy::new);
        }
    }
}

impl Default for OccupancyPool {
    fn default() -> Self {
        Self::new()
    }
}
