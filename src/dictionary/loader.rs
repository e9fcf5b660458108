//! Dictionary file loading.
//!
//! Word lists are plain text, one word per line. Blank lines and
//! surrounding whitespace are tolerated; words are case-normalized by the
//! tree on insert. Because the tree does not self-balance, feeding it a
//! sorted word list in order would degenerate the left/right links into a
//! linked list, so the loader inserts the second half of the file before
//! the first — a two-phase order that keeps the tree roughly balanced for
//! the common case of alphabetically sorted lists.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use log::info;

use crate::dictionary::tree::TernaryTree;
use crate::error::Result;

/// Load a word list into an existing tree.
///
/// Returns the number of words inserted. Lines already present in the tree
/// are skipped, so a second (bigger) list can be layered over a first one
/// without inflating the word count.
pub fn load_into<P: AsRef<Path>>(tree: &mut TernaryTree, path: P) -> Result<usize> {
    let file = File::open(path.as_ref())?;
    let reader = BufReader::new(file);

    let mut lines = Vec::new();
    for line in reader.lines() {
        let line = line?;
        let word = line.trim();
        if !word.is_empty() {
            lines.push(word.to_string());
        }
    }

    info!(
        "reading {} words from {}",
        lines.len(),
        path.as_ref().display()
    );

    let mut inserted = 0;
    let middle = lines.len() / 2;

    // Phase 1: second half of the file.
    for word in &lines[middle..] {
        if !tree.find(word) {
            tree.insert(word);
            inserted += 1;
        }
    }

    // Phase 2: first half.
    for word in &lines[..middle] {
        if !tree.find(word) {
            tree.insert(word);
            inserted += 1;
        }
    }

    Ok(inserted)
}

/// Load a word list into a fresh tree.
pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<TernaryTree> {
    let mut tree = TernaryTree::new();
    load_into(&mut tree, path)?;
    Ok(tree)
}
