//! CLI command execution.

use log::{info, warn};

use crate::cli::args::PanagramArgs;
use crate::cli::output::{SearchReport, print_report};
use crate::dictionary::loader;
use crate::dictionary::tree::TernaryTree;
use crate::error::Result;
use crate::search::{AnagramEngine, EngineConfig, SearchOptions};

/// Run a search from parsed arguments.
pub fn execute(args: PanagramArgs) -> Result<()> {
    let mut tree = TernaryTree::new();
    // Anagram search never excludes by distance; scores are informational.
    tree.set_max_distance(0);

    load_dictionary(&mut tree, &args.dictionary);
    if args.big_dictionary {
        load_dictionary(&mut tree, &args.big_dictionary_path);
    }
    info!("dictionary ready: {} words", tree.word_count());

    let options = SearchOptions::new()
        .with_allow_duplicates(args.allow_duplicates)
        .with_output_directly(args.output_directly)
        .with_print_subset(args.print_subset)
        .with_include_input_word(args.include_input_word)
        .with_exclude(&args.exclude);

    let config = EngineConfig {
        worker_threads: args.threads,
        ..Default::default()
    };
    let engine = AnagramEngine::new(config);

    let results = engine.search(&tree, &args.phrase(), options)?;

    // In direct-output mode everything already streamed through the sink.
    if !args.output_directly {
        let report = SearchReport::from_results(&results);
        print_report(&args, &report)?;
    }

    Ok(())
}

/// Load one word list, degrading to whatever is already present on failure.
fn load_dictionary(tree: &mut TernaryTree, path: &std::path::Path) {
    match loader::load_into(tree, path) {
        Ok(count) => info!("loaded {count} words from {}", path.display()),
        Err(e) => warn!(
            "failed to read dictionary {}: {e}; continuing with {} words",
            path.display(),
            tree.word_count()
        ),
    }
}
