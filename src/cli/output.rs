//! Output formatting for CLI results.

use serde::{Deserialize, Serialize};

use crate::cli::args::{OutputFormat, PanagramArgs};
use crate::error::Result;
use crate::search::AnagramResults;

/// Report for a completed search.
#[derive(Debug, Serialize, Deserialize)]
pub struct SearchReport {
    pub phrase: String,
    pub anagram_count: usize,
    pub anagrams: Vec<String>,
    pub partial_count: usize,
    pub worker_count: usize,
    pub duration_ms: u64,
}

impl SearchReport {
    /// Build a report from engine results.
    pub fn from_results(results: &AnagramResults) -> Self {
        SearchReport {
            phrase: results.phrase.clone(),
            anagram_count: results.anagram_count(),
            anagrams: results.anagrams.clone(),
            partial_count: results.partials.len(),
            worker_count: results.worker_count,
            duration_ms: results.elapsed.as_millis() as u64,
        }
    }
}

/// Print a report in the requested format.
pub fn print_report(args: &PanagramArgs, report: &SearchReport) -> Result<()> {
    match args.output_format {
        OutputFormat::Json => {
            let json = if args.pretty {
                serde_json::to_string_pretty(report)?
            } else {
                serde_json::to_string(report)?
            };
            println!("{json}");
        }
        OutputFormat::Human => {
            if args.verbosity() >= 1 {
                println!("{}", report.phrase);
            }
            for anagram in &report.anagrams {
                println!("{anagram}");
            }
            if args.verbosity() >= 1 {
                println!(
                    "{} anagrams found in {} ms.",
                    report.anagram_count, report.duration_ms
                );
            }
        }
    }
    Ok(())
}
