//! Command line argument parsing for Panagram using clap.

use std::path::PathBuf;

use clap::{Parser, ValueEnum};

/// Panagram - find single- and multi-word anagrams of a phrase
#[derive(Parser, Debug, Clone)]
#[command(name = "panagram")]
#[command(about = "Find every single- and multi-word anagram of a phrase")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(author = "Panagram Contributors")]
#[command(long_about = None)]
pub struct PanagramArgs {
    /// Words of the phrase to anagram (no quotes required)
    #[arg(value_name = "WORDS", required = true)]
    pub words: Vec<String>,

    /// Load the big dictionary in addition to the standard one
    #[arg(short = 'b', long)]
    pub big_dictionary: bool,

    /// Allow duplicates of the same word to appear multiple times in one
    /// anagram
    #[arg(short = 'd', long)]
    pub allow_duplicates: bool,

    /// Stream results directly to output. Useful for inputs that produce a
    /// very large number of anagrams, as the search is then not limited by
    /// available memory
    #[arg(short = 'o', long)]
    pub output_directly: bool,

    /// Print the subset dictionary of partial candidate words
    #[arg(short = 's', long)]
    pub print_subset: bool,

    /// Comma-separated words to exclude from candidacy
    #[arg(short = 'e', long, value_name = "WORDS", value_delimiter = ',')]
    pub exclude: Vec<String>,

    /// Include the query word itself in the single-word results when it is
    /// a dictionary entry
    #[arg(long)]
    pub include_input_word: bool,

    /// Path to the standard dictionary file
    #[arg(long, value_name = "PATH", default_value = "anagram_dict.txt")]
    pub dictionary: PathBuf,

    /// Path to the big dictionary file
    #[arg(long, value_name = "PATH", default_value = "anagram_bigdict.txt")]
    pub big_dictionary_path: PathBuf,

    /// Number of worker threads (defaults to available cores minus one)
    #[arg(long, value_name = "N")]
    pub threads: Option<usize>,

    /// Verbosity level (0=quiet, 1=normal, 2=verbose, 3=debug)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Quiet mode (overrides verbose)
    #[arg(short, long)]
    pub quiet: bool,

    /// Output format
    #[arg(short = 'f', long = "format", default_value = "human")]
    pub output_format: OutputFormat,

    /// Pretty-print JSON output
    #[arg(long)]
    pub pretty: bool,
}

impl PanagramArgs {
    /// Get the effective verbosity level
    pub fn verbosity(&self) -> u8 {
        if self.quiet {
            0
        } else {
            match self.verbose {
                0 => 1, // Default to normal
                n => n,
            }
        }
    }

    /// Get the query phrase assembled from the word arguments
    pub fn phrase(&self) -> String {
        self.words.join(" ")
    }
}

/// Report output formats
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    /// Human-readable text
    Human,

    /// JSON
    Json,
}
