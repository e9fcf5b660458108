//! Panagram CLI binary.

use std::io::Write;
use std::process;

use clap::Parser;
use env_logger::Builder;
use log::LevelFilter;

use panagram::cli::args::PanagramArgs;
use panagram::cli::commands::execute;

fn main() {
    // Parse command line arguments using clap
    let args = PanagramArgs::parse();

    // Set up logging/verbosity based on args
    let log_level = match args.verbosity() {
        0 => LevelFilter::Error, // Quiet mode
        1 => LevelFilter::Warn,  // Default
        2 => LevelFilter::Info,  // Verbose
        _ => LevelFilter::Debug, // Very verbose (3+)
    };

    Builder::new()
        .filter_level(log_level)
        .format(|buf, record| writeln!(buf, "[{}] {}", record.level(), record.args()))
        .init();

    // Execute the search
    if let Err(e) = execute(args) {
        eprintln!("Error: {e}");
        process::exit(1);
    }
}
