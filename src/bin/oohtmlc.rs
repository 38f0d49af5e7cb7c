//! Command-line interface for the oohtml compiler
//!
//! Compiles OOHTML files (or directories of them) into plain HTML. By
//! default each source file gets a sibling output file with the `.html`
//! extension; pass `--extension` to change it or `--overwrite` to replace
//! the source file in place.

use clap::{Arg, ArgAction, Command};
use oohtml::oohtml::batch::{self, BatchOptions};
use oohtml::oohtml::config::Loader;
use std::path::PathBuf;

fn main() {
    let matches = Command::new("oohtmlc")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Compile OOHTML documents into plain, browser-readable HTML")
        .arg_required_else_help(true)
        .arg(
            Arg::new("paths")
                .help("OOHTML files or directories to compile")
                .required(true)
                .num_args(1..),
        )
        .arg(
            Arg::new("overwrite")
                .long("overwrite")
                .short('o')
                .help("Overwrite source files in place instead of writing sibling output files")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("config")
                .long("config")
                .short('c')
                .help("Path to a TOML configuration file layered over the defaults"),
        )
        .arg(
            Arg::new("extension")
                .long("extension")
                .short('e')
                .help("Extension for sibling output files (defaults to \"html\")"),
        )
        .get_matches();

    let mut loader = Loader::new();
    if let Some(path) = matches.get_one::<String>("config") {
        loader = loader.with_file(path);
    }
    if matches.get_flag("overwrite") {
        loader = loader
            .set_override("output.overwrite", true)
            .unwrap_or_else(|e| {
                eprintln!("Configuration error: {e}");
                std::process::exit(1);
            });
    }
    if let Some(extension) = matches.get_one::<String>("extension") {
        loader = loader
            .set_override("output.extension", extension.as_str())
            .unwrap_or_else(|e| {
                eprintln!("Configuration error: {e}");
                std::process::exit(1);
            });
    }
    let config = loader.build().unwrap_or_else(|e| {
        eprintln!("Configuration error: {e}");
        std::process::exit(1);
    });

    let inputs: Vec<PathBuf> = matches
        .get_many::<String>("paths")
        .expect("paths are required")
        .map(PathBuf::from)
        .collect();

    let outcome = batch::run(&inputs, &BatchOptions::from_config(&config));

    for written in &outcome.written {
        println!("{}", written.display());
    }
    for failure in &outcome.failures {
        eprintln!("{}: {}", failure.path.display(), failure.error);
    }
    if !outcome.is_success() {
        std::process::exit(1);
    }
}
