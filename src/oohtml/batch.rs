//! Batch compilation over files and directories
//!
//! One compiler (and therefore one document cache) serves the whole run.
//! Failures are isolated per top-level document: a bad file is recorded and
//! reported while its siblings keep compiling, and nothing is ever written
//! for a document that failed to resolve.

use crate::oohtml::compiler::Compiler;
use crate::oohtml::config::CompilerConfig;
use crate::oohtml::error::CompileError;
use crate::oohtml::language;
use std::ffi::OsStr;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

#[derive(Debug, Clone)]
pub struct BatchOptions {
    pub source_extension: String,
    pub output_extension: String,
    pub overwrite: bool,
}

impl BatchOptions {
    pub fn from_config(config: &CompilerConfig) -> Self {
        BatchOptions {
            source_extension: config.language.source_extension.clone(),
            output_extension: config.output.extension.clone(),
            overwrite: config.output.overwrite,
        }
    }
}

impl Default for BatchOptions {
    fn default() -> Self {
        BatchOptions {
            source_extension: language::FILE_EXTENSION.to_string(),
            output_extension: language::OUTPUT_EXTENSION.to_string(),
            overwrite: false,
        }
    }
}

#[derive(Debug)]
pub struct BatchFailure {
    pub path: PathBuf,
    pub error: CompileError,
}

#[derive(Debug, Default)]
pub struct BatchOutcome {
    /// Output files written, in processing order.
    pub written: Vec<PathBuf>,
    pub failures: Vec<BatchFailure>,
}

impl BatchOutcome {
    pub fn is_success(&self) -> bool {
        self.failures.is_empty()
    }
}

/// Compile every dialect file named by `inputs`. Files are taken as given;
/// directories are walked for files with the configured source extension.
pub fn run(inputs: &[PathBuf], options: &BatchOptions) -> BatchOutcome {
    let mut compiler = Compiler::new();
    let mut outcome = BatchOutcome::default();

    for path in collect_sources(inputs, &options.source_extension) {
        match compile_one(&mut compiler, &path, options) {
            Ok(written) => outcome.written.push(written),
            Err(error) => outcome.failures.push(BatchFailure { path, error }),
        }
    }
    outcome
}

fn compile_one(
    compiler: &mut Compiler,
    path: &Path,
    options: &BatchOptions,
) -> Result<PathBuf, CompileError> {
    let doc = compiler.process(path)?;
    let out = output_path(path, options);
    doc.save(&out)?;
    Ok(out)
}

fn collect_sources(inputs: &[PathBuf], extension: &str) -> Vec<PathBuf> {
    let mut sources = Vec::new();
    for input in inputs {
        if input.is_dir() {
            for entry in WalkDir::new(input)
                .sort_by_file_name()
                .into_iter()
                .filter_map(Result::ok)
            {
                let path = entry.path();
                if path.is_file() && path.extension() == Some(OsStr::new(extension)) {
                    sources.push(path.to_path_buf());
                }
            }
        } else {
            sources.push(input.clone());
        }
    }
    sources
}

fn output_path(source: &Path, options: &BatchOptions) -> PathBuf {
    if options.overwrite {
        source.to_path_buf()
    } else {
        source.with_extension(&options.output_extension)
    }
}
