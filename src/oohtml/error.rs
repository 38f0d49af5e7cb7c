//! Errors reported by the composition engine
//!
//! Every kind indicates malformed input or an unusable filesystem, never a
//! transient failure; none of them is retryable. A failure is fatal to the
//! top-level document being compiled and no output is written for it.

use std::fmt;
use std::path::PathBuf;

#[derive(Debug, Clone, PartialEq)]
pub enum CompileError {
    /// A source file is missing or unreadable.
    UnreadableSource { path: PathBuf, reason: String },
    /// A reference string could not be canonicalized against the filesystem.
    PathResolution {
        reference: String,
        from: PathBuf,
        reason: String,
    },
    /// An `extends` chain revisited a document. The chain lists every
    /// document on the way, first and last entries being the repeated one.
    CircularInheritance { chain: Vec<PathBuf> },
    /// A `use`/`expose` chain revisited a (document, block name) pair.
    CircularBlockReference { chain: Vec<(PathBuf, String)> },
    /// A referenced block name does not exist in the target document.
    MissingBlock { path: PathBuf, name: String },
    /// More than one block with the same name exists in the target document.
    AmbiguousBlock {
        path: PathBuf,
        name: String,
        count: usize,
    },
    /// The resolved tree could not be rendered to text.
    Serialization(String),
    /// The compiled output could not be written.
    WriteFailure { path: PathBuf, reason: String },
}

impl fmt::Display for CompileError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CompileError::UnreadableSource { path, reason } => {
                write!(f, "File {} could not be read: {reason}", path.display())
            }
            CompileError::PathResolution {
                reference,
                from,
                reason,
            } => write!(
                f,
                "Could not resolve reference '{reference}' from {}: {reason}",
                from.display()
            ),
            CompileError::CircularInheritance { chain } => {
                let chain = chain
                    .iter()
                    .map(|p| p.display().to_string())
                    .collect::<Vec<_>>()
                    .join(" -> ");
                write!(f, "Circular inheritance: {chain}")
            }
            CompileError::CircularBlockReference { chain } => {
                let chain = chain
                    .iter()
                    .map(|(path, name)| format!("{}#{name}", path.display()))
                    .collect::<Vec<_>>()
                    .join(" -> ");
                write!(f, "Circular block reference: {chain}")
            }
            CompileError::MissingBlock { path, name } => {
                write!(f, "No block named '{name}' in {}", path.display())
            }
            CompileError::AmbiguousBlock { path, name, count } => write!(
                f,
                "There are {count} blocks named '{name}' in {}; expected exactly one",
                path.display()
            ),
            CompileError::Serialization(msg) => write!(f, "Serialization error: {msg}"),
            CompileError::WriteFailure { path, reason } => {
                write!(f, "Could not write to {}: {reason}", path.display())
            }
        }
    }
}

impl std::error::Error for CompileError {}
