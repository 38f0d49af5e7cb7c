//! Reference strings to canonical filesystem paths
//!
//! A reference found in one document resolves relative to the directory
//! containing that document, then canonicalizes. The canonical path is the
//! cache and cycle-detection key for the whole run, so two spellings of the
//! same file must land on the same value.

use crate::oohtml::error::CompileError;
use std::fs;
use std::io;
use std::path::{Component, Path, PathBuf};

/// Resolve `reference` against the document at `referring`. An absolute
/// reference is returned unchanged.
pub fn resolve(referring: &Path, reference: &str) -> Result<PathBuf, CompileError> {
    let candidate = Path::new(reference);
    if candidate.is_absolute() {
        return Ok(candidate.to_path_buf());
    }
    let dir = referring
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."));
    canonicalize_lenient(&dir.join(candidate)).map_err(|reason| CompileError::PathResolution {
        reference: reference.to_string(),
        from: referring.to_path_buf(),
        reason,
    })
}

/// Canonicalize a top-level input path before anything is resolved off it.
pub fn canonicalize_input(path: &Path) -> Result<PathBuf, CompileError> {
    canonicalize_lenient(path).map_err(|reason| CompileError::PathResolution {
        reference: path.display().to_string(),
        from: path.to_path_buf(),
        reason,
    })
}

/// `fs::canonicalize`, except that a path which simply does not exist falls
/// back to lexical normalization. Nonexistence must surface later as a read
/// failure on the file itself, not as a path resolution failure; broken
/// symlinks and permission errors stay fatal here.
fn canonicalize_lenient(path: &Path) -> Result<PathBuf, String> {
    match fs::canonicalize(path) {
        Ok(canonical) => Ok(canonical),
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(normalize(path)),
        Err(e) => Err(e.to_string()),
    }
}

/// Remove `.` and `..` segments without touching the filesystem.
fn normalize(path: &Path) -> PathBuf {
    let mut out = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                if !out.pop() {
                    out.push(component.as_os_str());
                }
            }
            other => out.push(other.as_os_str()),
        }
    }
    out
}
