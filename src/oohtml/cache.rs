//! Memoization of fully resolved documents
//!
//! One entry per canonical path per run. A document referenced from several
//! places is loaded and resolved once; every referrer gets a shallow clone
//! sharing the same tree. This is the only state shared across recursive
//! resolution calls.

use crate::oohtml::document::Document;
use std::collections::HashMap;
use std::path::{Path, PathBuf};

#[derive(Debug, Default)]
pub struct DocumentCache {
    resolved: HashMap<PathBuf, Document>,
}

impl DocumentCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, path: &Path) -> Option<Document> {
        self.resolved.get(path).cloned()
    }

    /// Store a fully resolved document under its canonical path. Documents
    /// are inserted only after resolution succeeds, so a failed document is
    /// re-attempted (and re-reported) if referenced again.
    pub fn insert(&mut self, document: Document) {
        self.resolved
            .insert(document.path().to_path_buf(), document);
    }

    pub fn len(&self) -> usize {
        self.resolved.len()
    }

    pub fn is_empty(&self) -> bool {
        self.resolved.is_empty()
    }
}
