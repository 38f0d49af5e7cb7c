//! The orchestrator driving both resolvers
//!
//! `process` resolves one top-level document: load, inheritance, then blocks,
//! in that fixed order so that `use` elements introduced by inheritance are
//! resolved too. Cross-file references recurse back through
//! `resolve_document`, sharing one cache for the whole run while the cycle
//! guards live in a context created fresh for each top-level call.

use crate::oohtml::blocks;
use crate::oohtml::cache::DocumentCache;
use crate::oohtml::document::Document;
use crate::oohtml::error::CompileError;
use crate::oohtml::inherit;
use crate::oohtml::paths;
use std::path::{Path, PathBuf};

#[derive(Debug, Default)]
pub struct Compiler {
    cache: DocumentCache,
    loads: usize,
}

impl Compiler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Resolve the document at `path` and every document it transitively
    /// references. Results are cached per canonical path, so processing
    /// several top-level documents with one compiler resolves shared
    /// ancestors and block sources exactly once.
    pub fn process(&mut self, path: &Path) -> Result<Document, CompileError> {
        let canonical = paths::canonicalize_input(path)?;
        let mut ctx = ResolveContext::default();
        self.resolve_document(&canonical, &mut ctx)
    }

    pub(crate) fn resolve_document(
        &mut self,
        path: &Path,
        ctx: &mut ResolveContext,
    ) -> Result<Document, CompileError> {
        if let Some(cached) = self.cache.get(path) {
            return Ok(cached);
        }

        ctx.enter_document(path);
        self.loads += 1;
        let doc = Document::load(path)?;
        inherit::resolve(self, &doc, ctx)?;
        blocks::resolve(self, &doc, ctx)?;
        ctx.leave_document();

        self.cache.insert(doc.clone());
        Ok(doc)
    }

    /// How many documents were read from disk so far. Exists so the
    /// cache-sharing guarantee is observable.
    pub fn documents_loaded(&self) -> usize {
        self.loads
    }
}

/// Per-top-level-call resolution state: the chain of documents currently
/// being resolved and the stack of block expansions in flight. Never shared
/// between top-level calls.
#[derive(Debug, Default)]
pub(crate) struct ResolveContext {
    documents: Vec<PathBuf>,
    blocks: Vec<(PathBuf, String)>,
}

impl ResolveContext {
    fn enter_document(&mut self, path: &Path) {
        self.documents.push(path.to_path_buf());
    }

    fn leave_document(&mut self) {
        self.documents.pop();
    }

    pub(crate) fn document_active(&self, path: &Path) -> bool {
        self.documents.iter().any(|p| p == path)
    }

    /// The active document chain with `next` appended, for cycle reports.
    pub(crate) fn document_chain(&self, next: &Path) -> Vec<PathBuf> {
        let mut chain = self.documents.clone();
        chain.push(next.to_path_buf());
        chain
    }

    pub(crate) fn enter_block(&mut self, path: &Path, name: &str) {
        self.blocks.push((path.to_path_buf(), name.to_string()));
    }

    pub(crate) fn leave_block(&mut self) {
        self.blocks.pop();
    }

    pub(crate) fn block_active(&self, path: &Path, name: &str) -> bool {
        self.blocks.iter().any(|(p, n)| p == path && n == name)
    }

    /// The active block chain with the repeated token appended.
    pub(crate) fn block_chain(&self, path: &Path, name: &str) -> Vec<(PathBuf, String)> {
        let mut chain = self.blocks.clone();
        chain.push((path.to_path_buf(), name.to_string()));
        chain
    }

    pub(crate) fn active_blocks(&self) -> Vec<(PathBuf, String)> {
        self.blocks.clone()
    }
}
