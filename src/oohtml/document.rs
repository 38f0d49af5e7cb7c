//! A source document and its tree
//!
//! A document is identified by its canonical filesystem path and owns one
//! tree for the whole run. Cloning a `Document` is shallow: the tree is
//! shared, which is exactly what the cache relies on so that every referrer
//! observes the identical resolved structure.

use crate::oohtml::dom;
use crate::oohtml::error::CompileError;
use crate::oohtml::language;
use markup5ever_rcdom::Handle;
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Clone)]
pub struct Document {
    path: PathBuf,
    root: Handle,
}

impl Document {
    /// Read and parse the file at `path`.
    pub fn load(path: &Path) -> Result<Self, CompileError> {
        let contents = fs::read_to_string(path).map_err(|e| CompileError::UnreadableSource {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;
        Ok(Self::from_source(path, &contents))
    }

    /// Build a document from in-memory markup. The path is still recorded
    /// because relative references resolve against it.
    pub fn from_source(path: &Path, contents: &str) -> Self {
        Document {
            path: path.to_path_buf(),
            root: dom::parse(contents),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// The document node, root of the whole tree.
    pub fn tree(&self) -> &Handle {
        &self.root
    }

    /// The `<html>` element.
    pub fn html(&self) -> Option<Handle> {
        dom::element_children(&self.root).into_iter().next()
    }

    pub fn head(&self) -> Option<Handle> {
        self.section("head")
    }

    pub fn body(&self) -> Option<Handle> {
        self.section("body")
    }

    fn section(&self, tag: &str) -> Option<Handle> {
        self.html()
            .and_then(|html| {
                dom::element_children(&html)
                    .into_iter()
                    .find(|c| dom::is_html_element(c, tag))
            })
    }

    /// Render the document as plain HTML with every dialect marker removed.
    /// Stripping happens on a deep clone so the resolved tree, which may
    /// still serve block lookups from other documents, stays intact.
    pub fn to_html(&self) -> Result<String, CompileError> {
        let rendered = dom::deep_clone(&self.root);
        language::strip_markers(&rendered);
        dom::serialize_tree(&rendered)
    }

    /// Write the rendered document to `out`.
    pub fn save(&self, out: &Path) -> Result<(), CompileError> {
        let html = self.to_html()?;
        fs::write(out, html).map_err(|e| CompileError::WriteFailure {
            path: out.to_path_buf(),
            reason: e.to_string(),
        })
    }
}

impl fmt::Debug for Document {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Document")
            .field("path", &self.path)
            .finish_non_exhaustive()
    }
}
