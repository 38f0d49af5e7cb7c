//! Document composition engine for the OOHTML dialect
//!
//!     Inheritance (`extends` on the root element, `override` on any element)
//!     and block inclusion (`expose` on any element, `<use src="...">` as the
//!     reference) are resolved ahead of time into plain HTML.
//!
//! Architecture
//!
//!     - dom: the mutable HTML tree (html5ever + rcdom) with the query,
//!       clone and splice operations the resolvers need
//!     - document: a source file identified by its canonical path, owning
//!       one tree for its whole lifetime
//!     - paths: reference strings to canonical filesystem paths
//!     - cache: one resolved instance per canonical path per run
//!     - inherit: the recursive element merge behind `extends`
//!     - blocks: `use`/`expose` substitution with nested re-scan
//!     - compiler: drives the resolvers in order and owns the per-run state
//!     - config / batch: the outer surface consumed by the `oohtmlc` binary
//!
//!     Resolution is single threaded and fully synchronous. The only state
//!     shared across recursive calls is the document cache owned by the
//!     [`Compiler`]; cycle guards live in a per-call context and are never
//!     shared between top-level resolutions.

pub mod batch;
pub mod blocks;
pub mod cache;
pub mod compiler;
pub mod config;
pub mod document;
pub mod dom;
pub mod error;
pub mod inherit;
pub mod language;
pub mod paths;

pub use compiler::Compiler;
pub use document::Document;
pub use error::CompileError;
