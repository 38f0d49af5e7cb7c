//! # oohtml
//!
//! An ahead-of-time compiler for the OOHTML dialect: plain HTML extended with
//! template inheritance (`extends`/`override`) and block inclusion
//! (`expose`/`<use src>`). Both mechanisms are resolved statically into
//! browser-readable HTML with no runtime trace of the source dialect.
//!
//! The `oohtmlc` binary wraps this library; the library itself is shell
//! agnostic and performs I/O only at the document boundaries (loading a
//! source file, writing a compiled one).

pub mod oohtml;
