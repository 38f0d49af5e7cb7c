//! Block resolution: the `expose` attribute and the `<use src>` element
//!
//! A `use` element is replaced by a clone of the exposed element it names.
//! The reference is either a bare name, looked up in the document itself, or
//! `path.../name` with the leading path resolving to another document. Both
//! `/` and `\` are accepted as segment separators; the final segment is the
//! block name.
//!
//! Substituted fragments are re-scanned: a clone that still contains `use`
//! elements (possible when a block is referenced before the blocks inside it
//! were reached) is expanded in place before it is attached. The cycle guard
//! is the stack of expansions currently in flight, keyed by canonical path
//! and block name, so a block that ends up expanding itself is rejected
//! while two sibling references to the same block are perfectly legal.

use crate::oohtml::compiler::{Compiler, ResolveContext};
use crate::oohtml::document::Document;
use crate::oohtml::dom;
use crate::oohtml::error::CompileError;
use crate::oohtml::language;
use crate::oohtml::paths;
use markup5ever_rcdom::Handle;
use std::path::PathBuf;

pub(crate) fn resolve(
    compiler: &mut Compiler,
    doc: &Document,
    ctx: &mut ResolveContext,
) -> Result<(), CompileError> {
    for use_el in dom::elements_by_tag(doc.tree(), language::USE_TAG) {
        expand(compiler, doc, &use_el, ctx)?;
    }
    Ok(())
}

fn expand(
    compiler: &mut Compiler,
    doc: &Document,
    use_el: &Handle,
    ctx: &mut ResolveContext,
) -> Result<(), CompileError> {
    let reference = dom::attr(use_el, language::SRC_ATTRIBUTE).unwrap_or_default();
    let (leading, name) = split_reference(&reference);

    // A path that leads back to the referring document is the same as a bare
    // name; anything else names another file.
    let target_path: Option<PathBuf> = match leading {
        Some(rel) => {
            let path = paths::resolve(doc.path(), &rel)?;
            (path != doc.path()).then_some(path)
        }
        None => None,
    };

    let token_path = target_path
        .clone()
        .unwrap_or_else(|| doc.path().to_path_buf());
    if ctx.block_active(&token_path, &name) {
        return Err(CompileError::CircularBlockReference {
            chain: ctx.block_chain(&token_path, &name),
        });
    }
    ctx.enter_block(&token_path, &name);

    let resolved;
    let target: &Document = match &target_path {
        Some(path) => {
            // A target still being resolved cannot supply a finished block.
            if ctx.document_active(path) {
                return Err(CompileError::CircularBlockReference {
                    chain: ctx.active_blocks(),
                });
            }
            resolved = compiler.resolve_document(path, ctx)?;
            &resolved
        }
        None => doc,
    };

    let matches: Vec<Handle> = dom::elements_with_attr(target.tree(), language::EXPOSE_ATTRIBUTE)
        .into_iter()
        .filter(|el| {
            dom::attr(el, language::EXPOSE_ATTRIBUTE).as_deref() == Some(name.as_str())
        })
        .collect();
    let block = match matches.len() {
        0 => {
            return Err(CompileError::MissingBlock {
                path: target.path().to_path_buf(),
                name,
            })
        }
        1 => &matches[0],
        count => {
            return Err(CompileError::AmbiguousBlock {
                path: target.path().to_path_buf(),
                name,
                count,
            })
        }
    };

    let fragment = dom::deep_clone(block);
    dom::remove_attr(&fragment, language::EXPOSE_ATTRIBUTE);
    for nested in dom::elements_by_tag(&fragment, language::USE_TAG) {
        expand(compiler, doc, &nested, ctx)?;
    }
    ctx.leave_block();

    // The HTML parser ignores the self-closing slash on unknown elements, so
    // siblings written after `<use .../>` were absorbed as its children.
    // Treat the element as void and reattach them after the fragment.
    let mut replacements = vec![fragment];
    replacements.extend(dom::take_children(use_el));
    dom::splice(use_el, replacements);
    Ok(())
}

/// Split a reference into its leading path and block name. The final segment
/// is always the name; backslash separators are normalized away so the path
/// joins cleanly on any platform.
pub(crate) fn split_reference(reference: &str) -> (Option<String>, String) {
    match reference.rfind(['/', '\\']) {
        Some(idx) => {
            let (path, name) = reference.split_at(idx);
            (Some(path.replace('\\', "/")), name[1..].to_string())
        }
        None => (None, reference.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("greeting", None, "greeting")]
    #[case("a.oohtml/greeting", Some("a.oohtml"), "greeting")]
    #[case("sub/a.oohtml/greeting", Some("sub/a.oohtml"), "greeting")]
    #[case("sub\\a.oohtml\\greeting", Some("sub/a.oohtml"), "greeting")]
    #[case("sub\\a.oohtml/greeting", Some("sub/a.oohtml"), "greeting")]
    #[case("", None, "")]
    fn splits_references(
        #[case] reference: &str,
        #[case] path: Option<&str>,
        #[case] name: &str,
    ) {
        let (leading, block) = split_reference(reference);
        assert_eq!(leading.as_deref(), path);
        assert_eq!(block, name);
    }
}
