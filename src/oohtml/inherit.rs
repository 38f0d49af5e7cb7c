//! Inheritance resolution: the `extends` and `override` attributes
//!
//! When a document extends another, the ancestor's head and body are merged
//! into the child's, element by element:
//!
//! - a child element carrying `override` deletes the ancestor element with
//!   the same `id` and stands unchanged (silently a no-op when nothing
//!   matches);
//! - a few singleton tags (see [`language::is_auto_overridden`]) override by
//!   tag name alone, `<title>` being the canonical case;
//! - a child element whose `id` matches an ancestor element merges with it
//!   recursively, so nested structure composes;
//! - everything left of the ancestor is prepended ahead of the child's own
//!   content, keeping its original relative order. Inheritance is additive
//!   by default.
//!
//! Elements without an `id` are never matched; they can only be auto
//! overridden by tag or carried along as ancestor-only content. Every node
//! that crosses from the ancestor tree into the child is deep-cloned, never
//! aliased: the ancestor's resolved tree lives in the cache and may serve
//! other referrers.

use crate::oohtml::compiler::{Compiler, ResolveContext};
use crate::oohtml::document::Document;
use crate::oohtml::dom;
use crate::oohtml::error::CompileError;
use crate::oohtml::language;
use crate::oohtml::paths;
use markup5ever_rcdom::Handle;

pub(crate) fn resolve(
    compiler: &mut Compiler,
    doc: &Document,
    ctx: &mut ResolveContext,
) -> Result<(), CompileError> {
    let Some(root) = doc.html() else {
        return Ok(());
    };
    let Some(reference) = dom::attr(&root, language::EXTENDS_ATTRIBUTE) else {
        return Ok(());
    };

    let ancestor_path = paths::resolve(doc.path(), &reference)?;
    if ctx.document_active(&ancestor_path) {
        return Err(CompileError::CircularInheritance {
            chain: ctx.document_chain(&ancestor_path),
        });
    }

    // Ancestors resolve bottom-up: a multi-level chain is already flat by
    // the time it merges into this document.
    let ancestor = compiler.resolve_document(&ancestor_path, ctx)?;

    if let (Some(ancestor_head), Some(head)) = (ancestor.head(), doc.head()) {
        merge(&ancestor_head, &head);
    }
    if let (Some(ancestor_body), Some(body)) = (ancestor.body(), doc.body()) {
        merge(&ancestor_body, &body);
    }
    dom::remove_attr(&root, language::EXTENDS_ATTRIBUTE);
    Ok(())
}

/// Merge the direct children of `ancestor` into `child`, in place, recursing
/// where elements match by id. Only reads the ancestor tree.
fn merge(ancestor: &Handle, child: &Handle) {
    let mut working = dom::element_children(ancestor);

    for c in dom::element_children(child) {
        if dom::has_attr(&c, language::OVERRIDE_ATTRIBUTE) {
            if let Some(id) = dom::attr(&c, language::ID_ATTRIBUTE) {
                working.retain(|a| {
                    dom::attr(a, language::ID_ATTRIBUTE).as_deref() != Some(id.as_str())
                });
            }
        } else if let Some(tag) =
            dom::tag_name(&c).filter(|t| language::is_auto_overridden(t))
        {
            working.retain(|a| dom::tag_name(a) != Some(tag));
        } else if let Some(id) = dom::attr(&c, language::ID_ATTRIBUTE) {
            if let Some(pos) = working.iter().position(|a| {
                dom::attr(a, language::ID_ATTRIBUTE).as_deref() == Some(id.as_str())
            }) {
                let matched = working.remove(pos);
                let merged = dom::deep_clone(&c);
                merge(&matched, &merged);
                dom::replace_node(&c, merged);
            }
        }
    }

    // Whatever the child neither overrode nor matched is inherited verbatim,
    // ahead of the child's own content.
    for leftover in working.iter().rev() {
        dom::prepend_child(child, dom::deep_clone(leftover));
    }
}
