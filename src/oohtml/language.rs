//! The special additions OOHTML makes to the HTML language
//!
//! All markers are plain attributes and tags with no custom namespace, so an
//! OOHTML file is always a well-formed HTML file as far as the parser is
//! concerned. Everything defined here is removed from a document before it is
//! rendered to output.

use crate::oohtml::dom;
use markup5ever_rcdom::Handle;
use once_cell::sync::Lazy;
use std::collections::HashSet;

/// On the root element: path to the ancestor document.
pub const EXTENDS_ATTRIBUTE: &str = "extends";
/// Presence attribute marking an element as replacing the ancestor element
/// with the same identifier.
pub const OVERRIDE_ATTRIBUTE: &str = "override";
/// Marks an element as an inclusion target with the given name.
pub const EXPOSE_ATTRIBUTE: &str = "expose";
/// The inclusion element.
pub const USE_TAG: &str = "use";
/// On the inclusion element: `<name>` or `<path.../name>`.
pub const SRC_ATTRIBUTE: &str = "src";
/// Inheritance matches elements by the standard `id` attribute.
pub const ID_ATTRIBUTE: &str = "id";

pub const FILE_EXTENSION: &str = "oohtml";
pub const OUTPUT_EXTENSION: &str = "html";

// Singleton semantic elements that replace their ancestor counterpart even
// without an id or an override marker.
static AUTO_OVERRIDDEN: Lazy<HashSet<&'static str>> =
    Lazy::new(|| ["title"].into_iter().collect());

/// Whether elements with this tag name are automatically overridden no matter
/// what their `id` attributes are.
pub fn is_auto_overridden(tag: &str) -> bool {
    AUTO_OVERRIDDEN.contains(tag)
}

/// Remove every dialect marker attribute from the tree rooted at `node`.
///
/// Run on a rendered clone rather than on a resolved document itself: resolved
/// documents stay in the cache and their `expose` attributes must survive so
/// later cross-file references can still find their blocks.
pub fn strip_markers(node: &Handle) {
    dom::remove_attr(node, EXTENDS_ATTRIBUTE);
    dom::remove_attr(node, OVERRIDE_ATTRIBUTE);
    dom::remove_attr(node, EXPOSE_ATTRIBUTE);
    for child in node.children.borrow().iter() {
        strip_markers(child);
    }
}
