//! The mutable HTML tree consumed by the resolvers
//!
//! A thin layer over html5ever's rcdom: parsing, serialization, tag and
//! attribute queries, deep cloning and in-place splicing. The resolvers move
//! elements between trees only through [`deep_clone`], never by aliasing a
//! handle into another document, because resolved trees are shared through
//! the cache.

use crate::oohtml::error::CompileError;
use html5ever::tendril::{StrTendril, TendrilSink};
use html5ever::{
    ns, parse_document, serialize, serialize::SerializeOpts, serialize::TraversalScope, ParseOpts,
};
use markup5ever_rcdom::{Handle, Node, NodeData, RcDom, SerializableHandle};
use std::cell::{Cell, RefCell};
use std::rc::Rc;

/// Parse HTML text into a tree, returning the document node.
///
/// The parser is error-recovering and always produces the full
/// html/head/body skeleton, so there is no failure case here.
pub fn parse(contents: &str) -> Handle {
    let dom: RcDom = parse_document(RcDom::default(), ParseOpts::default())
        .one(StrTendril::from_slice(contents));
    dom.document
}

/// Serialize the children of a document node back to HTML text.
pub fn serialize_tree(document: &Handle) -> Result<String, CompileError> {
    let mut output = Vec::new();
    let opts = SerializeOpts {
        traversal_scope: TraversalScope::ChildrenOnly(None),
        ..Default::default()
    };
    let serializable = SerializableHandle::from(document.clone());
    serialize(&mut output, &serializable, opts)
        .map_err(|e| CompileError::Serialization(e.to_string()))?;
    String::from_utf8(output).map_err(|e| CompileError::Serialization(e.to_string()))
}

/// The tag name of an element node, or None for any other node kind.
pub fn tag_name(node: &Handle) -> Option<&str> {
    match &node.data {
        NodeData::Element { name, .. } => Some(&name.local),
        _ => None,
    }
}

/// Whether `node` is an element with this tag name in the HTML namespace.
/// The namespace check keeps SVG content (which has its own `use` element)
/// out of the dialect's way.
pub fn is_html_element(node: &Handle, tag: &str) -> bool {
    matches!(&node.data, NodeData::Element { name, .. }
        if name.ns == ns!(html) && &*name.local == tag)
}

pub fn attr(node: &Handle, attr_name: &str) -> Option<String> {
    match &node.data {
        NodeData::Element { attrs, .. } => attrs
            .borrow()
            .iter()
            .find(|a| &*a.name.local == attr_name)
            .map(|a| a.value.to_string()),
        _ => None,
    }
}

pub fn has_attr(node: &Handle, attr_name: &str) -> bool {
    attr(node, attr_name).is_some()
}

pub fn remove_attr(node: &Handle, attr_name: &str) {
    if let NodeData::Element { attrs, .. } = &node.data {
        attrs.borrow_mut().retain(|a| &*a.name.local != attr_name);
    }
}

/// The element children of a node, skipping text and comment nodes.
pub fn element_children(node: &Handle) -> Vec<Handle> {
    node.children
        .borrow()
        .iter()
        .filter(|c| matches!(c.data, NodeData::Element { .. }))
        .cloned()
        .collect()
}

/// All elements under `root` (in document order) with this HTML tag name.
pub fn elements_by_tag(root: &Handle, tag: &str) -> Vec<Handle> {
    let mut found = Vec::new();
    collect(root, &mut |node| is_html_element(node, tag), &mut found);
    found
}

/// All elements under `root` (in document order) carrying this attribute.
pub fn elements_with_attr(root: &Handle, attr_name: &str) -> Vec<Handle> {
    let mut found = Vec::new();
    collect(root, &mut |node| has_attr(node, attr_name), &mut found);
    found
}

pub fn first_by_tag(root: &Handle, tag: &str) -> Option<Handle> {
    elements_by_tag(root, tag).into_iter().next()
}

fn collect(node: &Handle, pred: &mut dyn FnMut(&Handle) -> bool, out: &mut Vec<Handle>) {
    if pred(node) {
        out.push(node.clone());
    }
    for child in node.children.borrow().iter() {
        collect(child, pred, out);
    }
}

/// Recursively clone a subtree. The clone owns fresh nodes throughout and
/// has no parent, so it can be inserted into any tree.
pub fn deep_clone(node: &Handle) -> Handle {
    let data = match &node.data {
        NodeData::Document => NodeData::Document,
        NodeData::Doctype {
            name,
            public_id,
            system_id,
        } => NodeData::Doctype {
            name: name.clone(),
            public_id: public_id.clone(),
            system_id: system_id.clone(),
        },
        NodeData::Text { contents } => NodeData::Text {
            contents: RefCell::new(contents.borrow().clone()),
        },
        NodeData::Comment { contents } => NodeData::Comment {
            contents: contents.clone(),
        },
        NodeData::Element {
            name,
            attrs,
            template_contents,
            mathml_annotation_xml_integration_point,
        } => NodeData::Element {
            name: name.clone(),
            attrs: RefCell::new(attrs.borrow().clone()),
            template_contents: RefCell::new(
                template_contents.borrow().as_ref().map(deep_clone),
            ),
            mathml_annotation_xml_integration_point: *mathml_annotation_xml_integration_point,
        },
        NodeData::ProcessingInstruction { target, contents } => {
            NodeData::ProcessingInstruction {
                target: target.clone(),
                contents: contents.clone(),
            }
        }
    };
    let clone = Rc::new(Node {
        parent: Cell::new(None),
        children: RefCell::new(Vec::new()),
        data,
    });
    for child in node.children.borrow().iter() {
        let child_clone = deep_clone(child);
        child_clone.parent.set(Some(Rc::downgrade(&clone)));
        clone.children.borrow_mut().push(child_clone);
    }
    clone
}

/// Insert `child` as the first child of `parent`.
pub fn prepend_child(parent: &Handle, child: Handle) {
    child.parent.set(Some(Rc::downgrade(parent)));
    parent.children.borrow_mut().insert(0, child);
}

/// Replace `old` in its tree with a single node.
pub fn replace_node(old: &Handle, new: Handle) {
    splice(old, vec![new]);
}

/// Replace `old` in its tree with zero or more nodes, in order. A node with
/// no parent is silently left alone.
pub fn splice(old: &Handle, replacements: Vec<Handle>) {
    let Some(parent) = old.parent.take().and_then(|weak| weak.upgrade()) else {
        return;
    };
    let mut children = parent.children.borrow_mut();
    let Some(idx) = children.iter().position(|c| Rc::ptr_eq(c, old)) else {
        return;
    };
    children.remove(idx);
    for (offset, node) in replacements.into_iter().enumerate() {
        node.parent.set(Some(Rc::downgrade(&parent)));
        children.insert(idx + offset, node);
    }
}

/// Detach and return all children of a node.
pub fn take_children(node: &Handle) -> Vec<Handle> {
    node.children.borrow_mut().drain(..).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_builds_the_document_skeleton() {
        let root = parse("<div id=\"a\">hi</div>");
        let html = first_by_tag(&root, "html").expect("html element");
        assert!(first_by_tag(&html, "head").is_some());
        assert!(first_by_tag(&html, "body").is_some());
        assert_eq!(elements_by_tag(&root, "div").len(), 1);
    }

    #[test]
    fn serialize_round_trips_content() {
        let root = parse(r#"<html><head><title>T</title></head><body><p id="x">text</p></body></html>"#);
        let html = serialize_tree(&root).expect("serializes");
        assert!(html.contains("<title>T</title>"));
        assert!(html.contains(r#"<p id="x">text</p>"#));
    }

    #[test]
    fn attribute_queries() {
        let root = parse(r#"<div id="a" expose="greeting">hi</div>"#);
        let div = first_by_tag(&root, "div").expect("div");
        assert_eq!(attr(&div, "id").as_deref(), Some("a"));
        assert_eq!(attr(&div, "expose").as_deref(), Some("greeting"));
        assert!(attr(&div, "missing").is_none());
        remove_attr(&div, "expose");
        assert!(!has_attr(&div, "expose"));
        assert!(has_attr(&div, "id"));
    }

    #[test]
    fn deep_clone_is_independent_of_the_original() {
        let root = parse(r#"<div id="a"><span>inner</span></div>"#);
        let div = first_by_tag(&root, "div").expect("div");
        let clone = deep_clone(&div);
        remove_attr(&clone, "id");
        assert!(has_attr(&div, "id"));
        assert_eq!(element_children(&clone).len(), 1);
    }

    #[test]
    fn splice_replaces_a_node_with_several() {
        let root = parse("<body><p>one</p></body>");
        let p = first_by_tag(&root, "p").expect("p");
        let body = first_by_tag(&root, "body").expect("body");
        let first = parse("<i>a</i>");
        let second = parse("<b>b</b>");
        let a = first_by_tag(&first, "i").expect("i");
        let b = first_by_tag(&second, "b").expect("b");
        splice(&p, vec![deep_clone(&a), deep_clone(&b)]);
        let tags: Vec<String> = element_children(&body)
            .iter()
            .map(|c| tag_name(c).unwrap_or_default().to_string())
            .collect();
        assert_eq!(tags, vec!["i", "b"]);
    }

    #[test]
    fn prepend_puts_the_child_first() {
        let root = parse("<body><p>one</p></body>");
        let body = first_by_tag(&root, "body").expect("body");
        let other = parse("<h1>t</h1>");
        let h1 = first_by_tag(&other, "h1").expect("h1");
        prepend_child(&body, deep_clone(&h1));
        let tags: Vec<String> = element_children(&body)
            .iter()
            .map(|c| tag_name(c).unwrap_or_default().to_string())
            .collect();
        assert_eq!(tags, vec!["h1", "p"]);
    }
}
