//! Output document assembly.
//!
//! Wraps the cleaned content in the `<div id="readabilityBody">` container,
//! and in a minimal HTML skeleton when a full document was requested.

use crate::dom::{has_tag, select_within, Document, NodeId, NodeRef};
use crate::result::{ReadableDocument, PARSING_ERROR_CLASS, READABLE_BODY_ID};

/// Wrap `fragment` in `<html><head><meta ...></head><body>...</body></html>`.
///
/// Returns the new `<html>` element.
fn wrap_in_skeleton<'a>(document: &'a Document, fragment: &NodeRef<'a>) -> NodeRef<'a> {
    let tree = &document.tree;
    let html = tree.new_element("html");
    let head = tree.new_element("head");
    let meta = tree.new_element("meta");
    let body = tree.new_element("body");

    meta.set_attr("http-equiv", "Content-Type");
    meta.set_attr("content", "text/html;charset=UTF-8");
    head.append_child(&meta);
    html.append_child(&head);
    html.append_child(&body);

    fragment.remove_from_parent();
    body.append_child(fragment);
    html
}

/// Ids of the output root and the content container.
fn finish(document: &Document, fragment: &NodeRef, return_fragment: bool) -> (NodeId, NodeId) {
    if return_fragment {
        (fragment.id, fragment.id)
    } else {
        (wrap_in_skeleton(document, fragment).id, fragment.id)
    }
}

/// Build the readable document around the node `content`.
///
/// If `content` is, or contains, a `<body>`, that body is retagged to
/// `<div id="readabilityBody">`. Otherwise a new container is created and
/// `content` is moved into it.
#[must_use]
pub fn build_base_document(document: Document, content: NodeId, return_fragment: bool) -> ReadableDocument {
    let (root, body) = {
        let node = NodeRef::new(content, &document.tree);
        let existing_body = if has_tag(&node, "body") {
            Some(node)
        } else {
            select_within(&node, "body").first().copied()
        };

        let fragment = match existing_body {
            Some(body) => {
                body.rename("div");
                body.set_attr("id", READABLE_BODY_ID);
                body
            }
            None => {
                let wrapper = document.tree.new_element("div");
                wrapper.set_attr("id", READABLE_BODY_ID);
                node.remove_from_parent();
                wrapper.append_child(&node);
                wrapper
            }
        };

        finish(&document, &fragment, return_fragment)
    };

    ReadableDocument::new(document, root, body, return_fragment)
}

/// The placeholder returned when no content could be extracted:
/// `<div id="readabilityBody" class="parsing-error">`.
#[must_use]
pub fn build_error_document(return_fragment: bool) -> ReadableDocument {
    let document = Document::from("");
    let (root, body) = {
        let fragment = document.tree.new_element("div");
        fragment.set_attr("id", READABLE_BODY_ID);
        fragment.set_attr("class", PARSING_ERROR_CLASS);
        finish(&document, &fragment, return_fragment)
    };

    ReadableDocument::new(document, root, body, return_fragment)
}
