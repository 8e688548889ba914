//! DOM Operations Adapter
//!
//! Small helpers over `dom_query` node handles. Nodes live in the document
//! arena and are addressed by `NodeRef`/`NodeId`, so a node keeps its
//! identity across retagging and re-parenting.

// Re-export core types for external use
pub use dom_query::{Document, NodeId, NodeRef, Selection};

// Re-export StrTendril for external use
pub use tendril::StrTendril;

use dom_query::NodeData;

use crate::patterns::WHITESPACE;

// === Tag/Attribute Information ===

/// Lowercase tag name of an element, `None` for text/comment/document nodes.
#[must_use]
pub fn tag_name(node: &NodeRef) -> Option<String> {
    if !node.is_element() {
        return None;
    }
    node.node_name().map(|t| t.to_ascii_lowercase())
}

/// Whether `node` is an element with tag `tag`.
#[inline]
#[must_use]
pub fn has_tag(node: &NodeRef, tag: &str) -> bool {
    tag_name(node).is_some_and(|t| t == tag)
}

/// Whether `node` is an element whose tag is in `tags`.
#[must_use]
pub fn has_any_tag(node: &NodeRef, tags: &[&str]) -> bool {
    tag_name(node).is_some_and(|t| tags.contains(&t.as_str()))
}

/// Attribute value, or the empty string when absent.
///
/// Keyword matching treats a missing attribute like an empty one; callers
/// that need to tell them apart use `NodeRef::attr` directly.
#[must_use]
pub fn attr_or_empty(node: &NodeRef, name: &str) -> String {
    node.attr(name).map(|v| v.to_string()).unwrap_or_default()
}

/// Whether `node` is a comment or processing instruction.
#[must_use]
pub fn is_comment_like(node: &NodeRef) -> bool {
    node.query(|n| {
        matches!(
            n.data,
            NodeData::Comment { .. } | NodeData::ProcessingInstruction { .. }
        )
    })
    .unwrap_or(false)
}

// === Text Content ===

/// Trim, then replace each whitespace run with `"\n"` if it contains a line
/// break and `" "` otherwise.
#[must_use]
pub fn shrink_text(text: &str) -> String {
    WHITESPACE
        .replace_all(text.trim(), |caps: &regex::Captures| {
            if caps[0].contains(['\n', '\r']) {
                "\n"
            } else {
                " "
            }
        })
        .into_owned()
}

/// Character length of `text` once trimmed and with whitespace runs
/// collapsed to single spaces, without allocating.
#[must_use]
pub fn normalized_len(text: &str) -> usize {
    let mut words = 0usize;
    let mut chars = 0usize;
    for word in text.split_whitespace() {
        words += 1;
        chars += word.chars().count();
    }
    chars + words.saturating_sub(1)
}

/// Serialized markup of the node including its own tag.
#[inline]
#[must_use]
pub fn outer_html(node: &NodeRef) -> StrTendril {
    node.html()
}

// === Tree Navigation ===

/// Parent element, skipping the document node.
#[must_use]
pub fn parent_element<'a>(node: &NodeRef<'a>) -> Option<NodeRef<'a>> {
    node.parent().filter(NodeRef::is_element)
}

/// Whether the node is still attached to a parent.
#[inline]
#[must_use]
pub fn is_attached(node: &NodeRef) -> bool {
    node.parent().is_some()
}

/// Whether the node is still reachable from the document root.
///
/// A node inside a dropped subtree keeps its parent but is no longer
/// connected.
#[must_use]
pub fn is_connected(node: &NodeRef) -> bool {
    let mut current = *node;
    while let Some(parent) = current.parent() {
        current = parent;
    }
    current
        .query(|n| matches!(n.data, NodeData::Document))
        .unwrap_or(false)
}

/// Direct element children, text nodes skipped.
#[must_use]
pub fn element_children<'a>(node: &NodeRef<'a>) -> Vec<NodeRef<'a>> {
    node.children().into_iter().filter(NodeRef::is_element).collect()
}

/// Snapshot of all element descendants in document order, excluding `node`.
#[must_use]
pub fn descendant_elements<'a>(node: &NodeRef<'a>) -> Vec<NodeRef<'a>> {
    node.descendants().into_iter().filter(NodeRef::is_element).collect()
}

// === Querying ===

/// Snapshot of descendants matching a CSS selector, in document order.
#[must_use]
pub fn select_within<'a>(node: &NodeRef<'a>, selector: &str) -> Vec<NodeRef<'a>> {
    Selection::from(*node).select(selector).nodes().to_vec()
}

/// Number of descendants matching a CSS selector.
#[must_use]
pub fn count_within(node: &NodeRef, selector: &str) -> usize {
    Selection::from(*node).select(selector).length()
}

// === Tree Manipulation ===

/// Re-parent `child` as the last child of `parent`.
pub fn move_into(parent: &NodeRef, child: &NodeRef) {
    child.remove_from_parent();
    parent.append_child(child);
}

/// Replace `node` with its children, keeping their order.
pub fn unwrap(node: &NodeRef) {
    for child in node.children() {
        child.remove_from_parent();
        node.insert_before(&child);
    }
    node.remove_from_parent();
}

// === Parsing ===

/// Parse HTML string into document
#[inline]
#[must_use]
pub fn parse(html: &str) -> Document {
    Document::from(html)
}
