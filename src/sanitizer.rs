//! Pre-scoring cleanup of active and non-content markup.
//!
//! Runs in place on the loaded document before any scoring. Only the listed
//! element kinds and attributes are touched; every other node keeps its
//! position, tag and attributes.

use crate::dom::{descendant_elements, is_comment_like, Document, NodeRef};

/// Elements removed together with their subtrees.
const KILLED_TAGS: &str = "script, style, link, noscript, iframe";

/// Destructive in-place document cleanup.
pub trait Sanitizer: Send + Sync {
    /// Strip unwanted nodes and attributes from `dom`.
    fn sanitize(&self, dom: &Document);
}

/// Removes scripts, styles, `<link>` elements, comments, processing
/// instructions, `noscript`/`iframe`, event-handler and inline style
/// attributes, and `javascript:` links.
#[derive(Debug, Default, Clone, Copy)]
pub struct DefaultSanitizer;

impl Sanitizer for DefaultSanitizer {
    fn sanitize(&self, dom: &Document) {
        let killed = dom.select(KILLED_TAGS);
        let killed_count = killed.length();
        killed.remove();

        let comments: Vec<NodeRef> = dom
            .root()
            .descendants()
            .into_iter()
            .filter(is_comment_like)
            .collect();
        for comment in &comments {
            comment.remove_from_parent();
        }

        for node in descendant_elements(&dom.root()) {
            strip_active_attributes(&node);
        }

        tracing::trace!(killed = killed_count, comments = comments.len(), "Sanitized document");
    }
}

fn strip_active_attributes(node: &NodeRef) {
    let names: Vec<String> = node
        .attrs()
        .iter()
        .map(|a| a.name.local.to_string())
        .filter(|name| {
            let lower = name.to_ascii_lowercase();
            lower.starts_with("on") || lower == "style"
        })
        .collect();
    for name in &names {
        node.remove_attr(name);
    }

    let is_script_link = node
        .attr("href")
        .is_some_and(|href| href.trim_start().to_ascii_lowercase().starts_with("javascript:"));
    if is_script_link {
        node.remove_attr("href");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sanitized(html: &str) -> Document {
        let doc = Document::from(html);
        DefaultSanitizer.sanitize(&doc);
        doc
    }

    #[test]
    fn test_removes_scripts_and_styles() {
        let doc = sanitized(
            "<html><head><style>p{}</style><link rel='stylesheet' href='a.css'></head>\
             <body><script>alert(1)</script><p>kept</p></body></html>",
        );
        assert!(doc.select("script, style, link").is_empty());
        assert_eq!(doc.select("p").text().to_string(), "kept");
    }

    #[test]
    fn test_kill_list() {
        let doc = sanitized(
            "<body><noscript><p>enable js</p></noscript><iframe src='x'></iframe><p>kept</p></body>",
        );
        assert!(doc.select("noscript, iframe").is_empty());
        assert_eq!(doc.select("p").length(), 1);
    }

    #[test]
    fn test_removes_comments() {
        let doc = sanitized("<body><!-- hidden --><p>text<!-- inner --></p></body>");
        assert!(!doc.html().contains("hidden"));
        assert!(!doc.html().contains("inner"));
        assert_eq!(doc.select("p").text().to_string(), "text");
    }

    #[test]
    fn test_strips_handlers_and_script_links() {
        let doc = sanitized(
            "<body><a href='javascript:void(0)' onclick='x()'>a</a>\
             <div style='color:red' class='keep' onMouseOver='y()'>b</div></body>",
        );
        let a = doc.select("a");
        assert!(a.attr("href").is_none());
        assert!(a.attr("onclick").is_none());

        let div = doc.select("div");
        assert!(div.attr("style").is_none());
        assert!(div.attr("onmouseover").is_none());
        assert_eq!(div.attr("class").map(|c| c.to_string()), Some("keep".to_string()));
    }

    #[test]
    fn test_leaves_structure_alone() {
        let doc = sanitized("<body><div><form><input name='q'></form><table><tr><td>x</td></tr></table></div></body>");
        assert_eq!(doc.select("form").length(), 1);
        assert_eq!(doc.select("input").length(), 1);
        assert_eq!(doc.select("td").length(), 1);
    }
}
