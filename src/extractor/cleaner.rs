//! Content cleaning.
//!
//! Final pass over the chosen subtree: blanks inline styles and removes
//! untrusted embeds, noisy headings, empty blocks, and blocks that look like
//! navigation, forms or link lists. Drops are collected first and applied
//! after the walk.

use crate::diagnostics::{describe, Diagnostics, DropReason, Event};
use crate::dom::{
    count_within, descendant_elements, element_children, is_attached, is_connected, normalized_len,
    outer_html, select_within, shrink_text, tag_name, unwrap, NodeRef,
};
use crate::link_density::link_density;
use crate::options::Options;

use super::scoring::class_weight;
use super::tags::{
    CONDITIONAL_TAG_SET, EMBED_TAGS, LINKY_HEADING_TAGS, TRUSTED_VIDEO_HOSTS, WEIGHTED_HEADING_TAGS,
};

/// Elements that count as content even without text.
const MEDIA_SELECTOR: &str = "img, object, embed, video, audio, picture, svg";

/// Whether an `object`/`embed` points at a trusted video host.
#[must_use]
pub fn ok_embedded_video(node: &NodeRef) -> bool {
    let markup = outer_html(node);
    TRUSTED_VIDEO_HOSTS.iter().any(|host| markup.contains(host))
}

/// Whether a block looks like boilerplate rather than article content.
///
/// Only `form`, `table`, `ul`, `div` and `p` are tested. A negative class/id
/// weight always fails; ten or more commas always pass. Otherwise the block
/// fails on any of: more list items than paragraphs outside a list, many
/// inputs, very little text without a few images, dense links, or
/// non-video embeds.
#[must_use]
pub fn clean_conditionally(node: &NodeRef, options: &Options) -> bool {
    let Some(tag) = tag_name(node) else {
        return false;
    };
    if !CONDITIONAL_TAG_SET.contains(tag.as_str()) {
        return false;
    }

    let weight = class_weight(node);
    if weight < 0 {
        tracing::trace!("Dropping conditional node: weight < 0");
        return true;
    }

    let text = node.text();
    let commas = text.matches(',').count();
    if commas >= 10 {
        return false;
    }
    tracing::trace!(commas, "There are few commas so we're processing more.");

    let paragraphs = count_within(node, "p") as f64;
    let images = count_within(node, "img");
    let list_items = count_within(node, "li") as f64 - 100.0;
    let inputs = count_within(node, "input") as f64;
    let embeds = select_within(node, "embed")
        .iter()
        .filter(|e| !ok_embedded_video(e))
        .count();
    let density = link_density(node, options.image_link_credit);
    let content_length = text.chars().count();
    let weight = f64::from(weight);

    let reason = if list_items > paragraphs && tag != "ul" && tag != "ol" {
        Some("li > p and not ul/ol")
    } else if inputs > paragraphs / 3.0 {
        Some("inputs > p/3.0")
    } else if content_length < 25 && (images == 0 || images > 2) {
        Some("len < 25 and 0/>2 images")
    } else if weight < 25.0 && density > 0.2 {
        Some("weight small and link is dense")
    } else if weight >= 25.0 && density > 0.5 {
        Some("weight big but link heavy")
    } else if (embeds == 1 && content_length < 75) || embeds > 1 {
        Some("embed w/o much content or many embed")
    } else {
        None
    };

    if let Some(reason) = reason {
        tracing::trace!(node = %describe(node), reason, "Conditional drop");
    }
    reason.is_some()
}

/// Why `n` should be dropped, if it should.
fn drop_reason(n: &NodeRef, tag: &str, options: &Options) -> Option<DropReason> {
    if EMBED_TAGS.contains(&tag) && !ok_embedded_video(n) {
        return Some(DropReason::UntrustedEmbed);
    }

    if WEIGHTED_HEADING_TAGS.contains(&tag) && class_weight(n) < 0 {
        return Some(DropReason::InsignificantHeading);
    }
    if LINKY_HEADING_TAGS.contains(&tag) && link_density(n, options.image_link_credit) > 0.33 {
        return Some(DropReason::InsignificantHeading);
    }

    if (tag == "div" || tag == "p")
        && shrink_text(&n.text()).chars().count() < 5
        && element_children(n).is_empty()
    {
        return Some(DropReason::Empty);
    }

    if clean_conditionally(n, options) {
        return Some(DropReason::Conditional);
    }

    None
}

/// Whether the subtree still holds text or media.
fn has_content(node: &NodeRef) -> bool {
    normalized_len(&node.text()) > 0 || count_within(node, MEDIA_SELECTOR) > 0
}

/// Clean the subtree rooted at `node` in place.
///
/// Returns `None` when the node is detached, holds no text or media, or
/// has nothing left afterwards. `node` itself is never dropped.
pub fn clean_document<'a>(
    node: &NodeRef<'a>,
    options: &Options,
    diagnostics: &dyn Diagnostics,
) -> Option<NodeRef<'a>> {
    if !is_connected(node) || !has_content(node) {
        return None;
    }

    tracing::debug!(node = %describe(node), "Cleaning document");
    let mut to_drop: Vec<(NodeRef<'a>, DropReason)> = Vec::new();

    for n in std::iter::once(*node).chain(descendant_elements(node)) {
        // clean out any in-line style properties
        if n.has_attr("style") {
            n.set_attr("style", "");
        }

        let Some(tag) = tag_name(&n) else {
            continue;
        };
        if n.id == node.id {
            continue;
        }
        if let Some(reason) = drop_reason(&n, &tag, options) {
            to_drop.push((n, reason));
        }
    }

    for (n, reason) in to_drop {
        if !is_attached(&n) {
            continue;
        }
        tracing::debug!(node = %describe(&n), ?reason, "Dropped node with parent");
        if diagnostics.enabled() {
            diagnostics.record(Event::NodeDropped { node: describe(&n), reason });
        }
        n.remove_from_parent();
    }

    has_content(node).then_some(*node)
}

/// Unwrap every descendant of `root` whose only element child has the same
/// tag. `<div><div>x</div></div>` becomes `<div>x</div>`.
///
/// `root` itself is kept.
pub fn remove_orphans(root: &NodeRef) {
    for node in descendant_elements(root) {
        let children = element_children(&node);
        if children.len() != 1 {
            continue;
        }
        if tag_name(&children[0]) == tag_name(&node) {
            unwrap(&node);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diagnostics::{NoopDiagnostics, RecordingDiagnostics};
    use crate::dom::Document;

    const PROSE: &str =
        "This paragraph is long enough, with commas and clauses, to be counted as real article text.";

    fn node<'a>(doc: &'a Document, selector: &str) -> NodeRef<'a> {
        doc.select(selector).nodes()[0]
    }

    fn cleaned(html: &str) -> Document {
        let doc = Document::from(html);
        let root = node(&doc, "#root");
        clean_document(&root, &Options::default(), &NoopDiagnostics);
        doc
    }

    #[test]
    fn test_ok_embedded_video() {
        let doc = Document::from(
            r#"<embed id="yt" src="https://www.youtube.com/v/abc"><embed id="other" src="https://ads.example.com/x.swf">"#,
        );
        assert!(ok_embedded_video(&node(&doc, "#yt")));
        assert!(!ok_embedded_video(&node(&doc, "#other")));
    }

    #[test]
    fn test_style_is_blanked() {
        let doc = cleaned(&format!(r#"<div id="root" style="color:red"><p style="x">{PROSE}</p></div>"#));
        assert_eq!(doc.select("#root").attr("style").map(|s| s.to_string()), Some(String::new()));
        assert_eq!(doc.select("p").attr("style").map(|s| s.to_string()), Some(String::new()));
    }

    #[test]
    fn test_untrusted_embeds_dropped() {
        let doc = cleaned(&format!(
            r#"<div id="root"><p>{PROSE}</p><object id="ad" data="http://ads.example.com/x.swf"></object>
            <object id="video" data="http://vimeo.com/123"></object></div>"#
        ));
        assert!(doc.select("#ad").is_empty());
        assert_eq!(doc.select("#video").length(), 1);
    }

    #[test]
    fn test_headings_dropped() {
        let doc = cleaned(&format!(
            r#"<div id="root"><h2 class="comment-title">Comments</h2><h3><a href="/x">All links here</a></h3>
            <h2 id="keep">Real heading</h2><p>{PROSE}</p></div>"#
        ));
        assert!(doc.select(".comment-title").is_empty());
        assert!(doc.select("h3").is_empty());
        assert_eq!(doc.select("#keep").length(), 1);
    }

    #[test]
    fn test_empty_blocks_dropped() {
        let doc = cleaned(&format!(
            r#"<div id="root"><p id="empty"> </p><p id="img"><img src="a.png"></p><p>{PROSE}</p></div>"#
        ));
        assert!(doc.select("#empty").is_empty());
        assert_eq!(doc.select("img").length(), 1);
    }

    #[test]
    fn test_conditional_negative_weight() {
        let doc = Document::from(format!(r#"<div class="sidebar" id="x"><p>{PROSE}</p></div>"#));
        assert!(clean_conditionally(&node(&doc, "#x"), &Options::default()));
    }

    #[test]
    fn test_conditional_many_commas_kept() {
        let text = "a, ".repeat(12);
        let doc = Document::from(format!(r#"<div id="x"><ul><li>{text}</li></ul></div>"#));
        assert!(!clean_conditionally(&node(&doc, "#x"), &Options::default()));
    }

    #[test]
    fn test_conditional_short_text_without_images() {
        let doc = Document::from(r#"<p id="x">Short text.</p><p id="y">Short<img src="a"></p>"#);
        assert!(clean_conditionally(&node(&doc, "#x"), &Options::default()));
        assert!(!clean_conditionally(&node(&doc, "#y"), &Options::default()));
    }

    #[test]
    fn test_conditional_link_heavy() {
        let doc = Document::from(
            r#"<div id="x"><a href="/1">First link text here</a> and <a href="/2">second link</a> words</div>"#,
        );
        assert!(clean_conditionally(&node(&doc, "#x"), &Options::default()));
    }

    #[test]
    fn test_conditional_inputs() {
        let doc = Document::from(format!(
            r#"<form id="x"><p>{PROSE}</p><input name="a"><input name="b"></form>"#
        ));
        assert!(clean_conditionally(&node(&doc, "#x"), &Options::default()));
    }

    #[test]
    fn test_conditional_untrusted_embed() {
        let doc = Document::from(format!(
            r#"<div id="x"><p>Some text</p><embed src="http://ads.example.com/a.swf"></div>
            <div id="y"><p>{PROSE}</p><embed src="http://www.youtube.com/v/1"></div>"#
        ));
        assert!(clean_conditionally(&node(&doc, "#x"), &Options::default()));
        assert!(!clean_conditionally(&node(&doc, "#y"), &Options::default()));
    }

    #[test]
    fn test_conditional_ignores_other_tags() {
        let doc = Document::from(r#"<section id="x" class="sidebar">x</section>"#);
        assert!(!clean_conditionally(&node(&doc, "#x"), &Options::default()));
    }

    #[test]
    fn test_clean_document_text_only() {
        let doc = Document::from(format!(r#"<div id="root">{PROSE}</div>"#));
        let root = node(&doc, "#root");
        let cleaned = clean_document(&root, &Options::default(), &NoopDiagnostics);
        assert_eq!(cleaned.map(|n| n.id), Some(root.id));
        assert!(root.text().contains("real article text"));

        let doc = Document::from(r#"<div id="root">   </div>"#);
        assert!(clean_document(&node(&doc, "#root"), &Options::default(), &NoopDiagnostics).is_none());
    }

    #[test]
    fn test_clean_document_detached() {
        let doc = Document::from(format!(r#"<div id="root"><p>{PROSE}</p></div>"#));
        let root = node(&doc, "#root");
        root.remove_from_parent();
        assert!(clean_document(&root, &Options::default(), &NoopDiagnostics).is_none());
    }

    #[test]
    fn test_clean_document_left_empty() {
        let doc = Document::from(r#"<div id="root"><p> </p><div></div></div>"#);
        assert!(clean_document(&node(&doc, "#root"), &Options::default(), &NoopDiagnostics).is_none());
    }

    #[test]
    fn test_drops_are_reported() {
        let doc = Document::from(format!(r#"<div id="root"><p>{PROSE}</p><p id="e"></p></div>"#));
        let sink = RecordingDiagnostics::new();
        let kept = clean_document(&node(&doc, "#root"), &Options::default(), &sink);
        assert!(kept.is_some());
        assert!(sink.events().contains(&Event::NodeDropped {
            node: "p #e".to_string(),
            reason: DropReason::Empty,
        }));
    }

    #[test]
    fn test_remove_orphans() {
        let doc = Document::from(r#"<div id="root"><div><div>x</div></div><p><span>y</span></p></div>"#);
        let root = node(&doc, "#root");
        remove_orphans(&root);
        assert_eq!(root.inner_html().to_string(), "<div>x</div><p><span>y</span></p>");
    }

    #[test]
    fn test_remove_orphans_keeps_root() {
        let doc = Document::from(r#"<div id="root"><div>x</div></div>"#);
        let root = node(&doc, "#root");
        remove_orphans(&root);
        assert_eq!(root.html().to_string(), r#"<div id="root"><div>x</div></div>"#);
    }
}
