//! Annotated text rendering.
//!
//! Flattens a subtree into paragraphs of text runs. Each run carries the
//! set of semantic tags (emphasis, links, code, lists, headings...) that
//! enclose it, so callers get the article text without losing inline
//! meaning.

use crate::dom::{shrink_text, tag_name, NodeRef};
use crate::result::{Paragraph, TextRun};

/// Tags recorded in run annotations.
const SEMANTIC_TAGS: &[&str] = &[
    "a", "abbr", "acronym", "b", "big", "blink", "blockquote", "cite", "code", "dd", "del",
    "dfn", "dir", "dl", "dt", "em", "h", "h1", "h2", "h3", "h4", "h5", "h6", "i", "ins", "kbd",
    "li", "marquee", "menu", "ol", "pre", "q", "s", "samp", "strike", "strong", "sub", "sup",
    "tt", "u", "ul", "var",
];

/// Tags whose end closes the current paragraph.
const PARAGRAPH_TAGS: &[&str] = &["p", "ol", "ul", "pre"];

type RawRun = (String, Option<Vec<String>>);

enum Step<'a> {
    Enter(NodeRef<'a>),
    Leave(String),
}

#[derive(Default)]
struct Collector {
    content: Vec<Paragraph>,
    paragraph: Vec<RawRun>,
    path: Vec<String>,
}

impl Collector {
    fn start_element(&mut self, name: &str) {
        if SEMANTIC_TAGS.contains(&name) {
            self.path.push(name.to_string());
        }
    }

    fn end_element(&mut self, name: &str) {
        if PARAGRAPH_TAGS.contains(&name) && !self.paragraph.is_empty() {
            self.flush();
        }
        if SEMANTIC_TAGS.contains(&name) {
            self.path.pop();
        }
    }

    fn characters(&mut self, text: &str) {
        if text.trim().is_empty() {
            return;
        }

        let annotation = if self.path.is_empty() {
            None
        } else {
            let mut tags = self.path.clone();
            tags.sort_unstable();
            tags.dedup();
            Some(tags)
        };
        self.paragraph.push((text.to_string(), annotation));
    }

    fn flush(&mut self) {
        let runs = std::mem::take(&mut self.paragraph);
        self.content.push(merge_runs(runs));
    }

    fn finish(mut self) -> Vec<Paragraph> {
        if !self.paragraph.is_empty() {
            self.flush();
        }
        self.content
    }
}

/// Merge adjacent runs with equal annotations and shrink their whitespace.
///
/// Runs inside list items are kept apart so each item stays its own run.
fn merge_runs(runs: Vec<RawRun>) -> Paragraph {
    let mut merged: Paragraph = Vec::new();
    let mut pending: Option<RawRun> = None;

    for (text, annotation) in runs {
        let in_list_item = annotation
            .as_ref()
            .is_some_and(|tags| tags.iter().any(|t| t == "li"));

        match pending.as_mut() {
            Some((buffer, current)) if *current == annotation && !in_list_item => {
                buffer.push_str(&text);
            }
            _ => {
                if let Some((buffer, current)) = pending.take() {
                    merged.push(TextRun { text: shrink_text(&buffer), annotation: current });
                }
                pending = Some((text, annotation));
            }
        }
    }

    if let Some((buffer, annotation)) = pending {
        merged.push(TextRun { text: shrink_text(&buffer), annotation });
    }
    merged
}

/// Render `node` and its descendants as annotated paragraphs.
///
/// Paragraphs close at the end of `p`, `ol`, `ul` and `pre` elements and at
/// the end of the subtree. Whitespace-only text is ignored.
#[must_use]
pub fn annotate(node: &NodeRef) -> Vec<Paragraph> {
    let mut collector = Collector::default();
    let mut stack = vec![Step::Enter(*node)];

    while let Some(step) = stack.pop() {
        match step {
            Step::Leave(name) => collector.end_element(&name),
            Step::Enter(current) => {
                if current.is_text() {
                    collector.characters(&current.text());
                    continue;
                }
                let Some(name) = tag_name(&current) else {
                    continue;
                };

                collector.start_element(&name);
                stack.push(Step::Leave(name));
                for child in current.children().into_iter().rev() {
                    stack.push(Step::Enter(child));
                }
            }
        }
    }

    collector.finish()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dom::Document;

    fn annotate_html(html: &str, selector: &str) -> Vec<Paragraph> {
        let doc = Document::from(html);
        let node = doc.select(selector).nodes()[0];
        annotate(&node)
    }

    #[test]
    fn test_simple_document() {
        let text = annotate_html("<p>This is\n\tsimple\ttext.</p>", "p");
        assert_eq!(text, vec![vec![TextRun::plain("This is\nsimple text.")]]);
    }

    #[test]
    fn test_empty_paragraph() {
        let text = annotate_html("<div><p>Paragraph <p>\t  \n</div>", "div");
        assert_eq!(text, vec![vec![TextRun::plain("Paragraph")]]);
    }

    #[test]
    fn test_multiple_paragraphs() {
        let text = annotate_html("<div><p> 1 first<p> 2\tsecond <p>3\nthird   </div>", "div");
        assert_eq!(
            text,
            vec![
                vec![TextRun::plain("1 first")],
                vec![TextRun::plain("2 second")],
                vec![TextRun::plain("3\nthird")],
            ]
        );
    }

    #[test]
    fn test_single_annotation() {
        let text = annotate_html("<div><p> text <em>emphasis</em> <p> last</div>", "div");
        assert_eq!(
            text,
            vec![
                vec![TextRun::plain("text"), TextRun::annotated("emphasis", &["em"])],
                vec![TextRun::plain("last")],
            ]
        );
    }

    #[test]
    fn test_recursive_annotation() {
        let text = annotate_html("<div><p> text <em><i><em>emphasis</em></i></em> <p> last</div>", "div");
        assert_eq!(
            text,
            vec![
                vec![TextRun::plain("text"), TextRun::annotated("emphasis", &["em", "i"])],
                vec![TextRun::plain("last")],
            ]
        );
    }

    #[test]
    fn test_annotations_without_explicit_paragraph() {
        let text = annotate_html("<div>text <strong>emphasis</strong>\t<b>hmm</b> </div>", "div");
        assert_eq!(
            text,
            vec![vec![
                TextRun::plain("text"),
                TextRun::annotated("emphasis", &["strong"]),
                TextRun::annotated("hmm", &["b"]),
            ]]
        );
    }

    #[test]
    fn test_merge_chunked_runs() {
        let b_del = Some(vec!["b".to_string(), "del".to_string()]);
        let runs = vec![
            (" 1".to_string(), b_del.clone()),
            (" 2".to_string(), b_del.clone()),
            (" 3".to_string(), None),
            (" 4".to_string(), None),
            (" 5".to_string(), None),
            (" 6".to_string(), Some(vec!["em".to_string()])),
        ];
        assert_eq!(
            merge_runs(runs),
            vec![
                TextRun { text: "1 2".to_string(), annotation: b_del },
                TextRun::plain("3 4 5"),
                TextRun::annotated("6", &["em"]),
            ]
        );
    }

    #[test]
    fn test_list_items_stay_separate() {
        let text = annotate_html("<div><ol><li>First item.</li><li>Second item.</li></ol><p>After</p></div>", "div");
        assert_eq!(
            text,
            vec![
                vec![
                    TextRun::annotated("First item.", &["li", "ol"]),
                    TextRun::annotated("Second item.", &["li", "ol"]),
                ],
                vec![TextRun::plain("After")],
            ]
        );
    }

    #[test]
    fn test_pre_closes_paragraph() {
        let text = annotate_html("<div>intro<pre>let x = 1;\nlet y = 2;</pre>outro</div>", "div");
        assert_eq!(
            text,
            vec![
                vec![TextRun::plain("intro"), TextRun::annotated("let x = 1;\nlet y = 2;", &["pre"])],
                vec![TextRun::plain("outro")],
            ]
        );
    }

    #[test]
    fn test_heading_in_paragraph_stream() {
        let text = annotate_html(
            "<body><h1>Title here</h1><p>First paragraph.</p><p>Second\n paragraph.</p></body>",
            "body",
        );
        assert_eq!(
            text,
            vec![
                vec![TextRun::annotated("Title here", &["h1"]), TextRun::plain("First paragraph.")],
                vec![TextRun::plain("Second\nparagraph.")],
            ]
        );
    }
}
