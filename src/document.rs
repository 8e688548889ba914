//! Document loading.
//!
//! Turns caller input (raw bytes or decoded text) into a parsed tree:
//! encoding resolution, `<br>` run conversion, parsing and link
//! absolutization. The loaded document is the starting point of every
//! extraction and is mutated in place by the later stages.

use std::borrow::Cow;

use url::Url;

use crate::dom::{has_any_tag, has_tag, move_into, parse, Document, NodeRef};
use crate::encoding::resolve_encoding;
use crate::error::{Error, Result};
use crate::patterns::{BREAK_TAG, BREAK_TAGS};
use crate::url_utils::make_links_absolute;

/// Paragraph boundary substituted for collapsible break runs.
const PARAGRAPH_BREAK: &str = "</p><p>";

/// Phrasing elements that may belong to a loose text run.
const INLINE_TAGS: [&str; 22] = [
    "a", "abbr", "b", "bdi", "bdo", "cite", "code", "em", "font", "i", "img", "kbd", "mark", "q",
    "s", "small", "span", "strong", "sub", "sup", "time", "u",
];

/// Caller input: raw bytes of unknown encoding, or already decoded text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Input {
    Bytes(Vec<u8>),
    Text(String),
}

impl From<&str> for Input {
    fn from(text: &str) -> Self {
        Self::Text(text.to_string())
    }
}

impl From<String> for Input {
    fn from(text: String) -> Self {
        Self::Text(text)
    }
}

impl From<&[u8]> for Input {
    fn from(bytes: &[u8]) -> Self {
        Self::Bytes(bytes.to_vec())
    }
}

impl From<Vec<u8>> for Input {
    fn from(bytes: Vec<u8>) -> Self {
        Self::Bytes(bytes)
    }
}

impl Input {
    /// The input as text, decoding bytes through the encoding resolver.
    #[must_use]
    pub fn decode(&self) -> Cow<'_, str> {
        match self {
            Self::Text(text) => Cow::Borrowed(text),
            Self::Bytes(bytes) => Cow::Owned(resolve_encoding(bytes)),
        }
    }
}

/// Replace runs of break tags with a paragraph boundary.
///
/// A run is one or more `<br>`/`<hr>` tags separated only by whitespace.
/// Runs containing an `<hr>` or at least two `<br>` become `</p><p>`; a
/// lone `<br>` is kept.
///
/// Outside a paragraph the stray `</p>` parses as an empty `<p></p>`, so
/// `First<br><br>Second` becomes `First<p></p><p>Second</p>`.
/// [`OriginalDocument::load`] moves such a leading run into the empty
/// paragraph.
///
/// # Example
///
/// ```
/// use readable_article::document::convert_breaks_to_paragraphs;
///
/// assert_eq!(convert_breaks_to_paragraphs("<p>A<br><br>B</p>"), "<p>A</p><p>B</p>");
/// assert_eq!(convert_breaks_to_paragraphs("<p>A<br>B</p>"), "<p>A<br>B</p>");
/// ```
#[must_use]
pub fn convert_breaks_to_paragraphs(html: &str) -> Cow<'_, str> {
    BREAK_TAGS.replace_all(html, |caps: &regex::Captures| {
        let run = &caps[0];
        let mut breaks = 0;
        let mut rules = 0;
        for tag in BREAK_TAG.captures_iter(run) {
            if tag[1].eq_ignore_ascii_case("h") {
                rules += 1;
            } else {
                breaks += 1;
            }
        }

        if rules > 0 || breaks > 1 {
            PARAGRAPH_BREAK.to_string()
        } else {
            run.to_string()
        }
    })
}

/// Fill each empty `<p>` left by a break run with the loose text run in
/// front of it. Returns how many paragraphs were filled.
fn adopt_leading_runs(dom: &Document) -> usize {
    let mut adopted = 0;
    for p in dom.select("p").nodes() {
        if p.first_child().is_some() {
            continue;
        }
        if !p.next_element_sibling().is_some_and(|next| has_tag(&next, "p")) {
            continue;
        }

        let mut run = Vec::new();
        let mut prev = p.prev_sibling();
        while let Some(node) = prev {
            if node.is_element() && !has_any_tag(&node, &INLINE_TAGS) {
                break;
            }
            prev = node.prev_sibling();
            run.push(node);
        }
        if run.iter().all(|n| n.text().trim().is_empty()) {
            continue;
        }

        for node in run.iter().rev() {
            move_into(p, node);
        }
        adopted += 1;
    }
    adopted
}

/// The parsed input document.
pub struct OriginalDocument {
    dom: Document,
    url: Option<Url>,
}

impl OriginalDocument {
    /// Decode, parse and absolutize `input`.
    ///
    /// Fails with [`Error::ParseFailure`] when there is nothing to parse:
    /// empty or blank markup, markup containing NUL bytes, or a tree without
    /// an `<html>` element.
    pub fn load(input: &Input, base_url: Option<&Url>) -> Result<Self> {
        let text = input.decode();

        if text.trim().is_empty() {
            return Err(Error::ParseFailure("document is empty".to_string()));
        }
        if text.contains('\0') {
            return Err(Error::ParseFailure("document contains NUL bytes".to_string()));
        }

        tracing::debug!("Replacing multiple <br/> to <p>");
        let html = convert_breaks_to_paragraphs(&text);
        let dom = parse(&html);

        if dom.select("html").is_empty() {
            return Err(Error::ParseFailure("no <html> element".to_string()));
        }
        adopt_leading_runs(&dom);

        let url = make_links_absolute(&dom, base_url);
        Ok(Self { dom, url })
    }

    /// Text of the first `<title>`, trimmed; empty if there is none.
    #[must_use]
    pub fn title(&self) -> String {
        document_title(&self.dom)
    }

    /// Every `<a>` element in document order.
    #[must_use]
    pub fn links(&self) -> Vec<NodeRef<'_>> {
        self.dom.select("a").nodes().to_vec()
    }

    /// The parsed tree.
    #[must_use]
    pub fn dom(&self) -> &Document {
        &self.dom
    }

    /// Consume the loader and keep only the tree.
    #[must_use]
    pub fn into_dom(self) -> Document {
        self.dom
    }

    /// Base URL links were resolved against, if any.
    #[must_use]
    pub fn url(&self) -> Option<&Url> {
        self.url.as_ref()
    }

    /// Serialized markup of the whole document.
    #[must_use]
    pub fn to_html(&self) -> String {
        self.dom.html().to_string()
    }
}

/// Text of the first `<title>` in `dom`, trimmed.
#[must_use]
pub fn document_title(dom: &Document) -> String {
    dom.select("title")
        .nodes()
        .first()
        .map(|t| t.text().trim().to_string())
        .unwrap_or_default()
}
