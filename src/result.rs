//! Result types for extraction output.
//!
//! This module defines the readable document returned by every extraction
//! and the annotated text records derived from it.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::annotated_text::annotate;
use crate::dom::{Document, NodeId, NodeRef, Selection};

/// Id carried by the content container of every readable document.
pub const READABLE_BODY_ID: &str = "readabilityBody";

/// Class marking the placeholder returned when nothing could be extracted.
pub const PARSING_ERROR_CLASS: &str = "parsing-error";

/// A run of text sharing the same set of enclosing semantic tags.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TextRun {
    /// Whitespace-shrunk text.
    pub text: String,

    /// Sorted, de-duplicated semantic tag names, or `None` for plain text.
    pub annotation: Option<Vec<String>>,
}

impl TextRun {
    /// Plain text run without annotation.
    #[must_use]
    pub fn plain(text: impl Into<String>) -> Self {
        Self { text: text.into(), annotation: None }
    }

    /// Run annotated with the given tags.
    #[must_use]
    pub fn annotated(text: impl Into<String>, tags: &[&str]) -> Self {
        Self {
            text: text.into(),
            annotation: Some(tags.iter().map(|t| (*t).to_string()).collect()),
        }
    }
}

/// One paragraph of annotated text.
pub type Paragraph = Vec<TextRun>;

/// The cleaned article.
///
/// Either the `<div id="readabilityBody">` fragment alone, or that fragment
/// inside a minimal HTML document, depending on
/// [`Options::return_fragment`](crate::Options::return_fragment).
pub struct ReadableDocument {
    document: Document,
    root: NodeId,
    body: NodeId,
    fragment: bool,
}

impl ReadableDocument {
    pub(crate) fn new(document: Document, root: NodeId, body: NodeId, fragment: bool) -> Self {
        Self { document, root, body, fragment }
    }

    /// Outermost output node: the fragment `<div>` or the `<html>` element.
    #[must_use]
    pub fn root(&self) -> NodeRef<'_> {
        NodeRef::new(self.root, &self.document.tree)
    }

    /// The `#readabilityBody` container.
    #[must_use]
    pub fn content(&self) -> NodeRef<'_> {
        NodeRef::new(self.body, &self.document.tree)
    }

    /// Whether this is the fragment form rather than a full document.
    #[must_use]
    pub fn is_fragment(&self) -> bool {
        self.fragment
    }

    /// Whether this is the placeholder produced when extraction failed.
    #[must_use]
    pub fn is_error(&self) -> bool {
        self.content()
            .attr("class")
            .is_some_and(|c| c.split_whitespace().any(|c| c == PARSING_ERROR_CLASS))
    }

    /// Serialized markup; full documents start with `<!DOCTYPE html>`.
    #[must_use]
    pub fn to_html(&self) -> String {
        let html = self.root().html();
        if self.fragment {
            html.to_string()
        } else {
            format!("<!DOCTYPE html>\n{html}")
        }
    }

    /// Text content of the article container.
    #[must_use]
    pub fn text(&self) -> String {
        self.content().text().to_string()
    }

    /// Descendants of the output root matching a CSS selector.
    #[must_use]
    pub fn select(&self, selector: &str) -> Selection<'_> {
        Selection::from(self.root()).select(selector)
    }

    /// The article container rendered as annotated paragraphs.
    #[must_use]
    pub fn annotated_text(&self) -> Vec<Paragraph> {
        annotate(&self.content())
    }
}

impl fmt::Display for ReadableDocument {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_html())
    }
}

impl fmt::Debug for ReadableDocument {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ReadableDocument")
            .field("fragment", &self.fragment)
            .field("error", &self.is_error())
            .field("html", &self.to_html())
            .finish()
    }
}
