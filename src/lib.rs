//! # readable-article
//!
//! Reader-mode article extraction.
//!
//! Given the HTML of a web page, this library finds the block of markup that
//! holds the main article, strips navigation, advertisements and other
//! boilerplate around and inside it, and returns the result as a small,
//! clean HTML document.
//!
//! ## Quick Start
//!
//! ```rust
//! use readable_article::extract;
//!
//! let html = r#"<html><head><title>My Article</title></head>
//! <body><div id="article"><p>Main content here, long enough to count as a paragraph.</p></div></body></html>"#;
//!
//! let readable = extract(html);
//! assert!(readable.to_html().contains(r#"id="readabilityBody""#));
//! ```
//!
//! ## How it works
//!
//! - **Loading**: bytes are decoded (declared charset, UTF-8, then statistical
//!   detection), runs of `<br>` become paragraph breaks, links are made absolute
//! - **Scoring**: paragraphs award points to their parent and grandparent,
//!   scaled by class/id hints and link density
//! - **Assembly**: the best candidate absorbs related siblings, is cleaned of
//!   residual boilerplate, and is wrapped in `<div id="readabilityBody">`
//!
//! Extraction never fails: when nothing usable is found the result is a
//! `<div id="readabilityBody" class="parsing-error">` placeholder.

mod error;
mod options;
mod patterns;
mod result;

/// DOM helpers over `dom_query`.
pub mod dom;

/// Content extraction stages (scoring, sibling annexation, cleaning, assembly).
pub mod extractor;

/// Input decoding and document loading.
pub mod document;

/// Character encoding detection.
pub mod encoding;

/// URL absolutization.
pub mod url_utils;

/// Link density measurement.
pub mod link_density;

/// Pre-scoring removal of scripts, styles and active attributes.
pub mod sanitizer;

/// Structured extraction events.
pub mod diagnostics;

/// Annotated paragraph rendering of readable content.
pub mod annotated_text;

use std::cell::OnceCell;
use std::fmt;
use std::sync::Arc;

// Public API - re-exports
pub use diagnostics::{Diagnostics, Event, NoopDiagnostics, RecordingDiagnostics, TracingDiagnostics};
pub use document::{Input, OriginalDocument};
pub use error::{Error, Result};
pub use extractor::RankedCandidate;
pub use options::Options;
pub use result::{Paragraph, ReadableDocument, TextRun, PARSING_ERROR_CLASS, READABLE_BODY_ID};
pub use sanitizer::{DefaultSanitizer, Sanitizer};

use extractor::{extract_document, Extraction};

/// A page to extract, with its results computed on first use.
///
/// The pipeline runs once, the first time any result is asked for; title,
/// candidates and readable document all come from that single run.
///
/// # Example
///
/// ```rust
/// use readable_article::{Article, Options};
///
/// let html = "<html><head><title> Hello </title></head><body><p>Too short.</p></body></html>";
/// let article = Article::new(html, Options::default());
///
/// assert_eq!(article.title(), "Hello");
/// assert!(article.candidates().is_empty());
/// ```
pub struct Article {
    input: Input,
    options: Options,
    sanitizer: Box<dyn Sanitizer>,
    diagnostics: Arc<dyn Diagnostics>,
    extraction: OnceCell<Extraction>,
}

impl Article {
    /// Wrap `input` (a `&str`, `String`, `&[u8]` or `Vec<u8>`) for extraction.
    pub fn new(input: impl Into<Input>, options: Options) -> Self {
        Self {
            input: input.into(),
            options,
            sanitizer: Box::new(DefaultSanitizer),
            diagnostics: Arc::new(NoopDiagnostics),
            extraction: OnceCell::new(),
        }
    }

    /// Replace the pre-scoring sanitizer.
    #[must_use]
    pub fn with_sanitizer(mut self, sanitizer: impl Sanitizer + 'static) -> Self {
        self.sanitizer = Box::new(sanitizer);
        self.extraction = OnceCell::new();
        self
    }

    /// Send extraction events to `diagnostics`.
    #[must_use]
    pub fn with_diagnostics(mut self, diagnostics: Arc<dyn Diagnostics>) -> Self {
        self.diagnostics = diagnostics;
        self.extraction = OnceCell::new();
        self
    }

    fn extraction(&self) -> &Extraction {
        self.extraction.get_or_init(|| {
            extract_document(
                &self.input,
                &self.options,
                self.sanitizer.as_ref(),
                self.diagnostics.as_ref(),
            )
        })
    }

    /// Trimmed text of the first `<title>`, or an empty string.
    #[must_use]
    pub fn title(&self) -> &str {
        &self.extraction().title
    }

    /// The readable document.
    #[must_use]
    pub fn readable_dom(&self) -> &ReadableDocument {
        &self.extraction().readable
    }

    /// The readable document serialized to HTML.
    #[must_use]
    pub fn readable(&self) -> String {
        self.readable_dom().to_html()
    }

    /// Annotated paragraphs of the `#readabilityBody` content.
    #[must_use]
    pub fn main_text(&self) -> Vec<Paragraph> {
        self.readable_dom().annotated_text()
    }

    /// Scored candidates, best first.
    #[must_use]
    pub fn candidates(&self) -> &[RankedCandidate] {
        &self.extraction().candidates
    }

    /// The options this article is extracted with.
    #[must_use]
    pub fn options(&self) -> &Options {
        &self.options
    }
}

impl fmt::Debug for Article {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Article")
            .field("options", &self.options)
            .field("extracted", &self.extraction.get().is_some())
            .finish_non_exhaustive()
    }
}

/// Extracts the readable article from an HTML document using default options.
///
/// Never fails: unparseable or contentless input yields the
/// `parsing-error` placeholder.
///
/// # Example
///
/// ```rust
/// use readable_article::extract;
///
/// let readable = extract("");
/// assert!(readable.is_error());
/// ```
#[must_use]
pub fn extract(html: &str) -> ReadableDocument {
    extract_with_options(html, &Options::default())
}

/// Extracts the readable article from an HTML document with custom options.
///
/// # Example
///
/// ```rust
/// use readable_article::{extract_with_options, Options};
///
/// let html = "<html><body><p>Some content, with a comma or two, and enough length.</p></body></html>";
/// let options = Options {
///     return_fragment: false,
///     ..Options::default()
/// };
/// let readable = extract_with_options(html, &options);
/// assert!(readable.to_html().starts_with("<!DOCTYPE html>"));
/// ```
#[must_use]
pub fn extract_with_options(html: &str, options: &Options) -> ReadableDocument {
    run(Input::from(html), options)
}

/// Extracts the readable article from HTML bytes with automatic encoding detection.
///
/// The encoding is taken from a `<meta>` charset declaration, then strict
/// UTF-8, then statistical detection. Undecodable bytes become U+FFFD.
///
/// # Example
///
/// ```rust
/// use readable_article::extract_bytes;
///
/// let html = b"<html><head><meta charset=\"ISO-8859-1\"></head><body><div><p>Caf\xE9 au lait, served hot, with a croissant on the side.</p></div></body></html>";
/// let readable = extract_bytes(html);
/// assert!(readable.text().contains("Café"));
/// ```
#[must_use]
pub fn extract_bytes(html: &[u8]) -> ReadableDocument {
    extract_bytes_with_options(html, &Options::default())
}

/// Extracts the readable article from HTML bytes with custom options.
#[must_use]
pub fn extract_bytes_with_options(html: &[u8], options: &Options) -> ReadableDocument {
    run(Input::from(html), options)
}

fn run(input: Input, options: &Options) -> ReadableDocument {
    extract_document(&input, options, &DefaultSanitizer, &NoopDiagnostics).readable
}
