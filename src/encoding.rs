//! Character encoding detection and transcoding.
//!
//! Raw page bytes are decoded by trying, in order: a charset declared in a
//! `<meta>` tag, strict UTF-8, a "mostly UTF-8" check on the visible text,
//! and finally statistical detection through a [`CharsetDetector`].

use encoding_rs::{Encoding, UTF_8, WINDOWS_1251, X_MAC_CYRILLIC};
use regex::bytes::Regex;
use std::sync::LazyLock;

/// Match `<meta charset="...">` tag
#[allow(clippy::expect_used)]
static CHARSET_META_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?i)<meta[^>]+charset\s*=\s*["']?([^"'\s/>;]+)"#).expect("valid regex")
});

/// Match `<meta http-equiv="Content-Type" content="...; charset=...">` tag
#[allow(clippy::expect_used)]
static CONTENT_TYPE_CHARSET_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?i)<meta[^>]+content\s*=\s*["']?[^"'>]*;\s*charset\s*=\s*([^"'\s>;]+)"#)
        .expect("valid regex")
});

/// Tags plus trailing whitespace, stripped to approximate the visible text.
#[allow(clippy::expect_used)]
static TAG_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"</?[^>]*>\s*").expect("valid regex"));

/// Below this many bytes of visible text there is too little signal to guess.
const MIN_GUESS_LENGTH: usize = 10;

/// Statistical charset detection.
///
/// Implementations return their best guess for the encoding of `bytes`, or
/// `None` when they have no confident answer.
pub trait CharsetDetector {
    /// Guess the encoding of `bytes`.
    fn detect(&self, bytes: &[u8]) -> Option<&'static Encoding>;
}

/// [`CharsetDetector`] backed by `chardetng`.
#[derive(Debug, Default, Clone, Copy)]
pub struct ChardetngDetector;

impl CharsetDetector for ChardetngDetector {
    fn detect(&self, bytes: &[u8]) -> Option<&'static Encoding> {
        let mut detector = chardetng::EncodingDetector::new();
        detector.feed(bytes, true);
        Some(detector.guess(None, true))
    }
}

/// Encoding named by a `<meta>` declaration, if the label is known.
///
/// Labels `encoding_rs` does not recognize are ignored so detection can fall
/// through to the next step.
#[must_use]
pub fn declared_encoding(html: &[u8]) -> Option<&'static Encoding> {
    [&*CHARSET_META_RE, &*CONTENT_TYPE_CHARSET_RE]
        .into_iter()
        .filter_map(|re| re.captures(html).and_then(|c| c.get(1)))
        .find_map(|label| Encoding::for_label(label.as_bytes()))
        // A page cannot really declare UTF-16 in ASCII-compatible markup.
        .map(Encoding::output_encoding)
}

/// Detect the character encoding of raw HTML bytes using [`ChardetngDetector`].
#[must_use]
pub fn detect_encoding(html: &[u8]) -> &'static Encoding {
    detect_encoding_with(html, &ChardetngDetector)
}

/// Detect the character encoding of raw HTML bytes.
///
/// Order: `<meta>` declaration, strict UTF-8, visible text that is at least
/// 99% UTF-8, then `detector`. Defaults to UTF-8.
#[must_use]
pub fn detect_encoding_with(html: &[u8], detector: &dyn CharsetDetector) -> &'static Encoding {
    if let Some(encoding) = declared_encoding(html) {
        tracing::debug!(encoding = encoding.name(), "Using declared encoding");
        return encoding;
    }

    if std::str::from_utf8(html).is_ok() {
        return UTF_8;
    }

    guess_encoding(html, detector)
}

fn guess_encoding(html: &[u8], detector: &dyn CharsetDetector) -> &'static Encoding {
    let text = TAG_RE.replace_all(html, &b" "[..]);

    // don't venture to guess
    if text.trim_ascii().is_empty() || text.len() < MIN_GUESS_LENGTH {
        return UTF_8;
    }

    let valid: usize = text.utf8_chunks().map(|chunk| chunk.valid().len()).sum();
    let divergence = text.len() - valid;
    if (divergence as f64) < (text.len() as f64) * 0.01 {
        tracing::debug!(divergence, "Visible text is 99% UTF-8");
        return UTF_8;
    }

    match detector.detect(&text) {
        Some(encoding) if encoding == X_MAC_CYRILLIC => WINDOWS_1251,
        Some(encoding) => {
            tracing::debug!(encoding = encoding.name(), "Detected encoding");
            encoding
        }
        None => UTF_8,
    }
}

/// Decode raw HTML bytes to a UTF-8 string.
///
/// Undecodable sequences are replaced with U+FFFD rather than failing.
///
/// # Examples
///
/// ```
/// use readable_article::encoding::resolve_encoding;
///
/// let html = b"<html><body>Hello, World!</body></html>";
/// assert!(resolve_encoding(html).contains("Hello, World!"));
/// ```
#[must_use]
pub fn resolve_encoding(html: &[u8]) -> String {
    resolve_encoding_with(html, &ChardetngDetector)
}

/// Decode raw HTML bytes with a caller-supplied detector.
#[must_use]
pub fn resolve_encoding_with(html: &[u8], detector: &dyn CharsetDetector) -> String {
    let encoding = detect_encoding_with(html, detector);

    if encoding == UTF_8 {
        return String::from_utf8_lossy(html).into_owned();
    }

    let (decoded, _encoding_used, _had_errors) = encoding.decode(html);
    decoded.into_owned()
}
