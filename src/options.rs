//! Configuration options for article extraction.
//!
//! The `Options` struct controls extraction behavior and exposes the tunable
//! heuristic constants. An `Options` value is never mutated during an
//! extraction, so one instance can be shared by concurrent callers.

use url::Url;

use crate::error::{Error, Result};

/// Configuration options for article extraction.
///
/// All fields are public for easy configuration. Use `Default::default()`
/// for standard settings.
///
/// # Example
///
/// ```rust
/// use readable_article::Options;
///
/// let options = Options {
///     return_fragment: false,
///     url: Some("https://example.com/story.html".to_string()),
///     ..Options::default()
/// };
/// assert!(options.validate().is_ok());
/// ```
#[derive(Debug, Clone)]
#[allow(clippy::struct_excessive_bools)]
pub struct Options {
    /// Return only the `<div id="readabilityBody">` fragment instead of a
    /// complete HTML document.
    ///
    /// Default: `true`
    pub return_fragment: bool,

    /// Source URL of the document.
    ///
    /// Relative `href`/`src` attributes are rewritten against this URL.
    ///
    /// Default: `None`
    pub url: Option<String>,

    /// Minimum trimmed text length (characters) for a scorable node to
    /// contribute points to its ancestors.
    ///
    /// Default: `25`
    pub min_text_length: usize,

    /// Characters credited back per descendant `<img>` when computing link
    /// density, so image-only links are not treated as pure link text.
    ///
    /// Default: `50`
    pub image_link_credit: usize,

    /// Treat `<article>` as a scorable tag alongside div, p, td and pre.
    ///
    /// Default: `true`
    pub score_article_tags: bool,

    /// When normalizing leaf blocks, a `<div>` with a `<p>` child is not a
    /// leaf either (only `<div>` children count when false).
    ///
    /// Default: `true`
    pub strict_leaf_blocks: bool,

    /// Collapse wrappers whose only child element has the same tag.
    ///
    /// Default: `true`
    pub remove_orphans: bool,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            return_fragment: true,
            url: None,
            min_text_length: 25,
            image_link_credit: 50,
            score_article_tags: true,
            strict_leaf_blocks: true,
            remove_orphans: true,
        }
    }
}

impl Options {
    /// Check that the configured base URL, if any, is an absolute URL.
    pub fn validate(&self) -> Result<()> {
        match self.url.as_deref() {
            Some(url) => Url::parse(url)
                .map(|_| ())
                .map_err(|e| Error::InvalidUrl(format!("{url}: {e}"))),
            None => Ok(()),
        }
    }

    /// The base URL parsed, or `None` if absent or unparsable.
    #[must_use]
    pub fn base_url(&self) -> Option<Url> {
        self.url.as_deref().and_then(|u| Url::parse(u).ok())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_options() {
        let opts = Options::default();

        assert!(opts.return_fragment);
        assert!(opts.url.is_none());
        assert_eq!(opts.min_text_length, 25);
        assert_eq!(opts.image_link_credit, 50);
        assert!(opts.score_article_tags);
        assert!(opts.strict_leaf_blocks);
        assert!(opts.remove_orphans);
    }

    #[test]
    fn test_validate_accepts_absolute_url() {
        let opts = Options {
            url: Some("http://blog.mitechie.com/test.html".to_string()),
            ..Options::default()
        };
        assert!(opts.validate().is_ok());
        assert_eq!(
            opts.base_url().map(|u| u.host_str().map(str::to_string)),
            Some(Some("blog.mitechie.com".to_string()))
        );
    }

    #[test]
    fn test_validate_rejects_relative_url() {
        let opts = Options {
            url: Some("/just/a/path".to_string()),
            ..Options::default()
        };
        assert!(matches!(opts.validate(), Err(Error::InvalidUrl(_))));
        assert!(opts.base_url().is_none());
    }

    #[test]
    fn test_custom_thresholds() {
        let opts = Options {
            min_text_length: 40,
            image_link_credit: 0,
            score_article_tags: false,
            ..Options::default()
        };

        assert_eq!(opts.min_text_length, 40);
        assert_eq!(opts.image_link_credit, 0);
        assert!(!opts.score_article_tags);
        assert!(opts.return_fragment);
    }
}
