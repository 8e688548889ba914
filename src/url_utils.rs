//! URL Utility Functions
//!
//! Resolution of relative `href`/`src` values against a document base URL.

use url::Url;

use crate::dom::{Document, NodeRef};

/// Schemes and forms that are never rewritten.
const PRESERVED_PREFIXES: &[&str] = &["data:", "javascript:", "mailto:", "tel:", "#"];

/// Check if a string is a valid absolute URL.
///
/// # Returns
/// * The parsed URL when `s` is absolute and carries a host
#[must_use]
pub fn parse_absolute_url(s: &str) -> Option<Url> {
    let s = s.trim();
    if s.is_empty() {
        return None;
    }

    Url::parse(s).ok().filter(|url| url.host().is_some())
}

/// Convert a relative or absolute URL to absolute form.
///
/// # Arguments
/// * `url_str` - The URL to resolve (can be relative or absolute)
/// * `base` - The base URL for resolution
///
/// # Returns
/// * The absolute URL string, or the original if resolution fails
#[must_use]
pub fn create_absolute_url(url_str: &str, base: &Url) -> String {
    let trimmed = url_str.trim();

    if trimmed.is_empty() {
        return url_str.to_string();
    }

    // Preserve special URLs unchanged
    let lower = trimmed.to_ascii_lowercase();
    if PRESERVED_PREFIXES.iter().any(|p| lower.starts_with(p)) {
        return url_str.to_string();
    }

    match base.join(trimmed) {
        Ok(resolved) => resolved.to_string(),
        Err(_) => url_str.to_string(),
    }
}

/// Effective base for a document: the in-document `<base href>` resolved
/// against `base_url`, or `base_url` itself.
///
/// Without a caller base, only an absolute `<base href>` is usable.
#[must_use]
pub fn effective_base(doc: &Document, base_url: Option<&Url>) -> Option<Url> {
    let declared = doc
        .select("base[href]")
        .nodes()
        .first()
        .and_then(|n| n.attr("href"))
        .map(|href| href.trim().to_string());

    match (declared, base_url) {
        (Some(href), Some(base)) => base.join(&href).ok().or_else(|| Some(base.clone())),
        (Some(href), None) => parse_absolute_url(&href),
        (None, Some(base)) => Some(base.clone()),
        (None, None) => None,
    }
}

/// Rewrite every `href`/`src` attribute in `doc` to an absolute URL and drop
/// the `<base>` elements that were folded into the effective base.
///
/// Returns the effective base used, if any. Unparsable values are left as
/// they were.
pub fn make_links_absolute(doc: &Document, base_url: Option<&Url>) -> Option<Url> {
    let base = effective_base(doc, base_url)?;

    for node in doc.select("base").nodes() {
        node.remove_from_parent();
    }

    for attr in ["href", "src"] {
        let nodes: Vec<NodeRef> = doc.select(&format!("[{attr}]")).nodes().to_vec();
        for node in nodes {
            if let Some(value) = node.attr(attr) {
                let absolute = create_absolute_url(&value, &base);
                if absolute.as_str() != &*value {
                    node.set_attr(attr, &absolute);
                }
            }
        }
    }

    tracing::trace!(base = %base, "Absolutized links");
    Some(base)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base() -> Url {
        Url::parse("http://blog.mitechie.com/test.html").expect("valid url")
    }

    #[test]
    fn test_parse_absolute_url() {
        assert!(parse_absolute_url("https://example.com/page").is_some());
        assert!(parse_absolute_url("  http://example.com ").is_some());
        assert!(parse_absolute_url("/relative/path").is_none());
        assert!(parse_absolute_url("").is_none());
        assert!(parse_absolute_url("mailto:test@example.com").is_none());
    }

    #[test]
    fn test_create_absolute_url() {
        let base = base();
        assert_eq!(
            create_absolute_url("/images/a.png", &base),
            "http://blog.mitechie.com/images/a.png"
        );
        assert_eq!(
            create_absolute_url("other.html", &base),
            "http://blog.mitechie.com/other.html"
        );
        assert_eq!(
            create_absolute_url("https://cdn.example.com/x.js", &base),
            "https://cdn.example.com/x.js"
        );
    }

    #[test]
    fn test_special_urls_preserved() {
        let base = base();
        for url in ["data:image/png;base64,AAA", "javascript:void(0)", "mailto:a@b.c", "tel:123", "#top"] {
            assert_eq!(create_absolute_url(url, &base), url);
        }
    }

    #[test]
    fn test_make_links_absolute_with_base_url() {
        let doc = Document::from(
            r#"<html><body><a href="/about">About</a><img src="pic.jpg"></body></html>"#,
        );
        make_links_absolute(&doc, Some(&base()));
        assert_eq!(
            doc.select("a").attr("href").map(|v| v.to_string()),
            Some("http://blog.mitechie.com/about".to_string())
        );
        assert_eq!(
            doc.select("img").attr("src").map(|v| v.to_string()),
            Some("http://blog.mitechie.com/pic.jpg".to_string())
        );
    }

    #[test]
    fn test_base_element_is_resolved_and_removed() {
        let doc = Document::from(
            r#"<html><head><base href="/blog/"></head><body><a href="post">Post</a></body></html>"#,
        );
        let used = make_links_absolute(&doc, Some(&base()));
        assert_eq!(used.map(|u| u.to_string()), Some("http://blog.mitechie.com/blog/".to_string()));
        assert!(doc.select("base").is_empty());
        assert_eq!(
            doc.select("a").attr("href").map(|v| v.to_string()),
            Some("http://blog.mitechie.com/blog/post".to_string())
        );
    }

    #[test]
    fn test_absolute_base_element_without_base_url() {
        let doc = Document::from(
            r#"<html><head><base href="https://example.org/dir/"></head><body><a href="x">x</a></body></html>"#,
        );
        make_links_absolute(&doc, None);
        assert_eq!(
            doc.select("a").attr("href").map(|v| v.to_string()),
            Some("https://example.org/dir/x".to_string())
        );
    }

    #[test]
    fn test_no_base_leaves_links_untouched() {
        let doc = Document::from(r#"<html><body><a href="/x">x</a></body></html>"#);
        assert!(make_links_absolute(&doc, None).is_none());
        assert_eq!(doc.select("a").attr("href").map(|v| v.to_string()), Some("/x".to_string()));
    }
}
