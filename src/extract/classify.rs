// src/extract/classify.rs
// =============================================================================
// Classification of href/src values.
//
// For every start tag (or self-closing tag) we look at two attributes:
//
//   <a href="...">      -> hyperlink target
//   <img src="...">     -> embedded resource
//
// and each non-empty value that isn't exactly "#" goes into one bucket:
//
//   urls:  starts with "http://" or "https://", or parses as a URL whose
//          scheme is http/https ("HTTPS://Example.com" lands here, in its
//          normalised form)
//   paths: everything else ("/about", "img/logo.png", "//cdn.x.com/a.js",
//          "mailto:...", "javascript:...", "?page=2")
//
// Order is discovery order and duplicates are kept.
// =============================================================================

use serde::Serialize;
use url::Url;

use super::tokenizer::TagToken;

/// The two output buckets
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Extraction {
    pub urls: Vec<String>,
    pub paths: Vec<String>,
}

/// Where a single attribute value belongs
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Link {
    Url(String),
    Path(String),
}

/// The link-carrying attributes of one tag, already trimmed and filtered
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TagLinks {
    pub href: Option<String>,
    pub src: Option<String>,
}

impl Extraction {
    pub fn is_empty(&self) -> bool {
        self.urls.is_empty() && self.paths.is_empty()
    }

    pub fn push(&mut self, link: Link) {
        match link {
            Link::Url(url) => self.urls.push(url),
            Link::Path(path) => self.paths.push(path),
        }
    }

    /// Records the href, then the src, of one tag
    pub fn record_tag(&mut self, tag: &TagToken) {
        let links = tag_links(tag.attributes());
        for value in [links.href, links.src].into_iter().flatten() {
            self.push(classify(&value));
        }
    }

    pub fn record_tags<I>(&mut self, tags: I)
    where
        I: IntoIterator<Item = TagToken>,
    {
        for tag in tags {
            self.record_tag(&tag);
        }
    }
}

// Picks href and src out of one tag's attribute list
//
// Values are trimmed. If a name shows up more than once, the last one in
// the list wins (the html5ever tokenizer already drops repeated attribute
// names, so in practice the first one written in the markup survives).
//
// Empty values and a bare "#" are dropped, each attribute on its own:
// <a href="#" src="/x"> still yields src "/x".
pub fn tag_links<'a, I>(attributes: I) -> TagLinks
where
    I: IntoIterator<Item = (&'a str, &'a str)>,
{
    let mut href = None;
    let mut src = None;

    for (name, value) in attributes {
        match name {
            "href" => href = Some(value.trim()),
            "src" => src = Some(value.trim()),
            _ => {}
        }
    }

    TagLinks {
        href: href.filter(|v| is_link_value(v)).map(String::from),
        src: src.filter(|v| is_link_value(v)).map(String::from),
    }
}

fn is_link_value(value: &str) -> bool {
    !value.is_empty() && value != "#"
}

// Decides which bucket a (trimmed) value goes into
//
// The literal prefix check comes first and keeps the value untouched. The
// URL parse only matters for values the prefix check misses, which in
// practice means an upper- or mixed-case scheme; relative references
// ("/a", "//host/a") never parse without a base and stay paths.
pub fn classify(value: &str) -> Link {
    if value.starts_with("http://") || value.starts_with("https://") {
        return Link::Url(value.to_string());
    }

    match Url::parse(value) {
        Ok(url) if matches!(url.scheme(), "http" | "https") => Link::Url(url.to_string()),
        _ => Link::Path(value.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn links(attrs: &[(&str, &str)]) -> TagLinks {
        tag_links(attrs.iter().copied())
    }

    #[test]
    fn test_classify_absolute() {
        assert_eq!(
            classify("https://example.com/x"),
            Link::Url("https://example.com/x".to_string())
        );
        // Untouched, no trailing slash added
        assert_eq!(
            classify("http://example.com"),
            Link::Url("http://example.com".to_string())
        );
    }

    #[test]
    fn test_classify_uppercase_scheme_is_normalised() {
        assert_eq!(
            classify("HTTPS://Example.COM/Path"),
            Link::Url("https://example.com/Path".to_string())
        );
    }

    #[test]
    fn test_classify_paths() {
        for value in [
            "/about",
            "about.html",
            "../up",
            "?page=2",
            "//cdn.example.com/app.js",
            "mailto:someone@example.com",
            "javascript:void(0)",
            "ftp://files.example.com/a",
            "#section",
        ] {
            assert_eq!(classify(value), Link::Path(value.to_string()), "{}", value);
        }
    }

    #[test]
    fn test_tag_links_trims_and_filters() {
        assert_eq!(
            links(&[("href", "  /about \n"), ("class", "nav")]),
            TagLinks {
                href: Some("/about".to_string()),
                src: None,
            }
        );
        assert_eq!(links(&[("href", "   ")]), TagLinks::default());
        assert_eq!(links(&[("href", "#")]), TagLinks::default());
    }

    #[test]
    fn test_hash_is_dropped_per_attribute() {
        assert_eq!(
            links(&[("href", "#"), ("src", "/x.png")]),
            TagLinks {
                href: None,
                src: Some("/x.png".to_string()),
            }
        );
        assert_eq!(
            links(&[("href", "/page"), ("src", "#")]),
            TagLinks {
                href: Some("/page".to_string()),
                src: None,
            }
        );
    }

    #[test]
    fn test_last_duplicate_wins_in_attribute_list() {
        assert_eq!(
            links(&[("href", "/one"), ("href", "/two")]).href.as_deref(),
            Some("/two")
        );
    }

    #[test]
    fn test_record_tag_orders_href_before_src() {
        let tag = TagToken {
            name: "x".to_string(),
            attributes: vec![
                ("src".to_string(), "/s".to_string()),
                ("href".to_string(), "https://h.example".to_string()),
            ],
        };
        let mut extraction = Extraction::default();
        extraction.record_tag(&tag);
        assert_eq!(extraction.urls, vec!["https://h.example"]);
        assert_eq!(extraction.paths, vec!["/s"]);
    }
}
