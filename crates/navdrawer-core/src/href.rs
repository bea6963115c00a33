#![forbid(unsafe_code)]

//! Link destination resolution and classification.
//!
//! An activated link's `href` is resolved against the current document URL
//! and classified as one of:
//!
//! - [`LinkKind::Fragment`]: the destination is purely an in-page anchor
//!   (`#pricing`).
//! - [`LinkKind::SameDocumentFragment`]: the destination resolves to the
//!   current document plus a fragment (`index.html#pricing`, `/#pricing`).
//!   Paths compare after removing dot segments, trailing slashes and
//!   default-document names.
//! - [`LinkKind::CrossDocument`]: anything else on a web scheme.
//!
//! Destinations that are never intercepted yield `None`: an empty href, a
//! bare `#`, and non-web schemes such as `mailto:` or `javascript:`.
//!
//! Only the subset of RFC 3986 reference resolution that hierarchical web
//! URLs need is implemented.

/// Document names treated as the directory index.
pub const DEFAULT_DOCUMENTS: &[&str] = &[
    "index.html",
    "index.htm",
    "default.html",
    "default.htm",
];

/// Classification of a link destination.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LinkKind {
    /// Purely an in-page anchor.
    Fragment,
    /// Resolves to the current document with a fragment.
    SameDocumentFragment,
    /// Resolves to another document.
    CrossDocument,
}

/// A classified link destination.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LinkTarget {
    /// Destination kind.
    pub kind: LinkKind,
    /// Fragment identifier without `#` (fragment kinds only).
    pub fragment: Option<String>,
    /// Resolved absolute URL (cross-document only).
    pub url: Option<String>,
}

impl LinkTarget {
    /// Whether handling this target scrolls in place.
    #[must_use]
    pub const fn is_in_page(&self) -> bool {
        matches!(
            self.kind,
            LinkKind::Fragment | LinkKind::SameDocumentFragment
        )
    }
}

/// Classify `href` relative to the absolute `current` document URL.
#[must_use]
pub fn classify(href: &str, current: &str) -> Option<LinkTarget> {
    let href = href.trim();
    if href.is_empty() {
        return None;
    }

    if let Some(fragment) = href.strip_prefix('#') {
        if fragment.is_empty() {
            return None;
        }
        return Some(LinkTarget {
            kind: LinkKind::Fragment,
            fragment: Some(decode_fragment(fragment)),
            url: None,
        });
    }

    let base = WebUrl::parse(current)?;
    let resolved = base.join(href)?;

    if resolved.same_document(&base) {
        // `index.html` without a fragment reloads the page: a navigation.
        if let Some(fragment) = resolved.fragment.as_deref().filter(|f| !f.is_empty()) {
            return Some(LinkTarget {
                kind: LinkKind::SameDocumentFragment,
                fragment: Some(decode_fragment(fragment)),
                url: None,
            });
        }
    }

    Some(LinkTarget {
        kind: LinkKind::CrossDocument,
        fragment: None,
        url: Some(resolved.to_string()),
    })
}

/// A parsed hierarchical URL on a web scheme.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WebUrl {
    /// Lowercase scheme (`http`, `https` or `file`).
    pub scheme: String,
    /// Authority (host and optional port); empty for `file:` URLs.
    pub authority: String,
    /// Absolute path, always starting with `/`.
    pub path: String,
    /// Query string without `?`.
    pub query: Option<String>,
    /// Fragment without `#`.
    pub fragment: Option<String>,
}

impl WebUrl {
    /// Parse an absolute URL. Returns `None` for non-web schemes.
    #[must_use]
    pub fn parse(input: &str) -> Option<Self> {
        let (scheme, rest) = split_scheme(input)?;
        let scheme = scheme.to_ascii_lowercase();
        if !is_web_scheme(&scheme) {
            return None;
        }
        let rest = rest.strip_prefix("//")?;
        let authority_end = rest.find(['/', '?', '#']).unwrap_or(rest.len());
        let authority = rest[..authority_end].to_ascii_lowercase();
        let (path, query, fragment) = split_reference(&rest[authority_end..]);
        let path = if path.is_empty() {
            "/".to_string()
        } else {
            remove_dot_segments(path)
        };
        Some(Self {
            scheme,
            authority,
            path,
            query: query.map(str::to_string),
            fragment: fragment.map(str::to_string),
        })
    }

    /// Resolve `reference` against this URL.
    #[must_use]
    pub fn join(&self, reference: &str) -> Option<Self> {
        if let Some((scheme, _)) = split_scheme(reference) {
            if !is_web_scheme(&scheme.to_ascii_lowercase()) {
                return None;
            }
            return Self::parse(reference);
        }
        if let Some(rest) = reference.strip_prefix("//") {
            return Self::parse(&format!("{}://{rest}", self.scheme));
        }

        let (path, query, fragment) = split_reference(reference);
        let (path, query) = if path.is_empty() {
            let query = query.map(str::to_string).or_else(|| self.query.clone());
            (self.path.clone(), query)
        } else if path.starts_with('/') {
            (remove_dot_segments(path), query.map(str::to_string))
        } else {
            let dir_end = self.path.rfind('/').map_or(0, |i| i + 1);
            let merged = format!("{}{path}", &self.path[..dir_end]);
            (remove_dot_segments(&merged), query.map(str::to_string))
        };

        Some(Self {
            scheme: self.scheme.clone(),
            authority: self.authority.clone(),
            path,
            query,
            fragment: fragment.map(str::to_string),
        })
    }

    /// Path with trailing slashes and a default-document name removed.
    #[must_use]
    pub fn normalized_path(&self) -> &str {
        let mut path = self.path.as_str();
        if let Some(slash) = path.rfind('/') {
            let last = &path[slash + 1..];
            if DEFAULT_DOCUMENTS
                .iter()
                .any(|doc| last.eq_ignore_ascii_case(doc))
            {
                path = &path[..=slash];
            }
        }
        path.trim_end_matches('/')
    }

    /// Same scheme, authority, normalized path and query.
    #[must_use]
    pub fn same_document(&self, other: &Self) -> bool {
        self.scheme == other.scheme
            && self.authority == other.authority
            && self.normalized_path() == other.normalized_path()
            && self.query.as_deref().unwrap_or("") == other.query.as_deref().unwrap_or("")
    }
}

impl std::fmt::Display for WebUrl {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}://{}{}", self.scheme, self.authority, self.path)?;
        if let Some(query) = &self.query {
            write!(f, "?{query}")?;
        }
        if let Some(fragment) = &self.fragment {
            write!(f, "#{fragment}")?;
        }
        Ok(())
    }
}

fn is_web_scheme(scheme: &str) -> bool {
    matches!(scheme, "http" | "https" | "file")
}

/// Split `scheme:rest` when `input` starts with a syntactically valid scheme.
fn split_scheme(input: &str) -> Option<(&str, &str)> {
    let colon = input.find(':')?;
    let scheme = &input[..colon];
    let mut chars = scheme.chars();
    let first = chars.next()?;
    if !first.is_ascii_alphabetic() {
        return None;
    }
    if !chars.all(|c| c.is_ascii_alphanumeric() || matches!(c, '+' | '-' | '.')) {
        return None;
    }
    Some((scheme, &input[colon + 1..]))
}

/// Percent-decode a fragment identifier as UTF-8.
///
/// Browsers report `location.href` with non-ASCII and space characters
/// escaped (`#caf%C3%A9`), while element ids hold the decoded text. Returns
/// `raw` unchanged when an escape is malformed or the bytes are not UTF-8.
#[must_use]
pub fn decode_fragment(raw: &str) -> String {
    if !raw.contains('%') {
        return raw.to_string();
    }
    let bytes = raw.as_bytes();
    let mut out = Vec::with_capacity(bytes.len());
    let mut i = 0;
    while i < bytes.len() {
        if bytes[i] == b'%' {
            let hex = bytes.get(i + 1..i + 3).and_then(|pair| {
                let hi = (pair[0] as char).to_digit(16)?;
                let lo = (pair[1] as char).to_digit(16)?;
                u8::try_from(hi * 16 + lo).ok()
            });
            let Some(byte) = hex else {
                return raw.to_string();
            };
            out.push(byte);
            i += 3;
        } else {
            out.push(bytes[i]);
            i += 1;
        }
    }
    String::from_utf8(out).unwrap_or_else(|_| raw.to_string())
}

/// Split a reference into `(path, query, fragment)`.
fn split_reference(input: &str) -> (&str, Option<&str>, Option<&str>) {
    let (before_fragment, fragment) = match input.split_once('#') {
        Some((head, frag)) => (head, Some(frag)),
        None => (input, None),
    };
    let (path, query) = match before_fragment.split_once('?') {
        Some((path, query)) => (path, Some(query)),
        None => (before_fragment, None),
    };
    (path, query, fragment)
}

/// RFC 3986 section 5.2.4, for absolute paths.
fn remove_dot_segments(path: &str) -> String {
    let mut output: Vec<&str> = Vec::new();
    let trailing_dir = path.ends_with('/') || path.ends_with("/.") || path.ends_with("/..");
    for segment in path.split('/') {
        match segment {
            "" | "." => {}
            ".." => {
                output.pop();
            }
            seg => output.push(seg),
        }
    }
    let mut result = String::with_capacity(path.len() + 1);
    for seg in &output {
        result.push('/');
        result.push_str(seg);
    }
    if trailing_dir || result.is_empty() {
        result.push('/');
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    const HOME: &str = "https://example.com/index.html";
    const SERVICES: &str = "https://example.com/services/";

    #[test]
    fn pure_fragment() {
        let target = classify("#pricing", HOME).unwrap();
        assert_eq!(target.kind, LinkKind::Fragment);
        assert_eq!(target.fragment.as_deref(), Some("pricing"));
        assert!(target.is_in_page());
    }

    #[test]
    fn encoded_fragments_are_decoded() {
        assert_eq!(decode_fragment("caf%C3%A9"), "café");
        assert_eq!(decode_fragment("our%20team"), "our team");
        assert_eq!(decode_fragment("pricing"), "pricing");
        assert_eq!(decode_fragment("100%"), "100%");
        assert_eq!(decode_fragment("bad%zz"), "bad%zz");
        assert_eq!(decode_fragment("%FF%FE"), "%FF%FE");

        let target = classify("#our%20team", HOME).unwrap();
        assert_eq!(target.fragment.as_deref(), Some("our team"));
        let target = classify("index.html#caf%C3%A9", HOME).unwrap();
        assert_eq!(target.kind, LinkKind::SameDocumentFragment);
        assert_eq!(target.fragment.as_deref(), Some("café"));
    }

    #[test]
    fn bare_hash_and_empty_are_not_links() {
        assert_eq!(classify("#", HOME), None);
        assert_eq!(classify("", HOME), None);
        assert_eq!(classify("   ", HOME), None);
    }

    #[test]
    fn non_web_schemes_are_not_intercepted() {
        assert_eq!(classify("mailto:hello@example.com", HOME), None);
        assert_eq!(classify("tel:+15551234", HOME), None);
        assert_eq!(classify("javascript:void(0)", HOME), None);
    }

    #[test]
    fn default_document_with_fragment_is_same_document() {
        let target = classify("index.html#services", HOME).unwrap();
        assert_eq!(target.kind, LinkKind::SameDocumentFragment);
        assert_eq!(target.fragment.as_deref(), Some("services"));

        let root = classify("/#services", HOME).unwrap();
        assert_eq!(root.kind, LinkKind::SameDocumentFragment);

        let absolute = classify("https://EXAMPLE.com/#contact", HOME).unwrap();
        assert_eq!(absolute.kind, LinkKind::SameDocumentFragment);
        assert_eq!(absolute.fragment.as_deref(), Some("contact"));
    }

    #[test]
    fn trailing_slash_is_normalized() {
        let target = classify("/services#faq", SERVICES).unwrap();
        assert_eq!(target.kind, LinkKind::SameDocumentFragment);
        let target = classify("index.htm#faq", SERVICES).unwrap();
        assert_eq!(target.kind, LinkKind::SameDocumentFragment);
    }

    #[test]
    fn relative_page_is_cross_document() {
        let target = classify("about.html", HOME).unwrap();
        assert_eq!(target.kind, LinkKind::CrossDocument);
        assert_eq!(target.url.as_deref(), Some("https://example.com/about.html"));
        assert!(!target.is_in_page());
    }

    #[test]
    fn same_document_without_fragment_is_navigation() {
        let target = classify("index.html", HOME).unwrap();
        assert_eq!(target.kind, LinkKind::CrossDocument);
    }

    #[test]
    fn other_page_with_fragment_is_cross_document() {
        let target = classify("about.html#team", HOME).unwrap();
        assert_eq!(target.kind, LinkKind::CrossDocument);
        assert_eq!(
            target.url.as_deref(),
            Some("https://example.com/about.html#team")
        );
    }

    #[test]
    fn different_query_is_cross_document() {
        let target = classify("?lang=fr#top", HOME).unwrap();
        assert_eq!(target.kind, LinkKind::CrossDocument);
    }

    #[test]
    fn dot_segments_resolve() {
        let base = WebUrl::parse("https://example.com/a/b/c.html").unwrap();
        assert_eq!(
            base.join("../d.html").unwrap().to_string(),
            "https://example.com/a/d.html"
        );
        assert_eq!(
            base.join("./").unwrap().to_string(),
            "https://example.com/a/b/"
        );
        assert_eq!(
            base.join("//cdn.example.com/x").unwrap().to_string(),
            "https://cdn.example.com/x"
        );
    }

    #[test]
    fn parse_defaults_root_path() {
        let url = WebUrl::parse("HTTPS://Example.com").unwrap();
        assert_eq!(url.scheme, "https");
        assert_eq!(url.authority, "example.com");
        assert_eq!(url.path, "/");
        assert_eq!(url.normalized_path(), "");
    }

    #[test]
    fn file_urls_resolve() {
        let target = classify("about.html", "file:///site/index.html").unwrap();
        assert_eq!(target.url.as_deref(), Some("file:///site/about.html"));
        let same = classify("index.html#x", "file:///site/").unwrap();
        assert_eq!(same.kind, LinkKind::SameDocumentFragment);
    }

    fn percent_encode_all(text: &str) -> String {
        text.bytes().map(|b| format!("%{b:02X}")).collect()
    }

    proptest! {
        #[test]
        fn fully_encoded_fragment_decodes_to_original(id in "\\PC{1,24}") {
            let encoded = percent_encode_all(&id);
            prop_assert_eq!(decode_fragment(&encoded), id.clone());

            let target = classify(&format!("#{encoded}"), HOME).unwrap();
            prop_assert_eq!(target.kind, LinkKind::Fragment);
            prop_assert_eq!(target.fragment, Some(id));
        }

        #[test]
        fn decoding_never_panics_and_plain_ids_pass_through(raw in "[a-zA-Z0-9_%-]{0,32}") {
            let decoded = decode_fragment(&raw);
            if !raw.contains('%') {
                prop_assert_eq!(decoded, raw);
            }
        }
    }
}
