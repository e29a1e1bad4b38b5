//! URL to cache path translation
//!
//! Maps a raw request target onto a file under the cache root:
//!
//! - `/static/app.js` -> `<root>/static/app.js`
//! - `/www.example.com/about` -> `<root>/about` (canonical host lives at the root)
//! - `/cdn.example.com/a.png` -> `<root>/cdn.example.com/a.png`
//! - `/cdn.example.com/a.png?w=1` -> `<root>/cdn.example.com/a.png__w=1`
//!
//! A result that names a directory gets the index file appended.

use std::path::{Path, PathBuf};

use hyper::Uri;
use percent_encoding::percent_decode_str;
use thiserror::Error;

use super::domain::match_domain_path;
use super::query::{query_suffix, QuerySuffixPolicy};
use crate::config::CacheConfig;
use crate::logger;

/// Why a raw URL could not be split into path and query
#[derive(Debug, Error)]
pub enum UrlParseError {
    #[error("invalid request target: {0}")]
    InvalidUri(#[from] hyper::http::uri::InvalidUri),
    #[error("malformed percent escape in path")]
    MalformedEscape,
    /// Paths are kept as UTF-8 strings, so a decoded byte sequence such as
    /// `%ff` is refused here. The URL then takes the raw fallback, which keeps
    /// `?query` in the file name instead of producing a `__query` suffix.
    #[error("path is not valid UTF-8 after decoding: {0}")]
    InvalidUtf8(#[from] std::str::Utf8Error),
}

/// Request target split into its decoded path and raw query
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedUrl {
    pub path: String,
    pub query: String,
}

/// Parse a request target (origin-form or absolute-form)
pub fn parse_request_url(raw: &str) -> Result<ParsedUrl, UrlParseError> {
    let uri: Uri = raw.parse()?;
    let raw_path = uri.path();
    if has_malformed_escape(raw_path) {
        return Err(UrlParseError::MalformedEscape);
    }
    let path = percent_decode_str(raw_path).decode_utf8()?.into_owned();

    Ok(ParsedUrl {
        path,
        query: uri.query().unwrap_or_default().to_string(),
    })
}

/// `%` must always introduce two hex digits
fn has_malformed_escape(path: &str) -> bool {
    let bytes = path.as_bytes();
    bytes.iter().enumerate().any(|(i, &b)| {
        b == b'%'
            && !(bytes.get(i + 1).is_some_and(u8::is_ascii_hexdigit)
                && bytes.get(i + 2).is_some_and(u8::is_ascii_hexdigit))
    })
}

/// Join `relative` onto `root` without ever climbing above `root`.
///
/// Empty and `.` segments are dropped; `..` removes the previous segment and
/// is ignored once nothing is left to remove.
pub fn join_clamped(root: &Path, relative: &str) -> PathBuf {
    let mut segments: Vec<&str> = Vec::new();
    for segment in relative.split('/') {
        match segment {
            "" | "." => {}
            ".." => {
                segments.pop();
            }
            s => segments.push(s),
        }
    }

    let mut path = root.to_path_buf();
    path.extend(segments);
    path
}

/// Translates request URLs into cache paths
#[derive(Debug, Clone)]
pub struct PathTranslator {
    root: PathBuf,
    canonical_domain: String,
    domain_suffix: String,
    index_file: String,
    query_policy: QuerySuffixPolicy,
}

impl PathTranslator {
    pub fn new(cache: &CacheConfig) -> Self {
        Self {
            root: PathBuf::from(&cache.root),
            canonical_domain: cache.canonical_domain.clone(),
            domain_suffix: cache.domain_suffix.clone(),
            index_file: cache.index_file.clone(),
            query_policy: QuerySuffixPolicy::new(
                &cache.domain_suffix,
                &cache.canonical_domain,
                &cache.query_suffix_exempt,
            ),
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Cache path of `raw`, relative to the root, before any filesystem lookup
    pub fn translate_relative(&self, raw: &str) -> Result<String, UrlParseError> {
        let parsed = parse_request_url(raw)?;
        let path_file = parsed.path.strip_prefix('/').unwrap_or(&parsed.path);

        let mut path_file = match match_domain_path(path_file, &self.domain_suffix) {
            // Canonical host content sits directly under the root and never
            // carries a query suffix.
            Some(m) if m.domain == self.canonical_domain => return Ok(m.rest.to_string()),
            Some(m) => format!("{}/{}", m.domain, m.rest),
            None => path_file.to_string(),
        };

        if self.query_policy.applies(raw, &parsed.query) {
            path_file.push_str(&query_suffix(&parsed.query));
        }

        Ok(path_file)
    }

    /// Resolve `raw` to a file under the cache root.
    ///
    /// Never fails: an unparseable URL is joined onto the root verbatim.
    pub fn translate(&self, raw: &str) -> PathBuf {
        let relative = match self.translate_relative(raw) {
            Ok(relative) => relative,
            Err(e) => {
                logger::log_warning(&format!("Error parsing URL '{raw}': {e}"));
                return join_clamped(&self.root, raw);
            }
        };

        let mut full_path = join_clamped(&self.root, &relative);
        if full_path.is_dir() {
            full_path.push(&self.index_file);
        }

        logger::log_debug(&format!("[Translate] {raw} -> {}", full_path.display()));
        full_path
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn translator(root: &Path) -> PathTranslator {
        PathTranslator::new(&CacheConfig {
            root: root.to_string_lossy().into_owned(),
            ..CacheConfig::default()
        })
    }

    #[test]
    fn test_parse_request_url() {
        let parsed = parse_request_url("/a%20b/c.png?x=1%7C2").unwrap();
        assert_eq!(parsed.path, "/a b/c.png");
        assert_eq!(parsed.query, "x=1%7C2");

        let parsed = parse_request_url("http://cdn.example.com/x?y").unwrap();
        assert_eq!(parsed.path, "/x");
        assert_eq!(parsed.query, "y");
    }

    #[test]
    fn test_parse_request_url_errors() {
        assert!(matches!(
            parse_request_url("/bad%zzpath"),
            Err(UrlParseError::MalformedEscape)
        ));
        assert!(matches!(
            parse_request_url("/trailing%"),
            Err(UrlParseError::MalformedEscape)
        ));
        assert!(matches!(
            parse_request_url("/%ff%fe"),
            Err(UrlParseError::InvalidUtf8(_))
        ));
        assert!(matches!(
            parse_request_url("/has space"),
            Err(UrlParseError::InvalidUri(_))
        ));
    }

    #[test]
    fn test_join_clamped() {
        let root = Path::new("/srv/cache");
        assert_eq!(join_clamped(root, "a/b.js"), root.join("a").join("b.js"));
        assert_eq!(join_clamped(root, "a//./b.js"), root.join("a").join("b.js"));
        assert_eq!(join_clamped(root, "a/../b.js"), root.join("b.js"));
        assert_eq!(join_clamped(root, "../../etc/passwd"), root.join("etc").join("passwd"));
        assert_eq!(join_clamped(root, ""), root.to_path_buf());
    }

    #[test]
    fn test_plain_paths_join_onto_root() {
        let dir = tempfile::tempdir().unwrap();
        let t = translator(dir.path());
        assert_eq!(t.translate("/static/app.js"), dir.path().join("static/app.js"));
        assert_eq!(t.translate("/favicon.ico"), dir.path().join("favicon.ico"));
        // Query strings on the canonical site are ignored
        assert_eq!(t.translate("/api/list?page=2"), dir.path().join("api/list"));
    }

    #[test]
    fn test_canonical_domain_maps_to_root() {
        let dir = tempfile::tempdir().unwrap();
        let t = translator(dir.path());
        assert_eq!(t.translate("/www.example.com/foo"), t.translate("/foo"));
        assert_eq!(t.translate("/www.example.com/foo?x=1"), dir.path().join("foo"));
    }

    #[test]
    fn test_subdomain_is_namespaced() {
        let dir = tempfile::tempdir().unwrap();
        let t = translator(dir.path());
        assert_eq!(
            t.translate("/cdn.example.com/img.png"),
            dir.path().join("cdn.example.com").join("img.png")
        );
        assert_eq!(
            t.translate("/a.b.example.com/x"),
            dir.path().join("a.b.example.com").join("x")
        );
    }

    #[test]
    fn test_query_suffix_on_cdn_host() {
        let dir = tempfile::tempdir().unwrap();
        let t = translator(dir.path());
        assert_eq!(
            t.translate_relative("/cdn.example.com/a?x=1&y=2").unwrap(),
            "cdn.example.com/a__x=1&y=2"
        );
        assert_eq!(
            t.translate("/cdn.example.com/i.png?x-oss-process=image/resize,w_256%7Cimage/format,webp"),
            dir.path()
                .join("cdn.example.com")
                .join("i.png__x-oss-process=image_resize,w_256|image_format,webp")
        );
    }

    #[test]
    fn test_exempt_host_keeps_plain_name() {
        let dir = tempfile::tempdir().unwrap();
        let t = translator(dir.path());
        assert_eq!(
            t.translate_relative("/panojson-oss.example.com/p.json?t=1").unwrap(),
            "panojson-oss.example.com/p.json"
        );
    }

    #[test]
    fn test_directory_resolves_to_index() {
        let dir = tempfile::tempdir().unwrap();
        fs::create_dir_all(dir.path().join("cdn.example.com/app")).unwrap();
        let t = translator(dir.path());

        let expected = dir.path().join("cdn.example.com/app").join("index.html");
        assert_eq!(t.translate("/cdn.example.com/app/"), expected);
        // Same input, same answer
        assert_eq!(t.translate("/cdn.example.com/app/"), expected);
        assert_eq!(t.translate("/cdn.example.com/app"), expected);
        assert_eq!(t.translate("/"), dir.path().join("index.html"));
    }

    #[test]
    fn test_missing_path_is_not_rewritten() {
        let dir = tempfile::tempdir().unwrap();
        let t = translator(dir.path());
        assert_eq!(t.translate("/nope/"), dir.path().join("nope"));
    }

    #[test]
    fn test_traversal_is_clamped() {
        let dir = tempfile::tempdir().unwrap();
        let t = translator(dir.path());
        assert_eq!(t.translate("/../../etc/passwd"), dir.path().join("etc/passwd"));
        assert_eq!(
            t.translate("/cdn.example.com/../../secret"),
            dir.path().join("secret")
        );
        assert!(t.translate("/%2e%2e/%2e%2e/x").starts_with(dir.path()));
    }

    #[test]
    fn test_parse_failure_falls_back_to_raw_join() {
        let dir = tempfile::tempdir().unwrap();
        let t = translator(dir.path());
        assert_eq!(t.translate("/bad%zz"), dir.path().join("bad%zz"));
    }

    #[test]
    fn test_non_utf8_path_keeps_raw_query() {
        let dir = tempfile::tempdir().unwrap();
        let t = translator(dir.path());
        assert!(matches!(
            t.translate_relative("/cdn.example.com/a%ff.png?x=1"),
            Err(UrlParseError::InvalidUtf8(_))
        ));
        assert_eq!(
            t.translate("/cdn.example.com/a%ff.png?x=1"),
            dir.path().join("cdn.example.com").join("a%ff.png?x=1")
        );
    }
}
