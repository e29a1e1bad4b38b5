//! Query-suffix encoding
//!
//! CDN hosts serve different bytes for the same path depending on the query
//! string (image resizing, cropping, format conversion). Those variants are
//! cached side by side as `<file>__<escaped query>`.

/// Separator between the cached file name and its encoded query
pub const QUERY_SUFFIX_SEPARATOR: &str = "__";

/// Escape a raw query string for use inside a file name.
///
/// Substitutions run in order, each on the previous result.
pub fn escape_query(query: &str) -> String {
    query
        .replace('/', "_")
        .replace(':', "_")
        .replace('?', "_")
        .replace("%7C", "|")
}

/// Build the suffix appended to a cache path for `query`
pub fn query_suffix(query: &str) -> String {
    format!("{QUERY_SUFFIX_SEPARATOR}{}", escape_query(query))
}

/// Decides which requests get a query suffix
#[derive(Debug, Clone)]
pub struct QuerySuffixPolicy {
    /// `.<suffix>/`, present in every URL that names a mirrored host
    marker: String,
    canonical_domain: String,
    exempt_hosts: Vec<String>,
}

impl QuerySuffixPolicy {
    pub fn new(domain_suffix: &str, canonical_domain: &str, exempt_hosts: &[String]) -> Self {
        Self {
            marker: format!(".{domain_suffix}/"),
            canonical_domain: canonical_domain.to_string(),
            exempt_hosts: exempt_hosts.to_vec(),
        }
    }

    /// Whether `query` should be encoded into the cache path of `raw_url`.
    ///
    /// All gates look at the raw URL text, not the parsed host.
    pub fn applies(&self, raw_url: &str, query: &str) -> bool {
        !query.is_empty()
            && raw_url.contains(&self.marker)
            && !raw_url.contains(&self.canonical_domain)
            && !self
                .exempt_hosts
                .iter()
                .any(|host| raw_url.contains(host.as_str()))
    }
}
