//! Domain path classifier
//!
//! Mirrored pages reference other hosts of the property as root-relative
//! paths whose first segment is the host name, e.g. `/cdn.example.com/a.png`.
//! This module recognises such paths for a given parent domain suffix.

/// A path whose first segment names a host under the parent domain
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DomainPath<'a> {
    /// The full host name, e.g. `cdn.example.com`
    pub domain: &'a str,
    /// Everything after the host segment, without its leading slash
    pub rest: &'a str,
}

/// Split `path` into host and remainder when its first segment is a
/// subdomain of `suffix`.
///
/// Equivalent to matching `^([^/]+\.<suffix>)(/.*)?$`: the host segment needs
/// at least one character before `.<suffix>`, and the remainder (when present)
/// starts with `/` and holds no newline.
pub fn match_domain_path<'a>(path: &'a str, suffix: &str) -> Option<DomainPath<'a>> {
    let (domain, rest) = match path.split_once('/') {
        Some((domain, rest)) => (domain, Some(rest)),
        None => (path, None),
    };

    let label = domain.strip_suffix(suffix)?.strip_suffix('.')?;
    if label.is_empty() {
        return None;
    }

    match rest {
        Some(rest) if rest.contains('\n') => None,
        Some(rest) => Some(DomainPath { domain, rest }),
        None => Some(DomainPath { domain, rest: "" }),
    }
}
