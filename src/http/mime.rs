//! MIME type detection module
//!
//! Returns the Content-Type for a cached file based on its extension.

use std::path::Path;

/// Get MIME Content-Type for a cached file
///
/// Looks the extension up in the standard media-type table first, then in a
/// small table of common web types. Files without a recognised extension get
/// `None` so that no Content-Type header is sent at all.
///
/// # Examples
/// ```
/// use std::path::Path;
/// use cdn_mirror::http::mime::content_type_for;
/// assert_eq!(content_type_for(Path::new("data.json")), Some("application/json"));
/// assert_eq!(content_type_for(Path::new("README")), None);
/// ```
pub fn content_type_for(path: &Path) -> Option<&'static str> {
    let extension = path.extension()?.to_str()?;
    if extension.is_empty() {
        return None;
    }

    mime_guess::from_ext(extension)
        .first_raw()
        .or_else(|| fallback_content_type(&extension.to_ascii_lowercase()))
}

/// Common web types, used when the standard table has no entry
fn fallback_content_type(extension: &str) -> Option<&'static str> {
    match extension {
        "html" | "htm" => Some("text/html"),
        "js" => Some("application/javascript"),
        "css" => Some("text/css"),
        "json" => Some("application/json"),
        "png" => Some("image/png"),
        "jpg" | "jpeg" => Some("image/jpeg"),
        "gif" => Some("image/gif"),
        "webp" => Some("image/webp"),
        "svg" => Some("image/svg+xml"),
        "txt" => Some("text/plain"),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_common_types() {
        assert_eq!(content_type_for(Path::new("a/b.json")), Some("application/json"));
        assert_eq!(content_type_for(Path::new("index.html")), Some("text/html"));
        assert_eq!(content_type_for(Path::new("style.css")), Some("text/css"));
        assert_eq!(content_type_for(Path::new("logo.png")), Some("image/png"));
        assert_eq!(content_type_for(Path::new("photo.JPG")), Some("image/jpeg"));
    }

    #[test]
    fn test_unknown_extension() {
        assert_eq!(content_type_for(Path::new("blob.qqzzunknown")), None);
        assert_eq!(content_type_for(Path::new("no_extension")), None);
        assert_eq!(content_type_for(Path::new("trailing.")), None);
        // Query-suffixed cache names rarely end in a real extension
        assert_eq!(
            content_type_for(Path::new("a.png__x-oss-process=image_resize,w_256")),
            None
        );
    }

    #[test]
    fn test_fallback_table() {
        assert_eq!(fallback_content_type("webp"), Some("image/webp"));
        assert_eq!(fallback_content_type("svg"), Some("image/svg+xml"));
        assert_eq!(fallback_content_type("bin"), None);
    }
}
