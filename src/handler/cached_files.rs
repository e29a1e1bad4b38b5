//! Cached file serving module
//!
//! Existence checks and streaming of files under the cache root.

use std::path::Path;

use hyper::Response;
use tokio::fs::{self, File};

use super::router::MethodClass;
use crate::http::{self, body::file_body, mime, ResponseBody};
use crate::logger;

/// Content type sent for every POST hit, whatever the file extension
const POST_CONTENT_TYPE: &str = "application/json";

/// Whether `path` is a servable cache entry.
///
/// Any stat failure counts as a miss.
pub async fn is_cached(path: &Path) -> bool {
    fs::metadata(path).await.is_ok_and(|m| m.is_file())
}

/// Build the 200 response for a cache hit, streaming the file body.
///
/// Failing to open a file that was just seen on disk yields a generic 500.
pub async fn serve_hit(class: MethodClass, path: &Path) -> Response<ResponseBody> {
    let file = match File::open(path).await {
        Ok(file) => file,
        Err(e) => {
            logger::log_error(&format!(
                "Failed to open cached file '{}': {e}",
                path.display()
            ));
            return http::build_500_response();
        }
    };

    // Size comes from the open handle so it matches the bytes we stream
    let size = match file.metadata().await {
        Ok(metadata) => metadata.len(),
        Err(e) => {
            logger::log_error(&format!(
                "Failed to stat cached file '{}': {e}",
                path.display()
            ));
            return http::build_500_response();
        }
    };

    let content_type = match class {
        MethodClass::Post => Some(POST_CONTENT_TYPE),
        MethodClass::Get => mime::content_type_for(path),
    };

    http::build_file_response(file_body(file), content_type, size)
}

#[cfg(test)]
mod tests {
    use super::*;
    use http_body_util::BodyExt;
    use hyper::header::{CONTENT_LENGTH, CONTENT_TYPE};
    use hyper::StatusCode;

    #[tokio::test]
    async fn test_is_cached() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("a.js");
        std::fs::write(&file, "x").unwrap();

        assert!(is_cached(&file).await);
        assert!(!is_cached(&dir.path().join("missing.js")).await);
        // Directories cannot be streamed
        assert!(!is_cached(dir.path()).await);
    }

    #[tokio::test]
    async fn test_serve_hit_get_uses_extension() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("page.css");
        std::fs::write(&file, "body{}").unwrap();

        let resp = serve_hit(MethodClass::Get, &file).await;
        assert_eq!(resp.status(), StatusCode::OK);
        assert_eq!(resp.headers()[CONTENT_TYPE], "text/css");
        assert_eq!(resp.headers()[CONTENT_LENGTH], "6");
        let body = resp.into_body().collect().await.unwrap().to_bytes();
        assert_eq!(body, "body{}");
    }

    #[tokio::test]
    async fn test_serve_hit_post_is_always_json() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("render.png");
        std::fs::write(&file, [1u8, 2, 3]).unwrap();

        let resp = serve_hit(MethodClass::Post, &file).await;
        assert_eq!(resp.headers()[CONTENT_TYPE], "application/json");
        assert_eq!(resp.headers()[CONTENT_LENGTH], "3");
    }

    #[tokio::test]
    async fn test_serve_hit_open_failure_is_500() {
        let dir = tempfile::tempdir().unwrap();
        let resp = serve_hit(MethodClass::Get, &dir.path().join("vanished.js")).await;
        assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let body = resp.into_body().collect().await.unwrap().to_bytes();
        assert!(!String::from_utf8_lossy(&body).contains("vanished"));
    }
}
