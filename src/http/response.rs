//! HTTP response building module
//!
//! Builders for the handful of responses the mirror sends. Every response
//! carries `Connection: keep-alive`.

use hyper::header::{CONNECTION, CONTENT_LENGTH, CONTENT_TYPE};
use hyper::{Response, StatusCode};

use super::body::{empty, full, ResponseBody};

const KEEP_ALIVE: &str = "keep-alive";

/// Build 200 response for a cache hit
///
/// `content_type` of `None` omits the header.
pub fn build_file_response(
    body: ResponseBody,
    content_type: Option<&str>,
    content_length: u64,
) -> Response<ResponseBody> {
    let mut builder = Response::builder()
        .status(StatusCode::OK)
        .header(CONNECTION, KEEP_ALIVE)
        .header(CONTENT_LENGTH, content_length);

    if let Some(content_type) = content_type {
        builder = builder.header(CONTENT_TYPE, content_type);
    }

    builder.body(body).unwrap_or_else(|e| {
        log_build_error("200", &e);
        Response::new(empty())
    })
}

/// Build empty 200 response (POST with nothing cached yet)
pub fn build_empty_ok_response() -> Response<ResponseBody> {
    Response::builder()
        .status(StatusCode::OK)
        .header(CONNECTION, KEEP_ALIVE)
        .body(empty())
        .unwrap_or_else(|e| {
            log_build_error("200", &e);
            Response::new(empty())
        })
}

/// Build 404 Not Found response
pub fn build_404_response() -> Response<ResponseBody> {
    build_text_response(StatusCode::NOT_FOUND, "404 Not Found")
}

/// Build 500 Internal Server Error response
///
/// The body is deliberately generic; details go to the error log only.
pub fn build_500_response() -> Response<ResponseBody> {
    build_text_response(StatusCode::INTERNAL_SERVER_ERROR, "Internal server error")
}

fn build_text_response(status: StatusCode, text: &'static str) -> Response<ResponseBody> {
    Response::builder()
        .status(status)
        .header(CONNECTION, KEEP_ALIVE)
        .header(CONTENT_TYPE, "text/plain; charset=utf-8")
        .body(full(text))
        .unwrap_or_else(|e| {
            log_build_error(status.as_str(), &e);
            let mut resp = Response::new(full(text));
            *resp.status_mut() = status;
            resp
        })
}

/// Log response build error
fn log_build_error(status: &str, error: &hyper::http::Error) {
    crate::logger::log_error(&format!("Failed to build {status} response: {error}"));
}
