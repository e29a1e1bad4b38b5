//! Request dispatch module
//!
//! Entry point for HTTP request processing: translates the URL, checks the
//! cache and picks the response for the method class and outcome.
//!
//! | Method    | Cached | Response                                   |
//! |-----------|--------|--------------------------------------------|
//! | POST      | yes    | 200, `application/json`, file bytes        |
//! | POST      | no     | 200, empty body                            |
//! | GET/other | yes    | 200, type from extension, file bytes       |
//! | GET/other | no     | 404                                        |

use std::convert::Infallible;
use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Instant;

use http_body_util::BodyExt;
use hyper::body::Incoming;
use hyper::header::CONTENT_LENGTH;
use hyper::{Method, Request, Response};

use super::cached_files;
use crate::config::AppState;
use crate::http::{self, ResponseBody};
use crate::logger::{self, AccessLogEntry};

/// The only distinction the mirror makes between methods
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MethodClass {
    Post,
    /// GET, HEAD and every other non-POST method
    Get,
}

impl MethodClass {
    pub fn of(method: &Method) -> Self {
        if method == Method::POST {
            Self::Post
        } else {
            Self::Get
        }
    }
}

/// What happened to a request, attached to the response extensions
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CacheOutcome {
    pub class: MethodClass,
    pub hit: bool,
    pub local_path: PathBuf,
}

impl CacheOutcome {
    /// Log tag, e.g. `GET MISS`
    pub const fn tag(&self) -> &'static str {
        match (self.class, self.hit) {
            (MethodClass::Post, true) => "POST HIT",
            (MethodClass::Post, false) => "POST MISS",
            (MethodClass::Get, true) => "GET HIT",
            (MethodClass::Get, false) => "GET MISS",
        }
    }
}

/// Serve `raw_url` from the cache
pub async fn serve(state: &AppState, method: &Method, raw_url: &str) -> Response<ResponseBody> {
    let class = MethodClass::of(method);
    let local_path = state.translator.translate(raw_url);
    let hit = cached_files::is_cached(&local_path).await;

    let mut response = match (class, hit) {
        (_, true) => cached_files::serve_hit(class, &local_path).await,
        (MethodClass::Post, false) => http::build_empty_ok_response(),
        (MethodClass::Get, false) => http::build_404_response(),
    };

    let outcome = CacheOutcome {
        class,
        hit,
        local_path,
    };
    logger::log_cache_outcome(outcome.tag(), raw_url, &outcome.local_path);
    response.extensions_mut().insert(outcome);
    response
}

/// Main entry point for HTTP request handling
pub async fn handle_request(
    req: Request<Incoming>,
    state: Arc<AppState>,
    peer_addr: SocketAddr,
) -> Result<Response<ResponseBody>, Infallible> {
    let started = Instant::now();
    let (parts, body) = req.into_parts();
    let raw_url = parts.uri.to_string();

    // Uploaded bodies are never stored; read them off the wire so the
    // connection stays reusable.
    drain_body(body).await;

    let response = serve(&state, &parts.method, &raw_url).await;

    if state.access_log_enabled() {
        let entry = build_access_entry(&parts, &raw_url, peer_addr, &response, started);
        logger::log_access(&entry, &state.config.logging.access_log_format);
    }

    Ok(response)
}

async fn drain_body(mut body: Incoming) {
    while let Some(frame) = body.frame().await {
        if let Err(e) = frame {
            logger::log_debug(&format!("Request body aborted: {e}"));
            break;
        }
    }
}

fn build_access_entry(
    parts: &hyper::http::request::Parts,
    raw_url: &str,
    peer_addr: SocketAddr,
    response: &Response<ResponseBody>,
    started: Instant,
) -> AccessLogEntry {
    let mut entry = AccessLogEntry::new(
        peer_addr.ip().to_string(),
        parts.method.to_string(),
        raw_url.to_string(),
    );
    entry.http_version = match parts.version {
        hyper::Version::HTTP_10 => "1.0".to_string(),
        _ => "1.1".to_string(),
    };
    entry.status = response.status().as_u16();
    entry.body_bytes = response
        .headers()
        .get(CONTENT_LENGTH)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.parse().ok())
        .unwrap_or(0);
    if let Some(outcome) = response.extensions().get::<CacheOutcome>() {
        entry.cache_status = Some(outcome.tag().to_string());
        entry.local_path = Some(outcome.local_path.display().to_string());
    }
    entry.request_time_us = u64::try_from(started.elapsed().as_micros()).unwrap_or(u64::MAX);
    entry
}
