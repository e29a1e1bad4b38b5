//! Routing module
//!
//! Translates request URLs into paths under the cache root: host-style path
//! prefixes, query-suffix encoding and directory index resolution.

pub mod domain;
pub mod query;
pub mod translate;

pub use translate::{PathTranslator, UrlParseError};
