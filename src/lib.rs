//! Local HTTP mirror for a multi-domain web property.
//!
//! Requests are mapped onto a flat cache directory (see [`routing`]) and
//! answered from disk (see [`handler`]). Nothing is ever fetched upstream:
//! a file that is not on disk is reported as a miss.

pub mod config;
pub mod handler;
pub mod http;
pub mod logger;
pub mod routing;
pub mod server;
