//! Request handler module
//!
//! Turns a request into one of four cache responses (POST/GET x hit/miss)
//! and streams cached files back to the client.

pub mod cached_files;
pub mod router;

// Re-export main entry point
pub use router::{handle_request, serve, CacheOutcome, MethodClass};
