//! HTTP protocol layer module
//!
//! Media types, body plumbing and response builders, independent of how a
//! request maps onto the cache.

pub mod body;
pub mod mime;
pub mod response;

// Re-export commonly used types
pub use body::ResponseBody;
pub use response::{
    build_404_response, build_500_response, build_empty_ok_response, build_file_response,
};
