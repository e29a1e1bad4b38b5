//! Response body types
//!
//! Cache hits stream straight from disk; everything else is a small
//! in-memory body. Both share one boxed body type.

use futures_util::TryStreamExt;
use http_body_util::{combinators::BoxBody, BodyExt, Empty, Full, StreamBody};
use hyper::body::{Bytes, Frame};
use tokio::fs::File;
use tokio_util::io::ReaderStream;

/// Body type of every response the server produces
pub type ResponseBody = BoxBody<Bytes, std::io::Error>;

/// In-memory body
pub fn full<T: Into<Bytes>>(chunk: T) -> ResponseBody {
    Full::new(chunk.into())
        .map_err(|never| match never {})
        .boxed()
}

/// Zero-length body
pub fn empty() -> ResponseBody {
    Empty::<Bytes>::new()
        .map_err(|never| match never {})
        .boxed()
}

/// Stream an opened file chunk by chunk.
///
/// The handle is owned by the body and closed when the body is dropped,
/// whether the transfer finished, failed, or the client went away.
pub fn file_body(file: File) -> ResponseBody {
    StreamBody::new(ReaderStream::new(file).map_ok(Frame::data)).boxed()
}

#[cfg(test)]
mod tests {
    use super::*;
    use hyper::body::Body;

    #[tokio::test]
    async fn test_full_and_empty() {
        let body = full("hello").collect().await.unwrap().to_bytes();
        assert_eq!(body, Bytes::from("hello"));

        let body = empty();
        assert!(body.is_end_stream());
    }

    #[tokio::test]
    async fn test_file_body_streams_contents() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("blob.bin");
        let data: Vec<u8> = (0..20_000u32).map(|i| (i % 251) as u8).collect();
        std::fs::write(&path, &data).unwrap();

        let file = File::open(&path).await.unwrap();
        let body = file_body(file).collect().await.unwrap().to_bytes();
        assert_eq!(body.as_ref(), data.as_slice());
    }
}
