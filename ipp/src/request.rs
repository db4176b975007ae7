//!
//! IPP request body: the encoded message followed by an optional document
//!
use std::io::{self, Read};

use bytes::Bytes;
#[cfg(feature = "async")]
use {
    futures_util::io::{AllowStdIo, AsyncRead, AsyncReadExt},
    std::{
        pin::Pin,
        task::{Context, Poll},
    },
};
use log::debug;

enum Document {
    None,
    InMemory(io::Cursor<Bytes>),
    Reader(Box<dyn Read + Send + Sync>),
    #[cfg(feature = "async")]
    AsyncReader(Box<dyn AsyncRead + Send + Sync + Unpin>),
}

/// Document sent after the attributes of a Print-Job or Send-Document request
pub struct IppPayload(Document);

impl IppPayload {
    /// Payload without a document
    pub fn empty() -> Self {
        IppPayload(Document::None)
    }

    /// Stream the document from a blocking reader
    pub fn new<R>(r: R) -> Self
    where
        R: 'static + Read + Send + Sync,
    {
        IppPayload(Document::Reader(Box::new(r)))
    }

    #[cfg(feature = "async")]
    /// Stream the document from an async reader
    pub fn new_async<R>(r: R) -> Self
    where
        R: 'static + AsyncRead + Send + Sync + Unpin,
    {
        IppPayload(Document::AsyncReader(Box::new(r)))
    }

    /// Send a document already held in memory
    pub fn from_bytes<B>(data: B) -> Self
    where
        B: Into<Bytes>,
    {
        IppPayload(Document::InMemory(io::Cursor::new(data.into())))
    }

    /// True when no document is attached
    pub fn is_empty(&self) -> bool {
        matches!(self.0, Document::None)
    }
}

impl Default for IppPayload {
    fn default() -> Self {
        IppPayload::empty()
    }
}

impl Read for IppPayload {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        match self.0 {
            Document::None => Ok(0),
            Document::InMemory(ref mut cursor) => Read::read(cursor, buf),
            Document::Reader(ref mut reader) => reader.read(buf),
            // blocking callers of an async document drive it on the current thread
            #[cfg(feature = "async")]
            Document::AsyncReader(ref mut reader) => futures_executor::block_on(reader.read(buf)),
        }
    }
}

#[cfg(feature = "async")]
impl AsyncRead for IppPayload {
    fn poll_read(mut self: Pin<&mut Self>, cx: &mut Context, buf: &mut [u8]) -> Poll<io::Result<usize>> {
        match self.0 {
            Document::None => Poll::Ready(Ok(0)),
            Document::InMemory(ref mut cursor) => Poll::Ready(Read::read(cursor, buf)),
            Document::Reader(ref mut reader) => Pin::new(&mut AllowStdIo::new(reader)).poll_read(cx, buf),
            Document::AsyncReader(ref mut reader) => Pin::new(&mut **reader).poll_read(cx, buf),
        }
    }
}

/// Encoded request together with the document to send after it
pub struct IppRequest {
    body: Bytes,
    payload: IppPayload,
}

impl IppRequest {
    /// Create a request from the bytes returned by the request writer
    pub fn new(body: Bytes) -> IppRequest {
        IppRequest {
            body,
            payload: IppPayload::empty(),
        }
    }

    /// Attach a document
    pub fn with_payload(mut self, payload: IppPayload) -> IppRequest {
        self.payload = payload;
        self
    }

    /// Encoded header and attributes
    pub fn body(&self) -> &Bytes {
        &self.body
    }

    /// Get payload
    pub fn payload(&self) -> &IppPayload {
        &self.payload
    }

    #[cfg(feature = "async")]
    /// Convert request into AsyncRead including payload
    pub fn into_async_read(self) -> impl AsyncRead + Send + Sync + 'static {
        debug!("IPP request size: {}", self.body.len());
        futures_util::io::Cursor::new(self.body).chain(self.payload)
    }

    /// Convert request into Read including payload
    pub fn into_read(self) -> impl Read + Send + Sync + 'static {
        debug!("IPP request size: {}", self.body.len());
        io::Cursor::new(self.body).chain(self.payload)
    }
}

impl From<Bytes> for IppRequest {
    fn from(body: Bytes) -> Self {
        IppRequest::new(body)
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::{
        encoder::{IppEncoder, RequestIdCounter},
        model::Operation,
    };

    fn encoded() -> Bytes {
        let mut writer = IppEncoder::with_counter(Arc::new(RequestIdCounter::new(0))).begin(Operation::PrintJob);
        writer.put_mime_media_type("document-format", "text/plain");
        writer.finish().unwrap()
    }

    fn read_all(mut payload: IppPayload) -> Vec<u8> {
        let mut out = Vec::new();
        Read::read_to_end(&mut payload, &mut out).unwrap();
        out
    }

    #[test]
    fn test_payload_sources() {
        assert_eq!(read_all(IppPayload::from_bytes(Bytes::from_static(b"%PDF-1.7"))), b"%PDF-1.7");
        assert_eq!(read_all(IppPayload::new(io::Cursor::new(vec![1u8, 2, 3]))), vec![1, 2, 3]);

        let payload = IppPayload::default();
        assert!(payload.is_empty());
        assert!(read_all(payload).is_empty());
        assert!(!IppPayload::from_bytes(Vec::<u8>::new()).is_empty());
    }

    #[cfg(feature = "async")]
    #[test]
    fn test_blocking_read_of_async_document() {
        let payload = IppPayload::new_async(futures_util::io::Cursor::new(vec![9u8; 10]));
        assert_eq!(read_all(payload), vec![9u8; 10]);
    }

    #[cfg(feature = "async")]
    #[tokio::test]
    async fn test_async_read_of_blocking_document() {
        let mut payload = IppPayload::new(io::Cursor::new(b"document".to_vec()));
        let mut out = Vec::new();
        AsyncReadExt::read_to_end(&mut payload, &mut out).await.unwrap();
        assert_eq!(out, b"document");
    }

    #[test]
    fn test_into_read_appends_document() {
        let body = encoded();
        let request = IppRequest::new(body.clone()).with_payload(IppPayload::from_bytes(Bytes::from_static(b"hello")));
        assert!(!request.payload().is_empty());
        assert_eq!(request.body(), &body);

        let mut out = Vec::new();
        request.into_read().read_to_end(&mut out).unwrap();
        assert_eq!(&out[..body.len()], &body[..]);
        assert_eq!(&out[body.len()..], b"hello");
    }

    #[test]
    fn test_into_read_without_document() {
        let body = encoded();
        let mut out = Vec::new();
        IppRequest::from(body.clone()).into_read().read_to_end(&mut out).unwrap();
        assert_eq!(out, body);
    }

    #[cfg(feature = "async")]
    #[tokio::test]
    async fn test_into_async_read() {
        let body = encoded();
        let request = IppRequest::new(body.clone()).with_payload(IppPayload::new(io::Cursor::new(b"doc".to_vec())));

        let mut out = Vec::new();
        request.into_async_read().read_to_end(&mut out).await.unwrap();
        assert_eq!(out.len(), body.len() + 3);
        assert!(out.ends_with(b"doc"));
    }
}
