//!
//! Response accumulation
//!
//! A response may arrive in any number of partial reads. The parser works on one contiguous
//! buffer, so every chunk is collected first.
//!
use std::io::{ErrorKind, Read};

use bytes::{Bytes, BytesMut};
use log::debug;

#[cfg(feature = "async")]
use futures_util::io::{AsyncRead, AsyncReadExt};

use crate::error::IppError;

const READ_CHUNK_SIZE: usize = 8 * 1024;

/// Growable buffer joining partial reads in arrival order
#[derive(Debug, Default)]
pub struct ResponseAccumulator {
    buf: BytesMut,
}

impl ResponseAccumulator {
    pub fn new() -> Self {
        ResponseAccumulator {
            buf: BytesMut::with_capacity(READ_CHUNK_SIZE),
        }
    }

    /// Append one chunk
    pub fn push(&mut self, chunk: &[u8]) {
        self.buf.extend_from_slice(chunk);
    }

    pub fn len(&self) -> usize {
        self.buf.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buf.is_empty()
    }

    /// Freeze the collected data
    pub fn into_bytes(self) -> Bytes {
        self.buf.freeze()
    }
}

/// Read everything until EOF
pub fn read_response<R>(mut reader: R) -> Result<Bytes, IppError>
where
    R: Read,
{
    let mut acc = ResponseAccumulator::new();
    let mut chunk = [0u8; READ_CHUNK_SIZE];
    loop {
        let read = match reader.read(&mut chunk) {
            Ok(0) => break,
            Ok(n) => n,
            Err(err) if err.kind() == ErrorKind::Interrupted => continue,
            Err(err) => return Err(err.into()),
        };
        acc.push(&chunk[..read]);
    }
    debug!("Response size: {}", acc.len());
    Ok(acc.into_bytes())
}

#[cfg(feature = "async")]
/// Read everything until EOF from an async reader
pub async fn read_response_async<R>(mut reader: R) -> Result<Bytes, IppError>
where
    R: AsyncRead + Unpin,
{
    let mut acc = ResponseAccumulator::new();
    let mut chunk = [0u8; READ_CHUNK_SIZE];
    loop {
        let read = match reader.read(&mut chunk).await {
            Ok(0) => break,
            Ok(n) => n,
            Err(err) if err.kind() == ErrorKind::Interrupted => continue,
            Err(err) => return Err(err.into()),
        };
        acc.push(&chunk[..read]);
    }
    debug!("Response size: {}", acc.len());
    Ok(acc.into_bytes())
}
