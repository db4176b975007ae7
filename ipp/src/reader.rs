//!
//! IPP reader
//!
//! A cursor over an in-memory message. Every read returns `None` instead of failing when the
//! remaining data is shorter than the field, leaving the rest of the data untouched.
//!
use bytes::{Buf, Bytes};

use crate::{model::IppVersion, IppHeader};

/// Lenient IPP reader over a complete message buffer
pub struct IppReader {
    inner: Bytes,
}

impl IppReader {
    /// Create IppReader from the message bytes
    pub fn new(inner: Bytes) -> Self {
        IppReader { inner }
    }

    /// Number of unread bytes
    pub fn remaining(&self) -> usize {
        self.inner.remaining()
    }

    /// Unread bytes without consuming them
    pub fn peek(&self) -> &[u8] {
        &self.inner
    }

    pub fn read_bytes(&mut self, len: usize) -> Option<Bytes> {
        if self.inner.remaining() < len {
            return None;
        }
        Some(self.inner.split_to(len))
    }

    pub fn read_u8(&mut self) -> Option<u8> {
        if self.inner.remaining() < 1 {
            return None;
        }
        Some(self.inner.get_u8())
    }

    pub fn read_u16(&mut self) -> Option<u16> {
        if self.inner.remaining() < 2 {
            return None;
        }
        Some(self.inner.get_u16())
    }

    pub fn read_u32(&mut self) -> Option<u32> {
        if self.inner.remaining() < 4 {
            return None;
        }
        Some(self.inner.get_u32())
    }

    /// Read IPP name from [len; name] element
    pub fn read_name(&mut self) -> Option<String> {
        let len = self.read_u16()? as usize;
        self.read_bytes(len).map(|b| String::from_utf8_lossy(&b).into_owned())
    }

    /// Read IPP value from [len; value] element
    pub fn read_value(&mut self) -> Option<Bytes> {
        let len = self.read_u16()? as usize;
        self.read_bytes(len)
    }

    /// Read IPP header, `None` when fewer than 8 bytes are left
    pub fn read_header(&mut self) -> Option<IppHeader> {
        if self.inner.remaining() < 8 {
            return None;
        }
        let version = IppVersion(self.read_u16()?);
        let operation_status = self.read_u16()?;
        let request_id = self.read_u32()?;

        Some(IppHeader::new(version, operation_status, request_id))
    }

    /// Consume the reader and return all unread bytes
    pub fn into_remaining(self) -> Bytes {
        self.inner
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::StatusCode;

    #[test]
    fn test_read_name() {
        let mut reader = IppReader::new(Bytes::from_static(&[0x00, 0x04, b't', b'e', b's', b't']));
        assert_eq!(reader.read_name().as_deref(), Some("test"));
        assert_eq!(reader.remaining(), 0);
    }

    #[test]
    fn test_read_value() {
        let mut reader = IppReader::new(Bytes::from_static(&[0x00, 0x04, b't', b'e', b's', b't']));
        let value = reader.read_value().unwrap();
        assert_eq!(value.as_ref(), b"test");
    }

    #[test]
    fn test_read_truncated_value() {
        let mut reader = IppReader::new(Bytes::from_static(&[0x00, 0x05, b't', b'e', b's', b't']));
        assert_eq!(reader.read_value(), None);
        assert_eq!(reader.peek(), b"test");

        let mut reader = IppReader::new(Bytes::from_static(&[0x00]));
        assert_eq!(reader.read_name(), None);
    }

    #[test]
    fn test_read_header() {
        let mut reader = IppReader::new(Bytes::from_static(&[0x01, 0x01, 0x04, 0x01, 0x11, 0x22, 0x33, 0x44]));
        let header = reader.read_header().unwrap();
        assert_eq!(header.version, IppVersion::v1_1());
        assert_eq!(header.operation_or_status, 0x401);
        assert_eq!(header.request_id, 0x11223344);
        assert_eq!(header.status_code(), StatusCode::ClientErrorForbidden);
        assert_eq!(reader.read_u32(), None);
    }

    #[test]
    fn test_read_integers() {
        let mut reader = IppReader::new(Bytes::from_static(&[0x00, 0x00, 0x02, 0x58, 0x01, 0x2c, 0x07]));
        assert_eq!(reader.read_u32(), Some(600));
        assert_eq!(reader.read_u16(), Some(300));
        assert_eq!(reader.read_u32(), None);
        assert_eq!(reader.read_u8(), Some(7));
        assert_eq!(reader.read_u8(), None);
    }

    #[test]
    fn test_read_short_header() {
        let mut reader = IppReader::new(Bytes::from_static(&[0x01, 0x01, 0x04, 0x01, 0x11, 0x22, 0x33]));
        assert!(reader.read_header().is_none());
        assert_eq!(reader.into_remaining().len(), 7);
    }
}
