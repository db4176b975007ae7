//!
//! IPP message codec for Rust. This crate covers the client-side message layer of the
//! Internet Printing Protocol:
//! * encoding requests with typed attribute puts or the `name:type:value` job attribute notation
//! * decoding responses, optionally framed by HTTP and delivered in partial reads, into an attribute tree
//! * resolving tag and enum codes to names through tag and enum registries
//!
//! Transport is left to the caller: send the encoded bytes with any HTTP client and feed the
//! response back to the parser.
//!
//! The following feature flags are supported:
//! * `async` - enable async APIs (response reading, payload)
//! * `serde` - serialization of the attribute tree, JSON metadata loading
//!
//! By default, only `async` is enabled.
//!
//! Implementation notes:
//! * decoding is lenient, truncated input yields every group and value which was complete.
//! * collections are not decoded, a collection tag ends the attribute data.
//!
//! Usage example:
//!
//!```rust
//! use ipp_codec::prelude::*;
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let metadata = Metadata::builtin()?;
//!
//!     let mut writer = IppEncoder::new().begin(Operation::GetPrinterAttributes);
//!     writer
//!         .put_uri(IppAttribute::PRINTER_URI, "ipp://localhost:631/printers/test")
//!         .put_keyword(IppAttribute::REQUESTED_ATTRIBUTES, "printer-state")
//!         .put_keyword("", "printer-state-reasons");
//!     let request = writer.finish()?;
//!
//!     let response = IppParser::new(&metadata).parse(request);
//!     let group = response
//!         .group("operation-attributes-tag")
//!         .ok_or("no operation attributes")?;
//!     let requested = group
//!         .attribute(IppAttribute::REQUESTED_ATTRIBUTES)
//!         .ok_or("no requested attributes")?;
//!     assert_eq!(requested.value(), "printer-state,printer-state-reasons");
//!     Ok(())
//! }
//!```

use bytes::{BufMut, Bytes, BytesMut};
use num_traits::FromPrimitive;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::model::{IppVersion, StatusCode};

pub mod attribute;
pub mod builtin;
pub mod encoder;
pub mod error;
pub mod framing;
pub mod job;
pub mod model;
pub mod parser;
pub mod reader;
pub mod registry;
pub mod request;
pub mod util;
pub mod value;

pub mod prelude {
    //!
    //! Common imports
    //!
    pub use num_traits::FromPrimitive as _;

    pub use crate::{
        attribute::{IppAttribute, IppAttributeGroup, IppAttributeValue, IppResponse},
        encoder::{IppEncoder, IppRequestWriter, RequestIdCounter},
        job::{JobAttribute, JobAttributeValue},
        model::*,
        parser::IppParser,
        registry::Metadata,
        request::{IppPayload, IppRequest},
        value::IppValue,
    };

    pub use super::error::IppError;

    pub use super::IppHeader;
}

/// IPP request and response header
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Clone, Debug, PartialEq)]
pub struct IppHeader {
    /// IPP protocol version
    pub version: IppVersion,
    /// Operation tag for requests, status for responses
    pub operation_or_status: u16,
    /// ID of the request
    pub request_id: u32,
}

impl IppHeader {
    /// Create IPP header
    pub fn new(version: IppVersion, operation_or_status: u16, request_id: u32) -> IppHeader {
        IppHeader {
            version,
            operation_or_status,
            request_id,
        }
    }

    /// Write header to a byte array
    pub fn to_bytes(&self) -> Bytes {
        let mut buffer = BytesMut::new();
        buffer.put_u16(self.version.0);
        buffer.put_u16(self.operation_or_status);
        buffer.put_u32(self.request_id);

        buffer.freeze()
    }

    /// Decode and get IPP status code from the header
    pub fn status_code(&self) -> StatusCode {
        StatusCode::from_u16(self.operation_or_status).unwrap_or(StatusCode::UnknownStatusCode)
    }
}
