//!
//! IPP request encoder
//!
use std::sync::{
    atomic::{AtomicU32, Ordering},
    Arc,
};

use bytes::{BufMut, Bytes, BytesMut};
use log::{debug, trace, warn};
use once_cell::sync::Lazy;

use crate::{
    attribute::IppAttribute,
    error::IppError,
    job::{split_blocks, JobAttribute},
    model::{DelimiterTag, IppVersion, Operation, ValueTag},
    value::IppValue,
    IppHeader,
};

/// Default `attributes-charset`
pub const DEFAULT_CHARSET: &str = "utf-8";

/// Default `attributes-natural-language`
pub const DEFAULT_NATURAL_LANGUAGE: &str = "en-us";

static GLOBAL_REQUEST_ID: Lazy<Arc<RequestIdCounter>> = Lazy::new(|| Arc::new(RequestIdCounter::default()));

/// Monotonic request id source, safe to share between threads
#[derive(Debug, Default)]
pub struct RequestIdCounter(AtomicU32);

impl RequestIdCounter {
    /// Create a counter, the first id handed out is `last + 1`
    pub const fn new(last: u32) -> RequestIdCounter {
        RequestIdCounter(AtomicU32::new(last))
    }

    /// Increment and return the new id
    pub fn next_id(&self) -> u32 {
        self.0.fetch_add(1, Ordering::SeqCst).wrapping_add(1)
    }

    /// Last id handed out
    pub fn last_id(&self) -> u32 {
        self.0.load(Ordering::SeqCst)
    }
}

/// Request construction context
#[derive(Clone, Debug)]
pub struct IppEncoder {
    counter: Arc<RequestIdCounter>,
}

impl IppEncoder {
    /// Create an encoder sharing the process-wide request id counter
    pub fn new() -> IppEncoder {
        IppEncoder {
            counter: GLOBAL_REQUEST_ID.clone(),
        }
    }

    /// Create an encoder with its own request id counter
    pub fn with_counter(counter: Arc<RequestIdCounter>) -> IppEncoder {
        IppEncoder { counter }
    }

    pub fn counter(&self) -> &Arc<RequestIdCounter> {
        &self.counter
    }

    /// Start a request with the default charset and natural language
    pub fn begin(&self, operation: Operation) -> IppRequestWriter {
        self.begin_with(operation as u16, None, None)
    }

    /// Start a request for a raw operation code
    pub fn begin_with(
        &self,
        operation: u16,
        charset: Option<&str>,
        natural_language: Option<&str>,
    ) -> IppRequestWriter {
        let header = IppHeader::new(IppVersion::v1_1(), operation, self.counter.next_id());
        debug!(
            "Starting request: operation {:#06x}, request id {}",
            operation, header.request_id
        );

        let mut writer = IppRequestWriter {
            buffer: BytesMut::new(),
            request_id: header.request_id,
            too_long: None,
        };
        writer.buffer.put(header.to_bytes());
        writer
            .put_group(DelimiterTag::OperationAttributes)
            .put_charset(IppAttribute::ATTRIBUTES_CHARSET, charset.unwrap_or(DEFAULT_CHARSET))
            .put_natural_language(
                IppAttribute::ATTRIBUTES_NATURAL_LANGUAGE,
                natural_language.unwrap_or(DEFAULT_NATURAL_LANGUAGE),
            );
        writer
    }
}

impl Default for IppEncoder {
    fn default() -> Self {
        IppEncoder::new()
    }
}

/// Writer for a single request. An empty attribute name adds another value to the previous attribute.
pub struct IppRequestWriter {
    buffer: BytesMut,
    request_id: u32,
    too_long: Option<usize>,
}

impl IppRequestWriter {
    /// Request id written into the header
    pub fn request_id(&self) -> u32 {
        self.request_id
    }

    fn put_raw(&mut self, tag: u8, name: &str, value: &[u8]) -> &mut Self {
        for len in [name.len(), value.len()] {
            if len > u16::MAX as usize {
                warn!("Attribute '{name}' not written, field of {len} bytes is too long");
                self.too_long.get_or_insert(len);
                return self;
            }
        }
        trace!("Put {name}: tag {tag:#04x}, {} bytes", value.len());

        self.buffer.put_u8(tag);
        self.buffer.put_u16(name.len() as u16);
        self.buffer.put_slice(name.as_bytes());
        self.buffer.put_u16(value.len() as u16);
        self.buffer.put_slice(value);
        self
    }

    /// Open another attribute group
    pub fn put_group(&mut self, tag: DelimiterTag) -> &mut Self {
        trace!("Put group: {tag:?}");
        self.buffer.put_u8(tag as u8);
        self
    }

    /// Write any typed value
    pub fn put_value(&mut self, name: &str, value: &IppValue) -> &mut Self {
        self.put_raw(value.to_tag(), name, &value.value_bytes())
    }

    /// Write an attribute without a value, as used in queries
    pub fn put_empty(&mut self, tag: ValueTag, name: &str) -> &mut Self {
        self.put_raw(tag as u8, name, &[])
    }

    pub fn put_uri(&mut self, name: &str, value: &str) -> &mut Self {
        self.put_raw(ValueTag::Uri as u8, name, value.as_bytes())
    }

    pub fn put_uri_scheme(&mut self, name: &str, value: &str) -> &mut Self {
        self.put_raw(ValueTag::UriScheme as u8, name, value.as_bytes())
    }

    pub fn put_keyword(&mut self, name: &str, value: &str) -> &mut Self {
        self.put_raw(ValueTag::Keyword as u8, name, value.as_bytes())
    }

    pub fn put_name_without_language(&mut self, name: &str, value: &str) -> &mut Self {
        self.put_raw(ValueTag::NameWithoutLanguage as u8, name, value.as_bytes())
    }

    pub fn put_text_without_language(&mut self, name: &str, value: &str) -> &mut Self {
        self.put_raw(ValueTag::TextWithoutLanguage as u8, name, value.as_bytes())
    }

    pub fn put_mime_media_type(&mut self, name: &str, value: &str) -> &mut Self {
        self.put_raw(ValueTag::MimeMediaType as u8, name, value.as_bytes())
    }

    pub fn put_natural_language(&mut self, name: &str, value: &str) -> &mut Self {
        self.put_raw(ValueTag::NaturalLanguage as u8, name, value.as_bytes())
    }

    pub fn put_charset(&mut self, name: &str, value: &str) -> &mut Self {
        self.put_raw(ValueTag::Charset as u8, name, value.as_bytes())
    }

    pub fn put_integer(&mut self, name: &str, value: i32) -> &mut Self {
        self.put_value(name, &IppValue::Integer(value))
    }

    pub fn put_boolean(&mut self, name: &str, value: bool) -> &mut Self {
        self.put_value(name, &IppValue::Boolean(value))
    }

    pub fn put_enum(&mut self, name: &str, value: i32) -> &mut Self {
        self.put_value(name, &IppValue::Enum(value))
    }

    pub fn put_resolution(&mut self, name: &str, cross_feed: i32, feed: i32, units: i8) -> &mut Self {
        self.put_value(
            name,
            &IppValue::Resolution {
                cross_feed,
                feed,
                units,
            },
        )
    }

    pub fn put_range_of_integer(&mut self, name: &str, min: i32, max: i32) -> &mut Self {
        self.put_value(name, &IppValue::RangeOfInteger { min, max })
    }

    /// Write one parsed job attribute, extra values of a set get an empty name
    pub fn put_job_attribute(&mut self, attribute: &JobAttribute) -> &mut Self {
        for (i, value) in attribute.to_values().iter().enumerate() {
            let name = if i == 0 { attribute.name() } else { "" };
            self.put_value(name, value);
        }
        self
    }

    /// Open the job attributes group and write every well-formed block, malformed blocks are skipped
    pub fn put_job_attributes<I, S>(&mut self, blocks: I) -> &mut Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.put_group(DelimiterTag::JobAttributes);
        for block in blocks {
            let block = block.as_ref();
            match block.parse::<JobAttribute>() {
                Ok(attribute) => {
                    self.put_job_attribute(&attribute);
                }
                Err(e) => warn!("Skipping job attribute block '{block}': {e}"),
            }
        }
        self
    }

    /// Same as [`put_job_attributes`](Self::put_job_attributes) for a `#`-joined string
    pub fn put_job_attributes_str(&mut self, blocks: &str) -> &mut Self {
        self.put_job_attributes(split_blocks(blocks))
    }

    /// Terminate the attribute section and return the encoded request
    pub fn finish(mut self) -> Result<Bytes, IppError> {
        if let Some(len) = self.too_long {
            return Err(IppError::FieldTooLong { len });
        }
        self.buffer.put_u8(DelimiterTag::EndOfAttributes as u8);
        debug!("Request {} encoded, {} bytes", self.request_id, self.buffer.len());
        Ok(self.buffer.freeze())
    }
}
