//!
//! IPP response parser
//!
//! Decoding never fails: truncated or malformed input yields a partial [`IppResponse`]
//! holding every group and value that was complete.
//!
use std::io::Read;

use bytes::Bytes;
use log::{debug, trace, warn};

#[cfg(feature = "async")]
use futures_util::io::AsyncRead;

use crate::{
    attribute::{IppAttribute, IppAttributeGroup, IppAttributeValue, IppResponse},
    error::IppError,
    framing,
    model::{DelimiterTag, IppTag, ValueTag},
    reader::IppReader,
    registry::Metadata,
    util::to_hex_with_marker,
    value::IppValue,
    IppHeader,
};

const HTTP_HEADER_END: &[u8] = b"\r\n\r\n";

/// Bodies starting with a byte above this are plain text, not IPP
const MAX_IPP_LEADING_BYTE: u8 = 0x20;

const NOT_AUTHORIZED: &str = "client-error-not-authorized (0x403)";
const UNKNOWN: &str = "unknown";

#[derive(Debug, Copy, Clone, Eq, PartialEq)]
enum DecodeState {
    AwaitingHttpHeader,
    AwaitingIppHeader,
    ReadingGroups,
    ErrorText,
    Done,
}

/// Render the numeric header the way it is shown to users
fn status_line(metadata: &Metadata, header: &IppHeader) -> String {
    format!(
        "Major Version:{} Minor Version:{} Request Id:{}\nStatus Code:{:#06x}({})",
        to_hex_with_marker(header.version.major()),
        to_hex_with_marker(header.version.minor()),
        header.request_id,
        header.operation_or_status,
        metadata
            .enums()
            .name_or_number(IppAttribute::STATUS_CODE, header.operation_or_status as i32)
    )
}

fn classify_error_text(text: &str) -> &'static str {
    if text.contains("Unauthorized") {
        NOT_AUTHORIZED
    } else {
        UNKNOWN
    }
}

struct ParserState<'a> {
    metadata: &'a Metadata,
    groups: Vec<IppAttributeGroup>,
    current_group: Option<IppAttributeGroup>,
    current_attribute: Option<IppAttribute>,
}

impl<'a> ParserState<'a> {
    fn new(metadata: &'a Metadata) -> Self {
        ParserState {
            metadata,
            groups: Vec::new(),
            current_group: None,
            current_attribute: None,
        }
    }

    fn flush_attribute(&mut self) {
        if let Some(attribute) = self.current_attribute.take() {
            match self.current_group {
                Some(ref mut group) => group.push_attribute(attribute),
                None => warn!("Dropping attribute '{}' outside of any group", attribute.name()),
            }
        }
    }

    fn close_group(&mut self) {
        self.flush_attribute();
        if let Some(group) = self.current_group.take() {
            trace!("Close group: {}", group.tag_name());
            self.groups.push(group);
        }
    }

    fn open_group(&mut self, tag: u8) {
        self.close_group();
        let group = IppAttributeGroup::new(self.metadata.tags(), tag);
        trace!("Open group: {}", group.tag_name());
        self.current_group = Some(group);
    }

    fn open_attribute(&mut self, name: String) {
        self.flush_attribute();
        self.current_attribute = Some(IppAttribute::new(name));
    }

    // values without a preceding name land in a placeholder attribute
    fn attribute_mut(&mut self) -> &mut IppAttribute {
        self.current_attribute
            .get_or_insert_with(|| IppAttribute::new(IppAttribute::NO_NAME))
    }

    fn push_value(&mut self, tag: u8, value: String) {
        let metadata = self.metadata;
        self.attribute_mut()
            .push_value(IppAttributeValue::new(metadata.tags(), tag, value));
    }

    fn push_enum(&mut self, tag: u8, value: i32) {
        let metadata = self.metadata;
        let attribute = self.attribute_mut();
        let text = metadata.enums().name_or_number(attribute.name(), value).into_owned();
        attribute.push_value(IppAttributeValue::new(metadata.tags(), tag, text));
    }

    /// Read one [tag; name; value] record, returns false when the data ran out
    fn parse_attribute(&mut self, reader: &mut IppReader, tag: ValueTag) -> bool {
        let name = match reader.read_name() {
            Some(name) => name,
            None => return false,
        };
        // the name alone is not enough to keep the record
        let value = match reader.read_value() {
            Some(value) => value,
            None => return false,
        };

        trace!("Value tag: {tag:?}: '{name}': {} bytes", value.len());

        if !name.is_empty() {
            self.open_attribute(name);
        }
        if value.is_empty() {
            return true;
        }

        let tag = tag as u8;
        match IppValue::parse(tag, value) {
            Some(IppValue::Enum(v)) => self.push_enum(tag, v),
            Some(IppValue::TextWithLanguage { language, text }) => {
                self.push_value(tag, language);
                self.push_value(tag, text);
            }
            Some(IppValue::NameWithLanguage { language, name }) => {
                self.push_value(tag, language);
                self.push_value(tag, name);
            }
            Some(v) => self.push_value(tag, v.to_string()),
            None => debug!("Dropping short value for tag {}", to_hex_with_marker(tag)),
        }
        true
    }

    fn parse_groups(&mut self, reader: &mut IppReader) {
        while let Some(tag) = reader.read_u8() {
            match IppTag::from_u8(tag) {
                Some(IppTag::Delimiter(DelimiterTag::EndOfAttributes)) => {
                    trace!("End of attributes");
                    self.close_group();
                    return;
                }
                Some(IppTag::Delimiter(_)) => self.open_group(tag),
                Some(IppTag::Value(value_tag)) if value_tag.kind().is_some() => {
                    if !self.parse_attribute(reader, value_tag) {
                        debug!("Message truncated in attribute with tag {}", to_hex_with_marker(tag));
                        return;
                    }
                }
                _ => {
                    debug!("Unsupported tag {}, treating as end of data", to_hex_with_marker(tag));
                    return;
                }
            }
        }
        debug!("Message ended without end-of-attributes tag");
    }

    fn into_groups(mut self) -> Vec<IppAttributeGroup> {
        self.close_group();
        self.groups
    }
}

/// IPP message parser, holds nothing but the registries
pub struct IppParser<'a> {
    metadata: &'a Metadata,
}

impl<'a> IppParser<'a> {
    /// Create IPP parser using the given registries
    pub fn new(metadata: &'a Metadata) -> IppParser<'a> {
        IppParser { metadata }
    }

    /// Parse an IPP message body
    pub fn parse<B>(&self, data: B) -> IppResponse
    where
        B: Into<Bytes>,
    {
        self.run(DecodeState::AwaitingIppHeader, data.into())
    }

    /// Parse an IPP message preceded by the HTTP status line and headers.
    /// A message starting with the IPP version instead is parsed as a bare body.
    pub fn parse_http<B>(&self, data: B) -> IppResponse
    where
        B: Into<Bytes>,
    {
        self.run(DecodeState::AwaitingHttpHeader, data.into())
    }

    /// Collect all data from the reader, then parse it as an HTTP framed message or a bare body
    pub fn parse_stream<R>(&self, reader: R) -> Result<IppResponse, IppError>
    where
        R: Read,
    {
        let data = framing::read_response(reader)?;
        Ok(self.parse_http(data))
    }

    #[cfg(feature = "async")]
    /// Collect all data from the async reader, then parse it as an HTTP framed message or a bare body
    pub async fn parse_stream_async<R>(&self, reader: R) -> Result<IppResponse, IppError>
    where
        R: AsyncRead + Unpin,
    {
        let data = framing::read_response_async(reader).await?;
        Ok(self.parse_http(data))
    }

    fn run(&self, mut state: DecodeState, data: Bytes) -> IppResponse {
        debug!("Parsing {} bytes", data.len());

        let mut reader = IppReader::new(data);
        let mut parser = ParserState::new(self.metadata);
        let mut http_status_line = None;
        let mut ipp_status_line = None;
        let mut header = None;

        loop {
            trace!("Decode state: {state:?}");
            state = match state {
                DecodeState::AwaitingHttpHeader
                    if reader.peek().first().map_or(false, |b| *b <= MAX_IPP_LEADING_BYTE) =>
                {
                    debug!("No HTTP header, message starts with the IPP version");
                    DecodeState::AwaitingIppHeader
                }
                DecodeState::AwaitingHttpHeader => {
                    let end = reader
                        .peek()
                        .windows(HTTP_HEADER_END.len())
                        .position(|w| w == HTTP_HEADER_END);
                    let (len, next) = match end {
                        Some(pos) => (pos + HTTP_HEADER_END.len(), DecodeState::AwaitingIppHeader),
                        None => (reader.remaining(), DecodeState::Done),
                    };
                    http_status_line = reader
                        .read_bytes(len)
                        .map(|b| String::from_utf8_lossy(&b).into_owned());
                    next
                }
                DecodeState::AwaitingIppHeader => {
                    let leading = reader.peek().first().copied();
                    match leading {
                        Some(b) if b > MAX_IPP_LEADING_BYTE => DecodeState::ErrorText,
                        _ => match reader.read_header() {
                            Some(h) => {
                                let line = status_line(self.metadata, &h);
                                debug!("IPP header: {}", line.replace('\n', " "));
                                ipp_status_line = Some(line);
                                header = Some(h);
                                DecodeState::ReadingGroups
                            }
                            None => DecodeState::Done,
                        },
                    }
                }
                DecodeState::ErrorText => {
                    let text = String::from_utf8_lossy(reader.peek()).into_owned();
                    warn!("Received a text body instead of IPP: {}", text.trim());
                    ipp_status_line = Some(classify_error_text(&text).to_owned());
                    DecodeState::Done
                }
                DecodeState::ReadingGroups => {
                    parser.parse_groups(&mut reader);
                    DecodeState::Done
                }
                DecodeState::Done => break,
            }
        }

        IppResponse::new(http_status_line, ipp_status_line, header, parser.into_groups())
    }
}

#[cfg(test)]
mod tests {
    use std::{io, sync::Arc};

    use super::*;
    use crate::{
        encoder::{IppEncoder, RequestIdCounter},
        framing::tests::Trickle,
        model::{Operation, StatusCode},
    };

    fn metadata() -> Metadata {
        Metadata::builtin().unwrap()
    }

    fn encoder() -> IppEncoder {
        IppEncoder::with_counter(Arc::new(RequestIdCounter::new(0)))
    }

    fn charset_message() -> Vec<u8> {
        let mut data = vec![0x01, 0x01, 0x00, 0x02, 0x00, 0x00, 0x00, 0x07, 0x01, 0x47, 0x00, 0x12];
        data.extend_from_slice(b"attributes-charset");
        data.extend_from_slice(&[0x00, 0x05]);
        data.extend_from_slice(b"utf-8");
        data.push(0x03);
        data
    }

    fn values(attr: &IppAttribute) -> Vec<&str> {
        attr.values().iter().map(|v| v.value()).collect()
    }

    #[test]
    fn test_parse_attributes_charset() {
        let metadata = metadata();
        let resp = IppParser::new(&metadata).parse(charset_message());

        assert_eq!(
            resp.ipp_status_line(),
            Some("Major Version:0x01 Minor Version:0x01 Request Id:7\nStatus Code:0x0002(successful-ok-conflicting-attributes)")
        );
        assert_eq!(resp.http_status_line(), None);
        assert_eq!(resp.header().unwrap().request_id, 7);
        assert_eq!(resp.groups().len(), 1);

        let group = resp.group("operation-attributes-tag").unwrap();
        assert_eq!(group.tag(), 0x01);
        assert_eq!(group.attributes().len(), 1);

        let attr = group.attribute(IppAttribute::ATTRIBUTES_CHARSET).unwrap();
        assert_eq!(attr.values().len(), 1);
        assert_eq!(attr.values()[0].tag(), 0x47);
        assert_eq!(attr.values()[0].tag_name(), "charset");
        assert_eq!(attr.values()[0].value(), "utf-8");
    }

    #[test]
    fn test_parse_enum_resolution() {
        let metadata = metadata();
        let mut writer = encoder().begin(Operation::PrintJob);
        writer.put_enum(IppAttribute::ORIENTATION_REQUESTED, 3);
        writer.put_enum("x-vendor-orientation", 3);
        writer.put_enum(IppAttribute::ORIENTATION_REQUESTED, 42);
        let resp = IppParser::new(&metadata).parse(writer.finish().unwrap());

        let group = resp.group("operation-attributes-tag").unwrap();
        let attrs = group
            .attributes()
            .iter()
            .filter(|a| a.name().contains("orientation"))
            .map(|a| (a.name(), a.value()))
            .collect::<Vec<_>>();
        assert_eq!(
            attrs,
            vec![
                ("orientation-requested", "portrait".to_owned()),
                ("x-vendor-orientation", "3".to_owned()),
                ("orientation-requested", "42".to_owned()),
            ]
        );
    }

    #[test]
    fn test_enum_without_attribute_name() {
        let metadata = metadata();
        let data = vec![
            0x01, 0x01, 0x00, 0x00, 0x00, 0x00, 0x00, 0x01, 0x04, 0x23, 0x00, 0x00, 0x00, 0x04, 0x00, 0x00, 0x00, 0x03,
            0x44, 0x00, 0x00, 0x00, 0x01, b'x', 0x03,
        ];
        let resp = IppParser::new(&metadata).parse(data);
        let group = resp.group("printer-attributes-tag").unwrap();
        let attr = group.attribute(IppAttribute::NO_NAME).unwrap();
        assert_eq!(values(attr), vec!["3", "x"]);
        assert_eq!(group.attributes().len(), 1);
    }

    #[test]
    fn test_round_trip_all_types() {
        let metadata = metadata();
        let mut writer = encoder().begin(Operation::CreateJob);
        writer
            .put_uri(IppAttribute::PRINTER_URI, "ipp://localhost:631/printers/a")
            .put_uri_scheme("uri-scheme", "ipps")
            .put_integer(IppAttribute::COPIES, -7)
            .put_boolean("last-document", true)
            .put_boolean("ipp-attribute-fidelity", false)
            .put_keyword("sides", "two-sided-long-edge")
            .put_name_without_language(IppAttribute::JOB_NAME, "report")
            .put_text_without_language("job-message", "hello")
            .put_mime_media_type(IppAttribute::DOCUMENT_FORMAT, "application/pdf")
            .put_natural_language("document-natural-language", "fr")
            .put_charset("document-charset", "utf-16")
            .put_enum(IppAttribute::PRINT_QUALITY, 5)
            .put_resolution(IppAttribute::PRINTER_RESOLUTION, 600, 300, 3)
            .put_range_of_integer(IppAttribute::PAGE_RANGES, 2, 4)
            .put_empty(ValueTag::NoValue, "job-hold-until")
            .put_value("job-description", &IppValue::OctetString("raw".to_owned()))
            .put_value(
                "printer-current-time",
                &IppValue::DateTime {
                    year: 2020,
                    month: 2,
                    day: 13,
                    hour: 12,
                    minutes: 34,
                    seconds: 22,
                    deci_seconds: 1,
                    utc_dir: '+',
                    utc_hours: 1,
                    utc_mins: 30,
                },
            )
            .put_value(
                "printer-location",
                &IppValue::TextWithLanguage {
                    language: "de".to_owned(),
                    text: "Keller".to_owned(),
                },
            );
        let resp = IppParser::new(&metadata).parse(writer.finish().unwrap());

        assert_eq!(resp.status_code(), StatusCode::UnknownStatusCode);
        let group = resp.group("operation-attributes-tag").unwrap();
        let check = |name: &str, expected: &[&str], tag_name: &str| {
            let attr = group.attribute(name).unwrap();
            assert_eq!(values(attr), expected, "{name}");
            assert!(attr.values().iter().all(|v| v.tag_name() == tag_name), "{name}");
        };

        check(IppAttribute::ATTRIBUTES_CHARSET, &["utf-8"], "charset");
        check(IppAttribute::ATTRIBUTES_NATURAL_LANGUAGE, &["en-us"], "naturalLanguage");
        check(IppAttribute::PRINTER_URI, &["ipp://localhost:631/printers/a"], "uri");
        check("uri-scheme", &["ipps"], "uriScheme");
        check(IppAttribute::COPIES, &["-7"], "integer");
        check("last-document", &["true"], "boolean");
        check("ipp-attribute-fidelity", &["false"], "boolean");
        check("sides", &["two-sided-long-edge"], "keyword");
        check(IppAttribute::JOB_NAME, &["report"], "nameWithoutLanguage");
        check("job-message", &["hello"], "textWithoutLanguage");
        check(IppAttribute::DOCUMENT_FORMAT, &["application/pdf"], "mimeMediaType");
        check("document-natural-language", &["fr"], "naturalLanguage");
        check("document-charset", &["utf-16"], "charset");
        check(IppAttribute::PRINT_QUALITY, &["high"], "enum");
        check(IppAttribute::PRINTER_RESOLUTION, &["600,300,3"], "resolution");
        check(IppAttribute::PAGE_RANGES, &["2,4"], "rangeOfInteger");
        check("job-hold-until", &[], "no-value");
        check("job-description", &["raw"], "octetString");
        check("printer-current-time", &["2020-02-13T12:34:22.100+01:30"], "dateTime");
        check("printer-location", &["de", "Keller"], "textWithLanguage");
    }

    #[test]
    fn test_set_of_range_of_integer() {
        let metadata = metadata();
        let mut writer = encoder().begin(Operation::PrintJob);
        writer.put_job_attributes(["page-ranges:setOfRangeOfInteger:10-20,30-30,40"]);
        let resp = IppParser::new(&metadata).parse(writer.finish().unwrap());

        let group = resp.group("job-attributes-tag").unwrap();
        assert_eq!(group.attributes().len(), 1);
        let attr = group.attribute(IppAttribute::PAGE_RANGES).unwrap();
        assert_eq!(values(attr), vec!["10,20", "30,30", "40,40"]);
        assert_eq!(attr.value(), "10,20,30,30,40,40");
    }

    #[test]
    fn test_group_closure() {
        let metadata = metadata();
        let mut writer = encoder().begin(Operation::PrintJob);
        writer
            .put_job_attributes_str("copies:integer:2#sides:keyword:one-sided")
            .put_group(DelimiterTag::PrinterAttributes)
            .put_keyword("printer-state-reasons", "none");
        let data = writer.finish().unwrap();

        let resp = IppParser::new(&metadata).parse(data.clone());
        let names = resp.groups().iter().map(|g| g.tag_name()).collect::<Vec<_>>();
        assert_eq!(
            names,
            vec!["operation-attributes-tag", "job-attributes-tag", "printer-attributes-tag"]
        );
        assert_eq!(resp.group("job-attributes-tag").unwrap().attributes().len(), 2);

        // without the end tag the last group is still closed
        let resp = IppParser::new(&metadata).parse(data.slice(..data.len() - 1));
        assert_eq!(resp.groups().len(), 3);
        let printer = resp.groups_of(DelimiterTag::PrinterAttributes).next().unwrap();
        assert_eq!(printer.attribute("printer-state-reasons").unwrap().value(), "none");
    }

    #[test]
    fn test_truncation_at_every_offset() {
        let metadata = metadata();
        let parser = IppParser::new(&metadata);
        let mut writer = encoder().begin(Operation::PrintJob);
        writer
            .put_uri(IppAttribute::PRINTER_URI, "ipp://host/printers/p")
            .put_keyword(IppAttribute::REQUESTED_ATTRIBUTES, "a")
            .put_keyword("", "b")
            .put_value(
                "printer-location",
                &IppValue::NameWithLanguage {
                    language: "en".to_owned(),
                    name: "lab".to_owned(),
                },
            )
            .put_job_attributes_str("page-ranges:setOfRangeOfInteger:1-2,5#copies:integer:3");
        let data = writer.finish().unwrap();
        let full = parser.parse(data.clone());

        for n in 0..data.len() {
            let resp = parser.parse(data.slice(..n));
            assert!(resp.groups().len() <= full.groups().len());
            if n < 8 {
                assert!(resp.ipp_status_line().is_none());
            }
            for (group, full_group) in resp.groups().iter().zip(full.groups()) {
                assert_eq!(group.tag(), full_group.tag());
                for (attr, full_attr) in group.attributes().iter().zip(full_group.attributes()) {
                    assert_eq!(attr.name(), full_attr.name());
                    assert!(full_attr.values().starts_with(attr.values()), "offset {n}");
                }
            }
        }
    }

    #[test]
    fn test_collections_end_the_data() {
        let metadata = metadata();
        let mut data = charset_message();
        data.pop();
        data.extend_from_slice(&[0x34, 0x00, 0x09]);
        data.extend_from_slice(b"media-col");
        data.extend_from_slice(&[0x00, 0x00, 0x4a, 0x00, 0x00, 0x00, 0x00, 0x37, 0x00, 0x00, 0x00, 0x00, 0x03]);

        let resp = IppParser::new(&metadata).parse(data);
        assert_eq!(resp.groups().len(), 1);
        assert_eq!(resp.groups()[0].attributes().len(), 1);
    }

    #[test]
    fn test_values_outside_group_are_dropped() {
        let metadata = metadata();
        let mut data = vec![
            0x01, 0x01, 0x00, 0x00, 0x00, 0x00, 0x00, 0x01, 0x21, 0x00, 0x01, b'n', 0x00, 0x04, 0, 0, 0, 1,
        ];
        data.extend_from_slice(&charset_message()[8..]);

        let resp = IppParser::new(&metadata).parse(data);
        assert_eq!(resp.groups().len(), 1);
        assert!(resp.groups()[0].attribute("n").is_none());
        assert!(resp.groups()[0].attribute(IppAttribute::ATTRIBUTES_CHARSET).is_some());
    }

    #[test]
    fn test_unknown_tag_name() {
        let mut metadata_source = crate::builtin::source();
        metadata_source.tags.retain(|t| t.value != "0x04");
        let metadata = Metadata::from_source(metadata_source).unwrap();

        let data = vec![0x01, 0x01, 0x00, 0x00, 0x00, 0x00, 0x00, 0x01, 0x04, 0x03];
        let resp = IppParser::new(&metadata).parse(data);
        assert_eq!(resp.groups()[0].tag_name(), "no name found for tag:0x04");
    }

    #[test]
    fn test_parse_http() {
        let metadata = metadata();
        let mut data = b"HTTP/1.1 200 OK\r\nContent-Type: application/ipp\r\n\r\n".to_vec();
        data.extend_from_slice(&charset_message());

        let resp = IppParser::new(&metadata).parse_http(data);
        assert_eq!(
            resp.http_status_line(),
            Some("HTTP/1.1 200 OK\r\nContent-Type: application/ipp\r\n\r\n")
        );
        assert_eq!(resp.http_status_code(), Some(http::StatusCode::OK));
        assert_eq!(resp.status_code(), StatusCode::SuccessfulOkConflictingAttributes);
        assert!(resp.has_group("operation-attributes-tag"));
    }

    #[test]
    fn test_parse_http_truncated_header() {
        let metadata = metadata();
        let resp = IppParser::new(&metadata).parse_http(Bytes::from_static(b"HTTP/1.1 200 OK\r\nContent-Len"));
        assert_eq!(resp.http_status_line(), Some("HTTP/1.1 200 OK\r\nContent-Len"));
        assert_eq!(resp.ipp_status_line(), None);
        assert!(resp.groups().is_empty());
    }

    #[test]
    fn test_error_text_body() {
        let metadata = metadata();
        let parser = IppParser::new(&metadata);

        let resp = parser.parse_http(Bytes::from_static(b"HTTP/1.1 401 Unauthorized\r\n\r\n<html>401 Unauthorized</html>"));
        assert_eq!(resp.ipp_status_line(), Some("client-error-not-authorized (0x403)"));
        assert_eq!(resp.status_code(), StatusCode::ClientErrorNotAuthorized);
        assert!(resp.groups().is_empty());
        assert!(resp.header().is_none());

        let resp = parser.parse(Bytes::from_static(b"Service Temporarily Unavailable"));
        assert_eq!(resp.ipp_status_line(), Some("unknown"));
        assert!(resp.groups().is_empty());
    }

    #[test]
    fn test_empty_and_short_input() {
        let metadata = metadata();
        let parser = IppParser::new(&metadata);

        let resp = parser.parse(Bytes::new());
        assert!(resp.ipp_status_line().is_none());
        assert!(resp.groups().is_empty());

        let resp = parser.parse(vec![0x01u8, 0x01, 0x00]);
        assert!(resp.ipp_status_line().is_none());
        assert!(resp.header().is_none());
    }

    #[test]
    fn test_parse_stream() {
        let metadata = metadata();
        let mut data = b"HTTP/1.1 200 OK\r\n\r\n".to_vec();
        data.extend_from_slice(&charset_message());

        let resp = IppParser::new(&metadata).parse_stream(io::Cursor::new(data)).unwrap();
        assert_eq!(resp.header().unwrap().request_id, 7);
        assert!(resp.has_group("operation-attributes-tag"));
    }

    #[test]
    fn test_parse_stream_without_http_header() {
        let metadata = metadata();
        let parser = IppParser::new(&metadata);

        let resp = parser.parse_stream(io::Cursor::new(charset_message())).unwrap();
        assert_eq!(resp.http_status_line(), None);
        assert_eq!(resp.header().unwrap().request_id, 7);
        let group = resp.group("operation-attributes-tag").unwrap();
        assert_eq!(group.attribute(IppAttribute::ATTRIBUTES_CHARSET).unwrap().value(), "utf-8");

        let resp = parser.parse_http(charset_message());
        assert_eq!(resp.http_status_line(), None);
        assert_eq!(resp.status_code(), StatusCode::SuccessfulOkConflictingAttributes);
    }

    #[test]
    fn test_parse_stream_split_reads() {
        let metadata = metadata();
        let parser = IppParser::new(&metadata);
        let http = b"HTTP/1.1 200 OK\r\n\r\n";
        let mut data = http.to_vec();
        data.extend_from_slice(&charset_message());

        // 18 splits the CRLF CRLF terminator, 22 splits the IPP header
        for step in [1, 18, 22] {
            let resp = parser.parse_stream(Trickle::new(data.clone(), step)).unwrap();
            assert_eq!(resp.http_status_line(), Some("HTTP/1.1 200 OK\r\n\r\n"), "step {step}");
            assert_eq!(resp.header().unwrap().request_id, 7, "step {step}");
            let group = resp.group("operation-attributes-tag").unwrap();
            assert_eq!(group.attribute(IppAttribute::ATTRIBUTES_CHARSET).unwrap().value(), "utf-8");
        }
    }

    #[test]
    fn test_all_delimiter_groups() {
        let metadata = metadata();
        let mut writer = encoder().begin(Operation::GetNotifications);
        writer
            .put_group(DelimiterTag::Reserved)
            .put_keyword("x-reserved", "r")
            .put_group(DelimiterTag::UnsupportedAttributes)
            .put_keyword("sides", "unsupported")
            .put_group(DelimiterTag::SubscriptionAttributes)
            .put_integer("notify-subscription-id", 12)
            .put_group(DelimiterTag::EventNotificationAttributes)
            .put_keyword("notify-subscribed-event", "job-completed");
        let resp = IppParser::new(&metadata).parse(writer.finish().unwrap());

        let groups = resp
            .groups()
            .iter()
            .map(|g| (g.tag(), g.tag_name(), g.attributes().len()))
            .collect::<Vec<_>>();
        assert_eq!(
            groups,
            vec![
                (0x01, "operation-attributes-tag", 2),
                (0x00, "reserved", 1),
                (0x05, "unsupported-attributes-tag", 1),
                (0x06, "subscription-attributes-tag", 1),
                (0x07, "event-notification-attributes-tag", 1),
            ]
        );
        let subscription = resp.group("subscription-attributes-tag").unwrap();
        assert_eq!(subscription.attribute("notify-subscription-id").unwrap().value(), "12");
        assert_eq!(subscription.description(), Some("subscription attributes group"));
    }

    #[cfg(feature = "async")]
    #[tokio::test]
    async fn test_parse_stream_async() {
        let metadata = metadata();
        let mut data = b"HTTP/1.1 200 OK\r\n\r\n".to_vec();
        data.extend_from_slice(&charset_message());

        let resp = IppParser::new(&metadata)
            .parse_stream_async(futures_util::io::Cursor::new(data))
            .await
            .unwrap();
        assert_eq!(resp.http_status_code(), Some(http::StatusCode::OK));
        let group = resp.group("operation-attributes-tag").unwrap();
        assert_eq!(group.attribute(IppAttribute::ATTRIBUTES_CHARSET).unwrap().value(), "utf-8");
    }
}
