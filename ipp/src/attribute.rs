//!
//! Decoded attribute tree
//!
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::{
    model::{DelimiterTag, StatusCode},
    registry::TagRegistry,
    IppHeader,
};

macro_rules! define_attributes {
    ($($name:ident => $value:literal),* $(,)?) => {
        $(pub const $name: &'static str = $value;)*
    };
}

/// Single decoded value with the tag it arrived with
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Clone, Debug, PartialEq)]
pub struct IppAttributeValue {
    tag: u8,
    tag_name: String,
    value: String,
}

impl IppAttributeValue {
    /// Create a value, the tag name is always taken from the registry
    pub fn new<S>(tags: &TagRegistry, tag: u8, value: S) -> IppAttributeValue
    where
        S: Into<String>,
    {
        IppAttributeValue {
            tag,
            tag_name: tags.name_of(tag).into_owned(),
            value: value.into(),
        }
    }

    /// Wire tag
    pub fn tag(&self) -> u8 {
        self.tag
    }

    /// Registry name of the tag
    pub fn tag_name(&self) -> &str {
        &self.tag_name
    }

    /// Canonical text of the value
    pub fn value(&self) -> &str {
        &self.value
    }
}

/// `IppAttribute` represents a decoded IPP attribute with all of its values
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Clone, Debug, PartialEq)]
pub struct IppAttribute {
    name: String,
    description: Option<String>,
    values: Vec<IppAttributeValue>,
}

impl IppAttribute {
    define_attributes! {
        ATTRIBUTES_CHARSET => "attributes-charset",
        ATTRIBUTES_NATURAL_LANGUAGE => "attributes-natural-language",
        COPIES => "copies",
        DOCUMENT_FORMAT => "document-format",
        FINISHINGS => "finishings",
        JOB_ID => "job-id",
        JOB_NAME => "job-name",
        JOB_STATE => "job-state",
        JOB_URI => "job-uri",
        LAST_DOCUMENT => "last-document",
        OPERATIONS_SUPPORTED => "operations-supported",
        ORIENTATION_REQUESTED => "orientation-requested",
        PAGE_RANGES => "page-ranges",
        PRINTER_NAME => "printer-name",
        PRINTER_RESOLUTION => "printer-resolution",
        PRINTER_STATE => "printer-state",
        PRINTER_URI => "printer-uri",
        PRINT_QUALITY => "print-quality",
        REQUESTED_ATTRIBUTES => "requested-attributes",
        REQUESTING_USER_NAME => "requesting-user-name",
        STATUS_CODE => "status-code",
        STATUS_MESSAGE => "status-message",
    }

    /// Attribute name used when a value arrives without any attribute to attach to
    pub const NO_NAME: &'static str = "no attribute name given:";

    /// Create new attribute without values
    pub fn new<S>(name: S) -> IppAttribute
    where
        S: AsRef<str>,
    {
        IppAttribute {
            name: name.as_ref().to_owned(),
            description: None,
            values: Vec::new(),
        }
    }

    /// Attach a description
    pub fn with_description<S>(mut self, description: S) -> IppAttribute
    where
        S: AsRef<str>,
    {
        self.description = Some(description.as_ref().to_owned());
        self
    }

    pub(crate) fn push_value(&mut self, value: IppAttributeValue) {
        self.values.push(value);
    }

    /// Return attribute name
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    /// All values in encounter order
    pub fn values(&self) -> &[IppAttributeValue] {
        &self.values
    }

    /// All values joined with `,`
    pub fn value(&self) -> String {
        self.values.iter().map(|v| v.value()).collect::<Vec<_>>().join(",")
    }

    /// Text of the first value
    pub fn first_value(&self) -> Option<&str> {
        self.values.first().map(|v| v.value())
    }
}

/// Attribute group
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Clone, Debug, PartialEq)]
pub struct IppAttributeGroup {
    tag: u8,
    tag_name: String,
    description: Option<String>,
    attributes: Vec<IppAttribute>,
}

impl IppAttributeGroup {
    /// Create new attribute group of a given delimiter tag
    pub fn new(tags: &TagRegistry, tag: u8) -> IppAttributeGroup {
        IppAttributeGroup {
            tag,
            tag_name: tags.name_of(tag).into_owned(),
            description: tags.get(tag).and_then(|t| t.description()).map(ToOwned::to_owned),
            attributes: Vec::new(),
        }
    }

    pub(crate) fn push_attribute(&mut self, attribute: IppAttribute) {
        self.attributes.push(attribute);
    }

    /// Return group tag
    pub fn tag(&self) -> u8 {
        self.tag
    }

    /// Typed delimiter, `None` for tags outside the delimiter range
    pub fn delimiter(&self) -> Option<DelimiterTag> {
        num_traits::FromPrimitive::from_u8(self.tag)
    }

    pub fn tag_name(&self) -> &str {
        &self.tag_name
    }

    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    /// Return attributes in encounter order
    pub fn attributes(&self) -> &[IppAttribute] {
        &self.attributes
    }

    /// First attribute with a given name
    pub fn attribute(&self, name: &str) -> Option<&IppAttribute> {
        self.attributes.iter().find(|a| a.name() == name)
    }
}

/// Decoded IPP message
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Clone, Debug, Default)]
pub struct IppResponse {
    http_status_line: Option<String>,
    ipp_status_line: Option<String>,
    header: Option<IppHeader>,
    groups: Vec<IppAttributeGroup>,
}

impl IppResponse {
    pub(crate) fn new(
        http_status_line: Option<String>,
        ipp_status_line: Option<String>,
        header: Option<IppHeader>,
        groups: Vec<IppAttributeGroup>,
    ) -> IppResponse {
        IppResponse {
            http_status_line,
            ipp_status_line,
            header,
            groups,
        }
    }

    /// HTTP status line and headers as received, if the data was framed by HTTP
    pub fn http_status_line(&self) -> Option<&str> {
        self.http_status_line.as_deref()
    }

    /// Rendered IPP header or the classification of a plain-text error body
    pub fn ipp_status_line(&self) -> Option<&str> {
        self.ipp_status_line.as_deref()
    }

    /// Decoded numeric header
    pub fn header(&self) -> Option<&IppHeader> {
        self.header.as_ref()
    }

    /// Get all groups
    pub fn groups(&self) -> &[IppAttributeGroup] {
        &self.groups
    }

    /// Consume this response and return all attribute groups
    pub fn into_groups(self) -> Vec<IppAttributeGroup> {
        self.groups
    }

    /// First group with a given tag name, compared case-insensitively
    pub fn group(&self, tag_name: &str) -> Option<&IppAttributeGroup> {
        self.groups.iter().find(|g| g.tag_name().eq_ignore_ascii_case(tag_name))
    }

    pub fn has_group(&self, tag_name: &str) -> bool {
        self.group(tag_name).is_some()
    }

    /// Get a list of attribute groups matching a given delimiter tag
    pub fn groups_of(&self, tag: DelimiterTag) -> impl Iterator<Item = &IppAttributeGroup> {
        self.groups.iter().filter(move |g| g.tag == tag as u8)
    }

    /// IPP status code, derived from the text classification when the body was not IPP
    pub fn status_code(&self) -> StatusCode {
        match (&self.header, &self.ipp_status_line) {
            (Some(header), _) => header.status_code(),
            (None, Some(line)) if line.contains("client-error-not-authorized") => StatusCode::ClientErrorNotAuthorized,
            _ => StatusCode::UnknownStatusCode,
        }
    }

    /// The IPP header carries a status of the successful class
    pub fn is_success(&self) -> bool {
        self.status_code().is_success()
    }

    /// HTTP status code from the status line
    pub fn http_status_code(&self) -> Option<http::StatusCode> {
        let line = self.http_status_line.as_deref()?;
        let code = line.split_whitespace().nth(1)?;
        http::StatusCode::from_bytes(code.as_bytes()).ok()
    }

    /// The printer answered that the operation is not possible, which CUPS uses for stopped queues
    pub fn is_print_queue_unavailable(&self) -> bool {
        self.ipp_status_line
            .as_deref()
            .map_or(false, |line| line.contains("client-error-not-possible"))
    }
}
