//!
//! Base IPP definitions and tags
//!

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use enum_as_inner::EnumAsInner;
use enum_primitive_derive::Primitive;
use num_traits::FromPrimitive;

/// IPP protocol version
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct IppVersion(pub u16);

impl IppVersion {
    pub const fn v1_0() -> Self {
        IppVersion(0x0100)
    }
    pub const fn v1_1() -> Self {
        IppVersion(0x0101)
    }
    pub const fn v2_0() -> Self {
        IppVersion(0x0200)
    }

    /// Major version byte
    pub const fn major(&self) -> u8 {
        (self.0 >> 8) as u8
    }

    /// Minor version byte
    pub const fn minor(&self) -> u8 {
        (self.0 & 0xff) as u8
    }
}

/// IPP operation constants
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Primitive, Debug, Copy, Clone, Eq, PartialEq)]
#[allow(clippy::upper_case_acronyms)]
pub enum Operation {
    PrintJob = 0x0002,
    PrintUri = 0x0003,
    ValidateJob = 0x0004,
    CreateJob = 0x0005,
    SendDocument = 0x0006,
    SendUri = 0x0007,
    CancelJob = 0x0008,
    GetJobAttributes = 0x0009,
    GetJobs = 0x000A,
    GetPrinterAttributes = 0x000B,
    HoldJob = 0x000C,
    ReleaseJob = 0x000D,
    RestartJob = 0x000E,
    PausePrinter = 0x0010,
    ResumePrinter = 0x0011,
    PurgeJobs = 0x0012,
    SetPrinterAttributes = 0x0013,
    SetJobAttributes = 0x0014,
    CreatePrinterSubscription = 0x0016,
    CreateJobSubscription = 0x0017,
    GetSubscriptionAttributes = 0x0018,
    GetSubscriptions = 0x0019,
    RenewSubscription = 0x001A,
    CancelSubscription = 0x001B,
    GetNotifications = 0x001C,
    EnablePrinter = 0x0022,
    DisablePrinter = 0x0023,
    HoldNewJobs = 0x0025,
    ReleaseHeldNewJobs = 0x0026,
    CancelJobs = 0x0038,
    CancelMyJobs = 0x0039,
    CloseJob = 0x003B,

    CupsGetDefault = 0x4001,
    CupsGetPrinters = 0x4002,
    CupsAddModifyPrinter = 0x4003,
    CupsDeletePrinter = 0x4004,
    CupsGetClasses = 0x4005,
    CupsAddModifyClass = 0x4006,
    CupsDeleteClass = 0x4007,
    CupsAcceptJobs = 0x4008,
    CupsRejectJobs = 0x4009,
    CupsSetDefault = 0x400A,
    CupsGetDevices = 0x400B,
    CupsGetPPDs = 0x400C,
    CupsMoveJob = 0x400D,
    CupsAuthenticateJob = 0x400E,
    CupsGetPPD = 0x400F,
    CupsGetDocument = 0x4027,
    CupsCreateLocalPrinter = 0x4028,
}

/// group delimiter tags
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Primitive, Debug, Copy, Clone, PartialEq, Hash, Eq)]
pub enum DelimiterTag {
    Reserved = 0x00,
    OperationAttributes = 0x01,
    JobAttributes = 0x02,
    EndOfAttributes = 0x03,
    PrinterAttributes = 0x04,
    UnsupportedAttributes = 0x05,
    SubscriptionAttributes = 0x06,
    EventNotificationAttributes = 0x07,
}

/// IPP value tags
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Primitive, Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum ValueTag {
    Unsupported = 0x10,
    Unknown = 0x12,
    NoValue = 0x13,
    Integer = 0x21,
    Boolean = 0x22,
    Enum = 0x23,
    OctetStringUnspecified = 0x30,
    DateTime = 0x31,
    Resolution = 0x32,
    RangeOfInteger = 0x33,
    BegCollection = 0x34,
    TextWithLanguage = 0x35,
    NameWithLanguage = 0x36,
    EndCollection = 0x37,
    TextWithoutLanguage = 0x41,
    NameWithoutLanguage = 0x42,
    Keyword = 0x44,
    Uri = 0x45,
    UriScheme = 0x46,
    Charset = 0x47,
    NaturalLanguage = 0x48,
    MimeMediaType = 0x49,
    MemberAttrName = 0x4a,
}

/// Decode rule for a value tag, shared by the parser and the value layer
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum ValueKind {
    NoValue,
    Integer,
    Boolean,
    Enum,
    DateTime,
    Resolution,
    RangeOfInteger,
    WithLanguage,
    Text,
}

impl ValueTag {
    /// Return the decode rule for this tag or `None` when the tag carries no structured data
    /// the codec understands (collections and out-of-band markers other than no-value).
    pub fn kind(&self) -> Option<ValueKind> {
        let kind = match self {
            ValueTag::NoValue => ValueKind::NoValue,
            ValueTag::Integer => ValueKind::Integer,
            ValueTag::Boolean => ValueKind::Boolean,
            ValueTag::Enum => ValueKind::Enum,
            ValueTag::DateTime => ValueKind::DateTime,
            ValueTag::Resolution => ValueKind::Resolution,
            ValueTag::RangeOfInteger => ValueKind::RangeOfInteger,
            ValueTag::TextWithLanguage | ValueTag::NameWithLanguage => ValueKind::WithLanguage,
            ValueTag::OctetStringUnspecified
            | ValueTag::TextWithoutLanguage
            | ValueTag::NameWithoutLanguage
            | ValueTag::Keyword
            | ValueTag::Uri
            | ValueTag::UriScheme
            | ValueTag::Charset
            | ValueTag::NaturalLanguage
            | ValueTag::MimeMediaType => ValueKind::Text,
            ValueTag::Unsupported
            | ValueTag::Unknown
            | ValueTag::BegCollection
            | ValueTag::EndCollection
            | ValueTag::MemberAttrName => return None,
        };
        Some(kind)
    }
}

/// Any tag byte which may start an element in the attribute section of a message
#[derive(Debug, Copy, Clone, Eq, PartialEq, EnumAsInner)]
pub enum IppTag {
    Delimiter(DelimiterTag),
    Value(ValueTag),
}

impl IppTag {
    /// Classify a raw tag byte, `None` for bytes outside both tag sets
    pub fn from_u8(tag: u8) -> Option<IppTag> {
        DelimiterTag::from_u8(tag)
            .map(IppTag::Delimiter)
            .or_else(|| ValueTag::from_u8(tag).map(IppTag::Value))
    }

    /// Raw tag byte
    pub fn to_u8(&self) -> u8 {
        match self {
            IppTag::Delimiter(tag) => *tag as u8,
            IppTag::Value(tag) => *tag as u8,
        }
    }
}

/// IPP status codes
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Primitive, Debug, Copy, Clone, Eq, PartialEq)]
pub enum StatusCode {
    SuccessfulOk = 0x0000,
    SuccessfulOkIgnoredOrSubstitutedAttributes = 0x0001,
    SuccessfulOkConflictingAttributes = 0x0002,
    ClientErrorBadRequest = 0x0400,
    ClientErrorForbidden = 0x0401,
    ClientErrorNotAuthenticated = 0x0402,
    ClientErrorNotAuthorized = 0x0403,
    ClientErrorNotPossible = 0x0404,
    ClientErrorTimeout = 0x0405,
    ClientErrorNotFound = 0x0406,
    ClientErrorGone = 0x0407,
    ClientErrorRequestEntityTooLong = 0x0408,
    ClientErrorRequestValueTooLong = 0x0409,
    ClientErrorDocumentFormatNotSupported = 0x040A,
    ClientErrorAttributesOrValuesNotSupported = 0x040B,
    ClientErrorUriSchemeNotSupported = 0x040C,
    ClientErrorCharsetNotSupported = 0x040D,
    ClientErrorConflictingAttributes = 0x040E,
    ClientErrorCompressionNotSupported = 0x040F,
    ClientErrorCompressionError = 0x0410,
    ClientErrorDocumentFormatError = 0x0411,
    ClientErrorDocumentAccessError = 0x0412,
    ServerErrorInternalError = 0x0500,
    ServerErrorOperationNotSupported = 0x0501,
    ServerErrorServiceUnavailable = 0x0502,
    ServerErrorVersionNotSupported = 0x0503,
    ServerErrorDeviceError = 0x0504,
    ServerErrorTemporaryError = 0x0505,
    ServerErrorNotAcceptingJobs = 0x0506,
    ServerErrorBusy = 0x0507,
    ServerErrorJobCanceled = 0x0508,
    ServerErrorMultipleDocumentJobsNotSupported = 0x0509,
    UnknownStatusCode = 0xffff,
}

impl StatusCode {
    /// Codes of the successful class, 0x0000 to 0x00ff
    pub fn is_success(&self) -> bool {
        (*self as u16) <= 0x00ff
    }
}
