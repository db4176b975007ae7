//!
//! IPP codec errors
//!
use std::{io, num::ParseIntError};

/// IPP error
#[derive(Debug, thiserror::Error)]
pub enum IppError {
    #[error(transparent)]
    /// Network or file I/O error while collecting a response
    IoError(#[from] io::Error),

    #[error(transparent)]
    /// Metadata could not be loaded
    MetadataError(#[from] MetadataError),

    #[error(transparent)]
    /// Job attribute block could not be parsed
    JobAttributeError(#[from] JobAttributeError),

    #[error("Field of {len} bytes does not fit into a 16-bit length")]
    /// Name or value too long for the wire format
    FieldTooLong { len: usize },
}

/// Metadata loading error, fatal at startup
#[derive(Debug, thiserror::Error)]
pub enum MetadataError {
    #[error("Invalid tag value: {0}")]
    InvalidTagValue(String),

    #[error("Invalid enum value {value} for attribute {attribute}")]
    InvalidEnumValue {
        attribute: String,
        value: String,
        #[source]
        source: ParseIntError,
    },

    #[error("Empty name in metadata record")]
    EmptyName,

    #[error(transparent)]
    #[cfg(feature = "serde")]
    /// Malformed JSON source
    JsonError(#[from] serde_json::Error),
}

/// Job attribute mini-language error
#[derive(Debug, thiserror::Error)]
pub enum JobAttributeError {
    #[error("Expected 3 fields in attribute block, got {0}")]
    FieldCount(usize),

    #[error("Unknown attribute type: {0}")]
    UnknownType(String),

    #[error("Invalid number {value}")]
    InvalidNumber {
        value: String,
        #[source]
        source: ParseIntError,
    },

    #[error("Invalid range: {0}")]
    InvalidRange(String),

    #[error("Invalid resolution: {0}")]
    InvalidResolution(String),
}
