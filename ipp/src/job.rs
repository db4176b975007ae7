//!
//! Job attributes mini-language
//!
//! A block has the form `name:type:value`, several blocks are joined with `#`:
//!
//! ```text
//! copies:integer:2#page-ranges:setOfRangeOfInteger:1-3,7#sides:keyword:two-sided-long-edge
//! ```
//!
use std::str::FromStr;

use crate::{error::JobAttributeError, value::IppValue};

/// Block separator
pub const BLOCK_SEPARATOR: char = '#';

const FIELD_SEPARATOR: char = ':';

/// Typed value of a job attribute block
#[derive(Clone, Debug, PartialEq)]
pub enum JobAttributeValue {
    Boolean(bool),
    Integer(i32),
    Enum(i32),
    RangeOfInteger { min: i32, max: i32 },
    SetOfRangeOfInteger(Vec<(i32, i32)>),
    Keyword(String),
    Name(String),
    Resolution { cross_feed: i32, feed: i32, units: i8 },
}

/// Parsed `name:type:value` block
#[derive(Clone, Debug, PartialEq)]
pub struct JobAttribute {
    name: String,
    value: JobAttributeValue,
}

fn parse_number<T: FromStr<Err = std::num::ParseIntError>>(value: &str) -> Result<T, JobAttributeError> {
    value.trim().parse().map_err(|source| JobAttributeError::InvalidNumber {
        value: value.to_owned(),
        source,
    })
}

fn parse_range(value: &str) -> Result<(i32, i32), JobAttributeError> {
    let (min, max) = value
        .split_once('-')
        .ok_or_else(|| JobAttributeError::InvalidRange(value.to_owned()))?;
    Ok((parse_number(min)?, parse_number(max)?))
}

// `n` alone is shorthand for `n-n`
fn parse_range_token(token: &str) -> Result<(i32, i32), JobAttributeError> {
    let token = token.trim();
    if token.contains('-') {
        parse_range(token)
    } else {
        let n = parse_number(token)?;
        Ok((n, n))
    }
}

impl JobAttribute {
    pub fn new<S>(name: S, value: JobAttributeValue) -> JobAttribute
    where
        S: AsRef<str>,
    {
        JobAttribute {
            name: name.as_ref().to_owned(),
            value,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn value(&self) -> &JobAttributeValue {
        &self.value
    }

    /// Wire values in write order, only the first one carries the attribute name
    pub fn to_values(&self) -> Vec<IppValue> {
        match self.value {
            JobAttributeValue::Boolean(b) => vec![IppValue::Boolean(b)],
            JobAttributeValue::Integer(i) => vec![IppValue::Integer(i)],
            JobAttributeValue::Enum(i) => vec![IppValue::Enum(i)],
            JobAttributeValue::RangeOfInteger { min, max } => vec![IppValue::RangeOfInteger { min, max }],
            JobAttributeValue::SetOfRangeOfInteger(ref ranges) => ranges
                .iter()
                .map(|&(min, max)| IppValue::RangeOfInteger { min, max })
                .collect(),
            JobAttributeValue::Keyword(ref s) => vec![IppValue::Keyword(s.clone())],
            JobAttributeValue::Name(ref s) => vec![IppValue::NameWithoutLanguage(s.clone())],
            JobAttributeValue::Resolution {
                cross_feed,
                feed,
                units,
            } => vec![IppValue::Resolution {
                cross_feed,
                feed,
                units,
            }],
        }
    }
}

impl FromStr for JobAttribute {
    type Err = JobAttributeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let fields = s.split(FIELD_SEPARATOR).collect::<Vec<_>>();
        let (name, kind, value) = match fields.as_slice() {
            [name, kind, value] => (*name, *kind, *value),
            _ => return Err(JobAttributeError::FieldCount(fields.len())),
        };

        let value = match kind {
            "boolean" => JobAttributeValue::Boolean(value == "true"),
            "integer" => JobAttributeValue::Integer(parse_number(value)?),
            "enum" => JobAttributeValue::Enum(parse_number(value)?),
            "rangeOfInteger" => {
                let (min, max) = parse_range(value)?;
                JobAttributeValue::RangeOfInteger { min, max }
            }
            "setOfRangeOfInteger" => JobAttributeValue::SetOfRangeOfInteger(
                value.split(',').map(parse_range_token).collect::<Result<_, _>>()?,
            ),
            "keyword" => JobAttributeValue::Keyword(value.to_owned()),
            "name" => JobAttributeValue::Name(value.to_owned()),
            "resolution" => match value.split(',').collect::<Vec<_>>().as_slice() {
                [cross_feed, feed, units] => JobAttributeValue::Resolution {
                    cross_feed: parse_number(cross_feed)?,
                    feed: parse_number(feed)?,
                    units: parse_number(units)?,
                },
                _ => return Err(JobAttributeError::InvalidResolution(value.to_owned())),
            },
            other => return Err(JobAttributeError::UnknownType(other.to_owned())),
        };

        Ok(JobAttribute::new(name, value))
    }
}

/// Split a `#`-joined string into blocks, skipping empty ones
pub fn split_blocks(s: &str) -> impl Iterator<Item = &str> {
    s.split(BLOCK_SEPARATOR).filter(|b| !b.is_empty())
}
