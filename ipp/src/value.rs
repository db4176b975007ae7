//!
//! IPP value
//!
use std::fmt;

use bytes::{Buf, BufMut, Bytes, BytesMut};
use chrono::{FixedOffset, NaiveDate, SecondsFormat, TimeZone};
use enum_as_inner::EnumAsInner;
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use num_traits::FromPrimitive;

use crate::model::{ValueKind, ValueTag};

const DATE_TIME_LEN: usize = 11;

/// IPP attribute values as defined in [RFC 8010](https://tools.ietf.org/html/rfc8010)
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Clone, Debug, PartialEq, EnumAsInner)]
pub enum IppValue {
    Integer(i32),
    Enum(i32),
    Boolean(bool),
    OctetString(String),
    TextWithoutLanguage(String),
    NameWithoutLanguage(String),
    Keyword(String),
    Uri(String),
    UriScheme(String),
    Charset(String),
    NaturalLanguage(String),
    MimeMediaType(String),
    TextWithLanguage {
        language: String,
        text: String,
    },
    NameWithLanguage {
        language: String,
        name: String,
    },
    RangeOfInteger {
        min: i32,
        max: i32,
    },
    Resolution {
        cross_feed: i32,
        feed: i32,
        units: i8,
    },
    DateTime {
        year: u16,
        month: u8,
        day: u8,
        hour: u8,
        minutes: u8,
        seconds: u8,
        deci_seconds: u8,
        utc_dir: char,
        utc_hours: u8,
        utc_mins: u8,
    },
    NoValue,
    Other {
        tag: u8,
        data: Bytes,
    },
}

fn lossy(data: &[u8]) -> String {
    String::from_utf8_lossy(data).into_owned()
}

// [len; bytes] element nested inside a with-language value
fn take_inner(data: &mut Bytes) -> Option<String> {
    if data.remaining() < 2 {
        return None;
    }
    let len = data.get_u16() as usize;
    if data.remaining() < len {
        return None;
    }
    Some(lossy(&data.split_to(len)))
}

impl IppValue {
    /// Convert to binary tag
    pub fn to_tag(&self) -> u8 {
        match *self {
            IppValue::Integer(_) => ValueTag::Integer as u8,
            IppValue::Enum(_) => ValueTag::Enum as u8,
            IppValue::Boolean(_) => ValueTag::Boolean as u8,
            IppValue::OctetString(_) => ValueTag::OctetStringUnspecified as u8,
            IppValue::TextWithoutLanguage(_) => ValueTag::TextWithoutLanguage as u8,
            IppValue::NameWithoutLanguage(_) => ValueTag::NameWithoutLanguage as u8,
            IppValue::Keyword(_) => ValueTag::Keyword as u8,
            IppValue::Uri(_) => ValueTag::Uri as u8,
            IppValue::UriScheme(_) => ValueTag::UriScheme as u8,
            IppValue::Charset(_) => ValueTag::Charset as u8,
            IppValue::NaturalLanguage(_) => ValueTag::NaturalLanguage as u8,
            IppValue::MimeMediaType(_) => ValueTag::MimeMediaType as u8,
            IppValue::TextWithLanguage { .. } => ValueTag::TextWithLanguage as u8,
            IppValue::NameWithLanguage { .. } => ValueTag::NameWithLanguage as u8,
            IppValue::RangeOfInteger { .. } => ValueTag::RangeOfInteger as u8,
            IppValue::Resolution { .. } => ValueTag::Resolution as u8,
            IppValue::DateTime { .. } => ValueTag::DateTime as u8,
            IppValue::NoValue => ValueTag::NoValue as u8,
            IppValue::Other { tag, .. } => tag,
        }
    }

    /// Parse value from the value field (without the length prefix).
    ///
    /// Returns `None` when the field is too short for the fixed-width layout of the tag.
    pub fn parse(value_tag: u8, mut data: Bytes) -> Option<IppValue> {
        let tag = match ValueTag::from_u8(value_tag) {
            Some(tag) => tag,
            None => return Some(IppValue::Other { tag: value_tag, data }),
        };
        let kind = match tag.kind() {
            Some(kind) => kind,
            None => return Some(IppValue::Other { tag: value_tag, data }),
        };

        let value = match kind {
            ValueKind::NoValue => IppValue::NoValue,
            ValueKind::Integer | ValueKind::Enum => {
                if data.remaining() < 4 {
                    return None;
                }
                let v = data.get_i32();
                if kind == ValueKind::Enum {
                    IppValue::Enum(v)
                } else {
                    IppValue::Integer(v)
                }
            }
            ValueKind::Boolean => {
                if data.remaining() < 1 {
                    return None;
                }
                IppValue::Boolean(data.get_u8() != 0)
            }
            ValueKind::RangeOfInteger => {
                if data.remaining() < 8 {
                    return None;
                }
                IppValue::RangeOfInteger {
                    min: data.get_i32(),
                    max: data.get_i32(),
                }
            }
            ValueKind::Resolution => {
                if data.remaining() < 9 {
                    return None;
                }
                IppValue::Resolution {
                    cross_feed: data.get_i32(),
                    feed: data.get_i32(),
                    units: data.get_i8(),
                }
            }
            ValueKind::DateTime => {
                if data.remaining() < DATE_TIME_LEN {
                    return None;
                }
                IppValue::DateTime {
                    year: data.get_u16(),
                    month: data.get_u8(),
                    day: data.get_u8(),
                    hour: data.get_u8(),
                    minutes: data.get_u8(),
                    seconds: data.get_u8(),
                    deci_seconds: data.get_u8(),
                    utc_dir: data.get_u8() as char,
                    utc_hours: data.get_u8(),
                    utc_mins: data.get_u8(),
                }
            }
            ValueKind::WithLanguage => {
                let language = take_inner(&mut data)?;
                let text = take_inner(&mut data)?;
                if tag == ValueTag::NameWithLanguage {
                    IppValue::NameWithLanguage { language, name: text }
                } else {
                    IppValue::TextWithLanguage { language, text }
                }
            }
            ValueKind::Text => {
                let s = lossy(&data);
                match tag {
                    ValueTag::TextWithoutLanguage => IppValue::TextWithoutLanguage(s),
                    ValueTag::NameWithoutLanguage => IppValue::NameWithoutLanguage(s),
                    ValueTag::Keyword => IppValue::Keyword(s),
                    ValueTag::Uri => IppValue::Uri(s),
                    ValueTag::UriScheme => IppValue::UriScheme(s),
                    ValueTag::Charset => IppValue::Charset(s),
                    ValueTag::NaturalLanguage => IppValue::NaturalLanguage(s),
                    ValueTag::MimeMediaType => IppValue::MimeMediaType(s),
                    _ => IppValue::OctetString(s),
                }
            }
        };
        Some(value)
    }

    /// Write the value field, excluding the value length and the value tag
    pub fn value_bytes(&self) -> Bytes {
        let mut buffer = BytesMut::new();

        match *self {
            IppValue::Integer(i) | IppValue::Enum(i) => buffer.put_i32(i),
            IppValue::Boolean(b) => buffer.put_u8(b as u8),
            IppValue::RangeOfInteger { min, max } => {
                buffer.put_i32(min);
                buffer.put_i32(max);
            }
            IppValue::Resolution {
                cross_feed,
                feed,
                units,
            } => {
                buffer.put_i32(cross_feed);
                buffer.put_i32(feed);
                buffer.put_i8(units);
            }
            IppValue::Keyword(ref s)
            | IppValue::OctetString(ref s)
            | IppValue::TextWithoutLanguage(ref s)
            | IppValue::NameWithoutLanguage(ref s)
            | IppValue::Charset(ref s)
            | IppValue::NaturalLanguage(ref s)
            | IppValue::Uri(ref s)
            | IppValue::UriScheme(ref s)
            | IppValue::MimeMediaType(ref s) => buffer.put_slice(s.as_bytes()),
            IppValue::TextWithLanguage {
                ref language,
                text: ref s,
            }
            | IppValue::NameWithLanguage {
                ref language,
                name: ref s,
            } => {
                buffer.put_u16(language.len() as u16);
                buffer.put_slice(language.as_bytes());
                buffer.put_u16(s.len() as u16);
                buffer.put_slice(s.as_bytes());
            }
            IppValue::DateTime {
                year,
                month,
                day,
                hour,
                minutes,
                seconds,
                deci_seconds,
                utc_dir,
                utc_hours,
                utc_mins,
            } => {
                buffer.put_u16(year);
                buffer.put_u8(month);
                buffer.put_u8(day);
                buffer.put_u8(hour);
                buffer.put_u8(minutes);
                buffer.put_u8(seconds);
                buffer.put_u8(deci_seconds);
                buffer.put_u8(utc_dir as u8);
                buffer.put_u8(utc_hours);
                buffer.put_u8(utc_mins);
            }
            IppValue::NoValue => {}
            IppValue::Other { ref data, .. } => buffer.put_slice(data),
        }
        buffer.freeze()
    }
}

// RFC 3339 text, `None` when the fields do not form a valid date
#[allow(clippy::too_many_arguments)]
fn format_date_time(
    year: u16,
    month: u8,
    day: u8,
    hour: u8,
    minutes: u8,
    seconds: u8,
    deci_seconds: u8,
    utc_dir: char,
    utc_hours: u8,
    utc_mins: u8,
) -> Option<String> {
    let sign = if utc_dir == '-' { -1 } else { 1 };
    let offset = FixedOffset::east_opt(sign * (utc_hours as i32 * 3600 + utc_mins as i32 * 60))?;
    let local = NaiveDate::from_ymd_opt(year as i32, month as u32, day as u32)?.and_hms_milli_opt(
        hour as u32,
        minutes as u32,
        seconds as u32,
        deci_seconds as u32 * 100,
    )?;
    offset
        .from_local_datetime(&local)
        .single()
        .map(|dt| dt.to_rfc3339_opts(SecondsFormat::Millis, false))
}

fn write_hex(f: &mut fmt::Formatter, data: &[u8]) -> fmt::Result {
    for b in data {
        write!(f, "{:02x}", b)?;
    }
    Ok(())
}

/// Canonical text form used in the decoded attribute tree
impl fmt::Display for IppValue {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match *self {
            IppValue::Integer(i) | IppValue::Enum(i) => write!(f, "{}", i),
            IppValue::Boolean(b) => write!(f, "{}", if b { "true" } else { "false" }),
            IppValue::RangeOfInteger { min, max } => write!(f, "{},{}", min, max),
            IppValue::Resolution {
                cross_feed,
                feed,
                units,
            } => write!(f, "{},{},{}", cross_feed, feed, units),
            IppValue::Keyword(ref s)
            | IppValue::OctetString(ref s)
            | IppValue::TextWithoutLanguage(ref s)
            | IppValue::NameWithoutLanguage(ref s)
            | IppValue::Charset(ref s)
            | IppValue::NaturalLanguage(ref s)
            | IppValue::Uri(ref s)
            | IppValue::UriScheme(ref s)
            | IppValue::MimeMediaType(ref s) => write!(f, "{}", s),
            IppValue::TextWithLanguage {
                ref language,
                text: ref s,
            }
            | IppValue::NameWithLanguage {
                ref language,
                name: ref s,
            } => write!(f, "{},{}", language, s),
            IppValue::DateTime {
                year,
                month,
                day,
                hour,
                minutes,
                seconds,
                deci_seconds,
                utc_dir,
                utc_hours,
                utc_mins,
            } => match format_date_time(
                year,
                month,
                day,
                hour,
                minutes,
                seconds,
                deci_seconds,
                utc_dir,
                utc_hours,
                utc_mins,
            ) {
                Some(text) => f.write_str(&text),
                None => write_hex(f, &self.value_bytes()),
            },
            IppValue::NoValue => Ok(()),
            IppValue::Other { tag, ref data } => {
                write!(f, "{:#04x}:", tag)?;
                write_hex(f, data)
            }
        }
    }
}
