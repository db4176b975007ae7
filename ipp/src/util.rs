//!
//! Small helpers shared by the registries and the parser
//!
use std::num::ParseIntError;

/// Render a byte as the canonical registry key, e.g. `0x21`
pub fn to_hex_with_marker(value: u8) -> String {
    format!("0x{value:02x}")
}

/// Parse a number which may be written in hex (`0x` marker anywhere in the string) or decimal.
///
/// IANA registrations use both conventions, the marker check mirrors how registry files are written.
pub fn parse_hex_or_decimal(value: &str) -> Result<i32, ParseIntError> {
    let value = value.trim();
    if value.contains("0x") {
        i32::from_str_radix(&value.replace("0x", ""), 16)
    } else {
        value.parse::<i32>()
    }
}
