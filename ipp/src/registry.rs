//!
//! Tag and enum registries
//!
//! Both registries are built once from a [`MetadataSource`] and are read-only afterwards,
//! so a single [`Metadata`] instance can be shared between any number of encoders and parsers.
//!
use std::{borrow::Cow, collections::HashMap};

use log::debug;
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::{
    error::MetadataError,
    util::{parse_hex_or_decimal, to_hex_with_marker},
};

/// Tag record as found in the metadata source, the value is a hex string such as `0x21`
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Clone, Debug, PartialEq)]
pub struct TagRecord {
    pub value: String,
    pub name: String,
    #[cfg_attr(feature = "serde", serde(default))]
    pub description: Option<String>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub max: Option<u16>,
}

impl TagRecord {
    pub fn new<V, N>(value: V, name: N) -> TagRecord
    where
        V: AsRef<str>,
        N: AsRef<str>,
    {
        TagRecord {
            value: value.as_ref().to_owned(),
            name: name.as_ref().to_owned(),
            description: None,
            max: None,
        }
    }
}

/// Enum record, the value is either hex (`0x0400`) or decimal (`3`)
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Clone, Debug, PartialEq)]
pub struct EnumRecord {
    pub value: String,
    pub name: String,
    #[cfg_attr(feature = "serde", serde(default))]
    pub description: Option<String>,
}

impl EnumRecord {
    pub fn new<V, N>(value: V, name: N) -> EnumRecord
    where
        V: AsRef<str>,
        N: AsRef<str>,
    {
        EnumRecord {
            value: value.as_ref().to_owned(),
            name: name.as_ref().to_owned(),
            description: None,
        }
    }
}

/// Ordered enum records of one attribute
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Clone, Debug, PartialEq)]
pub struct AttributeEnumRecord {
    pub name: String,
    #[cfg_attr(feature = "serde", serde(default))]
    pub enums: Vec<EnumRecord>,
}

/// Unvalidated metadata as supplied by an external loader
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Clone, Debug, Default, PartialEq)]
pub struct MetadataSource {
    #[cfg_attr(feature = "serde", serde(default))]
    pub tags: Vec<TagRecord>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub attributes: Vec<AttributeEnumRecord>,
}

/// Registered tag
#[derive(Clone, Debug, PartialEq)]
pub struct Tag {
    value: u8,
    name: String,
    description: Option<String>,
    max_occurrences: Option<u16>,
}

impl Tag {
    /// Tag byte
    pub fn value(&self) -> u8 {
        self.value
    }

    /// Canonical tag name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Optional description
    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    /// Maximum number of occurrences, if the source defines one
    pub fn max_occurrences(&self) -> Option<u16> {
        self.max_occurrences
    }
}

/// Registered enum value of some attribute
#[derive(Clone, Debug, PartialEq)]
pub struct EnumEntry {
    value: i32,
    name: String,
    description: Option<String>,
}

impl EnumEntry {
    pub fn value(&self) -> i32 {
        self.value
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }
}

fn parse_tag_value(value: &str) -> Result<u8, MetadataError> {
    let hex = value.trim();
    let digits = hex
        .strip_prefix("0x")
        .or_else(|| hex.strip_prefix("0X"))
        .ok_or_else(|| MetadataError::InvalidTagValue(value.to_owned()))?;
    u8::from_str_radix(digits, 16).map_err(|_| MetadataError::InvalidTagValue(value.to_owned()))
}

/// Tag byte to name table
#[derive(Clone, Debug, Default)]
pub struct TagRegistry {
    tags: HashMap<u8, Tag>,
}

impl TagRegistry {
    /// Build the registry; the first record for a given tag byte wins
    pub fn from_records<I>(records: I) -> Result<TagRegistry, MetadataError>
    where
        I: IntoIterator<Item = TagRecord>,
    {
        let mut tags = HashMap::new();
        for record in records {
            if record.name.is_empty() {
                return Err(MetadataError::EmptyName);
            }
            let value = parse_tag_value(&record.value)?;
            tags.entry(value).or_insert(Tag {
                value,
                name: record.name,
                description: record.description,
                max_occurrences: record.max,
            });
        }
        Ok(TagRegistry { tags })
    }

    /// Get registered tag
    pub fn get(&self, tag: u8) -> Option<&Tag> {
        self.tags.get(&tag)
    }

    /// Get registered tag by its canonical hex key, e.g. `0x21`
    pub fn lookup(&self, key: &str) -> Option<&Tag> {
        parse_tag_value(key).ok().and_then(|tag| self.get(tag))
    }

    /// Tag name or a placeholder naming the unmatched tag
    pub fn name_of(&self, tag: u8) -> Cow<'_, str> {
        match self.get(tag) {
            Some(t) => Cow::Borrowed(t.name()),
            None => Cow::Owned(format!("no name found for tag:{}", to_hex_with_marker(tag))),
        }
    }

    pub fn len(&self) -> usize {
        self.tags.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tags.is_empty()
    }
}

/// Per-attribute ordered enum tables
#[derive(Clone, Debug, Default)]
pub struct EnumRegistry {
    attributes: HashMap<String, Vec<EnumEntry>>,
}

impl EnumRegistry {
    /// Build the registry; records of an attribute listed more than once are appended in order
    pub fn from_records<I>(records: I) -> Result<EnumRegistry, MetadataError>
    where
        I: IntoIterator<Item = AttributeEnumRecord>,
    {
        let mut attributes: HashMap<String, Vec<EnumEntry>> = HashMap::new();
        for record in records {
            if record.name.is_empty() {
                return Err(MetadataError::EmptyName);
            }
            let mut entries = Vec::with_capacity(record.enums.len());
            for e in record.enums {
                let value = parse_hex_or_decimal(&e.value).map_err(|source| MetadataError::InvalidEnumValue {
                    attribute: record.name.clone(),
                    value: e.value.clone(),
                    source,
                })?;
                entries.push(EnumEntry {
                    value,
                    name: e.name,
                    description: e.description,
                });
            }
            attributes.entry(record.name).or_default().extend(entries);
        }
        Ok(EnumRegistry { attributes })
    }

    /// All entries of an attribute in source order
    pub fn entries(&self, attribute: &str) -> Option<&[EnumEntry]> {
        self.attributes.get(attribute).map(|v| v.as_slice())
    }

    /// Name of the first entry matching the value
    pub fn resolve(&self, attribute: &str, value: i32) -> Option<&str> {
        self.entries(attribute)?
            .iter()
            .find(|e| e.value == value)
            .map(|e| e.name())
    }

    /// Resolve a code written in hex or decimal
    pub fn resolve_code(&self, attribute: &str, code: &str) -> Option<&str> {
        parse_hex_or_decimal(code)
            .ok()
            .and_then(|value| self.resolve(attribute, value))
    }

    /// Enum name or the literal number when the registry has no match
    pub fn name_or_number(&self, attribute: &str, value: i32) -> Cow<'_, str> {
        match self.resolve(attribute, value) {
            Some(name) => Cow::Borrowed(name),
            None => {
                debug!("Unresolved enum value {value} for attribute {attribute}");
                Cow::Owned(value.to_string())
            }
        }
    }

    pub fn len(&self) -> usize {
        self.attributes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.attributes.is_empty()
    }
}

/// Tag and enum registries consumed by the codec
#[derive(Clone, Debug, Default)]
pub struct Metadata {
    tags: TagRegistry,
    enums: EnumRegistry,
}

impl Metadata {
    /// Create metadata from already built registries
    pub fn new(tags: TagRegistry, enums: EnumRegistry) -> Metadata {
        Metadata { tags, enums }
    }

    /// Validate and normalize a metadata source
    pub fn from_source(source: MetadataSource) -> Result<Metadata, MetadataError> {
        let tags = TagRegistry::from_records(source.tags)?;
        let enums = EnumRegistry::from_records(source.attributes)?;
        debug!("Loaded {} tags and enums for {} attributes", tags.len(), enums.len());
        Ok(Metadata { tags, enums })
    }

    /// Built-in IANA tables
    pub fn builtin() -> Result<Metadata, MetadataError> {
        Metadata::from_source(crate::builtin::source())
    }

    #[cfg(feature = "serde")]
    /// Load metadata from a JSON document shaped like [`MetadataSource`]
    pub fn from_json(json: &str) -> Result<Metadata, MetadataError> {
        let source: MetadataSource = serde_json::from_str(json)?;
        Metadata::from_source(source)
    }

    /// Tag registry
    pub fn tags(&self) -> &TagRegistry {
        &self.tags
    }

    /// Enum registry
    pub fn enums(&self) -> &EnumRegistry {
        &self.enums
    }
}
