//! Feature Record Types

use serde::de::{self, Deserializer, Visitor};
use serde::ser::Serializer;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

/// Stable movie identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EntityId(pub i64);

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for EntityId {
    type Err = std::num::ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim().parse().map(EntityId)
    }
}

impl From<i64> for EntityId {
    fn from(id: i64) -> Self {
        EntityId(id)
    }
}

/// A single feature value
///
/// Human-readable formats (JSON) carry the bare value; binary formats
/// (postcard cache entries) carry an explicit variant tag.
#[derive(Debug, Clone, PartialEq)]
pub enum FeatureValue {
    Int(i64),
    Float(f64),
    Text(String),
    Bool(bool),
}

impl FeatureValue {
    /// Numeric view of the value (`Int` and `Float` only)
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            FeatureValue::Int(v) => Some(*v as f64),
            FeatureValue::Float(v) => Some(*v),
            FeatureValue::Text(_) | FeatureValue::Bool(_) => None,
        }
    }
}

impl fmt::Display for FeatureValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FeatureValue::Int(v) => write!(f, "{}", v),
            FeatureValue::Float(v) => write!(f, "{}", v),
            FeatureValue::Text(v) => write!(f, "{}", v),
            FeatureValue::Bool(v) => write!(f, "{}", v),
        }
    }
}

impl From<i64> for FeatureValue {
    fn from(v: i64) -> Self {
        FeatureValue::Int(v)
    }
}

impl From<i32> for FeatureValue {
    fn from(v: i32) -> Self {
        FeatureValue::Int(v as i64)
    }
}

impl From<usize> for FeatureValue {
    fn from(v: usize) -> Self {
        FeatureValue::Int(v as i64)
    }
}

impl From<f64> for FeatureValue {
    fn from(v: f64) -> Self {
        FeatureValue::Float(v)
    }
}

impl From<bool> for FeatureValue {
    fn from(v: bool) -> Self {
        FeatureValue::Bool(v)
    }
}

impl From<&str> for FeatureValue {
    fn from(v: &str) -> Self {
        FeatureValue::Text(v.to_string())
    }
}

impl From<String> for FeatureValue {
    fn from(v: String) -> Self {
        FeatureValue::Text(v)
    }
}

#[derive(Serialize)]
#[serde(rename = "FeatureValue")]
enum TaggedRef<'a> {
    Int(i64),
    Float(f64),
    Text(&'a str),
    Bool(bool),
}

#[derive(Deserialize)]
#[serde(rename = "FeatureValue")]
enum Tagged {
    Int(i64),
    Float(f64),
    Text(String),
    Bool(bool),
}

impl Serialize for FeatureValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        if serializer.is_human_readable() {
            match self {
                FeatureValue::Int(v) => serializer.serialize_i64(*v),
                FeatureValue::Float(v) => serializer.serialize_f64(*v),
                FeatureValue::Text(v) => serializer.serialize_str(v),
                FeatureValue::Bool(v) => serializer.serialize_bool(*v),
            }
        } else {
            let tagged = match self {
                FeatureValue::Int(v) => TaggedRef::Int(*v),
                FeatureValue::Float(v) => TaggedRef::Float(*v),
                FeatureValue::Text(v) => TaggedRef::Text(v),
                FeatureValue::Bool(v) => TaggedRef::Bool(*v),
            };
            tagged.serialize(serializer)
        }
    }
}

struct PlainValueVisitor;

impl<'de> Visitor<'de> for PlainValueVisitor {
    type Value = FeatureValue;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a number, string or boolean")
    }

    fn visit_bool<E: de::Error>(self, v: bool) -> Result<Self::Value, E> {
        Ok(FeatureValue::Bool(v))
    }

    fn visit_i64<E: de::Error>(self, v: i64) -> Result<Self::Value, E> {
        Ok(FeatureValue::Int(v))
    }

    fn visit_u64<E: de::Error>(self, v: u64) -> Result<Self::Value, E> {
        Ok(i64::try_from(v).map_or(FeatureValue::Float(v as f64), FeatureValue::Int))
    }

    fn visit_f64<E: de::Error>(self, v: f64) -> Result<Self::Value, E> {
        Ok(FeatureValue::Float(v))
    }

    fn visit_str<E: de::Error>(self, v: &str) -> Result<Self::Value, E> {
        Ok(FeatureValue::Text(v.to_string()))
    }

    fn visit_string<E: de::Error>(self, v: String) -> Result<Self::Value, E> {
        Ok(FeatureValue::Text(v))
    }
}

impl<'de> Deserialize<'de> for FeatureValue {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        if deserializer.is_human_readable() {
            deserializer.deserialize_any(PlainValueVisitor)
        } else {
            Ok(match Tagged::deserialize(deserializer)? {
                Tagged::Int(v) => FeatureValue::Int(v),
                Tagged::Float(v) => FeatureValue::Float(v),
                Tagged::Text(v) => FeatureValue::Text(v),
                Tagged::Bool(v) => FeatureValue::Bool(v),
            })
        }
    }
}

/// Named features of one movie, ordered by name
pub type FeatureMap = BTreeMap<String, FeatureValue>;

/// Output of one extractor run
pub type ExtractionBatch = BTreeMap<EntityId, FeatureMap>;

/// Every movie's record, ordered by id
pub type FullFeatureSet = BTreeMap<EntityId, BaseRecord>;

/// Per-movie record written to the features artifact
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BaseRecord {
    /// Target rating as stored by the source
    pub rating: f64,
    /// Rating rounded half away from zero
    pub rating_rounded: i64,
    /// Movie title
    pub title: String,
    /// Extracted and combined features
    pub features: FeatureMap,
}

impl BaseRecord {
    /// Create a record with an empty feature map
    pub fn new(title: impl Into<String>, rating: f64) -> Self {
        Self {
            rating,
            rating_rounded: round_rating(rating),
            title: title.into(),
            features: FeatureMap::new(),
        }
    }
}

/// Round a rating to the nearest integer, ties away from zero (2.5 -> 3)
pub fn round_rating(rating: f64) -> i64 {
    rating.round() as i64
}
