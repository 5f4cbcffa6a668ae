//! Raw data type canonicalization.
//!
//! Providers name their storage types in many ways (`int4`, `varchar`,
//! `multipolygon`, ...). This module folds them into the small set of
//! [`CanonicalDataType`]s that the rest of the crate reasons about.
//!
//! # Examples
//!
//! ```
//! use geoform_core::data_types::{CanonicalDataType, canonicalize};
//!
//! assert_eq!(canonicalize("INT4"), Some(CanonicalDataType::Integer));
//! assert_eq!(canonicalize("MultiPolygon"), Some(CanonicalDataType::Geometry));
//! assert_eq!(canonicalize("hstore"), None);
//! ```

use std::fmt;

use serde::{Deserialize, Serialize};

/// Normalized semantic type of a field, independent of the storage engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CanonicalDataType {
    /// Free text.
    Text,
    /// Whole numbers.
    Integer,
    /// Floating point and decimal numbers.
    Float,
    /// Binary payloads.
    Blob,
    /// Any geometry column.
    Geometry,
    /// True/false values.
    Boolean,
    /// Calendar dates.
    Date,
    /// Dates with a time of day.
    #[serde(rename = "datetime")]
    DateTime,
}

impl CanonicalDataType {
    /// Returns the lowercase name of this canonical type.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Text => "text",
            Self::Integer => "integer",
            Self::Float => "float",
            Self::Blob => "blob",
            Self::Geometry => "geometry",
            Self::Boolean => "boolean",
            Self::Date => "date",
            Self::DateTime => "datetime",
        }
    }

    /// Returns the value type a submitted value is checked against.
    ///
    /// Types without a dedicated check fall back to [`ValueType::String`].
    #[must_use]
    pub fn value_type(&self) -> ValueType {
        match self {
            Self::Integer => ValueType::Integer,
            Self::Float => ValueType::Decimal,
            Self::Date => ValueType::Date,
            Self::DateTime => ValueType::DateTime,
            Self::Boolean => ValueType::Boolean,
            Self::Text | Self::Blob | Self::Geometry => ValueType::String,
        }
    }
}

impl fmt::Display for CanonicalDataType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Validation type attached to a control for downstream checks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ValueType {
    /// Any string is accepted.
    String,
    /// A signed 64-bit integer.
    Integer,
    /// A decimal number.
    Decimal,
    /// A `YYYY-MM-DD` date.
    Date,
    /// A date with a time of day.
    #[serde(rename = "datetime")]
    DateTime,
    /// A boolean literal.
    Boolean,
}

impl ValueType {
    /// Human readable name used in error messages.
    #[must_use]
    pub fn describe(&self) -> &'static str {
        match self {
            Self::String => "a string",
            Self::Integer => "an integer",
            Self::Decimal => "a decimal number",
            Self::Date => "a date (YYYY-MM-DD)",
            Self::DateTime => "a date and time (YYYY-MM-DD HH:MM:SS)",
            Self::Boolean => "a boolean",
        }
    }
}

/// The fixed raw-type cast table.
static DATA_TYPE_CASTS: [(&str, CanonicalDataType); 28] = [
    ("float", CanonicalDataType::Float),
    ("real", CanonicalDataType::Float),
    ("double", CanonicalDataType::Float),
    ("double decimal", CanonicalDataType::Float),
    ("numeric", CanonicalDataType::Float),
    ("int", CanonicalDataType::Integer),
    ("integer", CanonicalDataType::Integer),
    ("int4", CanonicalDataType::Integer),
    ("int8", CanonicalDataType::Integer),
    ("text", CanonicalDataType::Text),
    ("string", CanonicalDataType::Text),
    ("varchar", CanonicalDataType::Text),
    ("char", CanonicalDataType::Text),
    ("blob", CanonicalDataType::Blob),
    ("bytea", CanonicalDataType::Blob),
    ("geometry", CanonicalDataType::Geometry),
    ("geometrycollection", CanonicalDataType::Geometry),
    ("point", CanonicalDataType::Geometry),
    ("multipoint", CanonicalDataType::Geometry),
    ("line", CanonicalDataType::Geometry),
    ("linestring", CanonicalDataType::Geometry),
    ("multilinestring", CanonicalDataType::Geometry),
    ("polygon", CanonicalDataType::Geometry),
    ("multipolygon", CanonicalDataType::Geometry),
    ("bool", CanonicalDataType::Boolean),
    ("boolean", CanonicalDataType::Boolean),
    ("date", CanonicalDataType::Date),
    ("datetime", CanonicalDataType::DateTime),
];

/// Looks up the canonical type of a raw provider type (case-insensitive).
///
/// Returns `None` when the raw type has no entry in the cast table.
#[must_use]
pub fn canonicalize(raw: &str) -> Option<CanonicalDataType> {
    DATA_TYPE_CASTS
        .iter()
        .find(|(name, _)| name.eq_ignore_ascii_case(raw))
        .map(|(_, canonical)| *canonical)
}

/// Returns every `(raw type, canonical type)` pair of the cast table, in table order.
///
/// # Examples
///
/// ```
/// use geoform_core::data_types::{CanonicalDataType, get_data_type_casts};
///
/// let casts = get_data_type_casts();
/// assert!(casts.contains(&("bytea", CanonicalDataType::Blob)));
/// ```
#[must_use]
pub fn get_data_type_casts() -> &'static [(&'static str, CanonicalDataType)] {
    &DATA_TYPE_CASTS
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_table_entry_round_trips() {
        for (raw, canonical) in get_data_type_casts() {
            assert_eq!(canonicalize(raw), Some(*canonical), "raw type {raw}");
            assert_eq!(
                canonicalize(&raw.to_uppercase()),
                Some(*canonical),
                "raw type {raw} uppercased"
            );
        }
    }

    #[test]
    fn test_unknown_types() {
        assert_eq!(canonicalize(""), None);
        assert_eq!(canonicalize("hstore"), None);
        assert_eq!(canonicalize("int2"), None);
        assert_eq!(canonicalize(" text"), None);
    }

    #[test]
    fn test_geometry_family() {
        for raw in ["Point", "LINESTRING", "MultiPolygon", "GeometryCollection"] {
            assert_eq!(canonicalize(raw), Some(CanonicalDataType::Geometry));
        }
    }

    #[test]
    fn test_value_types() {
        assert_eq!(CanonicalDataType::Text.value_type(), ValueType::String);
        assert_eq!(CanonicalDataType::Integer.value_type(), ValueType::Integer);
        assert_eq!(CanonicalDataType::Float.value_type(), ValueType::Decimal);
        assert_eq!(CanonicalDataType::Date.value_type(), ValueType::Date);
        assert_eq!(CanonicalDataType::DateTime.value_type(), ValueType::DateTime);
        assert_eq!(CanonicalDataType::Blob.value_type(), ValueType::String);
    }

    #[test]
    fn test_display_names() {
        assert_eq!(CanonicalDataType::DateTime.to_string(), "datetime");
        assert_eq!(CanonicalDataType::Geometry.to_string(), "geometry");
    }
}
