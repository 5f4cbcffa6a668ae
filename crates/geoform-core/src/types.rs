//! Input types describing a layer field.
//!
//! These arrive already parsed from the project file; this crate never reads
//! markup itself.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::editor_kinds::{DEFAULT_EDITOR_CODE, EditorKind};

/// Storage properties of a field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldProperties {
    /// Field name
    pub name: String,
    /// Raw data type as named by the provider (e.g. `"int4"`, `"varchar"`)
    #[serde(rename = "type")]
    pub data_type: String,
    /// Whether the field accepts nulls
    #[serde(default = "default_nullable")]
    pub nullable: bool,
    /// Whether the provider generates the value
    #[serde(default)]
    pub auto_increment: bool,
}

fn default_nullable() -> bool {
    true
}

impl FieldProperties {
    /// Creates nullable, non-generated field properties.
    #[must_use]
    pub fn new(name: impl Into<String>, data_type: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            data_type: data_type.into(),
            nullable: true,
            auto_increment: false,
        }
    }

    /// Sets whether the field accepts nulls.
    #[must_use]
    pub fn with_nullable(mut self, nullable: bool) -> Self {
        self.nullable = nullable;
        self
    }

    /// Sets whether the provider generates the value.
    #[must_use]
    pub fn with_auto_increment(mut self, auto_increment: bool) -> Self {
        self.auto_increment = auto_increment;
        self
    }

    /// A value must be supplied when the field is neither nullable nor generated.
    #[must_use]
    pub fn is_required(&self) -> bool {
        !self.nullable && !self.auto_increment
    }
}

/// One declared pair of a value map.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValuePair {
    /// Stored value
    pub key: String,
    /// Displayed value
    pub value: String,
}

/// One category of a classification renderer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    /// Displayed label
    pub label: String,
    /// Stored value
    pub value: String,
}

impl Category {
    /// Creates a category.
    #[must_use]
    pub fn new(label: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            value: value.into(),
        }
    }
}

/// Declared editor configuration of a field.
///
/// Kind-specific settings live in `attributes` under the names the project file
/// uses (`checked`, `min`, `filterExpression`, ...). Value maps carry their pairs
/// separately since they are ordered and may repeat.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EditorConfig {
    /// Provider editor code
    #[serde(rename = "type", default)]
    pub code: i32,
    /// Kind-specific attributes
    #[serde(default)]
    pub attributes: BTreeMap<String, String>,
    /// Value map pairs, in declaration order
    #[serde(default)]
    pub value_pairs: Vec<ValuePair>,
}

impl EditorConfig {
    /// Creates a configuration for a raw editor code.
    #[must_use]
    pub fn new(code: i32) -> Self {
        Self {
            code,
            ..Self::default()
        }
    }

    /// Creates a configuration for a known editor kind.
    #[must_use]
    pub fn for_kind(kind: EditorKind) -> Self {
        Self::new(kind.code())
    }

    /// Adds a kind-specific attribute.
    #[must_use]
    pub fn with_attribute(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.insert(name.into(), value.into());
        self
    }

    /// Appends a value map pair.
    #[must_use]
    pub fn with_value_pair(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.value_pairs.push(ValuePair {
            key: key.into(),
            value: value.into(),
        });
        self
    }

    /// Returns an attribute value, if declared.
    #[must_use]
    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes.get(name).map(String::as_str)
    }

    /// Returns an attribute value, or the empty string when it is not declared.
    #[must_use]
    pub fn attribute_or_empty(&self, name: &str) -> &str {
        self.attribute(name).unwrap_or_default()
    }

    /// The editor kind, if the code is part of the fixed set.
    #[must_use]
    pub fn kind(&self) -> Option<EditorKind> {
        EditorKind::from_code(self.code)
    }
}

/// Editor code in effect for an optional configuration.
#[must_use]
pub fn editor_code(config: Option<&EditorConfig>) -> i32 {
    config.map_or(DEFAULT_EDITOR_CODE, |c| c.code)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_required_flag() {
        let props = FieldProperties::new("id", "int4");
        assert!(!props.is_required());

        let props = props.with_nullable(false);
        assert!(props.is_required());

        let props = props.with_auto_increment(true);
        assert!(!props.is_required());
    }

    #[test]
    fn test_editor_config_attributes() {
        let config = EditorConfig::for_kind(EditorKind::CheckBox)
            .with_attribute("checked", "1")
            .with_attribute("unchecked", "0");
        assert_eq!(config.code, 7);
        assert_eq!(config.kind(), Some(EditorKind::CheckBox));
        assert_eq!(config.attribute("checked"), Some("1"));
        assert_eq!(config.attribute("missing"), None);
        assert_eq!(config.attribute_or_empty("missing"), "");
    }

    #[test]
    fn test_editor_code_default() {
        assert_eq!(editor_code(None), 0);
        assert_eq!(editor_code(Some(&EditorConfig::new(13))), 13);
    }

    #[test]
    fn test_deserialize_field_properties() {
        let props: FieldProperties =
            serde_json::from_str(r#"{"name": "gid", "type": "int4", "nullable": false}"#)
                .unwrap();
        assert_eq!(props.data_type, "int4");
        assert!(!props.nullable);
        assert!(!props.auto_increment);

        let props: FieldProperties =
            serde_json::from_str(r#"{"name": "note", "type": "text"}"#).unwrap();
        assert!(props.nullable);
    }

    #[test]
    fn test_deserialize_editor_config() {
        let config: EditorConfig = serde_json::from_str(
            r#"{
                "type": 3,
                "value_pairs": [{"key": "a", "value": "Apple"}]
            }"#,
        )
        .unwrap();
        assert_eq!(config.kind(), Some(EditorKind::ValueMap));
        assert_eq!(config.value_pairs.len(), 1);
        assert!(config.attributes.is_empty());
    }
}
