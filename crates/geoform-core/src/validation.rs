//! Checks submitted values against a control descriptor.

use chrono::{DateTime, NaiveDate, NaiveDateTime};

use crate::data_types::ValueType;
use crate::descriptor::{ControlData, ControlDescriptor, WidgetKind};
use crate::error::ValueError;

const DATETIME_FORMATS: [&str; 2] = ["%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S"];

impl ControlDescriptor {
    /// Checks a submitted raw value.
    ///
    /// `None` and blank strings mean "no value". Read-only and hidden controls
    /// accept anything, value-relation controls accept any value since their
    /// choices are resolved elsewhere.
    ///
    /// # Errors
    ///
    /// Returns a [`ValueError`] describing the first rule the value breaks.
    pub fn validate(&self, value: Option<&str>) -> Result<(), ValueError> {
        if self.read_only || self.widget == WidgetKind::Hidden {
            return Ok(());
        }

        let Some(value) = value.filter(|v| !v.trim().is_empty()) else {
            return if self.required {
                Err(ValueError::Required {
                    field: self.id.clone(),
                })
            } else {
                Ok(())
            };
        };

        match &self.data {
            ControlData::Checkbox(literals) => {
                if value != literals.on && value != literals.off {
                    return Err(ValueError::InvalidCheckboxValue {
                        field: self.id.clone(),
                        value: value.to_string(),
                        on: literals.on.clone(),
                        off: literals.off.clone(),
                    });
                }
            },
            ControlData::Options(options) => {
                if !options.contains_value(value) {
                    return Err(ValueError::NotAnOption {
                        field: self.id.clone(),
                        value: value.to_string(),
                    });
                }
            },
            ControlData::Relation(_) | ControlData::None => {},
        }

        if matches!(
            self.widget,
            WidgetKind::PlainInput | WidgetKind::MultilineText | WidgetKind::DatePicker
        ) {
            let value_type = self.value_type();
            if !parses_as(value_type, value) {
                return Err(ValueError::TypeMismatch {
                    field: self.id.clone(),
                    expected: value_type.describe().to_string(),
                    value: value.to_string(),
                });
            }
        }

        Ok(())
    }
}

/// Whether `value` is a literal of `value_type`.
#[must_use]
pub fn parses_as(value_type: ValueType, value: &str) -> bool {
    let value = value.trim();
    match value_type {
        ValueType::String => true,
        ValueType::Integer => value.parse::<i64>().is_ok(),
        ValueType::Decimal => value.parse::<f64>().is_ok_and(f64::is_finite),
        ValueType::Date => NaiveDate::parse_from_str(value, "%Y-%m-%d").is_ok(),
        ValueType::DateTime => {
            DATETIME_FORMATS
                .iter()
                .any(|format| NaiveDateTime::parse_from_str(value, format).is_ok())
                || DateTime::parse_from_rfc3339(value).is_ok()
        },
        ValueType::Boolean => matches!(
            value.to_ascii_lowercase().as_str(),
            "true" | "false" | "t" | "f" | "1" | "0" | "yes" | "no"
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builder::FieldControlBuilder;
    use crate::types::{Category, EditorConfig, FieldProperties};

    fn control(props: &FieldProperties, editor: Option<&EditorConfig>) -> ControlDescriptor {
        let mut builder = FieldControlBuilder::new(&props.name, props);
        if let Some(editor) = editor {
            builder = builder.editor(editor);
        }
        builder.build().unwrap()
    }

    #[test]
    fn test_required_value() {
        let props = FieldProperties::new("name", "text").with_nullable(false);
        let control = control(&props, None);
        assert_eq!(
            control.validate(None),
            Err(ValueError::Required {
                field: "name".to_string()
            })
        );
        assert!(control.validate(Some("")).is_err());
        assert_eq!(
            control.validate(Some("   ")),
            Err(ValueError::Required {
                field: "name".to_string()
            })
        );
        assert!(control.validate(Some("Ada")).is_ok());
    }

    #[test]
    fn test_optional_value() {
        let props = FieldProperties::new("count", "int4");
        let control = control(&props, None);
        assert!(control.validate(None).is_ok());
        assert!(control.validate(Some("42")).is_ok());
        assert!(matches!(
            control.validate(Some("4.2")),
            Err(ValueError::TypeMismatch { .. })
        ));
    }

    #[test]
    fn test_checkbox_literals() {
        let props = FieldProperties::new("active", "bool").with_nullable(false);
        let editor = EditorConfig::new(7)
            .with_attribute("checked", "yes")
            .with_attribute("unchecked", "no");
        let control = control(&props, Some(&editor));
        assert!(control.validate(None).is_ok());
        assert!(control.validate(Some("yes")).is_ok());
        assert!(control.validate(Some("no")).is_ok());
        assert!(matches!(
            control.validate(Some("1")),
            Err(ValueError::InvalidCheckboxValue { .. })
        ));
    }

    #[test]
    fn test_options_accept_stored_values_only() {
        let props = FieldProperties::new("fruit", "text");
        let editor = EditorConfig::new(3).with_value_pair("a", "Apple");
        let control = control(&props, Some(&editor));
        assert!(control.validate(Some("a")).is_ok());
        assert_eq!(
            control.validate(Some("Apple")),
            Err(ValueError::NotAnOption {
                field: "fruit".to_string(),
                value: "Apple".to_string()
            })
        );
    }

    #[test]
    fn test_empty_classification_rejects_values() {
        let props = FieldProperties::new("class", "text");
        let editor = EditorConfig::new(4);
        let categories: [Category; 0] = [];
        let control = FieldControlBuilder::new("class", &props)
            .editor(&editor)
            .categories(&categories)
            .build()
            .unwrap();
        assert!(control.validate(None).is_ok());
        assert!(control.validate(Some("x")).is_err());
    }

    #[test]
    fn test_relation_accepts_anything() {
        let props = FieldProperties::new("district", "int4");
        let editor = EditorConfig::new(15).with_attribute("layer", "districts");
        let control = control(&props, Some(&editor));
        assert!(control.validate(Some("not checked here")).is_ok());
    }

    #[test]
    fn test_read_only_and_hidden_accept_anything() {
        let props = FieldProperties::new("uid", "int4").with_nullable(false);
        let editor = EditorConfig::new(16);
        let control = control(&props, Some(&editor));
        assert!(control.validate(None).is_ok());
        assert!(control.validate(Some("abc")).is_ok());

        let props = FieldProperties::new("geom", "point").with_nullable(false);
        let control = self::control(&props, None);
        assert!(control.validate(None).is_ok());
    }

    #[test]
    fn test_calendar_dates() {
        let props = FieldProperties::new("surveyed", "date");
        let editor = EditorConfig::new(13);
        let control = control(&props, Some(&editor));
        assert_eq!(control.widget, WidgetKind::DatePicker);
        assert!(control.validate(Some("2024-02-29")).is_ok());
        assert!(control.validate(Some("2023-02-29")).is_err());
        assert!(control.validate(Some("29/02/2024")).is_err());
    }

    #[test]
    fn test_parses_as() {
        assert!(parses_as(ValueType::Decimal, "3.14"));
        assert!(!parses_as(ValueType::Decimal, "NaN"));
        assert!(parses_as(ValueType::DateTime, "2024-05-01 12:30:00"));
        assert!(parses_as(ValueType::DateTime, "2024-05-01T12:30:00"));
        assert!(parses_as(ValueType::DateTime, "2024-05-01T12:30:00+02:00"));
        assert!(!parses_as(ValueType::DateTime, "2024-05-01"));
        assert!(parses_as(ValueType::Boolean, "TRUE"));
        assert!(!parses_as(ValueType::Boolean, "maybe"));
        assert!(parses_as(ValueType::String, ""));
    }
}
