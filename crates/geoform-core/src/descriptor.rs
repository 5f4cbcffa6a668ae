//! Renderer-agnostic form control descriptors.
//!
//! A [`ControlDescriptor`] says which widget to show for a field, how to label it,
//! whether it is required or read-only, and which values it offers. Turning it into
//! an actual UI widget is the job of a renderer (see [`crate::render`]).

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::data_types::{CanonicalDataType, ValueType};
use crate::editor_kinds::EditorKind;
use crate::options::OptionSet;

/// Abstract widget kinds a form can show.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum WidgetKind {
    /// Single line input.
    PlainInput,
    /// Drop-down with one selectable value.
    SingleSelect,
    /// Invisible control.
    Hidden,
    /// Two-state checkbox.
    Checkbox,
    /// Multi-line text area.
    MultilineText,
    /// Date picker.
    DatePicker,
}

impl WidgetKind {
    /// Returns the kebab-case name of this widget kind.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::PlainInput => "plain-input",
            Self::SingleSelect => "single-select",
            Self::Hidden => "hidden",
            Self::Checkbox => "checkbox",
            Self::MultilineText => "multiline-text",
            Self::DatePicker => "date-picker",
        }
    }
}

impl fmt::Display for WidgetKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Literals stored by a checkbox.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckboxValues {
    /// Stored when checked.
    pub on: String,
    /// Stored when unchecked.
    pub off: String,
}

/// Parameters of a deferred lookup against another layer.
///
/// The rendering layer resolves the actual value list later; nothing is
/// enumerated when the descriptor is built.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RelationMetadata {
    /// Whether an empty entry is offered.
    pub allow_null: bool,
    /// Whether entries are ordered by value rather than by key.
    pub order_by_value: bool,
    /// Identifier of the related layer.
    pub layer: String,
    /// Column holding the stored value.
    pub key: String,
    /// Column holding the displayed value.
    pub value: String,
    /// Whether several entries may be selected.
    pub allow_multi: bool,
    /// Optional filter applied to the related layer.
    pub filter_expression: Option<String>,
}

/// Kind-specific payload of a control.
///
/// At most one payload exists per control, and it always matches the widget kind:
/// checkbox values only on checkboxes, an option set or relation metadata only on
/// single-selects.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "kebab-case")]
pub enum ControlData {
    /// No extra data.
    None,
    /// Checkbox literals.
    Checkbox(CheckboxValues),
    /// Inline choices, sorted by display value.
    Options(OptionSet),
    /// Deferred lookup.
    Relation(RelationMetadata),
}

/// The translation of one field into an abstract form control.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ControlDescriptor {
    /// Control identifier (the field name).
    pub id: String,
    /// Widget kind to show.
    pub widget: WidgetKind,
    /// Editor kind the widget was resolved from; `None` for geometry fields and
    /// for unrecognized editor codes.
    pub editor: Option<EditorKind>,
    /// Label shown next to the control.
    pub label: String,
    /// Canonical type of the underlying field.
    pub data_type: CanonicalDataType,
    /// Whether a value must be supplied.
    pub required: bool,
    /// Whether the value may be edited.
    pub read_only: bool,
    /// Kind-specific payload.
    pub data: ControlData,
}

impl ControlDescriptor {
    /// Creates a bare descriptor of the given widget kind, labelled with its id.
    #[must_use]
    pub fn new(id: impl Into<String>, widget: WidgetKind, data_type: CanonicalDataType) -> Self {
        let id = id.into();
        Self {
            label: id.clone(),
            id,
            widget,
            editor: None,
            data_type,
            required: false,
            read_only: false,
            data: ControlData::None,
        }
    }

    /// Value type submitted values are checked against.
    #[must_use]
    pub fn value_type(&self) -> ValueType {
        self.data_type.value_type()
    }

    /// Checkbox literals, present only on checkbox controls.
    #[must_use]
    pub fn checkbox_values(&self) -> Option<&CheckboxValues> {
        match &self.data {
            ControlData::Checkbox(values) => Some(values),
            _ => None,
        }
    }

    /// Inline option set, present only on single-select controls that enumerate
    /// their choices.
    #[must_use]
    pub fn options(&self) -> Option<&OptionSet> {
        match &self.data {
            ControlData::Options(options) => Some(options),
            _ => None,
        }
    }

    /// Relation metadata, present only on value-relation controls.
    #[must_use]
    pub fn relation(&self) -> Option<&RelationMetadata> {
        match &self.data {
            ControlData::Relation(relation) => Some(relation),
            _ => None,
        }
    }
}
