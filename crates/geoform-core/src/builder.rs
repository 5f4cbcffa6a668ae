//! Field → control translation.
//!
//! [`FieldControlBuilder`] turns a field's storage properties, its declared editor
//! configuration, its alias and the layer's classification categories into a
//! [`ControlDescriptor`].
//!
//! # Examples
//!
//! ```
//! use geoform_core::builder::FieldControlBuilder;
//! use geoform_core::descriptor::WidgetKind;
//! use geoform_core::types::{EditorConfig, FieldProperties};
//!
//! let props = FieldProperties::new("fruit", "varchar").with_nullable(false);
//! let editor = EditorConfig::new(3)
//!     .with_value_pair("b", "Banana")
//!     .with_value_pair("a", "Apple");
//!
//! let control = FieldControlBuilder::new("fruit", &props)
//!     .editor(&editor)
//!     .alias("Fruit")
//!     .build()?;
//!
//! assert_eq!(control.widget, WidgetKind::SingleSelect);
//! assert_eq!(control.label, "Fruit");
//! assert!(control.required);
//! assert_eq!(control.options().unwrap().labels(), vec!["Apple", "Banana"]);
//! # Ok::<(), geoform_core::error::FormError>(())
//! ```

use log::{debug, warn};

use crate::data_types::{CanonicalDataType, canonicalize};
use crate::descriptor::{
    CheckboxValues, ControlData, ControlDescriptor, RelationMetadata, WidgetKind,
};
use crate::editor_kinds::{EditorKind, find_editor_kind};
use crate::error::{FieldError, Result};
use crate::options::build_option_set;
use crate::types::{Category, EditorConfig, FieldProperties, editor_code};

/// Builds the control descriptor of one field.
///
/// Optional inputs are set with [`editor`](Self::editor), [`alias`](Self::alias) and
/// [`categories`](Self::categories). Without an editor the field is a line edit.
#[derive(Debug, Clone)]
pub struct FieldControlBuilder<'a> {
    id: &'a str,
    props: &'a FieldProperties,
    editor: Option<&'a EditorConfig>,
    alias: Option<&'a str>,
    categories: Option<&'a [Category]>,
}

impl<'a> FieldControlBuilder<'a> {
    /// Starts a builder for the field `id` with its storage properties.
    #[must_use]
    pub fn new(id: &'a str, props: &'a FieldProperties) -> Self {
        Self {
            id,
            props,
            editor: None,
            alias: None,
            categories: None,
        }
    }

    /// Sets the declared editor configuration.
    #[must_use]
    pub fn editor(mut self, editor: &'a EditorConfig) -> Self {
        self.editor = Some(editor);
        self
    }

    /// Sets the display alias. An empty alias falls back to the field id.
    #[must_use]
    pub fn alias(mut self, alias: &'a str) -> Self {
        self.alias = Some(alias);
        self
    }

    /// Sets the classification categories.
    #[must_use]
    pub fn categories(mut self, categories: &'a [Category]) -> Self {
        self.categories = Some(categories);
        self
    }

    /// Builds the descriptor.
    ///
    /// # Errors
    ///
    /// Returns [`FieldError::UnknownDataType`] if the raw data type has no entry in
    /// the cast table. Nothing else fails: unknown editor codes resolve to a plain
    /// input.
    pub fn build(&self) -> Result<ControlDescriptor> {
        let data_type = canonicalize(&self.props.data_type).ok_or_else(|| {
            FieldError::UnknownDataType {
                field: self.id.to_string(),
                data_type: self.props.data_type.clone(),
            }
        })?;
        let mut required = self.props.is_required();

        let (widget, editor) = if data_type == CanonicalDataType::Geometry {
            debug!("Field '{}' is a geometry, forcing a hidden control", self.id);
            (WidgetKind::Hidden, None)
        } else {
            let code = editor_code(self.editor);
            match find_editor_kind(code) {
                Some(info) => (info.widget, Some(info.kind)),
                None => {
                    warn!(
                        "Field '{}' has unknown editor code {code}, using a plain input",
                        self.id
                    );
                    (WidgetKind::PlainInput, None)
                },
            }
        };
        debug!(
            "Field '{}' ({data_type}) resolved to {widget} from {editor:?}",
            self.id
        );

        let mut control = ControlDescriptor::new(self.id, widget, data_type);
        control.editor = editor;

        match (widget, editor) {
            (WidgetKind::SingleSelect, Some(EditorKind::ValueRelation)) => {
                control.data = ControlData::Relation(relation_metadata(self.editor));
            },
            (WidgetKind::SingleSelect, Some(kind)) => {
                if let Some(options) =
                    build_option_set(kind, self.editor, self.categories, data_type)
                {
                    control.data = ControlData::Options(options);
                }
            },
            (WidgetKind::Checkbox, _) => {
                control.data = ControlData::Checkbox(checkbox_values(self.editor));
                // A checkbox always submits one of its literals.
                required = false;
            },
            _ => {},
        }

        control.label = match self.alias {
            Some(alias) if !alias.is_empty() => alias.to_string(),
            _ => self.id.to_string(),
        };
        control.read_only = editor.is_some_and(|kind| kind.info().read_only);
        control.required = required;

        Ok(control)
    }
}

/// Builds the control descriptor of one field from its four input groups.
///
/// # Errors
///
/// Returns [`FieldError::UnknownDataType`] if the raw data type has no entry in
/// the cast table.
pub fn build_control(
    id: &str,
    editor: Option<&EditorConfig>,
    alias: Option<&str>,
    categories: Option<&[Category]>,
    props: &FieldProperties,
) -> Result<ControlDescriptor> {
    FieldControlBuilder {
        id,
        props,
        editor,
        alias,
        categories,
    }
    .build()
}

fn checkbox_values(editor: Option<&EditorConfig>) -> CheckboxValues {
    let attribute = |name| {
        editor
            .map(|config| config.attribute_or_empty(name).to_string())
            .unwrap_or_default()
    };
    CheckboxValues {
        on: attribute("checked"),
        off: attribute("unchecked"),
    }
}

fn relation_metadata(editor: Option<&EditorConfig>) -> RelationMetadata {
    let Some(config) = editor else {
        return RelationMetadata::default();
    };
    let flag = |name| {
        let raw = config.attribute_or_empty(name).trim();
        raw == "1" || raw.eq_ignore_ascii_case("true")
    };
    let text = |name| config.attribute_or_empty(name).to_string();

    RelationMetadata {
        allow_null: flag("allowNull"),
        order_by_value: flag("orderByValue"),
        layer: text("layer"),
        key: text("key"),
        value: text("value"),
        allow_multi: flag("allowMulti"),
        filter_expression: config
            .attribute("filterExpression")
            .filter(|expression| !expression.trim().is_empty())
            .map(str::to_string),
    }
}
