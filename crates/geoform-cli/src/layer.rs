//! Layer definition files.
//!
//! A layer definition is a JSON document listing a layer's fields with their
//! storage properties and editor configuration, already extracted from the
//! project file:
//!
//! ```json
//! {
//!   "layer": "parcels",
//!   "fields": [
//!     { "name": "gid", "type": "int4", "nullable": false, "auto_increment": true },
//!     { "name": "owner", "type": "varchar", "alias": "Owner",
//!       "editor": { "type": 12 } }
//!   ]
//! }
//! ```

use std::fs;
use std::path::Path;

use anyhow::{Result, anyhow};
use serde::Deserialize;
use tracing::{debug, warn};

use geoform_core::types::{Category, EditorConfig, FieldProperties};
use geoform_core::{ControlDescriptor, FieldControlBuilder, FormError};

/// A layer and its fields.
#[derive(Debug, Clone, Deserialize)]
pub struct LayerDefinition {
    /// Layer identifier
    pub layer: String,
    /// Fields in form order
    #[serde(default)]
    pub fields: Vec<FieldDefinition>,
}

/// One field of a layer definition.
#[derive(Debug, Clone, Deserialize)]
pub struct FieldDefinition {
    /// Storage properties
    #[serde(flatten)]
    pub properties: FieldProperties,
    /// Display alias
    #[serde(default)]
    pub alias: Option<String>,
    /// Declared editor
    #[serde(default)]
    pub editor: Option<EditorConfig>,
    /// Classification categories
    #[serde(default)]
    pub categories: Option<Vec<Category>>,
}

impl FieldDefinition {
    /// Builds the control descriptor of this field.
    ///
    /// # Errors
    ///
    /// Returns the builder's error for an unknown data type.
    pub fn build(&self) -> Result<ControlDescriptor, FormError> {
        let mut builder = FieldControlBuilder::new(&self.properties.name, &self.properties);
        if let Some(editor) = &self.editor {
            builder = builder.editor(editor);
        }
        if let Some(alias) = &self.alias {
            builder = builder.alias(alias);
        }
        if let Some(categories) = &self.categories {
            builder = builder.categories(categories);
        }
        builder.build()
    }
}

impl LayerDefinition {
    /// Finds a field by name.
    #[must_use]
    pub fn field(&self, name: &str) -> Option<&FieldDefinition> {
        self.fields.iter().find(|f| f.properties.name == name)
    }
}

/// Reads a layer definition from a JSON file.
///
/// # Errors
///
/// Returns an error if the file cannot be read or is not a valid definition.
pub fn load_layer(path: &Path) -> Result<LayerDefinition> {
    let text = fs::read_to_string(path)
        .map_err(|e| anyhow!("Failed to read layer file '{}': {e}", path.display()))?;
    let layer: LayerDefinition = serde_json::from_str(&text)
        .map_err(|e| anyhow!("Invalid layer file '{}': {e}", path.display()))?;
    debug!("Loaded layer '{}' with {} field(s)", layer.layer, layer.fields.len());
    Ok(layer)
}

/// Formats a [`FormError`] with its recovery suggestion for the terminal.
#[must_use]
pub fn report(err: &FormError) -> anyhow::Error {
    match err.recovery_suggestion() {
        Some(suggestion) => anyhow!("{}\nHint: {suggestion}", err.user_message()),
        None => anyhow!("{}", err.user_message()),
    }
}

/// Builds the descriptors of the selected fields.
///
/// With `skip_invalid`, fields whose data type is unknown are logged and left out;
/// otherwise the first such field aborts the whole layer.
///
/// # Errors
///
/// Returns an error if `only` names a field the layer does not have, or if a
/// field cannot be built and `skip_invalid` is not set.
pub fn describe_layer(
    layer: &LayerDefinition,
    only: Option<&str>,
    skip_invalid: bool,
) -> Result<Vec<ControlDescriptor>> {
    let fields: Vec<&FieldDefinition> = match only {
        Some(name) => vec![layer.field(name).ok_or_else(|| {
            anyhow!("Field '{name}' not found in layer '{}'.", layer.layer)
        })?],
        None => layer.fields.iter().collect(),
    };

    let mut controls = Vec::with_capacity(fields.len());
    for field in fields {
        match field.build() {
            Ok(control) => controls.push(control),
            Err(err @ FormError::Field(_)) if skip_invalid => {
                warn!("Skipping field: {err}");
            },
            Err(err) => return Err(report(&err)),
        }
    }
    Ok(controls)
}
