//! Display utilities for formatting CLI output.
//!
//! This module provides table row structures and formatting functions
//! for presenting controls and lookup tables in a human-readable format.

use anyhow::Result;
use tabled::{Table, Tabled};

use geoform_core::ControlDescriptor;
use geoform_core::data_types::get_data_type_casts;
use geoform_core::editor_kinds::get_editor_kinds;
use geoform_core::render::RendererRegistry;

use crate::layer::report;

/// Table row representation for displaying a control descriptor.
#[derive(Debug, Tabled)]
pub struct ControlRow {
    /// Control identifier.
    #[tabled(rename = "Field")]
    pub id: String,
    /// Widget kind.
    #[tabled(rename = "Widget")]
    pub widget: String,
    /// Label shown to the user.
    #[tabled(rename = "Label")]
    pub label: String,
    /// Canonical data type.
    #[tabled(rename = "Type")]
    pub data_type: String,
    /// Whether a value is required.
    #[tabled(rename = "Required")]
    pub required: String,
    /// Whether the value is read-only.
    #[tabled(rename = "Read-only")]
    pub read_only: String,
    /// Summary of the available choices.
    #[tabled(rename = "Choices")]
    pub choices: String,
}

/// Table row representation for displaying an editor kind.
#[derive(Tabled)]
pub struct EditorKindRow {
    /// Provider editor code.
    #[tabled(rename = "Code")]
    pub code: i32,
    /// Editor kind name.
    #[tabled(rename = "Editor")]
    pub name: String,
    /// Widget kind it translates to.
    #[tabled(rename = "Widget")]
    pub widget: String,
    /// Whether the control is read-only.
    #[tabled(rename = "Read-only")]
    pub read_only: String,
    /// What the editor does.
    #[tabled(rename = "Description")]
    pub description: String,
}

/// Table row representation for displaying a raw type cast.
#[derive(Tabled)]
pub struct DataTypeRow {
    /// Raw provider type.
    #[tabled(rename = "Raw Type")]
    pub raw: String,
    /// Canonical type it maps to.
    #[tabled(rename = "Canonical")]
    pub canonical: String,
}

fn yes_no(flag: bool) -> String {
    if flag { "Yes" } else { "No" }.to_string()
}

/// Builds the table rows of a set of controls, summarizing choices with `renderers`.
///
/// # Errors
///
/// Returns an error if a control cannot be summarized.
pub fn control_rows(
    controls: &[ControlDescriptor],
    renderers: &RendererRegistry<String>,
) -> Result<Vec<ControlRow>> {
    controls
        .iter()
        .map(|control| {
            let choices = renderers.render(control).map_err(|e| report(&e))?;
            Ok(ControlRow {
                id: control.id.clone(),
                widget: control.widget.to_string(),
                label: control.label.clone(),
                data_type: control.data_type.to_string(),
                required: yes_no(control.required),
                read_only: yes_no(control.read_only),
                choices,
            })
        })
        .collect()
}

/// Display controls in a formatted table.
///
/// # Errors
///
/// Returns an error if a control cannot be summarized.
pub fn display_controls(
    layer: &str,
    controls: &[ControlDescriptor],
    renderers: &RendererRegistry<String>,
) -> Result<()> {
    println!("\nLayer: {layer}");
    if controls.is_empty() {
        println!("No controls.");
        return Ok(());
    }

    let rows = control_rows(controls, renderers)?;
    println!("\n=== Controls ({} total) ===", rows.len());
    println!("{}", Table::new(rows));
    Ok(())
}

/// Display the editor kind table.
pub fn display_editor_kinds() {
    let rows: Vec<EditorKindRow> = get_editor_kinds()
        .iter()
        .map(|info| EditorKindRow {
            code: info.code,
            name: info.name.to_string(),
            widget: info.widget.to_string(),
            read_only: yes_no(info.read_only),
            description: info.description.to_string(),
        })
        .collect();

    println!("\nEditor Kinds ({} total):\n", rows.len());
    println!("{}", Table::new(rows));
}

/// Display the raw data type cast table.
pub fn display_data_types() {
    let rows: Vec<DataTypeRow> = get_data_type_casts()
        .iter()
        .map(|(raw, canonical)| DataTypeRow {
            raw: (*raw).to_string(),
            canonical: canonical.to_string(),
        })
        .collect();

    println!("\nData Types ({} total):\n", rows.len());
    println!("{}", Table::new(rows));
}
