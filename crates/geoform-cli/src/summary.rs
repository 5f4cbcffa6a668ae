//! Plain-text renderers summarizing a control's choices.
//!
//! One renderer per widget kind, registered in a [`RendererRegistry`] and used for
//! the "Choices" column of `geoform describe`.

use std::sync::Arc;

use geoform_core::ControlDescriptor;
use geoform_core::descriptor::WidgetKind;
use geoform_core::error::RenderError;
use geoform_core::options::OptionValue;
use geoform_core::render::{ControlRenderer, RendererRegistry};

/// Choices listed before the summary is cut short.
const MAX_LISTED_OPTIONS: usize = 5;

/// Widgets without choices.
struct NoChoices(WidgetKind);

impl ControlRenderer for NoChoices {
    type Output = String;

    fn widget(&self) -> WidgetKind {
        self.0
    }

    fn render(&self, _control: &ControlDescriptor) -> Result<String, RenderError> {
        Ok("-".to_string())
    }
}

struct CheckboxSummary;

impl ControlRenderer for CheckboxSummary {
    type Output = String;

    fn widget(&self) -> WidgetKind {
        WidgetKind::Checkbox
    }

    fn render(&self, control: &ControlDescriptor) -> Result<String, RenderError> {
        let values = control
            .checkbox_values()
            .ok_or_else(|| RenderError::Failed {
                widget: WidgetKind::Checkbox,
                message: format!("checkbox '{}' has no literals", control.id),
            })?;
        Ok(format!("on={} off={}", values.on, values.off))
    }
}

struct SelectSummary;

impl ControlRenderer for SelectSummary {
    type Output = String;

    fn widget(&self) -> WidgetKind {
        WidgetKind::SingleSelect
    }

    fn render(&self, control: &ControlDescriptor) -> Result<String, RenderError> {
        if let Some(relation) = control.relation() {
            let mut summary = format!(
                "{}: {} -> {}",
                relation.layer, relation.key, relation.value
            );
            if let Some(filter) = &relation.filter_expression {
                summary.push_str(&format!(" where {filter}"));
            }
            return Ok(summary);
        }

        let Some(options) = control.options() else {
            return Err(RenderError::Failed {
                widget: WidgetKind::SingleSelect,
                message: format!("select '{}' has neither options nor a relation", control.id),
            });
        };
        if options.is_empty() {
            return Ok("(none)".to_string());
        }

        let mut listed: Vec<String> = options
            .iter()
            .take(MAX_LISTED_OPTIONS)
            .map(|entry| match &entry.value {
                OptionValue::Value(value) if *value == entry.label => value.clone(),
                OptionValue::Value(value) => format!("{}={value}", entry.label),
                OptionValue::Unsupported => "(unsupported)".to_string(),
            })
            .collect();
        if options.len() > MAX_LISTED_OPTIONS {
            listed.push(format!("... +{} more", options.len() - MAX_LISTED_OPTIONS));
        }
        Ok(listed.join(", "))
    }
}

/// Registry with a summary renderer for every widget kind.
#[must_use]
pub fn summary_registry() -> RendererRegistry<String> {
    let mut registry = RendererRegistry::new();
    for widget in [
        WidgetKind::PlainInput,
        WidgetKind::Hidden,
        WidgetKind::MultilineText,
        WidgetKind::DatePicker,
    ] {
        registry.register(Arc::new(NoChoices(widget)));
    }
    registry.register(Arc::new(CheckboxSummary));
    registry.register(Arc::new(SelectSummary));
    registry
}
