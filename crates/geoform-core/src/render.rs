//! Renderer seam.
//!
//! Descriptors are toolkit-neutral. A rendering layer supplies one
//! [`ControlRenderer`] per [`WidgetKind`] and registers them in a
//! [`RendererRegistry`], which dispatches each descriptor to the renderer of its
//! widget kind.
//!
//! # Examples
//!
//! ```
//! use std::sync::Arc;
//!
//! use geoform_core::data_types::CanonicalDataType;
//! use geoform_core::descriptor::{ControlDescriptor, WidgetKind};
//! use geoform_core::error::RenderError;
//! use geoform_core::render::{ControlRenderer, RendererRegistry};
//!
//! struct LabelOnly;
//!
//! impl ControlRenderer for LabelOnly {
//!     type Output = String;
//!
//!     fn widget(&self) -> WidgetKind {
//!         WidgetKind::PlainInput
//!     }
//!
//!     fn render(&self, control: &ControlDescriptor) -> Result<String, RenderError> {
//!         Ok(format!("<input name=\"{}\">", control.id))
//!     }
//! }
//!
//! let mut registry: RendererRegistry<String> = RendererRegistry::new();
//! registry.register(Arc::new(LabelOnly));
//!
//! let control = ControlDescriptor::new("name", WidgetKind::PlainInput, CanonicalDataType::Text);
//! assert_eq!(registry.render(&control)?, "<input name=\"name\">");
//! # Ok::<(), geoform_core::error::FormError>(())
//! ```

use std::collections::HashMap;
use std::sync::Arc;

use log::debug;

use crate::descriptor::{ControlDescriptor, WidgetKind};
use crate::error::{RenderError, Result};

/// Turns descriptors of one widget kind into a toolkit's output.
pub trait ControlRenderer: Send + Sync {
    /// What the renderer produces (markup, a widget handle, ...).
    type Output;

    /// The widget kind this renderer handles.
    fn widget(&self) -> WidgetKind;

    /// Renders one control.
    ///
    /// # Errors
    ///
    /// Returns [`RenderError::Failed`] if the control cannot be rendered.
    fn render(&self, control: &ControlDescriptor) -> std::result::Result<Self::Output, RenderError>;
}

/// One renderer per widget kind.
pub struct RendererRegistry<O> {
    renderers: HashMap<WidgetKind, Arc<dyn ControlRenderer<Output = O>>>,
}

impl<O> RendererRegistry<O> {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self {
            renderers: HashMap::new(),
        }
    }

    /// Registers a renderer, replacing any previous renderer of the same widget kind.
    pub fn register(&mut self, renderer: Arc<dyn ControlRenderer<Output = O>>) {
        let widget = renderer.widget();
        if self.renderers.insert(widget, renderer).is_some() {
            debug!("Replaced renderer for {widget}");
        }
    }

    /// Returns the renderer of a widget kind.
    #[must_use]
    pub fn get(&self, widget: WidgetKind) -> Option<Arc<dyn ControlRenderer<Output = O>>> {
        self.renderers.get(&widget).cloned()
    }

    /// Whether a renderer is registered for a widget kind.
    #[must_use]
    pub fn supports(&self, widget: WidgetKind) -> bool {
        self.renderers.contains_key(&widget)
    }

    /// Renders a control with the renderer of its widget kind.
    ///
    /// # Errors
    ///
    /// Returns [`RenderError::NoRenderer`] if no renderer handles the control's
    /// widget kind, or the renderer's own error.
    pub fn render(&self, control: &ControlDescriptor) -> Result<O> {
        let renderer = self
            .renderers
            .get(&control.widget)
            .ok_or(RenderError::NoRenderer {
                widget: control.widget,
            })?;
        Ok(renderer.render(control)?)
    }
}

impl<O> Default for RendererRegistry<O> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data_types::CanonicalDataType;
    use crate::error::FormError;

    struct Fixed(WidgetKind, &'static str);

    impl ControlRenderer for Fixed {
        type Output = &'static str;

        fn widget(&self) -> WidgetKind {
            self.0
        }

        fn render(
            &self,
            control: &ControlDescriptor,
        ) -> std::result::Result<&'static str, RenderError> {
            if control.id.is_empty() {
                return Err(RenderError::Failed {
                    widget: self.0,
                    message: "control without id".to_string(),
                });
            }
            Ok(self.1)
        }
    }

    #[test]
    fn test_dispatches_on_widget_kind() {
        let mut registry: RendererRegistry<&'static str> = RendererRegistry::new();
        registry.register(Arc::new(Fixed(WidgetKind::Hidden, "hidden")));
        registry.register(Arc::new(Fixed(WidgetKind::Checkbox, "checkbox")));

        let hidden =
            ControlDescriptor::new("geom", WidgetKind::Hidden, CanonicalDataType::Geometry);
        let checkbox =
            ControlDescriptor::new("active", WidgetKind::Checkbox, CanonicalDataType::Boolean);
        assert_eq!(registry.render(&hidden).unwrap(), "hidden");
        assert_eq!(registry.render(&checkbox).unwrap(), "checkbox");
        assert!(registry.supports(WidgetKind::Hidden));
        assert!(!registry.supports(WidgetKind::DatePicker));
    }

    #[test]
    fn test_missing_renderer() {
        let registry: RendererRegistry<&'static str> = RendererRegistry::default();
        let control =
            ControlDescriptor::new("when", WidgetKind::DatePicker, CanonicalDataType::Date);
        match registry.render(&control) {
            Err(FormError::Render(RenderError::NoRenderer { widget })) => {
                assert_eq!(widget, WidgetKind::DatePicker);
            },
            other => panic!("unexpected result: {other:?}"),
        }
    }

    #[test]
    fn test_renderer_failure_propagates() {
        let mut registry: RendererRegistry<&'static str> = RendererRegistry::new();
        registry.register(Arc::new(Fixed(WidgetKind::PlainInput, "input")));
        let control = ControlDescriptor::new("", WidgetKind::PlainInput, CanonicalDataType::Text);
        assert!(matches!(
            registry.render(&control),
            Err(FormError::Render(RenderError::Failed { .. }))
        ));
    }

    #[test]
    fn test_register_replaces() {
        let mut registry: RendererRegistry<&'static str> = RendererRegistry::new();
        registry.register(Arc::new(Fixed(WidgetKind::PlainInput, "first")));
        registry.register(Arc::new(Fixed(WidgetKind::PlainInput, "second")));
        let control = ControlDescriptor::new("x", WidgetKind::PlainInput, CanonicalDataType::Text);
        assert_eq!(registry.render(&control).unwrap(), "second");
    }
}
