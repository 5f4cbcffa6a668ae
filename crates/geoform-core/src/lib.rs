//! `geoform-core` translates a GIS layer's field metadata and editor-widget
//! configuration into renderer-agnostic form control descriptors.
//!
//! This crate includes:
//! - **Lookup Tables**: the fixed raw-type cast table ([`data_types`]) and the editor
//!   kind registry ([`editor_kinds`]).
//! - **Field Control Builder**: resolution of a field's widget kind and the population
//!   of its choices ([`builder`], [`options`]).
//! - **Descriptors**: the neutral output consumed by a form-rendering layer
//!   ([`descriptor`]), value checks against it ([`validation`]) and the per-widget
//!   renderer seam ([`render`]).
//!
//! Construction is pure and synchronous; descriptors for different fields can be
//! built independently and in parallel.

pub mod builder;
pub mod data_types;
pub mod descriptor;
pub mod editor_kinds;
pub mod error;
pub mod options;
pub mod render;
pub mod types;
pub mod validation;

pub use builder::{FieldControlBuilder, build_control};
pub use descriptor::{ControlData, ControlDescriptor, WidgetKind};
pub use error::{FieldError, FormError, Result};
