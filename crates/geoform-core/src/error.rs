//! Custom error types for form control construction and validation.
//!
//! Construction has exactly one hard failure: a raw data type that is missing from
//! the cast table. Everything else (unknown editor kinds, missing aliases, missing
//! category lists) is recovered locally and never surfaces here. The remaining
//! variants belong to value validation and to the renderer seam.

use thiserror::Error;

use crate::descriptor::WidgetKind;

/// Main error type for `geoform` operations.
///
/// It uses `#[error(transparent)]` to delegate display formatting to the
/// underlying error variants.
#[derive(Debug, Error)]
pub enum FormError {
    /// Errors building a control from field metadata
    #[error(transparent)]
    Field(#[from] FieldError),

    /// A submitted value does not satisfy the control's rules
    #[error(transparent)]
    Value(#[from] ValueError),

    /// Errors dispatching a control to a renderer
    #[error(transparent)]
    Render(#[from] RenderError),
}

/// Field construction errors.
///
/// These are fatal to a single field only. Whether the whole form is aborted or the
/// field skipped is up to the caller.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum FieldError {
    /// The raw storage type has no entry in the cast table
    #[error("Field '{field}' has unknown data type '{data_type}'")]
    UnknownDataType {
        /// The field identifier
        field: String,
        /// The raw data type as supplied by the provider
        data_type: String,
    },
}

/// Errors raised when a submitted value is checked against a control.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValueError {
    /// A required control received no value
    #[error("Field '{field}' is required")]
    Required {
        /// The field identifier
        field: String,
    },

    /// The value is not one of the stored values of a selection control
    #[error("Field '{field}' does not accept '{value}': not one of the available choices")]
    NotAnOption {
        /// The field identifier
        field: String,
        /// The rejected value
        value: String,
    },

    /// The value is neither the checked nor the unchecked literal
    #[error("Field '{field}' expects '{on}' or '{off}', found '{value}'")]
    InvalidCheckboxValue {
        /// The field identifier
        field: String,
        /// The rejected value
        value: String,
        /// Literal stored when checked
        on: String,
        /// Literal stored when unchecked
        off: String,
    },

    /// The value does not parse as the control's value type
    #[error("Field '{field}' expects {expected}, found '{value}'")]
    TypeMismatch {
        /// The field identifier
        field: String,
        /// Human readable name of the expected type
        expected: String,
        /// The rejected value
        value: String,
    },
}

/// Renderer dispatch errors.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RenderError {
    /// No renderer is registered for the widget kind
    #[error("No renderer registered for widget kind '{widget}'")]
    NoRenderer {
        /// The widget kind that could not be dispatched
        widget: WidgetKind,
    },

    /// A renderer accepted the control but failed to produce output
    #[error("Renderer for '{widget}' failed: {message}")]
    Failed {
        /// The widget kind being rendered
        widget: WidgetKind,
        /// Description of the failure
        message: String,
    },
}

/// Type alias for Results using `FormError`.
pub type Result<T> = std::result::Result<T, FormError>;

impl FormError {
    /// Get a user-friendly error message.
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            Self::Field(e) => e.user_message(),
            Self::Value(e) => format!("Invalid value: {e}"),
            Self::Render(e) => format!("Render error: {e}"),
        }
    }

    /// Get recovery suggestions if available.
    #[must_use]
    pub fn recovery_suggestion(&self) -> Option<String> {
        match self {
            Self::Field(e) => e.recovery_suggestion(),
            Self::Value(e) => e.recovery_suggestion(),
            Self::Render(RenderError::NoRenderer { .. }) => {
                Some("Register a renderer for every widget kind before rendering.".to_string())
            },
            Self::Render(RenderError::Failed { .. }) => None,
        }
    }

    /// Check if this error is potentially recoverable.
    ///
    /// A rejected value can be corrected and resubmitted; an unknown data type
    /// needs the layer metadata to change.
    #[must_use]
    pub fn is_recoverable(&self) -> bool {
        matches!(self, Self::Value(_))
    }
}

impl FieldError {
    fn user_message(&self) -> String {
        match self {
            Self::UnknownDataType { field, data_type } => {
                format!("Cannot build a control for '{field}': data type '{data_type}' is not supported.")
            },
        }
    }

    fn recovery_suggestion(&self) -> Option<String> {
        match self {
            Self::UnknownDataType { .. } => Some(
                "Run 'geoform types' to see the supported data types, or skip the field with --skip-invalid."
                    .to_string(),
            ),
        }
    }
}

impl ValueError {
    fn recovery_suggestion(&self) -> Option<String> {
        match self {
            Self::Required { .. } => Some("Provide a non-empty value.".to_string()),
            Self::NotAnOption { .. } => {
                Some("Pick one of the stored values listed by 'geoform describe'.".to_string())
            },
            Self::InvalidCheckboxValue { on, off, .. } => {
                Some(format!("Use '{on}' for checked or '{off}' for unchecked."))
            },
            Self::TypeMismatch { .. } => None,
        }
    }
}
