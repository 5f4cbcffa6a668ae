//! Editor kind registry.
//!
//! This module provides the fixed table that maps a provider's editor-widget code
//! to the abstract [`WidgetKind`] a form should show, together with a read-only
//! flag. The set is closed: there is no way to register additional kinds, and
//! codes outside the table resolve to a plain input.
//!
//! # Examples
//!
//! ```
//! use geoform_core::descriptor::WidgetKind;
//! use geoform_core::editor_kinds::{EditorKind, find_editor_kind, resolve_widget};
//!
//! let value_map = find_editor_kind(3).expect("value map should exist");
//! assert_eq!(value_map.kind, EditorKind::ValueMap);
//! assert_eq!(value_map.widget, WidgetKind::SingleSelect);
//!
//! // Unknown codes never fail
//! assert_eq!(resolve_widget(999), WidgetKind::PlainInput);
//! ```

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::descriptor::WidgetKind;

/// Editor kind code used when no editor configuration is supplied.
pub const DEFAULT_EDITOR_CODE: i32 = 0;

/// The source system's classification of how a field is edited.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum EditorKind {
    /// Simple line edit (code 0, also the default).
    LineEdit,
    /// Pick one of the values already used in the column (code 2).
    UniqueValues,
    /// Fixed key/value pairs (code 3).
    ValueMap,
    /// Values of the layer's classification renderer (code 4).
    Classification,
    /// Numeric values between a minimum and a maximum (code 5).
    Range,
    /// Two-state value with configurable literals (code 7).
    CheckBox,
    /// File chooser (code 8).
    FileName,
    /// Read-only value (code 10).
    Immutable,
    /// Invisible value (code 11).
    Hidden,
    /// Multi-line text (code 12).
    TextEdit,
    /// Date picker (code 13).
    Calendar,
    /// Lookup against another layer (code 15).
    ValueRelation,
    /// Read-only generated UUID (code 16).
    UuidGenerator,
    /// Values permitted by the column type, provider-dependent (code -1).
    Enumeration,
}

impl EditorKind {
    /// Maps a provider editor code onto a kind. Returns `None` for codes outside
    /// the fixed set.
    ///
    /// # Examples
    ///
    /// ```
    /// use geoform_core::editor_kinds::EditorKind;
    ///
    /// assert_eq!(EditorKind::from_code(-1), Some(EditorKind::Enumeration));
    /// assert_eq!(EditorKind::from_code(1), None);
    /// ```
    #[must_use]
    pub fn from_code(code: i32) -> Option<Self> {
        EDITOR_KINDS
            .iter()
            .find(|info| info.code == code)
            .map(|info| info.kind)
    }

    /// Returns the provider editor code of this kind.
    #[must_use]
    pub fn code(&self) -> i32 {
        match self {
            Self::LineEdit => 0,
            Self::UniqueValues => 2,
            Self::ValueMap => 3,
            Self::Classification => 4,
            Self::Range => 5,
            Self::CheckBox => 7,
            Self::FileName => 8,
            Self::Immutable => 10,
            Self::Hidden => 11,
            Self::TextEdit => 12,
            Self::Calendar => 13,
            Self::ValueRelation => 15,
            Self::UuidGenerator => 16,
            Self::Enumeration => -1,
        }
    }

    /// Returns the registry entry of this kind.
    #[must_use]
    pub fn info(&self) -> &'static EditorKindInfo {
        let code = self.code();
        // Every variant has exactly one row, see `test_registry_covers_every_variant`.
        EDITOR_KINDS
            .iter()
            .find(|info| info.code == code)
            .unwrap_or(&EDITOR_KINDS[0])
    }
}

impl fmt::Display for EditorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.info().name)
    }
}

/// One row of the editor kind registry.
#[derive(Debug, Clone, Copy)]
pub struct EditorKindInfo {
    /// Provider editor code.
    pub code: i32,
    /// The kind this code identifies.
    pub kind: EditorKind,
    /// Display name (e.g., `"Value map"`).
    pub name: &'static str,
    /// Short description of the editor's behaviour.
    pub description: &'static str,
    /// Widget kind the editor translates to.
    pub widget: WidgetKind,
    /// Whether the resulting control is read-only.
    pub read_only: bool,
}

impl EditorKindInfo {
    /// Creates a registry row.
    #[must_use]
    pub const fn new(
        kind: EditorKind,
        code: i32,
        name: &'static str,
        description: &'static str,
        widget: WidgetKind,
        read_only: bool,
    ) -> Self {
        Self {
            code,
            kind,
            name,
            description,
            widget,
            read_only,
        }
    }
}

static EDITOR_KINDS: [EditorKindInfo; 14] = {
    use EditorKind as K;
    use WidgetKind::{Checkbox, DatePicker, Hidden, MultilineText, PlainInput, SingleSelect};

    [
        EditorKindInfo::new(
            K::LineEdit,
            0,
            "Line edit",
            "Single line text box",
            PlainInput,
            false,
        ),
        EditorKindInfo::new(
            K::UniqueValues,
            2,
            "Unique values",
            "One of the values already present in the column",
            PlainInput,
            false,
        ),
        EditorKindInfo::new(
            K::FileName,
            8,
            "File name",
            "Path chosen through a file dialog",
            PlainInput,
            false,
        ),
        EditorKindInfo::new(
            K::Enumeration,
            -1,
            "Enumeration",
            "Values allowed by the column type, when the provider supports it",
            PlainInput,
            false,
        ),
        EditorKindInfo::new(
            K::Immutable,
            10,
            "Immutable",
            "Value is shown but cannot be changed",
            PlainInput,
            true,
        ),
        EditorKindInfo::new(
            K::ValueMap,
            3,
            "Value map",
            "Predefined items; the description is shown, the value is stored",
            SingleSelect,
            false,
        ),
        EditorKindInfo::new(
            K::Classification,
            4,
            "Classification",
            "Values used by the layer's classification renderer",
            SingleSelect,
            false,
        ),
        EditorKindInfo::new(
            K::Range,
            5,
            "Range",
            "Numeric values between a minimum and a maximum",
            SingleSelect,
            false,
        ),
        EditorKindInfo::new(
            K::ValueRelation,
            15,
            "Value relation",
            "Key and value columns looked up in another layer",
            SingleSelect,
            false,
        ),
        EditorKindInfo::new(
            K::Hidden,
            11,
            "Hidden",
            "Value is neither shown nor editable",
            Hidden,
            false,
        ),
        EditorKindInfo::new(
            K::CheckBox,
            7,
            "Checkbox",
            "Two states, each stored as a configured literal",
            Checkbox,
            false,
        ),
        EditorKindInfo::new(
            K::TextEdit,
            12,
            "Text edit",
            "Multi-line text",
            MultilineText,
            false,
        ),
        EditorKindInfo::new(
            K::Calendar,
            13,
            "Calendar",
            "Date chosen from a calendar",
            DatePicker,
            false,
        ),
        EditorKindInfo::new(
            K::UuidGenerator,
            16,
            "UUID generator",
            "Read-only value generated as a UUID when empty",
            PlainInput,
            true,
        ),
    ]
};

/// Returns the complete editor kind registry, in table order.
#[must_use]
pub fn get_editor_kinds() -> &'static [EditorKindInfo] {
    &EDITOR_KINDS
}

/// Finds the registry row of a provider editor code.
///
/// Returns `None` if the code is outside the fixed set.
#[must_use]
pub fn find_editor_kind(code: i32) -> Option<&'static EditorKindInfo> {
    EDITOR_KINDS.iter().find(|info| info.code == code)
}

/// Resolves a provider editor code to a widget kind.
///
/// Codes outside the fixed set fall back to [`WidgetKind::PlainInput`].
#[must_use]
pub fn resolve_widget(code: i32) -> WidgetKind {
    find_editor_kind(code).map_or(WidgetKind::PlainInput, |info| info.widget)
}
