//! Option sets for single-select controls.
//!
//! An [`OptionSet`] maps display values to stored values. Display values are
//! unique: inserting an existing display value replaces its stored value in place.
//! Sets handed out by [`build_option_set`] are sorted by display value.

use std::cmp::Ordering;
use std::collections::HashMap;

use log::warn;
use serde::{Deserialize, Serialize};

use crate::data_types::CanonicalDataType;
use crate::editor_kinds::EditorKind;
use crate::types::{Category, EditorConfig};

/// Label of the single entry offered by kinds that cannot enumerate choices yet.
pub const UNSUPPORTED_LABEL: &str = "--edit type not supported yet--";

/// Upper bound on the stepped entries of a range, boundaries excluded.
pub const MAX_RANGE_STEPS: usize = 10_000;

/// Stored side of a choice.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum OptionValue {
    /// A value written to the field when the choice is picked.
    Value(String),
    /// Placeholder for an editor kind whose choices cannot be listed.
    Unsupported,
}

impl OptionValue {
    /// The stored string, `None` for the placeholder.
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Value(value) => Some(value),
            Self::Unsupported => None,
        }
    }
}

/// One display-value → stored-value choice.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectOption {
    /// Text shown to the user.
    pub label: String,
    /// Value stored when picked.
    pub value: OptionValue,
}

/// Ordered display-value → stored-value choices.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OptionSet {
    entries: Vec<SelectOption>,
}

impl OptionSet {
    /// Creates an empty option set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates the placeholder set of an editor kind that cannot list its choices.
    #[must_use]
    pub fn unsupported() -> Self {
        Self {
            entries: vec![SelectOption {
                label: UNSUPPORTED_LABEL.to_string(),
                value: OptionValue::Unsupported,
            }],
        }
    }

    /// Inserts a choice. An existing display value keeps its position and takes
    /// the new stored value.
    pub fn insert(&mut self, label: impl Into<String>, value: impl Into<String>) {
        let label = label.into();
        let value = OptionValue::Value(value.into());
        match self.entries.iter_mut().find(|entry| entry.label == label) {
            Some(entry) => entry.value = value,
            None => self.entries.push(SelectOption { label, value }),
        }
    }

    /// Sorts the choices by display value. Stable for display values that compare
    /// equal.
    pub fn sort(&mut self) {
        self.entries.sort_by(|a, b| compare_display(&a.label, &b.label));
    }

    /// Number of choices.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether there are no choices.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Whether this is the placeholder set of an unsupported editor kind.
    #[must_use]
    pub fn is_unsupported(&self) -> bool {
        self.entries
            .iter()
            .any(|entry| entry.value == OptionValue::Unsupported)
    }

    /// Iterates over the choices in order.
    pub fn iter(&self) -> impl Iterator<Item = &SelectOption> {
        self.entries.iter()
    }

    /// Stored value of a display value.
    #[must_use]
    pub fn get(&self, label: &str) -> Option<&OptionValue> {
        self.entries
            .iter()
            .find(|entry| entry.label == label)
            .map(|entry| &entry.value)
    }

    /// Whether `value` is the stored value of some choice.
    #[must_use]
    pub fn contains_value(&self, value: &str) -> bool {
        self.entries
            .iter()
            .any(|entry| entry.value.as_str() == Some(value))
    }

    /// Display values in order.
    #[must_use]
    pub fn labels(&self) -> Vec<&str> {
        self.entries.iter().map(|entry| entry.label.as_str()).collect()
    }
}

/// Bulk insertion with the replace-in-place rule of [`OptionSet::insert`].
impl<L: Into<String>, V: Into<String>> Extend<(L, V)> for OptionSet {
    fn extend<I: IntoIterator<Item = (L, V)>>(&mut self, iter: I) {
        let mut index: HashMap<String, usize> = self
            .entries
            .iter()
            .enumerate()
            .map(|(position, entry)| (entry.label.clone(), position))
            .collect();
        for (label, value) in iter {
            let label = label.into();
            let value = OptionValue::Value(value.into());
            match index.get(&label) {
                Some(&position) => self.entries[position].value = value,
                None => {
                    index.insert(label.clone(), self.entries.len());
                    self.entries.push(SelectOption { label, value });
                },
            }
        }
    }
}

impl<'a> IntoIterator for &'a OptionSet {
    type Item = &'a SelectOption;
    type IntoIter = std::slice::Iter<'a, SelectOption>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

/// Orders display values: numbers first, compared numerically, then text,
/// compared lexicographically.
#[must_use]
pub fn compare_display(a: &str, b: &str) -> Ordering {
    match (parse_number(a), parse_number(b)) {
        (Some(x), Some(y)) => x.total_cmp(&y),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => a.cmp(b),
    }
}

fn parse_number(text: &str) -> Option<f64> {
    text.trim()
        .parse::<f64>()
        .ok()
        .filter(|number| number.is_finite())
}

/// Builds the sorted option set of an editor kind.
///
/// Returns `None` for kinds that do not enumerate inline choices (value relations
/// defer to the rendering layer; other kinds are not selections).
#[must_use]
pub fn build_option_set(
    kind: EditorKind,
    config: Option<&EditorConfig>,
    categories: Option<&[Category]>,
    data_type: CanonicalDataType,
) -> Option<OptionSet> {
    let mut options = match kind {
        EditorKind::Enumeration => OptionSet::unsupported(),
        EditorKind::ValueMap => config.map(value_map_options).unwrap_or_default(),
        EditorKind::Classification => classification_options(categories),
        EditorKind::Range => {
            let default_config = EditorConfig::for_kind(EditorKind::Range);
            range_options(config.unwrap_or(&default_config), data_type)
        },
        _ => return None,
    };
    options.sort();
    Some(options)
}

/// One choice per declared pair: the pair's value is displayed, its key stored.
#[must_use]
pub fn value_map_options(config: &EditorConfig) -> OptionSet {
    let mut options = OptionSet::new();
    options.extend(
        config
            .value_pairs
            .iter()
            .map(|pair| (pair.value.as_str(), pair.key.as_str())),
    );
    options
}

/// One choice per category: the label is displayed, the value stored.
///
/// A missing category list yields an empty set.
#[must_use]
pub fn classification_options(categories: Option<&[Category]>) -> OptionSet {
    let mut options = OptionSet::new();
    match categories {
        Some(categories) => options.extend(
            categories
                .iter()
                .map(|category| (category.label.as_str(), category.value.as_str())),
        ),
        None => warn!("Classification editor without categories, offering no choices"),
    }
    options
}

/// Numeric choices from `min` to `max` by `step`.
///
/// Integer fields step with integer arithmetic, every other type with floating
/// point. Both boundaries are always present, even when stepping misses `max`.
#[must_use]
pub fn range_options(config: &EditorConfig, data_type: CanonicalDataType) -> OptionSet {
    let mut numbers = Vec::new();
    if data_type == CanonicalDataType::Integer {
        let min = integer_attribute(config, "min");
        let max = integer_attribute(config, "max");
        let step = integer_attribute(config, "step");

        numbers.push(min.to_string());
        if step > 0 {
            let mut value = min;
            let mut steps = 0;
            while value <= max && steps < MAX_RANGE_STEPS {
                numbers.push(value.to_string());
                steps += 1;
                let Some(next) = value.checked_add(step) else {
                    break;
                };
                value = next;
            }
            if steps == MAX_RANGE_STEPS && value <= max {
                warn!("Range {min}..={max} by {step} truncated after {MAX_RANGE_STEPS} entries");
            }
        } else {
            warn!("Range step {step} is not positive, offering only the boundaries");
        }
        numbers.push(max.to_string());
    } else {
        let min = float_attribute(config, "min");
        let max = float_attribute(config, "max");
        let step = float_attribute(config, "step");

        numbers.push(format_boundary(min));
        if step > 0.0 {
            let mut steps = 0;
            loop {
                #[allow(clippy::cast_precision_loss)]
                let value = min + steps as f64 * step;
                if value > max {
                    break;
                }
                if steps == MAX_RANGE_STEPS {
                    warn!(
                        "Range {min}..={max} by {step} truncated after {MAX_RANGE_STEPS} entries"
                    );
                    break;
                }
                numbers.push(format_decimal(value));
                steps += 1;
            }
        } else {
            warn!("Range step {step} is not positive, offering only the boundaries");
        }
        numbers.push(format_boundary(max));
    }

    let mut options = OptionSet::new();
    options.extend(numbers.into_iter().map(|number| (number.clone(), number)));
    options
}

/// Reads an integer attribute. Decimal literals are truncated toward zero; absent
/// or unparseable attributes count as 0.
fn integer_attribute(config: &EditorConfig, name: &str) -> i64 {
    let raw = config.attribute_or_empty(name).trim();
    if let Ok(value) = raw.parse::<i64>() {
        return value;
    }
    match raw.parse::<f64>() {
        #[allow(clippy::cast_possible_truncation)]
        Ok(value) if value.is_finite() => value.trunc() as i64,
        _ => {
            warn!("Range attribute '{name}' = '{raw}' is not a number, using 0");
            0
        },
    }
}

/// Reads a float attribute. Absent or unparseable attributes count as 0.
fn float_attribute(config: &EditorConfig, name: &str) -> f64 {
    let raw = config.attribute_or_empty(name).trim();
    match raw.parse::<f64>() {
        Ok(value) if value.is_finite() => value,
        _ => {
            warn!("Range attribute '{name}' = '{raw}' is not a number, using 0");
            0.0
        },
    }
}

/// Formats a range boundary without rounding.
fn format_boundary(value: f64) -> String {
    let value = if value == 0.0 { 0.0 } else { value };
    format!("{value}")
}

/// Formats a stepped float with at most 10 fractional digits, trailing zeros
/// trimmed. Values closer than 1e-10 collapse into one label.
#[must_use]
pub fn format_decimal(value: f64) -> String {
    const SCALE: f64 = 1e10;
    let rounded = if value.abs() < 1e8 {
        (value * SCALE).round() / SCALE
    } else {
        value
    };
    // Avoid "-0".
    let rounded = if rounded == 0.0 { 0.0 } else { rounded };
    format!("{rounded}")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn range(min: &str, max: &str, step: &str) -> EditorConfig {
        EditorConfig::for_kind(EditorKind::Range)
            .with_attribute("min", min)
            .with_attribute("max", max)
            .with_attribute("step", step)
    }

    fn sorted(mut options: OptionSet) -> OptionSet {
        options.sort();
        options
    }

    #[test]
    fn test_insert_replaces_existing_label() {
        let mut options = OptionSet::new();
        options.insert("Apple", "a");
        options.insert("Banana", "b");
        options.insert("Apple", "z");
        assert_eq!(options.labels(), vec!["Apple", "Banana"]);
        assert_eq!(
            options.get("Apple"),
            Some(&OptionValue::Value("z".to_string()))
        );
    }

    #[test]
    fn test_compare_display_numbers_before_text() {
        let mut labels = vec!["b", "10", "a", "5", "-1.5"];
        labels.sort_by(|a, b| compare_display(a, b));
        assert_eq!(labels, vec!["-1.5", "5", "10", "a", "b"]);
    }

    #[test]
    fn test_sort_is_stable_for_equal_numbers() {
        let mut options = OptionSet::new();
        options.insert("1.0", "first");
        options.insert("0", "zero");
        options.insert("1", "second");
        options.sort();
        assert_eq!(options.labels(), vec!["0", "1.0", "1"]);
    }

    #[test]
    fn test_value_map_display_is_value() {
        let config = EditorConfig::for_kind(EditorKind::ValueMap)
            .with_value_pair("b", "Banana")
            .with_value_pair("a", "Apple");
        let options = sorted(value_map_options(&config));
        assert_eq!(options.labels(), vec!["Apple", "Banana"]);
        assert!(options.contains_value("a"));
        assert!(!options.contains_value("Apple"));
    }

    #[test]
    fn test_classification_without_categories() {
        assert!(classification_options(None).is_empty());
        assert!(classification_options(Some(&[])).is_empty());
    }

    #[test]
    fn test_integer_range_with_aligned_step() {
        let options = sorted(range_options(&range("0", "10", "5"), CanonicalDataType::Integer));
        assert_eq!(options.labels(), vec!["0", "5", "10"]);
        assert!(options.contains_value("10"));
    }

    #[test]
    fn test_integer_range_forces_max() {
        let options = sorted(range_options(&range("0", "7", "5"), CanonicalDataType::Integer));
        assert_eq!(options.labels(), vec!["0", "5", "7"]);
    }

    #[test]
    fn test_integer_range_truncates_decimal_literals() {
        let options = sorted(range_options(&range("1.9", "4", "1.5"), CanonicalDataType::Integer));
        assert_eq!(options.labels(), vec!["1", "2", "3", "4"]);
    }

    #[test]
    fn test_non_positive_step_keeps_boundaries() {
        let options = sorted(range_options(&range("2", "8", "0"), CanonicalDataType::Integer));
        assert_eq!(options.labels(), vec!["2", "8"]);

        let options = sorted(range_options(&range("2", "8", "-1"), CanonicalDataType::Float));
        assert_eq!(options.labels(), vec!["2", "8"]);
    }

    #[test]
    fn test_inverted_range_keeps_boundaries() {
        let options = sorted(range_options(&range("9", "3", "1"), CanonicalDataType::Integer));
        assert_eq!(options.labels(), vec!["3", "9"]);
    }

    #[test]
    fn test_missing_attributes_count_as_zero() {
        let config = EditorConfig::for_kind(EditorKind::Range);
        let options = range_options(&config, CanonicalDataType::Integer);
        assert_eq!(options.labels(), vec!["0"]);
    }

    #[test]
    fn test_float_range() {
        let options = sorted(range_options(&range("0", "1", "0.25"), CanonicalDataType::Float));
        assert_eq!(options.labels(), vec!["0", "0.25", "0.5", "0.75", "1"]);
    }

    #[test]
    fn test_float_range_hides_accumulated_error() {
        let options = sorted(range_options(&range("0", "0.3", "0.1"), CanonicalDataType::Float));
        assert_eq!(options.labels(), vec!["0", "0.1", "0.2", "0.3"]);
    }

    #[test]
    fn test_text_field_range_uses_float_arithmetic() {
        let options = sorted(range_options(&range("0", "1", "0.5"), CanonicalDataType::Text));
        assert_eq!(options.labels(), vec!["0", "0.5", "1"]);
    }

    #[test]
    fn test_range_is_capped() {
        let options = range_options(&range("0", "1000000", "1"), CanonicalDataType::Integer);
        assert_eq!(options.len(), MAX_RANGE_STEPS + 1);
        assert!(options.contains_value("1000000"));
    }

    #[test]
    fn test_float_range_is_capped() {
        let options = range_options(&range("0", "1e9", "0.001"), CanonicalDataType::Float);
        assert_eq!(options.len(), MAX_RANGE_STEPS + 1);
        assert!(options.contains_value("1000000000"));
        assert!(options.contains_value("9.999"));
    }

    #[test]
    fn test_unparseable_attributes_count_as_zero() {
        for data_type in [CanonicalDataType::Integer, CanonicalDataType::Float] {
            let options = sorted(range_options(&range("abc", "3", "x1"), data_type));
            assert_eq!(options.labels(), vec!["0", "3"], "{data_type}");
        }
    }

    #[test]
    fn test_integer_range_stops_on_overflow() {
        let min = (i64::MAX - 1).to_string();
        let max = i64::MAX.to_string();
        let options = sorted(range_options(&range(&min, &max, "5"), CanonicalDataType::Integer));
        assert_eq!(options.labels(), vec![min.as_str(), max.as_str()]);
    }

    #[test]
    fn test_float_boundaries_are_not_rounded() {
        let options = sorted(range_options(&range("-1", "1e-12", "0.5"), CanonicalDataType::Float));
        assert_eq!(options.labels(), vec!["-1", "-0.5", "0", "0.000000000001"]);
    }

    #[test]
    fn test_extend_replaces_existing_labels() {
        let mut options = OptionSet::new();
        options.insert("Apple", "a");
        options.extend([("Banana", "b"), ("Apple", "z"), ("Banana", "y")]);
        assert_eq!(options.labels(), vec!["Apple", "Banana"]);
        assert_eq!(options.get("Apple"), Some(&OptionValue::Value("z".to_string())));
        assert_eq!(options.get("Banana"), Some(&OptionValue::Value("y".to_string())));
    }

    #[test]
    fn test_enumeration_placeholder() {
        let options =
            build_option_set(EditorKind::Enumeration, None, None, CanonicalDataType::Text)
                .unwrap();
        assert_eq!(options.len(), 1);
        assert!(options.is_unsupported());
        assert_eq!(options.labels(), vec![UNSUPPORTED_LABEL]);
    }

    #[test]
    fn test_non_enumerating_kinds() {
        for kind in [
            EditorKind::ValueRelation,
            EditorKind::LineEdit,
            EditorKind::CheckBox,
        ] {
            assert!(build_option_set(kind, None, None, CanonicalDataType::Text).is_none());
        }
    }

    #[test]
    fn test_format_decimal() {
        assert_eq!(format_decimal(1.0), "1");
        assert_eq!(format_decimal(-0.0), "0");
        assert_eq!(format_decimal(0.1 + 0.2), "0.3");
        assert_eq!(format_decimal(2.5), "2.5");
    }
}
