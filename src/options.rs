use std::fmt;
use std::num::NonZeroU8;

use serde::{Deserialize, Serialize, Serializer};

use crate::consts::{MAX_YEAR_SPAN, MIN_YEAR};
use crate::{ParseError, SchoolClass, Year, year_span_for};

/// One selectable entry of the year control.
/// The label is the plain decimal text of the value, never zero-padded,
/// matching what the host page shows the user.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct YearOption {
    value: Year,
    label: String,
}

impl YearOption {
    fn from_year(year: Year) -> Self {
        Self {
            label: year.to_string(),
            value: year,
        }
    }

    /// Returns the option's year value as u8
    #[inline]
    pub const fn value(&self) -> u8 {
        self.value.get()
    }

    /// Returns the typed year value
    #[inline]
    pub const fn year(&self) -> Year {
        self.value
    }

    /// Returns the display text of this option
    pub fn label(&self) -> &str {
        &self.label
    }
}

impl fmt::Display for YearOption {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.label)
    }
}

impl<'de> Deserialize<'de> for YearOption {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        #[derive(Deserialize)]
        struct Raw {
            value: Year,
            label: String,
        }

        let raw = Raw::deserialize(deserializer)?;
        let option = Self::from_year(raw.value);
        if raw.label != option.label {
            return Err(serde::de::Error::custom(OptionsError::LabelMismatch {
                value: raw.value.get(),
                label: raw.label,
            }));
        }
        Ok(option)
    }
}

/// Error type for building year option sets.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum OptionsError {
    /// Span is outside the range any class can have.
    #[error("Invalid year span: {0} (must be {MIN_YEAR}-{MAX_YEAR_SPAN})")]
    InvalidSpan(u8),

    /// Values do not form the contiguous run starting at 1.
    #[error("Year options out of sequence: expected {expected}, found {found}")]
    OutOfSequence { expected: u8, found: u8 },

    /// Option label disagrees with its value.
    #[error("Option label {label:?} does not match value {value}")]
    LabelMismatch { value: u8, label: String },

    /// Error validating a year value.
    #[error(transparent)]
    ParseError(#[from] ParseError),
}

/// The complete option list of the year control: exactly the years
/// `1, 2, ..., span` in ascending order, with no gaps or duplicates.
/// A set is always built whole and replaced whole, never patched.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct YearOptions {
    options: Vec<YearOption>,
}

impl YearOptions {
    /// Creates the option set `1..=span`.
    ///
    /// # Errors
    /// Returns `OptionsError::InvalidSpan` if span is 0 or > `MAX_YEAR_SPAN`.
    pub fn with_span(span: u8) -> Result<Self, OptionsError> {
        if !(MIN_YEAR..=MAX_YEAR_SPAN).contains(&span) {
            return Err(OptionsError::InvalidSpan(span));
        }
        Ok(Self::build(span))
    }

    /// Creates the option set for a recognized class
    pub fn for_class(class: SchoolClass) -> Self {
        Self::build(class.year_span())
    }

    /// Creates the option set for a raw class form value, applying the
    /// default span to unrecognized values. Never fails.
    pub fn for_value(value: &str) -> Self {
        Self::build(year_span_for(value))
    }

    /// Rebuilds a set from raw year values, enforcing the contiguous-run
    /// invariant.
    ///
    /// # Errors
    /// Returns `OptionsError` if the list is empty, a value is out of range,
    /// or the values are not exactly `1, 2, ...` in order.
    pub fn from_values(values: &[u8]) -> Result<Self, OptionsError> {
        let span = u8::try_from(values.len()).map_err(|_| OptionsError::InvalidSpan(u8::MAX))?;
        if !(MIN_YEAR..=MAX_YEAR_SPAN).contains(&span) {
            return Err(OptionsError::InvalidSpan(span));
        }
        let mut options = Vec::with_capacity(values.len());
        for (expected, &value) in (MIN_YEAR..=span).zip(values.iter()) {
            if value != expected {
                return Err(OptionsError::OutOfSequence {
                    expected,
                    found: value,
                });
            }
            let year = Year::try_from(value)?;
            options.push(YearOption::from_year(year));
        }
        Ok(Self { options })
    }

    // span is already bounded by MIN_YEAR..=MAX_YEAR_SPAN here
    fn build(span: u8) -> Self {
        let options = (MIN_YEAR..=span)
            .filter_map(NonZeroU8::new)
            .map(|value| YearOption::from_year(Year::from_non_zero(value)))
            .collect();
        Self { options }
    }

    /// Returns the number of options in the set
    pub fn len(&self) -> usize {
        self.options.len()
    }

    /// Always false: a set holds at least year 1. Kept for API completeness.
    pub fn is_empty(&self) -> bool {
        self.options.is_empty()
    }

    /// Returns the span this set covers (equal to its length)
    pub fn span(&self) -> u8 {
        // len is bounded by MAX_YEAR_SPAN
        u8::try_from(self.options.len()).unwrap_or(MAX_YEAR_SPAN)
    }

    /// Iterates the options in ascending year order
    pub fn iter(&self) -> std::slice::Iter<'_, YearOption> {
        self.options.iter()
    }

    /// Returns the options as a slice
    pub fn as_slice(&self) -> &[YearOption] {
        &self.options
    }

    /// Returns the raw year values in order
    pub fn values(&self) -> Vec<u8> {
        self.options.iter().map(YearOption::value).collect()
    }

    /// Returns the display labels in order
    pub fn labels(&self) -> Vec<&str> {
        self.options.iter().map(YearOption::label).collect()
    }

    /// Checks whether a year value is selectable in this set
    pub fn contains(&self, value: u8) -> bool {
        (MIN_YEAR..=self.span()).contains(&value)
    }
}

impl fmt::Display for YearOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (index, option) in self.options.iter().enumerate() {
            if index > 0 {
                f.write_str(", ")?;
            }
            f.write_str(option.label())?;
        }
        Ok(())
    }
}

impl<'a> IntoIterator for &'a YearOptions {
    type Item = &'a YearOption;
    type IntoIter = std::slice::Iter<'a, YearOption>;

    fn into_iter(self) -> Self::IntoIter {
        self.options.iter()
    }
}

impl Serialize for YearOptions {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_seq(self.options.iter())
    }
}

impl<'de> Deserialize<'de> for YearOptions {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let options = Vec::<YearOption>::deserialize(deserializer)?;
        let values: Vec<u8> = options.iter().map(YearOption::value).collect();
        Self::from_values(&values).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_with_span_cases() {
        struct TestCase {
            span: u8,
            should_succeed: bool,
            description: &'static str,
        }

        let cases = [
            TestCase {
                span: 1,
                should_succeed: true,
                description: "minimum span",
            },
            TestCase {
                span: 3,
                should_succeed: true,
                description: "lower secondary span",
            },
            TestCase {
                span: 5,
                should_succeed: true,
                description: "maximum span",
            },
            TestCase {
                span: 0,
                should_succeed: false,
                description: "zero span has no options",
            },
            TestCase {
                span: 6,
                should_succeed: false,
                description: "beyond any class span",
            },
        ];

        for case in &cases {
            let result = YearOptions::with_span(case.span);
            assert_eq!(
                result.is_ok(),
                case.should_succeed,
                "span {} ({})",
                case.span,
                case.description
            );
        }
    }

    #[test]
    fn test_for_class() {
        let options = YearOptions::for_class(SchoolClass::LowerSecondary);
        assert_eq!(options.values(), vec![1, 2, 3]);

        let options = YearOptions::for_class(SchoolClass::UpperSecondary);
        assert_eq!(options.values(), vec![1, 2, 3, 4, 5]);
    }

    #[test]
    fn test_for_value_fallback() {
        let options = YearOptions::for_value("sec1");
        assert_eq!(options.values(), vec![1, 2, 3]);

        let options = YearOptions::for_value("");
        assert_eq!(options.values(), vec![1, 2, 3, 4, 5]);

        let options = YearOptions::for_value("not-a-class");
        assert_eq!(options.values(), vec![1, 2, 3, 4, 5]);
    }

    #[test]
    fn test_invariant_ascending_no_gaps() {
        for span in 1..=5 {
            let options = YearOptions::with_span(span).unwrap();
            let values = options.values();
            assert_eq!(values.len(), span as usize);
            for (index, value) in values.iter().enumerate() {
                assert_eq!(usize::from(*value), index + 1, "span {span}");
            }
        }
    }

    #[test]
    fn test_labels_match_values() {
        let options = YearOptions::with_span(5).unwrap();
        assert_eq!(options.labels(), vec!["1", "2", "3", "4", "5"]);
        for option in &options {
            assert_eq!(option.label(), option.value().to_string());
        }
    }

    #[test]
    fn test_labels_not_zero_padded() {
        let options = YearOptions::with_span(3).unwrap();
        for option in &options {
            assert!(!option.label().starts_with('0'));
            assert_eq!(option.label().len(), 1);
        }
    }

    #[test]
    fn test_contains() {
        let options = YearOptions::with_span(3).unwrap();
        assert!(options.contains(1));
        assert!(options.contains(3));
        assert!(!options.contains(0));
        assert!(!options.contains(4));
    }

    #[test]
    fn test_len_and_span() {
        let options = YearOptions::with_span(4).unwrap();
        assert_eq!(options.len(), 4);
        assert_eq!(options.span(), 4);
        assert!(!options.is_empty());
    }

    #[test]
    fn test_from_values_valid() {
        let options = YearOptions::from_values(&[1, 2, 3]).unwrap();
        assert_eq!(options, YearOptions::with_span(3).unwrap());
    }

    #[test]
    fn test_from_values_rejects_gaps() {
        let result = YearOptions::from_values(&[1, 3]);
        assert!(matches!(
            result,
            Err(OptionsError::OutOfSequence {
                expected: 2,
                found: 3
            })
        ));
    }

    #[test]
    fn test_from_values_rejects_wrong_start() {
        let result = YearOptions::from_values(&[2, 3]);
        assert!(matches!(
            result,
            Err(OptionsError::OutOfSequence {
                expected: 1,
                found: 2
            })
        ));
    }

    #[test]
    fn test_from_values_rejects_duplicates() {
        let result = YearOptions::from_values(&[1, 1, 2]);
        assert!(matches!(result, Err(OptionsError::OutOfSequence { .. })));
    }

    #[test]
    fn test_from_values_rejects_empty() {
        let result = YearOptions::from_values(&[]);
        assert!(matches!(result, Err(OptionsError::InvalidSpan(0))));
    }

    #[test]
    fn test_display() {
        let options = YearOptions::with_span(3).unwrap();
        assert_eq!(options.to_string(), "1, 2, 3");

        let options = YearOptions::with_span(1).unwrap();
        assert_eq!(options.to_string(), "1");
    }

    #[test]
    fn test_serde_shape() {
        let options = YearOptions::with_span(2).unwrap();
        let json = serde_json::to_string(&options).unwrap();
        assert_eq!(json, r#"[{"value":1,"label":"1"},{"value":2,"label":"2"}]"#);

        let parsed: YearOptions = serde_json::from_str(&json).unwrap();
        assert_eq!(options, parsed);
    }

    #[test]
    fn test_serde_rejects_gapped_list() {
        let json = r#"[{"value":1,"label":"1"},{"value":3,"label":"3"}]"#;
        let result: Result<YearOptions, _> = serde_json::from_str(json);
        assert!(result.is_err());
    }

    #[test]
    fn test_serde_rejects_label_mismatch() {
        let json = r#"[{"value":1,"label":"01"}]"#;
        let result: Result<YearOptions, _> = serde_json::from_str(json);
        assert!(result.is_err());
    }

    #[test]
    fn test_option_accessors() {
        let options = YearOptions::with_span(2).unwrap();
        let first = &options.as_slice()[0];
        assert_eq!(first.value(), 1);
        assert_eq!(first.year().get(), 1);
        assert_eq!(first.label(), "1");
        assert_eq!(first.to_string(), "1");
    }
}
