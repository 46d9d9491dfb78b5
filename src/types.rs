use crate::ParseError;
use crate::consts::{
    DEFAULT_YEAR_SPAN, LOWER_SECONDARY, LOWER_SECONDARY_SPAN, MAX_YEAR_SPAN, MIN_YEAR,
    UPPER_SECONDARY, UPPER_SECONDARY_SPAN,
};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::num::NonZeroU8;
use std::str::FromStr;

/// A recognized school class level.
/// Each class fixes how many years of study can be selected,
/// so the year control never offers a year the class does not have.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum SchoolClass {
    /// Lower secondary school ("sec1"), a 3-year track
    LowerSecondary,
    /// Upper secondary school ("sec2"), a 5-year track
    UpperSecondary,
}

impl SchoolClass {
    /// Returns the class matching a raw form value, or `None` if the value
    /// is not one of the recognized identifiers.
    pub fn from_value(value: &str) -> Option<Self> {
        match value {
            LOWER_SECONDARY => Some(Self::LowerSecondary),
            UPPER_SECONDARY => Some(Self::UpperSecondary),
            _ => None,
        }
    }

    /// Returns the form value identifying this class
    #[inline]
    pub const fn value(self) -> &'static str {
        match self {
            Self::LowerSecondary => LOWER_SECONDARY,
            Self::UpperSecondary => UPPER_SECONDARY,
        }
    }

    /// Returns the number of selectable years of study for this class
    #[inline]
    pub const fn year_span(self) -> u8 {
        match self {
            Self::LowerSecondary => LOWER_SECONDARY_SPAN,
            Self::UpperSecondary => UPPER_SECONDARY_SPAN,
        }
    }
}

impl FromStr for SchoolClass {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            return Err(ParseError::EmptyInput);
        }
        Self::from_value(trimmed).ok_or_else(|| ParseError::UnknownClass(trimmed.to_owned()))
    }
}

impl TryFrom<String> for SchoolClass {
    type Error = ParseError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<SchoolClass> for String {
    fn from(class: SchoolClass) -> Self {
        class.value().to_owned()
    }
}

impl fmt::Display for SchoolClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.value())
    }
}

/// A year of study guaranteed to be in the range `1..=span` for the span it
/// was validated against. Uses `NonZeroU8` internally, so 0 is not a valid year.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct Year(NonZeroU8);

impl Year {
    /// Creates a new Year, validating that it's non-zero and within the given span
    ///
    /// # Errors
    /// Returns `ParseError::InvalidYear` if the value is 0 or > `span`.
    pub fn new(value: u8, span: u8) -> Result<Self, ParseError> {
        debug_assert!((MIN_YEAR..=MAX_YEAR_SPAN).contains(&span));
        let non_zero = NonZeroU8::new(value).ok_or(ParseError::InvalidYear { year: value, span })?;
        if value > span {
            return Err(ParseError::InvalidYear { year: value, span });
        }
        Ok(Self(non_zero))
    }

    /// Returns the year value as u8
    #[inline]
    pub const fn get(self) -> u8 {
        self.0.get()
    }

    // Callers must have already bounded the value by a valid span.
    pub(crate) const fn from_non_zero(value: NonZeroU8) -> Self {
        Self(value)
    }
}

impl TryFrom<u8> for Year {
    type Error = ParseError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        // No span context here, so validate against the largest span any class has
        Self::new(value, MAX_YEAR_SPAN)
    }
}

impl From<Year> for u8 {
    fn from(year: Year) -> Self {
        year.0.get()
    }
}

impl fmt::Display for Year {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

// Helper functions

/// Year span for a raw class form value.
/// Unrecognized or unset values silently get the default span; the form
/// never surfaces an error for a class it does not know.
pub fn year_span_for(value: &str) -> u8 {
    match SchoolClass::from_value(value) {
        Some(class) => class.year_span(),
        None => DEFAULT_YEAR_SPAN,
    }
}
