//! The sub-field representation exchanged with converters.

use crate::items::{DateInputItems, DatePart};
use serde::Serialize;

/// Up to three parsed sub-field values plus which of them were supplied.
///
/// A value being present implies it was supplied. The converse does not hold:
/// a sub-field can be supplied as blank or unparseable text, in which case it is
/// supplied but has no value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct ItemValue {
    values: [Option<i32>; 3],
    supplied: [bool; 3],
}

impl ItemValue {
    /// Create an item value where every present part counts as supplied.
    #[must_use]
    pub const fn new(day: Option<i32>, month: Option<i32>, year: Option<i32>) -> Self {
        Self {
            values: [day, month, year],
            supplied: [day.is_some(), month.is_some(), year.is_some()],
        }
    }

    /// Parse raw submitted text for each part.
    ///
    /// `None` means the part was not on the wire at all. Text is trimmed; blank
    /// or non-numeric text is recorded as supplied without a value.
    #[must_use]
    pub fn parse(day: Option<&str>, month: Option<&str>, year: Option<&str>) -> Self {
        let mut value = Self::default();
        for (part, raw) in DatePart::ALL.into_iter().zip([day, month, year]) {
            if let Some(raw) = raw {
                value = value.with_supplied(part, raw.trim().parse().ok());
            }
        }
        value
    }

    /// The day value.
    #[must_use]
    pub const fn day(&self) -> Option<i32> {
        self.values[0]
    }

    /// The month value.
    #[must_use]
    pub const fn month(&self) -> Option<i32> {
        self.values[1]
    }

    /// The year value.
    #[must_use]
    pub const fn year(&self) -> Option<i32> {
        self.values[2]
    }

    /// The value of `part`.
    #[must_use]
    pub const fn get(&self, part: DatePart) -> Option<i32> {
        self.values[part.index()]
    }

    /// Whether `part` was supplied, with or without a usable value.
    #[must_use]
    pub const fn is_supplied(&self, part: DatePart) -> bool {
        self.supplied[part.index()]
    }

    /// Return a copy with `part` marked supplied and set to `value`.
    #[must_use]
    pub const fn with_supplied(mut self, part: DatePart, value: Option<i32>) -> Self {
        self.values[part.index()] = value;
        self.supplied[part.index()] = true;
        self
    }

    /// The set of supplied parts.
    #[must_use]
    pub fn supplied(&self) -> DateInputItems {
        DatePart::ALL
            .into_iter()
            .filter(|part| self.is_supplied(*part))
            .fold(DateInputItems::empty(), |acc, part| acc | part.flag())
    }

    /// The parts of `required` that have no value.
    #[must_use]
    pub fn missing(&self, required: DateInputItems) -> DateInputItems {
        required
            .parts()
            .filter(|part| self.get(*part).is_none())
            .fold(DateInputItems::empty(), |acc, part| acc | part.flag())
    }

    /// Render `part` the way it is shown in an input, or an empty string.
    #[must_use]
    pub fn display(&self, part: DatePart) -> String {
        self.get(part).map(|v| v.to_string()).unwrap_or_default()
    }
}

/// A value that may have been explicitly specified, possibly as empty.
///
/// `Specified(None)` differs from `Unspecified`: it is an explicit request to
/// render nothing, and it still takes precedence over lower-priority sources.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Explicit<T> {
    /// No explicit value was given.
    Unspecified,
    /// An explicit value was given.
    Specified(Option<T>),
}

impl<T> Explicit<T> {
    /// Whether a value was explicitly given.
    #[must_use]
    pub const fn is_specified(&self) -> bool {
        matches!(self, Self::Specified(_))
    }

    /// Borrow the explicit value, if one was given.
    #[must_use]
    pub const fn as_specified(&self) -> Option<Option<&T>> {
        match self {
            Self::Unspecified => None,
            Self::Specified(value) => Some(value.as_ref()),
        }
    }
}

impl<T> Default for Explicit<T> {
    fn default() -> Self {
        Self::Unspecified
    }
}
