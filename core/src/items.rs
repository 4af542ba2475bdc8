//! Date input sub-field positions and flag sets.
//!
//! A date input is made of up to three textual sub-fields. [`DatePart`] names a
//! single position and [`DateInputItems`] is a set of positions, used both for
//! "which items render" and "which items are in error".

use bitflags::bitflags;
use serde::{Deserialize, Serialize};
use std::fmt;

bitflags! {
    /// A set of date input sub-fields.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
    pub struct DateInputItems: u8 {
        /// The day sub-field.
        const DAY = 0b001;
        /// The month sub-field.
        const MONTH = 0b010;
        /// The year sub-field.
        const YEAR = 0b100;
    }
}

impl DateInputItems {
    /// Iterate the parts in this set in canonical Day → Month → Year order.
    pub fn parts(self) -> impl Iterator<Item = DatePart> {
        DatePart::ALL
            .into_iter()
            .filter(move |part| self.contains(part.flag()))
    }

    /// The first part of this set in canonical order, if any.
    #[must_use]
    pub fn first_part(self) -> Option<DatePart> {
        self.parts().next()
    }
}

/// One sub-field position of a date input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum DatePart {
    /// Position 0.
    Day = 0,
    /// Position 1.
    Month = 1,
    /// Position 2.
    Year = 2,
}

impl DatePart {
    /// All parts in canonical order.
    pub const ALL: [Self; 3] = [Self::Day, Self::Month, Self::Year];

    /// The flag for this part.
    #[must_use]
    pub const fn flag(self) -> DateInputItems {
        match self {
            Self::Day => DateInputItems::DAY,
            Self::Month => DateInputItems::MONTH,
            Self::Year => DateInputItems::YEAR,
        }
    }

    /// Position used to index per-part arrays.
    #[must_use]
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Suffix appended to the field name and id, e.g. `DateOfBirth.Day`.
    #[must_use]
    pub const fn suffix(self) -> &'static str {
        match self {
            Self::Day => "Day",
            Self::Month => "Month",
            Self::Year => "Year",
        }
    }

    /// Element name used in declaration identities, e.g. `govuk-date-input-day`.
    #[must_use]
    pub const fn tag(self) -> &'static str {
        match self {
            Self::Day => "day",
            Self::Month => "month",
            Self::Year => "year",
        }
    }

    /// Width modifier class for the rendered input.
    #[must_use]
    pub const fn width_class(self) -> &'static str {
        match self {
            Self::Day | Self::Month => "govuk-input--width-2",
            Self::Year => "govuk-input--width-4",
        }
    }
}

impl fmt::Display for DatePart {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.suffix())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parts_iterate_in_canonical_order() {
        let items = DateInputItems::YEAR | DateInputItems::DAY;
        let parts: Vec<_> = items.parts().collect();
        assert_eq!(parts, vec![DatePart::Day, DatePart::Year]);
    }

    #[test]
    fn test_first_part() {
        assert_eq!(
            (DateInputItems::MONTH | DateInputItems::YEAR).first_part(),
            Some(DatePart::Month)
        );
        assert_eq!(DateInputItems::empty().first_part(), None);
    }

    #[test]
    fn test_part_flags_and_indexes() {
        for (i, part) in DatePart::ALL.into_iter().enumerate() {
            assert_eq!(part.index(), i);
            assert_eq!(part.flag().bits(), 1 << i);
        }
    }
}
