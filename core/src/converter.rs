//! Converters between domain values and date input sub-fields.
//!
//! A converter handles exactly one domain type. Built-in converters cover
//! [`NaiveDate`], [`NaiveDateTime`] (midnight values) and the `(month, year)`
//! tuple [`MonthAndYear`]. Host applications register their own for any other
//! type.
//!
//! # Example
//!
//! ```
//! use govuk_forms_core::converter::{DateConverter, DateInputConverter};
//! use govuk_forms_core::ItemValue;
//! use chrono::NaiveDate;
//!
//! let value = ItemValue::parse(Some("1"), Some("4"), Some("2020"));
//! let date = DateConverter.to_model(&value).unwrap();
//! assert_eq!(date, NaiveDate::from_ymd_opt(2020, 4, 1).unwrap());
//! ```

use crate::conversion_error::ConversionError;
use crate::item_value::ItemValue;
use crate::items::DateInputItems;
use chrono::{Datelike, NaiveDate, NaiveDateTime, NaiveTime};

/// Smallest accepted year.
pub const MIN_YEAR: i32 = 1;

/// Largest accepted year.
pub const MAX_YEAR: i32 = 9999;

/// Strategy for converting one domain type to and from an [`ItemValue`].
///
/// # Thread Safety
///
/// Converters live in a process-wide registry read concurrently by many
/// requests, so they must be `Send + Sync`.
pub trait DateInputConverter: Send + Sync + 'static {
    /// The domain type this converter handles.
    type Model: Send + Sync + 'static;

    /// The sub-fields rendered when the field declares no custom items.
    fn default_items(&self) -> DateInputItems {
        DateInputItems::all()
    }

    /// Convert sub-field values into the domain type.
    ///
    /// # Errors
    ///
    /// Returns a [`ConversionError`] flagging exactly the missing or invalid
    /// sub-fields.
    fn to_model(&self, value: &ItemValue) -> Result<Self::Model, ConversionError>;

    /// Split a domain value into sub-field values.
    fn from_model(&self, model: &Self::Model) -> ItemValue;
}

/// A month and year, in that order. Months are 1-based.
pub type MonthAndYear = (u32, i32);

/// Converter for [`NaiveDate`].
#[derive(Debug, Clone, Copy, Default)]
pub struct DateConverter;

impl DateInputConverter for DateConverter {
    type Model = NaiveDate;

    fn to_model(&self, value: &ItemValue) -> Result<NaiveDate, ConversionError> {
        validate_date(value)
    }

    fn from_model(&self, model: &NaiveDate) -> ItemValue {
        split_date(*model)
    }
}

/// Converter for [`NaiveDateTime`]. Converted values are at midnight.
#[derive(Debug, Clone, Copy, Default)]
pub struct DateTimeConverter;

impl DateInputConverter for DateTimeConverter {
    type Model = NaiveDateTime;

    fn to_model(&self, value: &ItemValue) -> Result<NaiveDateTime, ConversionError> {
        validate_date(value).map(|date| date.and_time(NaiveTime::MIN))
    }

    fn from_model(&self, model: &NaiveDateTime) -> ItemValue {
        split_date(model.date())
    }
}

/// Converter for [`MonthAndYear`]. Renders only the month and year items.
#[derive(Debug, Clone, Copy, Default)]
pub struct MonthYearConverter;

impl DateInputConverter for MonthYearConverter {
    type Model = MonthAndYear;

    fn default_items(&self) -> DateInputItems {
        DateInputItems::MONTH | DateInputItems::YEAR
    }

    fn to_model(&self, value: &ItemValue) -> Result<MonthAndYear, ConversionError> {
        let year = valid_year(value);
        let month = valid_month(value);

        let mut failed = DateInputItems::empty();
        failed.set(DateInputItems::YEAR, year.is_none());
        failed.set(DateInputItems::MONTH, month.is_none());

        let (Some(month), Some(year)) = (month, year) else {
            return Err(ConversionError::flagging(failed));
        };
        Ok((month, year))
    }

    fn from_model(&self, model: &MonthAndYear) -> ItemValue {
        let (month, year) = *model;
        ItemValue::new(None, i32::try_from(month).ok(), Some(year))
    }
}

fn valid_year(value: &ItemValue) -> Option<i32> {
    value
        .year()
        .filter(|year| (MIN_YEAR..=MAX_YEAR).contains(year))
}

fn valid_month(value: &ItemValue) -> Option<u32> {
    value
        .month()
        .and_then(|month| u32::try_from(month).ok())
        .filter(|month| (1..=12).contains(month))
}

/// Number of days in `month`, widening to the largest possible value when
/// the month or year is unknown.
fn days_in_month(month: Option<u32>, year: Option<i32>) -> u32 {
    match month {
        None => 31,
        Some(2) => match year {
            Some(year) if NaiveDate::from_ymd_opt(year, 2, 29).is_none() => 28,
            _ => 29,
        },
        Some(4 | 6 | 9 | 11) => 30,
        Some(_) => 31,
    }
}

/// Check every component of a full date and build it.
///
/// Each invalid component is flagged independently so errors can be shown
/// next to the specific inputs.
fn validate_date(value: &ItemValue) -> Result<NaiveDate, ConversionError> {
    let year = valid_year(value);
    let month = valid_month(value);
    let day = value
        .day()
        .and_then(|day| u32::try_from(day).ok())
        .filter(|day| (1..=days_in_month(month, year)).contains(day));

    let mut failed = DateInputItems::empty();
    failed.set(DateInputItems::DAY, day.is_none());
    failed.set(DateInputItems::MONTH, month.is_none());
    failed.set(DateInputItems::YEAR, year.is_none());

    match (year, month, day) {
        (Some(year), Some(month), Some(day)) => NaiveDate::from_ymd_opt(year, month, day)
            .ok_or_else(|| ConversionError::flagging(DateInputItems::DAY)),
        _ => Err(ConversionError::flagging(failed)),
    }
}

fn split_date(date: NaiveDate) -> ItemValue {
    ItemValue::new(
        i32::try_from(date.day()).ok(),
        i32::try_from(date.month()).ok(),
        Some(date.year()),
    )
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)] // Test code can use unwrap/expect
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).expect("valid test date")
    }

    #[test]
    fn test_date_converter_accepts_valid_parts() {
        let value = ItemValue::parse(Some("1"), Some("4"), Some("2020"));
        assert_eq!(DateConverter.to_model(&value), Ok(date(2020, 4, 1)));
    }

    #[test]
    fn test_date_converter_flags_each_invalid_part() {
        let value = ItemValue::parse(Some("x"), Some("y"), Some("2022"));
        let err = DateConverter.to_model(&value).expect_err("invalid");
        assert_eq!(err.fields(), DateInputItems::DAY | DateInputItems::MONTH);
    }

    #[test]
    fn test_date_converter_flags_only_month() {
        let value = ItemValue::parse(Some("12"), Some("May"), Some("2021"));
        let err = DateConverter.to_model(&value).expect_err("invalid month");
        assert_eq!(err.fields(), DateInputItems::MONTH);
    }

    #[test]
    fn test_date_converter_flags_missing_parts() {
        let value = ItemValue::parse(Some("12"), None, Some(""));
        let err = DateConverter.to_model(&value).expect_err("missing");
        assert_eq!(err.fields(), DateInputItems::MONTH | DateInputItems::YEAR);
    }

    #[test]
    fn test_date_converter_checks_calendar() {
        let value = ItemValue::parse(Some("31"), Some("4"), Some("2020"));
        let err = DateConverter.to_model(&value).expect_err("30 days in April");
        assert_eq!(err.fields(), DateInputItems::DAY);

        let value = ItemValue::parse(Some("29"), Some("2"), Some("2021"));
        let err = DateConverter.to_model(&value).expect_err("not a leap year");
        assert_eq!(err.fields(), DateInputItems::DAY);

        let value = ItemValue::parse(Some("29"), Some("2"), Some("2024"));
        assert_eq!(DateConverter.to_model(&value), Ok(date(2024, 2, 29)));
    }

    #[test]
    fn test_date_converter_range_checks() {
        let value = ItemValue::parse(Some("0"), Some("13"), Some("10000"));
        let err = DateConverter.to_model(&value).expect_err("out of range");
        assert_eq!(err.fields(), DateInputItems::all());
    }

    #[test]
    fn test_day_checked_against_widest_month_when_month_invalid() {
        let value = ItemValue::parse(Some("31"), Some("x"), Some("2020"));
        let err = DateConverter.to_model(&value).expect_err("bad month");
        assert_eq!(err.fields(), DateInputItems::MONTH);
    }

    #[test]
    fn test_date_time_converter_is_midnight() {
        let value = ItemValue::parse(Some("5"), Some("11"), Some("1999"));
        let converted = DateTimeConverter.to_model(&value).expect("valid");
        assert_eq!(converted, date(1999, 11, 5).and_time(NaiveTime::MIN));
        assert_eq!(
            DateTimeConverter.from_model(&converted),
            ItemValue::new(Some(5), Some(11), Some(1999))
        );
    }

    #[test]
    fn test_month_year_converter_ignores_day() {
        assert_eq!(
            MonthYearConverter.default_items(),
            DateInputItems::MONTH | DateInputItems::YEAR
        );
        let value = ItemValue::parse(None, Some("7"), Some("2023"));
        assert_eq!(MonthYearConverter.to_model(&value), Ok((7, 2023)));

        let value = ItemValue::parse(Some("nonsense"), Some("0"), Some("2023"));
        let err = MonthYearConverter.to_model(&value).expect_err("bad month");
        assert_eq!(err.fields(), DateInputItems::MONTH);
    }

    #[test]
    fn test_from_model_splits_date() {
        let value = DateConverter.from_model(&date(2020, 4, 1));
        assert_eq!(value.day(), Some(1));
        assert_eq!(value.month(), Some(4));
        assert_eq!(value.year(), Some(2020));
    }
}
