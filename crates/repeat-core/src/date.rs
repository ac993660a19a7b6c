use chrono::{Datelike, NaiveDate};

use crate::error::CoreError;

/// Fixed boundary layout for due dates, e.g. `20240229`.
pub const DATE_LAYOUT: &str = "%Y%m%d";

/// Last year that still fits the eight-digit layout.
pub const MAX_LAYOUT_YEAR: i32 = 9999;

/// Human-entered layout accepted for date input, e.g. `29.02.2024`.
pub const DOTTED_LAYOUT: &str = "%d.%m.%Y";

/// Parses a date in the fixed `YYYYMMDD` layout.
///
/// The input must be exactly eight ASCII digits naming a real calendar day.
pub fn parse_date(value: &str) -> Result<NaiveDate, CoreError> {
    if value.len() != 8 || !value.bytes().all(|b| b.is_ascii_digit()) {
        return Err(CoreError::InvalidDate(format!(
            "'{}' does not match the YYYYMMDD layout",
            value
        )));
    }

    NaiveDate::parse_from_str(value, DATE_LAYOUT)
        .map_err(|_| CoreError::InvalidDate(format!("'{}' is not a calendar date", value)))
}

/// Parses a `DD.MM.YYYY` date.
pub fn parse_dotted_date(value: &str) -> Result<NaiveDate, CoreError> {
    NaiveDate::parse_from_str(value.trim(), DOTTED_LAYOUT)
        .map_err(|_| CoreError::InvalidDate(format!("'{}' does not match DD.MM.YYYY", value)))
}

/// Formats a date in the fixed `YYYYMMDD` layout.
#[inline]
pub fn format_date(date: NaiveDate) -> String {
    date.format(DATE_LAYOUT).to_string()
}

/// Year and month following the given one.
#[inline]
pub fn next_month(year: i32, month: u32) -> (i32, u32) {
    if month == 12 {
        (year + 1, 1)
    } else {
        (year, month + 1)
    }
}

/// First day of the month following the given one, `None` past chrono's range.
pub fn first_of_next_month(year: i32, month: u32) -> Option<NaiveDate> {
    let (year, month) = next_month(year, month);
    NaiveDate::from_ymd_opt(year, month, 1)
}

/// Number of the last day in the month: first day of the next month minus one day.
pub fn last_day_of_month(year: i32, month: u32) -> Option<u32> {
    first_of_next_month(year, month)?
        .pred_opt()
        .map(|last| last.day())
}

/// Moves a date by whole years, keeping month and day.
///
/// February 29th landing on a common year becomes March 1st.
pub fn add_years(date: NaiveDate, years: i32) -> Option<NaiveDate> {
    let year = date.year().checked_add(years)?;
    NaiveDate::from_ymd_opt(year, date.month(), date.day()).or_else(|| {
        if date.month() == 2 && date.day() == 29 {
            NaiveDate::from_ymd_opt(year, 3, 1)
        } else {
            None
        }
    })
}

pub(crate) fn out_of_range(date: NaiveDate) -> CoreError {
    CoreError::InvalidDate(format!(
        "no representable occurrence after {}",
        format_date(date)
    ))
}
