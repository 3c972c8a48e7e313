//! ISO-8601 week identifiers.

use chrono::{NaiveDate, Weekday};

use crate::error::InvalidYearWeek;

/// Convert a `2021-W05` style token into the Monday of that ISO week.
///
/// The year must have four digits and the week one or two. Week numbers
/// outside the ISO year (week 0, or week 53 in a 52-week year) are rejected.
pub fn yearweek_to_date(token: &str) -> Result<NaiveDate, InvalidYearWeek> {
    let invalid = || InvalidYearWeek(token.to_string());
    let (year, week) = token.trim().split_once("-W").ok_or_else(invalid)?;
    if year.len() != 4 || !year.bytes().all(|b| b.is_ascii_digit()) {
        return Err(invalid());
    }
    if week.is_empty() || week.len() > 2 || !week.bytes().all(|b| b.is_ascii_digit()) {
        return Err(invalid());
    }
    let year: i32 = year.parse().map_err(|_| invalid())?;
    let week: u32 = week.parse().map_err(|_| invalid())?;
    NaiveDate::from_isoywd_opt(year, week, Weekday::Mon).ok_or_else(invalid)
}
