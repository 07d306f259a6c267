/// Calendar-date helpers
///
/// Completion records are keyed by a plain calendar day. The storage key is
/// always the ISO `YYYY-MM-DD` form, independent of the user's locale, and all
/// day arithmetic goes through `chrono`'s calendar operations rather than
/// fixed second offsets so daylight-saving changes can't shift a day.

use chrono::{Days, Local, NaiveDate};
use crate::domain::DomainError;

/// Canonical storage format for record dates
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Today's date in the local calendar
pub fn today() -> NaiveDate {
    Local::now().date_naive()
}

/// Parse a canonical `YYYY-MM-DD` date
///
/// Fails instead of falling back to some default day, so a corrupted key
/// never masquerades as a real completion. Only text equal to `format_date`
/// of the parsed day is accepted, so `2024-1-3` and padded values fail.
pub fn parse_date(value: &str) -> Result<NaiveDate, DomainError> {
    let invalid = || DomainError::InvalidDate {
        value: value.to_string(),
    };

    let date = NaiveDate::parse_from_str(value, DATE_FORMAT).map_err(|_| invalid())?;
    if format_date(date) != value {
        return Err(invalid());
    }
    Ok(date)
}

/// Format a date in the canonical storage form
pub fn format_date(date: NaiveDate) -> String {
    date.format(DATE_FORMAT).to_string()
}

/// The date `days` calendar days before `date`
///
/// Saturates at the earliest representable date.
pub fn days_before(date: NaiveDate, days: u64) -> NaiveDate {
    date.checked_sub_days(Days::new(days)).unwrap_or(NaiveDate::MIN)
}

/// Whether `later` falls exactly one calendar day after `earlier`
pub fn is_next_day(earlier: NaiveDate, later: NaiveDate) -> bool {
    earlier.succ_opt() == Some(later)
}
