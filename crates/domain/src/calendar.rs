// Copyright (C) 2026 Shipdesk Contributors
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Business-day and federal holiday calendar.
//!
//! Holidays are computed algorithmically for any calendar year, using
//! fixed-date rules (e.g., Independence Day) and nth-weekday-of-month
//! rules (e.g., Thanksgiving is the fourth Thursday in November).
//!
//! ## Invariants
//!
//! - A business day is any weekday that is not a federal holiday
//! - `add_business_days` advances one calendar day at a time, so holiday
//!   interaction is trivial to reason about and test
//! - The dispatch cutoff is a wall-clock hour in the origin timezone;
//!   requests after the cutoff no longer count "today" toward lead time

use crate::error::DomainError;
use chrono::{Datelike, Days, NaiveDate, NaiveTime, Timelike, Weekday};

/// Hour of day (local wall-clock, 24h) after which same-day dispatch
/// planning is closed.
pub const DISPATCH_CUTOFF_HOUR: u32 = 15;

/// Returns the name of the federal holiday falling on `date`, if any.
///
/// Fixed-date holidays are matched on month/day; floating holidays are
/// derived from their nth-weekday rules for the date's year.
#[must_use]
pub fn federal_holiday(date: NaiveDate) -> Option<&'static str> {
    match (date.month(), date.day()) {
        (1, 1) => return Some("New Year's Day"),
        (6, 19) => return Some("Juneteenth National Independence Day"),
        (7, 4) => return Some("Independence Day"),
        (11, 11) => return Some("Veterans Day"),
        (12, 25) => return Some("Christmas Day"),
        _ => {}
    }

    let year: i32 = date.year();
    let floating: [(Option<NaiveDate>, &'static str); 6] = [
        (
            nth_weekday_of_month(year, 1, Weekday::Mon, 3),
            "Martin Luther King Jr. Day",
        ),
        (
            nth_weekday_of_month(year, 2, Weekday::Mon, 3),
            "Washington's Birthday",
        ),
        (last_weekday_of_month(year, 5, Weekday::Mon), "Memorial Day"),
        (nth_weekday_of_month(year, 9, Weekday::Mon, 1), "Labor Day"),
        (nth_weekday_of_month(year, 10, Weekday::Mon, 2), "Columbus Day"),
        (
            nth_weekday_of_month(year, 11, Weekday::Thu, 4),
            "Thanksgiving Day",
        ),
    ];

    floating
        .into_iter()
        .find(|(holiday, _)| *holiday == Some(date))
        .map(|(_, name)| name)
}

/// Returns whether `date` is a federal holiday.
#[must_use]
pub fn is_federal_holiday(date: NaiveDate) -> bool {
    federal_holiday(date).is_some()
}

/// Returns whether `date` falls on a Saturday or Sunday.
#[must_use]
pub fn is_weekend(date: NaiveDate) -> bool {
    matches!(date.weekday(), Weekday::Sat | Weekday::Sun)
}

/// Returns whether `date` is a business day (weekday, not a holiday).
#[must_use]
pub fn is_business_day(date: NaiveDate) -> bool {
    !is_weekend(date) && !is_federal_holiday(date)
}

/// Advances `start` by `days` business days, skipping weekends and
/// federal holidays.
///
/// The walk advances one calendar day at a time and counts only business
/// days, so a holiday landing mid-walk simply consumes an extra calendar
/// day. `add_business_days(date, 0)` returns `date` unchanged, even if
/// `date` itself is not a business day.
///
/// # Errors
///
/// Returns `DomainError::DateArithmeticOverflow` if the walk would leave
/// the representable date range.
pub fn add_business_days(start: NaiveDate, days: u32) -> Result<NaiveDate, DomainError> {
    let mut current: NaiveDate = start;
    let mut remaining: u32 = days;

    while remaining > 0 {
        current = current
            .checked_add_days(Days::new(1))
            .ok_or_else(|| DomainError::DateArithmeticOverflow {
                operation: format!("adding {days} business days to {start}"),
            })?;

        if is_business_day(current) {
            remaining -= 1;
        }
    }

    Ok(current)
}

/// Returns the first business day strictly after `date`.
///
/// # Errors
///
/// Returns `DomainError::DateArithmeticOverflow` at the end of the
/// representable date range.
pub fn next_business_day(date: NaiveDate) -> Result<NaiveDate, DomainError> {
    add_business_days(date, 1)
}

/// Returns whether the given local wall-clock time is at or past the
/// dispatch cutoff (15:00).
#[must_use]
pub fn is_past_cutoff(time: NaiveTime) -> bool {
    time.hour() >= DISPATCH_CUTOFF_HOUR
}

/// Returns the date of the nth occurrence of `weekday` in the given
/// month (1-based `n`), or `None` if the month has no such occurrence.
fn nth_weekday_of_month(year: i32, month: u32, weekday: Weekday, n: u32) -> Option<NaiveDate> {
    let first: NaiveDate = NaiveDate::from_ymd_opt(year, month, 1)?;
    let offset: u32 = (7 + weekday.num_days_from_monday() - first.weekday().num_days_from_monday())
        .rem_euclid(7);
    let day: u32 = 1 + offset + (n - 1) * 7;
    NaiveDate::from_ymd_opt(year, month, day)
}

/// Returns the date of the last occurrence of `weekday` in the given month.
fn last_weekday_of_month(year: i32, month: u32, weekday: Weekday) -> Option<NaiveDate> {
    // Walk backwards from the last day of the month.
    let last: NaiveDate = if month == 12 {
        NaiveDate::from_ymd_opt(year + 1, 1, 1)?
    } else {
        NaiveDate::from_ymd_opt(year, month + 1, 1)?
    }
    .pred_opt()?;

    let offset: u32 = (7 + last.weekday().num_days_from_monday() - weekday.num_days_from_monday())
        .rem_euclid(7);
    last.checked_sub_days(Days::new(u64::from(offset)))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn date(year: i32, month: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(year, month, day).unwrap()
    }

    #[test]
    fn test_fixed_date_holidays() {
        assert_eq!(federal_holiday(date(2026, 1, 1)), Some("New Year's Day"));
        assert_eq!(federal_holiday(date(2026, 7, 4)), Some("Independence Day"));
        assert_eq!(federal_holiday(date(2026, 12, 25)), Some("Christmas Day"));
        assert_eq!(federal_holiday(date(2026, 11, 11)), Some("Veterans Day"));
        assert_eq!(
            federal_holiday(date(2026, 6, 19)),
            Some("Juneteenth National Independence Day")
        );
    }

    #[test]
    fn test_memorial_day_is_last_monday_in_may() {
        // 2026: last Monday in May is the 25th.
        assert_eq!(federal_holiday(date(2026, 5, 25)), Some("Memorial Day"));
        assert_eq!(federal_holiday(date(2026, 5, 18)), None);
        // 2027: last Monday in May is the 31st.
        assert_eq!(federal_holiday(date(2027, 5, 31)), Some("Memorial Day"));
    }

    #[test]
    fn test_labor_day_is_first_monday_in_september() {
        // 2026: September 1 is a Tuesday, so Labor Day is the 7th.
        assert_eq!(federal_holiday(date(2026, 9, 7)), Some("Labor Day"));
        assert_eq!(federal_holiday(date(2026, 9, 1)), None);
    }

    #[test]
    fn test_thanksgiving_is_fourth_thursday_in_november() {
        assert_eq!(federal_holiday(date(2026, 11, 26)), Some("Thanksgiving Day"));
        assert_eq!(federal_holiday(date(2025, 11, 27)), Some("Thanksgiving Day"));
        assert_eq!(federal_holiday(date(2026, 11, 19)), None);
    }

    #[test]
    fn test_holiday_rules_generalize_across_years() {
        // MLK Day, third Monday in January, across several years.
        assert_eq!(
            federal_holiday(date(2025, 1, 20)),
            Some("Martin Luther King Jr. Day")
        );
        assert_eq!(
            federal_holiday(date(2026, 1, 19)),
            Some("Martin Luther King Jr. Day")
        );
        assert_eq!(
            federal_holiday(date(2030, 1, 21)),
            Some("Martin Luther King Jr. Day")
        );
    }

    #[test]
    fn test_is_weekend() {
        assert!(is_weekend(date(2026, 3, 7))); // Saturday
        assert!(is_weekend(date(2026, 3, 8))); // Sunday
        assert!(!is_weekend(date(2026, 3, 9))); // Monday
    }

    #[test]
    fn test_is_business_day_excludes_weekends_and_holidays() {
        assert!(is_business_day(date(2026, 3, 9))); // ordinary Monday
        assert!(!is_business_day(date(2026, 3, 7))); // Saturday
        assert!(!is_business_day(date(2026, 11, 26))); // Thanksgiving (Thursday)
    }

    #[test]
    fn test_add_business_days_zero_is_identity() {
        let saturday: NaiveDate = date(2026, 3, 7);
        assert_eq!(add_business_days(saturday, 0).unwrap(), saturday);
    }

    #[test]
    fn test_add_business_days_skips_weekend() {
        // Friday + 1 business day = Monday.
        assert_eq!(
            add_business_days(date(2026, 3, 6), 1).unwrap(),
            date(2026, 3, 9)
        );
    }

    #[test]
    fn test_add_business_days_skips_holiday() {
        // Wednesday Nov 25, 2026 + 1 business day skips Thanksgiving
        // (Thursday Nov 26) and lands on Friday Nov 27.
        assert_eq!(
            add_business_days(date(2026, 11, 25), 1).unwrap(),
            date(2026, 11, 27)
        );
        // + 2 business days crosses the weekend to Monday Nov 30.
        assert_eq!(
            add_business_days(date(2026, 11, 25), 2).unwrap(),
            date(2026, 11, 30)
        );
    }

    #[test]
    fn test_next_business_day() {
        assert_eq!(next_business_day(date(2026, 3, 6)).unwrap(), date(2026, 3, 9));
        assert_eq!(next_business_day(date(2026, 3, 9)).unwrap(), date(2026, 3, 10));
    }

    #[test]
    fn test_cutoff_boundary() {
        assert!(!is_past_cutoff(NaiveTime::from_hms_opt(14, 59, 59).unwrap()));
        assert!(is_past_cutoff(NaiveTime::from_hms_opt(15, 0, 0).unwrap()));
        assert!(is_past_cutoff(NaiveTime::from_hms_opt(23, 0, 0).unwrap()));
    }
}
