// Copyright (C) 2026 Shipdesk Contributors
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Pickup availability generation.
//!
//! ## Invariants
//!
//! - The first offered date is never earlier than `today` plus the
//!   minimum lead time in business days (+1 when past the cutoff)
//! - Dates are strictly increasing, contiguous calendar days filtered by
//!   the inclusion rules; the walk never skips and resumes
//! - Slot tiers are pure functions of (zip, date, slot id), which is
//!   what makes the one-hour validity window meaningful

use crate::restrictions::collect_restrictions;
use crate::slots::{HOLIDAY_FEE, WEEKEND_FEE, WEEKEND_FEE_LIMITED, build_time_slot};
use chrono::{Days, Duration, NaiveDate, NaiveDateTime, NaiveTime};
use serde::{Deserialize, Serialize};
use shipdesk_domain::{
    AvailabilityConfig, AvailableDate, Coverage, DomainError, ServiceArea, ServiceRestriction,
    SlotPeriod, TimeSlot, add_business_days, carrier_blackout, determine_service_area,
    federal_holiday, is_business_day, is_past_cutoff, is_weekend,
};

/// Minimum dispatch planning lead time, in business days.
///
/// Fixed by carrier dispatch planning; not adjustable by query
/// parameters.
pub const MINIMUM_LEAD_TIME_DAYS: u32 = 3;

/// Maximum number of weeks a caller may request.
pub const MAX_WEEKS: u32 = 8;

/// How long an availability payload remains valid.
pub const VALIDITY: Duration = Duration::hours(1);

/// An availability query.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AvailabilityRequest {
    /// Origin postal code.
    pub zip: String,
    /// Number of weeks to offer (1-8).
    pub weeks: u32,
    /// Whether to include weekend days.
    pub include_weekends: bool,
    /// Whether to include federal holidays.
    pub include_holidays: bool,
}

/// Weekend pickup profile for the service area.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeekendOptions {
    /// Whether weekend pickup is offered at all.
    pub available: bool,
    /// Whether Saturday pickup is offered.
    pub saturday: bool,
    /// Whether Sunday pickup can be arranged on request.
    pub sunday_on_request: bool,
    /// Weekend window start, when offered.
    pub window_start: Option<NaiveTime>,
    /// Weekend window end, when offered.
    pub window_end: Option<NaiveTime>,
    /// Additional weekend fee, in dollars.
    pub additional_fee: f64,
    /// Human-readable summary.
    pub notes: String,
}

/// Holiday pickup premium descriptor.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HolidayOptions {
    /// Whether holiday pickup is offered.
    pub available: bool,
    /// Flat holiday premium, in dollars.
    pub premium_fee: f64,
    /// Human-readable summary.
    pub description: String,
}

/// Cache-contract metadata stamped on every response.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AvailabilityMetadata {
    /// When the payload was generated (origin wall-clock).
    pub generated_at: NaiveDateTime,
    /// When the payload becomes stale. Callers must re-query after this.
    pub valid_until: NaiveDateTime,
}

/// A generated availability calendar.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AvailabilityResponse {
    /// The origin postal code echoed back.
    pub postal_code: String,
    /// The classified service area.
    pub service_area: ServiceArea,
    /// Offered days, strictly increasing.
    pub available_dates: Vec<AvailableDate>,
    /// Advisory restrictions for the window.
    pub restrictions: Vec<ServiceRestriction>,
    /// Weekend profile; present only when weekends were requested.
    pub weekend_options: Option<WeekendOptions>,
    /// Holiday premium; present only when holidays were requested.
    pub holiday_options: Option<HolidayOptions>,
    /// Cache-contract metadata.
    pub metadata: AvailabilityMetadata,
}

/// Generates the pickup availability calendar for a postal code.
///
/// # Arguments
///
/// * `request` - The availability query
/// * `now` - Current wall-clock datetime at the origin
///
/// # Errors
///
/// Returns an error if:
/// - The postal code is not a valid 5-digit ZIP
/// - The week count is outside 1..=8
/// - Date arithmetic overflows
pub fn generate_availability(
    request: &AvailabilityRequest,
    now: NaiveDateTime,
) -> Result<AvailabilityResponse, DomainError> {
    if request.weeks == 0 || request.weeks > MAX_WEEKS {
        return Err(DomainError::InvalidWeekCount {
            weeks: request.weeks,
            max: MAX_WEEKS,
        });
    }

    let service_area: ServiceArea = determine_service_area(&request.zip)?;
    let config: &AvailabilityConfig = AvailabilityConfig::for_coverage(service_area.coverage);

    // Requests after the dispatch cutoff no longer count today.
    let lead_days: u32 = MINIMUM_LEAD_TIME_DAYS + u32::from(is_past_cutoff(now.time()));
    let start_date: NaiveDate = add_business_days(now.date(), lead_days)?;
    let end_date: NaiveDate = start_date
        .checked_add_days(Days::new(u64::from(request.weeks) * 7))
        .ok_or_else(|| DomainError::DateArithmeticOverflow {
            operation: format!("extending {start_date} by {} weeks", request.weeks),
        })?;

    tracing::info!(
        zip = %request.zip,
        coverage = %service_area.coverage,
        %start_date,
        %end_date,
        "generating pickup availability"
    );

    let mut available_dates: Vec<AvailableDate> = Vec::new();
    let mut date: NaiveDate = start_date;
    while date <= end_date {
        if include_date(date, request.include_weekends, request.include_holidays) {
            available_dates.push(build_available_date(&request.zip, date, config));
        }
        date = date
            .succ_opt()
            .ok_or_else(|| DomainError::DateArithmeticOverflow {
                operation: format!("walking calendar past {date}"),
            })?;
    }

    let restrictions: Vec<ServiceRestriction> =
        collect_restrictions(&service_area, &request.zip, &available_dates);

    let weekend_options: Option<WeekendOptions> = request
        .include_weekends
        .then(|| weekend_options_for(service_area.coverage));
    let holiday_options: Option<HolidayOptions> = request
        .include_holidays
        .then(|| holiday_options_for(service_area.coverage));

    Ok(AvailabilityResponse {
        postal_code: request.zip.clone(),
        service_area,
        available_dates,
        restrictions,
        weekend_options,
        holiday_options,
        metadata: AvailabilityMetadata {
            generated_at: now,
            valid_until: now + VALIDITY,
        },
    })
}

/// Inclusion rule for a candidate day.
///
/// Business days are always included; weekends and holidays only when
/// the matching flag is set.
#[must_use]
pub fn include_date(date: NaiveDate, include_weekends: bool, include_holidays: bool) -> bool {
    if is_business_day(date) {
        return true;
    }
    if federal_holiday(date).is_some() && include_holidays {
        return true;
    }
    is_weekend(date) && include_weekends
}

/// Builds one calendar day with its three canonical slots.
fn build_available_date(zip: &str, date: NaiveDate, config: &AvailabilityConfig) -> AvailableDate {
    let holiday: Option<&'static str> = federal_holiday(date);
    let weekend: bool = is_weekend(date);

    let extra_fee: f64 = if holiday.is_some() {
        HOLIDAY_FEE
    } else if weekend {
        WEEKEND_FEE
    } else {
        0.0
    };

    let time_slots: Vec<TimeSlot> = SlotPeriod::ALL
        .into_iter()
        .map(|period| build_time_slot(zip, date, period, config, extra_fee))
        .collect();

    let notes: Option<String> = holiday.map(|name| format!("{name} pickup: premium rates apply"));

    let restrictions: Option<Vec<String>> = carrier_blackout(date, None)
        .reason
        .map(|reason| vec![reason]);

    AvailableDate {
        date,
        day_of_week: date.format("%A").to_string(),
        is_business_day: is_business_day(date),
        time_slots,
        notes,
        restrictions,
    }
}

/// Weekend profile by coverage tier.
fn weekend_options_for(coverage: Coverage) -> WeekendOptions {
    match coverage {
        Coverage::Full => WeekendOptions {
            available: true,
            saturday: true,
            sunday_on_request: true,
            window_start: NaiveTime::from_hms_opt(9, 0, 0),
            window_end: NaiveTime::from_hms_opt(15, 0, 0),
            additional_fee: WEEKEND_FEE,
            notes: String::from("Saturday pickup offered; Sunday available on request"),
        },
        Coverage::Limited => WeekendOptions {
            available: true,
            saturday: true,
            sunday_on_request: false,
            window_start: NaiveTime::from_hms_opt(10, 0, 0),
            window_end: NaiveTime::from_hms_opt(13, 0, 0),
            additional_fee: WEEKEND_FEE_LIMITED,
            notes: String::from("Saturday pickup only, narrow window"),
        },
        Coverage::Remote => WeekendOptions {
            available: false,
            saturday: false,
            sunday_on_request: false,
            window_start: None,
            window_end: None,
            additional_fee: 0.0,
            notes: String::from("Weekend pickup is not offered in remote service areas"),
        },
    }
}

/// Holiday premium by coverage tier. Offered only with full coverage.
fn holiday_options_for(coverage: Coverage) -> HolidayOptions {
    if coverage == Coverage::Full {
        HolidayOptions {
            available: true,
            premium_fee: HOLIDAY_FEE,
            description: String::from("Holiday pickup available at a flat premium"),
        }
    } else {
        HolidayOptions {
            available: false,
            premium_fee: 0.0,
            description: String::from("Holiday pickup requires a full-coverage service area"),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn noon(year: i32, month: u32, day: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(year, month, day)
            .unwrap()
            .and_hms_opt(12, 0, 0)
            .unwrap()
    }

    fn late(year: i32, month: u32, day: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(year, month, day)
            .unwrap()
            .and_hms_opt(16, 30, 0)
            .unwrap()
    }

    fn request(zip: &str, weeks: u32, weekends: bool, holidays: bool) -> AvailabilityRequest {
        AvailabilityRequest {
            zip: zip.to_string(),
            weeks,
            include_weekends: weekends,
            include_holidays: holidays,
        }
    }

    #[test]
    fn test_rejects_zero_and_oversized_weeks() {
        let now: NaiveDateTime = noon(2026, 3, 10);
        assert!(generate_availability(&request("10001", 0, false, false), now).is_err());
        assert!(generate_availability(&request("10001", 9, false, false), now).is_err());
    }

    #[test]
    fn test_rejects_invalid_zip() {
        let now: NaiveDateTime = noon(2026, 3, 10);
        assert!(generate_availability(&request("1000", 1, false, false), now).is_err());
    }

    #[test]
    fn test_lead_time_floor() {
        // Tuesday March 10, 2026, before cutoff: 3 business days out is
        // Friday March 13.
        let now: NaiveDateTime = noon(2026, 3, 10);
        let response: AvailabilityResponse =
            generate_availability(&request("10001", 1, false, false), now).unwrap();
        let first: NaiveDate = response.available_dates[0].date;
        assert_eq!(first, NaiveDate::from_ymd_opt(2026, 3, 13).unwrap());
    }

    #[test]
    fn test_past_cutoff_adds_a_business_day() {
        // Same Tuesday after 15:00: floor moves to Monday March 16.
        let now: NaiveDateTime = late(2026, 3, 10);
        let response: AvailabilityResponse =
            generate_availability(&request("10001", 1, false, false), now).unwrap();
        assert_eq!(
            response.available_dates[0].date,
            NaiveDate::from_ymd_opt(2026, 3, 16).unwrap()
        );
    }

    #[test]
    fn test_business_days_only_by_default() {
        let response: AvailabilityResponse =
            generate_availability(&request("10001", 2, false, false), noon(2026, 3, 10)).unwrap();
        assert!(!response.available_dates.is_empty());
        for day in &response.available_dates {
            assert!(day.is_business_day, "{} is not a business day", day.date);
        }
    }

    #[test]
    fn test_inclusion_rule_is_exact() {
        let now: NaiveDateTime = noon(2026, 3, 10);
        let response: AvailabilityResponse =
            generate_availability(&request("10001", 2, true, false), now).unwrap();

        let offered: Vec<NaiveDate> =
            response.available_dates.iter().map(|day| day.date).collect();
        let start: NaiveDate = offered[0];
        let end: NaiveDate = *offered.last().unwrap();

        let mut date: NaiveDate = start;
        while date <= end {
            let expected: bool = include_date(date, true, false);
            assert_eq!(
                offered.contains(&date),
                expected,
                "inclusion mismatch for {date}"
            );
            date = date.succ_opt().unwrap();
        }
    }

    #[test]
    fn test_dates_strictly_increasing() {
        let response: AvailabilityResponse =
            generate_availability(&request("10001", 4, true, true), noon(2026, 3, 10)).unwrap();
        for pair in response.available_dates.windows(2) {
            assert!(pair[0].date < pair[1].date);
        }
    }

    #[test]
    fn test_each_day_has_three_slots() {
        let response: AvailabilityResponse =
            generate_availability(&request("10001", 1, false, false), noon(2026, 3, 10)).unwrap();
        for day in &response.available_dates {
            assert_eq!(day.time_slots.len(), 3);
            let ids: Vec<&str> = day.time_slots.iter().map(|slot| slot.id.as_str()).collect();
            assert_eq!(ids, ["morning", "afternoon", "evening"]);
        }
    }

    #[test]
    fn test_determinism_within_validity_window() {
        let now: NaiveDateTime = noon(2026, 3, 10);
        let req: AvailabilityRequest = request("10001", 2, true, true);
        let first: AvailabilityResponse = generate_availability(&req, now).unwrap();
        let second: AvailabilityResponse = generate_availability(&req, now).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_metadata_validity_is_one_hour() {
        let now: NaiveDateTime = noon(2026, 3, 10);
        let response: AvailabilityResponse =
            generate_availability(&request("10001", 1, false, false), now).unwrap();
        assert_eq!(response.metadata.generated_at, now);
        assert_eq!(response.metadata.valid_until - now, Duration::hours(1));
    }

    #[test]
    fn test_weekend_options_only_when_requested() {
        let now: NaiveDateTime = noon(2026, 3, 10);
        let without: AvailabilityResponse =
            generate_availability(&request("10001", 1, false, false), now).unwrap();
        assert!(without.weekend_options.is_none());

        let with: AvailabilityResponse =
            generate_availability(&request("10001", 1, true, false), now).unwrap();
        let options: WeekendOptions = with.weekend_options.unwrap();
        assert!(options.available);
        assert!(options.sunday_on_request);
    }

    #[test]
    fn test_remote_area_has_no_weekend_pickup() {
        let now: NaiveDateTime = noon(2026, 3, 10);
        let response: AvailabilityResponse =
            generate_availability(&request("99501", 1, true, false), now).unwrap();
        let options: WeekendOptions = response.weekend_options.unwrap();
        assert!(!options.available);
        assert!(options.window_start.is_none());
    }

    #[test]
    fn test_holiday_options_gated_on_full_coverage() {
        let now: NaiveDateTime = noon(2026, 3, 10);
        let full: AvailabilityResponse =
            generate_availability(&request("10001", 1, false, true), now).unwrap();
        assert!(full.holiday_options.unwrap().available);

        let limited: AvailabilityResponse =
            generate_availability(&request("30301", 1, false, true), now).unwrap();
        assert!(!limited.holiday_options.unwrap().available);
    }

    #[test]
    fn test_holiday_day_carries_note_when_included() {
        // A window spanning late May includes Memorial Day (May 25, 2026).
        let now: NaiveDateTime = noon(2026, 5, 18);
        let response: AvailabilityResponse =
            generate_availability(&request("10001", 2, false, true), now).unwrap();
        let memorial: &AvailableDate = response
            .available_dates
            .iter()
            .find(|day| day.date == NaiveDate::from_ymd_opt(2026, 5, 25).unwrap())
            .unwrap();
        assert!(memorial.notes.as_deref().unwrap().contains("Memorial Day"));
        assert!(!memorial.is_business_day);
    }

    #[test]
    fn test_blackout_dates_force_unavailable_slots() {
        // Window covering the year-end closure (Dec 24-26).
        let now: NaiveDateTime = noon(2026, 12, 14);
        let response: AvailabilityResponse =
            generate_availability(&request("10001", 2, false, false), now).unwrap();
        let blacked: Vec<&AvailableDate> = response
            .available_dates
            .iter()
            .filter(|day| day.restrictions.is_some())
            .collect();
        assert!(!blacked.is_empty());
        for day in blacked {
            for slot in &day.time_slots {
                assert_eq!(slot.availability, shipdesk_domain::SlotAvailability::Unavailable);
            }
        }
    }
}
