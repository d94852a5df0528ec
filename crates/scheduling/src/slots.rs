// Copyright (C) 2026 Shipdesk Contributors
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Canonical time slot generation and deterministic availability tiering.
//!
//! Each candidate day gets the three canonical slots. A slot's tier is a
//! pure function of (zip, date, slot id): the FNV-based demand factor is
//! combined with the coverage preset and a fixed day-of-week multiplier,
//! then bucketed. A carrier blackout on the date forces `Unavailable`
//! and bypasses the numeric model entirely.

use chrono::{NaiveDate, NaiveTime, Weekday};
use chrono::Datelike;
use shipdesk_domain::{
    AvailabilityConfig, SlotAvailability, SlotPeriod, TimeSlot, carrier_blackout, demand_factor,
    is_weekend,
};

/// Fee for the after-hours evening window, in dollars.
pub const EVENING_FEE: f64 = 15.0;
/// Additional fee for weekend pickups in full-coverage areas, in dollars.
pub const WEEKEND_FEE: f64 = 25.0;
/// Additional fee for weekend pickups in limited-coverage areas, in dollars.
pub const WEEKEND_FEE_LIMITED: f64 = 40.0;
/// Additional fee for holiday pickups, in dollars.
pub const HOLIDAY_FEE: f64 = 40.0;

/// Score at or above which a slot is `Available`.
const AVAILABLE_THRESHOLD: f64 = 70.0;
/// Score at or above which a slot is `Limited`.
const LIMITED_THRESHOLD: f64 = 40.0;

/// Returns the wall-clock window for a canonical slot period.
#[must_use]
pub const fn slot_window(period: SlotPeriod) -> (NaiveTime, NaiveTime) {
    match period {
        SlotPeriod::Morning => (MORNING_START, MORNING_END),
        SlotPeriod::Afternoon => (AFTERNOON_START, AFTERNOON_END),
        SlotPeriod::Evening => (EVENING_START, EVENING_END),
    }
}

const MORNING_START: NaiveTime = match NaiveTime::from_hms_opt(8, 0, 0) {
    Some(t) => t,
    None => unreachable!(),
};
const MORNING_END: NaiveTime = match NaiveTime::from_hms_opt(12, 0, 0) {
    Some(t) => t,
    None => unreachable!(),
};
const AFTERNOON_START: NaiveTime = MORNING_END;
const AFTERNOON_END: NaiveTime = match NaiveTime::from_hms_opt(17, 0, 0) {
    Some(t) => t,
    None => unreachable!(),
};
const EVENING_START: NaiveTime = AFTERNOON_END;
const EVENING_END: NaiveTime = match NaiveTime::from_hms_opt(20, 0, 0) {
    Some(t) => t,
    None => unreachable!(),
};

/// Returns the display label for a canonical slot period.
#[must_use]
pub const fn slot_label(period: SlotPeriod) -> &'static str {
    match period {
        SlotPeriod::Morning => "Morning (8 AM - 12 PM)",
        SlotPeriod::Afternoon => "Afternoon (12 PM - 5 PM)",
        SlotPeriod::Evening => "Evening (5 PM - 8 PM)",
    }
}

/// Fixed demand multiplier by day of week.
///
/// Mondays and Fridays carry backlog from the adjacent weekend; midweek
/// runs under capacity.
#[must_use]
pub const fn day_of_week_multiplier(weekday: Weekday) -> f64 {
    match weekday {
        Weekday::Mon => 0.8,
        Weekday::Fri => 0.85,
        Weekday::Wed => 1.1,
        _ => 1.0,
    }
}

/// Computes the deterministic availability score for a slot, in `[0, 100]`.
///
/// The demand factor swings the preset baseline by up to
/// `demand_variation` percent in either direction, then the day-of-week
/// multiplier is applied.
#[must_use]
pub fn availability_score(
    zip: &str,
    date: NaiveDate,
    period: SlotPeriod,
    config: &AvailabilityConfig,
) -> f64 {
    let demand: f64 = demand_factor(zip, date, period.as_str());
    let swing: f64 = (demand - 0.5) * 2.0 * config.demand_variation;
    let base: f64 = config.base_availability * config.seasonal_factor + swing;
    (base * day_of_week_multiplier(date.weekday())).clamp(0.0, 100.0)
}

/// Buckets a score into an availability tier.
#[must_use]
pub fn tier_for_score(score: f64) -> SlotAvailability {
    if score >= AVAILABLE_THRESHOLD {
        SlotAvailability::Available
    } else if score >= LIMITED_THRESHOLD {
        SlotAvailability::Limited
    } else {
        SlotAvailability::Unavailable
    }
}

/// Computes the availability tier for a slot.
///
/// A carrier blackout on the date forces `Unavailable` unconditionally.
#[must_use]
pub fn calculate_time_slot_availability(
    zip: &str,
    date: NaiveDate,
    period: SlotPeriod,
    config: &AvailabilityConfig,
) -> SlotAvailability {
    if carrier_blackout(date, None).is_blackout {
        return SlotAvailability::Unavailable;
    }
    tier_for_score(availability_score(zip, date, period, config))
}

/// Builds the full `TimeSlot` for a period on a date.
#[must_use]
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub fn build_time_slot(
    zip: &str,
    date: NaiveDate,
    period: SlotPeriod,
    config: &AvailabilityConfig,
    extra_fee: f64,
) -> TimeSlot {
    let availability: SlotAvailability =
        calculate_time_slot_availability(zip, date, period, config);
    let score: f64 = availability_score(zip, date, period, config);
    let ceiling: u8 = match period {
        SlotPeriod::Morning => config.capacity_limits.morning,
        SlotPeriod::Afternoon => config.capacity_limits.afternoon,
        SlotPeriod::Evening => config.capacity_limits.evening,
    };
    let capacity: u8 = if availability == SlotAvailability::Unavailable {
        0
    } else {
        (score.round() as u8).min(ceiling)
    };

    let base_fee: f64 = if period == SlotPeriod::Evening {
        EVENING_FEE
    } else {
        0.0
    };
    let (start_time, end_time): (NaiveTime, NaiveTime) = slot_window(period);

    let description: Option<String> = if is_weekend(date) {
        Some(String::from("Weekend pickup window"))
    } else if period == SlotPeriod::Evening {
        Some(String::from("After-hours pickup window"))
    } else {
        None
    };

    TimeSlot {
        id: period.as_str().to_string(),
        label: slot_label(period).to_string(),
        start_time,
        end_time,
        availability,
        additional_fee: base_fee + extra_fee,
        capacity,
        description,
    }
}
