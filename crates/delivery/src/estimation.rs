// Copyright (C) 2026 Shipdesk Contributors
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Delivery date estimation.
//!
//! The estimate is a pipeline of sequential date adjustments: base
//! transit, weekend rolling, holiday skipping, and a destination-zone
//! delay. Each stage consumes the previous stage's adjusted date.
//!
//! Estimates are advisory. The public entry point never fails: if the
//! internal computation errors, the caller still receives a usable
//! fallback estimate flagged with low confidence.

use crate::zones::{DestinationZone, classify_destination};
use chrono::{Datelike, Days, NaiveDate, NaiveTime, Weekday};
use serde::{Deserialize, Serialize};
use shipdesk_domain::{
    Address, Carrier, DomainError, PickupDetails, PricingOption, ServiceCategory, Simulation,
    federal_holiday, is_weekend,
};

/// Probability of an extra last-mile day for ground service to rural
/// destinations.
const RURAL_GROUND_DELAY_PROBABILITY: f64 = 0.2;

/// Time-of-day delivery band.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeliveryWindow {
    /// Earliest delivery time.
    pub earliest: NaiveTime,
    /// Latest delivery time.
    pub latest: NaiveTime,
}

/// Confidence bucket for an estimate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Confidence {
    /// Score at or above 0.85.
    High,
    /// Score at or above 0.70.
    Medium,
    /// Everything else, including fallback estimates.
    Low,
}

/// Itemized day adjustments applied by the pipeline.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct EstimationFactors {
    /// Advertised transit days.
    pub transit_days: u32,
    /// Calendar days consumed rolling over weekends.
    pub weekend_days_skipped: u32,
    /// Names of federal holidays skipped.
    pub holidays_skipped: Vec<String>,
    /// Days added by the destination-zone adjustment.
    pub zone_delay_days: u32,
}

/// A delivery estimate. Derived, never persisted; recomputed per request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeliveryEstimation {
    /// Estimated delivery date.
    pub estimated_date: NaiveDate,
    /// Estimated earliest delivery time, when a band applies.
    pub estimated_time: Option<NaiveTime>,
    /// Advertised transit days for the selected service.
    pub transit_days: u32,
    /// Whether the service delivers on business days only.
    pub business_days_only: bool,
    /// Time-of-day delivery band.
    pub delivery_window: DeliveryWindow,
    /// Itemized adjustments.
    pub factors: EstimationFactors,
    /// Confidence bucket.
    pub confidence: Confidence,
    /// Free-text advisories.
    pub notes: Vec<String>,
}

/// Estimates the delivery date for a confirmed pickup.
///
/// Never returns an error: if the internal pipeline fails, the result is
/// a fallback of `pickup_date + transit_days` with `Confidence::Low`.
///
/// # Arguments
///
/// * `pickup` - The confirmed pickup details
/// * `option` - The selected service
/// * `destination` - The delivery address
/// * `today` - Current date at the origin, for same-day detection
/// * `simulation` - Source of the rural last-mile delay decision
#[must_use]
pub fn estimate_delivery(
    pickup: &PickupDetails,
    option: &PricingOption,
    destination: &Address,
    today: NaiveDate,
    simulation: &dyn Simulation,
) -> DeliveryEstimation {
    match compute_estimate(pickup, option, destination, today, simulation) {
        Ok(estimation) => estimation,
        Err(error) => {
            tracing::warn!(%error, "delivery estimation failed; returning fallback");
            fallback_estimate(pickup, option)
        }
    }
}

/// The full estimation pipeline.
fn compute_estimate(
    pickup: &PickupDetails,
    option: &PricingOption,
    destination: &Address,
    today: NaiveDate,
    simulation: &dyn Simulation,
) -> Result<DeliveryEstimation, DomainError> {
    let business_days_only: bool = !option.saturday_delivery;
    let mut factors: EstimationFactors = EstimationFactors {
        transit_days: option.transit_days,
        ..EstimationFactors::default()
    };

    // Stage 1: base date. Same-day pickups advance one day before
    // transit is applied, so the estimate is always at least pickup + 1.
    let mut date: NaiveDate = pickup.pickup_date;
    if date == today {
        date = add_days(date, 1)?;
    }
    date = add_days(date, u64::from(option.transit_days))?;

    // Stage 2: weekend rolling.
    if business_days_only {
        date = roll_weekend(date, &mut factors)?;
    }

    // Stage 3: holiday skipping, repeated until the date is clear.
    date = skip_holidays(date, business_days_only, &mut factors)?;

    // Stage 4: destination zone delay.
    let zone: DestinationZone = classify_destination(&destination.city, &destination.state);
    let zone_delay: u32 = match zone {
        DestinationZone::Remote if option.category != ServiceCategory::Air => 1,
        DestinationZone::Rural
            if option.category == ServiceCategory::Ground
                && simulation.chance(RURAL_GROUND_DELAY_PROBABILITY) =>
        {
            1
        }
        _ => 0,
    };
    if zone_delay > 0 {
        factors.zone_delay_days = zone_delay;
        date = add_days(date, u64::from(zone_delay))?;
        if business_days_only {
            date = roll_weekend(date, &mut factors)?;
        }
    }

    // Stage 5: delivery window.
    let delivery_window: DeliveryWindow = delivery_window_for(&option.service_type, date);

    // Stage 6: confidence.
    let confidence: Confidence = confidence_for(option, zone);

    // Stage 7: notes.
    let notes: Vec<String> = assemble_notes(option, destination, zone, &factors);

    Ok(DeliveryEstimation {
        estimated_date: date,
        estimated_time: Some(delivery_window.earliest),
        transit_days: option.transit_days,
        business_days_only,
        delivery_window,
        factors,
        confidence,
        notes,
    })
}

/// Fallback when the pipeline fails: pickup plus advertised transit,
/// saturating at the date-range boundary.
fn fallback_estimate(pickup: &PickupDetails, option: &PricingOption) -> DeliveryEstimation {
    let estimated_date: NaiveDate = pickup
        .pickup_date
        .checked_add_days(Days::new(u64::from(option.transit_days)))
        .unwrap_or(pickup.pickup_date);

    DeliveryEstimation {
        estimated_date,
        estimated_time: None,
        transit_days: option.transit_days,
        business_days_only: !option.saturday_delivery,
        delivery_window: DEFAULT_WINDOW,
        factors: EstimationFactors {
            transit_days: option.transit_days,
            ..EstimationFactors::default()
        },
        confidence: Confidence::Low,
        notes: vec![String::from(
            "Estimate derived from base transit time only; adjustments unavailable",
        )],
    }
}

fn add_days(date: NaiveDate, days: u64) -> Result<NaiveDate, DomainError> {
    date.checked_add_days(Days::new(days))
        .ok_or_else(|| DomainError::DateArithmeticOverflow {
            operation: format!("adding {days} days to {date}"),
        })
}

/// Rolls forward over any weekend days, counting each day consumed.
fn roll_weekend(
    mut date: NaiveDate,
    factors: &mut EstimationFactors,
) -> Result<NaiveDate, DomainError> {
    while is_weekend(date) {
        date = add_days(date, 1)?;
        factors.weekend_days_skipped += 1;
    }
    Ok(date)
}

/// Skips every federal holiday the rolling sequence lands on, recording
/// each skipped holiday's name. Idempotent once the date is clear.
fn skip_holidays(
    mut date: NaiveDate,
    business_days_only: bool,
    factors: &mut EstimationFactors,
) -> Result<NaiveDate, DomainError> {
    while let Some(name) = federal_holiday(date) {
        factors.holidays_skipped.push(name.to_string());
        date = add_days(date, 1)?;
        if business_days_only {
            date = roll_weekend(date, factors)?;
        }
    }
    Ok(date)
}

const DEFAULT_WINDOW: DeliveryWindow = DeliveryWindow {
    earliest: time_const(9, 0),
    latest: time_const(17, 0),
};

const fn time_const(hour: u32, minute: u32) -> NaiveTime {
    match NaiveTime::from_hms_opt(hour, minute, 0) {
        Some(time) => time,
        None => unreachable!(),
    }
}

/// Selects the time-of-day band by service-type keyword; Saturday
/// deliveries override to a compressed window.
fn delivery_window_for(service_type: &str, date: NaiveDate) -> DeliveryWindow {
    if date.weekday() == Weekday::Sat {
        return DeliveryWindow {
            earliest: time_const(9, 0),
            latest: time_const(14, 0),
        };
    }

    let label: String = service_type.to_ascii_lowercase();
    if label.contains("overnight") {
        DeliveryWindow {
            earliest: time_const(8, 0),
            latest: time_const(10, 30),
        }
    } else if label.contains("express") {
        DeliveryWindow {
            earliest: time_const(8, 0),
            latest: time_const(12, 0),
        }
    } else if label.contains("priority") {
        DeliveryWindow {
            earliest: time_const(9, 0),
            latest: time_const(15, 0),
        }
    } else if label.contains("economy") {
        DeliveryWindow {
            earliest: time_const(10, 0),
            latest: time_const(18, 0),
        }
    } else {
        DEFAULT_WINDOW
    }
}

/// Per-carrier on-time reliability, used as a confidence adjustment.
fn carrier_reliability(carrier: &Carrier) -> f64 {
    match carrier {
        Carrier::Ups => 0.92,
        Carrier::FedEx => 0.90,
        Carrier::Dhl => 0.85,
        Carrier::Usps => 0.80,
        Carrier::Other(_) => 0.85,
    }
}

/// Confidence score: 0.8 baseline, adjusted by category, destination
/// zone, and carrier reliability, then bucketed.
fn confidence_for(option: &PricingOption, zone: DestinationZone) -> Confidence {
    let mut score: f64 = 0.8;

    match option.category {
        ServiceCategory::Air => score += 0.1,
        ServiceCategory::Freight => score -= 0.1,
        ServiceCategory::Ground => {}
    }

    match zone {
        DestinationZone::Metropolitan => score += 0.1,
        DestinationZone::Rural => score -= 0.1,
        DestinationZone::Remote => score -= 0.2,
    }

    score += carrier_reliability(&option.carrier) - 0.85;

    if score >= 0.85 {
        Confidence::High
    } else if score >= 0.70 {
        Confidence::Medium
    } else {
        Confidence::Low
    }
}

/// Assembles free-text advisories from the pipeline outcome.
fn assemble_notes(
    option: &PricingOption,
    destination: &Address,
    zone: DestinationZone,
    factors: &EstimationFactors,
) -> Vec<String> {
    let mut notes: Vec<String> = Vec::new();
    let label: String = option.service_type.to_ascii_lowercase();

    if label.contains("overnight") {
        notes.push(String::from("Overnight service: delivery by 10:30 AM"));
    } else if label.contains("express") {
        notes.push(String::from("Express service: morning delivery"));
    }

    if zone == DestinationZone::Remote {
        notes.push(String::from(
            "Remote destination: transit times are extended",
        ));
    }

    for holiday in &factors.holidays_skipped {
        notes.push(format!("Adjusted for {holiday}"));
    }

    if factors.weekend_days_skipped > 0 {
        notes.push(String::from("Adjusted to skip weekend days"));
    }

    if destination.residential {
        notes.push(String::from(
            "Residential delivery: a signature may be required",
        ));
    }

    notes
}
