// Copyright (C) 2026 Shipdesk Contributors
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Pickup slot confirmation.
//!
//! Each call is a fresh `Requested -> {Confirmed | Rejected}` attempt
//! with no persisted state. Deterministic sanity checks (past date, lead
//! time) run before any randomized check, so a request inside the lead
//! time floor is rejected for that reason on every call. Randomized
//! checks model live capacity contention and flow through the
//! `Simulation` seam.
//!
//! Browse-time availability is advisory only; confirmation re-validates
//! independently of whatever tier the client displayed.

use chrono::{Datelike, NaiveDate, NaiveDateTime, Timelike, Weekday};
use serde::{Deserialize, Serialize};
use shipdesk_domain::{PickupDetails, Simulation, SlotAvailability, SlotPeriod, TimeSlot};
use std::time::{SystemTime, UNIX_EPOCH};

/// Minimum notice before a pickup window opens, in hours.
pub const MINIMUM_NOTICE_HOURS: i64 = 12;

/// Probability that the slot was taken by another customer between
/// browse and confirm.
const CONTENTION_PROBABILITY: f64 = 0.02;
/// Probability that no two-person team is available.
const TWO_PERSON_FAILURE: f64 = 0.05;
/// Probability that no pallet jack is available.
const PALLET_JACK_FAILURE: f64 = 0.03;
/// Probability that the required appointment cannot be scheduled.
const APPOINTMENT_FAILURE: f64 = 0.02;

/// Maximum number of alternative slots suggested on rejection.
const MAX_ALTERNATIVES: usize = 8;

/// Terminal outcome of a confirmation attempt.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PickupConfirmationResult {
    /// Whether the slot was reserved.
    pub confirmed: bool,
    /// Confirmation identifier, present on success.
    pub confirmation_id: Option<String>,
    /// Human-readable reservation code for driver manifests, present on
    /// success.
    pub reservation_code: Option<String>,
    /// Rejection reason, present on failure.
    pub reason: Option<String>,
    /// Simulated processing time, in milliseconds.
    pub processing_time_ms: u64,
    /// Alternative slots the caller may re-offer, present on failure.
    pub alternative_slots: Option<Vec<TimeSlot>>,
}

/// Validates and reserves a previously-offered pickup slot.
///
/// Checks run in a fixed order and the first failure wins: past-date and
/// lead-time sanity first, then simulated contention, equipment
/// availability, appointment scheduling, and day/hour capacity
/// heuristics.
///
/// # Arguments
///
/// * `details` - The chosen date, slot, and access/equipment metadata
/// * `now` - Current wall-clock datetime at the origin
/// * `simulation` - Source of randomized contention decisions
#[must_use]
pub fn confirm_pickup_slot(
    details: &PickupDetails,
    now: NaiveDateTime,
    simulation: &dyn Simulation,
) -> PickupConfirmationResult {
    let processing_time_ms: u64 = processing_time(details);

    if details.pickup_date < now.date() {
        return reject(
            details,
            format!("Pickup date {} has already passed", details.pickup_date),
            processing_time_ms,
            simulation,
        );
    }

    let window_opens: NaiveDateTime = details.pickup_date.and_time(details.slot.start_time);
    let notice_minutes: i64 = (window_opens - now).num_minutes();
    if notice_minutes < MINIMUM_NOTICE_HOURS * 60 {
        return reject(
            details,
            format!(
                "Insufficient lead time: pickups require at least {MINIMUM_NOTICE_HOURS} hours notice"
            ),
            processing_time_ms,
            simulation,
        );
    }

    if simulation.chance(CONTENTION_PROBABILITY) {
        return reject(
            details,
            String::from("This time slot was just reserved by another customer"),
            processing_time_ms,
            simulation,
        );
    }

    if details.requires_two_person_team && simulation.chance(TWO_PERSON_FAILURE) {
        return reject(
            details,
            String::from("No two-person team is available for this window"),
            processing_time_ms,
            simulation,
        );
    }

    if details.requires_pallet_jack && simulation.chance(PALLET_JACK_FAILURE) {
        return reject(
            details,
            String::from("No pallet jack is available for this window"),
            processing_time_ms,
            simulation,
        );
    }

    if details.requires_appointment && simulation.chance(APPOINTMENT_FAILURE) {
        return reject(
            details,
            String::from("The required appointment could not be scheduled before the window"),
            processing_time_ms,
            simulation,
        );
    }

    let load_probability: f64 = capacity_rejection_probability(details.pickup_date, &details.slot);
    if load_probability > 0.0 && simulation.chance(load_probability) {
        return reject(
            details,
            format!(
                "The {} window on {} is at capacity",
                details.slot.label, details.pickup_date
            ),
            processing_time_ms,
            simulation,
        );
    }

    let confirmation_id: String = generate_confirmation_id();
    tracing::info!(
        pickup_date = %details.pickup_date,
        slot = %details.slot.id,
        %confirmation_id,
        "pickup slot confirmed"
    );

    PickupConfirmationResult {
        confirmed: true,
        confirmation_id: Some(confirmation_id),
        reservation_code: Some(generate_reservation_code(
            details.pickup_date,
            &details.slot,
        )),
        reason: None,
        processing_time_ms,
        alternative_slots: None,
    }
}

/// Builds the rejection result, including alternatives.
fn reject(
    details: &PickupDetails,
    reason: String,
    processing_time_ms: u64,
    simulation: &dyn Simulation,
) -> PickupConfirmationResult {
    tracing::warn!(
        pickup_date = %details.pickup_date,
        slot = %details.slot.id,
        %reason,
        "pickup slot rejected"
    );
    PickupConfirmationResult {
        confirmed: false,
        confirmation_id: None,
        reservation_code: None,
        reason: Some(reason),
        processing_time_ms,
        alternative_slots: Some(alternative_slots(details, simulation)),
    }
}

/// Day-of-week/hour-of-day load heuristics.
///
/// Monday mornings and Friday afternoons carry weekend backlog; windows
/// opening before 08:00 or at 18:00 and later are thinly staffed.
fn capacity_rejection_probability(date: NaiveDate, slot: &TimeSlot) -> f64 {
    let hour: u32 = slot.start_time.hour();
    let mut probability: f64 = 0.0;

    if date.weekday() == Weekday::Mon && hour < 12 {
        probability += 0.10;
    }
    if date.weekday() == Weekday::Fri && hour >= 12 {
        probability += 0.10;
    }
    if hour < 8 || hour >= 18 {
        probability += 0.08;
    }

    probability
}

/// Simulated processing time scaled by request complexity.
fn processing_time(details: &PickupDetails) -> u64 {
    let mut milliseconds: u64 = 200;
    if details.requires_two_person_team {
        milliseconds += 150;
    }
    if details.requires_pallet_jack {
        milliseconds += 100;
    }
    if details.requires_appointment {
        milliseconds += 120;
    }
    if !details.authorization_on_file {
        milliseconds += 80;
    }
    milliseconds.min(800)
}

/// Generates up to eight alternative slots across the same day, the next
/// day, and the day after, tagged with context-based fees.
fn alternative_slots(details: &PickupDetails, simulation: &dyn Simulation) -> Vec<TimeSlot> {
    let mut alternatives: Vec<TimeSlot> = Vec::new();

    for (offset, fee) in [(0_u64, 0.0_f64), (1, 10.0), (2, 15.0)] {
        let Some(date) = details
            .pickup_date
            .checked_add_days(chrono::Days::new(offset))
        else {
            continue;
        };

        let count: usize = simulation.pick_count(2, 3);
        let start: usize = simulation.pick_count(0, 2);
        for index in 0..count {
            if alternatives.len() >= MAX_ALTERNATIVES {
                break;
            }
            let period: SlotPeriod = SlotPeriod::ALL[(start + index) % SlotPeriod::ALL.len()];
            let (start_time, end_time) = crate::slots::slot_window(period);
            alternatives.push(TimeSlot {
                id: period.as_str().to_string(),
                label: crate::slots::slot_label(period).to_string(),
                start_time,
                end_time,
                availability: SlotAvailability::Available,
                additional_fee: fee,
                capacity: 75,
                description: Some(format!("Alternative window on {date}")),
            });
        }
    }

    alternatives
}

/// Best-effort unique confirmation identifier (timestamp tail + random
/// suffix); no central allocator stands behind it.
fn generate_confirmation_id() -> String {
    let timestamp: u128 = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map_or(0, |elapsed| elapsed.as_millis());
    format!("PU-{:06}-{:04}", timestamp % 1_000_000, rand::random::<u16>() % 10_000)
}

/// Human-readable reservation code for driver manifests.
fn generate_reservation_code(date: NaiveDate, slot: &TimeSlot) -> String {
    format!(
        "RSV-{}-{}-{:04}",
        date.format("%Y%m%d"),
        slot.start_time.format("%H%M"),
        rand::random::<u16>() % 10_000
    )
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use shipdesk_domain::{DisabledSimulation, LiveSimulation};

    fn slot(period: SlotPeriod) -> TimeSlot {
        let (start_time, end_time) = crate::slots::slot_window(period);
        TimeSlot {
            id: period.as_str().to_string(),
            label: crate::slots::slot_label(period).to_string(),
            start_time,
            end_time,
            availability: SlotAvailability::Available,
            additional_fee: 0.0,
            capacity: 80,
            description: None,
        }
    }

    fn details(pickup_date: NaiveDate, period: SlotPeriod) -> PickupDetails {
        PickupDetails {
            pickup_date,
            slot: slot(period),
            contact_name: String::from("Dana Cross"),
            contact_phone: String::from("555-0142"),
            location_notes: None,
            requires_two_person_team: false,
            requires_pallet_jack: false,
            requires_appointment: false,
            has_loading_dock: true,
            authorization_on_file: true,
        }
    }

    fn at(year: i32, month: u32, day: u32, hour: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(year, month, day)
            .unwrap()
            .and_hms_opt(hour, 0, 0)
            .unwrap()
    }

    #[test]
    fn test_confirms_with_ample_notice() {
        let request: PickupDetails =
            details(NaiveDate::from_ymd_opt(2026, 3, 17).unwrap(), SlotPeriod::Afternoon);
        let result: PickupConfirmationResult =
            confirm_pickup_slot(&request, at(2026, 3, 10, 9), &DisabledSimulation);

        assert!(result.confirmed);
        assert!(result.confirmation_id.as_deref().unwrap().starts_with("PU-"));
        assert!(result.reservation_code.as_deref().unwrap().starts_with("RSV-20260317-1200"));
        assert!(result.reason.is_none());
        assert!(result.alternative_slots.is_none());
    }

    #[test]
    fn test_rejects_past_date() {
        let request: PickupDetails =
            details(NaiveDate::from_ymd_opt(2026, 3, 9).unwrap(), SlotPeriod::Morning);
        let result: PickupConfirmationResult =
            confirm_pickup_slot(&request, at(2026, 3, 10, 9), &DisabledSimulation);

        assert!(!result.confirmed);
        assert!(result.reason.unwrap().contains("already passed"));
    }

    #[test]
    fn test_eleven_hours_notice_always_rejects_for_lead_time() {
        // Morning window opens 08:00; at 21:00 the prior evening only 11
        // hours remain. The deterministic lead-time check must fire even
        // under live randomness.
        let request: PickupDetails =
            details(NaiveDate::from_ymd_opt(2026, 3, 11).unwrap(), SlotPeriod::Morning);
        for _ in 0..50 {
            let result: PickupConfirmationResult =
                confirm_pickup_slot(&request, at(2026, 3, 10, 21), &LiveSimulation);
            assert!(!result.confirmed);
            assert!(result.reason.unwrap().contains("lead time"));
        }
    }

    #[test]
    fn test_exactly_twelve_hours_notice_passes_lead_time() {
        let request: PickupDetails =
            details(NaiveDate::from_ymd_opt(2026, 3, 11).unwrap(), SlotPeriod::Morning);
        let result: PickupConfirmationResult =
            confirm_pickup_slot(&request, at(2026, 3, 10, 20), &DisabledSimulation);
        assert!(result.confirmed);
    }

    #[test]
    fn test_rejection_includes_alternatives() {
        let request: PickupDetails =
            details(NaiveDate::from_ymd_opt(2026, 3, 9).unwrap(), SlotPeriod::Morning);
        let result: PickupConfirmationResult =
            confirm_pickup_slot(&request, at(2026, 3, 10, 9), &DisabledSimulation);

        let alternatives: Vec<TimeSlot> = result.alternative_slots.unwrap();
        assert!(!alternatives.is_empty());
        assert!(alternatives.len() <= MAX_ALTERNATIVES);
        // Same-day alternatives are free; later days carry 10/15 fees.
        let fees: Vec<f64> = alternatives.iter().map(|s| s.additional_fee).collect();
        assert!(fees.contains(&0.0));
        assert!(fees.contains(&10.0));
        assert!(fees.contains(&15.0));
    }

    #[test]
    fn test_processing_time_scales_with_complexity() {
        let simple: PickupDetails =
            details(NaiveDate::from_ymd_opt(2026, 3, 17).unwrap(), SlotPeriod::Afternoon);
        let mut complex: PickupDetails = simple.clone();
        complex.requires_two_person_team = true;
        complex.requires_pallet_jack = true;
        complex.requires_appointment = true;
        complex.authorization_on_file = false;

        let now: NaiveDateTime = at(2026, 3, 10, 9);
        let simple_result: PickupConfirmationResult =
            confirm_pickup_slot(&simple, now, &DisabledSimulation);
        let complex_result: PickupConfirmationResult =
            confirm_pickup_slot(&complex, now, &DisabledSimulation);

        assert!(complex_result.processing_time_ms > simple_result.processing_time_ms);
        assert!(complex_result.processing_time_ms <= 800);
    }

    #[test]
    fn test_capacity_heuristics() {
        // Monday morning and Friday evening carry load penalties.
        let monday: NaiveDate = NaiveDate::from_ymd_opt(2026, 3, 9).unwrap();
        let friday: NaiveDate = NaiveDate::from_ymd_opt(2026, 3, 13).unwrap();
        let tuesday: NaiveDate = NaiveDate::from_ymd_opt(2026, 3, 10).unwrap();

        assert!(capacity_rejection_probability(monday, &slot(SlotPeriod::Morning)) > 0.0);
        assert!(capacity_rejection_probability(friday, &slot(SlotPeriod::Evening)) > 0.0);
        assert!(
            capacity_rejection_probability(tuesday, &slot(SlotPeriod::Afternoon)).abs()
                < f64::EPSILON
        );
    }

    #[test]
    fn test_disabled_simulation_never_randomly_rejects() {
        // Equipment-heavy request with all random checks disabled.
        let mut request: PickupDetails =
            details(NaiveDate::from_ymd_opt(2026, 3, 17).unwrap(), SlotPeriod::Afternoon);
        request.requires_two_person_team = true;
        request.requires_pallet_jack = true;
        request.requires_appointment = true;

        let result: PickupConfirmationResult =
            confirm_pickup_slot(&request, at(2026, 3, 10, 9), &DisabledSimulation);
        assert!(result.confirmed);
    }
}
