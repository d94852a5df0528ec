// Copyright (C) 2026 Shipdesk Contributors
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Confirmation document generation.
//!
//! Pure derivation from the orchestration outputs; no I/O. This is the
//! one place the quoted price may increase, and every increase is
//! itemized as a named fee line rather than folded into the total.

use crate::collaborators::PaymentAuthorization;
use crate::error::SubmissionError;
use crate::request_response::ShipmentTransaction;
use crate::tracking::generate_tracking_number;
use chrono::{Datelike, NaiveDateTime, Weekday};
use serde::{Deserialize, Serialize};
use shipdesk_delivery::DeliveryEstimation;
use shipdesk_domain::PriceBreakdown;
use shipdesk_scheduling::PickupConfirmationResult;

/// Surcharge for a Saturday pickup, in dollars.
const SATURDAY_PICKUP_SURCHARGE: f64 = 30.0;
/// Surcharge for ID verification at pickup, in dollars.
const ID_VERIFICATION_SURCHARGE: f64 = 5.0;

/// One itemized fee added at confirmation time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CostLine {
    /// Fee label suitable for an invoice line.
    pub label: String,
    /// Fee amount, in dollars.
    pub amount: f64,
}

/// Final costs: the quote plus itemized confirmation-time fees.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FinalCosts {
    /// The price breakdown as quoted at selection time.
    pub quoted: PriceBreakdown,
    /// Fees added at confirmation; empty when nothing changed.
    pub confirmation_fees: Vec<CostLine>,
    /// Quoted total plus all confirmation fees.
    pub total: f64,
}

/// The final confirmation artifact returned to the caller.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConfirmationDetails {
    /// Confirmation number, `SHP-<year>-<6 digits>`.
    pub confirmation_number: String,
    /// Carrier-specific tracking number.
    pub tracking_number: String,
    /// The caller's reference for this shipment.
    pub customer_reference: String,
    /// Internal processing reference.
    pub internal_reference: String,
    /// Payment authorization code.
    pub payment_reference: String,
    /// Pickup reservation identifier.
    pub pickup_reference: String,
    /// When the submission was accepted (local wall-clock).
    pub submitted_at: NaiveDateTime,
    /// The estimated delivery date from the estimator.
    pub estimated_delivery: chrono::NaiveDate,
    /// Final itemized costs.
    pub costs: FinalCosts,
    /// Advisory handling and delivery instructions.
    pub special_instructions: Vec<String>,
    /// Advisory compliance notes.
    pub compliance_notes: Vec<String>,
}

/// Six digits mixing a random base with a timestamp tail; best-effort
/// uniqueness only.
fn confirmation_sequence(now: NaiveDateTime) -> String {
    let base: u32 = rand::random_range(100..1000);
    let tail: i64 = now.and_utc().timestamp_millis().rem_euclid(1000);
    format!("{base:03}{tail:03}")
}

fn confirmation_fees(transaction: &ShipmentTransaction) -> Vec<CostLine> {
    let mut fees: Vec<CostLine> = Vec::new();

    if transaction.pickup.pickup_date.weekday() == Weekday::Sat {
        fees.push(CostLine {
            label: String::from("Saturday pickup surcharge"),
            amount: SATURDAY_PICKUP_SURCHARGE,
        });
    }
    if transaction.pickup.slot.additional_fee > 0.0 {
        fees.push(CostLine {
            label: format!("{} slot fee", transaction.pickup.slot.label),
            amount: transaction.pickup.slot.additional_fee,
        });
    }
    if transaction.payment.id_verification_required {
        fees.push(CostLine {
            label: String::from("ID verification at pickup"),
            amount: ID_VERIFICATION_SURCHARGE,
        });
    }

    fees
}

fn special_instructions(transaction: &ShipmentTransaction) -> Vec<String> {
    let mut instructions: Vec<String> = Vec::new();

    if transaction.delivery_preferences.signature_required {
        instructions.push(String::from("Signature required on delivery"));
    }
    if transaction.delivery_preferences.leave_at_door {
        instructions.push(String::from("Authorized to leave at door"));
    }
    if let Some(text) = &transaction.delivery_preferences.delivery_instructions {
        if !text.trim().is_empty() {
            instructions.push(text.clone());
        }
    }
    if transaction.pickup.requires_two_person_team {
        instructions.push(String::from("Dispatch a two-person pickup team"));
    }
    if transaction.pickup.requires_pallet_jack {
        instructions.push(String::from("Pallet jack required at pickup"));
    }
    if transaction.pickup.requires_appointment {
        instructions.push(String::from("Call ahead to schedule pickup appointment"));
    }
    if transaction.pickup.has_loading_dock {
        instructions.push(String::from("Loading dock available at pickup location"));
    }
    if let Some(notes) = &transaction.pickup.location_notes {
        if !notes.trim().is_empty() {
            instructions.push(format!("Pickup access: {notes}"));
        }
    }

    instructions
}

fn compliance_notes(transaction: &ShipmentTransaction) -> Vec<String> {
    let mut notes: Vec<String> = Vec::new();

    if transaction.special_handling.fragile {
        notes.push(String::from("Fragile: handle with care"));
    }
    if transaction.special_handling.this_side_up {
        notes.push(String::from("Maintain package orientation (this side up)"));
    }
    if transaction.special_handling.temperature_controlled {
        notes.push(String::from(
            "Temperature-controlled transport required end to end",
        ));
    }
    if transaction.special_handling.hazmat {
        notes.push(String::from(
            "Hazardous materials: DOT shipping papers must accompany the shipment",
        ));
    }
    if transaction.payment.id_verification_required {
        notes.push(String::from(
            "Government-issued ID must be presented at pickup",
        ));
    }

    notes
}

/// Derives the final confirmation document from the orchestration
/// outputs.
///
/// # Errors
///
/// Returns [`SubmissionError::Internal`] if the inputs violate the
/// orchestrator's invariants, such as a pickup result without a
/// confirmation ID or an unauthorized payment.
pub fn generate_confirmation_details(
    transaction: &ShipmentTransaction,
    payment_auth: &PaymentAuthorization,
    pickup_confirmation: &PickupConfirmationResult,
    estimate: &DeliveryEstimation,
    now: NaiveDateTime,
) -> Result<ConfirmationDetails, SubmissionError> {
    let payment_reference: String =
        payment_auth
            .authorization_code
            .clone()
            .ok_or_else(|| SubmissionError::Internal {
                message: String::from("Payment authorization carries no authorization code"),
            })?;
    let pickup_reference: String =
        pickup_confirmation
            .confirmation_id
            .clone()
            .ok_or_else(|| SubmissionError::Internal {
                message: String::from("Pickup confirmation carries no confirmation ID"),
            })?;

    let fees: Vec<CostLine> = confirmation_fees(transaction);
    let fee_total: f64 = fees.iter().map(|line| line.amount).sum();
    let quoted: PriceBreakdown = transaction.selected_option.breakdown.clone();
    let total: f64 = quoted.total + fee_total;

    Ok(ConfirmationDetails {
        confirmation_number: format!("SHP-{}-{}", now.year(), confirmation_sequence(now)),
        tracking_number: generate_tracking_number(&transaction.selected_option.carrier),
        customer_reference: transaction.customer_reference.clone(),
        internal_reference: format!(
            "INT-{}-{:05}",
            now.format("%Y%m%d"),
            rand::random::<u32>() % 100_000
        ),
        payment_reference,
        pickup_reference,
        submitted_at: now,
        estimated_delivery: estimate.estimated_date,
        costs: FinalCosts {
            quoted,
            confirmation_fees: fees,
            total,
        },
        special_instructions: special_instructions(transaction),
        compliance_notes: compliance_notes(transaction),
    })
}
