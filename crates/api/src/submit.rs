// Copyright (C) 2026 Shipdesk Contributors
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Submission orchestration.
//!
//! One ordered, fail-fast pipeline: validation, payment authorization,
//! pickup confirmation, delivery estimation, confirmation generation.
//! The first failing stage aborts all later stages; no compensating
//! transactions exist because no stage persists anything.

use crate::collaborators::{BusinessRuleValidator, PaymentAuthorization, PaymentAuthorizer};
use crate::confirmation::generate_confirmation_details;
use crate::error::SubmissionError;
use crate::request_response::{PaymentMethod, ShipmentTransaction, SubmissionResponse};
use chrono::NaiveDateTime;
use shipdesk_delivery::{DeliveryEstimation, estimate_delivery};
use shipdesk_domain::Simulation;
use shipdesk_scheduling::{PickupConfirmationResult, confirm_pickup_slot};

/// Base simulated processing time, in milliseconds.
const BASE_PROCESSING_MS: u64 = 300;
/// Added per special-handling flag.
const HANDLING_PROCESSING_MS: u64 = 50;
/// Added per piece beyond the first.
const EXTRA_PIECE_PROCESSING_MS: u64 = 30;
/// Ceiling on simulated processing time.
const MAX_PROCESSING_MS: u64 = 1_500;

/// Simulated end-to-end processing time scaled by transaction
/// complexity. Fidelity only; no real delay is inserted.
fn processing_time_ms(transaction: &ShipmentTransaction) -> u64 {
    let payment_ms: u64 = match transaction.payment.method {
        PaymentMethod::CreditCard => 150,
        PaymentMethod::Ach => 250,
        PaymentMethod::Account => 100,
    };
    let handling_ms: u64 =
        u64::from(transaction.special_handling.count()) * HANDLING_PROCESSING_MS;
    let pieces_ms: u64 = u64::try_from(transaction.pieces.len().saturating_sub(1))
        .unwrap_or(u64::MAX)
        .saturating_mul(EXTRA_PIECE_PROCESSING_MS);
    (BASE_PROCESSING_MS + payment_ms + handling_ms)
        .saturating_add(pieces_ms)
        .min(MAX_PROCESSING_MS)
}

/// Submits a shipment through the full pipeline.
///
/// Stage order is strict: each stage assumes the previous stage's
/// invariants hold, and the first failure propagates immediately with
/// no partial success.
///
/// # Errors
///
/// - [`SubmissionError::Validation`] if business rules reject the
///   transaction, carrying every issue found.
/// - [`SubmissionError::PaymentDeclined`] if authorization fails.
/// - [`SubmissionError::PickupUnavailable`] if the slot cannot be
///   reserved, carrying alternative slots to re-offer.
/// - [`SubmissionError::Internal`] for invariant violations in later
///   stages.
pub fn submit_shipment(
    transaction: &ShipmentTransaction,
    validator: &dyn BusinessRuleValidator,
    authorizer: &dyn PaymentAuthorizer,
    now: NaiveDateTime,
    simulation: &dyn Simulation,
) -> Result<SubmissionResponse, SubmissionError> {
    let outcome = validator.validate(transaction);
    if !outcome.is_valid {
        tracing::info!(
            customer_reference = %transaction.customer_reference,
            issues = outcome.errors.len(),
            "shipment rejected by business rules"
        );
        return Err(SubmissionError::Validation {
            errors: outcome.errors,
        });
    }

    let payment_auth: PaymentAuthorization = authorizer.authorize(&transaction.payment);
    if !payment_auth.authorized {
        let reason: String = payment_auth
            .reason
            .unwrap_or_else(|| String::from("Payment was declined"));
        tracing::info!(
            customer_reference = %transaction.customer_reference,
            %reason,
            "payment declined"
        );
        return Err(SubmissionError::PaymentDeclined { reason });
    }

    let pickup_confirmation: PickupConfirmationResult =
        confirm_pickup_slot(&transaction.pickup, now, simulation);
    if !pickup_confirmation.confirmed {
        let reason: String = pickup_confirmation
            .reason
            .unwrap_or_else(|| String::from("Pickup slot could not be reserved"));
        tracing::info!(
            customer_reference = %transaction.customer_reference,
            pickup_date = %transaction.pickup.pickup_date,
            %reason,
            "pickup unavailable"
        );
        return Err(SubmissionError::PickupUnavailable {
            reason,
            alternatives: pickup_confirmation.alternative_slots.unwrap_or_default(),
        });
    }

    // Estimation never fails; it falls back internally.
    let estimation: DeliveryEstimation = estimate_delivery(
        &transaction.pickup,
        &transaction.selected_option,
        &transaction.destination,
        now.date(),
        simulation,
    );

    let confirmation = generate_confirmation_details(
        transaction,
        &payment_auth,
        &pickup_confirmation,
        &estimation,
        now,
    )?;

    tracing::info!(
        customer_reference = %transaction.customer_reference,
        confirmation_number = %confirmation.confirmation_number,
        tracking_number = %confirmation.tracking_number,
        "shipment confirmed"
    );

    Ok(SubmissionResponse {
        confirmation,
        estimation,
        pickup_confirmation,
        processing_time_ms: processing_time_ms(transaction),
    })
}
