// Copyright (C) 2026 Shipdesk Contributors
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Orchestrator collaborators: business-rule validation and payment
//! authorization.
//!
//! The orchestrator consumes these as traits so the server can wire in
//! real services and tests can wire in counting stubs. The provided
//! implementations simulate realistic behavior for demo parity.

use crate::request_response::{PaymentInfo, ShipmentTransaction};
use serde::{Deserialize, Serialize};
use shipdesk_domain::{ServiceCategory, Simulation};

/// A single validation issue.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationIssue {
    /// Human-readable message.
    pub message: String,
    /// The offending field, when attributable.
    pub field: Option<String>,
}

/// Outcome of business-rule validation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationOutcome {
    /// Whether the transaction passed all rules.
    pub is_valid: bool,
    /// All issues found; empty when valid.
    pub errors: Vec<ValidationIssue>,
}

/// Business-rule validation boundary.
pub trait BusinessRuleValidator {
    /// Validates a transaction against business rules.
    fn validate(&self, transaction: &ShipmentTransaction) -> ValidationOutcome;
}

/// Outcome of payment authorization.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaymentAuthorization {
    /// Whether the payment was authorized.
    pub authorized: bool,
    /// Authorization code, present on success.
    pub authorization_code: Option<String>,
    /// Decline reason, present on failure.
    pub reason: Option<String>,
}

/// Payment authorization boundary.
pub trait PaymentAuthorizer {
    /// Authorizes payment for a transaction.
    fn authorize(&self, payment: &PaymentInfo) -> PaymentAuthorization;
}

/// Maximum weight per non-freight piece, in pounds.
const MAX_PARCEL_WEIGHT_LBS: f64 = 150.0;

/// Rule-based validator covering required fields, weight caps, and
/// category exclusions.
#[derive(Debug, Clone, Copy, Default)]
pub struct StandardValidator;

impl BusinessRuleValidator for StandardValidator {
    fn validate(&self, transaction: &ShipmentTransaction) -> ValidationOutcome {
        let mut errors: Vec<ValidationIssue> = Vec::new();

        if transaction.customer_reference.trim().is_empty() {
            errors.push(ValidationIssue {
                message: String::from("Customer reference is required"),
                field: Some(String::from("customer_reference")),
            });
        }

        if transaction.pieces.is_empty() {
            errors.push(ValidationIssue {
                message: String::from("A shipment must contain at least one piece"),
                field: Some(String::from("pieces")),
            });
        }

        for (index, piece) in transaction.pieces.iter().enumerate() {
            if piece.weight_lbs <= 0.0 {
                errors.push(ValidationIssue {
                    message: format!("Piece {} has a non-positive weight", index + 1),
                    field: Some(format!("pieces[{index}].weight_lbs")),
                });
            }
            if piece.weight_lbs > MAX_PARCEL_WEIGHT_LBS
                && transaction.selected_option.category != ServiceCategory::Freight
            {
                errors.push(ValidationIssue {
                    message: format!(
                        "Piece {} exceeds {MAX_PARCEL_WEIGHT_LBS} lbs and requires freight service",
                        index + 1
                    ),
                    field: Some(format!("pieces[{index}].weight_lbs")),
                });
            }
        }

        if transaction.special_handling.hazmat
            && transaction.selected_option.category == ServiceCategory::Air
        {
            errors.push(ValidationIssue {
                message: String::from("Hazardous materials cannot ship via air service"),
                field: Some(String::from("special_handling.hazmat")),
            });
        }

        if transaction.pickup.contact_phone.trim().is_empty() {
            errors.push(ValidationIssue {
                message: String::from("A pickup contact phone number is required"),
                field: Some(String::from("pickup.contact_phone")),
            });
        }

        ValidationOutcome {
            is_valid: errors.is_empty(),
            errors,
        }
    }
}

/// Probability the simulated gateway declines an otherwise-valid payment.
const GATEWAY_DECLINE_PROBABILITY: f64 = 0.03;
/// Test-card suffix that always declines.
const DECLINE_TEST_SUFFIX: &str = "0002";

/// Simulated payment gateway for demo parity.
///
/// Declines randomly through the simulation seam; an empty account
/// reference or the test-card decline suffix is always declined.
#[derive(Debug, Clone, Copy, Default)]
pub struct SimulatedGateway<S: Simulation> {
    simulation: S,
}

impl<S: Simulation> SimulatedGateway<S> {
    /// Creates a gateway backed by the given simulation policy.
    pub const fn new(simulation: S) -> Self {
        Self { simulation }
    }
}

impl<S: Simulation> PaymentAuthorizer for SimulatedGateway<S> {
    fn authorize(&self, payment: &PaymentInfo) -> PaymentAuthorization {
        if payment.account_reference.trim().is_empty() {
            return PaymentAuthorization {
                authorized: false,
                authorization_code: None,
                reason: Some(String::from("Missing payment account reference")),
            };
        }

        if payment.account_reference.ends_with(DECLINE_TEST_SUFFIX) {
            return PaymentAuthorization {
                authorized: false,
                authorization_code: None,
                reason: Some(String::from("Card declined (test decline code)")),
            };
        }

        if self.simulation.chance(GATEWAY_DECLINE_PROBABILITY) {
            return PaymentAuthorization {
                authorized: false,
                authorization_code: None,
                reason: Some(String::from("Payment was declined by the issuer")),
            };
        }

        PaymentAuthorization {
            authorized: true,
            authorization_code: Some(format!("AUTH-{:08}", rand::random::<u32>() % 100_000_000)),
            reason: None,
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::request_response::test_support::transaction;
    use shipdesk_domain::DisabledSimulation;

    #[test]
    fn test_standard_validator_accepts_sound_transaction() {
        let outcome: ValidationOutcome = StandardValidator.validate(&transaction());
        assert!(outcome.is_valid, "{:?}", outcome.errors);
    }

    #[test]
    fn test_missing_reference_is_flagged() {
        let mut bad: ShipmentTransaction = transaction();
        bad.customer_reference = String::from("  ");
        let outcome: ValidationOutcome = StandardValidator.validate(&bad);
        assert!(!outcome.is_valid);
        assert!(
            outcome
                .errors
                .iter()
                .any(|issue| issue.field.as_deref() == Some("customer_reference"))
        );
    }

    #[test]
    fn test_heavy_piece_requires_freight() {
        let mut bad: ShipmentTransaction = transaction();
        bad.pieces[0].weight_lbs = 300.0;
        let outcome: ValidationOutcome = StandardValidator.validate(&bad);
        assert!(!outcome.is_valid);
        assert!(
            outcome
                .errors
                .iter()
                .any(|issue| issue.message.contains("freight"))
        );
    }

    #[test]
    fn test_hazmat_air_exclusion() {
        let mut bad: ShipmentTransaction = transaction();
        bad.special_handling.hazmat = true;
        bad.selected_option.category = ServiceCategory::Air;
        let outcome: ValidationOutcome = StandardValidator.validate(&bad);
        assert!(!outcome.is_valid);
    }

    #[test]
    fn test_all_issues_are_collected() {
        let mut bad: ShipmentTransaction = transaction();
        bad.customer_reference = String::new();
        bad.pickup.contact_phone = String::new();
        let outcome: ValidationOutcome = StandardValidator.validate(&bad);
        assert_eq!(outcome.errors.len(), 2);
    }

    #[test]
    fn test_gateway_authorizes_with_disabled_simulation() {
        let gateway: SimulatedGateway<DisabledSimulation> =
            SimulatedGateway::new(DisabledSimulation);
        let auth: PaymentAuthorization = gateway.authorize(&transaction().payment);
        assert!(auth.authorized);
        assert!(auth.authorization_code.unwrap().starts_with("AUTH-"));
    }

    #[test]
    fn test_gateway_declines_test_card_suffix() {
        let gateway: SimulatedGateway<DisabledSimulation> =
            SimulatedGateway::new(DisabledSimulation);
        let mut payment: PaymentInfo = transaction().payment;
        payment.account_reference = String::from("tok_0002");
        let auth: PaymentAuthorization = gateway.authorize(&payment);
        assert!(!auth.authorized);
    }

    #[test]
    fn test_gateway_declines_empty_reference() {
        let gateway: SimulatedGateway<DisabledSimulation> =
            SimulatedGateway::new(DisabledSimulation);
        let mut payment: PaymentInfo = transaction().payment;
        payment.account_reference = String::new();
        let auth: PaymentAuthorization = gateway.authorize(&payment);
        assert!(!auth.authorized);
        assert!(auth.reason.unwrap().contains("account reference"));
    }
}
