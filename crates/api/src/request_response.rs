// Copyright (C) 2026 Shipdesk Contributors
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Submission request and response data transfer objects.

use serde::{Deserialize, Serialize};
use shipdesk_delivery::DeliveryEstimation;
use shipdesk_domain::{Address, PickupDetails, PricingOption};
use shipdesk_scheduling::PickupConfirmationResult;

use crate::confirmation::ConfirmationDetails;

/// Special handling flags for a shipment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct SpecialHandling {
    /// Contents are fragile.
    pub fragile: bool,
    /// Package orientation must be preserved.
    pub this_side_up: bool,
    /// Temperature-controlled transport is required.
    pub temperature_controlled: bool,
    /// Contents are regulated hazardous materials.
    pub hazmat: bool,
}

impl SpecialHandling {
    /// Number of handling flags set.
    #[must_use]
    pub fn count(self) -> u32 {
        u32::from(self.fragile)
            + u32::from(self.this_side_up)
            + u32::from(self.temperature_controlled)
            + u32::from(self.hazmat)
    }
}

/// One physical piece in a shipment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShipmentPiece {
    /// Weight, in pounds.
    pub weight_lbs: f64,
    /// Length, in inches.
    pub length_in: f64,
    /// Width, in inches.
    pub width_in: f64,
    /// Height, in inches.
    pub height_in: f64,
    /// Declared value, in dollars.
    pub declared_value: f64,
}

/// How the shipment is paid for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaymentMethod {
    /// Credit or debit card.
    CreditCard,
    /// ACH bank transfer.
    Ach,
    /// Billing to an established account.
    Account,
}

/// Payment details supplied by the caller.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaymentInfo {
    /// The payment method.
    pub method: PaymentMethod,
    /// Opaque account or card reference (tokenized upstream).
    pub account_reference: String,
    /// Whether ID verification was requested at pickup.
    pub id_verification_required: bool,
}

/// Delivery preferences; advisory text only, not enforced.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct DeliveryPreferences {
    /// A signature is required on delivery.
    pub signature_required: bool,
    /// The package may be left at the door.
    pub leave_at_door: bool,
    /// Free-text delivery instructions.
    pub delivery_instructions: Option<String>,
}

/// A complete shipment submission: the orchestrator's unit of work.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShipmentTransaction {
    /// Caller-supplied reference for this shipment.
    pub customer_reference: String,
    /// The physical pieces.
    pub pieces: Vec<ShipmentPiece>,
    /// Special handling flags.
    pub special_handling: SpecialHandling,
    /// Payment details.
    pub payment: PaymentInfo,
    /// The chosen pickup date and slot.
    pub pickup: PickupDetails,
    /// The selected priced service.
    pub selected_option: PricingOption,
    /// The delivery address.
    pub destination: Address,
    /// Delivery preferences.
    pub delivery_preferences: DeliveryPreferences,
}

/// Successful submission outcome.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubmissionResponse {
    /// The generated confirmation document.
    pub confirmation: ConfirmationDetails,
    /// The delivery estimate for the confirmed pickup.
    pub estimation: DeliveryEstimation,
    /// The pickup reservation outcome.
    pub pickup_confirmation: PickupConfirmationResult,
    /// Simulated end-to-end processing time, in milliseconds.
    pub processing_time_ms: u64,
}
