// Copyright (C) 2026 Shipdesk Contributors
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all
)]

mod collaborators;
mod confirmation;
mod error;
mod request_response;
mod submit;
mod tracking;

pub use collaborators::{
    BusinessRuleValidator, PaymentAuthorization, PaymentAuthorizer, SimulatedGateway,
    StandardValidator, ValidationIssue, ValidationOutcome,
};
pub use confirmation::{ConfirmationDetails, CostLine, FinalCosts, generate_confirmation_details};
pub use error::SubmissionError;
pub use request_response::{
    DeliveryPreferences, PaymentInfo, PaymentMethod, ShipmentPiece, ShipmentTransaction,
    SpecialHandling, SubmissionResponse,
};
pub use submit::submit_shipment;
pub use tracking::generate_tracking_number;
