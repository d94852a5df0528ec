// Copyright (C) 2026 Shipdesk Contributors
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Submission error taxonomy.
//!
//! Every failure carries a human-readable reason suitable for direct
//! display and a machine-readable code for programmatic handling.
//! Validation and declined/unavailable errors are recoverable by the
//! caller; internal errors are not.

use crate::collaborators::ValidationIssue;
use shipdesk_domain::{DomainError, TimeSlot};
use thiserror::Error;

/// Errors produced by the submission pipeline.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SubmissionError {
    /// Business-rule validation failed; all issues are surfaced.
    #[error("Shipment validation failed with {} issue(s)", errors.len())]
    Validation {
        /// The full list of validation issues.
        errors: Vec<ValidationIssue>,
    },
    /// Payment authorization was declined.
    #[error("Payment declined: {reason}")]
    PaymentDeclined {
        /// The decline reason from the payment authorizer.
        reason: String,
    },
    /// The requested pickup slot could not be reserved.
    #[error("Pickup unavailable: {reason}")]
    PickupUnavailable {
        /// The rejection reason from slot confirmation.
        reason: String,
        /// Alternative slots the caller may re-offer.
        alternatives: Vec<TimeSlot>,
    },
    /// An unexpected internal failure; not recoverable by retry.
    #[error("Internal error: {message}")]
    Internal {
        /// Description of the failure.
        message: String,
    },
}

impl SubmissionError {
    /// Machine-readable error code.
    #[must_use]
    pub const fn code(&self) -> &'static str {
        match self {
            Self::Validation { .. } => "VALIDATION_FAILED",
            Self::PaymentDeclined { .. } => "PAYMENT_DECLINED",
            Self::PickupUnavailable { .. } => "PICKUP_UNAVAILABLE",
            Self::Internal { .. } => "INTERNAL_ERROR",
        }
    }
}

impl From<DomainError> for SubmissionError {
    fn from(err: DomainError) -> Self {
        Self::Internal {
            message: err.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_codes() {
        assert_eq!(
            SubmissionError::PaymentDeclined {
                reason: String::from("card expired")
            }
            .code(),
            "PAYMENT_DECLINED"
        );
        assert_eq!(
            SubmissionError::PickupUnavailable {
                reason: String::from("at capacity"),
                alternatives: Vec::new()
            }
            .code(),
            "PICKUP_UNAVAILABLE"
        );
    }

    #[test]
    fn test_display_includes_reason() {
        let error: SubmissionError = SubmissionError::PaymentDeclined {
            reason: String::from("insufficient funds"),
        };
        assert!(error.to_string().contains("insufficient funds"));
    }

    #[test]
    fn test_domain_error_maps_to_internal() {
        let error: SubmissionError = DomainError::InvalidPostalCode(String::from("abc")).into();
        assert_eq!(error.code(), "INTERNAL_ERROR");
    }
}
