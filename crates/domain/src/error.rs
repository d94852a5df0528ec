// Copyright (C) 2026 Shipdesk Contributors
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

/// Errors that can occur during domain validation and date arithmetic.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// Postal code is not a valid 5-digit ZIP code.
    InvalidPostalCode(String),
    /// Requested week count is outside the supported range.
    InvalidWeekCount {
        /// The requested number of weeks.
        weeks: u32,
        /// The maximum supported number of weeks.
        max: u32,
    },
    /// Time slot identifier is not recognized.
    InvalidSlotId(String),
    /// Service category string is not recognized.
    InvalidServiceCategory(String),
    /// Date arithmetic overflow.
    DateArithmeticOverflow {
        /// Description of the operation that failed.
        operation: String,
    },
}

impl std::fmt::Display for DomainError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidPostalCode(zip) => {
                write!(f, "Invalid postal code '{zip}': expected 5 digits")
            }
            Self::InvalidWeekCount { weeks, max } => {
                write!(f, "Invalid week count: {weeks}. Must be between 1 and {max}")
            }
            Self::InvalidSlotId(id) => write!(f, "Invalid time slot identifier: '{id}'"),
            Self::InvalidServiceCategory(category) => {
                write!(f, "Invalid service category: '{category}'")
            }
            Self::DateArithmeticOverflow { operation } => {
                write!(f, "Date arithmetic overflow while {operation}")
            }
        }
    }
}

impl std::error::Error for DomainError {}
