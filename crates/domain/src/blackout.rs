// Copyright (C) 2026 Shipdesk Contributors
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Carrier blackout periods.
//!
//! Blackout windows are recurring month/day spans during which a carrier
//! (or the whole network) does not dispatch pickups. Dates inside a
//! blackout are forced unavailable regardless of the demand model.

use crate::types::Carrier;
use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

/// A recurring blackout window.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BlackoutWindow {
    /// Inclusive start, as (month, day).
    start: (u32, u32),
    /// Inclusive end, as (month, day).
    end: (u32, u32),
    /// Carriers affected; `None` means all carriers.
    carriers: Option<Vec<Carrier>>,
    /// Human-readable reason.
    reason: &'static str,
}

impl BlackoutWindow {
    /// Returns whether `date` falls inside this window.
    fn contains(&self, date: NaiveDate) -> bool {
        let key: (u32, u32) = (date.month(), date.day());
        self.start <= key && key <= self.end
    }

    /// Returns whether this window applies to any of `carriers`.
    ///
    /// A window with no carrier scope applies to every carrier; a query
    /// with no carrier filter matches every window.
    fn applies_to(&self, carriers: Option<&[Carrier]>) -> bool {
        match (&self.carriers, carriers) {
            (None, _) | (_, None) => true,
            (Some(scoped), Some(requested)) => {
                requested.iter().any(|carrier| scoped.contains(carrier))
            }
        }
    }
}

/// Outcome of a blackout lookup.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BlackoutCheck {
    /// Whether the date is inside an applicable blackout window.
    pub is_blackout: bool,
    /// The blackout reason, when one applies.
    pub reason: Option<String>,
}

/// The static blackout table.
fn blackout_windows() -> Vec<BlackoutWindow> {
    vec![
        BlackoutWindow {
            start: (12, 24),
            end: (12, 26),
            carriers: None,
            reason: "Year-end holiday network closure",
        },
        BlackoutWindow {
            start: (11, 26),
            end: (11, 29),
            carriers: Some(vec![Carrier::Ups, Carrier::FedEx]),
            reason: "Peak season pickup embargo",
        },
        BlackoutWindow {
            start: (7, 1),
            end: (7, 5),
            carriers: Some(vec![Carrier::Dhl]),
            reason: "Customs system maintenance window",
        },
    ]
}

/// Checks whether `date` falls in a blackout window, optionally narrowed
/// to specific carriers.
///
/// # Arguments
///
/// * `date` - The date to check
/// * `carriers` - When present, only windows affecting at least one of
///   these carriers are considered
#[must_use]
pub fn carrier_blackout(date: NaiveDate, carriers: Option<&[Carrier]>) -> BlackoutCheck {
    blackout_windows()
        .iter()
        .find(|window| window.contains(date) && window.applies_to(carriers))
        .map_or(
            BlackoutCheck {
                is_blackout: false,
                reason: None,
            },
            |window| BlackoutCheck {
                is_blackout: true,
                reason: Some(window.reason.to_string()),
            },
        )
}
