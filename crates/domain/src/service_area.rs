// Copyright (C) 2026 Shipdesk Contributors
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Service-area classification and per-tier availability tuning.
//!
//! A service area is derived deterministically from a postal code by
//! prefix classification. It is computed on demand and never persisted.

use crate::error::DomainError;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Coverage tier of a service area.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Coverage {
    /// Full-service coverage: all slots, weekend and holiday options.
    Full,
    /// Limited coverage: reduced capacity, Saturday-only weekends.
    Limited,
    /// Remote coverage: low capacity, no weekend pickups.
    Remote,
}

impl Coverage {
    /// Converts this tier to its string representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Full => "full",
            Self::Limited => "limited",
            Self::Remote => "remote",
        }
    }
}

impl FromStr for Coverage {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "full" => Ok(Self::Full),
            "limited" => Ok(Self::Limited),
            "remote" => Ok(Self::Remote),
            _ => Err(DomainError::InvalidPostalCode(s.to_string())),
        }
    }
}

impl std::fmt::Display for Coverage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A classified pickup service area.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServiceArea {
    /// Geographic zone name (e.g., "Northeast Corridor").
    pub zone: String,
    /// Coverage tier.
    pub coverage: Coverage,
    /// Human-readable description of the tier's service level.
    pub description: String,
}

/// Per-slot capacity ceilings, as percentages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CapacityLimits {
    /// Morning slot ceiling.
    pub morning: u8,
    /// Afternoon slot ceiling.
    pub afternoon: u8,
    /// Evening slot ceiling.
    pub evening: u8,
}

/// Availability tuning for a coverage tier.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AvailabilityConfig {
    /// Baseline availability percentage before demand adjustment.
    pub base_availability: f64,
    /// Maximum demand swing, as a percentage.
    pub demand_variation: f64,
    /// Seasonal multiplier applied to the baseline.
    pub seasonal_factor: f64,
    /// Per-slot capacity ceilings.
    pub capacity_limits: CapacityLimits,
}

const FULL_CONFIG: AvailabilityConfig = AvailabilityConfig {
    base_availability: 85.0,
    demand_variation: 20.0,
    seasonal_factor: 1.0,
    capacity_limits: CapacityLimits {
        morning: 90,
        afternoon: 85,
        evening: 70,
    },
};

const LIMITED_CONFIG: AvailabilityConfig = AvailabilityConfig {
    base_availability: 65.0,
    demand_variation: 25.0,
    seasonal_factor: 0.9,
    capacity_limits: CapacityLimits {
        morning: 70,
        afternoon: 65,
        evening: 45,
    },
};

const REMOTE_CONFIG: AvailabilityConfig = AvailabilityConfig {
    base_availability: 40.0,
    demand_variation: 30.0,
    seasonal_factor: 0.8,
    capacity_limits: CapacityLimits {
        morning: 50,
        afternoon: 40,
        evening: 20,
    },
};

/// Conservative preset for callers without a classified service area.
const DEFAULT_CONFIG: AvailabilityConfig = AvailabilityConfig {
    base_availability: 60.0,
    demand_variation: 25.0,
    seasonal_factor: 0.9,
    capacity_limits: CapacityLimits {
        morning: 60,
        afternoon: 55,
        evening: 40,
    },
};

impl AvailabilityConfig {
    /// Returns the fixed preset for a coverage tier.
    #[must_use]
    pub const fn for_coverage(coverage: Coverage) -> &'static Self {
        match coverage {
            Coverage::Full => &FULL_CONFIG,
            Coverage::Limited => &LIMITED_CONFIG,
            Coverage::Remote => &REMOTE_CONFIG,
        }
    }
}

impl Default for AvailabilityConfig {
    fn default() -> Self {
        DEFAULT_CONFIG
    }
}

/// Three-digit ZIP prefixes classified as remote regardless of region.
const REMOTE_PREFIXES: [&str; 11] = [
    "995", "996", "997", "998", "999", // Alaska
    "967", "968", // Hawaii and Pacific territories
    "006", "007", "008", "009", // Caribbean territories
];

/// Classifies a postal code into a service area.
///
/// Classification is deterministic and prefix-based: remote prefixes are
/// matched first, then the leading digit selects a regional tier.
///
/// # Errors
///
/// Returns `DomainError::InvalidPostalCode` unless `zip` is exactly five
/// ASCII digits.
pub fn determine_service_area(zip: &str) -> Result<ServiceArea, DomainError> {
    if zip.len() != 5 || !zip.bytes().all(|b| b.is_ascii_digit()) {
        return Err(DomainError::InvalidPostalCode(zip.to_string()));
    }

    if REMOTE_PREFIXES.contains(&&zip[..3]) {
        return Ok(ServiceArea {
            zone: String::from("Non-contiguous Territories"),
            coverage: Coverage::Remote,
            description: String::from(
                "Remote service area: reduced pickup capacity and extended transit",
            ),
        });
    }

    let (zone, coverage): (&str, Coverage) = match &zip[..1] {
        "0" => ("New England", Coverage::Full),
        "1" => ("Northeast Corridor", Coverage::Full),
        "2" => ("Mid-Atlantic", Coverage::Full),
        "3" => ("Southeast", Coverage::Limited),
        "4" => ("Ohio Valley", Coverage::Limited),
        "5" => ("Upper Midwest", Coverage::Limited),
        "6" => ("Central Plains", Coverage::Limited),
        "7" => ("South Central", Coverage::Limited),
        "8" => ("Mountain West", Coverage::Remote),
        _ => ("Pacific", Coverage::Full),
    };

    let description: String = match coverage {
        Coverage::Full => String::from("Full service area: all pickup windows offered"),
        Coverage::Limited => {
            String::from("Limited service area: reduced capacity on some pickup windows")
        }
        Coverage::Remote => String::from(
            "Remote service area: reduced pickup capacity and extended transit",
        ),
    };

    Ok(ServiceArea {
        zone: zone.to_string(),
        coverage,
        description,
    })
}
