// Copyright (C) 2026 Shipdesk Contributors
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Destination zone classification.
//!
//! A deliberately simple city/state keyword classifier, separate from
//! the pickup-side service-area model: estimation only needs a coarse
//! metropolitan/rural/remote distinction for its delay factors.

use serde::{Deserialize, Serialize};

/// Coarse destination classification for transit adjustment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DestinationZone {
    /// Major metropolitan delivery network.
    Metropolitan,
    /// Standard last-mile network.
    Rural,
    /// Non-contiguous or extended-transit destination.
    Remote,
}

impl DestinationZone {
    /// Converts this zone to its string representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Metropolitan => "metropolitan",
            Self::Rural => "rural",
            Self::Remote => "remote",
        }
    }
}

impl std::fmt::Display for DestinationZone {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// States and territories with extended transit.
const REMOTE_STATES: [&str; 5] = ["AK", "HI", "PR", "VI", "GU"];

/// Cities on major metropolitan delivery networks.
const METRO_CITIES: [&str; 16] = [
    "new york",
    "los angeles",
    "chicago",
    "houston",
    "phoenix",
    "philadelphia",
    "san antonio",
    "san diego",
    "dallas",
    "seattle",
    "boston",
    "atlanta",
    "miami",
    "denver",
    "san francisco",
    "washington",
];

/// Classifies a destination by city/state keywords.
///
/// Remote states win over city matches; unmatched destinations are
/// treated as rural (standard last-mile).
#[must_use]
pub fn classify_destination(city: &str, state: &str) -> DestinationZone {
    if REMOTE_STATES.contains(&state.to_ascii_uppercase().as_str()) {
        return DestinationZone::Remote;
    }

    let city_lower: String = city.to_ascii_lowercase();
    if METRO_CITIES
        .iter()
        .any(|metro| city_lower.contains(metro))
    {
        return DestinationZone::Metropolitan;
    }

    DestinationZone::Rural
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_remote_states() {
        assert_eq!(classify_destination("Anchorage", "AK"), DestinationZone::Remote);
        assert_eq!(classify_destination("Honolulu", "hi"), DestinationZone::Remote);
    }

    #[test]
    fn test_metro_cities_case_insensitive() {
        assert_eq!(
            classify_destination("NEW YORK", "NY"),
            DestinationZone::Metropolitan
        );
        assert_eq!(
            classify_destination("West Chicago", "IL"),
            DestinationZone::Metropolitan
        );
    }

    #[test]
    fn test_unmatched_defaults_to_rural() {
        assert_eq!(classify_destination("Ottumwa", "IA"), DestinationZone::Rural);
    }

    #[test]
    fn test_remote_state_wins_over_metro_city_name() {
        // A city name containing a metro keyword in a remote state.
        assert_eq!(
            classify_destination("Washington", "AK"),
            DestinationZone::Remote
        );
    }
}
