// Copyright (C) 2026 Shipdesk Contributors
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Shared domain types for scheduling, estimation, and submission.

use crate::error::DomainError;
use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// A named parcel carrier.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Carrier {
    /// United Parcel Service.
    Ups,
    /// Federal Express.
    FedEx,
    /// DHL Express.
    Dhl,
    /// United States Postal Service.
    Usps,
    /// Any other carrier, identified by name.
    Other(String),
}

impl Carrier {
    /// Returns the display name for this carrier.
    #[must_use]
    pub fn name(&self) -> &str {
        match self {
            Self::Ups => "UPS",
            Self::FedEx => "FedEx",
            Self::Dhl => "DHL",
            Self::Usps => "USPS",
            Self::Other(name) => name,
        }
    }
}

impl std::fmt::Display for Carrier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Transport category of a pricing option.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ServiceCategory {
    /// Ground transport.
    Ground,
    /// Air transport.
    Air,
    /// Palletized freight.
    Freight,
}

impl ServiceCategory {
    /// Converts this category to its string representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Ground => "ground",
            Self::Air => "air",
            Self::Freight => "freight",
        }
    }
}

impl FromStr for ServiceCategory {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "ground" => Ok(Self::Ground),
            "air" => Ok(Self::Air),
            "freight" => Ok(Self::Freight),
            _ => Err(DomainError::InvalidServiceCategory(s.to_string())),
        }
    }
}

impl std::fmt::Display for ServiceCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// The three canonical pickup slot periods.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SlotPeriod {
    /// Morning window (08:00-12:00).
    Morning,
    /// Afternoon window (12:00-17:00).
    Afternoon,
    /// Evening window (17:00-20:00).
    Evening,
}

impl SlotPeriod {
    /// All canonical periods, in display order.
    pub const ALL: [Self; 3] = [Self::Morning, Self::Afternoon, Self::Evening];

    /// Converts this period to its slot identifier.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Morning => "morning",
            Self::Afternoon => "afternoon",
            Self::Evening => "evening",
        }
    }
}

impl FromStr for SlotPeriod {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "morning" => Ok(Self::Morning),
            "afternoon" => Ok(Self::Afternoon),
            "evening" => Ok(Self::Evening),
            _ => Err(DomainError::InvalidSlotId(s.to_string())),
        }
    }
}

impl std::fmt::Display for SlotPeriod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Availability tier of a single pickup time slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SlotAvailability {
    /// Capacity is open; the slot may be booked normally.
    Available,
    /// Capacity is constrained; the slot may still be booked.
    Limited,
    /// No capacity; the slot must not be offered for confirmation.
    Unavailable,
}

/// A bookable pickup time slot on a specific date.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimeSlot {
    /// Slot identifier (e.g., "morning").
    pub id: String,
    /// Human-readable label (e.g., "Morning (8 AM - 12 PM)").
    pub label: String,
    /// Window start (local wall-clock).
    pub start_time: NaiveTime,
    /// Window end (local wall-clock).
    pub end_time: NaiveTime,
    /// Availability tier, advisory at browse time.
    pub availability: SlotAvailability,
    /// Additional fee for this slot, in dollars.
    pub additional_fee: f64,
    /// Remaining capacity as a percentage (0-100).
    pub capacity: u8,
    /// Optional free-text description.
    pub description: Option<String>,
}

/// One calendar day in an availability window.
///
/// Dates in a response are strictly increasing, contiguous calendar days
/// filtered by the inclusion rules; the walk never skips and resumes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AvailableDate {
    /// The calendar day.
    pub date: NaiveDate,
    /// Day-of-week name (e.g., "Monday").
    pub day_of_week: String,
    /// Whether the day is a business day.
    pub is_business_day: bool,
    /// The canonical slots generated for this day.
    pub time_slots: Vec<TimeSlot>,
    /// Optional advisory note (e.g., holiday name).
    pub notes: Option<String>,
    /// Optional per-day restriction messages.
    pub restrictions: Option<Vec<String>>,
}

/// Category of a service restriction advisory.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RestrictionType {
    /// Derived from the service area's coverage tier.
    Geographic,
    /// Derived from simulated capacity pressure.
    Capacity,
    /// Derived from seasonal conditions.
    Seasonal,
    /// Derived from equipment maintenance windows.
    Equipment,
}

/// Severity of a service restriction advisory.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// Informational only.
    Info,
    /// May affect scheduling decisions.
    Warning,
}

/// An advisory restriction attached to an availability response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServiceRestriction {
    /// The restriction category.
    pub restriction_type: RestrictionType,
    /// Human-readable message suitable for direct display.
    pub message: String,
    /// Dates affected, when the restriction is date-specific.
    pub affected_dates: Option<Vec<NaiveDate>>,
    /// Advisory severity.
    pub severity: Severity,
}

/// A destination or pickup street address.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Address {
    /// Street line.
    pub street: String,
    /// City name.
    pub city: String,
    /// Two-letter state code.
    pub state: String,
    /// 5-digit postal code.
    pub postal_code: String,
    /// Whether this is a residential address.
    pub residential: bool,
}

/// Caller-selected pickup details: the unit of work for slot confirmation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PickupDetails {
    /// The chosen pickup date.
    pub pickup_date: NaiveDate,
    /// The previously-offered slot being reserved.
    pub slot: TimeSlot,
    /// Contact name for the driver.
    pub contact_name: String,
    /// Contact phone number.
    pub contact_phone: String,
    /// Free-text access notes for the pickup location.
    pub location_notes: Option<String>,
    /// A two-person team is required for the pickup.
    pub requires_two_person_team: bool,
    /// A pallet jack is required for the pickup.
    pub requires_pallet_jack: bool,
    /// An appointment must be made before arrival.
    pub requires_appointment: bool,
    /// The location has a loading dock.
    pub has_loading_dock: bool,
    /// A release authorization is already on file.
    pub authorization_on_file: bool,
}

/// Itemized quoted price for a pricing option, in dollars.
///
/// Produced by the pricing calculator upstream; treated as an opaque
/// input by estimation and confirmation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriceBreakdown {
    /// Base transportation rate.
    pub base_rate: f64,
    /// Fuel surcharge.
    pub fuel_surcharge: f64,
    /// Sum of accessorial surcharges.
    pub surcharges: f64,
    /// Tax.
    pub tax: f64,
    /// Quoted total.
    pub total: f64,
}

/// A priced, selectable shipping service.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PricingOption {
    /// Option identifier.
    pub id: String,
    /// Service display label (e.g., "Priority Express").
    pub service_type: String,
    /// The carrier operating this service.
    pub carrier: Carrier,
    /// Transport category.
    pub category: ServiceCategory,
    /// Advertised transit days from pickup.
    pub transit_days: u32,
    /// Whether the service delivers on Saturdays.
    pub saturday_delivery: bool,
    /// Quoted price breakdown.
    pub breakdown: PriceBreakdown,
}
