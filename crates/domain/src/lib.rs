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
    clippy::all,
    clippy::suspicious,
    clippy::complexity,
    clippy::perf,
    clippy::unwrap_used,
    clippy::expect_used
)]

mod blackout;
mod calendar;
mod error;
mod hash;
mod service_area;
mod simulation;
mod types;

pub use blackout::{BlackoutCheck, carrier_blackout};
pub use calendar::{
    DISPATCH_CUTOFF_HOUR, add_business_days, federal_holiday, is_business_day, is_federal_holiday,
    is_past_cutoff, is_weekend, next_business_day,
};
pub use error::DomainError;
pub use hash::{demand_factor, fnv1a_64, maintenance_factor, unit_interval};
pub use service_area::{
    AvailabilityConfig, CapacityLimits, Coverage, ServiceArea, determine_service_area,
};
pub use simulation::{DisabledSimulation, LiveSimulation, Simulation};
pub use types::{
    Address, AvailableDate, Carrier, PickupDetails, PriceBreakdown, PricingOption,
    RestrictionType, ServiceCategory, ServiceRestriction, Severity, SlotAvailability, SlotPeriod,
    TimeSlot,
};
