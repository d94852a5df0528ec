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

mod availability;
mod confirmation;
mod restrictions;
mod slots;

pub use availability::{
    AvailabilityMetadata, AvailabilityRequest, AvailabilityResponse, HolidayOptions, MAX_WEEKS,
    MINIMUM_LEAD_TIME_DAYS, VALIDITY, WeekendOptions, generate_availability, include_date,
};
pub use confirmation::{
    MINIMUM_NOTICE_HOURS, PickupConfirmationResult, confirm_pickup_slot,
};
pub use restrictions::collect_restrictions;
pub use slots::{
    EVENING_FEE, HOLIDAY_FEE, WEEKEND_FEE, WEEKEND_FEE_LIMITED, availability_score,
    build_time_slot, calculate_time_slot_availability, day_of_week_multiplier, slot_label,
    slot_window, tier_for_score,
};
