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

mod estimation;
mod zones;

pub use estimation::{
    Confidence, DeliveryEstimation, DeliveryWindow, EstimationFactors, estimate_delivery,
};
pub use zones::{DestinationZone, classify_destination};
