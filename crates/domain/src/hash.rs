// Copyright (C) 2026 Shipdesk Contributors
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Deterministic pseudo-randomness keyed by business identifiers.
//!
//! Availability tiering must be a pure function of (zip, date, slot), so
//! that re-querying the same inputs inside the cache-validity window
//! yields identical results. A seeded PRNG would tie results to library
//! internals; FNV-1a over an explicit seed string is stable across
//! platforms and versions.

use chrono::NaiveDate;

const FNV_OFFSET_BASIS: u64 = 0xcbf2_9ce4_8422_2325;
const FNV_PRIME: u64 = 0x0000_0100_0000_01b3;

/// Computes the 64-bit FNV-1a hash of `input`.
#[must_use]
pub fn fnv1a_64(input: &str) -> u64 {
    let mut hash: u64 = FNV_OFFSET_BASIS;
    for byte in input.bytes() {
        hash ^= u64::from(byte);
        hash = hash.wrapping_mul(FNV_PRIME);
    }
    hash
}

/// Maps `seed` to a value in `[0, 1)`.
///
/// Uses the top 53 bits of the hash so the result is exactly
/// representable as an `f64`.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn unit_interval(seed: &str) -> f64 {
    const MANTISSA: u64 = 1 << 53;
    ((fnv1a_64(seed) >> 11) as f64) / (MANTISSA as f64)
}

/// Deterministic demand factor for a slot, in `[0, 1)`.
///
/// Seeded by `zip|date|slot_id`; identical inputs always produce the
/// same factor within the same code version.
#[must_use]
pub fn demand_factor(zip: &str, date: NaiveDate, slot_id: &str) -> f64 {
    unit_interval(&format!("{zip}|{date}|{slot_id}"))
}

/// Deterministic equipment-maintenance factor for a date, in `[0, 1)`.
///
/// Uses a distinct discriminator so maintenance windows do not correlate
/// with demand simulation on the same date.
#[must_use]
pub fn maintenance_factor(zip: &str, date: NaiveDate) -> f64 {
    unit_interval(&format!("equipment|{zip}|{date}"))
}
