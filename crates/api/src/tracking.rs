// Copyright (C) 2026 Shipdesk Contributors
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Carrier-specific tracking number generation.
//!
//! Each carrier format reproduces the structural shape of the real
//! carrier's numbers, including check digits where the carrier uses
//! them. Uniqueness is best-effort (random digits), not guaranteed.

use shipdesk_domain::Carrier;

const ALNUM: &[u8; 36] = b"0123456789ABCDEFGHIJKLMNOPQRSTUVWXYZ";

fn random_digit() -> char {
    char::from(b'0' + rand::random_range(0..10_u8))
}

fn random_alnum() -> char {
    char::from(ALNUM[rand::random_range(0..ALNUM.len())])
}

fn random_digits(count: usize) -> String {
    (0..count).map(|_| random_digit()).collect()
}

/// Numeric value of a UPS tracking character: digits stand for
/// themselves, letters map via `(ascii - 63) % 10`.
fn ups_char_value(c: char) -> u32 {
    c.to_digit(10)
        .unwrap_or_else(|| u32::from(c).wrapping_sub(63) % 10)
}

/// Weighted alternating-sum check digit over the 14 payload characters
/// following the `1Z` prefix. Odd positions weigh 2, even weigh 1.
fn ups_check_digit(payload: &str) -> u32 {
    let sum: u32 = payload
        .chars()
        .enumerate()
        .map(|(index, c)| {
            let weight: u32 = if index % 2 == 1 { 2 } else { 1 };
            ups_char_value(c) * weight
        })
        .sum();
    (10 - sum % 10) % 10
}

fn generate_ups() -> String {
    let mut payload: String = String::with_capacity(14);
    for _ in 0..6 {
        payload.push(random_alnum());
    }
    for _ in 0..8 {
        payload.push(random_digit());
    }
    let check: u32 = ups_check_digit(&payload);
    format!("1Z{payload}{check}")
}

const FEDEX_WEIGHTS: [u32; 11] = [1, 3, 7, 1, 3, 7, 1, 3, 7, 1, 3];

/// Weighted-sum mod 11 check digit; a remainder of 10 maps to 0.
fn fedex_check_digit(digits: &str) -> u32 {
    let sum: u32 = digits
        .chars()
        .zip(FEDEX_WEIGHTS)
        .map(|(c, weight)| c.to_digit(10).unwrap_or(0) * weight)
        .sum();
    match sum % 11 {
        10 => 0,
        remainder => remainder,
    }
}

fn generate_fedex() -> String {
    let digits: String = random_digits(11);
    let check: u32 = fedex_check_digit(&digits);
    format!("{digits}{check}")
}

fn generate_usps() -> String {
    format!("9400{}92", random_digits(16))
}

/// Three-letter uppercase prefix from a carrier name, padded with `X`.
fn carrier_prefix(name: &str) -> String {
    let mut prefix: String = name
        .chars()
        .filter(char::is_ascii_alphabetic)
        .take(3)
        .collect::<String>()
        .to_ascii_uppercase();
    while prefix.len() < 3 {
        prefix.push('X');
    }
    prefix
}

/// Generates a tracking number in the given carrier's format.
#[must_use]
pub fn generate_tracking_number(carrier: &Carrier) -> String {
    match carrier {
        Carrier::Ups => generate_ups(),
        Carrier::FedEx => generate_fedex(),
        Carrier::Dhl => random_digits(10),
        Carrier::Usps => generate_usps(),
        Carrier::Other(name) => format!("{}{}", carrier_prefix(name), random_digits(12)),
    }
}
