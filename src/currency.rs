//! Currency conversion between US Dollars and Vietnamese Dong.
//!
//! Amounts are stored in USD; conversion to VND happens only at the
//! presentation boundary. The unit is carried by the type so USD and VND
//! values cannot be mixed up.

use serde::{Deserialize, Serialize};

/// The fixed conversion rate: 1 USD = 24,000 VND.
pub const USD_TO_VND_RATE: f64 = 24_000.0;

/// An amount of money in US Dollars, the canonical storage unit.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Usd(pub f64);

/// An amount of money in Vietnamese Dong, used for display.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Vnd(pub f64);

impl Usd {
    /// Convert to Vietnamese Dong, rounded to whole dong.
    pub fn to_vnd(self) -> Vnd {
        Vnd((self.0 * USD_TO_VND_RATE).round())
    }
}

impl Vnd {
    /// Convert to US Dollars, rounded to 8 decimal places to avoid
    /// floating-point noise.
    pub fn to_usd(self) -> Usd {
        Usd((self.0 / USD_TO_VND_RATE * 1e8).round() / 1e8)
    }
}

/// Parse a VND amount from free-form user input.
///
/// All characters other than digits and the decimal point are stripped, so
/// inputs like "24,000 ₫" are accepted. Input with no parseable number maps
/// to zero.
pub fn parse_vnd_input(input: &str) -> Vnd {
    let cleaned: String = input
        .chars()
        .filter(|c| c.is_ascii_digit() || *c == '.')
        .collect();

    Vnd(cleaned.parse().unwrap_or(0.0))
}
