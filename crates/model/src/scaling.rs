// -------------------------------------------------------------------------------------------------
//  Copyright (C) 2015-2025 Nautech Systems Pty Ltd. All rights reserved.
//  https://nautechsystems.io
//
//  Licensed under the GNU Lesser General Public License Version 3.0 (the "License");
//  You may not use this file except in compliance with the License.
//  You may obtain a copy of the License at https://www.gnu.org/licenses/lgpl-3.0.en.html
//
//  Unless required by applicable law or agreed to in writing, software
//  distributed under the License is distributed on an "AS IS" BASIS,
//  WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
//  See the License for the specific language governing permissions and
//  limitations under the License.
// -------------------------------------------------------------------------------------------------

//! Fixed-point scaling of raw on-chain integers to 2-decimal amounts.
//!
//! Raw values (token balances, fixed-point accumulators) are scaled using pure integer
//! arithmetic. Nothing is converted to `f64` at any point, so large magnitudes keep every
//! significant digit and identical inputs always render identical strings.

use alloy_primitives::U256;

use crate::error::FeeAdapterError;

/// Number of fractional digits in normalized amounts.
pub const FRACTIONAL_DIGITS: u32 = 2;

/// Maximum exponent s.t. 10^exponent fits in 256 bits.
/// floor(log10(2^256-1)) = 77
pub const MAX_EXPONENT: u32 = 77;

/// Computes 10^exponent as U256 (exponent <= 77).
///
/// # Errors
///
/// Returns [`FeeAdapterError::InvalidExponent`] if the power does not fit in 256 bits.
pub fn pow10(exponent: u32) -> Result<U256, FeeAdapterError> {
    if exponent > MAX_EXPONENT {
        return Err(FeeAdapterError::InvalidExponent(exponent));
    }
    Ok(U256::from(10u8).pow(U256::from(exponent)))
}

/// Converts a raw fixed-point integer with `exponent` decimals to whole cents (truncating).
///
/// # Errors
///
/// Returns an error if `10^exponent` does not fit in 256 bits, or if upscaling a value with
/// fewer than two decimals overflows.
pub fn to_cents(raw: U256, exponent: u32) -> Result<U256, FeeAdapterError> {
    if exponent > MAX_EXPONENT {
        return Err(FeeAdapterError::InvalidExponent(exponent));
    }
    if exponent >= FRACTIONAL_DIGITS {
        let divisor = pow10(exponent - FRACTIONAL_DIGITS)?;
        Ok(raw / divisor)
    } else {
        let multiplier = pow10(FRACTIONAL_DIGITS - exponent)?;
        raw.checked_mul(multiplier)
            .ok_or(FeeAdapterError::InvalidExponent(exponent))
    }
}

/// Renders a cents amount as a decimal string with exactly two fractional digits.
///
/// # Examples
/// - 165 -> "1.65"
/// - 5 -> "0.05"
/// - 0 -> "0.00"
#[must_use]
pub fn format_cents(cents: U256) -> String {
    let hundred = U256::from(100u8);
    let int_part = cents / hundred;
    let frac = (cents % hundred).to::<u8>();
    format!("{int_part}.{frac:02}")
}

/// Scales `raw / 10^exponent` to a decimal string with two fractional digits.
///
/// Digits beyond the second decimal are truncated, never rounded.
///
/// # Errors
///
/// Returns an error if the exponent is out of range (see [`to_cents`]).
pub fn scale(raw: U256, exponent: u32) -> Result<String, FeeAdapterError> {
    to_cents(raw, exponent).map(format_cents)
}

#[cfg(test)]
mod tests {
    use std::str::FromStr;

    use rstest::rstest;

    use super::*;

    fn u256_dec(s: &str) -> U256 {
        U256::from_str(s).unwrap()
    }

    #[rstest]
    #[case("0", 0, "0.00")]
    #[case("50", 0, "50.00")]
    #[case("200", 0, "200.00")]
    #[case("5", 1, "0.50")]
    #[case("12345", 2, "123.45")]
    #[case("1000000000000000000", 18, "1.00")]
    #[case("1239999999999999999", 18, "1.23")]
    #[case("1650000000000000000000000000000", 30, "1.65")]
    #[case("9999999999999999999999999999", 30, "0.00")]
    fn test_scale(#[case] raw: &str, #[case] exponent: u32, #[case] expected: &str) {
        assert_eq!(scale(u256_dec(raw), exponent).unwrap(), expected);
    }

    #[rstest]
    fn test_scale_keeps_large_magnitudes_exact() {
        // 123456789012345678901234.56 with 30 decimals of padding
        let raw = u256_dec("123456789012345678901234567891234567890123456789012345");
        assert_eq!(scale(raw, 30).unwrap(), "123456789012345678901234.56");
    }

    #[rstest]
    fn test_scale_max_value_upscale_overflows() {
        let err = scale(U256::MAX, 0).unwrap_err();
        assert!(matches!(err, FeeAdapterError::InvalidExponent(0)));
    }

    #[rstest]
    fn test_pow10_bounds() {
        assert_eq!(pow10(0).unwrap(), U256::from(1u8));
        assert_eq!(pow10(3).unwrap(), U256::from(1000u16));
        assert!(pow10(MAX_EXPONENT).is_ok());
        assert!(matches!(
            pow10(MAX_EXPONENT + 1),
            Err(FeeAdapterError::InvalidExponent(78))
        ));
    }

    #[rstest]
    #[case(MAX_EXPONENT + 1)]
    #[case(80)]
    #[case(u32::MAX)]
    fn test_to_cents_reports_requested_exponent(#[case] exponent: u32) {
        let err = to_cents(U256::from(1u8), exponent).unwrap_err();
        assert!(matches!(err, FeeAdapterError::InvalidExponent(e) if e == exponent));
    }

    #[rstest]
    fn test_to_cents_max_exponent_truncates_to_zero() {
        assert_eq!(to_cents(U256::MAX, MAX_EXPONENT).unwrap(), U256::from(1u8));
    }

    #[rstest]
    #[case(0, "0.00")]
    #[case(5, "0.05")]
    #[case(165, "1.65")]
    #[case(10_000, "100.00")]
    fn test_format_cents(#[case] cents: u64, #[case] expected: &str) {
        assert_eq!(format_cents(U256::from(cents)), expected);
    }
}
