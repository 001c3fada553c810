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

//! The normalized daily fee record and the normalizer that assembles it.

use alloy_primitives::U256;
use serde::{Deserialize, Serialize};

use crate::{
    distribution::{DistributionPercentages, split_by_class},
    error::FeeAdapterError,
    scaling::{format_cents, to_cents},
};

/// The uniform daily fee and revenue record produced by every fee adapter.
///
/// Monetary fields are decimal strings with exactly two fractional digits. Revenue fields are
/// `None` when the protocol declares no revenue distribution, and `total_fees` is `None` when
/// the data source has no cumulative figure.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NormalizedFeeResult {
    /// Start of the UTC day the figures cover, UNIX seconds.
    pub timestamp: u64,
    /// All fees collected during the day.
    pub daily_fees: String,
    /// Fees paid by users during the day; equal to `daily_fees`.
    pub daily_user_fees: String,
    /// Share of the day's fees paid out to liquidity providers.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub daily_supply_side_revenue: Option<String>,
    /// Share of the day's fees paid out to token holders or stakers.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub daily_holders_revenue: Option<String>,
    /// Share of the day's fees kept by the protocol treasury.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub daily_protocol_revenue: Option<String>,
    /// Holders revenue plus protocol revenue.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub daily_revenue: Option<String>,
    /// Cumulative fees at the end of the day, when the source tracks them.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_fees: Option<String>,
}

/// Converts raw fixed-point amounts into [`NormalizedFeeResult`] values.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResultNormalizer {
    exponent: u32,
}

impl ResultNormalizer {
    /// Creates a new [`ResultNormalizer`] for raw amounts carrying `exponent` decimals.
    #[must_use]
    pub const fn new(exponent: u32) -> Self {
        Self { exponent }
    }

    /// Returns the fixed-point exponent of raw amounts.
    #[must_use]
    pub const fn exponent(&self) -> u32 {
        self.exponent
    }

    /// Scales a raw amount to a 2-decimal string.
    ///
    /// # Errors
    ///
    /// Returns an error if the exponent is out of range.
    pub fn scale(&self, raw: U256) -> Result<String, FeeAdapterError> {
        crate::scaling::scale(raw, self.exponent)
    }

    /// Scales the raw daily and cumulative totals and assembles the normalized result.
    ///
    /// # Errors
    ///
    /// Returns an error if the exponent is out of range.
    pub fn normalize(
        &self,
        timestamp: u64,
        daily_raw: U256,
        total_raw: Option<U256>,
        distribution: Option<&DistributionPercentages>,
    ) -> Result<NormalizedFeeResult, FeeAdapterError> {
        let daily_cents = to_cents(daily_raw, self.exponent)?;
        let total_cents = total_raw
            .map(|raw| to_cents(raw, self.exponent))
            .transpose()?;
        Ok(assemble(timestamp, daily_cents, total_cents, distribution))
    }
}

/// Assembles a [`NormalizedFeeResult`] from amounts already scaled to cents.
///
/// The split runs on the cent amount, so the published supply-side, holders and protocol
/// strings add up exactly to `daily_fees`. Without a distribution all fees are reported as
/// user fees and the revenue fields are omitted.
#[must_use]
pub fn assemble(
    timestamp: u64,
    daily_cents: U256,
    total_cents: Option<U256>,
    distribution: Option<&DistributionPercentages>,
) -> NormalizedFeeResult {
    let daily_fees = format_cents(daily_cents);
    let breakdown = distribution.map(|percentages| split_by_class(daily_cents, percentages));

    NormalizedFeeResult {
        timestamp,
        daily_user_fees: daily_fees.clone(),
        daily_fees,
        daily_supply_side_revenue: breakdown.map(|b| format_cents(b.supply_side)),
        daily_holders_revenue: breakdown.map(|b| format_cents(b.holders)),
        daily_protocol_revenue: breakdown.map(|b| format_cents(b.protocol)),
        daily_revenue: breakdown.map(|b| format_cents(b.revenue())),
        total_fees: total_cents.map(format_cents),
    }
}

#[cfg(test)]
mod tests {
    use std::str::FromStr;

    use pretty_assertions::assert_eq;
    use rstest::{fixture, rstest};

    use super::*;
    use crate::distribution::{DistributionShare, RevenueClass};

    #[fixture]
    fn voodoo() -> DistributionPercentages {
        DistributionPercentages::new(vec![
            DistributionShare::new("vmxFtmLp", 30, RevenueClass::Holders),
            DistributionShare::new("vlp", 30, RevenueClass::SupplySide),
            DistributionShare::new("esVmx", 10, RevenueClass::Holders),
            DistributionShare::new("team", 20, RevenueClass::Protocol),
            DistributionShare::new("buyAndBurn", 5, RevenueClass::Holders),
            DistributionShare::new("buyAndAddLiquidity", 5, RevenueClass::Holders),
        ])
        .unwrap()
    }

    fn cents(s: &str) -> U256 {
        let (int, frac) = s.split_once('.').unwrap();
        U256::from_str(int).unwrap() * U256::from(100u8) + U256::from_str(frac).unwrap()
    }

    #[rstest]
    fn test_assemble_with_distribution(voodoo: DistributionPercentages) {
        let result = assemble(1_686_960_000, U256::from(10_000u32), None, Some(&voodoo));

        assert_eq!(result.daily_fees, "100.00");
        assert_eq!(result.daily_user_fees, "100.00");
        assert_eq!(result.daily_supply_side_revenue.as_deref(), Some("30.00"));
        assert_eq!(result.daily_holders_revenue.as_deref(), Some("50.00"));
        assert_eq!(result.daily_protocol_revenue.as_deref(), Some("20.00"));
        assert_eq!(result.daily_revenue.as_deref(), Some("70.00"));
        assert_eq!(result.total_fees, None);
    }

    #[rstest]
    #[case(1)]
    #[case(7)]
    #[case(165)]
    #[case(99_999)]
    #[case(123_456_789)]
    fn test_assemble_classes_sum_to_daily_fees(
        voodoo: DistributionPercentages,
        #[case] daily_cents: u64,
    ) {
        let result = assemble(0, U256::from(daily_cents), None, Some(&voodoo));
        let sum = cents(result.daily_supply_side_revenue.as_deref().unwrap())
            + cents(result.daily_holders_revenue.as_deref().unwrap())
            + cents(result.daily_protocol_revenue.as_deref().unwrap());
        assert_eq!(sum, cents(&result.daily_fees));
    }

    #[rstest]
    fn test_assemble_without_distribution_reports_user_fees_only() {
        let result = assemble(0, U256::from(5_000u32), Some(U256::from(20_000u32)), None);

        assert_eq!(result.daily_fees, "50.00");
        assert_eq!(result.daily_user_fees, "50.00");
        assert_eq!(result.daily_supply_side_revenue, None);
        assert_eq!(result.daily_holders_revenue, None);
        assert_eq!(result.daily_protocol_revenue, None);
        assert_eq!(result.daily_revenue, None);
        assert_eq!(result.total_fees.as_deref(), Some("200.00"));
    }

    #[rstest]
    fn test_normalize_fixed_point_record_total() {
        let normalizer = ResultNormalizer::new(30);
        let raw = U256::from_str("1650000000000000000000000000000").unwrap();
        let result = normalizer.normalize(1_686_960_000, raw, None, None).unwrap();
        assert_eq!(result.daily_fees, "1.65");
        assert_eq!(normalizer.scale(raw).unwrap(), "1.65");
    }

    #[rstest]
    fn test_normalize_whole_unit_balances() {
        let normalizer = ResultNormalizer::new(0);
        let result = normalizer
            .normalize(0, U256::from(50u8), Some(U256::from(200u8)), None)
            .unwrap();
        assert_eq!(result.daily_fees, "50.00");
        assert_eq!(result.total_fees.as_deref(), Some("200.00"));
    }

    #[rstest]
    fn test_normalize_invalid_exponent() {
        let normalizer = ResultNormalizer::new(80);
        assert!(matches!(
            normalizer.normalize(0, U256::ZERO, None, None),
            Err(FeeAdapterError::InvalidExponent(80))
        ));
    }

    #[rstest]
    fn test_serialization_omits_absent_fields() {
        let result = assemble(1_686_960_000, U256::from(165u32), None, None);
        let json = serde_json::to_string(&result).unwrap();
        assert_eq!(
            json,
            r#"{"timestamp":1686960000,"dailyFees":"1.65","dailyUserFees":"1.65"}"#
        );
    }

    #[rstest]
    fn test_serialization_is_byte_identical_for_identical_inputs(voodoo: DistributionPercentages) {
        let a = serde_json::to_vec(&assemble(1, U256::from(12_345u32), None, Some(&voodoo))).unwrap();
        let b = serde_json::to_vec(&assemble(1, U256::from(12_345u32), None, Some(&voodoo))).unwrap();
        assert_eq!(a, b);
    }
}
