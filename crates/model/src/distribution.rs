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

//! Exact integer splitting of fee totals into revenue categories.
//!
//! Each category receives `floor(total * percent / 100)` and the residual left over by the
//! floors is assigned entirely to the primary category (largest percentage, first declared
//! wins ties). The split amounts therefore always sum to the total being split.

use std::fmt::{Display, Formatter};

use alloy_primitives::U256;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use strum::{Display as StrumDisplay, EnumIter};
use ustr::Ustr;

use crate::error::FeeAdapterError;

/// Percentages of a valid distribution must sum to this value.
pub const PERCENT_TOTAL: u32 = 100;

/// The revenue class a distribution category reports into.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, StrumDisplay, EnumIter, Serialize, Deserialize,
)]
#[strum(serialize_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum RevenueClass {
    /// Paid out to liquidity or capital providers.
    SupplySide,
    /// Paid out to token holders and stakers (including buybacks).
    Holders,
    /// Retained by the protocol treasury or team.
    Protocol,
}

/// One named category of a fee distribution.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DistributionShare {
    /// The category name, unique within a distribution.
    pub category: Ustr,
    /// Parts per hundred of the total allocated to this category.
    pub percent: u8,
    /// The revenue class this category is reported under.
    pub class: RevenueClass,
}

impl DistributionShare {
    /// Creates a new [`DistributionShare`] instance.
    #[must_use]
    pub fn new(category: &str, percent: u8, class: RevenueClass) -> Self {
        Self {
            category: Ustr::from(category),
            percent,
            class,
        }
    }
}

/// A validated set of distribution shares whose percentages sum to exactly 100.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DistributionPercentages {
    shares: Vec<DistributionShare>,
    primary: usize,
}

impl DistributionPercentages {
    /// Creates a new [`DistributionPercentages`] instance from shares in declaration order.
    ///
    /// # Errors
    ///
    /// Returns [`FeeAdapterError::InvalidDistribution`] if the shares are empty, a category
    /// is declared twice, or the percentages do not sum to 100.
    pub fn new(shares: Vec<DistributionShare>) -> Result<Self, FeeAdapterError> {
        if shares.is_empty() {
            return Err(FeeAdapterError::InvalidDistribution(
                "no categories declared".to_string(),
            ));
        }

        for (i, share) in shares.iter().enumerate() {
            if shares[..i].iter().any(|s| s.category == share.category) {
                return Err(FeeAdapterError::InvalidDistribution(format!(
                    "category '{}' declared more than once",
                    share.category
                )));
            }
        }

        let sum: u32 = shares.iter().map(|s| u32::from(s.percent)).sum();
        if sum != PERCENT_TOTAL {
            return Err(FeeAdapterError::InvalidDistribution(format!(
                "percentages sum to {sum}, expected {PERCENT_TOTAL}"
            )));
        }

        // First maximum wins ties
        let mut primary = 0;
        for (i, share) in shares.iter().enumerate() {
            if share.percent > shares[primary].percent {
                primary = i;
            }
        }

        Ok(Self { shares, primary })
    }

    /// Returns the shares in declaration order.
    #[must_use]
    pub fn shares(&self) -> &[DistributionShare] {
        &self.shares
    }

    /// Returns the category that absorbs the rounding residual.
    #[must_use]
    pub fn primary(&self) -> &DistributionShare {
        &self.shares[self.primary]
    }

    /// Returns the summed percentage of all categories in `class`.
    #[must_use]
    pub fn class_percent(&self, class: RevenueClass) -> u32 {
        self.shares
            .iter()
            .filter(|s| s.class == class)
            .map(|s| u32::from(s.percent))
            .sum()
    }
}

impl Display for DistributionPercentages {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let parts: Vec<String> = self
            .shares
            .iter()
            .map(|s| format!("{}={}%", s.category, s.percent))
            .collect();
        write!(f, "DistributionPercentages({})", parts.join(", "))
    }
}

/// Per-class amounts of a split total.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RevenueBreakdown {
    /// Amount reported as supply-side revenue.
    pub supply_side: U256,
    /// Amount reported as holders revenue.
    pub holders: U256,
    /// Amount reported as protocol revenue.
    pub protocol: U256,
}

impl RevenueBreakdown {
    /// Returns the revenue kept by the protocol and its holders.
    #[must_use]
    pub fn revenue(&self) -> U256 {
        self.holders + self.protocol
    }

    /// Returns the sum of all classes.
    #[must_use]
    pub fn total(&self) -> U256 {
        self.supply_side + self.holders + self.protocol
    }
}

/// Computes `floor(total * percent / 100)` without overflowing for any `total`.
fn floor_share(total: U256, percent: u8) -> U256 {
    let hundred = U256::from(PERCENT_TOTAL);
    let percent = U256::from(percent);
    (total / hundred) * percent + (total % hundred) * percent / hundred
}

/// Splits `total` across the categories of `percentages`.
///
/// The returned amounts are keyed by category in declaration order and sum exactly to `total`.
#[must_use]
pub fn split(total: U256, percentages: &DistributionPercentages) -> IndexMap<Ustr, U256> {
    let mut amounts: IndexMap<Ustr, U256> = percentages
        .shares()
        .iter()
        .map(|s| (s.category, floor_share(total, s.percent)))
        .collect();

    let allocated = amounts.values().fold(U256::ZERO, |acc, v| acc + *v);
    let residual = total - allocated;
    if !residual.is_zero()
        && let Some(amount) = amounts.get_mut(&percentages.primary().category)
    {
        *amount += residual;
    }

    amounts
}

/// Splits `total` and aggregates the category amounts by [`RevenueClass`].
#[must_use]
pub fn split_by_class(total: U256, percentages: &DistributionPercentages) -> RevenueBreakdown {
    let amounts = split(total, percentages);
    let mut breakdown = RevenueBreakdown::default();
    for share in percentages.shares() {
        let amount = amounts[&share.category];
        match share.class {
            RevenueClass::SupplySide => breakdown.supply_side += amount,
            RevenueClass::Holders => breakdown.holders += amount,
            RevenueClass::Protocol => breakdown.protocol += amount,
        }
    }
    breakdown
}
