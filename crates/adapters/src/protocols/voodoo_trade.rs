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

//! Voodoo Trade perpetual exchange fees on Fantom.
//!
//! The stats subgraph keeps one pre-aggregated fee record per UTC day, with amounts scaled by
//! 10^30. Collected fees are distributed to LP stakers, VLP holders and the treasury.

use dailyfees_model::{
    Blockchain, DistributionPercentages, DistributionShare, FeeAdapterError, RevenueClass,
    StartMarker, datetime::DAILY_PERIOD_LABEL,
};

use crate::{
    config::{ChainAdapterConfig, StrategyConfig, SubgraphBucketConfig, methodology},
    registry::AdapterRegistry,
};

pub const NAME: &str = "voodoo-trade";

pub const SUBGRAPH_URL: &str =
    "https://api.thegraph.com/subgraphs/name/chicken-juju/voodoo-fantom-stats";

/// Fee amounts are stored padded with 10^30.
pub const FEE_DECIMALS: u32 = 30;

pub const START_TIMESTAMP: u64 = 1_686_971_650;

/// Returns the fee distribution.
///
/// # Errors
///
/// Returns an error if the percentages fail validation.
pub fn distribution() -> Result<DistributionPercentages, FeeAdapterError> {
    DistributionPercentages::new(vec![
        DistributionShare::new("vmxFtmLp", 30, RevenueClass::Holders),
        DistributionShare::new("vlp", 30, RevenueClass::SupplySide),
        DistributionShare::new("esVmx", 10, RevenueClass::Holders),
        DistributionShare::new("team", 20, RevenueClass::Protocol),
        DistributionShare::new("buyAndBurn", 5, RevenueClass::Holders),
        DistributionShare::new("buyAndAddLiquidity", 5, RevenueClass::Holders),
    ])
}

/// Returns the Fantom adapter configuration.
///
/// # Errors
///
/// Returns an error if the distribution fails validation.
pub fn fantom_adapter() -> Result<ChainAdapterConfig, FeeAdapterError> {
    let adapter = ChainAdapterConfig::new(
        Blockchain::Fantom,
        StrategyConfig::SubgraphBucket(SubgraphBucketConfig::new(
            SUBGRAPH_URL,
            DAILY_PERIOD_LABEL,
            FEE_DECIMALS,
        )),
        StartMarker::Timestamp(START_TIMESTAMP),
        methodology(&[
            (
                "Fees",
                "Fees from open/close position (0.1%), swap (0.18% to 0.8%), mint and burn \
                 (based on tokens balance in the pool) and hourly borrow fee ((assets \
                 borrowed)/(total assets in pool)*0.0045%)",
            ),
            (
                "UserFees",
                "Fees from open/close position (0.1%), swap (0.18% to 0.8%) and borrow fee \
                 ((assets borrowed)/(total assets in pool)*0.0045%)",
            ),
            (
                "HoldersRevenue",
                "50% of all collected fees goes to the VMX token- 30% to VMX-FTM LP token \
                 stakers, 10% to esVMX stakers, 5% to buy and burns and 5% to buyback and \
                 liquidity provisioning",
            ),
            (
                "SupplySideRevenue",
                "30% of all collected fees goes to VLP holders",
            ),
            (
                "Revenue",
                "Revenue is 70% of all collected fees, which goes to VMX stakers",
            ),
            (
                "ProtocolRevenue",
                "20% of all collected fees goes to the treasury",
            ),
        ]),
    );

    Ok(adapter.with_distribution(distribution()?))
}

/// Builds the Voodoo Trade adapter registry.
///
/// # Errors
///
/// Returns an error if the adapter definitions fail validation.
pub fn registry() -> Result<AdapterRegistry, FeeAdapterError> {
    AdapterRegistry::new(NAME, [fantom_adapter()?])
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    use super::*;

    #[rstest]
    fn test_distribution_classes() {
        let distribution = distribution().unwrap();
        assert_eq!(distribution.class_percent(RevenueClass::Holders), 50);
        assert_eq!(distribution.class_percent(RevenueClass::SupplySide), 30);
        assert_eq!(distribution.class_percent(RevenueClass::Protocol), 20);
        assert_eq!(distribution.primary().category.as_str(), "vmxFtmLp");
    }

    #[rstest]
    fn test_registry() {
        let registry = registry().unwrap();
        let adapter = registry.resolve_key("fantom").unwrap();

        assert_eq!(adapter.start, StartMarker::Timestamp(START_TIMESTAMP));
        assert_eq!(adapter.strategy.kind(), "subgraph_bucket");
        assert_eq!(
            adapter.methodology.keys().collect::<Vec<_>>(),
            vec![
                "Fees",
                "UserFees",
                "HoldersRevenue",
                "SupplySideRevenue",
                "Revenue",
                "ProtocolRevenue"
            ]
        );
    }
}
