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

//! GoPlus security service fees on BSC.
//!
//! Users pay for the service in BSC-USDT, which accrues to two treasury addresses. Daily fees
//! are the growth of both balances over the day; total fees are their closing balances.

use dailyfees_model::{Blockchain, FeeAdapterError, StartMarker};

use crate::{
    capability::ReadCall,
    config::{BalanceDiffConfig, ChainAdapterConfig, StrategyConfig, methodology},
    registry::AdapterRegistry,
};

pub const NAME: &str = "goplus";

pub const BSC_USDT: &str = "0x55d398326f99059ff775485246999027b3197955";
pub const FOUNDATION: &str = "0x34ebddd30ccbd3f1e385b41bdadb30412323e34f";
pub const REVENUE_POOL: &str = "0x648d7f4ad39186949e37e9223a152435ab97706c";

pub const BALANCE_ABI: &str = "erc20:balanceOf";

/// BSC-USDT decimals.
pub const USDT_DECIMALS: u32 = 18;

pub const START_BLOCK: u64 = 36_724_659;

/// Returns the BSC adapter configuration.
#[must_use]
pub fn bsc_adapter() -> ChainAdapterConfig {
    let calls = vec![
        ReadCall::new(BSC_USDT, &[FOUNDATION]),
        ReadCall::new(BSC_USDT, &[REVENUE_POOL]),
    ];

    ChainAdapterConfig::new(
        Blockchain::Bsc,
        StrategyConfig::BalanceDiff(BalanceDiffConfig::new(BALANCE_ABI, calls, USDT_DECIMALS)),
        StartMarker::Block(START_BLOCK),
        methodology(&[(
            "Fees",
            "All fees comes from users for security service provided by GoPlus Network.",
        )]),
    )
}

/// Builds the GoPlus adapter registry.
///
/// # Errors
///
/// Returns an error if the adapter definitions fail validation.
pub fn registry() -> Result<AdapterRegistry, FeeAdapterError> {
    AdapterRegistry::new(NAME, [bsc_adapter()])
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    use super::*;

    #[rstest]
    fn test_registry() {
        let registry = registry().unwrap();
        let adapter = registry.resolve(Blockchain::Bsc).unwrap();

        assert_eq!(adapter.start, StartMarker::Block(START_BLOCK));
        assert_eq!(adapter.distribution, None);
        assert_eq!(adapter.strategy.exponent(), 18);
        assert_eq!(adapter.methodology.len(), 1);

        let StrategyConfig::BalanceDiff(config) = &adapter.strategy else {
            panic!("expected balance diff strategy");
        };
        assert_eq!(config.calls[0].params, vec![FOUNDATION.to_string()]);
        assert_eq!(config.calls[1].params, vec![REVENUE_POOL.to_string()]);
    }

    #[rstest]
    fn test_other_chains_not_supported() {
        let registry = registry().unwrap();
        assert!(matches!(
            registry.resolve(Blockchain::Ethereum),
            Err(FeeAdapterError::ChainNotSupported(_))
        ));
    }
}
