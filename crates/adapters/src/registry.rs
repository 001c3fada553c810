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

//! Registry of a protocol's per-chain fee adapters.

use std::sync::Arc;

use dailyfees_model::{Blockchain, FeeAdapterError, StartMarker};
use indexmap::IndexMap;
use ustr::Ustr;

use crate::{
    capability::{QueryExecutor, ReadCallExecutor},
    config::{ChainAdapterConfig, Methodology, StrategyConfig},
    fetchers::{BalanceSnapshotFetcher, SubgraphFeeFetcher},
    strategy::{BalanceDiffStrategy, FeeStrategy, SubgraphBucketStrategy},
};

/// Capabilities available for building fetch strategies.
#[derive(Debug, Clone, Default)]
pub struct Capabilities {
    read_calls: Option<Arc<dyn ReadCallExecutor>>,
    query: Option<Arc<dyn QueryExecutor>>,
}

impl Capabilities {
    /// Creates a new empty [`Capabilities`] instance.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the batched read-call capability.
    #[must_use]
    pub fn with_read_calls(mut self, executor: Arc<dyn ReadCallExecutor>) -> Self {
        self.read_calls = Some(executor);
        self
    }

    /// Sets the query capability.
    #[must_use]
    pub fn with_query(mut self, executor: Arc<dyn QueryExecutor>) -> Self {
        self.query = Some(executor);
        self
    }
}

/// Maps chains to the fee adapter configuration of one protocol.
///
/// Adapters are registered once when the registry is built; there is no runtime mutation.
#[derive(Debug, Clone)]
pub struct AdapterRegistry {
    protocol: Ustr,
    adapters: IndexMap<Blockchain, ChainAdapterConfig>,
}

impl AdapterRegistry {
    /// Creates a new [`AdapterRegistry`] for `protocol` from its chain adapters.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - A chain is registered more than once ([`FeeAdapterError::DuplicateChain`]).
    /// - A strategy exponent exceeds 256-bit capacity ([`FeeAdapterError::InvalidExponent`]).
    /// - Two balance reads of a chain share a (token, holder) key
    ///   ([`FeeAdapterError::InvalidConfig`]).
    pub fn new(
        protocol: &str,
        adapters: impl IntoIterator<Item = ChainAdapterConfig>,
    ) -> Result<Self, FeeAdapterError> {
        let mut registered = IndexMap::new();
        for adapter in adapters {
            adapter.strategy.validate()?;

            let chain = adapter.chain;
            if registered.insert(chain, adapter).is_some() {
                return Err(FeeAdapterError::DuplicateChain(format!("{protocol}/{chain}")));
            }
            tracing::debug!("Registered {protocol} fee adapter for {chain}");
        }

        Ok(Self {
            protocol: Ustr::from(protocol),
            adapters: registered,
        })
    }

    /// Returns the protocol name.
    #[must_use]
    pub fn protocol(&self) -> &str {
        self.protocol.as_str()
    }

    /// Returns the registered chains in registration order.
    pub fn chains(&self) -> impl Iterator<Item = Blockchain> + '_ {
        self.adapters.keys().copied()
    }

    /// Returns the adapter configuration of `chain`.
    ///
    /// # Errors
    ///
    /// Returns [`FeeAdapterError::ChainNotSupported`] if no adapter is registered for `chain`.
    pub fn resolve(&self, chain: Blockchain) -> Result<&ChainAdapterConfig, FeeAdapterError> {
        self.adapters.get(&chain).ok_or_else(|| {
            FeeAdapterError::ChainNotSupported(format!("{chain} (protocol {})", self.protocol))
        })
    }

    /// Returns the adapter configuration of the chain named by `key` (case-insensitive).
    ///
    /// # Errors
    ///
    /// Returns [`FeeAdapterError::ChainNotSupported`] if the key is unknown or not registered.
    pub fn resolve_key(&self, key: &str) -> Result<&ChainAdapterConfig, FeeAdapterError> {
        self.resolve(Blockchain::from_key(key)?)
    }

    /// Returns the start marker of `chain`.
    ///
    /// # Errors
    ///
    /// Returns [`FeeAdapterError::ChainNotSupported`] if no adapter is registered for `chain`.
    pub fn start(&self, chain: Blockchain) -> Result<StartMarker, FeeAdapterError> {
        self.resolve(chain).map(|adapter| adapter.start)
    }

    /// Returns the methodology of `chain`.
    ///
    /// # Errors
    ///
    /// Returns [`FeeAdapterError::ChainNotSupported`] if no adapter is registered for `chain`.
    pub fn methodology(&self, chain: Blockchain) -> Result<&Methodology, FeeAdapterError> {
        self.resolve(chain).map(|adapter| &adapter.methodology)
    }

    /// Builds the fetch strategy backing `chain` from the given capabilities.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - No adapter is registered for `chain` ([`FeeAdapterError::ChainNotSupported`]).
    /// - The capability the strategy needs is missing ([`FeeAdapterError::CapabilityUnavailable`]).
    pub fn strategy(
        &self,
        chain: Blockchain,
        capabilities: &Capabilities,
    ) -> Result<FeeStrategy, FeeAdapterError> {
        let adapter = self.resolve(chain)?;
        let distribution = adapter.distribution.clone();

        let strategy = match &adapter.strategy {
            StrategyConfig::BalanceDiff(config) => {
                let executor = capabilities
                    .read_calls
                    .clone()
                    .ok_or(FeeAdapterError::CapabilityUnavailable("batched read calls"))?;
                BalanceDiffStrategy::new(
                    chain,
                    config.clone(),
                    BalanceSnapshotFetcher::new(executor),
                    distribution,
                )
                .into()
            }
            StrategyConfig::SubgraphBucket(config) => {
                let executor = capabilities
                    .query
                    .clone()
                    .ok_or(FeeAdapterError::CapabilityUnavailable("subgraph query"))?;
                SubgraphBucketStrategy::new(
                    chain,
                    config,
                    SubgraphFeeFetcher::new(executor, &config.period),
                    distribution,
                )
                .into()
            }
        };

        Ok(strategy)
    }
}

#[cfg(test)]
mod tests {
    use dailyfees_model::datetime::DAILY_PERIOD_LABEL;
    use rstest::{fixture, rstest};

    use super::*;
    use crate::{
        capability::ReadCall,
        config::{BalanceDiffConfig, SubgraphBucketConfig, methodology},
    };

    fn balance_adapter(chain: Blockchain) -> ChainAdapterConfig {
        ChainAdapterConfig::new(
            chain,
            StrategyConfig::BalanceDiff(BalanceDiffConfig::new(
                "erc20:balanceOf",
                vec![ReadCall::new("0xtoken", &["0xholder"])],
                18,
            )),
            StartMarker::Block(100),
            methodology(&[("Fees", "All fees paid by users")]),
        )
    }

    #[fixture]
    fn registry() -> AdapterRegistry {
        let subgraph = ChainAdapterConfig::new(
            Blockchain::Fantom,
            StrategyConfig::SubgraphBucket(SubgraphBucketConfig::new(
                "http://localhost/subgraph",
                DAILY_PERIOD_LABEL,
                30,
            )),
            StartMarker::Timestamp(1_686_971_650),
            methodology(&[("Fees", "Trading fees"), ("Revenue", "Kept by stakers")]),
        );
        AdapterRegistry::new("test", [balance_adapter(Blockchain::Bsc), subgraph]).unwrap()
    }

    #[rstest]
    fn test_resolve(registry: AdapterRegistry) {
        let adapter = registry.resolve(Blockchain::Bsc).unwrap();
        assert_eq!(adapter.strategy.kind(), "balance_diff");
        assert_eq!(registry.resolve_key("FANTOM").unwrap().chain, Blockchain::Fantom);
        assert_eq!(
            registry.chains().collect::<Vec<_>>(),
            vec![Blockchain::Bsc, Blockchain::Fantom]
        );
    }

    #[rstest]
    fn test_resolve_unregistered_chain(registry: AdapterRegistry) {
        assert!(matches!(
            registry.resolve(Blockchain::Ethereum),
            Err(FeeAdapterError::ChainNotSupported(_))
        ));
        assert!(matches!(
            registry.resolve_key("not-a-chain"),
            Err(FeeAdapterError::ChainNotSupported(_))
        ));
    }

    #[rstest]
    fn test_start_and_methodology_pass_through(registry: AdapterRegistry) {
        assert_eq!(
            registry.start(Blockchain::Fantom).unwrap(),
            StartMarker::Timestamp(1_686_971_650)
        );
        let methodology = registry.methodology(Blockchain::Fantom).unwrap();
        assert_eq!(
            methodology.keys().collect::<Vec<_>>(),
            vec!["Fees", "Revenue"]
        );
        assert_eq!(methodology["Revenue"], "Kept by stakers");
    }

    #[rstest]
    fn test_duplicate_chain_rejected() {
        let err = AdapterRegistry::new(
            "test",
            [balance_adapter(Blockchain::Bsc), balance_adapter(Blockchain::Bsc)],
        )
        .unwrap_err();
        assert!(matches!(err, FeeAdapterError::DuplicateChain(name) if name == "test/bsc"));
    }

    #[rstest]
    fn test_invalid_exponent_rejected() {
        let mut adapter = balance_adapter(Blockchain::Bsc);
        if let StrategyConfig::BalanceDiff(config) = &mut adapter.strategy {
            config.exponent = 90;
        }
        assert!(matches!(
            AdapterRegistry::new("test", [adapter]),
            Err(FeeAdapterError::InvalidExponent(90))
        ));
    }

    #[rstest]
    #[case(vec![("0xtoken", "0xholder"), ("0xtoken", "0xholder")])]
    #[case(vec![("0xToken", "0xHolder"), ("0xtoken", "0xholder")])]
    fn test_duplicate_balance_read_rejected(#[case] reads: Vec<(&str, &str)>) {
        let calls = reads
            .iter()
            .map(|&(target, holder)| ReadCall::new(target, &[holder]))
            .collect();
        let adapter = ChainAdapterConfig::new(
            Blockchain::Bsc,
            StrategyConfig::BalanceDiff(BalanceDiffConfig::new("erc20:balanceOf", calls, 18)),
            StartMarker::Block(100),
            methodology(&[]),
        );

        let err = AdapterRegistry::new("test", [adapter]).unwrap_err();
        assert!(matches!(err, FeeAdapterError::InvalidConfig(_)));
        assert!(err.to_string().contains("duplicate balance read"));
    }

    #[rstest]
    fn test_distinct_holders_of_same_token_accepted() {
        let calls = vec![
            ReadCall::new("0xtoken", &["0xaaa"]),
            ReadCall::new("0xtoken", &["0xbbb"]),
        ];
        let adapter = ChainAdapterConfig::new(
            Blockchain::Bsc,
            StrategyConfig::BalanceDiff(BalanceDiffConfig::new("erc20:balanceOf", calls, 18)),
            StartMarker::Block(100),
            methodology(&[]),
        );
        assert!(AdapterRegistry::new("test", [adapter]).is_ok());
    }

    #[rstest]
    fn test_strategy_requires_capability(registry: AdapterRegistry) {
        let capabilities = Capabilities::new();
        assert!(matches!(
            registry.strategy(Blockchain::Bsc, &capabilities),
            Err(FeeAdapterError::CapabilityUnavailable(_))
        ));
        assert!(matches!(
            registry.strategy(Blockchain::Fantom, &capabilities),
            Err(FeeAdapterError::CapabilityUnavailable(_))
        ));
    }
}
