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

//! Per-chain fee adapter configuration.

use dailyfees_model::{
    Blockchain, DistributionPercentages, FeeAdapterError, StartMarker, scaling::pow10,
};
use indexmap::{IndexMap, IndexSet};
use serde::Serialize;

use crate::capability::ReadCall;

/// Metric name to human-readable description, in declaration order.
pub type Methodology = IndexMap<String, String>;

/// Builds a [`Methodology`] from `(metric, description)` pairs.
#[must_use]
pub fn methodology(entries: &[(&str, &str)]) -> Methodology {
    entries
        .iter()
        .map(|(metric, description)| ((*metric).to_string(), (*description).to_string()))
        .collect()
}

/// Configuration of the balance-diff strategy: daily fees are the growth of balances.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BalanceDiffConfig {
    /// The read function, for example `erc20:balanceOf`.
    pub abi: String,
    /// The balance reads, in order.
    pub calls: Vec<ReadCall>,
    /// Decimals of the raw balances.
    pub exponent: u32,
}

impl BalanceDiffConfig {
    /// Creates a new [`BalanceDiffConfig`] instance.
    #[must_use]
    pub fn new(abi: &str, calls: Vec<ReadCall>, exponent: u32) -> Self {
        Self {
            abi: abi.to_string(),
            calls,
            exponent,
        }
    }

    /// Checks that no two calls read the same (token, holder) balance.
    ///
    /// # Errors
    ///
    /// Returns [`FeeAdapterError::InvalidConfig`] naming the first repeated call.
    pub fn validate(&self) -> Result<(), FeeAdapterError> {
        let mut seen = IndexSet::with_capacity(self.calls.len());
        for call in &self.calls {
            if !seen.insert(call.balance_key()) {
                return Err(FeeAdapterError::InvalidConfig(format!(
                    "duplicate balance read {call}"
                )));
            }
        }
        Ok(())
    }
}

/// Configuration of the subgraph-bucket strategy: daily fees are a pre-aggregated record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SubgraphBucketConfig {
    /// Default query endpoint of the indexing service.
    pub endpoint: String,
    /// Period label of bucket identifiers, for example `daily`.
    pub period: String,
    /// Decimals of the raw fixed-point fee components.
    pub exponent: u32,
}

impl SubgraphBucketConfig {
    /// Creates a new [`SubgraphBucketConfig`] instance.
    #[must_use]
    pub fn new(endpoint: &str, period: &str, exponent: u32) -> Self {
        Self {
            endpoint: endpoint.to_string(),
            period: period.to_string(),
            exponent,
        }
    }
}

/// The data acquisition strategy backing a chain adapter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type")]
pub enum StrategyConfig {
    /// Daily fees are the growth of on-chain balances over the day.
    BalanceDiff(BalanceDiffConfig),
    /// Daily fees are read from a pre-aggregated day bucket.
    SubgraphBucket(SubgraphBucketConfig),
}

impl StrategyConfig {
    /// Returns the fixed-point exponent of raw amounts.
    #[must_use]
    pub const fn exponent(&self) -> u32 {
        match self {
            Self::BalanceDiff(config) => config.exponent,
            Self::SubgraphBucket(config) => config.exponent,
        }
    }

    /// Validates the exponent range and, for balance diffs, the read calls.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - `10^exponent` exceeds 256-bit capacity ([`FeeAdapterError::InvalidExponent`]).
    /// - Two balance reads share a (token, holder) key ([`FeeAdapterError::InvalidConfig`]).
    pub fn validate(&self) -> Result<(), FeeAdapterError> {
        pow10(self.exponent())?;
        match self {
            Self::BalanceDiff(config) => config.validate(),
            Self::SubgraphBucket(_) => Ok(()),
        }
    }

    /// Returns a short name of the strategy kind.
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::BalanceDiff(_) => "balance_diff",
            Self::SubgraphBucket(_) => "subgraph_bucket",
        }
    }
}

/// Everything needed to report fees of one protocol on one chain.
///
/// Immutable once registered with an [`AdapterRegistry`](crate::registry::AdapterRegistry).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChainAdapterConfig {
    /// The chain the adapter reports for.
    pub chain: Blockchain,
    /// How raw fee data is acquired.
    pub strategy: StrategyConfig,
    /// First block or timestamp with data.
    pub start: StartMarker,
    /// Metric descriptions passed through for documentation.
    pub methodology: Methodology,
    /// Revenue split of collected fees, if the protocol declares one.
    pub distribution: Option<DistributionPercentages>,
}

impl ChainAdapterConfig {
    /// Creates a new [`ChainAdapterConfig`] instance without a revenue distribution.
    #[must_use]
    pub fn new(
        chain: Blockchain,
        strategy: StrategyConfig,
        start: StartMarker,
        methodology: Methodology,
    ) -> Self {
        Self {
            chain,
            strategy,
            start,
            methodology,
            distribution: None,
        }
    }

    /// Sets the revenue distribution.
    #[must_use]
    pub fn with_distribution(mut self, distribution: DistributionPercentages) -> Self {
        self.distribution = Some(distribution);
        self
    }
}
