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

//! Fee fetch strategies behind one common interface.
//!
//! A strategy turns a reference timestamp into the [`NormalizedFeeResult`] of the UTC day
//! containing it. Strategies hold no mutable state, so one instance may serve concurrent
//! fetches for different days.

use dailyfees_model::{
    Blockchain, DistributionPercentages, FeeAdapterError, NormalizedFeeResult, ReadAt,
    ResultNormalizer,
    datetime::{day_window, format_day, start_of_day},
    snapshot::compute_delta,
};
use enum_dispatch::enum_dispatch;

use crate::{
    config::{BalanceDiffConfig, SubgraphBucketConfig},
    fetchers::{BalanceSnapshotFetcher, SubgraphFeeFetcher},
};

/// A ready-to-run fee strategy for one (protocol, chain) pair.
///
/// Built by [`AdapterRegistry::strategy`](crate::registry::AdapterRegistry::strategy) from the
/// chain's configuration and the injected capabilities.
#[enum_dispatch(FeeFetch)]
#[derive(Debug)]
pub enum FeeStrategy {
    /// Daily fees from the growth of on-chain balances between two day boundaries.
    BalanceDiff(BalanceDiffStrategy),
    /// Daily fees from a pre-aggregated day bucket of an indexing service.
    SubgraphBucket(SubgraphBucketStrategy),
}

/// Produces the normalized daily fee result for a UTC day.
///
/// Implementations hold no per-call state, so concurrent fetches for different days are safe.
#[async_trait::async_trait]
#[enum_dispatch]
pub trait FeeFetch {
    /// Fetches the normalized fees of the UTC day containing `timestamp` (UNIX seconds).
    ///
    /// # Errors
    ///
    /// Returns an error if the day window is out of range, a capability call fails or the
    /// fetched data is inconsistent.
    async fn fetch(&self, timestamp: u64) -> Result<NormalizedFeeResult, FeeAdapterError>;
}

/// Reports daily fees as the growth of a set of balances over the day.
#[derive(Debug)]
pub struct BalanceDiffStrategy {
    chain: Blockchain,
    config: BalanceDiffConfig,
    fetcher: BalanceSnapshotFetcher,
    normalizer: ResultNormalizer,
    distribution: Option<DistributionPercentages>,
}

impl BalanceDiffStrategy {
    /// Creates a new [`BalanceDiffStrategy`] instance.
    #[must_use]
    pub fn new(
        chain: Blockchain,
        config: BalanceDiffConfig,
        fetcher: BalanceSnapshotFetcher,
        distribution: Option<DistributionPercentages>,
    ) -> Self {
        let normalizer = ResultNormalizer::new(config.exponent);
        Self {
            chain,
            config,
            fetcher,
            normalizer,
            distribution,
        }
    }
}

#[async_trait::async_trait]
impl FeeFetch for BalanceDiffStrategy {
    async fn fetch(&self, timestamp: u64) -> Result<NormalizedFeeResult, FeeAdapterError> {
        let (day_start, day_end) = day_window(timestamp)?;
        tracing::info!(
            "Fetching {} balance diff fees for {}",
            self.chain,
            format_day(day_start)
        );

        let abi = self.config.abi.as_str();
        let calls = self.config.calls.as_slice();

        // The reads are independent; both must resolve before the delta
        let (start, end) = tokio::try_join!(
            self.fetcher
                .snapshot(abi, calls, ReadAt::Timestamp(day_start)),
            self.fetcher.snapshot(abi, calls, ReadAt::Timestamp(day_end)),
        )?;

        let daily = compute_delta(&start, &end)?;
        let total = end.total()?;

        self.normalizer
            .normalize(day_start, daily, Some(total), self.distribution.as_ref())
    }
}

/// Reports daily fees from a pre-aggregated day bucket of an indexing service.
#[derive(Debug)]
pub struct SubgraphBucketStrategy {
    chain: Blockchain,
    fetcher: SubgraphFeeFetcher,
    normalizer: ResultNormalizer,
    distribution: Option<DistributionPercentages>,
}

impl SubgraphBucketStrategy {
    /// Creates a new [`SubgraphBucketStrategy`] instance.
    #[must_use]
    pub fn new(
        chain: Blockchain,
        config: &SubgraphBucketConfig,
        fetcher: SubgraphFeeFetcher,
        distribution: Option<DistributionPercentages>,
    ) -> Self {
        Self {
            chain,
            fetcher,
            normalizer: ResultNormalizer::new(config.exponent),
            distribution,
        }
    }
}

#[async_trait::async_trait]
impl FeeFetch for SubgraphBucketStrategy {
    async fn fetch(&self, timestamp: u64) -> Result<NormalizedFeeResult, FeeAdapterError> {
        let bucket_id = self.fetcher.bucket_id_for(timestamp);
        tracing::info!("Fetching {} subgraph fees for bucket {bucket_id}", self.chain);

        let record = self.fetcher.fetch_bucket(&bucket_id).await?;
        let daily = self.fetcher.sum_components(record.as_ref())?;

        self.normalizer.normalize(
            start_of_day(timestamp),
            daily,
            None,
            self.distribution.as_ref(),
        )
    }
}
