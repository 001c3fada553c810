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

use std::sync::Arc;

use dailyfees_adapters::{
    AdapterRegistry, Capabilities, ChainAdapterConfig, FeeFetch, StrategyConfig,
    graphql::GraphQlHttpClient,
    protocols,
    rpc::{JsonRpcHttpClient, MulticallReadExecutor},
};
use dailyfees_model::{
    StartMarker,
    datetime::{SECONDS_IN_DAY, format_day, start_of_day},
};

use crate::opt::FetchOpt;

pub const RPC_HTTP_URL_ENV: &str = "RPC_HTTP_URL";
pub const SUBGRAPH_URL_ENV: &str = "SUBGRAPH_URL";

/// Fetches and prints the normalized fees described by `opt`.
///
/// # Errors
///
/// Returns an error if the protocol or chain is unsupported, a required endpoint is missing,
/// or the fetch fails.
pub async fn run_fetch(opt: FetchOpt) -> anyhow::Result<()> {
    let registry = protocols::registry(&opt.protocol)?;
    let adapter = registry.resolve_key(&opt.chain)?;

    let timestamp = match opt.timestamp {
        Some(timestamp) => timestamp,
        None => last_complete_day(chrono::Utc::now().timestamp())?,
    };
    if let StartMarker::Timestamp(start) = adapter.start
        && timestamp < start
    {
        tracing::warn!(
            "{} on {} has no data before {}, requested {}",
            registry.protocol(),
            adapter.chain,
            format_day(start),
            format_day(timestamp)
        );
    }

    let capabilities = build_capabilities(
        adapter,
        opt.rpc_url.or_else(|| std::env::var(RPC_HTTP_URL_ENV).ok()),
        opt.subgraph_url
            .or_else(|| std::env::var(SUBGRAPH_URL_ENV).ok()),
        opt.multicall_calls_per_rpc_request,
    )?;
    let strategy = registry.strategy(adapter.chain, &capabilities)?;

    let result = strategy.fetch(timestamp).await?;
    println!("{}", serde_json::to_string_pretty(&result)?);
    Ok(())
}

/// Prints the supported protocols with their chains, strategies and start markers.
///
/// # Errors
///
/// Returns an error if a protocol registry fails to build.
pub fn run_list() -> anyhow::Result<()> {
    for name in protocols::names() {
        let registry = protocols::registry(name)?;
        for line in describe(&registry) {
            println!("{line}");
        }
    }
    Ok(())
}

/// Prints the methodology of `protocol` on `chain` as JSON.
///
/// # Errors
///
/// Returns an error if the protocol or chain is unsupported.
pub fn run_methodology(protocol: &str, chain: &str) -> anyhow::Result<()> {
    let registry = protocols::registry(protocol)?;
    let adapter = registry.resolve_key(chain)?;
    println!("{}", serde_json::to_string_pretty(&adapter.methodology)?);
    Ok(())
}

fn describe(registry: &AdapterRegistry) -> Vec<String> {
    registry
        .chains()
        .filter_map(|chain| registry.resolve(chain).ok())
        .map(|adapter| {
            format!(
                "{} {} {} (from {})",
                registry.protocol(),
                adapter.chain,
                adapter.strategy.kind(),
                adapter.start
            )
        })
        .collect()
}

/// Returns the start of the last complete UTC day before `now` (UNIX seconds).
///
/// # Errors
///
/// Returns an error if `now` precedes the second UTC day of the epoch.
pub fn last_complete_day(now: i64) -> anyhow::Result<u64> {
    let now = u64::try_from(now)?;
    start_of_day(now)
        .checked_sub(SECONDS_IN_DAY)
        .ok_or_else(|| anyhow::anyhow!("No complete day before {now}"))
}

/// Builds the capability the adapter's strategy needs from the resolved endpoints.
///
/// # Errors
///
/// Returns an error if the balance-diff strategy has no RPC URL or a client cannot be built.
pub fn build_capabilities(
    adapter: &ChainAdapterConfig,
    rpc_url: Option<String>,
    subgraph_url: Option<String>,
    multicall_calls_per_rpc_request: Option<usize>,
) -> anyhow::Result<Capabilities> {
    let capabilities = match &adapter.strategy {
        StrategyConfig::BalanceDiff(_) => {
            let rpc_url = rpc_url.filter(|url| !url.is_empty()).ok_or_else(|| {
                anyhow::anyhow!(
                    "No RPC HTTP URL for {} provided via --rpc-url or {RPC_HTTP_URL_ENV} environment variable",
                    adapter.chain
                )
            })?;
            tracing::info!("Using RPC HTTP URL: '{rpc_url}'");

            let client = Arc::new(JsonRpcHttpClient::new(&rpc_url)?);
            let mut executor = MulticallReadExecutor::new(client);
            if let Some(calls_per_request) = multicall_calls_per_rpc_request {
                executor = executor.with_calls_per_request(calls_per_request);
            }
            Capabilities::new().with_read_calls(Arc::new(executor))
        }
        StrategyConfig::SubgraphBucket(config) => {
            let endpoint = subgraph_url
                .filter(|url| !url.is_empty())
                .unwrap_or_else(|| config.endpoint.clone());
            tracing::info!("Using subgraph endpoint: '{endpoint}'");

            Capabilities::new().with_query(Arc::new(GraphQlHttpClient::new(&endpoint)?))
        }
    };

    Ok(capabilities)
}
