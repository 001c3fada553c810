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

use dailyfees_model::{BalanceSnapshot, FeeAdapterError, ReadAt, U256, record::parse_decimal_u256};

use crate::capability::{ReadCall, ReadCallExecutor};

/// Reads point-in-time balances through a batched read-call capability.
#[derive(Debug, Clone)]
pub struct BalanceSnapshotFetcher {
    executor: Arc<dyn ReadCallExecutor>,
}

impl BalanceSnapshotFetcher {
    /// Creates a new [`BalanceSnapshotFetcher`] instance.
    #[must_use]
    pub fn new(executor: Arc<dyn ReadCallExecutor>) -> Self {
        Self { executor }
    }

    /// Fetches the raw balances returned by `calls` at `at`, in call order.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The capability call fails ([`FeeAdapterError::RemoteQueryFailure`]).
    /// - The response count differs from the call count, or a value is not a non-negative
    ///   decimal integer ([`FeeAdapterError::MalformedResponse`]).
    pub async fn fetch_balances(
        &self,
        abi: &str,
        calls: &[ReadCall],
        at: ReadAt,
    ) -> Result<Vec<U256>, FeeAdapterError> {
        tracing::debug!("Reading {} balances via '{abi}' at {at}", calls.len());

        let values = self
            .executor
            .call(abi, calls, at)
            .await
            .map_err(FeeAdapterError::remote)?;

        if values.len() != calls.len() {
            return Err(FeeAdapterError::MalformedResponse(format!(
                "expected {} results for '{abi}', received {}",
                calls.len(),
                values.len()
            )));
        }

        values
            .iter()
            .zip(calls)
            .map(|(value, call)| {
                parse_decimal_u256(value).map_err(|reason| {
                    FeeAdapterError::MalformedResponse(format!(
                        "result of {call} {reason}: '{value}'"
                    ))
                })
            })
            .collect()
    }

    /// Fetches a [`BalanceSnapshot`] keyed by (call target, first call parameter).
    ///
    /// # Errors
    ///
    /// Returns an error if fetching the balances fails (see [`Self::fetch_balances`]).
    pub async fn snapshot(
        &self,
        abi: &str,
        calls: &[ReadCall],
        at: ReadAt,
    ) -> Result<BalanceSnapshot, FeeAdapterError> {
        let balances = self.fetch_balances(abi, calls, at).await?;
        let entries = calls
            .iter()
            .zip(balances)
            .map(|(call, balance)| (call.balance_key(), balance));
        let snapshot = BalanceSnapshot::new(at, entries);

        if snapshot.len() != calls.len() {
            return Err(FeeAdapterError::InvalidConfig(format!(
                "duplicate balance read in {} calls",
                calls.len()
            )));
        }
        Ok(snapshot)
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use dailyfees_model::BalanceKey;
    use rstest::rstest;

    use super::*;

    #[derive(Debug)]
    struct StubExecutor {
        values: Vec<String>,
        seen: Mutex<Vec<ReadAt>>,
    }

    impl StubExecutor {
        fn new(values: &[&str]) -> Self {
            Self {
                values: values.iter().map(ToString::to_string).collect(),
                seen: Mutex::new(Vec::new()),
            }
        }
    }

    #[async_trait::async_trait]
    impl ReadCallExecutor for StubExecutor {
        async fn call(
            &self,
            _abi: &str,
            _calls: &[ReadCall],
            at: ReadAt,
        ) -> anyhow::Result<Vec<String>> {
            self.seen.lock().unwrap().push(at);
            Ok(self.values.clone())
        }
    }

    fn calls() -> Vec<ReadCall> {
        vec![
            ReadCall::new("0xToken", &["0xAAA"]),
            ReadCall::new("0xToken", &["0xBBB"]),
        ]
    }

    #[tokio::test]
    async fn test_fetch_balances_in_call_order() {
        let executor = Arc::new(StubExecutor::new(&["100", "50"]));
        let fetcher = BalanceSnapshotFetcher::new(executor.clone());

        let balances = fetcher
            .fetch_balances("erc20:balanceOf", &calls(), ReadAt::Block(10))
            .await
            .unwrap();

        assert_eq!(balances, vec![U256::from(100u8), U256::from(50u8)]);
        assert_eq!(*executor.seen.lock().unwrap(), vec![ReadAt::Block(10)]);
    }

    #[tokio::test]
    async fn test_snapshot_keys_by_target_and_holder() {
        let fetcher = BalanceSnapshotFetcher::new(Arc::new(StubExecutor::new(&["100", "50"])));
        let snapshot = fetcher
            .snapshot("erc20:balanceOf", &calls(), ReadAt::Latest)
            .await
            .unwrap();

        assert_eq!(snapshot.at, ReadAt::Latest);
        assert_eq!(
            snapshot.get(&BalanceKey::new("0xtoken", "0xbbb")),
            Some(U256::from(50u8))
        );
    }

    #[tokio::test]
    async fn test_snapshot_rejects_duplicate_reads() {
        let fetcher = BalanceSnapshotFetcher::new(Arc::new(StubExecutor::new(&["100", "50"])));
        let calls = vec![
            ReadCall::new("0xToken", &["0xAAA"]),
            ReadCall::new("0xtoken", &["0xaaa"]),
        ];
        let err = fetcher
            .snapshot("erc20:balanceOf", &calls, ReadAt::Latest)
            .await
            .unwrap_err();
        assert!(matches!(err, FeeAdapterError::InvalidConfig(_)));
    }

    #[rstest]
    #[case(vec!["100"])]
    #[case(vec!["100", "50", "1"])]
    #[tokio::test]
    async fn test_fetch_balances_count_mismatch(#[case] values: Vec<&str>) {
        let fetcher = BalanceSnapshotFetcher::new(Arc::new(StubExecutor::new(&values)));
        let err = fetcher
            .fetch_balances("erc20:balanceOf", &calls(), ReadAt::Latest)
            .await
            .unwrap_err();
        assert!(matches!(err, FeeAdapterError::MalformedResponse(_)));
    }

    #[rstest]
    #[case("-5")]
    #[case("0x10")]
    #[case("")]
    #[tokio::test]
    async fn test_fetch_balances_rejects_non_decimal(#[case] value: &str) {
        let fetcher = BalanceSnapshotFetcher::new(Arc::new(StubExecutor::new(&["1", value])));
        let err = fetcher
            .fetch_balances("erc20:balanceOf", &calls(), ReadAt::Latest)
            .await
            .unwrap_err();
        assert!(matches!(err, FeeAdapterError::MalformedResponse(_)));
    }
}
