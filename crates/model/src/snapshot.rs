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

//! Point-in-time balance snapshots and their deltas.

use std::fmt::{Display, Formatter};

use alloy_primitives::U256;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::error::FeeAdapterError;

/// The chain state a batched read is executed against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ReadAt {
    /// State at the given block height.
    Block(u64),
    /// State at the last block at or before the given UNIX timestamp (seconds).
    Timestamp(u64),
    /// State at the chain head.
    Latest,
}

impl Display for ReadAt {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Block(number) => write!(f, "block={number}"),
            Self::Timestamp(secs) => write!(f, "timestamp={secs}"),
            Self::Latest => f.write_str("latest"),
        }
    }
}

/// Identifies one balance entry: a token contract and the holder whose balance is read.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct BalanceKey {
    /// The token contract address.
    pub token: String,
    /// The holder address.
    pub holder: String,
}

impl BalanceKey {
    /// Creates a new [`BalanceKey`] instance, normalizing addresses to lowercase.
    #[must_use]
    pub fn new(token: &str, holder: &str) -> Self {
        Self {
            token: token.to_ascii_lowercase(),
            holder: holder.to_ascii_lowercase(),
        }
    }
}

impl Display for BalanceKey {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}@{}", self.holder, self.token)
    }
}

/// Balances of a set of (token, holder) entries read at one point in time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BalanceSnapshot {
    /// Where the balances were read.
    pub at: ReadAt,
    balances: IndexMap<BalanceKey, U256>,
}

impl BalanceSnapshot {
    /// Creates a new [`BalanceSnapshot`] instance from entries in read order.
    #[must_use]
    pub fn new(at: ReadAt, balances: impl IntoIterator<Item = (BalanceKey, U256)>) -> Self {
        Self {
            at,
            balances: balances.into_iter().collect(),
        }
    }

    /// Returns the number of entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.balances.len()
    }

    /// Returns `true` if the snapshot holds no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.balances.is_empty()
    }

    /// Returns the balance of `key`, if present.
    #[must_use]
    pub fn get(&self, key: &BalanceKey) -> Option<U256> {
        self.balances.get(key).copied()
    }

    /// Returns an iterator over entries in read order.
    pub fn iter(&self) -> impl Iterator<Item = (&BalanceKey, &U256)> {
        self.balances.iter()
    }

    /// Returns the sum of all balances.
    ///
    /// # Errors
    ///
    /// Returns [`FeeAdapterError::MalformedResponse`] if the sum overflows 256 bits.
    pub fn total(&self) -> Result<U256, FeeAdapterError> {
        self.balances.values().try_fold(U256::ZERO, |acc, v| {
            acc.checked_add(*v).ok_or_else(|| {
                FeeAdapterError::MalformedResponse("balance total overflows U256".to_string())
            })
        })
    }
}

/// Computes the summed non-negative growth of balances from `start` to `end`.
///
/// # Errors
///
/// Returns an error if:
/// - The snapshots do not contain the same entries ([`FeeAdapterError::SnapshotMismatch`]).
/// - Any entry decreased ([`FeeAdapterError::NegativeDelta`]).
pub fn compute_delta(
    start: &BalanceSnapshot,
    end: &BalanceSnapshot,
) -> Result<U256, FeeAdapterError> {
    if start.len() != end.len() {
        return Err(FeeAdapterError::SnapshotMismatch(format!(
            "start has {} entries, end has {}",
            start.len(),
            end.len()
        )));
    }

    let mut delta = U256::ZERO;
    for (key, start_balance) in start.iter() {
        let end_balance = end.get(key).ok_or_else(|| {
            FeeAdapterError::SnapshotMismatch(format!("{key} missing from end snapshot"))
        })?;

        let entry_delta = end_balance.checked_sub(*start_balance).ok_or_else(|| {
            tracing::warn!(
                "Balance of {key} decreased from {start_balance} ({}) to {end_balance} ({})",
                start.at,
                end.at,
            );
            FeeAdapterError::NegativeDelta {
                key: key.clone(),
                start: *start_balance,
                end: end_balance,
            }
        })?;

        delta = delta.checked_add(entry_delta).ok_or_else(|| {
            FeeAdapterError::MalformedResponse("balance delta overflows U256".to_string())
        })?;
    }

    Ok(delta)
}
