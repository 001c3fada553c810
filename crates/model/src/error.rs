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

//! Error types raised while acquiring and normalizing protocol fee data.

use alloy_primitives::U256;
use thiserror::Error;

use crate::snapshot::BalanceKey;

/// Boxed source error of a failed capability call.
pub type RemoteError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Represents errors that can occur when turning raw fee sources into normalized results.
///
/// None of these are recovered from locally: every variant is surfaced to the caller and no
/// partially computed result is returned alongside it.
#[derive(Debug, Error)]
pub enum FeeAdapterError {
    /// No fee adapter is registered under the requested protocol name.
    #[error("Protocol not supported: {0}")]
    ProtocolNotSupported(String),
    /// The adapter registry has no entry for the requested chain.
    #[error("Chain not supported: {0}")]
    ChainNotSupported(String),
    /// The injected batched-call or query capability failed.
    #[error("Remote query failed: {0}")]
    RemoteQueryFailure(#[source] RemoteError),
    /// A balance decreased between the start and end reads of a window.
    #[error("Negative balance delta for {key}: start={start}, end={end}")]
    NegativeDelta {
        /// The (token, holder) entry whose balance went down.
        key: BalanceKey,
        /// Balance at the start of the window.
        start: U256,
        /// Balance at the end of the window.
        end: U256,
    },
    /// A fee component record field is missing, non-numeric or negative.
    #[error("Malformed fee record: {0}")]
    MalformedRecord(String),
    /// A batched read call response does not match its request.
    #[error("Malformed response: {0}")]
    MalformedResponse(String),
    /// The two snapshots of a window do not cover the same entries.
    #[error("Snapshot mismatch: {0}")]
    SnapshotMismatch(String),
    /// Distribution percentages are invalid (for example they do not sum to 100).
    #[error("Invalid distribution: {0}")]
    InvalidDistribution(String),
    /// A chain was registered twice for the same protocol.
    #[error("Duplicate chain registration: {0}")]
    DuplicateChain(String),
    /// A strategy needs a capability that was not provided.
    #[error("Capability unavailable: {0}")]
    CapabilityUnavailable(&'static str),
    /// The fixed-point exponent is too large for 256-bit arithmetic.
    #[error("Invalid exponent {0}: 10^exponent exceeds U256 capacity")]
    InvalidExponent(u32),
    /// The reference timestamp is too close to `u64::MAX` to bound its UTC day.
    #[error("Invalid timestamp {0}: day window exceeds u64 range")]
    InvalidTimestamp(u64),
    /// An adapter configuration is internally inconsistent.
    #[error("Invalid adapter config: {0}")]
    InvalidConfig(String),
}

impl FeeAdapterError {
    /// Wraps a capability error as a [`FeeAdapterError::RemoteQueryFailure`].
    pub fn remote(error: impl Into<RemoteError>) -> Self {
        Self::RemoteQueryFailure(error.into())
    }

    /// Returns `true` if this error signals a data-source anomaly rather than a failure.
    #[must_use]
    pub const fn is_anomaly(&self) -> bool {
        matches!(self, Self::NegativeDelta { .. })
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    #[rstest]
    fn test_remote_wraps_anyhow_error() {
        let error = FeeAdapterError::remote(anyhow::anyhow!("connection reset"));
        assert!(matches!(error, FeeAdapterError::RemoteQueryFailure(_)));
        assert_eq!(error.to_string(), "Remote query failed: connection reset");
    }

    #[rstest]
    fn test_negative_delta_is_anomaly() {
        let error = FeeAdapterError::NegativeDelta {
            key: BalanceKey::new("0xtoken", "0xholder"),
            start: U256::from(10u8),
            end: U256::from(5u8),
        };
        assert!(error.is_anomaly());
        assert!(error.to_string().contains("start=10, end=5"));
        assert!(!FeeAdapterError::MalformedRecord("swap".to_string()).is_anomaly());
    }
}
