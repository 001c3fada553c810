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

//! Chain identifiers and start markers used to key protocol fee adapters.

use std::fmt::{Display, Formatter};

use serde::{Deserialize, Serialize};
use strum::{AsRefStr, EnumIter, EnumString};

use crate::error::FeeAdapterError;

/// Represents the blockchain networks fee adapters can be registered for.
///
/// The lowercase variant name is the chain key used by callers and in outputs.
#[derive(
    Debug,
    Clone,
    Copy,
    Hash,
    PartialOrd,
    PartialEq,
    Ord,
    Eq,
    AsRefStr,
    EnumIter,
    EnumString,
    Serialize,
    Deserialize,
)]
#[non_exhaustive]
#[strum(ascii_case_insensitive, serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum Blockchain {
    /// Arbitrum One.
    Arbitrum,
    /// Avalanche C-Chain.
    Avalanche,
    /// Base.
    Base,
    /// BNB Smart Chain.
    Bsc,
    /// Ethereum mainnet.
    Ethereum,
    /// Fantom Opera.
    Fantom,
    /// OP Mainnet.
    Optimism,
    /// Polygon PoS.
    Polygon,
}

impl Blockchain {
    /// Returns the EVM chain ID of the network.
    #[must_use]
    pub const fn chain_id(&self) -> u32 {
        match self {
            Self::Arbitrum => 42161,
            Self::Avalanche => 43114,
            Self::Base => 8453,
            Self::Bsc => 56,
            Self::Ethereum => 1,
            Self::Fantom => 250,
            Self::Optimism => 10,
            Self::Polygon => 137,
        }
    }

    /// Parses a chain key (case-insensitive).
    ///
    /// # Errors
    ///
    /// Returns [`FeeAdapterError::ChainNotSupported`] if the key names no known chain.
    pub fn from_key(key: &str) -> Result<Self, FeeAdapterError> {
        key.trim()
            .parse::<Self>()
            .map_err(|_| FeeAdapterError::ChainNotSupported(key.to_string()))
    }
}

impl Display for Blockchain {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_ref())
    }
}

/// The first point from which an adapter reports data for a chain.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "lowercase")]
pub enum StartMarker {
    /// First supported block height.
    Block(u64),
    /// First supported UNIX timestamp in seconds.
    Timestamp(u64),
}

impl Display for StartMarker {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Block(number) => write!(f, "block {number}"),
            Self::Timestamp(secs) => write!(f, "timestamp {secs}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;
    use strum::IntoEnumIterator;

    use super::*;

    #[rstest]
    #[case("bsc", Blockchain::Bsc)]
    #[case("BSC", Blockchain::Bsc)]
    #[case(" Fantom ", Blockchain::Fantom)]
    #[case("ethereum", Blockchain::Ethereum)]
    fn test_from_key(#[case] key: &str, #[case] expected: Blockchain) {
        assert_eq!(Blockchain::from_key(key).unwrap(), expected);
    }

    #[rstest]
    fn test_from_key_unknown_chain() {
        let err = Blockchain::from_key("solana").unwrap_err();
        assert!(matches!(err, FeeAdapterError::ChainNotSupported(key) if key == "solana"));
    }

    #[rstest]
    fn test_display_round_trips_through_key() {
        for chain in Blockchain::iter() {
            assert_eq!(Blockchain::from_key(&chain.to_string()).unwrap(), chain);
        }
        assert_eq!(Blockchain::Bsc.to_string(), "bsc");
    }

    #[rstest]
    fn test_start_marker_serialization() {
        let json = serde_json::to_string(&StartMarker::Block(36_724_659)).unwrap();
        assert_eq!(json, r#"{"type":"block","value":36724659}"#);
        assert_eq!(StartMarker::Timestamp(1_686_971_650).to_string(), "timestamp 1686971650");
    }
}
