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

//! Batched read calls through the Multicall3 contract.

use std::{str::FromStr, sync::Arc};

use alloy::{
    primitives::{Address, U256, address},
    sol,
    sol_types::SolCall,
};
use dailyfees_model::ReadAt;
use strum::{AsRefStr, EnumString};

use crate::{
    capability::{ReadCall, ReadCallExecutor},
    rpc::{error::RpcClientError, http::JsonRpcHttpClient},
};

sol! {
    contract Multicall3 {
        struct Call {
            address target;
            bytes callData;
        }

        struct Result {
            bool success;
            bytes returnData;
        }

        function tryAggregate(bool requireSuccess, Call[] calldata calls) external payable returns (Result[] memory returnData);
    }
}

sol! {
    contract ERC20 {
        function balanceOf(address account) external view returns (uint256);
        function totalSupply() external view returns (uint256);
    }
}

/// Standard Multicall3 address (same on all EVM chains).
pub const MULTICALL3_ADDRESS: Address = address!("0xcA11bde05977b3631167028862bE2a173976CA11");

/// Default number of calls aggregated into one `eth_call`.
pub const DEFAULT_CALLS_PER_REQUEST: usize = 200;

/// The read functions the executor can encode, keyed by their `abi` identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, AsRefStr, EnumString)]
pub enum ReadFunction {
    /// `balanceOf(address)` of an ERC-20 token; the first call parameter is the holder.
    #[strum(serialize = "erc20:balanceOf")]
    BalanceOf,
    /// `totalSupply()` of an ERC-20 token.
    #[strum(serialize = "erc20:totalSupply")]
    TotalSupply,
}

impl ReadFunction {
    /// Encodes `call` into its target address and call data.
    ///
    /// # Errors
    ///
    /// Returns [`RpcClientError::InvalidParameters`] if the target or an argument is not a valid
    /// address, or the argument count does not match the function.
    pub fn encode(self, call: &ReadCall) -> Result<(Address, Vec<u8>), RpcClientError> {
        let target = parse_address(&call.target)?;
        let call_data = match (self, call.params.as_slice()) {
            (Self::BalanceOf, [account]) => ERC20::balanceOfCall {
                account: parse_address(account)?,
            }
            .abi_encode(),
            (Self::TotalSupply, []) => ERC20::totalSupplyCall {}.abi_encode(),
            (_, params) => {
                return Err(RpcClientError::InvalidParameters(format!(
                    "{} does not take {} argument(s)",
                    self.as_ref(),
                    params.len()
                )));
            }
        };

        Ok((target, call_data))
    }

    /// Decodes the return data of one call.
    ///
    /// # Errors
    ///
    /// Returns [`RpcClientError::AbiDecodingError`] if the data is not an ABI encoded `uint256`.
    pub fn decode(self, return_data: &[u8]) -> Result<U256, RpcClientError> {
        let decoded = match self {
            Self::BalanceOf => ERC20::balanceOfCall::abi_decode_returns(return_data),
            Self::TotalSupply => ERC20::totalSupplyCall::abi_decode_returns(return_data),
        };
        decoded.map_err(|e| {
            RpcClientError::AbiDecodingError(format!("Failed to decode {}: {e}", self.as_ref()))
        })
    }
}

/// Executes batched read calls against an EVM node through Multicall3 `tryAggregate`.
///
/// Reads at a timestamp are resolved to the last block mined at or before it.
#[derive(Debug)]
pub struct MulticallReadExecutor {
    client: Arc<JsonRpcHttpClient>,
    multicall_address: Address,
    calls_per_request: usize,
}

impl MulticallReadExecutor {
    /// Creates a new [`MulticallReadExecutor`] instance.
    #[must_use]
    pub const fn new(client: Arc<JsonRpcHttpClient>) -> Self {
        Self {
            client,
            multicall_address: MULTICALL3_ADDRESS,
            calls_per_request: DEFAULT_CALLS_PER_REQUEST,
        }
    }

    /// Sets the maximum number of calls aggregated into one request (at least 1).
    #[must_use]
    pub fn with_calls_per_request(mut self, calls_per_request: usize) -> Self {
        self.calls_per_request = calls_per_request.max(1);
        self
    }

    /// Resolves a read point to the block parameter of `eth_call`.
    ///
    /// # Errors
    ///
    /// Returns an error if resolving a timestamp to a block fails.
    pub async fn resolve_block(&self, at: ReadAt) -> Result<Option<u64>, RpcClientError> {
        match at {
            ReadAt::Block(number) => Ok(Some(number)),
            ReadAt::Latest => Ok(None),
            ReadAt::Timestamp(timestamp) => {
                self.client.block_at_or_before(timestamp).await.map(Some)
            }
        }
    }

    /// Executes multiple contract calls in a single multicall request.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or decoding fails.
    pub async fn execute_multicall(
        &self,
        calls: &[(Address, Vec<u8>)],
        block: Option<u64>,
    ) -> Result<Vec<Multicall3::Result>, RpcClientError> {
        let multicall_calls: Vec<Multicall3::Call> = calls
            .iter()
            .map(|(target, call_data)| Multicall3::Call {
                target: *target,
                callData: call_data.clone().into(),
            })
            .collect();

        let multicall_data = Multicall3::tryAggregateCall {
            requireSuccess: false,
            calls: multicall_calls,
        }
        .abi_encode();
        let rpc_request = self.client.construct_eth_call(
            &self.multicall_address.to_string(),
            multicall_data.as_slice(),
            block,
        );

        let encoded_response = self.client.execute_rpc::<String>(rpc_request).await?;
        let bytes = decode_hex_response(&encoded_response)?;

        Multicall3::tryAggregateCall::abi_decode_returns(&bytes).map_err(|e| {
            RpcClientError::AbiDecodingError(format!("Failed to decode multicall results: {e}"))
        })
    }
}

#[async_trait::async_trait]
impl ReadCallExecutor for MulticallReadExecutor {
    async fn call(
        &self,
        abi: &str,
        calls: &[ReadCall],
        at: ReadAt,
    ) -> anyhow::Result<Vec<String>> {
        let function = ReadFunction::from_str(abi).map_err(|_| {
            RpcClientError::InvalidParameters(format!("Unsupported read function '{abi}'"))
        })?;
        let encoded = calls
            .iter()
            .map(|call| function.encode(call))
            .collect::<Result<Vec<_>, _>>()?;

        let block = self.resolve_block(at).await?;
        tracing::debug!(
            "Executing {} {abi} call(s) at {at} (block {})",
            calls.len(),
            block.map_or_else(|| "latest".to_string(), |b| b.to_string())
        );

        let mut values = Vec::with_capacity(calls.len());
        for (chunk_index, chunk) in encoded.chunks(self.calls_per_request).enumerate() {
            let results = self.execute_multicall(chunk, block).await?;
            if results.len() != chunk.len() {
                return Err(RpcClientError::MessageParsingError(format!(
                    "Multicall returned {} results for {} calls",
                    results.len(),
                    chunk.len()
                ))
                .into());
            }

            for (offset, result) in results.into_iter().enumerate() {
                let index = chunk_index * self.calls_per_request + offset;
                if !result.success {
                    return Err(RpcClientError::CallFailed {
                        index,
                        target: calls[index].target.clone(),
                    }
                    .into());
                }
                values.push(function.decode(&result.returnData)?.to_string());
            }
        }

        Ok(values)
    }
}

/// Decodes a hexadecimal string response from an RPC call.
///
/// # Errors
///
/// Returns an [`RpcClientError::AbiDecodingError`] if the hex decoding fails.
pub fn decode_hex_response(encoded_response: &str) -> Result<Vec<u8>, RpcClientError> {
    let encoded_str = encoded_response
        .strip_prefix("0x")
        .unwrap_or(encoded_response);
    hex::decode(encoded_str).map_err(|e| {
        RpcClientError::AbiDecodingError(format!("Error decoding hex response: {e}"))
    })
}

fn parse_address(value: &str) -> Result<Address, RpcClientError> {
    Address::from_str(value.trim())
        .map_err(|e| RpcClientError::InvalidParameters(format!("Invalid address '{value}': {e}")))
}
