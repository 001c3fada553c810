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

use std::future::Future;

use serde::de::DeserializeOwned;

use crate::rpc::{
    error::RpcClientError,
    types::{RpcBlockHeader, RpcNodeHttpResponse},
};

const RESPONSE_PREVIEW_CHARS: usize = 500;

/// Client for making HTTP-based JSON-RPC requests to EVM nodes.
#[derive(Debug, Clone)]
pub struct JsonRpcHttpClient {
    /// The HTTP URL for the node's RPC endpoint.
    http_rpc_url: String,
    /// The HTTP client for making RPC http-based requests.
    http_client: reqwest::Client,
}

impl JsonRpcHttpClient {
    /// Creates a new HTTP RPC client with the given endpoint URL.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying HTTP client cannot be built.
    pub fn new(http_rpc_url: &str) -> Result<Self, RpcClientError> {
        let http_client = reqwest::Client::builder()
            .build()
            .map_err(|e| RpcClientError::ClientError(format!("Failed to build client: {e}")))?;

        Ok(Self {
            http_rpc_url: http_rpc_url.to_string(),
            http_client,
        })
    }

    /// Returns the RPC endpoint URL.
    #[must_use]
    pub fn url(&self) -> &str {
        &self.http_rpc_url
    }

    async fn send_rpc_request(
        &self,
        rpc_request: &serde_json::Value,
    ) -> Result<Vec<u8>, RpcClientError> {
        let response = self
            .http_client
            .post(&self.http_rpc_url)
            .json(rpc_request)
            .send()
            .await
            .map_err(|e| RpcClientError::ClientError(e.to_string()))?;

        let status = response.status();
        let body = response
            .bytes()
            .await
            .map_err(|e| RpcClientError::ClientError(e.to_string()))?;

        if !status.is_success() {
            return Err(RpcClientError::ClientError(format!(
                "HTTP {status}: {}",
                response_preview(body.as_ref())
            )));
        }

        Ok(body.to_vec())
    }

    /// Executes a JSON-RPC request whose result may legitimately be `null`.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails, the node returns an error object or the
    /// response cannot be parsed.
    pub async fn execute_rpc_optional<T: DeserializeOwned>(
        &self,
        rpc_request: serde_json::Value,
    ) -> Result<Option<T>, RpcClientError> {
        let method = rpc_request["method"].as_str().unwrap_or_default().to_string();
        tracing::debug!("Sending {method} request to {}", self.http_rpc_url);

        let bytes = self.send_rpc_request(&rpc_request).await?;
        parse_rpc_response(&bytes)
    }

    /// Executes a JSON-RPC request and deserializes the result into `T`.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails, the node returns an error object, the response
    /// cannot be parsed or carries no result.
    pub async fn execute_rpc<T: DeserializeOwned>(
        &self,
        rpc_request: serde_json::Value,
    ) -> Result<T, RpcClientError> {
        self.execute_rpc_optional(rpc_request)
            .await?
            .ok_or_else(|| {
                RpcClientError::MessageParsingError(
                    "Response missing both result and error fields".to_string(),
                )
            })
    }

    /// Creates a properly formatted `eth_call` JSON-RPC request object targeting a specific
    /// contract address with encoded function data.
    #[must_use]
    pub fn construct_eth_call(
        &self,
        to: &str,
        call_data: &[u8],
        block: Option<u64>,
    ) -> serde_json::Value {
        let encoded_data = format!("0x{}", hex::encode(call_data));
        let call = serde_json::json!({
            "to": to,
            "data": encoded_data
        });

        serde_json::json!({
            "jsonrpc": "2.0",
            "id": 1,
            "method": "eth_call",
            "params": [call, block_param(block)]
        })
    }

    /// Creates an `eth_getBlockByNumber` request without transaction bodies.
    #[must_use]
    pub fn construct_get_block(&self, block: Option<u64>) -> serde_json::Value {
        serde_json::json!({
            "jsonrpc": "2.0",
            "id": 1,
            "method": "eth_getBlockByNumber",
            "params": [block_param(block), false]
        })
    }

    /// Fetches the header of `block`, or of the chain head when `None`.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the node does not know the block.
    pub async fn get_block(&self, block: Option<u64>) -> Result<RpcBlockHeader, RpcClientError> {
        self.execute_rpc_optional(self.construct_get_block(block))
            .await?
            .ok_or_else(|| RpcClientError::BlockNotFound(block_tag(block)))
    }

    /// Returns the number of the last block mined at or before `timestamp`.
    ///
    /// Timestamps at or after the chain head resolve to the head.
    ///
    /// # Errors
    ///
    /// Returns an error if any block lookup fails.
    pub async fn block_at_or_before(&self, timestamp: u64) -> Result<u64, RpcClientError> {
        let head = self.get_block(None).await?;
        let head_number = head.number()?;
        if head.timestamp()? <= timestamp {
            return Ok(head_number);
        }

        let block = find_block_at_or_before(head_number, timestamp, |number| async move {
            self.get_block(Some(number)).await?.timestamp()
        })
        .await?;

        tracing::debug!("Resolved timestamp {timestamp} to block {block}");
        Ok(block)
    }
}

/// Binary searches blocks `0..=head` for the last one whose timestamp is at or before `target`.
///
/// Block timestamps are non-decreasing in the block number. Returns block 0 if the target
/// precedes the genesis block.
///
/// # Errors
///
/// Returns the first error of `timestamp_of`.
pub async fn find_block_at_or_before<F, Fut, E>(
    head: u64,
    target: u64,
    mut timestamp_of: F,
) -> Result<u64, E>
where
    F: FnMut(u64) -> Fut,
    Fut: Future<Output = Result<u64, E>>,
{
    let mut low = 0;
    let mut high = head;

    while low < high {
        let mid = low + (high - low).div_ceil(2);
        if timestamp_of(mid).await? <= target {
            low = mid;
        } else {
            high = mid - 1;
        }
    }

    Ok(low)
}

/// Parses a raw JSON-RPC response body.
///
/// # Errors
///
/// Returns an error if the node returned an error object or the body is not a valid response.
pub fn parse_rpc_response<T: DeserializeOwned>(bytes: &[u8]) -> Result<Option<T>, RpcClientError> {
    match serde_json::from_slice::<RpcNodeHttpResponse<T>>(bytes) {
        Ok(parsed) => match parsed.error {
            Some(error) => Err(RpcClientError::NodeError {
                code: error.code,
                message: error.message,
            }),
            None => Ok(parsed.result),
        },
        Err(e) => Err(RpcClientError::MessageParsingError(format!(
            "Failed to parse RPC response: {e}\nRaw response: {}",
            response_preview(bytes)
        ))),
    }
}

fn block_tag(block: Option<u64>) -> String {
    match block {
        Some(block_number) => format!("0x{block_number:x}"),
        None => "latest".to_string(),
    }
}

fn block_param(block: Option<u64>) -> serde_json::Value {
    serde_json::json!(block_tag(block))
}

fn response_preview(bytes: &[u8]) -> String {
    let raw_response = String::from_utf8_lossy(bytes);
    let total = raw_response.chars().count();
    if total > RESPONSE_PREVIEW_CHARS {
        let head: String = raw_response.chars().take(RESPONSE_PREVIEW_CHARS).collect();
        format!("{head}... (truncated, {} bytes total)", bytes.len())
    } else {
        raw_response.to_string()
    }
}
