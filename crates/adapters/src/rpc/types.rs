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

use serde::{Deserialize, de::DeserializeOwned};

use crate::rpc::error::RpcClientError;

/// An error object returned by a JSON-RPC node.
#[derive(Debug, Clone, Deserialize)]
pub struct RpcErrorObject {
    pub code: i64,
    pub message: String,
}

/// A response structure received from an HTTP JSON-RPC node request.
#[derive(Debug, Deserialize)]
pub struct RpcNodeHttpResponse<T>
where
    T: DeserializeOwned,
{
    /// JSON-RPC version identifier.
    pub jsonrpc: String,
    /// Request identifier returned by the server.
    pub id: u64,
    /// Deserialized result, absent on error.
    #[serde(bound(deserialize = ""))]
    pub result: Option<T>,
    /// Error object, absent on success.
    pub error: Option<RpcErrorObject>,
}

/// The subset of an `eth_getBlockByNumber` block the adapters need.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct RpcBlockHeader {
    /// Block number as a hex quantity.
    pub number: String,
    /// Block timestamp (UNIX seconds) as a hex quantity.
    pub timestamp: String,
}

impl RpcBlockHeader {
    /// Returns the block number.
    ///
    /// # Errors
    ///
    /// Returns an error if the quantity is not valid hex.
    pub fn number(&self) -> Result<u64, RpcClientError> {
        parse_hex_quantity(&self.number)
    }

    /// Returns the block timestamp.
    ///
    /// # Errors
    ///
    /// Returns an error if the quantity is not valid hex.
    pub fn timestamp(&self) -> Result<u64, RpcClientError> {
        parse_hex_quantity(&self.timestamp)
    }
}

/// Parses a `0x`-prefixed hex quantity.
///
/// # Errors
///
/// Returns an error if the value is not a valid hex `u64`.
pub fn parse_hex_quantity(value: &str) -> Result<u64, RpcClientError> {
    let digits = value.strip_prefix("0x").unwrap_or(value);
    u64::from_str_radix(digits, 16).map_err(|e| {
        RpcClientError::MessageParsingError(format!("Invalid hex quantity '{value}': {e}"))
    })
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    #[rstest]
    fn test_parse_success_response() {
        let raw = r#"{"jsonrpc":"2.0","id":1,"result":{"number":"0x10","timestamp":"0x6488a2a2","hash":"0xabc"}}"#;
        let response: RpcNodeHttpResponse<RpcBlockHeader> = serde_json::from_str(raw).unwrap();

        let block = response.result.unwrap();
        assert!(response.error.is_none());
        assert_eq!(block.number().unwrap(), 16);
        assert_eq!(block.timestamp().unwrap(), 1_686_676_130);
    }

    #[rstest]
    fn test_parse_error_response() {
        let raw = r#"{"jsonrpc":"2.0","id":1,"error":{"code":-32000,"message":"execution reverted"}}"#;
        let response: RpcNodeHttpResponse<String> = serde_json::from_str(raw).unwrap();

        assert!(response.result.is_none());
        let error = response.error.unwrap();
        assert_eq!(error.code, -32000);
        assert_eq!(error.message, "execution reverted");
    }

    #[rstest]
    #[case("0x0", 0)]
    #[case("0x2305f53", 36_724_563)]
    #[case("ff", 255)]
    fn test_parse_hex_quantity(#[case] value: &str, #[case] expected: u64) {
        assert_eq!(parse_hex_quantity(value).unwrap(), expected);
    }

    #[rstest]
    fn test_parse_hex_quantity_invalid() {
        assert!(matches!(
            parse_hex_quantity("0xzz"),
            Err(RpcClientError::MessageParsingError(_))
        ));
    }
}
