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

//! Day-bucketed fee component records reported by an indexing service.

use std::str::FromStr;

use alloy_primitives::U256;
use serde::{Deserialize, Serialize};

use crate::error::FeeAdapterError;

/// Fee components accumulated in one day bucket, as raw fixed-point integers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FeeComponentRecord {
    /// Fees from opening/closing positions and liquidations.
    pub margin_and_liquidation: U256,
    /// Fees from swaps.
    pub swap: U256,
    /// Fees from minting the liquidity token.
    pub mint: U256,
    /// Fees from burning the liquidity token.
    pub burn: U256,
}

impl FeeComponentRecord {
    /// Names of the record fields as they appear on the wire.
    pub const FIELDS: [&'static str; 4] = ["marginAndLiquidation", "swap", "mint", "burn"];

    /// Parses a record from a JSON object of decimal-string or unsigned number fields.
    ///
    /// # Errors
    ///
    /// Returns [`FeeAdapterError::MalformedRecord`] if the value is not an object or any
    /// field is missing, non-numeric or negative.
    pub fn from_json(value: &serde_json::Value) -> Result<Self, FeeAdapterError> {
        let object = value.as_object().ok_or_else(|| {
            FeeAdapterError::MalformedRecord(format!("expected an object, was {value}"))
        })?;

        let field = |name: &str| -> Result<U256, FeeAdapterError> {
            let raw = object.get(name).ok_or_else(|| {
                FeeAdapterError::MalformedRecord(format!("missing field '{name}'"))
            })?;
            parse_component(name, raw)
        };

        Ok(Self {
            margin_and_liquidation: field(Self::FIELDS[0])?,
            swap: field(Self::FIELDS[1])?,
            mint: field(Self::FIELDS[2])?,
            burn: field(Self::FIELDS[3])?,
        })
    }
}

fn parse_component(name: &str, raw: &serde_json::Value) -> Result<U256, FeeAdapterError> {
    match raw {
        serde_json::Value::String(s) => parse_decimal_u256(s).map_err(|reason| {
            FeeAdapterError::MalformedRecord(format!("field '{name}' {reason}: '{s}'"))
        }),
        serde_json::Value::Number(n) => n.as_u64().map(U256::from).ok_or_else(|| {
            FeeAdapterError::MalformedRecord(format!(
                "field '{name}' is not a non-negative integer: {n}"
            ))
        }),
        other => Err(FeeAdapterError::MalformedRecord(format!(
            "field '{name}' is not numeric: {other}"
        ))),
    }
}

/// Parses a base-10 unsigned integer string into a U256.
///
/// # Errors
///
/// Returns a short reason if the string is empty, negative, or not a base-10 integer.
pub fn parse_decimal_u256(s: &str) -> Result<U256, &'static str> {
    let s = s.trim();
    if s.is_empty() {
        return Err("is empty");
    }
    if s.starts_with('-') {
        return Err("is negative");
    }
    if !s.bytes().all(|b| b.is_ascii_digit()) {
        return Err("is not a base-10 integer");
    }
    U256::from_str(s).map_err(|_| "overflows U256")
}

/// Sums the four components of a day bucket, treating an absent bucket as zero activity.
///
/// # Errors
///
/// Returns [`FeeAdapterError::MalformedRecord`] if the sum overflows 256 bits.
pub fn sum_components(record: Option<&FeeComponentRecord>) -> Result<U256, FeeAdapterError> {
    let Some(record) = record else {
        return Ok(U256::ZERO);
    };

    [record.swap, record.mint, record.burn]
        .into_iter()
        .try_fold(record.margin_and_liquidation, |acc, v| acc.checked_add(v))
        .ok_or_else(|| FeeAdapterError::MalformedRecord("component sum overflows U256".to_string()))
}
