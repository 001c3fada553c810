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

//! Capabilities injected into fee fetchers.
//!
//! Fetchers never talk to the network directly. They receive one of these capabilities at
//! construction time, so tests can substitute deterministic fakes and concurrently running
//! adapters never share hidden client state.

use std::fmt::{Debug, Display, Formatter};

use dailyfees_model::{BalanceKey, ReadAt};
use serde::{Deserialize, Serialize};

/// A single read-only contract call of a batch.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ReadCall {
    /// The contract address the call is sent to.
    pub target: String,
    /// The call arguments, as strings (addresses or decimal integers).
    pub params: Vec<String>,
}

impl ReadCall {
    /// Creates a new [`ReadCall`] instance.
    #[must_use]
    pub fn new(target: &str, params: &[&str]) -> Self {
        Self {
            target: target.to_string(),
            params: params.iter().map(ToString::to_string).collect(),
        }
    }

    /// Returns the snapshot key of this call: (target, first parameter).
    #[must_use]
    pub fn balance_key(&self) -> BalanceKey {
        let holder = self.params.first().map_or("", String::as_str);
        BalanceKey::new(&self.target, holder)
    }
}

impl Display for ReadCall {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}({})", self.target, self.params.join(","))
    }
}

/// Executes batches of read-only contract calls against a chain state.
#[async_trait::async_trait]
pub trait ReadCallExecutor: Debug + Send + Sync {
    /// Executes `calls` of the function identified by `abi` (for example `erc20:balanceOf`)
    /// against the chain state at `at`.
    ///
    /// Implementations must return exactly one decimal-string encoded unsigned integer per
    /// call, in call order.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying transport or any call fails.
    async fn call(&self, abi: &str, calls: &[ReadCall], at: ReadAt) -> anyhow::Result<Vec<String>>;
}

/// Executes queries against an indexing service.
#[async_trait::async_trait]
pub trait QueryExecutor: Debug + Send + Sync {
    /// Executes `query` with `variables` and returns the response `data` object.
    ///
    /// A record that does not exist is returned as a null field of `data`, not as an error.
    ///
    /// # Errors
    ///
    /// Returns an error if the transport fails or the service reports query errors.
    async fn request(
        &self,
        query: &str,
        variables: serde_json::Value,
    ) -> anyhow::Result<serde_json::Value>;
}
