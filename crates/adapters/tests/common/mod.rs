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

//! Deterministic fake capabilities shared by the integration tests.

#![allow(dead_code)]

use std::{
    collections::HashMap,
    sync::{Arc, Mutex},
};

use dailyfees_adapters::{QueryExecutor, ReadCall, ReadCallExecutor};
use dailyfees_model::ReadAt;

/// 10^18, one whole unit of an 18-decimal token.
pub const WAD: u128 = 1_000_000_000_000_000_000;

/// Answers batched reads from a table keyed by read point, recording every request.
#[derive(Debug, Default)]
pub struct ScriptedReadExecutor {
    responses: HashMap<ReadAt, Vec<String>>,
    requests: Mutex<Vec<(String, usize, ReadAt)>>,
}

impl ScriptedReadExecutor {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_response(mut self, at: ReadAt, values: &[u128]) -> Self {
        self.responses
            .insert(at, values.iter().map(ToString::to_string).collect());
        self
    }

    pub fn requests(&self) -> Vec<(String, usize, ReadAt)> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait::async_trait]
impl ReadCallExecutor for ScriptedReadExecutor {
    async fn call(
        &self,
        abi: &str,
        calls: &[ReadCall],
        at: ReadAt,
    ) -> anyhow::Result<Vec<String>> {
        self.requests
            .lock()
            .unwrap()
            .push((abi.to_string(), calls.len(), at));
        self.responses
            .get(&at)
            .cloned()
            .ok_or_else(|| anyhow::anyhow!("no state at {at}"))
    }
}

/// Answers bucket queries from a table keyed by bucket id; unknown ids yield a null record.
#[derive(Debug, Default)]
pub struct FixtureQueryExecutor {
    buckets: HashMap<String, serde_json::Value>,
    requested_ids: Mutex<Vec<String>>,
}

impl FixtureQueryExecutor {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_bucket(mut self, id: &str, record: serde_json::Value) -> Self {
        self.buckets.insert(id.to_string(), record);
        self
    }

    pub fn requested_ids(&self) -> Vec<String> {
        self.requested_ids.lock().unwrap().clone()
    }
}

#[async_trait::async_trait]
impl QueryExecutor for FixtureQueryExecutor {
    async fn request(
        &self,
        _query: &str,
        variables: serde_json::Value,
    ) -> anyhow::Result<serde_json::Value> {
        let id = variables["id"]
            .as_str()
            .ok_or_else(|| anyhow::anyhow!("missing id variable"))?
            .to_string();
        self.requested_ids.lock().unwrap().push(id.clone());

        let record = self
            .buckets
            .get(&id)
            .cloned()
            .unwrap_or(serde_json::Value::Null);
        Ok(serde_json::json!({ "feeStat": record }))
    }
}

/// A capability whose every request fails, as an unreachable service would.
#[derive(Debug)]
pub struct UnreachableService;

#[async_trait::async_trait]
impl ReadCallExecutor for UnreachableService {
    async fn call(
        &self,
        _abi: &str,
        _calls: &[ReadCall],
        _at: ReadAt,
    ) -> anyhow::Result<Vec<String>> {
        anyhow::bail!("connection refused")
    }
}

#[async_trait::async_trait]
impl QueryExecutor for UnreachableService {
    async fn request(
        &self,
        _query: &str,
        _variables: serde_json::Value,
    ) -> anyhow::Result<serde_json::Value> {
        anyhow::bail!("connection refused")
    }
}

pub fn arc<T>(value: T) -> Arc<T> {
    Arc::new(value)
}
