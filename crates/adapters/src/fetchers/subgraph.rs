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

use dailyfees_model::{
    FeeAdapterError, FeeComponentRecord, U256, datetime::bucket_id_for, record::sum_components,
};

use crate::capability::QueryExecutor;

/// Query fetching one fee stat bucket by its identifier.
pub const FEE_STAT_QUERY: &str = r"query getFeeById($id: ID!) {
  feeStat(id: $id) {
    id
    marginAndLiquidation
    swap
    mint
    burn
  }
}";

/// Name of the bucket entity in query responses.
pub const FEE_STAT_ENTITY: &str = "feeStat";

/// Reads day-bucketed fee component records through a query capability.
#[derive(Debug, Clone)]
pub struct SubgraphFeeFetcher {
    executor: Arc<dyn QueryExecutor>,
    period: String,
}

impl SubgraphFeeFetcher {
    /// Creates a new [`SubgraphFeeFetcher`] instance for buckets labelled with `period`.
    #[must_use]
    pub fn new(executor: Arc<dyn QueryExecutor>, period: &str) -> Self {
        Self {
            executor,
            period: period.to_string(),
        }
    }

    /// Returns the bucket identifier of the day containing `timestamp`.
    #[must_use]
    pub fn bucket_id_for(&self, timestamp: u64) -> String {
        bucket_id_for(timestamp, &self.period)
    }

    /// Fetches the fee component record of `bucket_id`.
    ///
    /// Returns `Ok(None)` when the service holds no record for the bucket, which means no
    /// activity was recorded that day.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The capability call fails ([`FeeAdapterError::RemoteQueryFailure`]).
    /// - The response is not an object ([`FeeAdapterError::MalformedResponse`]).
    /// - A record field is missing, non-numeric or negative ([`FeeAdapterError::MalformedRecord`]).
    pub async fn fetch_bucket(
        &self,
        bucket_id: &str,
    ) -> Result<Option<FeeComponentRecord>, FeeAdapterError> {
        tracing::debug!("Querying {FEE_STAT_ENTITY} bucket {bucket_id}");

        let data = self
            .executor
            .request(FEE_STAT_QUERY, serde_json::json!({ "id": bucket_id }))
            .await
            .map_err(FeeAdapterError::remote)?;

        let object = data.as_object().ok_or_else(|| {
            FeeAdapterError::MalformedResponse(format!("expected a data object, was {data}"))
        })?;

        match object.get(FEE_STAT_ENTITY) {
            None | Some(serde_json::Value::Null) => {
                tracing::debug!("No {FEE_STAT_ENTITY} recorded for bucket {bucket_id}");
                Ok(None)
            }
            Some(record) => FeeComponentRecord::from_json(record).map(Some),
        }
    }

    /// Sums the components of `record`, zero when absent.
    ///
    /// # Errors
    ///
    /// Returns [`FeeAdapterError::MalformedRecord`] if the sum overflows.
    pub fn sum_components(
        &self,
        record: Option<&FeeComponentRecord>,
    ) -> Result<U256, FeeAdapterError> {
        sum_components(record)
    }
}
