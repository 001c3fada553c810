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

use serde::{Deserialize, Serialize};

use crate::capability::QueryExecutor;

/// Represents errors that can occur when querying a GraphQL endpoint.
#[derive(Debug, thiserror::Error)]
pub enum GraphQlError {
    /// Occurs when the HTTP transport fails.
    #[error("Client error: {0}")]
    ClientError(String),
    /// Occurs when the endpoint answers with a non-success HTTP status.
    #[error("HTTP {status}: {body}")]
    HttpStatus { status: u16, body: String },
    /// Occurs when the service reports errors for the query.
    #[error("Query failed: {}", .0.join("; "))]
    QueryErrors(Vec<String>),
    /// Occurs when the response body is not a GraphQL response.
    #[error("Parsing error: {0}")]
    MessageParsingError(String),
}

#[derive(Debug, Serialize)]
struct GraphQlRequest<'a> {
    query: &'a str,
    variables: serde_json::Value,
}

#[derive(Debug, Deserialize)]
struct GraphQlErrorEntry {
    message: String,
}

/// A GraphQL response envelope.
#[derive(Debug, Deserialize)]
pub struct GraphQlResponse {
    #[serde(default)]
    data: Option<serde_json::Value>,
    #[serde(default)]
    errors: Option<Vec<GraphQlErrorEntry>>,
}

impl GraphQlResponse {
    /// Returns the `data` object, or the reported query errors.
    ///
    /// # Errors
    ///
    /// Returns an error if the response lists errors or carries no data.
    pub fn into_data(self) -> Result<serde_json::Value, GraphQlError> {
        if let Some(errors) = self.errors.filter(|errors| !errors.is_empty()) {
            return Err(GraphQlError::QueryErrors(
                errors.into_iter().map(|e| e.message).collect(),
            ));
        }
        self.data
            .ok_or_else(|| GraphQlError::MessageParsingError("Response has no data".to_string()))
    }
}

/// Client posting GraphQL queries to a single endpoint.
#[derive(Debug, Clone)]
pub struct GraphQlHttpClient {
    /// HTTP client for making requests.
    client: reqwest::Client,
    /// The GraphQL endpoint URL.
    endpoint: String,
}

impl GraphQlHttpClient {
    /// Creates a new [`GraphQlHttpClient`] for `endpoint`.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying HTTP client cannot be built.
    pub fn new(endpoint: &str) -> Result<Self, GraphQlError> {
        let client = reqwest::Client::builder()
            .build()
            .map_err(|e| GraphQlError::ClientError(format!("Failed to build client: {e}")))?;

        Ok(Self {
            client,
            endpoint: endpoint.to_string(),
        })
    }

    /// Returns the endpoint URL.
    #[must_use]
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Posts `query` with `variables` and returns the response `data` object.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails, the status is not a success, the body cannot be
    /// parsed or the service reports query errors.
    pub async fn query(
        &self,
        query: &str,
        variables: serde_json::Value,
    ) -> Result<serde_json::Value, GraphQlError> {
        tracing::debug!("Posting query to {} with {variables}", self.endpoint);

        let response = self
            .client
            .post(&self.endpoint)
            .json(&GraphQlRequest { query, variables })
            .send()
            .await
            .map_err(|e| GraphQlError::ClientError(e.to_string()))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| GraphQlError::ClientError(e.to_string()))?;

        if !status.is_success() {
            return Err(GraphQlError::HttpStatus {
                status: status.as_u16(),
                body,
            });
        }

        parse_response(&body)
    }
}

#[async_trait::async_trait]
impl QueryExecutor for GraphQlHttpClient {
    async fn request(
        &self,
        query: &str,
        variables: serde_json::Value,
    ) -> anyhow::Result<serde_json::Value> {
        Ok(self.query(query, variables).await?)
    }
}

/// Parses a GraphQL response body into its `data` object.
///
/// # Errors
///
/// Returns an error if the body is not a GraphQL response or lists query errors.
pub fn parse_response(body: &str) -> Result<serde_json::Value, GraphQlError> {
    serde_json::from_str::<GraphQlResponse>(body)
        .map_err(|e| GraphQlError::MessageParsingError(e.to_string()))?
        .into_data()
}
