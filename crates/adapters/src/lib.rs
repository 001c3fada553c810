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

//! Protocol fee adapters reporting normalized daily fees and revenue.
//!
//! The `dailyfees-adapters` crate wires the data-independent model into runnable adapters:
//!
//! - Capability traits for batched contract reads and indexing-service queries.
//! - Balance snapshot and subgraph bucket fetchers built on those capabilities.
//! - The balance-diff and subgraph-bucket fetch strategies.
//! - A per-protocol [`AdapterRegistry`] and the catalog of supported protocols.
//! - HTTP implementations of both capabilities (JSON-RPC with Multicall3, and GraphQL).

#![warn(rustc::all)]
#![deny(unsafe_code)]
#![deny(nonstandard_style)]
#![deny(missing_debug_implementations)]
#![deny(rustdoc::broken_intra_doc_links)]

pub mod capability;
pub mod config;
pub mod fetchers;
pub mod graphql;
pub mod protocols;
pub mod registry;
pub mod rpc;
pub mod strategy;

// Re-exports
pub use crate::{
    capability::{QueryExecutor, ReadCall, ReadCallExecutor},
    config::{BalanceDiffConfig, ChainAdapterConfig, StrategyConfig, SubgraphBucketConfig},
    registry::{AdapterRegistry, Capabilities},
    strategy::{FeeFetch, FeeStrategy},
};
