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

//! Domain model for normalizing protocol fee data into a uniform daily schema.
//!
//! The `dailyfees-model` crate holds the data-source independent half of a fee adapter:
//!
//! - Chain identifiers and start markers.
//! - Balance snapshots and their non-negative deltas.
//! - Day-bucketed fee component records.
//! - Exact integer revenue distribution splits.
//! - Fixed-point scaling and assembly of [`NormalizedFeeResult`] values.
//!
//! Nothing in this crate performs I/O. Raw amounts are `U256` throughout and are only turned
//! into decimal strings at the very end, using integer arithmetic.

#![warn(rustc::all)]
#![deny(unsafe_code)]
#![deny(nonstandard_style)]
#![deny(missing_debug_implementations)]
#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

pub mod chain;
pub mod datetime;
pub mod distribution;
pub mod error;
pub mod record;
pub mod result;
pub mod scaling;
pub mod snapshot;

// Re-exports
pub use alloy_primitives::U256;

pub use crate::{
    chain::{Blockchain, StartMarker},
    distribution::{DistributionPercentages, DistributionShare, RevenueClass},
    error::FeeAdapterError,
    record::FeeComponentRecord,
    result::{NormalizedFeeResult, ResultNormalizer},
    snapshot::{BalanceKey, BalanceSnapshot, ReadAt},
};
