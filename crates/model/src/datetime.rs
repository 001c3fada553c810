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

//! Calendar-day helpers for day-bucketed fee data.
//!
//! All days are UTC days. A day is identified by its start timestamp in UNIX seconds.

use chrono::{DateTime, Utc};

use crate::error::FeeAdapterError;

/// Number of seconds in one UTC day.
pub const SECONDS_IN_DAY: u64 = 86_400;

/// Period label of daily buckets.
pub const DAILY_PERIOD_LABEL: &str = "daily";

/// Returns the start of the UTC day containing `timestamp` (UNIX seconds).
#[must_use]
pub const fn start_of_day(timestamp: u64) -> u64 {
    timestamp - timestamp % SECONDS_IN_DAY
}

/// Returns the `[start, end)` UNIX seconds window of the UTC day containing `timestamp`.
///
/// # Errors
///
/// Returns [`FeeAdapterError::InvalidTimestamp`] if the day end does not fit in a `u64`.
pub fn day_window(timestamp: u64) -> Result<(u64, u64), FeeAdapterError> {
    let start = start_of_day(timestamp);
    let end = start
        .checked_add(SECONDS_IN_DAY)
        .ok_or(FeeAdapterError::InvalidTimestamp(timestamp))?;
    Ok((start, end))
}

/// Returns the canonical bucket identifier for the day containing `timestamp`.
///
/// The identifier is the day start in UNIX seconds joined to the period label with `:`,
/// for example `1686960000:daily`. Every instant of a day maps to the same identifier.
#[must_use]
pub fn bucket_id_for(timestamp: u64, period: &str) -> String {
    format!("{}:{period}", start_of_day(timestamp))
}

/// Formats the UTC calendar date of `timestamp` as `YYYY-MM-DD` for logging.
#[must_use]
pub fn format_day(timestamp: u64) -> String {
    i64::try_from(timestamp)
        .ok()
        .and_then(|secs| DateTime::<Utc>::from_timestamp(secs, 0))
        .map_or_else(
            || format!("<out of range: {timestamp}>"),
            |dt| dt.format("%Y-%m-%d").to_string(),
        )
}
