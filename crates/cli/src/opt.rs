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

use clap::Parser;

/// Main CLI structure for parsing command-line arguments and options.
///
/// This is the entry point for the dailyfees command-line interface, reporting the normalized
/// daily fees and revenue of the supported protocols.
#[derive(Debug, Parser)]
#[clap(version, about, author)]
pub struct DailyFeesCli {
    #[clap(subcommand)]
    pub command: Commands,
}

/// Available top-level commands.
#[derive(Parser, Debug)]
pub enum Commands {
    /// Fetches the normalized fees of one protocol on one chain for a UTC day.
    Fetch(FetchOpt),
    /// Lists the supported protocols and their chains.
    List,
    /// Prints the methodology of a protocol on a chain.
    Methodology {
        /// The protocol name (case-insensitive). Examples: goplus, voodoo-trade
        #[arg(long)]
        protocol: String,
        /// The blockchain chain name (case-insensitive). Examples: bsc, fantom
        #[arg(long)]
        chain: String,
    },
}

/// Options of the fetch command.
#[derive(Parser, Debug, Clone)]
pub struct FetchOpt {
    /// The protocol name (case-insensitive). Examples: goplus, voodoo-trade
    #[arg(long)]
    pub protocol: String,
    /// The blockchain chain name (case-insensitive). Examples: bsc, fantom
    #[arg(long)]
    pub chain: String,
    /// Any UNIX timestamp (seconds) within the day to report (optional, defaults to the last complete UTC day)
    #[arg(long)]
    pub timestamp: Option<u64>,
    /// RPC HTTP URL for balance reads (optional, falls back to `RPC_HTTP_URL` env var)
    #[arg(long)]
    pub rpc_url: Option<String>,
    /// GraphQL endpoint for subgraph queries (optional, falls back to `SUBGRAPH_URL` env var, then the protocol default)
    #[arg(long)]
    pub subgraph_url: Option<String>,
    /// Maximum number of Multicall calls per RPC request (optional, defaults to 200)
    #[arg(long)]
    pub multicall_calls_per_rpc_request: Option<usize>,
}
