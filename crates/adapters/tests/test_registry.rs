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

mod common;

use dailyfees_adapters::{Capabilities, FeeFetch, FeeStrategy, protocols};
use dailyfees_model::{Blockchain, FeeAdapterError, StartMarker};
use rstest::rstest;

use crate::common::{FixtureQueryExecutor, arc};

#[rstest]
fn test_catalog_names() {
    assert_eq!(protocols::names(), &["goplus", "voodoo-trade"]);
}

#[rstest]
#[case("goplus", Blockchain::Bsc, StartMarker::Block(36_724_659))]
#[case("voodoo-trade", Blockchain::Fantom, StartMarker::Timestamp(1_686_971_650))]
fn test_start_markers(
    #[case] protocol: &str,
    #[case] chain: Blockchain,
    #[case] expected: StartMarker,
) {
    let registry = protocols::registry(protocol).unwrap();
    assert_eq!(registry.start(chain).unwrap(), expected);
}

#[rstest]
#[case("goplus", "ethereum")]
#[case("goplus", "fantom")]
#[case("voodoo-trade", "bsc")]
#[case("voodoo-trade", "solana")]
fn test_unsupported_chain(#[case] protocol: &str, #[case] chain: &str) {
    let registry = protocols::registry(protocol).unwrap();
    assert!(matches!(
        registry.resolve_key(chain),
        Err(FeeAdapterError::ChainNotSupported(_))
    ));
}

#[rstest]
fn test_methodology_is_passed_through() {
    let registry = protocols::registry("goplus").unwrap();
    let methodology = registry.methodology(Blockchain::Bsc).unwrap();
    assert_eq!(
        methodology["Fees"],
        "All fees comes from users for security service provided by GoPlus Network."
    );
}

#[rstest]
fn test_strategy_kind_follows_configuration() {
    let capabilities = Capabilities::new().with_query(arc(FixtureQueryExecutor::new()));
    let registry = protocols::registry("voodoo-trade").unwrap();

    let strategy = registry.strategy(Blockchain::Fantom, &capabilities).unwrap();
    assert!(matches!(strategy, FeeStrategy::SubgraphBucket(_)));

    // The balance diff capability was not provided
    let goplus = protocols::registry("goplus").unwrap();
    assert!(matches!(
        goplus.strategy(Blockchain::Bsc, &capabilities),
        Err(FeeAdapterError::CapabilityUnavailable(_))
    ));
}

#[rstest]
#[tokio::test]
async fn test_unsupported_chain_never_reaches_capability() {
    let executor = arc(FixtureQueryExecutor::new());
    let registry = protocols::registry("voodoo-trade").unwrap();
    let capabilities = Capabilities::new().with_query(executor.clone());

    assert!(registry.strategy(Blockchain::Polygon, &capabilities).is_err());

    let strategy = registry.strategy(Blockchain::Fantom, &capabilities).unwrap();
    strategy.fetch(1_700_000_000).await.unwrap();
    assert_eq!(executor.requested_ids().len(), 1);
}
