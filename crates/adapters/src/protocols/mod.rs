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

//! Catalog of the supported protocol fee adapters.

pub mod goplus;
pub mod voodoo_trade;

use dailyfees_model::FeeAdapterError;

use crate::registry::AdapterRegistry;

/// Returns the names of all supported protocols.
#[must_use]
pub fn names() -> &'static [&'static str] {
    &[goplus::NAME, voodoo_trade::NAME]
}

/// Builds the adapter registry of the protocol named `name`.
///
/// # Errors
///
/// Returns an error if:
/// - The protocol is unknown ([`FeeAdapterError::ProtocolNotSupported`]).
/// - The protocol's adapter definitions fail validation.
pub fn registry(name: &str) -> Result<AdapterRegistry, FeeAdapterError> {
    match name.trim().to_ascii_lowercase().as_str() {
        goplus::NAME => goplus::registry(),
        voodoo_trade::NAME => voodoo_trade::registry(),
        other => Err(FeeAdapterError::ProtocolNotSupported(other.to_string())),
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    #[rstest]
    fn test_every_protocol_builds() {
        for name in names() {
            let registry = registry(name).unwrap();
            assert_eq!(registry.protocol(), *name);
            assert!(registry.chains().count() > 0);
        }
    }

    #[rstest]
    #[case("GoPlus")]
    #[case(" voodoo-trade ")]
    fn test_registry_name_is_normalized(#[case] name: &str) {
        assert!(registry(name).is_ok());
    }

    #[rstest]
    fn test_unknown_protocol() {
        assert!(matches!(
            registry("uniswap"),
            Err(FeeAdapterError::ProtocolNotSupported(name)) if name == "uniswap"
        ));
    }
}
