//! Test utilities for bch-address

use crate::address::AddressKind;
use crate::Network;

/// Macro to generate rstest test function with #[case] for all networks in Network::ALL
/// This ensures the test cases stay in sync with Network::ALL
#[macro_export]
macro_rules! test_both_networks {
    ($test_name:ident, $network:ident, $body:block) => {
        #[rstest::rstest]
        #[case::bitcoin_cash($crate::Network::BitcoinCash)]
        #[case::bitcoin_cash_testnet($crate::Network::BitcoinCashTestnet)]
        fn $test_name(#[case] $network: $crate::Network) $body
    };
}

/// One row of `test/fixtures/address/<network>.json`:
/// `[kind, hash_hex, legacy_address, cashaddr_with_prefix]`
#[derive(Debug, Clone)]
pub struct AddressFixture {
    pub kind: AddressKind,
    pub hash: Vec<u8>,
    pub legacy: String,
    pub cashaddr: String,
}

fn fixture_name(network: Network) -> &'static str {
    match network {
        Network::BitcoinCash => "bitcoincash",
        Network::BitcoinCashTestnet => "bitcoincashTestnet",
    }
}

pub fn load_fixtures(network: Network) -> Vec<AddressFixture> {
    let fixture_path = format!(
        "{}/test/fixtures/address/{}.json",
        env!("CARGO_MANIFEST_DIR"),
        fixture_name(network)
    );
    let content = std::fs::read_to_string(&fixture_path)
        .unwrap_or_else(|_| panic!("Failed to load fixture: {}", fixture_path));

    let parsed: Vec<serde_json::Value> = serde_json::from_str(&content)
        .unwrap_or_else(|_| panic!("Failed to parse fixture: {}", fixture_path));

    parsed
        .iter()
        .map(|item| {
            let arr = item.as_array().unwrap();
            let kind = match arr[0].as_str().unwrap() {
                "p2pkh" => AddressKind::PublicKeyHash,
                "p2sh" => AddressKind::ScriptHash,
                other => panic!("Unknown kind in {}: {}", fixture_path, other),
            };
            AddressFixture {
                kind,
                hash: hex::decode(arr[1].as_str().unwrap()).unwrap(),
                legacy: arr[2].as_str().unwrap().to_string(),
                cashaddr: arr[3].as_str().unwrap().to_string(),
            }
        })
        .collect()
}
