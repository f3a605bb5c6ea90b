//! Bitcoin Cash address encoding, decoding and conversion.
//!
//! Two textual encodings identify the same (kind, hash) pair:
//!
//! - **Base58Check**: legacy P2PKH and P2SH addresses (`1...`, `3...`, `m...`, `2...`)
//! - **Cashaddr**: prefix-scoped addresses (`bitcoincash:q...`, `bchtest:p...`)
//!
//! The codecs in this module only perform syntactic and checksum validation.
//! They say nothing about whether a hash belongs to a real or funded output.
//!
//! # Examples
//!
//! ```rust
//! use bch_address::{to_cash_address, to_legacy_address, Network};
//!
//! let cash = to_cash_address(Some("1BpEi6DfDAUFd7GtittLSdBeYJvcoaVggu"), Network::BitcoinCash);
//! assert_eq!(cash.as_deref(), Some("qpm2qsznhks23z7629mms6s4cwef74vcwvy22gdx6a"));
//!
//! let legacy = to_legacy_address("qpm2qsznhks23z7629mms6s4cwef74vcwvy22gdx6a", Network::BitcoinCash);
//! assert_eq!(legacy.as_deref(), Some("1BpEi6DfDAUFd7GtittLSdBeYJvcoaVggu"));
//! ```

mod base58check;
pub mod cashaddr;
pub mod convert;
pub mod networks;

pub use base58check::{from_base58_check, to_base58_check, Base58CheckCodec};
pub use cashaddr::{decode_cashaddr, encode_cashaddr, CashAddrCodec};
pub use convert::{
    is_cash_address, normalize_prefix, to_cash_address, to_legacy_address, AddressConverter,
};
pub use networks::{cashaddr_codec, kind_from_version, legacy_codec, version_for};

use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AddressError {
    /// Cashaddr string mixes upper and lower case letters
    MixedCase,
    /// Character outside the Base58 or Cashaddr alphabet
    UnknownCharacter(char),
    /// Base58Check double-SHA256 or Cashaddr polymod checksum does not verify
    ChecksumMismatch,
    /// Non-zero bits left over after regrouping 5-bit values into bytes
    InvalidPadding,
    InvalidLength(String),
    /// Version byte that maps to no known (kind, network) pair
    UnknownVersion(u8),
    InvalidPrefix(String),
}

impl fmt::Display for AddressError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AddressError::MixedCase => write!(f, "Mixed case address"),
            AddressError::UnknownCharacter(ch) => write!(f, "Invalid character: {:?}", ch),
            AddressError::ChecksumMismatch => write!(f, "Invalid checksum"),
            AddressError::InvalidPadding => write!(f, "Invalid bit conversion: non-zero padding"),
            AddressError::InvalidLength(msg) => write!(f, "Invalid length: {}", msg),
            AddressError::UnknownVersion(version) => {
                write!(f, "Unknown version byte: 0x{:02x}", version)
            }
            AddressError::InvalidPrefix(prefix) => write!(f, "Invalid prefix: {:?}", prefix),
        }
    }
}

impl std::error::Error for AddressError {}

type Result<T> = std::result::Result<T, AddressError>;

/// What the hash in an address commits to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AddressKind {
    PublicKeyHash,
    ScriptHash,
}

impl AddressKind {
    /// Type bits of the cashaddr version byte (bits 3-6)
    pub fn cashaddr_type(self) -> u8 {
        match self {
            AddressKind::PublicKeyHash => 0,
            AddressKind::ScriptHash => 1,
        }
    }

    pub fn from_cashaddr_type(type_bits: u8) -> Option<AddressKind> {
        match type_bits {
            0 => Some(AddressKind::PublicKeyHash),
            1 => Some(AddressKind::ScriptHash),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            AddressKind::PublicKeyHash => "P2PKH",
            AddressKind::ScriptHash => "P2SH",
        }
    }
}

impl fmt::Display for AddressKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Result of decoding either address format.
///
/// Only lives for the span of one conversion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodedAddress {
    pub kind: AddressKind,
    /// Cashaddr prefix of the network the address belongs to
    pub prefix: String,
    pub hash: Vec<u8>,
}

/// Trait for address encoding and decoding
pub trait AddressCodec {
    fn encode(&self, kind: AddressKind, hash: &[u8]) -> Result<String>;
    fn decode(&self, address: &str) -> Result<DecodedAddress>;
}

// Network-specific codec parameters (values from src/chainparams.cpp):
//
// Base58CheckCodec::new(pubkey_hash_version, script_hash_version)
//   - pubkey_hash_version: base58Prefixes[PUBKEY_ADDRESS] for P2PKH addresses
//   - script_hash_version: base58Prefixes[SCRIPT_ADDRESS] for P2SH addresses
//
// CashAddrCodec::new(prefix)
//   - prefix: Network prefix, also the default for addresses given without one

// https://github.com/bitcoin-cash-node/bitcoin-cash-node/blob/master/src/chainparams.cpp
pub const BITCOIN_CASH: Base58CheckCodec = Base58CheckCodec::new(0x00, 0x05);
pub const BITCOIN_CASH_TESTNET: Base58CheckCodec = Base58CheckCodec::new(0x6f, 0xc4);

// https://github.com/bitcoincashorg/bitcoincash.org/blob/master/spec/cashaddr.md
pub const BITCOIN_CASH_CASHADDR: CashAddrCodec = CashAddrCodec::new("bitcoincash");
pub const BITCOIN_CASH_TESTNET_CASHADDR: CashAddrCodec = CashAddrCodec::new("bchtest");

/// Try multiple codecs to decode an address
pub fn decode_try_codecs(address: &str, codecs: &[&dyn AddressCodec]) -> Result<DecodedAddress> {
    let mut last_error = None;
    for &codec in codecs {
        match codec.decode(address) {
            Ok(decoded) => return Ok(decoded),
            Err(e) => last_error = Some(e),
        }
    }

    // an empty codec list accepts no network prefix at all
    Err(last_error.unwrap_or_else(|| {
        AddressError::InvalidPrefix(format!("no codec given to decode {}", address))
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::load_fixtures;
    use crate::Network;

    const HASH: &str = "76a04053bda0a88bda5177b86a15c3b29f559873";

    #[test]
    fn test_base58_roundtrip() {
        let hash = hex::decode("1e231c7f9b3415daaa53ee5a7e12e120f00ec212").unwrap();

        let encoded = BITCOIN_CASH.encode(AddressKind::PublicKeyHash, &hash).unwrap();
        let decoded = BITCOIN_CASH.decode(&encoded).unwrap();

        assert_eq!(decoded.kind, AddressKind::PublicKeyHash);
        assert_eq!(decoded.hash, hash);
        assert_eq!(decoded.prefix, "bitcoincash");
    }

    #[test]
    fn test_cashaddr_encode_decode() {
        let hash = hex::decode(HASH).unwrap();

        let encoded = BITCOIN_CASH_CASHADDR
            .encode(AddressKind::PublicKeyHash, &hash)
            .unwrap();
        assert_eq!(
            encoded,
            "bitcoincash:qpm2qsznhks23z7629mms6s4cwef74vcwvy22gdx6a"
        );

        let decoded = BITCOIN_CASH_CASHADDR.decode(&encoded).unwrap();
        assert_eq!(decoded.hash, hash);
        assert_eq!(decoded.kind, AddressKind::PublicKeyHash);
    }

    #[test]
    fn test_try_codecs() {
        let codecs: &[&dyn AddressCodec] = &[&BITCOIN_CASH, &BITCOIN_CASH_CASHADDR];

        let from_cashaddr =
            decode_try_codecs("bitcoincash:qpm2qsznhks23z7629mms6s4cwef74vcwvy22gdx6a", codecs)
                .unwrap();
        let from_legacy = decode_try_codecs("1BpEi6DfDAUFd7GtittLSdBeYJvcoaVggu", codecs).unwrap();

        assert_eq!(from_cashaddr, from_legacy);
        assert_eq!(hex::encode(&from_legacy.hash), HASH);
    }

    #[test]
    fn test_try_codecs_reports_last_error() {
        let codecs: &[&dyn AddressCodec] = &[&BITCOIN_CASH, &BITCOIN_CASH_CASHADDR];
        assert!(decode_try_codecs("not-an-address", codecs).is_err());
        assert_eq!(
            decode_try_codecs("1BpEi6DfDAUFd7GtittLSdBeYJvcoaVggu", &[]),
            Err(AddressError::InvalidPrefix(
                "no codec given to decode 1BpEi6DfDAUFd7GtittLSdBeYJvcoaVggu".to_string()
            ))
        );
        // with codecs, the last codec's error is reported
        assert_eq!(
            decode_try_codecs(
                "bitcoincash:qr6m7j9njldwwzlg9v7v53unlr4jkmx6eylep8ekg3",
                &[&BITCOIN_CASH_CASHADDR as &dyn AddressCodec]
            ),
            Err(AddressError::ChecksumMismatch)
        );
    }

    #[test]
    fn test_legacy_codec_rejects_other_network() {
        // testnet P2PKH version byte is not accepted by the mainnet codec
        let result = BITCOIN_CASH.decode("mrLC19Je2BuWQDkWSTriGYPyQJXKkkBmCx");
        assert_eq!(result, Err(AddressError::UnknownVersion(0x6f)));
    }

    #[test]
    fn test_all_fixtures() {
        for &network in Network::ALL {
            let legacy = legacy_codec(network);
            let cash = cashaddr_codec(network);

            for (idx, fixture) in load_fixtures(network).iter().enumerate() {
                assert_eq!(
                    legacy.encode(fixture.kind, &fixture.hash).unwrap(),
                    fixture.legacy,
                    "Legacy encoding mismatch in {}[{}]",
                    network,
                    idx
                );
                assert_eq!(
                    cash.encode(fixture.kind, &fixture.hash).unwrap(),
                    fixture.cashaddr,
                    "Cashaddr encoding mismatch in {}[{}]",
                    network,
                    idx
                );

                let decoded =
                    decode_try_codecs(&fixture.legacy, &[legacy as &dyn AddressCodec]).unwrap();
                assert_eq!(decoded.kind, fixture.kind);
                assert_eq!(decoded.hash, fixture.hash);
                assert_eq!(decoded.prefix, network.cashaddr_prefix());

                let decoded =
                    decode_try_codecs(&fixture.cashaddr, &[cash as &dyn AddressCodec]).unwrap();
                assert_eq!(decoded.kind, fixture.kind);
                assert_eq!(decoded.hash, fixture.hash);
            }
        }
    }

    #[test]
    fn test_error_display() {
        assert_eq!(AddressError::MixedCase.to_string(), "Mixed case address");
        assert_eq!(
            AddressError::UnknownVersion(0x80).to_string(),
            "Unknown version byte: 0x80"
        );
    }
}
