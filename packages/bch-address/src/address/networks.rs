//! Network-aware address parameters.
//!
//! This module bridges the Network enum with the address codecs: which legacy version
//! bytes and which cashaddr prefix apply to a network, and the reverse lookup from a
//! version byte to the (kind, network) pair it identifies.

use super::{
    AddressError, AddressKind, Base58CheckCodec, CashAddrCodec, Result, BITCOIN_CASH,
    BITCOIN_CASH_CASHADDR, BITCOIN_CASH_TESTNET, BITCOIN_CASH_TESTNET_CASHADDR,
};
use crate::networks::{Network, NetworkSource};

/// Get the Base58Check codec (version byte row) for a network.
pub fn legacy_codec(network: Network) -> &'static Base58CheckCodec {
    match network {
        Network::BitcoinCash => &BITCOIN_CASH,
        Network::BitcoinCashTestnet => &BITCOIN_CASH_TESTNET,
    }
}

/// Get the cashaddr codec for a network.
pub fn cashaddr_codec(network: Network) -> &'static CashAddrCodec {
    match network {
        Network::BitcoinCash => &BITCOIN_CASH_CASHADDR,
        Network::BitcoinCashTestnet => &BITCOIN_CASH_TESTNET_CASHADDR,
    }
}

/// Legacy version byte for a kind on a network. Total over both kinds.
pub fn version_for(kind: AddressKind, network: Network) -> u8 {
    legacy_codec(network).version(kind)
}

/// Map a legacy version byte to the (kind, network) it identifies.
///
/// Every known version byte belongs to exactly one network; anything else is
/// `UnknownVersion`, never a default kind.
pub fn kind_from_version(version: u8) -> Result<(AddressKind, Network)> {
    Network::ALL
        .iter()
        .find_map(|&network| {
            legacy_codec(network)
                .kind(version)
                .map(|kind| (kind, network))
        })
        .ok_or(AddressError::UnknownVersion(version))
}

/// The cashaddr prefix for whatever network the source currently reports.
///
/// Not cached: a host that switches networks is observed on the next call.
pub fn resolve_prefix<S: NetworkSource + ?Sized>(source: &S) -> &'static str {
    source.network().cashaddr_prefix()
}
