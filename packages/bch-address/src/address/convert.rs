//! Conversion between legacy and cashaddr representations of the same address.
//!
//! None of these operations fail. Input that cannot be converted comes back as a
//! sentinel: `None`, the input itself, or `false`. Each step is an ordered chain of
//! decode attempts; a failed attempt is logged at debug level and the next is tried.
//!
//! Cashaddr results are returned without their `prefix:` part, in lowercase.

use tracing::debug;

use super::networks::{cashaddr_codec, kind_from_version, legacy_codec, resolve_prefix};
use super::{
    decode_cashaddr, from_base58_check, to_base58_check, AddressCodec, AddressKind,
    DecodedAddress, Result,
};
use crate::networks::{Network, NetworkSource};

/// Encode under the network's prefix and drop the `prefix:` part.
fn encode_payload(network: Network, kind: AddressKind, hash: &[u8]) -> Result<String> {
    let encoded = cashaddr_codec(network).encode(kind, hash)?;
    Ok(match encoded.split_once(':') {
        Some((_, payload)) => payload.to_string(),
        None => encoded,
    })
}

/// Decode as cashaddr with any prefix; prefix-less input is read under the network's prefix.
fn decode_any_prefix(address: &str, network: Network) -> Result<DecodedAddress> {
    decode_cashaddr(address, resolve_prefix(&network))
}

/// Convert a legacy or cashaddr address to a prefix-less cashaddr for `network`.
///
/// - empty or absent input: `None`
/// - cashaddr input (any prefix): re-encoded under the network's prefix
/// - legacy input with a known version byte: converted
/// - anything else: the trimmed input, unchanged
pub fn to_cash_address(address: Option<&str>, network: Network) -> Option<String> {
    let address = address.filter(|a| !a.is_empty())?;
    let trimmed = address.trim();

    match decode_any_prefix(trimmed, network) {
        Ok(decoded) => {
            return Some(
                encode_payload(network, decoded.kind, &decoded.hash)
                    .unwrap_or_else(|_| trimmed.to_lowercase()),
            );
        }
        Err(e) => debug!(address = trimmed, error = %e, "not a cashaddr, trying base58check"),
    }

    let (hash, version) = match from_base58_check(trimmed) {
        Ok(decoded) => decoded,
        Err(e) => {
            debug!(address = trimmed, error = %e, "not a base58check address, passing through");
            return Some(trimmed.to_string());
        }
    };

    let kind = match kind_from_version(version) {
        Ok((kind, _)) => kind,
        Err(e) => {
            debug!(address = trimmed, error = %e, "unmapped legacy version, passing through");
            return Some(trimmed.to_string());
        }
    };

    match encode_payload(network, kind, &hash) {
        Ok(payload) => Some(payload),
        Err(e) => {
            debug!(address = trimmed, error = %e, "cannot encode as cashaddr, passing through");
            Some(trimmed.to_string())
        }
    }
}

/// Convert a cashaddr (any prefix) to a legacy address using `network`'s version bytes.
///
/// Input that already decodes as Base58Check is returned unchanged. Returns `None` if
/// the input is neither format.
pub fn to_legacy_address(address: &str, network: Network) -> Option<String> {
    let trimmed = address.trim();

    if from_base58_check(trimmed).is_ok() {
        return Some(trimmed.to_string());
    }

    let decoded = match decode_any_prefix(trimmed, network) {
        Ok(decoded) => decoded,
        Err(e) => {
            debug!(address = trimmed, error = %e, "not convertible to legacy");
            return None;
        }
    };

    let version = legacy_codec(network).version(decoded.kind);
    Some(to_base58_check(&decoded.hash, version))
}

/// Re-encode a cashaddr (any prefix) under `network`'s prefix, without the prefix part.
/// Anything that does not decode is returned unchanged.
pub fn normalize_prefix(address: &str, network: Network) -> String {
    match decode_any_prefix(address, network) {
        Ok(decoded) => encode_payload(network, decoded.kind, &decoded.hash)
            .unwrap_or_else(|_| address.to_string()),
        Err(e) => {
            debug!(address, error = %e, "not a cashaddr, leaving unchanged");
            address.to_string()
        }
    }
}

/// True iff the input decodes as a cashaddr (any prefix).
pub fn is_cash_address(address: &str, network: Network) -> bool {
    decode_any_prefix(address, network).is_ok()
}

/// Address conversions against a network setting supplied by the host.
///
/// The source is read once per call, so a call never mixes two networks.
#[derive(Debug, Clone, Default)]
pub struct AddressConverter<S> {
    source: S,
}

impl<S: NetworkSource> AddressConverter<S> {
    pub fn new(source: S) -> Self {
        Self { source }
    }

    pub fn network(&self) -> Network {
        self.source.network()
    }

    pub fn to_cash_address(&self, address: Option<&str>) -> Option<String> {
        to_cash_address(address, self.network())
    }

    pub fn to_legacy_address(&self, address: &str) -> Option<String> {
        to_legacy_address(address, self.network())
    }

    pub fn normalize_prefix(&self, address: &str) -> String {
        normalize_prefix(address, self.network())
    }

    pub fn is_cash_address(&self, address: &str) -> bool {
        is_cash_address(address, self.network())
    }
}
