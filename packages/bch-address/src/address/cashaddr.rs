//! Cashaddr encoding/decoding for Bitcoin Cash.
//!
//! Implements the cashaddr checksum algorithm as defined in:
//! - Format: https://github.com/bitcoincashorg/bitcoincash.org/blob/master/spec/cashaddr.md
//! - Reference implementation: https://github.com/Bitcoin-ABC/bitcoin-abc/blob/master/src/cashaddr.cpp
//!
//! # Format
//!
//! `prefix:payload`, where the prefix is optional when the reader knows which network
//! to expect. The payload is the base32 encoding (bech32 character set) of
//! `version_byte ++ hash` followed by 8 checksum characters.
//!
//! ## Version byte
//! - Bit 7: reserved, must be 0
//! - Bits 3-6: type (0 = P2PKH, 1 = P2SH)
//! - Bits 0-2: hash size (0 = 20 bytes, 1 = 24 bytes, ... 7 = 64 bytes)
//!
//! ## Checksum
//! A 40-bit BCH code over GF(32). The prefix enters the checksum as the low 5 bits of
//! each character followed by a zero separator, so the same payload under a different
//! prefix does not verify.
//!
//! ## Why We Use Only `Fe32` from the bech32 Crate
//!
//! `Fe32` is a general 5-bit field element and gives us the character table.
//! The bech32 crate's packing and checksum helpers implement Bech32/Bech32m rules and
//! would produce incorrect results here, so bit packing, prefix expansion and the
//! polymod are implemented in this module.
//!
//! | Feature | Bech32/Bech32m | CashAddr |
//! |---------|----------------|----------|
//! | **Separator** | `1` | `:` (optional) |
//! | **Checksum Length** | 6 characters (30 bits) | 8 characters (40 bits) |
//! | **Prefix Expansion** | `[b>>5...] + [0] + [b&31...]` | `[b&31...] + [0]` |
//! | **Padding Validation** | Lenient | Strict (must be zero) |

use super::{AddressCodec, AddressError, AddressKind, DecodedAddress, Result};
use bech32::Fe32;

const CHECKSUM_LEN: usize = 8;

/// Hash sizes in bytes, indexed by the size bits of the version byte
const HASH_SIZES: [usize; 8] = [20, 24, 28, 32, 40, 48, 56, 64];

/// CashAddr codec for Bitcoin Cash
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CashAddrCodec {
    /// Cashaddr prefix (e.g., "bitcoincash", "bchtest")
    pub prefix: &'static str,
}

impl CashAddrCodec {
    /// Create a new CashAddr codec
    pub const fn new(prefix: &'static str) -> Self {
        Self { prefix }
    }
}

/// Convert 8-bit bytes to 5-bit Fe32 field elements, most significant bit first.
///
/// Remaining bits (if any) are left-shifted into a final zero-padded 5-bit value.
///
/// # Example
/// Input: `[0xFF, 0x01]` (16 bits)
/// - First 5 bits: 11111 = 31
/// - Next 5 bits: 11100 = 28
/// - Next 5 bits: 00000 = 0
/// - Remaining 1 bit (1) padded: 10000 = 16
fn bytes_to_fes(data: &[u8]) -> Result<Vec<Fe32>> {
    let mut acc: u32 = 0;
    let mut bits: u8 = 0;
    let mut result = Vec::with_capacity((data.len() * 8).div_ceil(5));

    for &byte in data {
        acc = ((acc << 8) | (byte as u32)) & 0xfff;
        bits += 8;

        while bits >= 5 {
            bits -= 5;
            let value = ((acc >> bits) & 0x1f) as u8;
            result.push(Fe32::try_from(value).map_err(|_| AddressError::InvalidPadding)?);
        }
    }

    if bits > 0 {
        let value = ((acc << (5 - bits)) & 0x1f) as u8;
        result.push(Fe32::try_from(value).map_err(|_| AddressError::InvalidPadding)?);
    }

    Ok(result)
}

/// Convert 5-bit Fe32 field elements to 8-bit bytes.
///
/// Leftover bits must number fewer than 5 and must all be zero. Rejecting
/// non-zero padding keeps every payload to exactly one textual form.
///
/// # Example
/// Valid: `[31, 28, 0, 16]` with last bits = 0000 (zero padding)
/// Invalid: `[31, 28, 0, 17]` with last bits = 0001 (non-zero padding)
fn fes_to_bytes(fes: &[Fe32]) -> Result<Vec<u8>> {
    let mut acc: u32 = 0;
    let mut bits: u8 = 0;
    let mut result = Vec::with_capacity(fes.len() * 5 / 8);

    for &fe in fes {
        acc = ((acc << 5) | (fe.to_u8() as u32)) & 0xfff;
        bits += 5;

        while bits >= 8 {
            bits -= 8;
            result.push(((acc >> bits) & 0xff) as u8);
        }
    }

    if bits >= 5 || (bits > 0 && ((acc << (8 - bits)) & 0xff) != 0) {
        return Err(AddressError::InvalidPadding);
    }

    Ok(result)
}

/// Expand the cashaddr prefix for checksum calculation.
///
/// ```text
/// prefix = "bitcoincash"
/// expanded = [b & 31 for b in prefix] + [0]
///          = [2, 9, 20, 3, 15, 9, 14, 3, 1, 19, 8] + [0]
/// ```
fn expand_prefix(prefix: &str) -> Vec<u8> {
    let mut result: Vec<u8> = prefix.bytes().map(|byte| byte & 0x1f).collect();
    result.push(0);
    result
}

/// Compute the cashaddr polymod checksum.
///
/// 1. Initialize checksum state `c = 1`
/// 2. For each input value:
///    - Extract top 5 bits of state: `c0 = c >> 35`
///    - Shift state left 5 bits and XOR with input: `c = (c & 0x07ffffffff) << 5 ^ input`
///    - XOR in generator `i` for every set bit `i` of `c0`
/// 3. Final XOR with `1`
///
/// A valid address (prefix, payload and checksum) yields 0.
fn polymod(values: &[u8]) -> u64 {
    const GENERATORS: [u64; 5] = [
        0x98f2bc8e61,
        0x79b76d99e2,
        0xf33e5fb3c4,
        0xae2eabe2a8,
        0x1e4f43e470,
    ];

    let mut c: u64 = 1;
    for &d in values {
        let c0 = (c >> 35) as u8;
        c = ((c & 0x07ffffffff) << 5) ^ (d as u64);

        for (i, generator) in GENERATORS.iter().enumerate() {
            if (c0 & (1 << i)) != 0 {
                c ^= generator;
            }
        }
    }

    c ^ 1
}

/// Checksum input: expanded prefix followed by the payload values
fn checksum_input(prefix: &str, payload: &[Fe32]) -> Vec<u8> {
    let mut data = expand_prefix(prefix);
    data.extend(payload.iter().map(|fe| fe.to_u8()));
    data
}

/// Prefixes are non-empty and alphanumeric; returns the lowercase form.
fn validate_prefix(prefix: &str) -> Result<String> {
    if prefix.is_empty() || !prefix.bytes().all(|b| b.is_ascii_alphanumeric()) {
        return Err(AddressError::InvalidPrefix(prefix.to_string()));
    }
    Ok(prefix.to_ascii_lowercase())
}

fn size_code(hash_len: usize) -> Result<u8> {
    HASH_SIZES
        .iter()
        .position(|&size| size == hash_len)
        .map(|code| code as u8)
        .ok_or_else(|| {
            AddressError::InvalidLength(format!("Unsupported hash length: {} bytes", hash_len))
        })
}

/// Encode hash to cashaddr format, including the `prefix:` part
pub fn encode_cashaddr(prefix: &str, kind: AddressKind, hash: &[u8]) -> Result<String> {
    let prefix = validate_prefix(prefix)?;
    let version_byte = (kind.cashaddr_type() << 3) | size_code(hash.len())?;

    let mut payload = Vec::with_capacity(1 + hash.len());
    payload.push(version_byte);
    payload.extend_from_slice(hash);

    let mut combined = bytes_to_fes(&payload)?;

    // Checksum over prefix + payload + 8 zero placeholders
    let mut data = checksum_input(&prefix, &combined);
    data.extend_from_slice(&[0; CHECKSUM_LEN]);
    let checksum = polymod(&data);

    for i in 0..CHECKSUM_LEN {
        let fe_val = ((checksum >> (5 * (CHECKSUM_LEN - 1 - i))) & 0x1f) as u8;
        combined.push(Fe32::try_from(fe_val).map_err(|_| AddressError::ChecksumMismatch)?);
    }

    let mut result = String::with_capacity(prefix.len() + 1 + combined.len());
    result.push_str(&prefix);
    result.push(':');
    result.extend(combined.iter().map(|fe| fe.to_char()));

    Ok(result)
}

/// Decode a cashaddr string.
///
/// An address without a `prefix:` part is checked against `default_prefix`, and must
/// then share its case. An explicit prefix is accepted whatever network it names, and
/// returned in the result.
pub fn decode_cashaddr(address: &str, default_prefix: &str) -> Result<DecodedAddress> {
    let (prefix, payload) = address
        .split_once(':')
        .unwrap_or((default_prefix, address));

    // the case check covers the default prefix too
    let has_lower = prefix.chars().chain(payload.chars()).any(|c| c.is_lowercase());
    let has_upper = prefix.chars().chain(payload.chars()).any(|c| c.is_uppercase());
    if has_lower && has_upper {
        return Err(AddressError::MixedCase);
    }

    let prefix = validate_prefix(prefix)?;
    let payload_str = payload.to_lowercase();

    let payload_fes = payload_str
        .chars()
        .map(|ch| Fe32::from_char(ch).map_err(|_| AddressError::UnknownCharacter(ch)))
        .collect::<Result<Vec<_>>>()?;

    if payload_fes.len() <= CHECKSUM_LEN {
        return Err(AddressError::InvalidLength(format!(
            "Payload too short: {} characters",
            payload_fes.len()
        )));
    }

    if polymod(&checksum_input(&prefix, &payload_fes)) != 0 {
        return Err(AddressError::ChecksumMismatch);
    }

    let payload = fes_to_bytes(&payload_fes[..payload_fes.len() - CHECKSUM_LEN])?;
    let (&version_byte, hash) = payload
        .split_first()
        .ok_or_else(|| AddressError::InvalidLength("Empty payload".to_string()))?;

    if version_byte & 0x80 != 0 {
        return Err(AddressError::UnknownVersion(version_byte));
    }
    let kind = AddressKind::from_cashaddr_type((version_byte >> 3) & 0x0f)
        .ok_or(AddressError::UnknownVersion(version_byte))?;

    let expected_len = HASH_SIZES[(version_byte & 0x07) as usize];
    if hash.len() != expected_len {
        return Err(AddressError::InvalidLength(format!(
            "Version byte advertises {} bytes, payload holds {}",
            expected_len,
            hash.len()
        )));
    }

    Ok(DecodedAddress {
        kind,
        prefix,
        hash: hash.to_vec(),
    })
}

impl AddressCodec for CashAddrCodec {
    fn encode(&self, kind: AddressKind, hash: &[u8]) -> Result<String> {
        encode_cashaddr(self.prefix, kind, hash)
    }

    fn decode(&self, address: &str) -> Result<DecodedAddress> {
        decode_cashaddr(address, self.prefix)
    }
}
