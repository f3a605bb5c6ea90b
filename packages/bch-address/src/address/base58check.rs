//! Base58Check encoding/decoding for legacy Bitcoin Cash addresses (P2PKH, P2SH).

use super::networks::kind_from_version;
use super::{AddressCodec, AddressError, AddressKind, DecodedAddress, Result};
use crate::bitcoin::base58;
use crate::bitcoin::hashes::{sha256d, Hash};

const BASE58_ALPHABET: &str = "123456789ABCDEFGHJKLMNPQRSTUVWXYZabcdefghijkmnopqrstuvwxyz";

const CHECKSUM_LEN: usize = 4;

/// Base58Check codec with network-specific version bytes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Base58CheckCodec {
    /// Base58Check P2PKH version byte
    pub pub_key_hash: u8,
    /// Base58Check P2SH version byte
    pub script_hash: u8,
}

impl Base58CheckCodec {
    /// Create a new Base58Check codec with specified version bytes
    pub const fn new(pub_key_hash: u8, script_hash: u8) -> Self {
        Self {
            pub_key_hash,
            script_hash,
        }
    }

    pub fn version(&self, kind: AddressKind) -> u8 {
        match kind {
            AddressKind::PublicKeyHash => self.pub_key_hash,
            AddressKind::ScriptHash => self.script_hash,
        }
    }

    pub fn kind(&self, version: u8) -> Option<AddressKind> {
        if version == self.pub_key_hash {
            Some(AddressKind::PublicKeyHash)
        } else if version == self.script_hash {
            Some(AddressKind::ScriptHash)
        } else {
            None
        }
    }
}

/// Encode a hash with a version byte to Base58Check format using bitcoin crate
pub fn to_base58_check(hash: &[u8], version: u8) -> String {
    let mut data = Vec::with_capacity(1 + hash.len());
    data.push(version);
    data.extend_from_slice(hash);

    // encode_check appends the first four bytes of sha256d(data)
    base58::encode_check(&data)
}

/// Decode a Base58Check string to (hash, version).
///
/// Leading `1` characters decode to leading zero bytes. The decoded bytes must hold at
/// least a version byte and the 4-byte checksum.
pub fn from_base58_check(address: &str) -> Result<(Vec<u8>, u8)> {
    let data = base58::decode(address).map_err(|_| {
        let ch = address
            .chars()
            .find(|&c| !BASE58_ALPHABET.contains(c))
            .unwrap_or_default();
        AddressError::UnknownCharacter(ch)
    })?;

    if data.len() < 1 + CHECKSUM_LEN {
        return Err(AddressError::InvalidLength(format!(
            "Base58Check payload too short: {} bytes",
            data.len()
        )));
    }

    let (payload, checksum) = data.split_at(data.len() - CHECKSUM_LEN);
    let expected = sha256d::Hash::hash(payload).to_byte_array();
    if expected[..CHECKSUM_LEN] != *checksum {
        return Err(AddressError::ChecksumMismatch);
    }

    Ok((payload[1..].to_vec(), payload[0]))
}

impl AddressCodec for Base58CheckCodec {
    fn encode(&self, kind: AddressKind, hash: &[u8]) -> Result<String> {
        if hash.len() != 20 {
            return Err(AddressError::InvalidLength(format!(
                "Hash must be 20 bytes, got {}",
                hash.len()
            )));
        }
        Ok(to_base58_check(hash, self.version(kind)))
    }

    fn decode(&self, address: &str) -> Result<DecodedAddress> {
        let (hash, version) = from_base58_check(address)?;

        let kind = self
            .kind(version)
            .ok_or(AddressError::UnknownVersion(version))?;
        let (_, network) = kind_from_version(version)?;

        if hash.len() != 20 {
            return Err(AddressError::InvalidLength(format!(
                "Invalid {} hash length: {}",
                kind,
                hash.len()
            )));
        }

        Ok(DecodedAddress {
            kind,
            prefix: network.cashaddr_prefix().to_string(),
            hash,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encode_known_vectors() {
        let hash = hex::decode("76a04053bda0a88bda5177b86a15c3b29f559873").unwrap();
        assert_eq!(
            to_base58_check(&hash, 0x00),
            "1BpEi6DfDAUFd7GtittLSdBeYJvcoaVggu"
        );
        assert_eq!(
            to_base58_check(&hash, 0x05),
            "3CWFddi6m4ndiGyKqzYvsFYagqDLPVMTzC"
        );
        assert_eq!(
            to_base58_check(&hash, 0x6f),
            "mrLC19Je2BuWQDkWSTriGYPyQJXKkkBmCx"
        );
        assert_eq!(
            to_base58_check(&hash, 0xc4),
            "2N44ThNe8NXHyv4bsX8AoVCXquBRW94Ls7W"
        );
    }

    #[test]
    fn test_leading_zero_bytes_preserved() {
        let hash = [0u8; 20];
        let encoded = to_base58_check(&hash, 0x00);
        assert_eq!(encoded, "1111111111111111111114oLvT2");

        let (decoded, version) = from_base58_check(&encoded).unwrap();
        assert_eq!(version, 0x00);
        assert_eq!(decoded, hash.to_vec());
    }

    #[test]
    fn test_decode() {
        let (hash, version) = from_base58_check("3LDsS579y7sruadqu11beEJoTjdFiFCdX4").unwrap();
        assert_eq!(version, 0x05);
        assert_eq!(
            hex::encode(hash),
            "cb481232299cd5743151ac4b2d63ae198e7bb0a9"
        );
    }

    #[test]
    fn test_invalid_checksum() {
        // last character changed
        assert_eq!(
            from_base58_check("1BpEi6DfDAUFd7GtittLSdBeYJvcoaVggv"),
            Err(AddressError::ChecksumMismatch)
        );
    }

    #[test]
    fn test_invalid_character() {
        // '0', 'O', 'I' and 'l' are not in the alphabet
        assert_eq!(
            from_base58_check("1BpEi6DfDAUFd7GtittLSdBeYJvcoaVgg0"),
            Err(AddressError::UnknownCharacter('0'))
        );
        assert_eq!(
            from_base58_check("bitcoincash:qpm2qsznhks23z7629mms6s4cwef74vcwvy22gdx6a"),
            Err(AddressError::UnknownCharacter(':'))
        );
    }

    #[test]
    fn test_too_short() {
        assert!(matches!(
            from_base58_check(""),
            Err(AddressError::InvalidLength(_))
        ));
        assert!(matches!(
            from_base58_check("1111"),
            Err(AddressError::InvalidLength(_))
        ));
    }

    #[test]
    fn test_codec_version_lookup() {
        let codec = Base58CheckCodec::new(0x6f, 0xc4);
        assert_eq!(codec.version(AddressKind::PublicKeyHash), 0x6f);
        assert_eq!(codec.version(AddressKind::ScriptHash), 0xc4);
        assert_eq!(codec.kind(0xc4), Some(AddressKind::ScriptHash));
        assert_eq!(codec.kind(0x00), None);
    }

    #[test]
    fn test_codec_rejects_wrong_hash_length() {
        let codec = Base58CheckCodec::new(0x00, 0x05);
        assert!(codec.encode(AddressKind::PublicKeyHash, &[0u8; 19]).is_err());
    }
}
