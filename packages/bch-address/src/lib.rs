pub mod address;
mod networks;

#[cfg(test)]
mod test_utils;

// re-export bitcoin from the miniscript crate for its base58 and hash primitives
pub use ::miniscript::bitcoin;

pub use address::{
    decode_cashaddr, encode_cashaddr, from_base58_check, is_cash_address, normalize_prefix,
    to_base58_check, to_cash_address, to_legacy_address, AddressCodec, AddressConverter,
    AddressError, AddressKind, DecodedAddress,
};

pub use networks::{Network, NetworkSource, SharedNetwork};
