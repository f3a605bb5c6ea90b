use anyhow::{Context, Result};
use bch_address::address::{cashaddr_codec, decode_try_codecs, BITCOIN_CASH, BITCOIN_CASH_TESTNET};
use bch_address::{
    from_base58_check, is_cash_address, normalize_prefix, to_cash_address, to_legacy_address,
    AddressCodec, Network,
};
use clap::Subcommand;

#[derive(Subcommand)]
pub enum AddressCommand {
    /// Convert a legacy or cashaddr address to a cashaddr (without prefix)
    ToCash {
        /// The address to convert
        address: String,
    },
    /// Convert a cashaddr address to a legacy Base58Check address
    ToLegacy {
        /// The address to convert
        address: String,
    },
    /// Re-encode a cashaddr address under the active network's prefix
    Normalize {
        /// The address to normalize
        address: String,
    },
    /// Report whether an address is cashaddr, legacy or neither
    Detect {
        /// The address to inspect
        address: String,
    },
    /// Decode an address to its kind, network prefix and hash (hex)
    Decode {
        /// The address to decode
        address: String,
    },
}

/// Format of an address as reported by `detect`
fn detect(address: &str, network: Network) -> &'static str {
    if is_cash_address(address, network) {
        "cashaddr"
    } else if from_base58_check(address).is_ok() {
        "legacy"
    } else {
        "unknown"
    }
}

pub fn handle_command(command: AddressCommand, network: Network) -> Result<()> {
    match command {
        AddressCommand::ToCash { address } => {
            let converted = to_cash_address(Some(address.as_str()), network)
                .context("Empty address")?;
            println!("{}", converted);
            Ok(())
        }
        AddressCommand::ToLegacy { address } => {
            let converted = to_legacy_address(&address, network)
                .with_context(|| format!("Not convertible to a legacy address: {}", address))?;
            println!("{}", converted);
            Ok(())
        }
        AddressCommand::Normalize { address } => {
            println!("{}", normalize_prefix(&address, network));
            Ok(())
        }
        AddressCommand::Detect { address } => {
            println!("{}", detect(address.trim(), network));
            Ok(())
        }
        AddressCommand::Decode { address } => {
            let codecs: [&dyn AddressCodec; 3] = [
                cashaddr_codec(network),
                &BITCOIN_CASH,
                &BITCOIN_CASH_TESTNET,
            ];
            let decoded = decode_try_codecs(address.trim(), &codecs)
                .with_context(|| format!("Failed to decode address: {}", address))?;
            println!("kind: {}", decoded.kind);
            println!("prefix: {}", decoded.prefix);
            println!("hash: {}", hex::encode(&decoded.hash));
            Ok(())
        }
    }
}
