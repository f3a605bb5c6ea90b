//! Definitions of the Bitcoin Cash networks this crate converts addresses for,
//! and the read-only provider through which the active network is supplied.
use std::fmt;
use std::str::FromStr;
use std::sync::atomic::{AtomicU8, Ordering};
use std::sync::Arc;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Network {
    // https://github.com/bitcoin-cash-node/bitcoin-cash-node/blob/master/src/chainparams.cpp
    #[default]
    BitcoinCash,
    BitcoinCashTestnet,
}

impl Network {
    /// Array containing all network variants
    pub const ALL: &'static [Network] = &[Network::BitcoinCash, Network::BitcoinCashTestnet];

    /// Returns the canonical string name of this network
    pub fn as_str(&self) -> &'static str {
        match self {
            Network::BitcoinCash => "BitcoinCash",
            Network::BitcoinCashTestnet => "BitcoinCashTestnet",
        }
    }

    pub fn from_name_exact(name: &str) -> Option<Network> {
        match name {
            "BitcoinCash" => Some(Network::BitcoinCash),
            "BitcoinCashTestnet" => Some(Network::BitcoinCashTestnet),
            _ => None,
        }
    }

    /// Convert a mempool backend network name (`MEMPOOL.NETWORK`) to a Network.
    pub fn from_mempool_name(name: &str) -> Option<Network> {
        match name {
            "bitcoincash" => Some(Network::BitcoinCash),
            "bitcoincashtestnet" => Some(Network::BitcoinCashTestnet),
            _ => None,
        }
    }

    /// Convert a camel-cased JavaScript network name (`bitcoincashTestnet`) to a Network.
    pub fn from_utxolib_name(name: &str) -> Option<Network> {
        match name {
            "bitcoincash" => Some(Network::BitcoinCash),
            "bitcoincashTestnet" => Some(Network::BitcoinCashTestnet),
            _ => None,
        }
    }

    /// Convert from a coin ticker name to a Network enum value.
    pub fn from_coin_name(name: &str) -> Option<Network> {
        match name {
            "bch" => Some(Network::BitcoinCash),
            "tbch" => Some(Network::BitcoinCashTestnet),
            _ => None,
        }
    }

    /// Try every naming scheme in turn.
    pub fn from_any_name(name: &str) -> Option<Network> {
        Network::from_name_exact(name)
            .or_else(|| Network::from_mempool_name(name))
            .or_else(|| Network::from_utxolib_name(name))
            .or_else(|| Network::from_coin_name(name))
    }

    /// The canonical CashAddr prefix for this network.
    pub fn cashaddr_prefix(&self) -> &'static str {
        match self {
            Network::BitcoinCashTestnet => "bchtest",
            Network::BitcoinCash => "bitcoincash",
        }
    }

    fn to_u8(self) -> u8 {
        match self {
            Network::BitcoinCash => 0,
            Network::BitcoinCashTestnet => 1,
        }
    }

    fn from_u8(value: u8) -> Network {
        match value {
            1 => Network::BitcoinCashTestnet,
            _ => Network::BitcoinCash,
        }
    }
}

impl fmt::Display for Network {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Network {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Network::from_name_exact(s).ok_or_else(|| format!("Unknown network: {}", s))
    }
}

/// Read-only source of the active network setting.
///
/// Converters read the source once per call, so every operation sees a
/// single consistent network even if the host changes it concurrently.
pub trait NetworkSource {
    fn network(&self) -> Network;
}

impl NetworkSource for Network {
    fn network(&self) -> Network {
        *self
    }
}

impl<T: NetworkSource + ?Sized> NetworkSource for &T {
    fn network(&self) -> Network {
        (**self).network()
    }
}

impl<T: NetworkSource + ?Sized> NetworkSource for Arc<T> {
    fn network(&self) -> Network {
        (**self).network()
    }
}

/// A network setting that the host may switch at runtime.
///
/// Clones share the same underlying value.
#[derive(Debug, Clone, Default)]
pub struct SharedNetwork {
    inner: Arc<AtomicU8>,
}

impl SharedNetwork {
    pub fn new(network: Network) -> Self {
        Self {
            inner: Arc::new(AtomicU8::new(network.to_u8())),
        }
    }

    pub fn set(&self, network: Network) {
        self.inner.store(network.to_u8(), Ordering::Release);
    }
}

impl NetworkSource for SharedNetwork {
    fn network(&self) -> Network {
        Network::from_u8(self.inner.load(Ordering::Acquire))
    }
}
