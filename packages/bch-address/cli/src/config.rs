//! Resolution of the active network from command-line flags or a mempool config file.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use bch_address::Network;
use clap::Args;
use serde::Deserialize;

#[derive(Args)]
pub struct NetworkArgs {
    /// Network (bitcoincash, bitcoincashtestnet, bch, tbch, ...)
    #[arg(short, long, global = true, default_value = "bitcoincash")]
    pub network: String,

    /// Read the network from the MEMPOOL.NETWORK field of a mempool config file.
    /// Takes precedence over --network.
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,
}

#[derive(Deserialize)]
struct MempoolConfig {
    #[serde(rename = "MEMPOOL")]
    mempool: MempoolSection,
}

#[derive(Deserialize)]
struct MempoolSection {
    #[serde(rename = "NETWORK")]
    network: String,
}

impl NetworkArgs {
    pub fn resolve(&self) -> Result<Network> {
        let network = match &self.config {
            Some(path) => network_from_config(path)?,
            None => parse_network(&self.network)?,
        };
        tracing::debug!(%network, prefix = network.cashaddr_prefix(), "active network");
        Ok(network)
    }
}

pub fn network_from_config(path: &Path) -> Result<Network> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file {}", path.display()))?;
    let config: MempoolConfig = serde_json::from_str(&content)
        .with_context(|| format!("Failed to parse config file {}", path.display()))?;
    parse_network(&config.mempool.network)
}

pub fn parse_network(network: &str) -> Result<Network> {
    if let Some(net) = Network::from_any_name(network) {
        return Ok(net);
    }

    let normalized = network.to_lowercase();
    match normalized.as_str() {
        "mainnet" => Ok(Network::BitcoinCash),
        "testnet" | "bchtest" => Ok(Network::BitcoinCashTestnet),
        _ => anyhow::bail!("Unknown network: {}", network),
    }
}
