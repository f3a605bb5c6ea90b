use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

mod address;
mod config;

#[derive(Parser)]
#[command(name = "bch-address-cli")]
#[command(about = "CLI tool for Bitcoin Cash address conversion", long_about = None)]
#[command(version)]
struct Cli {
    #[command(flatten)]
    network: config::NetworkArgs,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Address conversion and inspection operations
    Address {
        #[command(subcommand)]
        command: address::AddressCommand,
    },
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let network = cli.network.resolve()?;

    match cli.command {
        Commands::Address { command } => address::handle_command(command, network),
    }
}
