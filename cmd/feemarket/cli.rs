use std::path::PathBuf;

use clap::{Parser, Subcommand};
use eyre::bail;
use feemarket_blockchain::{
    fee_market::calculate_expected_base_fee, gas_limit::next_block_gas_limit,
    validate_fee_market_header,
};
use tracing::info;

use crate::{read_fee_market_config, read_header};

pub const VERSION_STRING: &str = env!("CARGO_PKG_VERSION");

#[derive(Parser)]
#[command(name = "feemarket", author, version = VERSION_STRING, about = "Base fee and gas limit rules of the fee market", long_about = None)]
pub struct FeeMarketCLI {
    #[arg(
        long = "log.level",
        default_value = "info",
        value_name = "LOG_LEVEL",
        global = true,
        help = "The verbosity level used for logs. Possible values: info, debug, trace, warn, error"
    )]
    pub log_level: String,
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    #[clap(about = "Print the expected base fee of the block following the parent header.")]
    NextBaseFee {
        #[arg(long, value_name = "GENESIS_FILE", help = "Genesis file or bare chain config")]
        chain: PathBuf,
        #[arg(long, value_name = "HEADER_FILE", help = "Parent header as JSON")]
        parent: PathBuf,
    },
    #[clap(about = "Validate the gas limit and base fee of a header against its parent.")]
    Validate {
        #[arg(long, value_name = "GENESIS_FILE", help = "Genesis file or bare chain config")]
        chain: PathBuf,
        #[arg(long, value_name = "HEADER_FILE", help = "Parent header as JSON")]
        parent: PathBuf,
        #[arg(long, value_name = "HEADER_FILE", help = "Header to validate as JSON")]
        header: PathBuf,
    },
    #[clap(about = "Print the gas limit of the block following the parent header.")]
    NextGasLimit {
        #[arg(long, value_name = "GENESIS_FILE", help = "Genesis file or bare chain config")]
        chain: PathBuf,
        #[arg(long, value_name = "HEADER_FILE", help = "Parent header as JSON")]
        parent: PathBuf,
        #[arg(long, value_name = "GAS", help = "Gas limit the block producer steers towards")]
        desired: u64,
    },
}

impl Command {
    pub fn run(self) -> eyre::Result<()> {
        match self {
            Command::NextBaseFee { chain, parent } => {
                let config = read_fee_market_config(&chain)?;
                let parent = read_header(&parent)?;
                println!("{}", calculate_expected_base_fee(&parent, &config));
            }
            Command::Validate {
                chain,
                parent,
                header,
            } => {
                let config = read_fee_market_config(&chain)?;
                let parent = read_header(&parent)?;
                let header = read_header(&header)?;
                if let Err(error) = validate_fee_market_header(&parent, &header, &config) {
                    bail!("Block {} is invalid: {error}", header.number);
                }
                info!(block = header.number, "Header is valid");
            }
            Command::NextGasLimit {
                chain,
                parent,
                desired,
            } => {
                let config = read_fee_market_config(&chain)?;
                let parent = read_header(&parent)?;
                println!("{}", next_block_gas_limit(&parent, &config, desired));
            }
        }
        Ok(())
    }
}
