use std::{fs, path::Path};

use clap::Parser;
use eyre::WrapErr;
use feemarket_core::types::{BlockHeader, ChainConfig, FeeMarketConfig};
use tracing::debug;
use tracing_subscriber::{filter::Directive, EnvFilter, FmtSubscriber};

mod cli;

fn main() -> eyre::Result<()> {
    let cli::FeeMarketCLI { log_level, command } = cli::FeeMarketCLI::parse();

    let log_filter = EnvFilter::builder()
        .with_default_directive(
            log_level
                .parse::<Directive>()
                .wrap_err("Not supported log level provided")?,
        )
        .from_env_lossy();
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(log_filter)
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)
        .wrap_err("setting default subscriber failed")?;

    command.run()
}

pub(crate) fn read_fee_market_config(path: &Path) -> eyre::Result<FeeMarketConfig> {
    let json = fs::read_to_string(path)
        .wrap_err_with(|| format!("Failed to read chain config {}", path.display()))?;
    let chain_config = ChainConfig::from_json(&json)
        .wrap_err_with(|| format!("Failed to load chain config {}", path.display()))?;
    let config = chain_config.fee_market()?;
    debug!(
        chain_id = chain_config.chain_id,
        activation_block = config.activation_block,
        elasticity_multiplier = config.elasticity_multiplier,
        base_fee_change_denominator = config.base_fee_change_denominator,
        "Loaded fee market config"
    );
    Ok(config)
}

pub(crate) fn read_header(path: &Path) -> eyre::Result<BlockHeader> {
    let json = fs::read_to_string(path)
        .wrap_err_with(|| format!("Failed to read header {}", path.display()))?;
    serde_json::from_str(&json)
        .wrap_err_with(|| format!("Failed to decode header {}", path.display()))
}
