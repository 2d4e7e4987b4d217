use serde::Deserialize;

use crate::U256;

use super::{
    BlockNumber, BASE_FEE_MAX_CHANGE_DENOMINATOR, ELASTICITY_MULTIPLIER, INITIAL_BASE_FEE,
    MAINNET_LONDON_BLOCK,
};

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Fee market activation block is not scheduled")]
    FeeMarketNotScheduled,
    #[error("Elasticity multiplier must be at least 1")]
    InvalidElasticityMultiplier,
    #[error("Base fee change denominator must be greater than 0")]
    InvalidBaseFeeChangeDenominator,
    #[error("Failed to parse chain config: {0}")]
    Json(#[from] serde_json::Error),
}

/// Blockchain settings relevant to the fee market, as found in the `config` section
/// of a genesis file
#[derive(Clone, Copy, Debug, Deserialize, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ChainConfig {
    /// Current chain identifier
    #[serde(default)]
    pub chain_id: u64,

    /// Block number where the fee market was activated
    /// (None = no fork, 0 = fork is already active)
    #[serde(default)]
    pub london_block: Option<BlockNumber>,

    /// Overrides for chains that don't use the mainnet fee market constants
    #[serde(default)]
    pub elasticity_multiplier: Option<u64>,
    #[serde(default)]
    pub base_fee_change_denominator: Option<u64>,
    #[serde(
        default,
        deserialize_with = "crate::serde_utils::u256::deser_number_or_str_opt"
    )]
    pub initial_base_fee: Option<U256>,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum ChainConfigFile {
    Genesis { config: ChainConfig },
    Bare(ChainConfig),
}

impl ChainConfig {
    /// Parses either a full genesis file or a bare chain config object
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        Ok(match serde_json::from_str(json)? {
            ChainConfigFile::Genesis { config } => config,
            ChainConfigFile::Bare(config) => config,
        })
    }

    pub fn is_london_activated(&self, block_number: BlockNumber) -> bool {
        self.london_block.is_some_and(|num| num <= block_number)
    }

    /// Resolves the fee market constants for this chain, falling back to the
    /// mainnet values for anything not overridden
    pub fn fee_market(&self) -> Result<FeeMarketConfig, ConfigError> {
        let activation_block = self
            .london_block
            .ok_or(ConfigError::FeeMarketNotScheduled)?;
        FeeMarketConfig::new(
            activation_block,
            self.elasticity_multiplier.unwrap_or(ELASTICITY_MULTIPLIER),
            self.base_fee_change_denominator
                .unwrap_or(BASE_FEE_MAX_CHANGE_DENOMINATOR),
            self.initial_base_fee
                .unwrap_or_else(|| U256::from(INITIAL_BASE_FEE)),
        )
    }
}

/// Protocol constants of the fee market rule.
///
/// Passed explicitly to every fee market computation, there is no global fork table.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FeeMarketConfig {
    /// First block whose base fee is governed by the fee market rule
    pub activation_block: BlockNumber,
    /// Ratio between the maximum gas limit and the long-run gas target
    pub elasticity_multiplier: u64,
    /// Bounds the maximum per-block change of the base fee
    pub base_fee_change_denominator: u64,
    /// Base fee assigned to the first activated block
    pub initial_base_fee: U256,
}

impl FeeMarketConfig {
    pub fn new(
        activation_block: BlockNumber,
        elasticity_multiplier: u64,
        base_fee_change_denominator: u64,
        initial_base_fee: U256,
    ) -> Result<Self, ConfigError> {
        if elasticity_multiplier == 0 {
            return Err(ConfigError::InvalidElasticityMultiplier);
        }
        if base_fee_change_denominator == 0 {
            return Err(ConfigError::InvalidBaseFeeChangeDenominator);
        }
        Ok(Self {
            activation_block,
            elasticity_multiplier,
            base_fee_change_denominator,
            initial_base_fee,
        })
    }

    pub fn mainnet() -> Self {
        Self {
            activation_block: MAINNET_LONDON_BLOCK,
            elasticity_multiplier: ELASTICITY_MULTIPLIER,
            base_fee_change_denominator: BASE_FEE_MAX_CHANGE_DENOMINATOR,
            initial_base_fee: U256::from(INITIAL_BASE_FEE),
        }
    }

    pub fn is_activated(&self, block_number: BlockNumber) -> bool {
        self.activation_block <= block_number
    }

    /// Long-run gas consumption the fee market steers towards.
    /// Evaluates to 0 for a zero elasticity multiplier instead of panicking
    pub fn gas_target(&self, gas_limit: u64) -> u64 {
        gas_limit
            .checked_div(self.elasticity_multiplier)
            .unwrap_or_default()
    }
}
