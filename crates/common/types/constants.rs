// Fee related
pub const ELASTICITY_MULTIPLIER: u64 = 2;
pub const BASE_FEE_MAX_CHANGE_DENOMINATOR: u64 = 8;
/// Base fee of the first block under the fee market rule (1 gwei)
pub const INITIAL_BASE_FEE: u64 = 1_000_000_000;

// Gas limit related
pub const GAS_LIMIT_ADJUSTMENT_FACTOR: u64 = 1024;
pub const GAS_LIMIT_MINIMUM: u64 = 5000;

/// London hard fork block on Ethereum mainnet
pub const MAINNET_LONDON_BLOCK: u64 = 12_965_000;
