use feemarket_core::types::{
    BlockHeader, FeeMarketConfig, GAS_LIMIT_ADJUSTMENT_FACTOR, GAS_LIMIT_MINIMUM,
};
use tracing::trace;

use crate::error::GasLimitError;

/// Checks that the gas_limit fits the gas bounds set by its parent block:
/// it may move by strictly less than parent_gas_limit / 1024 and never go below the minimum
pub fn verify_gas_limit(parent_gas_limit: u64, gas_limit: u64) -> Result<(), GasLimitError> {
    let max_adjustment_delta = parent_gas_limit / GAS_LIMIT_ADJUSTMENT_FACTOR;

    if parent_gas_limit.abs_diff(gas_limit) >= max_adjustment_delta {
        return Err(GasLimitError::OutOfBounds {
            have: gas_limit,
            want: parent_gas_limit,
            max_delta: max_adjustment_delta.saturating_sub(1),
        });
    }
    if gas_limit < GAS_LIMIT_MINIMUM {
        return Err(GasLimitError::BelowMinimum {
            have: gas_limit,
            minimum: GAS_LIMIT_MINIMUM,
        });
    }
    Ok(())
}

/// Gas limit of the parent as seen by its child.
/// Blocks before the fee market activation used a limit that gets scaled up by the
/// elasticity multiplier at activation
pub fn effective_parent_gas_limit(parent: &BlockHeader, config: &FeeMarketConfig) -> u64 {
    if config.is_activated(parent.number) {
        parent.gas_limit
    } else {
        parent
            .gas_limit
            .saturating_mul(config.elasticity_multiplier)
    }
}

/// Computes the gas limit of the next block, moving it from the parent's limit towards
/// `desired_limit` as fast as the bound check allows
pub fn calc_gas_limit(parent_gas_limit: u64, desired_limit: u64) -> u64 {
    let delta = (parent_gas_limit / GAS_LIMIT_ADJUSTMENT_FACTOR).saturating_sub(1);
    let desired_limit = desired_limit.max(GAS_LIMIT_MINIMUM);

    if parent_gas_limit < desired_limit {
        parent_gas_limit.saturating_add(delta).min(desired_limit)
    } else if parent_gas_limit > desired_limit {
        parent_gas_limit.saturating_sub(delta).max(desired_limit)
    } else {
        parent_gas_limit
    }
}

/// Gas limit to stamp on a block built on top of `parent`, handling the rescale at the
/// fee market activation
pub fn next_block_gas_limit(
    parent: &BlockHeader,
    config: &FeeMarketConfig,
    desired_limit: u64,
) -> u64 {
    let child_number = parent.number.saturating_add(1);
    let parent_gas_limit = if config.is_activated(child_number) {
        effective_parent_gas_limit(parent, config)
    } else {
        parent.gas_limit
    };
    let gas_limit = calc_gas_limit(parent_gas_limit, desired_limit);
    trace!(
        block = child_number,
        parent_gas_limit,
        desired_limit,
        gas_limit,
        "Calculated next block gas limit"
    );
    gas_limit
}
