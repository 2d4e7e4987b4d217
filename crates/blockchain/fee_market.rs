use std::cmp::{max, Ordering};

use feemarket_core::{
    types::{BlockHeader, FeeMarketConfig},
    U256, U512,
};
use tracing::trace;

/// Increases move the base fee three times faster than decreases
const BASE_FEE_INCREASE_NUMERATOR: u64 = 3;

// Calculates the base fee for a block based on its parent's gas limit, gas used and base fee.
// Intermediate products are computed over 512 bits so they can't overflow.
pub fn calculate_base_fee_per_gas(
    parent_gas_limit: u64,
    parent_gas_used: u64,
    parent_base_fee_per_gas: U256,
    parent_is_pre_activation: bool,
    elasticity_multiplier: u64,
    base_fee_change_denominator: u64,
    initial_base_fee: U256,
) -> U256 {
    // The first block under the fee market rule doesn't derive its base fee from the parent
    if parent_is_pre_activation {
        return initial_base_fee;
    }

    let parent_gas_target = parent_gas_limit
        .checked_div(elasticity_multiplier)
        .unwrap_or_default();
    let denominator = U512::from(parent_gas_target) * U512::from(base_fee_change_denominator);
    let parent_base_fee = U512::from(parent_base_fee_per_gas);

    match parent_gas_used.cmp(&parent_gas_target) {
        Ordering::Equal => parent_base_fee_per_gas,
        Ordering::Greater => {
            let gas_used_delta = parent_gas_used - parent_gas_target;

            let fee_gas_delta = parent_base_fee
                * U512::from(gas_used_delta)
                * U512::from(BASE_FEE_INCREASE_NUMERATOR);
            // Every block above target raises the fee by at least one unit
            let base_fee_per_gas_delta = max(
                fee_gas_delta.checked_div(denominator).unwrap_or_default(),
                U512::one(),
            );

            saturating_into_u256(parent_base_fee + base_fee_per_gas_delta)
        }
        Ordering::Less => {
            let gas_used_delta = parent_gas_target - parent_gas_used;

            let fee_gas_delta = parent_base_fee * U512::from(gas_used_delta);
            let base_fee_per_gas_delta =
                fee_gas_delta.checked_div(denominator).unwrap_or_default();

            saturating_into_u256(parent_base_fee.saturating_sub(base_fee_per_gas_delta))
        }
    }
}

/// Expected base fee of the block built on top of `parent`.
///
/// Used both to validate incoming headers and to stamp the base fee on locally built blocks.
pub fn calculate_expected_base_fee(parent: &BlockHeader, config: &FeeMarketConfig) -> U256 {
    let parent_is_pre_activation = !config.is_activated(parent.number);
    let base_fee = calculate_base_fee_per_gas(
        parent.gas_limit,
        parent.gas_used,
        parent.base_fee_per_gas.unwrap_or_default(),
        parent_is_pre_activation,
        config.elasticity_multiplier,
        config.base_fee_change_denominator,
        config.initial_base_fee,
    );
    trace!(
        parent = parent.number,
        parent_gas_used = parent.gas_used,
        parent_gas_target = config.gas_target(parent.gas_limit),
        parent_is_pre_activation,
        %base_fee,
        "Calculated expected base fee"
    );
    base_fee
}

fn saturating_into_u256(value: U512) -> U256 {
    U256::try_from(value).unwrap_or_else(|_| U256::max_value())
}
