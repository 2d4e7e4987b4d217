use thiserror::Error;

use feemarket_core::U256;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum InvalidBlockHeaderError {
    #[error("Gas limit out of bounds: {0}")]
    GasLimitOutOfBounds(#[from] GasLimitError),
    #[error("Header is missing base fee")]
    MissingBaseFee,
    #[error("Header has a base fee before the fee market activation")]
    UnexpectedBaseFee,
    /// `parent_base_fee` is zero when the parent predates the fee market
    #[error("Invalid base fee: have {actual}, want {expected}, parent base fee {parent_base_fee}, parent gas used {parent_gas_used}")]
    BaseFeeMismatch {
        expected: U256,
        actual: U256,
        parent_base_fee: U256,
        parent_gas_used: u64,
    },
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum GasLimitError {
    #[error("Invalid gas limit: have {have}, want {want} +-= {max_delta}")]
    OutOfBounds {
        have: u64,
        want: u64,
        max_delta: u64,
    },
    #[error("Invalid gas limit below {minimum}: have {have}")]
    BelowMinimum { have: u64, minimum: u64 },
}
