pub mod error;
pub mod fee_market;
pub mod gas_limit;
mod smoke_test;

use error::InvalidBlockHeaderError;
use fee_market::calculate_expected_base_fee;
use feemarket_core::types::{BlockHeader, FeeMarketConfig};
use gas_limit::{effective_parent_gas_limit, verify_gas_limit};
use tracing::debug;

/// Validates the fee market fields of a header built under the fee market rule in
/// reference to its parent_header:
/// - the gas limit stays within the allowed bounds of the (rescaled) parent gas limit
/// - the base fee is present and matches the one derived from the parent
pub fn validate_header(
    parent_header: &BlockHeader,
    header: &BlockHeader,
    config: &FeeMarketConfig,
) -> Result<(), InvalidBlockHeaderError> {
    let parent_gas_limit = effective_parent_gas_limit(parent_header, config);
    verify_gas_limit(parent_gas_limit, header.gas_limit)?;

    let Some(base_fee) = header.base_fee_per_gas else {
        return Err(InvalidBlockHeaderError::MissingBaseFee);
    };

    let expected_base_fee = calculate_expected_base_fee(parent_header, config);
    if base_fee != expected_base_fee {
        debug!(
            block = header.number,
            %base_fee,
            %expected_base_fee,
            "Rejecting header with invalid base fee"
        );
        return Err(InvalidBlockHeaderError::BaseFeeMismatch {
            expected: expected_base_fee,
            actual: base_fee,
            parent_base_fee: parent_header.base_fee_per_gas.unwrap_or_default(),
            parent_gas_used: parent_header.gas_used,
        });
    }
    Ok(())
}

/// Validates a header on either side of the fee market activation.
/// Headers before the activation must not carry a base fee and only go through the
/// plain gas limit bound check.
pub fn validate_fee_market_header(
    parent_header: &BlockHeader,
    header: &BlockHeader,
    config: &FeeMarketConfig,
) -> Result<(), InvalidBlockHeaderError> {
    if config.is_activated(header.number) {
        return validate_header(parent_header, header, config);
    }
    if header.base_fee_per_gas.is_some() {
        return Err(InvalidBlockHeaderError::UnexpectedBaseFee);
    }
    verify_gas_limit(parent_header.gas_limit, header.gas_limit)?;
    Ok(())
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::error::GasLimitError;
    use feemarket_core::U256;

    const ONE_GWEI: u64 = 1_000_000_000;

    fn config() -> FeeMarketConfig {
        FeeMarketConfig::new(10, 2, 8, U256::from(ONE_GWEI)).unwrap()
    }

    fn parent_header() -> BlockHeader {
        BlockHeader::new(100, 20_000_000, 15_000_000, Some(U256::from(ONE_GWEI)))
    }

    #[test]
    fn test_validate_header() {
        let header = BlockHeader::new(101, 20_000_000, 0, Some(U256::from(1_187_500_000u64)));
        assert_eq!(validate_header(&parent_header(), &header, &config()), Ok(()));
    }

    #[test]
    fn validation_is_repeatable() {
        let header = BlockHeader::new(101, 20_000_000, 0, Some(U256::from(1_187_500_000u64)));
        let first = validate_header(&parent_header(), &header, &config());
        let second = validate_header(&parent_header(), &header, &config());
        assert_eq!(first, second);
    }

    #[test]
    fn base_fee_off_by_one_is_rejected() {
        for actual in [1_187_499_999u64, 1_187_500_001] {
            let header = BlockHeader::new(101, 20_000_000, 0, Some(U256::from(actual)));
            assert_eq!(
                validate_header(&parent_header(), &header, &config()),
                Err(InvalidBlockHeaderError::BaseFeeMismatch {
                    expected: U256::from(1_187_500_000u64),
                    actual: U256::from(actual),
                    parent_base_fee: U256::from(ONE_GWEI),
                    parent_gas_used: 15_000_000,
                })
            );
        }
    }

    #[test]
    fn base_fee_mismatch_message() {
        let header = BlockHeader::new(101, 20_000_000, 0, Some(U256::from(ONE_GWEI)));
        let err = validate_header(&parent_header(), &header, &config()).unwrap_err();
        assert_eq!(
            err.to_string(),
            "Invalid base fee: have 1000000000, want 1187500000, parent base fee 1000000000, parent gas used 15000000"
        );
    }

    #[test]
    fn missing_base_fee_is_rejected() {
        let header = BlockHeader::new(101, 20_000_000, 0, None);
        assert_eq!(
            validate_header(&parent_header(), &header, &config()),
            Err(InvalidBlockHeaderError::MissingBaseFee)
        );
    }

    #[test]
    fn gas_limit_is_checked_before_base_fee() {
        // Both the gas limit and the (missing) base fee are wrong
        let header = BlockHeader::new(101, 40_000_000, 0, None);
        assert!(matches!(
            validate_header(&parent_header(), &header, &config()),
            Err(InvalidBlockHeaderError::GasLimitOutOfBounds(
                GasLimitError::OutOfBounds { .. }
            ))
        ));
    }

    #[test]
    fn first_activated_header_uses_rescaled_gas_limit() {
        let parent = BlockHeader::new(9, 10_000_000, 9_000_000, None);
        let header = BlockHeader::new(10, 20_000_000, 0, Some(U256::from(ONE_GWEI)));
        assert_eq!(validate_header(&parent, &header, &config()), Ok(()));

        // Keeping the legacy limit is a halving of the rescaled one
        let header = BlockHeader::new(10, 10_000_000, 0, Some(U256::from(ONE_GWEI)));
        assert!(matches!(
            validate_header(&parent, &header, &config()),
            Err(InvalidBlockHeaderError::GasLimitOutOfBounds(_))
        ));
    }

    #[test]
    fn first_activated_header_ignores_parent_base_fee() {
        let parent = BlockHeader::new(9, 10_000_000, 9_000_000, Some(U256::from(42u64)));
        let header = BlockHeader::new(10, 20_000_000, 0, Some(U256::from(42u64)));
        assert_eq!(
            validate_header(&parent, &header, &config()),
            Err(InvalidBlockHeaderError::BaseFeeMismatch {
                expected: U256::from(ONE_GWEI),
                actual: U256::from(42u64),
                parent_base_fee: U256::from(42u64),
                parent_gas_used: 9_000_000,
            })
        );
    }

    #[test]
    fn pre_activation_header_must_not_carry_base_fee() {
        let parent = BlockHeader::new(7, 10_000_000, 0, None);
        let header = BlockHeader::new(8, 10_000_000, 0, Some(U256::from(ONE_GWEI)));
        assert_eq!(
            validate_fee_market_header(&parent, &header, &config()),
            Err(InvalidBlockHeaderError::UnexpectedBaseFee)
        );
        let header = BlockHeader::new(8, 10_000_000, 0, None);
        assert_eq!(validate_fee_market_header(&parent, &header, &config()), Ok(()));
    }

    #[test]
    fn pre_activation_header_gas_limit_is_not_rescaled() {
        let parent = BlockHeader::new(7, 10_000_000, 0, None);
        let header = BlockHeader::new(8, 20_000_000, 0, None);
        assert!(matches!(
            validate_fee_market_header(&parent, &header, &config()),
            Err(InvalidBlockHeaderError::GasLimitOutOfBounds(_))
        ));
    }

    #[test]
    fn fee_market_header_delegates_after_activation() {
        let parent = BlockHeader::new(9, 10_000_000, 9_000_000, None);
        let header = BlockHeader::new(10, 20_000_000, 0, None);
        assert_eq!(
            validate_fee_market_header(&parent, &header, &config()),
            Err(InvalidBlockHeaderError::MissingBaseFee)
        );
    }
}
