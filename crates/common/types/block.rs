use crate::U256;
use serde::{Deserialize, Serialize};

pub type BlockNumber = u64;

/// The subset of a block header that takes part in the fee market rules.
///
/// Deserializes from the JSON-RPC header shape (`eth_getBlockByNumber`), any other
/// header fields present in the input are ignored.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BlockHeader {
    #[serde(with = "crate::serde_utils::u64::hex_str")]
    pub number: BlockNumber,
    #[serde(with = "crate::serde_utils::u64::hex_str")]
    pub gas_limit: u64,
    #[serde(with = "crate::serde_utils::u64::hex_str")]
    pub gas_used: u64,
    /// Absent on headers before the fee market activation
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base_fee_per_gas: Option<U256>,
}

impl BlockHeader {
    pub fn new(
        number: BlockNumber,
        gas_limit: u64,
        gas_used: u64,
        base_fee_per_gas: Option<U256>,
    ) -> Self {
        Self {
            number,
            gas_limit,
            gas_used,
            base_fee_per_gas,
        }
    }
}
