use serde::{de::Error, Deserialize, Deserializer, Serializer};

pub mod u256 {
    use super::*;
    use ethereum_types::U256;
    use serde_json::Number;

    /// Accepts either a JSON number or a decimal / 0x-prefixed hex string
    pub fn deser_number_or_str_opt<'de, D>(d: D) -> Result<Option<U256>, D::Error>
    where
        D: Deserializer<'de>,
    {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum NumberOrString {
            Number(Number),
            String(String),
        }

        match Option::<NumberOrString>::deserialize(d)? {
            Some(NumberOrString::Number(number)) => U256::from_dec_str(&number.to_string())
                .map(Some)
                .map_err(|e| D::Error::custom(e.to_string())),
            Some(NumberOrString::String(value)) => parse_hex_or_dec(&value)
                .map(Some)
                .map_err(D::Error::custom),
            None => Ok(None),
        }
    }

    fn parse_hex_or_dec(value: &str) -> Result<U256, String> {
        if value.starts_with("0x") {
            U256::from_str_radix(value.trim_start_matches("0x"), 16)
                .map_err(|_| "Failed to deserialize u256 value".to_string())
        } else {
            U256::from_dec_str(value).map_err(|e| e.to_string())
        }
    }
}

pub mod u64 {
    use super::*;

    pub mod hex_str {
        use super::*;

        pub fn deserialize<'de, D>(d: D) -> Result<u64, D::Error>
        where
            D: Deserializer<'de>,
        {
            let value = String::deserialize(d)?;
            u64::from_str_radix(value.trim_start_matches("0x"), 16)
                .map_err(|_| D::Error::custom("Failed to deserialize u64 value"))
        }

        pub fn serialize<S>(value: &u64, serializer: S) -> Result<S::Ok, S::Error>
        where
            S: Serializer,
        {
            serializer.serialize_str(&format!("{:#x}", value))
        }
    }
}
