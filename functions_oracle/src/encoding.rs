//! Fixed-width uint256 encoding handed to the on-chain consumer.

use crate::error::{OracleError, Result};
use ethereum_types::U256;
use num_bigint::{BigInt, BigUint, Sign};
use std::fmt;

/// Width of an encoded uint256 in bytes
pub const UINT256_BYTES: usize = 32;

/// Unsigned 256-bit value, serialized big-endian
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct EncodedResult(U256);

impl EncodedResult {
    pub fn zero() -> Self {
        EncodedResult(U256::zero())
    }

    /// Encode an arbitrary-precision integer, rejecting negatives and
    /// anything that does not fit in 256 bits
    pub fn from_bigint(value: &BigInt) -> Result<Self> {
        match value.sign() {
            Sign::Minus => Err(OracleError::Value(format!(
                "{value} is negative and cannot be encoded as uint256"
            ))),
            _ => Self::from_biguint(value.magnitude()),
        }
    }

    pub fn from_biguint(value: &BigUint) -> Result<Self> {
        let bytes = value.to_bytes_be();
        if bytes.len() > UINT256_BYTES {
            return Err(OracleError::Value(format!(
                "{value} does not fit in uint256"
            )));
        }
        Ok(EncodedResult(U256::from_big_endian(&bytes)))
    }

    /// Decode exactly 32 big-endian bytes
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        if bytes.len() != UINT256_BYTES {
            return Err(OracleError::InvalidInput(format!(
                "uint256 encoding must be {UINT256_BYTES} bytes, got {}",
                bytes.len()
            )));
        }
        Ok(EncodedResult(U256::from_big_endian(bytes)))
    }

    pub fn as_u256(&self) -> U256 {
        self.0
    }

    pub fn to_bytes(&self) -> [u8; UINT256_BYTES] {
        let mut out = [0u8; UINT256_BYTES];
        self.0.to_big_endian(&mut out);
        out
    }

    /// `0x` followed by 64 lowercase hex digits
    pub fn to_hex(&self) -> String {
        format!("0x{}", hex::encode(self.to_bytes()))
    }

    pub fn to_biguint(&self) -> BigUint {
        BigUint::from_bytes_be(&self.to_bytes())
    }

    pub fn is_zero(&self) -> bool {
        self.0.is_zero()
    }
}

impl From<U256> for EncodedResult {
    fn from(value: U256) -> Self {
        EncodedResult(value)
    }
}

impl From<u64> for EncodedResult {
    fn from(value: u64) -> Self {
        EncodedResult(U256::from(value))
    }
}

impl fmt::Display for EncodedResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Encode `value` as uint256
pub fn encode_uint256(value: &BigInt) -> Result<EncodedResult> {
    EncodedResult::from_bigint(value)
}

/// Decode a 32-byte big-endian uint256 back to an integer
pub fn decode_uint256(bytes: &[u8]) -> Result<BigUint> {
    EncodedResult::from_bytes(bytes).map(|encoded| encoded.to_biguint())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use num_traits::{One, Zero};
    use proptest::prelude::*;

    #[test]
    fn zero_encodes_as_all_zero_bytes() {
        let encoded = encode_uint256(&BigInt::zero()).unwrap();
        assert!(encoded.is_zero());
        assert_eq!(encoded.to_bytes(), [0u8; 32]);
        assert_eq!(encoded.to_hex(), format!("0x{}", "0".repeat(64)));
    }

    #[test]
    fn small_value_is_right_aligned() {
        let encoded = encode_uint256(&BigInt::from(123u32)).unwrap();
        let bytes = encoded.to_bytes();
        assert_eq!(bytes[31], 123);
        assert!(bytes[..31].iter().all(|b| *b == 0));
        assert_eq!(encoded.to_string(), "123");
    }

    #[test]
    fn negative_values_are_rejected() {
        let err = encode_uint256(&BigInt::from(-5)).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Value);
    }

    #[test]
    fn max_uint256_fits_and_one_more_does_not() {
        let max = (BigUint::one() << 256u32) - BigUint::one();
        let encoded = EncodedResult::from_biguint(&max).unwrap();
        assert_eq!(encoded.to_bytes(), [0xffu8; 32]);
        assert_eq!(encoded.as_u256(), U256::MAX);

        let overflow = BigUint::one() << 256u32;
        let err = EncodedResult::from_biguint(&overflow).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Value);
    }

    #[test]
    fn values_above_2_pow_53_stay_exact() {
        let value: BigInt = "9007199254740993".parse().unwrap();
        let encoded = encode_uint256(&value).unwrap();
        assert_eq!(encoded.to_string(), "9007199254740993");
    }

    #[test]
    fn decode_requires_32_bytes() {
        let err = decode_uint256(&[1, 2, 3]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidInput);
    }

    proptest! {
        #[test]
        fn prop_decode_inverts_encode(bytes in prop::collection::vec(any::<u8>(), 32)) {
            let value = BigUint::from_bytes_be(&bytes);
            let encoded = EncodedResult::from_biguint(&value).unwrap();
            prop_assert_eq!(decode_uint256(&encoded.to_bytes()).unwrap(), value);
        }

        #[test]
        fn prop_u64_matches_native_encoding(value in any::<u64>()) {
            let encoded = encode_uint256(&BigInt::from(value)).unwrap();
            prop_assert_eq!(encoded, EncodedResult::from(value));
            prop_assert_eq!(&encoded.to_bytes()[24..], &value.to_be_bytes()[..]);
        }
    }
}
