//! Integer extraction from gateway cell values.
//!
//! Cells arrive either as JSON numbers or as numeric strings. Both are read
//! from their decimal text with arbitrary precision; floating point is never
//! involved, so magnitudes above 2^53 survive intact.

use crate::config::FractionPolicy;
use crate::error::{OracleError, Result};
use num_bigint::BigInt;
use num_traits::Zero;
use serde_json::Value;

/// Beyond this many decimal digits a value cannot be a uint256
const MAX_INTEGER_DIGITS: usize = 80;

/// Read a JSON cell as an integer
pub fn parse_integer(value: &Value, policy: FractionPolicy) -> Result<BigInt> {
    match value {
        Value::Number(number) => parse_decimal(&number.to_string(), policy),
        Value::String(text) => parse_decimal(text, policy),
        other => Err(OracleError::not_an_integer(other)),
    }
}

/// Parse `[+-]digits[.digits][(e|E)[+-]digits]` into an integer
pub fn parse_decimal(text: &str, policy: FractionPolicy) -> Result<BigInt> {
    let trimmed = text.trim();
    let (negative, unsigned) = match trimmed.as_bytes().first() {
        Some(b'-') => (true, &trimmed[1..]),
        Some(b'+') => (false, &trimmed[1..]),
        _ => (false, trimmed),
    };

    let (mantissa, exponent) = match unsigned.find(['e', 'E']) {
        Some(idx) => {
            let exp_text = &unsigned[idx + 1..];
            let exp = parse_exponent(exp_text).ok_or_else(|| OracleError::not_an_integer(text))?;
            (&unsigned[..idx], exp)
        }
        None => (unsigned, 0i64),
    };

    let (int_part, frac_part) = mantissa.split_once('.').unwrap_or((mantissa, ""));
    if int_part.is_empty() && frac_part.is_empty() {
        return Err(OracleError::not_an_integer(text));
    }
    if !int_part.bytes().all(|b| b.is_ascii_digit()) || !frac_part.bytes().all(|b| b.is_ascii_digit())
    {
        return Err(OracleError::not_an_integer(text));
    }

    let all_digits = format!("{int_part}{frac_part}");
    let digits = all_digits.trim_start_matches('0');
    if digits.is_empty() {
        return Ok(BigInt::zero());
    }

    // value = digits * 10^scale
    let scale = exponent.saturating_sub(frac_part.len() as i64);
    let (integer_digits, has_fraction) = if scale >= 0 {
        if digits.len() as i64 + scale > MAX_INTEGER_DIGITS as i64 {
            return Err(OracleError::Value(format!("{text} does not fit in uint256")));
        }
        let mut padded = digits.to_string();
        padded.extend(std::iter::repeat('0').take(scale as usize));
        (padded, false)
    } else {
        let shift = scale.unsigned_abs();
        if shift >= digits.len() as u64 {
            (String::new(), true)
        } else {
            let split = digits.len() - shift as usize;
            let fraction = &digits[split..];
            (digits[..split].to_string(), fraction.bytes().any(|b| b != b'0'))
        }
    };

    if has_fraction && policy == FractionPolicy::Reject {
        return Err(OracleError::Value(format!(
            "value has a fractional component: {text}"
        )));
    }

    let magnitude = if integer_digits.is_empty() {
        BigInt::zero()
    } else {
        integer_digits
            .parse::<BigInt>()
            .map_err(|_| OracleError::not_an_integer(text))?
    };
    Ok(if negative { -magnitude } else { magnitude })
}

fn parse_exponent(text: &str) -> Option<i64> {
    let digits = text.strip_prefix(['+', '-']).unwrap_or(text);
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    // Clamp absurd exponents; anything this large fails later on size
    let magnitude = digits.trim_start_matches('0');
    let value: i64 = if magnitude.len() > 12 {
        1_000_000_000_000
    } else if magnitude.is_empty() {
        0
    } else {
        magnitude.parse().ok()?
    };
    Some(if text.starts_with('-') { -value } else { value })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use serde_json::json;

    fn truncate(text: &str) -> Result<BigInt> {
        parse_decimal(text, FractionPolicy::Truncate)
    }

    #[test]
    fn parses_plain_integers() {
        assert_eq!(truncate("123").unwrap(), BigInt::from(123));
        assert_eq!(truncate("  42 ").unwrap(), BigInt::from(42));
        assert_eq!(truncate("+7").unwrap(), BigInt::from(7));
        assert_eq!(truncate("-5").unwrap(), BigInt::from(-5));
        assert_eq!(truncate("007").unwrap(), BigInt::from(7));
    }

    #[test]
    fn truncates_fractions_toward_zero() {
        assert_eq!(truncate("42.9").unwrap(), BigInt::from(42));
        assert_eq!(truncate("123.456").unwrap(), BigInt::from(123));
        assert_eq!(truncate("-3.7").unwrap(), BigInt::from(-3));
        assert_eq!(truncate("0.99").unwrap(), BigInt::zero());
        assert_eq!(truncate(".5").unwrap(), BigInt::zero());
        assert_eq!(truncate("7.").unwrap(), BigInt::from(7));
    }

    #[test]
    fn reject_policy_refuses_fractions_but_allows_zero_fraction() {
        let err = parse_decimal("42.9", FractionPolicy::Reject).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Value);
        assert_eq!(
            parse_decimal("42.000", FractionPolicy::Reject).unwrap(),
            BigInt::from(42)
        );
    }

    #[test]
    fn applies_exponents() {
        assert_eq!(truncate("1e3").unwrap(), BigInt::from(1000));
        assert_eq!(truncate("1.5E3").unwrap(), BigInt::from(1500));
        assert_eq!(truncate("12345e-2").unwrap(), BigInt::from(123));
        assert_eq!(truncate("1e-400").unwrap(), BigInt::zero());
        assert_eq!(
            truncate("1e21").unwrap(),
            "1000000000000000000000".parse::<BigInt>().unwrap()
        );
    }

    #[test]
    fn oversized_values_fail() {
        let err = truncate("1e100").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Value);
        let err = truncate("1e99999999999999999999").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Value);
    }

    #[test]
    fn rejects_non_numeric_text() {
        for bad in ["", "   ", "abc", "12abc", "1.2.3", "-", ".", "e5", "1e", "0x10", "1 000"] {
            let err = truncate(bad).unwrap_err();
            assert_eq!(err.kind(), ErrorKind::Value, "input {bad:?}");
        }
    }

    #[test]
    fn keeps_precision_above_2_pow_64() {
        let big = "340282366920938463463374607431768211457";
        assert_eq!(truncate(big).unwrap(), big.parse::<BigInt>().unwrap());
    }

    #[test]
    fn json_numbers_and_strings_agree() {
        let policy = FractionPolicy::Truncate;
        assert_eq!(parse_integer(&json!(123), policy).unwrap(), BigInt::from(123));
        assert_eq!(parse_integer(&json!("123"), policy).unwrap(), BigInt::from(123));
        assert_eq!(parse_integer(&json!(123.456), policy).unwrap(), BigInt::from(123));
        assert_eq!(parse_integer(&json!(0), policy).unwrap(), BigInt::zero());
    }

    #[test]
    fn json_non_numbers_are_value_errors() {
        for bad in [json!(true), json!([1]), json!({"a": 1})] {
            let err = parse_integer(&bad, FractionPolicy::Truncate).unwrap_err();
            assert_eq!(err.kind(), ErrorKind::Value);
        }
    }

    #[test]
    fn large_json_number_text_is_exact() {
        let value: Value = serde_json::from_str("18446744073709551617").unwrap();
        assert_eq!(
            parse_integer(&value, FractionPolicy::Truncate).unwrap(),
            "18446744073709551617".parse::<BigInt>().unwrap()
        );
    }
}
