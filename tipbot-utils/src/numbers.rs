//! Integer literal parsing, base conversion and primality checks used by the
//! `tool` commands.
//!
//! Literals follow the usual integer-literal rules: surrounding whitespace is
//! ignored, a leading `+`/`-` is allowed, base-16 input may carry a `0x`
//! prefix, and single underscores may separate digits.

use num_bigint::BigUint;
use num_traits::{One, Zero};
use thiserror::Error;

#[derive(Clone, Debug, Error, Eq, PartialEq)]
pub enum ConversionError {
    #[error("not a valid integer literal")]
    InvalidLiteral,
    #[error("bytes are not valid UTF-8")]
    Undecodable,
}

/// A validated integer literal: sign plus digits with separators removed.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct IntLiteral {
    pub negative: bool,
    pub digits: String,
    pub radix: u32,
}

impl IntLiteral {
    /// Absolute value of the literal.
    pub fn magnitude(&self) -> Option<BigUint> {
        BigUint::parse_bytes(self.digits.as_bytes(), self.radix)
    }
}

/// Drop `,` thousands separators from user input.
pub fn strip_thousands_separators(raw: &str) -> String {
    raw.replace(',', "")
}

/// Parse an integer literal in base 10 or 16.
pub fn parse_int_literal(raw: &str, radix: u32) -> Option<IntLiteral> {
    let mut body = raw.trim();

    let negative = match body.as_bytes().first() {
        Some(b'-') => {
            body = &body[1..];
            true
        }
        Some(b'+') => {
            body = &body[1..];
            false
        }
        _ => false,
    };

    if radix == 16
        && let Some(rest) = body.strip_prefix("0x").or_else(|| body.strip_prefix("0X"))
    {
        // `0x_ff` is accepted, `0x` alone is not.
        body = rest.strip_prefix('_').unwrap_or(rest);
    }

    if body.is_empty() || body.starts_with('_') || body.ends_with('_') || body.contains("__") {
        return None;
    }

    let digits: String = body.chars().filter(|ch| *ch != '_').collect();
    if !digits.chars().all(|ch| ch.is_digit(radix)) {
        return None;
    }

    Some(IntLiteral {
        negative,
        digits: digits.to_ascii_lowercase(),
        radix,
    })
}

/// Sign and magnitude of a literal; `-0` has no sign.
fn signed_magnitude(raw: &str, radix: u32) -> Result<(&'static str, BigUint), ConversionError> {
    let literal = parse_int_literal(raw, radix).ok_or(ConversionError::InvalidLiteral)?;
    let magnitude = literal.magnitude().ok_or(ConversionError::InvalidLiteral)?;
    let sign = if literal.negative && !magnitude.is_zero() {
        "-"
    } else {
        ""
    };

    Ok((sign, magnitude))
}

/// Decimal literal to `0x…` hex, keeping the sign.
pub fn decimal_to_hex(raw: &str) -> Result<String, ConversionError> {
    let (sign, magnitude) = signed_magnitude(raw, 10)?;
    Ok(format!("{sign}0x{magnitude:x}"))
}

/// Hex literal to decimal text.
pub fn hex_to_decimal(raw: &str) -> Result<String, ConversionError> {
    let (sign, magnitude) = signed_magnitude(raw, 16)?;
    Ok(format!("{sign}{magnitude}"))
}

/// Decode a hex string into UTF-8 text.
///
/// The input must first be a valid hex integer literal; the byte decoding
/// itself is strict (even length, no prefix or separators).
pub fn hex_to_text(raw: &str) -> Result<String, ConversionError> {
    parse_int_literal(raw, 16).ok_or(ConversionError::InvalidLiteral)?;

    let bytes = hex::decode(raw.trim()).map_err(|_| ConversionError::Undecodable)?;
    String::from_utf8(bytes).map_err(|_| ConversionError::Undecodable)
}

/// Lowercase hex of the text's bytes.
pub fn text_to_hex(text: &str) -> String {
    hex::encode(text.as_bytes())
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum PrimeCheck {
    Prime,
    Composite,
    Invalid,
}

/// Primality of a decimal literal. Negative numbers, zero and one are not prime.
pub fn check_prime(raw: &str) -> PrimeCheck {
    let Some(literal) = parse_int_literal(raw, 10) else {
        return PrimeCheck::Invalid;
    };
    let Some(value) = literal.magnitude() else {
        return PrimeCheck::Invalid;
    };

    if !literal.negative && is_prime(&value) {
        PrimeCheck::Prime
    } else {
        PrimeCheck::Composite
    }
}

const WITNESSES: [u32; 20] = [
    2, 3, 5, 7, 11, 13, 17, 19, 23, 29, 31, 37, 41, 43, 47, 53, 59, 61, 67, 71,
];

/// Miller-Rabin over the first twenty primes.
///
/// Exact below 3.3 * 10^24; above that a composite passes only if it is a
/// strong pseudoprime to all twenty bases.
pub fn is_prime(n: &BigUint) -> bool {
    if *n < BigUint::from(2u32) {
        return false;
    }
    for witness in WITNESSES {
        let witness = BigUint::from(witness);
        if (n % &witness).is_zero() {
            return *n == witness;
        }
    }

    let n_minus_one = n - BigUint::one();
    let s = n_minus_one.trailing_zeros().unwrap_or(0);
    let d = &n_minus_one >> s;

    'witness: for witness in WITNESSES {
        let mut x = BigUint::from(witness).modpow(&d, n);
        if x.is_one() || x == n_minus_one {
            continue;
        }
        for _ in 1..s {
            x = (&x * &x) % n;
            if x == n_minus_one {
                continue 'witness;
            }
        }
        return false;
    }

    true
}
