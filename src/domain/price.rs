//! Desired Price
//!
//! Normalizes caller-supplied prices to exactly two fractional digits using
//! banker's rounding, so "19.999" and 19.999 both persist as 20.00.

use std::fmt;
use std::str::FromStr;

use bigdecimal::num_bigint::BigInt;
use bigdecimal::{BigDecimal, RoundingMode, ToPrimitive, Zero};
use once_cell::sync::Lazy;

use crate::domain::errors::ValidationError;

/// Price as supplied by the caller, before normalization.
///
/// Form submissions arrive as text; programmatic callers may already hold a
/// number. All variants quantize through the same path.
#[derive(Debug, Clone, PartialEq)]
pub enum PriceInput {
    Integer(i64),
    Float(f64),
    Text(String),
}

impl From<i64> for PriceInput {
    fn from(value: i64) -> Self {
        PriceInput::Integer(value)
    }
}

impl From<f64> for PriceInput {
    fn from(value: f64) -> Self {
        PriceInput::Float(value)
    }
}

impl From<&str> for PriceInput {
    fn from(value: &str) -> Self {
        PriceInput::Text(value.to_string())
    }
}

impl From<String> for PriceInput {
    fn from(value: String) -> Self {
        PriceInput::Text(value)
    }
}

/// Largest amount DECIMAL(10,2) can hold: 99999999.99.
static MAX_AMOUNT: Lazy<BigDecimal> =
    Lazy::new(|| BigDecimal::new(BigInt::from(9_999_999_999i64), DesiredPrice::SCALE));

/// A desired price carrying exactly two fractional digits.
#[derive(Debug, Clone, PartialEq)]
pub struct DesiredPrice(BigDecimal);

impl DesiredPrice {
    /// Fractional digits kept after quantization, matching DECIMAL(10,2).
    const SCALE: i64 = 2;

    /// Parse and quantize a raw price.
    ///
    /// Ties round half-to-even: 2.675 becomes 2.68, 2.665 becomes 2.66.
    /// Non-numeric text, non-finite floats and amounts that overflow
    /// DECIMAL(10,2) are rejected; the sign is not restricted.
    pub fn parse(input: PriceInput) -> Result<Self, ValidationError> {
        let raw = match input {
            PriceInput::Integer(value) => BigDecimal::from(value),
            PriceInput::Float(value) => {
                BigDecimal::try_from(value).map_err(|_| ValidationError::MustBeFinite)?
            }
            PriceInput::Text(text) => {
                let text = text.trim();
                BigDecimal::from_str(text)
                    .map_err(|_| ValidationError::InvalidPrice(text.to_string()))?
            }
        };
        let quantized = raw.with_scale_round(Self::SCALE, RoundingMode::HalfEven);

        // with_scale_round collapses a zero to scale 0; rebuild it at scale 2
        if quantized.is_zero() {
            return Ok(DesiredPrice(BigDecimal::new(BigInt::from(0), Self::SCALE)));
        }

        if quantized.abs() > *MAX_AMOUNT {
            return Err(ValidationError::InvalidPrice(format!(
                "exceeds maximum {}",
                *MAX_AMOUNT
            )));
        }

        Ok(DesiredPrice(quantized))
    }

    pub fn as_decimal(&self) -> &BigDecimal {
        &self.0
    }

    /// Binary value bound to the store. Exact for any DECIMAL(10,2) amount.
    pub fn to_f64(&self) -> f64 {
        self.0.to_f64().unwrap_or(0.0)
    }
}

impl fmt::Display for DesiredPrice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}
