//! Decimal test values and their plural operands
//!
//! A [`NumericSample`] is an exact, non-negative decimal quantity that keeps
//! the number of fraction digits it was written with. `1.0` and `1.00` are
//! different samples: they land in different range buckets and may select
//! different plural categories.
//!
//! Compact exponent literals use the `c` (or `e`) marker, so `1.1c6` is
//! 1 100 000 carrying an exponent operand of 6.

use crate::error::{Error, Result};
use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

/// Largest fraction-digit count a sample can carry (10^18 still fits a `u64`)
pub const MAX_SAMPLE_FRACTION_DIGITS: u8 = 18;

/// Largest exponent operand accepted in a literal
pub const MAX_EXPONENT: u8 = 18;

#[inline]
fn pow10(exp: u8) -> u64 {
    10u64.pow(u32::from(exp))
}

#[inline]
fn pow10_wide(exp: u8) -> u128 {
    10u128.pow(u32::from(exp))
}

/// Number of decimal digits in `value`, counting zero as one digit
pub(crate) fn decimal_digits(mut value: u64) -> usize {
    let mut digits = 0;
    loop {
        digits += 1;
        value /= 10;
        if value == 0 {
            return digits;
        }
    }
}

/// The operands a plural rule is evaluated against
///
/// Names follow the usual plural-rule operand letters.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PluralOperands {
    /// Absolute value
    pub n: f64,
    /// Integer digits
    pub i: u64,
    /// Number of visible fraction digits, with trailing zeros
    pub v: u8,
    /// Number of visible fraction digits, without trailing zeros
    pub w: u8,
    /// Visible fraction digits as an integer, with trailing zeros
    pub f: u64,
    /// Visible fraction digits as an integer, without trailing zeros
    pub t: u64,
    /// Compact exponent
    pub e: u8,
}

impl PluralOperands {
    /// True when the value has no non-zero fraction digits
    pub fn is_integral(&self) -> bool {
        self.f == 0
    }

    /// `n % modulus` when `n` is integral, `None` otherwise
    ///
    /// Rules written as `n % 10 = 1` only match integral values.
    pub fn integral_mod(&self, modulus: u64) -> Option<u64> {
        self.is_integral().then(|| self.i % modulus)
    }
}

/// Numeric magnitude of a sample with trailing fraction zeros removed
///
/// `1`, `1.0` and `1.00` share one magnitude.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Magnitude {
    scale: u8,
    digits: u64,
}

impl Magnitude {
    const fn new(mut digits: u64, mut scale: u8) -> Self {
        while scale > 0 && digits % 10 == 0 {
            digits /= 10;
            scale -= 1;
        }
        Self { scale, digits }
    }

    /// Magnitude of a whole number
    pub const fn integer(value: u64) -> Self {
        Self::new(value, 0)
    }
}

/// An immutable, non-negative decimal test value
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NumericSample {
    /// Value multiplied by 10^fraction_digits
    scaled: u64,
    fraction_digits: u8,
    exponent: u8,
}

impl NumericSample {
    /// Create a sample from a value already multiplied by 10^`fraction_digits`
    ///
    /// `from_scaled(15, 1)` is `1.5`, `from_scaled(100, 2)` is `1.00`.
    pub fn from_scaled(scaled: i64, fraction_digits: u8) -> Result<Self> {
        if scaled < 0 {
            return Err(Error::NegativeValue {
                value: scaled.to_string(),
            });
        }
        if fraction_digits > MAX_SAMPLE_FRACTION_DIGITS {
            return Err(Error::FractionDigitsOverflow {
                digits: fraction_digits,
                max: MAX_SAMPLE_FRACTION_DIGITS,
            });
        }
        Ok(Self {
            scaled: scaled.unsigned_abs(),
            fraction_digits,
            exponent: 0,
        })
    }

    /// Create an integer sample
    pub fn integer(value: i64) -> Result<Self> {
        Self::from_scaled(value, 0)
    }

    /// Value multiplied by 10^v
    pub fn scaled_value(&self) -> u64 {
        self.scaled
    }

    /// Value at an arbitrary scale, truncated toward zero
    ///
    /// Saturates at `u64::MAX` when the scaled value does not fit.
    pub fn value_at_scale(&self, scale: u8) -> u64 {
        match scale.cmp(&self.fraction_digits) {
            Ordering::Equal => self.scaled,
            Ordering::Greater => {
                match 10u64.checked_pow(u32::from(scale - self.fraction_digits)) {
                    Some(factor) => self.scaled.saturating_mul(factor),
                    None if self.scaled == 0 => 0,
                    None => u64::MAX,
                }
            }
            Ordering::Less => 10u64
                .checked_pow(u32::from(self.fraction_digits - scale))
                .map_or(0, |divisor| self.scaled / divisor),
        }
    }

    /// Integer part of the value
    pub fn integer_part(&self) -> u64 {
        self.scaled / pow10(self.fraction_digits)
    }

    /// Number of digits after the decimal point as written (operand `v`)
    pub fn visible_fraction_digits(&self) -> u8 {
        self.fraction_digits
    }

    /// Compact exponent operand, zero for plain values
    pub fn exponent(&self) -> u8 {
        self.exponent
    }

    /// True when the sample carries an exponent marker
    pub fn has_exponent(&self) -> bool {
        self.exponent != 0
    }

    /// True when no fraction digits are visible
    pub fn is_integer(&self) -> bool {
        self.fraction_digits == 0
    }

    /// Number of decimal digits in the integer part
    pub fn integer_digit_count(&self) -> usize {
        decimal_digits(self.integer_part())
    }

    /// Numeric magnitude, ignoring trailing fraction zeros and the exponent marker
    pub fn magnitude(&self) -> Magnitude {
        Magnitude::new(self.scaled, self.fraction_digits)
    }

    /// Plural operands for rule evaluation
    pub fn operands(&self) -> PluralOperands {
        let i = self.integer_part();
        let f = self.scaled % pow10(self.fraction_digits);
        let mut t = f;
        let mut w = self.fraction_digits;
        while w > 0 && t % 10 == 0 {
            t /= 10;
            w -= 1;
        }
        let n = self.scaled as f64 / pow10(self.fraction_digits) as f64;
        PluralOperands {
            n,
            i,
            v: self.fraction_digits,
            w,
            f,
            t,
            e: self.exponent,
        }
    }

    /// Digits of the scaled value, left-padded with zeros to at least `min_len`
    fn padded_digits(&self, min_len: usize) -> String {
        format!("{:0>width$}", self.scaled, width = min_len)
    }

    /// Plain fixed-point rendering with exactly `v` fraction digits
    pub fn to_plain_string(&self) -> String {
        let v = usize::from(self.fraction_digits);
        let digits = self.padded_digits(v + 1);
        if v == 0 {
            digits
        } else {
            let split = digits.len() - v;
            format!("{}.{}", &digits[..split], &digits[split..])
        }
    }

    /// Compact rendering with the decimal point shifted by the exponent
    ///
    /// `1100000` with exponent 6 renders as `1.1c6`; trailing zeros introduced
    /// by the shift are dropped.
    pub fn to_exponent_string(&self) -> String {
        if self.exponent == 0 {
            return self.to_plain_string();
        }
        let shifted = usize::from(self.fraction_digits) + usize::from(self.exponent);
        let digits = self.padded_digits(shifted + 1);
        let split = digits.len() - shifted;
        let significand = &digits[..split];
        let fraction = digits[split..].trim_end_matches('0');
        if fraction.is_empty() {
            format!("{}c{}", significand, self.exponent)
        } else {
            format!("{}.{}c{}", significand, fraction, self.exponent)
        }
    }

    fn invalid(literal: &str, reason: &str) -> Error {
        Error::InvalidLiteral {
            literal: literal.to_string(),
            reason: reason.to_string(),
        }
    }
}

impl FromStr for NumericSample {
    type Err = Error;

    fn from_str(literal: &str) -> Result<Self> {
        let text = literal.trim();
        if text.starts_with('-') {
            return Err(Error::NegativeValue {
                value: text.to_string(),
            });
        }

        let (significand, exponent) = match text.find(['c', 'e', 'C', 'E']) {
            Some(pos) => {
                let exponent: u8 = text[pos + 1..]
                    .parse()
                    .map_err(|_| Self::invalid(literal, "exponent is not a small integer"))?;
                if exponent > MAX_EXPONENT {
                    return Err(Self::invalid(literal, "exponent too large"));
                }
                (&text[..pos], exponent)
            }
            None => (text, 0),
        };

        let (int_digits, frac_digits) = significand.split_once('.').unwrap_or((significand, ""));
        if int_digits.is_empty() {
            return Err(Self::invalid(literal, "missing integer digits"));
        }
        if !int_digits
            .chars()
            .chain(frac_digits.chars())
            .all(|c| c.is_ascii_digit())
        {
            return Err(Self::invalid(literal, "unexpected character"));
        }
        if significand.ends_with('.') {
            return Err(Self::invalid(literal, "missing fraction digits"));
        }

        let written_scale = u8::try_from(frac_digits.len())
            .map_err(|_| Self::invalid(literal, "too many fraction digits"))?;
        let mantissa: u64 = format!("{int_digits}{frac_digits}")
            .parse()
            .map_err(|_| Self::invalid(literal, "value out of range"))?;

        let fraction_digits = written_scale.saturating_sub(exponent);
        if fraction_digits > MAX_SAMPLE_FRACTION_DIGITS {
            return Err(Self::invalid(literal, "too many fraction digits"));
        }
        let scaled = mantissa
            .checked_mul(pow10(exponent.saturating_sub(written_scale)))
            .ok_or_else(|| Self::invalid(literal, "value out of range"))?;

        Ok(Self {
            scaled,
            fraction_digits,
            exponent,
        })
    }
}

impl Ord for NumericSample {
    fn cmp(&self, other: &Self) -> Ordering {
        let scale = self.fraction_digits.max(other.fraction_digits);
        let lhs = u128::from(self.scaled) * pow10_wide(scale - self.fraction_digits);
        let rhs = u128::from(other.scaled) * pow10_wide(scale - other.fraction_digits);
        lhs.cmp(&rhs)
            .then(self.fraction_digits.cmp(&other.fraction_digits))
            .then(self.exponent.cmp(&other.exponent))
    }
}

impl PartialOrd for NumericSample {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Display for NumericSample {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.has_exponent() {
            f.write_str(&self.to_exponent_string())
        } else {
            f.write_str(&self.to_plain_string())
        }
    }
}
