//! This module contains the implementation of string conversion.

use super::bigint::{BigInt, LossFraction};
use super::float::{Category, Float, RoundingMode};
use core::fmt::Display;
use thiserror::Error;

/// Decimal exponents beyond this magnitude are rejected by the parser, and
/// binary exponents beyond it are printed in the `mantissa p exp` form.
const MAX_DECIMAL_EXP: u64 = 100_000;

impl Float {
    /// Convert the number into a large integer, and the number of decimal
    /// digits after the point.
    fn convert_to_integer(&self) -> (BigInt, u64) {
        // The value is mmmmm * 2^lsb. Negative exponents use the method:
        // mmmmm * 2^(-e) == mmmmm * 5^e * 10^(-e).
        let lsb = self.lsb_exp();
        let mut mantissa = self.get_mantissa();
        if lsb < 0 {
            let e = lsb.unsigned_abs();
            mantissa.inplace_mul(&BigInt::from_u64(5).powi(e));
            (mantissa, e)
        } else {
            mantissa.shift_left(lsb as usize);
            (mantissa, 0)
        }
    }

    /// Returns the highest number of decimal digits that are needed for
    /// representing this type accurately.
    pub fn get_decimal_accuracy(&self) -> usize {
        // Matula, David W. “A Formalization of Floating-Point Numeric Base
        // N = 2 + floor(n / log_b(B)) = 2 + floor(n / log(10, 2))
        // We convert from bits to base-10 digits: log(2)/log(10) ==> 59/196.
        // A continuous fraction of 5 iteration gives the ratio.
        2 + (self.get_precision() * 59) / 196
    }

    fn convert_normal_to_string(&self) -> String {
        if self.lsb_exp().unsigned_abs() > MAX_DECIMAL_EXP {
            let m = self.get_mantissa().as_decimal();
            return format!("{}p{}", m, self.lsb_exp());
        }

        let (mut integer, mut e) = self.convert_to_integer();

        // Round away the digits past the accuracy of the type, but only from
        // the fraction.
        let digits = integer.as_decimal().len();
        let budget = self.get_decimal_accuracy();
        if digits > budget {
            let cut = ((digits - budget) as u64).min(e);
            let divisor = BigInt::from_u64(10).powi(cut);
            let rem = integer.inplace_div(&divisor);
            if LossFraction::from_remainder(&rem, &divisor).is_gte_half() {
                integer.inplace_add(&BigInt::one());
            }
            e -= cut;
        }

        let mut buff: Vec<char> = integer.as_decimal().chars().collect();
        let e = e as usize;
        while buff.len() <= e {
            buff.insert(0, '0');
        }
        if e > 0 {
            buff.insert(buff.len() - e, '.');
            while buff.last() == Some(&'0') {
                buff.pop();
            }
            if buff.last() == Some(&'.') {
                buff.pop();
            }
        }
        String::from_iter(buff)
    }

    /// Convert the number to a string. This is a simple implementation
    /// that rounds the decimal expansion to the number of digits that the
    /// precision can represent. It does not look for the shortest string that
    /// parses back to the same value. For that check out the paper:
    /// "How to Print Floating-Point Numbers Accurately" by Steele and White.
    fn convert_to_string(&self) -> String {
        let sign = if self.get_sign() { "-" } else { "" };
        let body = match self.get_category() {
            Category::Infinity => "Inf".to_string(),
            Category::NaN => return "NaN".to_string(),
            Category::Normal => self.convert_normal_to_string(),
            Category::Zero => "0".to_string(),
        };
        format!("{}{}", sign, body)
    }
}

impl Display for Float {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{}", self.convert_to_string())
    }
}

impl Display for BigInt {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{}", self.as_decimal())
    }
}

/// The ways in which parsing a decimal string can fail.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ParseError {
    #[error("the input provided was empty")]
    InputEmpty,
    #[error("failed parsing number part of floating point number")]
    ParsingNumberFailed,
    #[error("failed parsing exponent of float number")]
    ExponentParseFailed,
    #[error("the decimal exponent is out of range")]
    ExponentOutOfRange,
}

impl Float {
    /// Parse the decimal string `value` into a float with `prec` bits,
    /// rounding to nearest-even. A zero precision means 64 bits.
    /// The accepted syntax is `[+-]digits[.digits][(e|E)[+-]digits]`, and
    /// the words `inf`, `infinity` and `nan` in any case.
    ///
    /// ```
    ///    use bigfloat::Float;
    ///
    ///    let x = Float::parse("0.1", 53).unwrap();
    ///    assert_eq!(x.as_f64(), 0.1);
    /// ```
    pub fn parse(value: &str, prec: usize) -> Result<Self, ParseError> {
        Self::parse_with_rm(value, prec, RoundingMode::NearestTiesToEven)
    }

    /// Parse the decimal string `value`, correctly rounded to `prec` bits
    /// with the rounding mode `rm`. The result carries `rm`.
    pub fn parse_with_rm(
        value: &str,
        prec: usize,
        rm: RoundingMode,
    ) -> Result<Self, ParseError> {
        let prec = if prec == 0 { 64 } else { prec };

        // Handle the empty case.
        if value.is_empty() {
            return Err(ParseError::InputEmpty);
        }

        // Handle the plus or minus in front of the number.
        let (sign, value) = match value.as_bytes()[0] {
            b'-' => (true, &value[1..]),
            b'+' => (false, &value[1..]),
            _ => (false, value),
        };

        if value.eq_ignore_ascii_case("nan") {
            return Ok(Self::nan(prec, sign).with_rounding_mode(rm));
        }
        if value.eq_ignore_ascii_case("inf")
            || value.eq_ignore_ascii_case("infinity")
        {
            return Ok(Self::inf(prec, sign).with_rounding_mode(rm));
        }

        // Split the number to the digits and the exponent.
        let (digits, exp) = match value.find(['e', 'E']) {
            Some(idx) => {
                let exp = value[idx + 1..]
                    .parse::<i64>()
                    .map_err(|_| ParseError::ExponentParseFailed)?;
                (&value[..idx], exp)
            }
            None => (value, 0),
        };

        let (int_part, frac_part) = digits.split_once('.').unwrap_or((digits, ""));
        if int_part.is_empty() && frac_part.is_empty() {
            return Err(ParseError::ParsingNumberFailed);
        }

        let mut num = BigInt::zero();
        for part in [int_part, frac_part] {
            parse_big_int(part, &mut num)?;
        }

        if num.is_zero() {
            return Ok(Self::zero(prec, sign).with_rounding_mode(rm));
        }

        let e10 = exp
            .checked_sub(frac_part.len() as i64)
            .filter(|e| e.unsigned_abs() <= MAX_DECIMAL_EXP)
            .ok_or(ParseError::ExponentOutOfRange)?;

        Ok(Self::from_decimal(prec, rm, sign, num, e10))
    }

    /// Returns `num * 10^e10`, correctly rounded.
    fn from_decimal(
        prec: usize,
        rm: RoundingMode,
        sign: bool,
        num: BigInt,
        e10: i64,
    ) -> Self {
        let pow10 = BigInt::from_u64(10).powi(e10.unsigned_abs());
        if e10 >= 0 {
            let num = num * pow10;
            return Self::from_parts(
                prec,
                rm,
                sign,
                0,
                num,
                LossFraction::ExactlyZero,
            );
        }

        // Scale the numerator so that the quotient has at least prec+1 bits.
        let num_bits = num.msb_index() as i64;
        let den_bits = pow10.msb_index() as i64;
        let shift = (prec as i64 + den_bits - num_bits + 1).max(0) as usize;
        let mut q = num;
        q.shift_left(shift);
        let rem = q.inplace_div(&pow10);
        let loss = LossFraction::from_remainder(&rem, &pow10);
        Self::from_parts(prec, rm, sign, -(shift as i64), q, loss)
    }
}

impl TryFrom<&str> for Float {
    type Error = ParseError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Self::parse(value, 0)
    }
}

/// Accumulate the decimal digits of `value` into `num`.
fn parse_big_int(value: &str, num: &mut BigInt) -> Result<(), ParseError> {
    for digit in value.bytes() {
        if !digit.is_ascii_digit() {
            return Err(ParseError::ParsingNumberFailed);
        }
        num.inplace_mul_word(10);
        num.inplace_add(&BigInt::from_u64((digit - b'0') as u64));
    }
    Ok(())
}

impl BigInt {
    /// Prints the bigint as a decimal number.
    pub fn as_decimal(&self) -> String {
        if self.is_zero() {
            return "0".to_string();
        }

        // Peel off 19 digits at a time.
        const CHUNK: u64 = 10_000_000_000_000_000_000;
        let mut chunks = Vec::new();
        let mut val = self.clone();
        while !val.is_zero() {
            chunks.push(val.inplace_div_word(CHUNK));
        }

        let mut iter = chunks.iter().rev();
        let mut out = iter.next().map(|c| c.to_string()).unwrap_or_default();
        for c in iter {
            out.push_str(&format!("{:019}", c));
        }
        out
    }
}

#[test]
fn test_bigint_to_decimal() {
    let mut num = BigInt::one();
    for i in 1..41 {
        let term = BigInt::from_u64(i);
        num.inplace_mul(&term);
    }

    assert_eq!(
        num.as_decimal(),
        "815915283247897734345611269596115894272000000000"
    );
    assert_eq!(BigInt::from_u64(10_000_000_000_000_000_000).as_decimal(), "10000000000000000000");
    assert_eq!(BigInt::zero().to_string(), "0");
}

#[test]
fn test_convert_to_string() {
    fn to_str(val: f64) -> String {
        Float::from_f64(val).to_string()
    }

    assert_eq!("-0", to_str(-0.0));
    assert_eq!("0", to_str(0.0));
    assert_eq!("0.1", to_str(0.1));
    assert_eq!("12", to_str(12.));
    assert_eq!("-0.25", to_str(-0.25));
    assert_eq!("3.1415926535897931", to_str(std::f64::consts::PI));
    assert_eq!("1024", to_str(1024.));
    assert_eq!("Inf", to_str(f64::INFINITY));
    assert_eq!("-Inf", to_str(f64::NEG_INFINITY));
    assert_eq!("NaN", to_str(f64::NAN));

    assert_eq!(Float::zero(24, false).get_decimal_accuracy(), 9);
    assert_eq!(Float::zero(53, false).get_decimal_accuracy(), 17);
    assert_eq!(Float::zero(113, false).get_decimal_accuracy(), 36);
}

#[test]
fn test_from_string() {
    let parse = |s: &str| Float::parse(s, 53).unwrap().as_f64();
    assert_eq!(parse("0.1"), 0.1);
    assert_eq!(parse("-2.5e3"), -2500.);
    assert_eq!(parse("+1E-5"), 1e-5);
    assert_eq!(parse("1e+22"), 1e22);
    assert_eq!(parse(".5"), 0.5);
    assert_eq!(parse("7."), 7.);
    assert_eq!(parse("0.000"), 0.);
    assert_eq!(parse("2.2250738585072014e-308"), f64::MIN_POSITIVE);
    assert_eq!(parse("1.7976931348623157e308"), f64::MAX);
    assert_eq!(parse("3.141592653589793238462643383279"), std::f64::consts::PI);
    assert!(parse("-inf").is_infinite());
    assert!(parse("Infinity") > 0.);
    assert!(parse("NaN").is_nan());

    assert_eq!(Float::parse("", 53), Err(ParseError::InputEmpty));
    assert_eq!(Float::parse("1.2.3", 53), Err(ParseError::ParsingNumberFailed));
    assert_eq!(Float::parse("1e", 53), Err(ParseError::ExponentParseFailed));
    assert_eq!(Float::parse(".", 53), Err(ParseError::ParsingNumberFailed));
    assert_eq!(Float::parse("1e999999", 53), Err(ParseError::ExponentOutOfRange));
    assert_eq!(Float::try_from("1.5").unwrap().get_precision(), 64);
}

#[test]
fn test_parse_rounding() {
    // 0.1 is not representable, so the directed modes bracket it.
    let down = Float::parse_with_rm("0.1", 20, RoundingMode::Zero).unwrap();
    let up = Float::parse_with_rm("0.1", 20, RoundingMode::Positive).unwrap();
    let near = Float::parse("0.1", 200).unwrap();
    assert!(down < near && near < up);
    assert_eq!(up.get_rounding_mode(), RoundingMode::Positive);

    // 2^-1 + 2^-30 is exact in 30 bits, and a tie in 29 bits.
    let text = "0.500000000931322574615478515625";
    let exact = Float::parse(text, 30).unwrap();
    let half = Float::one(30, false).scale(-1);
    assert_eq!(exact, &half + &Float::one(30, false).scale(-30));
    assert_eq!(Float::parse(text, 29).unwrap(), half);
    let away = Float::parse_with_rm(text, 29, RoundingMode::NearestTiesToAway);
    assert_eq!(away.unwrap(), &half + &Float::one(30, false).scale(-29));
}

#[test]
fn test_fuzz_printing() {
    use super::utils;

    // Printed doubles must parse back to the same value.
    let mut lfsr = utils::Lfsr::new();
    for _ in 0..500 {
        let v = f64::from_bits(lfsr.get64() & 0x43ff_ffff_ffff_ffff);
        let s = Float::from_f64(v).to_string();
        let back = Float::parse(&s, 53).unwrap().as_f64();
        assert_eq!(back, v, "{}", s);
    }
}
