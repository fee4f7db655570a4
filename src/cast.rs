//! Conversions between floats, integers and native doubles, and the
//! precision-changing assignments.

use super::bigint::{BigInt, LossFraction};
use super::float::{Category, Float, RoundingMode, DEFAULT_PRECISION};

impl Float {
    /// Load the integer `val` into a float with `prec` bits. Notice that the
    /// number may be rounded to the nearest even value.
    pub fn from_u64(prec: usize, val: u64) -> Self {
        Self::from_bigint(prec, BigInt::from_u64(val))
    }

    /// Load the integer `val` into a float with `prec` bits.
    pub fn from_i64(prec: usize, val: i64) -> Self {
        let mut a = Self::from_u64(prec, val.unsigned_abs());
        a.set_sign(val < 0);
        a
    }

    /// Load the big integer `val` into a float with `prec` bits.
    pub fn from_bigint(prec: usize, val: BigInt) -> Self {
        Self::from_parts(
            prec,
            RoundingMode::NearestTiesToEven,
            false,
            0,
            val,
            LossFraction::ExactlyZero,
        )
    }

    /// Converts the native double `val` into a float with 53 bits of
    /// precision. The conversion is exact.
    pub fn from_f64(val: f64) -> Self {
        let bits = val.to_bits();
        let sign = (bits >> 63) == 1;
        let biased_exp = ((bits >> 52) & 0x7ff) as i64;
        let frac = bits & ((1u64 << 52) - 1);
        let prec = DEFAULT_PRECISION;

        // Check for NaN/Inf
        if biased_exp == 0x7ff {
            if frac == 0 {
                return Self::inf(prec, sign);
            }
            return Self::nan(prec, sign);
        }

        let (mantissa, lsb_exp) = if biased_exp == 0 {
            if frac == 0 {
                return Self::zero(prec, sign);
            }
            // Subnormal: no implicit bit.
            (frac, -1074)
        } else {
            (frac | (1u64 << 52), biased_exp - 1075)
        };

        Self::from_parts(
            prec,
            RoundingMode::NearestTiesToEven,
            sign,
            lsb_exp,
            BigInt::from_u64(mantissa),
            LossFraction::ExactlyZero,
        )
    }

    /// Assign the native double `val`, rounded into the precision of `self`
    /// (53 bits if the precision is unset).
    pub fn set_f64(&mut self, val: f64) -> &mut Self {
        if self.get_precision() == 0 {
            let rm = self.get_rounding_mode();
            *self = Self::from_f64(val).with_rounding_mode(rm);
            return self;
        }
        self.set(&Self::from_f64(val))
    }

    /// Converts this float to the nearest native double (ties to even).
    /// Values beyond the double range become infinity, and tiny values
    /// become subnormals or zero.
    pub fn as_f64(&self) -> f64 {
        let sign_bit = (self.get_sign() as u64) << 63;
        match self.get_category() {
            Category::NaN => return f64::NAN,
            Category::Infinity | Category::Zero => {
                let v = if self.is_inf() { f64::INFINITY } else { 0. };
                return f64::from_bits(v.to_bits() | sign_bit);
            }
            Category::Normal => {}
        }

        let inf = f64::from_bits(f64::INFINITY.to_bits() | sign_bit);
        let zero = f64::from_bits(sign_bit);

        // The weight of the leading bit.
        let lead = self.get_exp() - 1;
        if lead > 1023 {
            return inf;
        }
        if lead < -1075 {
            return zero;
        }
        if lead == -1075 {
            // Half of the smallest subnormal rounds to the even zero.
            if self.get_mantissa().msb_index() == 1 {
                return zero;
            }
            return f64::from_bits(1 | sign_bit);
        }

        // The number of significand bits that the double can hold here.
        let bits = if lead >= -1022 { 53 } else { (lead + 1075) as usize };
        let r = self.round_to(bits, RoundingMode::NearestTiesToEven);
        let lead = r.get_exp() - 1;
        if lead > 1023 {
            return inf;
        }

        let m = r.get_mantissa();
        let m_bits = m.msb_index();
        let lsb = r.lsb_exp();

        if lead >= -1022 {
            let mut full = m.as_u64();
            full <<= 53 - m_bits;
            let frac = full & ((1u64 << 52) - 1);
            let biased = (lead + 1023) as u64;
            return f64::from_bits(sign_bit | (biased << 52) | frac);
        }

        // Subnormal: the value is frac * 2^-1074.
        let frac = m.as_u64() << (lsb + 1074) as u64;
        f64::from_bits(sign_bit | frac)
    }
}

impl Float {
    /// Go-style assignment. If the precision of `self` is unset it takes the
    /// precision of `x`, otherwise `x` is rounded into the precision of `self`
    /// using the rounding mode of `self`. The rounding mode of `self` is kept.
    pub fn set(&mut self, x: &Self) -> &mut Self {
        let prec = match self.get_precision() {
            0 => x.get_precision(),
            p => p,
        };
        *self = x.round_to(prec, self.get_rounding_mode());
        self
    }

    /// Change the precision of the float, rounding the value with the
    /// rounding mode of the float. A precision of zero turns finite values
    /// into a signed zero.
    pub fn set_precision(&mut self, prec: usize) -> &mut Self {
        *self = self.round_to(prec, self.get_rounding_mode());
        self
    }

    /// Returns a copy of this float rounded to `prec` bits.
    pub fn with_precision(&self, prec: usize) -> Self {
        self.round_to(prec, self.get_rounding_mode())
    }

    /// Returns true if the number is an integer. Infinity and NaN are not
    /// integers.
    pub fn is_int(&self) -> bool {
        match self.get_category() {
            Category::Zero => true,
            Category::Normal => self.lsb_exp() >= 0,
            _ => false,
        }
    }

    /// Split the number into a mantissa and an exponent, such that
    /// `self = mant * 2^exp` and `0.5 <= |mant| < 1`. Zeros and infinities
    /// return themselves and a zero exponent.
    pub fn mant_exp(&self) -> (Self, i64) {
        if !self.is_normal() {
            return (self.clone(), 0);
        }
        let exp = self.get_exp();
        (self.scale(-exp), exp)
    }

    /// Assign `mant * 2^exp` to `self`, rounded like `set`.
    pub fn set_mant_exp(&mut self, mant: &Self, exp: i64) -> &mut Self {
        self.set(mant);
        *self = self.scale(exp);
        self
    }
}

#[test]
fn test_from_integers() {
    assert_eq!(Float::from_u64(64, 1 << 40).as_f64(), (1u64 << 40) as f64);
    assert_eq!(Float::from_i64(64, -17).as_f64(), -17.);
    assert_eq!(Float::from_i64(64, i64::MIN).as_f64(), i64::MIN as f64);
    // 1001 with three bits is a tie, that goes to the even 1000.
    assert_eq!(Float::from_u64(3, 9).as_f64(), 8.);
    assert_eq!(Float::from_u64(3, 11).as_f64(), 12.);
    assert!(Float::from_u64(0, 11).is_zero());
}

#[test]
fn test_f64_round_trip() {
    use super::utils;

    for v in utils::get_special_test_values() {
        let f = Float::from_f64(v);
        let back = f.as_f64();
        if v.is_nan() {
            assert!(back.is_nan());
            continue;
        }
        assert_eq!(back.to_bits(), v.to_bits(), "{}", v);
    }

    let mut lfsr = utils::Lfsr::new();
    for _ in 0..5000 {
        let v = f64::from_bits(lfsr.get64());
        if v.is_nan() {
            continue;
        }
        assert_eq!(Float::from_f64(v).as_f64().to_bits(), v.to_bits());
    }
}

#[test]
fn test_as_f64_rounding() {
    // 1 + 2^-53 is a tie, and rounds to 1.
    let one = Float::one(100, false);
    let x = &one + &Float::one(100, false).scale(-53);
    assert_eq!(x.as_f64(), 1.);
    // 1 + 2^-53 + 2^-80 is above the tie.
    let x = &x + &Float::one(100, false).scale(-80);
    assert_eq!(x.as_f64(), 1. + f64::EPSILON);

    // Subnormals and the underflow boundary.
    let tiny = Float::one(100, false).scale(-1074);
    assert_eq!(tiny.as_f64(), 5e-324);
    assert_eq!(tiny.scale(-1).as_f64(), 0.);
    let above_half = &tiny.scale(-1) + &Float::one(100, false).scale(-1090);
    assert_eq!(above_half.as_f64(), 5e-324);

    // Overflow.
    assert_eq!(Float::one(10, true).scale(1024).as_f64(), f64::NEG_INFINITY);
    let max = Float::from_f64(f64::MAX);
    let just_above = &max.with_precision(100)
        + &Float::one(100, false).scale(1023 - 53);
    assert_eq!(just_above.as_f64(), f64::INFINITY);
}

#[test]
fn test_set_and_precision() {
    let third = Float::div_with_rm(
        &Float::one(200, false),
        &Float::from_u64(200, 3),
        RoundingMode::NearestTiesToEven,
    );

    let mut down = Float::zero(10, false).with_rounding_mode(RoundingMode::Zero);
    down.set(&third);
    let mut up =
        Float::zero(10, false).with_rounding_mode(RoundingMode::Positive);
    up.set(&third);
    assert!(down < third && third < up);
    assert_eq!(down.get_precision(), 10);
    assert_eq!(up.get_rounding_mode(), RoundingMode::Positive);

    let mut unset = Float::new();
    unset.set(&third);
    assert_eq!(unset, third);
    assert_eq!(unset.get_precision(), 200);

    let mut f = Float::new();
    f.set_f64(0.1);
    assert_eq!(f.get_precision(), 53);
    assert_eq!(f.as_f64(), 0.1);
}

#[test]
fn test_mant_exp() {
    let x = Float::from_f64(12.);
    let (mant, exp) = x.mant_exp();
    assert_eq!(mant.as_f64(), 0.75);
    assert_eq!(exp, 4);

    let mut y = Float::new();
    y.set_mant_exp(&mant, exp);
    assert_eq!(y, x);

    let (m, e) = Float::inf(10, true).mant_exp();
    assert!(m.is_inf() && e == 0);

    assert!(Float::from_f64(3.).is_int());
    assert!(Float::from_f64(-1024.).is_int());
    assert!(!Float::from_f64(3.5).is_int());
    assert!(Float::zero(0, true).is_int());
    assert!(!Float::inf(53, false).is_int());
}
