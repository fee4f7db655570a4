//! This module contains the implementation of log- and exp-related methods.

use super::constants::pi_cache;
use super::newton::newton;
use super::GUARD_BITS;
use crate::error::{Error, Result};
use crate::float::{Category, Float, RoundingMode, MAX_EXP, MIN_EXP};
use core::cmp::Ordering;
use log::trace;

impl Float {
    /// Computes the natural logarithm of the positive normal number `z` with
    /// `prec` bits, using the AGM identity:
    ///
    ///   log(x) = pi / (2 * AGM(1, 4/x))   for x >= 2^(p/2)
    ///
    /// See "Fast Multiple-Precision Evaluation of Elementary Functions" by
    /// Richard P. Brent. The argument is raised to 2^k until it is large
    /// enough, and the result is divided by 2^k.
    fn log_normal(z: &Self, prec: usize) -> Result<Self> {
        use RoundingMode::NearestTiesToEven as rm;

        let one = Self::one(z.get_precision(), false);
        let invert = match z.partial_cmp(&one) {
            Some(Ordering::Greater) => false,
            Some(Ordering::Less) => true,
            Some(Ordering::Equal) => return Ok(Self::zero(prec, false)),
            None => unreachable!("log: a positive number is ordered against 1"),
        };

        // Near 1 the result is tiny and the squaring below cancels bits, so
        // we need to carry the bits of z - 1 in addition to the guard bits.
        let near_one = Self::sub_with_rm(z, &one, rm);
        let extra = (-near_one.get_exp()).max(0) as usize;
        let work = prec + GUARD_BITS + extra;

        // log(z) = -log(1/z) for z < 1.
        let mut x = if invert {
            Self::div_prec(&Self::one(work, false), z, work, rm)
        } else {
            z.round_to(work, rm)
        };

        let lim = Self::one(work, false).scale(work as i64 / 2 + 1);
        let mut k = 0;
        while x < lim {
            x = Self::mul_prec(&x, &x, work, rm);
            k += 1;
        }
        trace!("log: squared the argument {} times at {} bits", k, work);

        let ratio = Self::div_prec(&Self::from_u64(work, 4), &x, work, rm);
        let mut agm = Self::zero(work, false);
        agm.set_agm(&Self::one(work, false), &ratio)?;

        let pi = pi_cache().get(work);
        let res = Self::div_prec(&pi, &agm.scale(1), work, rm).scale(-k);
        Ok(if invert { res.neg() } else { res })
    }

    /// Assign the natural logarithm of `z` to `self`, at the precision of
    /// `self`, or the precision of `z` if it is unset. The log of a negative
    /// number (including -0) is a domain error. log(+0) is -inf, and
    /// log(+inf) is +inf.
    pub fn set_log(&mut self, z: &Self) -> Result<&mut Self> {
        if z.is_nan() {
            return Err(Error::domain("Log: argument is NaN"));
        }
        if z.get_sign() {
            return Err(Error::domain("Log: argument is negative"));
        }

        let prec = self.target_precision(z.get_precision());
        if z.is_zero() {
            return Ok(self.assign_rounded(&Self::inf(prec, true), prec));
        }
        if z.is_inf() {
            return Ok(self.assign_rounded(z, prec));
        }

        let res = Self::log_normal(z, prec)?;
        Ok(self.assign_rounded(&res, prec))
    }

    /// Returns the natural logarithm of the number, see `set_log`.
    pub fn log(&self) -> Result<Self> {
        let mut res = Self::new();
        res.set_log(self)?;
        Ok(res)
    }

    /// Computes e^z with at least `prec` bits. The native exponential gives
    /// the first 53 bits, and Newton's method refines them. Arguments that
    /// the native exponential can't handle are reduced with the identity:
    ///   e^z = (e^(z/2))^2
    fn exp_normal(z: &Self, prec: usize) -> Result<Self> {
        use RoundingMode::NearestTiesToEven as rm;

        // Decide the overflow and underflow cases before the reduction,
        // because the number of reduction steps grows with the exponent.
        let zf = z.as_f64();
        let ln2 = core::f64::consts::LN_2;
        if zf > (MAX_EXP as f64 + 1.) * ln2 {
            return Ok(Self::overflow(prec, rm, false));
        }
        if zf < (MIN_EXP as f64 - 1.) * ln2 {
            return Ok(Self::zero(prec, false));
        }

        // Subnormal seeds don't carry 53 good bits.
        let seed = zf.exp();
        if seed.is_infinite() || seed < f64::MIN_POSITIVE {
            let half = z.scale(-1);
            trace!("exp: reducing the argument {} at {} bits", zf, prec);
            let e = Self::exp_normal(&half, prec + GUARD_BITS)?;
            return Ok(Self::mul_with_rm(&e, &e, rm));
        }

        // The root of f(t) = log(t) - z is e^z, and the Newton step for it
        // is f(t)/f'(t) = t * (log(t) - z).
        let step = |t: &Self| -> Result<Self> {
            let d = t.log()?.checked_sub(z)?;
            Ok(Self::mul_with_rm(&d, t, rm))
        };
        newton(step, Self::from_f64(seed), prec)
    }

    /// Assign e^z to `self`, at the precision of `self`, or the precision
    /// of `z` if it is unset. exp(-inf) is 0, and exp(+inf) is +inf.
    pub fn set_exp(&mut self, z: &Self) -> Result<&mut Self> {
        let prec = self.target_precision(z.get_precision());
        let res = match z.get_category() {
            Category::NaN => return Err(Error::domain("Exp: argument is NaN")),
            Category::Zero => Self::one(prec, false),
            Category::Infinity if z.get_sign() => Self::zero(prec, false),
            Category::Infinity => Self::inf(prec, false),
            Category::Normal => Self::exp_normal(z, prec)?,
        };
        Ok(self.assign_rounded(&res, prec))
    }

    /// Returns e to the power of the number, see `set_exp`.
    pub fn exp(&self) -> Result<Self> {
        let mut res = Self::new();
        res.set_exp(self)?;
        Ok(res)
    }
}

#[cfg(test)]
const LN_2_DIGITS: &str = "0.693147180559945309417232121458176568075500134360255254120680009493393621969694715605863326996418687542001481021";

#[cfg(test)]
const E_DIGITS: &str = "2.71828182845904523536028747135266249775724709369995957496696762772407663035354759457138217852516642742746639193";

#[test]
fn test_log() {
    let x = Float::from_f64(0.1).with_precision(128).log().unwrap();
    assert_eq!(x.get_precision(), 128);
    assert_eq!(x.as_f64(), -2.3025850929940455);

    for x in [
        0.1, 0.5, 0.999, 1.001, 2.3, 4.5, 9.8, 11.2, 91.2, 1024.2, 90210.2,
        1e-300, 1e300,
    ] {
        let lhs = Float::from_f64(x).with_precision(128).log().unwrap();
        let rhs = x.ln();
        assert!(((lhs.as_f64() - rhs) / rhs).abs() < 1e-15, "log({})", x);
    }
}

#[test]
fn test_log_reference() {
    use super::test_utils::is_close;

    for prec in [53, 100, 200, 300] {
        let two = Float::from_u64(prec, 2);
        let expected = Float::parse(LN_2_DIGITS, prec).unwrap();
        assert!(is_close(&two.log().unwrap(), &expected, prec, 1));

        let half = Float::one(prec, false).scale(-1);
        assert!(is_close(&half.log().unwrap(), &expected.neg(), prec, 1));
    }
}

#[test]
fn test_log_special_values() {
    assert_eq!(Float::one(100, false).log().unwrap(), Float::zero(100, false));

    let l = Float::zero(53, false).log().unwrap();
    assert!(l.is_inf() && l.is_negative());
    let l = Float::inf(53, false).log().unwrap();
    assert!(l.is_inf() && !l.is_negative());

    for bad in [-1., -0., -1e-10, f64::NEG_INFINITY] {
        let err = Float::from_f64(bad).log().unwrap_err();
        assert!(err.is_invalid_result());
        assert_eq!(err.to_string(), "Log: argument is negative");
    }
    assert!(Float::nan(53, false).log().is_err());

    // The destination precision wins.
    let mut dst = Float::zero(20, false);
    dst.set_log(&Float::from_u64(200, 10)).unwrap();
    assert_eq!(dst.get_precision(), 20);
}

#[test]
fn test_log_near_one() {
    // log(1 + 2^-100) = 2^-100 - 2^-201 + ...
    let prec = 100;
    let tiny = Float::one(prec, false).scale(-100);
    let z = Float::add_with_rm(
        &Float::one(300, false),
        &tiny,
        RoundingMode::NearestTiesToEven,
    );
    let mut res = Float::zero(prec, false);
    res.set_log(&z).unwrap();
    let expected = &tiny - &Float::one(prec, false).scale(-201);
    assert!(super::test_utils::is_close(&res, &expected, prec, 1));
}

#[test]
fn test_exp() {
    let x = Float::from_f64(2.51).exp().unwrap();
    assert_eq!(x.as_f64(), 12.30493006051041);

    for x in [
        0.000003, 0.001, 0.12, 0.5, 1.2, 2.3, 4.5, 9.8, 11.2, 25.0, 54., 89.1,
        150., 256., -0.5, -4.5, -89.1,
    ] {
        let lhs = Float::from_f64(x).with_precision(128).exp().unwrap();
        let rhs = x.exp();
        assert!(((lhs.as_f64() - rhs) / rhs).abs() < 1e-15, "exp({})", x);
    }
}

#[test]
fn test_exp_reference() {
    use super::test_utils::is_close;

    for prec in [53, 100, 200, 300] {
        let e = Float::one(prec, false).exp().unwrap();
        let expected = Float::parse(E_DIGITS, prec).unwrap();
        assert_eq!(e.get_precision(), prec);
        assert!(is_close(&e, &expected, prec, 1));
    }
}

#[test]
fn test_exp_special_values() {
    let one = Float::one(53, false);
    assert_eq!(Float::zero(53, true).exp().unwrap(), one);
    assert!(Float::inf(53, true).exp().unwrap().is_zero());
    assert!(Float::inf(53, false).exp().unwrap().is_inf());
    assert!(Float::nan(53, false).exp().is_err());

    // Outside of the native range the argument is reduced.
    let big = Float::from_u64(100, 1000).exp().unwrap();
    assert!(big.is_normal());
    let back = big.log().unwrap();
    let thousand = Float::from_u64(100, 1000);
    assert!(super::test_utils::is_close(&back, &thousand, 100, 2));

    let small = Float::from_i64(100, -1000).exp().unwrap();
    assert!(small.is_normal() && !small.is_negative());
    assert!(small.as_f64() == 0.);

    // Outside of the exponent range.
    assert!(Float::from_f64(1e10).exp().unwrap().is_inf());
    assert!(Float::from_f64(-1e10).exp().unwrap().is_zero());
}

#[test]
fn test_log_exp_round_trip() {
    use super::test_utils::is_close;
    use crate::utils::Lfsr;

    // The inner function is evaluated with extra bits, to keep its rounding
    // error from being amplified by the outer one.
    let mut lfsr = Lfsr::new();
    for prec in [53, 113, 256] {
        for _ in 0..8 {
            let x = Float::from_u64(prec, lfsr.below(1 << 30) + 1).scale(-20);

            let mut inner = Float::zero(prec + 32, false);
            inner.set_log(&x).unwrap();
            let mut y = Float::zero(prec, false);
            y.set_exp(&inner).unwrap();
            assert!(is_close(&y, &x, prec, 2), "exp(log({}))", x);

            inner.set_exp(&x).unwrap();
            y.set_log(&inner).unwrap();
            assert!(is_close(&y, &x, prec, 2), "log(exp({}))", x);
        }
    }
}
