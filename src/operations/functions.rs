//! This module contains the implementation of the power functions.

use super::GUARD_BITS;
use crate::error::{Error, Result};
use crate::float::{Float, RoundingMode};

impl Float {
    /// Assign `z` raised to the power of `w` to `self`, at the precision of
    /// `self`, or the larger precision of `z` and `w` if it is unset.
    ///
    /// A negative base is a domain error. pow(z, 0) is 1, pow(z, 1) is z,
    /// and pow(+inf, w) is +inf. All other values are computed as
    /// exp(w * log(z)).
    pub fn set_pow(&mut self, z: &Self, w: &Self) -> Result<&mut Self> {
        if z.is_nan() || w.is_nan() {
            return Err(Error::domain("Pow: argument is NaN"));
        }
        if z.get_sign() {
            return Err(Error::domain("Pow: negative base"));
        }

        let widest = z.get_precision().max(w.get_precision());
        let prec = self.target_precision(widest);
        if w.is_zero() {
            return Ok(self.assign_rounded(&Self::one(prec, false), prec));
        }
        if z.is_inf() || *w == Self::one(w.get_precision(), false) {
            return Ok(self.assign_rounded(z, prec));
        }

        // Square-and-multiply (`powi`) is not used for integral exponents,
        // because it rounds differently than the exp/log path.
        let work = prec + GUARD_BITS;
        let log_prec = work.max(z.get_precision() + GUARD_BITS);
        let mut log = Self::zero(log_prec, false);
        log.set_log(z)?;
        let arg = log.checked_mul(w)?;

        let mut res = Self::zero(work, false);
        res.set_exp(&arg)?;
        Ok(self.assign_rounded(&res, prec))
    }

    /// Returns the number raised to the power of `w`, see `set_pow`.
    pub fn pow(&self, w: &Self) -> Result<Self> {
        let mut res = Self::new();
        res.set_pow(self, w)?;
        Ok(res)
    }

    /// Return this number raised to the integer power of 'n', at the
    /// precision and with the rounding mode of this number.
    pub fn powi(&self, mut n: u64) -> Self {
        use RoundingMode::NearestTiesToEven as rm;

        let prec = self.get_precision();
        let work = prec + GUARD_BITS;
        let mut elem = Self::one(work, false);
        // Each bit in 'n' represents a power-of-two exponent, like 1,2,4,8.
        // These powers are generated by squaring, and the powers that match
        // the set bits of 'n' are multiplied into the result.
        let mut val = self.round_to(work, rm);
        while n > 0 {
            if n & 1 == 1 {
                elem = Self::mul_with_rm(&elem, &val, rm);
            }
            val = Self::mul_with_rm(&val, &val, rm);
            n >>= 1;
        }
        elem.round_to(prec, self.get_rounding_mode())
    }
}

#[test]
fn test_pow_identities() {
    use super::test_utils::is_close;

    for prec in [53, 100, 256] {
        let zero = Float::zero(prec, false);
        let one = Float::one(prec, false);
        for z in [0.5, 2., 3.75, 1e10, 1e-10] {
            let z = Float::from_f64(z).with_precision(prec);
            assert_eq!(z.pow(&zero).unwrap(), one);
            assert_eq!(z.pow(&one).unwrap(), z);
        }

        // 2^0.5 is the square root of two.
        let two = Float::from_u64(prec, 2);
        let half = one.scale(-1);
        assert!(is_close(&two.pow(&half).unwrap(), &two.sqrt(), prec, 2));

        // Integral powers.
        let three = Float::from_u64(prec, 3);
        let nine = Float::from_u64(prec, 9);
        assert!(is_close(&three.pow(&two).unwrap(), &nine, prec, 2));
        let ten = Float::from_u64(prec, 10);
        let thousand = Float::from_u64(prec, 1000);
        assert!(is_close(&ten.pow(&three).unwrap(), &thousand, prec, 2));
        let rm = RoundingMode::NearestTiesToEven;
        let thousandth = Float::div_with_rm(&one, &thousand, rm);
        let res = ten.pow(&three.neg()).unwrap();
        assert!(is_close(&res, &thousandth, prec, 2));
    }
}

#[test]
fn test_pow_special_values() {
    let two = Float::from_f64(2.);
    let neg_two = Float::from_f64(-2.);
    let inf = Float::inf(53, false);
    let zero = Float::zero(53, false);

    assert_eq!(inf.pow(&two).unwrap(), inf);
    assert_eq!(inf.pow(&neg_two).unwrap(), inf);
    assert!(zero.pow(&two).unwrap().is_zero());
    assert!(zero.pow(&neg_two).unwrap().is_inf());

    let err = neg_two.pow(&two).unwrap_err();
    assert_eq!(err.to_string(), "Pow: negative base");
    assert!(err.is_invalid_result());
    assert!(Float::zero(53, true).pow(&two).is_err());
    assert!(two.pow(&Float::nan(53, false)).is_err());

    // The precision is the larger of the two inputs.
    let w = Float::from_f64(0.5).with_precision(120);
    assert_eq!(two.pow(&w).unwrap().get_precision(), 120);
    let mut dst = Float::zero(30, false);
    dst.set_pow(&two, &w).unwrap();
    assert_eq!(dst.get_precision(), 30);
}

#[test]
fn test_powi() {
    assert_eq!(Float::from_f64(3.).powi(5).as_f64(), 243.);
    assert_eq!(Float::from_f64(1.5).powi(10).as_f64(), 57.6650390625);
    assert_eq!(Float::from_f64(-2.).powi(3).as_f64(), -8.);
    assert_eq!(Float::from_f64(0.1).powi(0).as_f64(), 1.);
    assert_eq!(Float::from_f64(2.).powi(2000).get_exp(), 2001);

    for x in [0.1, 1.01, 7.5] {
        let lhs = Float::from_f64(x).with_precision(128).powi(7).as_f64();
        let rhs = x.powi(7);
        assert!(((lhs - rhs) / rhs).abs() < 1e-15);
    }
}
