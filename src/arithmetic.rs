//! Basic arithmetic on floats: add, sub, mul, div and sqrt.

use super::bigint::{BigInt, LossFraction};
use super::error::InvalidResult;
use super::float::{Category, Float, RoundingMode};
use core::ops::{
    Add, AddAssign, Div, DivAssign, Mul, MulAssign, Neg, Sub, SubAssign,
};

impl Float {
    /// An inner function that performs the addition and subtraction of normal
    /// numbers (no NaN, Inf, Zeros).
    /// See Pg 247.  Chapter 8. Algorithms for the Five Basic Operations.
    /// The operands are aligned exactly, unless one of them is too small to
    /// change anything but the rounding direction.
    fn add_or_sub_normals(
        a: &Self,
        b: &Self,
        subtract: bool,
        prec: usize,
        rm: RoundingMode,
    ) -> Self {
        let b_sign = b.get_sign() ^ subtract;
        let (hi, hi_sign, lo, lo_sign) = if a.get_exp() >= b.get_exp() {
            (a, a.get_sign(), b, b_sign)
        } else {
            (b, b_sign, a, a.get_sign())
        };

        let hi_lsb = hi.lsb_exp();
        let lo_lsb = lo.lsb_exp();

        // Widen the big operand to prec+3 bits. If the small operand lies
        // entirely below half of the last bit, it only acts as a sticky bit.
        let hi_bits = hi.get_mantissa().msb_index();
        let ext = hi_bits.max(prec) + 3 - hi_bits;
        let sticky_lsb = hi_lsb - ext as i64;
        if lo.get_exp() < sticky_lsb {
            let mut m = hi.get_mantissa();
            m.shift_left(ext);
            if hi_sign == lo_sign {
                return Self::from_parts(
                    prec,
                    rm,
                    hi_sign,
                    sticky_lsb,
                    m,
                    LossFraction::LessThanHalf,
                );
            }
            let _ = m.inplace_sub(&BigInt::one());
            return Self::from_parts(
                prec,
                rm,
                hi_sign,
                sticky_lsb,
                m,
                LossFraction::MoreThanHalf,
            );
        }

        // Align the input numbers on the same exponent.
        let lsb = hi_lsb.min(lo_lsb);
        let mut hi_m = hi.get_mantissa();
        hi_m.shift_left((hi_lsb - lsb) as usize);
        let mut lo_m = lo.get_mantissa();
        lo_m.shift_left((lo_lsb - lsb) as usize);

        if hi_sign == lo_sign {
            hi_m.inplace_add(&lo_m);
            return Self::from_parts(
                prec,
                rm,
                hi_sign,
                lsb,
                hi_m,
                LossFraction::ExactlyZero,
            );
        }

        let (m, sign) = if hi_m >= lo_m {
            (hi_m - &lo_m, hi_sign)
        } else {
            (lo_m - &hi_m, lo_sign)
        };

        // x - x is +0, except when rounding towards negative.
        if m.is_zero() {
            let sign = rm == RoundingMode::Negative;
            return Self::zero(prec, sign).with_rounding_mode(rm);
        }
        Self::from_parts(prec, rm, sign, lsb, m, LossFraction::ExactlyZero)
    }

    pub(crate) fn add_sub(
        a: &Self,
        b: &Self,
        subtract: bool,
        prec: usize,
        rm: RoundingMode,
    ) -> Self {
        let b_sign = b.get_sign() ^ subtract;

        // Table 8.2: Specification of addition for positive floating-point
        // data. Pg 247.
        match (a.get_category(), b.get_category()) {
            (Category::NaN, _) | (_, Category::NaN) => Self::nan(prec, false),

            (Category::Infinity, Category::Infinity) => {
                if a.get_sign() != b_sign {
                    return Self::nan(prec, false);
                }
                Self::inf(prec, b_sign)
            }

            (Category::Infinity, _) => Self::inf(prec, a.get_sign()),
            (_, Category::Infinity) => Self::inf(prec, b_sign),

            (Category::Zero, Category::Zero) => {
                let sign = if a.get_sign() == b_sign {
                    b_sign
                } else {
                    rm == RoundingMode::Negative
                };
                Self::zero(prec, sign)
            }

            (Category::Normal, Category::Zero) => a.round_to(prec, rm),
            (Category::Zero, Category::Normal) => {
                let mut x = b.clone();
                x.set_sign(b_sign);
                x.round_to(prec, rm)
            }

            (Category::Normal, Category::Normal) => {
                Self::add_or_sub_normals(a, b, subtract, prec, rm)
            }
        }
        .with_rounding_mode(rm)
    }

    /// Computes a+b using the rounding mode `rm`. The result has the larger
    /// of the two precisions.
    pub fn add_with_rm(a: &Self, b: &Self, rm: RoundingMode) -> Self {
        let prec = a.get_precision().max(b.get_precision());
        Self::add_sub(a, b, false, prec, rm)
    }

    /// Computes a-b using the rounding mode `rm`. The result has the larger
    /// of the two precisions.
    pub fn sub_with_rm(a: &Self, b: &Self, rm: RoundingMode) -> Self {
        let prec = a.get_precision().max(b.get_precision());
        Self::add_sub(a, b, true, prec, rm)
    }
}

impl Float {
    pub(crate) fn mul_prec(
        a: &Self,
        b: &Self,
        prec: usize,
        rm: RoundingMode,
    ) -> Self {
        let sign = a.get_sign() ^ b.get_sign();

        // Table 8.4: Specification of multiplication for floating-point data
        // of positive sign. Page 251.
        match (a.get_category(), b.get_category()) {
            (Category::NaN, _) | (_, Category::NaN) => Self::nan(prec, false),
            (Category::Zero, Category::Infinity)
            | (Category::Infinity, Category::Zero) => Self::nan(prec, false),
            (Category::Infinity, _) | (_, Category::Infinity) => {
                Self::inf(prec, sign)
            }
            (Category::Zero, _) | (_, Category::Zero) => Self::zero(prec, sign),
            (Category::Normal, Category::Normal) => {
                let m = &a.get_mantissa() * &b.get_mantissa();
                let lsb = a.lsb_exp() + b.lsb_exp();
                Self::from_parts(prec, rm, sign, lsb, m, LossFraction::ExactlyZero)
            }
        }
        .with_rounding_mode(rm)
    }

    /// Computes a*b using the rounding mode `rm`. The result has the larger
    /// of the two precisions.
    pub fn mul_with_rm(a: &Self, b: &Self, rm: RoundingMode) -> Self {
        let prec = a.get_precision().max(b.get_precision());
        Self::mul_prec(a, b, prec, rm)
    }
}

impl Float {
    pub(crate) fn div_prec(
        a: &Self,
        b: &Self,
        prec: usize,
        rm: RoundingMode,
    ) -> Self {
        let sign = a.get_sign() ^ b.get_sign();

        // Table 8.5: Special values for x/y - Page 263.
        match (a.get_category(), b.get_category()) {
            (Category::NaN, _) | (_, Category::NaN) => Self::nan(prec, false),
            (Category::Zero, Category::Zero)
            | (Category::Infinity, Category::Infinity) => Self::nan(prec, false),
            (Category::Infinity, _) | (_, Category::Zero) => {
                Self::inf(prec, sign)
            }
            (_, Category::Infinity) | (Category::Zero, _) => {
                Self::zero(prec, sign)
            }
            (Category::Normal, Category::Normal) => {
                Self::div_normals(a, b, prec, rm)
            }
        }
        .with_rounding_mode(rm)
    }

    fn div_normals(a: &Self, b: &Self, prec: usize, rm: RoundingMode) -> Self {
        let sign = a.get_sign() ^ b.get_sign();
        let mut a_m = a.get_mantissa();
        let b_m = b.get_mantissa();
        let a_bits = a_m.msb_index() as i64;
        let b_bits = b_m.msb_index() as i64;

        // Shift the dividend so that the quotient has at least prec+1 bits.
        let shift = (prec as i64 + b_bits - a_bits + 1).max(0) as usize;
        a_m.shift_left(shift);

        let rem = a_m.inplace_div(&b_m);
        let loss = LossFraction::from_remainder(&rem, &b_m);
        let lsb = a.lsb_exp() - b.lsb_exp() - shift as i64;
        Self::from_parts(prec, rm, sign, lsb, a_m, loss)
    }

    /// Computes a/b using the rounding mode `rm`. The result has the larger
    /// of the two precisions.
    pub fn div_with_rm(a: &Self, b: &Self, rm: RoundingMode) -> Self {
        let prec = a.get_precision().max(b.get_precision());
        Self::div_prec(a, b, prec, rm)
    }
}

impl Float {
    pub(crate) fn sqrt_prec(&self, prec: usize, rm: RoundingMode) -> Self {
        match self.get_category() {
            Category::NaN => Self::nan(prec, false),
            // sqrt(-0) is -0.
            Category::Zero => Self::zero(prec, self.get_sign()),
            _ if self.get_sign() => Self::nan(prec, false),
            Category::Infinity => Self::inf(prec, false),
            Category::Normal => {
                let m = self.get_mantissa();
                let lsb = self.lsb_exp();

                // Make room for prec+1 bits in the root, and make the
                // exponent even.
                let bits = m.msb_index() as i64;
                let mut shift = (2 * prec as i64 + 2 - bits).max(0);
                if (lsb - shift) % 2 != 0 {
                    shift += 1;
                }
                let mut m = m;
                m.shift_left(shift as usize);
                let (root, rem) = m.sqrt_rem();

                // The remainder is below 2*root+1, so comparing it to the
                // root tells on which side of the half the fraction lies.
                let loss = if rem.is_zero() {
                    LossFraction::ExactlyZero
                } else if rem > root {
                    LossFraction::MoreThanHalf
                } else {
                    LossFraction::LessThanHalf
                };
                let lsb = (lsb - shift) / 2;
                Self::from_parts(prec, rm, false, lsb, root, loss)
            }
        }
        .with_rounding_mode(rm)
    }

    /// Returns the square root of the number, at the precision and with the
    /// rounding mode of `self`.
    pub fn sqrt(&self) -> Self {
        self.sqrt_prec(self.get_precision(), self.get_rounding_mode())
    }

    /// Multiply the number by `2^k`. This is exact, unless the exponent
    /// leaves the legal range.
    pub fn scale(&self, k: i64) -> Self {
        if !self.is_normal() {
            return self.clone();
        }
        Self::from_parts(
            self.get_precision(),
            self.get_rounding_mode(),
            self.get_sign(),
            self.lsb_exp().saturating_add(k),
            self.get_mantissa(),
            LossFraction::ExactlyZero,
        )
    }
}

fn check(x: Float) -> Result<Float, InvalidResult> {
    if x.is_nan() {
        return Err(InvalidResult);
    }
    Ok(x)
}

impl Float {
    /// Computes self+rhs, and reports invalid results (like inf-inf).
    pub fn checked_add(&self, rhs: &Self) -> Result<Self, InvalidResult> {
        check(Self::add_with_rm(self, rhs, self.get_rounding_mode()))
    }

    /// Computes self-rhs, and reports invalid results (like inf-inf).
    pub fn checked_sub(&self, rhs: &Self) -> Result<Self, InvalidResult> {
        check(Self::sub_with_rm(self, rhs, self.get_rounding_mode()))
    }

    /// Computes self*rhs, and reports invalid results (like 0*inf).
    pub fn checked_mul(&self, rhs: &Self) -> Result<Self, InvalidResult> {
        check(Self::mul_with_rm(self, rhs, self.get_rounding_mode()))
    }

    /// Computes self/rhs, and reports invalid results (like 0/0).
    pub fn checked_div(&self, rhs: &Self) -> Result<Self, InvalidResult> {
        check(Self::div_with_rm(self, rhs, self.get_rounding_mode()))
    }

    /// Computes the square root, and reports invalid results (negative
    /// inputs).
    pub fn checked_sqrt(&self) -> Result<Self, InvalidResult> {
        check(self.sqrt())
    }
}

impl Float {
    /// Go-style arithmetic: assign `a + b` to `self`, rounded to the precision
    /// and rounding mode of `self`. An unset precision takes the larger
    /// precision of the operands.
    pub fn set_add(&mut self, a: &Self, b: &Self) -> &mut Self {
        let prec = self.dst_precision(a, b);
        *self = Self::add_sub(a, b, false, prec, self.get_rounding_mode());
        self
    }

    /// Assign `a - b` to `self`, see `set_add`.
    pub fn set_sub(&mut self, a: &Self, b: &Self) -> &mut Self {
        let prec = self.dst_precision(a, b);
        *self = Self::add_sub(a, b, true, prec, self.get_rounding_mode());
        self
    }

    /// Assign `a * b` to `self`, see `set_add`.
    pub fn set_mul(&mut self, a: &Self, b: &Self) -> &mut Self {
        let prec = self.dst_precision(a, b);
        *self = Self::mul_prec(a, b, prec, self.get_rounding_mode());
        self
    }

    /// Assign `a / b` to `self`, see `set_add`.
    pub fn set_div(&mut self, a: &Self, b: &Self) -> &mut Self {
        let prec = self.dst_precision(a, b);
        *self = Self::div_prec(a, b, prec, self.get_rounding_mode());
        self
    }

    /// Assign the square root of `x` to `self`, see `set_add`.
    pub fn set_sqrt(&mut self, x: &Self) -> &mut Self {
        let prec = self.dst_precision(x, x);
        *self = x.sqrt_prec(prec, self.get_rounding_mode());
        self
    }

    fn dst_precision(&self, a: &Self, b: &Self) -> usize {
        match self.get_precision() {
            0 => a.get_precision().max(b.get_precision()),
            p => p,
        }
    }
}

macro_rules! declare_operator {
    ($trait_name:ident,
     $func_name:ident,
     $func_impl_name:ident,
     $assign_trait:ident,
     $assign_func:ident) => {
        // Self + Self
        impl $trait_name for Float {
            type Output = Self;
            fn $func_name(self, rhs: Self) -> Self {
                Self::$func_impl_name(&self, &rhs, self.get_rounding_mode())
            }
        }

        // Self + &Self
        impl $trait_name<&Float> for Float {
            type Output = Self;
            fn $func_name(self, rhs: &Self) -> Self {
                Self::$func_impl_name(&self, rhs, self.get_rounding_mode())
            }
        }

        // &Self + &Self
        impl $trait_name<Self> for &Float {
            type Output = Float;
            fn $func_name(self, rhs: Self) -> Float {
                Float::$func_impl_name(self, rhs, self.get_rounding_mode())
            }
        }

        // Self += Self
        impl $assign_trait for Float {
            fn $assign_func(&mut self, rhs: Self) {
                *self =
                    Self::$func_impl_name(self, &rhs, self.get_rounding_mode());
            }
        }

        // Self += &Self
        impl $assign_trait<&Float> for Float {
            fn $assign_func(&mut self, rhs: &Self) {
                *self =
                    Self::$func_impl_name(self, rhs, self.get_rounding_mode());
            }
        }
    };
}

declare_operator!(Add, add, add_with_rm, AddAssign, add_assign);
declare_operator!(Sub, sub, sub_with_rm, SubAssign, sub_assign);
declare_operator!(Mul, mul, mul_with_rm, MulAssign, mul_assign);
declare_operator!(Div, div, div_with_rm, DivAssign, div_assign);

impl Neg for Float {
    type Output = Self;
    fn neg(self) -> Self {
        Float::neg(&self)
    }
}

impl Neg for &Float {
    type Output = Float;
    fn neg(self) -> Float {
        Float::neg(self)
    }
}

#[test]
fn test_addition() {
    fn add_helper(a: f64, b: f64) -> f64 {
        let a = Float::from_f64(a);
        let b = Float::from_f64(b);
        (a + b).as_f64()
    }

    assert_eq!(add_helper(0., -4.), -4.);
    assert_eq!(add_helper(-4., 0.), -4.);
    assert_eq!(add_helper(1., 1.), 2.);
    assert_eq!(add_helper(8., 4.), 12.);
    assert_eq!(add_helper(128., 2.), 130.);
    assert_eq!(add_helper(1024., 1024.), 2048.);
    assert_eq!(add_helper(0.5, 0.5), 1.);
    assert_eq!(add_helper(-4., 6.), 2.);
    assert_eq!(add_helper(4., -6.), -2.);
    assert_eq!(add_helper(-4., -6.), -10.);
    assert_eq!(add_helper(1.0, 1e-40), 1.0);
    assert_eq!(add_helper(1.0, -1e-40), 1.0);
    assert!(add_helper(f64::INFINITY, f64::NEG_INFINITY).is_nan());
}

#[test]
fn test_add_random_vals() {
    use super::utils;

    let mut lfsr = utils::Lfsr::new();

    // Keep the exponents in a range where the native results are normal.
    let mut random_val = || {
        let exp = 0x3c0 + lfsr.below(0x80);
        let bits = (lfsr.get64() & 0x800f_ffff_ffff_ffff) | (exp << 52);
        f64::from_bits(bits)
    };

    for _ in 0..5000 {
        let v0 = random_val();
        let v1 = random_val();

        let f0 = Float::from_f64(v0);
        let f1 = Float::from_f64(v1);

        assert_eq!((&f0 + &f1).as_f64(), v0 + v1);
        assert_eq!((&f0 - &f1).as_f64(), v0 - v1);
        assert_eq!((&f0 * &f1).as_f64(), v0 * v1);
        assert_eq!((&f0 / &f1).as_f64(), v0 / v1);
    }
}

#[test]
fn test_sticky_rounding() {
    use RoundingMode::*;
    // 1 + tiny and 1 - tiny, with all of the rounding modes.
    let one = Float::one(8, false);
    let tiny = Float::one(8, false).scale(-100);
    let up = |rm| Float::add_with_rm(&one, &tiny, rm);
    let down = |rm| Float::sub_with_rm(&one, &tiny, rm);
    assert_eq!(up(NearestTiesToEven), one);
    assert_eq!(up(Zero), one);
    assert_eq!(up(Positive), Float::from_u64(8, 129).scale(-7));
    assert_eq!(up(AwayFromZero), Float::from_u64(8, 129).scale(-7));
    assert_eq!(down(NearestTiesToAway), one);
    assert_eq!(down(Zero), Float::from_u64(8, 255).scale(-8));
    assert_eq!(down(Negative), Float::from_u64(8, 255).scale(-8));
    assert_eq!(down(Positive), one);
}

#[test]
fn test_cancellation_is_exact() {
    // (1 + 2^-200) - 1 with a wide operand and a narrow result.
    let one = Float::one(300, false);
    let x = &one + &Float::one(300, false).scale(-200);
    let mut diff = Float::zero(10, false);
    diff.set_sub(&x, &one);
    assert_eq!(diff, Float::one(10, false).scale(-200));

    let zero = &x - &x;
    assert!(zero.is_zero() && !zero.get_sign());
    let zero = Float::sub_with_rm(&x, &x, RoundingMode::Negative);
    assert!(zero.is_zero() && zero.get_sign());
}

#[test]
fn test_special_values() {
    use super::utils;

    // Check that the behavior of the special values match the native
    // doubles.
    for v0 in utils::get_special_test_values() {
        for v1 in utils::get_special_test_values() {
            let f0 = Float::from_f64(v0);
            let f1 = Float::from_f64(v1);
            let checks = [
                ((&f0 + &f1).as_f64(), v0 + v1),
                ((&f0 - &f1).as_f64(), v0 - v1),
                ((&f0 * &f1).as_f64(), v0 * v1),
                ((&f0 / &f1).as_f64(), v0 / v1),
            ];
            for (ours, native) in checks {
                assert_eq!(ours.is_nan(), native.is_nan());
                // Subnormal results are rounded twice on our side.
                if native != 0. && native.abs() < f64::MIN_POSITIVE {
                    continue;
                }
                if !native.is_nan() {
                    assert_eq!(ours, native, "{} {}", v0, v1);
                }
            }
        }
    }
}

#[test]
fn test_sqrt() {
    use super::utils;

    for v in utils::get_special_test_values() {
        let res = Float::from_f64(v).sqrt().as_f64();
        let native = v.sqrt();
        assert_eq!(res.is_nan(), native.is_nan(), "sqrt({})", v);
        if !native.is_nan() {
            assert_eq!(res, native, "sqrt({})", v);
        }
    }

    let mut lfsr = utils::Lfsr::new();
    for _ in 0..2000 {
        let v = f64::from_bits(lfsr.get64() & 0x7fef_ffff_ffff_ffff);
        assert_eq!(Float::from_f64(v).sqrt().as_f64(), v.sqrt());
    }

    assert!(Float::from_f64(-2.).checked_sqrt().is_err());
    let x = Float::from_u64(100, 2).sqrt();
    assert_eq!(x.get_precision(), 100);
    let two = &x * &x;
    assert!((&two - &Float::from_u64(100, 2)).abs() < Float::one(100, false).scale(-97));
}

#[test]
fn test_checked_ops() {
    let inf = Float::inf(53, false);
    let zero = Float::zero(53, false);
    assert_eq!(inf.checked_sub(&inf), Err(InvalidResult));
    assert_eq!(zero.checked_mul(&inf), Err(InvalidResult));
    assert_eq!(zero.checked_div(&zero), Err(InvalidResult));
    assert!(Float::one(53, false).checked_div(&zero).unwrap().is_inf());
}

#[test]
fn test_destination_precision() {
    let a = Float::from_u64(64, 1);
    let b = Float::from_u64(64, 3);
    let mut q = Float::zero(4, false);
    q.set_div(&a, &b);
    assert_eq!(q.get_precision(), 4);
    // 1/3 = 0.01010101.. rounds to 0.01011 with four bits.
    assert_eq!(q.as_f64(), 11. / 32.);

    let mut r = Float::new();
    r.set_mul(&a, &Float::from_u64(80, 5));
    assert_eq!(r.get_precision(), 80);
    assert_eq!(r.as_f64(), 5.);
}
