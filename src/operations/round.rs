//! Rounding to an integer.

use crate::error::{Error, Result};
use crate::float::{Float, RoundingMode};

impl Float {
    /// Assign `z` rounded to an integer with the rounding mode `mode` to
    /// `self`, at the precision of `self`, or the precision of `z` if it is
    /// unset. Integers and infinities are assigned as-is, so they are only
    /// rounded by the precision of `self`.
    pub fn set_round(
        &mut self,
        z: &Self,
        mode: RoundingMode,
    ) -> Result<&mut Self> {
        if z.is_nan() {
            return Err(Error::domain("Round: argument is NaN"));
        }

        let prec = self.target_precision(z.get_precision());
        if z.is_int() || z.is_inf() {
            return Ok(self.assign_rounded(z, prec));
        }

        let sign = z.get_sign();
        let (_, exp) = z.mant_exp();

        // The magnitude is below 1, and the result is 0 or 1.
        if exp <= 0 {
            let half = Self::one(2, false).scale(-1);
            let mag = z.abs();
            let away = match mode {
                RoundingMode::NearestTiesToEven => mag > half,
                RoundingMode::NearestTiesToAway => mag >= half,
                RoundingMode::Zero => false,
                RoundingMode::AwayFromZero => true,
                RoundingMode::Negative => sign,
                RoundingMode::Positive => !sign,
            };
            let res = if away {
                Self::one(prec, sign)
            } else {
                Self::zero(prec, sign)
            };
            return Ok(self.assign_rounded(&res, prec));
        }

        // The destination can't even hold the integer part.
        let int_bits = exp as usize;
        if prec < int_bits {
            return Ok(self.assign_rounded(z, prec));
        }

        // Round to exactly the bits of the integer part, which drops the
        // fraction with the requested mode. The result fits in `prec` bits.
        let res = z.round_to(int_bits, mode);
        Ok(self.assign_rounded(&res, prec))
    }

    /// Returns the number rounded to an integer with the rounding mode
    /// `mode`, see `set_round`.
    pub fn round(&self, mode: RoundingMode) -> Result<Self> {
        let mut res = Self::new();
        res.set_round(self, mode)?;
        Ok(res)
    }
}

#[test]
fn test_round_table() {
    use RoundingMode::*;

    let modes = [
        NearestTiesToEven,
        NearestTiesToAway,
        Zero,
        AwayFromZero,
        Negative,
        Positive,
    ];

    // Each row is the input, and the result for each of the modes above.
    let table: [(f64, [f64; 6]); 13] = [
        (0., [0., 0., 0., 0., 0., 0.]),
        (1., [1., 1., 1., 1., 1., 1.]),
        (0.25, [0., 0., 0., 1., 0., 1.]),
        (-0.25, [0., 0., 0., -1., -1., 0.]),
        (0.5, [0., 1., 0., 1., 0., 1.]),
        (-0.5, [0., -1., 0., -1., -1., 0.]),
        (0.75, [1., 1., 0., 1., 0., 1.]),
        (1.25, [1., 1., 1., 2., 1., 2.]),
        (-1.25, [-1., -1., -1., -2., -2., -1.]),
        (1.5, [2., 2., 1., 2., 1., 2.]),
        (-1.5, [-2., -2., -1., -2., -2., -1.]),
        (2.5, [2., 3., 2., 3., 2., 3.]),
        (-7.75, [-8., -8., -7., -8., -8., -7.]),
    ];

    for (input, expected) in table {
        let z = Float::from_f64(input);
        for (mode, want) in modes.iter().zip(expected) {
            let res = z.round(*mode).unwrap();
            assert_eq!(res.as_f64(), want, "{} {:?}", input, mode);
            assert_eq!(res.get_precision(), 53);
        }
    }
}

#[test]
fn test_round_destination() {
    // A one-bit destination rounds 12 with its own mode.
    let z = Float::from_f64(12.);
    for mode in RoundingMode::ALL {
        let mut up = Float::zero(1, false);
        up.set_rounding_mode(RoundingMode::Positive);
        up.set_round(&z, mode).unwrap();
        assert_eq!(up.as_f64(), 16.);
        let mut down = Float::zero(1, false);
        down.set_rounding_mode(RoundingMode::Negative);
        down.set_round(&z, mode).unwrap();
        assert_eq!(down.as_f64(), 8.);
        assert_eq!(down.get_rounding_mode(), RoundingMode::Negative);
    }

    // The destination holds exactly the integer part, so the requested
    // mode decides and not the destination's.
    let z = Float::from_f64(2.5);
    for (mode, want) in [
        (RoundingMode::Positive, 3.),
        (RoundingMode::AwayFromZero, 3.),
        (RoundingMode::NearestTiesToAway, 3.),
        (RoundingMode::NearestTiesToEven, 2.),
        (RoundingMode::Zero, 2.),
        (RoundingMode::Negative, 2.),
    ] {
        let mut dst = Float::zero(2, false);
        dst.set_round(&z, mode).unwrap();
        assert_eq!(dst.as_f64(), want, "{:?}", mode);
        assert_eq!(dst.get_precision(), 2);
    }
    let mut dst = Float::zero(3, false);
    dst.set_round(&Float::from_f64(-6.5), RoundingMode::Negative).unwrap();
    assert_eq!(dst.as_f64(), -7.);

    let mut dst = Float::zero(1, false);
    dst.set_round(&Float::from_f64(0.), RoundingMode::Positive).unwrap();
    assert!(dst.is_zero());

    // A wide destination keeps its precision.
    let z = Float::from_f64(3.5);
    let expected = [4., 4., 3., 4., 3., 4.];
    let modes = [
        RoundingMode::NearestTiesToEven,
        RoundingMode::NearestTiesToAway,
        RoundingMode::Zero,
        RoundingMode::AwayFromZero,
        RoundingMode::Negative,
        RoundingMode::Positive,
    ];
    for (mode, want) in modes.iter().zip(expected) {
        let mut dst = Float::zero(128, false);
        dst.set_round(&z, *mode).unwrap();
        assert_eq!(dst.as_f64(), want);
        assert_eq!(dst.get_precision(), 128);
    }
}

#[test]
fn test_round_special_values() {
    let inf = Float::inf(53, true);
    assert_eq!(inf.round(RoundingMode::Zero).unwrap(), inf);
    assert!(Float::nan(53, false).round(RoundingMode::Zero).is_err());

    // A large value with a fraction, that needs more than one word.
    let big = Float::from_u64(200, 1 << 40).scale(100);
    let z = &big + &Float::from_f64(0.5).with_precision(200);
    let r = z.round(RoundingMode::NearestTiesToAway).unwrap();
    assert_eq!(r, &big + &Float::one(200, false));
    let r = z.round(RoundingMode::NearestTiesToEven).unwrap();
    assert_eq!(r, big);
}
