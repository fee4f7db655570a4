//! The arithmetic-geometric mean.

use super::GUARD_BITS;
use crate::error::{Error, Result};
use crate::float::{Float, RoundingMode};

impl Float {
    /// Assign the arithmetic-geometric mean of `a` and `b` to `self`. The
    /// precision of `self` is used, or the larger precision of the inputs if
    /// it is unset. Both inputs must be positive. The AGM of an infinity is
    /// infinity.
    ///
    /// The iteration is:
    ///   a' = (a + b) / 2
    ///   b' = sqrt(a * b)
    /// and it converges quadratically to the common limit. The loop stops
    /// once |a - b| < b0 * 2^-(prec + GUARD_BITS/2 + 1), or when the
    /// difference stops shrinking at the working precision.
    pub fn set_agm(&mut self, a: &Self, b: &Self) -> Result<&mut Self> {
        use RoundingMode::NearestTiesToEven as rm;

        if a.is_nan() || b.is_nan() {
            return Err(Error::domain("AGM: argument is NaN"));
        }
        if a.is_zero() || b.is_zero() || a.get_sign() || b.get_sign() {
            return Err(Error::domain("AGM: argument is not positive"));
        }

        let widest = a.get_precision().max(b.get_precision());
        let prec = self.target_precision(widest);
        if a.is_inf() || b.is_inf() {
            return Ok(self.assign_rounded(&Self::inf(prec, false), prec));
        }

        let work = prec + GUARD_BITS;
        let mut a2 = a.round_to(work, rm);
        let mut b2 = b.round_to(work, rm);
        if a2 < b2 {
            core::mem::swap(&mut a2, &mut b2);
        }

        // The geometric mean grows towards the limit, so the threshold is
        // taken relative to the initial value of b2.
        let tolerance = (prec + GUARD_BITS / 2) as i64;
        let lim = Self::one(work, false).scale(b2.get_exp() - tolerance - 1);

        let mut prev: Option<Self> = None;
        loop {
            let old = a2.clone();
            a2 = Self::add_with_rm(&a2, &b2, rm).scale(-1);
            b2 = Self::mul_with_rm(&b2, &old, rm).sqrt();

            let diff = Self::sub_with_rm(&a2, &b2, rm).abs();
            if diff < lim {
                break;
            }
            // Stop when the rounding noise of the working precision keeps
            // the difference from shrinking.
            if let Some(prev) = &prev {
                if &diff >= prev {
                    break;
                }
            }
            prev = Some(diff);
        }

        Ok(self.assign_rounded(&a2, prec))
    }

    /// Returns the arithmetic-geometric mean of `self` and `b`, with the
    /// larger precision of the two.
    pub fn agm(&self, b: &Self) -> Result<Self> {
        let mut res = Self::new();
        res.set_agm(self, b)?;
        Ok(res)
    }
}

#[cfg(test)]
const AGM_ONE_TWO: &str = "1.4567910310469068691864323832650819749738639432213055907941723832679264545802509002574737128184484443281894018160367999355762430743401245116912132499522793768970211976726893728266666782707432902072384564600963133367494416649516400826932239086263376738382410254887262645136590660408875885100466728130947439789355129117201754471869564160356411130706061";

#[cfg(test)]
const AGM_ONE_TEN: &str = "4.2504070949322748617281643183731348667984678641901928596701476622237553127409037845252854607876171790458817135897668652366410690187825866854343005714304399718866701345600268795095037823053677248108795697049522041225723229732458947507697835936406527028150257238518982793084569470658500853106997941082919334694146843915361847332301248942222685517896377";

#[cfg(test)]
const AGM_ONE_EIGHTH: &str = "0.45196952219967034359164911331276507645541557018306954112635037493237190371123433961098897571407153216488726488616781446636283304514042965741376539315003644325377859387794608118242990700589889155408232061013871480906595147189700268152276449512798584772002737950386745259435790965051247641106770187776231088478906739003673011639874297764052324720923824";

#[cfg(test)]
const AGM_ONE_2_POW_8: &str = "0.2266172673264813935990249059047521131153183423554951008357647589399579243281007098800682366778894106068183449922373565084840603788091294841822891406755449218057751291845474188560350241555526734834267320629182988862200822134426714354129001630331838172767684623648755579758508073234772093745831056731263684472818466567279847347734121500617411676068370";

#[cfg(test)]
const AGM_ONE_2_POW_13: &str = "0.15107867088555894565277006051956059212554039802503247524478909254186086852737399490629222674071181480492157167137547694132610166031526264375084434300568336411139925857454913414480542768807718797335060713475211709310835676172131569048902323084439330888400622327072954342544508199547787750415198261456314278054748992781108231991187512975110547417178045";

#[test]
fn test_agm_reference_values() {
    let cases = [
        (2., AGM_ONE_TWO),
        (10., AGM_ONE_TEN),
        (0.125, AGM_ONE_EIGHTH),
        (0.00390625, AGM_ONE_2_POW_8),
        (0.0001220703125, AGM_ONE_2_POW_13),
    ];

    for prec in [24, 53, 64, 100, 200, 300, 500, 1000] {
        for (b, expected) in cases {
            let one = Float::one(prec, false);
            let b = Float::from_f64(b).with_precision(prec);
            let mut res = Float::zero(prec, false);
            res.set_agm(&one, &b).unwrap();
            let expected = Float::parse(expected, prec).unwrap();
            assert_eq!(res, expected, "AGM(1, {}) at {} bits", b, prec);
            assert_eq!(res.get_precision(), prec);
        }
    }
}

#[test]
fn test_agm_literal() {
    let one = Float::from_f64(1.);
    let res = one.agm(&Float::from_f64(0.125)).unwrap();
    assert_eq!(res.get_precision(), 53);
    assert!(res.to_string().starts_with("0.451969522"));
}

#[test]
fn test_agm_symmetry_and_fixed_point() {
    use crate::utils::Lfsr;

    let mut lfsr = Lfsr::new();
    for prec in [30, 53, 120, 256] {
        for _ in 0..10 {
            let a = Float::from_u64(prec, lfsr.below(1 << 20) + 1).scale(-10);
            let b = Float::from_u64(prec, lfsr.below(1 << 20) + 1).scale(-7);
            assert_eq!(a.agm(&b).unwrap(), b.agm(&a).unwrap());
            assert_eq!(a.agm(&a).unwrap(), a);
        }
    }

    // Large and tiny magnitudes converge as well.
    let big = Float::from_u64(100, 3).scale(5000);
    assert_eq!(big.agm(&big).unwrap(), big);
    let tiny = Float::from_u64(100, 5).scale(-5000);
    let m = big.agm(&tiny).unwrap();
    assert!(m > tiny && m < big);
}

#[test]
fn test_agm_domain() {
    let one = Float::from_f64(1.);
    for bad in [0., -0., -2., f64::NEG_INFINITY] {
        let err = one.agm(&Float::from_f64(bad)).unwrap_err();
        assert!(err.is_invalid_result());
        assert_eq!(err.to_string(), "AGM: argument is not positive");
    }
    assert!(one.agm(&Float::nan(53, false)).is_err());
    assert!(one.agm(&Float::inf(53, false)).unwrap().is_inf());

    // The destination precision wins over the inputs.
    let mut res = Float::zero(10, false);
    res.set_agm(&one, &Float::from_f64(2.)).unwrap();
    assert_eq!(res.get_precision(), 10);
}
