//! Newton's method with precision doubling.

use super::GUARD_BITS;
use crate::error::Result;
use crate::float::{Float, RoundingMode};
use log::trace;

/// Refine `guess` towards a root of some function `f`, and return the root
/// with `target` bits of precision. The callback `step` returns the Newton
/// correction `f(t)/f'(t)` for the current guess `t`.
///
/// Newton's method doubles the number of correct bits with every iteration,
/// so the working precision starts at the precision of the guess and doubles
/// on each step, with `GUARD_BITS` extra bits, until it covers twice the
/// target. Errors returned by `step` abort the iteration.
///
/// ```
/// use bigfloat::{newton, Float};
///
/// // The root of t^2 - 2, with the correction (t^2 - 2) / 2t.
/// let two = Float::from_u64(200, 2);
/// let step = |t: &Float| Ok((t * t - &two) / t.scale(1));
/// let root = newton(step, Float::from_f64(1.4), 200).unwrap();
/// assert_eq!(root.get_precision(), 200);
/// ```
pub fn newton<F>(step: F, guess: Float, target: usize) -> Result<Float>
where
    F: Fn(&Float) -> Result<Float>,
{
    use RoundingMode::NearestTiesToEven as rm;

    let mut prec = guess.get_precision().max(1);
    let mut guess = guess.round_to(prec + GUARD_BITS, rm);

    while prec < 2 * target {
        let delta = step(&guess)?;
        guess = Float::sub_with_rm(&guess, &delta, rm);
        prec *= 2;
        guess = guess.round_to(prec + GUARD_BITS, rm);
        trace!("newton: working precision is now {} bits", prec + GUARD_BITS);
    }

    Ok(guess.round_to(target, rm))
}

#[test]
fn test_newton_sqrt() {
    use super::test_utils::is_close;

    for prec in [53, 100, 300, 1000] {
        let two = Float::from_u64(prec, 2);
        let step = |t: &Float| Ok((t * t - &two) / t.scale(1));
        let root = newton(step, Float::from_f64(1.4), prec).unwrap();
        assert_eq!(root.get_precision(), prec);
        assert!(is_close(&root, &two.sqrt(), prec, 1));
    }
}

#[test]
fn test_newton_stops_on_error() {
    use crate::error::Error;

    let step = |_: &Float| Err(Error::domain("Log: argument is negative"));
    let res = newton(step, Float::from_f64(1.), 100);
    assert!(res.is_err());

    // The guess is returned as-is when it is already precise enough.
    let step = |_: &Float| Err(Error::domain("never called"));
    let res = newton(step, Float::from_f64(1.5), 10).unwrap();
    assert_eq!(res.as_f64(), 1.5);
}
