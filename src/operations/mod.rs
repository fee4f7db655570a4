//! Contains the implementations of the elementary functions (log, exp, pow,
//! AGM, rounding to an integer) and the constant pi.

use crate::float::Float;

mod agm;
mod constants;
mod exp;
mod functions;
mod newton;
mod round;

pub use constants::{pi_cache, PiCache};
pub use newton::newton;

/// The number of extra bits that the functions in this module carry while
/// computing, and discard when writing the result.
pub const GUARD_BITS: usize = 64;

/// The precision of the pi literal that seeds the process-wide cache.
pub const INITIAL_PI_PRECISION: usize = 1024;

impl Float {
    /// Returns the precision that a destination-form operation writes: the
    /// precision of `self`, or `default` if it is unset.
    pub(crate) fn target_precision(&self, default: usize) -> usize {
        match self.get_precision() {
            0 => default,
            p => p,
        }
    }

    /// Round `x` into `self` at `prec` bits, with the rounding mode of
    /// `self`.
    pub(crate) fn assign_rounded(
        &mut self,
        x: &Self,
        prec: usize,
    ) -> &mut Self {
        *self = x.round_to(prec, self.get_rounding_mode());
        self
    }
}

#[cfg(test)]
pub(crate) mod test_utils {
    use crate::Float;

    /// Returns true if `a` and `b` differ by no more than `ulps` units in the
    /// last place of a `prec`-bit number near `b`.
    pub fn is_close(a: &Float, b: &Float, prec: usize, ulps: u64) -> bool {
        if a == b {
            return true;
        }
        if !a.is_normal() || !b.is_normal() {
            return false;
        }
        let diff = (a - b).abs();
        let ulp = Float::from_u64(64, ulps).scale(b.get_exp() - prec as i64);
        diff <= ulp
    }
}
