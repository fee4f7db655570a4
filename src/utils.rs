//! Test helpers: a deterministic bit generator and a list of edge-case
//! `f64` values.

/// Edge cases for the conversion and arithmetic tests: the special
/// categories, the ends of the binary64 range, values around one (where the
/// logarithm is delicate) and a few constants.
#[cfg(test)]
pub fn get_special_test_values() -> [f64; 22] {
    use std::f64::consts;
    [
        0.0,
        -0.0,
        f64::NAN,
        -f64::NAN,
        f64::INFINITY,
        f64::NEG_INFINITY,
        f64::MAX,
        f64::MIN,
        f64::MIN_POSITIVE,
        5e-324,
        1e-39,
        f64::EPSILON,
        -f64::EPSILON,
        1.0 + f64::EPSILON,
        1.0 - f64::EPSILON / 2.,
        0.5,
        -0.00001,
        0.1,
        10.,
        consts::PI,
        consts::E,
        consts::LN_2,
    ]
}

/// A 64-bit Galois linear-feedback shift register. The taps (64, 63, 61,
/// 60) give the maximal period. It feeds the randomized tests and
/// `BigInt::pseudorandom`.
#[derive(Debug, Clone)]
pub struct Lfsr {
    state: u64,
}

const TAPS: u64 = 0xd800_0000_0000_0000;
const INITIAL_STATE: u64 = 0x9e37_79b9_7f4a_7c15;

impl Default for Lfsr {
    fn default() -> Self {
        Self::new()
    }
}

impl Lfsr {
    pub fn new() -> Lfsr {
        Self::new_with_seed(0)
    }

    /// A generator whose sequence depends on `seed`.
    pub fn new_with_seed(seed: u32) -> Lfsr {
        let state = INITIAL_STATE ^ (seed as u64).rotate_left(17);
        // The all-zero state is a fixed point.
        Lfsr { state: state.max(1) }
    }

    fn next_bit(&mut self) -> u64 {
        let out = self.state & 1;
        self.state >>= 1;
        if out == 1 {
            self.state ^= TAPS;
        }
        out
    }

    /// Returns the next 64 output bits.
    pub fn get64(&mut self) -> u64 {
        (0..64).fold(0, |acc, _| (acc << 1) | self.next_bit())
    }

    /// Returns a number in the range `0..limit`.
    pub fn below(&mut self, limit: u64) -> u64 {
        self.get64() % limit.max(1)
    }
}

impl Iterator for Lfsr {
    type Item = u64;
    fn next(&mut self) -> Option<Self::Item> {
        Some(self.get64())
    }
}

#[test]
fn test_lfsr_balance() {
    let mut lfsr = Lfsr::new();
    let words = 5000;
    let ones: u32 = (0..words).map(|_| lfsr.get64().count_ones()).sum();
    let total = (words * 64) as f64;
    assert!((ones as f64) < 0.55 * total);
    assert!((ones as f64) > 0.45 * total);
}

#[test]
fn test_seeds_differ() {
    let a: Vec<u64> = Lfsr::new_with_seed(1).take(4).collect();
    let b: Vec<u64> = Lfsr::new_with_seed(2).take(4).collect();
    assert_ne!(a, b);
    assert!(Lfsr::new().below(10) < 10);
}
