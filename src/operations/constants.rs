//! This module contains the implementation of pi, and the grow-only cache
//! that shares it between threads.

use super::{GUARD_BITS, INITIAL_PI_PRECISION};
use crate::float::{Float, RoundingMode};
use lazy_static::lazy_static;
use log::debug;
use arc_swap::ArcSwap;
use parking_lot::Mutex;
use std::sync::Arc;

/// Pi with enough decimal digits for `INITIAL_PI_PRECISION` bits.
const PI_LITERAL: &str = concat!(
    "3.",
    "14159265358979323846264338327950288419716939937510",
    "58209749445923078164062862089986280348253421170679",
    "82148086513282306647093844609550582231725359408128",
    "48111745028410270193852110555964462294895493038196",
    "44288109756659334461284756482337867831652712019091",
    "45648566923460348610454326648213393607260249141273",
    "72458700660631558817488152092096282925409171536444",
);

impl Float {
    /// Computes pi with `prec` bits, without looking at the cache.
    pub fn compute_pi(prec: usize) -> Self {
        // Algorithm description in Pg 246:
        // Fast Multiple-Precision Evaluation of Elementary Functions
        // by Richard P. Brent.
        use RoundingMode::NearestTiesToEven as rm;

        if prec == 0 {
            return Self::zero(0, false);
        }

        // The arithmetic operations below round, so operate with increased
        // precision.
        let work = prec + GUARD_BITS;
        let one = Self::one(work, false);
        let lim = one.scale(-(prec as i64 + 1));

        let mut a = one.clone();
        let mut b = Self::from_u64(work, 2).sqrt().scale(-1);
        let mut t = one.scale(-2);
        let mut x = one;

        while Self::sub_with_rm(&a, &b, rm).abs() >= lim {
            let y = a.clone();
            a = Self::add_with_rm(&a, &b, rm).scale(-1);
            b = Self::mul_with_rm(&b, &y, rm).sqrt();
            let d = Self::sub_with_rm(&a, &y, rm);
            t -= &x * &(&d * &d);
            x = x.scale(1);
        }

        (&a * &a / &t).round_to(prec, rm)
    }

    /// Assign pi to `self`, at the precision of `self`. A zero precision
    /// gives zero. The value comes from the process-wide cache.
    pub fn set_pi(&mut self) -> &mut Self {
        let prec = self.get_precision();
        if prec == 0 {
            let rm = self.get_rounding_mode();
            *self = Self::zero(0, false).with_rounding_mode(rm);
            return self;
        }
        let pi = pi_cache().get(prec);
        self.assign_rounded(&pi, prec)
    }

    /// Returns pi with `prec` bits.
    pub fn pi(prec: usize) -> Self {
        let mut res = Self::zero(prec, false);
        res.set_pi();
        res
    }
}

/// A grow-only cache of pi. Readers load the published value without
/// taking a lock, and a request for more bits than the cache holds computes
/// a new value and publishes it in place of the old one. Published values
/// are never modified.
#[derive(Debug)]
pub struct PiCache {
    value: ArcSwap<Float>,
    // Serializes the writers, so that racing requests don't all compute.
    grow: Mutex<()>,
}

impl PiCache {
    /// Returns a cache that holds pi with `INITIAL_PI_PRECISION` bits.
    pub fn new() -> Self {
        let pi = Float::parse(PI_LITERAL, INITIAL_PI_PRECISION)
            .unwrap_or_else(|_| Float::compute_pi(INITIAL_PI_PRECISION));
        Self::with_value(pi)
    }

    /// Returns a cache that holds nothing. The first request computes pi.
    pub fn empty() -> Self {
        Self::with_value(Float::zero(0, false))
    }

    fn with_value(pi: Float) -> Self {
        PiCache {
            value: ArcSwap::from_pointee(pi),
            grow: Mutex::new(()),
        }
    }

    /// Returns the number of bits that the cache currently holds.
    pub fn precision(&self) -> usize {
        self.value.load().get_precision()
    }

    /// Returns pi with at least `prec` bits. The returned value may be
    /// more precise than requested.
    pub fn get(&self, prec: usize) -> Arc<Float> {
        let cached = self.value.load_full();
        if cached.get_precision() >= prec {
            return cached;
        }

        let _guard = self.grow.lock();

        // Someone else may have grown the cache while we were waiting.
        let cached = self.value.load_full();
        if cached.get_precision() >= prec {
            debug!(
                "pi cache already holds {} bits, wanted {}",
                cached.get_precision(),
                prec
            );
            return cached;
        }

        debug!(
            "growing the pi cache from {} to {} bits",
            cached.get_precision(),
            prec
        );
        let pi = Arc::new(Float::compute_pi(prec));
        self.value.store(pi.clone());
        pi
    }
}

impl Default for PiCache {
    fn default() -> Self {
        Self::new()
    }
}

lazy_static! {
    static ref PI_CACHE: PiCache = PiCache::new();
}

/// Returns the process-wide pi cache.
pub fn pi_cache() -> &'static PiCache {
    &PI_CACHE
}

#[cfg(test)]
const PI_DIGITS: &str = "3.1415926535897932384626433832795028841971693993751058209749445923078164062862089986280348253421170679821480865132823066470938446095505822317253594081284811174502841027019385211055596446229489549303819644288109756659334461284756482337867831652712019091456485669234603486104543266482133936072602491412737245870066063155881748815209209628292540917153644";

#[cfg(test)]
const TEST_PRECISIONS: [usize; 10] =
    [24, 53, 64, 100, 200, 300, 400, 500, 600, 1000];

#[test]
fn test_compute_pi() {
    assert_eq!(Float::compute_pi(53).as_f64(), std::f64::consts::PI);
    assert!(Float::compute_pi(0).is_zero());

    for prec in TEST_PRECISIONS {
        let expected = Float::parse(PI_DIGITS, prec).unwrap();
        assert_eq!(Float::compute_pi(prec), expected, "{} bits", prec);
    }

    let pi = Float::pi(53);
    assert!(pi.to_string().starts_with("3.14159265358979"));
}

#[test]
fn test_set_pi() {
    for prec in TEST_PRECISIONS {
        let mut pi = Float::zero(prec, false);
        pi.set_pi();
        assert_eq!(pi, Float::parse(PI_DIGITS, prec).unwrap());
        assert_eq!(pi.get_precision(), prec);
    }

    // Larger than the literal.
    let pi = Float::pi(1500);
    assert_eq!(pi.get_precision(), 1500);
    assert!(pi_cache().precision() >= 1500);
    let expected = Float::parse(PI_DIGITS, 1000).unwrap();
    assert_eq!(pi.with_precision(1000), expected);

    let mut zero = Float::new();
    zero.set_pi();
    assert!(zero.is_zero());

    // The destination rounding mode is honored.
    let mut up = Float::zero(10, false).with_rounding_mode(RoundingMode::Positive);
    up.set_pi();
    let mut down = Float::zero(10, false).with_rounding_mode(RoundingMode::Zero);
    down.set_pi();
    assert!(down < up);
}

#[test]
fn test_cache_literal_is_pi() {
    let cache = PiCache::new();
    assert_eq!(cache.precision(), INITIAL_PI_PRECISION);
    let literal = cache.get(INITIAL_PI_PRECISION);
    assert_eq!(*literal, Float::compute_pi(INITIAL_PI_PRECISION));
}

#[test]
fn test_cache_grows_monotonically() {
    let cache = PiCache::empty();
    assert_eq!(cache.precision(), 0);

    let mut last = 0;
    for prec in [64, 32, 300, 100, 700, 600] {
        let pi = cache.get(prec);
        assert!(pi.get_precision() >= prec);
        assert!(cache.precision() >= last);
        last = cache.precision();

        let expected = Float::parse(PI_DIGITS, prec).unwrap();
        assert_eq!(pi.with_precision(prec), expected);
    }
    assert_eq!(cache.precision(), 700);
}

#[test]
fn test_cache_concurrent_requests() {
    let cache = PiCache::empty();
    let expected: Vec<Float> = TEST_PRECISIONS
        .iter()
        .map(|p| Float::parse(PI_DIGITS, *p).unwrap())
        .collect();

    std::thread::scope(|s| {
        for i in 0..32 {
            let cache = &cache;
            let expected = &expected;
            s.spawn(move || {
                // Walk the precisions in a different order in every thread.
                for j in 0..TEST_PRECISIONS.len() {
                    let k = (i + j * 3) % TEST_PRECISIONS.len();
                    let prec = TEST_PRECISIONS[k];
                    let pi = cache.get(prec);
                    assert_eq!(pi.with_precision(prec), expected[k]);
                }
            });
        }
    });

    assert_eq!(cache.precision(), 1000);
}

#[test]
fn test_cache_concurrent_requests_around_literal() {
    let big = Float::compute_pi(2000);
    let precisions = [53, 500, 1024, 1100, 2000];

    let cache = PiCache::new();
    std::thread::scope(|s| {
        for i in 0..24 {
            let cache = &cache;
            let big = &big;
            s.spawn(move || {
                for j in 0..precisions.len() {
                    let prec = precisions[(i + j) % precisions.len()];
                    let pi = cache.get(prec);
                    assert!(pi.get_precision() >= prec);
                    let want = big.with_precision(prec);
                    assert_eq!(pi.with_precision(prec), want, "{} bits", prec);
                }
            });
        }
    });

    assert_eq!(cache.precision(), 2000);
    let expected = Float::parse(PI_DIGITS, 1000).unwrap();
    assert_eq!(cache.get(1000).with_precision(1000), expected);
}
