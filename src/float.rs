use super::bigint::shift_right_with_loss;
use super::bigint::BigInt;
use super::bigint::LossFraction;
use core::cmp::Ordering;

/// The smallest legal exponent, in the `0.mantissa * 2^exp` convention.
pub const MIN_EXP: i64 = i32::MIN as i64;
/// The largest legal exponent, in the `0.mantissa * 2^exp` convention.
pub const MAX_EXP: i64 = i32::MAX as i64;
/// The precision that conversions from native doubles use.
pub const DEFAULT_PRECISION: usize = 53;

/// Defines the supported rounding modes.
/// See IEEE754-2019 Section 4.3 Rounding-direction attributes
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RoundingMode {
    #[default]
    NearestTiesToEven,
    NearestTiesToAway,
    Zero,
    AwayFromZero,
    Negative,
    Positive,
}

impl RoundingMode {
    /// All of the rounding modes, in declaration order.
    pub const ALL: [RoundingMode; 6] = [
        RoundingMode::NearestTiesToEven,
        RoundingMode::NearestTiesToAway,
        RoundingMode::Zero,
        RoundingMode::AwayFromZero,
        RoundingMode::Negative,
        RoundingMode::Positive,
    ];

    /// Create a new rounding mode from a string, if valid.
    pub fn from_string(s: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|rm| rm.as_string() == s)
    }

    /// Return a string representation of the rounding mode.
    pub fn as_string(&self) -> &'static str {
        match self {
            RoundingMode::NearestTiesToEven => "NearestTiesToEven",
            RoundingMode::NearestTiesToAway => "NearestTiesToAway",
            RoundingMode::Zero => "Zero",
            RoundingMode::AwayFromZero => "AwayFromZero",
            RoundingMode::Negative => "Negative",
            RoundingMode::Positive => "Positive",
        }
    }
}

/// Declare the different categories of the floating point number. These
/// categories are internal to the float, and can be access by the acessors:
/// is_inf, is_zero, is_nan, is_normal.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum Category {
    Infinity,
    NaN,
    Normal,
    #[default]
    Zero,
}

/// This is the main data structure of this library. It represents an
/// arbitrary-precision binary floating-point number. Every value carries its
/// own precision (in bits) and rounding mode. Operations round their result
/// to the precision of the destination, using the destination's rounding
/// mode.
///
/// A precision of zero means "unset": such a float can only hold a signed
/// zero or a signed infinity, and operations that write into it pick a
/// precision from their operands.
#[derive(Debug, Clone, Default)]
pub struct Float {
    // The number of bits in the significand.
    prec: usize,
    // The rounding mode used when values are written into this float.
    rm: RoundingMode,
    // The Sign bit.
    sign: bool,
    // The value is 0.mantissa * 2^exp, so the MSB of the mantissa has the
    // weight 2^(exp-1).
    exp: i64,
    // The significand, stripped of trailing zeros (odd, unless zero).
    mantissa: BigInt,
    // The kind of number this float represents.
    category: Category,
}

impl Float {
    /// Returns a new zero float with an unset precision.
    pub fn new() -> Self {
        Self::default()
    }

    fn special(prec: usize, sign: bool, category: Category) -> Self {
        Float {
            prec,
            rm: RoundingMode::NearestTiesToEven,
            sign,
            exp: 0,
            mantissa: BigInt::zero(),
            category,
        }
    }

    /// Returns a new zero float.
    pub fn zero(prec: usize, sign: bool) -> Self {
        Self::special(prec, sign, Category::Zero)
    }

    /// Returns a new infinity float.
    pub fn inf(prec: usize, sign: bool) -> Self {
        Self::special(prec, sign, Category::Infinity)
    }

    /// Returns a new NaN float.
    pub fn nan(prec: usize, sign: bool) -> Self {
        Self::special(prec, sign, Category::NaN)
    }

    /// Returns a new float with the value one.
    pub fn one(prec: usize, sign: bool) -> Self {
        Self::from_parts(
            prec,
            RoundingMode::NearestTiesToEven,
            sign,
            0,
            BigInt::one(),
            LossFraction::ExactlyZero,
        )
    }

    /// Returns a new float with the rounding mode `rm`.
    pub fn with_rounding_mode(mut self, rm: RoundingMode) -> Self {
        self.rm = rm;
        self
    }

    /// Returns true if the Float is negative
    pub fn is_negative(&self) -> bool {
        self.sign
    }

    /// Returns true if the Float is +-inf.
    pub fn is_inf(&self) -> bool {
        self.category == Category::Infinity
    }

    /// Returns true if the Float is a +- NaN.
    pub fn is_nan(&self) -> bool {
        self.category == Category::NaN
    }

    /// Returns true if the Float is +-zero.
    pub fn is_zero(&self) -> bool {
        self.category == Category::Zero
    }

    /// Returns true if this number is normal (not Zero, Nan, Inf).
    pub fn is_normal(&self) -> bool {
        self.category == Category::Normal
    }

    /// Returns the precision of the float, in bits.
    pub fn get_precision(&self) -> usize {
        self.prec
    }

    /// Returns the rounding mode of the float.
    pub fn get_rounding_mode(&self) -> RoundingMode {
        self.rm
    }

    /// Update the rounding mode of the float. The value is not changed.
    pub fn set_rounding_mode(&mut self, rm: RoundingMode) {
        self.rm = rm;
    }

    /// Update the sign of the float to `sign`. True means negative.
    pub fn set_sign(&mut self, sign: bool) {
        self.sign = sign
    }

    /// Returns the sign of the float. True means negative.
    pub fn get_sign(&self) -> bool {
        self.sign
    }

    /// Returns the mantissa of the float.
    pub fn get_mantissa(&self) -> BigInt {
        self.mantissa.clone()
    }

    /// Returns the exponent of the float (the value is `0.mantissa * 2^exp`).
    pub fn get_exp(&self) -> i64 {
        self.exp
    }

    /// Returns the category of the float.
    pub fn get_category(&self) -> Category {
        self.category
    }

    /// Returns the exponent of the least significant bit of the mantissa.
    pub(crate) fn lsb_exp(&self) -> i64 {
        self.exp - self.mantissa.msb_index() as i64
    }

    /// Returns a new float which has a flipped sign (negated value).
    pub fn neg(&self) -> Self {
        let mut x = self.clone();
        x.sign = !x.sign;
        x
    }

    /// Returns the absolute value of this float.
    pub fn abs(&self) -> Self {
        let mut x = self.clone();
        x.sign = false;
        x
    }
}

/// Returns true if we need to round away from zero (increment the mantissa).
pub(crate) fn need_round_away_from_zero(
    rm: RoundingMode,
    sign: bool,
    loss: LossFraction,
    is_odd: bool,
) -> bool {
    match rm {
        RoundingMode::Positive => !sign,
        RoundingMode::Negative => sign,
        RoundingMode::Zero => false,
        RoundingMode::AwayFromZero => true,
        RoundingMode::NearestTiesToAway => loss.is_gte_half(),
        RoundingMode::NearestTiesToEven => {
            loss.is_mt_half() || (loss.is_exactly_half() && is_odd)
        }
    }
}

impl Float {
    /// Builds the float `sign * mantissa * 2^lsb_exp`, rounded to `prec`
    /// bits with the rounding mode `rm`. The parameter `loss` describes the
    /// bits below `mantissa` that the caller already discarded. This is the
    /// normalization routine that every rounded result goes through.
    pub(crate) fn from_parts(
        prec: usize,
        rm: RoundingMode,
        sign: bool,
        lsb_exp: i64,
        mantissa: BigInt,
        loss: LossFraction,
    ) -> Self {
        if prec == 0 || (mantissa.is_zero() && loss.is_exactly_zero()) {
            return Self::zero(prec, sign).with_rounding_mode(rm);
        }

        let mut lsb_exp = lsb_exp;
        let mut mantissa = mantissa;
        let mut loss = loss;

        // Step I - drop the bits that don't fit in the precision.
        let msb = mantissa.msb_index();
        if msb > prec {
            let shift = msb - prec;
            let (m, loss2) = shift_right_with_loss(&mantissa, shift);
            mantissa = m;
            loss = loss2.combine(loss);
            lsb_exp += shift as i64;
        }

        // Step II - round the number.
        if !loss.is_exactly_zero()
            && need_round_away_from_zero(rm, sign, loss, mantissa.is_odd())
        {
            mantissa.inplace_add(&BigInt::one());
            // Did the mantissa overflow?
            if mantissa.msb_index() > prec {
                mantissa.shift_right(1);
                lsb_exp += 1;
            }
        }

        if mantissa.is_zero() {
            return Self::zero(prec, sign).with_rounding_mode(rm);
        }

        // Step III - canonicalize and check the exponent range.
        let tz = mantissa.trailing_zeros();
        mantissa.shift_right(tz);
        lsb_exp += tz as i64;
        let exp = lsb_exp + mantissa.msb_index() as i64;

        if exp > MAX_EXP {
            return Self::overflow(prec, rm, sign);
        }
        if exp < MIN_EXP {
            return Self::zero(prec, sign).with_rounding_mode(rm);
        }

        Float {
            prec,
            rm,
            sign,
            exp,
            mantissa,
            category: Category::Normal,
        }
    }

    /// The number overflowed, return the right value based on the rounding
    /// mode and sign.
    pub(crate) fn overflow(prec: usize, rm: RoundingMode, sign: bool) -> Self {
        let inf = Self::inf(prec, sign).with_rounding_mode(rm);
        let mut max = BigInt::all1s(prec);
        let tz = max.trailing_zeros();
        max.shift_right(tz);
        let max = Float {
            prec,
            rm,
            sign,
            exp: MAX_EXP,
            mantissa: max,
            category: Category::Normal,
        };

        match rm {
            RoundingMode::NearestTiesToEven => inf,
            RoundingMode::NearestTiesToAway => inf,
            RoundingMode::AwayFromZero => inf,
            RoundingMode::Zero => max,
            RoundingMode::Positive => {
                if sign {
                    max
                } else {
                    inf
                }
            }
            RoundingMode::Negative => {
                if sign {
                    inf
                } else {
                    max
                }
            }
        }
    }

    /// Returns this value rounded to `prec` bits with the mode `rm`. The
    /// returned float carries `prec` and `rm`.
    pub(crate) fn round_to(&self, prec: usize, rm: RoundingMode) -> Self {
        match self.category {
            Category::Normal => Self::from_parts(
                prec,
                rm,
                self.sign,
                self.lsb_exp(),
                self.mantissa.clone(),
                LossFraction::ExactlyZero,
            ),
            _ => Self::special(prec, self.sign, self.category)
                .with_rounding_mode(rm),
        }
    }

    /// Compare the absolute values of two normal numbers.
    fn cmp_magnitude(&self, other: &Self) -> Ordering {
        debug_assert!(self.is_normal() && other.is_normal());
        if self.exp != other.exp {
            return self.exp.cmp(&other.exp);
        }
        // Same exponent. Align the mantissas to the left and compare.
        let lhs_bits = self.mantissa.msb_index();
        let rhs_bits = other.mantissa.msb_index();
        let mut lhs = self.mantissa.clone();
        let mut rhs = other.mantissa.clone();
        if lhs_bits < rhs_bits {
            lhs.shift_left(rhs_bits - lhs_bits);
        } else {
            rhs.shift_left(lhs_bits - rhs_bits);
        }
        lhs.cmp(&rhs)
    }
}

impl PartialEq for Float {
    fn eq(&self, other: &Self) -> bool {
        match (self.category, other.category) {
            (Category::Zero, Category::Zero) => true,
            (Category::Infinity, Category::Infinity) => self.sign == other.sign,
            // The mantissa is canonical, so equal values have equal parts.
            (Category::Normal, Category::Normal) => {
                self.sign == other.sign
                    && self.exp == other.exp
                    && self.mantissa == other.mantissa
            }
            _ => false,
        }
    }
}

/// Page 66. Chapter 3. Floating-Point Formats and Environment
/// Table 3.8: Comparison predicates and the four relations.
impl PartialOrd for Float {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        let bool_to_ord = |ord: bool| -> Option<Ordering> {
            if ord {
                Some(Ordering::Less)
            } else {
                Some(Ordering::Greater)
            }
        };

        match (self.category, other.category) {
            (Category::NaN, _) | (_, Category::NaN) => None,
            (Category::Zero, Category::Zero) => Some(Ordering::Equal),
            (Category::Infinity, Category::Infinity) => {
                if self.sign == other.sign {
                    Some(Ordering::Equal)
                } else {
                    bool_to_ord(self.sign)
                }
            }
            (Category::Infinity, Category::Normal)
            | (Category::Infinity, Category::Zero)
            | (Category::Normal, Category::Zero) => bool_to_ord(self.sign),

            (Category::Normal, Category::Infinity)
            | (Category::Zero, Category::Infinity)
            | (Category::Zero, Category::Normal) => bool_to_ord(!other.sign),

            (Category::Normal, Category::Normal) => {
                if self.sign != other.sign {
                    bool_to_ord(self.sign)
                } else if self.sign {
                    Some(other.cmp_magnitude(self))
                } else {
                    Some(self.cmp_magnitude(other))
                }
            }
        }
    }
}

#[test]
fn test_comparisons() {
    use super::utils;

    // Compare a bunch of special values, using the <,>,== operators and check
    // that they match the comparison on doubles.
    for first in utils::get_special_test_values() {
        for second in utils::get_special_test_values() {
            let is_less = first < second;
            let is_eq = first == second;
            let is_gt = first > second;
            let first = Float::from_f64(first);
            let second = Float::from_f64(second);
            assert_eq!(is_less, first < second, "<");
            assert_eq!(is_eq, first == second, "==");
            assert_eq!(is_gt, first > second, ">");
        }
    }
}

#[test]
fn test_compare_across_precisions() {
    let a = Float::from_u64(10, 3);
    let b = Float::from_u64(200, 3);
    assert_eq!(a, b);
    assert!(Float::from_i64(64, -7) < Float::from_i64(8, -6));
    assert!(Float::zero(1, true) == Float::zero(100, false));
    let half = Float::one(2, false).scale(-1);
    assert!(half < Float::one(1, false));
    assert!(half.neg() > Float::one(1, true));
}

#[test]
fn test_rounding_mode_names() {
    for rm in RoundingMode::ALL {
        assert_eq!(RoundingMode::from_string(rm.as_string()), Some(rm));
    }
    assert_eq!(RoundingMode::from_string("Up"), None);
}

#[test]
fn test_normalize_rounding() {
    use RoundingMode::*;
    // 0b1011 rounded to 3 bits is 0b101|1, exactly half way.
    let round = |rm, sign| {
        let x = Float::from_parts(
            3,
            rm,
            sign,
            0,
            BigInt::from_u64(0b1011),
            LossFraction::ExactlyZero,
        );
        x.as_f64()
    };
    assert_eq!(round(NearestTiesToEven, false), 12.);
    assert_eq!(round(NearestTiesToAway, false), 12.);
    assert_eq!(round(Zero, false), 10.);
    assert_eq!(round(AwayFromZero, true), -12.);
    assert_eq!(round(Negative, false), 10.);
    assert_eq!(round(Negative, true), -12.);
    assert_eq!(round(Positive, true), -10.);

    // 0b1001 to 3 bits is a tie with an even neighbor.
    let x = Float::from_parts(
        3,
        NearestTiesToEven,
        false,
        0,
        BigInt::from_u64(0b1001),
        LossFraction::ExactlyZero,
    );
    assert_eq!(x.as_f64(), 8.);
}

#[test]
fn test_overflow_and_underflow() {
    use RoundingMode::*;
    let big = Float::one(8, false).scale(MAX_EXP - 1);
    assert!(big.is_normal());
    assert!((&big * &Float::from_u64(8, 4)).is_inf());

    let big = big.with_rounding_mode(Zero);
    let max = &big * &Float::from_u64(8, 4);
    assert!(max.is_normal());
    assert_eq!(max.get_exp(), MAX_EXP);

    let tiny = Float::one(8, false).scale(MIN_EXP);
    assert!(tiny.is_normal());
    let gone = tiny.scale(-2);
    assert!(gone.is_zero());
}

#[test]
fn test_precision_zero() {
    let mut x = Float::from_u64(64, 5);
    x.set_precision(0);
    assert!(x.is_zero());
    assert!(!x.get_sign());
    let mut y = Float::inf(10, true);
    y.set_precision(0);
    assert!(y.is_inf() && y.get_sign());
}
