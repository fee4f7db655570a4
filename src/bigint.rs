//! This module contains the implementation of the big-int data structure that
//! we use for the significand of the float.

use core::cmp::Ordering;
use core::ops::{Add, AddAssign, Deref, Mul, MulAssign, Sub, SubAssign};

/// Reports the kind of values that are lost when we shift right bits. In some
/// context this used as the two guard bits.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum LossFraction {
    ExactlyZero,  //0000000
    LessThanHalf, //0xxxxxx
    ExactlyHalf,  //1000000
    MoreThanHalf, //1xxxxxx
}

impl LossFraction {
    pub fn is_exactly_zero(&self) -> bool {
        matches!(self, Self::ExactlyZero)
    }
    pub fn is_exactly_half(&self) -> bool {
        matches!(self, Self::ExactlyHalf)
    }
    pub fn is_mt_half(&self) -> bool {
        matches!(self, Self::MoreThanHalf)
    }
    pub fn is_gte_half(&self) -> bool {
        self.is_mt_half() || self.is_exactly_half()
    }

    /// Classify the remainder `rem` of a division by `divisor`.
    pub fn from_remainder(rem: &BigInt, divisor: &BigInt) -> Self {
        if rem.is_zero() {
            return LossFraction::ExactlyZero;
        }
        let mut rem_2x = rem.clone();
        rem_2x.shift_left(1);
        match rem_2x.cmp(divisor) {
            Ordering::Less => LossFraction::LessThanHalf,
            Ordering::Equal => LossFraction::ExactlyHalf,
            Ordering::Greater => LossFraction::MoreThanHalf,
        }
    }

    /// Combine the loss of accuracy with `self` more significant and `lsb`
    /// less significant.
    pub fn combine(self, lsb: LossFraction) -> LossFraction {
        if !lsb.is_exactly_zero() {
            if self.is_exactly_zero() {
                return LossFraction::LessThanHalf;
            } else if self.is_exactly_half() {
                return LossFraction::MoreThanHalf;
            }
        }
        self
    }
}

/// This is an arbitrary-size unsigned big number implementation. It is used to
/// store the significand of the floating point number. The BigInt data
/// structure is backed by `Vec<u64>`, with the least significant word first.
///
/// # Examples
///
/// ```
///    use bigfloat::BigInt;
///
///    let x = BigInt::from_u64(1995);
///    let y = BigInt::from_u64(90210);
///
///    let z = (x * y).powi(10);
///    assert!(z.as_decimal().starts_with("3564312949426686"));
/// ```
#[derive(Debug, Clone)]
pub struct BigInt {
    parts: Vec<u64>,
}

impl BigInt {
    /// Create a new zero big int number.
    pub fn zero() -> Self {
        BigInt::from_u64(0)
    }

    /// Create a new number with the value 1.
    pub fn one() -> Self {
        Self::from_u64(1)
    }

    /// Create a new number with a single '1' set at bit `bit`.
    pub fn one_hot(bit: usize) -> Self {
        let mut x = Self::zero();
        x.flip_bit(bit);
        x
    }

    /// Create a new number, where the first `bits` bits are set to 1.
    pub fn all1s(bits: usize) -> Self {
        let mut x = Self::one_hot(bits);
        let _ = x.inplace_sub(&Self::one());
        x
    }

    /// Create a number and set the lowest 64 bits to `val`.
    pub fn from_u64(val: u64) -> Self {
        BigInt { parts: vec![val] }
    }

    /// Create a number and set the lowest 128 bits to `val`.
    pub fn from_u128(val: u128) -> Self {
        BigInt {
            parts: vec![val as u64, (val >> 64) as u64],
        }
    }

    /// Create a pseudorandom number with `parts` number of parts in the word.
    /// The random number generator is initialized with `seed`.
    pub fn pseudorandom(parts: usize, seed: u32) -> Self {
        use crate::utils::Lfsr;
        let ll = Lfsr::new_with_seed(seed);
        BigInt {
            parts: ll.take(parts.max(1)).collect(),
        }
    }

    /// Construct a bigint from the words in 'parts'.
    pub fn from_parts(parts: &[u64]) -> Self {
        if parts.is_empty() {
            return Self::zero();
        }
        BigInt {
            parts: parts.to_vec(),
        }
    }

    pub fn len(&self) -> usize {
        self.parts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.parts.is_empty()
    }

    /// Returns the lowest 64 bits.
    pub fn as_u64(&self) -> u64 {
        self.parts[0]
    }

    /// Returns the lowest 128 bits.
    pub fn as_u128(&self) -> u128 {
        let hi = if self.len() > 1 { self.parts[1] } else { 0 };
        (self.parts[0] as u128) | ((hi as u128) << 64)
    }

    /// Return true if the number is equal to zero.
    pub fn is_zero(&self) -> bool {
        self.parts.iter().all(|w| *w == 0)
    }

    /// Returns true if this number is odd.
    pub fn is_odd(&self) -> bool {
        (self.parts[0] & 0x1) == 1
    }

    /// Flip the `bit_num` bit.
    pub fn flip_bit(&mut self, bit_num: usize) {
        let which_word = bit_num / u64::BITS as usize;
        let bit_in_word = bit_num % u64::BITS as usize;
        self.grow(which_word + 1);
        self.parts[which_word] ^= 1 << bit_in_word;
    }

    /// Zero out all of the bits above `bits`.
    pub fn mask(&mut self, bits: usize) {
        let mut bits = bits;
        for part in self.parts.iter_mut() {
            if bits >= 64 {
                bits -= 64;
                continue;
            }
            if bits == 0 {
                *part = 0;
                continue;
            }
            *part &= (1u64 << bits) - 1;
            bits = 0;
        }
    }

    /// Returns the fractional part that's lost during truncation at `bit`.
    pub(crate) fn get_loss_kind_for_bit(&self, bit: usize) -> LossFraction {
        if bit == 0 || self.is_zero() {
            return LossFraction::ExactlyZero;
        }
        if bit > self.len() * 64 {
            return LossFraction::LessThanHalf;
        }
        let mut a = self.clone();
        a.mask(bit);
        if a.is_zero() {
            return LossFraction::ExactlyZero;
        }
        let half = Self::one_hot(bit - 1);
        match a.cmp(&half) {
            Ordering::Less => LossFraction::LessThanHalf,
            Ordering::Equal => LossFraction::ExactlyHalf,
            Ordering::Greater => LossFraction::MoreThanHalf,
        }
    }

    /// Returns the index of the most significant bit (the highest '1'),
    /// using 1-based counting (the first bit is 1, and zero means no bits are
    /// set).
    pub fn msb_index(&self) -> usize {
        for i in (0..self.len()).rev() {
            let part = self.parts[i];
            if part != 0 {
                let idx = 64 - part.leading_zeros() as usize;
                return i * 64 + idx;
            }
        }
        0
    }

    /// Returns the index of the first '1' in the number. Zero has no set
    /// bits, and reports zero.
    pub fn trailing_zeros(&self) -> usize {
        for (i, part) in self.parts.iter().enumerate() {
            if *part != 0 {
                return i * 64 + part.trailing_zeros() as usize;
            }
        }
        0
    }

    /// Ensure that there are at least 'size' words in the bigint.
    pub fn grow(&mut self, size: usize) {
        if self.len() < size {
            self.parts.resize(size, 0);
        }
    }

    /// Remove the leading zero words from the bigint.
    fn shrink(&mut self) {
        while self.len() > 1 && self.parts[self.len() - 1] == 0 {
            self.parts.pop();
        }
    }

    /// Add `rhs` to this number.
    pub fn inplace_add(&mut self, rhs: &Self) {
        self.inplace_add_slice(&rhs.parts[..]);
    }

    /// Implements addition of the 'rhs' sequence of words to this number.
    pub(crate) fn inplace_add_slice(&mut self, rhs: &[u64]) {
        self.grow(rhs.len());
        let mut carry = false;
        for (i, part) in self.parts.iter_mut().enumerate() {
            let r = if i < rhs.len() { rhs[i] } else { 0 };
            if i >= rhs.len() && !carry {
                break;
            }
            let first = part.overflowing_add(r);
            let second = first.0.overflowing_add(carry as u64);
            carry = first.1 || second.1;
            *part = second.0;
        }
        if carry {
            self.parts.push(1);
        }
        self.shrink()
    }

    /// Subtract `rhs` from self, and return true if the operation overflowed
    /// (borrow).
    #[must_use]
    pub fn inplace_sub(&mut self, rhs: &Self) -> bool {
        self.inplace_sub_slice(&rhs.parts[..], 0)
    }

    /// Implements subtraction of the 'rhs' sequence of words to this number.
    /// The parameter `bottom_zeros` specifies how many lower *words* in `rhs`
    /// are zeros and can be ignored. This is used by the division algorithm
    /// that shifts the divisor.
    fn inplace_sub_slice(&mut self, rhs: &[u64], bottom_zeros: usize) -> bool {
        self.grow(rhs.len());
        let mut borrow = false;
        for i in bottom_zeros..self.len() {
            let r = if i < rhs.len() { rhs[i] } else { 0 };
            if i >= rhs.len() && !borrow {
                break;
            }
            let first = self.parts[i].overflowing_sub(r);
            let second = first.0.overflowing_sub(borrow as u64);
            borrow = first.1 || second.1;
            self.parts[i] = second.0;
        }
        self.shrink();
        borrow
    }

    /// Multiply self by `rhs`.
    pub fn inplace_mul(&mut self, rhs: &Self) {
        if self.len() > KARATSUBA_SIZE_THRESHOLD
            && rhs.len() > KARATSUBA_SIZE_THRESHOLD
        {
            *self = Self::mul_karatsuba(self, rhs);
            return;
        }
        self.inplace_mul_slice(rhs);
    }

    /// Implements schoolbook multiplication of the 'rhs' sequence of words
    /// to this number.
    fn inplace_mul_slice(&mut self, rhs: &[u64]) {
        let mut parts = vec![0u64; self.len() + rhs.len() + 1];
        for (i, &a) in self.parts.iter().enumerate() {
            if a == 0 {
                continue;
            }
            let mut carry: u128 = 0;
            for (j, &b) in rhs.iter().enumerate() {
                let t = a as u128 * b as u128 + parts[i + j] as u128 + carry;
                parts[i + j] = t as u64;
                carry = t >> 64;
            }
            let mut k = i + rhs.len();
            while carry != 0 {
                let t = parts[k] as u128 + carry;
                parts[k] = t as u64;
                carry = t >> 64;
                k += 1;
            }
        }
        self.parts = parts;
        self.shrink();
    }

    /// Multiply self by the single word `rhs`.
    pub fn inplace_mul_word(&mut self, rhs: u64) {
        let mut carry: u128 = 0;
        for part in self.parts.iter_mut() {
            let t = *part as u128 * rhs as u128 + carry;
            *part = t as u64;
            carry = t >> 64;
        }
        if carry != 0 {
            self.parts.push(carry as u64);
        }
        self.shrink();
    }

    /// Divide self by the single word `divisor`, and return the remainder.
    pub fn inplace_div_word(&mut self, divisor: u64) -> u64 {
        assert_ne!(divisor, 0, "division by zero");
        let mut rem: u128 = 0;
        for part in self.parts.iter_mut().rev() {
            let cur = (rem << 64) | *part as u128;
            *part = (cur / divisor as u128) as u64;
            rem = cur % divisor as u128;
        }
        self.shrink();
        rem as u64
    }

    /// Divide self by `divisor`, and return the remainder.
    pub fn inplace_div(&mut self, divisor: &Self) -> Self {
        let divisor_msb = divisor.msb_index();
        assert_ne!(divisor_msb, 0, "division by zero");

        if divisor_msb <= 64 {
            let rem = self.inplace_div_word(divisor.as_u64());
            return Self::from_u64(rem);
        }

        let dividend_msb = self.msb_index();
        if divisor_msb > dividend_msb {
            let ret = self.clone();
            *self = Self::zero();
            return ret;
        }

        let mut dividend = self.clone();
        let mut divisor = divisor.clone();
        let mut quotient = Self::zero();

        // Align the first bit of the divisor with the first bit of the
        // dividend.
        let bits = dividend_msb - divisor_msb;
        divisor.shift_left(bits);

        // Perform the long division.
        for i in (0..bits + 1).rev() {
            // Find out how many of the lower words of the divisor are zeros.
            let low_zeros = i / 64;

            if dividend >= divisor {
                let overflow = dividend.inplace_sub_slice(&divisor, low_zeros);
                debug_assert!(!overflow);
                quotient.flip_bit(i);
            }
            divisor.shift_right(1);
        }

        *self = quotient;
        self.shrink();
        dividend
    }

    /// Returns the integer square root of the number (the largest `r` such
    /// that `r*r <= self`), and the remainder `self - r*r`.
    pub fn sqrt_rem(&self) -> (Self, Self) {
        if self.is_zero() {
            return (Self::zero(), Self::zero());
        }

        // Seed Newton's method with a native estimate of the top bits. The
        // seed must not be below the root, so round the estimate up.
        let msb = self.msb_index();
        let mut shift = msb.saturating_sub(104);
        shift += shift & 1;
        let mut top = self.clone();
        top.shift_right(shift);
        let estimate = ((top.as_u128() + 1) as f64).sqrt() as u128 + 2;
        let mut x = Self::from_u128(estimate);
        x.shift_left(shift / 2);

        // Walk down to the root: x = (x + self / x) / 2.
        loop {
            let mut y = self.clone();
            y.inplace_div(&x);
            y.inplace_add(&x);
            y.shift_right(1);
            if y >= x {
                break;
            }
            x = y;
        }

        let rem = self.clone() - &(&x * &x);
        (x, rem)
    }

    /// Shift the bits in the numbers `bits` to the left.
    pub fn shift_left(&mut self, bits: usize) {
        if bits == 0 || self.is_zero() {
            return;
        }
        let words_to_shift = bits / u64::BITS as usize;
        let bits_in_word = bits % u64::BITS as usize;

        let old_len = self.len();
        self.parts.resize(old_len + words_to_shift + 1, 0);

        for i in (0..self.len()).rev() {
            let left_val = if i >= words_to_shift {
                self.parts[i - words_to_shift]
            } else {
                0
            };
            if bits_in_word == 0 {
                self.parts[i] = left_val;
                continue;
            }
            let right_val = if i > words_to_shift {
                self.parts[i - words_to_shift - 1]
            } else {
                0
            };
            let right = right_val >> (u64::BITS as usize - bits_in_word);
            let left = left_val << bits_in_word;
            self.parts[i] = left | right;
        }
        self.shrink();
    }

    /// Shift the bits in the numbers `bits` to the right.
    pub fn shift_right(&mut self, bits: usize) {
        if bits == 0 {
            return;
        }
        let words_to_shift = bits / u64::BITS as usize;
        let bits_in_word = bits % u64::BITS as usize;
        let len = self.len();

        for i in 0..len {
            let left_val = if i + words_to_shift < len {
                self.parts[i + words_to_shift]
            } else {
                0
            };
            if bits_in_word == 0 {
                self.parts[i] = left_val;
                continue;
            }
            let right_val = if i + 1 + words_to_shift < len {
                self.parts[i + 1 + words_to_shift]
            } else {
                0
            };
            let right = right_val << (u64::BITS as usize - bits_in_word);
            let left = left_val >> bits_in_word;
            self.parts[i] = left | right;
        }
        self.shrink();
    }

    /// Raise this number to the power of `exp` and return the value.
    pub fn powi(&self, mut exp: u64) -> Self {
        let mut v = Self::one();
        let mut base = self.clone();
        loop {
            if exp & 0x1 == 1 {
                v.inplace_mul(&base);
            }
            exp >>= 1;
            if exp == 0 {
                break;
            }
            base.inplace_mul(&base.clone());
        }
        v
    }

    /// Returns the word at idx `idx`.
    pub fn get_part(&self, idx: usize) -> u64 {
        self.parts[idx]
    }
}

/// Shift `val` by `bits`, and report the loss.
pub(crate) fn shift_right_with_loss(
    val: &BigInt,
    bits: usize,
) -> (BigInt, LossFraction) {
    let mut val = val.clone();
    let loss = val.get_loss_kind_for_bit(bits);
    val.shift_right(bits);
    (val, loss)
}

impl Default for BigInt {
    fn default() -> Self {
        Self::zero()
    }
}

impl Eq for BigInt {}

impl PartialEq for BigInt {
    fn eq(&self, other: &BigInt) -> bool {
        self.cmp(other).is_eq()
    }
}
impl PartialOrd for BigInt {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}
impl Ord for BigInt {
    fn cmp(&self, other: &Self) -> Ordering {
        // This part word is longer.
        if self.len() > other.len()
            && self.parts[other.len()..].iter().any(|&x| x != 0)
        {
            return Ordering::Greater;
        }

        // The other word is longer.
        if other.len() > self.len()
            && other.parts[self.len()..].iter().any(|&x| x != 0)
        {
            return Ordering::Less;
        }
        let same_len = other.len().min(self.len());

        // Compare all of the digits, from MSB to LSB.
        for i in (0..same_len).rev() {
            match self.parts[i].cmp(&other.parts[i]) {
                Ordering::Equal => {}
                ord => return ord,
            }
        }
        Ordering::Equal
    }
}

macro_rules! declare_operator {
    ($trait_name:ident,
     $func_name:ident,
     $func_impl_name:ident) => {
        // Self + Self
        impl $trait_name for BigInt {
            type Output = Self;

            fn $func_name(self, rhs: Self) -> Self::Output {
                self.$func_name(&rhs)
            }
        }

        // Self + &Self -> Self
        impl $trait_name<&Self> for BigInt {
            type Output = Self;
            fn $func_name(self, rhs: &Self) -> Self::Output {
                let mut n = self;
                let _ = n.$func_impl_name(rhs);
                n
            }
        }

        // &Self + &Self -> Self
        impl $trait_name<Self> for &BigInt {
            type Output = BigInt;
            fn $func_name(self, rhs: Self) -> Self::Output {
                let mut n = self.clone();
                let _ = n.$func_impl_name(rhs);
                n
            }
        }
    };
}

declare_operator!(Add, add, inplace_add);
declare_operator!(Sub, sub, inplace_sub);
declare_operator!(Mul, mul, inplace_mul);

macro_rules! declare_assign_operator {
    ($trait_name:ident,
     $func_name:ident,
     $func_impl_name:ident) => {
        impl $trait_name for BigInt {
            fn $func_name(&mut self, rhs: Self) {
                let _ = self.$func_impl_name(&rhs);
            }
        }

        impl $trait_name<&BigInt> for BigInt {
            fn $func_name(&mut self, rhs: &Self) {
                let _ = self.$func_impl_name(rhs);
            }
        }
    };
}

declare_assign_operator!(AddAssign, add_assign, inplace_add);
declare_assign_operator!(SubAssign, sub_assign, inplace_sub);
declare_assign_operator!(MulAssign, mul_assign, inplace_mul);

/// Bigint numbers above this size use the karatsuba algorithm for
/// multiplication. The number represents the number of words in the bigint.
/// Numbers below this threshold use the traditional O(n^2) multiplication.
const KARATSUBA_SIZE_THRESHOLD: usize = 64;

impl BigInt {
    fn mul_karatsuba(lhs: &[u64], rhs: &[u64]) -> BigInt {
        // Algorithm description:
        // https://en.wikipedia.org/wiki/Karatsuba_algorithm

        // Handle small numbers using the traditional O(n^2) algorithm.
        if lhs.len().min(rhs.len()) < KARATSUBA_SIZE_THRESHOLD {
            // Handle zero-sized inputs.
            if lhs.is_empty() || rhs.is_empty() {
                return BigInt::zero();
            }
            let mut lhs = BigInt::from_parts(lhs);
            lhs.inplace_mul_slice(rhs);
            return lhs;
        }

        // Split the big-int into two parts. One of the parts might be
        // zero-sized.
        let mid = lhs.len().max(rhs.len()) / 2;
        let a = &lhs[0..mid.min(lhs.len())];
        let b = &lhs[mid.min(lhs.len())..];
        let c = &rhs[0..mid.min(rhs.len())];
        let d = &rhs[mid.min(rhs.len())..];

        // Compute 'a*c' and 'b*d'.
        let ac = Self::mul_karatsuba(a, c);
        let mut bd = Self::mul_karatsuba(b, d);

        // Compute (a+b) * (c+d).
        let mut a_b = BigInt::from_parts(a);
        a_b.inplace_add_slice(b);
        let mut c_d = BigInt::from_parts(c);
        c_d.inplace_add_slice(d);

        let mut ad_plus_bc = Self::mul_karatsuba(&a_b, &c_d);

        // Compute (a+b) * (c+d) - ac - bd
        let _ = ad_plus_bc.inplace_sub_slice(&ac, 0);
        let _ = ad_plus_bc.inplace_sub_slice(&bd, 0);

        // Add the parts of the word together.
        bd.shift_left(64 * mid * 2);
        ad_plus_bc.shift_left(64 * mid);
        bd.inplace_add(&ad_plus_bc);
        bd.inplace_add(&ac);
        bd
    }
}

impl Deref for BigInt {
    type Target = [u64];

    fn deref(&self) -> &Self::Target {
        &self.parts[..]
    }
}

#[test]
fn test_powi5() {
    let lookup = [1, 5, 25, 125, 625, 3125, 15625, 78125];
    for (i, val) in lookup.iter().enumerate() {
        let five = BigInt::from_u64(5);
        assert_eq!(five.powi(i as u64).as_u64(), *val);
    }

    // 15 ^ 16
    let v15 = BigInt::from_u64(15);
    assert_eq!(v15.powi(16).as_u64(), 6568408355712890625);
}

#[test]
fn test_shifts() {
    let mut x = BigInt::from_u64(0xff00ff);
    x.shift_left(17);
    assert_eq!(x.get_part(0), 0x1fe01fe0000);
    x.shift_left(64);
    assert_eq!(x.get_part(1), 0x1fe01fe0000);
    x.shift_right(64 + 17);
    assert_eq!(x.as_u64(), 0xff00ff);
    assert_eq!(x.len(), 1);

    let mut y = BigInt::from_u64(0xff00ff);
    y.shift_left(128);
    assert_eq!(y.get_part(2), 0xff00ff);
    y.shift_right(17);
    assert_eq!(y.get_part(1), 0x807f800000000000);
}

#[test]
fn test_mul_add_sub() {
    let mut x = BigInt::from_u64(0xffff_ffff_ffff_ffff);
    x.inplace_mul(&x.clone());
    x.inplace_mul(&BigInt::from_u64(25));
    assert_eq!(x.get_part(0), 0x19);
    assert_eq!(x.get_part(1), 0xffff_ffff_ffff_ffce);
    assert_eq!(x.get_part(2), 0x18);

    let mut y = BigInt::from_u64(0xffffffff00000000);
    y.inplace_add(&BigInt::from_u64(0xffffffff));
    y.inplace_add(&BigInt::from_u64(0xf));
    assert_eq!(y.get_part(0), 0xe);
    assert_eq!(y.get_part(1), 0x1);

    let mut z = BigInt::from_parts(&[0x0, 0x1]);
    assert!(!z.inplace_sub(&BigInt::one()));
    assert_eq!(z.get_part(0), u64::MAX);
    assert_eq!(z.len(), 1);
    assert!(z.inplace_sub(&BigInt::from_parts(&[0, 1])));
}

#[test]
fn test_division() {
    let mut x = BigInt::from_u64(703);
    let rem = x.inplace_div(&BigInt::from_u64(7));
    assert_eq!((x.as_u64(), rem.as_u64()), (100, 3));

    // Multi-word divisor, checked against native 128-bit division.
    let mut lfsr = crate::utils::Lfsr::new();
    for _ in 0..2000 {
        let a = (lfsr.get64() as u128) << 64 | lfsr.get64() as u128;
        let b = ((lfsr.get64() as u128) << 64 | lfsr.get64() as u128) >> 40;
        let b = b.max(1);
        let mut q = BigInt::from_u128(a);
        let r = q.inplace_div(&BigInt::from_u128(b));
        assert_eq!(q.as_u128(), a / b);
        assert_eq!(r.as_u128(), a % b);
    }
}

#[test]
fn test_sqrt_rem() {
    for v in [0u128, 1, 2, 3, 4, 15, 16, 17, 1 << 100, (1 << 100) + 7] {
        let (r, rem) = BigInt::from_u128(v).sqrt_rem();
        let r = r.as_u128();
        assert!(r * r <= v && (r + 1) * (r + 1) > v, "sqrt({})", v);
        assert_eq!(rem.as_u128(), v - r * r);
    }

    // A large perfect square.
    let x = BigInt::pseudorandom(40, 7);
    let (r, rem) = (&x * &x).sqrt_rem();
    assert_eq!(r, x);
    assert!(rem.is_zero());
}

#[test]
fn test_msb_and_trailing_zeros() {
    assert_eq!(BigInt::from_u64(0xffffffff00000000).msb_index(), 64);
    assert_eq!(BigInt::zero().msb_index(), 0);
    for i in 0..256 {
        let x = BigInt::one_hot(i);
        assert_eq!(x.msb_index(), i + 1);
        assert_eq!(x.trailing_zeros(), i);
    }
    assert_eq!(BigInt::all1s(5).as_u64(), 0b11111);
}

#[test]
fn test_loss_kind() {
    let check = |v: u64, bits: usize| BigInt::from_u64(v).get_loss_kind_for_bit(bits);
    assert!(check(0b10000000, 3).is_exactly_zero());
    assert!(check(0b10000111, 3).is_mt_half());
    assert!(check(0b10000100, 3).is_exactly_half());
    assert_eq!(check(0b10000001, 3), LossFraction::LessThanHalf);
}

#[test]
fn test_mul_karatsuba() {
    let mut ll = crate::utils::Lfsr::new();

    // Compare the multiplication of karatsuba to the direct multiplication on
    // two random numbers of lengths 'l' and 'r'.
    fn test_sizes(l: usize, r: usize, ll: &mut crate::utils::Lfsr) {
        let mut a = BigInt::from_parts(&ll.take(l).collect::<Vec<_>>());
        let b = BigInt::from_parts(&ll.take(r).collect::<Vec<_>>());
        let res = BigInt::mul_karatsuba(&a, &b);
        a.inplace_mul_slice(&b);
        assert_eq!(res, a);
    }

    test_sizes(1, 1, &mut ll);
    test_sizes(100, 100, &mut ll);
    test_sizes(300, 129, &mut ll);
    for i in 64..70 {
        for j in 60..70 {
            test_sizes(i, j, &mut ll);
        }
    }
}
