//! Arbitrary-precision binary floating point numbers, and the elementary
//! functions on top of them: the natural logarithm, the exponential, the
//! power function, the arithmetic-geometric mean, pi, and rounding to an
//! integer.
//!
//! Every `Float` carries its own precision (in bits) and rounding mode. The
//! functions come in two forms: `set_log(&z)` writes into an existing
//! destination and uses its precision and rounding mode (or the input's
//! precision, if the destination's is unset), and `z.log()` returns a fresh
//! value. Arguments outside of the domain of a function are reported as
//! `Error::Domain`.
//!
//! ```
//! use bigfloat::{Float, RoundingMode};
//!
//! let two = Float::from_u64(200, 2);
//! let ln2 = two.log().unwrap();
//! let back = ln2.exp().unwrap();
//! assert_eq!(back.as_f64(), 2.0);
//!
//! let x = Float::from_f64(2.5);
//! let r = x.round(RoundingMode::NearestTiesToEven).unwrap();
//! assert_eq!(r.as_f64(), 2.0);
//! ```

mod arithmetic;
mod bigint;
mod cast;
mod error;
mod float;
mod operations;
mod string;
mod utils;

#[cfg(feature = "python")]
mod py;

pub use self::bigint::BigInt;
pub use self::error::{Error, InvalidResult, Result};
pub use self::float::{
    Category, Float, RoundingMode, DEFAULT_PRECISION, MAX_EXP, MIN_EXP,
};
pub use self::operations::{
    newton, pi_cache, PiCache, GUARD_BITS, INITIAL_PI_PRECISION,
};
pub use self::string::ParseError;
