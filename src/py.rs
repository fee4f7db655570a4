use crate::{Error, Float, ParseError, RoundingMode};
use pyo3::exceptions::PyValueError;
use pyo3::prelude::*;

impl From<Error> for PyErr {
    fn from(err: Error) -> PyErr {
        PyValueError::new_err(err.to_string())
    }
}

impl From<ParseError> for PyErr {
    fn from(err: ParseError) -> PyErr {
        PyValueError::new_err(err.to_string())
    }
}

fn parse_rounding_mode(rm: &str) -> PyResult<RoundingMode> {
    RoundingMode::from_string(rm)
        .ok_or_else(|| PyValueError::new_err("Invalid rounding mode"))
}

/// A class representing arbitrary precision floating-point numbers.
///
/// Every number carries its precision (in bits) and rounding mode. Results
/// of arithmetic take the larger precision of the operands.
#[pyclass]
struct PyFloat {
    inner: Float,
}

impl From<Float> for PyFloat {
    fn from(inner: Float) -> Self {
        PyFloat { inner }
    }
}

#[pymethods]
impl PyFloat {
    /// Create a new floating-point number.
    ///
    /// Args:
    ///     value: A decimal string, like "1.5e-3", "inf" or "nan"
    ///     prec: The precision in bits
    ///     rounding_mode: The rounding mode to use:
    ///         "NearestTiesToEven", "NearestTiesToAway", "Zero",
    ///         "AwayFromZero", "Positive", "Negative"
    #[new]
    #[pyo3(signature = (value, prec, rounding_mode = "NearestTiesToEven"))]
    fn new(value: &str, prec: usize, rounding_mode: &str) -> PyResult<Self> {
        let rm = parse_rounding_mode(rounding_mode)?;
        Ok(Float::parse_with_rm(value, prec, rm)?.into())
    }

    fn __str__(&self) -> String {
        self.inner.to_string()
    }
    fn __repr__(&self) -> String {
        format!(
            "Float({}, prec={}, {})",
            self.inner,
            self.inner.get_precision(),
            self.inner.get_rounding_mode().as_string()
        )
    }
    /// Returns the precision of the number in bits.
    fn get_precision(&self) -> usize {
        self.inner.get_precision()
    }
    /// Returns the number rounded to `prec` bits.
    fn with_precision(&self, prec: usize) -> PyFloat {
        self.inner.with_precision(prec).into()
    }
    /// Get rounding mode of the number.
    fn get_rounding_mode(&self) -> String {
        self.inner.get_rounding_mode().as_string().to_string()
    }
    /// Returns the exponent of the float.
    fn get_exponent(&self) -> i64 {
        self.inner.get_exp()
    }
    /// Returns the category of the float.
    fn get_category(&self) -> String {
        format!("{:?}", self.inner.get_category())
    }
    fn is_negative(&self) -> bool {
        self.inner.is_negative()
    }
    fn is_inf(&self) -> bool {
        self.inner.is_inf()
    }
    fn is_nan(&self) -> bool {
        self.inner.is_nan()
    }
    fn is_zero(&self) -> bool {
        self.inner.is_zero()
    }
    fn is_int(&self) -> bool {
        self.inner.is_int()
    }

    fn __add__(&self, other: &PyFloat) -> PyFloat {
        (&self.inner + &other.inner).into()
    }
    fn __sub__(&self, other: &PyFloat) -> PyFloat {
        (&self.inner - &other.inner).into()
    }
    fn __mul__(&self, other: &PyFloat) -> PyFloat {
        (&self.inner * &other.inner).into()
    }
    fn __truediv__(&self, other: &PyFloat) -> PyFloat {
        (&self.inner / &other.inner).into()
    }
    fn __neg__(&self) -> PyFloat {
        self.inner.neg().into()
    }
    fn __abs__(&self) -> PyFloat {
        self.inner.abs().into()
    }
    fn __lt__(&self, other: &PyFloat) -> bool {
        self.inner < other.inner
    }
    fn __le__(&self, other: &PyFloat) -> bool {
        self.inner <= other.inner
    }
    fn __eq__(&self, other: &PyFloat) -> bool {
        self.inner == other.inner
    }
    fn __ne__(&self, other: &PyFloat) -> bool {
        self.inner != other.inner
    }
    fn __gt__(&self, other: &PyFloat) -> bool {
        self.inner > other.inner
    }
    fn __ge__(&self, other: &PyFloat) -> bool {
        self.inner >= other.inner
    }

    /// Returns the square root of the number.
    fn sqrt(&self) -> PyResult<PyFloat> {
        let res = self.inner.checked_sqrt().map_err(Error::from)?;
        Ok(res.into())
    }
    /// Returns the natural logarithm of the number.
    fn log(&self) -> PyResult<PyFloat> {
        Ok(self.inner.log()?.into())
    }
    /// Returns e raised to the power of the number.
    fn exp(&self) -> PyResult<PyFloat> {
        Ok(self.inner.exp()?.into())
    }
    /// Returns the number raised to the power of `w`.
    fn pow(&self, w: &PyFloat) -> PyResult<PyFloat> {
        Ok(self.inner.pow(&w.inner)?.into())
    }
    /// Returns the number raised to the power of `n` which is an integer.
    fn powi(&self, n: u64) -> PyFloat {
        self.inner.powi(n).into()
    }
    /// Returns the arithmetic-geometric mean of the number and `b`.
    fn agm(&self, b: &PyFloat) -> PyResult<PyFloat> {
        Ok(self.inner.agm(&b.inner)?.into())
    }
    /// Returns the number rounded to an integer with the rounding mode `rm`.
    fn round(&self, rm: &str) -> PyResult<PyFloat> {
        let rm = parse_rounding_mode(rm)?;
        Ok(self.inner.round(rm)?.into())
    }
    /// convert to f64.
    fn to_float64(&self) -> f64 {
        self.inner.as_f64()
    }
} // impl PyFloat

/// Returns the mathematical constant pi with `prec` bits.
#[pyfunction]
fn pi(prec: usize) -> PyFloat {
    Float::pi(prec).into()
}

/// Returns a new float with the fp64 value 'val' (53 bits).
#[pyfunction]
fn from_fp64(val: f64) -> PyFloat {
    Float::from_f64(val).into()
}

/// Returns a new float with the integer value 'val' and `prec` bits.
#[pyfunction]
fn from_i64(prec: usize, val: i64) -> PyFloat {
    Float::from_i64(prec, val).into()
}

#[pymodule]
fn _bigfloat(m: &Bound<'_, PyModule>) -> PyResult<()> {
    m.add_class::<PyFloat>()?;
    m.add_function(wrap_pyfunction!(pi, m)?)?;
    m.add_function(wrap_pyfunction!(from_fp64, m)?)?;
    m.add_function(wrap_pyfunction!(from_i64, m)?)?;
    Ok(())
}
