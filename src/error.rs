//! Error types. The float engine reports invalid operations as
//! `InvalidResult`, and the elementary functions wrap it in `Error::Domain`
//! so that both can be handled through the same source chain.

use crate::string::ParseError;
use thiserror::Error;

/// An operation produced a result that is not a number (for example
/// `inf - inf` or the logarithm of a negative value).
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Error)]
#[error("invalid floating-point result")]
pub struct InvalidResult;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    /// The argument is outside the domain of the function.
    #[error("{msg}")]
    Domain {
        msg: &'static str,
        source: InvalidResult,
    },

    #[error(transparent)]
    Parse(#[from] ParseError),
}

impl Error {
    pub(crate) fn domain(msg: &'static str) -> Self {
        Error::Domain {
            msg,
            source: InvalidResult,
        }
    }

    /// Returns true if the error is an invalid floating-point result, which
    /// is the case for every domain error.
    pub fn is_invalid_result(&self) -> bool {
        matches!(self, Error::Domain { .. })
    }
}

impl From<InvalidResult> for Error {
    fn from(source: InvalidResult) -> Self {
        Error::Domain {
            msg: "invalid floating-point result",
            source,
        }
    }
}

pub type Result<T> = core::result::Result<T, Error>;

#[test]
fn test_domain_error_source() {
    use std::error::Error as _;

    let err = Error::domain("Log: argument is negative");
    assert_eq!(err.to_string(), "Log: argument is negative");
    assert!(err.is_invalid_result());
    let source = err.source().and_then(|s| s.downcast_ref::<InvalidResult>());
    assert_eq!(source, Some(&InvalidResult));

    let err: Error = InvalidResult.into();
    assert!(err.is_invalid_result());

    let err: Error = ParseError::InputEmpty.into();
    assert!(!err.is_invalid_result());
    assert_eq!(err.to_string(), "the input provided was empty");
}
