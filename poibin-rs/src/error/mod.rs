//! Crate-level error type unifying the kernel error layers.

use core::{error, fmt};

use crate::kernel::{ConfigError, ExecInvariantViolation};

#[cfg(feature = "alloc")]
use alloc::string::{String, ToString};

/// Errors surfaced by the distribution construction and query API.
#[derive(Debug, Clone, PartialEq)]
pub enum Error {
    /// Input probabilities or requested outcomes were invalid.
    #[cfg(feature = "alloc")]
    InvalidInput {
        /// The rejected argument.
        arg: String,
        /// Why the argument was rejected.
        reason: String,
    },
    /// Input probabilities or requested outcomes were invalid.
    #[cfg(not(feature = "alloc"))]
    InvalidInput,
    /// Spectral inversion violated the real-valuedness invariant, so no
    /// usable distribution could be produced.
    #[cfg(feature = "alloc")]
    NumericalIntegrity {
        /// Why the computed mass vector could not be trusted.
        reason: String,
    },
    /// Spectral inversion violated the real-valuedness invariant.
    #[cfg(not(feature = "alloc"))]
    NumericalIntegrity,
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            #[cfg(feature = "alloc")]
            Error::InvalidInput { arg, reason } => {
                write!(f, "Invalid input `{arg}`: {reason}")
            }
            #[cfg(not(feature = "alloc"))]
            Error::InvalidInput => write!(f, "Invalid input."),
            #[cfg(feature = "alloc")]
            Error::NumericalIntegrity { reason } => {
                write!(f, "Numerical integrity failure: {reason}")
            }
            #[cfg(not(feature = "alloc"))]
            Error::NumericalIntegrity => write!(f, "Numerical integrity failure."),
        }
    }
}

impl error::Error for Error {}

#[cfg(feature = "alloc")]
impl From<ConfigError> for Error {
    fn from(value: ConfigError) -> Self {
        let arg = match &value {
            ConfigError::EmptyInput { arg }
            | ConfigError::InvalidArgument { arg, .. }
            | ConfigError::NonContiguous { arg }
            | ConfigError::LengthMismatch { arg, .. } => *arg,
            ConfigError::NegativeProbability { .. }
            | ConfigError::ProbabilityExceedsOne { .. } => "probabilities",
        };
        Error::InvalidInput {
            arg: arg.to_string(),
            reason: value.to_string(),
        }
    }
}

#[cfg(not(feature = "alloc"))]
impl From<ConfigError> for Error {
    fn from(_: ConfigError) -> Self {
        Error::InvalidInput
    }
}

#[cfg(feature = "alloc")]
impl From<ExecInvariantViolation> for Error {
    fn from(value: ExecInvariantViolation) -> Self {
        let reason = value.to_string();
        match value {
            ExecInvariantViolation::Config(err) => err.into(),
            ExecInvariantViolation::ResidualImaginary { .. } => {
                Error::NumericalIntegrity { reason }
            }
            ExecInvariantViolation::OutOfSupport { arg, .. }
            | ExecInvariantViolation::LengthMismatch { arg, .. } => Error::InvalidInput {
                arg: arg.to_string(),
                reason,
            },
            ExecInvariantViolation::InvalidState { .. } => Error::InvalidInput {
                arg: "input".to_string(),
                reason,
            },
        }
    }
}

#[cfg(not(feature = "alloc"))]
impl From<ExecInvariantViolation> for Error {
    fn from(value: ExecInvariantViolation) -> Self {
        match value {
            ExecInvariantViolation::ResidualImaginary { .. } => Error::NumericalIntegrity,
            _ => Error::InvalidInput,
        }
    }
}
