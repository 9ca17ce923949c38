//! Shared error types used across submodules.

use thiserror::Error;

use crate::charges::ChargeId;
use crate::math::Scalar;

/// Top-level error type for the crate.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SandboxError {
    /// Raised when textual charge input does not parse to a real number.
    #[error("invalid charge magnitude: {0:?}")]
    InvalidMagnitude(String),
    /// Raised when a charge magnitude is NaN or infinite.
    #[error("charge magnitude must be finite, got {0}")]
    NonFiniteMagnitude(Scalar),
    /// Raised when a command references a charge that is not in the store.
    #[error("unknown charge {0}")]
    UnknownCharge(ChargeId),
    /// Raised when the configuration is internally inconsistent.
    #[error("configuration error: {0}")]
    InvalidConfig(String),
}
