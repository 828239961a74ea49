//! Error types for `otpkit-core`.

use thiserror::Error;

/// Errors produced by encoding, configuration, and provisioning.
///
/// A verification miss is not an error: verifiers report it as
/// `Ok(None)` (or `false` from [`crate::otp::verify`]).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum OtpError {
    /// Malformed Base32 text: a character outside the alphabet, or a data
    /// character after padding has started.
    #[error("invalid Base32 encoding: {0}")]
    InvalidEncoding(String),

    /// A parameter is out of range (digits, period, digest name, secret
    /// length, search window, pre-epoch time).
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// The OS random source failed while generating a secret.
    #[error("random source failure: {0}")]
    RandomSource(String),
}
