//! `otpkit-core` — HOTP (RFC 4226) and TOTP (RFC 6238) one-time passwords.
//!
//! Built on a from-scratch RFC 4648 Base32 codec for shared secrets.
//! Zero network, zero async, no internal state between calls: callers own
//! the last accepted counter or timestamp.

#![cfg_attr(test, allow(clippy::unwrap_used, clippy::arithmetic_side_effects))]

pub mod error;

pub mod base32;
pub mod secret;

pub mod otp;

pub mod hotp;
pub mod totp;

pub mod uri;

pub use error::OtpError;
pub use hotp::Hotp;
pub use otp::{compute, verify, OtpAlgorithm, OtpConfig, OtpDigits, MAX_SEARCH_STEPS};
pub use secret::{Secret, DEFAULT_SECRET_LEN};
pub use totp::{Totp, TotpConfig, VerifyWindow, DEFAULT_PERIOD};
pub use uri::OtpKind;
