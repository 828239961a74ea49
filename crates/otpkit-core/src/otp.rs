//! RFC 4226 one-time password engine shared by HOTP and TOTP.
//!
//! [`compute`] turns a secret and a moving factor (counter or time step)
//! into a fixed-width decimal code using `ring::hmac` and dynamic
//! truncation. [`verify`] compares a candidate against it.

use std::fmt;
use std::str::FromStr;

use ring::hmac;
use serde::{Deserialize, Serialize};

use crate::OtpError;

// ── Constants ───────────────────────────────────────────────────────

/// Default code length.
pub const DEFAULT_DIGITS: u8 = 6;

/// Longest supported code. The truncated value is below 2^31, so more
/// digits would only add leading zeros.
pub const MAX_DIGITS: u8 = 10;

/// Upper bound on HMAC evaluations a single verification may perform.
pub const MAX_SEARCH_STEPS: u64 = 1_000;

// ── Types ───────────────────────────────────────────────────────────

/// HMAC digest used for OTP generation.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum OtpAlgorithm {
    /// HMAC-SHA1 (what most authenticator apps expect).
    #[default]
    Sha1,
    /// HMAC-SHA256.
    Sha256,
    /// HMAC-SHA384.
    Sha384,
    /// HMAC-SHA512.
    Sha512,
}

impl OtpAlgorithm {
    /// Canonical upper-case name, as used in `otpauth://` URIs.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Sha1 => "SHA1",
            Self::Sha256 => "SHA256",
            Self::Sha384 => "SHA384",
            Self::Sha512 => "SHA512",
        }
    }

    fn to_ring_algorithm(self) -> hmac::Algorithm {
        match self {
            Self::Sha1 => hmac::HMAC_SHA1_FOR_LEGACY_USE_ONLY,
            Self::Sha256 => hmac::HMAC_SHA256,
            Self::Sha384 => hmac::HMAC_SHA384,
            Self::Sha512 => hmac::HMAC_SHA512,
        }
    }
}

impl fmt::Display for OtpAlgorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for OtpAlgorithm {
    type Err = OtpError;

    /// Parse a digest name case-insensitively, with or without a dash
    /// (`sha1`, `SHA-256`, ...).
    fn from_str(name: &str) -> Result<Self, Self::Err> {
        let normalized = name.trim().replace('-', "").to_ascii_uppercase();
        match normalized.as_str() {
            "SHA1" => Ok(Self::Sha1),
            "SHA256" => Ok(Self::Sha256),
            "SHA384" => Ok(Self::Sha384),
            "SHA512" => Ok(Self::Sha512),
            _ => Err(OtpError::InvalidArgument(format!(
                "unsupported digest {name:?}"
            ))),
        }
    }
}

/// Number of decimal digits in a code, validated to `1..=10`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct OtpDigits(u8);

impl OtpDigits {
    /// 6-digit code (standard).
    pub const SIX: Self = Self(6);
    /// 8-digit code.
    pub const EIGHT: Self = Self(8);

    /// Validate a digit count.
    ///
    /// # Errors
    /// Returns `OtpError::InvalidArgument` unless `1 <= digits <= 10`.
    pub fn new(digits: u8) -> Result<Self, OtpError> {
        if (1..=MAX_DIGITS).contains(&digits) {
            Ok(Self(digits))
        } else {
            Err(OtpError::InvalidArgument(format!(
                "digits must be between 1 and {MAX_DIGITS}, got {digits}"
            )))
        }
    }

    /// Return the numeric digit count.
    #[must_use]
    pub const fn value(self) -> u8 {
        self.0
    }

    /// `10^digits`, the truncation modulus.
    #[must_use]
    const fn modulus(self) -> u64 {
        10u64.pow(self.0 as u32)
    }
}

impl Default for OtpDigits {
    fn default() -> Self {
        Self(DEFAULT_DIGITS)
    }
}

impl TryFrom<u8> for OtpDigits {
    type Error = OtpError;

    fn try_from(digits: u8) -> Result<Self, Self::Error> {
        Self::new(digits)
    }
}

impl From<OtpDigits> for u8 {
    fn from(digits: OtpDigits) -> Self {
        digits.0
    }
}

/// Code shape shared by HOTP and TOTP: fixed at construction.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct OtpConfig {
    /// Output code length.
    pub digits: OtpDigits,
    /// HMAC digest.
    pub algorithm: OtpAlgorithm,
}

impl OtpConfig {
    /// Configuration with explicit digits and digest.
    #[must_use]
    pub const fn new(digits: OtpDigits, algorithm: OtpAlgorithm) -> Self {
        Self { digits, algorithm }
    }
}

// ── Engine ──────────────────────────────────────────────────────────

/// Compute the code for `moving_factor` (RFC 4226 §5.3).
///
/// The factor is hashed as an 8-byte big-endian integer. An empty secret
/// still yields a deterministic code; it can never verify (see [`verify`]).
#[must_use = "OTP code should be used or stored"]
pub fn compute(
    secret: &[u8],
    moving_factor: u64,
    digits: OtpDigits,
    algorithm: OtpAlgorithm,
) -> String {
    let key = hmac::Key::new(algorithm.to_ring_algorithm(), secret);
    let tag = hmac::sign(&key, &moving_factor.to_be_bytes());
    let binary_code = dynamic_truncate(tag.as_ref());

    // modulus is 10^digits with digits >= 1, never zero.
    #[allow(clippy::arithmetic_side_effects)]
    let code = u64::from(binary_code) % digits.modulus();
    let width = usize::from(digits.value());

    format!("{code:0>width$}")
}

/// Dynamic truncation: 31 bits read at the offset named by the last nibble.
///
/// SHA-1 yields the shortest tag (20 bytes); the offset is at most 15, so
/// `offset + 3` is always in bounds.
fn dynamic_truncate(mac: &[u8]) -> u32 {
    let last = mac.last().copied().unwrap_or_default();
    let offset = usize::from(last & 0x0F);

    let mut word = [0u8; 4];
    if let Some(window) = mac.get(offset..offset.saturating_add(4)) {
        word.copy_from_slice(window);
    }
    u32::from_be_bytes(word) & 0x7FFF_FFFF
}

/// Check `candidate` against the code for `moving_factor`.
///
/// Empty candidates never match.
#[must_use = "verification result should be checked"]
pub fn verify(
    secret: &[u8],
    candidate: &str,
    moving_factor: u64,
    digits: OtpDigits,
    algorithm: OtpAlgorithm,
) -> bool {
    let expected = compute(secret, moving_factor, digits, algorithm);
    codes_match(candidate.as_bytes(), expected.as_bytes())
}

/// Constant-time byte comparison for OTP codes.
///
/// Returns `false` for empty input on either side, otherwise `true` iff
/// both slices have equal length and contents. The length check returns
/// early: code length is public configuration, only the value is secret.
fn codes_match(a: &[u8], b: &[u8]) -> bool {
    if a.is_empty() || b.is_empty() || a.len() != b.len() {
        return false;
    }
    let mut diff = 0u8;
    for (x, y) in a.iter().zip(b.iter()) {
        diff |= x ^ y;
    }
    diff == 0
}

/// Reject search windows that would cost more than [`MAX_SEARCH_STEPS`].
pub(crate) fn check_search_steps(steps: u64) -> Result<(), OtpError> {
    if steps > MAX_SEARCH_STEPS {
        tracing::warn!(steps, max = MAX_SEARCH_STEPS, "OTP search window rejected");
        return Err(OtpError::InvalidArgument(format!(
            "search window of {steps} steps exceeds the limit of {MAX_SEARCH_STEPS}"
        )));
    }
    Ok(())
}

// ── Tests ───────────────────────────────────────────────────────────
