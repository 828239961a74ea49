//! Shared-secret key material.
//!
//! [`Secret`] wraps [`SecretSlice<u8>`] from the `secrecy` crate:
//! - Zeroized on drop
//! - Masked in `Debug`/`Display` output
//! - Built from raw bytes, Base32 text, or the OS CSPRNG

use std::fmt;

use rand::rngs::OsRng;
use rand::RngCore;
use secrecy::{ExposeSecret, SecretSlice};
use zeroize::Zeroizing;

use crate::base32;
use crate::OtpError;

/// Default generated secret length: 160 bits, 32 Base32 characters.
pub const DEFAULT_SECRET_LEN: usize = 20;

/// HMAC key shared between the verifier and the authenticator.
pub struct Secret {
    inner: SecretSlice<u8>,
}

impl Secret {
    /// Copy `bytes` into a new secret.
    #[must_use]
    pub fn from_bytes(bytes: &[u8]) -> Self {
        Self {
            inner: bytes.to_vec().into(),
        }
    }

    /// Decode a Base32 secret as shown to users (case-insensitive,
    /// padding optional, line breaks ignored).
    ///
    /// # Errors
    /// Returns `OtpError::InvalidEncoding` if `text` is not valid Base32.
    pub fn from_base32(text: &str) -> Result<Self, OtpError> {
        let bytes = base32::decode(text)?;
        Ok(Self {
            inner: bytes.into(),
        })
    }

    /// Generate `len` random bytes from the OS CSPRNG.
    ///
    /// # Errors
    /// Returns `OtpError::InvalidArgument` if `len` is 0, or
    /// `OtpError::RandomSource` if the CSPRNG fails.
    pub fn generate(len: usize) -> Result<Self, OtpError> {
        if len == 0 {
            return Err(OtpError::InvalidArgument(
                "secret length must be > 0".to_owned(),
            ));
        }
        let mut bytes = Zeroizing::new(vec![0u8; len]);
        OsRng
            .try_fill_bytes(&mut bytes)
            .map_err(|e| OtpError::RandomSource(format!("CSPRNG fill failed: {e}")))?;
        Ok(Self::from_bytes(&bytes))
    }

    /// Padded upper-case Base32, the form a user types or scans.
    #[must_use]
    pub fn to_base32(&self) -> String {
        base32::encode(self.expose())
    }

    /// Expose the raw key bytes for an HMAC computation.
    #[must_use]
    pub fn expose(&self) -> &[u8] {
        self.inner.expose_secret()
    }

    /// Key length in bytes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.expose().len()
    }

    /// Returns `true` if the key is empty. An empty key never verifies.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Clone for Secret {
    fn clone(&self) -> Self {
        Self::from_bytes(self.expose())
    }
}

impl fmt::Debug for Secret {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Secret(***)")
    }
}

impl fmt::Display for Secret {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Secret(***)")
    }
}

impl From<&[u8]> for Secret {
    fn from(bytes: &[u8]) -> Self {
        Self::from_bytes(bytes)
    }
}
