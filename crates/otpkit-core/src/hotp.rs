//! RFC 4226 counter-based one-time passwords.

use crate::otp::{self, OtpConfig};
use crate::uri::{self, OtpKind};
use crate::{OtpError, Secret};

/// Counter-based OTP generator and verifier.
///
/// Holds no counter state: the caller stores the last accepted counter
/// and passes it back on the next verification.
#[derive(Clone, Debug)]
pub struct Hotp {
    secret: Secret,
    config: OtpConfig,
}

impl Hotp {
    #[must_use]
    pub const fn new(secret: Secret, config: OtpConfig) -> Self {
        Self { secret, config }
    }

    #[must_use]
    pub const fn config(&self) -> OtpConfig {
        self.config
    }

    #[must_use]
    pub const fn secret(&self) -> &Secret {
        &self.secret
    }

    /// Code for `counter`.
    #[must_use = "OTP code should be used or stored"]
    pub fn generate(&self, counter: u64) -> String {
        otp::compute(
            self.secret.expose(),
            counter,
            self.config.digits,
            self.config.algorithm,
        )
    }

    /// Verify `code` against `counter ..= counter + retries`.
    ///
    /// Returns the first matching counter, or `None` if nothing in the
    /// look-ahead window matches. The caller should persist the returned
    /// value and pass `matched + 1` next time to prevent replay.
    /// Counters past `u64::MAX` are not tried.
    ///
    /// # Errors
    /// Returns `OtpError::InvalidArgument` if `retries + 1` exceeds
    /// [`otp::MAX_SEARCH_STEPS`].
    pub fn verify(&self, code: &str, counter: u64, retries: u32) -> Result<Option<u64>, OtpError> {
        otp::check_search_steps(u64::from(retries).saturating_add(1))?;

        for offset in 0..=u64::from(retries) {
            let Some(candidate) = counter.checked_add(offset) else {
                break;
            };
            if otp::verify(
                self.secret.expose(),
                code,
                candidate,
                self.config.digits,
                self.config.algorithm,
            ) {
                tracing::debug!(counter, matched = candidate, "HOTP code accepted");
                return Ok(Some(candidate));
            }
        }

        tracing::trace!(counter, retries, "HOTP code not matched in look-ahead window");
        Ok(None)
    }

    /// `otpauth://hotp/...` URI for enrolling an authenticator at `counter`.
    #[must_use]
    pub fn provisioning_uri(&self, account_name: &str, issuer: Option<&str>, counter: u64) -> String {
        uri::build(
            OtpKind::Hotp { counter },
            account_name,
            issuer,
            &self.secret,
            self.config,
        )
    }
}
