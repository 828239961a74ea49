//! RFC 6238 time-based one-time passwords.
//!
//! A TOTP code is the HOTP code for `T = floor(unix_time / period)`.
//! Verification scans a window of time steps around a reference time and
//! reports the start of the matching step so the caller can persist it as
//! a replay floor.

use std::time::{SystemTime, UNIX_EPOCH};

use serde::{Deserialize, Serialize};

use crate::otp::{self, OtpAlgorithm, OtpConfig, OtpDigits};
use crate::uri::{self, OtpKind};
use crate::{OtpError, Secret};

// ── Constants ───────────────────────────────────────────────────────

/// Default TOTP period in seconds (RFC 6238 §4).
pub const DEFAULT_PERIOD: u32 = 30;

// ── Types ───────────────────────────────────────────────────────────

/// TOTP configuration: code shape plus the time-step length.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct TotpConfig {
    /// Output code length.
    pub digits: OtpDigits,
    /// HMAC digest.
    pub algorithm: OtpAlgorithm,
    /// Time step in seconds, must be > 0.
    pub period: u32,
}

impl TotpConfig {
    #[must_use]
    pub const fn new(digits: OtpDigits, algorithm: OtpAlgorithm, period: u32) -> Self {
        Self {
            digits,
            algorithm,
            period,
        }
    }

    /// The digits/digest part shared with HOTP.
    #[must_use]
    pub const fn otp(self) -> OtpConfig {
        OtpConfig::new(self.digits, self.algorithm)
    }
}

impl Default for TotpConfig {
    fn default() -> Self {
        Self::new(OtpDigits::default(), OtpAlgorithm::default(), DEFAULT_PERIOD)
    }
}

/// Time window accepted by [`Totp::verify`]. All times are Unix seconds.
///
/// The default window accepts only the step containing the current time.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct VerifyWindow {
    /// Seconds after the reference time still accepted.
    pub drift_ahead: u64,
    /// Seconds before the reference time still accepted.
    pub drift_behind: u64,
    /// Last accepted timestamp; its step and earlier ones are refused.
    pub after: Option<u64>,
    /// Reference time; `None` means the system clock.
    pub at: Option<u64>,
}

impl VerifyWindow {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            drift_ahead: 0,
            drift_behind: 0,
            after: None,
            at: None,
        }
    }

    #[must_use]
    pub const fn drift_ahead(mut self, seconds: u64) -> Self {
        self.drift_ahead = seconds;
        self
    }

    #[must_use]
    pub const fn drift_behind(mut self, seconds: u64) -> Self {
        self.drift_behind = seconds;
        self
    }

    #[must_use]
    pub const fn after(mut self, timestamp: u64) -> Self {
        self.after = Some(timestamp);
        self
    }

    #[must_use]
    pub const fn at(mut self, timestamp: u64) -> Self {
        self.at = Some(timestamp);
        self
    }
}

/// Time-based OTP generator and verifier.
#[derive(Clone, Debug)]
pub struct Totp {
    secret: Secret,
    config: TotpConfig,
}

impl Totp {
    /// # Errors
    /// Returns `OtpError::InvalidArgument` if `config.period` is 0.
    pub fn new(secret: Secret, config: TotpConfig) -> Result<Self, OtpError> {
        if config.period == 0 {
            return Err(OtpError::InvalidArgument("period must be > 0".to_owned()));
        }
        Ok(Self { secret, config })
    }

    #[must_use]
    pub const fn config(&self) -> TotpConfig {
        self.config
    }

    #[must_use]
    pub const fn secret(&self) -> &Secret {
        &self.secret
    }

    /// Time step containing `unix_secs`.
    // period is validated non-zero in `new`.
    #[must_use]
    #[allow(clippy::arithmetic_side_effects)]
    pub fn time_step(&self, unix_secs: u64) -> u64 {
        unix_secs / self.period()
    }

    /// Code for the step containing `unix_secs`.
    #[must_use = "OTP code should be used or stored"]
    pub fn at(&self, unix_secs: u64) -> String {
        self.code_for_step(self.time_step(unix_secs))
    }

    /// Code for the step containing `time`.
    ///
    /// # Errors
    /// Returns `OtpError::InvalidArgument` if `time` is before the epoch.
    pub fn at_system_time(&self, time: SystemTime) -> Result<String, OtpError> {
        Ok(self.at(unix_seconds(time)?))
    }

    /// Code for the current step.
    ///
    /// # Errors
    /// Returns `OtpError::InvalidArgument` if the system clock reads
    /// before the epoch.
    pub fn now(&self) -> Result<String, OtpError> {
        self.at_system_time(SystemTime::now())
    }

    /// Verify `code` against every step in `window`.
    ///
    /// The search covers `[at - drift_behind, at + drift_ahead]`, with the
    /// start aligned down to a step boundary. With `after`, the first step
    /// tried is the one following the step that contains `after`.
    ///
    /// Returns the start of the first matching step, or `None`.
    ///
    /// # Errors
    /// Returns `OtpError::InvalidArgument` if the window spans more than
    /// [`otp::MAX_SEARCH_STEPS`] steps, or the clock reads before the epoch.
    pub fn verify(&self, code: &str, window: VerifyWindow) -> Result<Option<u64>, OtpError> {
        let reference = match window.at {
            Some(at) => at,
            None => unix_seconds(SystemTime::now())?,
        };
        let period = self.period();

        let end = reference.saturating_add(window.drift_ahead);
        let mut start = self.step_start(reference.saturating_sub(window.drift_behind));
        if let Some(after) = window.after {
            let Some(floor) = self.step_start(after).checked_add(period) else {
                return Ok(None);
            };
            start = start.max(floor);
        }

        if start > end {
            tracing::trace!(start, end, "TOTP window empty after replay floor");
            return Ok(None);
        }

        // start <= end and period > 0.
        #[allow(clippy::arithmetic_side_effects)]
        let steps = (end - start) / period + 1;
        otp::check_search_steps(steps)?;

        let mut timestamp = start;
        loop {
            if otp::verify(
                self.secret.expose(),
                code,
                self.time_step(timestamp),
                self.config.digits,
                self.config.algorithm,
            ) {
                tracing::debug!(reference, matched = timestamp, steps, "TOTP code accepted");
                return Ok(Some(timestamp));
            }
            match timestamp.checked_add(period) {
                Some(next) if next <= end => timestamp = next,
                _ => break,
            }
        }

        tracing::trace!(reference, start, end, "TOTP code not matched in window");
        Ok(None)
    }

    /// `otpauth://totp/...` URI for enrolling an authenticator.
    #[must_use]
    pub fn provisioning_uri(&self, account_name: &str, issuer: Option<&str>) -> String {
        uri::build(
            OtpKind::Totp {
                period: self.config.period,
            },
            account_name,
            issuer,
            &self.secret,
            self.config.otp(),
        )
    }

    fn period(&self) -> u64 {
        u64::from(self.config.period)
    }

    /// First second of the step containing `unix_secs`.
    // period is non-zero and `x % period <= x`.
    #[allow(clippy::arithmetic_side_effects)]
    fn step_start(&self, unix_secs: u64) -> u64 {
        unix_secs - unix_secs % self.period()
    }

    fn code_for_step(&self, step: u64) -> String {
        otp::compute(
            self.secret.expose(),
            step,
            self.config.digits,
            self.config.algorithm,
        )
    }
}

fn unix_seconds(time: SystemTime) -> Result<u64, OtpError> {
    time.duration_since(UNIX_EPOCH)
        .map(|elapsed| elapsed.as_secs())
        .map_err(|_| OtpError::InvalidArgument("time is before the Unix epoch".to_owned()))
}

// ── Tests ───────────────────────────────────────────────────────────
