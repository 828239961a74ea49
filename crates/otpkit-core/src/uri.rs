//! `otpauth://` provisioning URIs for authenticator apps.
//!
//! Format: `otpauth://{hotp|totp}/{issuer}:{account}?secret=...&issuer=...`.
//! Parameters holding their default value (SHA1, 6 digits, 30 s period)
//! are left out; HOTP always carries `counter`.

use crate::base32::{self, EncodeOptions};
use crate::otp::{OtpAlgorithm, OtpConfig, OtpDigits};
use crate::totp::DEFAULT_PERIOD;
use crate::Secret;

/// OTP scheme and its scheme-specific parameter.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum OtpKind {
    /// Counter-based, enrolled at `counter`.
    Hotp { counter: u64 },
    /// Time-based with a `period` in seconds.
    Totp { period: u32 },
}

impl OtpKind {
    const fn scheme(self) -> &'static str {
        match self {
            Self::Hotp { .. } => "hotp",
            Self::Totp { .. } => "totp",
        }
    }
}

/// Build a provisioning URI.
///
/// `:` inside the issuer or account name is replaced by `_` so the label
/// separator stays unambiguous. The secret is written as unpadded Base32.
#[must_use]
pub fn build(
    kind: OtpKind,
    account_name: &str,
    issuer: Option<&str>,
    secret: &Secret,
    config: OtpConfig,
) -> String {
    let account = label_component(account_name);
    let label = match issuer {
        Some(issuer) => format!("{}:{account}", label_component(issuer)),
        None => account,
    };

    let mut params: Vec<(&str, String)> = vec![(
        "secret",
        base32::encode_with(secret.expose(), EncodeOptions::new().padding(false)),
    )];
    if let Some(issuer) = issuer {
        params.push(("issuer", issuer.to_owned()));
    }
    if config.algorithm != OtpAlgorithm::Sha1 {
        params.push(("algorithm", config.algorithm.name().to_owned()));
    }
    if config.digits != OtpDigits::default() {
        params.push(("digits", config.digits.value().to_string()));
    }
    match kind {
        OtpKind::Hotp { counter } => params.push(("counter", counter.to_string())),
        OtpKind::Totp { period } if period != DEFAULT_PERIOD => {
            params.push(("period", period.to_string()));
        }
        OtpKind::Totp { .. } => {}
    }

    let query = params
        .iter()
        .map(|(key, value)| format!("{key}={}", urlencoding::encode(value)))
        .collect::<Vec<_>>()
        .join("&");

    format!("otpauth://{}/{label}?{query}", kind.scheme())
}

fn label_component(raw: &str) -> String {
    urlencoding::encode(&raw.replace(':', "_")).into_owned()
}
