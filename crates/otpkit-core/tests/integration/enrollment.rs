//! Provision a secret, hand it to an "authenticator", verify its codes.

use std::num::NonZeroUsize;

use otpkit_core::base32::{encode_with, EncodeOptions};
use otpkit_core::otp::{OtpAlgorithm, OtpDigits};
use otpkit_core::{Secret, Totp, TotpConfig, VerifyWindow, DEFAULT_SECRET_LEN};

/// Server generates a secret, authenticator decodes the displayed text.
#[test]
fn generated_secret_survives_display_round_trip() {
    let server_secret = Secret::generate(DEFAULT_SECRET_LEN).expect("CSPRNG");
    let shown = encode_with(
        server_secret.expose(),
        EncodeOptions::new().wrap(NonZeroUsize::new(4).expect("non-zero")),
    );

    // Users type secrets in lower case and with the displayed line breaks.
    let typed = shown.to_ascii_lowercase();
    let client_secret = Secret::from_base32(&typed).expect("typed secret decodes");
    assert_eq!(client_secret.expose(), server_secret.expose());

    let config = TotpConfig::new(OtpDigits::SIX, OtpAlgorithm::Sha1, 30);
    let server = Totp::new(server_secret, config).expect("valid config");
    let client = Totp::new(client_secret, config).expect("valid config");

    let time = 1_700_000_000u64;
    let code = client.at(time);
    let matched = server
        .verify(&code, VerifyWindow::new().at(time))
        .expect("verify");
    assert_eq!(matched, Some(time - time % 30));
}

/// The provisioning URI carries the same secret the verifier uses.
#[test]
fn provisioning_uri_secret_decodes_to_verifier_key() {
    let totp = Totp::new(
        Secret::generate(DEFAULT_SECRET_LEN).expect("CSPRNG"),
        TotpConfig::new(OtpDigits::EIGHT, OtpAlgorithm::Sha512, 60),
    )
    .expect("valid config");

    let uri = totp.provisioning_uri("alice@example.com", Some("Example"));
    assert!(uri.starts_with("otpauth://totp/Example:alice%40example.com?secret="));
    assert!(uri.ends_with("&issuer=Example&algorithm=SHA512&digits=8&period=60"));

    let secret_text = uri
        .split_once("secret=")
        .and_then(|(_, rest)| rest.split('&').next())
        .expect("secret parameter");
    let decoded = Secret::from_base32(secret_text).expect("secret is Base32");
    assert_eq!(decoded.expose(), totp.secret().expose());
}

/// 60-second period with drift on both sides.
#[test]
fn sixty_second_period_with_drift() {
    let totp = Totp::new(
        Secret::from_bytes(b"12345678901234567890"),
        TotpConfig::new(OtpDigits::SIX, OtpAlgorithm::Sha256, 60),
    )
    .expect("valid config");

    let time = 1_700_000_040u64;
    let window = VerifyWindow::new().at(time).drift_behind(60).drift_ahead(60);

    for offset in [-60i64, 0, 60] {
        let code_time = time.checked_add_signed(offset).expect("in range");
        let code = totp.at(code_time);
        let matched = totp.verify(&code, window).expect("verify");
        assert_eq!(
            matched,
            Some(code_time - code_time % 60),
            "code from offset {offset}s"
        );
    }
}
