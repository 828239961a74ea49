//! RFC 6238 Appendix B TOTP test vectors.

use otpkit_core::otp::{OtpAlgorithm, OtpDigits};
use otpkit_core::{Secret, Totp, TotpConfig, VerifyWindow};

// SHA1 secret:   20 bytes ("12345678901234567890")
// SHA256 secret: 32 bytes ("12345678901234567890123456789012")
// SHA512 secret: 64 bytes
// Period: 30s, Digits: 8

const TOTP_SHA1_SECRET: &[u8] = b"12345678901234567890";
const TOTP_SHA256_SECRET: &[u8] = b"12345678901234567890123456789012";
const TOTP_SHA512_SECRET: &[u8] =
    b"1234567890123456789012345678901234567890123456789012345678901234";

struct TotpVector {
    time: u64,
    sha1: &'static str,
    sha256: &'static str,
    sha512: &'static str,
}

const TOTP_VECTORS: [TotpVector; 6] = [
    TotpVector {
        time: 59,
        sha1: "94287082",
        sha256: "46119246",
        sha512: "90693936",
    },
    TotpVector {
        time: 1_111_111_109,
        sha1: "07081804",
        sha256: "68084774",
        sha512: "25091201",
    },
    TotpVector {
        time: 1_111_111_111,
        sha1: "14050471",
        sha256: "67062674",
        sha512: "99943326",
    },
    TotpVector {
        time: 1_234_567_890,
        sha1: "89005924",
        sha256: "91819424",
        sha512: "93441116",
    },
    TotpVector {
        time: 2_000_000_000,
        sha1: "69279037",
        sha256: "90698825",
        sha512: "38618901",
    },
    TotpVector {
        time: 20_000_000_000,
        sha1: "65353130",
        sha256: "77737706",
        sha512: "47863826",
    },
];

fn check(secret: &[u8], algorithm: OtpAlgorithm, expected: fn(&TotpVector) -> &'static str) {
    let totp = Totp::new(
        Secret::from_bytes(secret),
        TotpConfig::new(OtpDigits::EIGHT, algorithm, 30),
    )
    .expect("valid config");

    for v in &TOTP_VECTORS {
        let code = totp.at(v.time);
        assert_eq!(
            code,
            expected(v),
            "RFC 6238 TOTP {algorithm} mismatch at time {}",
            v.time
        );
        let matched = totp
            .verify(&code, VerifyWindow::new().at(v.time))
            .expect("verify");
        assert_eq!(matched, Some(v.time - v.time % 30), "verify at time {}", v.time);
    }
}

#[test]
fn rfc6238_appendix_b_totp_sha1() {
    check(TOTP_SHA1_SECRET, OtpAlgorithm::Sha1, |v| v.sha1);
}

#[test]
fn rfc6238_appendix_b_totp_sha256() {
    check(TOTP_SHA256_SECRET, OtpAlgorithm::Sha256, |v| v.sha256);
}

#[test]
fn rfc6238_appendix_b_totp_sha512() {
    check(TOTP_SHA512_SECRET, OtpAlgorithm::Sha512, |v| v.sha512);
}

#[test]
fn rfc6238_six_digit_codes_are_suffixes() {
    let totp = Totp::new(Secret::from_bytes(TOTP_SHA1_SECRET), TotpConfig::default())
        .expect("valid config");
    assert_eq!(totp.at(59), "287082");
    assert_eq!(totp.at(1_111_111_109), "081804");
}
