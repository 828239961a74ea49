//! RFC 4648 Base32 codec for shared secrets.
//!
//! - Alphabet `A-Z2-7`, uppercase on encode, case-insensitive on decode.
//! - `=` padding fills the last group to 8 characters (optional on encode).
//! - Line breaks are ignored on decode and can be inserted on encode.

use std::num::NonZeroUsize;

use crate::OtpError;

// ── Constants ───────────────────────────────────────────────────────

const ALPHABET: &[u8; 32] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ234567";

const PAD: char = '=';

/// Input bytes per encoding group (40 bits).
const GROUP_BYTES: usize = 5;

/// Output characters per encoding group.
const GROUP_CHARS: usize = 8;

// ── Encoding ────────────────────────────────────────────────────────

/// Output options for [`encode_with`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct EncodeOptions {
    /// Insert a `\n` after every `width` characters.
    pub width: Option<NonZeroUsize>,
    /// Fill the final group with `=` up to 8 characters.
    pub padding: bool,
}

impl EncodeOptions {
    /// Padded, single-line output.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            width: None,
            padding: true,
        }
    }

    /// Hard-wrap the output every `width` characters.
    #[must_use]
    pub const fn wrap(mut self, width: NonZeroUsize) -> Self {
        self.width = Some(width);
        self
    }

    /// Enable or disable trailing `=` padding.
    #[must_use]
    pub const fn padding(mut self, padding: bool) -> Self {
        self.padding = padding;
        self
    }
}

impl Default for EncodeOptions {
    fn default() -> Self {
        Self::new()
    }
}

/// Encode `data` as padded, single-line Base32.
#[must_use]
pub fn encode(data: &[u8]) -> String {
    encode_with(data, EncodeOptions::new())
}

/// Encode `data` as Base32 with explicit padding and wrapping options.
#[must_use]
pub fn encode_with(data: &[u8], options: EncodeOptions) -> String {
    let capacity = data.len().div_ceil(GROUP_BYTES).saturating_mul(GROUP_CHARS);
    let mut encoded = String::with_capacity(capacity);
    for group in data.chunks(GROUP_BYTES) {
        encode_group(group, options.padding, &mut encoded);
    }

    match options.width {
        Some(width) => wrap_lines(&encoded, width),
        None => encoded,
    }
}

/// Encode one group of 1 to 5 bytes.
///
/// A short group of `n` bytes carries `8n` bits, so only `ceil(8n / 5)`
/// characters hold data; the rest of the group is `=` or omitted.
#[allow(clippy::arithmetic_side_effects, clippy::cast_possible_truncation)]
fn encode_group(group: &[u8], padding: bool, out: &mut String) {
    // group.len() <= 5, so the accumulator holds at most 40 bits.
    let mut buffer = 0u64;
    for i in 0..GROUP_BYTES {
        buffer = (buffer << 8) | u64::from(group.get(i).copied().unwrap_or(0));
    }

    let data_chars = (group.len() * 8).div_ceil(5);
    for i in 0..data_chars {
        let index = ((buffer >> (35 - 5 * i)) & 0x1F) as usize;
        out.push(char::from(ALPHABET[index]));
    }

    if padding {
        for _ in data_chars..GROUP_CHARS {
            out.push(PAD);
        }
    }
}

/// Break ASCII `encoded` into lines of at most `width` characters.
fn wrap_lines(encoded: &str, width: NonZeroUsize) -> String {
    let mut wrapped = String::with_capacity(encoded.len().saturating_mul(2));
    for (i, line) in encoded.as_bytes().chunks(width.get()).enumerate() {
        if i != 0 {
            wrapped.push('\n');
        }
        wrapped.extend(line.iter().copied().map(char::from));
    }
    wrapped
}

// ── Decoding ────────────────────────────────────────────────────────

/// Rolling bit buffer that yields a byte whenever 8 bits are available.
///
/// Bits left over at the end of input are never flushed, so a trailing
/// group of `k` characters yields `floor(5k / 8)` bytes.
#[derive(Default)]
struct BitAccumulator {
    buffer: u32,
    bits: u32,
}

impl BitAccumulator {
    #[allow(clippy::arithmetic_side_effects, clippy::cast_possible_truncation)]
    fn push(&mut self, symbol: u8) -> Option<u8> {
        // At most 7 bits carry over between calls: buffer stays below 2^12.
        self.buffer = (self.buffer << 5) | u32::from(symbol);
        self.bits += 5;
        if self.bits < 8 {
            return None;
        }
        self.bits -= 8;
        let byte = (self.buffer >> self.bits) as u8;
        self.buffer &= (1 << self.bits) - 1;
        Some(byte)
    }
}

/// Map an alphabet character (either case) to its 5-bit value.
fn symbol_value(ch: char) -> Option<u8> {
    let upper = u8::try_from(ch).ok()?.to_ascii_uppercase();
    ALPHABET
        .iter()
        .position(|&c| c == upper)
        .and_then(|i| u8::try_from(i).ok())
}

/// Decode Base32 text into bytes.
///
/// Line breaks (`\n`, `\r`) are skipped anywhere. Once a `=` is seen, only
/// further `=` and line breaks may follow.
///
/// A final group shorter than 8 characters decodes to the bytes its bits
/// fully determine. Group lengths that RFC 4648 never produces (1, 3 or 6
/// characters) are accepted the same way rather than rejected.
///
/// # Errors
/// Returns `OtpError::InvalidEncoding` for a character outside the
/// alphabet, or for a data character after padding has begun. No partial
/// output is returned on error.
pub fn decode(text: &str) -> Result<Vec<u8>, OtpError> {
    let mut decoded = Vec::with_capacity(text.len());
    let mut accumulator = BitAccumulator::default();
    let mut padding_at: Option<usize> = None;

    for (offset, ch) in text.char_indices() {
        match ch {
            '\n' | '\r' => continue,
            PAD => {
                padding_at.get_or_insert(offset);
                continue;
            }
            _ => {}
        }

        if let Some(start) = padding_at {
            return Err(OtpError::InvalidEncoding(format!(
                "character {ch:?} at offset {offset} follows padding started at offset {start}"
            )));
        }

        let symbol = symbol_value(ch).ok_or_else(|| {
            OtpError::InvalidEncoding(format!(
                "character {ch:?} at offset {offset} is not in the Base32 alphabet"
            ))
        })?;

        if let Some(byte) = accumulator.push(symbol) {
            decoded.push(byte);
        }
    }

    Ok(decoded)
}

// ── Tests ───────────────────────────────────────────────────────────
