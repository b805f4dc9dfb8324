//! Reversible base-62 codec between UTF-8 names and identifiers.
//!
//! The encoder treats a name as an opaque byte sequence and rewrites it over
//! the alphabet `0-9A-Za-z`. Bytes are taken in blocks of eight; each block
//! is read as a big-endian integer and written as a fixed-width group of
//! base-62 digits. A full block takes eleven digits, and a trailing partial
//! block of `k` bytes takes the fewest digits that can hold `256^k` values.
//! Those widths are all distinct modulo eleven, so the identifier length
//! alone says how long the last block was. The mapping is injective over
//! all byte sequences, [`decode`] recovers the original bytes exactly, and
//! both directions run in time linear in the input.
//!
//! Nothing is normalised, trimmed, or case-folded. A name made only of
//! whitespace round-trips like any other.

use crate::error::{CodecError, CodecResult};

/// Digits in ascending value order.
const ALPHABET: &[u8; 62] = b"0123456789ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz";

const BASE: u64 = 62;

/// Bytes per block.
const BLOCK: usize = 8;

/// Digits needed for a block of `k` bytes: the smallest `d` with
/// `62^d >= 256^k`.
const WIDTH: [usize; BLOCK + 1] = [0, 2, 3, 5, 6, 7, 9, 10, 11];

/// Digits in a full block.
const GROUP: usize = WIDTH[BLOCK];

/// Encode a name into its identifier.
///
/// # Examples
///
/// ```
/// use stockpile_types::codec::{decode, encode};
///
/// let id = encode("orange").unwrap();
/// assert!(id.chars().all(|c| c.is_ascii_alphanumeric()));
/// assert_eq!(decode(&id).unwrap(), "orange");
/// ```
pub fn encode(name: &str) -> CodecResult<String> {
    Ok(to_base62(name.as_bytes()))
}

/// Encode raw bytes that are expected to hold UTF-8 text.
///
/// Fails with [`CodecError::Encoding`] if `bytes` is not valid UTF-8.
pub fn encode_bytes(bytes: &[u8]) -> CodecResult<String> {
    std::str::from_utf8(bytes)
        .map_err(|e| CodecError::Encoding(format!("name is not valid UTF-8: {e}")))?;
    Ok(to_base62(bytes))
}

/// Decode an identifier back into the name it was derived from.
///
/// Fails with [`CodecError::Decoding`] if `id` contains a character outside
/// the alphabet, was not produced by the encoder, or decodes to bytes that
/// are not valid UTF-8.
pub fn decode(id: &str) -> CodecResult<String> {
    let bytes = from_base62(id)?;
    String::from_utf8(bytes).map_err(|e| CodecError::Decoding {
        id: id.to_string(),
        reason: format!("decoded bytes are not valid UTF-8: {e}"),
    })
}

/// Returns `true` if `c` belongs to the identifier alphabet.
pub fn is_id_char(c: char) -> bool {
    c.is_ascii_alphanumeric()
}

fn digit_value(c: u8) -> Option<u64> {
    match c {
        b'0'..=b'9' => Some(u64::from(c - b'0')),
        b'A'..=b'Z' => Some(u64::from(c - b'A') + 10),
        b'a'..=b'z' => Some(u64::from(c - b'a') + 36),
        _ => None,
    }
}

fn to_base62(bytes: &[u8]) -> String {
    let mut out = vec![0u8; bytes.len() / BLOCK * GROUP + WIDTH[bytes.len() % BLOCK]];
    for (block, group) in bytes.chunks(BLOCK).zip(out.chunks_mut(GROUP)) {
        let mut value = block.iter().fold(0u64, |acc, &b| (acc << 8) | u64::from(b));
        let width = WIDTH[block.len()];
        for digit in group[..width].iter_mut().rev() {
            *digit = ALPHABET[(value % BASE) as usize];
            value /= BASE;
        }
    }
    // Every byte written above comes from ALPHABET.
    out.into_iter().map(char::from).collect()
}

fn from_base62(id: &str) -> CodecResult<Vec<u8>> {
    let malformed = |reason: String| CodecError::Decoding {
        id: id.to_string(),
        reason,
    };

    let tail_digits = id.len() % GROUP;
    let tail_bytes = WIDTH
        .iter()
        .position(|&w| w == tail_digits)
        .ok_or_else(|| malformed(format!("length {} is not a valid identifier length", id.len())))?;

    let mut out = Vec::with_capacity(id.len() / GROUP * BLOCK + tail_bytes);
    let mut offset = 0;
    for group in id.as_bytes().chunks(GROUP) {
        let len = if group.len() == GROUP { BLOCK } else { tail_bytes };
        let mut value: u128 = 0;
        for (i, &c) in group.iter().enumerate() {
            let digit = digit_value(c).ok_or_else(|| {
                let ch = id
                    .get(offset + i..)
                    .and_then(|rest| rest.chars().next())
                    .unwrap_or(char::REPLACEMENT_CHARACTER);
                malformed(format!("invalid character {ch:?} at byte {}", offset + i))
            })?;
            value = value * u128::from(BASE) + u128::from(digit);
        }
        if value >> (8 * len) != 0 {
            return Err(malformed(format!(
                "group at byte {offset} exceeds {len} byte(s)"
            )));
        }
        out.extend_from_slice(&value.to_be_bytes()[16 - len..]);
        offset += group.len();
    }
    Ok(out)
}
