//! String argument codec
//!
//! Two layouts are understood:
//!
//! - **Single slot**: one 32-byte big-endian length word followed by exactly
//!   that many bytes, no padding. Strings are limited to 32 bytes. This is the
//!   packing used by `setRecipient` and the `getRecipient` return value.
//! - **Head/tail**: the Solidity ABI layout for dynamic arguments. The input
//!   starts with one offset word per argument; each offset locates a length
//!   word followed by the string bytes.
//!
//! The two decoders differ on purpose: the single-slot decoder requires an
//! exact length match, while the head/tail decoder strips trailing zero bytes
//! from each string, which is what deployed callers of the gateway observe.

use crate::error::{GatewayError, GatewayResult};
use gateway_primitives::{trim_right_zeroes, H256, WORD_LEN};

/// Longest string the single-slot codec accepts
pub const MAX_SLOT_STRING_LEN: usize = WORD_LEN;

/// Pack a string as a length word followed by its raw bytes.
pub fn encode_string(value: &str) -> GatewayResult<Vec<u8>> {
    encode_slot_bytes(value.as_bytes())
}

/// Pack raw bytes in the single-slot layout, without requiring UTF-8.
pub fn encode_slot_bytes(bytes: &[u8]) -> GatewayResult<Vec<u8>> {
    if bytes.len() > MAX_SLOT_STRING_LEN {
        return Err(GatewayError::ArgumentTooLong { len: bytes.len() });
    }

    let mut encoded = Vec::with_capacity(WORD_LEN + bytes.len());
    encoded.extend_from_slice(H256::from_u64(bytes.len() as u64).as_bytes());
    encoded.extend_from_slice(bytes);
    Ok(encoded)
}

/// Unpack a string produced by [`encode_string`].
pub fn decode_string(input: &[u8]) -> GatewayResult<String> {
    let length_word = word_at(input, 0).ok_or(GatewayError::InputTooShort {
        required: WORD_LEN,
        got: input.len(),
    })?;

    let declared = length_word
        .to_u64()
        .ok_or(GatewayError::LengthNotRepresentable)?;

    if declared > MAX_SLOT_STRING_LEN as u64 {
        return Err(GatewayError::LengthOutOfRange(declared));
    }

    // declared <= 32 here, so the sum cannot overflow
    if input.len() as u64 != WORD_LEN as u64 + declared {
        return Err(GatewayError::LengthMismatch {
            declared,
            got: input.len(),
        });
    }

    utf8(&input[WORD_LEN..])
}

/// Decode a single dynamic string argument in head/tail layout.
pub fn decode_head_tail_string(input: &[u8]) -> GatewayResult<String> {
    check_head(input, 1)?;
    decode_tail_string(input, 0)
}

/// Decode two dynamic string arguments in head/tail layout.
pub fn decode_two_strings(input: &[u8]) -> GatewayResult<(String, String)> {
    check_head(input, 2)?;
    let first = decode_tail_string(input, 0)?;
    let second = decode_tail_string(input, 1)?;
    Ok((first, second))
}

/// Decode `count` dynamic string arguments in head/tail layout.
///
/// Every offset and length is validated against the input before it is used
/// to slice; nothing embedded in the input is trusted.
pub fn decode_strings_head_tail(input: &[u8], count: usize) -> GatewayResult<Vec<String>> {
    check_head(input, count)?;
    (0..count)
        .map(|argument| decode_tail_string(input, argument))
        .collect()
}

/// Encode strings in head/tail layout, padding each tail to a word boundary.
pub fn encode_strings_head_tail(values: &[&str]) -> Vec<u8> {
    let head_len = values.len() * WORD_LEN;
    let mut head = Vec::with_capacity(head_len);
    let mut tail = Vec::new();

    for value in values {
        let bytes = value.as_bytes();
        head.extend_from_slice(H256::from_u64((head_len + tail.len()) as u64).as_bytes());
        tail.extend_from_slice(H256::from_u64(bytes.len() as u64).as_bytes());
        tail.extend_from_slice(bytes);
        let padding = (WORD_LEN - bytes.len() % WORD_LEN) % WORD_LEN;
        tail.resize(tail.len() + padding, 0);
    }

    head.extend(tail);
    head
}

fn check_head(input: &[u8], count: usize) -> GatewayResult<()> {
    let required = count.saturating_mul(WORD_LEN);
    if input.len() < required {
        return Err(GatewayError::InputTooShort {
            required,
            got: input.len(),
        });
    }
    Ok(())
}

fn decode_tail_string(input: &[u8], argument: usize) -> GatewayResult<String> {
    let out_of_range = || GatewayError::OffsetOutOfRange {
        argument,
        input_len: input.len(),
    };

    let offset = word_at(input, argument * WORD_LEN)
        .and_then(|word| word.to_u64())
        .and_then(|offset| usize::try_from(offset).ok())
        .ok_or_else(out_of_range)?;

    let length = word_at(input, offset)
        .ok_or_else(out_of_range)?
        .to_u64()
        .ok_or(GatewayError::LengthNotRepresentable)?;

    let start = offset.checked_add(WORD_LEN).ok_or_else(out_of_range)?;
    let end = usize::try_from(length)
        .ok()
        .and_then(|length| start.checked_add(length))
        .ok_or_else(out_of_range)?;
    let data = input.get(start..end).ok_or_else(out_of_range)?;

    utf8(trim_right_zeroes(data))
}

/// The 32-byte word starting at `at`, if it lies inside `input`
fn word_at(input: &[u8], at: usize) -> Option<H256> {
    let end = at.checked_add(WORD_LEN)?;
    input
        .get(at..end)
        .and_then(|slice| H256::from_slice(slice).ok())
}

fn utf8(bytes: &[u8]) -> GatewayResult<String> {
    String::from_utf8(bytes.to_vec()).map_err(|_| GatewayError::InvalidUtf8)
}
