//! 32-byte state word (H256) and byte trimming helpers

use primitive_types::U256;
use std::fmt;
use thiserror::Error;

/// Size of a state word / ABI slot in bytes
pub const WORD_LEN: usize = 32;

/// Word construction error
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum WordError {
    /// Slice is not exactly one word
    #[error("invalid word length: expected {expected} bytes, got {got}")]
    InvalidLength {
        /// Required length
        expected: usize,
        /// Actual length
        got: usize,
    },
}

/// 256-bit word (32 bytes): a storage key, a storage value or an ABI slot
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct H256([u8; WORD_LEN]);

impl H256 {
    /// Zero word
    pub const ZERO: H256 = H256([0u8; WORD_LEN]);

    /// Create from bytes
    pub const fn from_bytes(bytes: [u8; WORD_LEN]) -> Self {
        H256(bytes)
    }

    /// Create from a slice of exactly 32 bytes
    pub fn from_slice(slice: &[u8]) -> Result<Self, WordError> {
        if slice.len() != WORD_LEN {
            return Err(WordError::InvalidLength {
                expected: WORD_LEN,
                got: slice.len(),
            });
        }
        let mut bytes = [0u8; WORD_LEN];
        bytes.copy_from_slice(slice);
        Ok(H256(bytes))
    }

    /// Place `bytes` at the end of the word, zero-filling the front.
    ///
    /// Inputs longer than a word keep their trailing 32 bytes, matching the
    /// `BytesToHash` conversion hosts use for storage keys and values.
    pub fn from_bytes_right_aligned(bytes: &[u8]) -> Self {
        let mut word = [0u8; WORD_LEN];
        let src = if bytes.len() > WORD_LEN {
            &bytes[bytes.len() - WORD_LEN..]
        } else {
            bytes
        };
        word[WORD_LEN - src.len()..].copy_from_slice(src);
        H256(word)
    }

    /// Big-endian encoding of a u64
    pub fn from_u64(value: u64) -> Self {
        let mut word = [0u8; WORD_LEN];
        word[WORD_LEN - 8..].copy_from_slice(&value.to_be_bytes());
        H256(word)
    }

    /// Get as bytes
    pub fn as_bytes(&self) -> &[u8; WORD_LEN] {
        &self.0
    }

    /// Big-endian integer value of the word
    pub fn to_u256(&self) -> U256 {
        U256::from_big_endian(&self.0)
    }

    /// Big-endian value as u64, `None` if it does not fit
    pub fn to_u64(&self) -> Option<u64> {
        let value = self.to_u256();
        if value.bits() > 64 {
            None
        } else {
            Some(value.low_u64())
        }
    }

    /// Check if zero
    pub fn is_zero(&self) -> bool {
        self.0 == [0u8; WORD_LEN]
    }

    /// Convert to hex string
    pub fn to_hex(&self) -> String {
        format!("0x{}", hex::encode(self.0))
    }
}

impl fmt::Debug for H256 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "H256({})", self.to_hex())
    }
}

impl fmt::Display for H256 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_hex())
    }
}

/// Strip leading zero bytes
pub fn trim_left_zeroes(bytes: &[u8]) -> &[u8] {
    let start = bytes.iter().position(|b| *b != 0).unwrap_or(bytes.len());
    &bytes[start..]
}

/// Strip trailing zero bytes
pub fn trim_right_zeroes(bytes: &[u8]) -> &[u8] {
    let end = bytes.iter().rposition(|b| *b != 0).map_or(0, |i| i + 1);
    &bytes[..end]
}
