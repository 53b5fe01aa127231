//! # gateway-primitives
//!
//! Primitive types shared by the storage gateway crates.
//!
//! - [`Address`]: 20-byte account/contract address
//! - [`H256`]: 32-byte state word, also used for storage keys
//! - [`U256`]: big-endian integer view of a word (re-exported)

#![warn(missing_docs)]
#![warn(clippy::all)]

mod address;
mod word;

pub use address::Address;
pub use word::{trim_left_zeroes, trim_right_zeroes, WordError, H256, WORD_LEN};

// Re-export primitive-types for U256
pub use primitive_types::U256;
