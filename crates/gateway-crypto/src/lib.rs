//! # gateway-crypto
//!
//! Hashing used by the storage gateway precompile.
//!
//! - Keccak-256 hashing
//! - Solidity function selectors

#![warn(missing_docs)]
#![warn(clippy::all)]

mod hash;
mod selector;

pub use hash::keccak256;
pub use selector::{function_selector, Selector, SELECTOR_LEN};
