//! Solidity function selectors

use crate::hash::keccak256;

/// Length of a function selector in bytes
pub const SELECTOR_LEN: usize = 4;

/// 4-byte dispatch key
pub type Selector = [u8; SELECTOR_LEN];

/// Compute the selector of a canonical signature such as `getData(string)`.
///
/// The signature is hashed as given; callers are expected to pass the
/// canonical form (no spaces, no parameter names).
pub fn function_selector(signature: &str) -> Selector {
    let hash = keccak256(signature.as_bytes());
    let mut selector = [0u8; SELECTOR_LEN];
    selector.copy_from_slice(&hash.as_bytes()[..SELECTOR_LEN]);
    selector
}
