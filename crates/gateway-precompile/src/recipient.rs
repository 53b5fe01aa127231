//! Typed access to the persistent `recipient` slot

use crate::STORAGE_GATEWAY_ADDRESS;
use gateway_primitives::{trim_left_zeroes, H256};
use gateway_state::StateDb;

/// Raw storage key name
pub const RECIPIENT_SLOT: &[u8] = b"recipient";

/// Value written when the precompile activates
pub const INITIAL_RECIPIENT: &str = "world";

/// Storage key of the recipient word under the gateway address
pub fn recipient_key() -> H256 {
    H256::from_bytes_right_aligned(RECIPIENT_SLOT)
}

/// Read the recipient.
///
/// Leading zero bytes are stripped, so a value that itself starts with NUL
/// bytes does not read back unchanged.
pub fn get_recipient(state: &dyn StateDb) -> String {
    String::from_utf8_lossy(&recipient_bytes(state)).into_owned()
}

/// Raw recipient bytes with leading zeroes stripped; at most one word.
pub fn recipient_bytes(state: &dyn StateDb) -> Vec<u8> {
    let word = state.get_state(&STORAGE_GATEWAY_ADDRESS, &recipient_key());
    trim_left_zeroes(word.as_bytes()).to_vec()
}

/// Write the recipient, right-aligned in the slot.
///
/// No length check happens here: values must come out of
/// [`decode_string`](crate::abi::decode_string), which caps them at 32 bytes.
pub fn set_recipient(state: &mut dyn StateDb, value: &str) {
    state.set_state(
        STORAGE_GATEWAY_ADDRESS,
        recipient_key(),
        H256::from_bytes_right_aligned(value.as_bytes()),
    );
}
