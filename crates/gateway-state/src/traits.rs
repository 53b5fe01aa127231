//! Host state interface

use gateway_primitives::{Address, H256};

/// Word store keyed by `(address, key)`.
///
/// Unset slots read as [`H256::ZERO`].
pub trait StateDb {
    /// Read the word at `key` under `address`
    fn get_state(&self, address: &Address, key: &H256) -> H256;

    /// Write the word at `key` under `address`
    fn set_state(&mut self, address: Address, key: H256, value: H256);
}

impl<T: StateDb + ?Sized> StateDb for &mut T {
    fn get_state(&self, address: &Address, key: &H256) -> H256 {
        (**self).get_state(address, key)
    }

    fn set_state(&mut self, address: Address, key: H256, value: H256) {
        (**self).set_state(address, key, value)
    }
}

impl<T: StateDb + ?Sized> StateDb for Box<T> {
    fn get_state(&self, address: &Address, key: &H256) -> H256 {
        (**self).get_state(address, key)
    }

    fn set_state(&mut self, address: Address, key: H256, value: H256) {
        (**self).set_state(address, key, value)
    }
}
