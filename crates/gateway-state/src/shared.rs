//! Shared word store for hosts that dispatch calls from several threads

use crate::memory::MemoryStateDb;
use crate::traits::StateDb;
use gateway_primitives::{Address, H256};
use parking_lot::RwLock;
use std::sync::Arc;

/// Cloneable handle over a [`MemoryStateDb`].
///
/// Each `get_state`/`set_state` takes the lock for that single operation;
/// ordering across calls is the host's concern.
#[derive(Debug, Clone, Default)]
pub struct SharedStateDb {
    inner: Arc<RwLock<MemoryStateDb>>,
}

impl SharedStateDb {
    /// Create an empty shared store
    pub fn new() -> Self {
        Self::default()
    }

    /// Wrap an existing store
    pub fn from_state(state: MemoryStateDb) -> Self {
        Self {
            inner: Arc::new(RwLock::new(state)),
        }
    }

    /// Copy of the current contents
    pub fn to_memory(&self) -> MemoryStateDb {
        self.inner.read().clone()
    }

    /// Number of non-zero slots
    pub fn len(&self) -> usize {
        self.inner.read().len()
    }

    /// Check if no slot holds a non-zero word
    pub fn is_empty(&self) -> bool {
        self.inner.read().is_empty()
    }
}

impl StateDb for SharedStateDb {
    fn get_state(&self, address: &Address, key: &H256) -> H256 {
        self.inner.read().get_state(address, key)
    }

    fn set_state(&mut self, address: Address, key: H256, value: H256) {
        self.inner.write().set_state(address, key, value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clones_share_storage() {
        let mut writer = SharedStateDb::new();
        let reader = writer.clone();
        let addr = Address::from_bytes([3; 20]);
        let key = H256::from_u64(9);

        writer.set_state(addr, key, H256::from_u64(99));
        assert_eq!(reader.get_state(&addr, &key), H256::from_u64(99));
        assert_eq!(reader.len(), 1);
    }

    #[test]
    fn test_from_state_keeps_contents() {
        let mut memory = MemoryStateDb::new();
        let addr = Address::from_bytes([3; 20]);
        memory.set_state(addr, H256::from_u64(1), H256::from_u64(2));

        let shared = SharedStateDb::from_state(memory);
        assert_eq!(shared.get_state(&addr, &H256::from_u64(1)), H256::from_u64(2));
        assert_eq!(shared.to_memory().len(), 1);
    }
}
