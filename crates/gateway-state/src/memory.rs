//! In-memory word store

use crate::traits::StateDb;
use gateway_primitives::{Address, H256};
use std::collections::HashMap;

/// In-memory state with nested snapshot support.
///
/// Zero writes remove the slot, so [`MemoryStateDb::len`] counts only
/// non-zero words.
#[derive(Debug, Clone, Default)]
pub struct MemoryStateDb {
    storage: HashMap<(Address, H256), H256>,
    snapshots: Vec<HashMap<(Address, H256), H256>>,
}

impl MemoryStateDb {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of non-zero slots
    pub fn len(&self) -> usize {
        self.storage.len()
    }

    /// Check if no slot holds a non-zero word
    pub fn is_empty(&self) -> bool {
        self.storage.is_empty()
    }

    /// Record the current contents and return the snapshot id
    pub fn snapshot(&mut self) -> usize {
        self.snapshots.push(self.storage.clone());
        self.snapshots.len() - 1
    }

    /// Restore the contents recorded by `id`, dropping it and every later
    /// snapshot. Returns `false` for an unknown id.
    pub fn revert_to_snapshot(&mut self, id: usize) -> bool {
        if id >= self.snapshots.len() {
            return false;
        }
        self.snapshots.truncate(id + 1);
        match self.snapshots.pop() {
            Some(saved) => {
                tracing::debug!(snapshot = id, "reverting state");
                self.storage = saved;
                true
            }
            None => false,
        }
    }

    /// Forget all snapshots, keeping the current contents
    pub fn commit(&mut self) {
        self.snapshots.clear();
    }
}

impl StateDb for MemoryStateDb {
    fn get_state(&self, address: &Address, key: &H256) -> H256 {
        self.storage
            .get(&(*address, *key))
            .copied()
            .unwrap_or(H256::ZERO)
    }

    fn set_state(&mut self, address: Address, key: H256, value: H256) {
        if value.is_zero() {
            self.storage.remove(&(address, key));
        } else {
            self.storage.insert((address, key), value);
        }
    }
}
