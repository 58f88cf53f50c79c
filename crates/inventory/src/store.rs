//! Transaction-scoped inventory store capability.
//!
//! The applier never opens or commits transactions. A caller hands it a
//! store handle whose reads and writes are already scoped to the caller's
//! open transaction; on failure the caller rolls that transaction back and
//! every write made through the handle disappears with it.

use std::collections::HashMap;
use std::sync::RwLock;

use async_trait::async_trait;
use thiserror::Error;

use mandi_core::ItemId;

use crate::item::InventoryItem;

/// Infrastructure failure of the underlying store.
///
/// Distinct from the applier's domain taxonomy: these are storage or
/// transport faults, not business rule violations.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("inventory store backend failure: {0}")]
    Backend(String),
}

/// Read/write access to inventory items inside the caller's transaction.
///
/// Kept deliberately narrow (find by id, save) so production callers can
/// back it with their session-bound repository and tests with an in-memory
/// double.
#[async_trait]
pub trait InventoryStore: Send + Sync {
    /// Resolve an item by id. `Ok(None)` means the id does not exist.
    async fn find_item(&self, item: ItemId) -> Result<Option<InventoryItem>, StoreError>;

    /// Persist the item's current state.
    async fn save_item(&self, item: &InventoryItem) -> Result<(), StoreError>;
}

/// In-memory inventory store.
///
/// Intended for tests/dev. Not optimized for performance. `snapshot` and
/// `restore` let a test emulate the enclosing transaction: snapshot before
/// applying, restore when the apply call fails.
#[derive(Debug, Default)]
pub struct InMemoryInventoryStore {
    items: RwLock<HashMap<ItemId, InventoryItem>>,
}

impl InMemoryInventoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&self, item: InventoryItem) {
        let mut items = self.items.write().unwrap_or_else(|e| e.into_inner());
        items.insert(item.id(), item);
    }

    pub fn get(&self, item: ItemId) -> Option<InventoryItem> {
        let items = self.items.read().unwrap_or_else(|e| e.into_inner());
        items.get(&item).cloned()
    }

    /// Copy of the full store state, for rollback emulation in tests.
    pub fn snapshot(&self) -> HashMap<ItemId, InventoryItem> {
        self.items
            .read()
            .unwrap_or_else(|e| e.into_inner())
            .clone()
    }

    /// Replace the store state with a previously taken snapshot.
    pub fn restore(&self, snapshot: HashMap<ItemId, InventoryItem>) {
        *self.items.write().unwrap_or_else(|e| e.into_inner()) = snapshot;
    }
}

#[async_trait]
impl InventoryStore for InMemoryInventoryStore {
    async fn find_item(&self, item: ItemId) -> Result<Option<InventoryItem>, StoreError> {
        let items = self
            .items
            .read()
            .map_err(|_| StoreError::Backend("lock poisoned".to_string()))?;
        Ok(items.get(&item).cloned())
    }

    async fn save_item(&self, item: &InventoryItem) -> Result<(), StoreError> {
        let mut items = self
            .items
            .write()
            .map_err(|_| StoreError::Backend("lock poisoned".to_string()))?;
        items.insert(item.id(), item.clone());
        Ok(())
    }
}
