//! Inventory domain module.
//!
//! This crate owns the branch-scoped stock ledger side of stock-adjustment
//! edits: the inventory item record with its per-branch stock entries, the
//! transaction-scoped store capability, and the applier that turns a delta
//! report into stock mutations — failing closed on the first violation so
//! the caller can roll back its enclosing transaction.

pub mod apply;
pub mod item;
pub mod store;

pub use apply::{ApplyError, apply_adjustment_deltas, preflight_adjustment_deltas};
pub use item::{BranchStock, InventoryItem};
pub use store::{InMemoryInventoryStore, InventoryStore, StoreError};
