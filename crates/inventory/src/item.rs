use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use mandi_core::{BranchId, ItemId};

/// Stock level of one item at one branch.
///
/// Long-lived: mutated in place across many adjustment operations over the
/// item's lifetime, persisted by the store within the caller's transaction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BranchStock {
    pub branch: BranchId,
    pub current_stock: Decimal,
}

/// Inventory item master record, as far as the adjustment core sees it.
///
/// The full record upstream carries units, pricing and audit fields; the
/// core only needs identity, display attributes and the per-branch stock
/// entries it mutates.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InventoryItem {
    id: ItemId,
    name: String,
    code: String,
    branch_stock: Vec<BranchStock>,
}

impl InventoryItem {
    pub fn new(id: ItemId, name: impl Into<String>, code: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            code: code.into(),
            branch_stock: Vec::new(),
        }
    }

    /// Builder-style helper for seeding stock at a branch.
    pub fn with_branch_stock(mut self, branch: BranchId, current_stock: Decimal) -> Self {
        self.branch_stock.push(BranchStock {
            branch,
            current_stock,
        });
        self
    }

    pub fn id(&self) -> ItemId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn code(&self) -> &str {
        &self.code
    }

    pub fn branch_stock_entries(&self) -> &[BranchStock] {
        &self.branch_stock
    }

    /// Current stock at a branch, if the item is stocked there at all.
    pub fn stock_at(&self, branch: BranchId) -> Option<Decimal> {
        self.branch_stock
            .iter()
            .find(|entry| entry.branch == branch)
            .map(|entry| entry.current_stock)
    }

    /// Mutable access to the stock entry for a branch.
    ///
    /// Returns `None` when the item has no stock record at that branch; the
    /// applier treats that as a hard failure rather than creating one.
    pub fn stock_at_mut(&mut self, branch: BranchId) -> Option<&mut BranchStock> {
        self.branch_stock
            .iter_mut()
            .find(|entry| entry.branch == branch)
    }
}
