//! Applies a stock-adjustment delta report to branch stock levels.
//!
//! Sequential, fail-fast: deltas are applied one at a time, in report order,
//! and the first violation aborts the call. Writes already made stay in the
//! caller's open transaction; signalling the error immediately lets the
//! caller roll the whole transaction back, so no partial stock update is
//! ever visible after a failed edit.

use rust_decimal::Decimal;
use thiserror::Error;
use tracing::{debug, warn};

use mandi_adjustment::{AdjustmentDirection, ItemDelta};
use mandi_core::BranchId;

use crate::store::{InventoryStore, StoreError};

/// Failure while applying adjustment deltas to branch stock.
#[derive(Debug, Error)]
pub enum ApplyError {
    /// The delta references an inventory item id that does not resolve.
    #[error("inventory item not found: {item_name}")]
    ItemNotFound { item_name: String },

    /// The item exists but carries no stock record for the target branch.
    #[error("no stock record for item '{item_name}' at branch {branch}")]
    StockRecordNotFound { item_name: String, branch: BranchId },

    /// The delta would drive branch stock negative.
    ///
    /// Carries what the caller needs for a user-facing message: the item's
    /// display name, the stock available before the change, and the change
    /// that was attempted.
    #[error(
        "insufficient stock for '{item_name}': available {available}, attempted change {attempted_change}"
    )]
    InsufficientStock {
        item_name: String,
        available: Decimal,
        attempted_change: Decimal,
    },

    /// The underlying store failed (infrastructure, not business rules).
    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Net stock effect of one item delta under the document's direction.
///
/// For an `Add` adjustment the quantity delta moves stock the same way
/// (editing an add to add less reduces stock). For a `Remove` adjustment the
/// sign inverts: the delta measures change in the *removed* quantity, so
/// removing more takes more stock out.
fn stock_change(direction: AdjustmentDirection, quantity_delta: Decimal) -> Decimal {
    match direction {
        AdjustmentDirection::Add => quantity_delta,
        AdjustmentDirection::Remove => -quantity_delta,
    }
}

/// Apply a delta report's item deltas to branch stock, inside the caller's
/// transaction.
///
/// Deltas are processed strictly in order; delta N+1 is not started until
/// delta N's write completed. Each write goes through the store eagerly, so
/// on error the caller must roll back its transaction to discard the writes
/// made before the failure.
pub async fn apply_adjustment_deltas(
    store: &dyn InventoryStore,
    deltas: &[ItemDelta],
    direction: AdjustmentDirection,
    branch: BranchId,
) -> Result<(), ApplyError> {
    for delta in deltas {
        let mut item = store
            .find_item(delta.item)
            .await?
            .ok_or_else(|| ApplyError::ItemNotFound {
                item_name: delta.item_name.clone(),
            })?;

        let entry = item
            .stock_at_mut(branch)
            .ok_or_else(|| ApplyError::StockRecordNotFound {
                item_name: delta.item_name.clone(),
                branch,
            })?;

        let change = stock_change(direction, delta.quantity_delta);
        let new_stock = entry.current_stock + change;
        if new_stock < Decimal::ZERO {
            warn!(
                item = %delta.item,
                branch = %branch,
                available = %entry.current_stock,
                change = %change,
                "insufficient stock, aborting apply"
            );
            return Err(ApplyError::InsufficientStock {
                item_name: delta.item_name.clone(),
                available: entry.current_stock,
                attempted_change: change,
            });
        }

        entry.current_stock = new_stock;
        debug!(item = %delta.item, branch = %branch, stock = %new_stock, "branch stock updated");
        store.save_item(&item).await?;
    }

    Ok(())
}

/// Read-only dry run of [`apply_adjustment_deltas`].
///
/// Performs the same resolution and non-negativity checks without writing
/// anything. Callers that prefer not to lean on rollback for the common
/// insufficient-stock case can run this first; success and failure outcomes
/// match the apply call for the same inputs. Note the check reads committed
/// state only, so it is advisory under concurrent edits — the apply call
/// inside the transaction remains the authority.
pub async fn preflight_adjustment_deltas(
    store: &dyn InventoryStore,
    deltas: &[ItemDelta],
    direction: AdjustmentDirection,
    branch: BranchId,
) -> Result<(), ApplyError> {
    for delta in deltas {
        let item = store
            .find_item(delta.item)
            .await?
            .ok_or_else(|| ApplyError::ItemNotFound {
                item_name: delta.item_name.clone(),
            })?;

        let available = item
            .stock_at(branch)
            .ok_or_else(|| ApplyError::StockRecordNotFound {
                item_name: delta.item_name.clone(),
                branch,
            })?;

        let change = stock_change(direction, delta.quantity_delta);
        if available + change < Decimal::ZERO {
            return Err(ApplyError::InsufficientStock {
                item_name: delta.item_name.clone(),
                available,
                attempted_change: change,
            });
        }
    }

    Ok(())
}
