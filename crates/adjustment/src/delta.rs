use std::collections::HashMap;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use mandi_core::ItemId;

use crate::document::{AdjustmentDirection, LineItem, StockAdjustmentDocument};

/// Classification of a single line's change between two document versions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DeltaKind {
    Added,
    Removed,
    QuantityChanged,
    RateChanged,
    QuantityAndRateChanged,
}

/// Per-item delta between the original and the edited document.
///
/// Every delta field is `new - old`; for removed lines the new side is zero,
/// for added lines the old side is zero. `amount_delta` comes from the
/// lines' own `amount` fields (upstream keeps them consistent with
/// `quantity * rate`), never from re-derivation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemDelta {
    pub item: ItemId,
    pub item_name: String,
    pub item_code: String,
    pub kind: DeltaKind,

    pub old_quantity: Decimal,
    pub new_quantity: Decimal,
    pub quantity_delta: Decimal,

    pub old_rate: Decimal,
    pub new_rate: Decimal,
    pub rate_delta: Decimal,

    pub old_amount: Decimal,
    pub new_amount: Decimal,
    pub amount_delta: Decimal,
}

impl ItemDelta {
    fn removed(line: &LineItem) -> Self {
        Self {
            item: line.item,
            item_name: line.item_name.clone(),
            item_code: line.item_code.clone(),
            kind: DeltaKind::Removed,
            old_quantity: line.quantity,
            new_quantity: Decimal::ZERO,
            quantity_delta: -line.quantity,
            old_rate: line.rate,
            new_rate: Decimal::ZERO,
            rate_delta: -line.rate,
            old_amount: line.amount,
            new_amount: Decimal::ZERO,
            amount_delta: -line.amount,
        }
    }

    fn added(line: &LineItem) -> Self {
        Self {
            item: line.item,
            item_name: line.item_name.clone(),
            item_code: line.item_code.clone(),
            kind: DeltaKind::Added,
            old_quantity: Decimal::ZERO,
            new_quantity: line.quantity,
            quantity_delta: line.quantity,
            old_rate: Decimal::ZERO,
            new_rate: line.rate,
            rate_delta: line.rate,
            old_amount: Decimal::ZERO,
            new_amount: line.amount,
            amount_delta: line.amount,
        }
    }

    fn changed(old: &LineItem, new: &LineItem, kind: DeltaKind) -> Self {
        Self {
            item: new.item,
            item_name: new.item_name.clone(),
            item_code: new.item_code.clone(),
            kind,
            old_quantity: old.quantity,
            new_quantity: new.quantity,
            quantity_delta: new.quantity - old.quantity,
            old_rate: old.rate,
            new_rate: new.rate,
            rate_delta: new.rate - old.rate,
            old_amount: old.amount,
            new_amount: new.amount,
            amount_delta: new.amount - old.amount,
        }
    }
}

/// Structured delta report for one edit of a stock-adjustment document.
///
/// Created fresh per edit, consumed once by the applier, never persisted
/// itself (only its effects are). Ordering of `item_deltas` is part of the
/// contract: all removed lines first, in original-document order, then all
/// added/changed lines in edited-document order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdjustmentDeltaReport {
    pub direction_changed: bool,
    pub old_direction: AdjustmentDirection,
    pub new_direction: AdjustmentDirection,

    pub old_total_amount: Decimal,
    pub new_total_amount: Decimal,
    pub total_amount_delta: Decimal,

    pub item_deltas: Vec<ItemDelta>,
    pub items_changed: bool,
}

impl AdjustmentDeltaReport {
    /// True when the edit changed nothing the stock ledger or audit trail
    /// would care about.
    pub fn is_noop(&self) -> bool {
        !self.items_changed && !self.direction_changed && self.total_amount_delta.is_zero()
    }
}

/// Diff two versions of a stock-adjustment document.
///
/// Pure and deterministic; borrows both snapshots and cannot fail for
/// well-formed input. Lines are matched by [`ItemId`]; a line missing from
/// the edited side is reported as removed, a line missing from the original
/// side as added, and a line on both sides is reported only when its
/// quantity or rate differs (strict inequality — values in this domain are
/// exact two-decimal quantities, so no epsilon is applied). A line whose
/// amount drifted while quantity and rate stayed equal is deliberately not
/// reported; upstream owns amount consistency.
pub fn compute_adjustment_delta(
    original: &StockAdjustmentDocument,
    updated: &StockAdjustmentDocument,
) -> AdjustmentDeltaReport {
    let original_by_id: HashMap<ItemId, &LineItem> =
        original.items.iter().map(|l| (l.item, l)).collect();
    let updated_by_id: HashMap<ItemId, &LineItem> =
        updated.items.iter().map(|l| (l.item, l)).collect();

    let mut item_deltas = Vec::new();

    // Removed pass: original order.
    for line in &original.items {
        if !updated_by_id.contains_key(&line.item) {
            item_deltas.push(ItemDelta::removed(line));
        }
    }

    // Added/changed pass: edited order.
    for line in &updated.items {
        match original_by_id.get(&line.item) {
            None => item_deltas.push(ItemDelta::added(line)),
            Some(old) => {
                let quantity_differs = old.quantity != line.quantity;
                let rate_differs = old.rate != line.rate;
                let kind = match (quantity_differs, rate_differs) {
                    (true, true) => DeltaKind::QuantityAndRateChanged,
                    (true, false) => DeltaKind::QuantityChanged,
                    (false, true) => DeltaKind::RateChanged,
                    (false, false) => continue,
                };
                item_deltas.push(ItemDelta::changed(old, line, kind));
            }
        }
    }

    let items_changed = !item_deltas.is_empty();

    AdjustmentDeltaReport {
        direction_changed: original.direction != updated.direction,
        old_direction: original.direction,
        new_direction: updated.direction,
        old_total_amount: original.total_amount,
        new_total_amount: updated.total_amount,
        total_amount_delta: updated.total_amount - original.total_amount,
        item_deltas,
        items_changed,
    }
}
