//! Stock-adjustment domain module.
//!
//! This crate contains the delta calculator for stock-adjustment edits,
//! implemented purely as deterministic domain logic (no IO, no HTTP, no
//! storage): given the original and the edited snapshot of an adjustment
//! document, it produces a structured report of per-item deltas.

pub mod delta;
pub mod document;

pub use delta::{
    AdjustmentDeltaReport, DeltaKind, ItemDelta, compute_adjustment_delta,
};
pub use document::{AdjustmentDirection, LineItem, StockAdjustmentDocument};
