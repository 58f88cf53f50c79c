use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use mandi_core::{DomainError, ItemId};

/// Direction of a whole stock-adjustment document.
///
/// `Add` puts quantity into branch stock, `Remove` takes it out. Not to be
/// confused with [`crate::DeltaKind`], which classifies a single line's
/// change between two versions of a document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AdjustmentDirection {
    Add,
    Remove,
}

/// One line of a stock-adjustment document.
///
/// `item_name` and `item_code` are display attributes carried through for
/// audit and error messages; arithmetic only ever touches `quantity`,
/// `rate` and `amount`. The invariant `amount == quantity * rate` is
/// established upstream when the line is captured and is **trusted** here —
/// the delta calculator never recomputes it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineItem {
    pub item: ItemId,
    pub item_name: String,
    pub item_code: String,
    pub quantity: Decimal,
    pub rate: Decimal,
    pub amount: Decimal,
}

impl LineItem {
    /// Construct a line, checking the `amount == quantity * rate` invariant.
    ///
    /// Snapshots loaded from storage may bypass this and build the struct
    /// directly; use this at capture boundaries where the invariant is not
    /// already guaranteed.
    pub fn checked(
        item: ItemId,
        item_name: impl Into<String>,
        item_code: impl Into<String>,
        quantity: Decimal,
        rate: Decimal,
        amount: Decimal,
    ) -> Result<Self, DomainError> {
        if amount != quantity * rate {
            return Err(DomainError::validation(format!(
                "line amount {amount} does not equal quantity {quantity} * rate {rate}"
            )));
        }
        Ok(Self {
            item,
            item_name: item_name.into(),
            item_code: item_code.into(),
            quantity,
            rate,
            amount,
        })
    }
}

/// A stock-adjustment document snapshot (original or edited).
///
/// Caller-owned value: constructed before the delta calculator is invoked
/// and discarded after. Line items are expected to be unique by `item`
/// within one document; duplicates are tolerated last-write-wins, not
/// rejected.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StockAdjustmentDocument {
    pub direction: AdjustmentDirection,
    pub total_amount: Decimal,
    pub items: Vec<LineItem>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn checked_line_accepts_consistent_amount() {
        let line = LineItem::checked(
            ItemId::new(),
            "Tomato",
            "VEG-001",
            dec!(10),
            dec!(5),
            dec!(50),
        )
        .unwrap();
        assert_eq!(line.amount, dec!(50));
    }

    #[test]
    fn checked_line_rejects_inconsistent_amount() {
        let err = LineItem::checked(
            ItemId::new(),
            "Tomato",
            "VEG-001",
            dec!(10),
            dec!(5),
            dec!(49),
        )
        .unwrap_err();
        match err {
            DomainError::Validation(msg) => assert!(msg.contains("does not equal")),
            _ => panic!("Expected Validation error"),
        }
    }
}
