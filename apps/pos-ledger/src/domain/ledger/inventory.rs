//! Daily inventory report rows.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::domain::shared::{DomainError, ItemName, Money, Quantity};

/// A ledger row as shown in the inventory report: no unit price, no time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InventoryRow {
    /// Ledger row id.
    pub id: i64,
    /// Item name.
    pub item_name: ItemName,
    /// Cumulative quantity.
    pub quantity: Quantity,
    /// Cumulative total.
    pub total: Money,
}

/// All ledger rows created on one calendar day, with their summed total.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DailyInventory {
    /// The reported day.
    pub date: NaiveDate,
    /// Rows created that day.
    pub rows: Vec<InventoryRow>,
    /// Sum of `rows[..].total`.
    pub total_amount: Money,
}

impl DailyInventory {
    /// Build the report for `date` from its rows.
    ///
    /// # Errors
    ///
    /// Returns error if the summed total is out of range.
    pub fn from_rows(date: NaiveDate, rows: Vec<InventoryRow>) -> Result<Self, DomainError> {
        let total_amount = Money::checked_sum(rows.iter().map(|r| r.total))?;
        Ok(Self {
            date,
            rows,
            total_amount,
        })
    }

    /// Returns true when nothing was sold that day.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn row(id: i64, name: &str, total: Money) -> InventoryRow {
        InventoryRow {
            id,
            item_name: ItemName::new(name).unwrap(),
            quantity: Quantity::ONE,
            total,
        }
    }

    #[test]
    fn total_amount_sums_rows() {
        let date = NaiveDate::from_ymd_opt(2026, 1, 19).unwrap();
        let report = DailyInventory::from_rows(
            date,
            vec![
                row(1, "Tea", Money::new(dec!(20))),
                row(2, "Coffee", Money::new(dec!(100.5))),
            ],
        )
        .unwrap();
        assert_eq!(report.total_amount.amount(), dec!(120.5));
        assert!(!report.is_empty());
    }

    #[test]
    fn empty_day_totals_zero() {
        let date = NaiveDate::from_ymd_opt(2026, 1, 20).unwrap();
        let report = DailyInventory::from_rows(date, Vec::new()).unwrap();
        assert!(report.is_empty());
        assert_eq!(report.total_amount, Money::ZERO);
    }
}
