//! Ledger rows and purchase submissions.

use serde::{Deserialize, Serialize};

use crate::domain::shared::{DomainError, ItemName, LedgerTimestamp, Money, Quantity};

/// One row of the `orders` table: everything ever checked out under a name.
///
/// `price` is the unit price of the first purchase and `date` the time of
/// that first purchase; later purchases only grow `quantity` and `total`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LedgerEntry {
    /// Row id assigned by the store.
    pub id: i64,
    /// Item name, unique within the ledger.
    pub item_name: ItemName,
    /// Cumulative quantity.
    pub quantity: Quantity,
    /// Unit price at first insert.
    pub price: Money,
    /// Cumulative total.
    pub total: Money,
    /// Creation time of the row.
    pub date: LedgerTimestamp,
}

impl LedgerEntry {
    /// Fold another purchase of the same item into this row.
    ///
    /// # Errors
    ///
    /// Returns error, leaving the row unchanged, if the cumulative quantity
    /// or total would leave its range.
    pub fn absorb(&mut self, purchase: &Purchase) -> Result<(), DomainError> {
        let quantity = self.quantity.checked_add(purchase.quantity())?;
        let total = self.total.checked_add(purchase.line_total())?;
        self.quantity = quantity;
        self.total = total;
        Ok(())
    }
}

/// A single cart line submitted to the ledger at checkout.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Purchase {
    item_name: ItemName,
    quantity: Quantity,
    unit_price: Money,
    line_total: Money,
}

impl Purchase {
    /// Create a purchase from raw values.
    ///
    /// # Errors
    ///
    /// Returns error if the name is blank, the quantity is zero or either
    /// amount is negative.
    pub fn new(
        item_name: &str,
        quantity: u32,
        unit_price: Money,
        line_total: Money,
    ) -> Result<Self, DomainError> {
        Ok(Self {
            item_name: ItemName::new(item_name)?,
            quantity: Quantity::new(quantity)?,
            unit_price: unit_price.ensure_non_negative("unit_price")?,
            line_total: line_total.ensure_non_negative("line_total")?,
        })
    }

    /// Create a purchase from already-validated parts.
    ///
    /// # Errors
    ///
    /// Returns error if either amount is negative.
    pub fn from_parts(
        item_name: ItemName,
        quantity: Quantity,
        unit_price: Money,
        line_total: Money,
    ) -> Result<Self, DomainError> {
        Ok(Self {
            item_name,
            quantity,
            unit_price: unit_price.ensure_non_negative("unit_price")?,
            line_total: line_total.ensure_non_negative("line_total")?,
        })
    }

    /// The item name.
    #[must_use]
    pub const fn item_name(&self) -> &ItemName {
        &self.item_name
    }

    /// Units bought.
    #[must_use]
    pub const fn quantity(&self) -> Quantity {
        self.quantity
    }

    /// Unit price charged.
    #[must_use]
    pub const fn unit_price(&self) -> Money {
        self.unit_price
    }

    /// Amount charged for the line.
    #[must_use]
    pub const fn line_total(&self) -> Money {
        self.line_total
    }

    /// A fresh ledger row for a first purchase.
    #[must_use]
    pub fn into_entry(self, id: i64, date: LedgerTimestamp) -> LedgerEntry {
        LedgerEntry {
            id,
            item_name: self.item_name,
            quantity: self.quantity,
            price: self.unit_price,
            total: self.line_total,
            date,
        }
    }
}
