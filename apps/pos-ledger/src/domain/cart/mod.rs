//! Cart
//!
//! The order being built at the counter. It lives only in memory and is
//! flushed into the ledger at checkout.

use serde::{Deserialize, Serialize};

use crate::domain::catalog::MenuItem;
use crate::domain::ledger::Purchase;
use crate::domain::shared::{DomainError, ItemName, Money, Quantity};

/// One line of the cart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartLine {
    item_name: ItemName,
    quantity: Quantity,
    unit_price: Money,
    line_total: Money,
}

impl CartLine {
    fn open(
        item_name: ItemName,
        unit_price: Money,
        quantity: Quantity,
    ) -> Result<Self, DomainError> {
        Ok(Self {
            line_total: unit_price.checked_mul(quantity)?,
            item_name,
            quantity,
            unit_price,
        })
    }

    /// The item name.
    #[must_use]
    pub const fn item_name(&self) -> &ItemName {
        &self.item_name
    }

    /// Units in the cart.
    #[must_use]
    pub const fn quantity(&self) -> Quantity {
        self.quantity
    }

    /// Price per unit, fixed when the line was opened.
    #[must_use]
    pub const fn unit_price(&self) -> Money {
        self.unit_price
    }

    /// `unit_price * quantity`.
    #[must_use]
    pub const fn line_total(&self) -> Money {
        self.line_total
    }

    // Line is untouched on error.
    fn set_quantity(&mut self, quantity: Quantity) -> Result<(), DomainError> {
        self.line_total = self.unit_price.checked_mul(quantity)?;
        self.quantity = quantity;
        Ok(())
    }

    fn to_purchase(&self) -> Result<Purchase, DomainError> {
        Purchase::from_parts(
            self.item_name.clone(),
            self.quantity,
            self.unit_price,
            self.line_total,
        )
    }
}

/// Cart lines keyed by item name, in the order they were opened.
///
/// Every line's total is representable; a change that would overflow it is
/// rejected and leaves the cart as it was.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cart {
    lines: Vec<CartLine>,
}

impl Cart {
    /// An empty cart.
    #[must_use]
    pub const fn new() -> Self {
        Self { lines: Vec::new() }
    }

    /// Add one unit of a menu item.
    ///
    /// # Errors
    ///
    /// Returns error if the line would exceed its quantity or money range.
    pub fn add_item(&mut self, item: &MenuItem) -> Result<&CartLine, DomainError> {
        self.add_quantity(item, Quantity::ONE)
    }

    /// Add `quantity` units of a menu item in one step.
    ///
    /// # Errors
    ///
    /// Returns error if the line would exceed its quantity or money range.
    pub fn add_quantity(
        &mut self,
        item: &MenuItem,
        quantity: Quantity,
    ) -> Result<&CartLine, DomainError> {
        self.add_units(item.name.clone(), item.price, quantity)
    }

    /// Add one unit of `name`.
    ///
    /// # Errors
    ///
    /// Returns error if the line would exceed its quantity or money range.
    pub fn add(&mut self, name: ItemName, unit_price: Money) -> Result<&CartLine, DomainError> {
        self.add_units(name, unit_price, Quantity::ONE)
    }

    /// Add `quantity` units of `name`.
    ///
    /// An existing line for the same name keeps its original unit price.
    ///
    /// # Errors
    ///
    /// Returns error if the line would exceed its quantity or money range.
    pub fn add_units(
        &mut self,
        name: ItemName,
        unit_price: Money,
        quantity: Quantity,
    ) -> Result<&CartLine, DomainError> {
        let idx = match self.position(name.as_str()) {
            Some(idx) => {
                let line = &mut self.lines[idx];
                line.set_quantity(line.quantity.checked_add(quantity)?)?;
                idx
            }
            None => {
                self.lines.push(CartLine::open(name, unit_price, quantity)?);
                self.lines.len() - 1
            }
        };
        Ok(&self.lines[idx])
    }

    /// Add one unit to an existing line.
    ///
    /// # Errors
    ///
    /// Returns error if there is no line for `name` or it is already full.
    pub fn increment(&mut self, name: &str) -> Result<&CartLine, DomainError> {
        let idx = self.require(name)?;
        let line = &mut self.lines[idx];
        line.set_quantity(line.quantity.checked_add(Quantity::ONE)?)?;
        Ok(&self.lines[idx])
    }

    /// Take one unit off a line, removing the line when it held the last one.
    ///
    /// Returns the updated line, or `None` if it was removed.
    ///
    /// # Errors
    ///
    /// Returns error if there is no line for `name`.
    pub fn decrement(&mut self, name: &str) -> Result<Option<&CartLine>, DomainError> {
        let idx = self.require(name)?;
        if let Some(quantity) = self.lines[idx].quantity.decrement() {
            self.lines[idx].set_quantity(quantity)?;
            Ok(Some(&self.lines[idx]))
        } else {
            self.lines.remove(idx);
            Ok(None)
        }
    }

    /// The line for `name`, if any.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&CartLine> {
        self.lines.iter().find(|l| l.item_name.as_str() == name)
    }

    /// All lines in insertion order.
    #[must_use]
    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }

    /// Number of distinct lines.
    #[must_use]
    pub fn len(&self) -> usize {
        self.lines.len()
    }

    /// Returns true if the cart has no lines.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Sum of all line totals.
    ///
    /// # Errors
    ///
    /// Returns error if the sum is out of range.
    pub fn total(&self) -> Result<Money, DomainError> {
        Money::checked_sum(self.lines.iter().map(CartLine::line_total))
    }

    /// Drop every line.
    pub fn clear(&mut self) {
        self.lines.clear();
    }

    /// One ledger submission per line.
    ///
    /// # Errors
    ///
    /// Returns error if a line carries a negative price.
    pub fn to_purchases(&self) -> Result<Vec<Purchase>, DomainError> {
        self.lines.iter().map(CartLine::to_purchase).collect()
    }

    fn position(&self, name: &str) -> Option<usize> {
        self.lines.iter().position(|l| l.item_name.as_str() == name)
    }

    fn require(&self, name: &str) -> Result<usize, DomainError> {
        self.position(name).ok_or_else(|| DomainError::NotFound {
            entity_type: "CartLine".to_string(),
            id: name.to_string(),
        })
    }
}
