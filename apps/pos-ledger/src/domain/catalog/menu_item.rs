//! Menu item records.

use serde::{Deserialize, Serialize};

use crate::domain::shared::{DomainError, ItemName, Money};

/// A purchasable item as stored in the catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MenuItem {
    /// Row id assigned by the store.
    pub id: i64,
    /// Display name, also the cart and ledger key.
    pub name: ItemName,
    /// Unit price, never negative.
    pub price: Money,
    /// Path of the item picture inside the asset directory.
    pub image_path: Option<String>,
}

/// Validated payload for inserting a menu item.
///
/// Holding one of these means the name is non-blank and the price is a
/// non-negative number, so an insert never partially succeeds on bad input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewMenuItem {
    name: ItemName,
    price: Money,
    image_path: Option<String>,
}

impl NewMenuItem {
    /// Create an insert payload from typed values.
    ///
    /// # Errors
    ///
    /// Returns error if the price is negative.
    pub fn new(
        name: ItemName,
        price: Money,
        image_path: Option<String>,
    ) -> Result<Self, DomainError> {
        Ok(Self {
            name,
            price: price.ensure_non_negative("price")?,
            image_path,
        })
    }

    /// Create an insert payload from raw form input.
    ///
    /// # Errors
    ///
    /// Returns error if the name is blank or the price text is not a
    /// non-negative number.
    pub fn parse(
        name: &str,
        price: &str,
        image_path: Option<String>,
    ) -> Result<Self, DomainError> {
        Self::new(ItemName::new(name)?, Money::parse(price)?, image_path)
    }

    /// The item name.
    #[must_use]
    pub const fn name(&self) -> &ItemName {
        &self.name
    }

    /// The unit price.
    #[must_use]
    pub const fn price(&self) -> Money {
        self.price
    }

    /// The image path, if any.
    #[must_use]
    pub fn image_path(&self) -> Option<&str> {
        self.image_path.as_deref()
    }

    /// Attach the stored row id.
    #[must_use]
    pub fn into_menu_item(self, id: i64) -> MenuItem {
        MenuItem {
            id,
            name: self.name,
            price: self.price,
            image_path: self.image_path,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;
    use test_case::test_case;

    #[test]
    fn parse_valid_item() {
        let item = NewMenuItem::parse("Coffee", "50", Some("res/coffee.png".to_string())).unwrap();
        assert_eq!(item.name().as_str(), "Coffee");
        assert_eq!(item.price().amount(), dec!(50));
        assert_eq!(item.image_path(), Some("res/coffee.png"));
    }

    #[test]
    fn free_items_are_allowed() {
        assert!(NewMenuItem::parse("Water", "0", None).is_ok());
    }

    #[test_case("", "10" ; "empty name")]
    #[test_case("  ", "10" ; "blank name")]
    #[test_case("Tea", "ten" ; "non numeric price")]
    #[test_case("Tea", "-1" ; "negative price")]
    fn parse_rejects(name: &str, price: &str) {
        assert!(matches!(
            NewMenuItem::parse(name, price, None),
            Err(DomainError::InvalidValue { .. })
        ));
    }

    #[test]
    fn into_menu_item_keeps_fields() {
        let item = NewMenuItem::parse("Tea", "12.5", None)
            .unwrap()
            .into_menu_item(7);
        assert_eq!(item.id, 7);
        assert_eq!(item.name.as_str(), "Tea");
        assert_eq!(item.price.amount(), dec!(12.5));
        assert!(item.image_path.is_none());
    }
}
