//! Checkout Use Case

use std::sync::Arc;

use serde::Serialize;
use tracing::{error, info};

use crate::domain::cart::{Cart, CartLine};
use crate::domain::ledger::OrderLedgerRepository;
use crate::domain::shared::{DomainError, LedgerTimestamp, Money};
use crate::error::StoreError;

/// What was written to the ledger by a successful checkout.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CheckoutReceipt {
    /// Cart lines as they were checked out.
    pub lines: Vec<CartLine>,
    /// Sum of the line totals.
    pub total: Money,
    /// Time stamped on any new ledger rows.
    pub at: LedgerTimestamp,
}

/// Checkout error.
#[derive(Debug, thiserror::Error)]
pub enum CheckoutError {
    /// Nothing to check out.
    #[error("No items in the order to check out")]
    EmptyCart,

    /// The cart cannot be turned into purchases or its total is out of range.
    #[error("Invalid cart: {0}")]
    Invalid(#[from] DomainError),

    /// The ledger write failed; nothing was recorded.
    #[error("Checkout failed: {0}")]
    Store(#[from] StoreError),
}

/// Use case for flushing the cart into the checkout ledger.
pub struct CheckoutUseCase<L>
where
    L: OrderLedgerRepository,
{
    ledger: Arc<L>,
}

impl<L> CheckoutUseCase<L>
where
    L: OrderLedgerRepository,
{
    /// Create a new `CheckoutUseCase`.
    pub const fn new(ledger: Arc<L>) -> Self {
        Self { ledger }
    }

    /// Check out at the current local time.
    pub async fn checkout(&self, cart: &mut Cart) -> Result<CheckoutReceipt, CheckoutError> {
        self.checkout_at(cart, LedgerTimestamp::now()).await
    }

    /// Record every cart line in one ledger write, then empty the cart.
    ///
    /// On failure the cart is left untouched so the checkout can be retried.
    pub async fn checkout_at(
        &self,
        cart: &mut Cart,
        at: LedgerTimestamp,
    ) -> Result<CheckoutReceipt, CheckoutError> {
        if cart.is_empty() {
            return Err(CheckoutError::EmptyCart);
        }

        let purchases = cart.to_purchases()?;
        let total = cart.total()?;
        if let Err(e) = self.ledger.record_purchases(&purchases, at).await {
            error!(lines = purchases.len(), error = %e, "Checkout failed, cart kept");
            return Err(e.into());
        }

        let receipt = CheckoutReceipt {
            lines: cart.lines().to_vec(),
            total,
            at,
        };
        cart.clear();

        info!(
            lines = receipt.lines.len(),
            total = %receipt.total,
            at = %receipt.at,
            "Order checked out"
        );
        Ok(receipt)
    }
}
