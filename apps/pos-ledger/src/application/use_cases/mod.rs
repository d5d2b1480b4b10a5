//! Application Use Cases
//!
//! Use cases orchestrate domain logic to fulfill application requirements.

mod checkout;
mod manage_menu;
mod view_inventory;

pub use checkout::{CheckoutError, CheckoutReceipt, CheckoutUseCase};
pub use manage_menu::{ManageMenuUseCase, MenuError};
pub use view_inventory::ViewInventoryUseCase;
