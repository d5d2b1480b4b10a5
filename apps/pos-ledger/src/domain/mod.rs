//! Domain Layer
//!
//! The innermost layer containing business logic with no storage or UI
//! dependencies. This layer defines:
//!
//! - **Value Objects**: Immutable domain types with equality by value
//! - **Repository Traits**: Persistence abstractions (implemented in adapters)
//!
//! # Bounded Contexts
//!
//! - [`catalog`]: Menu items and their prices
//! - [`cart`]: The in-memory order being built at the counter
//! - [`ledger`]: Per-item checkout totals and the daily inventory view

pub mod cart;
pub mod catalog;
pub mod ledger;
pub mod shared;
