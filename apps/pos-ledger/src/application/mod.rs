//! Application Layer
//!
//! The application layer orchestrates domain logic through use cases.
//! It defines:
//!
//! - **Ports**: Interfaces for interacting with external systems
//! - **Use Cases**: The menu, checkout and inventory screens' operations

pub mod ports;
pub mod use_cases;

pub use ports::*;
pub use use_cases::*;
