//! CookBook Shared Library
//!
//! Wire types and field validation shared by the backend and its tests.

pub mod types;
pub mod validation;

// Re-export commonly used items
pub use types::*;
