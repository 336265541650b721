//! Services
//!
//! Services sit between the HTTP routes and the repositories.

pub mod recipe;

pub use recipe::RecipeService;
