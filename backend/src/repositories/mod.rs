//! Database repositories
//!
//! Provides data access layer for database operations.

pub mod recipe;

pub use recipe::{CreateRecipe, RecipeRecord, RecipeRepository, UpdateRecipe};
