//! API request and response types

use crate::validation::{
    collect, null_not_allowed, validate_duration_minutes, validate_servings, validate_title,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use validator::{Validate, ValidationErrors};

/// Default page size for recipe listings
pub const DEFAULT_LIST_LIMIT: i64 = 20;

// ============================================================================
// Recipe Types
// ============================================================================

/// Field set shared by every recipe shape
///
/// Used as-is for creation input and flattened into [`RecipeResponse`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
pub struct RecipeFields {
    #[validate(length(max = 100, message = "title must be at most 100 characters"))]
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub ingredients: Vec<String>,
    pub instructions: String,
    /// Preparation time in minutes
    #[serde(default)]
    #[validate(range(min = 0, message = "must be greater than or equal to 0"))]
    pub prep_time: Option<i32>,
    /// Cooking time in minutes
    #[serde(default)]
    #[validate(range(min = 0, message = "must be greater than or equal to 0"))]
    pub cook_time: Option<i32>,
    #[serde(default)]
    #[validate(range(min = 1, message = "must be greater than or equal to 1"))]
    pub servings: Option<i32>,
}

/// Recipe creation request
pub type CreateRecipeRequest = RecipeFields;

/// Partial recipe update
///
/// The outer `Option` records whether the client sent the key at all; the
/// inner one whether it was `null`. Absent keys leave the stored value
/// untouched. `null` clears optional columns and is rejected for required
/// ones.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UpdateRecipeRequest {
    #[serde(default, deserialize_with = "nullable", skip_serializing_if = "Option::is_none")]
    pub title: Option<Option<String>>,
    #[serde(default, deserialize_with = "nullable", skip_serializing_if = "Option::is_none")]
    pub description: Option<Option<String>>,
    #[serde(default, deserialize_with = "nullable", skip_serializing_if = "Option::is_none")]
    pub ingredients: Option<Option<Vec<String>>>,
    #[serde(default, deserialize_with = "nullable", skip_serializing_if = "Option::is_none")]
    pub instructions: Option<Option<String>>,
    #[serde(default, deserialize_with = "nullable", skip_serializing_if = "Option::is_none")]
    pub prep_time: Option<Option<i32>>,
    #[serde(default, deserialize_with = "nullable", skip_serializing_if = "Option::is_none")]
    pub cook_time: Option<Option<i32>>,
    #[serde(default, deserialize_with = "nullable", skip_serializing_if = "Option::is_none")]
    pub servings: Option<Option<i32>>,
}

impl UpdateRecipeRequest {
    /// True when the request carries no fields
    pub fn is_empty(&self) -> bool {
        self == &Self::default()
    }
}

impl Validate for UpdateRecipeRequest {
    fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();

        match &self.title {
            Some(Some(title)) => collect(&mut errors, "title", validate_title(title)),
            Some(None) => errors.add("title", null_not_allowed()),
            None => {}
        }
        if let Some(None) = self.ingredients {
            errors.add("ingredients", null_not_allowed());
        }
        if let Some(None) = self.instructions {
            errors.add("instructions", null_not_allowed());
        }
        if let Some(Some(minutes)) = self.prep_time {
            collect(&mut errors, "prep_time", validate_duration_minutes(minutes));
        }
        if let Some(Some(minutes)) = self.cook_time {
            collect(&mut errors, "cook_time", validate_duration_minutes(minutes));
        }
        if let Some(Some(servings)) = self.servings {
            collect(&mut errors, "servings", validate_servings(servings));
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }
}

/// Recipe as returned by the API
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecipeResponse {
    pub id: i32,
    #[serde(flatten)]
    pub fields: RecipeFields,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Offset/limit query for recipe listings
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Validate)]
pub struct ListRecipesQuery {
    #[serde(default)]
    #[validate(range(min = 0, message = "must be greater than or equal to 0"))]
    pub skip: i64,
    #[serde(default = "default_list_limit")]
    #[validate(range(min = 0, message = "must be greater than or equal to 0"))]
    pub limit: i64,
}

impl Default for ListRecipesQuery {
    fn default() -> Self {
        Self {
            skip: 0,
            limit: DEFAULT_LIST_LIMIT,
        }
    }
}

fn default_list_limit() -> i64 {
    DEFAULT_LIST_LIMIT
}

/// Present-but-null becomes `Some(None)`; `#[serde(default)]` covers absent keys
fn nullable<'de, D, T>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

// ============================================================================
// Error Types
// ============================================================================

/// API error response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: ErrorDetail,
}

/// Error detail
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorDetail {
    pub code: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<Vec<FieldError>>,
}

/// A single field-level validation failure
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldError {
    pub field: String,
    pub code: String,
    pub message: String,
}
