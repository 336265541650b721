//! Recipe service
//!
//! Maps between API shapes and repository records and turns missing rows
//! into not-found errors. There is no other business logic.

use crate::error::ApiError;
use crate::repositories::{CreateRecipe, RecipeRecord, RecipeRepository, UpdateRecipe};
use cookbook_shared::types::{
    CreateRecipeRequest, ListRecipesQuery, RecipeFields, RecipeResponse, UpdateRecipeRequest,
};
use sqlx::PgConnection;
use tracing::{debug, info};

/// Recipe service for CRUD operations
pub struct RecipeService;

impl RecipeService {
    /// List recipes with offset/limit pagination
    pub async fn list(
        conn: &mut PgConnection,
        query: ListRecipesQuery,
    ) -> Result<Vec<RecipeResponse>, ApiError> {
        let records = RecipeRepository::list(conn, query.skip, query.limit)
            .await
            .map_err(ApiError::storage)?;

        debug!(skip = query.skip, limit = query.limit, count = records.len(), "Listed recipes");

        Ok(records.into_iter().map(RecipeResponse::from).collect())
    }

    /// Get a single recipe
    pub async fn get(conn: &mut PgConnection, id: i32) -> Result<RecipeResponse, ApiError> {
        Self::find_existing(conn, id).await.map(RecipeResponse::from)
    }

    /// Create a recipe
    pub async fn create(
        conn: &mut PgConnection,
        req: CreateRecipeRequest,
    ) -> Result<RecipeResponse, ApiError> {
        let record = RecipeRepository::create(conn, CreateRecipe::from(req))
            .await
            .map_err(ApiError::storage)?;

        info!(recipe_id = record.id, "Recipe created");

        Ok(RecipeResponse::from(record))
    }

    /// Apply a partial update to an existing recipe
    pub async fn update(
        conn: &mut PgConnection,
        id: i32,
        req: UpdateRecipeRequest,
    ) -> Result<RecipeResponse, ApiError> {
        let existing = Self::find_existing(conn, id).await?;

        let record = RecipeRepository::update(conn, &existing, UpdateRecipe::from(req))
            .await
            .map_err(ApiError::storage)?
            .ok_or_else(ApiError::recipe_not_found)?;

        info!(recipe_id = record.id, "Recipe updated");

        Ok(RecipeResponse::from(record))
    }

    /// Delete a recipe
    pub async fn delete(conn: &mut PgConnection, id: i32) -> Result<(), ApiError> {
        let existing = Self::find_existing(conn, id).await?;

        let deleted = RecipeRepository::delete(conn, &existing)
            .await
            .map_err(ApiError::storage)?;

        if !deleted {
            return Err(ApiError::recipe_not_found());
        }

        info!(recipe_id = id, "Recipe deleted");
        Ok(())
    }

    /// Load a recipe or fail with not-found
    async fn find_existing(conn: &mut PgConnection, id: i32) -> Result<RecipeRecord, ApiError> {
        RecipeRepository::get_by_id(conn, id)
            .await
            .map_err(ApiError::storage)?
            .ok_or_else(ApiError::recipe_not_found)
    }
}

impl From<CreateRecipeRequest> for CreateRecipe {
    fn from(req: CreateRecipeRequest) -> Self {
        Self {
            title: req.title,
            description: req.description,
            ingredients: req.ingredients,
            instructions: req.instructions,
            prep_time: req.prep_time,
            cook_time: req.cook_time,
            servings: req.servings,
        }
    }
}

impl From<UpdateRecipeRequest> for UpdateRecipe {
    /// Required fields arrive already checked for `null`, so only their
    /// presence carries over.
    fn from(req: UpdateRecipeRequest) -> Self {
        Self {
            title: req.title.flatten(),
            description: req.description,
            ingredients: req.ingredients.flatten(),
            instructions: req.instructions.flatten(),
            prep_time: req.prep_time,
            cook_time: req.cook_time,
            servings: req.servings,
        }
    }
}

impl From<RecipeRecord> for RecipeResponse {
    fn from(record: RecipeRecord) -> Self {
        Self {
            id: record.id,
            fields: RecipeFields {
                title: record.title,
                description: record.description,
                ingredients: record.ingredients.0,
                instructions: record.instructions,
                prep_time: record.prep_time,
                cook_time: record.cook_time,
                servings: record.servings,
            },
            created_at: record.created_at,
            updated_at: record.updated_at,
        }
    }
}
