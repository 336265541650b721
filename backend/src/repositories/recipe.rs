//! Recipe repository for database operations
//!
//! Every function runs a single statement on the caller's connection, so a
//! request holds at most one pooled connection however many calls it makes.

use anyhow::Result;
use chrono::{DateTime, Utc};
use sqlx::types::Json;
use sqlx::PgConnection;

/// Recipe record from database
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct RecipeRecord {
    pub id: i32,
    pub title: String,
    pub description: Option<String>,
    pub ingredients: Json<Vec<String>>,
    pub instructions: String,
    pub prep_time: Option<i32>,
    pub cook_time: Option<i32>,
    pub servings: Option<i32>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Input for creating a recipe
#[derive(Debug, Clone)]
pub struct CreateRecipe {
    pub title: String,
    pub description: Option<String>,
    pub ingredients: Vec<String>,
    pub instructions: String,
    pub prep_time: Option<i32>,
    pub cook_time: Option<i32>,
    pub servings: Option<i32>,
}

/// Changes for a partial update
///
/// `None` leaves a column alone. For nullable columns `Some(None)` stores NULL.
#[derive(Debug, Clone, Default)]
pub struct UpdateRecipe {
    pub title: Option<String>,
    pub description: Option<Option<String>>,
    pub ingredients: Option<Vec<String>>,
    pub instructions: Option<String>,
    pub prep_time: Option<Option<i32>>,
    pub cook_time: Option<Option<i32>>,
    pub servings: Option<Option<i32>>,
}

/// Recipe repository for database operations
pub struct RecipeRepository;

impl RecipeRepository {
    /// List recipes by id, skipping `offset` rows and returning at most `limit`
    pub async fn list(conn: &mut PgConnection, offset: i64, limit: i64) -> Result<Vec<RecipeRecord>> {
        let records = sqlx::query_as::<_, RecipeRecord>(
            r#"
            SELECT id, title, description, ingredients, instructions,
                   prep_time, cook_time, servings, created_at, updated_at
            FROM recipes
            ORDER BY id
            LIMIT $1 OFFSET $2
            "#,
        )
        .bind(limit)
        .bind(offset)
        .fetch_all(&mut *conn)
        .await?;

        Ok(records)
    }

    /// Get recipe by ID
    pub async fn get_by_id(conn: &mut PgConnection, id: i32) -> Result<Option<RecipeRecord>> {
        let record = sqlx::query_as::<_, RecipeRecord>(
            r#"
            SELECT id, title, description, ingredients, instructions,
                   prep_time, cook_time, servings, created_at, updated_at
            FROM recipes
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&mut *conn)
        .await?;

        Ok(record)
    }

    /// Create a new recipe
    ///
    /// Both timestamps come from the same `NOW()`, so they are equal.
    pub async fn create(conn: &mut PgConnection, input: CreateRecipe) -> Result<RecipeRecord> {
        let record = sqlx::query_as::<_, RecipeRecord>(
            r#"
            INSERT INTO recipes (title, description, ingredients, instructions,
                                 prep_time, cook_time, servings, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, NOW(), NOW())
            RETURNING id, title, description, ingredients, instructions,
                      prep_time, cook_time, servings, created_at, updated_at
            "#,
        )
        .bind(&input.title)
        .bind(&input.description)
        .bind(Json(&input.ingredients))
        .bind(&input.instructions)
        .bind(input.prep_time)
        .bind(input.cook_time)
        .bind(input.servings)
        .fetch_one(&mut *conn)
        .await?;

        Ok(record)
    }

    /// Apply a partial update to an existing recipe and refresh `updated_at`
    ///
    /// Returns `None` if the row disappeared since it was read.
    pub async fn update(
        conn: &mut PgConnection,
        existing: &RecipeRecord,
        changes: UpdateRecipe,
    ) -> Result<Option<RecipeRecord>> {
        let record = sqlx::query_as::<_, RecipeRecord>(
            r#"
            UPDATE recipes SET
                title = COALESCE($2, title),
                description = CASE WHEN $3 THEN $4 ELSE description END,
                ingredients = COALESCE($5, ingredients),
                instructions = COALESCE($6, instructions),
                prep_time = CASE WHEN $7 THEN $8 ELSE prep_time END,
                cook_time = CASE WHEN $9 THEN $10 ELSE cook_time END,
                servings = CASE WHEN $11 THEN $12 ELSE servings END,
                updated_at = NOW()
            WHERE id = $1
            RETURNING id, title, description, ingredients, instructions,
                      prep_time, cook_time, servings, created_at, updated_at
            "#,
        )
        .bind(existing.id)
        .bind(changes.title)
        .bind(changes.description.is_some())
        .bind(changes.description.flatten())
        .bind(changes.ingredients.map(Json))
        .bind(changes.instructions)
        .bind(changes.prep_time.is_some())
        .bind(changes.prep_time.flatten())
        .bind(changes.cook_time.is_some())
        .bind(changes.cook_time.flatten())
        .bind(changes.servings.is_some())
        .bind(changes.servings.flatten())
        .fetch_optional(&mut *conn)
        .await?;

        Ok(record)
    }

    /// Delete a recipe
    ///
    /// Returns whether a row was removed.
    pub async fn delete(conn: &mut PgConnection, existing: &RecipeRecord) -> Result<bool> {
        let result = sqlx::query("DELETE FROM recipes WHERE id = $1")
            .bind(existing.id)
            .execute(&mut *conn)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}

