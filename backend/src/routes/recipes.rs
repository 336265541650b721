//! Recipe API routes

use crate::error::ApiError;
use crate::extract::{RecipeId, ValidJson, ValidQuery};
use crate::services::RecipeService;
use crate::state::AppState;
use axum::{
    extract::State,
    http::StatusCode,
    routing::get,
    Json, Router,
};
use cookbook_shared::types::{
    CreateRecipeRequest, ListRecipesQuery, RecipeResponse, UpdateRecipeRequest,
};

/// Create recipe routes under `{base}/recipes`
///
/// The collection answers with and without a trailing slash.
pub fn recipe_routes(base: &str) -> Router<AppState> {
    let collection = format!("{}/recipes", base);

    Router::new()
        .route(&collection, get(list_recipes).post(create_recipe))
        .route(&format!("{}/", collection), get(list_recipes).post(create_recipe))
        .route(
            &format!("{}/:id", collection),
            get(get_recipe).patch(update_recipe).delete(delete_recipe),
        )
}

/// POST /v1/recipes - Create a recipe
async fn create_recipe(
    State(state): State<AppState>,
    ValidJson(req): ValidJson<CreateRecipeRequest>,
) -> Result<(StatusCode, Json<RecipeResponse>), ApiError> {
    let mut conn = state.acquire().await?;
    let recipe = RecipeService::create(&mut conn, req).await?;

    Ok((StatusCode::CREATED, Json(recipe)))
}

/// GET /v1/recipes - List recipes
///
/// Supports `skip` (default: 0) and `limit` (default: 20, max: 100).
async fn list_recipes(
    State(state): State<AppState>,
    ValidQuery(query): ValidQuery<ListRecipesQuery>,
) -> Result<Json<Vec<RecipeResponse>>, ApiError> {
    let mut conn = state.acquire().await?;
    let recipes = RecipeService::list(&mut conn, query).await?;

    Ok(Json(recipes))
}

/// GET /v1/recipes/:id - Get a recipe
async fn get_recipe(
    State(state): State<AppState>,
    RecipeId(id): RecipeId,
) -> Result<Json<RecipeResponse>, ApiError> {
    let mut conn = state.acquire().await?;
    let recipe = RecipeService::get(&mut conn, id).await?;

    Ok(Json(recipe))
}

/// PATCH /v1/recipes/:id - Update only the supplied fields
async fn update_recipe(
    State(state): State<AppState>,
    RecipeId(id): RecipeId,
    ValidJson(req): ValidJson<UpdateRecipeRequest>,
) -> Result<Json<RecipeResponse>, ApiError> {
    let mut conn = state.acquire().await?;
    let recipe = RecipeService::update(&mut conn, id, req).await?;

    Ok(Json(recipe))
}

/// DELETE /v1/recipes/:id - Delete a recipe
async fn delete_recipe(
    State(state): State<AppState>,
    RecipeId(id): RecipeId,
) -> Result<StatusCode, ApiError> {
    let mut conn = state.acquire().await?;
    RecipeService::delete(&mut conn, id).await?;

    Ok(StatusCode::NO_CONTENT)
}
