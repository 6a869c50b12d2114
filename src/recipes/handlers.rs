use axum::{
    extract::{Path, State},
    routing::{get, post},
    Json, Router,
};
use serde_json::Value;
use tracing::{info, instrument};

use crate::{auth::jwt::AuthUser, error::ApiError, state::AppState};

use super::dto::MessageResponse;
use super::favorites;

pub fn catalog_routes() -> Router<AppState> {
    Router::new()
        .route("/recipes", get(list_recipes))
        .route("/recipes/category/:category", get(list_by_category))
        .route("/recipes/:id", get(get_recipe))
}

pub fn favorites_routes() -> Router<AppState> {
    Router::new()
        .route("/recipes/favorites", get(list_favorites))
        .route(
            "/recipes/favorites/:id",
            post(add_favorite).delete(remove_favorite),
        )
}

// --- catalog pass-through ---

#[instrument(skip(state))]
pub async fn list_recipes(State(state): State<AppState>) -> Result<Json<Value>, ApiError> {
    let body = state.catalog.search_all().await?;
    Ok(Json(body))
}

#[instrument(skip(state))]
pub async fn get_recipe(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Value>, ApiError> {
    let body = state.catalog.lookup(&id).await?;
    Ok(Json(body))
}

#[instrument(skip(state))]
pub async fn list_by_category(
    State(state): State<AppState>,
    Path(category): Path<String>,
) -> Result<Json<Value>, ApiError> {
    let body = state.catalog.filter_by_category(&category).await?;
    Ok(Json(body))
}

// --- favorites ---

#[instrument(skip(state))]
pub async fn list_favorites(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
) -> Result<Json<Vec<Value>>, ApiError> {
    let ids = favorites::list(&state, user_id).await?;
    let resolved = favorites::expand(state.catalog.as_ref(), &ids).await;
    Ok(Json(resolved))
}

#[instrument(skip(state))]
pub async fn add_favorite(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Path(id): Path<String>,
) -> Result<Json<MessageResponse>, ApiError> {
    favorites::add(&state, user_id, &id).await?;
    info!(user_id, recipe_id = %id, "favorite added");
    Ok(Json(MessageResponse {
        message: "Recipe added to favorites".into(),
    }))
}

#[instrument(skip(state))]
pub async fn remove_favorite(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Path(id): Path<String>,
) -> Result<Json<MessageResponse>, ApiError> {
    favorites::remove(&state, user_id, &id).await?;
    info!(user_id, recipe_id = %id, "favorite removed");
    Ok(Json(MessageResponse {
        message: "Recipe removed from favorites".into(),
    }))
}
