use futures_util::future::join_all;
use serde_json::Value;
use tracing::warn;

use crate::error::ApiError;
use crate::recipes::catalog::{first_meal, RecipeCatalog};
use crate::state::AppState;
use crate::users::User;

/// Appends `recipe_id` unless already present. Returns whether the list changed.
fn append_unique(favorites: &mut Vec<String>, recipe_id: &str) -> bool {
    if favorites.iter().any(|id| id == recipe_id) {
        return false;
    }
    favorites.push(recipe_id.to_string());
    true
}

/// Drops `recipe_id` from the list. Removing an absent id is a no-op.
fn remove_id(favorites: &mut Vec<String>, recipe_id: &str) {
    favorites.retain(|id| id != recipe_id);
}

async fn load_user(state: &AppState, user_id: i64) -> Result<User, ApiError> {
    User::find_by_id(&state.db, user_id)
        .await?
        .ok_or_else(|| ApiError::NotFound("User not found".into()))
}

/// Idempotent add: only a first-time id is appended and persisted.
pub async fn add(state: &AppState, user_id: i64, recipe_id: &str) -> Result<(), ApiError> {
    let user = load_user(state, user_id).await?;
    let mut favorites = user.favorites.0;
    if append_unique(&mut favorites, recipe_id) {
        User::set_favorites(&state.db, user_id, &favorites).await?;
    }
    Ok(())
}

/// Removes the id and persists unconditionally; absent ids do not error.
pub async fn remove(state: &AppState, user_id: i64, recipe_id: &str) -> Result<(), ApiError> {
    let user = load_user(state, user_id).await?;
    let mut favorites = user.favorites.0;
    remove_id(&mut favorites, recipe_id);
    User::set_favorites(&state.db, user_id, &favorites).await?;
    Ok(())
}

pub async fn list(state: &AppState, user_id: i64) -> Result<Vec<String>, ApiError> {
    Ok(load_user(state, user_id).await?.favorites.0)
}

/// Resolves every id against the catalog concurrently, preserving the order
/// of `ids`. Ids that fail to resolve (transport error, recipe gone upstream)
/// are dropped rather than failing the whole read.
pub async fn expand(catalog: &dyn RecipeCatalog, ids: &[String]) -> Vec<Value> {
    let fetches = ids.iter().map(|id| async move {
        match catalog.lookup(id).await {
            Ok(body) => first_meal(&body),
            Err(e) => {
                warn!(error = %e, recipe_id = %id, "favorite lookup failed, skipping");
                None
            }
        }
    });
    join_all(fetches).await.into_iter().flatten().collect()
}


#[cfg(test)]
mod expand_tests {
    use super::*;
    use crate::recipes::catalog::CatalogError;
    use async_trait::async_trait;
    use serde_json::json;

    /// Catalog that fails or comes up empty for designated ids.
    struct FlakyCatalog;

    #[async_trait]
    impl RecipeCatalog for FlakyCatalog {
        async fn search_all(&self) -> Result<Value, CatalogError> {
            Ok(json!({ "meals": [] }))
        }

        async fn lookup(&self, recipe_id: &str) -> Result<Value, CatalogError> {
            match recipe_id {
                "down" => Err(CatalogError::Status(503)),
                "gone" => Ok(json!({ "meals": null })),
                id => Ok(json!({ "meals": [{ "idMeal": id, "strMeal": format!("Meal {id}") }] })),
            }
        }

        async fn filter_by_category(&self, _category: &str) -> Result<Value, CatalogError> {
            Ok(json!({ "meals": [] }))
        }
    }

    #[tokio::test]
    async fn resolves_all_ids_in_order() {
        let ids = vec!["52772".to_string(), "53049".to_string()];
        let resolved = expand(&FlakyCatalog, &ids).await;
        assert_eq!(resolved.len(), 2);
        assert_eq!(resolved[0]["idMeal"], "52772");
        assert_eq!(resolved[1]["idMeal"], "53049");
    }

    #[tokio::test]
    async fn failed_and_missing_lookups_are_dropped() {
        let ids = vec![
            "52772".to_string(),
            "down".to_string(),
            "gone".to_string(),
            "53049".to_string(),
        ];
        let resolved = expand(&FlakyCatalog, &ids).await;
        assert_eq!(resolved.len(), 2);
        assert_eq!(resolved[0]["idMeal"], "52772");
        assert_eq!(resolved[1]["idMeal"], "53049");
    }

    #[tokio::test]
    async fn empty_favorites_expand_to_empty() {
        let resolved = expand(&FlakyCatalog, &[]).await;
        assert!(resolved.is_empty());
    }
}
