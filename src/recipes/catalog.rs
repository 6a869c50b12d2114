use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde_json::Value;
use thiserror::Error;
use tracing::warn;

use crate::config::CatalogConfig;

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("recipe catalog unreachable")]
    Transport(#[source] reqwest::Error),

    #[error("recipe catalog returned status {0}")]
    Status(u16),
}

/// Read-only client for the external recipe catalog. The upstream body is
/// relayed verbatim; nothing about its shape is validated here.
#[async_trait]
pub trait RecipeCatalog: Send + Sync {
    /// Unfiltered catalog listing.
    async fn search_all(&self) -> Result<Value, CatalogError>;

    /// Single-recipe lookup. An unknown id is not an error; the upstream
    /// answers `{"meals": null}` and that body is relayed as-is.
    async fn lookup(&self, recipe_id: &str) -> Result<Value, CatalogError>;

    /// Recipes belonging to one category.
    async fn filter_by_category(&self, category: &str) -> Result<Value, CatalogError>;
}

/// TheMealDB-compatible catalog over HTTP, with a per-request timeout and
/// bounded retry on transport errors and 5xx responses.
pub struct MealDbCatalog {
    client: Client,
    base_url: String,
    retries: u32,
}

impl MealDbCatalog {
    pub fn new(config: &CatalogConfig) -> anyhow::Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .connect_timeout(Duration::from_secs(config.timeout_secs))
            .build()?;
        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            retries: config.retries,
        })
    }

    async fn get_json(&self, path: &str, query: &[(&str, &str)]) -> Result<Value, CatalogError> {
        let url = format!("{}/{}", self.base_url, path);
        let mut attempt: u32 = 0;
        loop {
            let err = match self.client.get(&url).query(query).send().await {
                Ok(resp) => {
                    let status = resp.status();
                    if status.is_success() {
                        return resp.json::<Value>().await.map_err(CatalogError::Transport);
                    } else if status.is_server_error() {
                        CatalogError::Status(status.as_u16())
                    } else {
                        // 4xx means the request itself is wrong; retrying will not help
                        return Err(CatalogError::Status(status.as_u16()));
                    }
                }
                Err(e) => CatalogError::Transport(e),
            };
            if attempt >= self.retries {
                return Err(err);
            }
            attempt += 1;
            warn!(error = %err, path, attempt, "catalog request failed, retrying");
        }
    }
}

#[async_trait]
impl RecipeCatalog for MealDbCatalog {
    async fn search_all(&self) -> Result<Value, CatalogError> {
        self.get_json("search.php", &[("s", "")]).await
    }

    async fn lookup(&self, recipe_id: &str) -> Result<Value, CatalogError> {
        self.get_json("lookup.php", &[("i", recipe_id)]).await
    }

    async fn filter_by_category(&self, category: &str) -> Result<Value, CatalogError> {
        self.get_json("filter.php", &[("c", category)]).await
    }
}

/// First entry of a lookup response, if the upstream found the recipe.
/// The catalog answers `{"meals": null}` for unknown ids.
pub fn first_meal(body: &Value) -> Option<Value> {
    body.get("meals")?.as_array()?.first().cloned()
}
