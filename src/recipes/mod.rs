use crate::state::AppState;
use axum::Router;

pub mod catalog;
pub mod favorites;
pub mod handlers;
mod dto;

pub fn router() -> Router<AppState> {
    Router::new()
        .merge(handlers::favorites_routes())
        .merge(handlers::catalog_routes())
}
