mod dto;
pub mod extractors;
pub mod handlers;
pub mod repo;

use crate::db::AppState;
use axum::Router;

pub fn router() -> Router<AppState> {
    handlers::user_routes()
}
