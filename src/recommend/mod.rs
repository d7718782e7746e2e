pub mod client;
pub mod dto;
pub mod handlers;
pub mod sections;
pub mod services;
pub mod validate;

use crate::state::AppState;
use axum::Router;

pub fn router() -> Router<AppState> {
    handlers::recommend_routes()
}
