use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    routing::post,
    Json, Router,
};
use tracing::{error, instrument, warn};

use crate::{
    recommend::{
        client::RecommendError,
        dto::{GenerateResponse, ProfileForm},
        services::{generate_plan, PlanError},
    },
    state::AppState,
};

pub fn recommend_routes() -> Router<AppState> {
    Router::new().route("/recommendations", post(create_recommendation))
}

#[instrument(skip(state, payload))]
pub async fn create_recommendation(
    State(state): State<AppState>,
    payload: Result<Json<ProfileForm>, JsonRejection>,
) -> Result<Json<GenerateResponse>, (StatusCode, String)> {
    let Json(form) = payload.map_err(|e| {
        warn!(error = %e, "form body rejected");
        (StatusCode::BAD_REQUEST, format!("validation error: {}", e.body_text()))
    })?;

    match generate_plan(&state, &form).await {
        Ok(out) => Ok(Json(out)),
        Err(PlanError::Validation(e)) => {
            warn!(error = %e, "form rejected");
            Err((StatusCode::BAD_REQUEST, format!("validation error: {e}")))
        }
        Err(PlanError::Recommend(e @ (RecommendError::Server(_) | RecommendError::Network(_)))) => {
            warn!(error = %e, "recommendation unavailable");
            Err((StatusCode::BAD_GATEWAY, e.to_string()))
        }
        Err(PlanError::Recommend(e)) => {
            error!(error = %e, "recommendation client broken");
            Err((StatusCode::INTERNAL_SERVER_ERROR, e.to_string()))
        }
    }
}
