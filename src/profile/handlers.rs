use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{delete, get},
    Json, Router,
};
use tracing::instrument;

use crate::{
    profile::repo_types::{RecommendationHistoryEntry, UserProfile},
    state::AppState,
};

pub fn profile_routes() -> Router<AppState> {
    Router::new().route("/profile", get(get_profile).delete(delete_profile))
}

pub fn history_routes() -> Router<AppState> {
    Router::new()
        .route("/history", get(list_history).delete(clear_history))
        .route("/history/:id", delete(delete_history_entry))
        .route("/data", delete(clear_all))
}

fn storage_failed() -> (StatusCode, String) {
    (StatusCode::INTERNAL_SERVER_ERROR, "storage error".into())
}

#[instrument(skip(state))]
pub async fn get_profile(State(state): State<AppState>) -> Result<Json<UserProfile>, (StatusCode, String)> {
    state
        .store
        .load_profile()
        .await
        .map(Json)
        .ok_or((StatusCode::NOT_FOUND, "no saved profile".into()))
}

#[instrument(skip(state))]
pub async fn delete_profile(State(state): State<AppState>) -> Result<StatusCode, (StatusCode, String)> {
    if state.store.delete_profile().await {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(storage_failed())
    }
}

#[instrument(skip(state))]
pub async fn list_history(State(state): State<AppState>) -> Json<Vec<RecommendationHistoryEntry>> {
    Json(state.store.load_recommendations_history().await)
}

#[instrument(skip(state))]
pub async fn delete_history_entry(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<StatusCode, (StatusCode, String)> {
    if state.store.delete_recommendation(&id).await {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(storage_failed())
    }
}

#[instrument(skip(state))]
pub async fn clear_history(State(state): State<AppState>) -> Result<StatusCode, (StatusCode, String)> {
    if state.store.clear_recommendations_history().await {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(storage_failed())
    }
}

#[instrument(skip(state))]
pub async fn clear_all(State(state): State<AppState>) -> Result<StatusCode, (StatusCode, String)> {
    if state.store.clear_all().await {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(storage_failed())
    }
}

#[cfg(test)]
mod handler_tests {
    use crate::app::build_app;
    use crate::profile::repo_types::NewProfile;
    use crate::test_support::{fake_state, spawn_router, StubRecommender};
    use serde_json::Value;

    fn profile() -> NewProfile {
        NewProfile {
            age: 40,
            weight: 90.0,
            height: 182,
            goal: "снизить вес".into(),
            activity_level: "умеренный".into(),
        }
    }

    #[tokio::test]
    async fn profile_get_and_delete() {
        let state = fake_state(StubRecommender::ok("unused"));
        let base = spawn_router(build_app(state.clone())).await;
        let http = reqwest::Client::new();

        let res = http.get(format!("{base}/api/v1/profile")).send().await.unwrap();
        assert_eq!(res.status(), 404);

        assert!(state.store.save_profile(profile()).await);
        let body: Value = http.get(format!("{base}/api/v1/profile")).send().await.unwrap().json().await.unwrap();
        assert_eq!(body["age"], 40);
        assert_eq!(body["activityLevel"], "умеренный");
        assert!(body["lastUpdated"].is_string());

        for _ in 0..2 {
            let res = http.delete(format!("{base}/api/v1/profile")).send().await.unwrap();
            assert_eq!(res.status(), 204);
        }
        assert!(state.store.load_profile().await.is_none());
    }

    #[tokio::test]
    async fn history_list_delete_and_clear() {
        let state = fake_state(StubRecommender::ok("unused"));
        let base = spawn_router(build_app(state.clone())).await;
        let http = reqwest::Client::new();

        let snapshot = profile().stamped(time::OffsetDateTime::now_utc());
        for text in ["first", "second", "third"] {
            assert!(state.store.save_recommendation(text, snapshot.clone()).await);
        }

        let list: Vec<Value> = http.get(format!("{base}/api/v1/history")).send().await.unwrap().json().await.unwrap();
        assert_eq!(list.len(), 3);
        assert_eq!(list[0]["recommendation"], "third");
        let middle = list[1]["id"].as_str().unwrap().to_string();

        for _ in 0..2 {
            let res = http.delete(format!("{base}/api/v1/history/{middle}")).send().await.unwrap();
            assert_eq!(res.status(), 204);
        }
        let left: Vec<_> = state
            .store
            .load_recommendations_history()
            .await
            .into_iter()
            .map(|e| e.recommendation)
            .collect();
        assert_eq!(left, vec!["third", "first"]);

        let res = http.delete(format!("{base}/api/v1/history")).send().await.unwrap();
        assert_eq!(res.status(), 204);
        assert!(state.store.load_recommendations_history().await.is_empty());
    }

    #[tokio::test]
    async fn data_wipe_clears_everything() {
        let state = fake_state(StubRecommender::ok("unused"));
        let base = spawn_router(build_app(state.clone())).await;

        assert!(state.store.save_profile(profile()).await);
        let res = reqwest::Client::new().delete(format!("{base}/api/v1/data")).send().await.unwrap();
        assert_eq!(res.status(), 204);
        assert!(state.store.load_profile().await.is_none());
    }
}
