use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use axum::Router;

use crate::recommend::client::{RecommendError, Recommender};
use crate::recommend::dto::RecommendationRequest;
use crate::state::AppState;
use crate::storage::MemoryStore;

/// Serves `router` on an ephemeral localhost port and returns its base URL.
pub async fn spawn_router(router: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });
    format!("http://{addr}")
}

pub struct StubRecommender {
    reply: Result<String, String>,
    calls: AtomicUsize,
}

impl StubRecommender {
    pub fn ok(text: &str) -> Arc<Self> {
        Arc::new(Self { reply: Ok(text.to_string()), calls: AtomicUsize::new(0) })
    }

    pub fn server_error(message: &str) -> Arc<Self> {
        Arc::new(Self { reply: Err(message.to_string()), calls: AtomicUsize::new(0) })
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl Recommender for StubRecommender {
    async fn generate(&self, _request: &RecommendationRequest) -> Result<String, RecommendError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.reply.clone().map_err(RecommendError::Server)
    }
}

pub fn fake_state(recommender: Arc<dyn Recommender>) -> AppState {
    AppState::fake(Arc::new(MemoryStore::new()), recommender)
}
