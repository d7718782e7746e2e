use async_trait::async_trait;
use serde::Deserialize;
use tracing::{debug, instrument, warn};

use crate::config::RecommenderConfig;
use crate::recommend::dto::RecommendationRequest;

pub const GENERATE_PATH: &str = "/generate-recommendation";
const UNKNOWN_SERVER_ERROR: &str = "unknown server error";

#[derive(Debug, thiserror::Error)]
pub enum RecommendError {
    /// Endpoint unreachable, timed out, or answered with something that is not JSON.
    #[error("network error: {0}")]
    Network(String),

    /// Endpoint answered but produced no recommendation.
    #[error("server error: {0}")]
    Server(String),

    #[error("HTTP client build failed: {0}")]
    HttpClientBuild(String),
}

#[async_trait]
pub trait Recommender: Send + Sync {
    async fn generate(&self, request: &RecommendationRequest) -> Result<String, RecommendError>;
}

/// Single-attempt client for the remote recommendation endpoint.
pub struct RecommendationClient {
    http: reqwest::Client,
    base_url: String,
}

impl RecommendationClient {
    pub fn new(config: &RecommenderConfig) -> Result<Self, RecommendError> {
        let http = reqwest::Client::builder()
            .timeout(config.request_timeout)
            .connect_timeout(config.connect_timeout)
            .build()
            .map_err(|e| RecommendError::HttpClientBuild(e.to_string()))?;
        Ok(Self {
            http,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }
}

#[async_trait]
impl Recommender for RecommendationClient {
    #[instrument(skip_all, fields(age = request.age, goal = %request.goal))]
    async fn generate(&self, request: &RecommendationRequest) -> Result<String, RecommendError> {
        let url = format!("{}{}", self.base_url, GENERATE_PATH);
        let response = self.http.post(&url).json(request).send().await.map_err(|e| {
            warn!(error = %e, "recommendation request failed");
            RecommendError::Network(e.to_string())
        })?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| RecommendError::Network(e.to_string()))?;
        debug!(%status, bytes = body.len(), "recommendation response received");

        classify(status.is_success(), &body).inspect_err(|e| warn!(%status, error = %e, "recommendation rejected"))
    }
}

#[derive(Debug, Deserialize)]
struct ReplyBody {
    recommendation: Option<String>,
    error: Option<String>,
}

fn classify(success: bool, body: &str) -> Result<String, RecommendError> {
    let reply: ReplyBody = serde_json::from_str(body)
        .map_err(|e| RecommendError::Network(format!("malformed response body: {e}")))?;

    match reply.recommendation {
        Some(text) if success && !text.is_empty() => Ok(text),
        _ => Err(RecommendError::Server(
            reply
                .error
                .filter(|e| !e.is_empty())
                .unwrap_or_else(|| UNKNOWN_SERVER_ERROR.to_string()),
        )),
    }
}
