use crate::config::AppConfig;
use crate::profile::repo::ProfileStore;
use crate::recommend::client::{RecommendationClient, Recommender};
use crate::storage::{FileStore, KvStore, MemoryStore};
use anyhow::Context;
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub store: Arc<ProfileStore>,
    pub recommender: Arc<dyn Recommender>,
}

impl AppState {
    pub async fn init() -> anyhow::Result<Self> {
        let config = Arc::new(AppConfig::from_env()?);

        let kv = match &config.store_path {
            Some(path) => {
                let store = FileStore::open(path)
                    .await
                    .with_context(|| format!("open store at {}", path.display()))?;
                tracing::info!(path = %store.path().display(), "file-backed store ready");
                Arc::new(store) as Arc<dyn KvStore>
            }
            None => {
                tracing::warn!("STORE_PATH not set; profile and history live in memory only");
                Arc::new(MemoryStore::new()) as Arc<dyn KvStore>
            }
        };

        let recommender = Arc::new(
            RecommendationClient::new(&config.recommender).context("build recommendation client")?,
        ) as Arc<dyn Recommender>;
        tracing::info!(base_url = %config.recommender.base_url, "recommendation client ready");

        Ok(Self::from_parts(config, kv, recommender))
    }

    pub fn from_parts(config: Arc<AppConfig>, kv: Arc<dyn KvStore>, recommender: Arc<dyn Recommender>) -> Self {
        Self {
            config,
            store: Arc::new(ProfileStore::new(kv)),
            recommender,
        }
    }

    #[cfg(test)]
    pub fn fake(kv: Arc<dyn KvStore>, recommender: Arc<dyn Recommender>) -> Self {
        use crate::config::RecommenderConfig;
        use std::time::Duration;

        let config = Arc::new(AppConfig {
            recommender: RecommenderConfig {
                base_url: "http://fake.local".into(),
                request_timeout: Duration::from_secs(5),
                connect_timeout: Duration::from_secs(1),
            },
            store_path: None,
            host: "127.0.0.1".into(),
            port: 0,
        });
        Self::from_parts(config, kv, recommender)
    }
}
