use std::sync::Arc;

use serde::{de::DeserializeOwned, Serialize};
use time::OffsetDateTime;
use tokio::sync::Mutex;
use tracing::{debug, error, info, instrument, warn};

use crate::profile::repo_types::{NewProfile, RecommendationHistoryEntry, UserProfile};
use crate::storage::{KvStore, StorageError};

pub const PROFILE_KEY: &str = "@fitness_user_profile";
pub const HISTORY_KEY: &str = "@fitness_recommendations_history";
pub const HISTORY_LIMIT: usize = 20;

/// Persistence for the current profile and the recommendation history.
///
/// Every operation is best effort: storage failures are logged and reported
/// as `false`, `None` or an empty list, never returned as errors. Reads cannot
/// tell a missing key from a corrupt value; the logs can.
pub struct ProfileStore {
    kv: Arc<dyn KvStore>,
    // serializes read-modify-write cycles on HISTORY_KEY
    history_lock: Mutex<()>,
}

impl ProfileStore {
    pub fn new(kv: Arc<dyn KvStore>) -> Self {
        Self {
            kv,
            history_lock: Mutex::new(()),
        }
    }

    #[instrument(skip_all)]
    pub async fn save_profile(&self, profile: NewProfile) -> bool {
        let full = profile.stamped(OffsetDateTime::now_utc());
        match self.write_json(PROFILE_KEY, &full).await {
            Ok(()) => {
                info!(age = full.age, goal = %full.goal, "profile saved");
                true
            }
            Err(e) => {
                error!(error = %e, "save profile failed");
                false
            }
        }
    }

    #[instrument(skip_all)]
    pub async fn load_profile(&self) -> Option<UserProfile> {
        match self.read_json::<UserProfile>(PROFILE_KEY).await {
            Ok(Some(profile)) => {
                debug!(last_updated = %profile.last_updated, "profile loaded");
                Some(profile)
            }
            Ok(None) => {
                debug!("no saved profile");
                None
            }
            Err(e) => {
                error!(error = %e, "load profile failed");
                None
            }
        }
    }

    #[instrument(skip_all)]
    pub async fn delete_profile(&self) -> bool {
        match self.kv.remove(PROFILE_KEY).await {
            Ok(()) => {
                info!("profile deleted");
                true
            }
            Err(e) => {
                error!(error = %e, "delete profile failed");
                false
            }
        }
    }

    /// Prepends a new entry and keeps only the newest [`HISTORY_LIMIT`].
    #[instrument(skip_all)]
    pub async fn save_recommendation(&self, recommendation: &str, profile: UserProfile) -> bool {
        let _guard = self.history_lock.lock().await;

        let mut history = match self.read_history().await {
            Ok(history) => history,
            Err(StorageError::Serialization(e)) => {
                warn!(error = %e, "stored history is corrupt; starting over");
                Vec::new()
            }
            Err(e) => {
                error!(error = %e, "save recommendation failed: history unreadable");
                return false;
            }
        };

        let created_at = OffsetDateTime::now_utc();
        let entry = RecommendationHistoryEntry {
            id: next_id(history.first(), created_at),
            recommendation: recommendation.to_string(),
            profile,
            created_at,
        };
        let id = entry.id.clone();
        history.insert(0, entry);
        history.truncate(HISTORY_LIMIT);

        match self.write_json(HISTORY_KEY, &history).await {
            Ok(()) => {
                info!(%id, len = history.len(), "recommendation saved to history");
                true
            }
            Err(e) => {
                error!(error = %e, "save recommendation failed");
                false
            }
        }
    }

    #[instrument(skip_all)]
    pub async fn load_recommendations_history(&self) -> Vec<RecommendationHistoryEntry> {
        match self.read_history().await {
            Ok(history) => {
                debug!(len = history.len(), "history loaded");
                history
            }
            Err(e) => {
                error!(error = %e, "load history failed");
                Vec::new()
            }
        }
    }

    #[instrument(skip(self))]
    pub async fn delete_recommendation(&self, id: &str) -> bool {
        let _guard = self.history_lock.lock().await;

        let history = match self.read_history().await {
            Ok(history) => history,
            Err(StorageError::Serialization(e)) => {
                warn!(error = %e, "stored history is corrupt; resetting it");
                Vec::new()
            }
            Err(e) => {
                error!(error = %e, "delete recommendation failed: history unreadable");
                return false;
            }
        };
        let before = history.len();
        let remaining: Vec<_> = history.into_iter().filter(|entry| entry.id != id).collect();

        match self.write_json(HISTORY_KEY, &remaining).await {
            Ok(()) => {
                info!(removed = before - remaining.len(), "recommendation deleted");
                true
            }
            Err(e) => {
                error!(error = %e, "delete recommendation failed");
                false
            }
        }
    }

    #[instrument(skip_all)]
    pub async fn clear_recommendations_history(&self) -> bool {
        let _guard = self.history_lock.lock().await;
        match self.kv.remove(HISTORY_KEY).await {
            Ok(()) => {
                info!("history cleared");
                true
            }
            Err(e) => {
                error!(error = %e, "clear history failed");
                false
            }
        }
    }

    /// Wipes the whole backing store, including keys this type never wrote.
    #[instrument(skip_all)]
    pub async fn clear_all(&self) -> bool {
        let _guard = self.history_lock.lock().await;
        match self.kv.clear().await {
            Ok(()) => {
                warn!("backing store cleared");
                true
            }
            Err(e) => {
                error!(error = %e, "clear all failed");
                false
            }
        }
    }

    async fn read_history(&self) -> Result<Vec<RecommendationHistoryEntry>, StorageError> {
        Ok(self.read_json(HISTORY_KEY).await?.unwrap_or_default())
    }

    async fn read_json<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>, StorageError> {
        match self.kv.get(key).await? {
            Some(raw) => Ok(Some(serde_json::from_str(&raw)?)),
            None => Ok(None),
        }
    }

    async fn write_json<T: Serialize + ?Sized>(&self, key: &str, value: &T) -> Result<(), StorageError> {
        let raw = serde_json::to_string(value)?;
        self.kv.set(key, raw).await
    }
}

/// Millisecond timestamp id, bumped past the newest stored id when the clock
/// has not moved on.
fn next_id(newest: Option<&RecommendationHistoryEntry>, now: OffsetDateTime) -> String {
    let now_ms = (now.unix_timestamp_nanos() / 1_000_000) as i64;
    let floor = newest
        .and_then(|entry| entry.id.parse::<i64>().ok())
        .map_or(i64::MIN, |id| id.saturating_add(1));
    now_ms.max(floor).to_string()
}
