//! Local key-value preference persistence.
//!
//! A small JSON file holding the signed-in session snapshot, the
//! last-viewed-notifications timestamp and the bounded recent-search
//! history. Writes go through an in-memory copy so reads never touch
//! the filesystem.

use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tokio::sync::RwLock;

use crate::config::RECENT_SEARCH_CAP;
use crate::domain::Session;
use crate::errors::{AppError, AppResult};

#[derive(Debug, Default, Clone, Serialize, Deserialize)]
struct PrefData {
    session: Option<Session>,
    last_seen_notifications: Option<DateTime<Utc>>,
    recent_searches: Vec<String>,
}

/// File-backed preference store.
pub struct PreferenceStore {
    path: PathBuf,
    data: RwLock<PrefData>,
}

impl PreferenceStore {
    /// Open the store, reading any existing file. A missing or corrupt
    /// file starts from defaults.
    pub async fn open(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref().to_path_buf();
        let data = match tokio::fs::read(&path).await {
            Ok(bytes) => serde_json::from_slice(&bytes).unwrap_or_else(|e| {
                tracing::warn!("Preference file unreadable, starting fresh: {}", e);
                PrefData::default()
            }),
            Err(_) => PrefData::default(),
        };

        Self { path, data: RwLock::new(data) }
    }

    async fn persist(&self, data: &PrefData) -> AppResult<()> {
        let bytes = serde_json::to_vec_pretty(data)?;
        tokio::fs::write(&self.path, bytes)
            .await
            .map_err(|e| AppError::internal(format!("Preference write failed: {}", e)))
    }

    /// Currently signed-in user snapshot, if any.
    pub async fn session(&self) -> Option<Session> {
        self.data.read().await.session.clone()
    }

    /// Persist (or clear) the signed-in session snapshot.
    pub async fn set_session(&self, session: Option<Session>) -> AppResult<()> {
        let mut data = self.data.write().await;
        data.session = session;
        self.persist(&data).await
    }

    /// When notifications were last viewed.
    pub async fn last_seen_notifications(&self) -> Option<DateTime<Utc>> {
        self.data.read().await.last_seen_notifications
    }

    pub async fn set_last_seen_notifications(&self, at: DateTime<Utc>) -> AppResult<()> {
        let mut data = self.data.write().await;
        data.last_seen_notifications = Some(at);
        self.persist(&data).await
    }

    /// Recent search terms, most recent first.
    pub async fn recent_searches(&self) -> Vec<String> {
        self.data.read().await.recent_searches.clone()
    }

    /// Record a search term: deduplicated by exact match, moved to the
    /// front, history capped at [`RECENT_SEARCH_CAP`] entries. Blank
    /// terms are ignored.
    pub async fn push_recent_search(&self, term: &str) -> AppResult<()> {
        let term = term.trim();
        if term.is_empty() {
            return Ok(());
        }

        let mut data = self.data.write().await;
        data.recent_searches.retain(|t| t != term);
        data.recent_searches.insert(0, term.to_string());
        data.recent_searches.truncate(RECENT_SEARCH_CAP);
        self.persist(&data).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::UserRole;

    fn temp_path(name: &str) -> PathBuf {
        std::env::temp_dir().join(format!("bakehouse-prefs-{}-{}.json", name, uuid::Uuid::new_v4()))
    }

    #[tokio::test]
    async fn search_history_is_mru_deduped_and_capped() {
        let path = temp_path("history");
        let store = PreferenceStore::open(&path).await;

        for i in 0..12 {
            store.push_recent_search(&format!("term {}", i)).await.unwrap();
        }
        let history = store.recent_searches().await;
        assert_eq!(history.len(), RECENT_SEARCH_CAP);
        assert_eq!(history[0], "term 11");

        // Re-searching an existing term moves it to the front without a duplicate
        store.push_recent_search("term 5").await.unwrap();
        let history = store.recent_searches().await;
        assert_eq!(history[0], "term 5");
        assert_eq!(history.iter().filter(|t| *t == "term 5").count(), 1);
        assert_eq!(history.len(), RECENT_SEARCH_CAP);

        // Blank input is ignored
        store.push_recent_search("   ").await.unwrap();
        assert_eq!(store.recent_searches().await.len(), RECENT_SEARCH_CAP);

        let _ = tokio::fs::remove_file(&path).await;
    }

    #[tokio::test]
    async fn session_round_trips_through_the_file() {
        let path = temp_path("session");
        {
            let store = PreferenceStore::open(&path).await;
            store
                .set_session(Some(Session {
                    user_id: "u1".into(),
                    email: "lan@example.com".into(),
                    role: UserRole::Admin,
                }))
                .await
                .unwrap();
        }

        let reopened = PreferenceStore::open(&path).await;
        let session = reopened.session().await.expect("session persisted");
        assert_eq!(session.user_id, "u1");
        assert_eq!(session.role, UserRole::Admin);

        let _ = tokio::fs::remove_file(&path).await;
    }
}
