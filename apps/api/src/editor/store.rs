use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Utc};
use tokio::sync::RwLock;
use tokio::task::JoinHandle;
use tokio::time::{interval, MissedTickBehavior};
use tracing::info;
use uuid::Uuid;

use crate::editor::session::EditorSession;

/// In-memory session map. Nothing survives a restart.
#[derive(Clone, Default)]
pub struct SessionStore {
    inner: Arc<RwLock<HashMap<Uuid, EditorSession>>>,
}

impl SessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn create(&self) -> EditorSession {
        let session = EditorSession::new(Uuid::new_v4());
        self.inner
            .write()
            .await
            .insert(session.id, session.clone());
        session
    }

    /// Snapshot of a session.
    pub async fn get(&self, id: Uuid) -> Option<EditorSession> {
        self.inner.read().await.get(&id).cloned()
    }

    /// Runs `f` under the write lock. `None` when the session is gone.
    ///
    /// `f` must not await; callers do slow work outside and apply the result here.
    pub async fn update<R>(&self, id: Uuid, f: impl FnOnce(&mut EditorSession) -> R) -> Option<R> {
        let mut sessions = self.inner.write().await;
        sessions.get_mut(&id).map(f)
    }

    pub async fn delete(&self, id: Uuid) -> bool {
        self.inner.write().await.remove(&id).is_some()
    }

    pub async fn len(&self) -> usize {
        self.inner.read().await.len()
    }

    /// Drops sessions last touched before `cutoff`. Sessions with an
    /// extraction in flight are kept. Returns how many were removed.
    pub async fn remove_idle_since(&self, cutoff: DateTime<Utc>) -> usize {
        let mut sessions = self.inner.write().await;
        let before = sessions.len();
        sessions.retain(|_, s| s.is_processing || s.updated_at >= cutoff);
        before - sessions.len()
    }

    /// Periodically removes sessions idle for longer than `ttl`.
    /// The task runs until the returned handle is aborted.
    pub fn spawn_idle_sweeper(&self, ttl: Duration, every: Duration) -> JoinHandle<()> {
        let store = self.clone();
        let ttl = chrono::Duration::from_std(ttl).unwrap_or(chrono::Duration::MAX);
        tokio::spawn(async move {
            let mut ticks = interval(every);
            ticks.set_missed_tick_behavior(MissedTickBehavior::Delay);
            loop {
                ticks.tick().await;
                let cutoff = Utc::now()
                    .checked_sub_signed(ttl)
                    .unwrap_or(DateTime::<Utc>::MIN_UTC);
                let removed = store.remove_idle_since(cutoff).await;
                if removed > 0 {
                    info!(
                        "Removed {removed} idle sessions; {} remain",
                        store.len().await
                    );
                }
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::editor::session::View;

    #[tokio::test]
    async fn test_create_get_update_delete() {
        let store = SessionStore::new();
        let session = store.create().await;
        assert_eq!(store.len().await, 1);

        let view = store
            .update(session.id, |s| {
                s.start_manually();
                s.view
            })
            .await;
        assert_eq!(view, Some(View::Editor));
        assert_eq!(store.get(session.id).await.unwrap().view, View::Editor);

        assert!(store.delete(session.id).await);
        assert!(!store.delete(session.id).await);
        assert!(store.get(session.id).await.is_none());
    }

    #[tokio::test]
    async fn test_update_missing_session_returns_none() {
        let store = SessionStore::new();
        assert!(store.update(Uuid::new_v4(), |s| s.dismiss_error()).await.is_none());
    }

    #[tokio::test]
    async fn test_idle_sessions_are_removed_but_busy_ones_kept() {
        let store = SessionStore::new();
        let idle = store.create().await;
        let busy = store.create().await;
        let fresh = store.create().await;
        let long_ago = Utc::now() - chrono::Duration::hours(48);
        store.update(idle.id, |s| s.updated_at = long_ago).await;
        store
            .update(busy.id, |s| {
                s.begin_processing();
                s.updated_at = long_ago;
            })
            .await;

        let removed = store
            .remove_idle_since(Utc::now() - chrono::Duration::hours(24))
            .await;

        assert_eq!(removed, 1);
        assert!(store.get(idle.id).await.is_none(), "idle session should be gone");
        assert!(store.get(busy.id).await.is_some(), "in-flight session must survive");
        assert!(store.get(fresh.id).await.is_some());
    }

    #[tokio::test(start_paused = true)]
    async fn test_sweeper_runs_on_its_interval() {
        let store = SessionStore::new();
        let session = store.create().await;
        store
            .update(session.id, |s| s.updated_at = Utc::now() - chrono::Duration::hours(2))
            .await;

        let sweeper = store.spawn_idle_sweeper(Duration::from_secs(3600), Duration::from_secs(60));
        tokio::time::sleep(Duration::from_secs(61)).await;
        sweeper.abort();

        assert_eq!(store.len().await, 0, "sweeper should have removed the idle session");
    }

    #[tokio::test]
    async fn test_clones_share_state() {
        let store = SessionStore::new();
        let other = store.clone();
        let session = store.create().await;
        assert!(other.get(session.id).await.is_some());
    }
}
