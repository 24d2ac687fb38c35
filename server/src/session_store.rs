use std::collections::HashMap;
use std::sync::Arc;
use std::time::{Duration, Instant};

use common::SessionId;
use common::games::tictactoe::MemoryStorage;
use tokio::sync::Mutex;

struct SessionEntry {
    storage: Arc<Mutex<MemoryStorage>>,
    last_activity: Instant,
}

impl SessionEntry {
    fn new() -> Self {
        Self {
            storage: Arc::new(Mutex::new(MemoryStorage::new())),
            last_activity: Instant::now(),
        }
    }
}

/// Per-visitor game storage, keyed by the session cookie.
#[derive(Clone, Default)]
pub struct SessionStore {
    sessions: Arc<Mutex<HashMap<SessionId, SessionEntry>>>,
}

impl SessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Runs `f` against the session's storage, creating the session if needed.
    /// Only that session's lock is held while `f` runs, so requests of one
    /// session never interleave and other sessions are not blocked.
    pub async fn with_storage<R>(
        &self,
        session_id: &SessionId,
        f: impl FnOnce(&mut MemoryStorage) -> R,
    ) -> R {
        let entry_storage = {
            let mut sessions = self.sessions.lock().await;
            let entry = sessions
                .entry(session_id.clone())
                .or_insert_with(SessionEntry::new);
            entry.last_activity = Instant::now();
            Arc::clone(&entry.storage)
        };

        let mut storage = entry_storage.lock().await;
        f(&mut *storage)
    }

    pub async fn get_inactive_sessions(&self, timeout: Duration) -> Vec<SessionId> {
        let sessions = self.sessions.lock().await;
        sessions
            .iter()
            .filter(|(_, entry)| entry.last_activity.elapsed() >= timeout)
            .map(|(id, _)| id.clone())
            .collect()
    }

    pub async fn remove_session(&self, session_id: &SessionId) -> bool {
        self.sessions.lock().await.remove(session_id).is_some()
    }

    pub async fn session_count(&self) -> usize {
        self.sessions.lock().await.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use common::games::tictactoe::{Board, GameStorage, Mark};

    #[tokio::test]
    async fn test_sessions_are_isolated() {
        let store = SessionStore::new();
        let first = SessionId::new("first".to_string());
        let second = SessionId::new("second".to_string());

        store
            .with_storage(&first, |storage| {
                storage.store(Board::new(Mark::O, Mark::X).unwrap())
            })
            .await;

        assert!(store.with_storage(&first, |storage| storage.has_board()).await);
        assert!(!store.with_storage(&second, |storage| storage.has_board()).await);
        assert_eq!(store.session_count().await, 2);
    }

    #[tokio::test]
    async fn test_inactive_sessions() {
        let store = SessionStore::new();
        let id = SessionId::new("idle".to_string());
        store.with_storage(&id, |_| ()).await;

        assert!(store.get_inactive_sessions(Duration::from_secs(60)).await.is_empty());
        assert_eq!(store.get_inactive_sessions(Duration::ZERO).await, vec![id.clone()]);

        assert!(store.remove_session(&id).await);
        assert!(!store.remove_session(&id).await);
        assert_eq!(store.session_count().await, 0);
    }

    #[tokio::test]
    async fn test_busy_session_does_not_block_others() {
        let store = SessionStore::new();
        let busy = SessionId::new("busy".to_string());
        let other = SessionId::new("other".to_string());
        store.with_storage(&busy, |_| ()).await;

        let storage = {
            let sessions = store.sessions.lock().await;
            Arc::clone(&sessions[&busy].storage)
        };
        let _held = storage.lock().await;

        let done = tokio::time::timeout(
            Duration::from_secs(1),
            store.with_storage(&other, |storage| storage.has_board()),
        )
        .await;
        assert_eq!(done.ok(), Some(false));

        let blocked = tokio::time::timeout(
            Duration::from_millis(50),
            store.with_storage(&busy, |_| ()),
        )
        .await;
        assert!(blocked.is_err());
    }
}
