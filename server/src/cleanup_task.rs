use std::time::Duration;

use common::log;

use crate::session_store::SessionStore;

/// Drops sessions nobody has touched for `inactivity_timeout`, together with their games.
pub struct CleanupTask {
    session_store: SessionStore,
    check_interval: Duration,
    inactivity_timeout: Duration,
}

impl CleanupTask {
    pub fn new(
        session_store: SessionStore,
        check_interval: Duration,
        inactivity_timeout: Duration,
    ) -> Self {
        Self {
            session_store,
            check_interval,
            inactivity_timeout,
        }
    }

    pub async fn run(&self) {
        let mut interval = tokio::time::interval(self.check_interval);

        loop {
            interval.tick().await;
            self.cleanup_inactive().await;
        }
    }

    async fn cleanup_inactive(&self) -> usize {
        let inactive_sessions = self
            .session_store
            .get_inactive_sessions(self.inactivity_timeout)
            .await;

        let mut removed = 0;
        for session_id in inactive_sessions {
            if self.session_store.remove_session(&session_id).await {
                log!("Cleaning up inactive session: {}", session_id);
                removed += 1;
            }
        }

        if removed > 0 {
            log!(
                "Removed {} inactive sessions, {} remaining",
                removed,
                self.session_store.session_count().await
            );
        }
        removed
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use common::SessionId;

    #[tokio::test]
    async fn test_cleanup_removes_only_inactive_sessions() {
        let store = SessionStore::new();
        store
            .with_storage(&SessionId::new("stale".to_string()), |_| ())
            .await;

        let patient = CleanupTask::new(store.clone(), Duration::from_secs(1), Duration::from_secs(3600));
        assert_eq!(patient.cleanup_inactive().await, 0);
        assert_eq!(store.session_count().await, 1);

        let eager = CleanupTask::new(store.clone(), Duration::from_secs(1), Duration::ZERO);
        assert_eq!(eager.cleanup_inactive().await, 1);
        assert_eq!(store.session_count().await, 0);
    }
}
