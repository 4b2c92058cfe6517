use crate::error::ApiError;
use crate::session_response::SessionView;
use docuquery::{Effect, Session, SessionEvent};
use std::collections::HashMap;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::RwLock;
use uuid::Uuid;

struct Entry {
    session: Session,
    last_used: Instant,
}

impl Entry {
    fn new(session: Session) -> Self {
        Self {
            session,
            last_used: Instant::now(),
        }
    }
}

/// In-memory sessions. The lock is only held for a single transition.
#[derive(Clone, Default)]
pub struct SessionStore {
    sessions: Arc<RwLock<HashMap<Uuid, Entry>>>,
}

impl SessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn create(&self) -> SessionView {
        let id = Uuid::new_v4();
        let session = Session::new();
        let view = SessionView::new(id, &session);
        self.sessions.write().await.insert(id, Entry::new(session));
        log::info!("Created session {}", id);
        view
    }

    pub async fn view(&self, id: Uuid) -> Result<SessionView, ApiError> {
        let mut sessions = self.sessions.write().await;
        let entry = sessions.get_mut(&id).ok_or(ApiError::SessionNotFound)?;
        entry.last_used = Instant::now();
        Ok(SessionView::new(id, &entry.session))
    }

    pub async fn remove(&self, id: Uuid) -> Result<(), ApiError> {
        self.sessions
            .write()
            .await
            .remove(&id)
            .map(|_| log::info!("Removed session {}", id))
            .ok_or(ApiError::SessionNotFound)
    }

    /// Applies one event and returns the effect with the resulting view.
    pub async fn apply(
        &self,
        id: Uuid,
        event: SessionEvent,
    ) -> Result<(Effect, SessionView), ApiError> {
        let mut sessions = self.sessions.write().await;
        let entry = sessions.get_mut(&id).ok_or(ApiError::SessionNotFound)?;
        entry.last_used = Instant::now();
        let effect = entry.session.apply(event)?;
        if effect == Effect::Stale {
            log::info!("Ignored stale completion for session {}", id);
        }
        Ok((effect, SessionView::new(id, &entry.session)))
    }

    /// Drops every session untouched for at least `ttl`; returns how many went.
    pub async fn sweep_idle(&self, ttl: Duration) -> usize {
        let mut sessions = self.sessions.write().await;
        let before = sessions.len();
        sessions.retain(|id, entry| {
            let keep = entry.last_used.elapsed() < ttl;
            if !keep {
                log::info!("Evicted idle session {}", id);
            }
            keep
        });
        before - sessions.len()
    }

    pub async fn len(&self) -> usize {
        self.sessions.read().await.len()
    }
}
