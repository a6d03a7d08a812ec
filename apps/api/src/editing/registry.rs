use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::RwLock;
use tracing::info;
use uuid::Uuid;

use crate::editing::session::ReportSession;

/// Sessions kept before the least recently updated one is dropped.
pub const DEFAULT_SESSION_CAPACITY: usize = 256;

/// In-process sessions keyed by report id. Each session is the sole owner of its report;
/// the write lock makes every transition single-writer.
///
/// The registry is bounded: inserting past capacity evicts the session with the oldest
/// `updated_at` (creation time breaks ties).
#[derive(Clone)]
pub struct SessionRegistry {
    sessions: Arc<RwLock<HashMap<Uuid, ReportSession>>>,
    capacity: usize,
}

impl SessionRegistry {
    /// A capacity of zero is treated as one.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            sessions: Arc::new(RwLock::new(HashMap::new())),
            capacity: capacity.max(1),
        }
    }

    pub async fn insert(&self, session: ReportSession) -> Uuid {
        let id = session.id;
        let mut sessions = self.sessions.write().await;
        while sessions.len() >= self.capacity {
            let Some(stale) = sessions
                .values()
                .min_by_key(|s| (s.updated_at, s.created_at))
                .map(|s| s.id)
            else {
                break;
            };
            sessions.remove(&stale);
            info!("Evicted report session {stale}");
        }
        sessions.insert(id, session);
        id
    }

    /// Snapshot of a session.
    pub async fn get(&self, id: Uuid) -> Option<ReportSession> {
        self.sessions.read().await.get(&id).cloned()
    }

    /// Runs `f` against the session under the write lock. `None` if the id is unknown.
    pub async fn update<T>(
        &self,
        id: Uuid,
        f: impl FnOnce(&mut ReportSession) -> T,
    ) -> Option<T> {
        let mut sessions = self.sessions.write().await;
        sessions.get_mut(&id).map(f)
    }

    pub async fn len(&self) -> usize {
        self.sessions.read().await.len()
    }
}
