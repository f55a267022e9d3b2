use crate::session::SessionHandle;
use beacon_core::SessionId;
use dashmap::DashMap;
use std::sync::Arc;

/// Live connections, keyed by server-assigned session id.
///
/// Cloning shares the same underlying map.
#[derive(Clone, Default)]
pub struct SessionRegistry {
    sessions: Arc<DashMap<SessionId, Arc<dyn SessionHandle>>>,
}

impl SessionRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registering an id twice replaces the previous handle.
    pub fn register(&self, session_id: SessionId, handle: Arc<dyn SessionHandle>) {
        self.sessions.insert(session_id, handle);
    }

    /// Subsequent lookups for the id fail. Unknown ids are ignored.
    pub fn unregister(&self, session_id: &SessionId) {
        self.sessions.remove(session_id);
    }

    /// The returned handle is a clone; no map lock is held by the caller.
    pub fn lookup(&self, session_id: &SessionId) -> Option<Arc<dyn SessionHandle>> {
        self.sessions
            .get(session_id)
            .map(|entry| Arc::clone(entry.value()))
    }

    /// Whether the session is still connected. A session that has been
    /// unregistered never comes back under the same id.
    pub fn contains(&self, session_id: &SessionId) -> bool {
        self.sessions.contains_key(session_id)
    }

    /// Number of live connections.
    pub fn len(&self) -> usize {
        self.sessions.len()
    }

    /// True when no connection is registered.
    pub fn is_empty(&self) -> bool {
        self.sessions.is_empty()
    }
}
