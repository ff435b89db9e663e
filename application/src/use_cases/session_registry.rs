//! Session registry
//!
//! Owns one [`ShuffleSession`] per viewer. Each session sits behind its own
//! async mutex, so cycles for different viewers run independently while two
//! cycles for the same viewer are serialized.

use crate::config::EngineConfig;
use shuffle_domain::{DomainError, SessionId, ShuffleSession};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use tracing::debug;

/// Shared handle to one session
pub type SessionHandle = Arc<tokio::sync::Mutex<ShuffleSession>>;

/// Get-or-create store of live sessions
pub struct SessionRegistry {
    config: EngineConfig,
    sessions: Mutex<HashMap<SessionId, SessionHandle>>,
}

impl SessionRegistry {
    pub fn new(config: EngineConfig) -> Result<Self, DomainError> {
        config.validate()?;
        Ok(Self {
            config,
            sessions: Mutex::new(HashMap::new()),
        })
    }

    /// Session for `id`, created with the registry's settings on first use
    pub fn session(&self, id: &SessionId) -> Result<SessionHandle, DomainError> {
        let mut sessions = self.lock();
        if let Some(handle) = sessions.get(id) {
            return Ok(Arc::clone(handle));
        }

        let session = ShuffleSession::new(id.clone(), self.config.session)?;
        let handle = Arc::new(tokio::sync::Mutex::new(session));
        sessions.insert(id.clone(), Arc::clone(&handle));
        debug!(session = %id, "Session created");
        Ok(handle)
    }

    /// Drop a session. Returns its handle so pending events can be flushed.
    pub fn end(&self, id: &SessionId) -> Option<SessionHandle> {
        let removed = self.lock().remove(id);
        if removed.is_some() {
            debug!(session = %id, "Session ended");
        }
        removed
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, HashMap<SessionId, SessionHandle>> {
        self.sessions
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shuffle_domain::{CatalogSnapshot, ContentItem, ViewerContext};

    fn registry() -> SessionRegistry {
        SessionRegistry::new(EngineConfig::seeded(11)).unwrap()
    }

    #[test]
    fn test_invalid_config_rejected() {
        let result = SessionRegistry::new(EngineConfig::default().with_history_capacity(0));
        assert!(matches!(result, Err(DomainError::InvalidCapacity)));
    }

    #[tokio::test]
    async fn test_same_id_returns_same_session() {
        let registry = registry();
        let id = SessionId::new("alice");
        let catalog = CatalogSnapshot::new(vec![
            ContentItem::new("a", 100),
            ContentItem::new("b", 100),
        ]);

        let first = registry.session(&id).unwrap();
        first
            .lock()
            .await
            .next(&catalog, &ViewerContext::default())
            .unwrap();

        let again = registry.session(&id).unwrap();
        assert!(Arc::ptr_eq(&first, &again));
        assert_eq!(again.lock().await.history().len(), 1);
        assert_eq!(registry.len(), 1);
    }

    #[tokio::test]
    async fn test_sessions_are_independent() {
        let registry = registry();
        let catalog = CatalogSnapshot::new(vec![ContentItem::new("only", 100)]);
        let ctx = ViewerContext::default();

        let alice = registry.session(&SessionId::new("alice")).unwrap();
        let bob = registry.session(&SessionId::new("bob")).unwrap();
        alice.lock().await.next(&catalog, &ctx).unwrap();

        assert_eq!(alice.lock().await.history().len(), 1);
        assert!(bob.lock().await.history().is_empty());
        assert_eq!(registry.len(), 2);
    }

    #[test]
    fn test_end_removes_session() {
        let registry = registry();
        let id = SessionId::new("carol");
        registry.session(&id).unwrap();

        assert!(registry.end(&id).is_some());
        assert!(registry.end(&id).is_none());
        assert!(registry.is_empty());
    }
}
