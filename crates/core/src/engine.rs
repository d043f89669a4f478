//! The concurrent engine facade
//!
//! [`RbacEngine`] wraps a [`RelationStore`] in a single `parking_lot`
//! read/write lock. Commands hold the write lock across validation, mutation
//! and cascade, so every command is linearizable and all-or-nothing. Queries
//! hold the read lock and return owned values.

use std::sync::Arc;

use corebac_domain::{EngineConfig, ExpiredSession, Result};
use parking_lot::{RwLock, RwLockReadGuard, RwLockWriteGuard};
use tracing::{debug, info};

use crate::policy::SessionPolicy;
use crate::store::{InMemoryRelationStore, RelationStore, StoreSnapshot};

pub(crate) struct EngineState<S> {
    pub(crate) store: S,
    /// Sessions retired under `allow-expiry`, oldest first
    pub(crate) expired: Vec<ExpiredSession>,
}

/// Core RBAC engine
///
/// Shared across threads behind an `Arc`:
///
/// ```
/// use std::sync::Arc;
///
/// use corebac_core::RbacEngine;
/// use corebac_domain::DeletionPolicy;
///
/// let engine = Arc::new(RbacEngine::new(DeletionPolicy::ForceTerminate));
/// engine.add_user("alice").unwrap();
///
/// let reader = Arc::clone(&engine);
/// let users = std::thread::spawn(move || reader.users()).join().unwrap();
/// assert_eq!(users.len(), 1);
/// ```
pub struct RbacEngine<S = InMemoryRelationStore> {
    state: RwLock<EngineState<S>>,
    policy: Arc<dyn SessionPolicy>,
    trace_access: bool,
}

impl RbacEngine<InMemoryRelationStore> {
    /// Empty in-memory engine using `policy` for cascading session effects
    pub fn new(policy: impl SessionPolicy + 'static) -> Self {
        Self::with_store(InMemoryRelationStore::new(), policy)
    }

    /// Empty in-memory engine configured from `config`
    pub fn from_config(config: &EngineConfig) -> Self {
        Self::new(config.deletion).with_trace_access(config.trace_access)
    }
}

impl<S: RelationStore> RbacEngine<S> {
    /// Engine over an existing store
    ///
    /// The store's contents are taken as-is; use [`RbacEngine::restore`] to
    /// load state that has not been checked.
    pub fn with_store(store: S, policy: impl SessionPolicy + 'static) -> Self {
        Self::with_shared_policy(store, Arc::new(policy))
    }

    /// Engine over an existing store with a policy shared elsewhere
    pub fn with_shared_policy(store: S, policy: Arc<dyn SessionPolicy>) -> Self {
        Self {
            state: RwLock::new(EngineState { store, expired: Vec::new() }),
            policy,
            trace_access: false,
        }
    }

    /// Record every `check_access` decision at debug level
    pub fn with_trace_access(mut self, enabled: bool) -> Self {
        self.trace_access = enabled;
        self
    }

    /// Whether every `check_access` decision is logged
    pub fn trace_access(&self) -> bool {
        self.trace_access
    }

    pub(crate) fn policy(&self) -> &dyn SessionPolicy {
        self.policy.as_ref()
    }

    pub(crate) fn read(&self) -> RwLockReadGuard<'_, EngineState<S>> {
        self.state.read()
    }

    pub(crate) fn write(&self) -> RwLockWriteGuard<'_, EngineState<S>> {
        self.state.write()
    }

    /// Serializable copy of the live state
    pub fn snapshot(&self) -> StoreSnapshot {
        self.read().store.snapshot()
    }

    /// Replace the live state with `snapshot`
    ///
    /// The snapshot is validated first; an inconsistent snapshot is rejected
    /// with `InconsistentSnapshot` and the engine is left unchanged. Sessions
    /// already retired under `allow-expiry` stay queued.
    pub fn restore(&self, snapshot: &StoreSnapshot) -> Result<()> {
        let mut state = self.write();
        checked("restore", || snapshot.validate())?;
        snapshot.load_into(&mut state.store)?;
        info!(
            users = snapshot.users.len(),
            roles = snapshot.roles.len(),
            permissions = snapshot.permissions.len(),
            sessions = snapshot.sessions.len(),
            "engine state restored"
        );
        Ok(())
    }

    /// Sessions retired under `allow-expiry` that have not been drained
    pub fn expired_sessions(&self) -> Vec<ExpiredSession> {
        self.read().expired.clone()
    }

    /// Take ownership of every retired session, emptying the queue
    pub fn drain_expired_sessions(&self) -> Vec<ExpiredSession> {
        let drained = std::mem::take(&mut self.write().expired);
        if !drained.is_empty() {
            debug!(count = drained.len(), "expired sessions drained");
        }
        drained
    }

    /// Consume the engine and return its store
    pub fn into_store(self) -> S {
        self.state.into_inner().store
    }
}

/// Run a precondition block, logging a rejection before handing it back
pub(crate) fn checked<T>(command: &'static str, check: impl FnOnce() -> Result<T>) -> Result<T> {
    check().inspect_err(|err| {
        debug!(command, reason = err.reason().code(), error = %err, "precondition failed");
    })
}
