//! Session views
//!
//! These are owned snapshots handed out by queries; mutating them has no
//! effect on the engine.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use super::ids::{RoleId, SessionId, UserId};
use crate::config::DeletionCause;

/// A live session: its owner and currently active roles
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    pub id: SessionId,
    pub owner: UserId,
    #[serde(default)]
    pub active_roles: BTreeSet<RoleId>,
}

impl Session {
    /// Create a session view with no active roles
    pub fn new(id: impl Into<SessionId>, owner: impl Into<UserId>) -> Self {
        Self { id: id.into(), owner: owner.into(), active_roles: BTreeSet::new() }
    }

    /// Add an active role (builder style)
    pub fn with_active_role(mut self, role: impl Into<RoleId>) -> Self {
        self.active_roles.insert(role.into());
        self
    }

    /// Whether `role` is active in this session
    pub fn is_active(&self, role: &RoleId) -> bool {
        self.active_roles.contains(role)
    }
}

/// A session retired from the live set under the `allow-expiry` policy
///
/// The engine no longer authorizes anything through it; the embedding layer
/// drains these records and lets the session lapse on its own schedule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExpiredSession {
    pub session: SessionId,
    pub owner: UserId,
    /// Roles that were active at the moment of retirement
    pub active_roles: BTreeSet<RoleId>,
    pub cause: DeletionCause,
}
