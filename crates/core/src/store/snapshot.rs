//! Serializable store snapshots
//!
//! A snapshot is a plain-data copy of every relation the engine holds. It is
//! what [`RbacEngine::snapshot`](crate::RbacEngine::snapshot) returns and what
//! [`RbacEngine::restore`](crate::RbacEngine::restore) accepts, so it can be
//! written to JSON and loaded back later.

use std::collections::{BTreeMap, BTreeSet};

use corebac_domain::{Permission, RbacError, Reason, Result, RoleId, Session, SessionId, UserId};
use serde::{Deserialize, Serialize};

use super::ports::RelationStore;

/// One UA entry
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct UserAssignment {
    pub user: UserId,
    pub role: RoleId,
}

/// One PA entry
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct PermissionAssignment {
    pub role: RoleId,
    pub permission: Permission,
}

/// Full engine state as plain data
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoreSnapshot {
    #[serde(default)]
    pub users: BTreeSet<UserId>,
    #[serde(default)]
    pub roles: BTreeSet<RoleId>,
    #[serde(default)]
    pub permissions: BTreeSet<Permission>,
    #[serde(default)]
    pub user_assignments: BTreeSet<UserAssignment>,
    #[serde(default)]
    pub permission_assignments: BTreeSet<PermissionAssignment>,
    #[serde(default)]
    pub sessions: Vec<Session>,
}

fn inconsistent(message: String) -> RbacError {
    Reason::InconsistentSnapshot(message).into()
}

impl StoreSnapshot {
    /// Check referential integrity and the active-role subset rule
    pub fn validate(&self) -> Result<()> {
        for UserAssignment { user, role } in &self.user_assignments {
            if !self.users.contains(user) {
                return Err(inconsistent(format!("assignment references unknown user '{user}'")));
            }
            if !self.roles.contains(role) {
                return Err(inconsistent(format!("assignment references unknown role '{role}'")));
            }
        }

        for PermissionAssignment { role, permission } in &self.permission_assignments {
            if !self.roles.contains(role) {
                return Err(inconsistent(format!("grant references unknown role '{role}'")));
            }
            if !self.permissions.contains(permission) {
                return Err(inconsistent(format!(
                    "grant references unknown permission '{permission}'"
                )));
            }
        }

        let mut assigned: BTreeMap<&UserId, BTreeSet<&RoleId>> = BTreeMap::new();
        for UserAssignment { user, role } in &self.user_assignments {
            assigned.entry(user).or_default().insert(role);
        }

        let mut seen: BTreeSet<&SessionId> = BTreeSet::new();
        for session in &self.sessions {
            if !seen.insert(&session.id) {
                return Err(inconsistent(format!("session '{}' appears twice", session.id)));
            }
            if !self.users.contains(&session.owner) {
                return Err(inconsistent(format!(
                    "session '{}' is owned by unknown user '{}'",
                    session.id, session.owner
                )));
            }
            let owner_roles = assigned.get(&session.owner);
            if let Some(role) = session
                .active_roles
                .iter()
                .find(|role| !owner_roles.is_some_and(|roles| roles.contains(role)))
            {
                return Err(inconsistent(format!(
                    "session '{}' has role '{role}' active but its owner '{}' is not assigned to it",
                    session.id, session.owner
                )));
            }
        }

        Ok(())
    }

    /// Validate, then replace the contents of `store` with this snapshot
    ///
    /// On error `store` is left untouched.
    pub fn load_into<S>(&self, store: &mut S) -> Result<()>
    where
        S: RelationStore + ?Sized,
    {
        self.validate()?;

        store.clear();
        for user in &self.users {
            store.insert_user(user.clone());
        }
        for role in &self.roles {
            store.insert_role(role.clone());
        }
        for permission in &self.permissions {
            store.insert_permission(permission.clone());
        }
        for UserAssignment { user, role } in &self.user_assignments {
            store.insert_assignment(user.clone(), role.clone());
        }
        for PermissionAssignment { role, permission } in &self.permission_assignments {
            store.insert_grant(role.clone(), permission.clone());
        }
        for session in &self.sessions {
            store.insert_session(
                session.id.clone(),
                session.owner.clone(),
                session.active_roles.clone(),
            );
        }
        Ok(())
    }

    /// Total number of stored entities and relation entries
    pub fn len(&self) -> usize {
        self.users.len()
            + self.roles.len()
            + self.permissions.len()
            + self.user_assignments.len()
            + self.permission_assignments.len()
            + self.sessions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
