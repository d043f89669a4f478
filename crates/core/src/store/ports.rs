//! Port interface for relation storage
//!
//! The engine owns all locking and precondition checks; a store only has to
//! hold the five sets and the session active-role relation, and keep its own
//! forward and reverse indexes in step.

use std::collections::BTreeSet;

use corebac_domain::{ObjectId, Operation, Permission, RoleId, Session, SessionId, UserId};

use super::snapshot::{PermissionAssignment, StoreSnapshot, UserAssignment};

/// Storage for users, roles, permissions, UA, PA and sessions
///
/// Mutators return whether the store changed. Removing an entity does not
/// cascade: callers remove the relation entries that mention it first.
pub trait RelationStore: Send + Sync {
    // Users
    fn contains_user(&self, user: &UserId) -> bool;
    fn insert_user(&mut self, user: UserId) -> bool;
    fn remove_user(&mut self, user: &UserId) -> bool;
    fn user_ids(&self) -> BTreeSet<UserId>;

    // Roles
    fn contains_role(&self, role: &RoleId) -> bool;
    fn insert_role(&mut self, role: RoleId) -> bool;
    fn remove_role(&mut self, role: &RoleId) -> bool;
    fn role_ids(&self) -> BTreeSet<RoleId>;

    // Permissions
    fn contains_permission(&self, permission: &Permission) -> bool;
    fn insert_permission(&mut self, permission: Permission) -> bool;
    fn remove_permission(&mut self, permission: &Permission) -> bool;
    fn permission_set(&self) -> BTreeSet<Permission>;

    // User assignment (UA)
    fn contains_assignment(&self, user: &UserId, role: &RoleId) -> bool;
    fn insert_assignment(&mut self, user: UserId, role: RoleId) -> bool;
    fn remove_assignment(&mut self, user: &UserId, role: &RoleId) -> bool;
    fn roles_of_user(&self, user: &UserId) -> BTreeSet<RoleId>;
    fn users_of_role(&self, role: &RoleId) -> BTreeSet<UserId>;

    // Permission assignment (PA)
    fn contains_grant(&self, role: &RoleId, permission: &Permission) -> bool;
    fn insert_grant(&mut self, role: RoleId, permission: Permission) -> bool;
    fn remove_grant(&mut self, role: &RoleId, permission: &Permission) -> bool;
    fn permissions_of_role(&self, role: &RoleId) -> BTreeSet<Permission>;
    fn roles_with_permission(&self, permission: &Permission) -> BTreeSet<RoleId>;

    // Sessions
    fn contains_session(&self, session: &SessionId) -> bool;
    fn session_owner(&self, session: &SessionId) -> Option<UserId>;
    /// Insert a session together with its initial active roles
    fn insert_session(
        &mut self,
        session: SessionId,
        owner: UserId,
        active_roles: BTreeSet<RoleId>,
    ) -> bool;
    /// Remove a session and every active-role entry it holds
    fn remove_session(&mut self, session: &SessionId) -> bool;
    fn active_roles(&self, session: &SessionId) -> Option<BTreeSet<RoleId>>;
    fn contains_active_role(&self, session: &SessionId, role: &RoleId) -> bool;
    fn insert_active_role(&mut self, session: &SessionId, role: RoleId) -> bool;
    fn remove_active_role(&mut self, session: &SessionId, role: &RoleId) -> bool;
    fn sessions_of_user(&self, user: &UserId) -> BTreeSet<SessionId>;
    fn sessions_with_active_role(&self, role: &RoleId) -> BTreeSet<SessionId>;
    fn session_ids(&self) -> BTreeSet<SessionId>;

    /// Drop everything
    fn clear(&mut self);

    /// Whether any stored permission uses `operation`
    ///
    /// The default scans the permission set; indexed stores should override.
    fn has_operation(&self, operation: &Operation) -> bool {
        self.permission_set().iter().any(|p| &p.operation == operation)
    }

    /// Whether any stored permission targets `object`
    fn has_object(&self, object: &ObjectId) -> bool {
        self.permission_set().iter().any(|p| p.targets(object))
    }

    /// Owned view of one session
    fn session(&self, session: &SessionId) -> Option<Session> {
        let owner = self.session_owner(session)?;
        let active_roles = self.active_roles(session).unwrap_or_default();
        Some(Session { id: session.clone(), owner, active_roles })
    }

    /// Owned views of every session, ordered by id
    fn sessions(&self) -> Vec<Session> {
        self.session_ids().iter().filter_map(|id| self.session(id)).collect()
    }

    /// Every (user, role) pair in UA
    fn user_assignments(&self) -> BTreeSet<UserAssignment> {
        self.user_ids()
            .into_iter()
            .flat_map(|user| {
                self.roles_of_user(&user)
                    .into_iter()
                    .map(move |role| UserAssignment { user: user.clone(), role })
            })
            .collect()
    }

    /// Every (role, permission) pair in PA
    fn permission_assignments(&self) -> BTreeSet<PermissionAssignment> {
        self.role_ids()
            .into_iter()
            .flat_map(|role| {
                self.permissions_of_role(&role)
                    .into_iter()
                    .map(move |permission| PermissionAssignment { role: role.clone(), permission })
            })
            .collect()
    }

    /// Serializable copy of the full state
    fn snapshot(&self) -> StoreSnapshot {
        StoreSnapshot {
            users: self.user_ids(),
            roles: self.role_ids(),
            permissions: self.permission_set(),
            user_assignments: self.user_assignments(),
            permission_assignments: self.permission_assignments(),
            sessions: self.sessions(),
        }
    }

    /// True when no entity of any kind is stored
    fn is_empty(&self) -> bool {
        self.user_ids().is_empty()
            && self.role_ids().is_empty()
            && self.permission_set().is_empty()
            && self.session_ids().is_empty()
    }
}
