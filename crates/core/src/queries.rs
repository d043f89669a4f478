//! Review functions and the access check
//!
//! Queries take the read lock, validate the entities they name, and return
//! owned sets. Nothing returned here aliases live engine state.

use std::collections::BTreeSet;

use corebac_domain::{
    ObjectId, Operation, Permission, RbacError, Reason, Result, RoleId, Session, SessionId, UserId,
};
use tracing::debug;

use crate::engine::{checked, RbacEngine};
use crate::store::RelationStore;
use crate::validation;

/// Union of the permissions granted to `roles`
///
/// Every derived permission view goes through here; a role hierarchy would
/// widen `roles` to its closure before the union.
fn permissions_of_roles<S: RelationStore + ?Sized>(
    store: &S,
    roles: &BTreeSet<RoleId>,
) -> BTreeSet<Permission> {
    roles.iter().flat_map(|role| store.permissions_of_role(role)).collect()
}

fn session_not_found(session: &SessionId) -> RbacError {
    Reason::SessionNotFound(session.clone()).into()
}

fn operations_on(permissions: BTreeSet<Permission>, object: &ObjectId) -> BTreeSet<Operation> {
    permissions.into_iter().filter(|p| p.targets(object)).map(|p| p.operation).collect()
}

impl<S: RelationStore> RbacEngine<S> {
    /// Users assigned to `role`
    pub fn assigned_users(&self, role: impl Into<RoleId>) -> Result<BTreeSet<UserId>> {
        let role = role.into();
        let state = self.read();
        checked("assigned_users", || validation::role_exists(&state.store, &role))?;
        Ok(state.store.users_of_role(&role))
    }

    /// Roles assigned to `user`
    pub fn assigned_roles(&self, user: impl Into<UserId>) -> Result<BTreeSet<RoleId>> {
        let user = user.into();
        let state = self.read();
        checked("assigned_roles", || validation::user_exists(&state.store, &user))?;
        Ok(state.store.roles_of_user(&user))
    }

    /// Permissions granted to `role`
    pub fn role_permissions(&self, role: impl Into<RoleId>) -> Result<BTreeSet<Permission>> {
        let role = role.into();
        let state = self.read();
        checked("role_permissions", || validation::role_exists(&state.store, &role))?;
        Ok(state.store.permissions_of_role(&role))
    }

    /// Permissions `user` holds through any assigned role
    pub fn user_permissions(&self, user: impl Into<UserId>) -> Result<BTreeSet<Permission>> {
        let user = user.into();
        let state = self.read();
        checked("user_permissions", || validation::user_exists(&state.store, &user))?;

        let roles = state.store.roles_of_user(&user);
        let permissions = permissions_of_roles(&state.store, &roles);
        debug!(user = %user, roles = roles.len(), permissions = permissions.len(), "user permissions");
        Ok(permissions)
    }

    /// Roles currently active in `session`
    pub fn session_roles(&self, session: impl Into<SessionId>) -> Result<BTreeSet<RoleId>> {
        let session = session.into();
        let state = self.read();
        checked("session_roles", || validation::session_exists(&state.store, &session))?;
        Ok(state.store.active_roles(&session).unwrap_or_default())
    }

    /// Permissions available through the roles active in `session`
    pub fn session_permissions(
        &self,
        session: impl Into<SessionId>,
    ) -> Result<BTreeSet<Permission>> {
        let session = session.into();
        let state = self.read();
        checked("session_permissions", || validation::session_exists(&state.store, &session))?;

        let roles = state.store.active_roles(&session).unwrap_or_default();
        Ok(permissions_of_roles(&state.store, &roles))
    }

    /// Operations `role` may perform on `object`
    pub fn role_operations_on_object(
        &self,
        role: impl Into<RoleId>,
        object: impl Into<ObjectId>,
    ) -> Result<BTreeSet<Operation>> {
        let (role, object) = (role.into(), object.into());
        let state = self.read();
        checked("role_operations_on_object", || {
            validation::role_exists(&state.store, &role)?;
            validation::object_known(&state.store, &object)
        })?;
        Ok(operations_on(state.store.permissions_of_role(&role), &object))
    }

    /// Operations `user` may perform on `object` through any assigned role
    pub fn user_operations_on_object(
        &self,
        user: impl Into<UserId>,
        object: impl Into<ObjectId>,
    ) -> Result<BTreeSet<Operation>> {
        let (user, object) = (user.into(), object.into());
        let state = self.read();
        checked("user_operations_on_object", || {
            validation::user_exists(&state.store, &user)?;
            validation::object_known(&state.store, &object)
        })?;

        let roles = state.store.roles_of_user(&user);
        Ok(operations_on(permissions_of_roles(&state.store, &roles), &object))
    }

    /// Whether `session` may perform `operation` on `object`
    ///
    /// True iff some role active in the session is granted the pair. The
    /// session must exist and both the operation and the object must belong
    /// to some registered permission; anything else is an invalid argument,
    /// not a denial.
    pub fn check_access(
        &self,
        session: impl Into<SessionId>,
        operation: impl Into<Operation>,
        object: impl Into<ObjectId>,
    ) -> Result<bool> {
        let session = session.into();
        let permission = Permission::new(operation, object);
        let state = self.read();
        checked("check_access", || {
            validation::session_exists(&state.store, &session)?;
            validation::operation_known(&state.store, &permission.operation)?;
            validation::object_known(&state.store, &permission.object)
        })?;

        let granted = state
            .store
            .active_roles(&session)
            .unwrap_or_default()
            .iter()
            .any(|role| state.store.contains_grant(role, &permission));

        if self.trace_access() {
            debug!(
                session = %session,
                operation = %permission.operation,
                object = %permission.object,
                granted,
                "access decision"
            );
        }
        Ok(granted)
    }

    /// Owner of `session`
    pub fn session_user(&self, session: impl Into<SessionId>) -> Result<UserId> {
        let session = session.into();
        let state = self.read();
        checked("session_user", || {
            state.store.session_owner(&session).ok_or_else(|| session_not_found(&session))
        })
    }

    /// Live sessions owned by `user`
    pub fn user_sessions(&self, user: impl Into<UserId>) -> Result<BTreeSet<SessionId>> {
        let user = user.into();
        let state = self.read();
        checked("user_sessions", || validation::user_exists(&state.store, &user))?;
        Ok(state.store.sessions_of_user(&user))
    }

    /// Owned view of one live session
    pub fn session(&self, session: impl Into<SessionId>) -> Result<Session> {
        let session = session.into();
        let state = self.read();
        checked("session", || {
            state.store.session(&session).ok_or_else(|| session_not_found(&session))
        })
    }

    /// Every registered user
    pub fn users(&self) -> BTreeSet<UserId> {
        self.read().store.user_ids()
    }

    /// Every registered role
    pub fn roles(&self) -> BTreeSet<RoleId> {
        self.read().store.role_ids()
    }

    /// Every registered permission
    pub fn permissions(&self) -> BTreeSet<Permission> {
        self.read().store.permission_set()
    }

    /// Every live session, ordered by id
    pub fn sessions(&self) -> Vec<Session> {
        self.read().store.sessions()
    }
}
