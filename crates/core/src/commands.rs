//! Administrative and session commands
//!
//! Every command takes the write lock, runs its full precondition block, and
//! only then mutates the store. Cascades caused by deletions run inside the
//! same critical section, so readers never observe a half-applied command.

use std::collections::BTreeSet;

use corebac_domain::{
    DeletionCause, DeletionPolicy, ExpiredSession, ObjectId, Operation, Permission, Result,
    RoleId, SessionId, UserId,
};
use tracing::{info, warn};

use crate::engine::{checked, EngineState, RbacEngine};
use crate::policy::{SessionImpact, SessionPolicy};
use crate::store::RelationStore;
use crate::validation;

impl<S: RelationStore> RbacEngine<S> {
    /// Add a user with no assignments
    pub fn add_user(&self, user: impl Into<UserId>) -> Result<()> {
        let user = user.into();
        let mut state = self.write();
        checked("add_user", || validation::user_absent(&state.store, &user))?;

        state.store.insert_user(user.clone());
        info!(user = %user, "user added");
        Ok(())
    }

    /// Delete a user, its assignments and, per policy, its sessions
    pub fn delete_user(&self, user: impl Into<UserId>) -> Result<()> {
        let user = user.into();
        let mut state = self.write();
        checked("delete_user", || validation::user_exists(&state.store, &user))?;

        let sessions = state.store.sessions_of_user(&user);
        settle_sessions(&mut state, self.policy(), DeletionCause::DeleteUser, sessions, None);

        for role in state.store.roles_of_user(&user) {
            state.store.remove_assignment(&user, &role);
        }
        state.store.remove_user(&user);
        info!(user = %user, "user deleted");
        Ok(())
    }

    /// Add a role with no assignments or grants
    pub fn add_role(&self, role: impl Into<RoleId>) -> Result<()> {
        let role = role.into();
        let mut state = self.write();
        checked("add_role", || validation::role_absent(&state.store, &role))?;

        state.store.insert_role(role.clone());
        info!(role = %role, "role added");
        Ok(())
    }

    /// Delete a role from Roles, UA, PA and every active-role set
    pub fn delete_role(&self, role: impl Into<RoleId>) -> Result<()> {
        let role = role.into();
        let mut state = self.write();
        checked("delete_role", || validation::role_exists(&state.store, &role))?;

        let sessions = state.store.sessions_with_active_role(&role);
        settle_sessions(&mut state, self.policy(), DeletionCause::DeleteRole, sessions, Some(&role));

        for user in state.store.users_of_role(&role) {
            state.store.remove_assignment(&user, &role);
        }
        for permission in state.store.permissions_of_role(&role) {
            state.store.remove_grant(&role, &permission);
        }
        state.store.remove_role(&role);
        info!(role = %role, "role deleted");
        Ok(())
    }

    /// Register an (operation, object) permission
    pub fn add_permission(
        &self,
        operation: impl Into<Operation>,
        object: impl Into<ObjectId>,
    ) -> Result<()> {
        let permission = Permission::new(operation, object);
        let mut state = self.write();
        checked("add_permission", || validation::permission_absent(&state.store, &permission))?;

        state.store.insert_permission(permission.clone());
        info!(
            operation = %permission.operation,
            object = %permission.object,
            "permission added"
        );
        Ok(())
    }

    /// Remove a permission and every grant of it
    pub fn delete_permission(
        &self,
        operation: impl Into<Operation>,
        object: impl Into<ObjectId>,
    ) -> Result<()> {
        let permission = Permission::new(operation, object);
        let mut state = self.write();
        checked("delete_permission", || validation::permission_exists(&state.store, &permission))?;

        for role in state.store.roles_with_permission(&permission) {
            state.store.remove_grant(&role, &permission);
        }
        state.store.remove_permission(&permission);
        info!(
            operation = %permission.operation,
            object = %permission.object,
            "permission deleted"
        );
        Ok(())
    }

    /// Assign `user` to `role`
    pub fn assign_user(&self, user: impl Into<UserId>, role: impl Into<RoleId>) -> Result<()> {
        let (user, role) = (user.into(), role.into());
        let mut state = self.write();
        checked("assign_user", || {
            validation::user_exists(&state.store, &user)?;
            validation::role_exists(&state.store, &role)?;
            validation::assignment_absent(&state.store, &user, &role)
        })?;

        state.store.insert_assignment(user.clone(), role.clone());
        info!(user = %user, role = %role, "user assigned to role");
        Ok(())
    }

    /// Remove a UA entry; the user's sessions with `role` active go to policy
    pub fn deassign_user(&self, user: impl Into<UserId>, role: impl Into<RoleId>) -> Result<()> {
        let (user, role) = (user.into(), role.into());
        let mut state = self.write();
        checked("deassign_user", || {
            validation::user_exists(&state.store, &user)?;
            validation::role_exists(&state.store, &role)?;
            validation::assignment_exists(&state.store, &user, &role)
        })?;

        let owned = state.store.sessions_of_user(&user);
        let sessions: BTreeSet<SessionId> =
            state.store.sessions_with_active_role(&role).intersection(&owned).cloned().collect();
        settle_sessions(&mut state, self.policy(), DeletionCause::DeassignUser, sessions, Some(&role));

        state.store.remove_assignment(&user, &role);
        info!(user = %user, role = %role, "user deassigned from role");
        Ok(())
    }

    /// Grant the permission (`operation`, `object`) to `role`
    pub fn grant_permission(
        &self,
        object: impl Into<ObjectId>,
        operation: impl Into<Operation>,
        role: impl Into<RoleId>,
    ) -> Result<()> {
        let permission = Permission::new(operation, object);
        let role = role.into();
        let mut state = self.write();
        checked("grant_permission", || {
            validation::permission_exists(&state.store, &permission)?;
            validation::role_exists(&state.store, &role)?;
            validation::grant_absent(&state.store, &role, &permission)
        })?;

        state.store.insert_grant(role.clone(), permission.clone());
        info!(
            role = %role,
            operation = %permission.operation,
            object = %permission.object,
            "permission granted"
        );
        Ok(())
    }

    /// Withdraw a granted permission from `role`
    pub fn revoke_permission(
        &self,
        object: impl Into<ObjectId>,
        operation: impl Into<Operation>,
        role: impl Into<RoleId>,
    ) -> Result<()> {
        let permission = Permission::new(operation, object);
        let role = role.into();
        let mut state = self.write();
        checked("revoke_permission", || {
            validation::permission_exists(&state.store, &permission)?;
            validation::role_exists(&state.store, &role)?;
            validation::grant_exists(&state.store, &role, &permission)
        })?;

        state.store.remove_grant(&role, &permission);
        info!(
            role = %role,
            operation = %permission.operation,
            object = %permission.object,
            "permission revoked"
        );
        Ok(())
    }

    /// Open a session for `user` with an initial set of active roles
    ///
    /// Every requested role must be assigned to the user; on failure the
    /// error lists the roles that are not.
    pub fn create_session<I>(
        &self,
        user: impl Into<UserId>,
        session: impl Into<SessionId>,
        active_roles: I,
    ) -> Result<()>
    where
        I: IntoIterator,
        I::Item: Into<RoleId>,
    {
        let (user, session) = (user.into(), session.into());
        let active_roles: BTreeSet<RoleId> = active_roles.into_iter().map(Into::into).collect();
        let mut state = self.write();
        checked("create_session", || {
            validation::user_exists(&state.store, &user)?;
            validation::session_absent(&state.store, &session)?;
            validation::roles_assigned_to(&state.store, &user, &active_roles)
        })?;

        let role_count = active_roles.len();
        state.store.insert_session(session.clone(), user.clone(), active_roles);
        info!(user = %user, session = %session, active_roles = role_count, "session created");
        Ok(())
    }

    /// End a session owned by `user`
    pub fn delete_session(
        &self,
        user: impl Into<UserId>,
        session: impl Into<SessionId>,
    ) -> Result<()> {
        let (user, session) = (user.into(), session.into());
        let mut state = self.write();
        checked("delete_session", || {
            validation::user_exists(&state.store, &user)?;
            validation::session_owned_by(&state.store, &session, &user)
        })?;

        state.store.remove_session(&session);
        info!(user = %user, session = %session, "session deleted");
        Ok(())
    }

    /// Activate an assigned role in one of the user's sessions
    pub fn add_active_role(
        &self,
        user: impl Into<UserId>,
        session: impl Into<SessionId>,
        role: impl Into<RoleId>,
    ) -> Result<()> {
        let (user, session, role) = (user.into(), session.into(), role.into());
        let mut state = self.write();
        checked("add_active_role", || {
            validation::user_exists(&state.store, &user)?;
            validation::session_owned_by(&state.store, &session, &user)?;
            validation::role_exists(&state.store, &role)?;
            validation::assignment_exists(&state.store, &user, &role)?;
            validation::role_inactive(&state.store, &session, &role)
        })?;

        state.store.insert_active_role(&session, role.clone());
        info!(user = %user, session = %session, role = %role, "role activated");
        Ok(())
    }

    /// Deactivate `role` in one of `user`'s sessions
    pub fn drop_active_role(
        &self,
        user: impl Into<UserId>,
        session: impl Into<SessionId>,
        role: impl Into<RoleId>,
    ) -> Result<()> {
        let (user, session, role) = (user.into(), session.into(), role.into());
        let mut state = self.write();
        checked("drop_active_role", || {
            validation::user_exists(&state.store, &user)?;
            validation::session_owned_by(&state.store, &session, &user)?;
            validation::role_exists(&state.store, &role)?;
            validation::role_active(&state.store, &session, &role)
        })?;

        state.store.remove_active_role(&session, &role);
        info!(user = %user, session = %session, role = %role, "role deactivated");
        Ok(())
    }
}

/// Apply the session policy to every session a cascading command affects
///
/// `role` is the role being removed; `None` means the owner itself is going
/// away, in which case stripping a role cannot leave a valid session and the
/// session is terminated.
fn settle_sessions<S: RelationStore>(
    state: &mut EngineState<S>,
    policy: &dyn SessionPolicy,
    cause: DeletionCause,
    sessions: BTreeSet<SessionId>,
    role: Option<&RoleId>,
) {
    for session in sessions {
        let Some(owner) = state.store.session_owner(&session) else {
            continue;
        };
        let impact = SessionImpact { cause, session: &session, owner: &owner, role };

        match (policy.resolve(&impact), role) {
            (DeletionPolicy::StripRole, Some(role)) => {
                state.store.remove_active_role(&session, role);
                warn!(session = %session, role = %role, %cause, "role stripped from session");
            }
            (DeletionPolicy::AllowExpiry, _) => {
                let active_roles = state.store.active_roles(&session).unwrap_or_default();
                state.store.remove_session(&session);
                warn!(session = %session, user = %owner, %cause, "session retired for expiry");
                state.expired.push(ExpiredSession {
                    session,
                    owner,
                    active_roles,
                    cause,
                });
            }
            (DeletionPolicy::ForceTerminate | DeletionPolicy::StripRole, _) => {
                state.store.remove_session(&session);
                warn!(session = %session, user = %owner, %cause, "session terminated");
            }
        }
    }
}
