//! Precondition predicates
//!
//! Each check inspects the store and returns the [`Reason`] it would fail
//! with. Commands run every check for their arguments before the first
//! mutation, so a rejected command never leaves a partial change behind.

use std::collections::BTreeSet;

use corebac_domain::{
    ObjectId, Operation, Permission, RbacError, Reason, Result, RoleId, SessionId, UserId,
};

use crate::store::RelationStore;

fn ensure(condition: bool, reason: impl FnOnce() -> Reason) -> Result<()> {
    if condition {
        Ok(())
    } else {
        Err(RbacError::InvalidArgument(reason()))
    }
}

pub fn user_exists<S: RelationStore + ?Sized>(store: &S, user: &UserId) -> Result<()> {
    ensure(store.contains_user(user), || Reason::UserNotFound(user.clone()))
}

pub fn user_absent<S: RelationStore + ?Sized>(store: &S, user: &UserId) -> Result<()> {
    ensure(!store.contains_user(user), || Reason::UserAlreadyExists(user.clone()))
}

pub fn role_exists<S: RelationStore + ?Sized>(store: &S, role: &RoleId) -> Result<()> {
    ensure(store.contains_role(role), || Reason::RoleNotFound(role.clone()))
}

pub fn role_absent<S: RelationStore + ?Sized>(store: &S, role: &RoleId) -> Result<()> {
    ensure(!store.contains_role(role), || Reason::RoleAlreadyExists(role.clone()))
}

pub fn permission_exists<S: RelationStore + ?Sized>(
    store: &S,
    permission: &Permission,
) -> Result<()> {
    ensure(store.contains_permission(permission), || {
        Reason::PermissionNotFound(permission.clone())
    })
}

pub fn permission_absent<S: RelationStore + ?Sized>(
    store: &S,
    permission: &Permission,
) -> Result<()> {
    ensure(!store.contains_permission(permission), || {
        Reason::PermissionAlreadyExists(permission.clone())
    })
}

pub fn session_exists<S: RelationStore + ?Sized>(store: &S, session: &SessionId) -> Result<()> {
    ensure(store.contains_session(session), || Reason::SessionNotFound(session.clone()))
}

pub fn session_absent<S: RelationStore + ?Sized>(store: &S, session: &SessionId) -> Result<()> {
    ensure(!store.contains_session(session), || Reason::SessionAlreadyExists(session.clone()))
}

pub fn assignment_exists<S: RelationStore + ?Sized>(
    store: &S,
    user: &UserId,
    role: &RoleId,
) -> Result<()> {
    ensure(store.contains_assignment(user, role), || Reason::AssignmentNotFound {
        user: user.clone(),
        role: role.clone(),
    })
}

pub fn assignment_absent<S: RelationStore + ?Sized>(
    store: &S,
    user: &UserId,
    role: &RoleId,
) -> Result<()> {
    ensure(!store.contains_assignment(user, role), || Reason::AssignmentAlreadyExists {
        user: user.clone(),
        role: role.clone(),
    })
}

pub fn grant_exists<S: RelationStore + ?Sized>(
    store: &S,
    role: &RoleId,
    permission: &Permission,
) -> Result<()> {
    ensure(store.contains_grant(role, permission), || Reason::GrantNotFound {
        role: role.clone(),
        permission: permission.clone(),
    })
}

pub fn grant_absent<S: RelationStore + ?Sized>(
    store: &S,
    role: &RoleId,
    permission: &Permission,
) -> Result<()> {
    ensure(!store.contains_grant(role, permission), || Reason::GrantAlreadyExists {
        role: role.clone(),
        permission: permission.clone(),
    })
}

/// The session exists and `user` owns it
pub fn session_owned_by<S: RelationStore + ?Sized>(
    store: &S,
    session: &SessionId,
    user: &UserId,
) -> Result<()> {
    session_exists(store, session)?;
    ensure(store.session_owner(session).as_ref() == Some(user), || Reason::NotSessionOwner {
        session: session.clone(),
        user: user.clone(),
    })
}

pub fn role_active<S: RelationStore + ?Sized>(
    store: &S,
    session: &SessionId,
    role: &RoleId,
) -> Result<()> {
    ensure(store.contains_active_role(session, role), || Reason::RoleNotActive {
        session: session.clone(),
        role: role.clone(),
    })
}

pub fn role_inactive<S: RelationStore + ?Sized>(
    store: &S,
    session: &SessionId,
    role: &RoleId,
) -> Result<()> {
    ensure(!store.contains_active_role(session, role), || Reason::RoleAlreadyActive {
        session: session.clone(),
        role: role.clone(),
    })
}

/// Every role in `roles` is assigned to `user`
///
/// The failure lists all offending roles, not just the first.
pub fn roles_assigned_to<S: RelationStore + ?Sized>(
    store: &S,
    user: &UserId,
    roles: &BTreeSet<RoleId>,
) -> Result<()> {
    let assigned = store.roles_of_user(user);
    let missing: BTreeSet<RoleId> = roles.difference(&assigned).cloned().collect();
    ensure(missing.is_empty(), || Reason::ActiveRolesNotSubset { user: user.clone(), roles: missing })
}

pub fn operation_known<S: RelationStore + ?Sized>(store: &S, operation: &Operation) -> Result<()> {
    ensure(store.has_operation(operation), || Reason::OperationNotFound(operation.clone()))
}

pub fn object_known<S: RelationStore + ?Sized>(store: &S, object: &ObjectId) -> Result<()> {
    ensure(store.has_object(object), || Reason::ObjectNotFound(object.clone()))
}
