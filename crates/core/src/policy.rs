//! Session deletion policy hook
//!
//! When `delete_user`, `delete_role` or `deassign_user` invalidates a live
//! session, the engine asks a [`SessionPolicy`] what to do with it, once per
//! affected session. The static [`DeletionPolicy`] and per-cause
//! [`DeletionPolicies`] from config are the usual answers; [`PolicyFn`]
//! adapts a closure for anything finer-grained.

use corebac_domain::{DeletionCause, DeletionPolicies, DeletionPolicy, RoleId, SessionId, UserId};

/// A session about to be affected by a cascading command
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionImpact<'a> {
    pub cause: DeletionCause,
    pub session: &'a SessionId,
    pub owner: &'a UserId,
    /// The role being removed, for `delete_role` and `deassign_user`
    pub role: Option<&'a RoleId>,
}

/// Decides the fate of each affected session
///
/// `resolve` runs while the engine holds its write lock. The lock is not
/// reentrant: an implementation must not call back into the same
/// [`RbacEngine`](crate::RbacEngine), or the calling thread deadlocks.
/// Record what you need and act on the engine after the command returns.
pub trait SessionPolicy: Send + Sync {
    fn resolve(&self, impact: &SessionImpact<'_>) -> DeletionPolicy;
}

impl SessionPolicy for DeletionPolicy {
    fn resolve(&self, _impact: &SessionImpact<'_>) -> DeletionPolicy {
        *self
    }
}

impl SessionPolicy for DeletionPolicies {
    fn resolve(&self, impact: &SessionImpact<'_>) -> DeletionPolicy {
        self.for_cause(impact.cause)
    }
}

/// Closure adapter for [`SessionPolicy`]
///
/// The closure runs under the engine's write lock, so it must not capture
/// and call the engine it is installed in.
///
/// ```
/// use corebac_core::policy::{PolicyFn, SessionImpact, SessionPolicy};
/// use corebac_domain::{DeletionCause, DeletionPolicy};
///
/// let policy = PolicyFn(|impact: &SessionImpact<'_>| {
///     if impact.owner.as_str().starts_with("svc-") {
///         DeletionPolicy::StripRole
///     } else {
///         DeletionPolicy::ForceTerminate
///     }
/// });
///
/// let session = "s1".into();
/// let owner = "svc-backup".into();
/// let impact =
///     SessionImpact { cause: DeletionCause::DeleteRole, session: &session, owner: &owner, role: None };
/// assert_eq!(policy.resolve(&impact), DeletionPolicy::StripRole);
/// ```
pub struct PolicyFn<F>(pub F);

impl<F> SessionPolicy for PolicyFn<F>
where
    F: Fn(&SessionImpact<'_>) -> DeletionPolicy + Send + Sync,
{
    fn resolve(&self, impact: &SessionImpact<'_>) -> DeletionPolicy {
        (self.0)(impact)
    }
}

impl<F> std::fmt::Debug for PolicyFn<F> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("PolicyFn(..)")
    }
}
