//! Error types used throughout the engine
//!
//! Every command and query fails in exactly one externally observable way:
//! [`RbacError::InvalidArgument`], raised when its precondition is false.
//! The attached [`Reason`] names the violated condition for diagnostics.
//! Callers should branch on the error kind, not on the reason.

use std::collections::BTreeSet;

use corebac_common::error::{ErrorClassification, ErrorSeverity};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::types::{ObjectId, Operation, Permission, RoleId, SessionId, UserId};

/// Main error type for the engine
#[derive(Error, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "reason")]
pub enum RbacError {
    #[error("Invalid argument: {0}")]
    InvalidArgument(Reason),
}

/// Result type alias for engine operations
pub type Result<T> = std::result::Result<T, RbacError>;

/// Structured cause of a precondition failure
#[derive(Error, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "reason", content = "detail", rename_all = "snake_case")]
pub enum Reason {
    #[error("user '{0}' does not exist")]
    UserNotFound(UserId),

    #[error("user '{0}' already exists")]
    UserAlreadyExists(UserId),

    #[error("role '{0}' does not exist")]
    RoleNotFound(RoleId),

    #[error("role '{0}' already exists")]
    RoleAlreadyExists(RoleId),

    #[error("permission '{0}' does not exist")]
    PermissionNotFound(Permission),

    #[error("permission '{0}' already exists")]
    PermissionAlreadyExists(Permission),

    #[error("session '{0}' does not exist")]
    SessionNotFound(SessionId),

    #[error("session '{0}' already exists")]
    SessionAlreadyExists(SessionId),

    #[error("user '{user}' is not assigned to role '{role}'")]
    AssignmentNotFound { user: UserId, role: RoleId },

    #[error("user '{user}' is already assigned to role '{role}'")]
    AssignmentAlreadyExists { user: UserId, role: RoleId },

    #[error("permission '{permission}' is not granted to role '{role}'")]
    GrantNotFound { role: RoleId, permission: Permission },

    #[error("permission '{permission}' is already granted to role '{role}'")]
    GrantAlreadyExists { role: RoleId, permission: Permission },

    #[error("session '{session}' is not owned by user '{user}'")]
    NotSessionOwner { session: SessionId, user: UserId },

    #[error("role '{role}' is not active in session '{session}'")]
    RoleNotActive { session: SessionId, role: RoleId },

    #[error("role '{role}' is already active in session '{session}'")]
    RoleAlreadyActive { session: SessionId, role: RoleId },

    #[error("roles [{}] are not assigned to user '{user}'", join_roles(.roles))]
    ActiveRolesNotSubset { user: UserId, roles: BTreeSet<RoleId> },

    #[error("no permission uses operation '{0}'")]
    OperationNotFound(Operation),

    #[error("no permission targets object '{0}'")]
    ObjectNotFound(ObjectId),

    #[error("snapshot is inconsistent: {0}")]
    InconsistentSnapshot(String),
}

/// Coarse grouping of [`Reason`]s, stable for metrics and log fields
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReasonCategory {
    NotFound,
    AlreadyExists,
    NotASubset,
    NotOwner,
    NotActive,
    Inconsistent,
}

crate::impl_domain_status_conversions!(ReasonCategory {
    NotFound => "not-found",
    AlreadyExists => "already-exists",
    NotASubset => "not-a-subset",
    NotOwner => "not-owner",
    NotActive => "not-active",
    Inconsistent => "inconsistent",
});

fn join_roles(roles: &BTreeSet<RoleId>) -> String {
    roles.iter().map(RoleId::as_str).collect::<Vec<_>>().join(", ")
}

impl Reason {
    /// Stable snake_case label for log fields
    pub fn code(&self) -> &'static str {
        match self {
            Self::UserNotFound(_) => "user_not_found",
            Self::UserAlreadyExists(_) => "user_already_exists",
            Self::RoleNotFound(_) => "role_not_found",
            Self::RoleAlreadyExists(_) => "role_already_exists",
            Self::PermissionNotFound(_) => "permission_not_found",
            Self::PermissionAlreadyExists(_) => "permission_already_exists",
            Self::SessionNotFound(_) => "session_not_found",
            Self::SessionAlreadyExists(_) => "session_already_exists",
            Self::AssignmentNotFound { .. } => "assignment_not_found",
            Self::AssignmentAlreadyExists { .. } => "assignment_already_exists",
            Self::GrantNotFound { .. } => "grant_not_found",
            Self::GrantAlreadyExists { .. } => "grant_already_exists",
            Self::NotSessionOwner { .. } => "not_session_owner",
            Self::RoleNotActive { .. } => "role_not_active",
            Self::RoleAlreadyActive { .. } => "role_already_active",
            Self::ActiveRolesNotSubset { .. } => "active_roles_not_subset",
            Self::OperationNotFound(_) => "operation_not_found",
            Self::ObjectNotFound(_) => "object_not_found",
            Self::InconsistentSnapshot(_) => "inconsistent_snapshot",
        }
    }

    /// Which family of precondition was violated
    pub fn category(&self) -> ReasonCategory {
        match self {
            Self::UserNotFound(_)
            | Self::RoleNotFound(_)
            | Self::PermissionNotFound(_)
            | Self::SessionNotFound(_)
            | Self::AssignmentNotFound { .. }
            | Self::GrantNotFound { .. }
            | Self::OperationNotFound(_)
            | Self::ObjectNotFound(_) => ReasonCategory::NotFound,
            Self::UserAlreadyExists(_)
            | Self::RoleAlreadyExists(_)
            | Self::PermissionAlreadyExists(_)
            | Self::SessionAlreadyExists(_)
            | Self::AssignmentAlreadyExists { .. }
            | Self::GrantAlreadyExists { .. }
            | Self::RoleAlreadyActive { .. } => ReasonCategory::AlreadyExists,
            Self::ActiveRolesNotSubset { .. } => ReasonCategory::NotASubset,
            Self::NotSessionOwner { .. } => ReasonCategory::NotOwner,
            Self::RoleNotActive { .. } => ReasonCategory::NotActive,
            Self::InconsistentSnapshot(_) => ReasonCategory::Inconsistent,
        }
    }
}

impl RbacError {
    /// The structured reason behind the failure
    pub fn reason(&self) -> &Reason {
        match self {
            Self::InvalidArgument(reason) => reason,
        }
    }

    /// Consume the error, keeping only its reason
    pub fn into_reason(self) -> Reason {
        match self {
            Self::InvalidArgument(reason) => reason,
        }
    }

    /// Always true: the engine has a single failure kind
    pub fn is_invalid_argument(&self) -> bool {
        matches!(self, Self::InvalidArgument(_))
    }
}

impl From<Reason> for RbacError {
    fn from(reason: Reason) -> Self {
        Self::InvalidArgument(reason)
    }
}

impl ErrorClassification for RbacError {
    fn is_retryable(&self) -> bool {
        // The same arguments fail the same way until the caller changes state.
        false
    }

    fn severity(&self) -> ErrorSeverity {
        match self.reason().category() {
            ReasonCategory::NotFound => ErrorSeverity::Info,
            ReasonCategory::Inconsistent => ErrorSeverity::Error,
            _ => ErrorSeverity::Warning,
        }
    }
}
