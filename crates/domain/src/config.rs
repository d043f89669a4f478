//! Engine configuration
//!
//! The only behavioural knob the engine has is what happens to live sessions
//! when a command removes the ground they stand on (`delete_user`,
//! `delete_role`, `deassign_user`). No default policy exists: the integrator
//! picks a [`DeletionPolicy`] and records it in config.

use serde::{Deserialize, Serialize};

use crate::constants::DEFAULT_LOG_LEVEL;
use crate::impl_domain_status_conversions;

/// What to do with a session affected by a cascading command
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DeletionPolicy {
    /// Remove the session outright
    ForceTerminate,
    /// Retire the session from the live set and queue it for the caller to
    /// expire on its own schedule
    AllowExpiry,
    /// Remove only the offending role from the session's active set
    StripRole,
}

impl_domain_status_conversions!(DeletionPolicy {
    ForceTerminate => "force-terminate",
    AllowExpiry => "allow-expiry",
    StripRole => "strip-role",
});

/// The command that invalidated a session's active roles
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DeletionCause {
    DeleteUser,
    DeleteRole,
    DeassignUser,
}

impl_domain_status_conversions!(DeletionCause {
    DeleteUser => "delete-user",
    DeleteRole => "delete-role",
    DeassignUser => "deassign-user",
});

/// Per-cause deletion policies with a mandatory fallback
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeletionPolicies {
    pub fallback: DeletionPolicy,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub on_delete_user: Option<DeletionPolicy>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub on_delete_role: Option<DeletionPolicy>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub on_deassign_user: Option<DeletionPolicy>,
}

impl DeletionPolicies {
    /// Use `policy` for every cause
    pub fn uniform(policy: DeletionPolicy) -> Self {
        Self { fallback: policy, on_delete_user: None, on_delete_role: None, on_deassign_user: None }
    }

    /// The policy in force for `cause`
    pub fn for_cause(&self, cause: DeletionCause) -> DeletionPolicy {
        let specific = match cause {
            DeletionCause::DeleteUser => self.on_delete_user,
            DeletionCause::DeleteRole => self.on_delete_role,
            DeletionCause::DeassignUser => self.on_deassign_user,
        };
        specific.unwrap_or(self.fallback)
    }
}

impl From<DeletionPolicy> for DeletionPolicies {
    fn from(policy: DeletionPolicy) -> Self {
        Self::uniform(policy)
    }
}

/// Logging configuration consumed by the tracing initialiser
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogConfig {
    /// `EnvFilter` directive used when `RUST_LOG` is unset
    #[serde(default = "default_log_level")]
    pub level: String,
    /// Emit JSON lines instead of human-readable text
    #[serde(default)]
    pub json: bool,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self { level: default_log_level(), json: false }
    }
}

fn default_log_level() -> String {
    DEFAULT_LOG_LEVEL.to_string()
}

/// Engine configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EngineConfig {
    pub deletion: DeletionPolicies,
    /// Record every `check_access` decision at debug level
    #[serde(default)]
    pub trace_access: bool,
    #[serde(default)]
    pub log: LogConfig,
}

impl EngineConfig {
    /// Minimal configuration with a single deletion policy
    pub fn new(policy: DeletionPolicy) -> Self {
        Self { deletion: policy.into(), trace_access: false, log: LogConfig::default() }
    }

    /// Enable or disable per-decision access tracing
    pub fn with_trace_access(mut self, enabled: bool) -> Self {
        self.trace_access = enabled;
        self
    }
}
