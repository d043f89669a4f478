//! Engine bootstrap
//!
//! Wires a loaded [`EngineConfig`] into a ready [`RbacEngine`].

use corebac_common::error::{log_classified, CommonResult};
use corebac_core::RbacEngine;
use corebac_domain::EngineConfig;

use crate::config::loader;
use crate::logging::init_tracing;

/// Build an empty in-memory engine from `config`
pub fn engine_from_config(config: &EngineConfig) -> RbacEngine {
    tracing::info!(
        fallback = %config.deletion.fallback,
        trace_access = config.trace_access,
        "starting rbac engine"
    );
    RbacEngine::from_config(config)
}

/// Load configuration, install tracing, and build the engine
///
/// An already-installed tracing subscriber is kept.
///
/// # Errors
/// Returns the loader's error when no valid configuration is found, or a
/// validation error for an unusable log level.
pub fn bootstrap() -> CommonResult<(EngineConfig, RbacEngine)> {
    let config = loader::load().inspect_err(|e| log_classified(e, "config.load"))?;
    init_tracing(&config.log).inspect_err(|e| log_classified(e, "logging.init"))?;
    let engine = engine_from_config(&config);
    Ok((config, engine))
}

#[cfg(test)]
mod tests {
    use corebac_domain::{DeletionCause, DeletionPolicies, DeletionPolicy};

    use super::*;

    /// Validates the engine honours per-cause policies from config.
    #[test]
    fn test_engine_from_config_applies_policies() {
        let config = EngineConfig {
            deletion: DeletionPolicies {
                on_delete_role: Some(DeletionPolicy::StripRole),
                ..DeletionPolicies::uniform(DeletionPolicy::ForceTerminate)
            },
            ..EngineConfig::new(DeletionPolicy::ForceTerminate)
        };
        assert_eq!(config.deletion.for_cause(DeletionCause::DeleteRole), DeletionPolicy::StripRole);

        let engine = engine_from_config(&config);
        engine.add_user("alice").unwrap();
        engine.add_role("editor").unwrap();
        engine.add_role("viewer").unwrap();
        engine.assign_user("alice", "editor").unwrap();
        engine.assign_user("alice", "viewer").unwrap();
        engine.create_session("alice", "s1", ["editor", "viewer"]).unwrap();

        engine.delete_role("editor").unwrap();
        assert_eq!(engine.session_roles("s1").unwrap().len(), 1);

        engine.deassign_user("alice", "viewer").unwrap();
        assert!(engine.session_roles("s1").is_err());
    }
}
