//! Domain constants
//!
//! Centralized names for configuration sources.

// Environment variables read by the config loader
pub const ENV_DELETION_POLICY: &str = "COREBAC_DELETION_POLICY";
pub const ENV_DELETION_POLICY_ON_DELETE_USER: &str = "COREBAC_DELETION_POLICY_ON_DELETE_USER";
pub const ENV_DELETION_POLICY_ON_DELETE_ROLE: &str = "COREBAC_DELETION_POLICY_ON_DELETE_ROLE";
pub const ENV_DELETION_POLICY_ON_DEASSIGN_USER: &str = "COREBAC_DELETION_POLICY_ON_DEASSIGN_USER";
pub const ENV_TRACE_ACCESS: &str = "COREBAC_TRACE_ACCESS";
pub const ENV_LOG_LEVEL: &str = "COREBAC_LOG_LEVEL";
pub const ENV_LOG_JSON: &str = "COREBAC_LOG_JSON";

// Config file names probed in each candidate directory, in order
pub const CONFIG_FILE_NAMES: [&str; 4] =
    ["corebac.toml", "corebac.json", "config.toml", "config.json"];

pub const DEFAULT_LOG_LEVEL: &str = "info";
