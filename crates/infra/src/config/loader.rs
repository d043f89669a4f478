//! Configuration loader
//!
//! Loads the engine configuration from environment variables or files.
//!
//! ## Loading Strategy
//! 1. First, attempts to load from environment variables
//! 2. If the required policy variable is missing, falls back to a file
//! 3. Probes multiple paths for config files
//! 4. Supports JSON and TOML formats
//!
//! ## Environment Variables
//! - `COREBAC_DELETION_POLICY`: fallback deletion policy (required)
//! - `COREBAC_DELETION_POLICY_ON_DELETE_USER`: override for `delete_user`
//! - `COREBAC_DELETION_POLICY_ON_DELETE_ROLE`: override for `delete_role`
//! - `COREBAC_DELETION_POLICY_ON_DEASSIGN_USER`: override for `deassign_user`
//! - `COREBAC_TRACE_ACCESS`: log every access decision (true/false)
//! - `COREBAC_LOG_LEVEL`: default tracing filter when `RUST_LOG` is unset
//! - `COREBAC_LOG_JSON`: emit JSON log lines (true/false)
//!
//! ## File Locations
//! In each of these directories, in order, the loader looks for
//! `corebac.toml`, `corebac.json`, `config.toml` and `config.json`:
//! 1. The current working directory
//! 2. Its parent and grandparent
//! 3. The directory holding the executable, and its parent

use std::path::{Path, PathBuf};
use std::str::FromStr;

use corebac_common::error::{CommonError, CommonResult};
use corebac_domain::constants::{
    CONFIG_FILE_NAMES, DEFAULT_LOG_LEVEL, ENV_DELETION_POLICY, ENV_DELETION_POLICY_ON_DEASSIGN_USER,
    ENV_DELETION_POLICY_ON_DELETE_ROLE, ENV_DELETION_POLICY_ON_DELETE_USER, ENV_LOG_JSON,
    ENV_LOG_LEVEL, ENV_TRACE_ACCESS,
};
use corebac_domain::{DeletionPolicies, DeletionPolicy, EngineConfig, LogConfig};

/// Load configuration with automatic fallback strategy
///
/// When `COREBAC_DELETION_POLICY` is set, the environment is the only
/// source and any invalid value is an error. Only when it is unset does
/// the loader fall back to a config file.
///
/// # Errors
/// Returns `CommonError::Config` for an invalid environment value, or
/// `CommonError::Config` / `CommonError::Serialization` if no file yields
/// a valid configuration.
pub fn load() -> CommonResult<EngineConfig> {
    if std::env::var_os(ENV_DELETION_POLICY).is_none() {
        tracing::debug!(var = ENV_DELETION_POLICY, "Policy not in environment, trying file");
        return load_from_file(None);
    }

    let config = load_from_env()?;
    tracing::info!("Configuration loaded from environment variables");
    Ok(config)
}

/// Load configuration from environment variables
///
/// `COREBAC_DELETION_POLICY` must be present; every other variable is
/// optional.
///
/// # Errors
/// Returns `CommonError::Config` naming the variable that is missing or
/// holds an unknown policy.
pub fn load_from_env() -> CommonResult<EngineConfig> {
    let fallback =
        env_var(ENV_DELETION_POLICY).and_then(|raw| parse_policy(ENV_DELETION_POLICY, &raw))?;

    let deletion = DeletionPolicies {
        fallback,
        on_delete_user: env_policy(ENV_DELETION_POLICY_ON_DELETE_USER)?,
        on_delete_role: env_policy(ENV_DELETION_POLICY_ON_DELETE_ROLE)?,
        on_deassign_user: env_policy(ENV_DELETION_POLICY_ON_DEASSIGN_USER)?,
    };

    let log = LogConfig {
        level: std::env::var(ENV_LOG_LEVEL).unwrap_or_else(|_| DEFAULT_LOG_LEVEL.to_string()),
        json: env_bool(ENV_LOG_JSON, false),
    };

    Ok(EngineConfig { deletion, trace_access: env_bool(ENV_TRACE_ACCESS, false), log })
}

/// Load configuration from a file
///
/// If `path` is `None`, probes the standard locations. The format is
/// detected by file extension.
///
/// # Errors
/// Returns `CommonError::Config` if the file is missing or no file is
/// found, and `CommonError::Serialization` if it cannot be decoded.
pub fn load_from_file(path: Option<PathBuf>) -> CommonResult<EngineConfig> {
    let config_path = match path {
        Some(p) => {
            if !p.exists() {
                return Err(CommonError::config(format!(
                    "Config file not found: {}",
                    p.display()
                )));
            }
            p
        }
        None => probe_config_paths().ok_or_else(|| {
            CommonError::config("No config file found in any of the standard locations")
        })?,
    };

    tracing::info!(path = %config_path.display(), "Loading configuration from file");

    let contents = std::fs::read_to_string(&config_path)
        .map_err(|e| CommonError::config(format!("Failed to read config file: {}", e)))?;

    parse_config(&contents, &config_path)
}

/// Parse configuration from string content
///
/// Format is detected by file extension (`.json` or `.toml`); a path with
/// no extension is read as JSON.
fn parse_config(contents: &str, path: &Path) -> CommonResult<EngineConfig> {
    let extension = path.extension().and_then(|e| e.to_str()).unwrap_or("json");

    match extension {
        "toml" => Ok(toml::from_str(contents)?),
        "json" => Ok(serde_json::from_str(contents)?),
        _ => Err(CommonError::config(format!("Unsupported config format: {}", extension))),
    }
}

/// Probe multiple paths for configuration files
///
/// # Returns
/// The first config file found, or `None` if no file exists.
pub fn probe_config_paths() -> Option<PathBuf> {
    let mut dirs = Vec::new();

    if let Ok(cwd) = std::env::current_dir() {
        dirs.extend([cwd.clone(), cwd.join(".."), cwd.join("../..")]);
    }

    if let Ok(exe_path) = std::env::current_exe() {
        if let Some(exe_dir) = exe_path.parent() {
            dirs.extend([exe_dir.to_path_buf(), exe_dir.join("..")]);
        }
    }

    first_existing(&dirs)
}

fn first_existing(dirs: &[PathBuf]) -> Option<PathBuf> {
    dirs.iter()
        .flat_map(|dir| CONFIG_FILE_NAMES.iter().map(move |name| dir.join(name)))
        .find(|path| path.is_file())
}

/// Get required environment variable
fn env_var(key: &str) -> CommonResult<String> {
    std::env::var(key)
        .map_err(|_| CommonError::config_field(key, "missing required environment variable"))
}

fn parse_policy(key: &str, raw: &str) -> CommonResult<DeletionPolicy> {
    DeletionPolicy::from_str(raw).map_err(|e| CommonError::config_field(key, e))
}

/// Optional per-cause override; unset or empty means "use the fallback"
fn env_policy(key: &str) -> CommonResult<Option<DeletionPolicy>> {
    match std::env::var(key) {
        Ok(raw) if !raw.trim().is_empty() => parse_policy(key, &raw).map(Some),
        _ => Ok(None),
    }
}

/// Parse boolean from environment variable
///
/// Accepts: `1`/`0`, `true`/`false`, `yes`/`no`, `on`/`off` (case-insensitive)
fn env_bool(key: &str, default: bool) -> bool {
    std::env::var(key)
        .ok()
        .map(|s| matches!(s.to_ascii_lowercase().as_str(), "1" | "true" | "yes" | "on"))
        .unwrap_or(default)
}

#[cfg(test)]
mod tests {
    use std::io::Write;
    use std::sync::Mutex;

    use corebac_domain::DeletionCause;
    use once_cell::sync::Lazy;
    use tempfile::{NamedTempFile, TempDir};

    use super::*;

    static ENV_LOCK: Lazy<Mutex<()>> = Lazy::new(|| Mutex::new(()));

    const ALL_VARS: [&str; 7] = [
        ENV_DELETION_POLICY,
        ENV_DELETION_POLICY_ON_DELETE_USER,
        ENV_DELETION_POLICY_ON_DELETE_ROLE,
        ENV_DELETION_POLICY_ON_DEASSIGN_USER,
        ENV_TRACE_ACCESS,
        ENV_LOG_LEVEL,
        ENV_LOG_JSON,
    ];

    fn clear_env() {
        for key in ALL_VARS {
            std::env::remove_var(key);
        }
    }

    #[test]
    fn test_env_bool_parsing() {
        let _guard = ENV_LOCK.lock().expect("env mutex poisoned");

        let cases =
            [("1", true), ("TRUE", true), ("yes", true), ("on", true), ("0", false), ("off", false)];
        for (raw, expected) in cases {
            std::env::set_var("COREBAC_TEST_BOOL", raw);
            assert_eq!(env_bool("COREBAC_TEST_BOOL", !expected), expected, "{raw}");
        }

        std::env::remove_var("COREBAC_TEST_BOOL");
        assert!(env_bool("COREBAC_TEST_BOOL", true));
        assert!(!env_bool("COREBAC_TEST_BOOL", false));
    }

    #[test]
    fn test_load_from_env_all_vars_set() {
        let _guard = ENV_LOCK.lock().expect("env mutex poisoned");
        clear_env();

        std::env::set_var(ENV_DELETION_POLICY, "force-terminate");
        std::env::set_var(ENV_DELETION_POLICY_ON_DELETE_ROLE, "STRIP_ROLE");
        std::env::set_var(ENV_DELETION_POLICY_ON_DEASSIGN_USER, "allow-expiry");
        std::env::set_var(ENV_TRACE_ACCESS, "true");
        std::env::set_var(ENV_LOG_LEVEL, "corebac_core=debug");
        std::env::set_var(ENV_LOG_JSON, "1");

        let result = load_from_env();
        clear_env();
        let config = result.expect("config from env");

        assert_eq!(config.deletion.fallback, DeletionPolicy::ForceTerminate);
        assert_eq!(config.deletion.on_delete_user, None);
        assert_eq!(config.deletion.for_cause(DeletionCause::DeleteRole), DeletionPolicy::StripRole);
        assert_eq!(
            config.deletion.for_cause(DeletionCause::DeassignUser),
            DeletionPolicy::AllowExpiry
        );
        assert!(config.trace_access);
        assert_eq!(config.log.level, "corebac_core=debug");
        assert!(config.log.json);
    }

    #[test]
    fn test_load_from_env_defaults_optional_vars() {
        let _guard = ENV_LOCK.lock().expect("env mutex poisoned");
        clear_env();

        std::env::set_var(ENV_DELETION_POLICY, "strip-role");
        std::env::set_var(ENV_DELETION_POLICY_ON_DELETE_USER, "  ");
        let result = load_from_env();
        clear_env();

        assert_eq!(result.expect("config from env"), EngineConfig::new(DeletionPolicy::StripRole));
    }

    #[test]
    fn test_load_from_env_missing_policy() {
        let _guard = ENV_LOCK.lock().expect("env mutex poisoned");
        clear_env();

        let err = load_from_env().unwrap_err();
        assert!(
            matches!(err, CommonError::Config { field: Some(ref f), .. } if f == ENV_DELETION_POLICY),
            "unexpected error: {err}"
        );
    }

    #[test]
    fn test_load_from_env_invalid_policy() {
        let _guard = ENV_LOCK.lock().expect("env mutex poisoned");
        clear_env();

        std::env::set_var(ENV_DELETION_POLICY, "force-terminate");
        std::env::set_var(ENV_DELETION_POLICY_ON_DELETE_ROLE, "ignore");
        let result = load_from_env();
        clear_env();

        let err = result.unwrap_err();
        assert!(err.to_string().contains(ENV_DELETION_POLICY_ON_DELETE_ROLE));
        assert!(err.to_string().contains("ignore"));
    }

    #[test]
    fn test_load_from_file_json() {
        let json_content = r#"{
            "deletion": { "fallback": "allow-expiry", "on_delete_user": "force-terminate" },
            "trace_access": true,
            "log": { "level": "warn", "json": true }
        }"#;

        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file.write_all(json_content.as_bytes()).unwrap();
        let path = temp_file.path().with_extension("json");
        std::fs::copy(temp_file.path(), &path).unwrap();

        let result = load_from_file(Some(path.clone()));
        std::fs::remove_file(path).ok();

        let config = result.expect("config from JSON file");
        assert_eq!(config.deletion.fallback, DeletionPolicy::AllowExpiry);
        assert_eq!(config.deletion.on_delete_user, Some(DeletionPolicy::ForceTerminate));
        assert!(config.trace_access);
        assert_eq!(config.log, LogConfig { level: "warn".into(), json: true });
    }

    #[test]
    fn test_load_from_file_toml() {
        let toml_content = r#"
[deletion]
fallback = "strip-role"
"#;

        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file.write_all(toml_content.as_bytes()).unwrap();
        let path = temp_file.path().with_extension("toml");
        std::fs::copy(temp_file.path(), &path).unwrap();

        let result = load_from_file(Some(path.clone()));
        std::fs::remove_file(path).ok();

        let config = result.expect("config from TOML file");
        assert_eq!(config, EngineConfig::new(DeletionPolicy::StripRole));
    }

    #[test]
    fn test_load_from_file_not_found() {
        let err = load_from_file(Some(PathBuf::from("/nonexistent/corebac.toml"))).unwrap_err();
        assert_eq!(err.error_type_name(), "config");
    }

    #[test]
    fn test_load_from_file_invalid_json() {
        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file.write_all(br#"{ "deletion": "#).unwrap();
        let path = temp_file.path().with_extension("json");
        std::fs::copy(temp_file.path(), &path).unwrap();

        let result = load_from_file(Some(path.clone()));
        std::fs::remove_file(path).ok();

        let err = result.unwrap_err();
        assert!(matches!(err, CommonError::Serialization { format: Some(ref f), .. } if f == "JSON"));
    }

    #[test]
    fn test_first_existing_prefers_earlier_directory_and_name() {
        let near = TempDir::new().unwrap();
        let far = TempDir::new().unwrap();
        std::fs::write(near.path().join("config.json"), "{}").unwrap();
        std::fs::write(far.path().join("corebac.toml"), "").unwrap();
        std::fs::write(near.path().join("corebac.json"), "{}").unwrap();

        let dirs = vec![near.path().to_path_buf(), far.path().to_path_buf()];
        assert_eq!(first_existing(&dirs), Some(near.path().join("corebac.json")));

        let empty = TempDir::new().unwrap();
        assert_eq!(first_existing(&[empty.path().to_path_buf()]), None);
    }

    #[test]
    fn test_parse_config_rejects_policy_typo() {
        let err = parse_config("[deletion]\nfallback = \"strip\"\n", Path::new("corebac.toml"))
            .unwrap_err();
        assert!(err.to_string().starts_with("Serialization error (TOML)"));
    }

    #[test]
    fn test_parse_config_unsupported_format() {
        let result = parse_config("deletion: {}", Path::new("corebac.yaml"));
        assert!(result.is_err(), "Should fail with unsupported format");
    }
}
