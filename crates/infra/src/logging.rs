//! Tracing subscriber setup
//!
//! The engine only emits `tracing` events; this installs the global
//! subscriber that formats them. `RUST_LOG` wins over the configured level.

use corebac_common::error::{CommonError, CommonResult};
use corebac_domain::LogConfig;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, EnvFilter};

/// Install the global `fmt` subscriber described by `config`
///
/// Returns `Ok(false)` when a global subscriber was already installed; the
/// existing one is kept.
///
/// # Errors
/// Returns `CommonError::Validation` if `RUST_LOG` is unset and `config.level` is
/// not a valid filter directive.
pub fn init_tracing(config: &LogConfig) -> CommonResult<bool> {
    let filter = match EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) => parse_filter(&config.level)?,
    };
    let registry = tracing_subscriber::registry().with(filter);

    let installed = if config.json {
        registry.with(fmt::layer().json()).try_init()
    } else {
        registry.with(fmt::layer()).try_init()
    };

    match installed {
        Ok(()) => {
            tracing::debug!(level = %config.level, json = config.json, "tracing initialised");
            Ok(true)
        }
        Err(err) => {
            tracing::debug!(error = %err, "tracing subscriber already installed");
            Ok(false)
        }
    }
}

fn parse_filter(directives: &str) -> CommonResult<EnvFilter> {
    EnvFilter::try_new(directives).map_err(|e| {
        CommonError::validation_with_value("log.level", e.to_string(), directives)
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_filter_accepts_directives() {
        assert!(parse_filter("info").is_ok());
        assert!(parse_filter("warn,corebac_core=debug").is_ok());
    }

    #[test]
    fn test_parse_filter_rejects_garbage() {
        let err = parse_filter("corebac_core=loud").unwrap_err();
        assert_eq!(err.error_type_name(), "validation");
        assert!(err.to_string().contains("log.level"));
    }

    #[test]
    fn test_second_initialisation_is_not_fatal() {
        let config = LogConfig::default();
        let _ = init_tracing(&config).unwrap();
        assert!(!init_tracing(&config).unwrap());
    }
}
