//! Common error types and classification shared across Corebac crates
//!
//! The authorization engine itself only ever fails with precondition
//! violations (see `corebac_domain::RbacError`). Everything around it, such
//! as loading configuration or decoding a store snapshot, fails with
//! [`CommonError`].
//!
//! # Error Handling Architecture
//!
//! 1. **`CommonError`**: ambient failure patterns (configuration,
//!    serialization, validation).
//! 2. **`ErrorClassification` trait**: a standard interface for classifying
//!    errors by retryability and severity. Both `CommonError` and the
//!    engine's `RbacError` implement it, so callers can log and alert on
//!    either uniformly.
//! 3. **`ErrorSeverity` enum**: unified severity levels for logging.
//!
//! ## ErrorSeverity Levels
//!
//! | Level | Use Case | Examples |
//! |-------|----------|----------|
//! | **Info** | Expected conditions | Unknown user or role in a lookup |
//! | **Warning** | Rejected but well-formed request | Duplicate assignment, bad log filter |
//! | **Error** | Failure requiring attention | Invalid configuration, undecodable file |
//! | **Critical** | System integrity at risk | Reserved for implementors outside this crate |
//!
//! ## Example
//!
//! ```rust
//! use corebac_common::error::{CommonError, CommonResult, ErrorClassification, ErrorSeverity};
//!
//! fn parse_level(raw: &str) -> CommonResult<u8> {
//!     raw.parse().map_err(|_| CommonError::config_field("log.level", "not a number"))
//! }
//!
//! let err = parse_level("loud").unwrap_err();
//! assert_eq!(err.severity(), ErrorSeverity::Error);
//! assert!(!err.is_retryable());
//! ```

use std::fmt;

/// Standard result type using CommonError
pub type CommonResult<T> = Result<T, CommonError>;

/// Common error variants that appear across multiple crates
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommonError {
    /// Configuration-related errors
    Config { message: String, field: Option<String> },

    /// Serialization or deserialization errors
    Serialization { message: String, format: Option<String> },

    /// Validation errors
    Validation { field: String, message: String, value: Option<String> },
}

impl fmt::Display for CommonError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Config { message, field } => {
                if let Some(field) = field {
                    write!(f, "Configuration error in field '{}': {}", field, message)
                } else {
                    write!(f, "Configuration error: {}", message)
                }
            }
            Self::Serialization { message, format } => {
                if let Some(format) = format {
                    write!(f, "Serialization error ({}): {}", format, message)
                } else {
                    write!(f, "Serialization error: {}", message)
                }
            }
            Self::Validation { field, message, value } => {
                if let Some(value) = value {
                    write!(
                        f,
                        "Validation error for field '{}' (value: '{}'): {}",
                        field, value, message
                    )
                } else {
                    write!(f, "Validation error for field '{}': {}", field, message)
                }
            }
        }
    }
}

impl std::error::Error for CommonError {}

impl ErrorClassification for CommonError {
    fn is_retryable(&self) -> bool {
        // Bad input stays bad until someone edits it.
        false
    }

    fn severity(&self) -> ErrorSeverity {
        match self {
            Self::Config { .. } => ErrorSeverity::Error,
            Self::Serialization { .. } => ErrorSeverity::Error,
            Self::Validation { .. } => ErrorSeverity::Warning,
        }
    }
}

impl CommonError {
    /// Create a simple configuration error
    pub fn config<S: Into<String>>(message: S) -> Self {
        Self::Config { message: message.into(), field: None }
    }

    /// Create a configuration error for a specific field
    pub fn config_field<F: Into<String>, S: Into<String>>(field: F, message: S) -> Self {
        Self::Config { message: message.into(), field: Some(field.into()) }
    }

    /// Create a serialization error with format information
    pub fn serialization_format<F: Into<String>, S: Into<String>>(format: F, message: S) -> Self {
        Self::Serialization { message: message.into(), format: Some(format.into()) }
    }

    /// Create a validation error with the invalid value
    pub fn validation_with_value<F: Into<String>, M: Into<String>, V: Into<String>>(
        field: F,
        message: M,
        value: V,
    ) -> Self {
        Self::Validation { field: field.into(), message: message.into(), value: Some(value.into()) }
    }

    /// Stable label for the variant, suitable for log fields
    pub fn error_type_name(&self) -> &'static str {
        match self {
            Self::Config { .. } => "config",
            Self::Serialization { .. } => "serialization",
            Self::Validation { .. } => "validation",
        }
    }
}

/// Error classification trait for consistent error handling across crates
///
/// # Example
///
/// ```rust
/// use corebac_common::error::{ErrorClassification, ErrorSeverity};
///
/// #[derive(Debug)]
/// struct Rejected;
///
/// impl ErrorClassification for Rejected {
///     fn is_retryable(&self) -> bool {
///         false
///     }
///
///     fn severity(&self) -> ErrorSeverity {
///         ErrorSeverity::Warning
///     }
/// }
///
/// assert!(!Rejected.is_critical());
/// ```
pub trait ErrorClassification {
    /// Check if this error is retryable
    ///
    /// Retryable errors are transient: the same call may succeed later
    /// without the caller changing its input.
    fn is_retryable(&self) -> bool;

    /// Get the error severity level
    ///
    /// Used for logging and alerting decisions.
    fn severity(&self) -> ErrorSeverity;

    /// Check if this is a critical error requiring immediate attention
    fn is_critical(&self) -> bool {
        self.severity() == ErrorSeverity::Critical
    }
}

/// Error severity levels for monitoring and alerting
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    /// Informational, typically for debugging
    Info,
    /// Warning, should be monitored but not critical
    Warning,
    /// Error, requires attention and action
    Error,
    /// Critical, immediate action required
    Critical,
}

impl fmt::Display for ErrorSeverity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Info => write!(f, "INFO"),
            Self::Warning => write!(f, "WARN"),
            Self::Error => write!(f, "ERROR"),
            Self::Critical => write!(f, "CRITICAL"),
        }
    }
}

/// Emit a classified error at the `tracing` level matching its severity.
///
/// `context` names the operation that failed and is attached as a field.
#[cfg(feature = "observability")]
pub fn log_classified<E>(err: &E, context: &str)
where
    E: ErrorClassification + fmt::Display,
{
    let severity = err.severity();
    match severity {
        ErrorSeverity::Info => tracing::debug!(context, %severity, error = %err, "operation failed"),
        ErrorSeverity::Warning => {
            tracing::warn!(context, %severity, error = %err, "operation failed")
        }
        ErrorSeverity::Error | ErrorSeverity::Critical => {
            tracing::error!(context, %severity, error = %err, "operation failed")
        }
    }
}

// Standard conversions from common error types
impl From<serde_json::Error> for CommonError {
    fn from(err: serde_json::Error) -> Self {
        Self::serialization_format("JSON", err.to_string())
    }
}

impl From<toml::de::Error> for CommonError {
    fn from(err: toml::de::Error) -> Self {
        Self::serialization_format("TOML", err.to_string())
    }
}

#[cfg(test)]
mod tests {
    //! Unit tests for error.
    use super::*;

    /// Validates the display format of field-scoped configuration errors.
    #[test]
    fn test_config_field_display() {
        let err = CommonError::config_field("deletion.fallback", "missing");
        assert_eq!(err.to_string(), "Configuration error in field 'deletion.fallback': missing");
    }

    /// Validates severity mapping; nothing ambient is retryable or critical.
    #[test]
    fn test_severity_mapping() {
        let cases = [
            CommonError::config("bad"),
            CommonError::serialization_format("JSON", "bad"),
            CommonError::validation_with_value("log.level", "bad", "loud"),
        ];
        for err in &cases {
            assert!(!err.is_retryable(), "{err}");
            assert!(!err.is_critical(), "{err}");
        }
        assert_eq!(cases[0].severity(), ErrorSeverity::Error);
        assert_eq!(cases[1].severity(), ErrorSeverity::Error);
        assert_eq!(cases[2].severity(), ErrorSeverity::Warning);
    }

    /// Validates severity ordering used by alert thresholds.
    #[test]
    fn test_severity_ordering() {
        assert!(ErrorSeverity::Info < ErrorSeverity::Warning);
        assert!(ErrorSeverity::Warning < ErrorSeverity::Error);
        assert!(ErrorSeverity::Error < ErrorSeverity::Critical);
        assert_eq!(ErrorSeverity::Warning.to_string(), "WARN");
    }

    /// Validates conversion from `serde_json` and `toml` decode failures.
    #[test]
    fn test_conversions_from_decoders() {
        let json_err = serde_json::from_str::<u32>("nope").unwrap_err();
        let err: CommonError = json_err.into();
        assert!(matches!(err, CommonError::Serialization { format: Some(ref f), .. } if f == "JSON"));

        let toml_err = toml::from_str::<toml::Table>("= broken").unwrap_err();
        let err: CommonError = toml_err.into();
        assert_eq!(err.error_type_name(), "serialization");
        assert!(err.to_string().starts_with("Serialization error (TOML)"));
    }
}
