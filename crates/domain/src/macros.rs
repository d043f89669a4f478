//! Macros for domain enums and identifier newtypes
//!
//! - [`impl_domain_status_conversions!`] implements `Display` and `FromStr`
//!   for fieldless enums with a fixed textual form.
//! - [`define_identifier!`] declares an opaque string identifier newtype.
//!
//! # Example
//!
//! ```rust
//! use corebac_domain::impl_domain_status_conversions;
//!
//! #[derive(Debug, Clone, Copy, PartialEq, Eq)]
//! pub enum Mode {
//!     Strict,
//!     Lenient,
//! }
//!
//! impl_domain_status_conversions!(Mode {
//!     Strict => "strict",
//!     Lenient => "lenient",
//! });
//!
//! assert_eq!("STRICT".parse::<Mode>().unwrap(), Mode::Strict);
//! ```

/// Implements Display and FromStr traits for fieldless enums
///
/// This macro generates:
/// - Display trait: writes the canonical lowercase string
/// - FromStr trait: parses case-insensitively; `_` and `-` are
///   interchangeable so `strip_role` and `strip-role` both parse
///
/// Canonical strings passed to the macro must use `-` as the word separator.
#[macro_export]
macro_rules! impl_domain_status_conversions {
    ($enum_name:ident { $($variant:ident => $str:expr),+ $(,)? }) => {
        impl std::fmt::Display for $enum_name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                match self {
                    $(Self::$variant => write!(f, $str),)+
                }
            }
        }

        impl std::str::FromStr for $enum_name {
            type Err = String;

            fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
                match s.trim().to_lowercase().replace('_', "-").as_str() {
                    $($str => Ok(Self::$variant),)+
                    _ => Err(format!("Invalid {}: {}", stringify!($enum_name), s)),
                }
            }
        }
    };
}

/// Declares an opaque identifier newtype over `String`
///
/// The generated type is ordered, hashable, serialises transparently as a
/// plain string and borrows as `str`, so `HashSet<UserId>` can be probed
/// with a `&str`. The engine never interprets identifier contents.
#[macro_export]
macro_rules! define_identifier {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(
            Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, serde::Serialize, serde::Deserialize,
        )]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            /// Wrap a raw identifier
            pub fn new(raw: impl Into<String>) -> Self {
                Self(raw.into())
            }

            /// Borrow the raw identifier
            pub fn as_str(&self) -> &str {
                &self.0
            }

            /// Unwrap into the raw identifier
            pub fn into_inner(self) -> String {
                self.0
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl From<&str> for $name {
            fn from(raw: &str) -> Self {
                Self(raw.to_string())
            }
        }

        impl From<String> for $name {
            fn from(raw: String) -> Self {
                Self(raw)
            }
        }

        impl From<&$name> for $name {
            fn from(id: &$name) -> Self {
                id.clone()
            }
        }

        impl std::borrow::Borrow<str> for $name {
            fn borrow(&self) -> &str {
                &self.0
            }
        }

        impl AsRef<str> for $name {
            fn as_ref(&self) -> &str {
                &self.0
            }
        }
    };
}
