//! # Corebac Infrastructure
//!
//! The impure edges around the engine.
//!
//! This crate contains:
//! - Configuration loading from environment variables and JSON/TOML files
//! - Tracing subscriber initialisation
//! - Engine bootstrap from a loaded configuration
//!
//! ## Architecture
//! - Depends on `corebac-core` for the engine and `corebac-domain` for
//!   configuration types
//! - Every failure here is a `corebac_common::CommonError`

pub mod bootstrap;
pub mod config;
pub mod logging;

pub use bootstrap::{bootstrap, engine_from_config};
pub use logging::init_tracing;
