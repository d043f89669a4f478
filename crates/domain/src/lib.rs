//! # Corebac Domain
//!
//! Domain types for the Core RBAC engine.
//!
//! This crate contains:
//! - Opaque identifiers (`UserId`, `RoleId`, `SessionId`, `Operation`,
//!   `ObjectId`) and the `Permission` pair
//! - Session views returned by queries
//! - The precondition error taxonomy (`RbacError`, `Reason`)
//! - Engine configuration (`EngineConfig`, `DeletionPolicy`)
//! - Domain constants
//!
//! ## Architecture
//! - Depends only on `corebac-common` (foundation tier)
//! - Pure domain models and data structures, no locking or I/O

pub mod config;
pub mod constants;
pub mod errors;
pub mod macros;
pub mod types;

// Re-export commonly used items
pub use config::*;
pub use errors::*;
pub use types::*;
