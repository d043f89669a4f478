//! # Corebac Core
//!
//! The Core RBAC engine - no infrastructure dependencies.
//!
//! This crate contains:
//! - The relation store port (`RelationStore`) and its in-memory adapter
//! - Precondition predicates shared by commands and queries
//! - The session deletion policy hook
//! - `RbacEngine`: administrative commands, session commands, review
//!   queries and the access check behind one read/write lock
//!
//! ## Architecture Principles
//! - Only depends on `corebac-common` and `corebac-domain`
//! - Storage is reached through a trait; the engine owns locking and checks
//! - Every operation fails only with `RbacError::InvalidArgument`
//!
//! ## Example
//!
//! ```
//! use corebac_core::RbacEngine;
//! use corebac_domain::DeletionPolicy;
//!
//! let engine = RbacEngine::new(DeletionPolicy::ForceTerminate);
//! engine.add_user("alice")?;
//! engine.add_role("editor")?;
//! engine.add_permission("read", "file1")?;
//! engine.grant_permission("file1", "read", "editor")?;
//! engine.assign_user("alice", "editor")?;
//! engine.create_session("alice", "s1", ["editor"])?;
//!
//! assert!(engine.check_access("s1", "read", "file1")?);
//! # Ok::<(), corebac_domain::RbacError>(())
//! ```

pub mod commands;
pub mod engine;
pub mod policy;
pub mod queries;
pub mod store;
pub mod validation;

pub use engine::RbacEngine;
pub use policy::{PolicyFn, SessionImpact, SessionPolicy};
pub use store::{InMemoryRelationStore, RelationStore, StoreSnapshot};
