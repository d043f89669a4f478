//! Core RBAC entity types
//!
//! All identifiers are opaque: the engine compares and hashes them but never
//! parses them.

pub mod ids;
pub mod permission;
pub mod session;

pub use ids::{ObjectId, Operation, RoleId, SessionId, UserId};
pub use permission::Permission;
pub use session::{ExpiredSession, Session};
