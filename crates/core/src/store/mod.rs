//! Relation storage: the port, the default in-memory adapter and snapshots

pub mod memory;
pub mod ports;
pub mod snapshot;

pub use memory::InMemoryRelationStore;
pub use ports::RelationStore;
pub use snapshot::{PermissionAssignment, StoreSnapshot, UserAssignment};
