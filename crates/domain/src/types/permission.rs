//! Permission: an approval to perform an operation on an object

use std::fmt;

use serde::{Deserialize, Serialize};

use super::ids::{ObjectId, Operation};

/// An (operation, object) pair
///
/// The pair is the identity: two permissions are equal only when both halves
/// are equal. Ordering is by operation, then object.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Permission {
    pub operation: Operation,
    pub object: ObjectId,
}

impl Permission {
    /// Create a permission from its operation and object
    ///
    /// ```
    /// use corebac_domain::Permission;
    ///
    /// let read = Permission::new("read", "file1");
    /// assert_eq!(read.operation.as_str(), "read");
    /// assert_eq!(read.object.as_str(), "file1");
    /// assert_eq!(read.to_string(), "read:file1");
    /// ```
    pub fn new(operation: impl Into<Operation>, object: impl Into<ObjectId>) -> Self {
        Self { operation: operation.into(), object: object.into() }
    }

    /// Whether this permission applies to `object`
    pub fn targets(&self, object: &ObjectId) -> bool {
        &self.object == object
    }
}

impl fmt::Display for Permission {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.operation, self.object)
    }
}

impl<O, B> From<(O, B)> for Permission
where
    O: Into<Operation>,
    B: Into<ObjectId>,
{
    fn from((operation, object): (O, B)) -> Self {
        Self::new(operation, object)
    }
}
