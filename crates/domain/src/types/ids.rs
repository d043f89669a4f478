//! Opaque identifier newtypes

use crate::define_identifier;

define_identifier!(
    /// A human principal
    UserId
);

define_identifier!(
    /// A named job function
    RoleId
);

define_identifier!(
    /// A runtime binding of one user to a subset of that user's roles
    SessionId
);

define_identifier!(
    /// The operation half of a permission, e.g. `read`
    Operation
);

define_identifier!(
    /// The object half of a permission, e.g. `file1`
    ObjectId
);
