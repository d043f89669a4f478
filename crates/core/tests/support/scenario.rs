//! A fixed two-user organisation
//!
//! | user  | roles            | sessions                          |
//! |-------|------------------|-----------------------------------|
//! | alice | editor, viewer   | s1 {editor, viewer}, s2 {viewer}  |
//! | bob   | viewer           | s3 {viewer}                       |
//!
//! `editor` holds read and write on `file1`; `viewer` holds read on `file1`
//! and `file2`. `admin` exists but nobody is assigned to it.

use corebac_core::{RbacEngine, SessionPolicy};
use corebac_domain::{Permission, RoleId, UserId};

pub const ALICE: &str = "alice";
pub const BOB: &str = "bob";
pub const EDITOR: &str = "editor";
pub const VIEWER: &str = "viewer";
pub const ADMIN: &str = "admin";

/// Build the scenario on a fresh in-memory engine
pub fn office(policy: impl SessionPolicy + 'static) -> RbacEngine {
    let engine = RbacEngine::new(policy);

    for user in [ALICE, BOB] {
        engine.add_user(user).unwrap();
    }
    for role in [EDITOR, VIEWER, ADMIN] {
        engine.add_role(role).unwrap();
    }
    engine.add_permission("read", "file1").unwrap();
    engine.add_permission("write", "file1").unwrap();
    engine.add_permission("read", "file2").unwrap();

    engine.grant_permission("file1", "read", EDITOR).unwrap();
    engine.grant_permission("file1", "write", EDITOR).unwrap();
    engine.grant_permission("file1", "read", VIEWER).unwrap();
    engine.grant_permission("file2", "read", VIEWER).unwrap();

    engine.assign_user(ALICE, EDITOR).unwrap();
    engine.assign_user(ALICE, VIEWER).unwrap();
    engine.assign_user(BOB, VIEWER).unwrap();

    engine.create_session(ALICE, "s1", [EDITOR, VIEWER]).unwrap();
    engine.create_session(ALICE, "s2", [VIEWER]).unwrap();
    engine.create_session(BOB, "s3", [VIEWER]).unwrap();

    engine
}

pub fn user(name: &str) -> UserId {
    UserId::from(name)
}

pub fn role(name: &str) -> RoleId {
    RoleId::from(name)
}

pub fn perm(operation: &str, object: &str) -> Permission {
    Permission::new(operation, object)
}

/// Collect string-like items into an ordered set of identifiers
pub fn set<T, I>(items: I) -> std::collections::BTreeSet<T>
where
    I: IntoIterator,
    I::Item: Into<T>,
    T: Ord,
{
    items.into_iter().map(Into::into).collect()
}
