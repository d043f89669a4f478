//! Seeded random organisations
//!
//! The generator keeps its own model of UA, PA and session activations in
//! plain maps so tests can compare engine output against something the
//! engine did not compute.

use std::collections::{BTreeMap, BTreeSet};

use corebac_common::testing::fixtures::{random_subset, seeded_rng};
use corebac_core::{RbacEngine, SessionPolicy};
use corebac_domain::{Permission, RoleId, SessionId, UserId};
use rand::rngs::StdRng;

pub const OPERATIONS: [&str; 4] = ["read", "write", "execute", "approve"];
pub const OBJECTS: [&str; 5] = ["ledger", "payroll", "wiki", "build", "vault"];

pub struct RandomGraph {
    pub engine: RbacEngine,
    pub rng: StdRng,
    pub users: Vec<UserId>,
    pub roles: Vec<RoleId>,
    pub permissions: Vec<Permission>,
    pub assigned: BTreeMap<UserId, BTreeSet<RoleId>>,
    pub granted: BTreeMap<RoleId, BTreeSet<Permission>>,
    pub sessions: BTreeMap<SessionId, (UserId, BTreeSet<RoleId>)>,
}

impl RandomGraph {
    /// Union of modelled grants over `roles`
    pub fn expected_permissions<'a>(
        &self,
        roles: impl IntoIterator<Item = &'a RoleId>,
    ) -> BTreeSet<Permission> {
        roles
            .into_iter()
            .flat_map(|role| self.granted.get(role).cloned().unwrap_or_default())
            .collect()
    }
}

/// Build a random organisation of `users` users and `roles` roles
///
/// Each user gets up to two sessions activating a random subset of its
/// assigned roles.
pub fn random_graph(
    seed: u64,
    users: usize,
    roles: usize,
    policy: impl SessionPolicy + 'static,
) -> RandomGraph {
    let mut rng = seeded_rng(seed);
    let engine = RbacEngine::new(policy);

    let user_ids: Vec<UserId> = (0..users).map(|i| UserId::new(format!("u{i}"))).collect();
    let role_ids: Vec<RoleId> = (0..roles).map(|i| RoleId::new(format!("r{i}"))).collect();
    let permissions: Vec<Permission> = OPERATIONS
        .iter()
        .flat_map(|op| OBJECTS.iter().map(move |obj| Permission::new(*op, *obj)))
        .collect();

    for user in &user_ids {
        engine.add_user(user).unwrap();
    }
    for role in &role_ids {
        engine.add_role(role).unwrap();
    }
    for permission in &permissions {
        engine.add_permission(&permission.operation, &permission.object).unwrap();
    }

    let mut granted = BTreeMap::new();
    for role in &role_ids {
        let picked: BTreeSet<Permission> =
            random_subset(&mut rng, &permissions, 0.25).into_iter().collect();
        for permission in &picked {
            engine.grant_permission(&permission.object, &permission.operation, role).unwrap();
        }
        granted.insert(role.clone(), picked);
    }

    let mut assigned = BTreeMap::new();
    let mut sessions = BTreeMap::new();
    for user in &user_ids {
        let picked: BTreeSet<RoleId> =
            random_subset(&mut rng, &role_ids, 0.35).into_iter().collect();
        for role in &picked {
            engine.assign_user(user, role).unwrap();
        }

        let candidates: Vec<RoleId> = picked.iter().cloned().collect();
        for n in 0..2 {
            let session = SessionId::new(format!("{user}-s{n}"));
            let active: BTreeSet<RoleId> =
                random_subset(&mut rng, &candidates, 0.5).into_iter().collect();
            engine.create_session(user, &session, active.iter()).unwrap();
            sessions.insert(session, (user.clone(), active));
        }
        assigned.insert(user.clone(), picked);
    }

    RandomGraph {
        engine,
        rng,
        users: user_ids,
        roles: role_ids,
        permissions,
        assigned,
        granted,
        sessions,
    }
}
