//! Seeded randomized checks of the engine's standing properties

mod support;

use std::collections::BTreeSet;

use corebac_common::testing::assertions::assert_subset;
use corebac_common::testing::fixtures::random_subset;
use corebac_core::RbacEngine;
use corebac_domain::{DeletionPolicy, Permission, RoleId, SessionId};
use rand::seq::SliceRandom;
use rand::Rng;
use support::graphs::{random_graph, OBJECTS, OPERATIONS};

const SEEDS: std::ops::Range<u64> = 0..24;

fn assert_invariants(engine: &RbacEngine) {
    for session in engine.sessions() {
        let assigned = engine.assigned_roles(session.owner.clone()).unwrap();
        assert_subset(&session.active_roles, &assigned);
    }
    for user in engine.users() {
        let expected: BTreeSet<Permission> = engine
            .assigned_roles(user.clone())
            .unwrap()
            .into_iter()
            .flat_map(|role| engine.role_permissions(role).unwrap())
            .collect();
        assert_eq!(engine.user_permissions(user).unwrap(), expected);
    }
}

/// Validates user_permissions against the generator's own model of UA and PA.
#[test]
fn test_user_permissions_match_model() {
    for seed in SEEDS {
        let graph = random_graph(seed, 12, 8, DeletionPolicy::ForceTerminate);

        for (user, roles) in &graph.assigned {
            let expected = graph.expected_permissions(roles);
            assert_eq!(graph.engine.user_permissions(user).unwrap(), expected, "seed {seed}");
        }
    }
}

/// Validates session permissions and every access decision against the model.
#[test]
fn test_access_decisions_match_model() {
    for seed in SEEDS {
        let graph = random_graph(seed, 6, 6, DeletionPolicy::ForceTerminate);

        for (session, (_, active)) in &graph.sessions {
            let expected = graph.expected_permissions(active);
            assert_eq!(graph.engine.session_permissions(session).unwrap(), expected);

            for operation in OPERATIONS {
                for object in OBJECTS {
                    let granted = graph.engine.check_access(session, operation, object).unwrap();
                    assert_eq!(
                        granted,
                        expected.contains(&Permission::new(operation, object)),
                        "seed {seed}: {session} {operation} {object}"
                    );
                }
            }
        }
    }
}

/// Validates that random command sequences keep the subset invariant under
/// every policy, and that each rejected command changes nothing.
#[test]
fn test_random_command_sequences_preserve_invariants() {
    let policies =
        [DeletionPolicy::ForceTerminate, DeletionPolicy::AllowExpiry, DeletionPolicy::StripRole];

    for policy in policies {
        for seed in SEEDS {
            let mut graph = random_graph(seed, 6, 5, policy);
            let mut session_ids: Vec<SessionId> = graph.sessions.keys().cloned().collect();
            let mut rejected = 0usize;

            for step in 0..150 {
                let rng = &mut graph.rng;
                let user = graph.users.choose(rng).cloned().unwrap();
                let role = graph.roles.choose(rng).cloned().unwrap();
                let permission = graph.permissions.choose(rng).cloned().unwrap();
                let session = session_ids.choose(rng).cloned().unwrap();
                let engine = &graph.engine;
                let before = engine.snapshot();

                let result = match rng.gen_range(0..100) {
                    0..=19 => engine.assign_user(&user, &role),
                    20..=34 => engine.deassign_user(&user, &role),
                    35..=49 => engine.add_active_role(&user, &session, &role),
                    50..=59 => engine.drop_active_role(&user, &session, &role),
                    60..=69 => {
                        engine.grant_permission(&permission.object, &permission.operation, &role)
                    }
                    70..=74 => {
                        engine.revoke_permission(&permission.object, &permission.operation, &role)
                    }
                    75..=86 => {
                        let id = SessionId::new(format!("{user}-x{step}"));
                        let roles: Vec<RoleId> = random_subset(rng, &graph.roles, 0.3);
                        let result = engine.create_session(&user, &id, roles);
                        session_ids.push(id);
                        result
                    }
                    87..=91 => engine.delete_session(&user, &session),
                    92..=95 => engine.delete_role(&role).and_then(|()| engine.add_role(&role)),
                    _ => engine.delete_user(&user).and_then(|()| engine.add_user(&user)),
                };

                if result.is_err() {
                    rejected += 1;
                    assert_eq!(engine.snapshot(), before, "seed {seed} step {step}");
                }
                assert_invariants(engine);
            }

            assert!(rejected > 0, "seed {seed} never exercised a rejection");
            if policy != DeletionPolicy::AllowExpiry {
                assert!(graph.engine.expired_sessions().is_empty());
            }
        }
    }
}
