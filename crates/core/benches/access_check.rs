use criterion::{black_box, criterion_group, criterion_main, Criterion};
use corebac_core::RbacEngine;
use corebac_domain::{DeletionPolicy, RoleId};

const USERS: usize = 200;
const ROLES: usize = 50;
const OBJECTS: usize = 100;
const ROLES_PER_USER: usize = 5;

/// Engine with `USERS` users, each holding a session with all of its roles
/// active, and every role granted read on a slice of the objects.
fn populated_engine() -> RbacEngine {
    let engine = RbacEngine::new(DeletionPolicy::ForceTerminate);

    for obj in 0..OBJECTS {
        engine.add_permission("read", format!("obj-{obj}")).unwrap();
        engine.add_permission("write", format!("obj-{obj}")).unwrap();
    }
    for role in 0..ROLES {
        engine.add_role(format!("role-{role}")).unwrap();
        for obj in (role..OBJECTS).step_by(ROLES) {
            engine.grant_permission(format!("obj-{obj}"), "read", format!("role-{role}")).unwrap();
        }
    }
    for user in 0..USERS {
        let name = format!("user-{user}");
        engine.add_user(name.as_str()).unwrap();
        let roles: Vec<RoleId> = (0..ROLES_PER_USER)
            .map(|offset| RoleId::new(format!("role-{}", (user + offset * 7) % ROLES)))
            .collect();
        for role in &roles {
            engine.assign_user(name.as_str(), role).unwrap();
        }
        engine.create_session(name.as_str(), format!("session-{user}"), roles).unwrap();
    }

    engine
}

fn access_check_benchmark(c: &mut Criterion) {
    let engine = populated_engine();

    let mut group = c.benchmark_group("rbac_engine");
    group.sample_size(50).measurement_time(std::time::Duration::from_secs(5));

    group.bench_function("check_access_granted", |b| {
        b.iter(|| engine.check_access(black_box("session-0"), "read", black_box("obj-0")).unwrap());
    });

    group.bench_function("check_access_denied", |b| {
        b.iter(|| {
            engine.check_access(black_box("session-0"), "write", black_box("obj-99")).unwrap()
        });
    });

    group.bench_function("user_permissions", |b| {
        b.iter(|| engine.user_permissions(black_box("user-42")).unwrap());
    });

    group.finish();
}

criterion_group!(core_benchmarks, access_check_benchmark);
criterion_main!(core_benchmarks);
