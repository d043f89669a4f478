//! In-memory relation store
//!
//! Hash maps with a reverse index for every relation, so each cascade and
//! each access check touches only the entries involved.

use std::collections::{BTreeSet, HashMap, HashSet};
use std::hash::Hash;

use corebac_domain::{ObjectId, Operation, Permission, RoleId, SessionId, UserId};

use super::ports::RelationStore;

#[derive(Debug, Clone)]
struct SessionRecord {
    owner: UserId,
    active_roles: HashSet<RoleId>,
}

/// Default [`RelationStore`] backed by `HashMap`s
#[derive(Debug, Clone, Default)]
pub struct InMemoryRelationStore {
    users: HashSet<UserId>,
    roles: HashSet<RoleId>,
    permissions: HashSet<Permission>,
    operations: HashMap<Operation, usize>,
    objects: HashMap<ObjectId, usize>,

    user_roles: HashMap<UserId, HashSet<RoleId>>,
    role_users: HashMap<RoleId, HashSet<UserId>>,

    role_permissions: HashMap<RoleId, HashSet<Permission>>,
    permission_roles: HashMap<Permission, HashSet<RoleId>>,

    sessions: HashMap<SessionId, SessionRecord>,
    user_sessions: HashMap<UserId, HashSet<SessionId>>,
    role_sessions: HashMap<RoleId, HashSet<SessionId>>,
}

fn link<K, V>(index: &mut HashMap<K, HashSet<V>>, key: K, value: V) -> bool
where
    K: Eq + Hash,
    V: Eq + Hash,
{
    index.entry(key).or_default().insert(value)
}

fn unlink<K, V>(index: &mut HashMap<K, HashSet<V>>, key: &K, value: &V) -> bool
where
    K: Eq + Hash,
    V: Eq + Hash,
{
    let Some(values) = index.get_mut(key) else {
        return false;
    };
    let removed = values.remove(value);
    if values.is_empty() {
        index.remove(key);
    }
    removed
}

fn collect<K, V>(index: &HashMap<K, HashSet<V>>, key: &K) -> BTreeSet<V>
where
    K: Eq + Hash,
    V: Clone + Ord,
{
    index.get(key).map(|values| values.iter().cloned().collect()).unwrap_or_default()
}

fn count_up<K: Eq + Hash>(counts: &mut HashMap<K, usize>, key: K) {
    *counts.entry(key).or_insert(0) += 1;
}

fn count_down<K: Eq + Hash>(counts: &mut HashMap<K, usize>, key: &K) {
    if let Some(count) = counts.get_mut(key) {
        *count -= 1;
        if *count == 0 {
            counts.remove(key);
        }
    }
}

impl InMemoryRelationStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl RelationStore for InMemoryRelationStore {
    fn contains_user(&self, user: &UserId) -> bool {
        self.users.contains(user)
    }

    fn insert_user(&mut self, user: UserId) -> bool {
        self.users.insert(user)
    }

    fn remove_user(&mut self, user: &UserId) -> bool {
        self.users.remove(user)
    }

    fn user_ids(&self) -> BTreeSet<UserId> {
        self.users.iter().cloned().collect()
    }

    fn contains_role(&self, role: &RoleId) -> bool {
        self.roles.contains(role)
    }

    fn insert_role(&mut self, role: RoleId) -> bool {
        self.roles.insert(role)
    }

    fn remove_role(&mut self, role: &RoleId) -> bool {
        self.roles.remove(role)
    }

    fn role_ids(&self) -> BTreeSet<RoleId> {
        self.roles.iter().cloned().collect()
    }

    fn contains_permission(&self, permission: &Permission) -> bool {
        self.permissions.contains(permission)
    }

    fn insert_permission(&mut self, permission: Permission) -> bool {
        if self.permissions.contains(&permission) {
            return false;
        }
        count_up(&mut self.operations, permission.operation.clone());
        count_up(&mut self.objects, permission.object.clone());
        self.permissions.insert(permission)
    }

    fn remove_permission(&mut self, permission: &Permission) -> bool {
        if !self.permissions.remove(permission) {
            return false;
        }
        count_down(&mut self.operations, &permission.operation);
        count_down(&mut self.objects, &permission.object);
        true
    }

    fn permission_set(&self) -> BTreeSet<Permission> {
        self.permissions.iter().cloned().collect()
    }

    fn has_operation(&self, operation: &Operation) -> bool {
        self.operations.contains_key(operation)
    }

    fn has_object(&self, object: &ObjectId) -> bool {
        self.objects.contains_key(object)
    }

    fn contains_assignment(&self, user: &UserId, role: &RoleId) -> bool {
        self.user_roles.get(user).is_some_and(|roles| roles.contains(role))
    }

    fn insert_assignment(&mut self, user: UserId, role: RoleId) -> bool {
        link(&mut self.role_users, role.clone(), user.clone());
        link(&mut self.user_roles, user, role)
    }

    fn remove_assignment(&mut self, user: &UserId, role: &RoleId) -> bool {
        unlink(&mut self.role_users, role, user);
        unlink(&mut self.user_roles, user, role)
    }

    fn roles_of_user(&self, user: &UserId) -> BTreeSet<RoleId> {
        collect(&self.user_roles, user)
    }

    fn users_of_role(&self, role: &RoleId) -> BTreeSet<UserId> {
        collect(&self.role_users, role)
    }

    fn contains_grant(&self, role: &RoleId, permission: &Permission) -> bool {
        self.role_permissions.get(role).is_some_and(|permissions| permissions.contains(permission))
    }

    fn insert_grant(&mut self, role: RoleId, permission: Permission) -> bool {
        link(&mut self.permission_roles, permission.clone(), role.clone());
        link(&mut self.role_permissions, role, permission)
    }

    fn remove_grant(&mut self, role: &RoleId, permission: &Permission) -> bool {
        unlink(&mut self.permission_roles, permission, role);
        unlink(&mut self.role_permissions, role, permission)
    }

    fn permissions_of_role(&self, role: &RoleId) -> BTreeSet<Permission> {
        collect(&self.role_permissions, role)
    }

    fn roles_with_permission(&self, permission: &Permission) -> BTreeSet<RoleId> {
        collect(&self.permission_roles, permission)
    }

    fn contains_session(&self, session: &SessionId) -> bool {
        self.sessions.contains_key(session)
    }

    fn session_owner(&self, session: &SessionId) -> Option<UserId> {
        self.sessions.get(session).map(|record| record.owner.clone())
    }

    fn insert_session(
        &mut self,
        session: SessionId,
        owner: UserId,
        active_roles: BTreeSet<RoleId>,
    ) -> bool {
        if self.sessions.contains_key(&session) {
            return false;
        }
        for role in &active_roles {
            link(&mut self.role_sessions, role.clone(), session.clone());
        }
        link(&mut self.user_sessions, owner.clone(), session.clone());
        let record = SessionRecord { owner, active_roles: active_roles.into_iter().collect() };
        self.sessions.insert(session, record);
        true
    }

    fn remove_session(&mut self, session: &SessionId) -> bool {
        let Some(record) = self.sessions.remove(session) else {
            return false;
        };
        for role in &record.active_roles {
            unlink(&mut self.role_sessions, role, session);
        }
        unlink(&mut self.user_sessions, &record.owner, session);
        true
    }

    fn active_roles(&self, session: &SessionId) -> Option<BTreeSet<RoleId>> {
        self.sessions.get(session).map(|record| record.active_roles.iter().cloned().collect())
    }

    fn contains_active_role(&self, session: &SessionId, role: &RoleId) -> bool {
        self.sessions.get(session).is_some_and(|record| record.active_roles.contains(role))
    }

    fn insert_active_role(&mut self, session: &SessionId, role: RoleId) -> bool {
        let Some(record) = self.sessions.get_mut(session) else {
            return false;
        };
        if !record.active_roles.insert(role.clone()) {
            return false;
        }
        link(&mut self.role_sessions, role, session.clone());
        true
    }

    fn remove_active_role(&mut self, session: &SessionId, role: &RoleId) -> bool {
        let Some(record) = self.sessions.get_mut(session) else {
            return false;
        };
        if !record.active_roles.remove(role) {
            return false;
        }
        unlink(&mut self.role_sessions, role, session);
        true
    }

    fn sessions_of_user(&self, user: &UserId) -> BTreeSet<SessionId> {
        collect(&self.user_sessions, user)
    }

    fn sessions_with_active_role(&self, role: &RoleId) -> BTreeSet<SessionId> {
        collect(&self.role_sessions, role)
    }

    fn session_ids(&self) -> BTreeSet<SessionId> {
        self.sessions.keys().cloned().collect()
    }

    fn clear(&mut self) {
        *self = Self::default();
    }
}
