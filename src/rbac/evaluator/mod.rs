// Copyright 2018-2022 Cargill Incorporated
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Makes access decisions against the RBAC data model.

mod error;

pub use error::AccessEvaluationError;

use crate::rbac::store::{Action, RbacStore};

/// A role-based access evaluator.
///
/// The evaluator determines whether a user may perform an action on a
/// resource by examining the roles the user has been assigned: access is
/// granted if at least one assigned role holds a permission for the
/// `(action, resource)` pair.
///
/// Every decision is a stateless read over the current store contents; no
/// decisions are cached and no snapshot is taken across the individual
/// lookups, so a check that races an administrative mutation may observe a
/// partially-updated state.
pub struct AccessEvaluator {
    store: Box<dyn RbacStore>,
}

impl AccessEvaluator {
    /// Constructs a new evaluator with the given store.
    pub fn new(store: Box<dyn RbacStore>) -> Self {
        Self { store }
    }

    /// Determines whether the user with the given username may perform
    /// `action` on the named resource.
    ///
    /// The user's assigned roles are checked in assignment order, stopping at
    /// the first role that grants the permission. A user with no roles is
    /// denied without error.
    ///
    /// # Errors
    ///
    /// Returns [`AccessEvaluationError::UserNotFound`] if no user has the
    /// given username and [`AccessEvaluationError::ResourceNotFound`] if the
    /// named resource does not exist. The resource is resolved once, before
    /// any role is examined, so an unknown resource fails the decision
    /// regardless of which roles the user holds.
    pub fn can_user(
        &self,
        username: &str,
        action: Action,
        resource_name: &str,
    ) -> Result<bool, AccessEvaluationError> {
        let user = self
            .store
            .get_user_by_username(username)?
            .ok_or_else(|| AccessEvaluationError::UserNotFound(username.to_string()))?;

        let resource = self
            .store
            .get_resource_by_name(resource_name)?
            .ok_or_else(|| AccessEvaluationError::ResourceNotFound(resource_name.to_string()))?;

        for role in self.store.get_assigned_roles(user.user_id())? {
            if self
                .store
                .role_has_permission(role.role_id(), action, resource.resource_id())?
            {
                debug!(
                    "Granted {} permission to {} on {} via role {}",
                    action,
                    username,
                    resource_name,
                    role.name()
                );
                return Ok(true);
            }
        }

        Ok(false)
    }

    /// Determines whether the named role holds a permission for `action` on
    /// the named resource.
    ///
    /// # Errors
    ///
    /// Returns [`AccessEvaluationError::ResourceNotFound`] if the named
    /// resource does not exist and [`AccessEvaluationError::RoleNotFound`]
    /// if the named role does not exist.
    pub fn can_role(
        &self,
        role_name: &str,
        action: Action,
        resource_name: &str,
    ) -> Result<bool, AccessEvaluationError> {
        let resource = self
            .store
            .get_resource_by_name(resource_name)?
            .ok_or_else(|| AccessEvaluationError::ResourceNotFound(resource_name.to_string()))?;

        let role = self
            .store
            .get_role_by_name(role_name)?
            .ok_or_else(|| AccessEvaluationError::RoleNotFound(role_name.to_string()))?;

        self.store
            .role_has_permission(role.role_id(), action, resource.resource_id())
            .map_err(AccessEvaluationError::from)
    }
}

impl Clone for AccessEvaluator {
    fn clone(&self) -> Self {
        Self {
            store: self.store.clone_box(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::sync::{Arc, Mutex};

    use crate::rbac::store::{
        MemoryRbacStore, PasswordEncryptionCost, Permission, RbacStoreError, Resource,
        ResourceBuilder, Role, RoleBuilder, User, UserBuilder,
    };

    /// A store wrapper that records the role ID of every permission
    /// existence check, so that short-circuiting is observable.
    #[derive(Clone)]
    struct CountingRbacStore {
        inner: MemoryRbacStore,
        permission_checks: Arc<Mutex<Vec<String>>>,
    }

    impl CountingRbacStore {
        fn new(inner: MemoryRbacStore) -> Self {
            Self {
                inner,
                permission_checks: Arc::new(Mutex::new(Vec::new())),
            }
        }

        fn checked_role_ids(&self) -> Vec<String> {
            self.permission_checks
                .lock()
                .expect("check log lock poisoned")
                .clone()
        }
    }

    impl RbacStore for CountingRbacStore {
        fn add_user(&self, user: User) -> Result<(), RbacStoreError> {
            self.inner.add_user(user)
        }

        fn update_user(&self, user: User) -> Result<(), RbacStoreError> {
            self.inner.update_user(user)
        }

        fn remove_user(&self, user_id: &str) -> Result<(), RbacStoreError> {
            self.inner.remove_user(user_id)
        }

        fn get_user(&self, user_id: &str) -> Result<Option<User>, RbacStoreError> {
            self.inner.get_user(user_id)
        }

        fn get_user_by_username(&self, username: &str) -> Result<Option<User>, RbacStoreError> {
            self.inner.get_user_by_username(username)
        }

        fn list_users(&self) -> Result<Box<dyn ExactSizeIterator<Item = User>>, RbacStoreError> {
            self.inner.list_users()
        }

        fn add_role(&self, role: Role) -> Result<(), RbacStoreError> {
            self.inner.add_role(role)
        }

        fn update_role(&self, role: Role) -> Result<(), RbacStoreError> {
            self.inner.update_role(role)
        }

        fn remove_role(&self, role_id: &str) -> Result<(), RbacStoreError> {
            self.inner.remove_role(role_id)
        }

        fn get_role(&self, role_id: &str) -> Result<Option<Role>, RbacStoreError> {
            self.inner.get_role(role_id)
        }

        fn get_role_by_name(&self, name: &str) -> Result<Option<Role>, RbacStoreError> {
            self.inner.get_role_by_name(name)
        }

        fn list_roles(&self) -> Result<Box<dyn ExactSizeIterator<Item = Role>>, RbacStoreError> {
            self.inner.list_roles()
        }

        fn add_resource(&self, resource: Resource) -> Result<(), RbacStoreError> {
            self.inner.add_resource(resource)
        }

        fn remove_resource(&self, resource_id: &str) -> Result<(), RbacStoreError> {
            self.inner.remove_resource(resource_id)
        }

        fn get_resource_by_name(&self, name: &str) -> Result<Option<Resource>, RbacStoreError> {
            self.inner.get_resource_by_name(name)
        }

        fn list_resources(
            &self,
        ) -> Result<Box<dyn ExactSizeIterator<Item = Resource>>, RbacStoreError> {
            self.inner.list_resources()
        }

        fn add_grant(
            &self,
            role_id: &str,
            action: Action,
            resource_id: &str,
        ) -> Result<(), RbacStoreError> {
            self.inner.add_grant(role_id, action, resource_id)
        }

        fn remove_grant(
            &self,
            role_id: &str,
            action: Action,
            resource_id: &str,
        ) -> Result<(), RbacStoreError> {
            self.inner.remove_grant(role_id, action, resource_id)
        }

        fn list_role_permissions(
            &self,
            role_id: &str,
        ) -> Result<Box<dyn ExactSizeIterator<Item = Permission>>, RbacStoreError> {
            self.inner.list_role_permissions(role_id)
        }

        fn role_has_permission(
            &self,
            role_id: &str,
            action: Action,
            resource_id: &str,
        ) -> Result<bool, RbacStoreError> {
            self.permission_checks
                .lock()
                .expect("check log lock poisoned")
                .push(role_id.to_string());
            self.inner.role_has_permission(role_id, action, resource_id)
        }

        fn assign_role(&self, user_id: &str, role_id: &str) -> Result<(), RbacStoreError> {
            self.inner.assign_role(user_id, role_id)
        }

        fn unassign_role(&self, user_id: &str, role_id: &str) -> Result<(), RbacStoreError> {
            self.inner.unassign_role(user_id, role_id)
        }

        fn get_assigned_roles(
            &self,
            user_id: &str,
        ) -> Result<Box<dyn ExactSizeIterator<Item = Role>>, RbacStoreError> {
            self.inner.get_assigned_roles(user_id)
        }

        fn clone_box(&self) -> Box<dyn RbacStore> {
            Box::new(self.clone())
        }
    }

    fn add_test_user(store: &MemoryRbacStore, username: &str) -> String {
        let user = UserBuilder::new()
            .with_username(username.into())
            .with_email(format!("{}@example.com", username))
            .with_password("hunter2".into())
            .with_password_encryption_cost(PasswordEncryptionCost::Low)
            .build()
            .expect("Unable to build user");
        let user_id = user.user_id().to_string();
        store.add_user(user).expect("Unable to add user");
        user_id
    }

    fn add_test_role(store: &MemoryRbacStore, name: &str) -> String {
        let role = RoleBuilder::new()
            .with_name(name.into())
            .build()
            .expect("Unable to build role");
        let role_id = role.role_id().to_string();
        store.add_role(role).expect("Unable to add role");
        role_id
    }

    fn add_test_resource(store: &MemoryRbacStore, name: &str) -> String {
        let resource = ResourceBuilder::new()
            .with_name(name.into())
            .build()
            .expect("Unable to build resource");
        let resource_id = resource.resource_id().to_string();
        store.add_resource(resource).expect("Unable to add resource");
        resource_id
    }

    /// This test checks that a role holding a permission for the checked
    /// (action, resource) pair is allowed.
    #[test]
    fn can_role_with_matching_permission() {
        let store = MemoryRbacStore::new();
        let admin_id = add_test_role(&store, "admin");
        let resource_id = add_test_resource(&store, "user");
        store
            .add_grant(&admin_id, Action::Read, &resource_id)
            .expect("Unable to add grant");

        let evaluator = AccessEvaluator::new(Box::new(store));

        assert!(evaluator
            .can_role("admin", Action::Read, "user")
            .expect("Should have returned a decision"));
    }

    /// This test checks that a role without a permission for the checked
    /// (action, resource) pair is denied, without error.
    #[test]
    fn can_role_without_matching_permission() {
        let store = MemoryRbacStore::new();
        add_test_role(&store, "user");
        add_test_resource(&store, "role");

        let evaluator = AccessEvaluator::new(Box::new(store));

        assert!(!evaluator
            .can_role("user", Action::Delete, "role")
            .expect("Should have returned a decision"));
    }

    /// This test checks that a permission only satisfies checks for its
    /// exact (action, resource) pair.
    #[test]
    fn permission_match_is_exact() {
        let store = MemoryRbacStore::new();
        let admin_id = add_test_role(&store, "admin");
        let user_resource_id = add_test_resource(&store, "user");
        add_test_resource(&store, "role");
        store
            .add_grant(&admin_id, Action::Create, &user_resource_id)
            .expect("Unable to add grant");

        let evaluator = AccessEvaluator::new(Box::new(store));

        assert!(evaluator
            .can_role("admin", Action::Create, "user")
            .expect("Should have returned a decision"));
        assert!(!evaluator
            .can_role("admin", Action::Read, "user")
            .expect("Should have returned a decision"));
        assert!(!evaluator
            .can_role("admin", Action::Create, "role")
            .expect("Should have returned a decision"));
    }

    /// This test checks that an unknown role name raises RoleNotFound rather
    /// than silently denying.
    #[test]
    fn unknown_role_is_an_error() {
        let store = MemoryRbacStore::new();
        add_test_resource(&store, "user");

        let evaluator = AccessEvaluator::new(Box::new(store));

        let result = evaluator.can_role("nonexistent-role", Action::Read, "user");
        assert!(matches!(
            result,
            Err(AccessEvaluationError::RoleNotFound(_))
        ));
    }

    /// This test checks that an unknown resource name raises
    /// ResourceNotFound rather than silently denying.
    #[test]
    fn unknown_resource_is_an_error() {
        let store = MemoryRbacStore::new();
        let admin_id = add_test_role(&store, "admin");
        let resource_id = add_test_resource(&store, "user");
        store
            .add_grant(&admin_id, Action::Read, &resource_id)
            .expect("Unable to add grant");

        let evaluator = AccessEvaluator::new(Box::new(store));

        let result = evaluator.can_role("admin", Action::Read, "nonexistent-resource");
        assert!(matches!(
            result,
            Err(AccessEvaluationError::ResourceNotFound(_))
        ));
    }

    /// This test checks that a user is allowed when any assigned role grants
    /// the permission, even if earlier roles do not.
    #[test]
    fn can_user_with_granting_role() {
        let store = MemoryRbacStore::new();
        let user_id = add_test_user(&store, "alice");
        let guest_id = add_test_role(&store, "guest");
        let admin_id = add_test_role(&store, "admin");
        let resource_id = add_test_resource(&store, "resource");
        store
            .add_grant(&admin_id, Action::Create, &resource_id)
            .expect("Unable to add grant");
        store
            .assign_role(&user_id, &guest_id)
            .expect("Unable to assign role");
        store
            .assign_role(&user_id, &admin_id)
            .expect("Unable to assign role");

        let counting_store = CountingRbacStore::new(store);
        let evaluator = AccessEvaluator::new(Box::new(counting_store.clone()));

        assert!(evaluator
            .can_user("alice", Action::Create, "resource")
            .expect("Should have returned a decision"));

        // both the non-granting and the granting role were checked, in
        // assignment order
        assert_eq!(
            vec![guest_id, admin_id],
            counting_store.checked_role_ids()
        );
    }

    /// This test checks that no roles are checked past the first granting
    /// one.
    #[test]
    fn can_user_short_circuits_on_first_grant() {
        let store = MemoryRbacStore::new();
        let user_id = add_test_user(&store, "alice");
        let guest_id = add_test_role(&store, "guest");
        let editor_id = add_test_role(&store, "editor");
        let admin_id = add_test_role(&store, "admin");
        let resource_id = add_test_resource(&store, "document");
        store
            .add_grant(&editor_id, Action::Update, &resource_id)
            .expect("Unable to add grant");
        store
            .add_grant(&admin_id, Action::Update, &resource_id)
            .expect("Unable to add grant");
        for role_id in &[guest_id.as_str(), editor_id.as_str(), admin_id.as_str()] {
            store
                .assign_role(&user_id, role_id)
                .expect("Unable to assign role");
        }

        let counting_store = CountingRbacStore::new(store);
        let evaluator = AccessEvaluator::new(Box::new(counting_store.clone()));

        assert!(evaluator
            .can_user("alice", Action::Update, "document")
            .expect("Should have returned a decision"));

        // the scan stops at the second role; the third is never examined
        assert_eq!(
            vec![guest_id, editor_id],
            counting_store.checked_role_ids()
        );
    }

    /// This test checks that a user with no assigned roles is denied without
    /// error.
    #[test]
    fn user_without_roles_is_denied() {
        let store = MemoryRbacStore::new();
        add_test_user(&store, "bob");
        add_test_resource(&store, "user");

        let evaluator = AccessEvaluator::new(Box::new(store));

        assert!(!evaluator
            .can_user("bob", Action::Read, "user")
            .expect("Should have returned a decision"));
    }

    /// This test checks that a user whose roles hold no matching permission
    /// is denied without error.
    #[test]
    fn user_without_matching_permission_is_denied() {
        let store = MemoryRbacStore::new();
        let user_id = add_test_user(&store, "alice");
        let guest_id = add_test_role(&store, "guest");
        let resource_id = add_test_resource(&store, "document");
        store
            .add_grant(&guest_id, Action::Read, &resource_id)
            .expect("Unable to add grant");
        store
            .assign_role(&user_id, &guest_id)
            .expect("Unable to assign role");

        let evaluator = AccessEvaluator::new(Box::new(store));

        assert!(!evaluator
            .can_user("alice", Action::Delete, "document")
            .expect("Should have returned a decision"));
    }

    /// This test checks that an unknown username raises UserNotFound rather
    /// than silently denying.
    #[test]
    fn unknown_user_is_an_error() {
        let store = MemoryRbacStore::new();
        add_test_resource(&store, "user");

        let evaluator = AccessEvaluator::new(Box::new(store));

        let result = evaluator.can_user("nonexistent-user", Action::Read, "user");
        assert!(matches!(
            result,
            Err(AccessEvaluationError::UserNotFound(_))
        ));
    }

    /// This test checks that an unknown resource fails a user check before
    /// any role is examined.
    #[test]
    fn unknown_resource_fails_before_role_checks() {
        let store = MemoryRbacStore::new();
        let user_id = add_test_user(&store, "alice");
        let guest_id = add_test_role(&store, "guest");
        store
            .assign_role(&user_id, &guest_id)
            .expect("Unable to assign role");

        let counting_store = CountingRbacStore::new(store);
        let evaluator = AccessEvaluator::new(Box::new(counting_store.clone()));

        let result = evaluator.can_user("alice", Action::Read, "nonexistent-resource");
        assert!(matches!(
            result,
            Err(AccessEvaluationError::ResourceNotFound(_))
        ));
        assert!(counting_store.checked_role_ids().is_empty());
    }

    /// This test checks that repeated evaluation over unchanged data returns
    /// the same decision.
    #[test]
    fn decisions_are_idempotent() {
        let store = MemoryRbacStore::new();
        let user_id = add_test_user(&store, "alice");
        let admin_id = add_test_role(&store, "admin");
        let resource_id = add_test_resource(&store, "user");
        store
            .add_grant(&admin_id, Action::Read, &resource_id)
            .expect("Unable to add grant");
        store
            .assign_role(&user_id, &admin_id)
            .expect("Unable to assign role");

        let evaluator = AccessEvaluator::new(Box::new(store));

        for _ in 0..3 {
            assert!(evaluator
                .can_user("alice", Action::Read, "user")
                .expect("Should have returned a decision"));
            assert!(!evaluator
                .can_user("alice", Action::Delete, "user")
                .expect("Should have returned a decision"));
            assert!(evaluator
                .can_role("admin", Action::Read, "user")
                .expect("Should have returned a decision"));
        }
    }
}

#[cfg(all(test, feature = "sqlite"))]
mod diesel_tests {
    use super::*;

    use crate::migrations::run_sqlite_migrations;
    use crate::rbac::store::{
        DieselRbacStore, PasswordEncryptionCost, RbacStore, ResourceBuilder, RoleBuilder,
        UserBuilder,
    };

    use diesel::{
        r2d2::{ConnectionManager, Pool},
        sqlite::SqliteConnection,
    };

    /// This test checks a full decision path over the database-backed store:
    /// a user is allowed via a granting role, denied for a non-granted
    /// action, and an unknown resource raises an error.
    #[test]
    fn sqlite_user_decision() {
        let pool = create_connection_pool_and_migrate();
        let store = DieselRbacStore::new(pool);

        let user = UserBuilder::new()
            .with_username("alice".into())
            .with_email("alice@example.com".into())
            .with_password("hunter2".into())
            .with_password_encryption_cost(PasswordEncryptionCost::Low)
            .build()
            .expect("Unable to build user");
        let user_id = user.user_id().to_string();
        store.add_user(user).expect("Unable to add user");

        let role = RoleBuilder::new()
            .with_name("editor".into())
            .build()
            .expect("Unable to build role");
        let role_id = role.role_id().to_string();
        store.add_role(role).expect("Unable to add role");

        let resource = ResourceBuilder::new()
            .with_name("document".into())
            .build()
            .expect("Unable to build resource");
        let resource_id = resource.resource_id().to_string();
        store.add_resource(resource).expect("Unable to add resource");

        store
            .add_grant(&role_id, Action::Update, &resource_id)
            .expect("Unable to add grant");
        store
            .assign_role(&user_id, &role_id)
            .expect("Unable to assign role");

        let evaluator = AccessEvaluator::new(Box::new(store));

        assert!(evaluator
            .can_user("alice", Action::Update, "document")
            .expect("Should have returned a decision"));
        assert!(!evaluator
            .can_user("alice", Action::Delete, "document")
            .expect("Should have returned a decision"));
        assert!(matches!(
            evaluator.can_user("alice", Action::Update, "nonexistent-resource"),
            Err(AccessEvaluationError::ResourceNotFound(_))
        ));
    }

    /// Creates a connection pool for an in-memory SQLite database with only a
    /// single connection available. Each connection is backed by a different
    /// in-memory SQLite database, so limiting the pool to a single connection
    /// insures that the same DB is used for all operations.
    fn create_connection_pool_and_migrate() -> Pool<ConnectionManager<SqliteConnection>> {
        let connection_manager = ConnectionManager::<SqliteConnection>::new(":memory:");
        let pool = Pool::builder()
            .max_size(1)
            .build(connection_manager)
            .expect("Failed to build connection pool");

        run_sqlite_migrations(&*pool.get().expect("Failed to get connection for migrations"))
            .expect("Failed to run migrations");

        pool
    }
}
