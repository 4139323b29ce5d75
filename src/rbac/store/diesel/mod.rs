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

//! A database-backed implementation of the [RbacStore], powered by [diesel].

mod models;
mod operations;
mod schema;

use diesel::r2d2::{ConnectionManager, Pool};

use crate::error::{ConstraintViolationError, ConstraintViolationType, InternalError};

use super::{Action, Permission, RbacStore, RbacStoreError, Resource, Role, User};

use operations::add_grant::RbacStoreAddGrant as _;
use operations::add_resource::RbacStoreAddResource as _;
use operations::add_role::RbacStoreAddRole as _;
use operations::add_user::RbacStoreAddUser as _;
use operations::assign_role::RbacStoreAssignRole as _;
use operations::get_assigned_roles::RbacStoreGetAssignedRoles as _;
use operations::get_resource::RbacStoreGetResource as _;
use operations::get_role::RbacStoreGetRole as _;
use operations::get_user::RbacStoreGetUser as _;
use operations::list_resources::RbacStoreListResources as _;
use operations::list_role_permissions::RbacStoreListRolePermissions as _;
use operations::list_roles::RbacStoreListRoles as _;
use operations::list_users::RbacStoreListUsers as _;
use operations::remove_grant::RbacStoreRemoveGrant as _;
use operations::remove_resource::RbacStoreRemoveResource as _;
use operations::remove_role::RbacStoreRemoveRole as _;
use operations::remove_user::RbacStoreRemoveUser as _;
use operations::role_has_permission::RbacStoreRoleHasPermission as _;
use operations::unassign_role::RbacStoreUnassignRole as _;
use operations::update_role::RbacStoreUpdateRole as _;
use operations::update_user::RbacStoreUpdateUser as _;
use operations::RbacStoreOperations;

/// Manages the RBAC data model in a database.
pub struct DieselRbacStore<C: diesel::Connection + 'static> {
    connection_pool: Pool<ConnectionManager<C>>,
}

impl<C: diesel::Connection> DieselRbacStore<C> {
    /// Creates a new DieselRbacStore
    ///
    /// # Arguments
    ///
    ///  * `connection_pool`: connection pool to the database
    pub fn new(connection_pool: Pool<ConnectionManager<C>>) -> Self {
        DieselRbacStore { connection_pool }
    }
}

#[cfg(feature = "sqlite")]
impl RbacStore for DieselRbacStore<diesel::sqlite::SqliteConnection> {
    fn add_user(&self, user: User) -> Result<(), RbacStoreError> {
        RbacStoreOperations::new(&*self.connection_pool.get()?).add_user(user)
    }

    fn update_user(&self, user: User) -> Result<(), RbacStoreError> {
        RbacStoreOperations::new(&*self.connection_pool.get()?).update_user(user)
    }

    fn remove_user(&self, user_id: &str) -> Result<(), RbacStoreError> {
        RbacStoreOperations::new(&*self.connection_pool.get()?).remove_user(user_id)
    }

    fn get_user(&self, user_id: &str) -> Result<Option<User>, RbacStoreError> {
        RbacStoreOperations::new(&*self.connection_pool.get()?).get_user(user_id)
    }

    fn get_user_by_username(&self, username: &str) -> Result<Option<User>, RbacStoreError> {
        RbacStoreOperations::new(&*self.connection_pool.get()?).get_user_by_username(username)
    }

    fn list_users(&self) -> Result<Box<dyn ExactSizeIterator<Item = User>>, RbacStoreError> {
        RbacStoreOperations::new(&*self.connection_pool.get()?).list_users()
    }

    fn add_role(&self, role: Role) -> Result<(), RbacStoreError> {
        RbacStoreOperations::new(&*self.connection_pool.get()?).add_role(role)
    }

    fn update_role(&self, role: Role) -> Result<(), RbacStoreError> {
        RbacStoreOperations::new(&*self.connection_pool.get()?).update_role(role)
    }

    fn remove_role(&self, role_id: &str) -> Result<(), RbacStoreError> {
        RbacStoreOperations::new(&*self.connection_pool.get()?).remove_role(role_id)
    }

    fn get_role(&self, role_id: &str) -> Result<Option<Role>, RbacStoreError> {
        RbacStoreOperations::new(&*self.connection_pool.get()?).get_role(role_id)
    }

    fn get_role_by_name(&self, name: &str) -> Result<Option<Role>, RbacStoreError> {
        RbacStoreOperations::new(&*self.connection_pool.get()?).get_role_by_name(name)
    }

    fn list_roles(&self) -> Result<Box<dyn ExactSizeIterator<Item = Role>>, RbacStoreError> {
        RbacStoreOperations::new(&*self.connection_pool.get()?).list_roles()
    }

    fn add_resource(&self, resource: Resource) -> Result<(), RbacStoreError> {
        RbacStoreOperations::new(&*self.connection_pool.get()?).add_resource(resource)
    }

    fn remove_resource(&self, resource_id: &str) -> Result<(), RbacStoreError> {
        RbacStoreOperations::new(&*self.connection_pool.get()?).remove_resource(resource_id)
    }

    fn get_resource_by_name(&self, name: &str) -> Result<Option<Resource>, RbacStoreError> {
        RbacStoreOperations::new(&*self.connection_pool.get()?).get_resource_by_name(name)
    }

    fn list_resources(
        &self,
    ) -> Result<Box<dyn ExactSizeIterator<Item = Resource>>, RbacStoreError> {
        RbacStoreOperations::new(&*self.connection_pool.get()?).list_resources()
    }

    fn add_grant(
        &self,
        role_id: &str,
        action: Action,
        resource_id: &str,
    ) -> Result<(), RbacStoreError> {
        RbacStoreOperations::new(&*self.connection_pool.get()?)
            .add_grant(role_id, action, resource_id)
    }

    fn remove_grant(
        &self,
        role_id: &str,
        action: Action,
        resource_id: &str,
    ) -> Result<(), RbacStoreError> {
        RbacStoreOperations::new(&*self.connection_pool.get()?)
            .remove_grant(role_id, action, resource_id)
    }

    fn list_role_permissions(
        &self,
        role_id: &str,
    ) -> Result<Box<dyn ExactSizeIterator<Item = Permission>>, RbacStoreError> {
        RbacStoreOperations::new(&*self.connection_pool.get()?).list_role_permissions(role_id)
    }

    fn role_has_permission(
        &self,
        role_id: &str,
        action: Action,
        resource_id: &str,
    ) -> Result<bool, RbacStoreError> {
        RbacStoreOperations::new(&*self.connection_pool.get()?)
            .role_has_permission(role_id, action, resource_id)
    }

    fn assign_role(&self, user_id: &str, role_id: &str) -> Result<(), RbacStoreError> {
        RbacStoreOperations::new(&*self.connection_pool.get()?).assign_role(user_id, role_id)
    }

    fn unassign_role(&self, user_id: &str, role_id: &str) -> Result<(), RbacStoreError> {
        RbacStoreOperations::new(&*self.connection_pool.get()?).unassign_role(user_id, role_id)
    }

    fn get_assigned_roles(
        &self,
        user_id: &str,
    ) -> Result<Box<dyn ExactSizeIterator<Item = Role>>, RbacStoreError> {
        RbacStoreOperations::new(&*self.connection_pool.get()?).get_assigned_roles(user_id)
    }

    fn clone_box(&self) -> Box<dyn RbacStore> {
        Box::new(DieselRbacStore {
            connection_pool: self.connection_pool.clone(),
        })
    }
}

#[cfg(feature = "postgres")]
impl RbacStore for DieselRbacStore<diesel::pg::PgConnection> {
    fn add_user(&self, user: User) -> Result<(), RbacStoreError> {
        RbacStoreOperations::new(&*self.connection_pool.get()?).add_user(user)
    }

    fn update_user(&self, user: User) -> Result<(), RbacStoreError> {
        RbacStoreOperations::new(&*self.connection_pool.get()?).update_user(user)
    }

    fn remove_user(&self, user_id: &str) -> Result<(), RbacStoreError> {
        RbacStoreOperations::new(&*self.connection_pool.get()?).remove_user(user_id)
    }

    fn get_user(&self, user_id: &str) -> Result<Option<User>, RbacStoreError> {
        RbacStoreOperations::new(&*self.connection_pool.get()?).get_user(user_id)
    }

    fn get_user_by_username(&self, username: &str) -> Result<Option<User>, RbacStoreError> {
        RbacStoreOperations::new(&*self.connection_pool.get()?).get_user_by_username(username)
    }

    fn list_users(&self) -> Result<Box<dyn ExactSizeIterator<Item = User>>, RbacStoreError> {
        RbacStoreOperations::new(&*self.connection_pool.get()?).list_users()
    }

    fn add_role(&self, role: Role) -> Result<(), RbacStoreError> {
        RbacStoreOperations::new(&*self.connection_pool.get()?).add_role(role)
    }

    fn update_role(&self, role: Role) -> Result<(), RbacStoreError> {
        RbacStoreOperations::new(&*self.connection_pool.get()?).update_role(role)
    }

    fn remove_role(&self, role_id: &str) -> Result<(), RbacStoreError> {
        RbacStoreOperations::new(&*self.connection_pool.get()?).remove_role(role_id)
    }

    fn get_role(&self, role_id: &str) -> Result<Option<Role>, RbacStoreError> {
        RbacStoreOperations::new(&*self.connection_pool.get()?).get_role(role_id)
    }

    fn get_role_by_name(&self, name: &str) -> Result<Option<Role>, RbacStoreError> {
        RbacStoreOperations::new(&*self.connection_pool.get()?).get_role_by_name(name)
    }

    fn list_roles(&self) -> Result<Box<dyn ExactSizeIterator<Item = Role>>, RbacStoreError> {
        RbacStoreOperations::new(&*self.connection_pool.get()?).list_roles()
    }

    fn add_resource(&self, resource: Resource) -> Result<(), RbacStoreError> {
        RbacStoreOperations::new(&*self.connection_pool.get()?).add_resource(resource)
    }

    fn remove_resource(&self, resource_id: &str) -> Result<(), RbacStoreError> {
        RbacStoreOperations::new(&*self.connection_pool.get()?).remove_resource(resource_id)
    }

    fn get_resource_by_name(&self, name: &str) -> Result<Option<Resource>, RbacStoreError> {
        RbacStoreOperations::new(&*self.connection_pool.get()?).get_resource_by_name(name)
    }

    fn list_resources(
        &self,
    ) -> Result<Box<dyn ExactSizeIterator<Item = Resource>>, RbacStoreError> {
        RbacStoreOperations::new(&*self.connection_pool.get()?).list_resources()
    }

    fn add_grant(
        &self,
        role_id: &str,
        action: Action,
        resource_id: &str,
    ) -> Result<(), RbacStoreError> {
        RbacStoreOperations::new(&*self.connection_pool.get()?)
            .add_grant(role_id, action, resource_id)
    }

    fn remove_grant(
        &self,
        role_id: &str,
        action: Action,
        resource_id: &str,
    ) -> Result<(), RbacStoreError> {
        RbacStoreOperations::new(&*self.connection_pool.get()?)
            .remove_grant(role_id, action, resource_id)
    }

    fn list_role_permissions(
        &self,
        role_id: &str,
    ) -> Result<Box<dyn ExactSizeIterator<Item = Permission>>, RbacStoreError> {
        RbacStoreOperations::new(&*self.connection_pool.get()?).list_role_permissions(role_id)
    }

    fn role_has_permission(
        &self,
        role_id: &str,
        action: Action,
        resource_id: &str,
    ) -> Result<bool, RbacStoreError> {
        RbacStoreOperations::new(&*self.connection_pool.get()?)
            .role_has_permission(role_id, action, resource_id)
    }

    fn assign_role(&self, user_id: &str, role_id: &str) -> Result<(), RbacStoreError> {
        RbacStoreOperations::new(&*self.connection_pool.get()?).assign_role(user_id, role_id)
    }

    fn unassign_role(&self, user_id: &str, role_id: &str) -> Result<(), RbacStoreError> {
        RbacStoreOperations::new(&*self.connection_pool.get()?).unassign_role(user_id, role_id)
    }

    fn get_assigned_roles(
        &self,
        user_id: &str,
    ) -> Result<Box<dyn ExactSizeIterator<Item = Role>>, RbacStoreError> {
        RbacStoreOperations::new(&*self.connection_pool.get()?).get_assigned_roles(user_id)
    }

    fn clone_box(&self) -> Box<dyn RbacStore> {
        Box::new(DieselRbacStore {
            connection_pool: self.connection_pool.clone(),
        })
    }
}

impl From<diesel::result::Error> for RbacStoreError {
    fn from(err: diesel::result::Error) -> Self {
        match err {
            diesel::result::Error::DatabaseError(ref kind, _) => match kind {
                diesel::result::DatabaseErrorKind::UniqueViolation => {
                    RbacStoreError::ConstraintViolation(
                        ConstraintViolationError::from_source_with_violation_type(
                            ConstraintViolationType::Unique,
                            Box::new(err),
                        ),
                    )
                }
                diesel::result::DatabaseErrorKind::ForeignKeyViolation => {
                    RbacStoreError::ConstraintViolation(
                        ConstraintViolationError::from_source_with_violation_type(
                            ConstraintViolationType::ForeignKey,
                            Box::new(err),
                        ),
                    )
                }
                _ => RbacStoreError::InternalError(InternalError::from_source(Box::new(err))),
            },
            _ => RbacStoreError::InternalError(InternalError::from_source(Box::new(err))),
        }
    }
}

impl From<diesel::r2d2::PoolError> for RbacStoreError {
    fn from(err: diesel::r2d2::PoolError) -> Self {
        RbacStoreError::InternalError(InternalError::from_source(Box::new(err)))
    }
}

#[cfg(all(test, feature = "sqlite"))]
mod tests {
    use super::*;

    use crate::migrations::run_sqlite_migrations;
    use crate::rbac::store::{
        PasswordEncryptionCost, ResourceBuilder, RoleBuilder, UserBuilder,
    };

    use diesel::{
        r2d2::{ConnectionManager, Pool},
        sqlite::SqliteConnection,
    };

    /// This test verifies the following:
    /// 1. Adds a user via the store API
    /// 2. Verifies it has been added by getting the user by ID and by
    ///    username via the store API
    #[test]
    fn sqlite_add_and_get_user() {
        let pool = create_connection_pool_and_migrate();

        let rbac_store = DieselRbacStore::new(pool);

        let stored_user = rbac_store
            .get_user_by_username("alice")
            .expect("Unable to lookup user by username");
        assert!(stored_user.is_none());

        let user = UserBuilder::new()
            .with_username("alice".into())
            .with_email("alice@example.com".into())
            .with_password("correct horse battery staple".into())
            .with_password_encryption_cost(PasswordEncryptionCost::Low)
            .with_display_name("Alice".into())
            .build()
            .expect("Unable to build user");
        let user_id = user.user_id().to_string();

        rbac_store.add_user(user).expect("Unable to add user");

        let stored_user = rbac_store
            .get_user(&user_id)
            .expect("Unable to lookup user by id")
            .expect("Did not find the added user");

        assert_eq!("alice", stored_user.username());
        assert_eq!("alice@example.com", stored_user.email());
        assert_eq!(Some("Alice"), stored_user.display_name());
        assert!(stored_user.active());
        assert!(stored_user
            .verify_password("correct horse battery staple")
            .expect("Unable to verify password"));

        let by_username = rbac_store
            .get_user_by_username("alice")
            .expect("Unable to lookup user by username")
            .expect("Did not find the added user");
        assert_eq!(user_id, by_username.user_id());
    }

    /// This test verifies the following:
    /// 1. Adds a user and verifies that it has been inserted
    /// 2. Updates the user and verifies that it has been changed, via the
    ///    store API
    #[test]
    fn sqlite_update_user() {
        let pool = create_connection_pool_and_migrate();

        let rbac_store = DieselRbacStore::new(pool);

        let user = UserBuilder::new()
            .with_username("alice".into())
            .with_email("alice@example.com".into())
            .with_password("hunter2".into())
            .with_password_encryption_cost(PasswordEncryptionCost::Low)
            .build()
            .expect("Unable to build user");
        let user_id = user.user_id().to_string();

        rbac_store.add_user(user).expect("Unable to add user");

        let updated_user = rbac_store
            .get_user(&user_id)
            .expect("Unable to lookup user by id")
            .expect("Did not find the added user")
            .into_update_builder()
            .with_email("alice@example.org".into())
            .with_active(false)
            .build()
            .expect("Unable to build updated user");

        rbac_store
            .update_user(updated_user)
            .expect("Unable to update user");

        let stored_user = rbac_store
            .get_user(&user_id)
            .expect("Unable to lookup user by id")
            .expect("Did not find the updated user");

        assert_eq!("alice@example.org", stored_user.email());
        assert!(!stored_user.active());
        // the password hash is untouched by updates without a new password
        assert!(stored_user
            .verify_password("hunter2")
            .expect("Unable to verify password"));
    }

    /// This test verifies the following:
    /// 1. An active user cannot be removed
    /// 2. After deactivation, the removal succeeds and the user's role
    ///    assignments are gone
    #[test]
    fn sqlite_remove_user_requires_inactive() {
        let pool = create_connection_pool_and_migrate();

        let rbac_store = DieselRbacStore::new(pool);

        let user = UserBuilder::new()
            .with_username("alice".into())
            .with_email("alice@example.com".into())
            .with_password("hunter2".into())
            .with_password_encryption_cost(PasswordEncryptionCost::Low)
            .build()
            .expect("Unable to build user");
        let user_id = user.user_id().to_string();
        rbac_store.add_user(user).expect("Unable to add user");

        let role = RoleBuilder::new()
            .with_name("editor".into())
            .build()
            .expect("Unable to build role");
        let role_id = role.role_id().to_string();
        rbac_store.add_role(role).expect("Unable to add role");
        rbac_store
            .assign_role(&user_id, &role_id)
            .expect("Unable to assign role");

        let result = rbac_store.remove_user(&user_id);
        assert!(matches!(result, Err(RbacStoreError::InvalidState(_))));

        let deactivated = rbac_store
            .get_user(&user_id)
            .expect("Unable to lookup user by id")
            .expect("Did not find the added user")
            .into_update_builder()
            .with_active(false)
            .build()
            .expect("Unable to build updated user");
        rbac_store
            .update_user(deactivated)
            .expect("Unable to update user");

        rbac_store
            .remove_user(&user_id)
            .expect("Unable to remove inactive user");

        assert!(rbac_store
            .get_user(&user_id)
            .expect("Unable to lookup user by id")
            .is_none());
        assert_eq!(
            0,
            rbac_store
                .get_assigned_roles(&user_id)
                .expect("Unable to get assigned roles")
                .len()
        );
    }

    /// This test verifies the following:
    /// 1. Adds two roles via the store API
    /// 2. Verifies they have been added by listing the roles via the store
    ///    API
    #[test]
    fn sqlite_add_and_list_roles() {
        let pool = create_connection_pool_and_migrate();

        let rbac_store = DieselRbacStore::new(pool);

        for name in &["admin", "editor"] {
            let role = RoleBuilder::new()
                .with_name((*name).into())
                .with_description(format!("the {} role", name))
                .build()
                .expect("Unable to build role");
            rbac_store.add_role(role).expect("Unable to add role");
        }

        let names: Vec<_> = rbac_store
            .list_roles()
            .expect("Unable to list roles")
            .map(|role| role.name().to_string())
            .collect();
        assert_eq!(2, names.len());
        assert!(names.contains(&"admin".to_string()));
        assert!(names.contains(&"editor".to_string()));

        let stored_role = rbac_store
            .get_role_by_name("admin")
            .expect("Unable to lookup role by name")
            .expect("Did not find the added role");
        assert_eq!("the admin role", stored_role.description());
    }

    /// This test verifies the following:
    /// 1. Adding a role with a duplicate name fails with a constraint
    ///    violation
    #[test]
    fn sqlite_duplicate_role_name() {
        let pool = create_connection_pool_and_migrate();

        let rbac_store = DieselRbacStore::new(pool);

        let role = RoleBuilder::new()
            .with_name("admin".into())
            .build()
            .expect("Unable to build role");
        rbac_store.add_role(role).expect("Unable to add role");

        let duplicate = RoleBuilder::new()
            .with_name("admin".into())
            .build()
            .expect("Unable to build role");
        let result = rbac_store.add_role(duplicate);
        assert!(matches!(
            result,
            Err(RbacStoreError::ConstraintViolation(_))
        ));
    }

    /// This test verifies the following:
    /// 1. Granting the same (action, resource) pair to two roles reuses the
    ///    permission row
    /// 2. Revoking the grant from one role keeps the permission row linked
    ///    to the other
    #[test]
    fn sqlite_permission_row_reuse() {
        let pool = create_connection_pool_and_migrate();

        let rbac_store = DieselRbacStore::new(pool);

        let resource = ResourceBuilder::new()
            .with_name("document".into())
            .build()
            .expect("Unable to build resource");
        let resource_id = resource.resource_id().to_string();
        rbac_store
            .add_resource(resource)
            .expect("Unable to add resource");

        let mut role_ids = Vec::new();
        for name in &["editor", "auditor"] {
            let role = RoleBuilder::new()
                .with_name((*name).into())
                .build()
                .expect("Unable to build role");
            role_ids.push(role.role_id().to_string());
            rbac_store.add_role(role).expect("Unable to add role");
            rbac_store
                .add_grant(role_ids.last().unwrap(), Action::Read, &resource_id)
                .expect("Unable to add grant");
        }

        let editor_perm = rbac_store
            .list_role_permissions(&role_ids[0])
            .expect("Unable to list permissions")
            .next()
            .expect("Did not find the granted permission");
        let auditor_perm = rbac_store
            .list_role_permissions(&role_ids[1])
            .expect("Unable to list permissions")
            .next()
            .expect("Did not find the granted permission");
        assert_eq!(editor_perm.permission_id(), auditor_perm.permission_id());
        assert_eq!(Action::Read, editor_perm.action());

        rbac_store
            .remove_grant(&role_ids[0], Action::Read, &resource_id)
            .expect("Unable to remove grant");

        assert!(!rbac_store
            .role_has_permission(&role_ids[0], Action::Read, &resource_id)
            .expect("Unable to check permission"));
        assert!(rbac_store
            .role_has_permission(&role_ids[1], Action::Read, &resource_id)
            .expect("Unable to check permission"));
    }

    /// This test verifies the following:
    /// 1. A role with assigned users cannot be removed
    /// 2. A resource with permissions referencing it cannot be removed
    #[test]
    fn sqlite_referential_guards() {
        let pool = create_connection_pool_and_migrate();

        let rbac_store = DieselRbacStore::new(pool);

        let user = UserBuilder::new()
            .with_username("alice".into())
            .with_email("alice@example.com".into())
            .with_password("hunter2".into())
            .with_password_encryption_cost(PasswordEncryptionCost::Low)
            .build()
            .expect("Unable to build user");
        let user_id = user.user_id().to_string();
        rbac_store.add_user(user).expect("Unable to add user");

        let role = RoleBuilder::new()
            .with_name("editor".into())
            .build()
            .expect("Unable to build role");
        let role_id = role.role_id().to_string();
        rbac_store.add_role(role).expect("Unable to add role");

        let resource = ResourceBuilder::new()
            .with_name("document".into())
            .build()
            .expect("Unable to build resource");
        let resource_id = resource.resource_id().to_string();
        rbac_store
            .add_resource(resource)
            .expect("Unable to add resource");

        rbac_store
            .assign_role(&user_id, &role_id)
            .expect("Unable to assign role");
        rbac_store
            .add_grant(&role_id, Action::Delete, &resource_id)
            .expect("Unable to add grant");

        assert!(matches!(
            rbac_store.remove_role(&role_id),
            Err(RbacStoreError::ConstraintViolation(_))
        ));
        assert!(matches!(
            rbac_store.remove_resource(&resource_id),
            Err(RbacStoreError::ConstraintViolation(_))
        ));

        rbac_store
            .unassign_role(&user_id, &role_id)
            .expect("Unable to unassign role");
        rbac_store
            .remove_role(&role_id)
            .expect("Unable to remove unassigned role");
    }

    /// This test verifies the following:
    /// 1. Assigned roles are returned in assignment order
    #[test]
    fn sqlite_assigned_roles_in_order() {
        let pool = create_connection_pool_and_migrate();

        let rbac_store = DieselRbacStore::new(pool);

        let user = UserBuilder::new()
            .with_username("alice".into())
            .with_email("alice@example.com".into())
            .with_password("hunter2".into())
            .with_password_encryption_cost(PasswordEncryptionCost::Low)
            .build()
            .expect("Unable to build user");
        let user_id = user.user_id().to_string();
        rbac_store.add_user(user).expect("Unable to add user");

        let names = ["guest", "editor", "admin"];
        for name in &names {
            let role = RoleBuilder::new()
                .with_name((*name).into())
                .build()
                .expect("Unable to build role");
            let role_id = role.role_id().to_string();
            rbac_store.add_role(role).expect("Unable to add role");
            rbac_store
                .assign_role(&user_id, &role_id)
                .expect("Unable to assign role");
        }

        let assigned: Vec<_> = rbac_store
            .get_assigned_roles(&user_id)
            .expect("Unable to get assigned roles")
            .map(|role| role.name().to_string())
            .collect();
        assert_eq!(vec!["guest", "editor", "admin"], assigned);
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
