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

//! This module defines the store trait for the RBAC data model: users,
//! roles, resources, permissions, and the relations between them.

mod action;
#[cfg(feature = "diesel")]
mod diesel;
mod error;
mod memory;
mod permission;
mod resource;
mod role;
mod user;

pub use action::Action;
pub use memory::MemoryRbacStore;
pub use permission::Permission;
pub use resource::{Resource, ResourceBuilder};
pub use role::{Role, RoleBuilder, RoleUpdateBuilder};
pub use user::{PasswordEncryptionCost, User, UserBuilder, UserUpdateBuilder};

#[cfg(feature = "diesel")]
pub use self::diesel::DieselRbacStore;

pub use error::RbacStoreError;

/// Defines methods for CRUD operations and relationship queries on the RBAC
/// data model, without defining a storage strategy.
///
/// All reads used by the access evaluator are individual queries; no
/// cross-query snapshot is guaranteed while administrative mutations are in
/// flight.
pub trait RbacStore: Send + Sync {
    /// Adds a user.
    ///
    /// # Errors
    ///
    /// Returns a `ConstraintViolation` error if a user with the same ID or
    /// username already exists.
    fn add_user(&self, user: User) -> Result<(), RbacStoreError>;

    /// Updates a user.
    ///
    /// # Errors
    ///
    /// Returns a `ConstraintViolation` error if the user does not exist.
    fn update_user(&self, user: User) -> Result<(), RbacStoreError>;

    /// Removes a user and its role assignments.
    ///
    /// # Errors
    ///
    /// Returns an `InvalidState` error if the user does not exist or is
    /// still active; an active user cannot be removed.
    fn remove_user(&self, user_id: &str) -> Result<(), RbacStoreError>;

    /// Returns the user with the given ID, if one exists.
    fn get_user(&self, user_id: &str) -> Result<Option<User>, RbacStoreError>;

    /// Returns the user with the given username, if one exists.
    fn get_user_by_username(&self, username: &str) -> Result<Option<User>, RbacStoreError>;

    /// Lists all users.
    fn list_users(&self) -> Result<Box<dyn ExactSizeIterator<Item = User>>, RbacStoreError>;

    /// Adds a role.
    ///
    /// # Errors
    ///
    /// Returns a `ConstraintViolation` error if a role with the same ID or
    /// name already exists.
    fn add_role(&self, role: Role) -> Result<(), RbacStoreError>;

    /// Updates a role.
    ///
    /// # Errors
    ///
    /// Returns a `ConstraintViolation` error if the role does not exist.
    fn update_role(&self, role: Role) -> Result<(), RbacStoreError>;

    /// Removes a role and its permission links.
    ///
    /// # Errors
    ///
    /// Returns an `InvalidState` error if the role does not exist, or a
    /// `ConstraintViolation` error if users are still assigned to it.
    fn remove_role(&self, role_id: &str) -> Result<(), RbacStoreError>;

    /// Returns the role with the given ID, if one exists.
    fn get_role(&self, role_id: &str) -> Result<Option<Role>, RbacStoreError>;

    /// Returns the role with the given name, if one exists.
    fn get_role_by_name(&self, name: &str) -> Result<Option<Role>, RbacStoreError>;

    /// Lists all roles.
    fn list_roles(&self) -> Result<Box<dyn ExactSizeIterator<Item = Role>>, RbacStoreError>;

    /// Adds a resource.
    ///
    /// # Errors
    ///
    /// Returns a `ConstraintViolation` error if a resource with the same ID
    /// or name already exists.
    fn add_resource(&self, resource: Resource) -> Result<(), RbacStoreError>;

    /// Removes a resource.
    ///
    /// # Errors
    ///
    /// Returns an `InvalidState` error if the resource does not exist, or a
    /// `ConstraintViolation` error if permissions still reference it.
    fn remove_resource(&self, resource_id: &str) -> Result<(), RbacStoreError>;

    /// Returns the resource with the given name, if one exists.
    fn get_resource_by_name(&self, name: &str) -> Result<Option<Resource>, RbacStoreError>;

    /// Lists all resources.
    fn list_resources(&self)
        -> Result<Box<dyn ExactSizeIterator<Item = Resource>>, RbacStoreError>;

    /// Grants an action on a resource to a role.
    ///
    /// If a permission for the `(action, resource)` pair already exists it is
    /// reused; otherwise one is created. The permission is then linked to the
    /// role.
    ///
    /// # Errors
    ///
    /// Returns a `ConstraintViolation` error if the role or resource does
    /// not exist, or if the role already holds the permission.
    fn add_grant(
        &self,
        role_id: &str,
        action: Action,
        resource_id: &str,
    ) -> Result<(), RbacStoreError>;

    /// Revokes an action on a resource from a role.
    ///
    /// Only the link between the role and the permission is removed; the
    /// permission itself is kept for reuse.
    ///
    /// # Errors
    ///
    /// Returns an `InvalidState` error if the role does not hold the
    /// permission.
    fn remove_grant(
        &self,
        role_id: &str,
        action: Action,
        resource_id: &str,
    ) -> Result<(), RbacStoreError>;

    /// Lists the permissions currently attached to the given role.
    fn list_role_permissions(
        &self,
        role_id: &str,
    ) -> Result<Box<dyn ExactSizeIterator<Item = Permission>>, RbacStoreError>;

    /// Returns whether a permission for the `(action, resource)` pair is
    /// attached to the given role.
    fn role_has_permission(
        &self,
        role_id: &str,
        action: Action,
        resource_id: &str,
    ) -> Result<bool, RbacStoreError>;

    /// Assigns a role to a user.
    ///
    /// # Errors
    ///
    /// Returns a `ConstraintViolation` error if the user or role does not
    /// exist, or if the assignment already exists.
    fn assign_role(&self, user_id: &str, role_id: &str) -> Result<(), RbacStoreError>;

    /// Removes a role assignment from a user.
    ///
    /// # Errors
    ///
    /// Returns an `InvalidState` error if the assignment does not exist.
    fn unassign_role(&self, user_id: &str, role_id: &str) -> Result<(), RbacStoreError>;

    /// Returns the roles assigned to the given user, in assignment order.
    fn get_assigned_roles(
        &self,
        user_id: &str,
    ) -> Result<Box<dyn ExactSizeIterator<Item = Role>>, RbacStoreError>;

    /// Clone into a boxed, dynamically dispatched store
    fn clone_box(&self) -> Box<dyn RbacStore>;
}

impl Clone for Box<dyn RbacStore> {
    fn clone(&self) -> Self {
        self.clone_box()
    }
}

impl<RS> RbacStore for Box<RS>
where
    RS: RbacStore + ?Sized,
{
    fn add_user(&self, user: User) -> Result<(), RbacStoreError> {
        (**self).add_user(user)
    }

    fn update_user(&self, user: User) -> Result<(), RbacStoreError> {
        (**self).update_user(user)
    }

    fn remove_user(&self, user_id: &str) -> Result<(), RbacStoreError> {
        (**self).remove_user(user_id)
    }

    fn get_user(&self, user_id: &str) -> Result<Option<User>, RbacStoreError> {
        (**self).get_user(user_id)
    }

    fn get_user_by_username(&self, username: &str) -> Result<Option<User>, RbacStoreError> {
        (**self).get_user_by_username(username)
    }

    fn list_users(&self) -> Result<Box<dyn ExactSizeIterator<Item = User>>, RbacStoreError> {
        (**self).list_users()
    }

    fn add_role(&self, role: Role) -> Result<(), RbacStoreError> {
        (**self).add_role(role)
    }

    fn update_role(&self, role: Role) -> Result<(), RbacStoreError> {
        (**self).update_role(role)
    }

    fn remove_role(&self, role_id: &str) -> Result<(), RbacStoreError> {
        (**self).remove_role(role_id)
    }

    fn get_role(&self, role_id: &str) -> Result<Option<Role>, RbacStoreError> {
        (**self).get_role(role_id)
    }

    fn get_role_by_name(&self, name: &str) -> Result<Option<Role>, RbacStoreError> {
        (**self).get_role_by_name(name)
    }

    fn list_roles(&self) -> Result<Box<dyn ExactSizeIterator<Item = Role>>, RbacStoreError> {
        (**self).list_roles()
    }

    fn add_resource(&self, resource: Resource) -> Result<(), RbacStoreError> {
        (**self).add_resource(resource)
    }

    fn remove_resource(&self, resource_id: &str) -> Result<(), RbacStoreError> {
        (**self).remove_resource(resource_id)
    }

    fn get_resource_by_name(&self, name: &str) -> Result<Option<Resource>, RbacStoreError> {
        (**self).get_resource_by_name(name)
    }

    fn list_resources(
        &self,
    ) -> Result<Box<dyn ExactSizeIterator<Item = Resource>>, RbacStoreError> {
        (**self).list_resources()
    }

    fn add_grant(
        &self,
        role_id: &str,
        action: Action,
        resource_id: &str,
    ) -> Result<(), RbacStoreError> {
        (**self).add_grant(role_id, action, resource_id)
    }

    fn remove_grant(
        &self,
        role_id: &str,
        action: Action,
        resource_id: &str,
    ) -> Result<(), RbacStoreError> {
        (**self).remove_grant(role_id, action, resource_id)
    }

    fn list_role_permissions(
        &self,
        role_id: &str,
    ) -> Result<Box<dyn ExactSizeIterator<Item = Permission>>, RbacStoreError> {
        (**self).list_role_permissions(role_id)
    }

    fn role_has_permission(
        &self,
        role_id: &str,
        action: Action,
        resource_id: &str,
    ) -> Result<bool, RbacStoreError> {
        (**self).role_has_permission(role_id, action, resource_id)
    }

    fn assign_role(&self, user_id: &str, role_id: &str) -> Result<(), RbacStoreError> {
        (**self).assign_role(user_id, role_id)
    }

    fn unassign_role(&self, user_id: &str, role_id: &str) -> Result<(), RbacStoreError> {
        (**self).unassign_role(user_id, role_id)
    }

    fn get_assigned_roles(
        &self,
        user_id: &str,
    ) -> Result<Box<dyn ExactSizeIterator<Item = Role>>, RbacStoreError> {
        (**self).get_assigned_roles(user_id)
    }

    fn clone_box(&self) -> Box<dyn RbacStore> {
        (**self).clone_box()
    }
}
