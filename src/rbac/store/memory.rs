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

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use uuid::Uuid;

use crate::error::{
    ConstraintViolationError, ConstraintViolationType, InternalError, InvalidStateError,
};

use super::{Action, Permission, RbacStore, RbacStoreError, Resource, Role, User};

#[derive(Default)]
struct Inner {
    users: HashMap<String, User>,
    roles: HashMap<String, Role>,
    resources: HashMap<String, Resource>,
    permissions: HashMap<String, Permission>,
    // (user_id, role_id) pairs, in assignment order
    user_roles: Vec<(String, String)>,
    // (role_id, permission_id) pairs, in grant order
    role_permissions: Vec<(String, String)>,
}

/// An in-memory [`RbacStore`], backed by hash maps.
///
/// Clones share the same underlying state.
#[derive(Default, Clone)]
pub struct MemoryRbacStore {
    inner: Arc<Mutex<Inner>>,
}

impl MemoryRbacStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> Result<std::sync::MutexGuard<Inner>, RbacStoreError> {
        self.inner.lock().map_err(|_| {
            RbacStoreError::InternalError(InternalError::with_message(
                "Cannot access RBAC data: mutex lock poisoned".to_string(),
            ))
        })
    }
}

fn unique_violation() -> RbacStoreError {
    RbacStoreError::ConstraintViolation(ConstraintViolationError::with_violation_type(
        ConstraintViolationType::Unique,
    ))
}

fn foreign_key_violation() -> RbacStoreError {
    RbacStoreError::ConstraintViolation(ConstraintViolationError::with_violation_type(
        ConstraintViolationType::ForeignKey,
    ))
}

fn not_found_violation() -> RbacStoreError {
    RbacStoreError::ConstraintViolation(ConstraintViolationError::with_violation_type(
        ConstraintViolationType::NotFound,
    ))
}

impl Inner {
    fn find_permission(&self, action: Action, resource_id: &str) -> Option<&Permission> {
        self.permissions
            .values()
            .find(|perm| perm.action == action && perm.resource_id == resource_id)
    }
}

impl RbacStore for MemoryRbacStore {
    fn add_user(&self, user: User) -> Result<(), RbacStoreError> {
        let mut inner = self.lock()?;
        if inner.users.contains_key(&user.user_id)
            || inner
                .users
                .values()
                .any(|existing| existing.username == user.username)
        {
            return Err(unique_violation());
        }
        inner.users.insert(user.user_id.clone(), user);
        Ok(())
    }

    fn update_user(&self, user: User) -> Result<(), RbacStoreError> {
        let mut inner = self.lock()?;
        if !inner.users.contains_key(&user.user_id) {
            return Err(not_found_violation());
        }
        if inner
            .users
            .values()
            .any(|existing| existing.username == user.username && existing.user_id != user.user_id)
        {
            return Err(unique_violation());
        }
        inner.users.insert(user.user_id.clone(), user);
        Ok(())
    }

    fn remove_user(&self, user_id: &str) -> Result<(), RbacStoreError> {
        let mut inner = self.lock()?;
        let user = inner.users.get(user_id).ok_or_else(|| {
            RbacStoreError::InvalidState(InvalidStateError::with_message(format!(
                "User with ID {} not found",
                user_id
            )))
        })?;
        if user.active {
            return Err(RbacStoreError::InvalidState(
                InvalidStateError::with_message(format!(
                    "User with ID {} is active and cannot be removed",
                    user_id
                )),
            ));
        }
        inner.user_roles.retain(|(uid, _)| uid != user_id);
        inner.users.remove(user_id);
        Ok(())
    }

    fn get_user(&self, user_id: &str) -> Result<Option<User>, RbacStoreError> {
        let inner = self.lock()?;
        Ok(inner.users.get(user_id).cloned())
    }

    fn get_user_by_username(&self, username: &str) -> Result<Option<User>, RbacStoreError> {
        let inner = self.lock()?;
        Ok(inner
            .users
            .values()
            .find(|user| user.username == username)
            .cloned())
    }

    fn list_users(&self) -> Result<Box<dyn ExactSizeIterator<Item = User>>, RbacStoreError> {
        let inner = self.lock()?;
        Ok(Box::new(
            inner.users.values().cloned().collect::<Vec<_>>().into_iter(),
        ))
    }

    fn add_role(&self, role: Role) -> Result<(), RbacStoreError> {
        let mut inner = self.lock()?;
        if inner.roles.contains_key(&role.role_id)
            || inner
                .roles
                .values()
                .any(|existing| existing.name == role.name)
        {
            return Err(unique_violation());
        }
        inner.roles.insert(role.role_id.clone(), role);
        Ok(())
    }

    fn update_role(&self, role: Role) -> Result<(), RbacStoreError> {
        let mut inner = self.lock()?;
        if !inner.roles.contains_key(&role.role_id) {
            return Err(not_found_violation());
        }
        if inner
            .roles
            .values()
            .any(|existing| existing.name == role.name && existing.role_id != role.role_id)
        {
            return Err(unique_violation());
        }
        inner.roles.insert(role.role_id.clone(), role);
        Ok(())
    }

    fn remove_role(&self, role_id: &str) -> Result<(), RbacStoreError> {
        let mut inner = self.lock()?;
        if !inner.roles.contains_key(role_id) {
            return Err(RbacStoreError::InvalidState(
                InvalidStateError::with_message(format!("Role with ID {} not found", role_id)),
            ));
        }
        if inner.user_roles.iter().any(|(_, rid)| rid == role_id) {
            return Err(foreign_key_violation());
        }
        inner.role_permissions.retain(|(rid, _)| rid != role_id);
        inner.roles.remove(role_id);
        Ok(())
    }

    fn get_role(&self, role_id: &str) -> Result<Option<Role>, RbacStoreError> {
        let inner = self.lock()?;
        Ok(inner.roles.get(role_id).cloned())
    }

    fn get_role_by_name(&self, name: &str) -> Result<Option<Role>, RbacStoreError> {
        let inner = self.lock()?;
        Ok(inner.roles.values().find(|role| role.name == name).cloned())
    }

    fn list_roles(&self) -> Result<Box<dyn ExactSizeIterator<Item = Role>>, RbacStoreError> {
        let inner = self.lock()?;
        Ok(Box::new(
            inner.roles.values().cloned().collect::<Vec<_>>().into_iter(),
        ))
    }

    fn add_resource(&self, resource: Resource) -> Result<(), RbacStoreError> {
        let mut inner = self.lock()?;
        if inner.resources.contains_key(&resource.resource_id)
            || inner
                .resources
                .values()
                .any(|existing| existing.name == resource.name)
        {
            return Err(unique_violation());
        }
        inner
            .resources
            .insert(resource.resource_id.clone(), resource);
        Ok(())
    }

    fn remove_resource(&self, resource_id: &str) -> Result<(), RbacStoreError> {
        let mut inner = self.lock()?;
        if !inner.resources.contains_key(resource_id) {
            return Err(RbacStoreError::InvalidState(
                InvalidStateError::with_message(format!(
                    "Resource with ID {} not found",
                    resource_id
                )),
            ));
        }
        if inner
            .permissions
            .values()
            .any(|perm| perm.resource_id == resource_id)
        {
            return Err(foreign_key_violation());
        }
        inner.resources.remove(resource_id);
        Ok(())
    }

    fn get_resource_by_name(&self, name: &str) -> Result<Option<Resource>, RbacStoreError> {
        let inner = self.lock()?;
        Ok(inner
            .resources
            .values()
            .find(|resource| resource.name == name)
            .cloned())
    }

    fn list_resources(
        &self,
    ) -> Result<Box<dyn ExactSizeIterator<Item = Resource>>, RbacStoreError> {
        let inner = self.lock()?;
        Ok(Box::new(
            inner
                .resources
                .values()
                .cloned()
                .collect::<Vec<_>>()
                .into_iter(),
        ))
    }

    fn add_grant(
        &self,
        role_id: &str,
        action: Action,
        resource_id: &str,
    ) -> Result<(), RbacStoreError> {
        let mut inner = self.lock()?;
        if !inner.roles.contains_key(role_id) || !inner.resources.contains_key(resource_id) {
            return Err(foreign_key_violation());
        }
        let existing = inner
            .find_permission(action, resource_id)
            .map(|permission| permission.permission_id.clone());
        let permission_id = match existing {
            Some(permission_id) => permission_id,
            None => {
                let permission = Permission {
                    permission_id: Uuid::new_v4().to_string(),
                    action,
                    resource_id: resource_id.to_string(),
                };
                let permission_id = permission.permission_id.clone();
                inner
                    .permissions
                    .insert(permission_id.clone(), permission);
                permission_id
            }
        };
        let link = (role_id.to_string(), permission_id);
        if inner.role_permissions.contains(&link) {
            return Err(unique_violation());
        }
        inner.role_permissions.push(link);
        Ok(())
    }

    fn remove_grant(
        &self,
        role_id: &str,
        action: Action,
        resource_id: &str,
    ) -> Result<(), RbacStoreError> {
        let mut inner = self.lock()?;
        let permission_id = inner
            .find_permission(action, resource_id)
            .map(|permission| permission.permission_id.clone());
        let index = permission_id.and_then(|permission_id| {
            inner
                .role_permissions
                .iter()
                .position(|(rid, pid)| rid == role_id && *pid == permission_id)
        });
        match index {
            Some(index) => {
                inner.role_permissions.remove(index);
                Ok(())
            }
            None => Err(RbacStoreError::InvalidState(
                InvalidStateError::with_message(format!(
                    "Role {} does not hold a permission for ({}, {})",
                    role_id, action, resource_id
                )),
            )),
        }
    }

    fn list_role_permissions(
        &self,
        role_id: &str,
    ) -> Result<Box<dyn ExactSizeIterator<Item = Permission>>, RbacStoreError> {
        let inner = self.lock()?;
        Ok(Box::new(
            inner
                .role_permissions
                .iter()
                .filter(|(rid, _)| rid == role_id)
                .filter_map(|(_, pid)| inner.permissions.get(pid).cloned())
                .collect::<Vec<_>>()
                .into_iter(),
        ))
    }

    fn role_has_permission(
        &self,
        role_id: &str,
        action: Action,
        resource_id: &str,
    ) -> Result<bool, RbacStoreError> {
        let inner = self.lock()?;
        Ok(match inner.find_permission(action, resource_id) {
            Some(permission) => inner
                .role_permissions
                .iter()
                .any(|(rid, pid)| rid == role_id && *pid == permission.permission_id),
            None => false,
        })
    }

    fn assign_role(&self, user_id: &str, role_id: &str) -> Result<(), RbacStoreError> {
        let mut inner = self.lock()?;
        if !inner.users.contains_key(user_id) || !inner.roles.contains_key(role_id) {
            return Err(foreign_key_violation());
        }
        let assignment = (user_id.to_string(), role_id.to_string());
        if inner.user_roles.contains(&assignment) {
            return Err(unique_violation());
        }
        inner.user_roles.push(assignment);
        Ok(())
    }

    fn unassign_role(&self, user_id: &str, role_id: &str) -> Result<(), RbacStoreError> {
        let mut inner = self.lock()?;
        let index = inner
            .user_roles
            .iter()
            .position(|(uid, rid)| uid == user_id && rid == role_id);
        match index {
            Some(index) => {
                inner.user_roles.remove(index);
                Ok(())
            }
            None => Err(RbacStoreError::InvalidState(
                InvalidStateError::with_message(format!(
                    "User {} is not assigned role {}",
                    user_id, role_id
                )),
            )),
        }
    }

    fn get_assigned_roles(
        &self,
        user_id: &str,
    ) -> Result<Box<dyn ExactSizeIterator<Item = Role>>, RbacStoreError> {
        let inner = self.lock()?;
        Ok(Box::new(
            inner
                .user_roles
                .iter()
                .filter(|(uid, _)| uid == user_id)
                .filter_map(|(_, rid)| inner.roles.get(rid).cloned())
                .collect::<Vec<_>>()
                .into_iter(),
        ))
    }

    fn clone_box(&self) -> Box<dyn RbacStore> {
        Box::new(self.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use crate::rbac::store::{PasswordEncryptionCost, ResourceBuilder, RoleBuilder, UserBuilder};

    fn test_user(username: &str) -> User {
        UserBuilder::new()
            .with_username(username.into())
            .with_email(format!("{}@example.com", username))
            .with_password("hunter2".into())
            .with_password_encryption_cost(PasswordEncryptionCost::Low)
            .build()
            .expect("Unable to build user")
    }

    fn test_role(name: &str) -> Role {
        RoleBuilder::new()
            .with_name(name.into())
            .with_description(format!("the {} role", name))
            .build()
            .expect("Unable to build role")
    }

    fn test_resource(name: &str) -> Resource {
        ResourceBuilder::new()
            .with_name(name.into())
            .build()
            .expect("Unable to build resource")
    }

    #[test]
    fn duplicate_username_is_rejected() {
        let store = MemoryRbacStore::new();
        store
            .add_user(test_user("alice"))
            .expect("Unable to add user");

        let result = store.add_user(test_user("alice"));
        assert!(matches!(
            result,
            Err(RbacStoreError::ConstraintViolation(_))
        ));
    }

    #[test]
    fn active_user_cannot_be_removed() {
        let store = MemoryRbacStore::new();
        let user = test_user("alice");
        let user_id = user.user_id().to_string();
        store.add_user(user).expect("Unable to add user");

        let result = store.remove_user(&user_id);
        assert!(matches!(result, Err(RbacStoreError::InvalidState(_))));

        let deactivated = store
            .get_user(&user_id)
            .expect("Unable to get user")
            .expect("Did not find the added user")
            .into_update_builder()
            .with_active(false)
            .build()
            .expect("Unable to build updated user");
        store
            .update_user(deactivated)
            .expect("Unable to update user");

        store
            .remove_user(&user_id)
            .expect("Unable to remove inactive user");
        assert!(store
            .get_user(&user_id)
            .expect("Unable to get user")
            .is_none());
    }

    #[test]
    fn role_with_assigned_users_cannot_be_removed() {
        let store = MemoryRbacStore::new();
        let user = test_user("alice");
        let user_id = user.user_id().to_string();
        let role = test_role("editor");
        let role_id = role.role_id().to_string();
        store.add_user(user).expect("Unable to add user");
        store.add_role(role).expect("Unable to add role");
        store
            .assign_role(&user_id, &role_id)
            .expect("Unable to assign role");

        let result = store.remove_role(&role_id);
        assert!(matches!(
            result,
            Err(RbacStoreError::ConstraintViolation(_))
        ));

        store
            .unassign_role(&user_id, &role_id)
            .expect("Unable to unassign role");
        store
            .remove_role(&role_id)
            .expect("Unable to remove unassigned role");
    }

    #[test]
    fn resource_with_permissions_cannot_be_removed() {
        let store = MemoryRbacStore::new();
        let role = test_role("editor");
        let role_id = role.role_id().to_string();
        let resource = test_resource("document");
        let resource_id = resource.resource_id().to_string();
        store.add_role(role).expect("Unable to add role");
        store.add_resource(resource).expect("Unable to add resource");
        store
            .add_grant(&role_id, Action::Read, &resource_id)
            .expect("Unable to add grant");

        let result = store.remove_resource(&resource_id);
        assert!(matches!(
            result,
            Err(RbacStoreError::ConstraintViolation(_))
        ));
    }

    #[test]
    fn permission_row_is_reused_across_roles() {
        let store = MemoryRbacStore::new();
        let editor = test_role("editor");
        let editor_id = editor.role_id().to_string();
        let auditor = test_role("auditor");
        let auditor_id = auditor.role_id().to_string();
        let resource = test_resource("document");
        let resource_id = resource.resource_id().to_string();
        store.add_role(editor).expect("Unable to add role");
        store.add_role(auditor).expect("Unable to add role");
        store.add_resource(resource).expect("Unable to add resource");

        store
            .add_grant(&editor_id, Action::Read, &resource_id)
            .expect("Unable to add grant");
        store
            .add_grant(&auditor_id, Action::Read, &resource_id)
            .expect("Unable to add grant");

        let editor_perms: Vec<_> = store
            .list_role_permissions(&editor_id)
            .expect("Unable to list permissions")
            .collect();
        let auditor_perms: Vec<_> = store
            .list_role_permissions(&auditor_id)
            .expect("Unable to list permissions")
            .collect();

        assert_eq!(1, editor_perms.len());
        assert_eq!(1, auditor_perms.len());
        assert_eq!(
            editor_perms[0].permission_id(),
            auditor_perms[0].permission_id()
        );
    }

    #[test]
    fn removing_grant_keeps_permission_row() {
        let store = MemoryRbacStore::new();
        let editor = test_role("editor");
        let editor_id = editor.role_id().to_string();
        let auditor = test_role("auditor");
        let auditor_id = auditor.role_id().to_string();
        let resource = test_resource("document");
        let resource_id = resource.resource_id().to_string();
        store.add_role(editor).expect("Unable to add role");
        store.add_role(auditor).expect("Unable to add role");
        store.add_resource(resource).expect("Unable to add resource");

        store
            .add_grant(&editor_id, Action::Read, &resource_id)
            .expect("Unable to add grant");
        let permission_id = store
            .list_role_permissions(&editor_id)
            .expect("Unable to list permissions")
            .next()
            .expect("Did not find the granted permission")
            .permission_id()
            .to_string();

        store
            .remove_grant(&editor_id, Action::Read, &resource_id)
            .expect("Unable to remove grant");
        assert!(!store
            .role_has_permission(&editor_id, Action::Read, &resource_id)
            .expect("Unable to check permission"));

        // the permission row survives the unlink and is reused by later grants
        store
            .add_grant(&auditor_id, Action::Read, &resource_id)
            .expect("Unable to add grant");
        let reused_id = store
            .list_role_permissions(&auditor_id)
            .expect("Unable to list permissions")
            .next()
            .expect("Did not find the granted permission")
            .permission_id()
            .to_string();
        assert_eq!(permission_id, reused_id);
    }

    #[test]
    fn assigned_roles_are_returned_in_assignment_order() {
        let store = MemoryRbacStore::new();
        let user = test_user("alice");
        let user_id = user.user_id().to_string();
        store.add_user(user).expect("Unable to add user");

        let names = ["guest", "editor", "admin"];
        for name in &names {
            let role = test_role(name);
            let role_id = role.role_id().to_string();
            store.add_role(role).expect("Unable to add role");
            store
                .assign_role(&user_id, &role_id)
                .expect("Unable to assign role");
        }

        let assigned: Vec<_> = store
            .get_assigned_roles(&user_id)
            .expect("Unable to get assigned roles")
            .map(|role| role.name().to_string())
            .collect();
        assert_eq!(vec!["guest", "editor", "admin"], assigned);
    }
}
