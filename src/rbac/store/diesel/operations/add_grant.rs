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

use diesel::{dsl::insert_into, prelude::*};
use uuid::Uuid;

use crate::error::{ConstraintViolationError, ConstraintViolationType};
use crate::rbac::store::{
    diesel::{
        models::{ActionModel, PermissionModel, ResourceModel, RoleModel, RolePermissionModel},
        schema::{rbac_permissions, rbac_resources, rbac_role_permissions, rbac_roles},
    },
    Action, RbacStoreError,
};

use super::RbacStoreOperations;

pub trait RbacStoreAddGrant {
    fn add_grant(
        &self,
        role_id: &str,
        action: Action,
        resource_id: &str,
    ) -> Result<(), RbacStoreError>;
}

#[cfg(feature = "sqlite")]
impl<'a> RbacStoreAddGrant for RbacStoreOperations<'a, diesel::sqlite::SqliteConnection> {
    fn add_grant(
        &self,
        role_id: &str,
        action: Action,
        resource_id: &str,
    ) -> Result<(), RbacStoreError> {
        self.conn.transaction::<_, _, _>(|| {
            rbac_roles::table
                .find(role_id)
                .first::<RoleModel>(self.conn)
                .optional()?
                .ok_or_else(foreign_key_violation)?;

            rbac_resources::table
                .find(resource_id)
                .first::<ResourceModel>(self.conn)
                .optional()?
                .ok_or_else(foreign_key_violation)?;

            // reuse an existing permission row for this (action, resource)
            // pair, if one exists
            let existing = rbac_permissions::table
                .filter(
                    rbac_permissions::action
                        .eq(ActionModel::from(action))
                        .and(rbac_permissions::resource_id.eq(resource_id)),
                )
                .first::<PermissionModel>(self.conn)
                .optional()?;

            let permission_id = match existing {
                Some(permission) => permission.id,
                None => {
                    let permission = PermissionModel {
                        id: Uuid::new_v4().to_string(),
                        action: ActionModel::from(action),
                        resource_id: resource_id.to_string(),
                    };
                    let permission_id = permission.id.clone();
                    insert_into(rbac_permissions::table)
                        .values(permission)
                        .execute(self.conn)?;
                    permission_id
                }
            };

            insert_into(rbac_role_permissions::table)
                .values(RolePermissionModel {
                    role_id: role_id.to_string(),
                    permission_id,
                })
                .execute(self.conn)?;

            Ok(())
        })
    }
}

#[cfg(feature = "postgres")]
impl<'a> RbacStoreAddGrant for RbacStoreOperations<'a, diesel::pg::PgConnection> {
    fn add_grant(
        &self,
        role_id: &str,
        action: Action,
        resource_id: &str,
    ) -> Result<(), RbacStoreError> {
        self.conn.transaction::<_, _, _>(|| {
            rbac_roles::table
                .find(role_id)
                .first::<RoleModel>(self.conn)
                .optional()?
                .ok_or_else(foreign_key_violation)?;

            rbac_resources::table
                .find(resource_id)
                .first::<ResourceModel>(self.conn)
                .optional()?
                .ok_or_else(foreign_key_violation)?;

            // reuse an existing permission row for this (action, resource)
            // pair, if one exists
            let existing = rbac_permissions::table
                .filter(
                    rbac_permissions::action
                        .eq(ActionModel::from(action))
                        .and(rbac_permissions::resource_id.eq(resource_id)),
                )
                .first::<PermissionModel>(self.conn)
                .optional()?;

            let permission_id = match existing {
                Some(permission) => permission.id,
                None => {
                    let permission = PermissionModel {
                        id: Uuid::new_v4().to_string(),
                        action: ActionModel::from(action),
                        resource_id: resource_id.to_string(),
                    };
                    let permission_id = permission.id.clone();
                    insert_into(rbac_permissions::table)
                        .values(permission)
                        .execute(self.conn)?;
                    permission_id
                }
            };

            insert_into(rbac_role_permissions::table)
                .values(RolePermissionModel {
                    role_id: role_id.to_string(),
                    permission_id,
                })
                .execute(self.conn)?;

            Ok(())
        })
    }
}

fn foreign_key_violation() -> RbacStoreError {
    RbacStoreError::ConstraintViolation(ConstraintViolationError::with_violation_type(
        ConstraintViolationType::ForeignKey,
    ))
}
