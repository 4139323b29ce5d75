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

use diesel::{dsl::delete, prelude::*};

use crate::error::InvalidStateError;
use crate::rbac::store::{
    diesel::{
        models::{ActionModel, PermissionModel},
        schema::{rbac_permissions, rbac_role_permissions},
    },
    Action, RbacStoreError,
};

use super::RbacStoreOperations;

pub trait RbacStoreRemoveGrant {
    fn remove_grant(
        &self,
        role_id: &str,
        action: Action,
        resource_id: &str,
    ) -> Result<(), RbacStoreError>;
}

#[cfg(feature = "sqlite")]
impl<'a> RbacStoreRemoveGrant for RbacStoreOperations<'a, diesel::sqlite::SqliteConnection> {
    fn remove_grant(
        &self,
        role_id: &str,
        action: Action,
        resource_id: &str,
    ) -> Result<(), RbacStoreError> {
        self.conn.transaction::<_, _, _>(|| {
            let permission = rbac_permissions::table
                .filter(
                    rbac_permissions::action
                        .eq(ActionModel::from(action))
                        .and(rbac_permissions::resource_id.eq(resource_id)),
                )
                .first::<PermissionModel>(self.conn)
                .optional()?;

            // the permission row itself is kept; only the link to the role is
            // removed
            let removed = match permission {
                Some(permission) => delete(
                    rbac_role_permissions::table.filter(
                        rbac_role_permissions::role_id
                            .eq(role_id)
                            .and(rbac_role_permissions::permission_id.eq(permission.id)),
                    ),
                )
                .execute(self.conn)?,
                None => 0,
            };

            if removed == 0 {
                return Err(RbacStoreError::InvalidState(
                    InvalidStateError::with_message(format!(
                        "Role {} does not hold a permission for ({}, {})",
                        role_id, action, resource_id
                    )),
                ));
            }

            Ok(())
        })
    }
}

#[cfg(feature = "postgres")]
impl<'a> RbacStoreRemoveGrant for RbacStoreOperations<'a, diesel::pg::PgConnection> {
    fn remove_grant(
        &self,
        role_id: &str,
        action: Action,
        resource_id: &str,
    ) -> Result<(), RbacStoreError> {
        self.conn.transaction::<_, _, _>(|| {
            let permission = rbac_permissions::table
                .filter(
                    rbac_permissions::action
                        .eq(ActionModel::from(action))
                        .and(rbac_permissions::resource_id.eq(resource_id)),
                )
                .first::<PermissionModel>(self.conn)
                .optional()?;

            // the permission row itself is kept; only the link to the role is
            // removed
            let removed = match permission {
                Some(permission) => delete(
                    rbac_role_permissions::table.filter(
                        rbac_role_permissions::role_id
                            .eq(role_id)
                            .and(rbac_role_permissions::permission_id.eq(permission.id)),
                    ),
                )
                .execute(self.conn)?,
                None => 0,
            };

            if removed == 0 {
                return Err(RbacStoreError::InvalidState(
                    InvalidStateError::with_message(format!(
                        "Role {} does not hold a permission for ({}, {})",
                        role_id, action, resource_id
                    )),
                ));
            }

            Ok(())
        })
    }
}
