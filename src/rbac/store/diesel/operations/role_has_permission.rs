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

use diesel::prelude::*;

use crate::rbac::store::{
    diesel::{
        models::{ActionModel, ActionModelMapping, PermissionModel, RolePermissionModel},
        schema::{rbac_permissions, rbac_role_permissions},
    },
    Action, RbacStoreError,
};

use super::RbacStoreOperations;

pub trait RbacStoreRoleHasPermission {
    fn role_has_permission(
        &self,
        role_id: &str,
        action: Action,
        resource_id: &str,
    ) -> Result<bool, RbacStoreError>;
}

impl<'a, C> RbacStoreRoleHasPermission for RbacStoreOperations<'a, C>
where
    C: diesel::Connection,
    String: diesel::deserialize::FromSql<diesel::sql_types::Text, C::Backend>,
    <C as diesel::Connection>::Backend: diesel::types::HasSqlType<ActionModelMapping>,
    ActionModel: diesel::deserialize::FromSql<ActionModelMapping, C::Backend>,
{
    fn role_has_permission(
        &self,
        role_id: &str,
        action: Action,
        resource_id: &str,
    ) -> Result<bool, RbacStoreError> {
        self.conn.transaction::<bool, _, _>(|| {
            let permission = rbac_permissions::table
                .filter(
                    rbac_permissions::action
                        .eq(ActionModel::from(action))
                        .and(rbac_permissions::resource_id.eq(resource_id)),
                )
                .first::<PermissionModel>(self.conn)
                .optional()?;

            match permission {
                Some(permission) => Ok(rbac_role_permissions::table
                    .find((role_id, permission.id))
                    .first::<RolePermissionModel>(self.conn)
                    .optional()?
                    .is_some()),
                None => Ok(false),
            }
        })
    }
}
