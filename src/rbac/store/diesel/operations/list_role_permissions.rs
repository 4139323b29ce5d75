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

use diesel::prelude::*;

use crate::rbac::store::{
    diesel::{
        models::{ActionModel, ActionModelMapping, PermissionModel, RolePermissionModel},
        schema::{rbac_permissions, rbac_role_permissions},
    },
    Permission, RbacStoreError,
};

use super::RbacStoreOperations;

pub trait RbacStoreListRolePermissions {
    fn list_role_permissions(
        &self,
        role_id: &str,
    ) -> Result<Box<dyn ExactSizeIterator<Item = Permission>>, RbacStoreError>;
}

impl<'a, C> RbacStoreListRolePermissions for RbacStoreOperations<'a, C>
where
    C: diesel::Connection,
    String: diesel::deserialize::FromSql<diesel::sql_types::Text, C::Backend>,
    <C as diesel::Connection>::Backend: diesel::types::HasSqlType<ActionModelMapping>,
    ActionModel: diesel::deserialize::FromSql<ActionModelMapping, C::Backend>,
{
    fn list_role_permissions(
        &self,
        role_id: &str,
    ) -> Result<Box<dyn ExactSizeIterator<Item = Permission>>, RbacStoreError> {
        self.conn
            .transaction::<Box<dyn ExactSizeIterator<Item = Permission>>, _, _>(|| {
                let permission_ids = rbac_role_permissions::table
                    .filter(rbac_role_permissions::role_id.eq(role_id))
                    .load::<RolePermissionModel>(self.conn)?
                    .into_iter()
                    .map(|link| link.permission_id)
                    .collect::<Vec<_>>();

                let mut permissions_by_id = rbac_permissions::table
                    .filter(rbac_permissions::id.eq_any(&permission_ids))
                    .load::<PermissionModel>(self.conn)?
                    .into_iter()
                    .map(|permission| (permission.id.clone(), permission))
                    .collect::<HashMap<_, _>>();

                // return the permissions in grant order
                Ok(Box::new(
                    permission_ids
                        .into_iter()
                        .filter_map(move |permission_id| {
                            permissions_by_id.remove(&permission_id)
                        })
                        .map(Permission::from)
                        .collect::<Vec<_>>()
                        .into_iter(),
                ))
            })
    }
}
