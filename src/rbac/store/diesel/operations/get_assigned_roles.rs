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
        models::{RoleModel, UserRoleModel},
        schema::{rbac_roles, rbac_user_roles},
    },
    RbacStoreError, Role,
};

use super::RbacStoreOperations;

pub trait RbacStoreGetAssignedRoles {
    fn get_assigned_roles(
        &self,
        user_id: &str,
    ) -> Result<Box<dyn ExactSizeIterator<Item = Role>>, RbacStoreError>;
}

impl<'a, C> RbacStoreGetAssignedRoles for RbacStoreOperations<'a, C>
where
    C: diesel::Connection,
    String: diesel::deserialize::FromSql<diesel::sql_types::Text, C::Backend>,
{
    fn get_assigned_roles(
        &self,
        user_id: &str,
    ) -> Result<Box<dyn ExactSizeIterator<Item = Role>>, RbacStoreError> {
        self.conn
            .transaction::<Box<dyn ExactSizeIterator<Item = Role>>, _, _>(|| {
                let role_ids = rbac_user_roles::table
                    .filter(rbac_user_roles::user_id.eq(user_id))
                    .load::<UserRoleModel>(self.conn)?
                    .into_iter()
                    .map(|assignment| assignment.role_id)
                    .collect::<Vec<_>>();

                let mut roles_by_id = rbac_roles::table
                    .filter(rbac_roles::id.eq_any(&role_ids))
                    .load::<RoleModel>(self.conn)?
                    .into_iter()
                    .map(|role| (role.id.clone(), role))
                    .collect::<HashMap<_, _>>();

                // return the roles in assignment order
                Ok(Box::new(
                    role_ids
                        .into_iter()
                        .filter_map(move |role_id| roles_by_id.remove(&role_id))
                        .map(Role::from)
                        .collect::<Vec<_>>()
                        .into_iter(),
                ))
            })
    }
}
