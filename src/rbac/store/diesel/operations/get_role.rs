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
    diesel::{models::RoleModel, schema::rbac_roles},
    RbacStoreError, Role,
};

use super::RbacStoreOperations;

pub trait RbacStoreGetRole {
    fn get_role(&self, role_id: &str) -> Result<Option<Role>, RbacStoreError>;

    fn get_role_by_name(&self, name: &str) -> Result<Option<Role>, RbacStoreError>;
}

impl<'a, C> RbacStoreGetRole for RbacStoreOperations<'a, C>
where
    C: diesel::Connection,
    String: diesel::deserialize::FromSql<diesel::sql_types::Text, C::Backend>,
{
    fn get_role(&self, role_id: &str) -> Result<Option<Role>, RbacStoreError> {
        rbac_roles::table
            .filter(rbac_roles::id.eq(role_id))
            .first::<RoleModel>(self.conn)
            .optional()
            .map(|role| role.map(Role::from))
            .map_err(RbacStoreError::from)
    }

    fn get_role_by_name(&self, name: &str) -> Result<Option<Role>, RbacStoreError> {
        rbac_roles::table
            .filter(rbac_roles::name.eq(name))
            .first::<RoleModel>(self.conn)
            .optional()
            .map(|role| role.map(Role::from))
            .map_err(RbacStoreError::from)
    }
}
