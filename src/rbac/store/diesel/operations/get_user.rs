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
    diesel::{models::UserModel, schema::rbac_users},
    RbacStoreError, User,
};

use super::RbacStoreOperations;

pub trait RbacStoreGetUser {
    fn get_user(&self, user_id: &str) -> Result<Option<User>, RbacStoreError>;

    fn get_user_by_username(&self, username: &str) -> Result<Option<User>, RbacStoreError>;
}

impl<'a, C> RbacStoreGetUser for RbacStoreOperations<'a, C>
where
    C: diesel::Connection,
    C::Backend: diesel::sql_types::HasSqlType<diesel::sql_types::Bool>,
    String: diesel::deserialize::FromSql<diesel::sql_types::Text, C::Backend>,
    bool: diesel::deserialize::FromSql<diesel::sql_types::Bool, C::Backend>,
{
    fn get_user(&self, user_id: &str) -> Result<Option<User>, RbacStoreError> {
        rbac_users::table
            .filter(rbac_users::id.eq(user_id))
            .first::<UserModel>(self.conn)
            .optional()
            .map(|user| user.map(User::from))
            .map_err(RbacStoreError::from)
    }

    fn get_user_by_username(&self, username: &str) -> Result<Option<User>, RbacStoreError> {
        rbac_users::table
            .filter(rbac_users::username.eq(username))
            .first::<UserModel>(self.conn)
            .optional()
            .map(|user| user.map(User::from))
            .map_err(RbacStoreError::from)
    }
}
