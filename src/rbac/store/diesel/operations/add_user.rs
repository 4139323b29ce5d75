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

use crate::rbac::store::{
    diesel::{models::UserModel, schema::rbac_users},
    RbacStoreError, User,
};

use super::RbacStoreOperations;

pub trait RbacStoreAddUser {
    fn add_user(&self, user: User) -> Result<(), RbacStoreError>;
}

#[cfg(feature = "sqlite")]
impl<'a> RbacStoreAddUser for RbacStoreOperations<'a, diesel::sqlite::SqliteConnection> {
    fn add_user(&self, user: User) -> Result<(), RbacStoreError> {
        let user: UserModel = user.into();

        insert_into(rbac_users::table)
            .values(user)
            .execute(self.conn)?;

        Ok(())
    }
}

#[cfg(feature = "postgres")]
impl<'a> RbacStoreAddUser for RbacStoreOperations<'a, diesel::pg::PgConnection> {
    fn add_user(&self, user: User) -> Result<(), RbacStoreError> {
        let user: UserModel = user.into();

        insert_into(rbac_users::table)
            .values(user)
            .execute(self.conn)?;

        Ok(())
    }
}
