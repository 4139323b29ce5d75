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
        models::UserModel,
        schema::{rbac_user_roles, rbac_users},
    },
    RbacStoreError,
};

use super::RbacStoreOperations;

pub trait RbacStoreRemoveUser {
    fn remove_user(&self, user_id: &str) -> Result<(), RbacStoreError>;
}

#[cfg(feature = "sqlite")]
impl<'a> RbacStoreRemoveUser for RbacStoreOperations<'a, diesel::sqlite::SqliteConnection> {
    fn remove_user(&self, user_id: &str) -> Result<(), RbacStoreError> {
        self.conn.transaction::<_, _, _>(|| {
            let user = rbac_users::table
                .find(user_id)
                .first::<UserModel>(self.conn)
                .optional()?
                .ok_or_else(|| {
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

            delete(rbac_user_roles::table.filter(rbac_user_roles::user_id.eq(user_id)))
                .execute(self.conn)?;

            delete(rbac_users::table.find(user_id)).execute(self.conn)?;

            Ok(())
        })
    }
}

#[cfg(feature = "postgres")]
impl<'a> RbacStoreRemoveUser for RbacStoreOperations<'a, diesel::pg::PgConnection> {
    fn remove_user(&self, user_id: &str) -> Result<(), RbacStoreError> {
        self.conn.transaction::<_, _, _>(|| {
            let user = rbac_users::table
                .find(user_id)
                .first::<UserModel>(self.conn)
                .optional()?
                .ok_or_else(|| {
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

            delete(rbac_user_roles::table.filter(rbac_user_roles::user_id.eq(user_id)))
                .execute(self.conn)?;

            delete(rbac_users::table.find(user_id)).execute(self.conn)?;

            Ok(())
        })
    }
}
