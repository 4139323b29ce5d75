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

use diesel::{dsl::update, prelude::*};

use crate::error::{ConstraintViolationError, ConstraintViolationType};
use crate::rbac::store::{
    diesel::{models::UserModel, schema::rbac_users},
    RbacStoreError, User,
};

use super::RbacStoreOperations;

pub trait RbacStoreUpdateUser {
    fn update_user(&self, user: User) -> Result<(), RbacStoreError>;
}

#[cfg(feature = "sqlite")]
impl<'a> RbacStoreUpdateUser for RbacStoreOperations<'a, diesel::sqlite::SqliteConnection> {
    fn update_user(&self, user: User) -> Result<(), RbacStoreError> {
        let UserModel {
            id,
            username,
            email,
            password,
            active,
            display_name,
            avatar,
        } = user.into();

        let updated = update(rbac_users::table.find(&id))
            .set((
                rbac_users::username.eq(username),
                rbac_users::email.eq(email),
                rbac_users::password.eq(password),
                rbac_users::active.eq(active),
                rbac_users::display_name.eq(display_name),
                rbac_users::avatar.eq(avatar),
            ))
            .execute(self.conn)?;

        if updated == 0 {
            return Err(RbacStoreError::ConstraintViolation(
                ConstraintViolationError::with_violation_type(ConstraintViolationType::NotFound),
            ));
        }

        Ok(())
    }
}

#[cfg(feature = "postgres")]
impl<'a> RbacStoreUpdateUser for RbacStoreOperations<'a, diesel::pg::PgConnection> {
    fn update_user(&self, user: User) -> Result<(), RbacStoreError> {
        let UserModel {
            id,
            username,
            email,
            password,
            active,
            display_name,
            avatar,
        } = user.into();

        let updated = update(rbac_users::table.find(&id))
            .set((
                rbac_users::username.eq(username),
                rbac_users::email.eq(email),
                rbac_users::password.eq(password),
                rbac_users::active.eq(active),
                rbac_users::display_name.eq(display_name),
                rbac_users::avatar.eq(avatar),
            ))
            .execute(self.conn)?;

        if updated == 0 {
            return Err(RbacStoreError::ConstraintViolation(
                ConstraintViolationError::with_violation_type(ConstraintViolationType::NotFound),
            ));
        }

        Ok(())
    }
}
