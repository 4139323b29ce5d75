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

use crate::error::{ConstraintViolationError, ConstraintViolationType};
use crate::rbac::store::{
    diesel::{
        models::{RoleModel, UserModel, UserRoleModel},
        schema::{rbac_roles, rbac_user_roles, rbac_users},
    },
    RbacStoreError,
};

use super::RbacStoreOperations;

pub trait RbacStoreAssignRole {
    fn assign_role(&self, user_id: &str, role_id: &str) -> Result<(), RbacStoreError>;
}

#[cfg(feature = "sqlite")]
impl<'a> RbacStoreAssignRole for RbacStoreOperations<'a, diesel::sqlite::SqliteConnection> {
    fn assign_role(&self, user_id: &str, role_id: &str) -> Result<(), RbacStoreError> {
        self.conn.transaction::<_, _, _>(|| {
            rbac_users::table
                .find(user_id)
                .first::<UserModel>(self.conn)
                .optional()?
                .ok_or_else(foreign_key_violation)?;

            rbac_roles::table
                .find(role_id)
                .first::<RoleModel>(self.conn)
                .optional()?
                .ok_or_else(foreign_key_violation)?;

            insert_into(rbac_user_roles::table)
                .values(UserRoleModel {
                    user_id: user_id.to_string(),
                    role_id: role_id.to_string(),
                })
                .execute(self.conn)?;

            Ok(())
        })
    }
}

#[cfg(feature = "postgres")]
impl<'a> RbacStoreAssignRole for RbacStoreOperations<'a, diesel::pg::PgConnection> {
    fn assign_role(&self, user_id: &str, role_id: &str) -> Result<(), RbacStoreError> {
        self.conn.transaction::<_, _, _>(|| {
            rbac_users::table
                .find(user_id)
                .first::<UserModel>(self.conn)
                .optional()?
                .ok_or_else(foreign_key_violation)?;

            rbac_roles::table
                .find(role_id)
                .first::<RoleModel>(self.conn)
                .optional()?
                .ok_or_else(foreign_key_violation)?;

            insert_into(rbac_user_roles::table)
                .values(UserRoleModel {
                    user_id: user_id.to_string(),
                    role_id: role_id.to_string(),
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
