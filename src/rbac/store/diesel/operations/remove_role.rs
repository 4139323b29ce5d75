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

use crate::error::{ConstraintViolationError, ConstraintViolationType, InvalidStateError};
use crate::rbac::store::{
    diesel::{
        models::RoleModel,
        schema::{rbac_role_permissions, rbac_roles, rbac_user_roles},
    },
    RbacStoreError,
};

use super::RbacStoreOperations;

pub trait RbacStoreRemoveRole {
    fn remove_role(&self, role_id: &str) -> Result<(), RbacStoreError>;
}

#[cfg(feature = "sqlite")]
impl<'a> RbacStoreRemoveRole for RbacStoreOperations<'a, diesel::sqlite::SqliteConnection> {
    fn remove_role(&self, role_id: &str) -> Result<(), RbacStoreError> {
        self.conn.transaction::<_, _, _>(|| {
            rbac_roles::table
                .find(role_id)
                .first::<RoleModel>(self.conn)
                .optional()?
                .ok_or_else(|| {
                    RbacStoreError::InvalidState(InvalidStateError::with_message(format!(
                        "Role with ID {} not found",
                        role_id
                    )))
                })?;

            let assigned: i64 = rbac_user_roles::table
                .filter(rbac_user_roles::role_id.eq(role_id))
                .count()
                .get_result(self.conn)?;

            if assigned > 0 {
                return Err(RbacStoreError::ConstraintViolation(
                    ConstraintViolationError::with_violation_type(
                        ConstraintViolationType::ForeignKey,
                    ),
                ));
            }

            delete(
                rbac_role_permissions::table.filter(rbac_role_permissions::role_id.eq(role_id)),
            )
            .execute(self.conn)?;

            delete(rbac_roles::table.find(role_id)).execute(self.conn)?;

            Ok(())
        })
    }
}

#[cfg(feature = "postgres")]
impl<'a> RbacStoreRemoveRole for RbacStoreOperations<'a, diesel::pg::PgConnection> {
    fn remove_role(&self, role_id: &str) -> Result<(), RbacStoreError> {
        self.conn.transaction::<_, _, _>(|| {
            rbac_roles::table
                .find(role_id)
                .first::<RoleModel>(self.conn)
                .optional()?
                .ok_or_else(|| {
                    RbacStoreError::InvalidState(InvalidStateError::with_message(format!(
                        "Role with ID {} not found",
                        role_id
                    )))
                })?;

            let assigned: i64 = rbac_user_roles::table
                .filter(rbac_user_roles::role_id.eq(role_id))
                .count()
                .get_result(self.conn)?;

            if assigned > 0 {
                return Err(RbacStoreError::ConstraintViolation(
                    ConstraintViolationError::with_violation_type(
                        ConstraintViolationType::ForeignKey,
                    ),
                ));
            }

            delete(
                rbac_role_permissions::table.filter(rbac_role_permissions::role_id.eq(role_id)),
            )
            .execute(self.conn)?;

            delete(rbac_roles::table.find(role_id)).execute(self.conn)?;

            Ok(())
        })
    }
}
