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
    diesel::{models::RoleModel, schema::rbac_roles},
    RbacStoreError, Role,
};

use super::RbacStoreOperations;

pub trait RbacStoreUpdateRole {
    fn update_role(&self, role: Role) -> Result<(), RbacStoreError>;
}

#[cfg(feature = "sqlite")]
impl<'a> RbacStoreUpdateRole for RbacStoreOperations<'a, diesel::sqlite::SqliteConnection> {
    fn update_role(&self, role: Role) -> Result<(), RbacStoreError> {
        let RoleModel {
            id,
            name,
            description,
        } = role.into();

        let updated = update(rbac_roles::table.find(&id))
            .set((
                rbac_roles::name.eq(name),
                rbac_roles::description.eq(description),
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
impl<'a> RbacStoreUpdateRole for RbacStoreOperations<'a, diesel::pg::PgConnection> {
    fn update_role(&self, role: Role) -> Result<(), RbacStoreError> {
        let RoleModel {
            id,
            name,
            description,
        } = role.into();

        let updated = update(rbac_roles::table.find(&id))
            .set((
                rbac_roles::name.eq(name),
                rbac_roles::description.eq(description),
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
