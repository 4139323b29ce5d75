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
        models::ResourceModel,
        schema::{rbac_permissions, rbac_resources},
    },
    RbacStoreError,
};

use super::RbacStoreOperations;

pub trait RbacStoreRemoveResource {
    fn remove_resource(&self, resource_id: &str) -> Result<(), RbacStoreError>;
}

#[cfg(feature = "sqlite")]
impl<'a> RbacStoreRemoveResource for RbacStoreOperations<'a, diesel::sqlite::SqliteConnection> {
    fn remove_resource(&self, resource_id: &str) -> Result<(), RbacStoreError> {
        self.conn.transaction::<_, _, _>(|| {
            rbac_resources::table
                .find(resource_id)
                .first::<ResourceModel>(self.conn)
                .optional()?
                .ok_or_else(|| {
                    RbacStoreError::InvalidState(InvalidStateError::with_message(format!(
                        "Resource with ID {} not found",
                        resource_id
                    )))
                })?;

            let referencing: i64 = rbac_permissions::table
                .filter(rbac_permissions::resource_id.eq(resource_id))
                .count()
                .get_result(self.conn)?;

            if referencing > 0 {
                return Err(RbacStoreError::ConstraintViolation(
                    ConstraintViolationError::with_violation_type(
                        ConstraintViolationType::ForeignKey,
                    ),
                ));
            }

            delete(rbac_resources::table.find(resource_id)).execute(self.conn)?;

            Ok(())
        })
    }
}

#[cfg(feature = "postgres")]
impl<'a> RbacStoreRemoveResource for RbacStoreOperations<'a, diesel::pg::PgConnection> {
    fn remove_resource(&self, resource_id: &str) -> Result<(), RbacStoreError> {
        self.conn.transaction::<_, _, _>(|| {
            rbac_resources::table
                .find(resource_id)
                .first::<ResourceModel>(self.conn)
                .optional()?
                .ok_or_else(|| {
                    RbacStoreError::InvalidState(InvalidStateError::with_message(format!(
                        "Resource with ID {} not found",
                        resource_id
                    )))
                })?;

            let referencing: i64 = rbac_permissions::table
                .filter(rbac_permissions::resource_id.eq(resource_id))
                .count()
                .get_result(self.conn)?;

            if referencing > 0 {
                return Err(RbacStoreError::ConstraintViolation(
                    ConstraintViolationError::with_violation_type(
                        ConstraintViolationType::ForeignKey,
                    ),
                ));
            }

            delete(rbac_resources::table.find(resource_id)).execute(self.conn)?;

            Ok(())
        })
    }
}
