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
use crate::rbac::store::{diesel::schema::rbac_user_roles, RbacStoreError};

use super::RbacStoreOperations;

pub trait RbacStoreUnassignRole {
    fn unassign_role(&self, user_id: &str, role_id: &str) -> Result<(), RbacStoreError>;
}

#[cfg(feature = "sqlite")]
impl<'a> RbacStoreUnassignRole for RbacStoreOperations<'a, diesel::sqlite::SqliteConnection> {
    fn unassign_role(&self, user_id: &str, role_id: &str) -> Result<(), RbacStoreError> {
        let removed = delete(rbac_user_roles::table.find((user_id, role_id)))
            .execute(self.conn)?;

        if removed == 0 {
            return Err(RbacStoreError::InvalidState(
                InvalidStateError::with_message(format!(
                    "User {} is not assigned role {}",
                    user_id, role_id
                )),
            ));
        }

        Ok(())
    }
}

#[cfg(feature = "postgres")]
impl<'a> RbacStoreUnassignRole for RbacStoreOperations<'a, diesel::pg::PgConnection> {
    fn unassign_role(&self, user_id: &str, role_id: &str) -> Result<(), RbacStoreError> {
        let removed = delete(rbac_user_roles::table.find((user_id, role_id)))
            .execute(self.conn)?;

        if removed == 0 {
            return Err(RbacStoreError::InvalidState(
                InvalidStateError::with_message(format!(
                    "User {} is not assigned role {}",
                    user_id, role_id
                )),
            ));
        }

        Ok(())
    }
}
