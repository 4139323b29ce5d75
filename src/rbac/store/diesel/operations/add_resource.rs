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
    diesel::{models::ResourceModel, schema::rbac_resources},
    RbacStoreError, Resource,
};

use super::RbacStoreOperations;

pub trait RbacStoreAddResource {
    fn add_resource(&self, resource: Resource) -> Result<(), RbacStoreError>;
}

#[cfg(feature = "sqlite")]
impl<'a> RbacStoreAddResource for RbacStoreOperations<'a, diesel::sqlite::SqliteConnection> {
    fn add_resource(&self, resource: Resource) -> Result<(), RbacStoreError> {
        let resource: ResourceModel = resource.into();

        insert_into(rbac_resources::table)
            .values(resource)
            .execute(self.conn)?;

        Ok(())
    }
}

#[cfg(feature = "postgres")]
impl<'a> RbacStoreAddResource for RbacStoreOperations<'a, diesel::pg::PgConnection> {
    fn add_resource(&self, resource: Resource) -> Result<(), RbacStoreError> {
        let resource: ResourceModel = resource.into();

        insert_into(rbac_resources::table)
            .values(resource)
            .execute(self.conn)?;

        Ok(())
    }
}
