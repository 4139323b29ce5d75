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
    diesel::{models::ResourceModel, schema::rbac_resources},
    RbacStoreError, Resource,
};

use super::RbacStoreOperations;

pub trait RbacStoreGetResource {
    fn get_resource_by_name(&self, name: &str) -> Result<Option<Resource>, RbacStoreError>;
}

impl<'a, C> RbacStoreGetResource for RbacStoreOperations<'a, C>
where
    C: diesel::Connection,
    String: diesel::deserialize::FromSql<diesel::sql_types::Text, C::Backend>,
{
    fn get_resource_by_name(&self, name: &str) -> Result<Option<Resource>, RbacStoreError> {
        rbac_resources::table
            .filter(rbac_resources::name.eq(name))
            .first::<ResourceModel>(self.conn)
            .optional()
            .map(|resource| resource.map(Resource::from))
            .map_err(RbacStoreError::from)
    }
}
