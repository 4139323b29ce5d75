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

mod builder;
mod update_builder;

pub use builder::RoleBuilder;
pub use update_builder::RoleUpdateBuilder;

pub(in crate::rbac) const MAX_ROLE_NAME_LENGTH: usize = 64;

/// A Role is a named bundle of permissions, assignable to users.
#[derive(Clone)]
pub struct Role {
    pub(in crate::rbac) role_id: String,
    pub(in crate::rbac) name: String,
    pub(in crate::rbac) description: String,
}

impl Role {
    /// Returns the role's unique ID.
    pub fn role_id(&self) -> &str {
        &self.role_id
    }

    /// Returns the role's name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the role's description.
    pub fn description(&self) -> &str {
        &self.description
    }

    /// Convert this role back into a builder, in order to update its values.
    pub fn into_update_builder(self) -> RoleUpdateBuilder {
        RoleUpdateBuilder::new(self.role_id)
            .with_name(self.name)
            .with_description(self.description)
    }

    /// Converts this role into its constituent parts. These parts are in the
    /// tuple: `(role_id, name, description)`.
    pub fn into_parts(self) -> (String, String, String) {
        (self.role_id, self.name, self.description)
    }
}
