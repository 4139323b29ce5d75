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

pub use builder::ResourceBuilder;

pub(in crate::rbac) const MAX_RESOURCE_NAME_LENGTH: usize = 64;

/// A Resource is a named protected noun that actions apply to.
#[derive(Clone)]
pub struct Resource {
    pub(in crate::rbac) resource_id: String,
    pub(in crate::rbac) name: String,
}

impl Resource {
    /// Returns the resource's unique ID.
    pub fn resource_id(&self) -> &str {
        &self.resource_id
    }

    /// Returns the resource's name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Converts this resource into its constituent parts. These parts are in
    /// the tuple: `(resource_id, name)`.
    pub fn into_parts(self) -> (String, String) {
        (self.resource_id, self.name)
    }
}
