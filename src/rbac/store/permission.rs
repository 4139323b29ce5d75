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

use super::Action;

/// A Permission is a concrete grant of one action on one resource.
///
/// Permission rows are created and reused by the store when grants are
/// attached to roles; at most one permission exists for any
/// `(action, resource)` pair.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Permission {
    pub(in crate::rbac) permission_id: String,
    pub(in crate::rbac) action: Action,
    pub(in crate::rbac) resource_id: String,
}

impl Permission {
    /// Returns the permission's unique ID.
    pub fn permission_id(&self) -> &str {
        &self.permission_id
    }

    /// Returns the action this permission governs.
    pub fn action(&self) -> Action {
        self.action
    }

    /// Returns the ID of the resource this permission applies to.
    pub fn resource_id(&self) -> &str {
        &self.resource_id
    }
}
