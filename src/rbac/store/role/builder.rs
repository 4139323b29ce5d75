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

use uuid::Uuid;

use crate::error::InvalidStateError;

use super::{Role, MAX_ROLE_NAME_LENGTH};

/// A builder to create new roles.
#[derive(Default)]
pub struct RoleBuilder {
    role_id: Option<String>,
    name: Option<String>,
    description: Option<String>,
}

impl RoleBuilder {
    /// Constructs a new builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the ID for the new role. If no ID is provided, a random UUID is
    /// assigned on build.
    pub fn with_role_id(mut self, role_id: String) -> Self {
        self.role_id = Some(role_id);
        self
    }

    /// Sets the name for the new role.
    pub fn with_name(mut self, name: String) -> Self {
        self.name = Some(name);
        self
    }

    /// Sets the description for the new role.
    pub fn with_description(mut self, description: String) -> Self {
        self.description = Some(description);
        self
    }

    /// Builds the new Role.
    ///
    /// # Errors
    ///
    /// Returns an [`InvalidStateError`] under the following conditions:
    /// * no name or an empty name was provided
    /// * the name is longer than 64 characters
    pub fn build(self) -> Result<Role, InvalidStateError> {
        let name = self
            .name
            .ok_or_else(|| InvalidStateError::with_message("A role requires a name field".into()))?;
        if name.is_empty() {
            return Err(InvalidStateError::with_message(
                "A role requires a non-empty name field".into(),
            ));
        }
        if name.len() > MAX_ROLE_NAME_LENGTH {
            return Err(InvalidStateError::with_message(format!(
                "A role name must be at most {} characters",
                MAX_ROLE_NAME_LENGTH
            )));
        }

        Ok(Role {
            role_id: self
                .role_id
                .unwrap_or_else(|| Uuid::new_v4().to_string()),
            name,
            description: self.description.unwrap_or_default(),
        })
    }
}
