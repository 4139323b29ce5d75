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

use crate::error::InvalidStateError;

use super::{Role, MAX_ROLE_NAME_LENGTH};

/// A builder to update existing roles. The role's ID is fixed.
pub struct RoleUpdateBuilder {
    role_id: String,
    name: Option<String>,
    description: Option<String>,
}

impl RoleUpdateBuilder {
    /// Constructs a new update builder for the role with the given ID.
    pub fn new(role_id: String) -> Self {
        Self {
            role_id,
            name: None,
            description: None,
        }
    }

    /// Sets the updated name for the role.
    pub fn with_name(mut self, name: String) -> Self {
        self.name = Some(name);
        self
    }

    /// Sets the updated description for the role.
    pub fn with_description(mut self, description: String) -> Self {
        self.description = Some(description);
        self
    }

    /// Builds the updated Role.
    ///
    /// # Errors
    ///
    /// Returns an [`InvalidStateError`] under the same conditions as
    /// [`RoleBuilder::build`](super::RoleBuilder::build).
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
            role_id: self.role_id,
            name,
            description: self.description.unwrap_or_default(),
        })
    }
}
