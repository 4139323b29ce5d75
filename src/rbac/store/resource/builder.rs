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

use super::{Resource, MAX_RESOURCE_NAME_LENGTH};

/// A builder to create new resources.
#[derive(Default)]
pub struct ResourceBuilder {
    resource_id: Option<String>,
    name: Option<String>,
}

impl ResourceBuilder {
    /// Constructs a new builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the ID for the new resource. If no ID is provided, a random UUID
    /// is assigned on build.
    pub fn with_resource_id(mut self, resource_id: String) -> Self {
        self.resource_id = Some(resource_id);
        self
    }

    /// Sets the name for the new resource.
    pub fn with_name(mut self, name: String) -> Self {
        self.name = Some(name);
        self
    }

    /// Builds the new Resource.
    ///
    /// # Errors
    ///
    /// Returns an [`InvalidStateError`] under the following conditions:
    /// * no name or an empty name was provided
    /// * the name is longer than 64 characters
    pub fn build(self) -> Result<Resource, InvalidStateError> {
        let name = self.name.ok_or_else(|| {
            InvalidStateError::with_message("A resource requires a name field".into())
        })?;
        if name.is_empty() {
            return Err(InvalidStateError::with_message(
                "A resource requires a non-empty name field".into(),
            ));
        }
        if name.len() > MAX_RESOURCE_NAME_LENGTH {
            return Err(InvalidStateError::with_message(format!(
                "A resource name must be at most {} characters",
                MAX_RESOURCE_NAME_LENGTH
            )));
        }

        Ok(Resource {
            resource_id: self
                .resource_id
                .unwrap_or_else(|| Uuid::new_v4().to_string()),
            name,
        })
    }
}
