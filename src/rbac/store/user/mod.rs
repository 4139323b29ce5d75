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

use std::str::FromStr;

use bcrypt::{verify, DEFAULT_COST};

use crate::error::InternalError;

pub use builder::UserBuilder;
pub use update_builder::UserUpdateBuilder;

pub(in crate::rbac) const MAX_USERNAME_LENGTH: usize = 64;

const MEDIUM_COST: u32 = 8;
const LOW_COST: u32 = 4;

/// A user that may be assigned roles.
///
/// The password is stored as a bcrypt hash and is not readable through this
/// type; it can only be checked via [`verify_password`](User::verify_password).
#[derive(Clone)]
pub struct User {
    pub(in crate::rbac) user_id: String,
    pub(in crate::rbac) username: String,
    pub(in crate::rbac) email: String,
    pub(in crate::rbac) password: String,
    pub(in crate::rbac) active: bool,
    pub(in crate::rbac) display_name: Option<String>,
    pub(in crate::rbac) avatar: Option<String>,
}

impl User {
    /// Returns the user's unique ID.
    pub fn user_id(&self) -> &str {
        &self.user_id
    }

    /// Returns the user's username.
    pub fn username(&self) -> &str {
        &self.username
    }

    /// Returns the user's email address.
    pub fn email(&self) -> &str {
        &self.email
    }

    /// Returns whether the user is active. Inactive users cannot log in and
    /// are the only users that may be removed from a store.
    pub fn active(&self) -> bool {
        self.active
    }

    /// Returns the user's display name, if one has been set.
    pub fn display_name(&self) -> Option<&str> {
        self.display_name.as_deref()
    }

    /// Returns the user's avatar reference, if one has been set.
    pub fn avatar(&self) -> Option<&str> {
        self.avatar.as_deref()
    }

    /// Verifies a password against the stored hash, returning true if it
    /// matches and false otherwise.
    pub fn verify_password(&self, password: &str) -> Result<bool, InternalError> {
        verify(password, &self.password).map_err(|err| InternalError::from_source(Box::new(err)))
    }

    /// Convert this user back into a builder, in order to update its values.
    ///
    /// The stored password hash is carried over unchanged unless a new
    /// password is provided to the update builder.
    pub fn into_update_builder(self) -> UserUpdateBuilder {
        UserUpdateBuilder::from_user(self)
    }
}

/// Cost to hash passwords with. The recommended value is High. Medium and Low
/// may be used for development and testing, where hashing and verifying
/// passwords will complete faster.
#[derive(Debug, Deserialize, Copy, Clone)]
pub enum PasswordEncryptionCost {
    High,
    Medium,
    Low,
}

impl FromStr for PasswordEncryptionCost {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_ref() {
            "high" => Ok(PasswordEncryptionCost::High),
            "medium" => Ok(PasswordEncryptionCost::Medium),
            "low" => Ok(PasswordEncryptionCost::Low),
            _ => Err(format!(
                "Invalid cost value {}, must be high, medium or low",
                s
            )),
        }
    }
}

impl PasswordEncryptionCost {
    pub(in crate::rbac) fn to_value(self) -> u32 {
        match self {
            PasswordEncryptionCost::High => DEFAULT_COST,
            PasswordEncryptionCost::Medium => MEDIUM_COST,
            PasswordEncryptionCost::Low => LOW_COST,
        }
    }
}
