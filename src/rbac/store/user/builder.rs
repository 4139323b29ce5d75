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

use bcrypt::hash;
use uuid::Uuid;

use crate::error::InvalidStateError;

use super::{PasswordEncryptionCost, User, MAX_USERNAME_LENGTH};

/// A builder to create new users. It hashes the password upon build.
#[derive(Default)]
pub struct UserBuilder {
    user_id: Option<String>,
    username: Option<String>,
    email: Option<String>,
    password: Option<String>,
    active: Option<bool>,
    display_name: Option<String>,
    avatar: Option<String>,
    password_encryption_cost: Option<PasswordEncryptionCost>,
}

impl UserBuilder {
    /// Constructs a new builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the ID for the new user. If no ID is provided, a random UUID is
    /// assigned on build.
    pub fn with_user_id(mut self, user_id: String) -> Self {
        self.user_id = Some(user_id);
        self
    }

    /// Sets the username for the new user.
    pub fn with_username(mut self, username: String) -> Self {
        self.username = Some(username);
        self
    }

    /// Sets the email address for the new user.
    pub fn with_email(mut self, email: String) -> Self {
        self.email = Some(email);
        self
    }

    /// Sets the password for the new user. The password is hashed on build;
    /// the plaintext is not retained.
    pub fn with_password(mut self, password: String) -> Self {
        self.password = Some(password);
        self
    }

    /// Sets whether the new user is active. Defaults to true.
    pub fn with_active(mut self, active: bool) -> Self {
        self.active = Some(active);
        self
    }

    /// Sets the display name for the new user.
    pub fn with_display_name(mut self, display_name: String) -> Self {
        self.display_name = Some(display_name);
        self
    }

    /// Sets the avatar reference for the new user.
    pub fn with_avatar(mut self, avatar: String) -> Self {
        self.avatar = Some(avatar);
        self
    }

    /// Sets the cost used to hash the new user's password, default is high.
    pub fn with_password_encryption_cost(mut self, cost: PasswordEncryptionCost) -> Self {
        self.password_encryption_cost = Some(cost);
        self
    }

    /// Builds the new User.
    ///
    /// # Errors
    ///
    /// Returns an [`InvalidStateError`] under the following conditions:
    /// * no username or an empty username was provided
    /// * the username is longer than 64 characters
    /// * no email or an empty email was provided
    /// * no password or an empty password was provided
    pub fn build(self) -> Result<User, InvalidStateError> {
        let username = self.username.ok_or_else(|| {
            InvalidStateError::with_message("A user requires a username field".into())
        })?;
        if username.is_empty() {
            return Err(InvalidStateError::with_message(
                "A user requires a non-empty username field".into(),
            ));
        }
        if username.len() > MAX_USERNAME_LENGTH {
            return Err(InvalidStateError::with_message(format!(
                "A username must be at most {} characters",
                MAX_USERNAME_LENGTH
            )));
        }

        let email = self
            .email
            .ok_or_else(|| InvalidStateError::with_message("A user requires an email field".into()))?;
        if email.is_empty() {
            return Err(InvalidStateError::with_message(
                "A user requires a non-empty email field".into(),
            ));
        }

        let password = self.password.ok_or_else(|| {
            InvalidStateError::with_message("A user requires a password field".into())
        })?;
        if password.is_empty() {
            return Err(InvalidStateError::with_message(
                "A user requires a non-empty password field".into(),
            ));
        }

        let cost = self
            .password_encryption_cost
            .unwrap_or(PasswordEncryptionCost::High);

        let hashed_password = hash(password, cost.to_value()).map_err(|err| {
            InvalidStateError::with_message(format!("Unable to hash password: {}", err))
        })?;

        Ok(User {
            user_id: self
                .user_id
                .unwrap_or_else(|| Uuid::new_v4().to_string()),
            username,
            email,
            password: hashed_password,
            active: self.active.unwrap_or(true),
            display_name: self.display_name,
            avatar: self.avatar,
        })
    }
}
