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

use crate::error::InvalidStateError;

use super::{PasswordEncryptionCost, User, MAX_USERNAME_LENGTH};

/// A builder to update existing users, constructed via
/// [`User::into_update_builder`].
///
/// The user's ID is fixed; all other values may be changed. The stored
/// password hash is kept unless a new password is provided.
pub struct UserUpdateBuilder {
    user_id: String,
    username: String,
    email: String,
    password: String,
    new_password: Option<String>,
    active: bool,
    display_name: Option<String>,
    avatar: Option<String>,
    password_encryption_cost: Option<PasswordEncryptionCost>,
}

impl UserUpdateBuilder {
    pub(super) fn from_user(user: User) -> Self {
        Self {
            user_id: user.user_id,
            username: user.username,
            email: user.email,
            password: user.password,
            new_password: None,
            active: user.active,
            display_name: user.display_name,
            avatar: user.avatar,
            password_encryption_cost: None,
        }
    }

    /// Sets an updated username.
    pub fn with_username(mut self, username: String) -> Self {
        self.username = username;
        self
    }

    /// Sets an updated email address.
    pub fn with_email(mut self, email: String) -> Self {
        self.email = email;
        self
    }

    /// Sets a new password. The password is hashed on build, replacing the
    /// stored hash.
    pub fn with_password(mut self, password: String) -> Self {
        self.new_password = Some(password);
        self
    }

    /// Sets whether the user is active.
    pub fn with_active(mut self, active: bool) -> Self {
        self.active = active;
        self
    }

    /// Sets an updated display name.
    pub fn with_display_name(mut self, display_name: String) -> Self {
        self.display_name = Some(display_name);
        self
    }

    /// Sets an updated avatar reference.
    pub fn with_avatar(mut self, avatar: String) -> Self {
        self.avatar = Some(avatar);
        self
    }

    /// Sets the cost used to hash the new password, default is high. Has no
    /// effect unless a new password was provided.
    pub fn with_password_encryption_cost(mut self, cost: PasswordEncryptionCost) -> Self {
        self.password_encryption_cost = Some(cost);
        self
    }

    /// Builds the updated User.
    ///
    /// # Errors
    ///
    /// Returns an [`InvalidStateError`] under the same conditions as
    /// [`UserBuilder::build`](super::UserBuilder::build).
    pub fn build(self) -> Result<User, InvalidStateError> {
        if self.username.is_empty() {
            return Err(InvalidStateError::with_message(
                "A user requires a non-empty username field".into(),
            ));
        }
        if self.username.len() > MAX_USERNAME_LENGTH {
            return Err(InvalidStateError::with_message(format!(
                "A username must be at most {} characters",
                MAX_USERNAME_LENGTH
            )));
        }
        if self.email.is_empty() {
            return Err(InvalidStateError::with_message(
                "A user requires a non-empty email field".into(),
            ));
        }

        let password = match self.new_password {
            Some(new_password) => {
                if new_password.is_empty() {
                    return Err(InvalidStateError::with_message(
                        "A user requires a non-empty password field".into(),
                    ));
                }
                let cost = self
                    .password_encryption_cost
                    .unwrap_or(PasswordEncryptionCost::High);
                hash(new_password, cost.to_value()).map_err(|err| {
                    InvalidStateError::with_message(format!("Unable to hash password: {}", err))
                })?
            }
            None => self.password,
        };

        Ok(User {
            user_id: self.user_id,
            username: self.username,
            email: self.email,
            password,
            active: self.active,
            display_name: self.display_name,
            avatar: self.avatar,
        })
    }
}
