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

use std::error::Error;
use std::fmt;

use crate::error::InternalError;
use crate::rbac::store::RbacStoreError;

/// Represents errors raised while evaluating an access decision.
///
/// A not-found error is distinct from a denied decision: a denied decision is
/// the normal `Ok(false)` outcome of a well-formed check, while not-found
/// means a named entity in the check does not exist. The variants are tagged
/// by the missing entity for diagnostics; callers guarding HTTP routes
/// typically collapse all of them into the same access-denied response.
#[derive(Debug)]
pub enum AccessEvaluationError {
    /// The named user does not exist.
    UserNotFound(String),
    /// The named role does not exist.
    RoleNotFound(String),
    /// The named resource does not exist.
    ResourceNotFound(String),
    /// An underlying store failure.
    Internal(InternalError),
}

impl fmt::Display for AccessEvaluationError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            AccessEvaluationError::UserNotFound(username) => {
                write!(f, "User '{}' not found", username)
            }
            AccessEvaluationError::RoleNotFound(name) => write!(f, "Role '{}' not found", name),
            AccessEvaluationError::ResourceNotFound(name) => {
                write!(f, "Resource '{}' not found", name)
            }
            AccessEvaluationError::Internal(err) => err.fmt(f),
        }
    }
}

impl Error for AccessEvaluationError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            AccessEvaluationError::Internal(err) => Some(err),
            _ => None,
        }
    }
}

impl From<RbacStoreError> for AccessEvaluationError {
    fn from(err: RbacStoreError) -> Self {
        AccessEvaluationError::Internal(InternalError::from_source(Box::new(err)))
    }
}
