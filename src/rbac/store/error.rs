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

use crate::error::{ConstraintViolationError, InternalError, InvalidStateError};

/// Represents errors raised while operating on an RBAC store.
#[derive(Debug)]
pub enum RbacStoreError {
    InternalError(InternalError),
    InvalidState(InvalidStateError),
    ConstraintViolation(ConstraintViolationError),
}

impl fmt::Display for RbacStoreError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            RbacStoreError::InternalError(err) => err.fmt(f),
            RbacStoreError::InvalidState(err) => err.fmt(f),
            RbacStoreError::ConstraintViolation(err) => err.fmt(f),
        }
    }
}

impl Error for RbacStoreError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            RbacStoreError::InternalError(err) => Some(err),
            RbacStoreError::InvalidState(err) => Some(err),
            RbacStoreError::ConstraintViolation(err) => Some(err),
        }
    }
}

impl From<InternalError> for RbacStoreError {
    fn from(err: InternalError) -> Self {
        RbacStoreError::InternalError(err)
    }
}

impl From<InvalidStateError> for RbacStoreError {
    fn from(err: InvalidStateError) -> Self {
        RbacStoreError::InvalidState(err)
    }
}

impl From<ConstraintViolationError> for RbacStoreError {
    fn from(err: ConstraintViolationError) -> Self {
        RbacStoreError::ConstraintViolation(err)
    }
}
