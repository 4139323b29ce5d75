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

use std::error;
use std::fmt;

/// The type of constraint that was violated.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ConstraintViolationType {
    /// A unique constraint such as a primary key or unique index.
    Unique,
    /// A foreign key constraint, including application-enforced referential
    /// guards.
    ForeignKey,
    /// The target of the operation does not exist.
    NotFound,
}

impl fmt::Display for ConstraintViolationType {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            ConstraintViolationType::Unique => f.write_str("Unique"),
            ConstraintViolationType::ForeignKey => f.write_str("ForeignKey"),
            ConstraintViolationType::NotFound => f.write_str("NotFound"),
        }
    }
}

/// An error returned when an operation would violate a constraint on the
/// underlying data, such as a uniqueness or referential integrity rule.
pub struct ConstraintViolationError {
    violation_type: ConstraintViolationType,
    source: Option<Box<dyn error::Error>>,
}

impl ConstraintViolationError {
    /// Constructs a new `ConstraintViolationError` from a violation type.
    pub fn with_violation_type(violation_type: ConstraintViolationType) -> Self {
        Self {
            violation_type,
            source: None,
        }
    }

    /// Constructs a new `ConstraintViolationError` from a violation type and
    /// a source error.
    pub fn from_source_with_violation_type(
        violation_type: ConstraintViolationType,
        source: Box<dyn error::Error>,
    ) -> Self {
        Self {
            violation_type,
            source: Some(source),
        }
    }

    /// Returns the type of constraint that was violated.
    pub fn violation_type(&self) -> &ConstraintViolationType {
        &self.violation_type
    }
}

impl error::Error for ConstraintViolationError {
    fn source(&self) -> Option<&(dyn error::Error + 'static)> {
        self.source.as_ref().map(|source| source.as_ref())
    }
}

impl fmt::Display for ConstraintViolationError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match &self.source {
            Some(source) => write!(f, "{}", source),
            None => match self.violation_type {
                ConstraintViolationType::Unique => f.write_str("Unique constraint violated"),
                ConstraintViolationType::ForeignKey => {
                    f.write_str("Foreign key constraint violated")
                }
                ConstraintViolationType::NotFound => {
                    f.write_str("Target of the operation was not found")
                }
            },
        }
    }
}

impl fmt::Debug for ConstraintViolationError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_struct("ConstraintViolationError")
            .field("violation_type", &self.violation_type)
            .field("source", &self.source.as_ref().map(|source| source.to_string()))
            .finish()
    }
}
