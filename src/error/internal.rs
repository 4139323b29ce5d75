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

/// An error which is returned for reasons internal to the function.
///
/// This error is produced when a failure occurred within the function but the
/// failure is due to an internal implementation detail of the function. This
/// generally means that there is no specific information which can be
/// returned that would help the caller of the function recover or otherwise
/// take action.
pub struct InternalError {
    message: Option<String>,
    prefix: Option<String>,
    source: Option<Box<dyn error::Error>>,
}

impl InternalError {
    /// Constructs a new `InternalError` with a specified message string.
    ///
    /// The message should be a sentence or sentence fragment describing the
    /// error.
    pub fn with_message(message: String) -> Self {
        Self {
            message: Some(message),
            prefix: None,
            source: None,
        }
    }

    /// Constructs a new `InternalError` from a specified source error.
    pub fn from_source(source: Box<dyn error::Error>) -> Self {
        Self {
            message: None,
            prefix: None,
            source: Some(source),
        }
    }

    /// Constructs a new `InternalError` from a specified source error and
    /// message string.
    ///
    /// The implementation of `std::fmt::Display` for this error will be the
    /// message string; the source error will only be exposed via
    /// `std::error::Error::source`.
    pub fn from_source_with_message(source: Box<dyn error::Error>, message: String) -> Self {
        Self {
            message: Some(message),
            prefix: None,
            source: Some(source),
        }
    }

    /// Constructs a new `InternalError` from a specified source error and
    /// prefix string.
    ///
    /// The implementation of `std::fmt::Display` for this error will be the
    /// prefix and source error's display strings joined with `: `.
    pub fn from_source_with_prefix(source: Box<dyn error::Error>, prefix: String) -> Self {
        Self {
            message: None,
            prefix: Some(prefix),
            source: Some(source),
        }
    }

    /// Reduces the error to a string representation, consuming the error.
    pub fn reduce_to_string(self) -> String {
        match (self.message, self.source) {
            (Some(message), _) => message,
            (None, Some(source)) => match self.prefix {
                Some(prefix) => format!("{}: {}", prefix, source),
                None => source.to_string(),
            },
            (None, None) => "Internal error occurred".to_string(),
        }
    }
}

impl error::Error for InternalError {
    fn source(&self) -> Option<&(dyn error::Error + 'static)> {
        self.source.as_ref().map(|source| source.as_ref())
    }
}

impl fmt::Display for InternalError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match (&self.message, &self.source) {
            (Some(message), _) => write!(f, "{}", message),
            (None, Some(source)) => match &self.prefix {
                Some(prefix) => write!(f, "{}: {}", prefix, source),
                None => write!(f, "{}", source),
            },
            (None, None) => write!(f, "Internal error occurred"),
        }
    }
}

impl fmt::Debug for InternalError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_struct("InternalError")
            .field("message", &self.message)
            .field("prefix", &self.prefix)
            .field("source", &self.source.as_ref().map(|source| source.to_string()))
            .finish()
    }
}
