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

//! Rolegate is a role-based access control library.
//!
//! It provides the data model for users, roles, resources and permissions,
//! store implementations for keeping that model in a database or in memory,
//! and an evaluator for answering the question "may this user perform this
//! action on this resource?".

#[macro_use]
extern crate log;
#[macro_use]
extern crate serde_derive;
#[macro_use]
#[cfg(feature = "diesel")]
extern crate diesel;
#[macro_use]
#[cfg(feature = "diesel")]
extern crate diesel_migrations;

pub mod error;
pub mod migrations;
pub mod rbac;
