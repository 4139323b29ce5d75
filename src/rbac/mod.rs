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

//! Role-based access control.
//!
//! The [`store`] module defines the RBAC data model (users, roles, resources
//! and permissions) and the [`RbacStore`](store::RbacStore) trait for keeping
//! it, along with database-backed and in-memory implementations. The
//! [`evaluator`] module makes access decisions against a store.

pub mod evaluator;
pub mod store;

pub use evaluator::{AccessEvaluationError, AccessEvaluator};
pub use store::{Action, Permission, RbacStore, RbacStoreError, Resource, Role, User};
