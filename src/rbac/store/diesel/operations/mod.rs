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

//! Provides RbacStoreOperations implemented for a diesel backend

pub(super) mod add_grant;
pub(super) mod add_resource;
pub(super) mod add_role;
pub(super) mod add_user;
pub(super) mod assign_role;
pub(super) mod get_assigned_roles;
pub(super) mod get_resource;
pub(super) mod get_role;
pub(super) mod get_user;
pub(super) mod list_resources;
pub(super) mod list_role_permissions;
pub(super) mod list_roles;
pub(super) mod list_users;
pub(super) mod remove_grant;
pub(super) mod remove_resource;
pub(super) mod remove_role;
pub(super) mod remove_user;
pub(super) mod role_has_permission;
pub(super) mod unassign_role;
pub(super) mod update_role;
pub(super) mod update_user;

pub(super) struct RbacStoreOperations<'a, C> {
    conn: &'a C,
}

impl<'a, C> RbacStoreOperations<'a, C>
where
    C: diesel::Connection,
{
    pub fn new(conn: &'a C) -> Self {
        RbacStoreOperations { conn }
    }
}
