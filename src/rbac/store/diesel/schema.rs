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

table! {
    rbac_users (id) {
        id -> Text,
        username -> Text,
        email -> Text,
        password -> Text,
        active -> Bool,
        display_name -> Nullable<Text>,
        avatar -> Nullable<Text>,
    }
}

table! {
    rbac_roles (id) {
        id -> Text,
        name -> Text,
        description -> Text,
    }
}

table! {
    rbac_resources (id) {
        id -> Text,
        name -> Text,
    }
}

table! {
    rbac_permissions (id) {
        id -> Text,
        action ->
            // the macro output can't find this type if it isn't fully qualified.
            crate::rbac::store::diesel::models::ActionModelMapping,
        resource_id -> Text,
    }
}

table! {
    rbac_user_roles (user_id, role_id) {
        user_id -> Text,
        role_id -> Text,
    }
}

table! {
    rbac_role_permissions (role_id, permission_id) {
        role_id -> Text,
        permission_id -> Text,
    }
}

joinable!(rbac_permissions -> rbac_resources (resource_id));
joinable!(rbac_user_roles -> rbac_users (user_id));
joinable!(rbac_user_roles -> rbac_roles (role_id));
joinable!(rbac_role_permissions -> rbac_roles (role_id));
joinable!(rbac_role_permissions -> rbac_permissions (permission_id));

allow_tables_to_appear_in_same_query!(
    rbac_users,
    rbac_roles,
    rbac_resources,
    rbac_permissions,
    rbac_user_roles,
    rbac_role_permissions,
);
