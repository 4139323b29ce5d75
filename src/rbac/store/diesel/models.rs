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

use std::io::Write;

use diesel::{
    backend::Backend,
    deserialize::FromSqlRow,
    expression::{bound::Bound, AsExpression},
    query_builder::QueryId,
    serialize::{self, IsNull, Output, ToSql},
    sql_types::{HasSqlType, NotNull, Nullable, SingleValue},
    Queryable,
};

#[cfg(any(feature = "postgres", feature = "sqlite"))]
use diesel::{
    deserialize::{self, FromSql},
    row::Row,
};

#[cfg(feature = "postgres")]
use diesel::pg::Pg;
#[cfg(feature = "sqlite")]
use diesel::sqlite::Sqlite;

use crate::rbac::store::{Action, Permission, Resource, Role, User};

use super::schema::{
    rbac_permissions, rbac_resources, rbac_role_permissions, rbac_roles, rbac_user_roles,
    rbac_users,
};

#[derive(Debug, PartialEq, Associations, Identifiable, Insertable, Queryable)]
#[table_name = "rbac_users"]
#[primary_key(id)]
pub(super) struct UserModel {
    pub id: String,
    pub username: String,
    pub email: String,
    pub password: String,
    pub active: bool,
    pub display_name: Option<String>,
    pub avatar: Option<String>,
}

#[derive(Debug, PartialEq, Associations, Identifiable, Insertable, Queryable)]
#[table_name = "rbac_roles"]
#[primary_key(id)]
pub(super) struct RoleModel {
    pub id: String,
    pub name: String,
    pub description: String,
}

#[derive(Debug, PartialEq, Associations, Identifiable, Insertable, Queryable)]
#[table_name = "rbac_resources"]
#[primary_key(id)]
pub(super) struct ResourceModel {
    pub id: String,
    pub name: String,
}

#[derive(Debug, PartialEq, Associations, Identifiable, Insertable, Queryable)]
#[table_name = "rbac_permissions"]
#[belongs_to(ResourceModel, foreign_key = "resource_id")]
#[primary_key(id)]
pub(super) struct PermissionModel {
    pub id: String,
    pub action: ActionModel,
    pub resource_id: String,
}

#[derive(Debug, PartialEq, Associations, Identifiable, Insertable, Queryable)]
#[table_name = "rbac_user_roles"]
#[belongs_to(UserModel, foreign_key = "user_id")]
#[belongs_to(RoleModel, foreign_key = "role_id")]
#[primary_key(user_id, role_id)]
pub(super) struct UserRoleModel {
    pub user_id: String,
    pub role_id: String,
}

#[derive(Debug, PartialEq, Associations, Identifiable, Insertable, Queryable)]
#[table_name = "rbac_role_permissions"]
#[belongs_to(RoleModel, foreign_key = "role_id")]
#[belongs_to(PermissionModel, foreign_key = "permission_id")]
#[primary_key(role_id, permission_id)]
pub(super) struct RolePermissionModel {
    pub role_id: String,
    pub permission_id: String,
}

#[derive(Debug, Copy, Clone, PartialEq)]
pub(super) enum ActionModel {
    Create,
    Read,
    Update,
    Delete,
}

// This has to be pub, due to its use in the table macro execution for
// PermissionModel
pub struct ActionModelMapping;

impl QueryId for ActionModelMapping {
    type QueryId = ActionModelMapping;
    const HAS_STATIC_QUERY_ID: bool = true;
}

impl NotNull for ActionModelMapping {}

impl SingleValue for ActionModelMapping {}

impl AsExpression<ActionModelMapping> for ActionModel {
    type Expression = Bound<ActionModelMapping, Self>;

    fn as_expression(self) -> Self::Expression {
        Bound::new(self)
    }
}

impl AsExpression<Nullable<ActionModelMapping>> for ActionModel {
    type Expression = Bound<Nullable<ActionModelMapping>, Self>;

    fn as_expression(self) -> Self::Expression {
        Bound::new(self)
    }
}

impl<'a> AsExpression<ActionModelMapping> for &'a ActionModel {
    type Expression = Bound<ActionModelMapping, Self>;

    fn as_expression(self) -> Self::Expression {
        Bound::new(self)
    }
}

impl<'a> AsExpression<Nullable<ActionModelMapping>> for &'a ActionModel {
    type Expression = Bound<Nullable<ActionModelMapping>, Self>;

    fn as_expression(self) -> Self::Expression {
        Bound::new(self)
    }
}

impl<'a, 'b> AsExpression<ActionModelMapping> for &'a &'b ActionModel {
    type Expression = Bound<ActionModelMapping, Self>;

    fn as_expression(self) -> Self::Expression {
        Bound::new(self)
    }
}

impl<'a, 'b> AsExpression<Nullable<ActionModelMapping>> for &'a &'b ActionModel {
    type Expression = Bound<Nullable<ActionModelMapping>, Self>;

    fn as_expression(self) -> Self::Expression {
        Bound::new(self)
    }
}

impl<DB: Backend> ToSql<ActionModelMapping, DB> for ActionModel {
    fn to_sql<W: Write>(&self, out: &mut Output<W, DB>) -> serialize::Result {
        match self {
            ActionModel::Create => out.write_all(b"create")?,
            ActionModel::Read => out.write_all(b"read")?,
            ActionModel::Update => out.write_all(b"update")?,
            ActionModel::Delete => out.write_all(b"delete")?,
        }
        Ok(IsNull::No)
    }
}

impl<DB> ToSql<Nullable<ActionModelMapping>, DB> for ActionModel
where
    DB: Backend,
    Self: ToSql<ActionModelMapping, DB>,
{
    fn to_sql<W: ::std::io::Write>(&self, out: &mut Output<W, DB>) -> serialize::Result {
        ToSql::<ActionModelMapping, DB>::to_sql(self, out)
    }
}

impl<DB> Queryable<ActionModelMapping, DB> for ActionModel
where
    DB: Backend + HasSqlType<ActionModelMapping>,
    ActionModel: FromSql<ActionModelMapping, DB>,
{
    type Row = Self;

    fn build(row: Self::Row) -> Self {
        row
    }
}

impl<DB> FromSqlRow<ActionModelMapping, DB> for ActionModel
where
    DB: Backend,
    ActionModel: FromSql<ActionModelMapping, DB>,
{
    fn build_from_row<T: Row<DB>>(row: &mut T) -> deserialize::Result<Self> {
        FromSql::<ActionModelMapping, DB>::from_sql(row.take())
    }
}

#[cfg(feature = "postgres")]
impl FromSql<ActionModelMapping, Pg> for ActionModel {
    fn from_sql(bytes: Option<&<Pg as Backend>::RawValue>) -> deserialize::Result<Self> {
        match bytes {
            Some(b"create") => Ok(ActionModel::Create),
            Some(b"read") => Ok(ActionModel::Read),
            Some(b"update") => Ok(ActionModel::Update),
            Some(b"delete") => Ok(ActionModel::Delete),
            Some(v) => Err(format!(
                "Unrecognized enum variant: '{}'",
                String::from_utf8_lossy(v)
            )
            .into()),
            None => Err("Unexpected null for non-null column".into()),
        }
    }
}

#[cfg(feature = "postgres")]
impl HasSqlType<ActionModelMapping> for Pg {
    fn metadata(lookup: &Self::MetadataLookup) -> Self::TypeMetadata {
        lookup.lookup_type("rbac_action")
    }
}

#[cfg(feature = "sqlite")]
impl FromSql<ActionModelMapping, Sqlite> for ActionModel {
    fn from_sql(bytes: Option<&<Sqlite as Backend>::RawValue>) -> deserialize::Result<Self> {
        match bytes.map(|v| v.read_blob()) {
            Some(b"create") => Ok(ActionModel::Create),
            Some(b"read") => Ok(ActionModel::Read),
            Some(b"update") => Ok(ActionModel::Update),
            Some(b"delete") => Ok(ActionModel::Delete),
            Some(blob) => {
                Err(format!("Unexpected variant: {}", String::from_utf8_lossy(blob)).into())
            }
            None => Err("Unexpected null for non-null column".into()),
        }
    }
}

#[cfg(feature = "sqlite")]
impl HasSqlType<ActionModelMapping> for Sqlite {
    fn metadata(_lookup: &Self::MetadataLookup) -> Self::TypeMetadata {
        diesel::sqlite::SqliteType::Text
    }
}

impl From<Action> for ActionModel {
    fn from(action: Action) -> Self {
        match action {
            Action::Create => ActionModel::Create,
            Action::Read => ActionModel::Read,
            Action::Update => ActionModel::Update,
            Action::Delete => ActionModel::Delete,
        }
    }
}

impl From<ActionModel> for Action {
    fn from(action: ActionModel) -> Self {
        match action {
            ActionModel::Create => Action::Create,
            ActionModel::Read => Action::Read,
            ActionModel::Update => Action::Update,
            ActionModel::Delete => Action::Delete,
        }
    }
}

impl From<User> for UserModel {
    fn from(user: User) -> Self {
        UserModel {
            id: user.user_id,
            username: user.username,
            email: user.email,
            password: user.password,
            active: user.active,
            display_name: user.display_name,
            avatar: user.avatar,
        }
    }
}

impl From<UserModel> for User {
    fn from(model: UserModel) -> Self {
        User {
            user_id: model.id,
            username: model.username,
            email: model.email,
            password: model.password,
            active: model.active,
            display_name: model.display_name,
            avatar: model.avatar,
        }
    }
}

impl From<Role> for RoleModel {
    fn from(role: Role) -> Self {
        RoleModel {
            id: role.role_id,
            name: role.name,
            description: role.description,
        }
    }
}

impl From<RoleModel> for Role {
    fn from(model: RoleModel) -> Self {
        Role {
            role_id: model.id,
            name: model.name,
            description: model.description,
        }
    }
}

impl From<Resource> for ResourceModel {
    fn from(resource: Resource) -> Self {
        ResourceModel {
            id: resource.resource_id,
            name: resource.name,
        }
    }
}

impl From<ResourceModel> for Resource {
    fn from(model: ResourceModel) -> Self {
        Resource {
            resource_id: model.id,
            name: model.name,
        }
    }
}

impl From<PermissionModel> for Permission {
    fn from(model: PermissionModel) -> Self {
        Permission {
            permission_id: model.id,
            action: model.action.into(),
            resource_id: model.resource_id,
        }
    }
}
