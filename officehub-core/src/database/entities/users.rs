use sea_orm::entity::prelude::*;
use sea_orm::Set;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::state::{EntityState, LifecycleEntity};
use crate::errors::EntityResult;
use crate::services::field_updater::{optional_text_value, state_value, text_value, UpdatableFields};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "users")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    #[sea_orm(unique)]
    pub email: String,
    pub name: String,
    pub location: Option<String>,
    pub picture: Option<String>,
    pub state: EntityState,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::user_sessions::Entity")]
    UserSessions,
    #[sea_orm(has_many = "super::users_roles::Entity")]
    UsersRoles,
}

impl Related<super::user_sessions::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::UserSessions.def()
    }
}

impl Related<super::roles::Entity> for Entity {
    fn to() -> RelationDef {
        super::users_roles::Relation::Roles.def()
    }

    fn via() -> Option<RelationDef> {
        Some(super::users_roles::Relation::Users.def().rev())
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl LifecycleEntity for Entity {
    fn state_column() -> Column {
        Column::State
    }

    fn sort_column() -> Column {
        Column::Name
    }
}

impl UpdatableFields for ActiveModel {
    fn apply_field(&mut self, field: &str, value: &Value) -> EntityResult<bool> {
        match field {
            "email" => self.email = Set(text_value(field, value)?),
            "name" => self.name = Set(text_value(field, value)?),
            "location" => self.location = Set(optional_text_value(field, value)?),
            "picture" => self.picture = Set(optional_text_value(field, value)?),
            "state" => self.state = Set(state_value(field, value)?),
            _ => return Ok(false),
        }
        Ok(true)
    }
}
