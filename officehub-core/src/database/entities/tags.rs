use sea_orm::entity::prelude::*;
use sea_orm::Set;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::state::{EntityState, LifecycleEntity};
use crate::errors::EntityResult;
use crate::services::field_updater::{state_value, text_value, UpdatableFields};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "tags")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub name: String,
    pub color: String,
    pub description: String,
    pub state: EntityState,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

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
            "name" => self.name = Set(text_value(field, value)?),
            "color" => self.color = Set(text_value(field, value)?),
            "description" => self.description = Set(text_value(field, value)?),
            "state" => self.state = Set(state_value(field, value)?),
            _ => return Ok(false),
        }
        Ok(true)
    }
}
