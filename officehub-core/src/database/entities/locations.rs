use sea_orm::entity::prelude::*;
use sea_orm::Set;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::state::{EntityState, LifecycleEntity};
use crate::errors::EntityResult;
use crate::services::field_updater::{optional_text_value, state_value, text_value, UpdatableFields};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "locations")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub name: String,
    pub abbreviation: String,
    pub country: String,
    pub image_url: Option<String>,
    pub time_zone: String,
    pub state: EntityState,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::offices::Entity")]
    Offices,
    #[sea_orm(has_many = "super::rooms::Entity")]
    Rooms,
}

impl Related<super::offices::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Offices.def()
    }
}

impl Related<super::rooms::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Rooms.def()
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
            "name" => self.name = Set(text_value(field, value)?),
            "abbreviation" => self.abbreviation = Set(text_value(field, value)?),
            "country" => self.country = Set(text_value(field, value)?),
            "image_url" => self.image_url = Set(optional_text_value(field, value)?),
            "time_zone" => self.time_zone = Set(text_value(field, value)?),
            "state" => self.state = Set(state_value(field, value)?),
            _ => return Ok(false),
        }
        Ok(true)
    }
}
