use sea_orm::entity::prelude::*;
use sea_orm::Set;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::state::{EntityState, LifecycleEntity};
use crate::errors::{EntityError, EntityResult};
use crate::services::field_updater::{
    int_value, optional_text_value, state_value, text_value, UpdatableFields,
};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "rooms")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub name: String,
    pub room_type: String,
    pub capacity: i32,
    pub location_id: i32,
    pub calendar_id: Option<String>,
    pub image_url: Option<String>,
    pub state: EntityState,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::locations::Entity",
        from = "Column::LocationId",
        to = "super::locations::Column::Id",
        on_delete = "Cascade"
    )]
    Locations,
}

impl Related<super::locations::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Locations.def()
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
            "room_type" => self.room_type = Set(text_value(field, value)?),
            "capacity" => self.capacity = Set(capacity_value(value)?),
            "location_id" => self.location_id = Set(int_value(field, value)?),
            "calendar_id" => self.calendar_id = Set(optional_text_value(field, value)?),
            "image_url" => self.image_url = Set(optional_text_value(field, value)?),
            "state" => self.state = Set(state_value(field, value)?),
            _ => return Ok(false),
        }
        Ok(true)
    }
}

fn capacity_value(value: &Value) -> EntityResult<i32> {
    let capacity = int_value("capacity", value)?;
    validate_capacity(capacity)?;
    Ok(capacity)
}

pub fn validate_capacity(capacity: i32) -> EntityResult<()> {
    if capacity < 1 {
        return Err(EntityError::validation(
            "Room capacity must be greater than zero",
        ));
    }
    Ok(())
}
