use sea_orm::entity::prelude::*;
use sea_orm::Set;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::state::{EntityState, LifecycleEntity};
use crate::errors::EntityResult;
use crate::services::field_updater::{int_value, state_value, text_value, UpdatableFields};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "offices")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub name: String,
    pub location_id: i32,
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
            "location_id" => self.location_id = Set(int_value(field, value)?),
            "state" => self.state = Set(state_value(field, value)?),
            _ => return Ok(false),
        }
        Ok(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::field_updater::{update_entity_fields, FieldMap};
    use sea_orm::ActiveValue;
    use serde_json::json;

    fn existing_office() -> ActiveModel {
        Model {
            id: 7,
            name: "Epic Tower".to_string(),
            location_id: 1,
            state: EntityState::Active,
        }
        .into()
    }

    fn fields(value: serde_json::Value) -> FieldMap {
        value.as_object().cloned().unwrap_or_default()
    }

    #[test]
    fn test_known_fields_are_overwritten() {
        let mut office = existing_office();
        update_entity_fields(&mut office, &fields(json!({ "name": "The Oculus" }))).unwrap();

        assert_eq!(office.name, ActiveValue::Set("The Oculus".to_string()));
        assert_eq!(office.id, ActiveValue::Unchanged(7));
    }

    #[test]
    fn test_unknown_fields_are_ignored() {
        let mut office = existing_office();
        let before = office.clone();
        update_entity_fields(&mut office, &fields(json!({ "floor": 4, "wing": "east" }))).unwrap();

        assert_eq!(office, before);
    }

    #[test]
    fn test_update_is_idempotent() {
        let updates = fields(json!({ "name": "Oculus", "state": "archived" }));

        let mut once = existing_office();
        update_entity_fields(&mut once, &updates).unwrap();

        let mut twice = existing_office();
        update_entity_fields(&mut twice, &updates).unwrap();
        update_entity_fields(&mut twice, &updates).unwrap();

        assert_eq!(once, twice);
        assert_eq!(twice.state, ActiveValue::Set(EntityState::Archived));
    }

    #[test]
    fn test_wrong_type_is_rejected() {
        let mut office = existing_office();
        let result = update_entity_fields(&mut office, &fields(json!({ "location_id": "two" })));
        assert!(result.is_err());
    }
}
