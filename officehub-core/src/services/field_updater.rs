//! Partial updates onto existing entities
//!
//! Mutations receive a loose mapping of field name to new value. Each entity
//! declares which fields it knows through [`UpdatableFields`]; unknown keys
//! are skipped so that extra mutation arguments never fail an update.

use serde::Serialize;
use serde_json::{Map, Value};

use crate::database::entities::EntityState;
use crate::errors::{EntityError, EntityResult};

/// Field name to new value, as received from a mutation
pub type FieldMap = Map<String, Value>;

pub trait UpdatableFields {
    /// Overwrite `field` with `value`. Returns `Ok(false)` when the entity has
    /// no such field.
    fn apply_field(&mut self, field: &str, value: &Value) -> EntityResult<bool>;
}

/// Apply every recognised field in `fields` onto `entity` and hand the same
/// entity back. Nothing is persisted.
pub fn update_entity_fields<'a, E>(entity: &'a mut E, fields: &FieldMap) -> EntityResult<&'a mut E>
where
    E: UpdatableFields,
{
    for (field, value) in fields {
        if !entity.apply_field(field, value)? {
            tracing::trace!(field = %field, "ignoring unknown field");
        }
    }
    Ok(entity)
}

/// Serialise a typed update into a field map, leaving out `None` fields.
pub fn to_field_map<T: Serialize>(update: &T) -> EntityResult<FieldMap> {
    match serde_json::to_value(update) {
        Ok(Value::Object(map)) => Ok(map
            .into_iter()
            .filter(|(_, value)| !value.is_null())
            .collect()),
        Ok(_) => Err(EntityError::validation("Update must be a set of named fields")),
        Err(e) => Err(EntityError::validation(format!("Invalid update: {}", e))),
    }
}

pub fn text_value(field: &str, value: &Value) -> EntityResult<String> {
    value
        .as_str()
        .map(str::to_string)
        .ok_or_else(|| EntityError::validation(format!("{} must be a string", field)))
}

pub fn optional_text_value(field: &str, value: &Value) -> EntityResult<Option<String>> {
    if value.is_null() {
        return Ok(None);
    }
    text_value(field, value).map(Some)
}

pub fn int_value(field: &str, value: &Value) -> EntityResult<i32> {
    value
        .as_i64()
        .and_then(|n| i32::try_from(n).ok())
        .ok_or_else(|| EntityError::validation(format!("{} must be an integer", field)))
}

pub fn state_value(field: &str, value: &Value) -> EntityResult<EntityState> {
    value
        .as_str()
        .and_then(EntityState::parse)
        .ok_or_else(|| {
            EntityError::validation(format!(
                "{} must be one of active, archived or deleted",
                field
            ))
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[derive(Serialize)]
    struct TagUpdate {
        name: Option<String>,
        color: Option<String>,
    }

    #[test]
    fn test_field_map_skips_absent_fields() {
        let update = TagUpdate {
            name: Some("urgent".to_string()),
            color: None,
        };
        let map = to_field_map(&update).unwrap();

        assert_eq!(map.len(), 1);
        assert_eq!(map.get("name"), Some(&json!("urgent")));
    }

    #[test]
    fn test_value_helpers() {
        assert_eq!(int_value("capacity", &json!(12)).unwrap(), 12);
        assert!(int_value("capacity", &json!(1_u64 << 40)).is_err());
        assert_eq!(optional_text_value("picture", &Value::Null).unwrap(), None);
        assert_eq!(
            state_value("state", &json!("ARCHIVED")).unwrap(),
            EntityState::Archived
        );
        assert!(text_value("name", &json!(3)).is_err());
    }
}
