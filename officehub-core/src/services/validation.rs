use regex::Regex;
use serde_json::Value;

use crate::errors::{EntityError, EntityResult};
use crate::services::field_updater::FieldMap;

/// Reject any field whose value is an empty or whitespace-only string.
///
/// Callers decide which fields are required by what they pass in; absent
/// keys and nulls are left alone.
pub fn validate_empty_fields(fields: &FieldMap) -> EntityResult<()> {
    for (field, value) in fields {
        if let Value::String(text) = value {
            if text.trim().is_empty() {
                return Err(EntityError::validation(format!(
                    "{} is a required field",
                    field
                )));
            }
        }
    }
    Ok(())
}

/// Same check for call sites that hold plain string arguments
pub fn validate_required<'a, I>(fields: I) -> EntityResult<()>
where
    I: IntoIterator<Item = (&'a str, &'a str)>,
{
    let map: FieldMap = fields
        .into_iter()
        .map(|(field, value)| (field.to_string(), Value::String(value.to_string())))
        .collect();
    validate_empty_fields(&map)
}

pub fn validate_email(email: &str) -> EntityResult<String> {
    let regex = Regex::new(r"^[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Za-z]{2,}$")
        .map_err(|e| EntityError::validation(format!("Failed to compile email regex: {}", e)))?;

    let trimmed = email.trim();
    if !regex.is_match(trimmed) {
        return Err(EntityError::validation(format!(
            "{} is not a valid email address",
            trimmed
        )));
    }
    Ok(trimmed.to_lowercase())
}
