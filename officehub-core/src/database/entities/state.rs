use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Lifecycle of every managed entity. Archived and deleted rows stay in
/// storage but are hidden from default queries.
#[derive(
    Copy, Clone, Debug, Default, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize,
)]
#[cfg_attr(feature = "graphql", derive(async_graphql::Enum))]
#[sea_orm(rs_type = "String", db_type = "String(Some(16))")]
#[serde(rename_all = "lowercase")]
pub enum EntityState {
    #[default]
    #[sea_orm(string_value = "active")]
    Active,
    #[sea_orm(string_value = "archived")]
    Archived,
    #[sea_orm(string_value = "deleted")]
    Deleted,
}

impl EntityState {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Active => "active",
            Self::Archived => "archived",
            Self::Deleted => "deleted",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_lowercase().as_str() {
            "active" => Some(Self::Active),
            "archived" => Some(Self::Archived),
            "deleted" => Some(Self::Deleted),
            _ => None,
        }
    }
}

/// Entities with a lifecycle state and a designated sort field, which is
/// what the save and pagination helpers need to know about a table.
pub trait LifecycleEntity: EntityTrait {
    fn state_column() -> Self::Column;

    /// Field whose case-folded value orders listings
    fn sort_column() -> Self::Column;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_state() {
        assert_eq!(EntityState::parse(" Archived "), Some(EntityState::Archived));
        assert_eq!(EntityState::parse("active"), Some(EntityState::Active));
        assert_eq!(EntityState::parse("gone"), None);
    }

    #[test]
    fn test_state_serializes_lowercase() {
        let json = serde_json::to_string(&EntityState::Deleted).unwrap();
        assert_eq!(json, "\"deleted\"");
    }
}
