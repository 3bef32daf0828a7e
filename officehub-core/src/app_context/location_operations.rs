use sea_orm::{ColumnTrait, EntityTrait, QueryFilter, Set};

use super::{AppContext, LocationUpdate, NewLocation};
use crate::auth::{Actor, RoleGuard};
use crate::database::entities::{locations, EntityState};
use crate::errors::{EntityError, EntityResult};
use crate::services::{
    ensure_unique, paginate, persist_changes, save_entity, to_field_map, update_entity_fields,
    validate_empty_fields, validate_required, SavePayload,
};

const LOCATION: &str = "Location";

impl AppContext {
    // ----- Location helpers ------------------------------------------------
    pub async fn create_location(
        &self,
        actor: &Actor,
        input: NewLocation,
    ) -> EntityResult<locations::Model> {
        RoleGuard::super_admin().check(actor)?;
        validate_required([
            ("name", input.name.as_str()),
            ("abbreviation", input.abbreviation.as_str()),
            ("country", input.country.as_str()),
            ("time_zone", input.time_zone.as_str()),
        ])?;

        let payload =
            SavePayload::<locations::Entity>::new(locations::Column::Name, input.name.clone());
        let location = locations::ActiveModel {
            name: Set(input.name),
            abbreviation: Set(input.abbreviation),
            country: Set(input.country),
            image_url: Set(input.image_url),
            time_zone: Set(input.time_zone),
            state: Set(EntityState::Active),
            ..Default::default()
        };

        save_entity(&self.db, location, LOCATION, payload).await
    }

    pub async fn update_location(
        &self,
        actor: &Actor,
        location_id: i32,
        update: LocationUpdate,
    ) -> EntityResult<locations::Model> {
        RoleGuard::super_admin().check(actor)?;
        let fields = to_field_map(&update)?;
        validate_empty_fields(&fields)?;

        let location = self.location(location_id).await?;
        if let Some(name) = &update.name {
            let payload =
                SavePayload::<locations::Entity>::new(locations::Column::Name, name.clone())
                    .within(locations::Column::Id.ne(location.id));
            ensure_unique(&self.db, LOCATION, &payload).await?;
        }

        let name = update.name.clone().unwrap_or_else(|| location.name.clone());
        let mut location: locations::ActiveModel = location.into();
        update_entity_fields(&mut location, &fields)?;
        persist_changes(&self.db, location, LOCATION, &name).await
    }

    pub async fn delete_location(
        &self,
        actor: &Actor,
        location_id: i32,
    ) -> EntityResult<locations::Model> {
        RoleGuard::super_admin().check(actor)?;

        let location = self.location(location_id).await?;
        let name = location.name.clone();
        let mut location: locations::ActiveModel = location.into();
        location.state = Set(EntityState::Archived);
        let archived = persist_changes(&self.db, location, LOCATION, &name).await?;

        tracing::info!(location_id, "location archived");
        Ok(archived)
    }

    pub async fn list_locations(&self) -> EntityResult<Vec<locations::Model>> {
        let select =
            locations::Entity::find().filter(locations::Column::State.eq(EntityState::Active));
        Ok(paginate(&self.db, select, None, "locations").await?.into_items())
    }

    /// Active location by id
    pub async fn location(&self, location_id: i32) -> EntityResult<locations::Model> {
        locations::Entity::find_by_id(location_id)
            .filter(locations::Column::State.eq(EntityState::Active))
            .one(&self.db)
            .await?
            .ok_or_else(|| EntityError::not_found("Location not found"))
    }
}
