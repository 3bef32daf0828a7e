use sea_orm::sea_query::{Expr, Func};
use sea_orm::{ColumnTrait, EntityTrait, JoinType, QueryFilter, QuerySelect, RelationTrait, Set};

use super::{AppContext, NewRoom, RoomFilter, RoomUpdate};
use crate::auth::{verify_location_scope, Actor, RoleGuard};
use crate::database::entities::rooms::validate_capacity;
use crate::database::entities::{locations, rooms, EntityState};
use crate::errors::{EntityError, EntityResult};
use crate::services::{
    ensure_unique, paginate, persist_changes, save_entity, to_field_map, update_entity_fields,
    validate_empty_fields, validate_required, Page, PageRequest, SavePayload,
};

const ROOM: &str = "Room";

impl AppContext {
    // ----- Room helpers ----------------------------------------------------

    /// Room names are unique per location, not globally.
    pub async fn create_room(&self, actor: &Actor, input: NewRoom) -> EntityResult<rooms::Model> {
        RoleGuard::admins().check(actor)?;
        validate_required([
            ("name", input.name.as_str()),
            ("room_type", input.room_type.as_str()),
        ])?;
        validate_capacity(input.capacity)?;

        let location = self.location(input.location_id).await?;
        verify_location_scope(actor, &location.name)?;

        let payload = SavePayload::<rooms::Entity>::new(rooms::Column::Name, input.name.clone())
            .within(rooms::Column::LocationId.eq(location.id));
        let room = rooms::ActiveModel {
            name: Set(input.name),
            room_type: Set(input.room_type),
            capacity: Set(input.capacity),
            location_id: Set(location.id),
            calendar_id: Set(input.calendar_id),
            image_url: Set(input.image_url),
            state: Set(EntityState::Active),
            ..Default::default()
        };

        save_entity(&self.db, room, ROOM, payload).await
    }

    pub async fn update_room(
        &self,
        actor: &Actor,
        room_id: i32,
        update: RoomUpdate,
    ) -> EntityResult<rooms::Model> {
        RoleGuard::admins().check(actor)?;
        let fields = to_field_map(&update)?;
        validate_empty_fields(&fields)?;

        let room = self.room(room_id).await?;
        let location = self.location(room.location_id).await?;
        verify_location_scope(actor, &location.name)?;

        if let Some(name) = &update.name {
            let payload = SavePayload::<rooms::Entity>::new(rooms::Column::Name, name.clone())
                .within(rooms::Column::LocationId.eq(room.location_id))
                .within(rooms::Column::Id.ne(room.id));
            ensure_unique(&self.db, ROOM, &payload).await?;
        }

        let name = update.name.clone().unwrap_or_else(|| room.name.clone());
        let mut room: rooms::ActiveModel = room.into();
        update_entity_fields(&mut room, &fields)?;
        persist_changes(&self.db, room, ROOM, &name).await
    }

    pub async fn delete_room(&self, actor: &Actor, room_id: i32) -> EntityResult<rooms::Model> {
        RoleGuard::admins().check(actor)?;

        let room = self.room(room_id).await?;
        let location = self.location(room.location_id).await?;
        verify_location_scope(actor, &location.name)?;

        let name = room.name.clone();
        let mut room: rooms::ActiveModel = room.into();
        room.state = Set(EntityState::Archived);
        persist_changes(&self.db, room, ROOM, &name).await
    }

    pub async fn list_rooms(
        &self,
        filter: RoomFilter,
        page: Option<i32>,
        per_page: Option<i32>,
    ) -> EntityResult<Page<rooms::Model>> {
        let request = PageRequest::from_args(page, per_page, &self.config.pagination)?;

        let mut select = rooms::Entity::find().filter(rooms::Column::State.eq(EntityState::Active));
        if let Some(capacity) = filter.capacity {
            select = select.filter(rooms::Column::Capacity.eq(capacity));
        }
        if let Some(location) = filter.location.as_deref().map(str::trim) {
            let name = Func::lower(Expr::col((locations::Entity, locations::Column::Name)));
            select = select
                .join(JoinType::InnerJoin, rooms::Relation::Locations.def())
                .filter(Expr::expr(name).eq(location.to_lowercase()));
        }

        paginate(&self.db, select, request, "rooms").await
    }

    /// Active room by id
    pub async fn room(&self, room_id: i32) -> EntityResult<rooms::Model> {
        rooms::Entity::find_by_id(room_id)
            .filter(rooms::Column::State.eq(EntityState::Active))
            .one(&self.db)
            .await?
            .ok_or_else(|| EntityError::not_found("Room not found"))
    }
}
