use sea_orm::{ColumnTrait, EntityTrait, QueryFilter, Set};

use super::{AppContext, NewTag, TagUpdate};
use crate::auth::{roles, Actor, RoleGuard};
use crate::database::entities::{tags, EntityState};
use crate::errors::{EntityError, EntityResult};
use crate::services::{
    ensure_unique, paginate, persist_changes, save_entity, to_field_map, update_entity_fields,
    validate_empty_fields, validate_required, SavePayload,
};

const TAG: &str = "Tag";

fn tag_guard() -> RoleGuard {
    RoleGuard::any_of([roles::ADMIN])
}

impl AppContext {
    // ----- Tag helpers -----------------------------------------------------
    pub async fn create_tag(&self, actor: &Actor, input: NewTag) -> EntityResult<tags::Model> {
        tag_guard()
            .run(actor, || async move {
                validate_required([
                    ("name", input.name.as_str()),
                    ("color", input.color.as_str()),
                    ("description", input.description.as_str()),
                ])?;

                let payload =
                    SavePayload::<tags::Entity>::new(tags::Column::Name, input.name.clone());
                let tag = tags::ActiveModel {
                    name: Set(input.name),
                    color: Set(input.color),
                    description: Set(input.description),
                    state: Set(EntityState::Active),
                    ..Default::default()
                };

                save_entity(&self.db, tag, TAG, payload).await
            })
            .await
    }

    pub async fn update_tag(
        &self,
        actor: &Actor,
        tag_id: i32,
        update: TagUpdate,
    ) -> EntityResult<tags::Model> {
        tag_guard().check(actor)?;
        let fields = to_field_map(&update)?;
        validate_empty_fields(&fields)?;

        // By id in any state, so archived tags stay editable
        let tag = tags::Entity::find_by_id(tag_id)
            .one(&self.db)
            .await?
            .ok_or_else(|| EntityError::not_found("Tag not found"))?;
        if let Some(name) = &update.name {
            let payload = SavePayload::<tags::Entity>::new(tags::Column::Name, name.clone())
                .within(tags::Column::Id.ne(tag.id));
            ensure_unique(&self.db, TAG, &payload).await?;
        }

        let name = update.name.clone().unwrap_or_else(|| tag.name.clone());
        let mut tag: tags::ActiveModel = tag.into();
        update_entity_fields(&mut tag, &fields)?;
        persist_changes(&self.db, tag, TAG, &name).await
    }

    pub async fn delete_tag(&self, actor: &Actor, tag_id: i32) -> EntityResult<tags::Model> {
        tag_guard().check(actor)?;

        let tag = self.tag(tag_id).await?;
        let name = tag.name.clone();
        let mut tag: tags::ActiveModel = tag.into();
        tag.state = Set(EntityState::Archived);
        persist_changes(&self.db, tag, TAG, &name).await
    }

    pub async fn list_tags(&self) -> EntityResult<Vec<tags::Model>> {
        let select = tags::Entity::find().filter(tags::Column::State.eq(EntityState::Active));
        Ok(paginate(&self.db, select, None, "tags").await?.into_items())
    }

    /// Active tag by id
    pub async fn tag(&self, tag_id: i32) -> EntityResult<tags::Model> {
        tags::Entity::find_by_id(tag_id)
            .filter(tags::Column::State.eq(EntityState::Active))
            .one(&self.db)
            .await?
            .ok_or_else(|| EntityError::not_found("Tag not found"))
    }
}
