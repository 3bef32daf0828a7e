use sea_orm::{ColumnTrait, EntityTrait, QueryFilter, Set};

use super::{AppContext, NewOffice, OfficeUpdate};
use crate::auth::{verify_location_scope, Actor, RoleGuard};
use crate::database::entities::{offices, EntityState};
use crate::errors::{EntityError, EntityResult};
use crate::services::{
    ensure_unique, paginate, persist_changes, save_with, to_field_map, update_entity_fields,
    validate_empty_fields, validate_required, OfficeCreatedNotice, Page, PageRequest, SaveOutcome,
    SavePayload,
};

const OFFICE: &str = "Office";

impl AppContext {
    // ----- Office helpers --------------------------------------------------

    /// Create an office and tell the creating admin about it. A notice that
    /// cannot be sent leaves the office in place and is reported through
    /// [`SaveOutcome::warning`].
    pub async fn create_office(
        &self,
        actor: &Actor,
        input: NewOffice,
    ) -> EntityResult<SaveOutcome<offices::Model>> {
        RoleGuard::admins().check(actor)?;
        validate_required([("name", input.name.as_str())])?;

        let location = self.location(input.location_id).await?;
        verify_location_scope(actor, &location.name)?;

        let notice = OfficeCreatedNotice::new(actor.require_email()?, &input.name, &location.name);
        let notifier = self.notifier.clone();

        let payload =
            SavePayload::<offices::Entity>::new(offices::Column::Name, input.name.clone());
        let office = offices::ActiveModel {
            name: Set(input.name),
            location_id: Set(location.id),
            state: Set(EntityState::Active),
            ..Default::default()
        };

        save_with(&self.db, office, OFFICE, payload, move |_, _| {
            Box::pin(async move {
                if notifier.office_created(&notice).await {
                    Ok(())
                } else {
                    Err(EntityError::auxiliary("Office created but Emails not Sent"))
                }
            })
        })
        .await
    }

    pub async fn update_office(
        &self,
        actor: &Actor,
        office_id: i32,
        update: OfficeUpdate,
    ) -> EntityResult<offices::Model> {
        RoleGuard::admins().check(actor)?;
        let fields = to_field_map(&update)?;
        validate_empty_fields(&fields)?;

        let office = self.office(office_id).await?;
        self.verify_office_scope(actor, &office).await?;

        if let Some(name) = &update.name {
            let payload = SavePayload::<offices::Entity>::new(offices::Column::Name, name.clone())
                .within(offices::Column::Id.ne(office.id));
            ensure_unique(&self.db, OFFICE, &payload).await?;
        }

        let name = update.name.clone().unwrap_or_else(|| office.name.clone());
        let mut office: offices::ActiveModel = office.into();
        update_entity_fields(&mut office, &fields)?;
        persist_changes(&self.db, office, OFFICE, &name).await
    }

    pub async fn delete_office(
        &self,
        actor: &Actor,
        office_id: i32,
    ) -> EntityResult<offices::Model> {
        RoleGuard::admins().check(actor)?;

        let office = self.office(office_id).await?;
        self.verify_office_scope(actor, &office).await?;

        let name = office.name.clone();
        let mut office: offices::ActiveModel = office.into();
        office.state = Set(EntityState::Archived);
        let archived = persist_changes(&self.db, office, OFFICE, &name).await?;

        tracing::info!(office_id, "office archived");
        Ok(archived)
    }

    pub async fn list_offices(
        &self,
        page: Option<i32>,
        per_page: Option<i32>,
    ) -> EntityResult<Page<offices::Model>> {
        let request = PageRequest::from_args(page, per_page, &self.config.pagination)?;
        let select = offices::Entity::find().filter(offices::Column::State.eq(EntityState::Active));
        paginate(&self.db, select, request, "offices").await
    }

    pub async fn get_office_by_name(&self, name: &str) -> EntityResult<Vec<offices::Model>> {
        let found = offices::Entity::find()
            .filter(offices::Column::Name.eq(name))
            .filter(offices::Column::State.eq(EntityState::Active))
            .all(&self.db)
            .await?;

        if found.is_empty() {
            return Err(EntityError::not_found("Office Not found"));
        }
        Ok(found)
    }

    /// Active office by id
    pub async fn office(&self, office_id: i32) -> EntityResult<offices::Model> {
        offices::Entity::find_by_id(office_id)
            .filter(offices::Column::State.eq(EntityState::Active))
            .one(&self.db)
            .await?
            .ok_or_else(|| EntityError::not_found("Office not found"))
    }

    async fn verify_office_scope(
        &self,
        actor: &Actor,
        office: &offices::Model,
    ) -> EntityResult<()> {
        let location = self.location(office.location_id).await?;
        verify_location_scope(actor, &location.name)
    }
}
