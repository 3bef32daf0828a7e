//! Save context tests
//!
//! Uniqueness checks, commit/rollback behaviour and error translation of the
//! transactional save helper.

use std::sync::Arc;

use anyhow::Result;
use async_trait::async_trait;
use officehub::auth::{roles, Actor};
use officehub::config::AppConfig;
use officehub::database::entities::{locations, offices, EntityState};
use officehub::database::setup_database;
use officehub::errors::EntityError;
use officehub::services::{
    persist_changes, save_entity, save_with, Notifier, OfficeCreatedNotice, SavePayload,
};
use officehub::{app_context::NewOffice, AppContext};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Database, DatabaseConnection, EntityTrait, QueryFilter, Set,
};
use tempfile::NamedTempFile;

async fn setup_test_db() -> Result<(DatabaseConnection, NamedTempFile)> {
    let temp_file = NamedTempFile::new()?;
    let db_url = format!("sqlite://{}?mode=rwc", temp_file.path().display());

    let db = Database::connect(&db_url).await?;
    setup_database(&db).await?;

    Ok((db, temp_file))
}

async fn create_location(db: &DatabaseConnection, name: &str) -> Result<locations::Model> {
    let location = locations::ActiveModel {
        name: Set(name.to_string()),
        abbreviation: Set(name[..3].to_uppercase()),
        country: Set("Nigeria".to_string()),
        image_url: Set(None),
        time_zone: Set("WAT".to_string()),
        state: Set(EntityState::Active),
        ..Default::default()
    };
    Ok(location.insert(db).await?)
}

fn new_office(name: &str, location_id: i32) -> offices::ActiveModel {
    offices::ActiveModel {
        name: Set(name.to_string()),
        location_id: Set(location_id),
        state: Set(EntityState::Active),
        ..Default::default()
    }
}

fn office_payload(name: &str) -> SavePayload<offices::Entity> {
    SavePayload::new(offices::Column::Name, name)
}

async fn save_office(
    db: &DatabaseConnection,
    name: &str,
    location_id: i32,
) -> Result<offices::Model, EntityError> {
    save_entity(db, new_office(name, location_id), "Office", office_payload(name)).await
}

async fn set_state(
    db: &DatabaseConnection,
    office: offices::Model,
    state: EntityState,
) -> Result<offices::Model> {
    let mut office: offices::ActiveModel = office.into();
    office.state = Set(state);
    Ok(office.update(db).await?)
}

async fn offices_named(db: &DatabaseConnection, name: &str) -> Result<Vec<offices::Model>> {
    Ok(offices::Entity::find()
        .filter(offices::Column::Name.eq(name))
        .all(db)
        .await?)
}

struct FailingNotifier;

#[async_trait]
impl Notifier for FailingNotifier {
    async fn office_created(&self, _notice: &OfficeCreatedNotice) -> bool {
        false
    }
}

#[tokio::test]
async fn test_duplicate_active_name_is_rejected() -> Result<()> {
    let (db, _temp_file) = setup_test_db().await?;
    let lagos = create_location(&db, "Lagos").await?;

    save_office(&db, "Epic Tower", lagos.id).await?;

    let second = save_office(&db, "Epic Tower", lagos.id).await;
    match second {
        Err(err @ EntityError::Duplicate { .. }) => {
            assert_eq!(err.to_string(), "Office Epic Tower already exists");
        }
        other => panic!("expected duplicate error, got {:?}", other),
    }

    assert_eq!(offices_named(&db, "Epic Tower").await?.len(), 1);
    Ok(())
}

#[tokio::test]
async fn test_archived_name_is_still_taken() -> Result<()> {
    let (db, _temp_file) = setup_test_db().await?;
    let lagos = create_location(&db, "Lagos").await?;

    let first = save_office(&db, "Epic Tower", lagos.id).await?;
    set_state(&db, first, EntityState::Archived).await?;

    let second = save_office(&db, "Epic Tower", lagos.id).await;
    assert!(matches!(second, Err(EntityError::Duplicate { .. })));
    assert_eq!(offices_named(&db, "Epic Tower").await?.len(), 1);
    Ok(())
}

#[tokio::test]
async fn test_deleted_name_can_be_reused() -> Result<()> {
    let (db, _temp_file) = setup_test_db().await?;
    let lagos = create_location(&db, "Lagos").await?;

    let first = save_office(&db, "Epic Tower", lagos.id).await?;
    set_state(&db, first, EntityState::Deleted).await?;

    let second = save_office(&db, "Epic Tower", lagos.id).await?;
    assert_eq!(second.state, EntityState::Active);
    assert_eq!(offices_named(&db, "Epic Tower").await?.len(), 2);
    Ok(())
}

#[tokio::test]
async fn test_conflicting_rename_becomes_duplicate() -> Result<()> {
    let (db, _temp_file) = setup_test_db().await?;
    let lagos = create_location(&db, "Lagos").await?;
    save_office(&db, "Epic Tower", lagos.id).await?;
    let oculus = save_office(&db, "Oculus", lagos.id).await?;

    // Skip the pre-check, as a rename racing another would
    let mut renamed: offices::ActiveModel = oculus.into();
    renamed.name = Set("Epic Tower".to_string());
    let result = persist_changes(&db, renamed, "Office", "Epic Tower").await;

    match result {
        Err(err @ EntityError::Duplicate { .. }) => {
            assert_eq!(err.to_string(), "Office Epic Tower already exists");
        }
        other => panic!("expected duplicate error, got {:?}", other),
    }
    assert_eq!(offices_named(&db, "Oculus").await?.len(), 1);
    Ok(())
}

#[tokio::test]
async fn test_unchanged_entity_is_not_written() -> Result<()> {
    let (db, _temp_file) = setup_test_db().await?;
    let lagos = create_location(&db, "Lagos").await?;
    let office = save_office(&db, "Oculus", lagos.id).await?;

    let result = persist_changes(&db, offices::ActiveModel::from(office), "Office", "Oculus").await;
    match result {
        Err(EntityError::Validation(message)) => {
            assert_eq!(message, "No office fields to update")
        }
        other => panic!("expected validation error, got {:?}", other),
    }
    Ok(())
}

#[tokio::test]
async fn test_store_level_violation_becomes_duplicate() -> Result<()> {
    let (db, _temp_file) = setup_test_db().await?;
    let lagos = create_location(&db, "Lagos").await?;
    new_office("Epic Tower", lagos.id).insert(&db).await?;

    // Blind the pre-check so only the partial unique index can catch it
    let payload = office_payload("Epic Tower").within(offices::Column::Id.eq(-1));
    let result = save_entity(&db, new_office("Epic Tower", lagos.id), "Office", payload).await;

    assert!(matches!(result, Err(EntityError::Duplicate { .. })));
    assert_eq!(offices_named(&db, "Epic Tower").await?.len(), 1);
    Ok(())
}

#[tokio::test]
async fn test_failed_body_rolls_back() -> Result<()> {
    let (db, _temp_file) = setup_test_db().await?;
    let lagos = create_location(&db, "Lagos").await?;

    let office = new_office("Oculus", lagos.id);
    let result = save_with(&db, office, "Office", office_payload("Oculus"), |_, _| {
        Box::pin(async { Err(EntityError::validation("body failed")) })
    })
    .await;

    assert!(matches!(result, Err(EntityError::Validation(_))));
    assert!(offices_named(&db, "Oculus").await?.is_empty());
    Ok(())
}

#[tokio::test]
async fn test_auxiliary_failure_keeps_entity() -> Result<()> {
    let (db, _temp_file) = setup_test_db().await?;
    let lagos = create_location(&db, "Lagos").await?;

    let office = new_office("Oculus", lagos.id);
    let outcome = save_with(&db, office, "Office", office_payload("Oculus"), |_, _| {
        Box::pin(async { Err(EntityError::auxiliary("Office created but Emails not Sent")) })
    })
    .await?;

    assert!(!outcome.is_complete());
    assert_eq!(outcome.entity.name, "Oculus");
    assert_eq!(offices_named(&db, "Oculus").await?.len(), 1);
    Ok(())
}

#[tokio::test]
async fn test_office_creation_reports_unsent_notification() -> Result<()> {
    let (db, _temp_file) = setup_test_db().await?;
    let lagos = create_location(&db, "Lagos").await?;
    let app =
        AppContext::with_notifier(db.clone(), AppConfig::default(), Arc::new(FailingNotifier));
    let admin = Actor::user(1, "jane.doe@andela.com")
        .with_role(roles::ADMIN)
        .with_location(Some("Lagos".to_string()));

    let outcome = app
        .create_office(
            &admin,
            NewOffice {
                name: "Epic Tower".to_string(),
                location_id: lagos.id,
            },
        )
        .await?;

    let warning = outcome.warning.as_ref().map(ToString::to_string);
    assert_eq!(warning.as_deref(), Some("Office created but Emails not Sent"));
    assert_eq!(offices_named(&db, "Epic Tower").await?.len(), 1);
    Ok(())
}
