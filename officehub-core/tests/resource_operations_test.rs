//! Office, room, tag and location operations
//!
//! Role guards, location scoping and partial updates through `AppContext`.

use anyhow::Result;
use officehub::app_context::{
    LocationUpdate, NewLocation, NewOffice, NewRoom, NewTag, OfficeUpdate, RoomFilter, RoomUpdate,
    TagUpdate,
};
use officehub::auth::{roles, Actor};
use officehub::config::AppConfig;
use officehub::database::entities::{locations, EntityState};
use officehub::database::setup_database;
use officehub::errors::EntityError;
use officehub::AppContext;
use sea_orm::Database;
use tempfile::NamedTempFile;

async fn setup_app() -> Result<(AppContext, NamedTempFile)> {
    let temp_file = NamedTempFile::new()?;
    let db_url = format!("sqlite://{}?mode=rwc", temp_file.path().display());

    let db = Database::connect(&db_url).await?;
    setup_database(&db).await?;

    Ok((AppContext::new(db, AppConfig::default()), temp_file))
}

fn super_admin() -> Actor {
    Actor::user(1, "root@andela.com").with_role(roles::SUPER_ADMIN)
}

fn admin_in(location: &str) -> Actor {
    Actor::user(2, "jane.doe@andela.com")
        .with_role(roles::ADMIN)
        .with_location(Some(location.to_string()))
}

async fn create_location(app: &AppContext, name: &str) -> Result<locations::Model> {
    Ok(app
        .create_location(
            &super_admin(),
            NewLocation {
                name: name.to_string(),
                abbreviation: name[..3].to_uppercase(),
                country: "Kenya".to_string(),
                image_url: None,
                time_zone: "EAT".to_string(),
            },
        )
        .await?)
}

fn new_room(name: &str, capacity: i32, location_id: i32) -> NewRoom {
    NewRoom {
        name: name.to_string(),
        room_type: "meeting".to_string(),
        capacity,
        location_id,
        calendar_id: None,
        image_url: None,
    }
}

#[tokio::test]
async fn test_member_cannot_create_office() -> Result<()> {
    let (app, _temp_file) = setup_app().await?;
    let nairobi = create_location(&app, "Nairobi").await?;
    let member = Actor::user(3, "member@andela.com").with_role("Member");

    let result = app
        .create_office(&member, NewOffice { name: "Dojo".to_string(), location_id: nairobi.id })
        .await;

    assert!(matches!(result, Err(EntityError::Permission(_))));
    assert!(app.list_offices(None, None).await?.items().is_empty());
    Ok(())
}

#[tokio::test]
async fn test_office_needs_existing_location() -> Result<()> {
    let (app, _temp_file) = setup_app().await?;

    let result = app
        .create_office(&super_admin(), NewOffice { name: "Dojo".to_string(), location_id: 99 })
        .await;

    match result {
        Err(EntityError::NotFound(message)) => assert_eq!(message, "Location not found"),
        other => panic!("expected not found, got {:?}", other),
    }
    Ok(())
}

#[tokio::test]
async fn test_admin_is_scoped_to_own_location() -> Result<()> {
    let (app, _temp_file) = setup_app().await?;
    let nairobi = create_location(&app, "Nairobi").await?;
    let lagos = create_location(&app, "Lagos").await?;
    let admin = admin_in("nairobi");

    let own = app
        .create_office(&admin, NewOffice { name: "Dojo".to_string(), location_id: nairobi.id })
        .await?;
    assert!(own.is_complete());

    let foreign = app
        .create_office(&admin, NewOffice { name: "Epic".to_string(), location_id: lagos.id })
        .await;
    match foreign {
        Err(EntityError::Permission(message)) => {
            assert_eq!(message, "You are not authorized to make changes in Lagos");
        }
        other => panic!("expected permission error, got {:?}", other),
    }
    Ok(())
}

#[tokio::test]
async fn test_office_update_and_archive() -> Result<()> {
    let (app, _temp_file) = setup_app().await?;
    let nairobi = create_location(&app, "Nairobi").await?;
    let admin = super_admin();

    let dojo = app
        .create_office(&admin, NewOffice { name: "Dojo".to_string(), location_id: nairobi.id })
        .await?
        .into_result()?;
    app.create_office(&admin, NewOffice { name: "Oculus".to_string(), location_id: nairobi.id })
        .await?;

    let blank = app
        .update_office(&admin, dojo.id, OfficeUpdate { name: Some("  ".to_string()) })
        .await;
    assert!(matches!(blank, Err(EntityError::Validation(_))));

    let taken = app
        .update_office(&admin, dojo.id, OfficeUpdate { name: Some("Oculus".to_string()) })
        .await;
    assert!(matches!(taken, Err(EntityError::Duplicate { .. })));

    let renamed = app
        .update_office(&admin, dojo.id, OfficeUpdate { name: Some("The Dojo".to_string()) })
        .await?;
    assert_eq!(renamed.name, "The Dojo");
    assert_eq!(app.get_office_by_name("The Dojo").await?.len(), 1);

    let archived = app.delete_office(&admin, dojo.id).await?;
    assert_eq!(archived.state, EntityState::Archived);

    match app.get_office_by_name("The Dojo").await {
        Err(EntityError::NotFound(message)) => assert_eq!(message, "Office Not found"),
        other => panic!("expected not found, got {:?}", other),
    }
    assert!(matches!(
        app.delete_office(&admin, dojo.id).await,
        Err(EntityError::NotFound(_))
    ));
    Ok(())
}

#[tokio::test]
async fn test_tags_require_admin_role() -> Result<()> {
    let (app, _temp_file) = setup_app().await?;
    let tag = NewTag {
        name: "Quiet".to_string(),
        color: "blue".to_string(),
        description: "No calls".to_string(),
    };

    let rejected = app.create_tag(&super_admin(), tag.clone()).await;
    assert!(matches!(rejected, Err(EntityError::Permission(_))));

    let admin = admin_in("Nairobi");
    let created = app.create_tag(&admin, tag.clone()).await?;
    assert!(matches!(
        app.create_tag(&admin, tag.clone()).await,
        Err(EntityError::Duplicate { .. })
    ));

    let updated = app
        .update_tag(
            &admin,
            created.id,
            TagUpdate {
                color: Some("green".to_string()),
                ..Default::default()
            },
        )
        .await?;
    assert_eq!(updated.color, "green");
    assert_eq!(updated.name, "Quiet");

    app.delete_tag(&admin, created.id).await?;
    assert!(app.list_tags().await?.is_empty());

    // An archived tag keeps its name and can still be edited
    let recreated = app.create_tag(&admin, tag.clone()).await;
    assert!(matches!(recreated, Err(EntityError::Duplicate { .. })));

    let recolored = app
        .update_tag(
            &admin,
            created.id,
            TagUpdate {
                color: Some("red".to_string()),
                ..Default::default()
            },
        )
        .await?;
    assert_eq!(recolored.color, "red");
    assert_eq!(recolored.state, EntityState::Archived);

    match app.update_tag(&admin, created.id + 100, TagUpdate::default()).await {
        Err(EntityError::NotFound(message)) => assert_eq!(message, "Tag not found"),
        other => panic!("expected not found, got {:?}", other),
    }
    Ok(())
}

#[tokio::test]
async fn test_room_rules_and_filters() -> Result<()> {
    let (app, _temp_file) = setup_app().await?;
    let nairobi = create_location(&app, "Nairobi").await?;
    let lagos = create_location(&app, "Lagos").await?;
    let admin = super_admin();

    assert!(matches!(
        app.create_room(&admin, new_room("Cognitio", 0, nairobi.id)).await,
        Err(EntityError::Validation(_))
    ));

    let cognitio = app.create_room(&admin, new_room("Cognitio", 8, nairobi.id)).await?;
    app.create_room(&admin, new_room("Cognitio", 8, lagos.id)).await?;
    app.create_room(&admin, new_room("Bahari", 4, nairobi.id)).await?;
    assert!(matches!(
        app.create_room(&admin, new_room("Cognitio", 6, nairobi.id)).await,
        Err(EntityError::Duplicate { .. })
    ));

    let in_nairobi = app
        .list_rooms(
            RoomFilter {
                location: Some("NAIROBI".to_string()),
                ..Default::default()
            },
            None,
            None,
        )
        .await?;
    let names: Vec<_> = in_nairobi.items().iter().map(|room| room.name.as_str()).collect();
    assert_eq!(names, vec!["Bahari", "Cognitio"]);

    let by_capacity = app
        .list_rooms(
            RoomFilter {
                capacity: Some(8),
                ..Default::default()
            },
            Some(0),
            Some(10),
        )
        .await?;
    assert_eq!(by_capacity.window().map(|w| w.total), Some(2));

    let shrunk = app
        .update_room(
            &admin,
            cognitio.id,
            RoomUpdate {
                capacity: Some(-2),
                ..Default::default()
            },
        )
        .await;
    assert!(matches!(shrunk, Err(EntityError::Validation(_))));

    let archived = app.delete_room(&admin, cognitio.id).await?;
    assert_eq!(archived.state, EntityState::Archived);
    Ok(())
}

#[tokio::test]
async fn test_locations_are_super_admin_only() -> Result<()> {
    let (app, _temp_file) = setup_app().await?;
    let kampala = create_location(&app, "Kampala").await?;

    let by_admin = app
        .update_location(
            &admin_in("Kampala"),
            kampala.id,
            LocationUpdate {
                time_zone: Some("UTC+3".to_string()),
                ..Default::default()
            },
        )
        .await;
    assert!(matches!(by_admin, Err(EntityError::Permission(_))));

    let updated = app
        .update_location(
            &super_admin(),
            kampala.id,
            LocationUpdate {
                time_zone: Some("UTC+3".to_string()),
                ..Default::default()
            },
        )
        .await?;
    assert_eq!(updated.time_zone, "UTC+3");

    app.delete_location(&super_admin(), kampala.id).await?;
    assert!(app.list_locations().await?.is_empty());
    Ok(())
}
