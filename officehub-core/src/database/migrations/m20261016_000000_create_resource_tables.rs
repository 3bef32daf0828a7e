use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

/// Names stay unique among active and archived rows. Only a deleted row
/// gives its name up.
const LIVE_NAME_INDEXES: [&str; 4] = [
    "CREATE UNIQUE INDEX IF NOT EXISTS idx_locations_live_name ON locations (name) WHERE state <> 'deleted'",
    "CREATE UNIQUE INDEX IF NOT EXISTS idx_offices_live_name ON offices (name) WHERE state <> 'deleted'",
    "CREATE UNIQUE INDEX IF NOT EXISTS idx_tags_live_name ON tags (name) WHERE state <> 'deleted'",
    "CREATE UNIQUE INDEX IF NOT EXISTS idx_rooms_live_name_location ON rooms (name, location_id) WHERE state <> 'deleted'",
];

fn state_column<T: IntoIden>(column: T) -> ColumnDef {
    ColumnDef::new(column)
        .string_len(16)
        .not_null()
        .default("active")
        .to_owned()
}

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Locations::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Locations::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Locations::Name).string().not_null())
                    .col(ColumnDef::new(Locations::Abbreviation).string().not_null())
                    .col(ColumnDef::new(Locations::Country).string().not_null())
                    .col(ColumnDef::new(Locations::ImageUrl).string().null())
                    .col(ColumnDef::new(Locations::TimeZone).string().not_null())
                    .col(&mut state_column(Locations::State))
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Offices::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Offices::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Offices::Name).string().not_null())
                    .col(ColumnDef::new(Offices::LocationId).integer().not_null())
                    .col(&mut state_column(Offices::State))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_offices_location_id")
                            .from(Offices::Table, Offices::LocationId)
                            .to(Locations::Table, Locations::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Rooms::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Rooms::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Rooms::Name).string().not_null())
                    .col(ColumnDef::new(Rooms::RoomType).string().not_null())
                    .col(ColumnDef::new(Rooms::Capacity).integer().not_null())
                    .col(ColumnDef::new(Rooms::LocationId).integer().not_null())
                    .col(ColumnDef::new(Rooms::CalendarId).string().null())
                    .col(ColumnDef::new(Rooms::ImageUrl).string().null())
                    .col(&mut state_column(Rooms::State))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_rooms_location_id")
                            .from(Rooms::Table, Rooms::LocationId)
                            .to(Locations::Table, Locations::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Tags::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Tags::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Tags::Name).string().not_null())
                    .col(ColumnDef::new(Tags::Color).string().not_null())
                    .col(ColumnDef::new(Tags::Description).string().not_null())
                    .col(&mut state_column(Tags::State))
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Users::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Users::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Users::Email).string().not_null().unique_key())
                    .col(ColumnDef::new(Users::Name).string().not_null())
                    .col(ColumnDef::new(Users::Location).string().null())
                    .col(ColumnDef::new(Users::Picture).string().null())
                    .col(&mut state_column(Users::State))
                    .to_owned(),
            )
            .await?;

        // Partial indexes are not expressible through the index builder
        let db = manager.get_connection();
        for statement in LIVE_NAME_INDEXES {
            db.execute_unprepared(statement).await?;
        }

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Users::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Tags::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Rooms::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Offices::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Locations::Table).to_owned())
            .await?;
        Ok(())
    }
}

#[derive(DeriveIden)]
enum Locations {
    Table,
    Id,
    Name,
    Abbreviation,
    Country,
    ImageUrl,
    TimeZone,
    State,
}

#[derive(DeriveIden)]
enum Offices {
    Table,
    Id,
    Name,
    LocationId,
    State,
}

#[derive(DeriveIden)]
enum Rooms {
    Table,
    Id,
    Name,
    RoomType,
    Capacity,
    LocationId,
    CalendarId,
    ImageUrl,
    State,
}

#[derive(DeriveIden)]
enum Tags {
    Table,
    Id,
    Name,
    Color,
    Description,
    State,
}

#[derive(DeriveIden)]
pub(super) enum Users {
    Table,
    Id,
    Email,
    Name,
    Location,
    Picture,
    State,
}
