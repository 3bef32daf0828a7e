pub mod connection;
pub mod entities;
pub mod migrations;

pub use connection::*;

use sea_orm::{DatabaseConnection, DbErr};
use sea_orm_migration::MigratorTrait;

/// Bring the schema up to date
pub async fn setup_database(db: &DatabaseConnection) -> Result<(), DbErr> {
    migrations::Migrator::up(db, None).await?;
    tracing::info!("Database migrations completed");
    Ok(())
}
