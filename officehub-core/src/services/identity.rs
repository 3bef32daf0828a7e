use async_trait::async_trait;
use chrono::Utc;
use sea_orm::{ColumnTrait, DatabaseConnection, EntityTrait, ModelTrait, QueryFilter};

use crate::auth::Actor;
use crate::database::entities::{roles, user_sessions, users, EntityState};
use crate::errors::EntityResult;

/// Resolves the caller of a request from its bearer token
#[async_trait]
pub trait IdentityProvider: Send + Sync {
    /// An unknown, expired or missing token yields [`Actor::anonymous`]
    async fn resolve(&self, token: Option<&str>) -> EntityResult<Actor>;
}

/// Looks tokens up in `user_sessions`. Sessions are written by the external
/// auth service; this side only reads them.
#[derive(Clone)]
pub struct SessionIdentityProvider {
    db: DatabaseConnection,
}

impl SessionIdentityProvider {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl IdentityProvider for SessionIdentityProvider {
    async fn resolve(&self, token: Option<&str>) -> EntityResult<Actor> {
        let Some(token) = token.map(str::trim).filter(|t| !t.is_empty()) else {
            return Ok(Actor::anonymous());
        };

        let session = user_sessions::Entity::find()
            .filter(user_sessions::Column::SessionId.eq(token))
            .filter(user_sessions::Column::IsActive.eq(true))
            .filter(user_sessions::Column::ExpiresAt.gt(Utc::now()))
            .one(&self.db)
            .await?;

        let Some(session) = session else {
            tracing::debug!("no live session for token");
            return Ok(Actor::anonymous());
        };

        let user = users::Entity::find_by_id(session.user_id)
            .filter(users::Column::State.eq(EntityState::Active))
            .one(&self.db)
            .await?;

        let Some(user) = user else {
            tracing::debug!(user_id = session.user_id, "session belongs to an inactive user");
            return Ok(Actor::anonymous());
        };

        let assigned = user.find_related(roles::Entity).all(&self.db).await?;

        let actor = assigned.into_iter().fold(
            Actor::user(user.id, user.email).with_location(user.location),
            |actor, role| actor.with_role(role.role),
        );
        Ok(actor)
    }
}
