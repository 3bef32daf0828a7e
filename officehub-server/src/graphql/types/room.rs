use async_graphql::*;
use officehub::database::entities::{rooms, EntityState};
use officehub::errors::ResultExt;

use crate::graphql::context::GraphQLContext;
use crate::graphql::types::Location;

#[derive(SimpleObject, Clone)]
#[graphql(complex)]
pub struct Room {
    pub id: i32,
    pub name: String,
    pub room_type: String,
    pub capacity: i32,
    pub location_id: i32,
    pub calendar_id: Option<String>,
    pub image_url: Option<String>,
    pub state: EntityState,
}

impl From<rooms::Model> for Room {
    fn from(model: rooms::Model) -> Self {
        Self {
            id: model.id,
            name: model.name,
            room_type: model.room_type,
            capacity: model.capacity,
            location_id: model.location_id,
            calendar_id: model.calendar_id,
            image_url: model.image_url,
            state: model.state,
        }
    }
}

#[ComplexObject]
impl Room {
    async fn location(&self, ctx: &Context<'_>) -> Result<Location> {
        let context = ctx.data::<GraphQLContext>()?;
        let location = context
            .app
            .location(self.location_id)
            .await
            .to_graphql_result()?;
        Ok(Location::from(location))
    }
}
