use async_graphql::*;
use officehub::app_context::{NewRoom, RoomUpdate};
use officehub::errors::ResultExt;

use crate::graphql::context::GraphQLContext;
use crate::graphql::types::Room;

#[derive(InputObject)]
pub struct CreateRoomInput {
    pub name: String,
    pub room_type: String,
    pub capacity: i32,
    pub location_id: i32,
    pub calendar_id: Option<String>,
    pub image_url: Option<String>,
}

#[derive(InputObject)]
pub struct UpdateRoomInput {
    pub name: Option<String>,
    pub room_type: Option<String>,
    pub capacity: Option<i32>,
    pub calendar_id: Option<String>,
    pub image_url: Option<String>,
}

#[derive(Default)]
pub struct RoomMutation;

#[Object]
impl RoomMutation {
    async fn create_room(&self, ctx: &Context<'_>, input: CreateRoomInput) -> Result<Room> {
        let context = ctx.data::<GraphQLContext>()?;
        let actor = context.actor(ctx).await?;

        let room = NewRoom {
            name: input.name,
            room_type: input.room_type,
            capacity: input.capacity,
            location_id: input.location_id,
            calendar_id: input.calendar_id,
            image_url: input.image_url,
        };
        let room = context.app.create_room(&actor, room).await.to_graphql_result()?;
        Ok(Room::from(room))
    }

    async fn update_room(
        &self,
        ctx: &Context<'_>,
        room_id: i32,
        input: UpdateRoomInput,
    ) -> Result<Room> {
        let context = ctx.data::<GraphQLContext>()?;
        let actor = context.actor(ctx).await?;

        let update = RoomUpdate {
            name: input.name,
            room_type: input.room_type,
            capacity: input.capacity,
            calendar_id: input.calendar_id,
            image_url: input.image_url,
        };
        let room = context
            .app
            .update_room(&actor, room_id, update)
            .await
            .to_graphql_result()?;
        Ok(Room::from(room))
    }

    async fn delete_room(&self, ctx: &Context<'_>, room_id: i32) -> Result<Room> {
        let context = ctx.data::<GraphQLContext>()?;
        let actor = context.actor(ctx).await?;

        let room = context.app.delete_room(&actor, room_id).await.to_graphql_result()?;
        Ok(Room::from(room))
    }
}
