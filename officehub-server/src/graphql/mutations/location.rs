use async_graphql::*;
use officehub::app_context::{LocationUpdate, NewLocation};
use officehub::errors::ResultExt;

use crate::graphql::context::GraphQLContext;
use crate::graphql::types::Location;

#[derive(InputObject)]
pub struct CreateLocationInput {
    pub name: String,
    pub abbreviation: String,
    pub country: String,
    pub image_url: Option<String>,
    pub time_zone: String,
}

#[derive(InputObject)]
pub struct UpdateLocationInput {
    pub name: Option<String>,
    pub abbreviation: Option<String>,
    pub country: Option<String>,
    pub image_url: Option<String>,
    pub time_zone: Option<String>,
}

#[derive(Default)]
pub struct LocationMutation;

#[Object]
impl LocationMutation {
    async fn create_location(
        &self,
        ctx: &Context<'_>,
        input: CreateLocationInput,
    ) -> Result<Location> {
        let context = ctx.data::<GraphQLContext>()?;
        let actor = context.actor(ctx).await?;

        let location = NewLocation {
            name: input.name,
            abbreviation: input.abbreviation,
            country: input.country,
            image_url: input.image_url,
            time_zone: input.time_zone,
        };
        let location = context
            .app
            .create_location(&actor, location)
            .await
            .to_graphql_result()?;
        Ok(Location::from(location))
    }

    async fn update_location(
        &self,
        ctx: &Context<'_>,
        location_id: i32,
        input: UpdateLocationInput,
    ) -> Result<Location> {
        let context = ctx.data::<GraphQLContext>()?;
        let actor = context.actor(ctx).await?;

        let update = LocationUpdate {
            name: input.name,
            abbreviation: input.abbreviation,
            country: input.country,
            image_url: input.image_url,
            time_zone: input.time_zone,
        };
        let location = context
            .app
            .update_location(&actor, location_id, update)
            .await
            .to_graphql_result()?;
        Ok(Location::from(location))
    }

    async fn delete_location(&self, ctx: &Context<'_>, location_id: i32) -> Result<Location> {
        let context = ctx.data::<GraphQLContext>()?;
        let actor = context.actor(ctx).await?;

        let location = context
            .app
            .delete_location(&actor, location_id)
            .await
            .to_graphql_result()?;
        Ok(Location::from(location))
    }
}
