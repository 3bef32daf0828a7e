use async_graphql::*;
use officehub::app_context::RoomFilter;
use officehub::errors::ResultExt;

use crate::graphql::context::GraphQLContext;
use crate::graphql::types::{Location, Office, Paginated, Room, Tag, User};

pub struct Query;

#[Object]
impl Query {
    /// Active offices ordered by name; paged when `page` is given
    async fn all_offices(
        &self,
        ctx: &Context<'_>,
        page: Option<i32>,
        per_page: Option<i32>,
    ) -> Result<Paginated<Office>> {
        let context = ctx.data::<GraphQLContext>()?;
        let page = context
            .app
            .list_offices(page, per_page)
            .await
            .to_graphql_result()?;
        Ok(Paginated::from_page(page))
    }

    async fn get_office_by_name(&self, ctx: &Context<'_>, name: String) -> Result<Vec<Office>> {
        let context = ctx.data::<GraphQLContext>()?;
        let offices = context
            .app
            .get_office_by_name(&name)
            .await
            .to_graphql_result()?;
        Ok(offices.into_iter().map(Office::from).collect())
    }

    async fn all_locations(&self, ctx: &Context<'_>) -> Result<Vec<Location>> {
        let context = ctx.data::<GraphQLContext>()?;
        let locations = context.app.list_locations().await.to_graphql_result()?;
        Ok(locations.into_iter().map(Location::from).collect())
    }

    async fn all_tags(&self, ctx: &Context<'_>) -> Result<Vec<Tag>> {
        let context = ctx.data::<GraphQLContext>()?;
        let tags = context.app.list_tags().await.to_graphql_result()?;
        Ok(tags.into_iter().map(Tag::from).collect())
    }

    /// Active rooms, optionally filtered by exact capacity and location name
    async fn all_rooms(
        &self,
        ctx: &Context<'_>,
        capacity: Option<i32>,
        location: Option<String>,
        page: Option<i32>,
        per_page: Option<i32>,
    ) -> Result<Paginated<Room>> {
        let context = ctx.data::<GraphQLContext>()?;
        let filter = RoomFilter { capacity, location };
        let page = context
            .app
            .list_rooms(filter, page, per_page)
            .await
            .to_graphql_result()?;
        Ok(Paginated::from_page(page))
    }

    async fn users(
        &self,
        ctx: &Context<'_>,
        page: Option<i32>,
        per_page: Option<i32>,
    ) -> Result<Paginated<User>> {
        let context = ctx.data::<GraphQLContext>()?;
        let actor = context.actor(ctx).await?;
        let page = context
            .app
            .list_users(&actor, page, per_page)
            .await
            .to_graphql_result()?;
        Ok(Paginated::from_page(page))
    }

    async fn get_user_by_email(&self, ctx: &Context<'_>, email: String) -> Result<User> {
        let context = ctx.data::<GraphQLContext>()?;
        let actor = context.actor(ctx).await?;
        let user = context
            .app
            .get_user_by_email(&actor, &email)
            .await
            .to_graphql_result()?;
        Ok(User::from(user))
    }
}
