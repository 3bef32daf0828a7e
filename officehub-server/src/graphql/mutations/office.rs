use async_graphql::*;
use officehub::app_context::{NewOffice, OfficeUpdate};
use officehub::errors::ResultExt;

use crate::graphql::context::GraphQLContext;
use crate::graphql::types::Office;

#[derive(Default)]
pub struct OfficeMutation;

#[Object]
impl OfficeMutation {
    /// Create an office in a location. When the admin notification cannot be
    /// sent the office is still created and the error carries `committed`.
    async fn create_office(
        &self,
        ctx: &Context<'_>,
        name: String,
        location_id: i32,
    ) -> Result<Office> {
        let context = ctx.data::<GraphQLContext>()?;
        let actor = context.actor(ctx).await?;

        let outcome = context
            .app
            .create_office(&actor, NewOffice { name, location_id })
            .await
            .to_graphql_result()?;
        let office = outcome.into_result().to_graphql_result()?;
        Ok(Office::from(office))
    }

    async fn update_office(
        &self,
        ctx: &Context<'_>,
        office_id: i32,
        name: Option<String>,
    ) -> Result<Office> {
        let context = ctx.data::<GraphQLContext>()?;
        let actor = context.actor(ctx).await?;

        let office = context
            .app
            .update_office(&actor, office_id, OfficeUpdate { name })
            .await
            .to_graphql_result()?;
        Ok(Office::from(office))
    }

    async fn delete_office(&self, ctx: &Context<'_>, office_id: i32) -> Result<Office> {
        let context = ctx.data::<GraphQLContext>()?;
        let actor = context.actor(ctx).await?;

        let office = context
            .app
            .delete_office(&actor, office_id)
            .await
            .to_graphql_result()?;
        Ok(Office::from(office))
    }
}
