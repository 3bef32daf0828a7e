use async_graphql::*;
use officehub::app_context::{NewTag, TagUpdate};
use officehub::errors::ResultExt;

use crate::graphql::context::GraphQLContext;
use crate::graphql::types::Tag;

#[derive(Default)]
pub struct TagMutation;

#[Object]
impl TagMutation {
    async fn create_tag(
        &self,
        ctx: &Context<'_>,
        name: String,
        color: String,
        description: String,
    ) -> Result<Tag> {
        let context = ctx.data::<GraphQLContext>()?;
        let actor = context.actor(ctx).await?;

        let tag = context
            .app
            .create_tag(&actor, NewTag { name, color, description })
            .await
            .to_graphql_result()?;
        Ok(Tag::from(tag))
    }

    async fn update_tag(
        &self,
        ctx: &Context<'_>,
        tag_id: i32,
        name: Option<String>,
        color: Option<String>,
        description: Option<String>,
    ) -> Result<Tag> {
        let context = ctx.data::<GraphQLContext>()?;
        let actor = context.actor(ctx).await?;

        let update = TagUpdate {
            name,
            color,
            description,
        };
        let tag = context
            .app
            .update_tag(&actor, tag_id, update)
            .await
            .to_graphql_result()?;
        Ok(Tag::from(tag))
    }

    async fn delete_tag(&self, ctx: &Context<'_>, tag_id: i32) -> Result<Tag> {
        let context = ctx.data::<GraphQLContext>()?;
        let actor = context.actor(ctx).await?;

        let tag = context.app.delete_tag(&actor, tag_id).await.to_graphql_result()?;
        Ok(Tag::from(tag))
    }
}
