use async_graphql::*;
use officehub::app_context::NewUser;
use officehub::errors::ResultExt;

use crate::graphql::context::GraphQLContext;
use crate::graphql::types::User;

#[derive(Default)]
pub struct UserMutation;

#[Object]
impl UserMutation {
    async fn create_user(
        &self,
        ctx: &Context<'_>,
        email: String,
        name: String,
        location: Option<String>,
        picture: Option<String>,
    ) -> Result<User> {
        let context = ctx.data::<GraphQLContext>()?;
        let actor = context.actor(ctx).await?;

        let user = NewUser {
            email,
            name,
            location,
            picture,
        };
        let user = context.app.create_user(&actor, user).await.to_graphql_result()?;
        Ok(User::from(user))
    }

    async fn delete_user(&self, ctx: &Context<'_>, user_id: i32) -> Result<User> {
        let context = ctx.data::<GraphQLContext>()?;
        let actor = context.actor(ctx).await?;

        let user = context.app.delete_user(&actor, user_id).await.to_graphql_result()?;
        Ok(User::from(user))
    }

    /// Give the user with `email` an additional role
    async fn assign_role(&self, ctx: &Context<'_>, email: String, role: String) -> Result<User> {
        let context = ctx.data::<GraphQLContext>()?;
        let actor = context.actor(ctx).await?;

        let user = context
            .app
            .assign_role(&actor, &email, &role)
            .await
            .to_graphql_result()?;
        Ok(User::from(user))
    }
}
