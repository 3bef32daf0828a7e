use async_graphql::*;
use officehub::database::entities::{users, EntityState};
use officehub::errors::ResultExt;

use crate::graphql::context::GraphQLContext;

#[derive(SimpleObject, Clone)]
#[graphql(complex)]
pub struct User {
    pub id: i32,
    pub email: String,
    pub name: String,
    pub location: Option<String>,
    pub picture: Option<String>,
    pub state: EntityState,
}

impl From<users::Model> for User {
    fn from(model: users::Model) -> Self {
        Self {
            id: model.id,
            email: model.email,
            name: model.name,
            location: model.location,
            picture: model.picture,
            state: model.state,
        }
    }
}

#[ComplexObject]
impl User {
    async fn roles(&self, ctx: &Context<'_>) -> Result<Vec<String>> {
        let context = ctx.data::<GraphQLContext>()?;
        context.app.roles_for_user(self.id).await.to_graphql_result()
    }
}
