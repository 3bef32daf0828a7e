use async_graphql::*;
use officehub::database::entities::{offices, EntityState};
use officehub::errors::ResultExt;

use crate::graphql::context::GraphQLContext;
use crate::graphql::types::Location;

#[derive(SimpleObject, Clone)]
#[graphql(complex)]
pub struct Office {
    pub id: i32,
    pub name: String,
    pub location_id: i32,
    pub state: EntityState,
}

impl From<offices::Model> for Office {
    fn from(model: offices::Model) -> Self {
        Self {
            id: model.id,
            name: model.name,
            location_id: model.location_id,
            state: model.state,
        }
    }
}

#[ComplexObject]
impl Office {
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
