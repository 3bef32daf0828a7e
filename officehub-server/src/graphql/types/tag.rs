use async_graphql::*;
use officehub::database::entities::{tags, EntityState};

#[derive(SimpleObject, Clone)]
pub struct Tag {
    pub id: i32,
    pub name: String,
    pub color: String,
    pub description: String,
    pub state: EntityState,
}

impl From<tags::Model> for Tag {
    fn from(model: tags::Model) -> Self {
        Self {
            id: model.id,
            name: model.name,
            color: model.color,
            description: model.description,
            state: model.state,
        }
    }
}
