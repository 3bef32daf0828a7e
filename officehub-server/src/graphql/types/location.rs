use async_graphql::*;
use officehub::database::entities::{locations, EntityState};

#[derive(SimpleObject, Clone)]
pub struct Location {
    pub id: i32,
    pub name: String,
    pub abbreviation: String,
    pub country: String,
    pub image_url: Option<String>,
    pub time_zone: String,
    pub state: EntityState,
}

impl From<locations::Model> for Location {
    fn from(model: locations::Model) -> Self {
        Self {
            id: model.id,
            name: model.name,
            abbreviation: model.abbreviation,
            country: model.country,
            image_url: model.image_url,
            time_zone: model.time_zone,
            state: model.state,
        }
    }
}
