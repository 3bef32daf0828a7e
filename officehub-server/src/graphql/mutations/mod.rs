mod location;
mod office;
mod room;
mod tag;
mod user;

use async_graphql::*;

/// Mutation root combining the per-resource mutations
#[derive(Default, MergedObject)]
pub struct Mutation(
    pub location::LocationMutation,
    pub office::OfficeMutation,
    pub room::RoomMutation,
    pub tag::TagMutation,
    pub user::UserMutation,
);
