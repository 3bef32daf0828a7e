pub mod context;
pub mod mutations;
pub mod queries;
pub mod types;

use async_graphql::{EmptySubscription, Schema};

use context::GraphQLContext;
use mutations::Mutation;
use queries::Query;

pub type OfficeHubSchema = Schema<Query, Mutation, EmptySubscription>;

pub fn build_schema(context: GraphQLContext) -> OfficeHubSchema {
    Schema::build(Query, Mutation::default(), EmptySubscription)
        .data(context)
        .finish()
}
