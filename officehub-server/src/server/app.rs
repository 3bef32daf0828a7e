use anyhow::{Context as _, Result};
use async_graphql_axum::{GraphQLRequest, GraphQLResponse};
use axum::{
    extract::State,
    http::{header::AUTHORIZATION, HeaderMap, HeaderValue},
    response::{Html, IntoResponse},
    routing::get,
    Router,
};
use officehub::AppContext;
use tower::ServiceBuilder;
use tower_http::cors::{Any, CorsLayer};

use super::handlers::health;
use crate::graphql::context::{AuthToken, GraphQLContext};
use crate::graphql::{build_schema, OfficeHubSchema};

#[derive(Clone)]
pub struct AppState {
    pub schema: OfficeHubSchema,
}

pub fn create_app(app: AppContext, cors_origin: Option<&str>) -> Result<Router> {
    let state = AppState {
        schema: build_schema(GraphQLContext::new(app)),
    };

    let cors = match cors_origin {
        Some(origin) => CorsLayer::new()
            .allow_origin(
                origin
                    .parse::<HeaderValue>()
                    .with_context(|| format!("Invalid CORS origin {}", origin))?,
            )
            .allow_methods(Any)
            .allow_headers(Any),
        None => CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any),
    };

    let app = Router::new()
        .route("/health", get(health::health_check))
        .route("/graphql", get(graphql_playground).post(graphql_handler))
        .layer(ServiceBuilder::new().layer(cors))
        .with_state(state);

    Ok(app)
}

async fn graphql_handler(
    State(state): State<AppState>,
    headers: HeaderMap,
    request: GraphQLRequest,
) -> GraphQLResponse {
    let mut request = request.into_inner();

    let token = headers
        .get(AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(AuthToken::from_header);
    if let Some(token) = token {
        request = request.data(token);
    }

    state.schema.execute(request).await.into()
}

async fn graphql_playground() -> impl IntoResponse {
    Html(async_graphql::http::playground_source(
        async_graphql::http::GraphQLPlaygroundConfig::new("/graphql"),
    ))
}
