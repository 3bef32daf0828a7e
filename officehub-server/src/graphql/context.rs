use std::sync::Arc;

use async_graphql::{Context, Result};
use officehub::auth::Actor;
use officehub::errors::ResultExt;
use officehub::services::{IdentityProvider, SessionIdentityProvider};
use officehub::AppContext;

#[derive(Clone)]
pub struct GraphQLContext {
    pub app: Arc<AppContext>,
    pub identity: Arc<dyn IdentityProvider>,
}

/// Bearer token taken from the `Authorization` header of the HTTP request
#[derive(Clone, Debug)]
pub struct AuthToken(pub String);

impl AuthToken {
    /// Parse an `Authorization` header value. The `Bearer` prefix is optional.
    pub fn from_header(value: &str) -> Option<Self> {
        let value = value.trim();
        let token = match value.split_once(' ') {
            Some((scheme, rest)) if scheme.eq_ignore_ascii_case("bearer") => rest.trim(),
            None if value.eq_ignore_ascii_case("bearer") => "",
            _ => value,
        };

        (!token.is_empty()).then(|| Self(token.to_string()))
    }
}

impl GraphQLContext {
    pub fn new(app: AppContext) -> Self {
        let identity = Arc::new(SessionIdentityProvider::new(app.db().clone()));
        Self::with_identity(app, identity)
    }

    pub fn with_identity(app: AppContext, identity: Arc<dyn IdentityProvider>) -> Self {
        Self {
            app: Arc::new(app),
            identity,
        }
    }

    /// Resolve the caller of the current request
    pub async fn actor(&self, ctx: &Context<'_>) -> Result<Actor> {
        let token = ctx.data_opt::<AuthToken>().map(|token| token.0.as_str());
        self.identity.resolve(token).await.to_graphql_result()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_token_from_header() {
        let token = |header: &str| AuthToken::from_header(header).map(|t| t.0);
        assert_eq!(token("Bearer abc123"), Some("abc123".to_string()));
        assert_eq!(token(" abc123 "), Some("abc123".to_string()));
        assert!(AuthToken::from_header("Bearer   ").is_none());
    }
}
