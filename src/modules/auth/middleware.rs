use super::service::token::{self, Claims, TokenType};
use crate::modules::user::{self, repository::User};
use crate::types::Context;
use axum::extract::{Extension, FromRequestParts};
use axum::http::{request::Parts, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::{async_trait, Json, RequestPartsExt};
use axum_extra::{
    headers::{authorization::Bearer, Authorization},
    TypedHeader,
};
use serde_json::json;
use std::sync::Arc;

enum Error {
    MissingToken,
    InvalidSession,
    UnexpectedError,
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        match self {
            Self::MissingToken => (
                StatusCode::UNAUTHORIZED,
                Json(json!({ "error": "No Authorization header provided" })),
            )
                .into_response(),
            Self::InvalidSession => (
                StatusCode::UNAUTHORIZED,
                Json(json!({ "error": "Invalid session token" })),
            )
                .into_response(),
            Self::UnexpectedError => (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({ "error": "Sorry an error occurred" })),
            )
                .into_response(),
        }
    }
}

async fn get_user_from_token(ctx: Arc<Context>, token: &str) -> Result<(User, Claims), Error> {
    let claims = token::validate_token(&ctx.auth, token).map_err(|err| match err {
        token::Error::ConfigError => Error::UnexpectedError,
        err => {
            tracing::debug!("Rejected access token: {}", err);
            Error::InvalidSession
        }
    })?;

    if claims.token_type != TokenType::Access {
        return Err(Error::InvalidSession);
    }

    let user = user::repository::find_by_id(&ctx.db_conn.pool, claims.uid.clone())
        .await
        .map_err(|_| Error::UnexpectedError)?
        .ok_or(Error::InvalidSession)?;

    // Only the most recently issued access token is accepted.
    if user.token.as_deref() != Some(token) {
        return Err(Error::InvalidSession);
    }

    Ok((user, claims))
}

#[derive(Clone)]
pub struct Auth {
    pub user: User,
    pub claims: Claims,
}

#[async_trait]
impl<S: Send + Sync> FromRequestParts<S> for Auth {
    type Rejection = Response;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let Extension(ctx) = parts
            .extract::<Extension<Arc<Context>>>()
            .await
            .map_err(|err| {
                tracing::error!("Context missing from request extensions: {}", err);
                Error::UnexpectedError.into_response()
            })?;

        let TypedHeader(Authorization(bearer)) = parts
            .extract::<TypedHeader<Authorization<Bearer>>>()
            .await
            .map_err(|_| Error::MissingToken.into_response())?;

        get_user_from_token(ctx, bearer.token())
            .await
            .map(|(user, claims)| Self { user, claims })
            .map_err(IntoResponse::into_response)
    }
}
