use super::types::{request, response};
use crate::{
    modules::{
        auth::service::{password, token},
        user,
    },
    types::Context,
};
use std::sync::Arc;
use validator::Validate;

pub async fn service(ctx: Arc<Context>, payload: request::Payload) -> response::Response {
    payload
        .validate()
        .map_err(response::Error::FailedToValidate)?;

    let user = user::repository::find_by_email(&ctx.db_conn.pool, payload.email.to_lowercase())
        .await
        .map_err(|_| response::Error::FailedToFetchUser)?
        .ok_or(response::Error::InvalidCredentials)?;

    if !password::verify_in_background(payload.password, user.password.clone()).await {
        tracing::debug!("Rejected login attempt for user {}", user.id);
        return Err(response::Error::InvalidCredentials);
    }

    let tokens = token::issue_token_pair(&ctx.auth, token::Identity::from(&user)).map_err(|err| {
        tracing::error!("Failed to issue tokens for user {}: {}", user.id, err);
        response::Error::UnexpectedError
    })?;

    token::persist_token_pair(&ctx.db_conn.pool, user.id.clone(), &tokens)
        .await
        .map_err(|_| response::Error::UnexpectedError)?;

    Ok(response::Success::LoggedIn(user, tokens))
}
