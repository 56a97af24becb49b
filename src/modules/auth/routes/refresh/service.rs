use super::types::{request, response};
use crate::{
    modules::{
        auth::service::token::{self, Claims, TokenType},
        user,
    },
    types::{AuthContext, Context},
};
use std::sync::Arc;

fn refresh_claims(ctx: &AuthContext, refresh_token: &str) -> Result<Claims, response::Error> {
    let claims = token::validate_token(ctx, refresh_token).map_err(|err| match err {
        token::Error::ConfigError => response::Error::UnexpectedError,
        err => {
            tracing::debug!("Rejected refresh token: {}", err);
            response::Error::InvalidRefreshToken
        }
    })?;

    match claims.token_type {
        TokenType::Refresh => Ok(claims),
        TokenType::Access => Err(response::Error::InvalidRefreshToken),
    }
}

pub async fn service(ctx: Arc<Context>, payload: request::Payload) -> response::Response {
    let claims = refresh_claims(&ctx.auth, &payload.refresh_token)?;

    let user = user::repository::find_by_id(&ctx.db_conn.pool, claims.uid)
        .await
        .map_err(|_| response::Error::UnexpectedError)?
        .ok_or(response::Error::InvalidRefreshToken)?;

    // A refresh token is single use; rotation replaces the stored one.
    if user.refresh_token.as_deref() != Some(payload.refresh_token.as_str()) {
        return Err(response::Error::InvalidRefreshToken);
    }

    let tokens = token::issue_token_pair(&ctx.auth, token::Identity::from(&user)).map_err(|err| {
        tracing::error!("Failed to issue tokens for user {}: {}", user.id, err);
        response::Error::UnexpectedError
    })?;

    token::persist_token_pair(&ctx.db_conn.pool, user.id, &tokens)
        .await
        .map_err(|err| match err {
            token::PersistError::NotFound => response::Error::InvalidRefreshToken,
            token::PersistError::UnexpectedError => response::Error::UnexpectedError,
        })?;

    Ok(response::Success::Refreshed(tokens))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::modules::auth::service::token::Identity;

    fn identity() -> Identity {
        Identity {
            email: "ada@example.com".to_string(),
            first_name: "Ada".to_string(),
            last_name: "Lovelace".to_string(),
            uid: "01HZZZZZZZZZZZZZZZZZZZZZZZ".to_string(),
        }
    }

    #[test]
    fn accepts_refresh_tokens() {
        let ctx = AuthContext::new(Some("refresh-secret".to_string()));
        let pair = token::issue_token_pair(&ctx, identity()).unwrap();

        let claims = refresh_claims(&ctx, &pair.refresh_token).unwrap();
        assert_eq!(claims.token_type, TokenType::Refresh);
        assert_eq!(claims.uid, identity().uid);
    }

    #[test]
    fn rejects_access_tokens() {
        let ctx = AuthContext::new(Some("refresh-secret".to_string()));
        let pair = token::issue_token_pair(&ctx, identity()).unwrap();

        assert!(matches!(
            refresh_claims(&ctx, &pair.access_token),
            Err(response::Error::InvalidRefreshToken)
        ));
    }

    #[test]
    fn missing_secret_is_a_server_error() {
        let ctx = AuthContext::new(None);

        assert!(matches!(
            refresh_claims(&ctx, "a.b.c"),
            Err(response::Error::UnexpectedError)
        ));
    }
}
