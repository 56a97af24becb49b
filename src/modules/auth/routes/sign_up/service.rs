use super::types::{request, response};
use crate::{
    modules::{
        auth::service::{password, token},
        user::{self, repository::User},
    },
    types::Context,
    utils::database::timed,
};
use std::sync::Arc;
use validator::Validate;

fn conflict_with(existing: &User, email: &str) -> response::Error {
    if existing.email == email {
        return response::Error::EmailAlreadyInUse;
    }

    response::Error::PhoneNumberAlreadyInUse
}

pub async fn service(ctx: Arc<Context>, payload: request::Payload) -> response::Response {
    payload.validate().map_err(|errors| {
        tracing::warn!("Failed to validate payload: {errors}");
        response::Error::FailedToValidate(errors)
    })?;

    let email = payload.email.to_lowercase();

    if let Some(existing) = user::repository::find_by_email_or_phone(
        &ctx.db_conn.pool,
        user::repository::FindByEmailOrPhone {
            email: email.clone(),
            phone: payload.phone.clone(),
        },
    )
    .await
    .map_err(|_| response::Error::FailedToFetchUser)?
    {
        return Err(conflict_with(&existing, &email));
    }

    let password_hash = password::hash_in_background(payload.password)
        .await
        .map_err(|_| response::Error::SignupFailed)?;

    let mut tx = timed(ctx.db_conn.pool.begin()).await.map_err(|err| {
        tracing::error!("Failed to start database transaction: {}", err);
        response::Error::UnexpectedError
    })?;

    let user = user::repository::create(
        &mut *tx,
        user::repository::CreateUserPayload {
            first_name: payload.first_name,
            last_name: payload.last_name,
            email,
            phone: payload.phone,
            password_hash,
            avatar: payload.avatar,
        },
    )
    .await
    .map_err(|err| match err {
        user::repository::Error::EmailAlreadyInUse => response::Error::EmailAlreadyInUse,
        user::repository::Error::PhoneNumberAlreadyInUse => {
            response::Error::PhoneNumberAlreadyInUse
        }
        user::repository::Error::UnexpectedError => response::Error::SignupFailed,
    })?;

    let tokens = token::issue_token_pair(&ctx.auth, token::Identity::from(&user)).map_err(|err| {
        tracing::error!("Failed to issue tokens for user {}: {}", user.id, err);
        response::Error::UnexpectedError
    })?;

    token::persist_token_pair(&mut *tx, user.id.clone(), &tokens)
        .await
        .map_err(|_| response::Error::SignupFailed)?;

    timed(tx.commit()).await.map_err(|err| {
        tracing::error!("Failed to commit database transaction: {}", err);
        response::Error::UnexpectedError
    })?;

    tracing::info!("User {} signed up", user.id);

    Ok(response::Success::SignedUp(user, tokens))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn existing_user() -> User {
        let now = Utc::now().naive_utc();

        User {
            id: "01J0000000000000000000000".to_string(),
            first_name: "Grace".to_string(),
            last_name: "Hopper".to_string(),
            email: "grace@example.com".to_string(),
            phone: "+15550100".to_string(),
            password: String::new(),
            avatar: None,
            token: None,
            refresh_token: None,
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn reused_email_is_reported_first() {
        assert!(matches!(
            conflict_with(&existing_user(), "grace@example.com"),
            response::Error::EmailAlreadyInUse
        ));
    }

    #[test]
    fn reused_phone_is_reported_when_email_differs() {
        assert!(matches!(
            conflict_with(&existing_user(), "someone@example.com"),
            response::Error::PhoneNumberAlreadyInUse
        ));
    }

    #[test]
    fn rejects_invalid_payloads_before_touching_the_store() {
        let payload = request::Payload {
            first_name: "G".to_string(),
            last_name: "Hopper".to_string(),
            email: "not-an-email".to_string(),
            phone: "call me".to_string(),
            password: "123".to_string(),
            avatar: Some("not a url".to_string()),
        };

        let errors = payload.validate().unwrap_err();
        let fields = errors.field_errors();

        for field in ["first_name", "email", "phone", "password", "avatar"] {
            assert!(fields.contains_key(field), "{} should be invalid", field);
        }
        assert!(!fields.contains_key("last_name"));
    }
}
