use crate::define_find_many;
use crate::utils::database::{timed, Collection, QueryError};
use chrono::{NaiveDateTime, Utc};
use serde::Serialize;
use sqlx::{FromRow, PgExecutor};
use ulid::Ulid;

type Result<T> = std::result::Result<T, Error>;

#[derive(Serialize, FromRow, Clone, Debug)]
pub struct User {
    pub id: String,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: String,
    #[serde(skip_serializing)]
    pub password: String,
    pub avatar: Option<String>,
    #[serde(skip_serializing)]
    pub token: Option<String>,
    #[serde(skip_serializing)]
    pub refresh_token: Option<String>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

pub struct CreateUserPayload {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: String,
    pub password_hash: String,
    pub avatar: Option<String>,
}

const EMAIL_CONSTRAINT: &str = "users_email_key";
const PHONE_CONSTRAINT: &str = "users_phone_key";

#[derive(Debug, PartialEq)]
pub enum Error {
    EmailAlreadyInUse,
    PhoneNumberAlreadyInUse,
    UnexpectedError,
}

/// Maps a violated unique constraint on `users` to the field it guards.
fn conflict(constraint: &str) -> Option<Error> {
    match constraint {
        EMAIL_CONSTRAINT => Some(Error::EmailAlreadyInUse),
        PHONE_CONSTRAINT => Some(Error::PhoneNumberAlreadyInUse),
        _ => None,
    }
}

pub async fn create<'e, E>(e: E, payload: CreateUserPayload) -> Result<User>
where
    E: PgExecutor<'e>,
{
    let now = Utc::now().naive_utc();

    timed(
        sqlx::query_as::<_, User>(
            "
            INSERT INTO users (
                id,
                first_name,
                last_name,
                email,
                phone,
                password,
                avatar,
                created_at,
                updated_at
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $8)
            RETURNING *
            ",
        )
        .bind(Ulid::new().to_string())
        .bind(payload.first_name)
        .bind(payload.last_name)
        .bind(payload.email)
        .bind(payload.phone)
        .bind(payload.password_hash)
        .bind(payload.avatar)
        .bind(now)
        .fetch_one(e),
    )
    .await
    .map_err(|err: QueryError| {
        if let Some(error) = err.violated_unique_constraint().and_then(conflict) {
            tracing::warn!("Refused to create a user account: {:?}", error);
            return error;
        }

        tracing::error!("Error occured while creating a user account: {}", err);
        Error::UnexpectedError
    })
}

pub async fn find_by_id<'e, E: PgExecutor<'e>>(e: E, id: String) -> Result<Option<User>> {
    timed(
        sqlx::query_as::<_, User>("SELECT * FROM users WHERE id = $1")
            .bind(&id)
            .fetch_optional(e),
    )
    .await
    .map_err(|err| {
        tracing::error!("Error occurred while fetching user with id {}: {}", id, err);
        Error::UnexpectedError
    })
}

pub async fn find_by_email<'e, E: PgExecutor<'e>>(e: E, email: String) -> Result<Option<User>> {
    timed(
        sqlx::query_as::<_, User>("SELECT * FROM users WHERE email = $1")
            .bind(&email)
            .fetch_optional(e),
    )
    .await
    .map_err(|err| {
        tracing::error!("Error occurred while fetching user by email: {}", err);
        Error::UnexpectedError
    })
}

pub struct FindByEmailOrPhone {
    pub email: String,
    pub phone: String,
}

pub async fn find_by_email_or_phone<'e, E: PgExecutor<'e>>(
    e: E,
    payload: FindByEmailOrPhone,
) -> Result<Option<User>> {
    timed(
        sqlx::query_as::<_, User>("SELECT * FROM users WHERE email = $1 OR phone = $2 LIMIT 1")
            .bind(payload.email)
            .bind(payload.phone)
            .fetch_optional(e),
    )
    .await
    .map_err(|err| {
        tracing::error!(
            "Error occurred while fetching user by email or phone: {}",
            err
        );
        Error::UnexpectedError
    })
}

define_find_many!(User, Collection::Users);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unique_constraints_map_to_the_guarded_field() {
        assert_eq!(conflict("users_email_key"), Some(Error::EmailAlreadyInUse));
        assert_eq!(
            conflict("users_phone_key"),
            Some(Error::PhoneNumberAlreadyInUse)
        );
        assert_eq!(conflict("users_pkey"), None);
    }
}
