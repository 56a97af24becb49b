use crate::define_find_many;
use crate::utils::database::{timed, Collection};
use chrono::{NaiveDateTime, Utc};
use serde::Serialize;
use sqlx::{FromRow, PgExecutor};
use ulid::Ulid;

type Result<T> = std::result::Result<T, Error>;

#[derive(Serialize, FromRow, Clone, Debug)]
pub struct Menu {
    pub id: String,
    pub name: String,
    pub category: String,
    pub start_date: Option<NaiveDateTime>,
    pub end_date: Option<NaiveDateTime>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

pub struct CreateMenuPayload {
    pub name: String,
    pub category: String,
    pub start_date: Option<NaiveDateTime>,
    pub end_date: Option<NaiveDateTime>,
}

pub struct UpdateMenuPayload {
    pub name: Option<String>,
    pub category: Option<String>,
    pub start_date: Option<NaiveDateTime>,
    pub end_date: Option<NaiveDateTime>,
}

#[derive(Debug)]
pub enum Error {
    UnexpectedError,
}

pub async fn create<'e, E: PgExecutor<'e>>(e: E, payload: CreateMenuPayload) -> Result<Menu> {
    timed(
        sqlx::query_as::<_, Menu>(
            "
            INSERT INTO menus (
                id,
                name,
                category,
                start_date,
                end_date,
                created_at,
                updated_at
            )
            VALUES ($1, $2, $3, $4, $5, $6, $6)
            RETURNING *
            ",
        )
        .bind(Ulid::new().to_string())
        .bind(payload.name)
        .bind(payload.category)
        .bind(payload.start_date)
        .bind(payload.end_date)
        .bind(Utc::now().naive_utc())
        .fetch_one(e),
    )
    .await
    .map_err(|err| {
        tracing::error!("Error occurred while creating a menu: {}", err);
        Error::UnexpectedError
    })
}

pub async fn find_by_id<'e, E: PgExecutor<'e>>(e: E, id: String) -> Result<Option<Menu>> {
    timed(
        sqlx::query_as::<_, Menu>("SELECT * FROM menus WHERE id = $1")
            .bind(&id)
            .fetch_optional(e),
    )
    .await
    .map_err(|err| {
        tracing::error!("Error occurred while fetching menu with id {}: {}", id, err);
        Error::UnexpectedError
    })
}

pub async fn update_by_id<'e, E: PgExecutor<'e>>(
    e: E,
    id: String,
    payload: UpdateMenuPayload,
) -> Result<Option<Menu>> {
    timed(
        sqlx::query_as::<_, Menu>(
            "
            UPDATE menus SET
                name = COALESCE($1, name),
                category = COALESCE($2, category),
                start_date = COALESCE($3, start_date),
                end_date = COALESCE($4, end_date),
                updated_at = $5
            WHERE
                id = $6
            RETURNING *
            ",
        )
        .bind(payload.name)
        .bind(payload.category)
        .bind(payload.start_date)
        .bind(payload.end_date)
        .bind(Utc::now().naive_utc())
        .bind(&id)
        .fetch_optional(e),
    )
    .await
    .map_err(|err| {
        tracing::error!("Error occurred while updating menu with id {}: {}", id, err);
        Error::UnexpectedError
    })
}

define_find_many!(Menu, Collection::Menus);
